//! Deferred-free text buffer pool.
//!
//! Scalar texts dominate allocation traffic: every statement builds strings
//! that die as soon as the value is dispatched or an alias is rebound.
//! Instead of returning each buffer to the allocator immediately, released
//! buffers are queued for reuse up to a fixed byte quota.  Crossing the
//! quota drops the whole queue in one bulk release.  Purely a throughput
//! policy; correctness never depends on it.

/// Queued capacity ceiling, in bytes.
pub const DEALLOC_QUOTA: usize = 0x20_0000;

#[derive(Debug)]
pub struct BufPool {
    spare: Vec<String>,
    /// Sum of the queued buffers' capacities.
    held: usize,
    quota: usize,
}

impl Default for BufPool {
    fn default() -> Self {
        Self::new()
    }
}

impl BufPool {
    pub fn new() -> Self {
        Self::with_quota(DEALLOC_QUOTA)
    }

    pub fn with_quota(quota: usize) -> Self {
        BufPool {
            spare: Vec::new(),
            held: 0,
            quota,
        }
    }

    /// Release a buffer back to the pool.
    ///
    /// Oversized buffers bypass the queue entirely.  If queuing this buffer
    /// would push the held total past the quota, the queue is dropped in
    /// bulk first.
    pub fn reclaim(&mut self, mut buf: String) {
        let cap = buf.capacity();
        if cap > self.quota {
            return;
        }
        if self.held + cap > self.quota {
            self.spare.clear();
            self.held = 0;
        }
        buf.clear();
        self.held += cap;
        self.spare.push(buf);
    }

    /// Hand out an empty buffer with at least `min_cap` capacity, reusing a
    /// queued one when a large enough buffer is available.
    pub fn take(&mut self, min_cap: usize) -> String {
        match self.spare.iter().position(|b| b.capacity() >= min_cap) {
            Some(i) => {
                let buf = self.spare.swap_remove(i);
                self.held -= buf.capacity();
                buf
            }
            None => String::with_capacity(min_cap),
        }
    }

    #[cfg(test)]
    fn queued(&self) -> usize {
        self.spare.len()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
