//! Alias table: the language's only binding construct.
//!
//! Every atom text in the script is registered up front by a prescan of the
//! token array; values are bound lazily as assignment statements execute.
//! Referencing a name that was never assigned yields a scalar holding the
//! name itself, which is what makes bare words like `cc` or `-O2` usable
//! without quoting.

use std::collections::HashMap;

use crate::pool::BufPool;

use super::token::{Token, TokenKind};
use super::value::{Scalar, Value};

#[derive(Debug, Default)]
pub struct AliasTable {
    entries: HashMap<String, Option<Value>>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every atom text in the token array, unbound.  Atoms already
    /// present (including already-bound ones) are left alone.
    pub fn prescan(&mut self, tokens: &[Token]) {
        for tok in tokens {
            if let TokenKind::Atom(text) = &tok.kind {
                self.entries.entry(text.to_string()).or_insert(None);
            }
        }
    }

    /// The bound value for `name`, if any.
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.entries.get(name).and_then(Option::as_ref)
    }

    /// Resolve a reference: the bound value, or the name itself as an
    /// unmarked scalar.
    pub fn resolve(&self, name: &str, pool: &mut BufPool) -> Value {
        match self.lookup(name) {
            Some(v) => v.clone(),
            None => {
                let mut text = pool.take(name.len());
                text.push_str(name);
                Value::Scalar(Scalar {
                    text,
                    marked: false,
                })
            }
        }
    }

    /// Bind `name` to `value`, recycling the buffers of any prior binding.
    pub fn bind(&mut self, name: &str, value: Value, pool: &mut BufPool) {
        let slot = self.entries.entry(name.to_owned()).or_insert(None);
        if let Some(old) = slot.replace(value) {
            old.reclaim(pool);
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
