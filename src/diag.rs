//! Diagnostic rendering.
//!
//! The script core reports errors as a message plus a byte span into the
//! pristine source; this module turns that into the printed form:
//!
//! ```text
//! error: missing right operand:
//!   m.sk:3:7:
//!   │obj = src +;
//!   │          ~
//! ```

use crate::script::error::Error;
use crate::script::token::Span;

/// Pristine source text plus the display name used in diagnostics.
pub struct SourceMap<'a> {
    src: &'a str,
    file: &'a str,
}

impl<'a> SourceMap<'a> {
    pub fn new(src: &'a str, file: &'a str) -> Self {
        SourceMap { src, file }
    }

    /// 1-based (line, column) of a byte offset.
    fn locate(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.src.len());
        let before = &self.src[..offset];
        let line = 1 + before.matches('\n').count();
        let col = offset - before.rfind('\n').map(|i| i + 1).unwrap_or(0) + 1;
        (line, col)
    }

    /// The full text of the line containing `offset`, without its newline.
    fn line_text(&self, offset: usize) -> &str {
        let offset = offset.min(self.src.len());
        let start = self.src[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0);
        let end = self.src[start..]
            .find('\n')
            .map(|i| start + i)
            .unwrap_or(self.src.len());
        &self.src[start..end]
    }

    /// Render a located error: message, position, excerpt, marker.
    pub fn render(&self, span: Span, msg: &str) -> String {
        let (line, col) = self.locate(span.start);
        let excerpt = self.line_text(span.start);
        // Marker length is clamped to what fits on the excerpted line.
        let width = span.len.max(1).min(excerpt.len().saturating_sub(col - 1).max(1));
        let marker = "~".repeat(width);
        format!(
            "error: {msg}:\n  {file}:{line}:{col}:\n  \u{2502}{excerpt}\n  \u{2502}{pad}{marker}",
            file = self.file,
            pad = " ".repeat(col - 1),
        )
    }

    pub fn render_error(&self, err: &Error) -> String {
        self.render(err.span, &err.kind.to_string())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
