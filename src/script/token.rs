//! Grammar-symbol alphabet and token types.
//!
//! The language has a fixed, closed set of punctuation symbols; everything
//! else lexes as an atom.  [`Sym`] declares the alphabet in category order
//! (unary operators, opening brackets, closing brackets, binary operators,
//! assignment, terminator, reserved) so that every category predicate is a
//! single ordinal range check rather than a per-symbol branch.

/// A grammar symbol.
///
/// Declaration order is load-bearing: the category predicates below compare
/// discriminant ranges.  The last three symbols are reserved syntax the
/// lexer never produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sym {
    // Unary operators.
    Hash,
    At,
    Less,
    // Opening brackets.
    LBrace,
    LBracket,
    LParen,
    // Closing brackets.
    RBracket,
    RBrace,
    RParen,
    // Binary operators.
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    // Assignment.
    Eq,
    // Statement terminator.
    Semi,
    // Reserved two-character symbols; kept in the alphabet for forward
    // compatibility but unreachable from the lexer.
    LArrow,
    RArrow,
    DoubleColon,
}

impl Sym {
    /// The symbol's spelling in source text.
    pub fn text(self) -> &'static str {
        match self {
            Sym::Hash => "#",
            Sym::At => "@",
            Sym::Less => "<",
            Sym::LBrace => "{",
            Sym::LBracket => "[",
            Sym::LParen => "(",
            Sym::RBracket => "]",
            Sym::RBrace => "}",
            Sym::RParen => ")",
            Sym::Plus => "+",
            Sym::Minus => "-",
            Sym::Star => "*",
            Sym::Slash => "/",
            Sym::Percent => "%",
            Sym::Eq => "=",
            Sym::Semi => ";",
            Sym::LArrow => "<-",
            Sym::RArrow => "->",
            Sym::DoubleColon => "::",
        }
    }

    /// Map a single byte to its grammar symbol, if any.
    pub fn from_byte(b: u8) -> Option<Sym> {
        Some(match b {
            b'#' => Sym::Hash,
            b'@' => Sym::At,
            b'<' => Sym::Less,
            b'{' => Sym::LBrace,
            b'[' => Sym::LBracket,
            b'(' => Sym::LParen,
            b']' => Sym::RBracket,
            b'}' => Sym::RBrace,
            b')' => Sym::RParen,
            b'+' => Sym::Plus,
            b'-' => Sym::Minus,
            b'*' => Sym::Star,
            b'/' => Sym::Slash,
            b'%' => Sym::Percent,
            b'=' => Sym::Eq,
            b';' => Sym::Semi,
            _ => return None,
        })
    }

    pub fn is_unary_op(self) -> bool {
        (Sym::Hash..=Sym::Less).contains(&self)
    }

    pub fn is_open(self) -> bool {
        (Sym::LBrace..=Sym::LParen).contains(&self)
    }

    pub fn is_close(self) -> bool {
        (Sym::RBracket..=Sym::RParen).contains(&self)
    }

    pub fn is_paren(self) -> bool {
        self.is_open() || self.is_close()
    }

    pub fn is_binary_op(self) -> bool {
        (Sym::Plus..=Sym::Percent).contains(&self)
    }

    /// Symbols that may begin a term: unary operators and opening brackets.
    pub fn is_term_start(self) -> bool {
        self.is_unary_op() || self.is_open()
    }
}

/// True for bytes that end an atom run: whitespace, the symbol alphabet,
/// and the lexer-internal markers (comment, quote, escape).
pub fn is_boundary_byte(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'^' | b'\'' | b'\\') || Sym::from_byte(b).is_some()
}

/// A byte range into the pristine source, for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub len: usize,
}

impl Span {
    pub fn new(start: usize, len: usize) -> Self {
        Span { start, len }
    }

    pub fn end(self) -> usize {
        self.start + self.len
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Sym(Sym),
    Atom(Box<str>),
}

/// One token of the flat stream the evaluator walks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn sym(&self) -> Option<Sym> {
        match self.kind {
            TokenKind::Sym(s) => Some(s),
            TokenKind::Atom(_) => None,
        }
    }

    pub fn atom(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Sym(_) => None,
            TokenKind::Atom(text) => Some(text),
        }
    }

    pub fn is_sym(&self, s: Sym) -> bool {
        self.sym() == Some(s)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
