//! Error taxonomy for the script core.
//!
//! Every fatal condition the lexer, evaluator, value algebra, or dispatcher
//! can hit is a variant here, so callers (and tests) can tell a
//! script-author mistake apart from an environment failure.  Located errors
//! carry the offending token's span; rendering is the job of the
//! [`diag`](crate::diag) collaborator.

use thiserror::Error;

use super::token::Span;
use super::value::Rank;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    // ── Lex errors ────────────────────────────────────────────────────────
    #[error("non closed comment")]
    UnclosedComment,
    #[error("non closed litteral")]
    UnclosedLiteral,
    #[error("missing character to escape")]
    DanglingEscape,
    #[error("missing terminating semicolon")]
    MissingSemicolon,

    // ── Parse errors ──────────────────────────────────────────────────────
    #[error("no expression to evaluate")]
    EmptyExpression,
    #[error("missing left operand")]
    MissingLeftOperand,
    #[error("missing right operand")]
    MissingRightOperand,
    #[error("missing argument")]
    MissingArgument,
    #[error("malformed expression")]
    MalformedExpression,
    #[error("incomplete expression")]
    IncompleteExpression,
    #[error("missing closing paren")]
    UnclosedParen,
    #[error("missing closing bracket")]
    UnclosedBracket,
    #[error("aliasing base symbol")]
    AliasingSymbol,
    #[error("aliasing litteral")]
    AliasingLiteral,
    #[error("assign in expression")]
    AssignInExpression,

    // ── Operand errors ────────────────────────────────────────────────────
    #[error("unsupported operands: {lhs} {op} {rhs}")]
    UnsupportedOperands { op: char, lhs: Rank, rhs: Rank },
    #[error("unsupported operand: {op} {rank}")]
    UnsupportedUnary { op: char, rank: Rank },
    #[error("operator '*' is reserved")]
    ReservedOperator,

    // ── Resource errors ───────────────────────────────────────────────────
    #[error("empty directory name")]
    EmptyDirName,
    #[error("{0}")]
    Io(String),
    #[error("cannot spawn process: {0}")]
    Spawn(String),

    // ── Child failure ─────────────────────────────────────────────────────
    #[error("executed command failed")]
    CommandFailed,
}

/// A fatal error located at a source span.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct Error {
    pub kind: ErrorKind,
    pub span: Span,
}

impl Error {
    pub fn new(kind: ErrorKind, span: Span) -> Self {
        Error { kind, span }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
