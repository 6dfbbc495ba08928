//! The language core: tokens, lexer, values, aliases, evaluator.
//!
//! Evaluation happens directly over the flat token array produced by
//! [`lexer::tokenize`]; there is no syntax tree.  The submodules are layered
//! bottom-up:
//!
//! - [`token`]: the closed grammar-symbol alphabet and spans
//! - [`lexer`]: source text to token array plus the quoted-literal set
//! - [`value`]: the scalar/row/table rank algebra
//! - [`alias`]: the prescanned, lazily bound name table
//! - [`error`]: the fatal-error taxonomy
//! - [`interp`]: recursive descent over the token array

pub mod alias;
pub mod error;
pub mod interp;
pub mod lexer;
pub mod token;
pub mod value;

// Re-exports for convenience.
pub use error::{Error, ErrorKind};
pub use interp::Interpreter;
pub use value::{Rank, Scalar, Value};
