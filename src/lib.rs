//! sake: a build-automation DSL evaluated directly off a flat token stream.
//!
//! A script is tokenized once into a flat array; a recursive-descent
//! evaluator walks that array statement by statement, computing values in a
//! three-rank algebra (scalar, row, table) and handing non-assignment
//! results to a process dispatcher.  There is no syntax tree and no shell:
//! a row is an exact argument vector, a table a parallel batch of them.

pub mod cli;
pub mod diag;
pub mod dispatch;
pub mod pool;
pub mod script;
