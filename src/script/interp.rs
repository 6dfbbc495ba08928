//! The evaluator: recursive descent directly over the flat token array.
//!
//! There is no syntax tree.  Each statement is located by scanning to its
//! terminating `;`, then evaluated in one left-to-right pass; brackets
//! recurse with an explicit sub-range found by nesting-aware scan.  The
//! grammar:
//!
//! ```text
//! program   := statement (';' statement)*
//! statement := atom '=' chain | chain
//! chain     := term (binop term)*
//! term      := unop term | '(' chain? ')' | '[' chain* ']'
//!            | '{' chain* '}' | atom
//! ```
//!
//! All five binary symbols bind equally and associate left; a unary
//! operator binds to exactly the one following term.

use std::collections::HashSet;

use crate::dispatch::Dispatcher;
use crate::pool::BufPool;

use super::alias::AliasTable;
use super::error::{Error, ErrorKind};
use super::lexer::LexOutput;
use super::token::{Sym, Token, TokenKind};
use super::value::Value;

/// Owns everything one script run needs: the token array, the quoted-text
/// set, the alias table and the buffer pool.  The dispatcher is borrowed
/// per run so tests can substitute a recorder.
pub struct Interpreter {
    tokens: Vec<Token>,
    literals: HashSet<String>,
    aliases: AliasTable,
    pool: BufPool,
}

impl Interpreter {
    pub fn new(lex: LexOutput) -> Self {
        let mut aliases = AliasTable::new();
        aliases.prescan(&lex.tokens);
        Interpreter {
            tokens: lex.tokens,
            literals: lex.literals,
            aliases,
            pool: BufPool::new(),
        }
    }

    /// Execute the whole program, statement by statement.  Stops at the
    /// first fatal error.
    pub fn run(&mut self, dispatcher: &mut dyn Dispatcher) -> Result<(), Error> {
        let mut beg = 0;
        while beg < self.tokens.len() {
            let semi = self.tokens[beg..]
                .iter()
                .position(|t| t.is_sym(Sym::Semi))
                .map(|i| beg + i)
                .unwrap_or(self.tokens.len());
            self.eval_statement(beg, semi, dispatcher)?;
            beg = semi + 1;
        }
        Ok(())
    }

    // ── Statements ────────────────────────────────────────────────────────

    /// Evaluate one statement; `end` indexes its terminating `;`.
    fn eval_statement(
        &mut self,
        beg: usize,
        end: usize,
        dispatcher: &mut dyn Dispatcher,
    ) -> Result<(), Error> {
        if beg == end {
            return Ok(());
        }
        // A statement shorter than three tokens is never an assignment.
        if end - beg >= 3 && self.tokens[beg + 1].is_sym(Sym::Eq) {
            return self.eval_assignment(beg, end);
        }
        let value = self.eval_chain_all(beg, end)?;
        dispatcher
            .dispatch(&value)
            .map_err(|k| Error::new(k, self.tokens[beg].span))?;
        value.reclaim(&mut self.pool);
        Ok(())
    }

    fn eval_assignment(&mut self, beg: usize, end: usize) -> Result<(), Error> {
        let target = match self.tokens[beg].atom() {
            Some(text) => text.to_owned(),
            None => return Err(Error::new(ErrorKind::AliasingSymbol, self.tokens[beg].span)),
        };
        if self.literals.contains(&target) {
            return Err(Error::new(ErrorKind::AliasingLiteral, self.tokens[beg].span));
        }
        if let Some(i) = (beg + 2..end).find(|&i| self.tokens[i].is_sym(Sym::Eq)) {
            return Err(Error::new(ErrorKind::AssignInExpression, self.tokens[i].span));
        }
        let value = self.eval_chain_all(beg + 2, end)?;
        self.aliases.bind(&target, value, &mut self.pool);
        Ok(())
    }

    /// Parse one chain that must consume the whole `beg..end` range.
    fn eval_chain_all(&mut self, beg: usize, end: usize) -> Result<Value, Error> {
        if beg == end {
            // Both call sites guarantee a non-empty range; kept as a guard.
            let span = self.tokens.get(beg).map(|t| t.span).unwrap_or_default();
            return Err(Error::new(ErrorKind::EmptyExpression, span));
        }
        let (value, pos) = self.parse_chain(beg, end)?;
        if pos != end {
            let kind = if self.tokens[pos].is_sym(Sym::Eq) {
                ErrorKind::AssignInExpression
            } else {
                ErrorKind::MalformedExpression
            };
            return Err(Error::new(kind, self.tokens[pos].span));
        }
        Ok(value)
    }

    // ── Chains and terms ──────────────────────────────────────────────────

    /// Parse `term (binop term)*` starting at `pos`; returns the value and
    /// the index of the first unconsumed token.
    fn parse_chain(&mut self, pos: usize, end: usize) -> Result<(Value, usize), Error> {
        if self.is_binary_at(pos, end) {
            return Err(Error::new(
                ErrorKind::MissingLeftOperand,
                self.tokens[pos].span,
            ));
        }
        let (mut value, mut pos) = self.eval_term(pos, end)?;
        while let Some(op) = self.binary_at(pos, end) {
            let opi = pos;
            pos += 1;
            if pos == end || self.is_binary_at(pos, end) {
                return Err(Error::new(
                    ErrorKind::MissingRightOperand,
                    self.tokens[opi].span,
                ));
            }
            let (rhs, next) = self.eval_term(pos, end)?;
            pos = next;
            value = apply_binop(op, value, rhs)
                .map_err(|k| Error::new(k, self.tokens[opi].span))?;
        }
        Ok((value, pos))
    }

    fn binary_at(&self, pos: usize, end: usize) -> Option<Sym> {
        if pos >= end {
            return None;
        }
        self.tokens[pos].sym().filter(|s| s.is_binary_op())
    }

    fn is_binary_at(&self, pos: usize, end: usize) -> bool {
        self.binary_at(pos, end).is_some()
    }

    /// Parse one term.  Callers guarantee `pos < end`.
    fn eval_term(&mut self, pos: usize, end: usize) -> Result<(Value, usize), Error> {
        match self.tokens[pos].kind.clone() {
            TokenKind::Atom(text) => {
                let value = self.aliases.resolve(&text, &mut self.pool);
                Ok((value, pos + 1))
            }
            TokenKind::Sym(s) if s.is_unary_op() => self.eval_unary(s, pos, end),
            TokenKind::Sym(Sym::LParen) => self.eval_paren(pos, end),
            TokenKind::Sym(Sym::LBracket) => self.eval_row_literal(pos, end),
            TokenKind::Sym(Sym::LBrace) => self.eval_table_literal(pos, end),
            TokenKind::Sym(Sym::Eq) => Err(Error::new(
                ErrorKind::AssignInExpression,
                self.tokens[pos].span,
            )),
            TokenKind::Sym(_) => Err(Error::new(
                ErrorKind::MalformedExpression,
                self.tokens[pos].span,
            )),
        }
    }

    fn eval_unary(&mut self, op: Sym, pos: usize, end: usize) -> Result<(Value, usize), Error> {
        if pos + 1 == end {
            return Err(Error::new(ErrorKind::MissingArgument, self.tokens[pos].span));
        }
        let (operand, next) = self.eval_term(pos + 1, end)?;
        let value = match op {
            Sym::Hash => operand.mark(),
            Sym::Less => {
                println!("{operand}");
                operand
            }
            // Sym::At
            _ => operand
                .expand()
                .map_err(|k| Error::new(k, self.tokens[pos + 1].span))?,
        };
        Ok((value, next))
    }

    fn eval_paren(&mut self, pos: usize, end: usize) -> Result<(Value, usize), Error> {
        let close = self.find_close(pos, end)?;
        if close == pos + 1 {
            return Ok((Value::default(), close + 1));
        }
        let (value, after) = self.parse_chain(pos + 1, close)?;
        if after != close {
            return Err(Error::new(
                ErrorKind::IncompleteExpression,
                self.tokens[after].span,
            ));
        }
        Ok((value, close + 1))
    }

    fn eval_row_literal(&mut self, pos: usize, end: usize) -> Result<(Value, usize), Error> {
        let close = self.find_close(pos, end)?;
        let mut fields = Vec::new();
        let mut p = pos + 1;
        while p < close {
            let (v, next) = self.parse_chain(p, close)?;
            fields.extend(v.into_row());
            p = next;
        }
        Ok((Value::Row(fields), close + 1))
    }

    fn eval_table_literal(&mut self, pos: usize, end: usize) -> Result<(Value, usize), Error> {
        let close = self.find_close(pos, end)?;
        let mut rows = Vec::new();
        let mut p = pos + 1;
        while p < close {
            let (v, next) = self.parse_chain(p, close)?;
            rows.extend(v.into_table());
            p = next;
        }
        Ok((Value::Table(rows), close + 1))
    }

    /// Index of the closing bracket matching the opener at `open`, counting
    /// nesting of the same bracket kind only.
    fn find_close(&self, open: usize, end: usize) -> Result<usize, Error> {
        let open_sym = self.tokens[open].sym().unwrap_or(Sym::LParen);
        let (close_sym, err) = match open_sym {
            Sym::LParen => (Sym::RParen, ErrorKind::UnclosedParen),
            Sym::LBracket => (Sym::RBracket, ErrorKind::UnclosedBracket),
            _ => (Sym::RBrace, ErrorKind::UnclosedBracket),
        };
        let mut depth = 1usize;
        for p in open + 1..end {
            if self.tokens[p].is_sym(open_sym) {
                depth += 1;
            } else if self.tokens[p].is_sym(close_sym) {
                depth -= 1;
                if depth == 0 {
                    return Ok(p);
                }
            }
        }
        Err(Error::new(err, self.tokens[open].span))
    }

    #[cfg(test)]
    pub(crate) fn alias_value(&self, name: &str) -> Option<&Value> {
        self.aliases.lookup(name)
    }
}

fn apply_binop(op: Sym, lhs: Value, rhs: Value) -> Result<Value, ErrorKind> {
    match op {
        Sym::Plus => Ok(lhs.concat(rhs)),
        Sym::Minus => lhs.strip(rhs),
        Sym::Slash => lhs.filter(rhs, true),
        Sym::Percent => lhs.filter(rhs, false),
        // Sym::Star: declared in the alphabet, no semantics.
        _ => Err(ErrorKind::ReservedOperator),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
