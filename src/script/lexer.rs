//! Script tokenizer.
//!
//! Splits raw script text into the flat token array the evaluator walks.
//! The source is never mutated; every token carries a span into it, so the
//! same pristine text serves both evaluation and diagnostics.
//!
//! Besides the token stream, tokenization collects the *literal set*: the
//! distinct texts of all quoted strings, consulted later to forbid using a
//! quoted literal's text as an alias target.

use std::collections::HashSet;

use super::error::{Error, ErrorKind};
use super::token::{is_boundary_byte, Span, Sym, Token, TokenKind};

/// Result of a successful tokenization.
#[derive(Debug, Default)]
pub struct LexOutput {
    pub tokens: Vec<Token>,
    /// Distinct quoted-string texts seen anywhere in the script.
    pub literals: HashSet<String>,
}

struct Cursor<'a> {
    src: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let b = self.peek();
        if b.is_some() {
            self.pos += 1;
        }
        b
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n')) {
            self.pos += 1;
        }
    }
}

/// Tokenize `src`.
///
/// On success the token array is either empty (a no-op script) or ends with
/// `;` — anything else is the "missing terminating semicolon" lex error.
pub fn tokenize(src: &str) -> Result<LexOutput, Error> {
    let mut cur = Cursor {
        src: src.as_bytes(),
        pos: 0,
    };
    let mut out = LexOutput::default();

    loop {
        cur.skip_whitespace();

        // Comments run through and including the next `;`.  Consecutive
        // comments are skipped in one pass.
        while cur.peek() == Some(b'^') {
            let mark = cur.pos;
            while !matches!(cur.peek(), None | Some(b';')) {
                cur.pos += 1;
            }
            if cur.advance().is_none() {
                return Err(Error::new(
                    ErrorKind::UnclosedComment,
                    Span::new(mark, cur.pos - mark),
                ));
            }
            cur.skip_whitespace();
        }

        let start = cur.pos;
        let b = match cur.advance() {
            None => break,
            Some(b) => b,
        };

        match b {
            b'\'' => {
                let body = cur.pos;
                while !matches!(cur.peek(), None | Some(b'\'')) {
                    cur.pos += 1;
                }
                if cur.advance().is_none() {
                    return Err(Error::new(
                        ErrorKind::UnclosedLiteral,
                        Span::new(start, cur.pos - start),
                    ));
                }
                let text = &src[body..cur.pos - 1];
                out.literals.insert(text.to_owned());
                out.tokens.push(Token {
                    kind: TokenKind::Atom(text.into()),
                    span: Span::new(start, cur.pos - start),
                });
            }
            b'\\' => {
                // The escape is identity-mapped: it exists to let a
                // syntactically special character pass as ordinary text.
                let ch = match src[cur.pos..].chars().next() {
                    None => {
                        return Err(Error::new(
                            ErrorKind::DanglingEscape,
                            Span::new(start, 1),
                        ))
                    }
                    Some(ch) => ch,
                };
                cur.pos += ch.len_utf8();
                out.tokens.push(Token {
                    kind: TokenKind::Atom(ch.to_string().into()),
                    span: Span::new(start, cur.pos - start),
                });
            }
            _ => {
                if let Some(sym) = Sym::from_byte(b) {
                    out.tokens.push(Token {
                        kind: TokenKind::Sym(sym),
                        span: Span::new(start, 1),
                    });
                } else {
                    // Atom: maximal run up to the next symbol byte or
                    // whitespace.
                    while matches!(cur.peek(), Some(b) if !is_boundary_byte(b)) {
                        cur.pos += 1;
                    }
                    out.tokens.push(Token {
                        kind: TokenKind::Atom(src[start..cur.pos].into()),
                        span: Span::new(start, cur.pos - start),
                    });
                }
            }
        }
    }

    if let Some(last) = out.tokens.last() {
        if !last.is_sym(Sym::Semi) {
            return Err(Error::new(ErrorKind::MissingSemicolon, last.span));
        }
    }
    Ok(out)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(src: &str) -> LexOutput {
        tokenize(src).expect("lex failed")
    }

    fn kinds(src: &str) -> Vec<TokenKind> {
        lex(src).tokens.into_iter().map(|t| t.kind).collect()
    }

    fn atom(s: &str) -> TokenKind {
        TokenKind::Atom(s.into())
    }

    fn sym(s: Sym) -> TokenKind {
        TokenKind::Sym(s)
    }

    #[test]
    fn empty_input_is_empty_stream() {
        assert!(lex("").tokens.is_empty());
        assert!(lex("  \t\n ").tokens.is_empty());
    }

    #[test]
    fn atoms_and_symbols() {
        assert_eq!(
            kinds("cc -o out;"),
            vec![atom("cc"), sym(Sym::Minus), atom("o"), atom("out"), sym(Sym::Semi)]
        );
    }

    #[test]
    fn atoms_stop_at_symbols_without_spaces() {
        assert_eq!(
            kinds("a+b;"),
            vec![atom("a"), sym(Sym::Plus), atom("b"), sym(Sym::Semi)]
        );
    }

    #[test]
    fn whitespace_ends_an_atom() {
        assert_eq!(
            kinds("foo\nbar;"),
            vec![atom("foo"), atom("bar"), sym(Sym::Semi)]
        );
    }

    #[test]
    fn brackets() {
        assert_eq!(
            kinds("{[a] (b)};"),
            vec![
                sym(Sym::LBrace),
                sym(Sym::LBracket),
                atom("a"),
                sym(Sym::RBracket),
                sym(Sym::LParen),
                atom("b"),
                sym(Sym::RParen),
                sym(Sym::RBrace),
                sym(Sym::Semi),
            ]
        );
    }

    #[test]
    fn comment_runs_through_semicolon() {
        assert_eq!(kinds("^ anything + [ here ; x;"), vec![atom("x"), sym(Sym::Semi)]);
    }

    #[test]
    fn consecutive_comments() {
        assert_eq!(kinds("^a; ^b; x;"), vec![atom("x"), sym(Sym::Semi)]);
    }

    #[test]
    fn unterminated_comment() {
        let e = tokenize("x; ^ never ends").unwrap_err();
        assert_eq!(e.kind, ErrorKind::UnclosedComment);
    }

    #[test]
    fn quoted_literal_is_one_atom() {
        let out = lex("'a + b';");
        assert_eq!(out.tokens[0].kind, atom("a + b"));
        assert!(out.literals.contains("a + b"));
    }

    #[test]
    fn empty_quoted_literal() {
        let out = lex("'';");
        assert_eq!(out.tokens[0].kind, atom(""));
        assert!(out.literals.contains(""));
    }

    #[test]
    fn unterminated_literal() {
        let e = tokenize("'oops").unwrap_err();
        assert_eq!(e.kind, ErrorKind::UnclosedLiteral);
    }

    #[test]
    fn escape_is_identity() {
        assert_eq!(
            kinds(r"\; \+ \a;"),
            vec![atom(";"), atom("+"), atom("a"), sym(Sym::Semi)]
        );
    }

    #[test]
    fn escape_at_eof() {
        let e = tokenize("x; \\").unwrap_err();
        assert_eq!(e.kind, ErrorKind::DanglingEscape);
    }

    #[test]
    fn missing_trailing_semicolon() {
        let e = tokenize("a b").unwrap_err();
        assert_eq!(e.kind, ErrorKind::MissingSemicolon);
    }

    #[test]
    fn spans_index_pristine_source() {
        let src = "ab 'cd';";
        let out = lex(src);
        let t0 = &out.tokens[0];
        assert_eq!(&src[t0.span.start..t0.span.end()], "ab");
        let t1 = &out.tokens[1];
        // The quoted atom's span covers the quotes.
        assert_eq!(&src[t1.span.start..t1.span.end()], "'cd'");
        assert_eq!(t1.atom(), Some("cd"));
    }

    #[test]
    fn relex_is_deterministic() {
        let src = "a = [x y]; ^c; {b} + 'q';";
        let first = lex(src).tokens;
        let second = lex(src).tokens;
        assert_eq!(first, second);
    }

    #[test]
    fn arrow_spellings_lex_as_two_symbols() {
        // `<-`, `->`, `::` are reserved; the lexer still produces their
        // constituent single-byte symbols (`:` is not a symbol at all).
        assert_eq!(
            kinds("a <- b;"),
            vec![atom("a"), sym(Sym::Less), sym(Sym::Minus), atom("b"), sym(Sym::Semi)]
        );
        assert_eq!(
            kinds("a :: b;"),
            vec![atom("a"), atom("::"), atom("b"), sym(Sym::Semi)]
        );
    }
}
