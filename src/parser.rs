//! Recursive-descent parser over the [`Scanner`]'s token stream.
//!
//! `union`/`concat`/`star`/`factor` translate `original_source/parse.py`
//! one-to-one (left-associative loops, not precedence climbing); repetition
//! expansion (`repeat`/`repeat_at_least`/`repeat_between`) likewise. The
//! combinator style used in [`crate::scanner`] to recognize single
//! characters comes from `parser/regex.rs`; the grammar below is hand-rolled
//! `match`-on-`peek()`, the way the Python reference's `Parser` is, because
//! the token stream `Scanner` produces has no counterpart in a
//! character-level regex parser.

use crate::ast::Ast;
use crate::error::{CompileError, Result};
use crate::scanner::{Scanner, Token};

/// Upper bound on any single `{n}`/`{n,}`/`{n,m}` repetition count, guarding
/// against the followpos table's quadratic blow-up in the number of leaves.
pub const MAX_REPETITION_COUNT: u32 = 1_000;

pub struct Parser<'a> {
    scanner: Scanner<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(scanner: Scanner<'a>) -> Self {
        Self { scanner }
    }

    /// Parses the full regex and appends the terminal end-marker leaf,
    /// i.e. returns `CONCAT(union, SYMBOL('#'))`.
    pub fn parse(mut self) -> Result<Ast> {
        let body = self.union()?;
        self.expect_eof()?;
        Ok(Ast::concat(body, Ast::symbol("#")))
    }

    fn expect_eof(&mut self) -> Result<()> {
        let token = self.scanner.next_token()?;
        if token == Token::Eof {
            Ok(())
        } else {
            Err(CompileError::UnexpectedToken {
                position: self.scanner.position(),
                expected: "end of input".to_string(),
                found: format!("{token:?}"),
            })
        }
    }

    fn union(&mut self) -> Result<Ast> {
        let mut left = self.concat()?;
        while self.scanner.peek()?.is_operator('+') {
            self.consume_operator('+')?;
            let right = self.concat()?;
            left = Ast::union(left, right);
        }
        Ok(left)
    }

    fn concat(&mut self) -> Result<Ast> {
        let mut left = self.star()?;
        while self.scanner.peek()?.is_operator('.') {
            self.consume_operator('.')?;
            let right = self.star()?;
            left = Ast::concat(left, right);
        }
        Ok(left)
    }

    fn star(&mut self) -> Result<Ast> {
        let mut node = self.factor()?;
        while self.scanner.peek()?.is_operator('*') {
            self.consume_operator('*')?;
            node = Ast::star(node);
        }
        Ok(node)
    }

    fn factor(&mut self) -> Result<Ast> {
        let token = self.scanner.peek()?;
        match token {
            Token::Operator('(') => {
                self.consume_operator('(')?;
                let node = self.union()?;
                self.consume_operator(')')?;
                self.maybe_repeat(node)
            }
            Token::Symbol(value) if value == "$" => {
                self.scanner.next_token()?;
                Ok(Ast::Epsilon)
            }
            Token::Symbol(value) => {
                self.scanner.next_token()?;
                let node = Ast::symbol(value);
                self.maybe_repeat(node)
            }
            other => Err(CompileError::UnexpectedToken {
                position: self.scanner.position(),
                expected: "'(', '$', or a symbol".to_string(),
                found: format!("{other:?}"),
            }),
        }
    }

    fn maybe_repeat(&mut self, node: Ast) -> Result<Ast> {
        if self.scanner.peek()?.is_operator('{') {
            self.repeat_functions(node)
        } else {
            Ok(node)
        }
    }

    fn repeat_functions(&mut self, node: Ast) -> Result<Ast> {
        self.consume_operator('{')?;
        let n = self.consume_number()?;
        if self.scanner.peek()?.is_operator('}') {
            self.consume_operator('}')?;
            return expand_exact(&node, n, self.scanner.position());
        }
        self.consume_operator(',')?;
        if let Token::Number(_) = self.scanner.peek()? {
            let m = self.consume_number()?;
            self.consume_operator('}')?;
            expand_between(&node, n, m, self.scanner.position())
        } else {
            self.consume_operator('}')?;
            expand_at_least(&node, n, self.scanner.position())
        }
    }

    fn consume_operator(&mut self, expected: char) -> Result<()> {
        let token = self.scanner.next_token()?;
        if token.is_operator(expected) {
            Ok(())
        } else {
            Err(CompileError::UnexpectedToken {
                position: self.scanner.position(),
                expected: format!("'{expected}'"),
                found: format!("{token:?}"),
            })
        }
    }

    fn consume_number(&mut self) -> Result<u32> {
        match self.scanner.next_token()? {
            Token::Number(digits) => digits.parse().map_err(|_| CompileError::BadRepetition {
                position: self.scanner.position(),
                detail: format!("{digits:?} is not a valid repetition count"),
            }),
            other => Err(CompileError::UnexpectedToken {
                position: self.scanner.position(),
                expected: "a number".to_string(),
                found: format!("{other:?}"),
            }),
        }
    }
}

fn check_count(n: u32, position: usize) -> Result<()> {
    if n > MAX_REPETITION_COUNT {
        return Err(CompileError::BadRepetition {
            position,
            detail: format!("repetition count {n} exceeds the maximum of {MAX_REPETITION_COUNT}"),
        });
    }
    Ok(())
}

/// `X{n}`: `n` independent copies of `pattern`, concatenated. `n` must be
/// at least 1. Grounded on `original_source/parse.py::repeat`.
fn expand_exact(pattern: &Ast, n: u32, position: usize) -> Result<Ast> {
    if n < 1 {
        return Err(CompileError::BadRepetition {
            position,
            detail: "repetition count must be a positive integer".to_string(),
        });
    }
    check_count(n, position)?;
    let mut current = pattern.deep_clone();
    for _ in 1..n {
        current = Ast::concat(current, pattern.deep_clone());
    }
    Ok(current)
}

/// `X{n,}`: `X{n} . X*`. Grounded on
/// `original_source/parse.py::repeat_at_least`.
fn expand_at_least(pattern: &Ast, n: u32, position: usize) -> Result<Ast> {
    if n < 1 {
        return Err(CompileError::BadRepetition {
            position,
            detail: "repetition count must be a positive integer".to_string(),
        });
    }
    let exact = expand_exact(pattern, n, position)?;
    Ok(Ast::concat(exact, Ast::star(pattern.deep_clone())))
}

/// `X{n,m}`: `X{n} + X{n+1} + ... + X{m}`, left-associated. Grounded on
/// `original_source/parse.py::repeat_between`.
fn expand_between(pattern: &Ast, n: u32, m: u32, position: usize) -> Result<Ast> {
    if n < 1 || m < n {
        return Err(CompileError::BadRepetition {
            position,
            detail: format!("invalid range {{{n},{m}}}: need 1 <= n <= m"),
        });
    }
    check_count(m, position)?;
    let mut result = expand_exact(pattern, n, position)?;
    for k in (n + 1)..=m {
        result = Ast::union(result, expand_exact(pattern, k, position)?);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Alphabet;

    fn parse(regex: &str, symbols: &[&str]) -> Result<Ast> {
        let alphabet = Alphabet::new(symbols.iter().map(|s| s.to_string()));
        let scanner = Scanner::new(regex, &alphabet);
        Parser::new(scanner).parse()
    }

    #[test]
    fn simple_concatenation() {
        let ast = parse("a.b", &["a", "b"]).unwrap();
        assert_eq!(
            ast,
            Ast::concat(
                Ast::concat(Ast::symbol("a"), Ast::symbol("b")),
                Ast::symbol("#")
            )
        );
    }

    #[test]
    fn union_is_left_associative() {
        let ast = parse("a+b+a", &["a", "b"]).unwrap();
        let Ast::Concat(body, _end) = ast else { panic!() };
        assert_eq!(
            *body,
            Ast::union(Ast::union(Ast::symbol("a"), Ast::symbol("b")), Ast::symbol("a"))
        );
    }

    #[test]
    fn star_binds_tighter_than_concat() {
        let ast = parse("a*.b", &["a", "b"]).unwrap();
        let Ast::Concat(body, _end) = ast else { panic!() };
        assert_eq!(
            *body,
            Ast::concat(Ast::star(Ast::symbol("a")), Ast::symbol("b"))
        );
    }

    #[test]
    fn grouping_and_repetition() {
        let ast = parse("a{3}", &["a"]).unwrap();
        let Ast::Concat(body, _end) = ast else { panic!() };
        assert_eq!(
            *body,
            Ast::concat(
                Ast::concat(Ast::symbol("a"), Ast::symbol("a")),
                Ast::symbol("a")
            )
        );
    }

    #[test]
    fn zero_repetition_is_rejected() {
        assert!(parse("a{0}", &["a"]).is_err());
    }

    #[test]
    fn inverted_range_is_rejected() {
        assert!(parse("a{3,2}", &["a"]).is_err());
    }

    #[test]
    fn at_least_expands_to_exact_then_star() {
        let ast = parse("a{2,}", &["a"]).unwrap();
        let Ast::Concat(body, _end) = ast else { panic!() };
        assert_eq!(
            *body,
            Ast::concat(
                Ast::concat(Ast::symbol("a"), Ast::symbol("a")),
                Ast::star(Ast::symbol("a"))
            )
        );
    }

    #[test]
    fn between_expands_to_union_of_exact_repetitions() {
        let ast = parse("a{1,2}", &["a"]).unwrap();
        let Ast::Concat(body, _end) = ast else { panic!() };
        assert_eq!(
            *body,
            Ast::union(
                Ast::symbol("a"),
                Ast::concat(Ast::symbol("a"), Ast::symbol("a"))
            )
        );
    }

    #[test]
    fn trailing_garbage_is_rejected() {
        assert!(parse("a.b)", &["a", "b"]).is_err());
    }

    #[test]
    fn unclosed_group_is_rejected() {
        assert!(parse("(a", &["a"]).is_err());
    }
}
