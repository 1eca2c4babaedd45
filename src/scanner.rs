//! One-token-lookahead scanner over the preprocessed regex. This is the
//! sole place an escape's alphabet membership is checked - preprocessing
//! passes `\c` through untouched.
//!
//! Grounded on `original_source/lexer.py`'s `Lexer.next`/`peek`: `peek`
//! snapshots the cursor, calls `next`, and restores it, the same cheap
//! clone-based lookahead `NfaEvaluator::step_all` uses for exploring each
//! outgoing branch from a fresh copy of `self`. Single character recognition
//! (operators, digits) reuses `nom`'s combinators the way `parser/regex.rs`
//! does, even though the outer grammar here walks a `Token` stream rather
//! than raw `&str`.

use crate::error::{CompileError, Result};
use nom::character::complete::{digit1, one_of, satisfy};
use nom::combinator::recognize;
use nom::multi::many1;
use nom::IResult;

const OPERATORS: &str = "+*().{},";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Symbol(String),
    Operator(char),
    Number(String),
    Eof,
}

impl Token {
    pub fn is_operator(&self, c: char) -> bool {
        matches!(self, Token::Operator(o) if *o == c)
    }
}

/// Scans `text` (the *preprocessed* regex) into a one-token-lookahead
/// stream, resolving alphanumeric runs against `alphabet`.
pub struct Scanner<'a> {
    text: &'a str,
    chars: Vec<char>,
    alphabet: &'a crate::alphabet::Alphabet,
    cursor: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str, alphabet: &'a crate::alphabet::Alphabet) -> Self {
        Self {
            text,
            chars: text.chars().collect(),
            alphabet,
            cursor: 0,
        }
    }

    /// Returns the next token without consuming it.
    pub fn peek(&self) -> Result<Token> {
        let mut clone = Scanner {
            text: self.text,
            chars: self.chars.clone(),
            alphabet: self.alphabet,
            cursor: self.cursor,
        };
        clone.next_token()
    }

    /// Returns the byte-equivalent cursor position, for error reporting.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Consumes and returns the next token.
    pub fn next_token(&mut self) -> Result<Token> {
        while self.chars.get(self.cursor).is_some_and(|c| c.is_whitespace()) {
            self.cursor += 1;
        }

        let Some(&ch) = self.chars.get(self.cursor) else {
            return Ok(Token::Eof);
        };
        let start = self.cursor;
        self.cursor += 1;

        if ch == '\\' {
            let Some(&escaped) = self.chars.get(self.cursor) else {
                return Err(CompileError::InvalidEscape {
                    position: start,
                    detail: "regex ends with a trailing backslash".to_string(),
                });
            };
            self.cursor += 1;
            if !self.alphabet.contains(&escaped.to_string()) {
                return Err(CompileError::InvalidEscape {
                    position: start + 1,
                    detail: format!("{escaped:?} is not in the alphabet"),
                });
            }
            return Ok(Token::Symbol(escaped.to_string()));
        }

        if scan_operator(&ch.to_string()).is_ok() {
            return Ok(Token::Operator(ch));
        }

        if ch.is_ascii_digit() && !self.alphabet.contains(&ch.to_string()) {
            let rest: String = self.chars[self.cursor..].iter().collect();
            let digits = match scan_number(&rest) {
                Ok((_, digits)) => digits,
                Err(_) => String::new(),
            };
            self.cursor += digits.chars().count();
            let mut value = String::new();
            value.push(ch);
            value.push_str(&digits);
            return Ok(Token::Number(value));
        }

        let rest: String = self.chars[self.cursor..].iter().collect();
        let run = match scan_alnum_run(&rest) {
            Ok((_, run)) => run,
            Err(_) => String::new(),
        };
        self.cursor += run.chars().count();
        let mut value = String::new();
        value.push(ch);
        value.push_str(&run);

        if self.alphabet.contains(&value) {
            Ok(Token::Symbol(value))
        } else {
            Err(CompileError::UnknownToken {
                position: self.cursor,
                token: value,
            })
        }
    }
}

fn scan_operator(input: &str) -> IResult<&str, char> {
    one_of(OPERATORS)(input)
}

fn scan_number(input: &str) -> IResult<&str, String> {
    let (rest, digits) = digit1(input)?;
    Ok((rest, digits.to_string()))
}

fn scan_alnum_run(input: &str) -> IResult<&str, String> {
    let (rest, run) = recognize(many1(satisfy(|c: char| c.is_alphanumeric())))(input)?;
    Ok((rest, run.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Alphabet;

    fn alphabet(symbols: &[&str]) -> Alphabet {
        Alphabet::new(symbols.iter().map(|s| s.to_string()))
    }

    #[test]
    fn scans_operators_and_symbols() {
        let a = alphabet(&["a", "b"]);
        let mut s = Scanner::new("a.b+a*", &a);
        assert_eq!(s.next_token().unwrap(), Token::Symbol("a".into()));
        assert_eq!(s.next_token().unwrap(), Token::Operator('.'));
        assert_eq!(s.next_token().unwrap(), Token::Symbol("b".into()));
        assert_eq!(s.next_token().unwrap(), Token::Operator('+'));
        assert_eq!(s.next_token().unwrap(), Token::Symbol("a".into()));
        assert_eq!(s.next_token().unwrap(), Token::Operator('*'));
        assert_eq!(s.next_token().unwrap(), Token::Eof);
    }

    #[test]
    fn peek_does_not_consume() {
        let a = alphabet(&["a"]);
        let mut s = Scanner::new("a", &a);
        assert_eq!(s.peek().unwrap(), Token::Symbol("a".into()));
        assert_eq!(s.peek().unwrap(), Token::Symbol("a".into()));
        assert_eq!(s.next_token().unwrap(), Token::Symbol("a".into()));
        assert_eq!(s.next_token().unwrap(), Token::Eof);
    }

    #[test]
    fn reads_repetition_counts_as_numbers() {
        let a = alphabet(&["a"]);
        let mut s = Scanner::new("a{12,34}", &a);
        assert_eq!(s.next_token().unwrap(), Token::Symbol("a".into()));
        assert_eq!(s.next_token().unwrap(), Token::Operator('{'));
        assert_eq!(s.next_token().unwrap(), Token::Number("12".into()));
        assert_eq!(s.next_token().unwrap(), Token::Operator(','));
        assert_eq!(s.next_token().unwrap(), Token::Number("34".into()));
        assert_eq!(s.next_token().unwrap(), Token::Operator('}'));
    }

    #[test]
    fn unknown_alphanumeric_run_is_rejected() {
        let a = alphabet(&["a", "b"]);
        let mut s = Scanner::new("xyz", &a);
        assert!(s.next_token().is_err());
    }

    #[test]
    fn escape_outside_alphabet_is_rejected() {
        let a = alphabet(&["a"]);
        let mut s = Scanner::new("\\z", &a);
        assert!(s.next_token().is_err());
    }
}
