//! Turns a raw, human-written regex into the form the [`crate::scanner`]
//! reads character-by-character: explicit concatenation markers and
//! epsilon (`$`) inserted wherever `+` or `()` would otherwise leave an
//! operand missing. An escape (`\c`) is passed through verbatim, `c`
//! included - whether `c` is actually a member of the alphabet is the
//! scanner's question to ask, not this stage's.
//!
//! A direct translation of `original_source/lexer.py::process_regex`, kept
//! structurally close to the original's single left-to-right pass over the
//! raw characters, which likewise never inspects `self.alphabet` while
//! handling `\`. Two deliberate deviations, both recorded in `DESIGN.md`:
//!
//! - the reference indexes `regex[i+1]` before checking `i + 1 < n` in a few
//!   places (e.g. the `(` / `)` empty-group check), which would panic on a
//!   malformed trailing `(`; this translation checks bounds first and
//!   treats "no next character" the same as "next character is not `)`";
//! - the reference's ambiguity/unsegmentable errors always report position
//!   0 (they read the lexer's cursor before any token has been consumed);
//!   this translation reports the actual start offset of the ambiguous run,
//!   so every error carries a meaningful position.
use crate::alphabet::{tokenize, Alphabet};
use crate::error::{CompileError, Result};

/// Characters that switch the preprocessor out of "buffering a literal run"
/// mode.
const METACHARS: &str = "+*(){}\\";

/// Characters before which a concatenation `.` must *not* be inserted -
/// i.e. the preceding chunk already denotes an operator or opener.
const NO_DOT_BEFORE: &str = "().+*{\\";

/// Characters after which a concatenation `.` must *not* be inserted.
const NO_DOT_AFTER: &str = ").+*}{";

fn is_single_char_in(chunk: &str, set: &str) -> bool {
    let mut chars = chunk.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => set.contains(c),
        _ => false,
    }
}

/// Preprocesses `regex` into explicit-concatenation form, consulting
/// `alphabet` to resolve ambiguous literal runs.
pub fn preprocess(regex: &str, alphabet: &Alphabet) -> Result<String> {
    let chars: Vec<char> = regex.chars().collect();
    let n = chars.len();
    let mut buffer: Vec<char> = Vec::new();
    let mut result: Vec<String> = Vec::new();
    let mut i = 0usize;

    while i < n {
        let ch = chars[i];
        if METACHARS.contains(ch) {
            if !buffer.is_empty() {
                flush(&mut buffer, &mut result, alphabet, i)?;
            }

            if (ch == '(' || ch == '\\')
                && result
                    .last()
                    .is_some_and(|last| !is_single_char_in(last, NO_DOT_BEFORE))
            {
                result.push(".".to_string());
            }
            if ch == '+' && i == 0 {
                result.push("$".to_string());
            }

            result.push(ch.to_string());

            match ch {
                '(' => {
                    if chars.get(i + 1) == Some(&')') {
                        result.push("$".to_string());
                    }
                }
                '\\' => {
                    // Whether the escaped character belongs to the alphabet
                    // is left for the scanner to decide; a trailing `\` with
                    // nothing to escape is passed through the same way and
                    // surfaces there too.
                    if let Some(&escaped) = chars.get(i + 1) {
                        result.push(escaped.to_string());
                        i += 1;
                        if chars.get(i + 1).is_some_and(|c| !NO_DOT_AFTER.contains(*c)) {
                            result.push(".".to_string());
                        }
                    }
                }
                '+' => {
                    if chars.get(i + 1) == Some(&'+') || i == n - 1 {
                        result.push("$".to_string());
                    }
                }
                '*' | ')' | '}' => {
                    if chars.get(i + 1).is_some_and(|c| !NO_DOT_AFTER.contains(*c)) {
                        result.push(".".to_string());
                    }
                }
                '{' => {
                    while chars.get(i + 1).is_some_and(|c| *c != '}') {
                        i += 1;
                        result.push(chars[i].to_string());
                    }
                    if chars.get(i + 1) != Some(&'}') {
                        return Err(CompileError::BadRepetition {
                            position: i,
                            detail: "unclosed repetition, missing '}'".to_string(),
                        });
                    }
                    i += 1;
                    result.push("}".to_string());
                    if chars.get(i + 1).is_some_and(|c| !NO_DOT_AFTER.contains(*c)) {
                        result.push(".".to_string());
                    }
                }
                _ => unreachable!("METACHARS only contains the arms above"),
            }
        } else {
            buffer.push(ch);
        }
        i += 1;
    }

    if !buffer.is_empty() {
        flush(&mut buffer, &mut result, alphabet, n)?;
    }

    Ok(result.concat())
}

fn flush(
    buffer: &mut Vec<char>,
    result: &mut Vec<String>,
    alphabet: &Alphabet,
    end: usize,
) -> Result<()> {
    let text: String = buffer.iter().collect();
    let start = end - buffer.len();
    let tokens = tokenize(&text, alphabet, start)?;
    result.push(tokens.join("."));
    buffer.clear();
    Ok(())
}
