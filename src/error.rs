use thiserror::Error;

/// Everything that can go wrong while compiling a regex into a DFA.
///
/// Each variant carries the position in the *preprocessed* regex (a byte
/// offset, except for the two alphabet-tokenizer variants, whose position is
/// an offset into the raw substring being segmented) at which the owning
/// stage detected the problem. Compilation aborts on the first error; no
/// stage retries or recovers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("string {text:?} cannot be formed from the alphabet (position {position})")]
    UnsegmentableString { text: String, position: usize },

    #[error("string {text:?} can be formed from the alphabet in more than one way (position {position})")]
    AmbiguousAlphabet { text: String, position: usize },

    #[error("invalid escape sequence at position {position}: {detail}")]
    InvalidEscape { position: usize, detail: String },

    #[error("unexpected token {token:?} at position {position}")]
    UnknownToken { position: usize, token: String },

    #[error("unexpected token at position {position}: expected {expected}, found {found}")]
    UnexpectedToken {
        position: usize,
        expected: String,
        found: String,
    },

    #[error("bad repetition at position {position}: {detail}")]
    BadRepetition { position: usize, detail: String },
}

pub type Result<T> = std::result::Result<T, CompileError>;
