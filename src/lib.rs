//! # followdfa
//!
//! Compiles a regular expression, written over a user-supplied finite
//! alphabet, directly into a deterministic finite automaton using the
//! *followpos* construction (the direct-construction algorithm attributed
//! to Aho, Sethi and Ullman). No intermediate NFA is ever built.
//!
//! ## Usage
//!
//! ```rust
//! use followdfa::compile;
//!
//! let dfa = compile("a+b", ["a", "b", "c"]).unwrap();
//!
//! // walking the transition table by hand, starting from the start state:
//! let after_a = &dfa.transitions()[dfa.start_state()]["a"];
//! assert!(dfa.accept_states().contains(after_a));
//! let after_c = &dfa.transitions()[dfa.start_state()]["c"];
//! assert!(!dfa.accept_states().contains(after_c));
//! ```
//!
//! ## Syntax
//!
//! | Form | Meaning |
//! |---|---|
//! | `X Y` | concatenation (implicit) |
//! | `X + Y` | union / alternation |
//! | `X *` | Kleene closure |
//! | `X { n }` | exactly n copies, n ≥ 1 |
//! | `X { n , }` | n or more copies |
//! | `X { n , m }` | between n and m copies inclusive |
//! | `( … )` | grouping |
//! | `$` | epsilon literal |
//! | `\ c` | escape: literal `c` (must be in the alphabet) |
//!
//! Reserved characters, which cannot appear in the alphabet:
//! `+ * ( ) . { } , \ $ #`.
//!
//! ## Pipeline
//!
//! The regex is tokenized against the user's alphabet, preprocessed into
//! explicit-concatenation form, parsed into an augmented syntax tree with
//! numbered leaves, annotated with `nullable`/`firstpos`/`lastpos`, and
//! finally explored via the followpos worklist algorithm into a DFA. See
//! each module's docs for the stage it implements.

pub mod alphabet;
pub mod ast;
pub mod dfa;
pub mod error;
pub mod followpos;
pub mod parser;
pub mod preprocess;
pub mod scanner;

use crate::alphabet::Alphabet;
use crate::ast::assign_positions;
use crate::dfa::Dfa;
use crate::error::Result;
use crate::parser::Parser;
use crate::preprocess::preprocess;
use crate::scanner::Scanner;

/// Compiles `regex`, interpreted over `alphabet`, into a [`Dfa`].
///
/// The sole programmatic entry point: tokenizes, preprocesses, parses,
/// assigns leaf positions, builds the followpos table, and runs the
/// worklist subset exploration, propagating the first error any stage
/// raises.
pub fn compile<I, S>(regex: &str, alphabet: I) -> Result<Dfa>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let alphabet = Alphabet::new(alphabet);
    let processed = preprocess(regex, &alphabet)?;
    let scanner = Scanner::new(&processed, &alphabet);
    let mut ast = Parser::new(scanner).parse()?;
    let leaf_count = assign_positions(&mut ast, 1) - 1;
    let end_marker_position = leaf_count;
    let table = followpos::build(&ast, leaf_count);
    Ok(dfa::build(&table, alphabet.symbols(), end_marker_position))
}
