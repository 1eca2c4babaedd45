//! The DFA builder (followpos subset exploration) and the public,
//! read-only [`Dfa`] type.
//!
//! The worklist shape - a `HashMap<key, sequential name>` assigning names
//! in discovery order, with a canonicalized key for each state so two
//! discovery paths to an equal state agree on it - is grounded on
//! `Nfa::to_dfa` (`nfa/mod.rs`). The exploration itself (what a state *is*,
//! how a symbol's successor state is computed, and the explicit shared dead
//! state) is grounded on `original_source/dfa.py::construct_dfa`, which this
//! module follows closely: `BTreeSet<u32>` stands in for Python's
//! `frozenset`, used the same way as a canonical, hashable state key.
//!
//! Unlike a `Dfa` built from `Rc<str>`/`Rc<[Rc<str>]>` fields (which would
//! be `!Send`), this `Dfa` owns its strings directly so it can be shared
//! across threads for read-only consultation.

use crate::followpos::Followpos;
use std::collections::{BTreeMap, BTreeSet, HashMap};

type PosSet = BTreeSet<u32>;

/// A deterministic finite automaton: a start state, a set of accepting
/// states, and a total transition function over the (non-epsilon)
/// alphabet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dfa {
    start: String,
    accept: BTreeSet<String>,
    transitions: BTreeMap<String, BTreeMap<String, String>>,
}

impl Dfa {
    pub fn start_state(&self) -> &str {
        &self.start
    }

    pub fn accept_states(&self) -> &BTreeSet<String> {
        &self.accept
    }

    pub fn transitions(&self) -> &BTreeMap<String, BTreeMap<String, String>> {
        &self.transitions
    }
}

/// Looks up, or assigns and enqueues, the canonical name for `state`.
fn name_for(
    state: &PosSet,
    names: &mut HashMap<PosSet, String>,
    worklist: &mut Vec<PosSet>,
    next_name: &mut usize,
) -> String {
    if let Some(name) = names.get(state) {
        return name.clone();
    }
    let name = format!("q{next_name}");
    *next_name += 1;
    names.insert(state.clone(), name.clone());
    worklist.push(state.clone());
    name
}

/// Runs the worklist subset-exploration algorithm over `followpos` and
/// `alphabet`, producing the compiled [`Dfa`].
///
/// `end_marker_position` identifies the leaf whose presence in a state
/// marks that state accepting (the `#` leaf `construct_dfa` tests for with
/// `ast_by_position[pos].value == '#'`).
pub fn build(followpos: &Followpos, alphabet: &[String], end_marker_position: u32) -> Dfa {
    let start: PosSet = followpos.start.clone();

    let mut names: HashMap<PosSet, String> = HashMap::new();
    let mut worklist: Vec<PosSet> = Vec::new();
    let mut next_name = 0usize;

    let start_name = name_for(&start, &mut names, &mut worklist, &mut next_name);

    let dead_state: PosSet = PosSet::new();
    let dead_name = name_for(&dead_state, &mut names, &mut worklist, &mut next_name);

    let mut transitions: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
    let mut accept: BTreeSet<String> = BTreeSet::new();

    let mut explored: std::collections::HashSet<PosSet> = std::collections::HashSet::new();

    while let Some(state) = worklist.pop() {
        if !explored.insert(state.clone()) {
            continue;
        }
        let state_name = names[&state].clone();

        if state.contains(&end_marker_position) {
            accept.insert(state_name.clone());
        }

        let mut row = BTreeMap::new();
        if state == dead_state {
            for symbol in alphabet {
                row.insert(symbol.clone(), dead_name.clone());
            }
            transitions.insert(state_name, row);
            continue;
        }

        for symbol in alphabet {
            let mut successor: PosSet = PosSet::new();
            for &pos in &state {
                if followpos.value_at[(pos - 1) as usize] == *symbol {
                    successor.extend(followpos.table[(pos - 1) as usize].iter().copied());
                }
            }
            let target_name = if successor.is_empty() {
                dead_name.clone()
            } else {
                name_for(&successor, &mut names, &mut worklist, &mut next_name)
            };
            row.insert(symbol.clone(), target_name);
        }
        transitions.insert(state_name, row);
    }

    Dfa {
        start: start_name,
        accept,
        transitions,
    }
}
