//! `nullable` / `firstpos` / `lastpos` / `followpos`, computed over the
//! augmented AST after position assignment.
//!
//! Grounded on `original_source/dfa.py`'s four like-named functions. Unlike
//! the Python reference (which recomputes `nullable`/`firstpos`/`lastpos`
//! from scratch on every call), this module caches all three per node in a
//! single bottom-up pass (`Node`), the same way `Regex::to_nfa` threads one
//! `StateCounter` through a single recursive pass rather than re-deriving
//! state indices on each call.

use crate::ast::Ast;
use std::collections::BTreeSet;

type PosSet = BTreeSet<u32>;

enum Shape<'a> {
    Leaf { value: &'a str, position: u32 },
    Epsilon,
    Star(Box<Node<'a>>),
    Concat(Box<Node<'a>>, Box<Node<'a>>),
    Union(Box<Node<'a>>, Box<Node<'a>>),
}

/// A node annotated, bottom-up, with its own `nullable`/`firstpos`/
/// `lastpos`.
struct Node<'a> {
    shape: Shape<'a>,
    nullable: bool,
    firstpos: PosSet,
    lastpos: PosSet,
}

fn annotate(ast: &Ast) -> Node<'_> {
    match ast {
        Ast::Symbol { value, position } => Node {
            shape: Shape::Leaf {
                value,
                position: *position,
            },
            nullable: false,
            firstpos: PosSet::from([*position]),
            lastpos: PosSet::from([*position]),
        },
        Ast::Epsilon => Node {
            shape: Shape::Epsilon,
            nullable: true,
            firstpos: PosSet::new(),
            lastpos: PosSet::new(),
        },
        Ast::Star(child) => {
            let child = annotate(child);
            Node {
                nullable: true,
                firstpos: child.firstpos.clone(),
                lastpos: child.lastpos.clone(),
                shape: Shape::Star(Box::new(child)),
            }
        }
        Ast::Concat(l, r) => {
            let l = annotate(l);
            let r = annotate(r);
            let nullable = l.nullable && r.nullable;
            let firstpos = if l.nullable {
                union(&l.firstpos, &r.firstpos)
            } else {
                l.firstpos.clone()
            };
            let lastpos = if r.nullable {
                union(&l.lastpos, &r.lastpos)
            } else {
                r.lastpos.clone()
            };
            Node {
                nullable,
                firstpos,
                lastpos,
                shape: Shape::Concat(Box::new(l), Box::new(r)),
            }
        }
        Ast::Union(l, r) => {
            let l = annotate(l);
            let r = annotate(r);
            Node {
                nullable: l.nullable || r.nullable,
                firstpos: union(&l.firstpos, &r.firstpos),
                lastpos: union(&l.lastpos, &r.lastpos),
                shape: Shape::Union(Box::new(l), Box::new(r)),
            }
        }
    }
}

fn union(a: &PosSet, b: &PosSet) -> PosSet {
    a.union(b).copied().collect()
}

/// The followpos table, plus the position -> leaf-value lookup the DFA
/// builder needs to decide, for a given state and alphabet symbol, which
/// positions to follow, and the start state (`firstpos` of the root).
pub struct Followpos {
    pub table: Vec<PosSet>,
    pub value_at: Vec<String>,
    pub start: PosSet,
}

/// Computes the followpos table for `ast`. `leaf_count` is the number of
/// `Symbol` leaves (including the end-marker), i.e. the highest position
/// assigned, used to size the dense table.
///
/// Grounded on `original_source/dfa.py::followpos`
/// (`init_followpos`/`calculate_followpos`) and `construct_dfa`'s use of
/// `firstpos(ast)` as the DFA start state.
pub fn build(ast: &Ast, leaf_count: u32) -> Followpos {
    let root = annotate(ast);
    let mut table: Vec<PosSet> = vec![PosSet::new(); leaf_count as usize];
    let mut value_at: Vec<String> = vec![String::new(); leaf_count as usize];
    collect_values(&root, &mut value_at);
    update_followpos(&root, &mut table);
    Followpos {
        table,
        value_at,
        start: root.firstpos,
    }
}

fn collect_values(node: &Node, value_at: &mut [String]) {
    match &node.shape {
        Shape::Leaf { value, position } => {
            value_at[(*position - 1) as usize] = (*value).to_string();
        }
        Shape::Epsilon => {}
        Shape::Star(child) => collect_values(child, value_at),
        Shape::Concat(l, r) | Shape::Union(l, r) => {
            collect_values(l, value_at);
            collect_values(r, value_at);
        }
    }
}

/// Applies the two followpos update rules at every internal node:
/// at a `CONCAT(L,R)`, `followpos[p] |= firstpos(R)` for `p` in
/// `lastpos(L)`; at a `STAR(C)`, `followpos[p] |= firstpos(C)` for `p` in
/// `lastpos(C)`.
fn update_followpos(node: &Node, table: &mut [PosSet]) {
    match &node.shape {
        Shape::Leaf { .. } | Shape::Epsilon => {}
        Shape::Star(child) => {
            for pos in &child.lastpos {
                table[(*pos - 1) as usize].extend(child.firstpos.iter().copied());
            }
            update_followpos(child, table);
        }
        Shape::Concat(l, r) => {
            for pos in &l.lastpos {
                table[(*pos - 1) as usize].extend(r.firstpos.iter().copied());
            }
            update_followpos(l, table);
            update_followpos(r, table);
        }
        Shape::Union(l, r) => {
            update_followpos(l, table);
            update_followpos(r, table);
        }
    }
}
