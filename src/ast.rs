//! The augmented syntax tree: a tagged sum type dispatched by `match`,
//! grounded on `RegexTree` (`regex/mod.rs`), which uses the same shape
//! (`Sequence`/`Alt`/`Repeat`/`Char` vs. this crate's
//! `Concat`/`Union`/`Star`/`Symbol`/`Epsilon`) for the same reason: no
//! inheritance is needed when every operation is a total `match`.

/// A node of the augmented regex syntax tree.
///
/// `Symbol` leaves carry a `position`, assigned by [`assign_positions`]
/// after repetition expansion; every other node is purely structural.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ast {
    Symbol { value: String, position: u32 },
    Epsilon,
    Star(Box<Ast>),
    Concat(Box<Ast>, Box<Ast>),
    Union(Box<Ast>, Box<Ast>),
}

impl Ast {
    pub fn symbol(value: impl Into<String>) -> Self {
        Ast::Symbol {
            value: value.into(),
            position: 0,
        }
    }

    pub fn concat(left: Ast, right: Ast) -> Self {
        Ast::Concat(Box::new(left), Box::new(right))
    }

    pub fn union(left: Ast, right: Ast) -> Self {
        Ast::Union(Box::new(left), Box::new(right))
    }

    pub fn star(child: Ast) -> Self {
        Ast::Star(Box::new(child))
    }

    /// Deep-clones the subtree, dropping any positions already assigned.
    ///
    /// Required before repetition expansion duplicates a subtree: each
    /// copy must be structurally independent so a later call to
    /// [`assign_positions`] gives every occurrence its own leaf position.
    /// Grounded on `original_source/parse.py::copy_pattern`.
    pub fn deep_clone(&self) -> Ast {
        match self {
            Ast::Symbol { value, .. } => Ast::symbol(value.clone()),
            Ast::Epsilon => Ast::Epsilon,
            Ast::Star(child) => Ast::star(child.deep_clone()),
            Ast::Concat(l, r) => Ast::concat(l.deep_clone(), r.deep_clone()),
            Ast::Union(l, r) => Ast::union(l.deep_clone(), r.deep_clone()),
        }
    }
}

/// Assigns consecutive positions, starting at `start`, to every `Symbol`
/// leaf in left-to-right order, and returns the next free position.
///
/// Must run after repetition expansion has produced its final,
/// structurally-independent copies. Grounded on
/// `original_source/parse.py::assign_positions`.
pub fn assign_positions(node: &mut Ast, start: u32) -> u32 {
    match node {
        Ast::Symbol { position, .. } => {
            *position = start;
            start + 1
        }
        Ast::Epsilon => start,
        Ast::Star(child) => assign_positions(child, start),
        Ast::Concat(l, r) | Ast::Union(l, r) => {
            let mid = assign_positions(l, start);
            assign_positions(r, mid)
        }
    }
}
