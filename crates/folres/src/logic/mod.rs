//! First-order logic representation and manipulation
//!
//! This module provides the fundamental types for representing CNF knowledge
//! bases (terms, literals, clauses, symbol tables) together with
//! substitutions and most general unifiers.

pub mod core;
pub mod unification;

// Re-export commonly used types
pub use self::core::clause::{Clause, ClauseDisplay, ClauseShape, FreshVariables};
pub use self::core::literal::{Literal, LiteralDisplay, PredicateSymbol};
pub use self::core::term::{Constant, FunctionSymbol, Term, TermDisplay, Variable};
pub use self::core::vocabulary::{
    ConstantId, FunctionId, PredicateId, SymbolKind, VariableId, Vocabulary,
};
pub use unification::{
    unify, unify_args, unify_literals, unify_with, OccursCheckViolation, Substitution,
    UnificationError, UnificationResult,
};
