//! Core data model: terms, literals, clauses and the vocabulary they refer to

pub mod clause;
pub mod literal;
pub mod term;
pub mod vocabulary;
