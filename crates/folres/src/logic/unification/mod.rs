//! Unification and substitution for first-order terms

pub mod mgu;
pub mod substitution;

#[cfg(test)]
mod proptest_tests;

pub use mgu::{unify, unify_args, unify_literals, unify_with, UnificationError, UnificationResult};
pub use substitution::{OccursCheckViolation, Substitution};
