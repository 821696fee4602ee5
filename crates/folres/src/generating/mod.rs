//! Generating inference rules.
//!
//! Binary resolution is the only generating rule of the prover; factoring of
//! exact duplicates and tautology deletion happen on each resolvent as it is
//! built (see [`Clause::factor`](crate::logic::Clause::factor)).

pub mod resolution;

pub use resolution::{resolve, resolve_on, resolve_with};
