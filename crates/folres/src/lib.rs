//! folres: resolution-based satisfiability checking for first-order CNF
//!
//! This library decides whether a knowledge base of first-order clauses is
//! unsatisfiable by saturating it under binary resolution with factoring.
//! A run ends with the empty clause (unsatisfiable), with a pass that derives
//! nothing new (satisfiable), or at a configured resource limit.

pub mod config;
pub mod error;
pub mod generating;
pub mod json;
pub mod logic;
pub mod parser;
pub mod saturation;

// Re-export commonly used types from logic
pub use logic::{
    unify, unify_literals, Clause, Constant, FunctionSymbol, Literal, OccursCheckViolation,
    PredicateSymbol, Substitution, SymbolKind, Term, UnificationError, UnificationResult,
    Variable, Vocabulary,
};

pub use config::ProverConfig;
pub use error::{ProverError, Result};
pub use generating::{resolve, resolve_with};

// Re-export saturation types
pub use saturation::{
    decide_satisfiability, decide_satisfiability_with, decide_with_stats, saturate, ClauseStore,
    SaturationResult, SaturationState, SaturationStats, Verdict,
};

pub use json::{parse_json, parse_json_file, KnowledgeBaseJson, RunReportJson};
pub use parser::{parse_cnf, parse_cnf_file, ParsedProblem};
