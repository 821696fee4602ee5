//! Error types for folres

use crate::logic::SymbolKind;
use std::io;
use thiserror::Error;

/// Fatal outcomes of a run.
///
/// Unification failures are not listed here: they are expected results of
/// the search and never leave the engine.
#[derive(Error, Debug)]
pub enum ProverError {
    #[error("unknown {kind} symbol: {name}")]
    UnknownSymbol { kind: SymbolKind, name: String },

    #[error("{kind} {name} used with {found} arguments, expected {expected}")]
    ArityMismatch {
        kind: SymbolKind,
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("resource limit reached: {0}")]
    ResourceExhausted(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ProverError>;
