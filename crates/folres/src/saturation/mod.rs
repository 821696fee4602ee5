//! Saturation by binary resolution

mod state;
pub mod store;

pub use state::{SaturationResult, SaturationState, SaturationStats};
pub use store::ClauseStore;

use crate::config::ProverConfig;
use crate::error::{ProverError, Result};
use crate::logic::{Clause, Vocabulary};
use serde::{Deserialize, Serialize};

/// Answer to "is this knowledge base satisfiable?"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// The empty clause was derived
    Unsatisfiable,
    /// Saturation finished without deriving the empty clause
    Satisfiable,
}

impl Verdict {
    /// `"no"` for unsatisfiable, `"yes"` for satisfiable
    pub fn answer(self) -> &'static str {
        match self {
            Verdict::Unsatisfiable => "no",
            Verdict::Satisfiable => "yes",
        }
    }
}

/// Run saturation on the clauses of a knowledge base
pub fn saturate(
    vocabulary: &Vocabulary,
    clauses: &[Clause],
    config: &ProverConfig,
) -> (SaturationResult, SaturationStats) {
    let state = SaturationState::new(vocabulary, clauses, config.clone());
    state.saturate()
}

/// Decide satisfiability with the default configuration.
///
/// # Example
///
/// ```
/// use folres::{decide_satisfiability, parse_cnf, Verdict};
///
/// let problem = parse_cnf("Clauses:\nP(x)\n!P(x)\n").unwrap();
/// let verdict = decide_satisfiability(&problem.vocabulary, &problem.clauses).unwrap();
/// assert_eq!(verdict, Verdict::Unsatisfiable);
/// ```
pub fn decide_satisfiability(vocabulary: &Vocabulary, clauses: &[Clause]) -> Result<Verdict> {
    decide_satisfiability_with(vocabulary, clauses, &ProverConfig::default())
}

/// Decide satisfiability under `config`.
///
/// Returns [`ProverError::ResourceExhausted`] when a guard trips, and a
/// vocabulary error when validation is enabled and fails.
pub fn decide_satisfiability_with(
    vocabulary: &Vocabulary,
    clauses: &[Clause],
    config: &ProverConfig,
) -> Result<Verdict> {
    decide_with_stats(vocabulary, clauses, config).map(|(verdict, _)| verdict)
}

/// Like [`decide_satisfiability_with`], also returning the run's statistics
pub fn decide_with_stats(
    vocabulary: &Vocabulary,
    clauses: &[Clause],
    config: &ProverConfig,
) -> Result<(Verdict, SaturationStats)> {
    if config.validate_vocabulary {
        vocabulary.validate(clauses)?;
    }

    let (result, stats) = saturate(vocabulary, clauses, config);
    match result {
        SaturationResult::Unsatisfiable => Ok((Verdict::Unsatisfiable, stats)),
        SaturationResult::Satisfiable => Ok((Verdict::Satisfiable, stats)),
        SaturationResult::ResourceLimit(reason) => Err(ProverError::ResourceExhausted(reason)),
    }
}
