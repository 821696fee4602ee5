//! Prover configuration types.

use serde::{Deserialize, Serialize};

/// Configuration for the saturation loop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProverConfig {
    /// Upper bound on stored clauses (0 means no limit)
    pub max_clauses: usize,
    /// Upper bound on saturation passes (0 means no limit)
    pub max_passes: usize,
    /// Reject undeclared symbols and inconsistent arities before searching
    pub validate_vocabulary: bool,
    /// Resolve the pairs of a pass on the rayon thread pool
    pub parallel: bool,
    /// Passes with fewer pairs than this run sequentially even when parallel
    pub parallel_min_pairs: usize,
    /// Number of pairs resolved between two merges into the clause store
    pub batch_size: usize,
}

impl Default for ProverConfig {
    fn default() -> Self {
        ProverConfig {
            max_clauses: 10_000,
            max_passes: 1_000,
            validate_vocabulary: false,
            parallel: false,
            parallel_min_pairs: 256,
            batch_size: 4096,
        }
    }
}

impl ProverConfig {
    /// Configuration without any resource guard
    pub fn unbounded() -> Self {
        ProverConfig {
            max_clauses: 0,
            max_passes: 0,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config: ProverConfig = serde_json::from_str(r#"{"max_clauses": 10, "parallel": true}"#).unwrap();
        assert_eq!(config.max_clauses, 10);
        assert!(config.parallel);
        assert_eq!(config.batch_size, ProverConfig::default().batch_size);
    }
}
