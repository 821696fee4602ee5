//! Clause storage with duplicate rejection up to variable renaming

use crate::logic::{Clause, ClauseShape};
use indexmap::IndexMap;

/// Every clause accepted during a run, indexed by insertion order.
///
/// Clauses are bucketed by their [`ClauseShape`] (predicate and polarity of
/// each literal). Two variants always share a shape, so a variant check only
/// has to look at the clauses of one bucket.
#[derive(Debug, Clone, Default)]
pub struct ClauseStore {
    clauses: Vec<Clause>,
    by_shape: IndexMap<ClauseShape, Vec<usize>>,
}

impl ClauseStore {
    pub fn new() -> Self {
        ClauseStore::default()
    }

    /// Store `clause` unless a variant of it is already present.
    ///
    /// Returns the new clause's index, or `None` for a duplicate.
    pub fn insert(&mut self, clause: Clause) -> Option<usize> {
        let shape = clause.shape();
        let bucket = self.by_shape.entry(shape).or_default();
        if bucket
            .iter()
            .any(|&idx| self.clauses[idx].equals_up_to_renaming(&clause))
        {
            return None;
        }

        let idx = self.clauses.len();
        bucket.push(idx);
        self.clauses.push(clause);
        Some(idx)
    }

    /// Index of a stored variant of `clause`, if any
    pub fn find_variant(&self, clause: &Clause) -> Option<usize> {
        self.by_shape.get(&clause.shape()).and_then(|bucket| {
            bucket
                .iter()
                .copied()
                .find(|&idx| self.clauses[idx].equals_up_to_renaming(clause))
        })
    }

    pub fn get(&self, idx: usize) -> Option<&Clause> {
        self.clauses.get(idx)
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}
