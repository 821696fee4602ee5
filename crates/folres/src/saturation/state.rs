//! Saturation state and the pass-based resolution loop
//!
//! ## Algorithm
//!
//! Input clauses are factored (tautologies dropped) and stored, collapsing
//! duplicates up to variable renaming. The loop then runs in passes:
//!
//! 1. **Pair selection**: every unordered pair `(i, j)` with `i < j` whose
//!    newer member `j` entered the store after the previous pass started.
//!    Each pair of stored clauses is therefore resolved exactly once.
//! 2. **Resolution**: all binary resolvents of the pair.
//! 3. **Accumulation**: the empty clause stops the run (`Unsatisfiable`);
//!    any other resolvent is stored unless a variant is already present.
//! 4. **Fixpoint**: a pass that stores nothing ends the run (`Satisfiable`).
//!
//! Resource guards (`max_clauses`, `max_passes`) end the run with
//! `ResourceLimit`, which is never a verdict.
//!
//! ## Parallel passes
//!
//! With `ProverConfig::parallel` the pairs of a pass are cut into batches.
//! A batch is resolved on the rayon pool against the store as it was when
//! the batch started, then merged by this thread in pair order. A worker
//! that derives the empty clause raises a shared flag and the remaining
//! pairs of the batch are skipped. Pairs already running when the flag is
//! raised still finish, so on a contradiction `pairs_resolved` and
//! `resolvents_generated` can exceed the sequential counts.

use super::store::ClauseStore;
use crate::config::ProverConfig;
use crate::generating::resolve_with;
use crate::logic::{Clause, Vocabulary};
use rayon::prelude::*;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, info, trace};

/// Result of saturation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaturationResult {
    /// Empty clause derived
    Unsatisfiable,
    /// A pass produced no new clause
    Satisfiable,
    /// A resource guard tripped before either verdict
    ResourceLimit(String),
}

/// Counters collected during one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaturationStats {
    pub passes: usize,
    pub pairs_resolved: usize,
    pub resolvents_generated: usize,
    pub duplicates_rejected: usize,
    pub clauses_stored: usize,
    pub total_time: Duration,
}

impl Serialize for SaturationStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("SaturationStats", 6)?;
        s.serialize_field("passes", &self.passes)?;
        s.serialize_field("pairs_resolved", &self.pairs_resolved)?;
        s.serialize_field("resolvents_generated", &self.resolvents_generated)?;
        s.serialize_field("duplicates_rejected", &self.duplicates_rejected)?;
        s.serialize_field("clauses_stored", &self.clauses_stored)?;
        s.serialize_field("total_time", &self.total_time.as_secs_f64())?;
        s.end()
    }
}

/// Why a pass stopped early
enum Halt {
    Contradiction,
    ResourceLimit(String),
}

/// Owns the clause store for one proof attempt.
pub struct SaturationState<'a> {
    vocabulary: &'a Vocabulary,
    store: ClauseStore,
    config: ProverConfig,
    /// First store index not yet paired as the newer member
    frontier: usize,
    stats: SaturationStats,
}

impl<'a> SaturationState<'a> {
    /// Create the state from the knowledge base's clauses
    pub fn new(vocabulary: &'a Vocabulary, initial_clauses: &[Clause], config: ProverConfig) -> Self {
        let mut store = ClauseStore::new();
        let mut stats = SaturationStats::default();
        for clause in initial_clauses {
            match clause.clone().factor() {
                Some(clause) => {
                    if store.insert(clause).is_none() {
                        stats.duplicates_rejected += 1;
                    }
                }
                None => trace!(clause = %clause.display(vocabulary), "dropping input tautology"),
            }
        }

        SaturationState {
            vocabulary,
            store,
            config,
            frontier: 0,
            stats,
        }
    }

    /// Clauses stored so far
    pub fn clauses(&self) -> &[Clause] {
        self.store.clauses()
    }

    pub fn stats(&self) -> &SaturationStats {
        &self.stats
    }

    /// Run passes until a verdict or a resource guard ends the attempt
    pub fn saturate(mut self) -> (SaturationResult, SaturationStats) {
        let start_time = Instant::now();

        let result = if self.store.clauses().iter().any(Clause::is_empty) {
            SaturationResult::Unsatisfiable
        } else {
            self.run_passes()
        };

        self.stats.clauses_stored = self.store.len();
        self.stats.total_time = start_time.elapsed();
        info!(
            result = ?result,
            passes = self.stats.passes,
            clauses = self.stats.clauses_stored,
            "saturation finished"
        );
        (result, self.stats)
    }

    fn run_passes(&mut self) -> SaturationResult {
        loop {
            if self.config.max_passes > 0 && self.stats.passes >= self.config.max_passes {
                return SaturationResult::ResourceLimit(format!(
                    "pass limit of {} reached",
                    self.config.max_passes
                ));
            }

            let end = self.store.len();
            let pairs = pairs_between(self.frontier, end);
            self.stats.passes += 1;
            debug!(
                pass = self.stats.passes,
                clauses = end,
                new_clauses = end - self.frontier,
                pairs = pairs.len(),
                "starting pass"
            );

            let outcome = if self.config.parallel && pairs.len() >= self.config.parallel_min_pairs {
                self.run_pass_parallel(&pairs)
            } else {
                self.run_pass_sequential(&pairs)
            };

            match outcome {
                Err(Halt::Contradiction) => return SaturationResult::Unsatisfiable,
                Err(Halt::ResourceLimit(reason)) => return SaturationResult::ResourceLimit(reason),
                Ok(()) => {}
            }

            let added = self.store.len() - end;
            debug!(pass = self.stats.passes, added, "pass complete");
            if added == 0 {
                return SaturationResult::Satisfiable;
            }
            self.frontier = end;
        }
    }

    fn run_pass_sequential(&mut self, pairs: &[(usize, usize)]) -> Result<(), Halt> {
        for &(i, j) in pairs {
            let clauses = self.store.clauses();
            let resolvents = resolve_with(&clauses[i], &clauses[j], self.fresh_floor());
            self.stats.pairs_resolved += 1;
            for resolvent in resolvents {
                self.accept(resolvent)?;
            }
        }
        Ok(())
    }

    fn run_pass_parallel(&mut self, pairs: &[(usize, usize)]) -> Result<(), Halt> {
        let batch_size = self.config.batch_size.max(1);
        let floor = self.fresh_floor();
        for batch in pairs.chunks(batch_size) {
            let found_empty = AtomicBool::new(false);
            let clauses = self.store.clauses();
            // None marks a pair skipped after the empty clause was found
            let results: Vec<Option<Vec<Clause>>> = batch
                .par_iter()
                .map(|&(i, j)| {
                    if found_empty.load(Ordering::Relaxed) {
                        return None;
                    }
                    let resolvents = resolve_with(&clauses[i], &clauses[j], floor);
                    if resolvents.iter().any(Clause::is_empty) {
                        found_empty.store(true, Ordering::Relaxed);
                    }
                    Some(resolvents)
                })
                .collect();

            self.stats.pairs_resolved += results.iter().filter(|r| r.is_some()).count();
            if found_empty.load(Ordering::Relaxed) {
                self.stats.resolvents_generated +=
                    results.iter().flatten().map(Vec::len).sum::<usize>();
                return Err(Halt::Contradiction);
            }
            for resolvent in results.into_iter().flatten().flatten() {
                self.accept(resolvent)?;
            }
        }
        Ok(())
    }

    /// First variable id free of every named variable
    fn fresh_floor(&self) -> u32 {
        u32::try_from(self.vocabulary.variable_count()).unwrap_or(u32::MAX)
    }

    /// Store one resolvent, or stop on the empty clause
    fn accept(&mut self, clause: Clause) -> Result<(), Halt> {
        self.stats.resolvents_generated += 1;
        if clause.is_empty() {
            return Err(Halt::Contradiction);
        }

        let limit = self.config.max_clauses;
        if limit > 0 && self.store.len() >= limit {
            if self.store.find_variant(&clause).is_some() {
                self.stats.duplicates_rejected += 1;
                return Ok(());
            }
            return Err(Halt::ResourceLimit(format!("clause limit of {} reached", limit)));
        }

        match self.store.insert(clause) {
            Some(idx) => trace!(idx, clause = %self.store.clauses()[idx].display(self.vocabulary), "stored"),
            None => self.stats.duplicates_rejected += 1,
        }
        Ok(())
    }
}

/// Pairs `(i, j)`, `i < j`, with `frontier <= j < end`, ordered by `j` then `i`
fn pairs_between(frontier: usize, end: usize) -> Vec<(usize, usize)> {
    (frontier..end)
        .flat_map(|j| (0..j).map(move |i| (i, j)))
        .collect()
}
