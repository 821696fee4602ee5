//! Clauses (sets of literals)

use super::literal::{Literal, PredicateSymbol};
use super::term::{Term, Variable};
use super::vocabulary::{VariableId, Vocabulary};
use crate::logic::unification::Substitution;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// A clause (disjunction of literals).
///
/// Literals are kept sorted and free of exact duplicates, so two clauses with
/// the same literal set compare equal regardless of how they were built.
/// A clause with no literals is the empty clause, i.e. a contradiction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Clause {
    pub literals: Vec<Literal>,
}

/// Sorted (predicate, polarity) multiset of a clause.
///
/// Clauses that are variants of each other always have the same shape.
pub type ClauseShape = Vec<(PredicateSymbol, bool)>;

impl Clause {
    /// Create a new clause from literals (sorted, duplicates collapse)
    pub fn new(mut literals: Vec<Literal>) -> Self {
        literals.sort();
        literals.dedup();
        Clause { literals }
    }

    /// The empty clause
    pub fn empty() -> Self {
        Clause {
            literals: Vec::new(),
        }
    }

    /// Check if this clause is empty (contradiction)
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// Check for a literal together with its exact complement
    pub fn is_tautology(&self) -> bool {
        // complementary literals differ only in polarity, the last sort key,
        // so they are adjacent in canonical order
        self.literals.windows(2).any(|pair| {
            pair[0].predicate == pair[1].predicate
                && pair[0].args == pair[1].args
                && pair[0].polarity != pair[1].polarity
        })
    }

    /// Collapse duplicate literals and drop the clause if it is a tautology.
    ///
    /// Returns `None` for a tautology: it can never contribute a useful
    /// resolvent, so it is neither stored nor resolved.
    pub fn factor(self) -> Option<Clause> {
        let clause = Clause::new(self.literals);
        if clause.is_tautology() {
            None
        } else {
            Some(clause)
        }
    }

    /// All variable IDs occurring in this clause
    pub fn variable_ids(&self) -> HashSet<VariableId> {
        let mut vars = HashSet::new();
        for lit in &self.literals {
            lit.collect_variable_ids(&mut vars);
        }
        vars
    }

    /// Copy of this clause whose variables are renamed to fresh ids that do
    /// not occur in `in_use`. The clause itself is left untouched.
    pub fn standardize_apart(&self, in_use: &HashSet<VariableId>) -> Clause {
        let mut fresh = FreshVariables::above(in_use);
        self.rename_with(&mut fresh)
    }

    /// Rename every variable of this clause to the next ids of `fresh`
    pub fn rename_with(&self, fresh: &mut FreshVariables) -> Clause {
        let mut renaming = Substitution::new();
        for lit in &self.literals {
            for term in &lit.args {
                for var in term.variables() {
                    if !renaming.contains(var.id) {
                        renaming.insert(var, Term::Variable(fresh.next_variable()));
                    }
                }
            }
        }
        self.apply_substitution(&renaming)
    }

    /// Sorted predicate/polarity signature, used to bucket variant candidates
    pub fn shape(&self) -> ClauseShape {
        let mut shape: ClauseShape = self
            .literals
            .iter()
            .map(|lit| (lit.predicate, lit.polarity))
            .collect();
        shape.sort();
        shape
    }

    /// Check if two clauses are variants (identical up to a consistent,
    /// one-to-one renaming of variables).
    pub fn equals_up_to_renaming(&self, other: &Clause) -> bool {
        if self.literals.len() != other.literals.len() || self.shape() != other.shape() {
            return false;
        }
        let mut used = vec![false; other.literals.len()];
        match_literals_from(&self.literals, &other.literals, 0, &mut used, &VariableRenaming::default())
    }

    /// Format this clause with a vocabulary for name resolution
    pub fn display<'a>(&'a self, vocabulary: &'a Vocabulary) -> ClauseDisplay<'a> {
        ClauseDisplay {
            clause: self,
            vocabulary,
        }
    }
}

/// Fresh variable ids for one resolution step.
///
/// Ids are handed out from a monotonically increasing counter that starts
/// above every id the caller reported as in use. Ids below the vocabulary's
/// variable count belong to named variables; pass that count to
/// [`FreshVariables::at_least`] so fresh ids display as `_N`.
#[derive(Debug, Clone)]
pub struct FreshVariables {
    next: u32,
}

impl FreshVariables {
    /// Counter starting just above the largest id in `in_use`
    pub fn above(in_use: &HashSet<VariableId>) -> Self {
        let next = in_use.iter().map(|id| id.as_u32() + 1).max().unwrap_or(0);
        FreshVariables { next }
    }

    /// Raise the first id handed out to at least `floor`
    pub fn at_least(self, floor: u32) -> Self {
        FreshVariables {
            next: self.next.max(floor),
        }
    }

    pub fn next_variable(&mut self) -> Variable {
        let var = Variable::new(VariableId::from_raw(self.next));
        self.next += 1;
        var
    }
}

/// Partial bijection between the variables of two clauses
#[derive(Debug, Clone, Default)]
struct VariableRenaming {
    forward: HashMap<VariableId, VariableId>,
    backward: HashMap<VariableId, VariableId>,
}

impl VariableRenaming {
    fn match_terms(&mut self, left: &Term, right: &Term) -> bool {
        match (left, right) {
            (Term::Variable(v1), Term::Variable(v2)) => {
                match (self.forward.get(&v1.id), self.backward.get(&v2.id)) {
                    (Some(&mapped), Some(&back)) => mapped == v2.id && back == v1.id,
                    (None, None) => {
                        self.forward.insert(v1.id, v2.id);
                        self.backward.insert(v2.id, v1.id);
                        true
                    }
                    _ => false,
                }
            }
            (Term::Constant(c1), Term::Constant(c2)) => c1 == c2,
            (Term::Function(f1, args1), Term::Function(f2, args2)) => {
                f1 == f2
                    && args1.len() == args2.len()
                    && args1
                        .iter()
                        .zip(args2)
                        .all(|(a1, a2)| self.match_terms(a1, a2))
            }
            _ => false,
        }
    }
}

/// Assign `left[i..]` to unused literals of `right`, backtracking over choices
fn match_literals_from(
    left: &[Literal],
    right: &[Literal],
    i: usize,
    used: &mut [bool],
    renaming: &VariableRenaming,
) -> bool {
    let Some(lit) = left.get(i) else {
        return true;
    };
    for j in 0..right.len() {
        let candidate = &right[j];
        if used[j]
            || candidate.predicate != lit.predicate
            || candidate.polarity != lit.polarity
            || candidate.args.len() != lit.args.len()
        {
            continue;
        }
        let mut trial = renaming.clone();
        let matched = lit
            .args
            .iter()
            .zip(&candidate.args)
            .all(|(s, t)| trial.match_terms(s, t));
        if matched {
            used[j] = true;
            if match_literals_from(left, right, i + 1, used, &trial) {
                return true;
            }
            used[j] = false;
        }
    }
    false
}

/// Display wrapper for Clause that includes a vocabulary for name resolution
pub struct ClauseDisplay<'a> {
    clause: &'a Clause,
    vocabulary: &'a Vocabulary,
}

impl<'a> fmt::Display for ClauseDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.clause.is_empty() {
            write!(f, "⊥")
        } else {
            for (i, lit) in self.clause.literals.iter().enumerate() {
                if i > 0 {
                    write!(f, " ∨ ")?;
                }
                write!(f, "{}", lit.display(self.vocabulary))?;
            }
            Ok(())
        }
    }
}

// Display implementation that shows IDs (for debugging without a vocabulary)
impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "⊥")
        } else {
            for (i, lit) in self.literals.iter().enumerate() {
                if i > 0 {
                    write!(f, " ∨ ")?;
                }
                write!(f, "{}", lit)?;
            }
            Ok(())
        }
    }
}
