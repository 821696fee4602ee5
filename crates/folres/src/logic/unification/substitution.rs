//! Variable substitutions

use crate::logic::core::clause::Clause;
use crate::logic::core::literal::Literal;
use crate::logic::core::term::{Term, Variable};
use crate::logic::core::vocabulary::VariableId;
use std::collections::HashMap;
use thiserror::Error;

/// A binding was refused because the variable occurs in the term it would be
/// bound to (the binding would describe an infinite term).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("occurs check: {variable} occurs in {term}")]
pub struct OccursCheckViolation {
    pub variable: Variable,
    pub term: Term,
}

/// A substitution mapping variable IDs to terms.
///
/// Substitutions built through [`Substitution::extend`] are kept in solved
/// form: no bound variable occurs in any bound term, so applying the
/// substitution once is the same as applying it any number of times.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution {
    pub map: HashMap<VariableId, Term>,
}

impl Substitution {
    /// Create a new empty substitution
    pub fn new() -> Self {
        Substitution {
            map: HashMap::new(),
        }
    }

    /// Add a variable -> term mapping without any check.
    ///
    /// Only used for renamings, where every bound term is a fresh variable.
    pub(crate) fn insert(&mut self, var: Variable, term: Term) {
        self.map.insert(var.id, term);
    }

    /// Bind an unbound variable, keeping the substitution in solved form.
    ///
    /// The term is first instantiated with the current bindings; the binding
    /// is refused if the variable occurs in the result. Existing bindings are
    /// rewritten so that none of them mentions the newly bound variable.
    pub fn extend(mut self, var: Variable, term: Term) -> Result<Substitution, OccursCheckViolation> {
        debug_assert!(!self.contains(var.id), "extend called on a bound variable");

        let term = term.apply_substitution(&self);
        if term == Term::Variable(var) {
            return Ok(self);
        }
        if term.contains_variable(var.id) {
            return Err(OccursCheckViolation {
                variable: var,
                term,
            });
        }

        let mut single = Substitution::new();
        single.insert(var, term.clone());
        for bound in self.map.values_mut() {
            *bound = bound.apply_substitution(&single);
        }
        self.map.insert(var.id, term);
        Ok(self)
    }

    /// Compose two substitutions: the result acts like applying `self`
    /// first and `other` afterwards.
    pub fn compose(&self, other: &Substitution) -> Substitution {
        let mut result = Substitution::new();

        // Apply other to all terms in self
        for (&var_id, term) in &self.map {
            let term = term.apply_substitution(other);
            if term != Term::Variable(Variable::new(var_id)) {
                result.map.insert(var_id, term);
            }
        }

        // Add mappings from other that aren't in self
        for (&var_id, term) in &other.map {
            if !self.map.contains_key(&var_id) {
                result.map.insert(var_id, term.clone());
            }
        }

        result
    }

    /// Apply this substitution to a term
    pub fn apply(&self, term: &Term) -> Term {
        term.apply_substitution(self)
    }

    /// Get the term for a variable ID, if bound
    pub fn get(&self, var_id: VariableId) -> Option<&Term> {
        self.map.get(&var_id)
    }

    /// Check if a variable ID is bound
    pub fn contains(&self, var_id: VariableId) -> bool {
        self.map.contains_key(&var_id)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Term {
    /// Apply a substitution to this term
    pub fn apply_substitution(&self, subst: &Substitution) -> Term {
        match self {
            Term::Variable(v) => subst.map.get(&v.id).cloned().unwrap_or_else(|| self.clone()),
            Term::Constant(_) => self.clone(),
            Term::Function(f, args) => {
                let new_args = args
                    .iter()
                    .map(|arg| arg.apply_substitution(subst))
                    .collect();
                Term::Function(*f, new_args)
            }
        }
    }
}

impl Literal {
    /// Apply a substitution to this literal
    pub fn apply_substitution(&self, subst: &Substitution) -> Literal {
        Literal {
            predicate: self.predicate,
            args: self
                .args
                .iter()
                .map(|arg| arg.apply_substitution(subst))
                .collect(),
            polarity: self.polarity,
        }
    }
}

impl Clause {
    /// Apply a substitution to this clause (literals that become equal collapse)
    pub fn apply_substitution(&self, subst: &Substitution) -> Clause {
        Clause::new(
            self.literals
                .iter()
                .map(|lit| lit.apply_substitution(subst))
                .collect(),
        )
    }
}
