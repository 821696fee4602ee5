//! Literals in first-order logic

use super::term::Term;
use super::vocabulary::{PredicateId, VariableId, Vocabulary};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A predicate symbol with arity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PredicateSymbol {
    pub id: PredicateId,
    pub arity: u8,
}

impl PredicateSymbol {
    /// Create a new predicate symbol from an ID and arity
    pub fn new(id: PredicateId, arity: u8) -> Self {
        PredicateSymbol { id, arity }
    }
}

/// A literal (positive or negative atomic formula)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Literal {
    pub predicate: PredicateSymbol,
    pub args: Vec<Term>,
    pub polarity: bool, // true = positive, false = negative
}

impl Literal {
    /// Create a new positive literal
    pub fn positive(predicate: PredicateSymbol, args: Vec<Term>) -> Self {
        Literal {
            predicate,
            args,
            polarity: true,
        }
    }

    /// Create a new negative literal
    pub fn negative(predicate: PredicateSymbol, args: Vec<Term>) -> Self {
        Literal {
            predicate,
            args,
            polarity: false,
        }
    }

    /// Get the complement of this literal
    pub fn complement(&self) -> Literal {
        Literal {
            predicate: self.predicate,
            args: self.args.clone(),
            polarity: !self.polarity,
        }
    }

    /// Same predicate and arity, opposite polarity.
    ///
    /// This is the precondition for attempting resolution on the pair; the
    /// arguments still have to unify.
    pub fn is_complementary(&self, other: &Literal) -> bool {
        self.predicate == other.predicate
            && self.args.len() == other.args.len()
            && self.polarity != other.polarity
    }

    /// Collect all variable IDs in this literal
    pub fn collect_variable_ids(&self, vars: &mut HashSet<VariableId>) {
        for term in &self.args {
            term.collect_variable_ids(vars);
        }
    }

    /// Format this literal with a vocabulary for name resolution
    pub fn display<'a>(&'a self, vocabulary: &'a Vocabulary) -> LiteralDisplay<'a> {
        LiteralDisplay {
            literal: self,
            vocabulary,
        }
    }
}

/// Display wrapper for Literal that includes a vocabulary for name resolution
pub struct LiteralDisplay<'a> {
    literal: &'a Literal,
    vocabulary: &'a Vocabulary,
}

impl<'a> fmt::Display for LiteralDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.literal.polarity {
            write!(f, "!")?;
        }
        match self.vocabulary.predicate_name(self.literal.predicate.id) {
            Some(name) => write!(f, "{}", name)?,
            None => write!(f, "{}", self.literal.predicate.id)?,
        }
        if self.literal.args.is_empty() {
            return Ok(());
        }
        write!(f, "(")?;
        for (i, arg) in self.literal.args.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", arg.display(self.vocabulary))?;
        }
        write!(f, ")")
    }
}

// Display implementation that shows IDs (for debugging without a vocabulary)

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.polarity {
            write!(f, "!")?;
        }
        write!(f, "{}(", self.predicate.id)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ")")
    }
}
