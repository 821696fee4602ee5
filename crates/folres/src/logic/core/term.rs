//! Terms in first-order logic

use super::vocabulary::{ConstantId, FunctionId, VariableId, Vocabulary};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A variable in first-order logic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Variable {
    pub id: VariableId,
}

impl Variable {
    /// Create a new variable from an ID
    pub fn new(id: VariableId) -> Self {
        Variable { id }
    }
}

/// A constant symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Constant {
    pub id: ConstantId,
}

impl Constant {
    /// Create a new constant from an ID
    pub fn new(id: ConstantId) -> Self {
        Constant { id }
    }
}

/// A function symbol with arity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FunctionSymbol {
    pub id: FunctionId,
    pub arity: u8,
}

impl FunctionSymbol {
    /// Create a new function symbol from an ID and arity
    pub fn new(id: FunctionId, arity: u8) -> Self {
        FunctionSymbol { id, arity }
    }
}

/// A term in first-order logic
///
/// The derived ordering is only used to put clauses in a canonical form; it
/// carries no logical meaning.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Term {
    Variable(Variable),
    Constant(Constant),
    Function(FunctionSymbol, Vec<Term>),
}

impl Term {
    /// Get all variables in this term (with repetitions, left to right)
    pub fn variables(&self) -> Vec<Variable> {
        match self {
            Term::Variable(v) => vec![*v],
            Term::Constant(_) => vec![],
            Term::Function(_, args) => args.iter().flat_map(|arg| arg.variables()).collect(),
        }
    }

    /// Collect all variable IDs in this term
    pub fn collect_variable_ids(&self, vars: &mut HashSet<VariableId>) {
        match self {
            Term::Variable(v) => {
                vars.insert(v.id);
            }
            Term::Constant(_) => {}
            Term::Function(_, args) => {
                for arg in args {
                    arg.collect_variable_ids(vars);
                }
            }
        }
    }

    /// Check whether `var` occurs anywhere in this term
    pub fn contains_variable(&self, var: VariableId) -> bool {
        match self {
            Term::Variable(v) => v.id == var,
            Term::Constant(_) => false,
            Term::Function(_, args) => args.iter().any(|arg| arg.contains_variable(var)),
        }
    }

    /// Format this term with a vocabulary for name resolution
    pub fn display<'a>(&'a self, vocabulary: &'a Vocabulary) -> TermDisplay<'a> {
        TermDisplay {
            term: self,
            vocabulary,
        }
    }
}

/// Display wrapper for Term that includes a vocabulary for name resolution
pub struct TermDisplay<'a> {
    term: &'a Term,
    vocabulary: &'a Vocabulary,
}

impl<'a> fmt::Display for TermDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.term {
            Term::Variable(v) => match self.vocabulary.variable_name(v.id) {
                Some(name) => write!(f, "{}", name),
                // fresh variable from standardizing apart
                None => write!(f, "_{}", v.id.as_u32()),
            },
            Term::Constant(c) => match self.vocabulary.constant_name(c.id) {
                Some(name) => write!(f, "{}", name),
                None => write!(f, "{}", c.id),
            },
            Term::Function(func, args) => {
                match self.vocabulary.function_name(func.id) {
                    Some(name) => write!(f, "{}", name)?,
                    None => write!(f, "{}", func.id)?,
                }
                write!(f, "(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", arg.display(self.vocabulary))?;
                }
                write!(f, ")")
            }
        }
    }
}

// Display implementations that show IDs (for debugging without a vocabulary)

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(v) => write!(f, "{}", v),
            Term::Constant(c) => write!(f, "{}", c),
            Term::Function(func, args) => {
                write!(f, "{}(", func.id)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}
