//! Symbol tables for a knowledge base
//!
//! The vocabulary interns every predicate, variable, constant and function name
//! into a typed id, so terms and literals compare and hash as small integers.
//! Each symbol additionally remembers whether it was *declared* (listed in the
//! problem header) and, for predicates and functions, its declared arity.
//!
//! Each symbol kind has its own id type:
//! - `VariableId` for variables
//! - `ConstantId` for constants
//! - `FunctionId` for function symbols
//! - `PredicateId` for predicate symbols
//!
//! A vocabulary is built once by the collaborator (parser, JSON loader, tests)
//! and is read-only for the lifetime of a proof attempt.

use super::clause::Clause;
use super::term::Term;
use crate::error::ProverError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// ID for an interned variable name
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableId(pub(crate) u32);

/// ID for an interned constant name
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConstantId(pub(crate) u32);

/// ID for an interned function symbol name
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FunctionId(pub(crate) u32);

/// ID for an interned predicate symbol name
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredicateId(pub(crate) u32);

impl VariableId {
    /// Build a variable id from a raw value (fresh variables have no name)
    pub fn from_raw(id: u32) -> Self {
        VariableId(id)
    }

    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl ConstantId {
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl FunctionId {
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl PredicateId {
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

/// The four kinds of symbol a vocabulary tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolKind {
    Predicate,
    Variable,
    Constant,
    Function,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SymbolKind::Predicate => "predicate",
            SymbolKind::Variable => "variable",
            SymbolKind::Constant => "constant",
            SymbolKind::Function => "function",
        };
        write!(f, "{}", name)
    }
}

/// Interned names of one symbol kind
#[derive(Debug, Clone, Default)]
struct SymbolTable {
    /// Interned names, indexed by ID
    names: Vec<String>,
    /// Lookup table from name to ID
    lookup: HashMap<String, u32>,
    /// Whether the symbol was listed in the problem header
    declared: Vec<bool>,
    /// Declared arity (predicates and functions only)
    arity: Vec<Option<u8>>,
}

impl SymbolTable {
    /// Intern a name, returning its ID (get-or-create, undeclared when new)
    fn intern(&mut self, name: &str) -> u32 {
        if let Some(&id) = self.lookup.get(name) {
            return id;
        }
        let id = self.names.len() as u32;
        self.names.push(name.to_string());
        self.lookup.insert(name.to_string(), id);
        self.declared.push(false);
        self.arity.push(None);
        id
    }

    /// Intern and mark as declared; a given arity overrides an earlier one
    fn declare(&mut self, name: &str, arity: Option<u8>) -> u32 {
        let id = self.intern(name);
        self.declared[id as usize] = true;
        if arity.is_some() {
            self.arity[id as usize] = arity;
        }
        id
    }

    fn resolve(&self, id: u32) -> Option<&str> {
        self.names.get(id as usize).map(String::as_str)
    }

    fn get(&self, name: &str) -> Option<u32> {
        self.lookup.get(name).copied()
    }

    fn is_declared(&self, id: u32) -> bool {
        self.declared.get(id as usize).copied().unwrap_or(false)
    }

    fn arity(&self, id: u32) -> Option<u8> {
        self.arity.get(id as usize).copied().flatten()
    }

    fn declared_names(&self) -> impl Iterator<Item = &str> {
        self.names
            .iter()
            .zip(&self.declared)
            .filter(|(_, &declared)| declared)
            .map(|(name, _)| name.as_str())
    }

    fn len(&self) -> usize {
        self.names.len()
    }
}

/// Symbol tables of a knowledge base.
///
/// Pass it alongside the clauses rather than keeping global state; the engine
/// only ever borrows it immutably.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    variables: SymbolTable,
    constants: SymbolTable,
    functions: SymbolTable,
    predicates: SymbolTable,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    // === Declarations ===

    pub fn declare_variable(&mut self, name: &str) -> VariableId {
        VariableId(self.variables.declare(name, None))
    }

    pub fn declare_constant(&mut self, name: &str) -> ConstantId {
        ConstantId(self.constants.declare(name, None))
    }

    /// Declare a function symbol, optionally fixing its arity
    pub fn declare_function(&mut self, name: &str, arity: Option<u8>) -> FunctionId {
        FunctionId(self.functions.declare(name, arity))
    }

    /// Declare a predicate symbol, optionally fixing its arity
    pub fn declare_predicate(&mut self, name: &str, arity: Option<u8>) -> PredicateId {
        PredicateId(self.predicates.declare(name, arity))
    }

    // === Interning (get-or-create, no declaration) ===

    pub fn intern_variable(&mut self, name: &str) -> VariableId {
        VariableId(self.variables.intern(name))
    }

    pub fn intern_constant(&mut self, name: &str) -> ConstantId {
        ConstantId(self.constants.intern(name))
    }

    pub fn intern_function(&mut self, name: &str) -> FunctionId {
        FunctionId(self.functions.intern(name))
    }

    pub fn intern_predicate(&mut self, name: &str) -> PredicateId {
        PredicateId(self.predicates.intern(name))
    }

    // === Lookup ===

    /// Name of a variable; `None` for fresh variables introduced by renaming
    pub fn variable_name(&self, id: VariableId) -> Option<&str> {
        self.variables.resolve(id.0)
    }

    pub fn constant_name(&self, id: ConstantId) -> Option<&str> {
        self.constants.resolve(id.0)
    }

    pub fn function_name(&self, id: FunctionId) -> Option<&str> {
        self.functions.resolve(id.0)
    }

    pub fn predicate_name(&self, id: PredicateId) -> Option<&str> {
        self.predicates.resolve(id.0)
    }

    pub fn get_variable(&self, name: &str) -> Option<VariableId> {
        self.variables.get(name).map(VariableId)
    }

    pub fn get_constant(&self, name: &str) -> Option<ConstantId> {
        self.constants.get(name).map(ConstantId)
    }

    pub fn get_predicate(&self, name: &str) -> Option<PredicateId> {
        self.predicates.get(name).map(PredicateId)
    }

    pub fn is_declared_variable(&self, name: &str) -> bool {
        self.variables.get(name).map_or(false, |id| self.variables.is_declared(id))
    }

    pub fn is_declared_constant(&self, name: &str) -> bool {
        self.constants.get(name).map_or(false, |id| self.constants.is_declared(id))
    }

    pub fn predicate_arity(&self, id: PredicateId) -> Option<u8> {
        self.predicates.arity(id.0)
    }

    pub fn function_arity(&self, id: FunctionId) -> Option<u8> {
        self.functions.arity(id.0)
    }

    /// Declared names of one symbol kind, in declaration order
    pub fn declared(&self, kind: SymbolKind) -> Vec<&str> {
        match kind {
            SymbolKind::Predicate => self.predicates.declared_names().collect(),
            SymbolKind::Variable => self.variables.declared_names().collect(),
            SymbolKind::Constant => self.constants.declared_names().collect(),
            SymbolKind::Function => self.functions.declared_names().collect(),
        }
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    pub fn constant_count(&self) -> usize {
        self.constants.len()
    }

    // === Validation ===

    /// Check every symbol used by `clauses` against the declarations.
    ///
    /// Fails on the first undeclared symbol or on a symbol used with an arity
    /// different from its declared arity (or, when none was declared, from its
    /// first use).
    pub fn validate(&self, clauses: &[Clause]) -> Result<(), ProverError> {
        let mut seen_predicates: HashMap<PredicateId, u8> = HashMap::new();
        let mut seen_functions: HashMap<FunctionId, u8> = HashMap::new();

        for clause in clauses {
            for lit in &clause.literals {
                let id = lit.predicate.id;
                if !self.predicates.is_declared(id.0) {
                    return Err(self.unknown(SymbolKind::Predicate, self.predicate_name(id), id.0));
                }
                let expected = self
                    .predicate_arity(id)
                    .unwrap_or(*seen_predicates.entry(id).or_insert(lit.predicate.arity));
                if expected != lit.predicate.arity || lit.args.len() != expected as usize {
                    return Err(ProverError::ArityMismatch {
                        kind: SymbolKind::Predicate,
                        name: self.predicate_name(id).unwrap_or_default().to_string(),
                        expected: expected as usize,
                        found: lit.args.len(),
                    });
                }
                for arg in &lit.args {
                    self.validate_term(arg, &mut seen_functions)?;
                }
            }
        }
        Ok(())
    }

    fn validate_term(
        &self,
        term: &Term,
        seen_functions: &mut HashMap<FunctionId, u8>,
    ) -> Result<(), ProverError> {
        match term {
            Term::Variable(v) => {
                if !self.variables.is_declared(v.id.0) {
                    return Err(self.unknown(SymbolKind::Variable, self.variable_name(v.id), v.id.0));
                }
            }
            Term::Constant(c) => {
                if !self.constants.is_declared(c.id.0) {
                    return Err(self.unknown(SymbolKind::Constant, self.constant_name(c.id), c.id.0));
                }
            }
            Term::Function(f, args) => {
                if !self.functions.is_declared(f.id.0) {
                    return Err(self.unknown(SymbolKind::Function, self.function_name(f.id), f.id.0));
                }
                let expected = self
                    .function_arity(f.id)
                    .unwrap_or(*seen_functions.entry(f.id).or_insert(f.arity));
                if expected != f.arity || args.len() != expected as usize {
                    return Err(ProverError::ArityMismatch {
                        kind: SymbolKind::Function,
                        name: self.function_name(f.id).unwrap_or_default().to_string(),
                        expected: expected as usize,
                        found: args.len(),
                    });
                }
                for arg in args {
                    self.validate_term(arg, seen_functions)?;
                }
            }
        }
        Ok(())
    }

    fn unknown(&self, kind: SymbolKind, name: Option<&str>, raw: u32) -> ProverError {
        ProverError::UnknownSymbol {
            kind,
            name: name.map_or_else(|| format!("#{}", raw), str::to_string),
        }
    }
}

impl fmt::Display for VariableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "V{}", self.0)
    }
}

impl fmt::Display for ConstantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{}", self.0)
    }
}

impl fmt::Display for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F{}", self.0)
    }
}

impl fmt::Display for PredicateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::{Constant, FunctionSymbol, Literal, PredicateSymbol, Variable};

    fn animal_vocabulary() -> Vocabulary {
        let mut vocab = Vocabulary::new();
        vocab.declare_predicate("dog", None);
        vocab.declare_predicate("animal", None);
        vocab.declare_variable("x");
        vocab.declare_constant("Fido");
        vocab
    }

    #[test]
    fn test_interning_is_get_or_create() {
        let mut vocab = Vocabulary::new();
        let a = vocab.intern_constant("A");
        let b = vocab.intern_constant("B");
        assert_ne!(a, b);
        assert_eq!(vocab.intern_constant("A"), a);
        assert_eq!(vocab.constant_name(b), Some("B"));
        assert_eq!(vocab.constant_count(), 2);
    }

    #[test]
    fn test_declared_names_keep_order() {
        let vocab = animal_vocabulary();
        assert_eq!(vocab.declared(SymbolKind::Predicate), vec!["dog", "animal"]);
        assert!(vocab.is_declared_variable("x"));
        assert!(!vocab.is_declared_variable("y"));
    }

    #[test]
    fn test_validate_accepts_declared_symbols() {
        let vocab = animal_vocabulary();
        let dog = PredicateSymbol::new(vocab.get_predicate("dog").unwrap(), 1);
        let x = Term::Variable(Variable::new(vocab.get_variable("x").unwrap()));
        let fido = Term::Constant(Constant::new(vocab.get_constant("Fido").unwrap()));
        let clauses = vec![
            Clause::new(vec![Literal::negative(dog, vec![x])]),
            Clause::new(vec![Literal::positive(dog, vec![fido])]),
        ];
        assert!(vocab.validate(&clauses).is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_constant() {
        let mut vocab = animal_vocabulary();
        let dog = PredicateSymbol::new(vocab.get_predicate("dog").unwrap(), 1);
        let rex = Term::Constant(Constant::new(vocab.intern_constant("Rex")));
        let clauses = vec![Clause::new(vec![Literal::positive(dog, vec![rex])])];

        match vocab.validate(&clauses) {
            Err(ProverError::UnknownSymbol { kind, name }) => {
                assert_eq!(kind, SymbolKind::Constant);
                assert_eq!(name, "Rex");
            }
            other => panic!("expected unknown symbol, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_inconsistent_arity() {
        let mut vocab = animal_vocabulary();
        let f = vocab.declare_function("f", Some(1));
        let dog = PredicateSymbol::new(vocab.get_predicate("dog").unwrap(), 1);
        let fido = Term::Constant(Constant::new(vocab.get_constant("Fido").unwrap()));
        let bad = Term::Function(FunctionSymbol::new(f, 2), vec![fido.clone(), fido]);
        let clauses = vec![Clause::new(vec![Literal::positive(dog, vec![bad])])];

        assert!(matches!(
            vocab.validate(&clauses),
            Err(ProverError::ArityMismatch { kind: SymbolKind::Function, expected: 1, found: 2, .. })
        ));
    }

    #[test]
    fn test_validate_uses_first_use_arity() {
        let vocab = animal_vocabulary();
        let dog_id = vocab.get_predicate("dog").unwrap();
        let fido = Term::Constant(Constant::new(vocab.get_constant("Fido").unwrap()));
        let clauses = vec![
            Clause::new(vec![Literal::positive(PredicateSymbol::new(dog_id, 1), vec![fido.clone()])]),
            Clause::new(vec![Literal::positive(
                PredicateSymbol::new(dog_id, 2),
                vec![fido.clone(), fido],
            )]),
        ];
        assert!(matches!(
            vocab.validate(&clauses),
            Err(ProverError::ArityMismatch { kind: SymbolKind::Predicate, expected: 1, found: 2, .. })
        ));
    }
}
