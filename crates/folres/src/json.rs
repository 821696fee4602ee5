//! JSON serialization types for knowledge bases and run reports

use crate::error::{ProverError, Result};
use crate::logic::{
    Clause, Constant, FunctionSymbol, Literal, PredicateSymbol, SymbolKind, Term, Variable,
    Vocabulary,
};
use crate::parser::ParsedProblem;
use crate::saturation::{SaturationStats, Verdict};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// JSON representation of a term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TermJson {
    Variable { name: String },
    Constant { name: String },
    Function { name: String, args: Vec<TermJson> },
}

impl TermJson {
    pub fn from_term(term: &Term, vocabulary: &Vocabulary) -> Self {
        match term {
            Term::Variable(_) => TermJson::Variable {
                name: term.display(vocabulary).to_string(),
            },
            Term::Constant(_) => TermJson::Constant {
                name: term.display(vocabulary).to_string(),
            },
            Term::Function(f, args) => TermJson::Function {
                name: vocabulary.function_name(f.id).unwrap_or_default().to_string(),
                args: args.iter().map(|t| TermJson::from_term(t, vocabulary)).collect(),
            },
        }
    }

    fn to_term(&self, vocabulary: &mut Vocabulary) -> Result<Term> {
        Ok(match self {
            TermJson::Variable { name } => {
                Term::Variable(Variable::new(vocabulary.intern_variable(name)))
            }
            TermJson::Constant { name } => {
                Term::Constant(Constant::new(vocabulary.intern_constant(name)))
            }
            TermJson::Function { name, args } => {
                let args = args
                    .iter()
                    .map(|arg| arg.to_term(vocabulary))
                    .collect::<Result<Vec<_>>>()?;
                let arity = arity_of(SymbolKind::Function, name, args.len())?;
                Term::Function(FunctionSymbol::new(vocabulary.intern_function(name), arity), args)
            }
        })
    }
}

/// JSON representation of an atom
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtomJson {
    pub predicate: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<TermJson>,
}

/// JSON representation of a literal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiteralJson {
    pub polarity: bool,
    pub atom: AtomJson,
}

impl LiteralJson {
    pub fn from_literal(lit: &Literal, vocabulary: &Vocabulary) -> Self {
        LiteralJson {
            polarity: lit.polarity,
            atom: AtomJson {
                predicate: vocabulary
                    .predicate_name(lit.predicate.id)
                    .unwrap_or_default()
                    .to_string(),
                args: lit.args.iter().map(|t| TermJson::from_term(t, vocabulary)).collect(),
            },
        }
    }

    fn to_literal(&self, vocabulary: &mut Vocabulary) -> Result<Literal> {
        let args = self
            .atom
            .args
            .iter()
            .map(|arg| arg.to_term(vocabulary))
            .collect::<Result<Vec<_>>>()?;
        let arity = arity_of(SymbolKind::Predicate, &self.atom.predicate, args.len())?;
        let predicate = PredicateSymbol::new(vocabulary.intern_predicate(&self.atom.predicate), arity);
        Ok(if self.polarity {
            Literal::positive(predicate, args)
        } else {
            Literal::negative(predicate, args)
        })
    }
}

/// JSON representation of a clause
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseJson {
    pub literals: Vec<LiteralJson>,
}

impl ClauseJson {
    pub fn from_clause(clause: &Clause, vocabulary: &Vocabulary) -> Self {
        ClauseJson {
            literals: clause
                .literals
                .iter()
                .map(|l| LiteralJson::from_literal(l, vocabulary))
                .collect(),
        }
    }
}

/// A knowledge base: declared symbols plus its clauses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeBaseJson {
    pub predicates: Vec<String>,
    pub variables: Vec<String>,
    pub constants: Vec<String>,
    pub functions: Vec<String>,
    pub clauses: Vec<ClauseJson>,
}

impl KnowledgeBaseJson {
    pub fn from_problem(vocabulary: &Vocabulary, clauses: &[Clause]) -> Self {
        let names = |kind: SymbolKind| -> Vec<String> {
            vocabulary
                .declared(kind)
                .into_iter()
                .map(str::to_string)
                .collect()
        };
        KnowledgeBaseJson {
            predicates: names(SymbolKind::Predicate),
            variables: names(SymbolKind::Variable),
            constants: names(SymbolKind::Constant),
            functions: names(SymbolKind::Function),
            clauses: clauses
                .iter()
                .map(|c| ClauseJson::from_clause(c, vocabulary))
                .collect(),
        }
    }

    /// Intern the declarations and clauses into a fresh vocabulary
    pub fn into_problem(self) -> Result<ParsedProblem> {
        let mut vocabulary = Vocabulary::new();
        for name in &self.predicates {
            vocabulary.declare_predicate(name, None);
        }
        for name in &self.variables {
            vocabulary.declare_variable(name);
        }
        for name in &self.constants {
            vocabulary.declare_constant(name);
        }
        for name in &self.functions {
            vocabulary.declare_function(name, None);
        }

        let clauses = self
            .clauses
            .iter()
            .map(|clause| {
                let literals = clause
                    .literals
                    .iter()
                    .map(|lit| lit.to_literal(&mut vocabulary))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Clause::new(literals))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ParsedProblem {
            vocabulary,
            clauses,
        })
    }
}

/// Parse a JSON knowledge base
pub fn parse_json(input: &str) -> Result<ParsedProblem> {
    let kb: KnowledgeBaseJson = serde_json::from_str(input)?;
    kb.into_problem()
}

/// Parse a JSON knowledge base file
pub fn parse_json_file(path: impl AsRef<Path>) -> Result<ParsedProblem> {
    let content = fs::read_to_string(path.as_ref())?;
    parse_json(&content)
}

/// Outcome of one run, as printed by `folres --json`
#[derive(Debug, Clone, Serialize)]
pub struct RunReportJson {
    pub answer: &'static str,
    pub verdict: Verdict,
    pub stats: SaturationStats,
}

impl RunReportJson {
    pub fn new(verdict: Verdict, stats: SaturationStats) -> Self {
        RunReportJson {
            answer: verdict.answer(),
            verdict,
            stats,
        }
    }
}

fn arity_of(kind: SymbolKind, name: &str, count: usize) -> Result<u8> {
    u8::try_from(count).map_err(|_| {
        ProverError::InvalidInput(format!("{} {} has {} arguments", kind, name, count))
    })
}
