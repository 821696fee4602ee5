//! Reader for the line-oriented `.cnf` knowledge base format
//!
//! ```text
//! Predicates: dog animal
//! Variables: x
//! Constants: Fido
//! Clauses:
//! !dog(x) animal(x)
//! dog(Fido)
//! ```
//!
//! Header lines declare symbols. After `Clauses:` each non-blank line is one
//! clause whose literals are separated by whitespace.

use crate::error::{ProverError, Result};
use crate::logic::{
    Clause, Constant, FunctionSymbol, Literal, PredicateSymbol, Term, Variable, Vocabulary,
};
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, multispace0, space0, space1},
    combinator::{all_consuming, map, opt},
    multi::{separated_list0, separated_list1},
    sequence::{delimited, pair, preceded, tuple},
    IResult,
};
use std::fs;
use std::path::Path;
use tracing::debug;

/// A knowledge base read from `.cnf` text
#[derive(Debug, Clone)]
pub struct ParsedProblem {
    pub vocabulary: Vocabulary,
    pub clauses: Vec<Clause>,
}

/// Parse a `.cnf` file
pub fn parse_cnf_file(path: impl AsRef<Path>) -> Result<ParsedProblem> {
    let content = fs::read_to_string(path.as_ref())?;
    parse_cnf(&content)
}

/// Parse `.cnf` content
pub fn parse_cnf(input: &str) -> Result<ParsedProblem> {
    let mut vocabulary = Vocabulary::new();
    let mut clauses = Vec::new();
    let mut read_clauses = false;

    for (idx, line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if read_clauses {
            let literals = parse_line(line, line_no, parse_clause_line)?;
            let clause = build_clause(&literals, &mut vocabulary)
                .map_err(|message| ProverError::Parse { line: line_no, message })?;
            clauses.push(clause);
            continue;
        }

        match parse_line(line, line_no, parse_header)? {
            Header::Clauses => read_clauses = true,
            Header::Declare(kind, names) => {
                for name in names {
                    match kind {
                        HeaderKind::Predicates => {
                            vocabulary.declare_predicate(name, None);
                        }
                        HeaderKind::Variables => {
                            vocabulary.declare_variable(name);
                        }
                        HeaderKind::Constants => {
                            vocabulary.declare_constant(name);
                        }
                        HeaderKind::Functions => {
                            vocabulary.declare_function(name, None);
                        }
                    }
                }
            }
            Header::Other => debug!(line = line_no, "ignoring line before Clauses:"),
        }
    }

    Ok(ParsedProblem {
        vocabulary,
        clauses,
    })
}

/// Run a line parser, converting nom failures into a located parse error
fn parse_line<'a, T>(
    line: &'a str,
    line_no: usize,
    parser: impl FnMut(&'a str) -> IResult<&'a str, T>,
) -> Result<T> {
    all_consuming(parser)(line)
        .map(|(_, value)| value)
        .map_err(|e| ProverError::Parse {
            line: line_no,
            message: format!("cannot parse {:?}: {}", line, e),
        })
}

// =========================================================================
// Syntax
// =========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeaderKind {
    Predicates,
    Variables,
    Constants,
    Functions,
}

#[derive(Debug, PartialEq, Eq)]
enum Header<'a> {
    Declare(HeaderKind, Vec<&'a str>),
    Clauses,
    Other,
}

/// Literal before interning
#[derive(Debug, Clone, PartialEq, Eq)]
struct RawLiteral<'a> {
    negated: bool,
    name: &'a str,
    args: Vec<RawTerm<'a>>,
}

/// Argument before interning; a bare name is classified later
#[derive(Debug, Clone, PartialEq, Eq)]
enum RawTerm<'a> {
    Name(&'a str),
    Apply(&'a str, Vec<RawTerm<'a>>),
}

fn parse_header(input: &str) -> IResult<&str, Header<'_>> {
    alt((
        map(tag("Clauses:"), |_| Header::Clauses),
        map(
            pair(header_kind, preceded(space0, separated_list0(space1, parse_identifier))),
            |(kind, names)| Header::Declare(kind, names),
        ),
        map(take_while1(|_: char| true), |_| Header::Other),
    ))(input)
}

fn header_kind(input: &str) -> IResult<&str, HeaderKind> {
    alt((
        map(tag("Predicates:"), |_| HeaderKind::Predicates),
        map(tag("Variables:"), |_| HeaderKind::Variables),
        map(tag("Constants:"), |_| HeaderKind::Constants),
        map(tag("Functions:"), |_| HeaderKind::Functions),
    ))(input)
}

/// Parse one clause line: literals separated by whitespace
fn parse_clause_line(input: &str) -> IResult<&str, Vec<RawLiteral<'_>>> {
    separated_list1(space1, parse_literal)(input)
}

/// Parse a literal: `!name(args)`, `name(args)` or a bare `name`
fn parse_literal(input: &str) -> IResult<&str, RawLiteral<'_>> {
    let (input, negated) = map(opt(char('!')), |bang| bang.is_some())(input)?;
    let (input, name) = parse_identifier(input)?;
    let (input, args) = opt(parse_arguments)(input)?;
    Ok((
        input,
        RawLiteral {
            negated,
            name,
            args: args.unwrap_or_default(),
        },
    ))
}

/// Parse a parenthesized, comma-separated argument list
fn parse_arguments(input: &str) -> IResult<&str, Vec<RawTerm<'_>>> {
    delimited(
        tuple((char('('), multispace0)),
        separated_list1(tuple((multispace0, char(','), multispace0)), parse_term),
        tuple((multispace0, char(')'))),
    )(input)
}

/// Parse a term: `name(args)` or a bare `name`
fn parse_term(input: &str) -> IResult<&str, RawTerm<'_>> {
    let (input, name) = parse_identifier(input)?;
    let (input, args) = opt(parse_arguments)(input)?;
    Ok((
        input,
        match args {
            Some(args) => RawTerm::Apply(name, args),
            None => RawTerm::Name(name),
        },
    ))
}

fn parse_identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_')(input)
}

// =========================================================================
// Interning
// =========================================================================

fn build_clause(
    literals: &[RawLiteral<'_>],
    vocabulary: &mut Vocabulary,
) -> std::result::Result<Clause, String> {
    let literals = literals
        .iter()
        .map(|lit| build_literal(lit, vocabulary))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(Clause::new(literals))
}

fn build_literal(
    lit: &RawLiteral<'_>,
    vocabulary: &mut Vocabulary,
) -> std::result::Result<Literal, String> {
    let args = lit
        .args
        .iter()
        .map(|arg| build_term(arg, vocabulary))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let arity = arity_of(lit.name, args.len())?;
    let predicate = PredicateSymbol::new(vocabulary.intern_predicate(lit.name), arity);
    Ok(if lit.negated {
        Literal::negative(predicate, args)
    } else {
        Literal::positive(predicate, args)
    })
}

fn build_term(term: &RawTerm<'_>, vocabulary: &mut Vocabulary) -> std::result::Result<Term, String> {
    match term {
        RawTerm::Name(name) => Ok(if names_variable(name, vocabulary) {
            Term::Variable(Variable::new(vocabulary.intern_variable(name)))
        } else {
            Term::Constant(Constant::new(vocabulary.intern_constant(name)))
        }),
        RawTerm::Apply(name, args) => {
            let args = args
                .iter()
                .map(|arg| build_term(arg, vocabulary))
                .collect::<std::result::Result<Vec<_>, _>>()?;
            let arity = arity_of(name, args.len())?;
            let symbol = FunctionSymbol::new(vocabulary.intern_function(name), arity);
            Ok(Term::Function(symbol, args))
        }
    }
}

/// Declared variables and constants win; otherwise a lowercase initial
/// marks a variable.
fn names_variable(name: &str, vocabulary: &Vocabulary) -> bool {
    if vocabulary.is_declared_variable(name) {
        return true;
    }
    if vocabulary.is_declared_constant(name) {
        return false;
    }
    name.chars().next().is_some_and(char::is_lowercase)
}

fn arity_of(name: &str, count: usize) -> std::result::Result<u8, String> {
    u8::try_from(count).map_err(|_| format!("{} has too many arguments ({})", name, count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::SymbolKind;

    #[test]
    fn test_parse_header() {
        assert_eq!(parse_header("Clauses:"), Ok(("", Header::Clauses)));
        assert_eq!(
            parse_header("Predicates: dog animal"),
            Ok(("", Header::Declare(HeaderKind::Predicates, vec!["dog", "animal"])))
        );
        assert_eq!(
            parse_header("Constants:"),
            Ok(("", Header::Declare(HeaderKind::Constants, vec![])))
        );
        assert_eq!(parse_header("% comment"), Ok(("", Header::Other)));
    }

    #[test]
    fn test_parse_literal() {
        let (rest, lit) = parse_literal("!loves(x,mother(John))").unwrap();
        assert_eq!(rest, "");
        assert!(lit.negated);
        assert_eq!(lit.name, "loves");
        assert_eq!(
            lit.args,
            vec![
                RawTerm::Name("x"),
                RawTerm::Apply("mother", vec![RawTerm::Name("John")]),
            ]
        );

        let (_, prop) = parse_literal("Raining").unwrap();
        assert!(!prop.negated);
        assert!(prop.args.is_empty());
    }

    #[test]
    fn test_parse_clause_line() {
        let (rest, lits) = parse_clause_line("!dog(x) animal(x)").unwrap();
        assert_eq!(rest, "");
        assert_eq!(lits.len(), 2);
        assert!(lits[0].negated);
        assert!(!lits[1].negated);
    }

    #[test]
    fn test_parse_problem() {
        let problem = parse_cnf(
            "Predicates: dog animal\n\
             Variables: x\n\
             Constants: Fido\n\
             Clauses:\n\
             !dog(x) animal(x)\n\
             \n\
             dog(Fido)\n",
        )
        .unwrap();

        assert_eq!(problem.clauses.len(), 2);
        assert_eq!(problem.vocabulary.declared(SymbolKind::Predicate), vec!["dog", "animal"]);
        let shown: Vec<String> = problem
            .clauses
            .iter()
            .map(|c| c.display(&problem.vocabulary).to_string())
            .collect();
        assert_eq!(shown, vec!["!dog(x) ∨ animal(x)", "dog(Fido)"]);
        assert!(problem.vocabulary.validate(&problem.clauses).is_ok());
    }

    #[test]
    fn test_undeclared_names_follow_case_convention() {
        let problem = parse_cnf("Clauses:\nP(x, A, f(y))\n").unwrap();
        let lit = &problem.clauses[0].literals[0];
        assert!(matches!(lit.args[0], Term::Variable(_)));
        assert!(matches!(lit.args[1], Term::Constant(_)));
        match &lit.args[2] {
            Term::Function(f, args) => {
                assert_eq!(f.arity, 1);
                assert!(matches!(args[0], Term::Variable(_)));
            }
            other => panic!("expected function term, got {}", other),
        }
    }

    #[test]
    fn test_declarations_override_case_convention() {
        let problem = parse_cnf("Variables: X\nConstants: bob\nClauses:\nP(X, bob)\n").unwrap();
        let lit = &problem.clauses[0].literals[0];
        assert!(matches!(lit.args[0], Term::Variable(_)));
        assert!(matches!(lit.args[1], Term::Constant(_)));
    }

    #[test]
    fn test_lines_before_clauses_header_are_not_clauses() {
        let problem = parse_cnf("P(A)\n").unwrap();
        assert!(problem.clauses.is_empty());
    }

    #[test]
    fn test_malformed_clause_reports_line() {
        let err = parse_cnf("Clauses:\nP(A)\nQ(x,\n").unwrap_err();
        match err {
            ProverError::Parse { line, .. } => assert_eq!(line, 3),
            other => panic!("expected parse error, got {}", other),
        }
    }

    #[test]
    fn test_malformed_header_reports_line() {
        // a known keyword with a bad name list is never ignored as Other
        for input in [
            "Predicates: P\nConstants: a, b\nClauses:\nP(a)\n",
            "Predicates: P\nConstants: a-b\nClauses:\nP(a)\n",
            "Predicates: P\nClauses: P(a)\n",
        ] {
            match parse_cnf(input).unwrap_err() {
                ProverError::Parse { line, .. } => assert_eq!(line, 2, "{:?}", input),
                other => panic!("expected parse error, got {}", other),
            }
        }
    }
}
