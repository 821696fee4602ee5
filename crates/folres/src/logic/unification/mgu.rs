//! Most General Unifier (MGU) computation

use super::substitution::{OccursCheckViolation, Substitution};
use crate::logic::core::literal::Literal;
use crate::logic::core::term::Term;
use crate::logic::core::vocabulary::{ConstantId, FunctionId, PredicateId};
use thiserror::Error;

/// Result of a unification attempt
pub type UnificationResult = Result<Substitution, UnificationError>;

/// Reasons two terms or literals do not unify.
///
/// All of these are ordinary outcomes: callers treat them as "no unifier"
/// and move on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnificationError {
    /// Occurs check failed - variable occurs in term
    #[error(transparent)]
    OccursCheck(#[from] OccursCheckViolation),
    /// Function symbols don't match
    #[error("function symbols {0} and {1} clash")]
    FunctionClash(FunctionId, FunctionId),
    /// Argument counts don't match
    #[error("arity mismatch: {0} vs {1} arguments")]
    ArityMismatch(usize, usize),
    /// Constant symbols don't match
    #[error("constants {0} and {1} clash")]
    ConstantClash(ConstantId, ConstantId),
    /// Function-constant clash
    #[error("function {0} cannot unify with constant {1}")]
    FunctionConstantClash(FunctionId, ConstantId),
    /// Literals over different predicates
    #[error("predicates {0} and {1} differ")]
    PredicateClash(PredicateId, PredicateId),
    /// Literals of the same polarity are never resolved upon
    #[error("literals have the same polarity")]
    SamePolarity,
}

/// Unify two terms, returning a most general unifier (MGU) if one exists
pub fn unify(term1: &Term, term2: &Term) -> UnificationResult {
    unify_with(term1, term2, Substitution::new())
}

/// Unify two terms on top of the bindings collected so far
pub fn unify_with(term1: &Term, term2: &Term, subst: Substitution) -> UnificationResult {
    let t1 = term1.apply_substitution(&subst);
    let t2 = term2.apply_substitution(&subst);

    match (&t1, &t2) {
        // Same term - nothing to do
        _ if t1 == t2 => Ok(subst),

        // Variable cases; the occurs check happens inside extend
        (Term::Variable(v), t) | (t, Term::Variable(v)) => Ok(subst.extend(*v, t.clone())?),

        // Constant clash
        (Term::Constant(c1), Term::Constant(c2)) => {
            Err(UnificationError::ConstantClash(c1.id, c2.id))
        }

        // Function terms
        (Term::Function(f1, args1), Term::Function(f2, args2)) => {
            if f1.id != f2.id {
                return Err(UnificationError::FunctionClash(f1.id, f2.id));
            }
            unify_args(args1, args2, subst)
        }

        // Function-Constant clash
        (Term::Function(f, _), Term::Constant(c)) | (Term::Constant(c), Term::Function(f, _)) => {
            Err(UnificationError::FunctionConstantClash(f.id, c.id))
        }
    }
}

/// Unify two argument lists pairwise, left to right; later arguments see the
/// bindings made for earlier ones.
pub fn unify_args(args1: &[Term], args2: &[Term], subst: Substitution) -> UnificationResult {
    if args1.len() != args2.len() {
        return Err(UnificationError::ArityMismatch(args1.len(), args2.len()));
    }
    args1
        .iter()
        .zip(args2)
        .try_fold(subst, |subst, (arg1, arg2)| unify_with(arg1, arg2, subst))
}

/// Unify a literal with a literal of opposite polarity over the same predicate.
///
/// This is the unification step of binary resolution.
pub fn unify_literals(lit1: &Literal, lit2: &Literal) -> UnificationResult {
    if lit1.predicate.id != lit2.predicate.id {
        return Err(UnificationError::PredicateClash(lit1.predicate.id, lit2.predicate.id));
    }
    if lit1.polarity == lit2.polarity {
        return Err(UnificationError::SamePolarity);
    }
    unify_args(&lit1.args, &lit2.args, Substitution::new())
}
