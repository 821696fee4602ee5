//! Binary resolution inference rule

use crate::logic::{unify_literals, Clause, FreshVariables, Literal, Substitution};
use indexmap::IndexSet;

/// All binary resolvents of `clause1` and `clause2`.
///
/// `clause2` is standardized apart from both clauses first, so the two
/// premises never share a variable. Every complementary literal pair whose
/// arguments unify contributes one resolvent; resolvents are factored and
/// tautologies are discarded. The result holds each distinct clause once, in
/// the order it was first produced. An empty clause in the result means the
/// premises are contradictory.
pub fn resolve(clause1: &Clause, clause2: &Clause) -> Vec<Clause> {
    resolve_with(clause1, clause2, 0)
}

/// Like [`resolve`], with fresh variable ids starting no lower than `floor`.
///
/// Saturation passes the vocabulary's variable count so renamed variables
/// never take the id of a named one.
pub fn resolve_with(clause1: &Clause, clause2: &Clause, floor: u32) -> Vec<Clause> {
    let mut in_use = clause1.variable_ids();
    in_use.extend(clause2.variable_ids());
    let mut fresh = FreshVariables::above(&in_use).at_least(floor);
    let renamed_clause2 = clause2.rename_with(&mut fresh);

    let mut results: IndexSet<Clause> = IndexSet::new();
    for i in 0..clause1.literals.len() {
        for j in 0..renamed_clause2.literals.len() {
            if let Some(resolvent) = resolve_on(clause1, i, &renamed_clause2, j) {
                results.insert(resolvent);
            }
        }
    }
    results.into_iter().collect()
}

/// Resolve on literal `i` of `clause1` and literal `j` of `clause2`.
///
/// The clauses must already be variable-disjoint. Returns `None` when the
/// literals are not complementary, do not unify, or when the resolvent is a
/// tautology.
pub fn resolve_on(clause1: &Clause, i: usize, clause2: &Clause, j: usize) -> Option<Clause> {
    let lit1 = clause1.literals.get(i)?;
    let lit2 = clause2.literals.get(j)?;
    if !lit1.is_complementary(lit2) {
        return None;
    }

    let mgu = unify_literals(lit1, lit2).ok()?;

    // Collect side literals from both clauses
    let mut new_literals = collect_literals_except(clause1, i, &mgu);
    new_literals.extend(collect_literals_except(clause2, j, &mgu));

    Clause::new(new_literals).factor()
}

/// Literals of `clause` other than the one at `exclude`, with `subst` applied
fn collect_literals_except(clause: &Clause, exclude: usize, subst: &Substitution) -> Vec<Literal> {
    clause
        .literals
        .iter()
        .enumerate()
        .filter(|&(k, _)| k != exclude)
        .map(|(_, lit)| lit.apply_substitution(subst))
        .collect()
}
