//! Property-based tests for unification and substitution using proptest.

use super::{unify, unify_literals, Substitution};
use crate::logic::{
    Constant, FunctionSymbol, Literal, PredicateSymbol, Term, Variable, Vocabulary,
};
use proptest::prelude::*;

/// Term description (before interning)
#[derive(Debug, Clone)]
enum TermDesc {
    Var(u8),                 // Variable index 0-3
    Const(u8),               // Constant index 0-3
    Func(u8, Vec<TermDesc>), // Function index 0-1, with args
}

fn arb_term_desc(max_depth: u32) -> BoxedStrategy<TermDesc> {
    if max_depth == 0 {
        prop_oneof![
            (0..4u8).prop_map(TermDesc::Var),
            (0..4u8).prop_map(TermDesc::Const),
        ]
        .boxed()
    } else {
        prop_oneof![
            3 => (0..4u8).prop_map(TermDesc::Var),
            3 => (0..4u8).prop_map(TermDesc::Const),
            2 => (0..2u8, proptest::collection::vec(arb_term_desc(max_depth - 1), 1..=3))
                .prop_map(|(f, args)| TermDesc::Func(f, args)),
        ]
        .boxed()
    }
}

/// Generate a single term with its vocabulary
fn arb_term(max_depth: u32) -> impl Strategy<Value = (Term, Vocabulary)> {
    arb_term_desc(max_depth).prop_map(|desc| {
        let mut vocab = Vocabulary::new();
        let term = build_term(&desc, &mut vocab);
        (term, vocab)
    })
}

/// Generate a pair of terms sharing the same vocabulary
fn arb_term_pair(max_depth: u32) -> impl Strategy<Value = (Term, Term, Vocabulary)> {
    (arb_term_desc(max_depth), arb_term_desc(max_depth)).prop_map(|(desc1, desc2)| {
        let mut vocab = Vocabulary::new();
        let t1 = build_term(&desc1, &mut vocab);
        let t2 = build_term(&desc2, &mut vocab);
        (t1, t2, vocab)
    })
}

fn build_term(desc: &TermDesc, vocab: &mut Vocabulary) -> Term {
    match desc {
        TermDesc::Var(i) => {
            let id = vocab.declare_variable(&format!("x{}", i));
            Term::Variable(Variable::new(id))
        }
        TermDesc::Const(i) => {
            let id = vocab.declare_constant(&format!("C{}", i));
            Term::Constant(Constant::new(id))
        }
        TermDesc::Func(f, args) => {
            let id = vocab.declare_function(&format!("f{}", f), None);
            let built_args: Vec<Term> = args.iter().map(|a| build_term(a, vocab)).collect();
            Term::Function(FunctionSymbol::new(id, built_args.len() as u8), built_args)
        }
    }
}

// =========================================================================
// Unification properties
// =========================================================================

proptest! {
    /// Soundness: if unify(s, t) = σ, then sσ = tσ
    #[test]
    fn unification_soundness((t1, t2, _vocab) in arb_term_pair(3)) {
        if let Ok(sigma) = unify(&t1, &t2) {
            let t1_sigma = t1.apply_substitution(&sigma);
            let t2_sigma = t2.apply_substitution(&sigma);
            prop_assert_eq!(t1_sigma, t2_sigma, "unifier must make terms equal");
        }
    }

    /// Symmetry: unify(s, t) succeeds iff unify(t, s) succeeds
    #[test]
    fn unification_symmetry((t1, t2, _vocab) in arb_term_pair(3)) {
        let r1 = unify(&t1, &t2);
        let r2 = unify(&t2, &t1);
        prop_assert_eq!(r1.is_ok(), r2.is_ok(), "unification should be symmetric");
    }

    /// Occurs check: unify(x, f(..x..)) fails for every arity >= 1 and every
    /// position of x among the arguments
    #[test]
    fn unification_occurs_check(arity in 1..5u8, position in 0..5u8, depth in 1..3u32) {
        let mut vocab = Vocabulary::new();
        let x = Term::Variable(Variable::new(vocab.declare_variable("x")));
        let a = Term::Constant(Constant::new(vocab.declare_constant("A")));
        let f = FunctionSymbol::new(vocab.declare_function("f", Some(arity)), arity);
        let position = (position % arity) as usize;

        let mut term = x.clone();
        for _ in 0..depth {
            let mut args = vec![a.clone(); arity as usize];
            args[position] = term;
            term = Term::Function(f, args);
        }

        prop_assert!(unify(&x, &term).is_err(), "occurs check should prevent x = f(...x...)");
        prop_assert!(unify(&term, &x).is_err(), "occurs check should prevent f(...x...) = x");
    }

    /// Identity: unify(t, t) succeeds without binding anything
    #[test]
    fn unification_identity((t, _vocab) in arb_term(3)) {
        let result = unify(&t, &t);
        prop_assert!(result.is_ok(), "term should unify with itself");
        if let Ok(sigma) = result {
            prop_assert!(sigma.is_empty());
        }
    }

    /// Idempotence: applying an MGU twice gives the same result as once
    #[test]
    fn unifier_is_idempotent((t1, t2, _vocab) in arb_term_pair(3)) {
        if let Ok(sigma) = unify(&t1, &t2) {
            let once = t1.apply_substitution(&sigma);
            let twice = once.apply_substitution(&sigma);
            prop_assert_eq!(once, twice);
        }
    }

    /// Literal unification is sound on the arguments
    #[test]
    fn literal_unification_soundness((t1, t2, mut vocab) in arb_term_pair(2)) {
        let p = PredicateSymbol::new(vocab.declare_predicate("P", Some(1)), 1);
        let pos = Literal::positive(p, vec![t1]);
        let neg = Literal::negative(p, vec![t2]);
        if let Ok(sigma) = unify_literals(&pos, &neg) {
            let pos_sigma = pos.apply_substitution(&sigma);
            let neg_sigma = neg.apply_substitution(&sigma);
            prop_assert_eq!(pos_sigma.complement(), neg_sigma);
        }
    }
}

// =========================================================================
// Substitution properties
// =========================================================================

proptest! {
    /// Empty substitution is identity
    #[test]
    fn substitution_identity((t, _vocab) in arb_term(3)) {
        let empty = Substitution::new();
        let t_applied = t.apply_substitution(&empty);
        prop_assert_eq!(t, t_applied, "empty substitution should be identity");
    }

    /// compose(σ, θ) acts like applying σ, then θ
    #[test]
    fn composition_matches_sequential_application(
        (s1, s2, _v1) in arb_term_pair(2),
        (u1, u2, _v2) in arb_term_pair(2),
        (t, _v3) in arb_term(3),
    ) {
        // the three vocabularies intern names in generation order; terms
        // remain well formed, they only share ids by coincidence
        if let (Ok(sigma), Ok(theta)) = (unify(&s1, &s2), unify(&u1, &u2)) {
            let composed = sigma.compose(&theta);
            let sequential = t.apply_substitution(&sigma).apply_substitution(&theta);
            prop_assert_eq!(t.apply_substitution(&composed), sequential);
        }
    }
}
