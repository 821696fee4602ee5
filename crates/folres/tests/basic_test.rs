//! Integration tests for the resolution prover

use folres::{
    decide_satisfiability, decide_satisfiability_with, parse_cnf, resolve, saturate, ClauseStore,
    ProverConfig, ProverError, SaturationResult, Verdict,
};

fn decide(kb: &str) -> Verdict {
    let parsed = parse_cnf(kb).unwrap();
    decide_satisfiability(&parsed.vocabulary, &parsed.clauses).unwrap()
}

#[test]
fn test_complementary_units_with_variables() {
    let kb = r#"
        Predicates: P
        Variables: x
        Clauses:
        P(x)
        !P(x)
    "#;
    assert_eq!(decide(kb), Verdict::Unsatisfiable);
}

#[test]
fn test_complementary_ground_units() {
    let kb = r#"
        Predicates: P
        Constants: A
        Clauses:
        P(A)
        !P(A)
    "#;
    assert_eq!(decide(kb), Verdict::Unsatisfiable);
}

#[test]
fn test_dog_animal_is_satisfiable() {
    let kb = r#"
        Predicates: dog animal
        Variables: x
        Constants: Fido
        Clauses:
        !dog(x) animal(x)
        dog(Fido)
    "#;
    assert_eq!(decide(kb), Verdict::Satisfiable);
}

#[test]
fn test_empty_knowledge_base_is_satisfiable() {
    assert_eq!(decide("Clauses:\n"), Verdict::Satisfiable);
    assert_eq!(decide(""), Verdict::Satisfiable);
}

#[test]
fn test_simple_resolution_chain() {
    let kb = r#"
        Clauses:
        P(A)
        !P(x) Q(x)
        !Q(A)
    "#;
    assert_eq!(decide(kb), Verdict::Unsatisfiable);
}

#[test]
fn test_resolving_a_pair_twice_adds_nothing() {
    let kb = r#"
        Clauses:
        P(x) Q(x,y)
        !P(A) R(y)
    "#;
    let parsed = parse_cnf(kb).unwrap();
    let (a, b) = (&parsed.clauses[0], &parsed.clauses[1]);

    let mut store = ClauseStore::new();
    for resolvent in resolve(a, b) {
        store.insert(resolvent);
    }
    let after_first = store.len();
    assert_eq!(after_first, 1);

    // the second run renames apart differently and swaps the premises
    for resolvent in resolve(b, a).into_iter().chain(resolve(a, b)) {
        assert!(store.insert(resolvent).is_none());
    }
    assert_eq!(store.len(), after_first);
}

#[test]
fn test_tautologies_alone_are_satisfiable() {
    let kb = r#"
        Clauses:
        P(x) !P(x)
        Q(A) !Q(A) R(B)
    "#;
    let parsed = parse_cnf(kb).unwrap();
    let (result, stats) = saturate(&parsed.vocabulary, &parsed.clauses, &ProverConfig::default());
    assert_eq!(result, SaturationResult::Satisfiable);
    assert_eq!(stats.clauses_stored, 0);
}

#[test]
fn test_duplicate_inputs_collapse() {
    let kb = r#"
        Clauses:
        P(x) Q(x)
        Q(y) P(y)
        P(z) Q(z) P(z)
    "#;
    let parsed = parse_cnf(kb).unwrap();
    let (result, stats) = saturate(&parsed.vocabulary, &parsed.clauses, &ProverConfig::default());
    assert_eq!(result, SaturationResult::Satisfiable);
    assert_eq!(stats.clauses_stored, 1);
    assert_eq!(stats.duplicates_rejected, 2);
}

#[test]
fn test_resource_limit_is_not_a_verdict() {
    let kb = r#"
        Clauses:
        P(A)
        !P(x) P(f(x))
    "#;
    let parsed = parse_cnf(kb).unwrap();
    let config = ProverConfig {
        max_passes: 5,
        ..ProverConfig::unbounded()
    };

    let result = decide_satisfiability_with(&parsed.vocabulary, &parsed.clauses, &config);
    assert!(matches!(result, Err(ProverError::ResourceExhausted(_))));
}

#[test]
fn test_validation_rejects_undeclared_symbols() {
    let kb = r#"
        Predicates: P
        Clauses:
        P(x)
    "#;
    let parsed = parse_cnf(kb).unwrap();
    let config = ProverConfig {
        validate_vocabulary: true,
        ..ProverConfig::default()
    };

    let result = decide_satisfiability_with(&parsed.vocabulary, &parsed.clauses, &config);
    match result {
        Err(ProverError::UnknownSymbol { name, .. }) => assert_eq!(name, "x"),
        other => panic!("Expected unknown symbol error, got {:?}", other),
    }
}

#[test]
fn test_validation_rejects_arity_mismatch() {
    let kb = r#"
        Predicates: P
        Constants: A B
        Clauses:
        P(A)
        !P(A,B)
    "#;
    let parsed = parse_cnf(kb).unwrap();
    let config = ProverConfig {
        validate_vocabulary: true,
        ..ProverConfig::default()
    };

    let result = decide_satisfiability_with(&parsed.vocabulary, &parsed.clauses, &config);
    assert!(matches!(result, Err(ProverError::ArityMismatch { .. })));

    // Without validation the mismatch simply never unifies
    assert_eq!(
        decide_satisfiability(&parsed.vocabulary, &parsed.clauses).unwrap(),
        Verdict::Satisfiable
    );
}
