use logicore::error::LogicError;
use logicore::formula::Formula;
use logicore::formula::text::parse_formula;
use logicore::sat::WalkSatConfig;
use logicore::solver::{
    Method, SolveResult, Verdict, classify, satisfiable, satisfiable_with_fallback,
};

fn methods() -> Vec<Method> {
    vec![
        Method::Dpll,
        Method::WalkSat {
            config: WalkSatConfig::default(),
            seed: Some(9),
        },
        Method::Resolution,
        Method::ModelCheck,
        Method::Varisat,
    ]
}

#[test]
fn every_method_classifies_the_classics() {
    let cases = [
        ("(a & b & c) <-> ~(a & b & c)", Verdict::Contradiction),
        ("((a <-> b) <-> c) <-> (a <-> (b <-> c))", Verdict::Valid),
        ("a | ~b", Verdict::Contingent),
        ("(a -> b) & (b -> c) -> (a -> c)", Verdict::Valid),
    ];
    for (src, expected) in cases {
        let f = parse_formula(src).expect("parse");
        for method in methods() {
            let verdict = classify(&f, &method).expect("classify");
            if let Method::WalkSat { .. } = method {
                // local search cannot show unsatisfiability on its own
                assert!(verdict == expected || verdict == Verdict::Unknown, "{src}");
            } else {
                assert_eq!(verdict, expected, "{src} with {}", method.name());
            }
        }
    }
}

#[test]
fn wide_formulas_fall_back_to_dpll() {
    let wide = Formula::and_all((0..70).map(Formula::var));
    for method in [Method::ModelCheck, Method::Resolution] {
        let err = satisfiable(&wide, &method).expect_err("too wide");
        assert_eq!(err, LogicError::TooManyVariables { count: 70, limit: 64 });
        assert_eq!(
            satisfiable_with_fallback(&wide, &method).expect("fallback"),
            SolveResult::Sat
        );
    }
    assert_eq!(satisfiable(&wide, &Method::Varisat).expect("varisat"), SolveResult::Sat);
    assert_eq!(classify(&wide, &Method::Dpll).expect("dpll"), Verdict::Contingent);
}

#[test]
fn other_errors_are_not_retried() {
    let walk = Method::WalkSat {
        config: WalkSatConfig {
            max_flips: 10,
            random_walk_probability: 2.0,
        },
        seed: Some(1),
    };
    let f = parse_formula("a & b").expect("parse");
    assert_eq!(
        satisfiable_with_fallback(&f, &walk),
        Err(LogicError::InvalidProbability(2.0))
    );
}

#[test]
fn constants_and_empty_clause_sets() {
    let truth = Formula::constant(true);
    let falsum = Formula::constant(false);
    for method in methods() {
        assert_eq!(satisfiable(&truth, &method).expect("sat"), SolveResult::Sat);
        assert_eq!(satisfiable(&falsum, &method).expect("sat"), SolveResult::Unsat);
        assert_eq!(classify(&truth, &method).expect("classify"), Verdict::Valid);
        assert_eq!(classify(&falsum, &method).expect("classify"), Verdict::Contradiction);
    }
}
