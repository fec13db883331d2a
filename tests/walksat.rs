use logicore::cnf::{Cnf, Literal, proposition_to_cnf};
use logicore::error::LogicError;
use logicore::formula::text::parse_formula;
use logicore::sat::{WalkSatConfig, WalkSatSolver};
use logicore::solver::{SatSolver, SolveResult};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn cnf(src: &str) -> Cnf {
    proposition_to_cnf(&parse_formula(src).expect("parse")).expect("cnf")
}

#[test]
fn finds_models_of_easy_formulas() {
    for (seed, src) in [
        (1, "a | ~b"),
        (2, "(a | b) & (~a | c) & (~b | ~c)"),
        (3, "(a <-> b) & (b <-> ~c) & (c | d)"),
        (4, "a & b & c & d & e & f & g & h"),
    ] {
        let cnf = cnf(src);
        let mut solver = WalkSatSolver::with_seed(&cnf, seed);
        assert!(solver.is_satisfiable(10_000, 0.5).expect("valid p"), "{src}");
        let model = solver.model().expect("model");
        assert!(cnf.eval(model), "{src}");
    }
}

#[test]
fn same_seed_same_run() {
    let cnf = cnf("(a | b | c) & (~a | ~b) & (~b | ~c) & (~a | ~c) & (d | ~a)");
    let run = |seed| {
        let mut solver = WalkSatSolver::with_seed(&cnf, seed);
        let sat = solver.is_satisfiable(1_000, 0.3).expect("valid p");
        (sat, solver.model().map(<[bool]>::to_vec), solver.stats().flips)
    };
    assert_eq!(run(42), run(42));
}

#[test]
fn unsatisfiable_input_exhausts_the_budget() {
    let cnf = cnf("(a | b) & (a | ~b) & (~a | b) & (~a | ~b)");
    let mut solver = WalkSatSolver::with_rng(&cnf, ChaCha8Rng::seed_from_u64(7));
    assert!(!solver.is_satisfiable(200, 0.5).expect("valid p"));
    assert_eq!(solver.stats().flips, 200);
    assert_eq!(solver.model(), None);

    let mut solver = WalkSatSolver::with_seed(&cnf, 7).with_config(WalkSatConfig {
        max_flips: 50,
        random_walk_probability: 0.2,
    });
    assert_eq!(solver.solve(), SolveResult::Unknown);
}

#[test]
fn empty_clause_is_unsat_without_flipping() {
    let cnf = Cnf::from_clauses(vec![vec![Literal::pos(0)], vec![]]);
    let mut solver = WalkSatSolver::with_seed(&cnf, 0);
    assert!(!solver.is_satisfiable(100, 0.5).expect("valid p"));
    assert_eq!(solver.stats().flips, 0);
    assert_eq!(solver.solve(), SolveResult::Unsat);
}

#[test]
fn empty_formula_is_sat() {
    let mut solver = WalkSatSolver::with_seed(&Cnf::new(), 0);
    assert_eq!(solver.solve(), SolveResult::Sat);
    assert_eq!(solver.model(), Some(&[][..]));
    assert_eq!(solver.backend_name(), "walksat");
}

#[test]
fn rejects_bad_probability() {
    let mut solver = WalkSatSolver::with_seed(&cnf("a"), 0);
    assert_eq!(
        solver.is_satisfiable(10, 1.5),
        Err(LogicError::InvalidProbability(1.5))
    );
    assert!(solver.is_satisfiable(10, -0.1).is_err());
}

#[test]
fn model_uses_squeezed_ids() {
    let cnf = Cnf::from_clauses(vec![vec![Literal::pos(12)], vec![Literal::neg(3)]]);
    let mut solver = WalkSatSolver::with_seed(&cnf, 11);
    assert!(solver.is_satisfiable(1_000, 0.5).expect("valid p"));
    assert_eq!(solver.original_ids(), &[3, 12]);
    assert_eq!(solver.model(), Some(&[false, true][..]));
}
