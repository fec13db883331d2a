use std::collections::HashSet;

use logicore::cnf::{Clause, Cnf, Literal, proposition_to_cnf};
use logicore::error::LogicError;
use logicore::formula::Formula;
use logicore::formula::text::parse_formula;
use logicore::resolution::{
    BitClause, BucketBuff, Prover, ResolutionOptions, prove_contradiction, prove_valid,
    refute_cnf,
};

fn sorted(clause: &Clause) -> Clause {
    let mut out = clause.clone();
    out.sort();
    out
}

fn pigeonhole() -> Cnf {
    let p = |i: u32, h: u32| 2 * i + h;
    let mut cnf = Cnf::new();
    for i in 0..3 {
        cnf.add_clause(vec![Literal::pos(p(i, 0)), Literal::pos(p(i, 1))]);
    }
    for h in 0..2 {
        for i in 0..3 {
            for j in (i + 1)..3 {
                cnf.add_clause(vec![Literal::neg(p(i, h)), Literal::neg(p(j, h))]);
            }
        }
    }
    cnf
}

#[test]
fn complementary_units_take_one_step() {
    let cnf = Cnf::from_clauses(vec![vec![Literal::pos(0)], vec![Literal::neg(0)]]);
    let report = refute_cnf(&cnf, ResolutionOptions::default()).expect("refute");
    assert!(report.contradiction);
    let proof = report.proof.as_ref().expect("proof");
    assert_eq!(proof.len(), 1);
    let step = &proof.steps[0];
    assert_eq!(step.pivot, 0);
    assert!(step.resolvent.is_empty());
    assert!(step.is_sound());
    assert!(report.trace().starts_with("  1. (~a) , (a) => ()   [a]\n"));
    assert!(report.trace().contains("Elapsed: "));
}

#[test]
fn proofs_are_sound_and_ordered() {
    let cnf = pigeonhole();
    let report = refute_cnf(&cnf, ResolutionOptions::default()).expect("refute");
    assert!(report.contradiction);
    let proof = report.proof.expect("proof");
    assert!(!proof.is_empty());

    let mut known = cnf.clauses.iter().map(sorted).collect::<HashSet<_>>();
    for step in &proof.steps {
        assert!(step.is_sound(), "{:?}", step);
        assert!(known.contains(&sorted(&step.left)), "{:?}", step.left);
        assert!(known.contains(&sorted(&step.right)), "{:?}", step.right);
        known.insert(sorted(&step.resolvent));
    }
    let last = proof.steps.last().expect("last step");
    assert!(last.resolvent.is_empty());
    assert_eq!(proof.render().lines().count(), proof.len());
}

#[test]
fn saturation_without_refutation() {
    let cnf = Cnf::from_clauses(vec![
        vec![Literal::pos(0), Literal::pos(1)],
        vec![Literal::neg(0), Literal::pos(2)],
        vec![Literal::neg(1)],
    ]);
    let report = refute_cnf(&cnf, ResolutionOptions::default()).expect("refute");
    assert!(!report.contradiction);
    assert!(report.proof.is_none());
    assert!(report.trace().starts_with("Proof not found.\n"));
}

#[test]
fn empty_premise_and_disabled_recording() {
    let falsum = Cnf::from_clauses(vec![vec![Literal::pos(3)], vec![]]);
    let report = refute_cnf(&falsum, ResolutionOptions::default()).expect("refute");
    assert!(report.contradiction);
    assert!(report.proof.as_ref().is_some_and(|p| p.is_empty()));
    assert!(report.trace().starts_with("Empty clause among the premises.\n"));

    let quiet = ResolutionOptions {
        record_proof: false,
    };
    let report = refute_cnf(&pigeonhole(), quiet).expect("refute");
    assert!(report.contradiction);
    assert!(report.proof.is_none());
    assert!(report.trace().starts_with("No proof recorded.\n"));
}

#[test]
fn raw_clause_sets_are_limited_to_64_ids() {
    let cnf = Cnf::from_clauses(vec![vec![Literal::pos(64)], vec![Literal::neg(64)]]);
    let err = refute_cnf(&cnf, ResolutionOptions::default()).expect_err("out of range");
    assert_eq!(err, LogicError::VariableOutOfRange { id: 64, limit: 64 });
    assert!(err.is_capacity_limit());
}

#[test]
fn formulas_are_squeezed_before_packing() {
    let f = Formula::and(Formula::var(100), Formula::not(Formula::var(100)));
    let report = prove_contradiction(&f, ResolutionOptions::default()).expect("prove");
    assert!(report.contradiction);
    let proof = report.proof.expect("proof");
    assert_eq!(proof.steps[0].pivot, 100);
    assert!(proof.render().contains("[w3]"));

    let wide = Formula::and_all((0..65).map(Formula::var));
    let err = prove_contradiction(&wide, ResolutionOptions::default()).expect_err("too wide");
    assert_eq!(err, LogicError::TooManyVariables { count: 65, limit: 64 });
}

#[test]
fn validity_proofs() {
    let f = parse_formula("((a <-> b) <-> c) <-> (a <-> (b <-> c))").expect("parse");
    let report = prove_valid(&f, ResolutionOptions::default()).expect("prove");
    assert!(report.contradiction);
    let proof = report.proof.expect("proof");
    assert!(proof.steps.iter().all(|step| step.is_sound()));

    let contingent = parse_formula("a -> b").expect("parse");
    let report = prove_valid(&contingent, ResolutionOptions::default()).expect("prove");
    assert!(!report.contradiction);
}

#[test]
fn main_set_stays_subsumption_free() {
    let cnf = proposition_to_cnf(
        &parse_formula("(a | b) & (a | b | c) & (~c | d) & (a | ~d) & (b | c | d)").expect("parse"),
    )
    .expect("cnf");
    let mut prover = Prover::new(&cnf, ResolutionOptions::default()).expect("prover");
    assert!(!prover.refute());
    let kept = prover.main_clauses().copied().collect::<Vec<_>>();
    for (i, a) in kept.iter().enumerate() {
        for (j, b) in kept.iter().enumerate() {
            if i != j {
                assert!(!a.subsumes(*b), "{a} subsumes {b}");
            }
        }
    }
    assert!(prover.stats().subsumed + prover.stats().removed > 0);
    assert!(prover.proof(&[0, 1, 2, 3]).is_none());
}

#[test]
fn bit_clauses() {
    let lits = [Literal::pos(1), Literal::neg(4), Literal::pos(1)];
    let c = BitClause::from_literals(&lits).expect("in range").expect("not tautology");
    assert_eq!(c.len(), 2);
    assert_eq!(c.to_string(), "(b | ~e)");
    assert_eq!(c.variable_ids().collect::<Vec<_>>(), vec![1, 4]);
    assert!(c.contains(4, true));
    assert!(!c.contains(4, false));
    assert!(BitClause::from_literals(&[Literal::pos(2), Literal::neg(2)])
        .expect("in range")
        .is_none());

    let unit = c.without_variable(4);
    assert!(unit.subsumes(c));
    assert!(!c.subsumes(unit));
    assert!(BitClause::EMPTY.subsumes(unit));
    assert_eq!(unit.with_literal(4, true), c);
}

#[test]
fn buckets_index_remainders() {
    let c = BitClause::from_literals(&[Literal::pos(0), Literal::neg(1)])
        .expect("in range")
        .expect("not tautology");
    let mut buckets = BucketBuff::new();
    buckets.insert(c);
    assert!(buckets.bucket(0, false).contains(&c.without_variable(0)));
    assert!(buckets.bucket(1, true).contains(&c.without_variable(1)));
    assert!(buckets.bucket(0, true).is_empty());
    buckets.remove(c);
    assert!(buckets.bucket(0, false).is_empty());
    assert!(buckets.bucket(1, true).is_empty());
}
