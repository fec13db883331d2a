use logicore::error::LogicError;
use logicore::formula::{BinaryOp, Formula, UnaryOp};

// lanes 0..4 hold (A,B) = (1,1), (1,0), (0,1), (0,0)
const LANES_A: u64 = 0b0011;
const LANES_B: u64 = 0b0101;

#[test]
fn binary_codes_are_truth_tables() {
    assert_eq!(BinaryOp::And.code(), 1);
    assert_eq!(BinaryOp::Or.code(), 7);
    assert_eq!(BinaryOp::Xnor.code(), 9);
    assert_eq!(BinaryOp::Imp.code(), 13);
    assert_eq!(BinaryOp::Nand.code(), 14);
    for op in BinaryOp::ALL {
        assert_eq!(op.apply(LANES_A, LANES_B) & 0xF, u64::from(op.code()), "{op:?}");
        assert_eq!(BinaryOp::from_code(op.code()), Ok(op));
    }
}

#[test]
fn unary_codes_are_truth_tables() {
    assert_eq!(UnaryOp::Transfer.code(), 1);
    assert_eq!(UnaryOp::Not.code(), 2);
    for op in UnaryOp::ALL {
        assert_eq!(op.apply(0b01) & 0b11, u64::from(op.code()), "{op:?}");
    }
    assert!(UnaryOp::Not.eval(false));
    assert!(!UnaryOp::Not.eval(true));
    assert!(UnaryOp::True.eval(false));
}

#[test]
fn scalar_eval_matches_named_semantics() {
    for a in [false, true] {
        for b in [false, true] {
            assert_eq!(BinaryOp::And.eval(a, b), a && b);
            assert_eq!(BinaryOp::Or.eval(a, b), a || b);
            assert_eq!(BinaryOp::Imp.eval(a, b), !a || b);
            assert_eq!(BinaryOp::Rimp.eval(a, b), a || !b);
            assert_eq!(BinaryOp::Xor.eval(a, b), a != b);
            assert_eq!(BinaryOp::Xnor.eval(a, b), a == b);
            assert_eq!(BinaryOp::Nimp.eval(a, b), a && !b);
            assert_eq!(BinaryOp::Nrimp.eval(a, b), !a && b);
            assert_eq!(BinaryOp::A.eval(a, b), a);
            assert_eq!(BinaryOp::Nb.eval(a, b), !b);
        }
    }
}

#[test]
fn unknown_codes_are_rejected() {
    assert_eq!(BinaryOp::from_code(16), Err(LogicError::UnknownBinaryOp(16)));
    assert_eq!(UnaryOp::from_code(4), Err(LogicError::UnknownUnaryOp(4)));
}

#[test]
fn operator_metadata() {
    assert!(BinaryOp::And.is_commutative());
    assert!(!BinaryOp::Imp.is_commutative());
    assert!(BinaryOp::Xor.is_associative());
    assert!(!BinaryOp::Nand.is_associative());
    assert_eq!(BinaryOp::from_name("NAND"), Some(BinaryOp::Nand));
    assert_eq!(BinaryOp::from_name("nand"), None);
    assert_eq!(BinaryOp::Rimp.name(), "RIMP");
}

#[test]
fn evaluate_is_bitwise_parallel() {
    let f = Formula::xor(Formula::var(0), Formula::var(1));
    assert_eq!(f.evaluate(&[LANES_A, LANES_B]) & 0xF, 0b0110);

    let g = Formula::imp(Formula::var(1), Formula::constant(false));
    assert_eq!(g.evaluate(&[0, LANES_B]) & 0xF, 0b1010);
}

#[test]
#[should_panic]
fn evaluate_panics_on_missing_variable() {
    Formula::var(3).evaluate(&[0, 0]);
}

#[test]
fn single_assignment_eval() {
    let f = Formula::and(Formula::var(0), Formula::not(Formula::var(2)));
    assert!(f.eval(&[true, false, false]));
    assert!(!f.eval(&[true, false, true]));
    assert!(!f.eval(&[false, true, false]));
}

#[test]
fn variable_ids_keep_first_seen_order() {
    let f = Formula::or(
        Formula::and(Formula::var(2), Formula::var(0)),
        Formula::and(Formula::var(1), Formula::var(2)),
    );
    assert_eq!(f.variable_ids(), vec![2, 0, 1]);
    assert_eq!(f.max_variable_id(), Some(2));
    assert_eq!(Formula::constant(true).max_variable_id(), None);
}

#[test]
fn folding_helpers() {
    assert_eq!(Formula::and_all(Vec::new()), Formula::constant(true));
    assert_eq!(Formula::or_all(Vec::new()), Formula::constant(false));
    let f = Formula::and_all([Formula::var(0), Formula::var(1), Formula::var(2)]);
    assert_eq!(
        f,
        Formula::and(Formula::and(Formula::var(0), Formula::var(1)), Formula::var(2))
    );
    assert_eq!(f.size(), 5);
}

#[test]
fn structural_equivalence_respects_operand_order() {
    let ab = Formula::and(Formula::var(0), Formula::var(1));
    let ba = Formula::and(Formula::var(1), Formula::var(0));
    assert!(ab.structurally_equivalent(&ab.clone()));
    assert!(!ab.structurally_equivalent(&ba));
}

#[test]
fn literal_shapes() {
    assert!(Formula::var(4).is_literal());
    assert!(Formula::not(Formula::var(4)).is_literal());
    assert!(Formula::not(Formula::constant(true)).is_literal());
    assert!(!Formula::not(Formula::not(Formula::var(4))).is_literal());
    assert!(!Formula::and(Formula::var(0), Formula::var(1)).is_literal());
}
