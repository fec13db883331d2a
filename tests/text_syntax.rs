use logicore::formula::text::{parse_formula, to_text, var_id, var_name};
use logicore::formula::{BinaryOp, Formula, UnaryOp};

fn v(id: u32) -> Formula {
    Formula::var(id)
}

#[test]
fn variable_names() {
    assert_eq!(var_name(0), "a");
    assert_eq!(var_name(25), "z");
    assert_eq!(var_name(26), "a1");
    assert_eq!(var_name(53), "b2");
    for id in [0, 7, 25, 26, 51, 52, 700] {
        assert_eq!(var_id(&var_name(id)), Some(id));
    }
    assert_eq!(var_id("a0"), None);
    assert_eq!(var_id("a01"), None);
    assert_eq!(var_id("A"), None);
    assert_eq!(var_id(""), None);
}

#[test]
fn precedence_and_associativity() {
    assert_eq!(
        parse_formula("a & b | c").expect("parse"),
        Formula::or(Formula::and(v(0), v(1)), v(2))
    );
    assert_eq!(
        parse_formula("a | b & c").expect("parse"),
        Formula::or(v(0), Formula::and(v(1), v(2)))
    );
    assert_eq!(
        parse_formula("a -> b -> c").expect("parse"),
        Formula::imp(Formula::imp(v(0), v(1)), v(2))
    );
    assert_eq!(
        parse_formula("a <-> b ^ c").expect("parse"),
        Formula::xor(Formula::xnor(v(0), v(1)), v(2))
    );
    assert_eq!(
        parse_formula("a | b -> c <-> d").expect("parse"),
        Formula::xnor(Formula::imp(Formula::or(v(0), v(1)), v(2)), v(3))
    );
    assert_eq!(
        parse_formula("~a & b").expect("parse"),
        Formula::and(Formula::not(v(0)), v(1))
    );
    assert_eq!(
        parse_formula("a <- b").expect("parse"),
        Formula::binary(v(0), BinaryOp::Rimp, v(1))
    );
}

#[test]
fn function_form_and_constants() {
    assert_eq!(
        parse_formula("NAND(a, b1)").expect("parse"),
        Formula::binary(v(0), BinaryOp::Nand, v(27))
    );
    assert_eq!(
        parse_formula("TRANSFER(z)").expect("parse"),
        Formula::unary(UnaryOp::Transfer, v(25))
    );
    assert_eq!(
        parse_formula("TRUE(a & b, c)").expect("parse"),
        Formula::binary(Formula::and(v(0), v(1)), BinaryOp::True, v(2))
    );
    assert_eq!(
        parse_formula("T | FALSE").expect("parse"),
        Formula::or(Formula::constant(true), Formula::constant(false))
    );
}

#[test]
fn malformed_input_is_rejected() {
    for src in ["", "a &", "a b", "(a | b", "FOO(a)", "NAND(a)", "a0", "a # b", "Q"] {
        assert!(parse_formula(src).is_err(), "accepted '{src}'");
    }
}

#[test]
fn printing_parenthesizes_nested_infix() {
    let f = parse_formula("a & (b | ~c)").expect("parse");
    assert_eq!(to_text(&f), "a & (b | ~c)");
    assert_eq!(f.to_string(), "a & (b | ~c)");

    let g = Formula::not(Formula::binary(v(0), BinaryOp::Nor, v(1)));
    assert_eq!(to_text(&g), "~NOR(a, b)");
}

#[test]
fn printed_text_parses_back() {
    let formulas = [
        Formula::xnor(
            Formula::xnor(Formula::xnor(v(0), v(1)), v(2)),
            Formula::xnor(v(0), Formula::xnor(v(1), v(2))),
        ),
        Formula::not(Formula::not(Formula::imp(v(30), Formula::constant(false)))),
        Formula::binary(
            Formula::unary(UnaryOp::False, v(3)),
            BinaryOp::Nrimp,
            Formula::binary(v(4), BinaryOp::Rimp, v(5)),
        ),
    ];
    for f in formulas {
        let text = to_text(&f);
        assert_eq!(parse_formula(&text).expect("reparse"), f, "{text}");
    }
}
