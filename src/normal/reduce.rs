use crate::formula::{BinaryOp, Formula, UnaryOp};

/// Literal-level simplification: folds constants through NOT, AND and OR and
/// collapses AND/OR nodes whose two children are the same literal or a literal
/// and its complement. Works bottom-up and sets `changed` on every rewrite.
pub fn reduce(formula: Formula, changed: &mut bool) -> Formula {
    match formula {
        Formula::Unary { op, operand } => {
            let operand = reduce(*operand, changed);
            match (op, operand) {
                (UnaryOp::Not, Formula::Constant(value)) => {
                    *changed = true;
                    Formula::Constant(!value)
                }
                (op, operand) => Formula::unary(op, operand),
            }
        }
        Formula::Binary { op, left, right } => {
            let left = reduce(*left, changed);
            let right = reduce(*right, changed);
            match op {
                BinaryOp::And | BinaryOp::Or => reduce_pair(left, op, right, changed),
                _ => Formula::binary(left, op, right),
            }
        }
        leaf => leaf,
    }
}

fn reduce_pair(left: Formula, op: BinaryOp, right: Formula, changed: &mut bool) -> Formula {
    // identity element of AND is T, of OR is F
    let identity = op == BinaryOp::And;

    match (left, right) {
        (Formula::Constant(c), other) | (other, Formula::Constant(c)) => {
            *changed = true;
            if c == identity {
                other
            } else {
                Formula::Constant(c)
            }
        }
        (l, r) if l.is_literal() && r.is_literal() && l == r => {
            *changed = true;
            l
        }
        (l, r) if l.is_literal() && r.is_literal() && complementary(&l, &r) => {
            *changed = true;
            Formula::Constant(!identity)
        }
        (l, r) => Formula::binary(l, op, r),
    }
}

fn complementary(a: &Formula, b: &Formula) -> bool {
    match (a, b) {
        (
            Formula::Unary {
                op: UnaryOp::Not,
                operand,
            },
            other,
        )
        | (
            other,
            Formula::Unary {
                op: UnaryOp::Not,
                operand,
            },
        ) => **operand == *other,
        _ => false,
    }
}
