pub mod reduce;

use crate::formula::{BinaryOp, Formula, UnaryOp};
use crate::log::targets::NORMAL_FORM as LOG_NORMAL_FORM;

pub use reduce::reduce;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalForm {
    /// Conjunction of disjunctions of literals.
    Cnf,
    /// Disjunction of conjunctions of literals.
    Dnf,
}

impl NormalForm {
    /// The (outer, inner) operator pair distribution pushes towards.
    fn layers(self) -> (BinaryOp, BinaryOp) {
        match self {
            NormalForm::Cnf => (BinaryOp::And, BinaryOp::Or),
            NormalForm::Dnf => (BinaryOp::Or, BinaryOp::And),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalFormOptions {
    /// Run the literal-level `reduce` pass after every distribution round.
    pub reduce: bool,
}

pub fn to_cnf(formula: &Formula) -> Formula {
    to_normal_form(formula, NormalForm::Cnf, NormalFormOptions::default())
}

pub fn to_dnf(formula: &Formula) -> Formula {
    to_normal_form(formula, NormalForm::Dnf, NormalFormOptions::default())
}

pub fn to_normal_form(formula: &Formula, form: NormalForm, options: NormalFormOptions) -> Formula {
    let mut f = lower_operators(formula.clone());
    f = eliminate_xnor(f);
    f = eliminate_imp(f);

    let mut rounds = 0usize;
    loop {
        let mut changed = false;
        f = eliminate_double_not(f, &mut changed);
        f = push_not_inward(f, BinaryOp::And, &mut changed);
        f = push_not_inward(f, BinaryOp::Or, &mut changed);
        rounds += 1;
        if !changed {
            break;
        }
    }
    log::trace!(target: LOG_NORMAL_FORM, "Negation normal form after {rounds} rounds.");

    let (outer, inner) = form.layers();
    rounds = 0;
    loop {
        let mut changed = false;
        f = distribute(f, inner, outer, &mut changed);
        if options.reduce {
            loop {
                let mut reduced = false;
                f = reduce(f, &mut reduced);
                if !reduced {
                    break;
                }
            }
        }
        rounds += 1;
        if !changed {
            break;
        }
    }
    log::debug!(
        target: LOG_NORMAL_FORM,
        "{:?} reached after {rounds} distribution rounds, size {} -> {}.",
        form,
        formula.size(),
        f.size()
    );
    f
}

/// Rewrites every operator outside {AND, OR, NOT, IMP, XNOR} in terms of them.
pub fn lower_operators(formula: Formula) -> Formula {
    match formula {
        Formula::Variable(_) | Formula::Constant(_) => formula,
        Formula::Unary { op, operand } => {
            let operand = lower_operators(*operand);
            match op {
                UnaryOp::False => Formula::Constant(false),
                UnaryOp::True => Formula::Constant(true),
                UnaryOp::Transfer => operand,
                UnaryOp::Not => Formula::not(operand),
            }
        }
        Formula::Binary { op, left, right } => {
            let a = lower_operators(*left);
            let b = lower_operators(*right);
            match op {
                BinaryOp::False => Formula::Constant(false),
                BinaryOp::True => Formula::Constant(true),
                BinaryOp::A => a,
                BinaryOp::B => b,
                BinaryOp::Na => Formula::not(a),
                BinaryOp::Nb => Formula::not(b),
                BinaryOp::And | BinaryOp::Or | BinaryOp::Imp | BinaryOp::Xnor => {
                    Formula::binary(a, op, b)
                }
                BinaryOp::Xor => Formula::not(Formula::xnor(a, b)),
                BinaryOp::Nand => Formula::not(Formula::and(a, b)),
                BinaryOp::Nor => Formula::not(Formula::or(a, b)),
                BinaryOp::Nimp => Formula::not(Formula::imp(a, b)),
                BinaryOp::Rimp => Formula::imp(b, a),
                BinaryOp::Nrimp => Formula::not(Formula::imp(b, a)),
            }
        }
    }
}

/// `a <-> b` becomes `(a -> b) & (b -> a)`, children first.
pub fn eliminate_xnor(formula: Formula) -> Formula {
    match formula {
        Formula::Unary { op, operand } => Formula::unary(op, eliminate_xnor(*operand)),
        Formula::Binary { op, left, right } => {
            let left = eliminate_xnor(*left);
            let right = eliminate_xnor(*right);
            if op == BinaryOp::Xnor {
                Formula::and(
                    Formula::imp(left.clone(), right.clone()),
                    Formula::imp(right, left),
                )
            } else {
                Formula::binary(left, op, right)
            }
        }
        leaf => leaf,
    }
}

/// `a -> b` becomes `~a | b`, children first.
pub fn eliminate_imp(formula: Formula) -> Formula {
    match formula {
        Formula::Unary { op, operand } => Formula::unary(op, eliminate_imp(*operand)),
        Formula::Binary { op, left, right } => {
            let left = eliminate_imp(*left);
            let right = eliminate_imp(*right);
            if op == BinaryOp::Imp {
                Formula::or(Formula::not(left), right)
            } else {
                Formula::binary(left, op, right)
            }
        }
        leaf => leaf,
    }
}

pub fn eliminate_double_not(formula: Formula, changed: &mut bool) -> Formula {
    match formula {
        Formula::Unary {
            op: UnaryOp::Not,
            operand,
        } => match *operand {
            Formula::Unary {
                op: UnaryOp::Not,
                operand: inner,
            } => {
                *changed = true;
                eliminate_double_not(*inner, changed)
            }
            other => Formula::not(eliminate_double_not(other, changed)),
        },
        Formula::Unary { op, operand } => {
            Formula::unary(op, eliminate_double_not(*operand, changed))
        }
        Formula::Binary { op, left, right } => {
            let left = eliminate_double_not(*left, changed);
            let right = eliminate_double_not(*right, changed);
            Formula::binary(left, op, right)
        }
        leaf => leaf,
    }
}

/// De Morgan for one operator: `~(a & b)` becomes `~a | ~b` when `target` is
/// AND, `~(a | b)` becomes `~a & ~b` when it is OR.
pub fn push_not_inward(formula: Formula, target: BinaryOp, changed: &mut bool) -> Formula {
    debug_assert!(matches!(target, BinaryOp::And | BinaryOp::Or));
    match formula {
        Formula::Unary {
            op: UnaryOp::Not,
            operand,
        } => match *operand {
            Formula::Binary { op, left, right } if op == target => {
                *changed = true;
                let flipped = if op == BinaryOp::And {
                    BinaryOp::Or
                } else {
                    BinaryOp::And
                };
                let left = push_not_inward(Formula::not(*left), target, changed);
                let right = push_not_inward(Formula::not(*right), target, changed);
                Formula::binary(left, flipped, right)
            }
            other => Formula::not(push_not_inward(other, target, changed)),
        },
        Formula::Unary { op, operand } => {
            Formula::unary(op, push_not_inward(*operand, target, changed))
        }
        Formula::Binary { op, left, right } => {
            let left = push_not_inward(*left, target, changed);
            let right = push_not_inward(*right, target, changed);
            Formula::binary(left, op, right)
        }
        leaf => leaf,
    }
}

/// Distributes `over` across `under`: with `over = OR, under = AND`,
/// `a | (b & c)` becomes `(a | b) & (a | c)`. The right child is tried before
/// the left, and each new branch is distributed again before returning.
pub fn distribute(formula: Formula, over: BinaryOp, under: BinaryOp, changed: &mut bool) -> Formula {
    match formula {
        Formula::Binary { op, left, right } if op == over => match (*left, *right) {
            (
                a,
                Formula::Binary {
                    op: inner,
                    left: b,
                    right: c,
                },
            ) if inner == under => {
                *changed = true;
                let l = distribute(Formula::binary(a.clone(), over, *b), over, under, changed);
                let r = distribute(Formula::binary(a, over, *c), over, under, changed);
                Formula::binary(l, under, r)
            }
            (
                Formula::Binary {
                    op: inner,
                    left: a,
                    right: b,
                },
                c,
            ) if inner == under => {
                *changed = true;
                let l = distribute(Formula::binary(*a, over, c.clone()), over, under, changed);
                let r = distribute(Formula::binary(*b, over, c), over, under, changed);
                Formula::binary(l, under, r)
            }
            (left, right) => {
                let left = distribute(left, over, under, changed);
                let right = distribute(right, over, under, changed);
                Formula::binary(left, op, right)
            }
        },
        Formula::Binary { op, left, right } => {
            let left = distribute(*left, over, under, changed);
            let right = distribute(*right, over, under, changed);
            Formula::binary(left, op, right)
        }
        Formula::Unary { op, operand } => Formula::unary(op, distribute(*operand, over, under, changed)),
        leaf => leaf,
    }
}

/// True when `formula` is a conjunction of clauses whose leaves are literals.
pub fn is_cnf(formula: &Formula) -> bool {
    is_layered(formula, BinaryOp::And, BinaryOp::Or)
}

/// True when `formula` is a disjunction of terms whose leaves are literals.
pub fn is_dnf(formula: &Formula) -> bool {
    is_layered(formula, BinaryOp::Or, BinaryOp::And)
}

fn is_layered(formula: &Formula, outer: BinaryOp, inner: BinaryOp) -> bool {
    match formula {
        Formula::Binary { op, left, right } if *op == outer => {
            is_layered(left, outer, inner) && is_layered(right, outer, inner)
        }
        other => is_flat(other, inner),
    }
}

fn is_flat(formula: &Formula, inner: BinaryOp) -> bool {
    match formula {
        Formula::Binary { op, left, right } if *op == inner => {
            is_flat(left, inner) && is_flat(right, inner)
        }
        other => other.is_literal(),
    }
}
