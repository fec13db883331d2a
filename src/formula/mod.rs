pub mod op;
pub mod text;

use std::fmt;

use indexmap::IndexSet;

pub use op::{BinaryOp, UnaryOp};

pub type VarId = u32;

/// A propositional formula tree. Each node owns its children; rewrites build
/// new trees instead of patching shared nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Formula {
    Variable(VarId),
    Constant(bool),
    Unary {
        op: UnaryOp,
        operand: Box<Formula>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Formula>,
        right: Box<Formula>,
    },
}

impl Formula {
    pub fn var(id: VarId) -> Self {
        Formula::Variable(id)
    }

    pub fn constant(value: bool) -> Self {
        Formula::Constant(value)
    }

    pub fn unary(op: UnaryOp, operand: Formula) -> Self {
        Formula::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(left: Formula, op: BinaryOp, right: Formula) -> Self {
        Formula::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(operand: Formula) -> Self {
        Self::unary(UnaryOp::Not, operand)
    }

    pub fn and(left: Formula, right: Formula) -> Self {
        Self::binary(left, BinaryOp::And, right)
    }

    pub fn or(left: Formula, right: Formula) -> Self {
        Self::binary(left, BinaryOp::Or, right)
    }

    pub fn imp(left: Formula, right: Formula) -> Self {
        Self::binary(left, BinaryOp::Imp, right)
    }

    pub fn xnor(left: Formula, right: Formula) -> Self {
        Self::binary(left, BinaryOp::Xnor, right)
    }

    pub fn xor(left: Formula, right: Formula) -> Self {
        Self::binary(left, BinaryOp::Xor, right)
    }

    /// Left-nested conjunction of `items`; `T` when empty.
    pub fn and_all<I: IntoIterator<Item = Formula>>(items: I) -> Self {
        fold(items, BinaryOp::And).unwrap_or(Formula::Constant(true))
    }

    /// Left-nested disjunction of `items`; `F` when empty.
    pub fn or_all<I: IntoIterator<Item = Formula>>(items: I) -> Self {
        fold(items, BinaryOp::Or).unwrap_or(Formula::Constant(false))
    }

    /// Evaluates 64 assignments at once: bit `k` of `values[id]` is the value of
    /// variable `id` in assignment `k`.
    ///
    /// Panics when the tree mentions a variable outside `values`.
    pub fn evaluate(&self, values: &[u64]) -> u64 {
        match self {
            Formula::Variable(id) => {
                let idx = *id as usize;
                assert!(
                    idx < values.len(),
                    "variable {} has no value (assignment covers {} ids)",
                    id,
                    values.len()
                );
                values[idx]
            }
            Formula::Constant(true) => u64::MAX,
            Formula::Constant(false) => 0,
            Formula::Unary { op, operand } => op.apply(operand.evaluate(values)),
            Formula::Binary { op, left, right } => {
                op.apply(left.evaluate(values), right.evaluate(values))
            }
        }
    }

    /// Evaluates a single assignment indexed by variable id.
    pub fn eval(&self, model: &[bool]) -> bool {
        let words = model
            .iter()
            .map(|&v| if v { u64::MAX } else { 0 })
            .collect::<Vec<_>>();
        (self.evaluate(&words) & 1) == 1
    }

    /// Referenced variable ids in first-seen order, without duplicates.
    pub fn variable_ids(&self) -> Vec<VarId> {
        let mut ids = IndexSet::new();
        self.collect_variable_ids(&mut ids);
        ids.into_iter().collect()
    }

    fn collect_variable_ids(&self, ids: &mut IndexSet<VarId>) {
        match self {
            Formula::Variable(id) => {
                ids.insert(*id);
            }
            Formula::Constant(_) => {}
            Formula::Unary { operand, .. } => operand.collect_variable_ids(ids),
            Formula::Binary { left, right, .. } => {
                left.collect_variable_ids(ids);
                right.collect_variable_ids(ids);
            }
        }
    }

    pub fn max_variable_id(&self) -> Option<VarId> {
        self.variable_ids().into_iter().max()
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        match self {
            Formula::Variable(_) | Formula::Constant(_) => 1,
            Formula::Unary { operand, .. } => operand.size() + 1,
            Formula::Binary { left, right, .. } => left.size() + right.size() + 1,
        }
    }

    /// Same node kinds, same operators and pairwise equivalent children. Operand
    /// order matters, so `a & b` is not equivalent to `b & a`.
    pub fn structurally_equivalent(&self, other: &Formula) -> bool {
        self == other
    }

    pub fn is_literal(&self) -> bool {
        match self {
            Formula::Variable(_) | Formula::Constant(_) => true,
            Formula::Unary {
                op: UnaryOp::Not,
                operand,
            } => matches!(**operand, Formula::Variable(_) | Formula::Constant(_)),
            _ => false,
        }
    }

    pub fn binary_op(&self) -> Option<BinaryOp> {
        match self {
            Formula::Binary { op, .. } => Some(*op),
            _ => None,
        }
    }
}

fn fold<I: IntoIterator<Item = Formula>>(items: I, op: BinaryOp) -> Option<Formula> {
    items
        .into_iter()
        .reduce(|acc, next| Formula::binary(acc, op, next))
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&text::to_text(self))
    }
}
