use std::fmt;

use crate::cnf::Literal;
use crate::error::LogicError;
use crate::formula::VarId;

pub const MAX_VARIABLES: usize = u64::BITS as usize;

/// A clause over variables `0..64` as two literal masks. A bit is never set in
/// both masks of a stored clause.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BitClause {
    pub positive: u64,
    pub negative: u64,
}

impl BitClause {
    pub const EMPTY: BitClause = BitClause {
        positive: 0,
        negative: 0,
    };

    /// Packs `literals`; `Ok(None)` when they hold a complementary pair.
    pub fn from_literals(literals: &[Literal]) -> Result<Option<Self>, LogicError> {
        let mut clause = BitClause::EMPTY;
        for lit in literals {
            if lit.var as usize >= MAX_VARIABLES {
                return Err(LogicError::VariableOutOfRange {
                    id: lit.var,
                    limit: MAX_VARIABLES,
                });
            }
            clause = clause.with_literal(lit.var, lit.negated);
        }
        Ok(if clause.is_tautology() {
            None
        } else {
            Some(clause)
        })
    }

    pub fn is_empty(self) -> bool {
        (self.positive | self.negative) == 0
    }

    pub fn is_tautology(self) -> bool {
        (self.positive & self.negative) != 0
    }

    pub fn len(self) -> u32 {
        self.positive.count_ones() + self.negative.count_ones()
    }

    pub fn variables(self) -> u64 {
        self.positive | self.negative
    }

    /// Every literal of `self` also occurs in `other`.
    pub fn subsumes(self, other: BitClause) -> bool {
        (self.positive & !other.positive) == 0 && (self.negative & !other.negative) == 0
    }

    pub fn contains(self, var: VarId, negated: bool) -> bool {
        let mask = 1u64 << var;
        if negated {
            (self.negative & mask) != 0
        } else {
            (self.positive & mask) != 0
        }
    }

    pub fn with_literal(self, var: VarId, negated: bool) -> Self {
        let mask = 1u64 << var;
        if negated {
            Self {
                positive: self.positive,
                negative: self.negative | mask,
            }
        } else {
            Self {
                positive: self.positive | mask,
                negative: self.negative,
            }
        }
    }

    pub fn without_variable(self, var: VarId) -> Self {
        let mask = !(1u64 << var);
        Self {
            positive: self.positive & mask,
            negative: self.negative & mask,
        }
    }

    pub fn union(self, other: BitClause) -> Self {
        Self {
            positive: self.positive | other.positive,
            negative: self.negative | other.negative,
        }
    }

    /// Literals in ascending variable order.
    pub fn literals(self) -> Vec<Literal> {
        (0..MAX_VARIABLES as VarId)
            .filter_map(|var| {
                if self.contains(var, false) {
                    Some(Literal::pos(var))
                } else if self.contains(var, true) {
                    Some(Literal::neg(var))
                } else {
                    None
                }
            })
            .collect()
    }

    /// Set variable indices in ascending order.
    pub fn variable_ids(self) -> impl Iterator<Item = VarId> {
        let mut rest = self.variables();
        std::iter::from_fn(move || {
            if rest == 0 {
                return None;
            }
            let var = rest.trailing_zeros();
            rest &= rest - 1;
            Some(var)
        })
    }
}

impl fmt::Display for BitClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, lit) in self.literals().into_iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{}", lit)?;
        }
        write!(f, ")")
    }
}
