use indexmap::IndexSet;

use crate::formula::VarId;

use super::bit_clause::{BitClause, MAX_VARIABLES};

/// Per-variable index of the main clause set. For variable `v`,
/// `positive[v]` holds every clause containing `v` with `v` removed, and
/// `negative[v]` the same for `~v`, so the partners of a clause on `v` are
/// read straight from the opposite bucket.
#[derive(Debug, Clone)]
pub struct BucketBuff {
    positive: Vec<IndexSet<BitClause>>,
    negative: Vec<IndexSet<BitClause>>,
}

impl Default for BucketBuff {
    fn default() -> Self {
        Self::new()
    }
}

impl BucketBuff {
    pub fn new() -> Self {
        Self {
            positive: vec![IndexSet::new(); MAX_VARIABLES],
            negative: vec![IndexSet::new(); MAX_VARIABLES],
        }
    }

    pub fn insert(&mut self, clause: BitClause) {
        for var in clause.variable_ids() {
            let rest = clause.without_variable(var);
            self.bucket_mut(var, clause.contains(var, true)).insert(rest);
        }
    }

    pub fn remove(&mut self, clause: BitClause) {
        for var in clause.variable_ids() {
            let rest = clause.without_variable(var);
            self.bucket_mut(var, clause.contains(var, true))
                .shift_remove(&rest);
        }
    }

    /// Remainders of stored clauses holding `var` with the given polarity.
    pub fn bucket(&self, var: VarId, negated: bool) -> &IndexSet<BitClause> {
        if negated {
            &self.negative[var as usize]
        } else {
            &self.positive[var as usize]
        }
    }

    fn bucket_mut(&mut self, var: VarId, negated: bool) -> &mut IndexSet<BitClause> {
        if negated {
            &mut self.negative[var as usize]
        } else {
            &mut self.positive[var as usize]
        }
    }
}
