use crate::error::LogicError;
use crate::formula::Formula;

const WORD_BITS: usize = u64::BITS as usize;
const LOG_WORD_BITS: usize = 6;

/// Truth-table checker: enumerates every assignment, 64 per evaluation pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelChecker;

impl ModelChecker {
    pub const MAX_VARIABLES: usize = WORD_BITS;

    pub fn is_valid(&self, formula: &Formula) -> Result<bool, LogicError> {
        Ok(self.first_falsifying(formula)?.is_none())
    }

    pub fn is_contradiction(&self, formula: &Formula) -> Result<bool, LogicError> {
        self.is_valid(&Formula::not(formula.clone()))
    }

    pub fn is_satisfiable(&self, formula: &Formula) -> Result<bool, LogicError> {
        Ok(!self.is_contradiction(formula)?)
    }

    /// A satisfying assignment indexed by variable id, if one exists.
    pub fn find_model(&self, formula: &Formula) -> Result<Option<Vec<bool>>, LogicError> {
        self.first_falsifying(&Formula::not(formula.clone()))
    }

    // first assignment (indexed by id) under which `formula` is false
    fn first_falsifying(&self, formula: &Formula) -> Result<Option<Vec<bool>>, LogicError> {
        let mut ids = formula.variable_ids();
        ids.sort_unstable();
        if ids.len() > Self::MAX_VARIABLES {
            return Err(LogicError::TooManyVariables {
                count: ids.len(),
                limit: Self::MAX_VARIABLES,
            });
        }
        let span = ids.last().map_or(0, |&id| id as usize + 1);
        let mut values = vec![0u64; span];

        // the low six variables cycle through all 64 patterns inside one word
        let packed = ids.len().min(LOG_WORD_BITS);
        for (i, &id) in ids.iter().take(packed).enumerate() {
            values[id as usize] = (0..WORD_BITS as u64)
                .filter(|model| model & (1 << i) != 0)
                .fold(0, |mask, model| mask | (1 << model));
        }
        let lanes = 1u64 << packed;
        let lane_mask = if lanes == 64 {
            u64::MAX
        } else {
            (1u64 << lanes) - 1
        };

        let rounds = 1u128 << (ids.len() - packed);
        for round in 0..rounds {
            for (i, &id) in ids.iter().skip(packed).enumerate() {
                values[id as usize] = if round & (1 << i) != 0 { u64::MAX } else { 0 };
            }
            let falsified = !formula.evaluate(&values) & lane_mask;
            if falsified != 0 {
                let lane = falsified.trailing_zeros() as u64;
                let mut model = vec![false; span];
                for (i, &id) in ids.iter().enumerate() {
                    model[id as usize] = if i < packed {
                        lane & (1 << i) != 0
                    } else {
                        round & (1 << (i - packed)) != 0
                    };
                }
                return Ok(Some(model));
            }
        }
        Ok(None)
    }
}
