use thiserror::Error;

use crate::formula::VarId;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LogicError {
    #[error("variable id {id} does not fit a {limit}-bit clause")]
    VariableOutOfRange { id: VarId, limit: usize },
    #[error("{count} distinct variables exceed the limit of {limit}")]
    TooManyVariables { count: usize, limit: usize },
    #[error("unknown binary operator code {0}")]
    UnknownBinaryOp(u8),
    #[error("unknown unary operator code {0}")]
    UnknownUnaryOp(u8),
    #[error("formula is not in normal form: {0}")]
    NotNormalForm(String),
    #[error("random walk probability must be in [0,1], got {0}")]
    InvalidProbability(f64),
}

impl LogicError {
    /// True when the error comes from the 64-variable ceiling of a bit-packed engine.
    pub fn is_capacity_limit(&self) -> bool {
        matches!(
            self,
            LogicError::VariableOutOfRange { .. } | LogicError::TooManyVariables { .. }
        )
    }
}
