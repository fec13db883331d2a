pub mod check;
pub mod cnf;
pub mod error;
pub mod formula;
pub mod log;
pub mod normal;
pub mod resolution;
pub mod sat;
pub mod solver;

pub use error::LogicError;
pub use formula::{BinaryOp, Formula, UnaryOp, VarId};
