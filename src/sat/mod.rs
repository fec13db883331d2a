pub mod dpll;
pub mod walksat;

pub use dpll::DpllSolver;
pub use walksat::{WalkSatConfig, WalkSatSolver};
