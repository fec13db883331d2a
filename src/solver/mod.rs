pub mod method;
pub mod varisat;

use crate::formula::VarId;

pub use method::{Method, Verdict, classify, satisfiable, satisfiable_with_fallback};
pub use varisat::VarisatSolver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveResult {
    Sat,
    Unsat,
    /// The search gave up without an answer (WalkSAT out of flips).
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolverStats {
    pub solve_calls: usize,
    pub decisions: usize,
    pub propagations: usize,
    pub pure_literals: usize,
    pub flips: usize,
}

/// A satisfiability back-end over one Cnf. Models are indexed by the
/// squeezed variable ids the back-end works with.
pub trait SatSolver {
    fn solve(&mut self) -> SolveResult;
    fn model(&self) -> Option<&[bool]>;
    /// Original id of every squeezed id.
    fn original_ids(&self) -> &[VarId];
    fn stats(&self) -> SolverStats;
    fn backend_name(&self) -> &'static str;
}
