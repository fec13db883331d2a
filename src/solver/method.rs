use crate::check::ModelChecker;
use crate::cnf::proposition_to_cnf;
use crate::error::LogicError;
use crate::formula::Formula;
use crate::log::targets::SOLVER as LOG_SOLVER;
use crate::resolution::{self, ResolutionOptions};
use crate::sat::{DpllSolver, WalkSatConfig, WalkSatSolver};
use crate::solver::varisat::VarisatSolver;
use crate::solver::{SatSolver, SolveResult};

/// Which decision procedure answers a satisfiability question.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Method {
    Dpll,
    /// Incomplete: may answer [`SolveResult::Unknown`]. Without a seed the
    /// generator is seeded from the operating system.
    WalkSat {
        config: WalkSatConfig,
        seed: Option<u64>,
    },
    /// Limited to 64 distinct variables.
    Resolution,
    /// Limited to 64 distinct variables.
    ModelCheck,
    Varisat,
}

impl Method {
    pub fn name(&self) -> &'static str {
        match self {
            Method::Dpll => "dpll",
            Method::WalkSat { .. } => "walksat",
            Method::Resolution => "resolution",
            Method::ModelCheck => "model-check",
            Method::Varisat => "varisat",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// True under every assignment.
    Valid,
    /// False under every assignment.
    Contradiction,
    /// True under some assignments and false under others.
    Contingent,
    Unknown,
}

pub fn satisfiable(formula: &Formula, method: &Method) -> Result<SolveResult, LogicError> {
    let result = match method {
        Method::Dpll => {
            let cnf = proposition_to_cnf(formula)?;
            DpllSolver::new(&cnf).solve()
        }
        Method::WalkSat { config, seed } => {
            let cnf = proposition_to_cnf(formula)?;
            let mut solver = match seed {
                Some(seed) => WalkSatSolver::with_seed(&cnf, *seed),
                None => WalkSatSolver::new(&cnf),
            };
            if solver.is_satisfiable(config.max_flips, config.random_walk_probability)? {
                SolveResult::Sat
            } else if cnf.has_empty_clause() {
                SolveResult::Unsat
            } else {
                SolveResult::Unknown
            }
        }
        Method::Resolution => {
            if resolution::is_contradiction(formula)? {
                SolveResult::Unsat
            } else {
                SolveResult::Sat
            }
        }
        Method::ModelCheck => {
            if ModelChecker.is_satisfiable(formula)? {
                SolveResult::Sat
            } else {
                SolveResult::Unsat
            }
        }
        Method::Varisat => {
            let cnf = proposition_to_cnf(formula)?;
            VarisatSolver::new(&cnf).solve()
        }
    };
    log::debug!(target: LOG_SOLVER, "{} answered {result:?}.", method.name());
    Ok(result)
}

/// Like [`satisfiable`], but a method refusing the formula for its size is
/// replaced by DPLL.
pub fn satisfiable_with_fallback(
    formula: &Formula,
    method: &Method,
) -> Result<SolveResult, LogicError> {
    match satisfiable(formula, method) {
        Err(err) if err.is_capacity_limit() => {
            log::info!(
                target: LOG_SOLVER,
                "{} refused the formula ({err}), falling back to dpll.",
                method.name()
            );
            satisfiable(formula, &Method::Dpll)
        }
        other => other,
    }
}

/// Decides validity from two satisfiability questions, on `formula` and on
/// its negation.
pub fn classify(formula: &Formula, method: &Method) -> Result<Verdict, LogicError> {
    let positive = satisfiable(formula, method)?;
    if positive == SolveResult::Unsat {
        return Ok(Verdict::Contradiction);
    }
    let negative = satisfiable(&Formula::not(formula.clone()), method)?;
    Ok(match (positive, negative) {
        (_, SolveResult::Unsat) => Verdict::Valid,
        (SolveResult::Sat, SolveResult::Sat) => Verdict::Contingent,
        _ => Verdict::Unknown,
    })
}
