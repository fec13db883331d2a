use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::cnf::{Clause, Cnf, squeeze_with_mapping};
use crate::error::LogicError;
use crate::formula::VarId;
use crate::log::targets::WALKSAT as LOG_WALKSAT;
use crate::solver::{SatSolver, SolveResult, SolverStats};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkSatConfig {
    pub max_flips: usize,
    /// Chance of flipping a random variable of the chosen clause instead of
    /// the greedy best one.
    pub random_walk_probability: f64,
}

impl Default for WalkSatConfig {
    fn default() -> Self {
        Self {
            max_flips: 10_000,
            random_walk_probability: 0.5,
        }
    }
}

/// Stochastic local search. A `false` answer only means no model was found
/// within the flip budget.
#[derive(Debug, Clone)]
pub struct WalkSatSolver<R: Rng = ChaCha8Rng> {
    cnf: Cnf,
    original_ids: Vec<VarId>,
    values: Vec<bool>,
    rng: R,
    config: WalkSatConfig,
    model: Option<Vec<bool>>,
    stats: SolverStats,
}

impl WalkSatSolver<ChaCha8Rng> {
    /// Seeds from the operating system.
    pub fn new(cnf: &Cnf) -> Self {
        Self::with_rng(cnf, ChaCha8Rng::from_os_rng())
    }

    pub fn with_seed(cnf: &Cnf, seed: u64) -> Self {
        Self::with_rng(cnf, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> WalkSatSolver<R> {
    pub fn with_rng(cnf: &Cnf, rng: R) -> Self {
        let (cnf, original_ids) = squeeze_with_mapping(cnf);
        let n = original_ids.len();
        Self {
            cnf,
            original_ids,
            values: vec![false; n],
            rng,
            config: WalkSatConfig::default(),
            model: None,
            stats: SolverStats::default(),
        }
    }

    /// Settings used by [`SatSolver::solve`].
    pub fn with_config(mut self, config: WalkSatConfig) -> Self {
        self.config = config;
        self
    }

    pub fn is_satisfiable(
        &mut self,
        max_flips: usize,
        random_walk_probability: f64,
    ) -> Result<bool, LogicError> {
        if !(0.0..=1.0).contains(&random_walk_probability) {
            return Err(LogicError::InvalidProbability(random_walk_probability));
        }
        self.stats.solve_calls += 1;
        self.model = None;
        if self.cnf.has_empty_clause() {
            return Ok(false);
        }

        for v in self.values.iter_mut() {
            *v = self.rng.random::<bool>();
        }

        for _ in 0..max_flips {
            let unsatisfied = self.unsatisfied_clauses();
            if unsatisfied.is_empty() {
                return Ok(self.finish());
            }
            let pick = unsatisfied[self.rng.random_range(0..unsatisfied.len())];
            let clause = self.cnf.clauses[pick].clone();
            let var = if self.rng.random::<f64>() < random_walk_probability {
                clause[self.rng.random_range(0..clause.len())].var as usize
            } else {
                self.greedy_pick(&clause)
            };
            self.values[var] = !self.values[var];
            self.stats.flips += 1;
            log::trace!(target: LOG_WALKSAT, "Flip {var} for clause {pick}.");
        }

        if self.cnf.eval(&self.values) {
            return Ok(self.finish());
        }
        log::debug!(
            target: LOG_WALKSAT,
            "No model within {} flips, result inconclusive.",
            max_flips
        );
        Ok(false)
    }

    /// Model from the last successful call, indexed by squeezed id.
    pub fn model(&self) -> Option<&[bool]> {
        self.model.as_deref()
    }

    pub fn original_ids(&self) -> &[VarId] {
        &self.original_ids
    }

    pub fn stats(&self) -> SolverStats {
        self.stats
    }

    fn unsatisfied_clauses(&self) -> Vec<usize> {
        self.cnf
            .clauses
            .iter()
            .enumerate()
            .filter(|(_, c)| !Cnf::eval_clause(c, &self.values))
            .map(|(i, _)| i)
            .collect()
    }

    // variable whose flip satisfies the most clauses, first seen wins ties
    fn greedy_pick(&mut self, clause: &Clause) -> usize {
        let mut best = None::<(usize, usize)>;
        for lit in clause {
            let var = lit.var as usize;
            self.values[var] = !self.values[var];
            let score = self.cnf.count_satisfied(&self.values);
            self.values[var] = !self.values[var];
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((var, score)),
            }
        }
        best.map_or(0, |(var, _)| var)
    }

    fn finish(&mut self) -> bool {
        log::debug!(
            target: LOG_WALKSAT,
            "Model found after {} flips.",
            self.stats.flips
        );
        self.model = Some(self.values.clone());
        true
    }
}

impl<R: Rng> SatSolver for WalkSatSolver<R> {
    fn solve(&mut self) -> SolveResult {
        let config = self.config;
        match self.is_satisfiable(config.max_flips, config.random_walk_probability) {
            Ok(true) => SolveResult::Sat,
            Ok(false) if self.cnf.has_empty_clause() => SolveResult::Unsat,
            Ok(false) => SolveResult::Unknown,
            Err(err) => {
                log::error!(target: LOG_WALKSAT, "{err}");
                SolveResult::Unknown
            }
        }
    }

    fn model(&self) -> Option<&[bool]> {
        WalkSatSolver::model(self)
    }

    fn original_ids(&self) -> &[VarId] {
        WalkSatSolver::original_ids(self)
    }

    fn stats(&self) -> SolverStats {
        self.stats
    }

    fn backend_name(&self) -> &'static str {
        "walksat"
    }
}
