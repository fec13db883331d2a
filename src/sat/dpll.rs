use crate::cnf::{Clause, Cnf, Literal, proposition_to_cnf, squeeze_with_mapping};
use crate::error::LogicError;
use crate::formula::{Formula, VarId};
use crate::log::targets::DPLL as LOG_DPLL;
use crate::solver::{SatSolver, SolveResult, SolverStats};

/// Exact backtracking solver with pure-literal elimination and unit
/// propagation. Variable ids are squeezed to `0..k` on construction, and the
/// model is indexed by the squeezed ids.
#[derive(Debug, Clone)]
pub struct DpllSolver {
    clauses: Vec<Clause>,
    original_ids: Vec<VarId>,
    assigned: Vec<bool>,
    values: Vec<bool>,
    positive_count: Vec<usize>,
    negative_count: Vec<usize>,
    model: Option<Vec<bool>>,
    stats: SolverStats,
}

/// What one scan over the clauses found under the current partial assignment.
enum Scan {
    Falsified,
    Satisfied,
    Open { unit: Option<Literal> },
}

impl DpllSolver {
    pub fn new(cnf: &Cnf) -> Self {
        let (squeezed, original_ids) = squeeze_with_mapping(cnf);
        let n = original_ids.len();
        Self {
            clauses: squeezed.clauses,
            original_ids,
            assigned: vec![false; n],
            values: vec![false; n],
            positive_count: vec![0; n],
            negative_count: vec![0; n],
            model: None,
            stats: SolverStats::default(),
        }
    }

    pub fn is_satisfiable(&mut self) -> bool {
        self.stats.solve_calls += 1;
        self.model = None;
        if self.clauses.is_empty() {
            self.model = Some(Vec::new());
            return true;
        }
        if self.clauses.iter().any(|c| c.is_empty()) {
            log::debug!(target: LOG_DPLL, "Empty clause present, unsatisfiable.");
            return false;
        }
        self.assigned.fill(false);
        let sat = self.search();
        log::debug!(
            target: LOG_DPLL,
            "{} over {} variables and {} clauses ({} decisions, {} propagations, {} pure).",
            if sat { "SAT" } else { "UNSAT" },
            self.original_ids.len(),
            self.clauses.len(),
            self.stats.decisions,
            self.stats.propagations,
            self.stats.pure_literals
        );
        sat
    }

    /// Model from the last satisfiable call, indexed by squeezed id.
    pub fn model(&self) -> Option<&[bool]> {
        self.model.as_deref()
    }

    /// `original_ids()[k]` is the caller's id for squeezed id `k`.
    pub fn original_ids(&self) -> &[VarId] {
        &self.original_ids
    }

    /// Model spread back over the caller's ids; ids not in the Cnf read false.
    pub fn model_by_original_id(&self) -> Option<Vec<bool>> {
        let model = self.model.as_ref()?;
        let span = self
            .original_ids
            .iter()
            .map(|&id| id as usize + 1)
            .max()
            .unwrap_or(0);
        let mut out = vec![false; span];
        for (k, &id) in self.original_ids.iter().enumerate() {
            out[id as usize] = model[k];
        }
        Some(out)
    }

    pub fn stats(&self) -> SolverStats {
        self.stats
    }

    pub fn is_prop_contradiction(formula: &Formula) -> Result<bool, LogicError> {
        let cnf = proposition_to_cnf(formula)?;
        Ok(!DpllSolver::new(&cnf).is_satisfiable())
    }

    pub fn is_prop_valid(formula: &Formula) -> Result<bool, LogicError> {
        Self::is_prop_contradiction(&Formula::not(formula.clone()))
    }

    // tentatively assigns, searches, and always clears the assignment again
    fn dpll(&mut self, var: usize, value: bool) -> bool {
        self.assigned[var] = true;
        self.values[var] = value;
        let result = self.search();
        self.assigned[var] = false;
        result
    }

    fn search(&mut self) -> bool {
        let unit = match self.scan() {
            Scan::Falsified => return false,
            Scan::Satisfied => {
                self.capture_model();
                return true;
            }
            Scan::Open { unit } => unit,
        };

        if let Some((var, value)) = self.pure_literal() {
            self.stats.pure_literals += 1;
            log::trace!(target: LOG_DPLL, "Pure literal {var}={value}.");
            return self.dpll(var, value);
        }

        if let Some(lit) = unit {
            self.stats.propagations += 1;
            log::trace!(target: LOG_DPLL, "Unit literal {lit}.");
            return self.dpll(lit.var as usize, !lit.negated);
        }

        let Some(var) = self.assigned.iter().position(|&a| !a) else {
            // every clause is decided once all variables are
            return false;
        };
        self.stats.decisions += 1;
        log::trace!(target: LOG_DPLL, "Branch on {var}.");
        self.dpll(var, false) || self.dpll(var, true)
    }

    // one pass: conflict, all-true, live occurrence counts and the first unit
    fn scan(&mut self) -> Scan {
        self.positive_count.fill(0);
        self.negative_count.fill(0);

        let mut all_true = true;
        let mut unit = None;
        for clause in &self.clauses {
            let mut satisfied = false;
            let mut open = 0usize;
            let mut last_open = None;
            for &lit in clause {
                let var = lit.var as usize;
                if self.assigned[var] {
                    if self.values[var] != lit.negated {
                        satisfied = true;
                        break;
                    }
                } else {
                    open += 1;
                    last_open = Some(lit);
                }
            }
            if satisfied {
                continue;
            }
            if open == 0 {
                return Scan::Falsified;
            }
            all_true = false;
            for &lit in clause {
                let var = lit.var as usize;
                if !self.assigned[var] {
                    if lit.negated {
                        self.negative_count[var] += 1;
                    } else {
                        self.positive_count[var] += 1;
                    }
                }
            }
            if open == 1 && unit.is_none() {
                unit = last_open;
            }
        }

        if all_true {
            Scan::Satisfied
        } else {
            Scan::Open { unit }
        }
    }

    fn pure_literal(&self) -> Option<(usize, bool)> {
        self.positive_count
            .iter()
            .zip(&self.negative_count)
            .position(|(&p, &n)| (p == 0) != (n == 0))
            .map(|var| (var, self.positive_count[var] > 0))
    }

    fn capture_model(&mut self) {
        let model = self
            .assigned
            .iter()
            .zip(&self.values)
            .map(|(&a, &v)| a && v)
            .collect();
        self.model = Some(model);
    }
}

impl SatSolver for DpllSolver {
    fn solve(&mut self) -> SolveResult {
        if self.is_satisfiable() {
            SolveResult::Sat
        } else {
            SolveResult::Unsat
        }
    }

    fn model(&self) -> Option<&[bool]> {
        DpllSolver::model(self)
    }

    fn original_ids(&self) -> &[VarId] {
        DpllSolver::original_ids(self)
    }

    fn stats(&self) -> SolverStats {
        self.stats
    }

    fn backend_name(&self) -> &'static str {
        "dpll"
    }
}
