use varisat::ExtendFormula;

use crate::cnf::{Cnf, Literal, squeeze_with_mapping};
use crate::formula::VarId;
use crate::log::targets::SOLVER as LOG_SOLVER;
use crate::solver::{SatSolver, SolveResult, SolverStats};

/// CDCL reference back-end backed by varisat, with no variable ceiling.
pub struct VarisatSolver {
    inner: varisat::Solver<'static>,
    vars: Vec<varisat::Var>,
    original_ids: Vec<VarId>,
    has_empty_clause: bool,
    model: Option<Vec<bool>>,
    stats: SolverStats,
}

impl VarisatSolver {
    pub fn new(cnf: &Cnf) -> Self {
        let (squeezed, original_ids) = squeeze_with_mapping(cnf);
        let mut inner = varisat::Solver::new();
        let vars = (0..original_ids.len())
            .map(|_| inner.new_var())
            .collect::<Vec<_>>();
        let mut solver = Self {
            inner,
            vars,
            original_ids,
            has_empty_clause: squeezed.has_empty_clause(),
            model: None,
            stats: SolverStats::default(),
        };
        for clause in &squeezed.clauses {
            let lits = clause.iter().map(|&l| solver.to_lit(l)).collect::<Vec<_>>();
            solver.inner.add_clause(&lits);
        }
        solver
    }

    pub fn original_ids(&self) -> &[VarId] {
        &self.original_ids
    }

    fn to_lit(&self, lit: Literal) -> varisat::Lit {
        varisat::Lit::from_var(self.vars[lit.var as usize], !lit.negated)
    }
}

impl SatSolver for VarisatSolver {
    fn solve(&mut self) -> SolveResult {
        self.stats.solve_calls += 1;
        self.model = None;
        if self.has_empty_clause {
            return SolveResult::Unsat;
        }
        match self.inner.solve() {
            Ok(true) => {
                let lits = self.inner.model().unwrap_or_default();
                let model = self
                    .vars
                    .iter()
                    .map(|v| lits.contains(&v.lit(true)))
                    .collect();
                self.model = Some(model);
                SolveResult::Sat
            }
            Ok(false) => SolveResult::Unsat,
            Err(err) => {
                log::error!(target: LOG_SOLVER, "varisat failed: {err}");
                SolveResult::Unknown
            }
        }
    }

    fn model(&self) -> Option<&[bool]> {
        self.model.as_deref()
    }

    fn original_ids(&self) -> &[VarId] {
        VarisatSolver::original_ids(self)
    }

    fn stats(&self) -> SolverStats {
        self.stats
    }

    fn backend_name(&self) -> &'static str {
        "varisat"
    }
}
