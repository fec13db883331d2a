//! Refutation by saturation under the resolution rule.
//!
//! Clauses are packed into [`BitClause`]s, so at most 64 distinct variables
//! can take part. The main set is kept free of subsumed clauses, and partners
//! for resolution are looked up per variable in a [`BucketBuff`].

pub mod bit_clause;
pub mod bucket;
pub mod proof;

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use indexmap::IndexSet;

use crate::cnf::{Cnf, proposition_to_cnf, squeeze_with_mapping};
use crate::error::LogicError;
use crate::formula::{Formula, VarId};
use crate::log::targets::RESOLUTION as LOG_RESOLUTION;

pub use bit_clause::{BitClause, MAX_VARIABLES};
pub use bucket::BucketBuff;
pub use proof::{Derivation, Proof, ProofGraph, ProofStep};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionOptions {
    pub record_proof: bool,
}

impl Default for ResolutionOptions {
    fn default() -> Self {
        Self { record_proof: true }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionStats {
    pub processed: usize,
    pub subsumed: usize,
    pub removed: usize,
    pub resolvents: usize,
    pub tautologies: usize,
}

#[derive(Debug, Clone)]
pub struct ResolutionReport {
    pub contradiction: bool,
    pub proof: Option<Proof>,
    pub elapsed: Duration,
    pub stats: ResolutionStats,
}

impl ResolutionReport {
    /// Human-readable refutation, or a note saying why there is none.
    pub fn trace(&self) -> String {
        let mut out = match (&self.proof, self.contradiction) {
            (Some(proof), true) if proof.is_empty() => {
                "Empty clause among the premises.\n".to_owned()
            }
            (Some(proof), true) => proof.render(),
            (None, true) => "No proof recorded.\n".to_owned(),
            (_, false) => "Proof not found.\n".to_owned(),
        };
        out.push_str(&format!(
            "Elapsed: {:.3} ms\n",
            self.elapsed.as_secs_f64() * 1000.0
        ));
        out
    }
}

/// Saturation state for one refutation attempt.
#[derive(Debug, Clone)]
pub struct Prover {
    frontier: VecDeque<BitClause>,
    main: IndexSet<BitClause>,
    buckets: BucketBuff,
    graph: Option<ProofGraph>,
    refuted: bool,
    stats: ResolutionStats,
}

impl Prover {
    /// Packs `cnf`; ids must already be below 64.
    pub fn new(cnf: &Cnf, options: ResolutionOptions) -> Result<Self, LogicError> {
        let mut frontier = VecDeque::with_capacity(cnf.len());
        for clause in &cnf.clauses {
            if let Some(packed) = BitClause::from_literals(clause)? {
                frontier.push_back(packed);
            }
        }
        let graph = options
            .record_proof
            .then(|| ProofGraph::new(frontier.iter().copied()));
        Ok(Self {
            frontier,
            main: IndexSet::new(),
            buckets: BucketBuff::new(),
            graph,
            refuted: false,
            stats: ResolutionStats::default(),
        })
    }

    /// Runs until the empty clause appears (`true`) or nothing is left to
    /// process (`false`, the clauses are satisfiable).
    pub fn refute(&mut self) -> bool {
        if self.frontier.iter().any(|c| c.is_empty()) {
            self.refuted = true;
            return true;
        }

        while let Some(clause) = self.frontier.pop_front() {
            self.stats.processed += 1;
            if self.main.iter().any(|m| m.subsumes(clause)) {
                self.stats.subsumed += 1;
                continue;
            }

            let weaker = self
                .main
                .iter()
                .copied()
                .filter(|&m| clause.subsumes(m))
                .collect::<Vec<_>>();
            for m in weaker {
                self.main.shift_remove(&m);
                self.buckets.remove(m);
                self.stats.removed += 1;
            }

            let mut produced = Vec::new();
            for var in clause.variable_ids() {
                let negated = clause.contains(var, true);
                let rest = clause.without_variable(var);
                for &partner in self.buckets.bucket(var, !negated) {
                    let resolvent = rest.union(partner);
                    if resolvent.is_tautology() {
                        self.stats.tautologies += 1;
                        continue;
                    }
                    self.stats.resolvents += 1;
                    if let Some(graph) = self.graph.as_mut() {
                        graph.record(
                            resolvent,
                            Derivation {
                                left: clause,
                                right: partner.with_literal(var, !negated),
                                pivot: var,
                            },
                        );
                    }
                    log::trace!(target: LOG_RESOLUTION, "{clause} x {partner} on {var} => {resolvent}");
                    if resolvent.is_empty() {
                        self.refuted = true;
                        return true;
                    }
                    produced.push(resolvent);
                }
            }

            self.buckets.insert(clause);
            self.main.insert(clause);
            self.frontier.extend(produced);
        }
        false
    }

    /// Steps deriving the empty clause, in squeezed ids, after a successful
    /// [`Prover::refute`] with proof recording on.
    pub fn proof(&self, ids: &[VarId]) -> Option<Proof> {
        if !self.refuted {
            return None;
        }
        let graph = self.graph.as_ref()?;
        Some(Proof::from_graph(graph, BitClause::EMPTY, ids))
    }

    pub fn stats(&self) -> ResolutionStats {
        self.stats
    }

    /// Clauses currently kept, none subsuming another.
    pub fn main_clauses(&self) -> impl Iterator<Item = &BitClause> {
        self.main.iter()
    }
}

pub fn is_contradiction(formula: &Formula) -> Result<bool, LogicError> {
    let options = ResolutionOptions {
        record_proof: false,
    };
    Ok(prove_contradiction(formula, options)?.contradiction)
}

pub fn is_valid(formula: &Formula) -> Result<bool, LogicError> {
    is_contradiction(&Formula::not(formula.clone()))
}

pub fn prove_valid(
    formula: &Formula,
    options: ResolutionOptions,
) -> Result<ResolutionReport, LogicError> {
    prove_contradiction(&Formula::not(formula.clone()), options)
}

/// Refutes the clause form of `formula`. Ids are squeezed first, so any 64
/// distinct ids are accepted; proof steps use the formula's own ids.
pub fn prove_contradiction(
    formula: &Formula,
    options: ResolutionOptions,
) -> Result<ResolutionReport, LogicError> {
    let cnf = proposition_to_cnf(formula)?;
    let (squeezed, ids) = squeeze_with_mapping(&cnf);
    if ids.len() > MAX_VARIABLES {
        return Err(LogicError::TooManyVariables {
            count: ids.len(),
            limit: MAX_VARIABLES,
        });
    }
    refute_with_ids(&squeezed, &ids, options)
}

/// Refutes `cnf` as given; any id of 64 or more is rejected.
pub fn refute_cnf(cnf: &Cnf, options: ResolutionOptions) -> Result<ResolutionReport, LogicError> {
    let ids = (0..MAX_VARIABLES as VarId).collect::<Vec<_>>();
    refute_with_ids(cnf, &ids, options)
}

fn refute_with_ids(
    cnf: &Cnf,
    ids: &[VarId],
    options: ResolutionOptions,
) -> Result<ResolutionReport, LogicError> {
    let start = Instant::now();
    let mut prover = Prover::new(cnf, options)?;
    let contradiction = prover.refute();
    let proof = prover.proof(ids);
    let elapsed = start.elapsed();
    let stats = prover.stats();
    log::debug!(
        target: LOG_RESOLUTION,
        "{} after {} clauses processed, {} resolvents, {} subsumed ({:?}).",
        if contradiction { "Refuted" } else { "Saturated" },
        stats.processed,
        stats.resolvents,
        stats.subsumed,
        elapsed
    );
    Ok(ResolutionReport {
        contradiction,
        proof,
        elapsed,
        stats,
    })
}
