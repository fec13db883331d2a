use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::cnf::{Clause, Literal};
use crate::formula::VarId;
use crate::formula::text::var_name;

use super::bit_clause::BitClause;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Derivation {
    pub left: BitClause,
    pub right: BitClause,
    pub pivot: VarId,
}

/// First derivation of every resolvent. Premises are never given parents, so
/// the recorded edges form a DAG rooted at whatever was derived last.
#[derive(Debug, Clone, Default)]
pub struct ProofGraph {
    premises: HashSet<BitClause>,
    parents: HashMap<BitClause, Derivation>,
}

impl ProofGraph {
    pub fn new<I: IntoIterator<Item = BitClause>>(premises: I) -> Self {
        Self {
            premises: premises.into_iter().collect(),
            parents: HashMap::new(),
        }
    }

    pub fn record(&mut self, resolvent: BitClause, derivation: Derivation) {
        if self.premises.contains(&resolvent) {
            return;
        }
        self.parents.entry(resolvent).or_insert(derivation);
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// Steps leading to `goal` in postorder: every antecedent is a premise or
    /// the resolvent of an earlier step.
    pub fn reconstruct(&self, goal: BitClause) -> Vec<(Derivation, BitClause)> {
        let mut steps = Vec::new();
        let mut done = HashSet::new();
        let mut stack = vec![(goal, false)];

        while let Some((clause, expanded)) = stack.pop() {
            if done.contains(&clause) {
                continue;
            }
            let Some(derivation) = self.parents.get(&clause) else {
                done.insert(clause);
                continue;
            };
            if expanded {
                done.insert(clause);
                steps.push((*derivation, clause));
            } else {
                stack.push((clause, true));
                stack.push((derivation.right, false));
                stack.push((derivation.left, false));
            }
        }
        steps
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofStep {
    pub left: Clause,
    pub right: Clause,
    pub pivot: VarId,
    pub resolvent: Clause,
}

impl ProofStep {
    /// `resolvent` is exactly `left ∪ right` minus the complementary pivot pair,
    /// and the pivot is the only clashing variable.
    pub fn is_sound(&self) -> bool {
        let pos = Literal::pos(self.pivot);
        let neg = Literal::neg(self.pivot);
        let oriented = (self.left.contains(&pos) && self.right.contains(&neg))
            || (self.left.contains(&neg) && self.right.contains(&pos));
        if !oriented {
            return false;
        }

        let mut expected = self
            .left
            .iter()
            .chain(&self.right)
            .copied()
            .filter(|lit| lit.var != self.pivot)
            .collect::<Vec<_>>();
        expected.sort();
        expected.dedup();
        if expected.windows(2).any(|w| w[0].var == w[1].var) {
            return false;
        }

        let mut resolvent = self.resolvent.clone();
        resolvent.sort();
        resolvent == expected
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Proof {
    pub steps: Vec<ProofStep>,
}

impl Proof {
    pub fn from_graph(graph: &ProofGraph, goal: BitClause, ids: &[VarId]) -> Self {
        let steps = graph
            .reconstruct(goal)
            .into_iter()
            .map(|(d, resolvent)| ProofStep {
                left: unpack(d.left, ids),
                right: unpack(d.right, ids),
                pivot: ids[d.pivot as usize],
                resolvent: unpack(resolvent, ids),
            })
            .collect();
        Self { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn render(&self) -> String {
        self.render_with(var_name)
    }

    pub fn render_with<F: Fn(VarId) -> String>(&self, name: F) -> String {
        let clause = |c: &Clause| {
            let body = c
                .iter()
                .map(|lit| {
                    let n = name(lit.var);
                    if lit.negated { format!("~{}", n) } else { n }
                })
                .collect::<Vec<_>>()
                .join(" | ");
            format!("({})", body)
        };

        let mut out = String::new();
        for (i, step) in self.steps.iter().enumerate() {
            out.push_str(&format!(
                "{:>3}. {} , {} => {}   [{}]\n",
                i + 1,
                clause(&step.left),
                clause(&step.right),
                clause(&step.resolvent),
                name(step.pivot)
            ));
        }
        out
    }
}

impl fmt::Display for Proof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn unpack(clause: BitClause, ids: &[VarId]) -> Clause {
    clause
        .literals()
        .into_iter()
        .map(|lit| Literal::new(ids[lit.var as usize], lit.negated))
        .collect()
}
