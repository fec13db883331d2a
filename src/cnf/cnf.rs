use std::collections::BTreeSet;
use std::fmt;

use crate::formula::VarId;
use crate::formula::text::var_name;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal {
    pub var: VarId,
    pub negated: bool,
}

impl Literal {
    pub fn new(var: VarId, negated: bool) -> Self {
        Self { var, negated }
    }

    pub fn pos(var: VarId) -> Self {
        Self::new(var, false)
    }

    pub fn neg(var: VarId) -> Self {
        Self::new(var, true)
    }

    pub fn complement(self) -> Self {
        Self {
            var: self.var,
            negated: !self.negated,
        }
    }

    /// Value under a total assignment indexed by variable id.
    pub fn eval(self, model: &[bool]) -> bool {
        model[self.var as usize] != self.negated
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "~")?;
        }
        f.write_str(&var_name(self.var))
    }
}

pub type Clause = Vec<Literal>;

/// Conjunction of clauses. No clause means `T`; an empty clause means `F`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cnf {
    pub clauses: Vec<Clause>,
}

impl Cnf {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_clauses(clauses: Vec<Clause>) -> Self {
        Self { clauses }
    }

    pub fn add_clause(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn has_empty_clause(&self) -> bool {
        self.clauses.iter().any(|c| c.is_empty())
    }

    /// Referenced ids in ascending order.
    pub fn variable_ids(&self) -> Vec<VarId> {
        self.clauses
            .iter()
            .flatten()
            .map(|lit| lit.var)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Largest referenced id plus one.
    pub fn variable_span(&self) -> usize {
        self.clauses
            .iter()
            .flatten()
            .map(|lit| lit.var as usize + 1)
            .max()
            .unwrap_or(0)
    }

    pub fn eval_clause(clause: &[Literal], model: &[bool]) -> bool {
        clause.iter().any(|&lit| lit.eval(model))
    }

    pub fn eval(&self, model: &[bool]) -> bool {
        self.clauses.iter().all(|c| Self::eval_clause(c, model))
    }

    pub fn count_satisfied(&self, model: &[bool]) -> usize {
        self.clauses
            .iter()
            .filter(|c| Self::eval_clause(c, model))
            .count()
    }
}

impl fmt::Display for Cnf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                write!(f, " & ")?;
            }
            write!(f, "(")?;
            for (j, lit) in clause.iter().enumerate() {
                if j > 0 {
                    write!(f, " | ")?;
                }
                write!(f, "{}", lit)?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}
