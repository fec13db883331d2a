use std::collections::BTreeMap;

use crate::error::LogicError;
use crate::formula::{BinaryOp, Formula, UnaryOp, VarId};
use crate::log::targets::FLATTEN as LOG_FLATTEN;
use crate::normal::to_cnf;

use super::cnf::{Clause, Cnf, Literal};

/// Converts any formula to a flattened clause set with duplicate literals and
/// tautological clauses removed. Variable ids are kept as they are.
pub fn proposition_to_cnf(formula: &Formula) -> Result<Cnf, LogicError> {
    let normal = to_cnf(formula);
    let mut cnf = flatten_cnf(&normal)?;
    let removed = remove_redundancy(&mut cnf);
    log::debug!(
        target: LOG_FLATTEN,
        "{} clauses over {} variables ({} redundancies removed).",
        cnf.len(),
        cnf.variable_ids().len(),
        removed
    );
    Ok(cnf)
}

/// Reads clauses off a tree that is already CNF shaped.
///
/// AND nodes split clauses, OR nodes join literals. A `T` literal drops its
/// clause, an `F` literal is dropped from its clause.
pub fn flatten_cnf(formula: &Formula) -> Result<Cnf, LogicError> {
    let mut cnf = Cnf::new();
    collect_clauses(formula, &mut cnf)?;
    Ok(cnf)
}

fn collect_clauses(formula: &Formula, cnf: &mut Cnf) -> Result<(), LogicError> {
    if let Formula::Binary {
        op: BinaryOp::And,
        left,
        right,
    } = formula
    {
        collect_clauses(left, cnf)?;
        return collect_clauses(right, cnf);
    }
    let mut clause = Clause::new();
    if collect_literals(formula, &mut clause)? {
        cnf.add_clause(clause);
    }
    Ok(())
}

// returns false when the clause is vacuously true
fn collect_literals(formula: &Formula, clause: &mut Clause) -> Result<bool, LogicError> {
    if let Formula::Binary {
        op: BinaryOp::Or,
        left,
        right,
    } = formula
    {
        return Ok(collect_literals(left, clause)? && collect_literals(right, clause)?);
    }
    push_literal(formula, clause, false)
}

fn push_literal(formula: &Formula, clause: &mut Clause, negated: bool) -> Result<bool, LogicError> {
    match formula {
        Formula::Unary {
            op: UnaryOp::Not,
            operand,
        } if !negated => push_literal(operand, clause, true),
        Formula::Constant(value) => Ok(*value == negated),
        Formula::Variable(id) => {
            clause.push(Literal::new(*id, negated));
            Ok(true)
        }
        other => Err(LogicError::NotNormalForm(format!(
            "unexpected clause member {}",
            other
        ))),
    }
}

/// Dedupes repeated literals inside each clause and drops clauses holding a
/// variable in both polarities. Returns how many literals and clauses went.
pub fn remove_redundancy(cnf: &mut Cnf) -> usize {
    let mut removed = 0usize;
    let mut kept = Vec::with_capacity(cnf.clauses.len());

    'clauses: for clause in cnf.clauses.drain(..) {
        let mut out = Clause::with_capacity(clause.len());
        for lit in clause {
            if out.contains(&lit) {
                removed += 1;
                continue;
            }
            if out.contains(&lit.complement()) {
                removed += 1;
                continue 'clauses;
            }
            out.push(lit);
        }
        kept.push(out);
    }
    cnf.clauses = kept;
    removed
}

/// `l1 | l2 | ...` nested to the left; the empty clause is `F`.
pub fn clause_to_proposition(clause: &[Literal]) -> Formula {
    Formula::or_all(clause.iter().map(|lit| {
        let var = Formula::var(lit.var);
        if lit.negated {
            Formula::not(var)
        } else {
            var
        }
    }))
}

/// `c1 & c2 & ...` nested to the left; the empty Cnf is `T`.
pub fn cnf_to_proposition(cnf: &Cnf) -> Formula {
    Formula::and_all(cnf.clauses.iter().map(|c| clause_to_proposition(c)))
}

/// Renumbers ids to `0..k` keeping their relative order.
pub fn squeeze_variable_ids(cnf: &Cnf) -> Cnf {
    squeeze_with_mapping(cnf).0
}

/// Like [`squeeze_variable_ids`], also returning the original id of each new id.
pub fn squeeze_with_mapping(cnf: &Cnf) -> (Cnf, Vec<VarId>) {
    let original = cnf.variable_ids();
    let map = original
        .iter()
        .enumerate()
        .map(|(new, &old)| (old, new as VarId))
        .collect::<BTreeMap<_, _>>();

    let clauses = cnf
        .clauses
        .iter()
        .map(|clause| {
            clause
                .iter()
                .map(|lit| Literal::new(map[&lit.var], lit.negated))
                .collect()
        })
        .collect();
    (Cnf::from_clauses(clauses), original)
}
