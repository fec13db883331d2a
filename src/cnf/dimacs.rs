use anyhow::{Context, Result, bail};

use super::cnf::{Cnf, Literal};

/// DIMACS text; id `k` is written as variable `k + 1`.
pub fn to_dimacs(cnf: &Cnf) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "p cnf {} {}\n",
        cnf.variable_span(),
        cnf.clauses.len()
    ));
    for clause in &cnf.clauses {
        for &lit in clause {
            out.push_str(&format!("{} ", lit_to_dimacs_int(lit)));
        }
        out.push_str("0\n");
    }
    out
}

pub fn parse_dimacs_str(src: &str) -> Result<Cnf> {
    let mut cnf = Cnf::new();
    let mut declared = None::<(usize, usize)>;
    let mut current = Vec::new();

    for (idx, line) in src.lines().enumerate() {
        let line_no = idx + 1;
        let clean = line.trim();
        if clean.is_empty() || clean.starts_with('c') || clean.starts_with('%') {
            continue;
        }
        if let Some(header) = clean.strip_prefix("p ") {
            let fields = header.split_whitespace().collect::<Vec<_>>();
            if fields.len() != 3 || fields[0] != "cnf" {
                bail!("line {}: malformed header '{}'", line_no, clean);
            }
            let vars = fields[1]
                .parse::<usize>()
                .with_context(|| format!("line {}: bad variable count", line_no))?;
            let clauses = fields[2]
                .parse::<usize>()
                .with_context(|| format!("line {}: bad clause count", line_no))?;
            declared = Some((vars, clauses));
            continue;
        }
        if declared.is_none() {
            bail!("line {}: clause before 'p cnf' header", line_no);
        }
        for field in clean.split_whitespace() {
            let value = field
                .parse::<i64>()
                .with_context(|| format!("line {}: bad literal '{}'", line_no, field))?;
            if value == 0 {
                cnf.add_clause(std::mem::take(&mut current));
            } else {
                current.push(lit_from_dimacs_int(value, line_no)?);
            }
        }
    }
    if !current.is_empty() {
        cnf.add_clause(current);
    }

    let Some((vars, clauses)) = declared else {
        bail!("missing 'p cnf' header");
    };
    if cnf.variable_span() > vars {
        bail!(
            "header declares {} variables but clauses use {}",
            vars,
            cnf.variable_span()
        );
    }
    if cnf.len() != clauses {
        log::warn!("header declares {} clauses, found {}", clauses, cnf.len());
    }
    Ok(cnf)
}

fn lit_to_dimacs_int(lit: Literal) -> i64 {
    let v = lit.var as i64 + 1;
    if lit.negated { -v } else { v }
}

fn lit_from_dimacs_int(value: i64, line_no: usize) -> Result<Literal> {
    let var = u32::try_from(value.unsigned_abs() - 1)
        .with_context(|| format!("line {}: variable {} is too large", line_no, value))?;
    Ok(Literal::new(var, value < 0))
}
