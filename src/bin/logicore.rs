use anyhow::{Result, bail};
use clap::{Parser, Subcommand};

use logicore::check::ModelChecker;
use logicore::cnf::dimacs::{parse_dimacs_str, to_dimacs};
use logicore::cnf::proposition_to_cnf;
use logicore::formula::Formula;
use logicore::formula::text::{parse_formula, var_name};
use logicore::normal::{NormalForm, NormalFormOptions, to_normal_form};
use logicore::resolution::{ResolutionOptions, prove_valid};
use logicore::sat::{DpllSolver, WalkSatConfig, WalkSatSolver};
use logicore::solver::{
    Method, SatSolver, SolveResult, VarisatSolver, classify, satisfiable_with_fallback,
};

#[derive(Debug, Parser)]
#[command(name = "logicore")]
struct Cli {
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Classify a formula as valid, contradictory or contingent.
    Check { formula: String },
    Cnf {
        formula: String,
        #[arg(long, default_value_t = false)]
        reduce: bool,
    },
    Dnf {
        formula: String,
        #[arg(long, default_value_t = false)]
        reduce: bool,
    },
    Dimacs {
        formula: String,
        #[arg(long)]
        emit: Option<String>,
    },
    Sat {
        formula: String,
        #[arg(long, default_value = "dpll")]
        method: String,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 10_000)]
        max_flips: usize,
        #[arg(long, default_value_t = 0.5)]
        p: f64,
    },
    SolveDimacs {
        path: String,
        #[arg(long, default_value = "dpll")]
        backend: String,
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Cmd::Check { formula } => check_cmd(&formula)?,
        Cmd::Cnf { formula, reduce } => normal_cmd(&formula, NormalForm::Cnf, reduce)?,
        Cmd::Dnf { formula, reduce } => normal_cmd(&formula, NormalForm::Dnf, reduce)?,
        Cmd::Dimacs { formula, emit } => dimacs_cmd(&formula, emit.as_deref())?,
        Cmd::Sat {
            formula,
            method,
            seed,
            max_flips,
            p,
        } => sat_cmd(&formula, &method, seed, max_flips, p)?,
        Cmd::SolveDimacs {
            path,
            backend,
            seed,
        } => solve_dimacs_cmd(&path, &backend, seed)?,
    }
    Ok(())
}

fn check_cmd(src: &str) -> Result<()> {
    let formula = parse_formula(src)?;
    println!("formula={}", formula);
    match classify(&formula, &Method::ModelCheck) {
        Ok(verdict) => println!("model-check={:?}", verdict),
        Err(err) => println!("model-check=skipped ({})", err),
    }
    println!("dpll={:?}", classify(&formula, &Method::Dpll)?);
    match prove_valid(&formula, ResolutionOptions::default()) {
        Ok(report) => {
            println!("resolution-valid={}", report.contradiction);
            print!("{}", report.trace());
        }
        Err(err) => println!("resolution=skipped ({})", err),
    }
    Ok(())
}

fn normal_cmd(src: &str, form: NormalForm, reduce: bool) -> Result<()> {
    let formula = parse_formula(src)?;
    let normal = to_normal_form(&formula, form, NormalFormOptions { reduce });
    println!("{}", normal);
    Ok(())
}

fn dimacs_cmd(src: &str, emit: Option<&str>) -> Result<()> {
    let formula = parse_formula(src)?;
    let cnf = proposition_to_cnf(&formula)?;
    let text = to_dimacs(&cnf);
    match emit {
        Some(path) => {
            std::fs::write(path, text)?;
            println!("vars={} clauses={}", cnf.variable_span(), cnf.len());
        }
        None => print!("{}", text),
    }
    Ok(())
}

fn parse_method(name: &str, seed: Option<u64>, max_flips: usize, p: f64) -> Result<Method> {
    Ok(match name {
        "dpll" => Method::Dpll,
        "walksat" => Method::WalkSat {
            config: WalkSatConfig {
                max_flips,
                random_walk_probability: p,
            },
            seed,
        },
        "resolution" => Method::Resolution,
        "model-check" => Method::ModelCheck,
        "varisat" => Method::Varisat,
        _ => bail!(
            "unknown method '{}', expected dpll|walksat|resolution|model-check|varisat",
            name
        ),
    })
}

fn sat_cmd(src: &str, method: &str, seed: Option<u64>, max_flips: usize, p: f64) -> Result<()> {
    let formula = parse_formula(src)?;
    let method = parse_method(method, seed, max_flips, p)?;
    let result = satisfiable_with_fallback(&formula, &method)?;
    println!("method={} result={:?}", method.name(), result);
    if result == SolveResult::Sat {
        print_witness(&formula)?;
    }
    Ok(())
}

// any model will do; the checker is exact when the formula is small enough
fn print_witness(formula: &Formula) -> Result<()> {
    let mut ids = formula.variable_ids();
    ids.sort_unstable();
    let model = if ids.len() <= ModelChecker::MAX_VARIABLES {
        ModelChecker.find_model(formula)?
    } else {
        let cnf = proposition_to_cnf(formula)?;
        let mut solver = DpllSolver::new(&cnf);
        if solver.is_satisfiable() {
            solver.model_by_original_id()
        } else {
            None
        }
    };
    let Some(model) = model else {
        return Ok(());
    };
    let fields = ids
        .iter()
        .map(|&id| {
            let value = model.get(id as usize).copied().unwrap_or(false);
            format!("{}={}", var_name(id), u8::from(value))
        })
        .collect::<Vec<_>>();
    println!("model {}", fields.join(" "));
    Ok(())
}

fn solve_dimacs_cmd(path: &str, backend: &str, seed: u64) -> Result<()> {
    let text = std::fs::read_to_string(path)?;
    let cnf = parse_dimacs_str(&text)?;
    let mut solver: Box<dyn SatSolver> = match backend {
        "dpll" => Box::new(DpllSolver::new(&cnf)),
        "walksat" => Box::new(WalkSatSolver::with_seed(&cnf, seed)),
        "varisat" => Box::new(VarisatSolver::new(&cnf)),
        _ => bail!("unknown backend '{}', expected dpll|walksat|varisat", backend),
    };
    let result = solver.solve();
    let stats = solver.stats();
    println!(
        "c backend={} vars={} clauses={} decisions={} propagations={} flips={}",
        solver.backend_name(),
        solver.original_ids().len(),
        cnf.len(),
        stats.decisions,
        stats.propagations,
        stats.flips
    );
    match result {
        SolveResult::Sat => {
            println!("s SATISFIABLE");
            if let Some(model) = solver.model() {
                let lits = solver
                    .original_ids()
                    .iter()
                    .zip(model)
                    .map(|(&id, &value)| {
                        let v = id as i64 + 1;
                        let lit = if value { v } else { -v };
                        lit.to_string()
                    })
                    .collect::<Vec<_>>();
                println!("v {} 0", lits.join(" "));
            }
        }
        SolveResult::Unsat => println!("s UNSATISFIABLE"),
        SolveResult::Unknown => println!("s UNKNOWN"),
    }
    Ok(())
}
