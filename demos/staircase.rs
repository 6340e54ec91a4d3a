//! # Staircase Encoding Demo
//!
//! Generates the staircase encoding for `n` variables and window size `k`,
//! prints size statistics and every clause in both integer and named form,
//! and optionally writes the result as a DIMACS CNF file.
//!
//! Usage: `staircase <n> <k> [dimacs-out-path]`

use anyhow::{bail, Context, Result};

use stairsat::{
    encodings::{staircase::Staircase, EncodeStats},
    instances::{BasicVarManager, Cnf, ManageVars, SatInstance},
    types::{Lit, Var},
    var,
};

/// Renders a literal with original variables as `X*` and auxiliaries as `R*`
fn name(lit: &Lit, n: u32) -> String {
    let sign = if lit.is_neg() { "-" } else { "" };
    if lit.vidx32() < n {
        format!("{}X{}", sign, lit.vidx32() + 1)
    } else {
        format!("{}R{}", sign, lit.vidx32() - n + 1)
    }
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let n: u32 = args
        .next()
        .context("usage: staircase <n> <k> [dimacs-out-path]")?
        .parse()
        .context("n must be an integer")?;
    let k: usize = args
        .next()
        .context("usage: staircase <n> <k> [dimacs-out-path]")?
        .parse()
        .context("k must be an integer")?;
    let out_path = args.next();
    if n == 0 || Var::new_with_error(n).is_err() {
        bail!("n is out of range");
    }

    let lits: Vec<Lit> = (0..n).map(Lit::positive).collect();
    let mut enc = Staircase::new(lits, k);
    let mut cnf = Cnf::new();
    let mut var_manager = BasicVarManager::from_next_free(var![n]);
    enc.encode(&mut cnf, &mut var_manager)
        .context("cannot encode")?;

    println!("Statistics for n={}, k={}:", n, k);
    println!("Number of original variables: {}", n);
    println!("Number of auxiliary variables: {}", enc.n_vars());
    println!("Total number of variables: {}", var_manager.n_used());
    println!("Number of implications: {}", enc.n_implications());
    println!("Number of clauses: {}", enc.n_clauses());
    println!();
    println!("Clauses in detail:");
    for (idx, cl) in cnf.iter().enumerate() {
        let ints: Vec<String> = cl.iter().map(|l| l.to_dimacs().to_string()).collect();
        let names: Vec<String> = cl.iter().map(|l| name(l, n)).collect();
        println!(
            "Clause {:3}: [{}] => ({})",
            idx + 1,
            ints.join(", "),
            names.join(" | ")
        );
    }

    if let Some(path) = out_path {
        let inst = SatInstance::compose(cnf, var_manager);
        inst.to_dimacs_path(&path)
            .with_context(|| format!("cannot write {}", path))?;
        println!();
        println!("Wrote DIMACS CNF to {}", path);
    }
    Ok(())
}
