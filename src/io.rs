//! Loader, persister, and console-printer collaborators
//!
//! The compute core only requires that A and B are fully populated before
//! validation and that C is join-complete before it reaches the persister;
//! everything in this module is glue around that contract. Input comes from
//! a `data_input` file when one exists, or from a seeded generator when it
//! does not, and the result goes to a `data_output` report carrying the
//! dimension, the product, and the wall-clock duration of the run.

use std::fs;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::{Matrix, Result, TejaError};

/// Generated operand values stay small so products are far from overflow.
const VALUE_RANGE: std::ops::Range<i32> = -100..100;

/// Reads the matrix dimension `n` from an input stream
///
/// Consumes one line and parses it as a positive integer. The interactive
/// prompt belongs to the caller; this only does the read.
///
/// # Errors
///
/// Returns `InvalidInput` if the line is not a positive integer
pub fn read_dimension<R: BufRead>(mut input: R) -> Result<usize> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    let n: usize = line
        .trim()
        .parse()
        .map_err(|_| TejaError::InvalidInput(format!("expected matrix dimension, got {:?}", line.trim())))?;
    if n == 0 {
        return Err(TejaError::InvalidInput(
            "matrix dimension must be positive".to_string(),
        ));
    }
    Ok(n)
}

/// Loads operand matrices A and B from a whitespace-separated text file
///
/// File layout: the dimension first, then `n^2` values for A, then `n^2`
/// values for B. The dimension recorded in the file must match the `n` the
/// user entered.
///
/// # Errors
///
/// - `Io` if the file cannot be read
/// - `InvalidInput` on a malformed token, a dimension mismatch, or a wrong
///   number of values
pub fn load_input(path: &Path, n: usize) -> Result<(Matrix, Matrix)> {
    let text = fs::read_to_string(path)?;
    let mut tokens = text.split_whitespace();

    let file_n: usize = tokens
        .next()
        .ok_or_else(|| TejaError::InvalidInput(format!("{} is empty", path.display())))?
        .parse()
        .map_err(|_| {
            TejaError::InvalidInput(format!("{} does not start with a dimension", path.display()))
        })?;
    if file_n != n {
        return Err(TejaError::InvalidInput(format!(
            "dimension in {} is {file_n}, expected {n}",
            path.display()
        )));
    }

    let mut values = Vec::with_capacity(2 * n * n);
    for token in tokens {
        let value: i32 = token.parse().map_err(|_| {
            TejaError::InvalidInput(format!("invalid matrix entry {token:?} in {}", path.display()))
        })?;
        values.push(value);
    }
    if values.len() != 2 * n * n {
        return Err(TejaError::InvalidInput(format!(
            "{} holds {} values, expected {} for two {n}x{n} matrices",
            path.display(),
            values.len(),
            2 * n * n
        )));
    }

    let b_values = values.split_off(n * n);
    let a = Matrix::from_vec(n, values)?;
    let b = Matrix::from_vec(n, b_values)?;
    info!(path = %path.display(), n, "operands loaded");
    Ok((a, b))
}

/// Generates a deterministic pair of operand matrices
///
/// Same seed, same matrices — repeated runs with an identical configuration
/// multiply identical operands.
pub fn generate_input(n: usize, seed: u64) -> (Matrix, Matrix) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut random_matrix = || {
        let mut m = Matrix::zeros(n);
        for cell in m.as_mut_slice() {
            *cell = rng.gen_range(VALUE_RANGE);
        }
        m
    };
    let a = random_matrix();
    let b = random_matrix();
    (a, b)
}

/// Writes the result report: dimension, full product, elapsed seconds
///
/// # Errors
///
/// Returns `Io` if the report cannot be created or written
pub fn save_output(path: &Path, c: &Matrix, elapsed: Duration) -> Result<()> {
    let file = fs::File::create(path)?;
    let mut out = BufWriter::new(file);

    writeln!(out, "{}", c.dim())?;
    for i in 0..c.dim() {
        let row: Vec<String> = c.row(i).iter().map(|v| v.to_string()).collect();
        writeln!(out, "{}", row.join(" "))?;
    }
    writeln!(out, "{:.6}", elapsed.as_secs_f64())?;
    out.flush()?;

    info!(path = %path.display(), secs = elapsed.as_secs_f64(), "report written");
    Ok(())
}

/// Prints a labeled matrix to stdout, for diagnostic visibility
pub fn print_matrix(title: &str, m: &Matrix) {
    println!("{title}");
    print!("{m}");
}
