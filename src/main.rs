//! Command-line driver for block-parallel matrix multiplication
//!
//! Usage: `teja <thread_count>`. The matrix dimension is prompted on stdin,
//! operands come from `data_input` when the file exists (a seeded generator
//! otherwise), and the result report goes to `data_output`.

use std::env;
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use tracing_subscriber::EnvFilter;

use teja::{io, parallel, GridConfig, Result, TejaError};

const INPUT_PATH: &str = "data_input";
const OUTPUT_PATH: &str = "data_output";
/// Fixed generator seed, so repeated runs multiply identical operands.
const GENERATOR_SEED: u64 = 0x7E1A;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        // Informational path: print usage and exit cleanly.
        eprintln!("usage: {} <thread_count>", args[0]);
        return ExitCode::SUCCESS;
    }

    match run(&args[1]) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(threads_arg: &str) -> Result<()> {
    let start = Instant::now();

    let threads: usize = threads_arg.parse().map_err(|_| {
        TejaError::InvalidInput(format!(
            "thread count must be an integer, got {threads_arg:?}"
        ))
    })?;

    println!("Enter n");
    let n = io::read_dimension(std::io::stdin().lock())?;
    println!("The number of threads is {threads}");

    // Validate before any matrix is allocated or any thread is spawned.
    let grid = GridConfig::new(n, threads)?;

    let input = Path::new(INPUT_PATH);
    let (a, b) = if input.exists() {
        io::load_input(input, n)?
    } else {
        io::generate_input(n, GENERATOR_SEED)
    };

    io::print_matrix("Matrix A:", &a);
    io::print_matrix("Matrix B:", &b);

    let c = parallel::multiply(&a, &b, &grid)?;
    io::print_matrix("The product (Matrix C) is:", &c);

    io::save_output(Path::new(OUTPUT_PATH), &c, start.elapsed())?;
    Ok(())
}
