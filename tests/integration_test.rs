//! Integration test suite
//!
//! Exercises the public surface end to end:
//! - Configuration validation accept/reject table
//! - Block tiling invariant (property-based)
//! - Parallel vs serial equivalence, exact integer equality (property-based)
//! - Determinism across repeated runs
//! - Loader -> multiply -> persister pipeline

use std::time::Duration;

use proptest::prelude::*;
use teja::{io, parallel, GridConfig, Matrix};

const PROPTEST_CASES: u32 = 64;

/// Valid `(n, threads)` pairs: threads = side^2 and n = side * block_dim,
/// which is exactly the precondition the validator enforces.
fn grid_params() -> impl Strategy<Value = (usize, usize)> {
    (1usize..=4, 1usize..=4).prop_map(|(side, block_dim)| (side * block_dim, side * side))
}

// ============================================================================
// CONFIGURATION VALIDATION
// ============================================================================

#[test]
fn integration_validator_accept_reject_table() {
    // 3 is not a perfect square, for any n
    for n in [1, 2, 3, 6, 9] {
        assert!(GridConfig::new(n, 3).is_err(), "n = {n}, threads = 3");
    }
    // 9 cells cannot be split across 4 threads
    assert!(GridConfig::new(3, 4).is_err());

    assert!(GridConfig::new(4, 4).is_ok());
    assert!(GridConfig::new(5, 1).is_ok());
}

#[test]
fn integration_validation_precedes_computation() {
    // An invalid configuration never reaches the parallel phase; the error
    // surfaces from GridConfig::new, with no multiply to call it on.
    let err = GridConfig::new(4, 5).unwrap_err();
    assert!(err.to_string().contains("perfect square"));
}

// ============================================================================
// BLOCK TILING AND EQUIVALENCE PROPERTIES
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(PROPTEST_CASES))]

    /// Blocks of ranks 0..p cover every output cell exactly once.
    #[test]
    fn integration_blocks_tile_output_exactly_once((n, threads) in grid_params()) {
        let grid = GridConfig::new(n, threads).unwrap();
        let mut owners = vec![0u32; n * n];
        for block in grid.blocks() {
            for i in block.rows.clone() {
                for j in block.cols.clone() {
                    owners[i * n + j] += 1;
                }
            }
        }
        prop_assert!(owners.iter().all(|&count| count == 1));
    }

    /// The block-parallel product equals the serial triple-loop reference,
    /// element for element, for arbitrary operands.
    #[test]
    fn integration_parallel_matches_serial(
        (n, threads) in grid_params(),
        seed in any::<u64>(),
    ) {
        let (a, b) = io::generate_input(n, seed);
        let grid = GridConfig::new(n, threads).unwrap();

        let parallel_c = parallel::multiply(&a, &b, &grid).unwrap();
        let serial_c = a.multiply(&b).unwrap();
        prop_assert_eq!(parallel_c, serial_c);
    }

    /// Scheduling order never changes the result.
    #[test]
    fn integration_repeated_runs_are_identical(seed in any::<u64>()) {
        let (a, b) = io::generate_input(8, seed);
        let grid = GridConfig::new(8, 16).unwrap();

        let first = parallel::multiply(&a, &b, &grid).unwrap();
        for _ in 0..3 {
            prop_assert_eq!(parallel::multiply(&a, &b, &grid).unwrap(), first.clone());
        }
    }
}

// ============================================================================
// FIXED SCENARIOS
// ============================================================================

#[test]
fn integration_identity_times_arbitrary_is_arbitrary() {
    // n = 4, p = 4: block_dim = 2, four workers on a 2x2 grid of blocks.
    let grid = GridConfig::new(4, 4).unwrap();
    let b = Matrix::from_vec(4, vec![3, -1, 4, 1, -5, 9, 2, -6, 5, 3, -5, 8, 9, -7, 9, 3]).unwrap();

    let c = parallel::multiply(&Matrix::identity(4), &b, &grid).unwrap();
    for i in 0..4 {
        for j in 0..4 {
            assert_eq!(c.get(i, j), b.get(i, j), "cell ({i}, {j})");
        }
    }
}

#[test]
fn integration_block_layout_n4_p4() {
    let grid = GridConfig::new(4, 4).unwrap();
    assert_eq!(grid.block_dim(), 2);
    assert_eq!(grid.block(0).rows, 0..2);
    assert_eq!(grid.block(0).cols, 0..2);
    assert_eq!(grid.block(1).rows, 0..2);
    assert_eq!(grid.block(1).cols, 2..4);
    assert_eq!(grid.block(2).rows, 2..4);
    assert_eq!(grid.block(2).cols, 0..2);
    assert_eq!(grid.block(3).rows, 2..4);
    assert_eq!(grid.block(3).cols, 2..4);
}

// ============================================================================
// LOADER -> MULTIPLY -> PERSISTER PIPELINE
// ============================================================================

#[test]
fn integration_full_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("data_input");
    let output = dir.path().join("data_output");

    // A = [[1,2],[3,4]], B = [[5,6],[7,8]]
    std::fs::write(&input, "2\n1 2 3 4\n5 6 7 8\n").unwrap();

    let n = io::read_dimension(std::io::Cursor::new("2\n")).unwrap();
    let grid = GridConfig::new(n, 4).unwrap();
    let (a, b) = io::load_input(&input, n).unwrap();
    let c = parallel::multiply(&a, &b, &grid).unwrap();
    io::save_output(&output, &c, Duration::from_secs_f64(0.25)).unwrap();

    let report = std::fs::read_to_string(&output).unwrap();
    assert_eq!(report, "2\n19 22\n43 50\n0.250000\n");
}
