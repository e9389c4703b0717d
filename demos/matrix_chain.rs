//! Example: Matrix-chain multiplication.
//!
//! Run with:
//! `cargo run --example matrix_chain`

use chain_dp::{optimize, MatrixSpec};

fn main() -> Result<(), chain_dp::ChainError> {
    // Example from CLRS:
    // Matrices A1..A6 with dimensions:
    // 30x35, 35x15, 15x5, 5x10, 10x20, 20x25
    let chain: Vec<MatrixSpec> = [(30, 35), (35, 15), (15, 5), (5, 10), (10, 20), (20, 25)]
        .into_iter()
        .map(MatrixSpec::from)
        .collect();

    let solution = optimize(&chain)?;

    println!("Optimal multiplication cost: {}", solution.optimal_cost());
    println!("Parenthesization: {}", solution.parenthesization());
    println!("Split decisions (i,j,k):");
    for d in solution.split_decisions() {
        println!("  Split A[{}..{}] at {}", d.start, d.end, d.split);
    }

    // A chain that does not conform is rejected before any work is done.
    let broken = [MatrixSpec::new(2, 3), MatrixSpec::new(4, 5)];
    if let Err(err) = optimize(&broken) {
        println!("Rejected: {err}");
    }
    Ok(())
}
