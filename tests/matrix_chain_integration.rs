use chain_dp::{
    optimize, problems::matrix_chain::MatrixChainProblem, ChainDefect, ChainError,
    ChainOptimizer, IntervalEngine, MatrixSpec,
};

fn chain(shapes: &[(usize, usize)]) -> Vec<MatrixSpec> {
    shapes.iter().copied().map(MatrixSpec::from).collect()
}

#[test]
fn matrix_chain_clrs_integration() {
    let matrices = chain(&[(30, 35), (35, 15), (15, 5), (5, 10), (10, 20), (20, 25)]);
    let solution = optimize(&matrices).unwrap();
    assert_eq!(solution.optimal_cost(), 15125);
    assert_eq!(solution.cost().get(1, 6), Some(15125));
    // one decision per multiplication
    assert_eq!(solution.split_decisions().len(), 5);
}

#[test]
fn engine_and_optimizer_agree() {
    let p = vec![30, 35, 15, 5, 10, 20, 25];
    let via_engine = IntervalEngine::new(MatrixChainProblem::from_dims(p.clone()).unwrap())
        .run()
        .unwrap();
    let via_optimizer = ChainOptimizer::new().optimize_dims(&p).unwrap();
    assert_eq!(via_engine, via_optimizer);
}

#[test]
fn single_matrix_costs_nothing_whatever_its_shape() {
    for &(r, c) in &[(1, 1), (10, 20), (1000, 3), (0, 5)] {
        let solution = optimize(&[MatrixSpec::new(r, c)]).unwrap();
        assert_eq!(solution.cost().get(1, 1), Some(0));
        assert_eq!(solution.split().filled(), 0);
    }
}

#[test]
fn two_matrices() {
    let solution = optimize(&chain(&[(10, 20), (20, 30)])).unwrap();
    assert_eq!(solution.cost().get(1, 2), Some(6000));
    assert_eq!(solution.split().get(1, 2), Some(1));
    assert_eq!(solution.parenthesization().to_string(), "(A1 A2)");
}

#[test]
fn mismatched_chain_is_rejected_before_computation() {
    let err = optimize(&chain(&[(2, 3), (4, 5)])).unwrap_err();
    assert!(err.is_invalid_chain());
    assert!(matches!(
        err,
        ChainError::InvalidChain(ChainDefect::NonConformable { index: 1, .. })
    ));
}

#[test]
fn mismatch_deep_in_long_chain_is_reported() {
    let err = optimize(&chain(&[(1, 2), (2, 3), (3, 4), (5, 6), (6, 7)])).unwrap_err();
    assert_eq!(
        err,
        ChainError::InvalidChain(ChainDefect::NonConformable {
            index: 3,
            cols: 4,
            next_rows: 5,
        })
    );
}

#[test]
fn empty_inputs_fail_fast() {
    assert_eq!(
        optimize(&[]).unwrap_err(),
        ChainError::InvalidChain(ChainDefect::Empty)
    );
    assert_eq!(
        ChainOptimizer::new().optimize_dims(&[]).unwrap_err(),
        ChainError::InvalidChain(ChainDefect::Empty)
    );
    assert_eq!(
        ChainOptimizer::new().optimize_dims(&[9]).unwrap_err(),
        ChainError::InvalidChain(ChainDefect::TooShort { len: 1 })
    );
}

#[test]
fn tables_belong_to_the_caller() {
    let solution = ChainOptimizer::new()
        .optimize_dims(&[5, 10, 3, 12, 5, 50, 6])
        .unwrap();
    let (cost, split) = solution.into_parts();
    assert_eq!(cost.len(), 6);
    assert_eq!(split.len(), 6);
    assert_eq!(cost.get(1, 6), Some(2010));
    assert_eq!(split.get(1, 6), Some(2));
}
