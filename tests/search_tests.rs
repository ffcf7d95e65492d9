// tests/search_tests.rs

use grover::{
    adaptive_iterations, assemble, build_search_plan, build_search_run, optimal_iterations, GroverError, PlanSource,
    Sampler, SearchConfig,
};

#[test]
fn test_two_qubit_optimum_comes_from_formula() -> Result<(), GroverError> {
    assert_eq!(optimal_iterations(2, 1)?, 1);
    Ok(())
}

#[test]
fn test_dynamic_iterations_reduce_depth() -> Result<(), GroverError> {
    let optimal = optimal_iterations(3, 1)?;
    let dynamic = adaptive_iterations(3, ["101"], 0.8, None)?;
    assert!(dynamic <= optimal);

    let plan = assemble(3, ["101"], Some(dynamic), true)?;
    let result = Sampler::new().run(&plan, 1024)?;
    assert!(result.frequency("101") > 0.7, "{}", result);
    Ok(())
}

#[test]
fn test_adaptive_run_reports_probed_plan() -> Result<(), GroverError> {
    let config = SearchConfig::new(4, ["0110"]).with_adaptive(0.9);
    let plan = build_search_plan(&config)?;
    assert_eq!(plan.iteration_plan().source(), PlanSource::Probed);
    // n = 4: P(k=2) ≈ 0.908, P(k=3) ≈ 0.961
    assert_eq!(plan.iteration_plan().iterations(), 2);
    assert!(plan.iteration_plan().iterations() <= optimal_iterations(4, 1)?);

    let result = build_search_run(&config)?;
    assert_eq!(result.most_frequent().map(|(label, _)| label), Some("0110"));
    Ok(())
}

#[test]
fn test_search_run_rejects_invalid_input_before_work() {
    assert!(matches!(
        build_search_run(&SearchConfig::new(3, ["10"])),
        Err(GroverError::DimensionMismatch { .. })
    ));
    assert!(matches!(build_search_run(&SearchConfig::new(0, ["0"])), Err(GroverError::InvalidDimension { .. })));
    assert_eq!(
        build_search_run(&SearchConfig::new(3, ["101"]).with_shots(0)),
        Err(GroverError::InvalidShotCount(0))
    );
}

#[test]
fn test_parallel_runs_are_independent() -> Result<(), GroverError> {
    let handles: Vec<_> = ["000", "011", "101", "111"]
        .into_iter()
        .map(|target| std::thread::spawn(move || build_search_run(&SearchConfig::new(3, [target]).with_shots(256))))
        .collect();

    for (handle, target) in handles.into_iter().zip(["000", "011", "101", "111"]) {
        let result = handle.join().expect("search thread panicked")?;
        assert_eq!(result.most_frequent().map(|(label, _)| label), Some(target));
    }
    Ok(())
}

#[test]
fn test_adaptive_search_on_large_space_completes() -> Result<(), GroverError> {
    // N = 2^20: threshold 0.999 is first met at k = 788, below the optimum 804
    let label = "1".repeat(20);
    let config = SearchConfig::new(20, [label.as_str()]).with_adaptive(0.999).with_shots(64).with_seed(3);
    let plan = build_search_plan(&config)?;
    assert_eq!(plan.iteration_plan().iterations(), 788);

    let result = build_search_run(&config)?;
    assert_eq!(result.most_frequent().map(|(label, _)| label), Some(label.as_str()));
    Ok(())
}
