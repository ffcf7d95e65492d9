// src/lib.rs

//! `grover` - Exact state-vector simulation of Grover's search
//!
//! This library builds the two structural operators of amplitude
//! amplification (the marking oracle and the inversion-about-the-mean
//! diffuser), plans how many iterations to apply, assembles the evolution,
//! and samples measurement outcomes from the final state.
//!
//! Labels map to basis indices most-significant-bit first: `"101"` is
//! index 5 everywhere in the crate.

pub mod core;
pub mod operations;
pub mod planning;
pub mod circuits;
pub mod simulation;
pub mod config;

// Re-export the most common types for easier top-level use
pub use core::{GroverError, GroverResult, StateVector, TargetSet};
pub use operations::{build_diffuser, build_oracle, Diffuser, Operation, Operator, Oracle};
pub use planning::{adaptive_iterations, optimal_iterations, success_probability, IterationPlan, PlanSource};
pub use circuits::{assemble, EvolutionPlan, EvolutionPlanBuilder};
pub use simulation::{MeasurementResult, Sampler};
pub use config::{build_search_plan, build_search_run, SearchConfig};

// Example 1: Single target search
// Runs the full pipeline with default planning and checks the mode of the
// sampled distribution.
/// ```
/// use grover::{build_search_run, optimal_iterations, SearchConfig, GroverError};
///
/// // 3 qubits, closed form: θ = asin(√(1/8)), k = round(π/(4θ) − 1/2) = 2
/// assert_eq!(optimal_iterations(3, 1)?, 2);
///
/// let config = SearchConfig::new(3, ["101"]).with_seed(2024);
/// let result = build_search_run(&config)?;
/// println!("{}", result);
///
/// // sin²(5θ) ≈ 0.945 of the mass sits on |101>
/// assert_eq!(result.most_frequent().map(|(label, _)| label), Some("101"));
/// assert!(result.frequency("101") > 0.7);
/// # Ok::<(), GroverError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Assembling and inspecting a plan
// Builds the plan for two marked states, prints it, and reads the
// introspection counters a reporting layer would consume.
/// ```
/// use grover::{assemble, Operation, Sampler, GroverError};
///
/// // Two of eight marked: one iteration rotates the state onto the targets
/// let plan = assemble(3, ["101", "010"], None, true)?;
/// println!("{}", plan);
///
/// assert_eq!(plan.iteration_plan().iterations(), 1);
/// assert_eq!(plan.depth(), 4); // H, O, D, M
/// assert_eq!(plan.operation_counts()[&Operation::Oracle], 1);
///
/// let state = Sampler::new().statevector(&plan)?;
/// let on_targets = state.probability(0b101) + state.probability(0b010);
/// assert!((on_targets - 1.0).abs() < 1e-9);
/// # Ok::<(), GroverError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item
