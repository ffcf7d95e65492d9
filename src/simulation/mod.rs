// src/simulation/mod.rs

//! Executes an [`EvolutionPlan`] by exact state-vector evolution and samples
//! measurement outcomes from the result.
//!
//! Each call owns its own engine and state vector; nothing is shared between
//! runs.

mod results;
pub(crate) mod engine;

// Re-export the main public interface types
pub use results::MeasurementResult;

use crate::circuits::EvolutionPlan;
use crate::core::{GroverError, GroverResult, StateVector};
use crate::operations::Operation;
use engine::SimulationEngine;
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Runs evolution plans and draws measurement shots.
///
/// Without a seed every call to [`Sampler::run`] draws from a freshly seeded
/// generator, so repeated calls give independent samples. With a seed every
/// call replays the same sample sequence.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sampler {
    seed: Option<u64>,
}

impl Sampler {
    /// Creates a sampler that draws independent samples on every call.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a reproducible sampler.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    /// The fixed seed, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Executes `plan` and draws `shots` samples at its terminal measurement.
    ///
    /// # Arguments
    /// * `plan` - An assembled plan ending in `Operation::Measure`.
    /// * `shots` - Number of samples, at least 1.
    ///
    /// # Returns
    /// * `Ok(MeasurementResult)` with counts summing to `shots`.
    /// * `Err(GroverError::InvalidShotCount)` for zero shots.
    /// * `Err(GroverError::MeasurementNotRequested)` if the plan was assembled
    ///   without measurement.
    /// * `Err(GroverError::InvariantViolation)` if evolution lost normalization.
    pub fn run(&self, plan: &EvolutionPlan, shots: u64) -> GroverResult<MeasurementResult> {
        if shots < 1 {
            return Err(GroverError::InvalidShotCount(shots));
        }
        if !plan.has_measurement() {
            return Err(GroverError::MeasurementNotRequested);
        }
        debug!(
            "sampling {} shot(s) from {}-qubit plan ({} steps, seed={:?})",
            shots,
            plan.num_qubits(),
            plan.len(),
            self.seed
        );

        let mut engine = SimulationEngine::init(plan)?;
        let mut result = None;
        for op in plan.operations() {
            match op {
                Operation::Measure => {
                    let mut rng = self.rng();
                    result = Some(engine.sample(shots, &mut rng)?);
                }
                _ => engine.apply_operation(*op)?,
            }
        }
        result.ok_or(GroverError::MeasurementNotRequested)
    }

    /// Executes `plan` without sampling and returns the final state vector.
    /// A terminal measurement step, if present, is ignored.
    pub fn statevector(&self, plan: &EvolutionPlan) -> GroverResult<StateVector> {
        let mut engine = SimulationEngine::init(plan)?;
        for op in plan.operations().iter().filter(|op| **op != Operation::Measure) {
            engine.apply_operation(*op)?;
        }
        Ok(engine.into_state())
    }
}
