// src/simulation/engine.rs
use crate::circuits::EvolutionPlan;
use crate::core::{index_to_label, GroverError, GroverResult, StateVector};
use crate::operations::{Operation, Operator};
use crate::simulation::MeasurementResult;
use log::trace;
use num_complex::Complex;
use num_traits::{One, Zero};
use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::rngs::StdRng;

/// Executes the steps of one [`EvolutionPlan`] against a privately owned
/// state vector. (Internal visibility)
pub(crate) struct SimulationEngine<'a> {
    plan: &'a EvolutionPlan,
    /// The register state. Starts in |0...0>; `Initialize` moves it into the
    /// uniform superposition.
    state: StateVector,
}

impl<'a> SimulationEngine<'a> {
    /// Sets up a fresh |0...0> register sized for `plan`.
    pub(crate) fn init(plan: &'a EvolutionPlan) -> GroverResult<Self> {
        let dim = 1usize
            .checked_shl(plan.num_qubits() as u32)
            .ok_or_else(|| GroverError::invariant("State vector dimension overflows usize"))?;
        let mut initial_vec = vec![Complex::zero(); dim];
        initial_vec[0] = Complex::one();
        Ok(Self { plan, state: StateVector::from_amplitudes(initial_vec)? })
    }

    /// Read-only view of the current state.
    #[cfg(test)]
    pub(crate) fn state(&self) -> &StateVector {
        &self.state
    }

    /// Consumes the engine, returning the evolved state.
    pub(crate) fn into_state(self) -> StateVector {
        self.state
    }

    /// Applies one non-measurement step, then rescales the rounding drift the
    /// step left behind so it cannot accumulate across iterations. Drift
    /// beyond the tolerance is still an invariant violation.
    pub(crate) fn apply_operation(&mut self, op: Operation) -> GroverResult<()> {
        match op {
            Operation::Initialize => {
                // Hadamard on every qubit maps |0...0> to the uniform superposition
                self.state = StateVector::uniform(self.plan.num_qubits())?;
            }
            Operation::Barrier => return Ok(()),
            Operation::Oracle => self.plan.oracle().apply(&mut self.state)?,
            Operation::Diffuser => self.plan.diffuser().apply(&mut self.state)?,
            Operation::Measure => {
                return Err(GroverError::invariant(
                    "Measure step should not be passed directly to apply_operation",
                ));
            }
        }
        trace!("applied {}: norm_sqr={:.12}", op, self.state.norm_sqr());
        self.state.normalize(false)
    }

    /// Draws `shots` independent outcomes from `|a_i|²` of the current state.
    /// The state itself is left untouched.
    pub(crate) fn sample(&self, shots: u64, rng: &mut StdRng) -> GroverResult<MeasurementResult> {
        let num_qubits = self.state.num_qubits();
        let distribution = WeightedIndex::new(self.state.probabilities())
            .map_err(|e| GroverError::invariant(format!("Cannot sample from state: {}", e)))?;

        let mut result = MeasurementResult::new(num_qubits);
        for _ in 0..shots {
            let index = distribution.sample(rng);
            result.record(index_to_label(index, num_qubits));
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuits::assemble;
    use approx::assert_abs_diff_eq;
    use rand::SeedableRng;

    #[test]
    fn test_engine_starts_in_zero_state() -> GroverResult<()> {
        let plan = assemble(2, ["11"], None, true)?;
        let engine = SimulationEngine::init(&plan)?;
        assert_eq!(engine.state().probability(0), 1.0);
        assert_eq!(engine.state().probability(3), 0.0);
        Ok(())
    }

    #[test]
    fn test_initialize_then_single_iteration_finds_target() -> GroverResult<()> {
        let plan = assemble(2, ["11"], None, true)?;
        let mut engine = SimulationEngine::init(&plan)?;
        for op in plan.operations().iter().filter(|op| **op != Operation::Measure) {
            engine.apply_operation(*op)?;
        }
        assert_abs_diff_eq!(engine.state().probability(3), 1.0, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_measure_is_rejected_by_apply_operation() -> GroverResult<()> {
        let plan = assemble(2, ["11"], None, true)?;
        let mut engine = SimulationEngine::init(&plan)?;
        assert!(engine.apply_operation(Operation::Measure).unwrap_err().is_invariant_violation());
        Ok(())
    }

    #[test]
    fn test_apply_operation_rescales_sub_tolerance_drift() -> GroverResult<()> {
        let plan = assemble(4, ["0110"], None, false)?;
        let mut engine = SimulationEngine::init(&plan)?;
        engine.apply_operation(Operation::Initialize)?;
        let scale = (1.0f64 + 5e-10).sqrt();
        for amplitude in engine.state.amplitudes_mut().iter_mut() {
            *amplitude *= scale;
        }
        engine.apply_operation(Operation::Oracle)?;
        assert_abs_diff_eq!(engine.state().norm_sqr(), 1.0, epsilon = 1e-14);
        Ok(())
    }

    #[test]
    fn test_apply_operation_rejects_large_drift() -> GroverResult<()> {
        let plan = assemble(2, ["11"], None, false)?;
        let mut engine = SimulationEngine::init(&plan)?;
        engine.apply_operation(Operation::Initialize)?;
        engine.state.amplitudes_mut()[0] *= 2.0;
        assert!(engine.apply_operation(Operation::Diffuser).unwrap_err().is_invariant_violation());
        Ok(())
    }

    #[test]
    fn test_sampling_a_basis_state_is_deterministic() -> GroverResult<()> {
        let plan = assemble(3, ["110"], Some(1), true)?;
        let engine = SimulationEngine::init(&plan)?;
        let mut rng = StdRng::seed_from_u64(7);
        let result = engine.sample(64, &mut rng)?;
        assert_eq!(result.count("000"), 64);
        assert_eq!(result.shots(), 64);
        Ok(())
    }
}
