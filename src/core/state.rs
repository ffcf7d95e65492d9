// src/core/state.rs

use super::constants::NORM_TOLERANCE;
use super::error::{GroverError, GroverResult};
use super::label::search_space_size;
use num_complex::Complex;
use num_traits::Zero;
use std::fmt;

/// Complex amplitude vector over the 2^n basis states of an n-qubit register.
///
/// A `StateVector` is created in the uniform superposition and is only
/// mutated by operator application. Its norm `Σ|a_i|²` stays within
/// [`NORM_TOLERANCE`] of 1 at every observation point; the engine checks
/// this after each step and rescales the rounding drift away.
#[derive(Debug, Clone, PartialEq)] // Avoid Eq for floating-point complex numbers
pub struct StateVector {
    num_qubits: usize,
    amplitudes: Vec<Complex<f64>>,
}

impl StateVector {
    /// Creates the uniform superposition: every amplitude is `1/√(2^n)`.
    ///
    /// # Errors
    /// Returns `GroverError::InvalidDimension` if `num_qubits` is 0 or too large.
    pub fn uniform(num_qubits: usize) -> GroverResult<Self> {
        let dim = search_space_size(num_qubits)?;
        let amplitude = Complex::new(1.0 / (dim as f64).sqrt(), 0.0);
        Ok(Self {
            num_qubits,
            amplitudes: vec![amplitude; dim],
        })
    }

    /// Wraps an explicit amplitude vector. The length must be a power of two
    /// of at least 2; no normalization is enforced here.
    pub(crate) fn from_amplitudes(amplitudes: Vec<Complex<f64>>) -> GroverResult<Self> {
        let dim = amplitudes.len();
        if dim < 2 || !dim.is_power_of_two() {
            return Err(GroverError::invariant(format!(
                "State vector length {} is not a power of two >= 2",
                dim
            )));
        }
        Ok(Self {
            num_qubits: dim.trailing_zeros() as usize,
            amplitudes,
        })
    }

    /// Number of qubits `n`.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Gets the dimension `2^n`.
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Provides read-only access to the amplitudes.
    pub fn amplitudes(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    /// Mutable access for operators. (Internal visibility)
    pub(crate) fn amplitudes_mut(&mut self) -> &mut [Complex<f64>] {
        &mut self.amplitudes
    }

    /// Squared magnitude at a basis index, or 0.0 for an index out of range.
    pub fn probability(&self, index: usize) -> f64 {
        self.amplitudes.get(index).map_or(0.0, |a| a.norm_sqr())
    }

    /// Full measurement distribution `|a_i|²`.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    /// `Σ|a_i|²`.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }

    /// Checks, and optionally repairs, normalization.
    ///
    /// With `check = true` the vector is only inspected. With `check = false`
    /// drift inside the tolerance is rescaled away. In both modes a deviation
    /// beyond [`NORM_TOLERANCE`] is a defect in operator application and is
    /// reported as `GroverError::InvariantViolation`; it is never rescaled.
    pub fn normalize(&mut self, check: bool) -> GroverResult<()> {
        let norm_sq = self.norm_sqr();
        if (norm_sq - 1.0).abs() > NORM_TOLERANCE {
            return Err(GroverError::invariant(format!(
                "State vector normalization failed. Sum(|a_i|^2) = {} (Deviation > {})",
                norm_sq, NORM_TOLERANCE
            )));
        }
        if !check && norm_sq != 1.0 {
            let scale = 1.0 / norm_sq.sqrt();
            for amplitude in self.amplitudes.iter_mut() {
                *amplitude *= scale;
            }
        }
        Ok(())
    }

    /// Arithmetic mean of all amplitudes.
    pub fn mean_amplitude(&self) -> Complex<f64> {
        let sum = self.amplitudes.iter().fold(Complex::<f64>::zero(), |acc, a| acc + a);
        sum / self.dim() as f64
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateVector[")?;
        for (i, c) in self.amplitudes.iter().enumerate() {
            write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, c)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_uniform_superposition() -> GroverResult<()> {
        let state = StateVector::uniform(3)?;
        assert_eq!(state.dim(), 8);
        assert_eq!(state.num_qubits(), 3);
        for i in 0..8 {
            assert_abs_diff_eq!(state.probability(i), 0.125, epsilon = 1e-12);
        }
        assert_abs_diff_eq!(state.norm_sqr(), 1.0, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_uniform_rejects_zero_qubits() {
        assert!(matches!(StateVector::uniform(0), Err(GroverError::InvalidDimension { num_qubits: 0, .. })));
    }

    #[test]
    fn test_normalize_rescales_small_drift() -> GroverResult<()> {
        let drift: f64 = 1.0 + 2e-10;
        let mut state = StateVector::from_amplitudes(vec![Complex::new(drift.sqrt(), 0.0), Complex::zero()])?;
        state.normalize(true)?;
        assert!(state.norm_sqr() != 1.0);
        state.normalize(false)?;
        assert_abs_diff_eq!(state.norm_sqr(), 1.0, epsilon = 1e-14);
        Ok(())
    }

    #[test]
    fn test_normalize_flags_large_drift() -> GroverResult<()> {
        let mut state = StateVector::from_amplitudes(vec![Complex::new(0.9, 0.0), Complex::zero()])?;
        let err = state.normalize(false).unwrap_err();
        assert!(err.is_invariant_violation());
        // Not silently repaired
        assert_abs_diff_eq!(state.amplitudes()[0].re, 0.9);
        Ok(())
    }

    #[test]
    fn test_from_amplitudes_rejects_bad_length() {
        assert!(StateVector::from_amplitudes(vec![Complex::zero(); 3]).is_err());
        assert!(StateVector::from_amplitudes(vec![Complex::zero(); 1]).is_err());
    }
}
