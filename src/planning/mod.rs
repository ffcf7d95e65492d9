// src/planning/mod.rs

//! Iteration planning: how many (oracle, diffuser) pairs to apply.
//!
//! The closed form follows from the rotation picture of amplitude
//! amplification. With `m` marked elements among `N = 2^n`, each iteration
//! rotates the state by `2θ` where `θ = asin(√(m/N))`, and the success
//! probability after `k` iterations is `sin²((2k+1)θ)`.

use crate::core::constants::PI;
use crate::core::{search_space_size, GroverError, GroverResult, StateVector, TargetSet};
use crate::operations::{build_diffuser, oracle_for, Operator};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How an iteration count was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanSource {
    /// `round(π/(4θ) − 1/2)`, clamped to at least 1.
    ClosedForm,
    /// First count whose simulated success probability met the threshold.
    Probed,
    /// Supplied by the caller.
    Explicit,
}

/// An iteration count `k >= 1` and where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IterationPlan {
    iterations: usize,
    source: PlanSource,
}

impl IterationPlan {
    /// Plan from the closed-form estimate.
    pub fn closed_form(num_qubits: usize, num_targets: usize) -> GroverResult<Self> {
        Ok(Self {
            iterations: optimal_iterations(num_qubits, num_targets)?,
            source: PlanSource::ClosedForm,
        })
    }

    /// Plan from the adaptive probe.
    pub fn probed(
        num_qubits: usize,
        targets: &TargetSet,
        threshold: f64,
        max_iterations: Option<usize>,
    ) -> GroverResult<Self> {
        Ok(Self {
            iterations: probe_iterations(num_qubits, targets, threshold, max_iterations)?,
            source: PlanSource::Probed,
        })
    }

    /// Plan with a caller-chosen count.
    ///
    /// # Errors
    /// Returns `GroverError::InvalidIterationCount` for zero.
    pub fn explicit(iterations: usize) -> GroverResult<Self> {
        if iterations == 0 {
            return Err(GroverError::InvalidIterationCount(iterations));
        }
        Ok(Self { iterations, source: PlanSource::Explicit })
    }

    /// Number of (oracle, diffuser) pairs.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// How the count was derived.
    pub fn source(&self) -> PlanSource {
        self.source
    }
}

impl fmt::Display for IterationPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} iteration(s) ({:?})", self.iterations, self.source)
    }
}

/// Rotation angle `θ = asin(√(m/N))` after validating `m`.
fn rotation_angle(num_qubits: usize, num_targets: usize) -> GroverResult<f64> {
    let space = search_space_size(num_qubits)?;
    if num_targets < 1 || num_targets > space {
        return Err(GroverError::InvalidTargetCount { count: num_targets, space });
    }
    Ok((num_targets as f64 / space as f64).sqrt().asin())
}

/// Optimal static iteration count for `num_targets` marked elements.
///
/// `k = max(1, round(π/(4θ) − 1/2))` with `θ = asin(√(m/N))`. A single
/// target in a 2-qubit space gives exactly 1.
///
/// # Errors
/// * `InvalidDimension` if `num_qubits` is out of range.
/// * `InvalidTargetCount` if `num_targets` is outside `[1, 2^n]`.
pub fn optimal_iterations(num_qubits: usize, num_targets: usize) -> GroverResult<usize> {
    let theta = rotation_angle(num_qubits, num_targets)?;
    let k = (PI / (4.0 * theta) - 0.5).round();
    Ok((k as usize).max(1))
}

/// Analytic success probability `sin²((2k+1)θ)` after `k` iterations.
pub fn success_probability(num_qubits: usize, num_targets: usize, iterations: usize) -> GroverResult<f64> {
    let theta = rotation_angle(num_qubits, num_targets)?;
    Ok(((2 * iterations + 1) as f64 * theta).sin().powi(2))
}

/// Smallest iteration count whose simulated success probability reaches
/// `threshold`.
///
/// A private probe state starts in the uniform superposition and one
/// (oracle, diffuser) pair is applied per step. After each step the
/// probability mass on the whole target set is compared against
/// `threshold`. The ceiling is `max_iterations`, or the closed-form optimum
/// when `None`; if the threshold is never met the ceiling is returned.
///
/// # Errors
/// * Label validation errors as for [`crate::operations::build_oracle`].
/// * `InvalidThreshold` unless `0 < threshold <= 1`.
/// * `InvalidIterationCount` if `max_iterations` is `Some(0)`.
/// * `InvariantViolation` if the probe state drifts from unit norm by more
///   than the tolerance in one iteration. Smaller drift is rescaled away.
pub fn adaptive_iterations<I, S>(
    num_qubits: usize,
    target_labels: I,
    threshold: f64,
    max_iterations: Option<usize>,
) -> GroverResult<usize>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let targets = TargetSet::parse(num_qubits, target_labels)?;
    probe_iterations(num_qubits, &targets, threshold, max_iterations)
}

fn probe_iterations(
    num_qubits: usize,
    targets: &TargetSet,
    threshold: f64,
    max_iterations: Option<usize>,
) -> GroverResult<usize> {
    if !(threshold > 0.0 && threshold <= 1.0) {
        return Err(GroverError::InvalidThreshold(threshold));
    }
    let ceiling = match max_iterations {
        Some(0) => return Err(GroverError::InvalidIterationCount(0)),
        Some(limit) => limit,
        None => optimal_iterations(num_qubits, targets.len())?,
    };

    let oracle = oracle_for(targets);
    let diffuser = build_diffuser(num_qubits)?;
    let mut probe = StateVector::uniform(num_qubits)?;

    for k in 1..=ceiling {
        oracle.apply(&mut probe)?;
        diffuser.apply(&mut probe)?;
        probe.normalize(false)?;

        let success: f64 = targets.indices().iter().map(|&i| probe.probability(i)).sum();
        debug!("adaptive probe: k={} P(target)={:.6} threshold={}", k, success, threshold);
        if success >= threshold {
            return Ok(k);
        }
    }

    warn!(
        "threshold {} not reached within {} iteration(s) for targets {}; using ceiling",
        threshold, ceiling, targets
    );
    Ok(ceiling)
}
