// src/operations/mod.rs

//! The two structural operators of the search and the plan steps that
//! sequence them.
//!
//! * [`Oracle`] flips the sign of every marked amplitude.
//! * [`Diffuser`] reflects every amplitude about the mean amplitude.
//!
//! Both act on a [`StateVector`] in place in O(N); no N×N matrix is ever
//! materialized.

use crate::core::{search_space_size, GroverError, GroverResult, StateVector, TargetSet};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One step of an evolution plan.
///
/// The derived ordering is the order steps appear in a plan, which keeps
/// gate-count maps readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Operation {
    /// Prepare the uniform superposition (Hadamard on every qubit).
    Initialize,
    /// Informational separator with no effect on the state.
    Barrier,
    /// Phase-flip of the marked states.
    Oracle,
    /// Inversion about the mean.
    Diffuser,
    /// Terminal measurement of every qubit.
    Measure,
}

impl Operation {
    /// Short name used in gate-count reports.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Initialize => "h",
            Operation::Barrier => "barrier",
            Operation::Oracle => "oracle",
            Operation::Diffuser => "diffuser",
            Operation::Measure => "measure",
        }
    }

    /// Returns `true` for steps that count toward circuit depth.
    pub fn is_applied(&self) -> bool {
        !matches!(self, Operation::Barrier)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A linear transform on a [`StateVector`].
pub trait Operator {
    /// Applies the transform in place.
    ///
    /// # Errors
    /// Returns `GroverError::InvariantViolation` if the state has a different
    /// qubit count than the operator was built for.
    fn apply(&self, state: &mut StateVector) -> GroverResult<()>;

    /// The plan step this operator implements.
    fn kind(&self) -> Operation;

    /// Qubit count the operator acts on.
    fn num_qubits(&self) -> usize;
}

/// Rejects a state whose qubit count differs from the operator's.
fn check_dimension<O: Operator + ?Sized>(op: &O, state: &StateVector) -> GroverResult<()> {
    if state.num_qubits() != op.num_qubits() {
        return Err(GroverError::invariant(format!(
            "{} built for {} qubits applied to a {}-qubit state",
            op.kind(),
            op.num_qubits(),
            state.num_qubits()
        )));
    }
    Ok(())
}

/// Diagonal operator negating the amplitude of every marked index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Oracle {
    targets: TargetSet,
}

impl Oracle {
    /// The marked elements.
    pub fn targets(&self) -> &TargetSet {
        &self.targets
    }

    /// The oracle over the union of both target sets.
    ///
    /// Union is commutative, associative and idempotent. For disjoint sets
    /// the result is the same operator as applying `self` then `other`.
    ///
    /// # Errors
    /// Returns `GroverError::DimensionMismatch` if the oracles act on
    /// different qubit counts.
    pub fn union(&self, other: &Oracle) -> GroverResult<Oracle> {
        let n = self.targets.num_qubits();
        if other.targets.num_qubits() != n {
            return Err(GroverError::DimensionMismatch {
                label: other.targets.to_string(),
                expected: n,
                actual: other.targets.num_qubits(),
            });
        }
        let merged = self.targets.indices().union(other.targets.indices()).copied().collect();
        Ok(Oracle { targets: TargetSet::from_indices(n, merged) })
    }
}

impl Operator for Oracle {
    fn apply(&self, state: &mut StateVector) -> GroverResult<()> {
        check_dimension(self, state)?;
        let amplitudes = state.amplitudes_mut();
        for &index in self.targets.indices() {
            amplitudes[index] = -amplitudes[index];
        }
        Ok(())
    }

    fn kind(&self) -> Operation {
        Operation::Oracle
    }

    fn num_qubits(&self) -> usize {
        self.targets.num_qubits()
    }
}

/// Reflection of every amplitude about the mean: `a_i ↦ 2μ − a_i`.
///
/// The same formula holds for every `n >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Diffuser {
    num_qubits: usize,
}

impl Operator for Diffuser {
    fn apply(&self, state: &mut StateVector) -> GroverResult<()> {
        check_dimension(self, state)?;
        let twice_mean = state.mean_amplitude() * 2.0;
        for amplitude in state.amplitudes_mut().iter_mut() {
            *amplitude = twice_mean - *amplitude;
        }
        Ok(())
    }

    fn kind(&self) -> Operation {
        Operation::Diffuser
    }

    fn num_qubits(&self) -> usize {
        self.num_qubits
    }
}

/// Builds the oracle marking `target_labels` in an n-qubit space.
///
/// # Errors
/// * `InvalidDimension` if `num_qubits` is out of range.
/// * `EmptyTargetSet` if no labels are given.
/// * `DimensionMismatch` if a label length differs from `num_qubits`.
/// * `InvalidLabelAlphabet` if a label contains anything but '0'/'1'.
pub fn build_oracle<I, S>(num_qubits: usize, target_labels: I) -> GroverResult<Oracle>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Ok(Oracle { targets: TargetSet::parse(num_qubits, target_labels)? })
}

/// Builds the oracle for an already validated target set.
pub fn oracle_for(targets: &TargetSet) -> Oracle {
    Oracle { targets: targets.clone() }
}

/// Builds the inversion-about-the-mean operator for an n-qubit space.
///
/// # Errors
/// Returns `GroverError::InvalidDimension` if `num_qubits` is out of range.
pub fn build_diffuser(num_qubits: usize) -> GroverResult<Diffuser> {
    search_space_size(num_qubits)?;
    Ok(Diffuser { num_qubits })
}
