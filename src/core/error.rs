//! Error handling logic

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type GroverResult<T> = Result<T, GroverError>;

/// Failures raised while building or evaluating a search run.
///
/// Every variant except [`GroverError::InvariantViolation`] describes bad
/// caller input and is raised before any numeric work starts.
/// `InvariantViolation` signals a defect inside the engine itself (for
/// example a state vector whose norm drifted) and should never be seen
/// by a correct caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GroverError {
    /// Qubit count outside `1..=max`.
    #[error("Invalid dimension: {num_qubits} qubits (must be between 1 and {max})")]
    InvalidDimension {
        /// Requested qubit count
        num_qubits: usize,
        /// Largest supported qubit count
        max: usize,
    },

    /// A target label whose length differs from the qubit count.
    #[error("Dimension mismatch: label '{label}' has length {actual} but num_qubits is {expected}")]
    DimensionMismatch {
        /// Offending label
        label: String,
        /// Qubit count the label must match
        expected: usize,
        /// Length of the label
        actual: usize,
    },

    /// No target labels were supplied.
    #[error("Target set is empty: at least one label is required")]
    EmptyTargetSet,

    /// Number of marked elements outside `[1, N]`.
    #[error("Invalid target count {count}: must be between 1 and {space}")]
    InvalidTargetCount {
        /// Number of targets given
        count: usize,
        /// Size of the search space (2^n)
        space: usize,
    },

    /// Zero shots requested.
    #[error("Invalid shot count {0}: at least one shot is required")]
    InvalidShotCount(u64),

    /// A label with characters other than '0' and '1'.
    #[error("Invalid label '{0}': must contain only '0' and '1'")]
    InvalidLabelAlphabet(String),

    /// Success threshold outside `(0, 1]`.
    #[error("Invalid threshold {0}: must be in range (0, 1]")]
    InvalidThreshold(f64),

    /// An explicitly supplied iteration count (or ceiling) of zero.
    #[error("Invalid iteration count {0}: at least one iteration is required")]
    InvalidIterationCount(usize),

    /// Sampling was requested for a plan assembled without measurement.
    #[error("Evolution plan has no terminal measurement step")]
    MeasurementNotRequested,

    /// Configuration could not be (de)serialized.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Internal defect, e.g. normalization lost during operator application.
    #[error("Invariant violation: {message}")]
    InvariantViolation {
        /// Description of the broken invariant
        message: String,
    },
}

impl GroverError {
    /// Shorthand for building an [`GroverError::InvariantViolation`].
    pub(crate) fn invariant(message: impl Into<String>) -> Self {
        GroverError::InvariantViolation { message: message.into() }
    }

    /// Returns `true` for engine defects as opposed to bad input.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, GroverError::InvariantViolation { .. })
    }
}

impl From<serde_json::Error> for GroverError {
    fn from(err: serde_json::Error) -> Self {
        GroverError::InvalidConfig(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = GroverError::DimensionMismatch { label: "10".to_string(), expected: 3, actual: 2 };
        assert_eq!(err.to_string(), "Dimension mismatch: label '10' has length 2 but num_qubits is 3");
        assert_eq!(
            GroverError::InvalidDimension { num_qubits: 0, max: 24 }.to_string(),
            "Invalid dimension: 0 qubits (must be between 1 and 24)"
        );
    }

    #[test]
    fn test_invariant_is_distinct_from_input_errors() {
        assert!(GroverError::invariant("norm drift").is_invariant_violation());
        assert!(!GroverError::EmptyTargetSet.is_invariant_violation());
        assert!(!GroverError::InvalidShotCount(0).is_invariant_violation());
    }
}
