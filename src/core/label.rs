// src/core/label.rs

//! Mapping between binary labels and state-vector indices.
//!
//! Labels are read most-significant-bit first: the first character of the
//! label is the highest bit of the basis index, so `"101"` is index 5 and
//! `"011"` is index 3. Oracle construction, adaptive probing and sampling
//! all go through this module so they agree on the convention.

use super::constants::MAX_QUBITS;
use super::error::{GroverError, GroverResult};
use std::collections::BTreeSet;
use std::fmt;

/// Checks `1 <= num_qubits <= MAX_QUBITS` and returns the search space size 2^n.
pub fn search_space_size(num_qubits: usize) -> GroverResult<usize> {
    if num_qubits < 1 || num_qubits > MAX_QUBITS {
        return Err(GroverError::InvalidDimension { num_qubits, max: MAX_QUBITS });
    }
    Ok(1usize << num_qubits)
}

/// Parses an n-character binary label into its basis index.
///
/// The length is checked before the alphabet, so a label that is both too
/// short and non-binary reports `DimensionMismatch`.
pub fn label_to_index(label: &str, num_qubits: usize) -> GroverResult<usize> {
    let actual = label.chars().count();
    if actual != num_qubits {
        return Err(GroverError::DimensionMismatch {
            label: label.to_string(),
            expected: num_qubits,
            actual,
        });
    }
    label.chars().try_fold(0usize, |acc, c| match c {
        '0' => Ok(acc << 1),
        '1' => Ok((acc << 1) | 1),
        _ => Err(GroverError::InvalidLabelAlphabet(label.to_string())),
    })
}

/// Renders a basis index as an n-character label, MSB first.
pub fn index_to_label(index: usize, num_qubits: usize) -> String {
    format!("{:0width$b}", index, width = num_qubits)
}

/// Validated set of marked basis indices for an n-qubit search space.
///
/// Duplicate labels collapse. The set is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetSet {
    num_qubits: usize,
    indices: BTreeSet<usize>,
}

impl TargetSet {
    /// Validates `labels` against `num_qubits` and collects their indices.
    ///
    /// # Errors
    /// * `InvalidDimension` if `num_qubits` is out of range.
    /// * `EmptyTargetSet` if `labels` yields nothing.
    /// * `DimensionMismatch` / `InvalidLabelAlphabet` for a malformed label.
    pub fn parse<I, S>(num_qubits: usize, labels: I) -> GroverResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        search_space_size(num_qubits)?;
        let indices = labels
            .into_iter()
            .map(|label| label_to_index(label.as_ref(), num_qubits))
            .collect::<GroverResult<BTreeSet<usize>>>()?;
        if indices.is_empty() {
            return Err(GroverError::EmptyTargetSet);
        }
        Ok(Self { num_qubits, indices })
    }

    /// Builds a target set from raw indices. (Internal visibility)
    pub(crate) fn from_indices(num_qubits: usize, indices: BTreeSet<usize>) -> Self {
        Self { num_qubits, indices }
    }

    /// Number of qubits the labels were validated against.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Marked indices in ascending order.
    pub fn indices(&self) -> &BTreeSet<usize> {
        &self.indices
    }

    /// Returns `true` if `index` is marked.
    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    /// Number of distinct marked elements.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Always `false` for a parsed set; provided for API completeness.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Marked elements rendered back into labels.
    pub fn labels(&self) -> Vec<String> {
        self.indices.iter().map(|&i| index_to_label(i, self.num_qubits)).collect()
    }
}

impl fmt::Display for TargetSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.labels().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_msb_first_mapping() {
        assert_eq!(label_to_index("101", 3), Ok(5));
        assert_eq!(label_to_index("011", 3), Ok(3));
        assert_eq!(label_to_index("1100", 4), Ok(12));
        assert_eq!(index_to_label(3, 3), "011");
        assert_eq!(index_to_label(12, 4), "1100");
    }

    #[test]
    fn test_length_checked_before_alphabet() {
        assert!(matches!(label_to_index("1x", 3), Err(GroverError::DimensionMismatch { .. })));
        assert_eq!(label_to_index("1x1", 3), Err(GroverError::InvalidLabelAlphabet("1x1".to_string())));
    }

    #[test]
    fn test_target_set_collapses_duplicates() -> GroverResult<()> {
        let targets = TargetSet::parse(3, ["101", "010", "101"])?;
        assert_eq!(targets.len(), 2);
        assert!(targets.contains(5) && targets.contains(2));
        assert_eq!(targets.to_string(), "{010, 101}");
        Ok(())
    }

    #[test]
    fn test_target_set_rejects_bad_input() {
        let empty: [&str; 0] = [];
        assert_eq!(TargetSet::parse(3, empty), Err(GroverError::EmptyTargetSet));
        assert_eq!(
            TargetSet::parse(0, [""]),
            Err(GroverError::InvalidDimension { num_qubits: 0, max: MAX_QUBITS })
        );
        assert!(matches!(TargetSet::parse(3, ["1011"]), Err(GroverError::DimensionMismatch { actual: 4, .. })));
    }
}
