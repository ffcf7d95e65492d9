// src/simulation/results.rs
use crate::core::{label_to_index, GroverError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Outcome counts from one sampling call.
///
/// Keys are MSB-first labels; only labels that were observed are present.
/// The counts always sum to [`MeasurementResult::shots`]; deserialization
/// rejects input that breaks this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMeasurementResult")]
pub struct MeasurementResult {
    num_qubits: usize,
    shots: u64,
    counts: BTreeMap<String, u64>,
}

// Unchecked wire form
#[derive(Deserialize)]
struct RawMeasurementResult {
    num_qubits: usize,
    shots: u64,
    counts: BTreeMap<String, u64>,
}

impl TryFrom<RawMeasurementResult> for MeasurementResult {
    type Error = GroverError;

    fn try_from(raw: RawMeasurementResult) -> Result<Self, Self::Error> {
        for (label, &count) in &raw.counts {
            label_to_index(label, raw.num_qubits)?;
            if count == 0 {
                return Err(GroverError::InvalidConfig(format!("label '{}' recorded with zero count", label)));
            }
        }
        let total: u64 = raw.counts.values().sum();
        if total != raw.shots {
            return Err(GroverError::InvalidConfig(format!(
                "counts sum to {} but shots is {}",
                total, raw.shots
            )));
        }
        Ok(Self { num_qubits: raw.num_qubits, shots: raw.shots, counts: raw.counts })
    }
}

impl MeasurementResult {
    /// Creates a new, empty result set. (Internal visibility)
    pub(crate) fn new(num_qubits: usize) -> Self {
        Self { num_qubits, shots: 0, counts: BTreeMap::new() }
    }

    /// Records one observed outcome. (Internal visibility)
    pub(crate) fn record(&mut self, label: String) {
        *self.counts.entry(label).or_insert(0) += 1;
        self.shots += 1;
    }

    /// Width of every label.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Total number of samples drawn.
    pub fn shots(&self) -> u64 {
        self.shots
    }

    /// Returns a reference to the map of observed counts.
    pub fn counts(&self) -> &BTreeMap<String, u64> {
        &self.counts
    }

    /// Count for `label`, zero if it was never observed.
    pub fn count(&self, label: &str) -> u64 {
        self.counts.get(label).copied().unwrap_or(0)
    }

    /// Empirical frequency of `label` in `[0, 1]`.
    pub fn frequency(&self, label: &str) -> f64 {
        if self.shots == 0 {
            return 0.0;
        }
        self.count(label) as f64 / self.shots as f64
    }

    /// Most frequently observed label. Ties go to the smallest label.
    pub fn most_frequent(&self) -> Option<(&str, u64)> {
        self.counts
            .iter()
            .fold(None, |best: Option<(&String, u64)>, (label, &count)| match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((label, count)),
            })
            .map(|(label, count)| (label.as_str(), count))
    }

    /// Counts ordered by descending frequency, then by label.
    pub fn sorted_counts(&self) -> Vec<(&str, u64)> {
        let mut sorted: Vec<(&str, u64)> = self.counts.iter().map(|(l, &c)| (l.as_str(), c)).collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        sorted
    }
}

impl fmt::Display for MeasurementResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Measurement Results ({} shots):", self.shots)?;
        if self.counts.is_empty() {
            writeln!(f, "  No outcomes were recorded.")?;
        } else {
            for (label, count) in self.sorted_counts() {
                writeln!(f, "  |{}>: {} ({:.3})", label, count, count as f64 / self.shots as f64)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> MeasurementResult {
        let mut result = MeasurementResult::new(2);
        for label in ["11", "01", "11", "00", "01", "11"] {
            result.record(label.to_string());
        }
        result
    }

    #[test]
    fn test_counts_and_frequency() {
        let result = sample_result();
        assert_eq!(result.shots(), 6);
        assert_eq!(result.count("11"), 3);
        assert_eq!(result.count("10"), 0);
        assert_eq!(result.frequency("11"), 0.5);
        assert_eq!(result.counts().values().sum::<u64>(), result.shots());
    }

    #[test]
    fn test_most_frequent_and_sorting() {
        let result = sample_result();
        assert_eq!(result.most_frequent(), Some(("11", 3)));
        assert_eq!(result.sorted_counts(), vec![("11", 3), ("01", 2), ("00", 1)]);
        assert_eq!(MeasurementResult::new(2).most_frequent(), None);
    }

    #[test]
    fn test_tie_goes_to_smallest_label() {
        let mut result = MeasurementResult::new(1);
        result.record("1".to_string());
        result.record("0".to_string());
        assert_eq!(result.most_frequent(), Some(("0", 1)));
    }

    #[test]
    fn test_json_round_trip_keeps_counts() -> Result<(), GroverError> {
        let result = sample_result();
        let restored: MeasurementResult = serde_json::from_str(&serde_json::to_string(&result)?)?;
        assert_eq!(restored, result);
        Ok(())
    }

    #[test]
    fn test_deserialize_rejects_inconsistent_counts() {
        let parse = |json: &str| serde_json::from_str::<MeasurementResult>(json);
        assert!(parse(r#"{"num_qubits":2,"shots":5,"counts":{"11":3}}"#).is_err());
        assert!(parse(r#"{"num_qubits":2,"shots":3,"counts":{"111":3}}"#).is_err());
        assert!(parse(r#"{"num_qubits":2,"shots":3,"counts":{"1x":3}}"#).is_err());
        assert!(parse(r#"{"num_qubits":2,"shots":3,"counts":{"11":3,"00":0}}"#).is_err());
        assert!(parse(r#"{"num_qubits":2,"shots":3,"counts":{"11":2,"00":1}}"#).is_ok());
    }

    #[test]
    fn test_display() {
        let rendered = sample_result().to_string();
        assert!(rendered.starts_with("Measurement Results (6 shots):"));
        assert!(rendered.contains("|11>: 3 (0.500)"));
    }
}
