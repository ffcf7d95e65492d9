//! Numeric constants and defaults shared by the search engine.

/// Allowed deviation of `Σ|a_i|²` from 1.0.
pub const NORM_TOLERANCE: f64 = 1e-9;

/// Default success-probability threshold for the adaptive planner.
pub const DEFAULT_THRESHOLD: f64 = 0.95;

/// Default number of measurement shots.
pub const DEFAULT_SHOTS: u64 = 1024;

/// Largest supported qubit count. The state vector holds 2^n `Complex<f64>`
/// values, so 24 qubits is already 256 MiB.
pub const MAX_QUBITS: usize = 24;

/// Used for the closed-form iteration estimate
pub const PI: f64 = std::f64::consts::PI;
