// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod label;
pub mod state;

// Re-export public types for convenient access via `grover::core::TypeName`
pub use error::{GroverError, GroverResult};
pub use label::{index_to_label, label_to_index, search_space_size, TargetSet};
pub use state::StateVector;

pub mod constants;
pub use constants::{DEFAULT_SHOTS, DEFAULT_THRESHOLD, MAX_QUBITS, NORM_TOLERANCE};
