// src/config.rs

//! Run configuration and the one-call search entry point.
//!
//! A [`SearchConfig`] describes one search run end to end: the search space,
//! the marked labels, how the iteration count is chosen, and how many shots
//! to draw. It serializes to JSON so a sweep can be described in a file.

use crate::circuits::{EvolutionPlan, EvolutionPlanBuilder};
use crate::core::{search_space_size, GroverError, GroverResult, TargetSet, DEFAULT_SHOTS, DEFAULT_THRESHOLD};
use crate::planning::IterationPlan;
use crate::simulation::{MeasurementResult, Sampler};
use log::warn;
use serde::{Deserialize, Serialize};

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn default_shots() -> u64 {
    DEFAULT_SHOTS
}

/// Parameters of a single search run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Number of qubits `n`; the search space has `2^n` elements.
    pub num_qubits: usize,

    /// Marked labels, MSB first. Duplicates collapse.
    pub targets: Vec<String>,

    /// Explicit iteration count. Takes precedence over `adaptive`.
    #[serde(default)]
    pub iterations: Option<usize>,

    /// Probe the success probability instead of using the closed form.
    #[serde(default)]
    pub adaptive: bool,

    /// Success probability the adaptive probe stops at.
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Ceiling for the adaptive probe; the closed-form optimum when `None`.
    #[serde(default)]
    pub max_iterations: Option<usize>,

    /// Number of measurement shots.
    #[serde(default = "default_shots")]
    pub shots: u64,

    /// Random seed for reproducible sampling.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl SearchConfig {
    /// Creates a configuration with default planning and sampling settings.
    pub fn new<I, S>(num_qubits: usize, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            num_qubits,
            targets: targets.into_iter().map(Into::into).collect(),
            iterations: None,
            adaptive: false,
            threshold: DEFAULT_THRESHOLD,
            max_iterations: None,
            shots: DEFAULT_SHOTS,
            seed: None,
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Fixes the iteration count.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = Some(iterations);
        self
    }

    /// Enables the adaptive probe with the given threshold.
    pub fn with_adaptive(mut self, threshold: f64) -> Self {
        self.adaptive = true;
        self.threshold = threshold;
        self
    }

    /// Caps the adaptive probe.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Sets the number of shots.
    pub fn with_shots(mut self, shots: u64) -> Self {
        self.shots = shots;
        self
    }

    /// Sets a sampling seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    // ========================================================================
    // Validation & serialization
    // ========================================================================

    /// Checks every field without doing any numeric work and returns the
    /// parsed target set.
    pub fn validate(&self) -> GroverResult<TargetSet> {
        search_space_size(self.num_qubits)?;
        let targets = TargetSet::parse(self.num_qubits, &self.targets)?;
        if self.iterations == Some(0) {
            return Err(GroverError::InvalidIterationCount(0));
        }
        if self.adaptive && self.iterations.is_none() {
            if !(self.threshold > 0.0 && self.threshold <= 1.0) {
                return Err(GroverError::InvalidThreshold(self.threshold));
            }
            if self.max_iterations == Some(0) {
                return Err(GroverError::InvalidIterationCount(0));
            }
        }
        if self.shots < 1 {
            return Err(GroverError::InvalidShotCount(self.shots));
        }
        Ok(targets)
    }

    /// Parses a configuration from JSON. Missing optional fields take defaults.
    pub fn from_json(json: &str) -> GroverResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the configuration to pretty-printed JSON.
    pub fn to_json(&self) -> GroverResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Validates `config` and assembles the plan it describes.
///
/// The iteration count is the explicit `iterations` if set, otherwise the
/// adaptive probe when `adaptive` is on, otherwise the closed form.
pub fn build_search_plan(config: &SearchConfig) -> GroverResult<EvolutionPlan> {
    let targets = config.validate()?;

    let plan = match (config.iterations, config.adaptive) {
        (Some(k), adaptive) => {
            if adaptive {
                warn!("explicit iterations={} overrides adaptive planning", k);
            }
            IterationPlan::explicit(k)?
        }
        (None, true) => IterationPlan::probed(config.num_qubits, &targets, config.threshold, config.max_iterations)?,
        (None, false) => IterationPlan::closed_form(config.num_qubits, targets.len())?,
    };

    EvolutionPlanBuilder::new(targets).with_plan(plan).measure(true).build()
}

/// Builds, executes and samples one search run.
///
/// # Errors
/// Any input error from [`SearchConfig::validate`], raised before numeric
/// work begins, or an `InvariantViolation` from the engine.
pub fn build_search_run(config: &SearchConfig) -> GroverResult<MeasurementResult> {
    let plan = build_search_plan(config)?;
    let sampler = match config.seed {
        Some(seed) => Sampler::with_seed(seed),
        None => Sampler::new(),
    };
    sampler.run(&plan, config.shots)
}
