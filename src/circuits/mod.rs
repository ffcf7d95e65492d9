// src/circuits/mod.rs

//! Defines the evolution plan: the ordered sequence of steps one search run
//! applies, and the builder that assembles it.
//!
//! A plan is `Initialize → Barrier → k × (Oracle, Barrier, Diffuser,
//! Barrier) → [Measure]`. It owns the concrete operators so that executing it
//! needs nothing else.

use crate::core::{GroverResult, TargetSet};
use crate::operations::{build_diffuser, oracle_for, Diffuser, Operation, Oracle};
use crate::planning::IterationPlan;
use log::debug;
use std::collections::BTreeMap;
use std::fmt;

/// An assembled, immutable Grover evolution.
///
/// Two plans built from identical inputs compare equal, which makes
/// assembled runs reproducible in tests.
#[derive(Clone, PartialEq)]
pub struct EvolutionPlan {
    oracle: Oracle,
    diffuser: Diffuser,
    plan: IterationPlan,
    /// The ordered step sequence.
    operations: Vec<Operation>,
}

impl EvolutionPlan {
    /// Number of qubits the plan acts on.
    pub fn num_qubits(&self) -> usize {
        self.oracle.targets().num_qubits()
    }

    /// The marked elements.
    pub fn targets(&self) -> &TargetSet {
        self.oracle.targets()
    }

    /// Oracle applied at every `Operation::Oracle` step.
    pub fn oracle(&self) -> &Oracle {
        &self.oracle
    }

    /// Diffuser applied at every `Operation::Diffuser` step.
    pub fn diffuser(&self) -> &Diffuser {
        &self.diffuser
    }

    /// Iteration count and its derivation.
    pub fn iteration_plan(&self) -> &IterationPlan {
        &self.plan
    }

    /// Returns a slice containing the ordered sequence of steps.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Returns the total number of steps, barriers included.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` if the plan contains no steps. Assembled plans never are.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Returns `true` if the plan ends in a measurement.
    pub fn has_measurement(&self) -> bool {
        self.operations.last() == Some(&Operation::Measure)
    }

    /// Number of operator applications: every step except barriers.
    pub fn depth(&self) -> usize {
        self.operations.iter().filter(|op| op.is_applied()).count()
    }

    /// How many times each step kind occurs, barriers included.
    pub fn operation_counts(&self) -> BTreeMap<Operation, usize> {
        let mut counts = BTreeMap::new();
        for op in &self.operations {
            *counts.entry(*op).or_insert(0) += 1;
        }
        counts
    }
}

//-------------------------------------------------------------------------
// Plan Builder
//-------------------------------------------------------------------------

/// Assembles [`EvolutionPlan`] instances using method chaining.
#[derive(Debug, Clone)]
pub struct EvolutionPlanBuilder {
    targets: TargetSet,
    plan: Option<IterationPlan>,
    measure: bool,
}

impl EvolutionPlanBuilder {
    /// Starts a builder for a validated target set. Measurement is on by default.
    pub fn new(targets: TargetSet) -> Self {
        Self { targets, plan: None, measure: true }
    }

    /// Validates the labels and starts a builder.
    pub fn from_labels<I, S>(num_qubits: usize, target_labels: I) -> GroverResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::new(TargetSet::parse(num_qubits, target_labels)?))
    }

    /// Uses a precomputed iteration plan instead of the closed-form default.
    pub fn with_plan(mut self, plan: IterationPlan) -> Self {
        self.plan = Some(plan);
        self
    }

    /// Uses an explicit iteration count.
    pub fn with_iterations(self, iterations: usize) -> GroverResult<Self> {
        Ok(self.with_plan(IterationPlan::explicit(iterations)?))
    }

    /// Enables or disables the terminal measurement step.
    pub fn measure(mut self, measure: bool) -> Self {
        self.measure = measure;
        self
    }

    /// Finalizes the plan.
    pub fn build(self) -> GroverResult<EvolutionPlan> {
        let num_qubits = self.targets.num_qubits();
        let plan = match self.plan {
            Some(plan) => plan,
            None => IterationPlan::closed_form(num_qubits, self.targets.len())?,
        };
        let diffuser = build_diffuser(num_qubits)?;
        let oracle = oracle_for(&self.targets);

        let k = plan.iterations();
        let mut operations = Vec::with_capacity(2 + 4 * k + 1);
        operations.push(Operation::Initialize);
        operations.push(Operation::Barrier);
        for _ in 0..k {
            operations.extend([Operation::Oracle, Operation::Barrier, Operation::Diffuser, Operation::Barrier]);
        }
        if self.measure {
            operations.push(Operation::Measure);
        }

        debug!(
            "assembled plan: n={} targets={} {} measure={}",
            num_qubits, self.targets, plan, self.measure
        );
        Ok(EvolutionPlan { oracle, diffuser, plan, operations })
    }
}

/// Assembles a plan from raw inputs.
///
/// `iterations = None` uses the closed-form optimum for the target count.
///
/// # Errors
/// * Label validation errors as for [`crate::operations::build_oracle`].
/// * `InvalidIterationCount` for `Some(0)`.
pub fn assemble<I, S>(
    num_qubits: usize,
    target_labels: I,
    iterations: Option<usize>,
    want_measurement: bool,
) -> GroverResult<EvolutionPlan>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let builder = EvolutionPlanBuilder::from_labels(num_qubits, target_labels)?.measure(want_measurement);
    let builder = match iterations {
        Some(k) => builder.with_iterations(k)?,
        None => builder,
    };
    builder.build()
}

impl fmt::Display for EvolutionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "grover::EvolutionPlan[{} steps on {} qubits, targets {}, {}]",
            self.len(),
            self.num_qubits(),
            self.targets(),
            self.plan
        )?;
        let symbols: Vec<&str> = self
            .operations
            .iter()
            .map(|op| match op {
                Operation::Initialize => "H",
                Operation::Barrier => "░",
                Operation::Oracle => "O",
                Operation::Diffuser => "D",
                Operation::Measure => "M",
            })
            .collect();
        writeln!(f, "{}", symbols.join(" ─ "))
    }
}

// Keep the Debug impl delegating to Display
impl fmt::Debug for EvolutionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
