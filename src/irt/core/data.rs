//! Experiment and condition capabilities plus a minimal owned carrier.
//!
//! Purpose
//! -------
//! Describe what the 3PL model reads from the outside world: an ordered
//! sequence of conditions, each reporting how many trials were answered
//! correctly and incorrectly. How those counts were produced (signal
//! detection tallies, raw trial logs, ...) is the caller's business.
//!
//! Key behaviors
//! -------------
//! - [`Condition`] and [`Experiment`] are the capability traits. Both are
//!   object safe so heterogeneous callers can hand the model a
//!   `&dyn Experiment`.
//! - [`ConditionCounts`] / [`ExperimentData`] are a small owned carrier that
//!   implements the traits, used by the Python bindings and by dynamic
//!   (`Any`-typed) construction.
//! - [`ExperimentSummary`] aggregates counts over **all** conditions.
//!
//! Invariants & assumptions
//! ------------------------
//! - `total_trial_count() == correct_trial_count() + incorrect_trial_count()`
//!   for every condition; the default method enforces it by construction.
//! - Conditions are addressed by 0-based index in experiment order; the
//!   i-th condition pairs with the i-th default difficulty.
//! - Emptiness is not rejected here. The model constructor owns that rule so
//!   that a capability failure and an empty experiment stay distinguishable.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the default total, blanket impls for slices, vectors
//!   and references, and summary aggregation.

/// Per-condition response counts.
pub trait Condition {
    fn correct_trial_count(&self) -> u64;
    fn incorrect_trial_count(&self) -> u64;

    fn total_trial_count(&self) -> u64 {
        self.correct_trial_count() + self.incorrect_trial_count()
    }
}

/// Ordered, index-addressable collection of conditions.
///
/// `condition(i)` returns `None` only for `i >= condition_count()`.
pub trait Experiment {
    fn condition_count(&self) -> usize;
    fn condition(&self, index: usize) -> Option<&dyn Condition>;
}

/// Iterate the conditions of `experiment` in order.
pub fn conditions<E: Experiment + ?Sized>(experiment: &E) -> impl Iterator<Item = &dyn Condition> {
    (0..experiment.condition_count()).filter_map(move |i| experiment.condition(i))
}

impl<C: Condition + ?Sized> Condition for &C {
    fn correct_trial_count(&self) -> u64 {
        (**self).correct_trial_count()
    }

    fn incorrect_trial_count(&self) -> u64 {
        (**self).incorrect_trial_count()
    }

    fn total_trial_count(&self) -> u64 {
        (**self).total_trial_count()
    }
}

impl<E: Experiment + ?Sized> Experiment for &E {
    fn condition_count(&self) -> usize {
        (**self).condition_count()
    }

    fn condition(&self, index: usize) -> Option<&dyn Condition> {
        (**self).condition(index)
    }
}

impl<C: Condition> Experiment for [C] {
    fn condition_count(&self) -> usize {
        self.len()
    }

    fn condition(&self, index: usize) -> Option<&dyn Condition> {
        self.get(index).map(|c| c as &dyn Condition)
    }
}

impl<C: Condition> Experiment for Vec<C> {
    fn condition_count(&self) -> usize {
        self.len()
    }

    fn condition(&self, index: usize) -> Option<&dyn Condition> {
        self.as_slice().condition(index)
    }
}

/// `ConditionCounts`: correct / incorrect tallies for one condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionCounts {
    pub correct: u64,
    pub incorrect: u64,
}

impl ConditionCounts {
    pub fn new(correct: u64, incorrect: u64) -> Self {
        Self { correct, incorrect }
    }
}

impl Condition for ConditionCounts {
    fn correct_trial_count(&self) -> u64 {
        self.correct
    }

    fn incorrect_trial_count(&self) -> u64 {
        self.incorrect
    }
}

/// `ExperimentData`: owned, ordered list of [`ConditionCounts`].
///
/// Purpose
/// -------
/// Carrier for experiments that arrive without a Rust type of their own:
/// Python objects after the capability check, or values recovered from
/// `&dyn Any`. Typed Rust callers can keep their own types and implement
/// [`Experiment`] directly instead.
///
/// Notes
/// -----
/// - No validation happens here; an empty `ExperimentData` is
///   representable and rejected later by the model constructor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExperimentData {
    pub conditions: Vec<ConditionCounts>,
}

impl ExperimentData {
    pub fn new(conditions: Vec<ConditionCounts>) -> Self {
        Self { conditions }
    }

    /// Snapshot any experiment into an owned carrier.
    pub fn from_experiment<E: Experiment + ?Sized>(experiment: &E) -> Self {
        let conditions = conditions(experiment)
            .map(|c| ConditionCounts::new(c.correct_trial_count(), c.incorrect_trial_count()))
            .collect();
        Self { conditions }
    }
}

impl FromIterator<(u64, u64)> for ExperimentData {
    fn from_iter<I: IntoIterator<Item = (u64, u64)>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|(c, i)| ConditionCounts::new(c, i)).collect())
    }
}

impl Experiment for ExperimentData {
    fn condition_count(&self) -> usize {
        self.conditions.len()
    }

    fn condition(&self, index: usize) -> Option<&dyn Condition> {
        self.conditions.get(index).map(|c| c as &dyn Condition)
    }
}

/// Totals over every condition of an experiment (no truncation).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExperimentSummary {
    pub n_total: u64,
    pub n_correct: u64,
    pub n_incorrect: u64,
    pub n_conditions: usize,
}

impl ExperimentSummary {
    pub fn from_experiment<E: Experiment + ?Sized>(experiment: &E) -> Self {
        let mut summary = Self {
            n_total: 0,
            n_correct: 0,
            n_incorrect: 0,
            n_conditions: experiment.condition_count(),
        };
        for condition in conditions(experiment) {
            summary.n_total += condition.total_trial_count();
            summary.n_correct += condition.correct_trial_count();
            summary.n_incorrect += condition.incorrect_trial_count();
        }
        summary
    }
}
