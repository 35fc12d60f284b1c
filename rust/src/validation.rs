//! Input validation for task estimates.
//!
//! Every check runs before the graph is built, so no pass ever sees a
//! malformed task set.

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::models::TaskEstimate;

/// Reasons a task set is rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("No tasks supplied")]
    EmptyTaskSet,
    #[error("Task label must not be empty")]
    EmptyLabel,
    #[error("Task '{task}' has invalid {field}: {value} (must be a positive number)")]
    InvalidEstimate {
        task: String,
        field: &'static str,
        value: f64,
    },
    #[error("Task '{task}' cannot be its own predecessor")]
    SelfDependency { task: String },
    #[error("Task '{task}' lists predecessor '{predecessor}' more than once")]
    DuplicatePredecessor { task: String, predecessor: String },
    #[error("Duplicate task label '{task}'")]
    DuplicateLabel { task: String },
    #[error("Predecessor '{predecessor}' in task '{task}' does not exist")]
    MissingPredecessor { task: String, predecessor: String },
    #[error("Invalid configuration {field}: {value}")]
    InvalidConfig { field: &'static str, value: f64 },
}

/// Check a single record in isolation.
///
/// Covers everything that can be decided without seeing the other tasks:
/// label presence, estimate positivity and self-dependency.
pub fn validate_estimate(estimate: &TaskEstimate) -> Result<(), ValidationError> {
    if estimate.label.is_empty() {
        return Err(ValidationError::EmptyLabel);
    }

    let fields = [
        ("optimistic_estimate", estimate.optimistic_estimate),
        ("most_likely_estimate", estimate.most_likely_estimate),
        ("pessimistic_estimate", estimate.pessimistic_estimate),
    ];
    for (field, value) in fields {
        // NaN fails this comparison too
        if !(value.is_finite() && value > 0.0) {
            return Err(ValidationError::InvalidEstimate {
                task: estimate.label.clone(),
                field,
                value,
            });
        }
    }

    let mut seen: FxHashSet<&str> = FxHashSet::default();
    for predecessor in &estimate.predecessors {
        if *predecessor == estimate.label {
            return Err(ValidationError::SelfDependency {
                task: estimate.label.clone(),
            });
        }
        if !seen.insert(predecessor.as_str()) {
            return Err(ValidationError::DuplicatePredecessor {
                task: estimate.label.clone(),
                predecessor: predecessor.clone(),
            });
        }
    }

    Ok(())
}

/// Check a whole task set: every record, label uniqueness, and that every
/// predecessor reference resolves to a task in the set.
pub fn validate_task_set(estimates: &[TaskEstimate]) -> Result<(), ValidationError> {
    if estimates.is_empty() {
        return Err(ValidationError::EmptyTaskSet);
    }

    let mut labels: FxHashSet<&str> =
        FxHashSet::with_capacity_and_hasher(estimates.len(), Default::default());
    for estimate in estimates {
        validate_estimate(estimate)?;
        if !labels.insert(estimate.label.as_str()) {
            return Err(ValidationError::DuplicateLabel {
                task: estimate.label.clone(),
            });
        }
    }

    for estimate in estimates {
        for predecessor in &estimate.predecessors {
            if !labels.contains(predecessor.as_str()) {
                return Err(ValidationError::MissingPredecessor {
                    task: estimate.label.clone(),
                    predecessor: predecessor.clone(),
                });
            }
        }
    }

    Ok(())
}
