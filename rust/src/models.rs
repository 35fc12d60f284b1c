//! Input and output records of the PERT engine.

#[cfg(feature = "python")]
use pyo3::prelude::*;
use serde::{Deserialize, Deserializer, Serialize};

/// A task with a three-point duration estimate and its predecessors.
#[cfg_attr(feature = "python", pyclass(get_all, set_all))]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskEstimate {
    pub label: String,
    #[serde(default)]
    pub name: Option<String>,
    pub optimistic_estimate: f64,
    pub most_likely_estimate: f64,
    pub pessimistic_estimate: f64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub predecessors: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl TaskEstimate {
    pub fn new(
        label: impl Into<String>,
        optimistic: f64,
        most_likely: f64,
        pessimistic: f64,
        predecessors: Vec<String>,
    ) -> Self {
        Self {
            label: label.into(),
            name: None,
            optimistic_estimate: optimistic,
            most_likely_estimate: most_likely,
            pessimistic_estimate: pessimistic,
            predecessors,
        }
    }

    /// Beta-distribution mean: (O + 4M + P) / 6.
    pub fn expected_duration(&self) -> f64 {
        (self.optimistic_estimate + 4.0 * self.most_likely_estimate + self.pessimistic_estimate)
            / 6.0
    }

    /// ((P - O) / 6)^2
    pub fn variance(&self) -> f64 {
        let spread = (self.pessimistic_estimate - self.optimistic_estimate) / 6.0;
        spread * spread
    }
}

#[cfg(feature = "python")]
#[pymethods]
impl TaskEstimate {
    #[new]
    #[pyo3(signature = (
        label,
        optimistic_estimate,
        most_likely_estimate,
        pessimistic_estimate,
        predecessors=None,
        name=None
    ))]
    fn py_new(
        label: String,
        optimistic_estimate: f64,
        most_likely_estimate: f64,
        pessimistic_estimate: f64,
        predecessors: Option<Vec<String>>,
        name: Option<String>,
    ) -> Self {
        Self {
            label,
            name,
            optimistic_estimate,
            most_likely_estimate,
            pessimistic_estimate,
            predecessors: predecessors.unwrap_or_default(),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "TaskEstimate(label={:?}, estimates=({}, {}, {}), predecessors={:?})",
            self.label,
            self.optimistic_estimate,
            self.most_likely_estimate,
            self.pessimistic_estimate,
            self.predecessors
        )
    }
}

/// Computed schedule metrics for one task.
#[cfg_attr(feature = "python", pyclass(get_all))]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskOutput {
    pub label: String,
    pub name: Option<String>,
    pub expected_duration: f64,
    pub variance: f64,
    pub earliest_start: f64,
    pub earliest_finish: f64,
    pub latest_start: f64,
    pub latest_finish: f64,
    pub slack: f64,
    pub critical: bool,
}

#[cfg(feature = "python")]
#[pymethods]
impl TaskOutput {
    fn __repr__(&self) -> String {
        format!(
            "TaskOutput(label={:?}, es={}, ef={}, ls={}, lf={}, slack={}, critical={})",
            self.label,
            self.earliest_start,
            self.earliest_finish,
            self.latest_start,
            self.latest_finish,
            self.slack,
            self.critical
        )
    }
}

/// Result of a PERT computation.
#[cfg_attr(feature = "python", pyclass(get_all))]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PertResult {
    /// Per-task metrics in input order.
    pub tasks: Vec<TaskOutput>,
    /// Labels of critical tasks in input order.
    pub critical_path: Vec<String>,
    pub expected_duration: f64,
    /// Probability of finishing by the requested target time, if one was given.
    pub expected_probability: Option<f64>,
}

impl PertResult {
    /// Look up the metrics of a task by label.
    pub fn task(&self, label: &str) -> Option<&TaskOutput> {
        self.tasks.iter().find(|t| t.label == label)
    }
}

#[cfg(feature = "python")]
#[pymethods]
impl PertResult {
    #[pyo3(name = "task")]
    fn py_task(&self, label: &str) -> Option<TaskOutput> {
        self.task(label).cloned()
    }

    fn __repr__(&self) -> String {
        format!(
            "PertResult(tasks={}, critical_path={:?}, expected_duration={}, expected_probability={:?})",
            self.tasks.len(),
            self.critical_path,
            self.expected_duration,
            self.expected_probability
        )
    }
}
