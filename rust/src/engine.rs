//! PERT computation context.
//!
//! Chains the pipeline stages over a caller-owned graph:
//! validate → order → forward pass → backward pass → critical path, then
//! answers probability and layout queries from the computed state.

use thiserror::Error;

use crate::backward_pass::backward_pass;
use crate::config::PertConfig;
use crate::critical_path::{analyze_critical_path, CriticalPathSummary};
use crate::forward_pass::forward_pass;
use crate::graph::TaskGraph;
use crate::interner::TaskId;
use crate::layout::{build_layout, DiagramLayout, LayoutError};
use crate::log_stages;
use crate::models::{PertResult, TaskEstimate};
use crate::parser::ParseError;
use crate::probability::{completion_probability, degenerate_probability, ProbabilityError};
use crate::topology::{topological_order, TopologyError};
use crate::validation::ValidationError;

/// Any error a PERT computation can produce.
#[derive(Error, Debug)]
pub enum PertError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Topology(#[from] TopologyError),
    #[error(transparent)]
    Probability(#[from] ProbabilityError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// A fully analyzed task graph.
pub struct PertComputation {
    graph: TaskGraph,
    order: Vec<TaskId>,
    summary: CriticalPathSummary,
    config: PertConfig,
}

impl PertComputation {
    /// Validate the configuration and estimates, then run every scheduling
    /// stage.
    pub fn new(estimates: Vec<TaskEstimate>, config: &PertConfig) -> Result<Self, PertError> {
        config.validate()?;
        let verbosity = config.verbosity;
        log_stages!(verbosity, "PERT: {} tasks", estimates.len());

        let mut graph = TaskGraph::build(estimates)?;
        let order = topological_order(&graph)?;

        forward_pass(&mut graph, &order, verbosity);
        let completion = backward_pass(&mut graph, &order, verbosity);
        log_stages!(verbosity, "Project completion: {}", completion);

        let summary = analyze_critical_path(&mut graph, &order, config);

        Ok(Self {
            graph,
            order,
            summary,
            config: config.clone(),
        })
    }

    pub fn graph(&self) -> &TaskGraph {
        &self.graph
    }

    /// Topological order the passes ran in.
    pub fn order(&self) -> &[TaskId] {
        &self.order
    }

    pub fn summary(&self) -> &CriticalPathSummary {
        &self.summary
    }

    pub fn expected_duration(&self) -> f64 {
        self.summary.expected_duration
    }

    /// Probability of finishing by `target_time`.
    ///
    /// A critical path without variance has a deterministic duration, so the
    /// answer degenerates to 0 or 1 instead of failing.
    pub fn probability(&self, target_time: f64) -> Result<f64, PertError> {
        let expected = self.summary.expected_duration;
        let probability = match completion_probability(&self.graph, expected, target_time) {
            Ok(p) => p,
            Err(ProbabilityError::ZeroVariance { expected_duration }) => {
                log_stages!(
                    self.config.verbosity,
                    "Probability: critical variance is zero, duration {} is certain",
                    expected_duration
                );
                degenerate_probability(expected_duration, target_time)
            }
            Err(e) => return Err(e.into()),
        };
        log_stages!(
            self.config.verbosity,
            "Probability of finishing by {}: {}",
            target_time,
            probability
        );
        Ok(probability)
    }

    /// Build the result record, with a completion probability when a target
    /// time is given.
    pub fn result(&self, target_time: Option<f64>) -> Result<PertResult, PertError> {
        let expected_probability = target_time.map(|t| self.probability(t)).transpose()?;

        Ok(PertResult {
            tasks: self.graph.tasks().iter().map(|t| t.to_output()).collect(),
            critical_path: self.summary.labels(&self.graph),
            expected_duration: self.summary.expected_duration,
            expected_probability,
        })
    }

    /// Lay out the critical path diagram.
    pub fn layout(&self) -> Result<DiagramLayout, PertError> {
        Ok(build_layout(&self.graph, &self.summary, &self.config)?)
    }
}

/// Run a PERT computation and return its result record.
pub fn calculate_pert(
    estimates: Vec<TaskEstimate>,
    target_time: Option<f64>,
    config: &PertConfig,
) -> Result<PertResult, PertError> {
    PertComputation::new(estimates, config)?.result(target_time)
}

/// Run a PERT computation and return the result together with its diagram.
pub fn calculate_pert_with_layout(
    estimates: Vec<TaskEstimate>,
    target_time: Option<f64>,
    config: &PertConfig,
) -> Result<(PertResult, DiagramLayout), PertError> {
    let computation = PertComputation::new(estimates, config)?;
    Ok((computation.result(target_time)?, computation.layout()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::EdgeStyle;

    fn make_task(label: &str, o: f64, m: f64, p: f64, preds: &[&str]) -> TaskEstimate {
        TaskEstimate::new(label, o, m, p, preds.iter().map(|s| s.to_string()).collect())
    }

    fn abc() -> Vec<TaskEstimate> {
        vec![
            make_task("A", 1.0, 2.0, 3.0, &[]),
            make_task("B", 2.0, 4.0, 6.0, &["A"]),
            make_task("C", 1.0, 1.0, 1.0, &["B"]),
        ]
    }

    #[test]
    fn test_abc_scenario() {
        let result = calculate_pert(abc(), None, &PertConfig::default()).unwrap();

        assert_eq!(result.critical_path, ["A", "B", "C"]);
        assert!((result.expected_duration - 7.0).abs() < 1e-9);
        assert_eq!(result.expected_probability, None);

        let a = result.task("A").unwrap();
        assert!((a.expected_duration - 2.0).abs() < 1e-9);
        assert!((a.earliest_finish - 2.0).abs() < 1e-9);
        let b = result.task("B").unwrap();
        assert!((b.earliest_start - 2.0).abs() < 1e-9);
        assert!((b.earliest_finish - 6.0).abs() < 1e-9);
        let c = result.task("C").unwrap();
        assert!((c.earliest_start - 6.0).abs() < 1e-9);
        assert!((c.earliest_finish - 7.0).abs() < 1e-9);
        assert_eq!(c.variance, 0.0);

        for task in &result.tasks {
            assert!(task.critical);
            assert_eq!(task.slack, 0.0);
        }
    }

    #[test]
    fn test_abc_probability() {
        let config = PertConfig::default();
        let result = calculate_pert(abc(), Some(8.0), &config).unwrap();
        let p = result.expected_probability.unwrap();
        assert!((p - 0.910_143_752_560_500).abs() < 1e-9);

        let at_expected = calculate_pert(abc(), Some(7.0), &config).unwrap();
        assert!((at_expected.expected_probability.unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_zero_target_is_a_real_target() {
        let result = calculate_pert(abc(), Some(0.0), &PertConfig::default()).unwrap();
        let p = result.expected_probability.unwrap();
        assert!(p < 1e-9);
    }

    #[test]
    fn test_unsorted_input_matches_sorted() {
        let config = PertConfig::default();
        let sorted = calculate_pert(abc(), None, &config).unwrap();
        let mut reversed = abc();
        reversed.reverse();
        let unsorted = calculate_pert(reversed, None, &config).unwrap();

        assert_eq!(unsorted.critical_path, ["C", "B", "A"]);
        assert_eq!(unsorted.expected_duration, sorted.expected_duration);
        for task in &sorted.tasks {
            let other = unsorted.task(&task.label).unwrap();
            assert_eq!(other.earliest_start, task.earliest_start);
            assert_eq!(other.latest_finish, task.latest_finish);
        }
    }

    #[test]
    fn test_cycle_rejected() {
        let err = calculate_pert(
            vec![
                make_task("a", 1.0, 1.0, 1.0, &["b"]),
                make_task("b", 1.0, 1.0, 1.0, &["a"]),
                make_task("c", 1.0, 1.0, 1.0, &[]),
            ],
            None,
            &PertConfig::default(),
        )
        .unwrap_err();

        match err {
            PertError::Topology(TopologyError::CyclicDependency { tasks }) => {
                assert_eq!(tasks, ["a", "b"]);
            }
            other => panic!("expected cycle, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_predecessor_named() {
        let err = calculate_pert(
            vec![make_task("a", 1.0, 2.0, 3.0, &["ghost"])],
            None,
            &PertConfig::default(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            PertError::Validation(ValidationError::MissingPredecessor { .. })
        ));
        assert_eq!(
            err.to_string(),
            "Predecessor 'ghost' in task 'a' does not exist"
        );
    }

    #[test]
    fn test_zero_variance_recovers() {
        let tasks = || {
            vec![
                make_task("a", 3.0, 3.0, 3.0, &[]),
                make_task("b", 4.0, 4.0, 4.0, &["a"]),
            ]
        };
        let config = PertConfig::default();

        let late = calculate_pert(tasks(), Some(7.0), &config).unwrap();
        assert_eq!(late.expected_probability, Some(1.0));
        let early = calculate_pert(tasks(), Some(6.5), &config).unwrap();
        assert_eq!(early.expected_probability, Some(0.0));
    }

    #[test]
    fn test_invalid_target_rejected() {
        let err = calculate_pert(abc(), Some(f64::INFINITY), &PertConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            PertError::Probability(ProbabilityError::InvalidTargetTime(_))
        ));
    }

    #[test]
    fn test_linear_chain_sums_durations() {
        let result = calculate_pert(
            vec![
                make_task("a", 1.0, 1.0, 1.0, &[]),
                make_task("b", 2.0, 2.0, 2.0, &["a"]),
                make_task("c", 3.0, 3.0, 3.0, &["b"]),
                make_task("d", 4.0, 4.0, 4.0, &["c"]),
            ],
            None,
            &PertConfig::default(),
        )
        .unwrap();

        assert!((result.expected_duration - 10.0).abs() < 1e-9);
        assert_eq!(result.critical_path.len(), 4);
    }

    #[test]
    fn test_with_layout() {
        let (result, layout) =
            calculate_pert_with_layout(abc(), None, &PertConfig::default()).unwrap();

        assert_eq!(result.critical_path, ["A", "B", "C"]);
        assert_eq!(layout.edge_style("start", "A"), Some(EdgeStyle::Solid));
        assert_eq!(layout.edge_style("A", "B"), Some(EdgeStyle::Solid));
        assert_eq!(layout.edge_style("B", "C"), Some(EdgeStyle::Solid));
        assert!(layout.dashed_edges.is_empty());
    }

    #[test]
    fn test_computation_accessors() {
        let computation = PertComputation::new(abc(), &PertConfig::default()).unwrap();
        assert_eq!(computation.order(), &[0, 1, 2]);
        assert_eq!(computation.graph().len(), 3);
        assert_eq!(computation.summary().end_task, Some(2));
        assert!((computation.expected_duration() - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_fractional_chain_end_to_end() {
        let tasks = || {
            vec![
                make_task("t0", 0.1, 0.1, 0.1, &[]),
                make_task("t1", 0.2, 0.2, 0.2, &["t0"]),
                make_task("t2", 0.3, 0.3, 0.3, &["t1"]),
                make_task("t3", 0.7, 0.7, 0.7, &["t2"]),
                make_task("t4", 1.1, 1.1, 1.1, &["t3"]),
            ]
        };
        let (result, layout) =
            calculate_pert_with_layout(tasks(), None, &PertConfig::default()).unwrap();

        assert_eq!(result.critical_path, ["t0", "t1", "t2", "t3", "t4"]);
        assert!((result.expected_duration - 2.4).abs() < 1e-9);
        for task in &result.tasks {
            assert_eq!(task.slack, 0.0);
            assert!(task.earliest_start <= task.latest_start);
        }
        for label in ["t0", "t1", "t2", "t3", "t4", "start"] {
            assert!(layout.position(label).is_some(), "{} missing", label);
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = PertConfig {
            layout_y_damping: 0.0,
            ..PertConfig::default()
        };
        let err = calculate_pert(abc(), None, &config).unwrap_err();
        assert!(matches!(
            err,
            PertError::Validation(ValidationError::InvalidConfig {
                field: "layout_y_damping",
                ..
            })
        ));

        let config = PertConfig {
            critical_tolerance: -1.0,
            ..PertConfig::default()
        };
        assert!(matches!(
            PertComputation::new(abc(), &config),
            Err(PertError::Validation(ValidationError::InvalidConfig { .. }))
        ));
    }
}
