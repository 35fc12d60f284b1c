//! Slack, critical flags and the critical path.

use crate::backward_pass::project_completion;
use crate::config::PertConfig;
use crate::graph::TaskGraph;
use crate::interner::TaskId;
use crate::log_stages;

/// Outcome of critical path analysis.
#[derive(Clone, Debug, PartialEq)]
pub struct CriticalPathSummary {
    /// Critical tasks in input order.
    pub critical_tasks: Vec<TaskId>,
    /// Last task of the topological order. Always a sink.
    pub terminal: Option<TaskId>,
    /// Last critical task of the topological order; the diagram's end node.
    pub end_task: Option<TaskId>,
    /// Latest finish of the terminal task.
    pub expected_duration: f64,
}

impl CriticalPathSummary {
    pub fn labels(&self, graph: &TaskGraph) -> Vec<String> {
        self.critical_tasks
            .iter()
            .map(|&id| graph.label(id).to_string())
            .collect()
    }

    pub fn is_critical(&self, id: TaskId) -> bool {
        self.critical_tasks.contains(&id)
    }
}

/// Compute slack and critical flags, and collect the critical path.
///
/// Requires both passes to have run. A task is critical when its slack is
/// zero under `config.critical_tolerance`, scaled by the project duration.
/// Critical tasks get exactly zero slack, with latest times pulled onto
/// their earliest times, so rounding residue from the passes never shows up
/// as negative slack.
pub fn analyze_critical_path(
    graph: &mut TaskGraph,
    order: &[TaskId],
    config: &PertConfig,
) -> CriticalPathSummary {
    let completion = project_completion(graph);

    let mut critical_tasks = Vec::new();
    for id in graph.ids() {
        let task = graph.task_mut(id);
        let slack = task.latest_start - task.earliest_start;
        let critical = config.is_zero_slack(slack, completion);
        if critical {
            task.slack = 0.0;
            task.latest_start = task.earliest_start;
            task.latest_finish = task.earliest_finish;
            critical_tasks.push(id);
        } else {
            task.slack = slack;
        }
        task.critical = Some(critical);
    }

    let terminal = order.last().copied();
    let end_task = order
        .iter()
        .rev()
        .copied()
        .find(|&id| graph.task(id).is_critical());
    let expected_duration = terminal
        .map(|id| graph.task(id).latest_finish)
        .unwrap_or(0.0);

    let summary = CriticalPathSummary {
        critical_tasks,
        terminal,
        end_task,
        expected_duration,
    };

    log_stages!(
        config.verbosity,
        "Critical path: [{}], expected duration {}",
        summary.labels(graph).join(", "),
        expected_duration
    );

    summary
}
