//! Forward pass: earliest start and finish times.

use crate::graph::TaskGraph;
use crate::interner::TaskId;
use crate::log_tasks;

/// Compute earliest start/finish for every task.
///
/// The project starts at time 0, so sources finish after their own expected
/// duration. Every other task starts once its latest-finishing predecessor
/// is done. `order` must be a topological order of `graph`.
pub fn forward_pass(graph: &mut TaskGraph, order: &[TaskId], verbosity: u8) {
    for task in graph.tasks_mut() {
        task.earliest_start = 0.0;
        task.earliest_finish = if task.is_source() {
            task.expected_duration
        } else {
            0.0
        };
    }

    for &id in order {
        let finish = graph.task(id).earliest_finish;
        let successors = graph.task(id).successors.clone();

        for succ in successors {
            let next = graph.task_mut(succ);
            if next.earliest_start < finish {
                next.earliest_start = finish;
            }
            next.earliest_finish = next.earliest_start + next.expected_duration;
        }

        log_tasks!(
            verbosity,
            "Forward: {} ES={} EF={}",
            graph.label(id),
            graph.task(id).earliest_start,
            finish
        );
    }
}
