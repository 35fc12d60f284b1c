//! Backward pass: latest start and finish times.

use crate::graph::TaskGraph;
use crate::interner::TaskId;
use crate::log_tasks;

/// Project completion time: the latest earliest-finish among sink tasks.
pub fn project_completion(graph: &TaskGraph) -> f64 {
    graph
        .tasks()
        .iter()
        .filter(|t| t.is_sink())
        .map(|t| t.earliest_finish)
        .fold(0.0, f64::max)
}

/// Compute latest start/finish for every task.
///
/// Every sink must finish by the project completion time. Walking the
/// topological order backwards, each predecessor's latest finish is pulled
/// down to the earliest latest-start among its successors.
///
/// # Arguments
/// * `graph` - Task graph whose forward pass has already run
/// * `order` - Topological order of `graph`
/// * `verbosity` - Logging level
///
/// # Returns
/// * The project completion time
pub fn backward_pass(graph: &mut TaskGraph, order: &[TaskId], verbosity: u8) -> f64 {
    let completion = project_completion(graph);

    // Sinks are pinned to completion; everyone else waits for a successor.
    let mut assigned: Vec<bool> = Vec::with_capacity(graph.len());
    for task in graph.tasks_mut() {
        if task.is_sink() {
            task.latest_finish = completion;
            task.latest_start = completion - task.expected_duration;
        } else {
            task.latest_finish = 0.0;
            task.latest_start = 0.0;
        }
        assigned.push(task.is_sink());
    }

    for &id in order.iter().rev() {
        let start = graph.task(id).latest_start;
        let predecessors = graph.task(id).predecessors.clone();

        for pred in predecessors {
            let prev = graph.task_mut(pred);
            if !assigned[pred as usize] || prev.latest_finish > start {
                prev.latest_finish = start;
                assigned[pred as usize] = true;
            }
            prev.latest_start = prev.latest_finish - prev.expected_duration;
        }

        log_tasks!(
            verbosity,
            "Backward: {} LS={} LF={}",
            graph.label(id),
            start,
            graph.task(id).latest_finish
        );
    }

    completion
}
