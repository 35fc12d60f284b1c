//! Topological ordering of the task graph.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::graph::TaskGraph;
use crate::interner::TaskId;

/// Error types for topological ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopologyError {
    /// The dependency graph contains a cycle; lists every task that could
    /// not be ordered, in input order.
    CyclicDependency { tasks: Vec<String> },
}

impl std::fmt::Display for TopologyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TopologyError::CyclicDependency { tasks } => {
                write!(
                    f,
                    "Circular dependency detected among tasks: {}",
                    tasks.join(", ")
                )
            }
        }
    }
}

impl std::error::Error for TopologyError {}

/// Order tasks so every predecessor comes before its successors.
///
/// Kahn's algorithm with ties broken by input position: when the input is
/// already a valid topological order, it is returned unchanged.
pub fn topological_order(graph: &TaskGraph) -> Result<Vec<TaskId>, TopologyError> {
    let mut in_degree: Vec<usize> = graph.tasks().iter().map(|t| t.predecessors.len()).collect();

    let mut ready: BinaryHeap<Reverse<TaskId>> = graph
        .ids()
        .filter(|&id| in_degree[id as usize] == 0)
        .map(Reverse)
        .collect();

    let mut order: Vec<TaskId> = Vec::with_capacity(graph.len());

    while let Some(Reverse(id)) = ready.pop() {
        order.push(id);

        for &succ in &graph.task(id).successors {
            let degree = &mut in_degree[succ as usize];
            *degree -= 1;
            if *degree == 0 {
                ready.push(Reverse(succ));
            }
        }
    }

    if order.len() != graph.len() {
        let tasks = graph
            .ids()
            .filter(|&id| in_degree[id as usize] > 0)
            .map(|id| graph.label(id).to_string())
            .collect();
        return Err(TopologyError::CyclicDependency { tasks });
    }

    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskEstimate;

    fn make_graph(edges: &[(&str, &[&str])]) -> TaskGraph {
        TaskGraph::build(
            edges
                .iter()
                .map(|(label, preds)| {
                    TaskEstimate::new(
                        *label,
                        1.0,
                        1.0,
                        1.0,
                        preds.iter().map(|p| p.to_string()).collect(),
                    )
                })
                .collect(),
        )
        .unwrap()
    }

    fn labels(graph: &TaskGraph, order: &[TaskId]) -> Vec<String> {
        order.iter().map(|&id| graph.label(id).to_string()).collect()
    }

    #[test]
    fn test_sorted_input_preserved() {
        let graph = make_graph(&[("a", &[]), ("b", &["a"]), ("c", &[]), ("d", &["b", "c"])]);
        let order = topological_order(&graph).unwrap();
        assert_eq!(labels(&graph, &order), ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_unsorted_input_reordered() {
        // d is listed first but depends on everything else
        let graph = make_graph(&[("d", &["b", "c"]), ("c", &["a"]), ("b", &["a"]), ("a", &[])]);
        let order = topological_order(&graph).unwrap();
        assert_eq!(labels(&graph, &order), ["a", "c", "b", "d"]);
    }

    #[test]
    fn test_cycle_detected() {
        let graph = make_graph(&[("a", &[]), ("b", &["a", "c"]), ("c", &["b"]), ("d", &["c"])]);
        let err = topological_order(&graph).unwrap_err();
        assert_eq!(
            err,
            TopologyError::CyclicDependency {
                tasks: vec!["b".to_string(), "c".to_string(), "d".to_string()]
            }
        );
        assert!(err.to_string().contains("b, c, d"));
    }
}
