//! Critical-path diagram layout.
//!
//! Critical tasks are laid out left to right on the row y = 0. Starting from
//! them, the builder walks successors breadth-first and fans non-critical
//! branches out above and below that row. Where several paths merge into one
//! task, only the path that actually determines the task's earliest start is
//! drawn solid; the others become dashed links.
//!
//! The placement rules are a heuristic: they depend on the traversal order
//! and do not guarantee a non-overlapping drawing.

use std::collections::VecDeque;

use thiserror::Error;

use crate::config::PertConfig;
use crate::critical_path::CriticalPathSummary;
use crate::graph::TaskGraph;
use crate::interner::TaskId;
use crate::{log_debug, log_stages};

use super::diagram::{DiagramGraph, DiagramLayout, EdgeStyle, NodeId};

/// Errors that can occur while laying out the diagram.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Task label '{0}' collides with the diagram start node")]
    ReservedLabel(String),
    #[error("No critical tasks to lay out")]
    NoCriticalTasks,
}

struct LayoutBuilder<'a> {
    graph: &'a TaskGraph,
    config: &'a PertConfig,
    diagram: DiagramGraph,
    /// Diagram node of each task, once placed.
    placed: Vec<Option<NodeId>>,
    queue: VecDeque<TaskId>,
    /// Largest finish/start gap still treated as simultaneous.
    tolerance: f64,
}

impl<'a> LayoutBuilder<'a> {
    fn new(graph: &'a TaskGraph, config: &'a PertConfig, project_duration: f64) -> Self {
        Self {
            graph,
            config,
            diagram: DiagramGraph::with_capacity(graph.len() + 1),
            placed: vec![None; graph.len()],
            queue: VecDeque::with_capacity(graph.len()),
            tolerance: config.slack_threshold(project_duration),
        }
    }

    fn place(&mut self, id: TaskId, position: (f64, f64)) -> NodeId {
        let node = self
            .diagram
            .add_node(self.graph.label(id), Some(id), position);
        self.placed[id as usize] = Some(node);
        self.queue.push_back(id);
        log_debug!(
            self.config.verbosity,
            "Layout: place {} at ({:.2}, {:.2})",
            self.graph.label(id),
            position.0,
            position.1
        );
        node
    }

    fn seed(&mut self, critical_tasks: &[TaskId]) -> Result<(), LayoutError> {
        let step = self.config.layout_x_step;
        let mut x = 0.0;
        for &id in critical_tasks {
            self.place(id, (x, 0.0));
            x += step;
        }

        let first = critical_tasks
            .first()
            .and_then(|&id| self.placed[id as usize])
            .ok_or(LayoutError::NoCriticalTasks)?;
        let start = self
            .diagram
            .add_node(&self.config.start_label, None, (-step, 0.0));
        self.diagram.add_edge(start, first, EdgeStyle::Solid);
        Ok(())
    }

    fn run(&mut self, end_task: TaskId) {
        let graph = self.graph;
        while let Some(id) = self.queue.pop_front() {
            let Some(current) = self.placed[id as usize] else {
                continue;
            };
            let successors = &graph.task(id).successors;

            if successors.is_empty() {
                if id != end_task {
                    if let Some(end) = self.placed[end_task as usize] {
                        self.diagram.add_edge(current, end, EdgeStyle::Solid);
                    }
                }
                continue;
            }

            let (parent_x, parent_y) = self.diagram.position(current);
            let fan_out = successors.len();
            let mut offset = if fan_out > 1 {
                (fan_out as f64).log2().floor()
            } else {
                parent_y
            };

            for &succ in successors {
                match self.placed[succ as usize] {
                    None => {
                        let y = offset;
                        if fan_out > 1 {
                            offset -= 1.0;
                            // Row 0 belongs to the critical path
                            if offset == 0.0 {
                                offset -= 1.0;
                            }
                        }
                        let x = parent_x * (1.0 - y / self.config.layout_y_damping)
                            + self.config.layout_x_step;
                        let node = self.place(succ, (x, y));
                        self.diagram.add_edge(current, node, EdgeStyle::Solid);
                    }
                    Some(node) => self.merge(id, current, succ, node),
                }
            }
        }
    }

    /// Connect `id` to a successor that is already on the diagram.
    fn merge(&mut self, id: TaskId, current: NodeId, succ: TaskId, succ_node: NodeId) {
        let graph = self.graph;
        let task = graph.task(id);
        let next = graph.task(succ);
        let verbosity = self.config.verbosity;
        let gap = task.earliest_finish - next.earliest_start;

        if gap > self.tolerance {
            // This path arrives last: it becomes the binding one.
            let moved = self.diagram.reroute_incoming(succ_node, current);
            self.diagram.add_edge(current, succ_node, EdgeStyle::Solid);
            log_debug!(
                verbosity,
                "Layout: {} binds {}, rerouted {} edge(s)",
                task.label(),
                next.label(),
                moved.len()
            );
        } else if gap < -self.tolerance {
            let targets: Vec<NodeId> = next
                .predecessors
                .iter()
                .copied()
                .filter(|&p| p != id && graph.task(p).is_critical())
                .filter_map(|p| self.placed[p as usize])
                .collect();

            if targets.is_empty() {
                self.diagram.add_edge(current, succ_node, EdgeStyle::Dashed);
            }
            for target in targets {
                self.diagram.add_edge(current, target, EdgeStyle::Dashed);
            }
            log_debug!(
                verbosity,
                "Layout: {} finishes before {} starts, linked dashed",
                task.label(),
                next.label()
            );
        } else {
            if !task.is_critical() {
                for source in self.diagram.incoming(succ_node) {
                    let from_critical = self
                        .diagram
                        .task(source)
                        .is_some_and(|p| graph.task(p).is_critical());
                    if from_critical {
                        self.diagram.demote(source, succ_node);
                    }
                }
            }
            self.diagram.add_edge(current, succ_node, EdgeStyle::Solid);
        }
    }
}

/// Lay out the critical path of a computed graph.
///
/// `summary` must come from [`crate::critical_path::analyze_critical_path`]
/// on the same graph.
pub fn build_layout(
    graph: &TaskGraph,
    summary: &CriticalPathSummary,
    config: &PertConfig,
) -> Result<DiagramLayout, LayoutError> {
    if graph.id_of(&config.start_label).is_some() {
        return Err(LayoutError::ReservedLabel(config.start_label.clone()));
    }
    let end_task = summary.end_task.ok_or(LayoutError::NoCriticalTasks)?;

    let mut builder = LayoutBuilder::new(graph, config, summary.expected_duration);
    builder.seed(&summary.critical_tasks)?;
    builder.run(end_task);

    log_stages!(
        config.verbosity,
        "Layout: {} nodes, {} edges",
        builder.diagram.node_count(),
        builder.diagram.edge_count()
    );

    Ok(builder.diagram.into_layout())
}
