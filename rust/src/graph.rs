//! Task arena and dependency adjacency.

use std::ops::Range;

use crate::interner::{LabelInterner, TaskId};
use crate::models::{TaskEstimate, TaskOutput};
use crate::validation::{validate_task_set, ValidationError};

/// Slack value of a task the critical path analyzer has not visited yet.
pub const UNCOMPUTED_SLACK: f64 = -1.0;

/// A task plus the metrics derived from it during a computation.
#[derive(Clone, Debug)]
pub struct Task {
    pub estimate: TaskEstimate,
    pub expected_duration: f64,
    pub variance: f64,
    pub earliest_start: f64,
    pub earliest_finish: f64,
    pub latest_start: f64,
    pub latest_finish: f64,
    pub slack: f64,
    /// `None` until slack has been computed.
    pub critical: Option<bool>,
    /// Declared predecessors, resolved to arena ids.
    pub predecessors: Vec<TaskId>,
    /// Tasks naming this one as a predecessor, in input order.
    pub successors: Vec<TaskId>,
}

impl Task {
    fn new(estimate: TaskEstimate) -> Self {
        Self {
            expected_duration: estimate.expected_duration(),
            variance: estimate.variance(),
            estimate,
            earliest_start: 0.0,
            earliest_finish: 0.0,
            latest_start: 0.0,
            latest_finish: 0.0,
            slack: UNCOMPUTED_SLACK,
            critical: None,
            predecessors: Vec::new(),
            successors: Vec::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.estimate.label
    }

    pub fn is_source(&self) -> bool {
        self.predecessors.is_empty()
    }

    pub fn is_sink(&self) -> bool {
        self.successors.is_empty()
    }

    pub fn is_critical(&self) -> bool {
        self.critical.unwrap_or(false)
    }

    pub fn to_output(&self) -> TaskOutput {
        TaskOutput {
            label: self.estimate.label.clone(),
            name: self.estimate.name.clone(),
            expected_duration: self.expected_duration,
            variance: self.variance,
            earliest_start: self.earliest_start,
            earliest_finish: self.earliest_finish,
            latest_start: self.latest_start,
            latest_finish: self.latest_finish,
            slack: self.slack,
            critical: self.is_critical(),
        }
    }
}

/// Insertion-ordered set of tasks with resolved predecessor/successor links.
///
/// A task's id is its position in the input sequence.
#[derive(Clone, Debug)]
pub struct TaskGraph {
    tasks: Vec<Task>,
    index: LabelInterner,
}

impl TaskGraph {
    /// Validate the estimates and build the graph.
    pub fn build(estimates: Vec<TaskEstimate>) -> Result<Self, ValidationError> {
        validate_task_set(&estimates)?;

        let mut index = LabelInterner::with_capacity(estimates.len());
        let mut tasks = Vec::with_capacity(estimates.len());
        for estimate in estimates {
            if index.insert_new(&estimate.label).is_none() {
                return Err(ValidationError::DuplicateLabel {
                    task: estimate.label,
                });
            }
            tasks.push(Task::new(estimate));
        }

        for id in 0..tasks.len() {
            let mut predecessors = Vec::with_capacity(tasks[id].estimate.predecessors.len());
            for label in &tasks[id].estimate.predecessors {
                let pred = index
                    .get(label)
                    .ok_or_else(|| ValidationError::MissingPredecessor {
                        task: tasks[id].estimate.label.clone(),
                        predecessor: label.clone(),
                    })?;
                predecessors.push(pred);
            }
            for &pred in &predecessors {
                tasks[pred as usize].successors.push(id as TaskId);
            }
            tasks[id].predecessors = predecessors;
        }

        Ok(Self { tasks, index })
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    #[inline]
    pub fn task(&self, id: TaskId) -> &Task {
        &self.tasks[id as usize]
    }

    #[inline]
    pub fn task_mut(&mut self, id: TaskId) -> &mut Task {
        &mut self.tasks[id as usize]
    }

    /// Tasks in input order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn tasks_mut(&mut self) -> &mut [Task] {
        &mut self.tasks
    }

    pub fn id_of(&self, label: &str) -> Option<TaskId> {
        self.index.get(label)
    }

    pub fn get(&self, label: &str) -> Option<&Task> {
        self.id_of(label).map(|id| self.task(id))
    }

    pub fn label(&self, id: TaskId) -> &str {
        self.task(id).label()
    }

    /// Arena ids in input order.
    pub fn ids(&self) -> Range<TaskId> {
        0..self.tasks.len() as TaskId
    }
}
