//! Label interning for the task arena.
//!
//! Task labels are mapped to dense integer ids in insertion order, so the id
//! of a task is also its position in the input sequence.

use rustc_hash::FxHashMap;

/// Interned task id (index into the task arena).
pub type TaskId = u32;

/// Maps task labels to arena ids.
#[derive(Debug, Clone, Default)]
pub struct LabelInterner {
    to_id: FxHashMap<String, TaskId>,
}

impl LabelInterner {
    /// Create an interner with room for `capacity` labels.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            to_id: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Intern a label that must not have been seen before.
    ///
    /// Returns `None` when the label is already present, leaving the
    /// interner unchanged.
    pub fn insert_new(&mut self, label: &str) -> Option<TaskId> {
        if self.to_id.contains_key(label) {
            return None;
        }
        let id = self.to_id.len() as TaskId;
        self.to_id.insert(label.to_string(), id);
        Some(id)
    }

    #[inline]
    pub fn get(&self, label: &str) -> Option<TaskId> {
        self.to_id.get(label).copied()
    }

    pub fn len(&self) -> usize {
        self.to_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.to_id.is_empty()
    }
}
