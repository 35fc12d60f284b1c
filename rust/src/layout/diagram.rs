//! Arena representation of a network diagram.

#[cfg(feature = "python")]
use pyo3::prelude::*;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::interner::TaskId;

/// Diagram node id (index into the node table).
pub type NodeId = u32;

/// How an edge is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeStyle {
    /// Binding dependency.
    Solid,
    /// Non-binding dependency (a dummy activity in diagram terms).
    Dashed,
}

#[derive(Clone, Debug)]
struct DiagramNode {
    label: String,
    /// `None` for synthetic nodes.
    task: Option<TaskId>,
    position: (f64, f64),
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct DiagramEdge {
    from: NodeId,
    to: NodeId,
    style: EdgeStyle,
}

/// Mutable diagram under construction: node table plus tagged edge list.
#[derive(Clone, Debug, Default)]
pub struct DiagramGraph {
    nodes: Vec<DiagramNode>,
    edges: Vec<DiagramEdge>,
}

impl DiagramGraph {
    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            edges: Vec::with_capacity(nodes * 2),
        }
    }

    pub fn add_node(&mut self, label: &str, task: Option<TaskId>, position: (f64, f64)) -> NodeId {
        let id = self.nodes.len() as NodeId;
        self.nodes.push(DiagramNode {
            label: label.to_string(),
            task,
            position,
        });
        id
    }

    pub fn position(&self, node: NodeId) -> (f64, f64) {
        self.nodes[node as usize].position
    }

    pub fn task(&self, node: NodeId) -> Option<TaskId> {
        self.nodes[node as usize].task
    }

    pub fn style(&self, from: NodeId, to: NodeId) -> Option<EdgeStyle> {
        self.edges
            .iter()
            .find(|e| e.from == from && e.to == to)
            .map(|e| e.style)
    }

    /// Add an edge. Re-adding an existing edge never clears a dashed tag.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, style: EdgeStyle) {
        match self.edges.iter_mut().find(|e| e.from == from && e.to == to) {
            Some(edge) => {
                if style == EdgeStyle::Dashed {
                    edge.style = EdgeStyle::Dashed;
                }
            }
            None => self.edges.push(DiagramEdge { from, to, style }),
        }
    }

    pub fn remove_edge(&mut self, from: NodeId, to: NodeId) -> bool {
        let before = self.edges.len();
        self.edges.retain(|e| !(e.from == from && e.to == to));
        self.edges.len() != before
    }

    /// Mark an existing edge dashed. Returns false if there is no such edge.
    pub fn demote(&mut self, from: NodeId, to: NodeId) -> bool {
        match self.edges.iter_mut().find(|e| e.from == from && e.to == to) {
            Some(edge) => {
                edge.style = EdgeStyle::Dashed;
                true
            }
            None => false,
        }
    }

    /// Sources of all edges ending at `to`, in insertion order.
    pub fn incoming(&self, to: NodeId) -> Vec<NodeId> {
        self.edges
            .iter()
            .filter(|e| e.to == to)
            .map(|e| e.from)
            .collect()
    }

    /// Move every incoming edge of `to` (except one from `via`) so that it
    /// ends at `via` instead, drawn dashed.
    pub fn reroute_incoming(&mut self, to: NodeId, via: NodeId) -> Vec<NodeId> {
        let sources: Vec<NodeId> = self
            .incoming(to)
            .into_iter()
            .filter(|&from| from != via)
            .collect();
        for &from in &sources {
            self.remove_edge(from, to);
            self.add_edge(from, via, EdgeStyle::Dashed);
        }
        sources
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Freeze into the output record.
    pub fn into_layout(self) -> DiagramLayout {
        let mut positions =
            FxHashMap::with_capacity_and_hasher(self.nodes.len(), Default::default());
        for node in &self.nodes {
            positions.insert(node.label.clone(), node.position);
        }

        let mut solid_edges = Vec::new();
        let mut dashed_edges = Vec::new();
        for edge in &self.edges {
            let pair = (
                self.nodes[edge.from as usize].label.clone(),
                self.nodes[edge.to as usize].label.clone(),
            );
            match edge.style {
                EdgeStyle::Solid => solid_edges.push(pair),
                EdgeStyle::Dashed => dashed_edges.push(pair),
            }
        }

        DiagramLayout {
            nodes: self.nodes.into_iter().map(|n| n.label).collect(),
            positions,
            solid_edges,
            dashed_edges,
        }
    }
}

/// Positioned network diagram of the critical path and its branches.
#[cfg_attr(feature = "python", pyclass(get_all))]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagramLayout {
    /// Node labels in placement order, including the synthetic start node.
    pub nodes: Vec<String>,
    pub positions: FxHashMap<String, (f64, f64)>,
    pub solid_edges: Vec<(String, String)>,
    pub dashed_edges: Vec<(String, String)>,
}

impl DiagramLayout {
    pub fn position(&self, label: &str) -> Option<(f64, f64)> {
        self.positions.get(label).copied()
    }

    pub fn edge_style(&self, from: &str, to: &str) -> Option<EdgeStyle> {
        let matches = |edges: &[(String, String)]| edges.iter().any(|(a, b)| a == from && b == to);
        if matches(&self.dashed_edges) {
            Some(EdgeStyle::Dashed)
        } else if matches(&self.solid_edges) {
            Some(EdgeStyle::Solid)
        } else {
            None
        }
    }

    /// All edges with their style, solid first.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, EdgeStyle)> {
        let solid = self
            .solid_edges
            .iter()
            .map(|(a, b)| (a.as_str(), b.as_str(), EdgeStyle::Solid));
        let dashed = self
            .dashed_edges
            .iter()
            .map(|(a, b)| (a.as_str(), b.as_str(), EdgeStyle::Dashed));
        solid.chain(dashed)
    }

    /// Split `edges` into (solid, dashed): an edge is dashed iff this layout
    /// drew it dashed.
    pub fn partition_edges(
        &self,
        edges: &[(String, String)],
    ) -> (Vec<(String, String)>, Vec<(String, String)>) {
        edges
            .iter()
            .cloned()
            .partition(|(from, to)| self.edge_style(from, to) != Some(EdgeStyle::Dashed))
    }
}

#[cfg(feature = "python")]
#[pymethods]
impl DiagramLayout {
    #[pyo3(name = "edge_style")]
    fn py_edge_style(&self, from: &str, to: &str) -> Option<&'static str> {
        self.edge_style(from, to).map(|style| match style {
            EdgeStyle::Solid => "solid",
            EdgeStyle::Dashed => "dashed",
        })
    }

    fn __repr__(&self) -> String {
        format!(
            "DiagramLayout(nodes={}, solid_edges={}, dashed_edges={})",
            self.nodes.len(),
            self.solid_edges.len(),
            self.dashed_edges.len()
        )
    }
}
