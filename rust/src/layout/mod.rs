//! Network diagram of the critical path.

mod builder;
mod diagram;

pub use builder::{build_layout, LayoutError};
pub use diagram::{DiagramGraph, DiagramLayout, EdgeStyle, NodeId};
