//! PERT/CPM scheduling engine.
//!
//! Computes expected durations, earliest/latest times, slack and the critical
//! path of a task network, the probability of finishing by a target time, and
//! a positioned network diagram of the critical path.

// Allow clippy warning triggered by PyO3 macro expansion
#![cfg_attr(feature = "python", allow(clippy::useless_conversion))]

pub mod logging;

pub mod backward_pass;
pub mod config;
pub mod critical_path;
pub mod engine;
pub mod forward_pass;
pub mod graph;
pub mod interner;
pub mod layout;
pub mod models;
pub mod parser;
pub mod probability;
pub mod topology;
pub mod validation;

#[cfg(feature = "python")]
mod python;

pub use config::PertConfig;
pub use engine::{calculate_pert, calculate_pert_with_layout, PertComputation, PertError};
pub use layout::{build_layout, DiagramLayout, EdgeStyle, LayoutError};
pub use models::{PertResult, TaskEstimate, TaskOutput};
pub use parser::{load_tasks, parse_tasks, ParseError};
pub use probability::ProbabilityError;
pub use topology::TopologyError;
pub use validation::ValidationError;
