//! Python bindings for the PERT engine.

use std::path::PathBuf;

use pyo3::exceptions::{PyOSError, PyValueError};
use pyo3::prelude::*;

use crate::config::PertConfig;
use crate::engine::{PertComputation, PertError};
use crate::layout::DiagramLayout;
use crate::models::{PertResult, TaskEstimate, TaskOutput};
use crate::parser::{self, ParseError};

impl From<PertError> for PyErr {
    fn from(err: PertError) -> PyErr {
        match &err {
            PertError::Parse(ParseError::FileNotFound { .. } | ParseError::Io { .. }) => {
                PyOSError::new_err(err.to_string())
            }
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

/// Run a PERT computation.
///
/// # Arguments
/// * `tasks` - Task estimates, in any order
/// * `target_time` - Optional deadline to compute a completion probability for
/// * `config` - Engine configuration (defaults when omitted)
///
/// # Returns
/// * PertResult with per-task metrics and the critical path
///
/// # Raises
/// * ValueError on invalid input or circular dependencies
#[pyfunction]
#[pyo3(name = "calculate_pert", signature = (tasks, target_time=None, config=None))]
fn py_calculate_pert(
    tasks: Vec<TaskEstimate>,
    target_time: Option<f64>,
    config: Option<PertConfig>,
) -> PyResult<PertResult> {
    let config = config.unwrap_or_default();
    Ok(PertComputation::new(tasks, &config)?.result(target_time)?)
}

/// Lay out the critical path network diagram.
///
/// # Raises
/// * ValueError on invalid input or when a task uses the start node's label
#[pyfunction]
#[pyo3(name = "build_layout", signature = (tasks, config=None))]
fn py_build_layout(tasks: Vec<TaskEstimate>, config: Option<PertConfig>) -> PyResult<DiagramLayout> {
    let config = config.unwrap_or_default();
    Ok(PertComputation::new(tasks, &config)?.layout()?)
}

/// Read task estimates from a JSON file.
///
/// # Raises
/// * OSError if the file cannot be read
/// * ValueError if its contents are not valid task records
#[pyfunction]
#[pyo3(name = "load_tasks")]
fn py_load_tasks(path: PathBuf) -> PyResult<Vec<TaskEstimate>> {
    parser::load_tasks(path).map_err(|e| PertError::from(e).into())
}

/// The pert.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Data types
    m.add_class::<TaskEstimate>()?;
    m.add_class::<TaskOutput>()?;
    m.add_class::<PertResult>()?;
    m.add_class::<DiagramLayout>()?;

    // Config types
    m.add_class::<PertConfig>()?;

    // Algorithms
    m.add_function(wrap_pyfunction!(py_calculate_pert, m)?)?;
    m.add_function(wrap_pyfunction!(py_build_layout, m)?)?;
    m.add_function(wrap_pyfunction!(py_load_tasks, m)?)?;

    Ok(())
}
