//! Verbosity-gated logging macros for the PERT pipeline.
//!
//! Logging compiles down to a single integer comparison when disabled.
//! Levels:
//! - 0: SILENT (nothing)
//! - 1: STAGES (one line per pipeline stage)
//! - 2: TASKS (per-task timing updates inside the passes)
//! - 3: DEBUG (layout placement and edge rerouting)

/// Verbosity level constants.
pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_STAGES: u8 = 1;
pub const VERBOSITY_TASKS: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Log at STAGES level (verbosity >= 1).
///
/// Used for: stage summaries, project completion, critical path, probability.
#[macro_export]
macro_rules! log_stages {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_STAGES {
            eprintln!($($arg)*);
        }
    };
}

/// Log at TASKS level (verbosity >= 2).
///
/// Used for: earliest/latest time updates of individual tasks.
#[macro_export]
macro_rules! log_tasks {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_TASKS {
            eprintln!($($arg)*);
        }
    };
}

/// Log at DEBUG level (verbosity >= 3).
///
/// Used for: diagram node placement and edge classification.
#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DEBUG {
            eprintln!($($arg)*);
        }
    };
}
