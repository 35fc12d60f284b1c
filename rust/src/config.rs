//! Configuration for the PERT engine.

#[cfg(feature = "python")]
use pyo3::prelude::*;

use crate::validation::ValidationError;

/// Default relative slack tolerance. Absorbs floating-point residue from the
/// forward and backward passes.
pub const DEFAULT_CRITICAL_TOLERANCE: f64 = 1e-9;

/// Knobs for a PERT computation and its diagram layout.
#[cfg_attr(feature = "python", pyclass(get_all, set_all))]
#[derive(Clone, Debug, PartialEq)]
pub struct PertConfig {
    /// Verbosity level: 0=silent, 1=stages, 2=tasks, 3=debug.
    pub verbosity: u8,
    /// Largest |slack| still treated as zero, relative to the project
    /// duration (scaled by `max(1, |duration|)`). 0.0 keeps exact equality.
    pub critical_tolerance: f64,
    /// Horizontal distance between consecutive critical tasks in the diagram.
    pub layout_x_step: f64,
    /// Divisor applied to a branch's vertical offset when contracting x.
    pub layout_y_damping: f64,
    /// Label of the synthetic node the diagram starts from.
    pub start_label: String,
}

impl Default for PertConfig {
    fn default() -> Self {
        Self {
            verbosity: 0,
            critical_tolerance: DEFAULT_CRITICAL_TOLERANCE,
            layout_x_step: 3.0,
            layout_y_damping: 20.0,
            start_label: "start".to_string(),
        }
    }
}

impl PertConfig {
    /// Absolute slack threshold for a project of the given duration.
    pub fn slack_threshold(&self, project_duration: f64) -> f64 {
        self.critical_tolerance * project_duration.abs().max(1.0)
    }

    /// Whether a slack value counts as zero for a project of the given
    /// duration.
    pub fn is_zero_slack(&self, slack: f64, project_duration: f64) -> bool {
        slack.abs() <= self.slack_threshold(project_duration)
    }

    /// Reject settings that would make criticality or layout meaningless.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.critical_tolerance.is_finite() && self.critical_tolerance >= 0.0) {
            return Err(ValidationError::InvalidConfig {
                field: "critical_tolerance",
                value: self.critical_tolerance,
            });
        }
        let positive = [
            ("layout_x_step", self.layout_x_step),
            ("layout_y_damping", self.layout_y_damping),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ValidationError::InvalidConfig { field, value });
            }
        }
        Ok(())
    }
}

#[cfg(feature = "python")]
#[pymethods]
impl PertConfig {
    #[new]
    #[pyo3(signature = (
        verbosity=None,
        critical_tolerance=None,
        layout_x_step=None,
        layout_y_damping=None,
        start_label=None
    ))]
    fn new(
        verbosity: Option<u8>,
        critical_tolerance: Option<f64>,
        layout_x_step: Option<f64>,
        layout_y_damping: Option<f64>,
        start_label: Option<String>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            verbosity: verbosity.unwrap_or(defaults.verbosity),
            critical_tolerance: critical_tolerance.unwrap_or(defaults.critical_tolerance),
            layout_x_step: layout_x_step.unwrap_or(defaults.layout_x_step),
            layout_y_damping: layout_y_damping.unwrap_or(defaults.layout_y_damping),
            start_label: start_label.unwrap_or(defaults.start_label),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "PertConfig(verbosity={}, critical_tolerance={}, start_label={:?})",
            self.verbosity, self.critical_tolerance, self.start_label
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = PertConfig::default();
        assert_eq!(config.verbosity, 0);
        assert_eq!(config.critical_tolerance, DEFAULT_CRITICAL_TOLERANCE);
        assert!((config.layout_x_step - 3.0).abs() < 1e-9);
        assert!((config.layout_y_damping - 20.0).abs() < 1e-9);
        assert_eq!(config.start_label, "start");
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_default_tolerance_absorbs_residue() {
        let config = PertConfig::default();
        assert!(config.is_zero_slack(0.0, 10.0));
        assert!(config.is_zero_slack(-4.440_892_098_500_626e-16, 14.67));
        assert!(!config.is_zero_slack(1e-6, 14.67));
    }

    #[test]
    fn test_tolerance_scales_with_duration() {
        let config = PertConfig::default();
        // Short projects use an absolute floor of the tolerance itself
        assert!((config.slack_threshold(0.5) - 1e-9).abs() < 1e-24);
        assert!((config.slack_threshold(-2000.0) - 2e-6).abs() < 1e-18);
        assert!(config.is_zero_slack(1e-6, 2000.0));
        assert!(!config.is_zero_slack(1e-6, 10.0));
    }

    #[test]
    fn test_exact_equality_when_tolerance_zero() {
        let config = PertConfig {
            critical_tolerance: 0.0,
            ..PertConfig::default()
        };
        assert!(config.is_zero_slack(0.0, 100.0));
        assert!(config.is_zero_slack(-0.0, 100.0));
        assert!(!config.is_zero_slack(1e-15, 100.0));
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let cases = [
            (
                PertConfig {
                    critical_tolerance: -1e-9,
                    ..PertConfig::default()
                },
                "critical_tolerance",
            ),
            (
                PertConfig {
                    critical_tolerance: f64::NAN,
                    ..PertConfig::default()
                },
                "critical_tolerance",
            ),
            (
                PertConfig {
                    layout_y_damping: 0.0,
                    ..PertConfig::default()
                },
                "layout_y_damping",
            ),
            (
                PertConfig {
                    layout_y_damping: f64::NAN,
                    ..PertConfig::default()
                },
                "layout_y_damping",
            ),
            (
                PertConfig {
                    layout_x_step: f64::INFINITY,
                    ..PertConfig::default()
                },
                "layout_x_step",
            ),
        ];
        for (config, expected) in cases {
            match config.validate() {
                Err(ValidationError::InvalidConfig { field, .. }) => assert_eq!(field, expected),
                other => panic!("expected {} to be rejected, got {:?}", expected, other),
            }
        }
    }
}
