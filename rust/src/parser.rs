//! JSON decoding of task estimates.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::TaskEstimate;
use crate::validation::{validate_estimate, ValidationError};

/// Errors from reading task input.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Task file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },
    #[error("Failed to read task file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid task JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Decode a JSON array of task records.
///
/// Each record is checked on its own (label, estimates, self-dependency).
/// Cross-record checks such as missing predecessors happen when the graph
/// is built.
pub fn parse_tasks(json: &str) -> Result<Vec<TaskEstimate>, ParseError> {
    let estimates: Vec<TaskEstimate> = serde_json::from_str(json)?;
    for estimate in &estimates {
        validate_estimate(estimate)?;
    }
    Ok(estimates)
}

/// Read and decode a JSON task file.
pub fn load_tasks(path: impl AsRef<Path>) -> Result<Vec<TaskEstimate>, ParseError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ParseError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ParseError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    parse_tasks(&contents)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const ABC: &str = r#"[
        {"label": "A", "optimistic_estimate": 1, "most_likely_estimate": 2, "pessimistic_estimate": 3},
        {"label": "B", "name": "Build", "optimistic_estimate": 2, "most_likely_estimate": 4,
         "pessimistic_estimate": 6, "predecessors": ["A"]},
        {"label": "C", "optimistic_estimate": 1, "most_likely_estimate": 1,
         "pessimistic_estimate": 1, "predecessors": null}
    ]"#;

    #[test]
    fn test_parse_tasks() {
        let tasks = parse_tasks(ABC).unwrap();
        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[1].name.as_deref(), Some("Build"));
        assert_eq!(tasks[1].predecessors, vec!["A".to_string()]);
        assert!(tasks[2].predecessors.is_empty());
        assert!((tasks[0].expected_duration() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(parse_tasks("[{"), Err(ParseError::Json(_))));
        assert!(matches!(
            parse_tasks(r#"[{"label": "a"}]"#),
            Err(ParseError::Json(_))
        ));
    }

    #[test]
    fn test_record_validation() {
        let json = r#"[{"label": "a", "optimistic_estimate": 0, "most_likely_estimate": 1,
                        "pessimistic_estimate": 2}]"#;
        match parse_tasks(json) {
            Err(ParseError::Validation(ValidationError::InvalidEstimate { task, field, .. })) => {
                assert_eq!(task, "a");
                assert_eq!(field, "optimistic_estimate");
            }
            other => panic!("expected invalid estimate, got {:?}", other),
        }

        let json = r#"[{"label": "a", "optimistic_estimate": 1, "most_likely_estimate": 1,
                        "pessimistic_estimate": 1, "predecessors": ["a"]}]"#;
        assert!(matches!(
            parse_tasks(json),
            Err(ParseError::Validation(ValidationError::SelfDependency { .. }))
        ));
    }

    #[test]
    fn test_load_tasks_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(ABC.as_bytes()).unwrap();
        let tasks = load_tasks(file.path()).unwrap();
        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[0].label, "A");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        match load_tasks(&path) {
            Err(ParseError::FileNotFound { path: missing }) => assert_eq!(missing, path),
            other => panic!("expected file not found, got {:?}", other),
        }
    }

    #[test]
    fn test_load_invalid_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{\"label\": \"a\"}").unwrap();
        assert!(matches!(load_tasks(file.path()), Err(ParseError::Json(_))));
    }
}
