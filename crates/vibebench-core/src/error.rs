//! Error types and exit codes for vibebench
//!
//! Exit codes:
//! - 0: Success (including "nothing to do" outcomes)
//! - 1: Generic failure (I/O)
//! - 2: Usage error (bad flags/args, invalid configuration values)
//! - 3: Data error (unparsable result documents, merge conflicts)

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - malformed input documents, conflicting cells (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur while aggregating benchmark results
#[derive(Error, Debug)]
pub enum BenchError {
    // Usage errors (exit code 2)
    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    #[error("invalid pricing file {path:?}: {source}")]
    InvalidPricing {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    // Data errors (exit code 3)
    #[error("failed to parse result document {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(
        "conflicting {field} for case {case}, model {model}: {first:?} and {second:?} both provide a value"
    )]
    Conflict {
        field: String,
        case: String,
        model: String,
        first: PathBuf,
        second: PathBuf,
    },

    // Generic failures (exit code 1)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to {operation} {target}: {reason}")]
    FailedOperationWithTarget {
        operation: String,
        target: String,
        reason: String,
    },

    #[error("{0}")]
    Other(String),
}

impl BenchError {
    /// Create an error for a failed IO operation with context
    pub fn io_operation(
        operation: &str,
        path: impl std::fmt::Display,
        error: impl std::fmt::Display,
    ) -> Self {
        BenchError::FailedOperationWithTarget {
            operation: operation.to_string(),
            target: path.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        BenchError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            BenchError::UsageError(_)
            | BenchError::InvalidValue { .. }
            | BenchError::InvalidPricing { .. } => ExitCode::Usage,

            BenchError::Parse { .. } | BenchError::Conflict { .. } => ExitCode::Data,

            BenchError::Json(_)
            | BenchError::FailedOperationWithTarget { .. }
            | BenchError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            BenchError::UsageError(_) => "usage_error",
            BenchError::InvalidValue { .. } => "invalid_value",
            BenchError::InvalidPricing { .. } => "invalid_pricing",
            BenchError::Parse { .. } => "parse_error",
            BenchError::Conflict { .. } => "conflict",
            BenchError::Json(_) => "json_error",
            BenchError::FailedOperationWithTarget { .. } => "failed_operation_with_target",
            BenchError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        let mut error_obj = serde_json::json!({
            "code": self.exit_code() as i32,
            "type": self.error_type(),
            "message": self.to_string(),
        });

        match self {
            BenchError::Parse { path, .. } | BenchError::InvalidPricing { path, .. } => {
                error_obj["path"] = serde_json::json!(path.display().to_string());
            }
            BenchError::Conflict {
                case,
                model,
                first,
                second,
                ..
            } => {
                error_obj["case"] = serde_json::json!(case);
                error_obj["model"] = serde_json::json!(model);
                error_obj["files"] = serde_json::json!([
                    first.display().to_string(),
                    second.display().to_string()
                ]);
            }
            _ => {}
        }

        serde_json::json!({ "error": error_obj })
    }
}

/// Result type alias for vibebench operations
pub type Result<T> = std::result::Result<T, BenchError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_error(path: &str) -> BenchError {
        let source = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        BenchError::Parse {
            path: PathBuf::from(path),
            source,
        }
    }

    #[test]
    fn test_parse_error_is_data_error() {
        let err = parse_error("runs/a_results.json");
        assert_eq!(err.exit_code(), ExitCode::Data);
        assert!(err.to_string().contains("a_results.json"));
    }

    #[test]
    fn test_conflict_json_envelope() {
        let err = BenchError::Conflict {
            field: "absolute score".to_string(),
            case: "case_01".to_string(),
            model: "openai/gpt-5.2".to_string(),
            first: PathBuf::from("a_results.json"),
            second: PathBuf::from("b_results.json"),
        };
        let json = err.to_json();
        assert_eq!(json["error"]["code"], 3);
        assert_eq!(json["error"]["type"], "conflict");
        assert_eq!(json["error"]["case"], "case_01");
        assert_eq!(json["error"]["files"][1], "b_results.json");
    }

    #[test]
    fn test_usage_errors_exit_two() {
        assert_eq!(
            BenchError::UsageError("missing -o".to_string()).exit_code(),
            ExitCode::Usage
        );
        assert_eq!(
            BenchError::invalid_value("conflict policy", "sometimes").exit_code(),
            ExitCode::Usage
        );
    }

    #[test]
    fn test_io_error_is_generic_failure() {
        let err = BenchError::io_operation(
            "read",
            "runs/a_results.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert_eq!(err.exit_code(), ExitCode::Failure);
        assert_eq!(err.to_json()["error"]["type"], "failed_operation_with_target");
        assert!(err.to_string().contains("runs/a_results.json"));
    }
}
