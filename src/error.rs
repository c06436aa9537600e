//! Error types.
//!
//! Every fallible operation returns [`Result`]. Domain failures are grouped
//! into sub-enums so `main` can attach a hint to the ones a user can fix.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Secret(#[from] SecretError),

    #[error(transparent)]
    Aws(#[from] AwsError),

    #[error("json serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures loading the variables file or the AWS environment.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    #[error("{} has no top-level 'variables' mapping", path.display())]
    MissingVariables { path: PathBuf },

    #[error("no AWS region configured")]
    MissingRegion,

    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Rejected user input.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("invalid project name '{name}': {reason}")]
    InvalidProject { name: String, reason: String },

    #[error("invalid variable name '{name}': {reason}")]
    InvalidVariable { name: String, reason: String },

    #[error("invalid parameter path for '{name}': {reason}")]
    InvalidPath { name: String, reason: String },

    #[error("--{flag} must list at least one value")]
    EmptyList { flag: &'static str },
}

/// Secret resolution failures.
#[derive(Error, Debug)]
pub enum SecretError {
    #[error("parameter '{path}' (for {name}) does not exist in Parameter Store")]
    ParameterNotFound { name: String, path: String },
}

/// A remote call failed.
#[derive(Error, Debug)]
pub enum AwsError {
    #[error("{operation} failed: {message}")]
    Request {
        operation: &'static str,
        message: String,
    },

    #[error("{operation} returned no {field}")]
    MissingField {
        operation: &'static str,
        field: &'static str,
    },
}

impl AwsError {
    /// Wrap any displayable SDK error for `operation`.
    pub fn request(operation: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Request {
            operation,
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_variables_message_names_file() {
        let err: Error = ConfigError::MissingVariables {
            path: PathBuf::from("env.yml"),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "env.yml has no top-level 'variables' mapping"
        );
    }

    #[test]
    fn test_parameter_not_found_names_path() {
        let err: Error = SecretError::ParameterNotFound {
            name: "DB_PASS".to_string(),
            path: "/prod/db_pass".to_string(),
        }
        .into();
        let msg = err.to_string();
        assert!(msg.contains("/prod/db_pass"));
        assert!(msg.contains("DB_PASS"));
    }

    #[test]
    fn test_aws_request_wraps_message() {
        let err = AwsError::request("CreateService", "access denied");
        assert_eq!(err.to_string(), "CreateService failed: access denied");
    }
}
