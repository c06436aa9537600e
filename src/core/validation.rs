//! Input validation for deployment parameters.
//!
//! Validates project names, variable names, parameter paths and list flags
//! before any remote call is made.

use crate::core::constants;
use crate::error::{Result, ValidationError};

/// Validate a project name.
///
/// The project name becomes part of the target group name, which ELBv2 limits
/// to 32 characters of ASCII alphanumerics and hyphens, with no leading or
/// trailing hyphen.
///
/// # Errors
///
/// Returns `ValidationError::InvalidProject` if the derived names would be rejected.
pub fn validate_project(name: &str) -> Result<()> {
    let invalid = |reason: String| -> crate::error::Error {
        ValidationError::InvalidProject {
            name: name.to_string(),
            reason,
        }
        .into()
    };

    if name.is_empty() {
        return Err(invalid("cannot be empty".to_string()));
    }

    if name.starts_with('-') || name.ends_with('-') {
        return Err(invalid("cannot start or end with a hyphen".to_string()));
    }

    if let Some(ch) = name
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && *c != '-')
    {
        return Err(invalid(format!(
            "invalid character '{}'. Only A-Z, a-z, 0-9, and hyphen are allowed",
            ch
        )));
    }

    let max = constants::MAX_TARGET_GROUP_NAME - constants::TARGET_GROUP_SUFFIX.len();
    if name.len() > max {
        return Err(invalid(format!(
            "too long ({} characters, max {})",
            name.len(),
            max
        )));
    }

    Ok(())
}

/// Validate an environment variable name.
///
/// Variable names must be valid environment variable names:
/// - Only A-Z, a-z, 0-9, and underscore
/// - Cannot start with a digit
/// - Cannot be empty
///
/// # Errors
///
/// Returns `ValidationError::InvalidVariable` if the name is invalid.
pub fn validate_variable(name: &str) -> Result<()> {
    let invalid = |reason: String| -> crate::error::Error {
        ValidationError::InvalidVariable {
            name: name.to_string(),
            reason,
        }
        .into()
    };

    if name.is_empty() {
        return Err(invalid("cannot be empty".to_string()));
    }

    if name.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(invalid("cannot start with a digit".to_string()));
    }

    for (i, ch) in name.chars().enumerate() {
        if !ch.is_ascii_alphanumeric() && ch != '_' {
            return Err(invalid(format!(
                "invalid character '{}' at position {}",
                ch,
                i + 1
            )));
        }
    }

    Ok(())
}

/// Validate a Parameter Store path mapped to `name`.
///
/// # Errors
///
/// Returns `ValidationError::InvalidPath` for empty paths or paths with whitespace.
pub fn validate_path(name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ValidationError::InvalidPath {
            name: name.to_string(),
            reason: "path is empty".to_string(),
        }
        .into());
    }

    if path.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidPath {
            name: name.to_string(),
            reason: format!("'{}' contains whitespace", path),
        }
        .into());
    }

    Ok(())
}

/// Split a comma-separated flag value into trimmed, non-empty entries.
///
/// # Errors
///
/// Returns `ValidationError::EmptyList` if no entries remain.
pub fn split_list(flag: &'static str, raw: &str) -> Result<Vec<String>> {
    let items: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if items.is_empty() {
        return Err(ValidationError::EmptyList { flag }.into());
    }

    Ok(items)
}
