//! Variables file loading.
//!
//! The variables file is a YAML document mapping container environment
//! variables to Parameter Store paths:
//!
//! ```yaml
//! variables:
//!   DATABASE_URL: /prod/shop/database_url
//!   API_KEY: /prod/shop/api_key
//! ```

use serde_yaml_ng::Value;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

use crate::core::constants;
use crate::core::types::{ParameterPath, VariableName};
use crate::core::validation;
use crate::error::{ConfigError, Result};

/// Environment variable to parameter path mapping, loaded once per run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvConfig {
    variables: BTreeMap<VariableName, ParameterPath>,
}

impl EnvConfig {
    /// Build a config from an in-memory mapping.
    pub fn new(variables: BTreeMap<VariableName, ParameterPath>) -> Self {
        Self { variables }
    }

    /// Load and validate the variables file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` if the file can't be read,
    /// `ConfigError::Parse` if it isn't valid YAML or the mapping holds
    /// non-string values, `ConfigError::MissingVariables` if the top-level
    /// key is absent, and a `ValidationError` for bad names or paths.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading variables file");

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::parse(path, &contents)?;
        debug!(variables = config.len(), "variables file loaded");
        Ok(config)
    }

    /// Parse file contents. `path` is only used for error messages.
    pub fn parse(path: &Path, contents: &str) -> Result<Self> {
        let parse_err = |source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        };

        if contents.trim().is_empty() {
            return Err(ConfigError::MissingVariables {
                path: path.to_path_buf(),
            }
            .into());
        }

        let doc: Value = serde_yaml_ng::from_str(contents).map_err(parse_err)?;
        let section = match doc.get(constants::VARIABLES_KEY) {
            Some(v) if !v.is_null() => v.clone(),
            _ => {
                return Err(ConfigError::MissingVariables {
                    path: path.to_path_buf(),
                }
                .into())
            }
        };

        let variables: BTreeMap<VariableName, ParameterPath> =
            serde_yaml_ng::from_value(section).map_err(parse_err)?;

        let config = Self { variables };
        config.validate()?;
        Ok(config)
    }

    /// Check every variable name and path.
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` encountered.
    pub fn validate(&self) -> Result<()> {
        for (name, path) in &self.variables {
            validation::validate_variable(name)?;
            validation::validate_path(name, path)?;
        }
        Ok(())
    }

    /// Iterate variables in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.variables
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}
