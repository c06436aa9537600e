//! Secret resolution.
//!
//! Turns the variables file into container secret references. Each path is
//! checked for existence once; its ARN is built locally from region and
//! account id rather than read back from SSM.

use tracing::{debug, info};

use crate::core::cloud::{Lookup, ParameterStore, SecretReference};
use crate::core::config::EnvConfig;
use crate::core::naming;
use crate::error::{Result, SecretError};

/// Resolves parameter paths for one account and region.
#[derive(Debug, Clone)]
pub struct SecretResolver {
    region: String,
    account_id: String,
}

impl SecretResolver {
    pub fn new(region: impl Into<String>, account_id: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            account_id: account_id.into(),
        }
    }

    /// Resolve one variable.
    ///
    /// # Errors
    ///
    /// Returns `SecretError::ParameterNotFound` if `path` doesn't exist, or
    /// the store's own error if the lookup fails.
    pub fn resolve(
        &self,
        store: &dyn ParameterStore,
        name: &str,
        path: &str,
    ) -> Result<SecretReference> {
        match store.find_parameter(path)? {
            Lookup::Found(()) => {
                let value_from = naming::parameter_arn(&self.region, &self.account_id, path);
                debug!(name = %name, arn = %value_from, "resolved secret");
                Ok(SecretReference {
                    name: name.to_string(),
                    value_from,
                })
            }
            Lookup::Missing => Err(SecretError::ParameterNotFound {
                name: name.to_string(),
                path: path.to_string(),
            }
            .into()),
        }
    }

    /// Resolve every variable in name order, stopping at the first missing path.
    pub fn resolve_all(
        &self,
        store: &dyn ParameterStore,
        config: &EnvConfig,
    ) -> Result<Vec<SecretReference>> {
        let secrets = config
            .iter()
            .map(|(name, path)| self.resolve(store, name, path))
            .collect::<Result<Vec<_>>>()?;
        info!(count = secrets.len(), "secrets resolved");
        Ok(secrets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cloud::mock::{MockCloud, ACCOUNT, REGION};
    use crate::error::Error;
    use std::collections::BTreeMap;

    fn resolver() -> SecretResolver {
        SecretResolver::new(REGION, ACCOUNT)
    }

    #[test]
    fn test_resolve_existing_parameter() {
        let cloud = MockCloud::new().with_parameter("/prod/db_pass");

        let secret = resolver()
            .resolve(&cloud, "DB_PASS", "/prod/db_pass")
            .unwrap();

        assert_eq!(secret.name, "DB_PASS");
        assert_eq!(
            secret.value_from,
            "arn:aws:ssm:us-east-1:123456789012:parameter/prod/db_pass"
        );
    }

    #[test]
    fn test_resolve_parameter_given_as_arn() {
        let arn = "arn:aws:ssm:us-west-2:999999999999:parameter/shared/api_key";
        let cloud = MockCloud::new().with_parameter(arn);

        let secret = resolver().resolve(&cloud, "API_KEY", arn).unwrap();

        assert_eq!(secret.value_from, arn);
    }

    #[test]
    fn test_resolve_makes_single_lookup() {
        let cloud = MockCloud::new().with_parameter("/prod/db_pass");

        resolver()
            .resolve(&cloud, "DB_PASS", "/prod/db_pass")
            .unwrap();

        assert_eq!(*cloud.calls.borrow(), vec!["GetParameter"]);
    }

    #[test]
    fn test_resolve_missing_parameter() {
        let cloud = MockCloud::new();

        let err = resolver()
            .resolve(&cloud, "DB_PASS", "/prod/missing")
            .unwrap_err();

        match err {
            Error::Secret(SecretError::ParameterNotFound { name, path }) => {
                assert_eq!(name, "DB_PASS");
                assert_eq!(path, "/prod/missing");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_resolve_all_stops_at_first_missing() {
        let cloud = MockCloud::new().with_parameter("/a");
        let mut vars = BTreeMap::new();
        vars.insert("A".to_string(), "/a".to_string());
        vars.insert("B".to_string(), "/b".to_string());
        vars.insert("C".to_string(), "/c".to_string());

        let err = resolver()
            .resolve_all(&cloud, &EnvConfig::new(vars))
            .unwrap_err();

        assert!(matches!(err, Error::Secret(_)));
        assert_eq!(cloud.count("GetParameter"), 2);
    }

    #[test]
    fn test_resolve_all_in_name_order() {
        let cloud = MockCloud::new().with_parameter("/z").with_parameter("/a");
        let mut vars = BTreeMap::new();
        vars.insert("ZETA".to_string(), "/z".to_string());
        vars.insert("ALPHA".to_string(), "/a".to_string());

        let secrets = resolver()
            .resolve_all(&cloud, &EnvConfig::new(vars))
            .unwrap();

        let names: Vec<_> = secrets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["ALPHA", "ZETA"]);
    }

    #[test]
    fn test_transport_error_propagates() {
        let cloud = MockCloud::new().failing_on("GetParameter");

        let err = resolver().resolve(&cloud, "A", "/a").unwrap_err();
        assert!(matches!(err, Error::Aws(_)));
    }
}
