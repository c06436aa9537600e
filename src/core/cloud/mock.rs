//! In-memory cloud for unit tests.
//!
//! Records every call so tests can assert exactly which remote operations a
//! step performed. Not thread-safe, and doesn't need to be.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};

use super::{
    Cloud, IdentityService, LoadBalancing, Lookup, Orchestrator, ParameterStore, ServiceSpec,
    ServiceState, ServiceUpdate, TargetGroupSpec, TaskDefinitionSpec,
};
use crate::core::types::{AccountId, Arn};
use crate::error::{AwsError, Result};

pub const ACCOUNT: &str = "123456789012";
pub const REGION: &str = "us-east-1";

#[derive(Default)]
pub struct MockCloud {
    parameters: BTreeSet<String>,
    target_groups: RefCell<BTreeMap<String, Arn>>,
    service: RefCell<Option<ServiceState>>,
    fail_on: Option<&'static str>,
    revision: Cell<u32>,

    /// Every operation name, in call order.
    pub calls: RefCell<Vec<&'static str>>,
    pub target_group_creates: RefCell<Vec<TargetGroupSpec>>,
    pub registrations: RefCell<Vec<TaskDefinitionSpec>>,
    pub service_creates: RefCell<Vec<ServiceSpec>>,
    pub service_updates: RefCell<Vec<ServiceUpdate>>,
}

impl MockCloud {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `path` exist in the parameter store.
    pub fn with_parameter(mut self, path: &str) -> Self {
        self.parameters.insert(path.to_string());
        self
    }

    pub fn with_target_group(self, name: &str, arn: &str) -> Self {
        self.target_groups
            .borrow_mut()
            .insert(name.to_string(), arn.to_string());
        self
    }

    /// Seed an existing service with the given status.
    pub fn with_service(self, name: &str, status: &str) -> Self {
        *self.service.borrow_mut() = Some(ServiceState {
            arn: Some(service_arn(name)),
            status: status.to_string(),
        });
        self
    }

    /// Fail the named operation with a request error.
    pub fn failing_on(mut self, operation: &'static str) -> Self {
        self.fail_on = Some(operation);
        self
    }

    pub fn count(&self, operation: &str) -> usize {
        self.calls.borrow().iter().filter(|c| **c == operation).count()
    }

    fn record(&self, operation: &'static str) -> Result<()> {
        self.calls.borrow_mut().push(operation);
        if self.fail_on == Some(operation) {
            return Err(AwsError::request(operation, "injected failure").into());
        }
        Ok(())
    }
}

fn service_arn(name: &str) -> Arn {
    format!("arn:aws:ecs:{}:{}:service/cluster/{}", REGION, ACCOUNT, name)
}

impl IdentityService for MockCloud {
    fn account_id(&self) -> Result<AccountId> {
        self.record("GetCallerIdentity")?;
        Ok(ACCOUNT.to_string())
    }
}

impl ParameterStore for MockCloud {
    fn find_parameter(&self, path: &str) -> Result<Lookup<()>> {
        self.record("GetParameter")?;
        if self.parameters.contains(path) {
            Ok(Lookup::Found(()))
        } else {
            Ok(Lookup::Missing)
        }
    }
}

impl LoadBalancing for MockCloud {
    fn find_target_group(&self, name: &str) -> Result<Lookup<Arn>> {
        self.record("DescribeTargetGroups")?;
        Ok(self
            .target_groups
            .borrow()
            .get(name)
            .cloned()
            .map_or(Lookup::Missing, Lookup::Found))
    }

    fn create_target_group(&self, spec: &TargetGroupSpec) -> Result<Arn> {
        self.record("CreateTargetGroup")?;
        let arn = format!(
            "arn:aws:elasticloadbalancing:{}:{}:targetgroup/{}/0123456789abcdef",
            REGION, ACCOUNT, spec.name
        );
        self.target_groups
            .borrow_mut()
            .insert(spec.name.clone(), arn.clone());
        self.target_group_creates.borrow_mut().push(spec.clone());
        Ok(arn)
    }
}

impl Orchestrator for MockCloud {
    fn register_task_definition(&self, spec: &TaskDefinitionSpec) -> Result<Arn> {
        self.record("RegisterTaskDefinition")?;
        let revision = self.revision.get() + 1;
        self.revision.set(revision);
        self.registrations.borrow_mut().push(spec.clone());
        Ok(format!(
            "arn:aws:ecs:{}:{}:task-definition/{}:{}",
            REGION, ACCOUNT, spec.family, revision
        ))
    }

    fn describe_service(&self, _cluster: &str, _name: &str) -> Result<Lookup<ServiceState>> {
        self.record("DescribeServices")?;
        Ok(self
            .service
            .borrow()
            .clone()
            .map_or(Lookup::Missing, Lookup::Found))
    }

    fn create_service(&self, spec: &ServiceSpec) -> Result<Arn> {
        self.record("CreateService")?;
        let arn = service_arn(&spec.name);
        *self.service.borrow_mut() = Some(ServiceState {
            arn: Some(arn.clone()),
            status: "ACTIVE".to_string(),
        });
        self.service_creates.borrow_mut().push(spec.clone());
        Ok(arn)
    }

    fn update_service(&self, update: &ServiceUpdate) -> Result<Arn> {
        self.record("UpdateService")?;
        self.service_updates.borrow_mut().push(update.clone());
        if update.service.starts_with("arn:") {
            Ok(update.service.clone())
        } else {
            Ok(service_arn(&update.service))
        }
    }
}

impl Cloud for MockCloud {
    fn region(&self) -> &str {
        REGION
    }
}
