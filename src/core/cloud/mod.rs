//! Remote collaborators.
//!
//! Each AWS service the deployment touches sits behind a small synchronous
//! trait, so the pipeline can run against [`aws::AwsCloud`] in production and
//! an in-memory mock in tests.
//!
//! ## Services
//!
//! - **IdentityService**: STS, current account id
//! - **ParameterStore**: SSM, existence check by path
//! - **LoadBalancing**: ELBv2, find or create a target group
//! - **Orchestrator**: ECS, task definitions and services
//!
//! "Not found" is never an error here: lookups return [`Lookup::Missing`] and
//! only transport, permission and quota failures surface as `AwsError`.

use crate::core::types::{AccountId, Arn};
use crate::error::Result;

pub mod aws;

#[cfg(test)]
pub mod mock;

/// Result of a lookup that may legitimately find nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    Missing,
}

/// Secret injected into the container at task start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretReference {
    /// Environment variable name inside the container.
    pub name: String,
    /// Parameter ARN the agent reads the value from.
    pub value_from: Arn,
}

/// Parameters for a new target group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetGroupSpec {
    pub name: String,
    pub vpc_id: String,
    pub port: u16,
    pub health_check_path: String,
    pub healthy_http_codes: String,
}

/// A task definition revision to register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDefinitionSpec {
    pub family: String,
    pub cpu: String,
    pub memory: String,
    pub execution_role_arn: Arn,
    pub container: ContainerSpec,
}

/// The single essential container of a task definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSpec {
    pub name: String,
    pub image: String,
    pub port: u16,
    pub secrets: Vec<SecretReference>,
    pub log: LogSpec,
}

/// awslogs sink of a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSpec {
    pub group: String,
    pub region: String,
    pub stream_prefix: String,
}

/// A service as reported by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceState {
    pub arn: Option<Arn>,
    pub status: String,
}

/// Parameters for a new service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSpec {
    pub cluster: String,
    pub name: String,
    pub task_definition_arn: Arn,
    pub desired_count: i32,
    pub subnets: Vec<String>,
    pub security_groups: Vec<String>,
    pub target_group_arn: Arn,
    pub container_name: String,
    pub container_port: u16,
}

/// Rolling replacement of an existing service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceUpdate {
    pub cluster: String,
    /// Service ARN, or its name when the describe reported no ARN.
    pub service: String,
    pub task_definition_arn: Arn,
    pub force_new_deployment: bool,
}

/// STS.
pub trait IdentityService {
    /// Account id of the caller's credentials.
    fn account_id(&self) -> Result<AccountId>;
}

/// SSM Parameter Store.
pub trait ParameterStore {
    /// Check that a parameter exists. The value is never decrypted.
    fn find_parameter(&self, path: &str) -> Result<Lookup<()>>;
}

/// Elastic Load Balancing v2.
pub trait LoadBalancing {
    fn find_target_group(&self, name: &str) -> Result<Lookup<Arn>>;
    fn create_target_group(&self, spec: &TargetGroupSpec) -> Result<Arn>;
}

/// ECS.
pub trait Orchestrator {
    /// Register a new revision and return its ARN.
    fn register_task_definition(&self, spec: &TaskDefinitionSpec) -> Result<Arn>;
    fn describe_service(&self, cluster: &str, name: &str) -> Result<Lookup<ServiceState>>;
    fn create_service(&self, spec: &ServiceSpec) -> Result<Arn>;
    fn update_service(&self, update: &ServiceUpdate) -> Result<Arn>;
}

/// Every collaborator a deployment needs.
pub trait Cloud: IdentityService + ParameterStore + LoadBalancing + Orchestrator {
    /// Region all clients were configured for.
    fn region(&self) -> &str;
}
