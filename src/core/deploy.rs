//! The deployment pipeline.
//!
//! Runs the steps in strict order, each step a blocking call against the
//! cloud:
//!
//! ```text
//! account id → secrets → target group → task definition → service
//! ```
//!
//! Nothing is rolled back. If a later step fails, a target group or task
//! definition revision created earlier stays in place; both are safe to
//! reuse on the next run.

use serde::Serialize;
use std::fmt;
use tracing::info;

use crate::core::cloud::Cloud;
use crate::core::config::EnvConfig;
use crate::core::naming;
use crate::core::secrets::SecretResolver;
use crate::core::service::{self, ServiceOutcome, ServiceTarget};
use crate::core::target_group::{self, TargetGroupOptions};
use crate::core::task_definition::{self, TaskSizing};
use crate::core::types::Arn;
use crate::error::Result;

/// Inputs of one deployment, already validated.
#[derive(Debug, Clone)]
pub struct DeployRequest {
    pub image: String,
    pub project: String,
    pub vpc_id: String,
    pub cluster: String,
    pub subnets: Vec<String>,
    pub security_groups: Vec<String>,
    /// Role name or full ARN.
    pub execution_role: String,
    pub sizing: TaskSizing,
    pub health_check_path: String,
}

/// Pipeline stages, reported as they start and finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Identity,
    Secrets,
    TargetGroup,
    TaskDefinition,
    Service,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Identity => "Resolving account",
            Self::Secrets => "Checking secrets",
            Self::TargetGroup => "Resolving target group",
            Self::TaskDefinition => "Registering task definition",
            Self::Service => "Deploying service",
        };
        f.write_str(label)
    }
}

/// Progress notification passed to the caller's observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Started(Step),
    Finished(Step),
}

/// Target group as reported.
#[derive(Debug, Clone, Serialize)]
pub struct TargetGroupReport {
    pub name: String,
    pub arn: Arn,
    pub created: bool,
}

/// Summary of a submitted deployment.
#[derive(Debug, Clone, Serialize)]
pub struct DeploymentReport {
    pub project: String,
    pub cluster: String,
    pub region: String,
    pub account_id: String,
    pub secrets: usize,
    pub target_group: TargetGroupReport,
    pub task_definition_arn: Arn,
    pub service: ServiceOutcome,
}

/// Run `f` as `step`, bracketed by start and finish notifications.
fn stage<T>(
    observe: &mut impl FnMut(Event),
    step: Step,
    f: impl FnOnce() -> Result<T>,
) -> Result<T> {
    observe(Event::Started(step));
    let value = f()?;
    observe(Event::Finished(step));
    Ok(value)
}

/// Run every step against `cloud`, reporting progress to `observe`.
///
/// # Errors
///
/// Stops at the first failing step and returns its error. A missing secret
/// stops the run before any load balancer or ECS call is made.
pub fn run<C: Cloud>(
    cloud: &C,
    config: &EnvConfig,
    request: &DeployRequest,
    mut observe: impl FnMut(Event),
) -> Result<DeploymentReport> {
    info!(project = %request.project, cluster = %request.cluster, "starting deployment");
    let region = cloud.region().to_string();

    let account_id = stage(&mut observe, Step::Identity, || cloud.account_id())?;

    let secrets = stage(&mut observe, Step::Secrets, || {
        SecretResolver::new(&region, &account_id).resolve_all(cloud, config)
    })?;
    let secret_count = secrets.len();

    let target_group = stage(&mut observe, Step::TargetGroup, || {
        let options = TargetGroupOptions {
            port: request.sizing.port,
            health_check_path: request.health_check_path.clone(),
        };
        target_group::ensure(cloud, &request.vpc_id, &request.project, &options)
    })?;

    let task_definition_arn = stage(&mut observe, Step::TaskDefinition, || {
        let role = naming::execution_role_arn(&account_id, &request.execution_role);
        let spec = task_definition::build_spec(
            &request.image,
            &request.project,
            &role,
            &region,
            secrets,
            &request.sizing,
        );
        task_definition::register(cloud, &spec)
    })?;

    let service = stage(&mut observe, Step::Service, || {
        service::reconcile(
            cloud,
            &ServiceTarget {
                cluster: &request.cluster,
                project: &request.project,
                task_definition_arn: &task_definition_arn,
                target_group_arn: &target_group.arn,
                subnets: &request.subnets,
                security_groups: &request.security_groups,
                container_port: request.sizing.port,
            },
        )
    })?;

    info!(service = %service.arn(), "deployment submitted");

    Ok(DeploymentReport {
        project: request.project.clone(),
        cluster: request.cluster.clone(),
        region,
        account_id,
        secrets: secret_count,
        target_group: TargetGroupReport {
            name: naming::target_group_name(&request.project),
            arn: target_group.arn,
            created: target_group.created,
        },
        task_definition_arn,
        service,
    })
}
