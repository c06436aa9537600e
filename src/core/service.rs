//! Service reconciliation.
//!
//! The service's state is inferred from a describe call, never stored:
//! a missing or `INACTIVE` service is created, anything else is updated in
//! place with a forced new deployment. Either way the request is submitted
//! and the function returns without waiting for the rollout.
//!
//! The describe-then-act sequence is not guarded. If another run deletes or
//! creates the service in between, the following ECS call fails and the
//! error is reported as-is.

use serde::Serialize;
use tracing::info;

use crate::core::cloud::{Lookup, Orchestrator, ServiceSpec, ServiceUpdate};
use crate::core::constants;
use crate::core::naming;
use crate::core::types::Arn;
use crate::error::Result;

/// What the reconciler did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "arn", rename_all = "lowercase")]
pub enum ServiceOutcome {
    Created(Arn),
    Updated(Arn),
}

impl ServiceOutcome {
    pub fn arn(&self) -> &str {
        match self {
            Self::Created(arn) | Self::Updated(arn) => arn,
        }
    }
}

/// Everything needed to create or update `<project>-service`.
#[derive(Debug, Clone)]
pub struct ServiceTarget<'a> {
    pub cluster: &'a str,
    pub project: &'a str,
    pub task_definition_arn: &'a str,
    pub target_group_arn: &'a str,
    pub subnets: &'a [String],
    pub security_groups: &'a [String],
    pub container_port: u16,
}

/// Create the service if absent, otherwise roll it onto the new revision.
pub fn reconcile(ecs: &dyn Orchestrator, target: &ServiceTarget<'_>) -> Result<ServiceOutcome> {
    let name = naming::service_name(target.project);

    match ecs.describe_service(target.cluster, &name)? {
        Lookup::Found(state) if state.status != constants::SERVICE_STATUS_INACTIVE => {
            let service = state.arn.unwrap_or(name);
            info!(
                service = %service,
                status = %state.status,
                "service exists, forcing new deployment"
            );
            let arn = ecs.update_service(&ServiceUpdate {
                cluster: target.cluster.to_string(),
                service,
                task_definition_arn: target.task_definition_arn.to_string(),
                force_new_deployment: true,
            })?;
            return Ok(ServiceOutcome::Updated(arn));
        }
        Lookup::Found(_) => info!(service = %name, "service inactive, creating"),
        Lookup::Missing => info!(service = %name, "service not found, creating"),
    }

    let arn = ecs.create_service(&ServiceSpec {
        cluster: target.cluster.to_string(),
        name,
        task_definition_arn: target.task_definition_arn.to_string(),
        desired_count: constants::DESIRED_COUNT,
        subnets: target.subnets.to_vec(),
        security_groups: target.security_groups.to_vec(),
        target_group_arn: target.target_group_arn.to_string(),
        container_name: naming::container_name(target.project),
        container_port: target.container_port,
    })?;
    Ok(ServiceOutcome::Created(arn))
}
