//! Task definition registration.
//!
//! Every deployment registers a fresh revision of the `<project>` family;
//! existing revisions are immutable and never touched.

use tracing::info;

use crate::core::cloud::{ContainerSpec, LogSpec, Orchestrator, SecretReference, TaskDefinitionSpec};
use crate::core::constants;
use crate::core::naming;
use crate::core::types::Arn;
use crate::error::Result;

/// Task sizing and networking, defaulting to 0.25 vCPU / 512 MiB on port 8000.
#[derive(Debug, Clone)]
pub struct TaskSizing {
    pub cpu: String,
    pub memory: String,
    pub port: u16,
}

impl Default for TaskSizing {
    fn default() -> Self {
        Self {
            cpu: constants::DEFAULT_CPU.to_string(),
            memory: constants::DEFAULT_MEMORY.to_string(),
            port: constants::DEFAULT_CONTAINER_PORT,
        }
    }
}

/// Build the revision to register for `project`.
pub fn build_spec(
    image: &str,
    project: &str,
    execution_role_arn: &str,
    region: &str,
    secrets: Vec<SecretReference>,
    sizing: &TaskSizing,
) -> TaskDefinitionSpec {
    TaskDefinitionSpec {
        family: naming::task_family(project),
        cpu: sizing.cpu.clone(),
        memory: sizing.memory.clone(),
        execution_role_arn: execution_role_arn.to_string(),
        container: ContainerSpec {
            name: naming::container_name(project),
            image: image.to_string(),
            port: sizing.port,
            secrets,
            log: LogSpec {
                group: naming::log_group(project),
                region: region.to_string(),
                stream_prefix: constants::LOG_STREAM_PREFIX.to_string(),
            },
        },
    }
}

/// Register a new revision and return its ARN.
pub fn register(ecs: &dyn Orchestrator, spec: &TaskDefinitionSpec) -> Result<Arn> {
    info!(
        family = %spec.family,
        secrets = spec.container.secrets.len(),
        "registering task definition"
    );
    let arn = ecs.register_task_definition(spec)?;
    info!(arn = %arn, "task definition registered");
    Ok(arn)
}
