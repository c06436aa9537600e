//! Target group lookup and provisioning.

use tracing::info;

use crate::core::cloud::{LoadBalancing, Lookup, TargetGroupSpec};
use crate::core::constants;
use crate::core::naming;
use crate::core::types::Arn;
use crate::error::Result;

/// A target group the service can register with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTargetGroup {
    pub arn: Arn,
    /// True when this run created the group.
    pub created: bool,
}

/// Settings for a target group created by this tool.
#[derive(Debug, Clone)]
pub struct TargetGroupOptions {
    pub port: u16,
    pub health_check_path: String,
}

impl Default for TargetGroupOptions {
    fn default() -> Self {
        Self {
            port: constants::DEFAULT_CONTAINER_PORT,
            health_check_path: constants::DEFAULT_HEALTH_CHECK_PATH.to_string(),
        }
    }
}

/// Find `<project>-tg`, creating it in `vpc_id` if it doesn't exist.
///
/// An existing group is returned as-is; its settings are never changed.
pub fn ensure(
    elb: &dyn LoadBalancing,
    vpc_id: &str,
    project: &str,
    options: &TargetGroupOptions,
) -> Result<ResolvedTargetGroup> {
    let name = naming::target_group_name(project);

    if let Lookup::Found(arn) = elb.find_target_group(&name)? {
        info!(name = %name, "using existing target group");
        return Ok(ResolvedTargetGroup {
            arn,
            created: false,
        });
    }

    info!(name = %name, "target group not found, creating");
    let spec = TargetGroupSpec {
        name,
        vpc_id: vpc_id.to_string(),
        port: options.port,
        health_check_path: options.health_check_path.clone(),
        healthy_http_codes: constants::HEALTHY_HTTP_CODES.to_string(),
    };
    let arn = elb.create_target_group(&spec)?;

    Ok(ResolvedTargetGroup { arn, created: true })
}
