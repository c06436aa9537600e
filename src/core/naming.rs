//! Resource names and ARNs derived from the project name.
//!
//! All functions here are pure: the same inputs always yield the same
//! identifier, and none of them talk to AWS.

use crate::core::constants;

/// Target group name: `<project>-tg`.
pub fn target_group_name(project: &str) -> String {
    format!("{}{}", project, constants::TARGET_GROUP_SUFFIX)
}

/// ECS service name: `<project>-service`.
pub fn service_name(project: &str) -> String {
    format!("{}{}", project, constants::SERVICE_SUFFIX)
}

/// Container name inside the task definition: `<project>-container`.
///
/// The service's load balancer binding refers to this name, so both sides
/// must derive it from here.
pub fn container_name(project: &str) -> String {
    format!("{}{}", project, constants::CONTAINER_SUFFIX)
}

/// Task definition family: the project name itself.
pub fn task_family(project: &str) -> String {
    project.to_string()
}

/// CloudWatch log group: `/ecs/<project>`.
pub fn log_group(project: &str) -> String {
    format!("{}{}", constants::LOG_GROUP_PREFIX, project)
}

/// ARN of an SSM parameter.
///
/// Hierarchical paths already start with `/` and are appended as-is. Flat
/// names get the separator inserted, matching the ARN SSM itself reports.
/// A full parameter ARN, which `GetParameter` also accepts, is returned
/// unchanged.
///
/// # Example
///
/// ```
/// use fargate_deploy::core::naming::parameter_arn;
///
/// assert_eq!(
///     parameter_arn("us-east-1", "123456789012", "/prod/db_pass"),
///     "arn:aws:ssm:us-east-1:123456789012:parameter/prod/db_pass"
/// );
/// ```
pub fn parameter_arn(region: &str, account_id: &str, path: &str) -> String {
    if path.starts_with("arn:") {
        return path.to_string();
    }
    let sep = if path.starts_with('/') { "" } else { "/" };
    format!(
        "arn:aws:ssm:{}:{}:parameter{}{}",
        region, account_id, sep, path
    )
}

/// ARN of the task execution role.
///
/// A value that is already an ARN is returned unchanged, otherwise it is
/// treated as a role name in the caller's account.
pub fn execution_role_arn(account_id: &str, role: &str) -> String {
    if role.starts_with("arn:") {
        role.to_string()
    } else {
        format!("arn:aws:iam::{}:role/{}", account_id, role)
    }
}
