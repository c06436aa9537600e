//! Constants used throughout fargate-deploy.
//!
//! Centralizes naming suffixes and the fixed sizing of deployed workloads.

/// Top-level key of the variables file.
pub const VARIABLES_KEY: &str = "variables";

/// Suffix appended to the project name for the target group.
pub const TARGET_GROUP_SUFFIX: &str = "-tg";

/// Suffix appended to the project name for the ECS service.
pub const SERVICE_SUFFIX: &str = "-service";

/// Suffix appended to the project name for the container.
pub const CONTAINER_SUFFIX: &str = "-container";

/// CloudWatch log group prefix (`/ecs/<project>`).
pub const LOG_GROUP_PREFIX: &str = "/ecs/";

/// awslogs stream prefix.
pub const LOG_STREAM_PREFIX: &str = "ecs";

/// Role assumed by tasks when no `--execution-role` is given.
pub const DEFAULT_EXECUTION_ROLE: &str = "ecsTaskExecutionRole";

/// Port the container listens on and the target group forwards to.
pub const DEFAULT_CONTAINER_PORT: u16 = 8000;

/// Task CPU units (0.25 vCPU).
pub const DEFAULT_CPU: &str = "256";

/// Task memory in MiB.
pub const DEFAULT_MEMORY: &str = "512";

/// Target group health check path.
pub const DEFAULT_HEALTH_CHECK_PATH: &str = "/";

/// Any 2xx response counts as healthy.
pub const HEALTHY_HTTP_CODES: &str = "200-299";

/// Number of tasks a freshly created service runs.
pub const DESIRED_COUNT: i32 = 1;

/// ECS reports deleted services with this status.
pub const SERVICE_STATUS_INACTIVE: &str = "INACTIVE";

/// ELBv2 limits target group names to 32 characters.
pub const MAX_TARGET_GROUP_NAME: usize = 32;
