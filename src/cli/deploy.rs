//! The deploy command.

use clap::Args;
use std::path::PathBuf;
use tracing::debug;

use crate::cli::output;
use crate::core::cloud::aws::AwsCloud;
use crate::core::cloud::Cloud;
use crate::core::config::EnvConfig;
use crate::core::constants;
use crate::core::deploy::{self, DeployRequest, DeploymentReport, Event};
use crate::core::service::ServiceOutcome;
use crate::core::task_definition::TaskSizing;
use crate::core::validation;
use crate::error::Result;

/// Deployment flags. Every required flag can also come from the environment.
#[derive(Args, Debug, Clone)]
pub struct DeployArgs {
    /// Image URI in the registry (e.g., 1234.dkr.ecr.us-east-1.amazonaws.com/shop:abc123)
    #[arg(long, env = "DEPLOY_IMAGE")]
    pub image: String,

    /// Path to the variables file mapping env vars to Parameter Store paths
    #[arg(long = "env-yml", env = "DEPLOY_ENV_YML")]
    pub env_yml: PathBuf,

    /// VPC the target group is created in
    #[arg(long = "vpc-id", env = "DEPLOY_VPC_ID")]
    pub vpc_id: String,

    /// ECS cluster name
    #[arg(long, env = "DEPLOY_CLUSTER")]
    pub cluster: String,

    /// Project name, used as prefix for every resource
    #[arg(long, env = "DEPLOY_PROJECT")]
    pub project: String,

    /// Comma-separated subnet ids
    #[arg(long, env = "DEPLOY_SUBNETS")]
    pub subnets: String,

    /// Comma-separated security group ids
    #[arg(long = "security-groups", env = "DEPLOY_SECURITY_GROUPS")]
    pub security_groups: String,

    /// AWS region (defaults to the SDK provider chain)
    #[arg(long)]
    pub region: Option<String>,

    /// Container port, also used by the target group
    #[arg(long, default_value_t = constants::DEFAULT_CONTAINER_PORT,
          value_parser = clap::value_parser!(u16).range(1..))]
    pub port: u16,

    /// Task CPU units
    #[arg(long, default_value = constants::DEFAULT_CPU)]
    pub cpu: String,

    /// Task memory (MiB)
    #[arg(long, default_value = constants::DEFAULT_MEMORY)]
    pub memory: String,

    /// Execution role name or ARN
    #[arg(long = "execution-role", default_value = constants::DEFAULT_EXECUTION_ROLE)]
    pub execution_role: String,

    /// Health check path for a newly created target group
    #[arg(long = "health-check-path", default_value = constants::DEFAULT_HEALTH_CHECK_PATH)]
    pub health_check_path: String,
}

impl DeployArgs {
    /// Validate flags into a pipeline request.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` for a bad project name or an empty list.
    pub fn to_request(&self) -> Result<DeployRequest> {
        validation::validate_project(&self.project)?;

        Ok(DeployRequest {
            image: self.image.clone(),
            project: self.project.clone(),
            vpc_id: self.vpc_id.clone(),
            cluster: self.cluster.clone(),
            subnets: validation::split_list("subnets", &self.subnets)?,
            security_groups: validation::split_list("security-groups", &self.security_groups)?,
            execution_role: self.execution_role.clone(),
            sizing: TaskSizing {
                cpu: self.cpu.clone(),
                memory: self.memory.clone(),
                port: self.port,
            },
            health_check_path: self.health_check_path.clone(),
        })
    }
}

/// Prints one progress line per pipeline step.
#[derive(Default)]
struct Progress {
    open: bool,
}

impl Progress {
    fn on_event(&mut self, event: Event) {
        match event {
            Event::Started(step) => {
                output::progress(&step.to_string());
                self.open = true;
            }
            Event::Finished(_) => {
                output::progress_done(true);
                self.open = false;
            }
        }
    }

    fn fail(&mut self) {
        if self.open {
            output::progress_done(false);
            self.open = false;
        }
    }
}

/// Execute the deploy command.
///
/// Input is validated and the variables file loaded before any AWS client is
/// built, so local mistakes fail fast and offline.
pub fn execute(args: &DeployArgs, json: bool) -> Result<()> {
    let request = args.to_request()?;
    let config = EnvConfig::load(&args.env_yml)?;

    let cloud = AwsCloud::connect(args.region.as_deref())?;
    debug!(region = %cloud.region(), "clients ready");

    if !json {
        output::section(&format!("Deploying {}", request.project));
    }

    let mut progress = Progress::default();
    let result = deploy::run(&cloud, &config, &request, |event| {
        if !json {
            progress.on_event(event);
        }
    });

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            progress.fail();
            return Err(e);
        }
    };

    if json {
        output::data(&serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }

    Ok(())
}

fn print_summary(report: &DeploymentReport) {
    let created = |yes: bool| if yes { " (created)" } else { "" };

    output::section("Summary");
    output::kv(
        "target group   ",
        format!(
            "{}{}",
            report.target_group.name,
            created(report.target_group.created)
        ),
    );
    output::kv("task definition", &report.task_definition_arn);
    output::kv("secrets        ", report.secrets);

    let action = match &report.service {
        ServiceOutcome::Created(_) => "created",
        ServiceOutcome::Updated(_) => "rolling update",
    };
    output::kv(
        "service        ",
        format!("{} ({})", report.service.arn(), action),
    );

    println!();
    output::success("deployment submitted to ECS");
    output::hint(&format!(
        "follow the rollout: aws ecs describe-services --cluster {} --services {}",
        report.cluster,
        crate::core::naming::service_name(&report.project)
    ));
}
