//! Command-line interface.

pub mod deploy;
pub mod output;

use clap::Parser;

use crate::error::{ConfigError, Error, SecretError};

/// fargate-deploy - Ship a container image to ECS Fargate.
#[derive(Parser, Debug)]
#[command(
    name = "fargate-deploy",
    about = "Deploy a container image to ECS Fargate behind a load balancer",
    version,
    after_help = "Secrets are injected as SSM Parameter Store references; values are never read."
)]
pub struct Cli {
    #[command(flatten)]
    pub deploy: deploy::DeployArgs,

    /// Print the deployment report as JSON instead of progress output
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Execute the command line.
pub fn execute(cli: &Cli) -> crate::error::Result<()> {
    deploy::execute(&cli.deploy, cli.json)
}

/// A suggestion for errors the user can fix locally.
pub fn hint_for(err: &Error) -> Option<String> {
    match err {
        Error::Config(ConfigError::MissingVariables { .. }) => {
            Some(
                "expected a top-level mapping, e.g.  variables: { DATABASE_URL: /prod/db_url }"
                    .to_string(),
            )
        }
        Error::Config(ConfigError::MissingRegion) => {
            Some("pass --region or set AWS_REGION".to_string())
        }
        Error::Secret(SecretError::ParameterNotFound { path, .. }) => Some(format!(
            "create it with: aws ssm put-parameter --name {} --type SecureString --value ...",
            path
        )),
        _ => None,
    }
}
