//! fargate-deploy - Ship a container image to ECS Fargate from CI.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use fargate_deploy::cli::output;
use fargate_deploy::cli::{execute, hint_for, Cli};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env("FARGATE_DEPLOY_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("fargate_deploy=debug")
        } else {
            EnvFilter::new("fargate_deploy=warn")
        }
    });

    // Logs go to stderr so `--json` output stays parseable.
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute(&cli) {
        output::error(&e.to_string());
        if let Some(hint) = hint_for(&e) {
            output::error_hint(&hint);
        }
        std::process::exit(1);
    }
}
