//! Test support utilities for fargate-deploy integration tests.
//!
//! Every test gets its own temp directory for variables files. The child
//! process never sees the caller's DEPLOY_* or AWS_* environment, so a
//! developer's shell can't leak into (or reach out from) a test run.

#![allow(dead_code)]

pub mod assertions;
pub mod fixtures;
pub mod skip;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

const SCRUBBED_VARS: &[&str] = &[
    "DEPLOY_IMAGE",
    "DEPLOY_ENV_YML",
    "DEPLOY_VPC_ID",
    "DEPLOY_CLUSTER",
    "DEPLOY_PROJECT",
    "DEPLOY_SUBNETS",
    "DEPLOY_SECURITY_GROUPS",
    "FARGATE_DEPLOY_LOG",
    "AWS_REGION",
    "AWS_DEFAULT_REGION",
    "AWS_PROFILE",
    "AWS_ACCESS_KEY_ID",
    "AWS_SECRET_ACCESS_KEY",
    "AWS_SESSION_TOKEN",
];

/// Isolated test environment.
pub struct Test {
    /// Temporary directory holding variables files
    pub dir: TempDir,
}

impl Test {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        Self { dir }
    }

    /// A fargate-deploy command with a scrubbed environment.
    ///
    /// AWS config files point into the temp dir and IMDS is disabled, so the
    /// SDK can never pick up real credentials or a region.
    pub fn cmd(&self) -> Command {
        let mut cmd =
            Command::cargo_bin("fargate-deploy").expect("failed to find fargate-deploy binary");
        for var in SCRUBBED_VARS {
            cmd.env_remove(var);
        }
        cmd.env("HOME", self.dir.path());
        cmd.env("AWS_CONFIG_FILE", self.dir.path().join("aws-config"));
        cmd.env(
            "AWS_SHARED_CREDENTIALS_FILE",
            self.dir.path().join("aws-credentials"),
        );
        cmd.env("AWS_EC2_METADATA_DISABLED", "true");
        cmd.env("NO_COLOR", "1");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Write a variables file and return its path.
    pub fn write_env_yml(&self, contents: &str) -> PathBuf {
        let path = self.dir.path().join("env.yml");
        std::fs::write(&path, contents).expect("failed to write env.yml");
        path
    }

    /// Full set of required flags for `env_yml`, with `project` as project name.
    pub fn deploy_args(&self, env_yml: &std::path::Path, project: &str) -> Vec<String> {
        vec![
            "--image".to_string(),
            IMAGE.to_string(),
            "--env-yml".to_string(),
            env_yml.display().to_string(),
            "--vpc-id".to_string(),
            VPC_ID.to_string(),
            "--cluster".to_string(),
            CLUSTER.to_string(),
            "--project".to_string(),
            project.to_string(),
            "--subnets".to_string(),
            SUBNETS.to_string(),
            "--security-groups".to_string(),
            SECURITY_GROUPS.to_string(),
        ]
    }
}
