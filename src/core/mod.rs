//! Core library components.
//!
//! This module contains the deployment logic: loading the variables file,
//! resolving secrets, and driving the target group, task definition and
//! service steps against the cloud traits.

pub mod cloud;
pub mod config;
pub mod constants;
pub mod deploy;
pub mod naming;
pub mod secrets;
pub mod service;
pub mod target_group;
pub mod task_definition;
pub mod types;
pub mod validation;
