//! fargate-deploy - Ship a container image to ECS Fargate from CI.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/                 # Command-line interface
//! │   ├── deploy           # Flag handling and the deploy command
//! │   └── output           # Terminal output helpers
//! └── core/                # Core library components
//!     ├── config           # Variables file (env.yml) loading
//!     ├── cloud/           # Remote service traits
//!     │   ├── mod          # IdentityService, ParameterStore, LoadBalancing, Orchestrator
//!     │   └── aws          # AWS SDK implementation
//!     ├── secrets          # Parameter existence checks and ARNs
//!     ├── target_group     # Find or create the target group
//!     ├── task_definition  # Register a new revision
//!     ├── service          # Create or roll the service
//!     └── deploy           # The five-step pipeline
//! ```
//!
//! # Features
//!
//! - Secrets injected by reference; values are never read
//! - Idempotent target group provisioning
//! - Create-or-update service with forced rolling deployment
//! - Cloud access behind traits, testable with in-memory fakes

pub mod cli;
pub mod core;
pub mod error;
