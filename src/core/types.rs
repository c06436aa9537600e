//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

/// An Amazon Resource Name.
pub type Arn = String;

/// A 12-digit AWS account id.
pub type AccountId = String;

/// An environment variable name injected into the container (e.g., DATABASE_URL).
pub type VariableName = String;

/// A Parameter Store path (e.g., /prod/db_pass).
pub type ParameterPath = String;
