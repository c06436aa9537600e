//! Shared test fixtures.

pub const IMAGE: &str = "123456789012.dkr.ecr.us-east-1.amazonaws.com/shop:abc123";
pub const VPC_ID: &str = "vpc-0abc";
pub const CLUSTER: &str = "main";
pub const PROJECT: &str = "shop";
pub const SUBNETS: &str = "subnet-a,subnet-b";
pub const SECURITY_GROUPS: &str = "sg-1";

/// A well-formed variables file.
pub const VALID_ENV_YML: &str = "\
variables:
  DATABASE_URL: /prod/shop/database_url
  API_KEY: /prod/shop/api_key
";
