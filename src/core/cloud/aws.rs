//! AWS SDK implementation of the cloud traits.
//!
//! The SDK is async; the deployment is a strict sequence of one-shot calls.
//! `AwsCloud` owns a current-thread tokio runtime and blocks on each request,
//! so callers stay synchronous. SDK retries are disabled: any failure aborts
//! the run.
//!
//! Credentials and region come from the default provider chain
//! (`AWS_ACCESS_KEY_ID`, `AWS_PROFILE`, instance role, ...). The region can be
//! overridden with `--region`.

use aws_config::retry::RetryConfig;
use aws_config::BehaviorVersion;
use aws_sdk_ecs::error::{DisplayErrorContext, SdkError};
use aws_sdk_ecs::operation::describe_services::DescribeServicesOutput;
use aws_sdk_ecs::types::{
    AssignPublicIp, AwsVpcConfiguration, Compatibility, ContainerDefinition, LaunchType,
    LoadBalancer, LogConfiguration, LogDriver, NetworkConfiguration, NetworkMode, PortMapping,
    Secret, TransportProtocol,
};
use aws_sdk_elasticloadbalancingv2::operation::describe_target_groups::{
    DescribeTargetGroupsError, DescribeTargetGroupsOutput,
};
use aws_sdk_elasticloadbalancingv2::types::{Matcher, ProtocolEnum, TargetTypeEnum};
use aws_sdk_ssm::operation::get_parameter::{GetParameterError, GetParameterOutput};
use std::fmt::Debug;
use aws_sdk_sts::config::Region;
use tracing::{debug, trace};

use super::{
    Cloud, IdentityService, LoadBalancing, Lookup, Orchestrator, ParameterStore, ServiceSpec,
    ServiceState, ServiceUpdate, TargetGroupSpec, TaskDefinitionSpec,
};
use crate::core::types::{AccountId, Arn};
use crate::error::{AwsError, ConfigError, Result};

/// Live AWS clients sharing one configuration and runtime.
pub struct AwsCloud {
    runtime: tokio::runtime::Runtime,
    region: String,
    sts: aws_sdk_sts::Client,
    ssm: aws_sdk_ssm::Client,
    elb: aws_sdk_elasticloadbalancingv2::Client,
    ecs: aws_sdk_ecs::Client,
}

impl AwsCloud {
    /// Load the shared AWS configuration and build every client.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Runtime` if the runtime can't start and
    /// `ConfigError::MissingRegion` if neither `region` nor the provider
    /// chain yields one.
    pub fn connect(region: Option<&str>) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ConfigError::Runtime)?;

        let sdk_config = runtime.block_on(async {
            let mut loader = aws_config::defaults(BehaviorVersion::latest())
                .retry_config(RetryConfig::disabled());
            if let Some(region) = region {
                loader = loader.region(Region::new(region.to_string()));
            }
            loader.load().await
        });

        let region = sdk_config
            .region()
            .map(|r| r.to_string())
            .ok_or(ConfigError::MissingRegion)?;
        debug!(region = %region, "aws config loaded");

        Ok(Self {
            runtime,
            region,
            sts: aws_sdk_sts::Client::new(&sdk_config),
            ssm: aws_sdk_ssm::Client::new(&sdk_config),
            elb: aws_sdk_elasticloadbalancingv2::Client::new(&sdk_config),
            ecs: aws_sdk_ecs::Client::new(&sdk_config),
        })
    }
}

impl IdentityService for AwsCloud {
    fn account_id(&self) -> Result<AccountId> {
        const OP: &str = "GetCallerIdentity";
        debug!("fetching caller identity");

        let out = self
            .runtime
            .block_on(self.sts.get_caller_identity().send())
            .map_err(|e| AwsError::request(OP, DisplayErrorContext(&e)))?;

        out.account()
            .map(str::to_string)
            .ok_or_else(|| {
                AwsError::MissingField {
                    operation: OP,
                    field: "account",
                }
                .into()
            })
    }
}

impl ParameterStore for AwsCloud {
    fn find_parameter(&self, path: &str) -> Result<Lookup<()>> {
        debug!(path = %path, "checking parameter");

        let result = self.runtime.block_on(
            self.ssm
                .get_parameter()
                .name(path)
                .with_decryption(false)
                .send(),
        );

        parameter_lookup(result)
    }
}

impl LoadBalancing for AwsCloud {
    fn find_target_group(&self, name: &str) -> Result<Lookup<Arn>> {
        debug!(name = %name, "describing target group");

        let result = self
            .runtime
            .block_on(self.elb.describe_target_groups().names(name).send());

        target_group_lookup(result)
    }

    fn create_target_group(&self, spec: &TargetGroupSpec) -> Result<Arn> {
        const OP: &str = "CreateTargetGroup";
        debug!(name = %spec.name, vpc_id = %spec.vpc_id, "creating target group");

        let matcher = Matcher::builder()
            .http_code(&spec.healthy_http_codes)
            .build();

        let out = self
            .runtime
            .block_on(
                self.elb
                    .create_target_group()
                    .name(&spec.name)
                    .protocol(ProtocolEnum::Http)
                    .port(i32::from(spec.port))
                    .vpc_id(&spec.vpc_id)
                    .target_type(TargetTypeEnum::Ip)
                    .health_check_protocol(ProtocolEnum::Http)
                    .health_check_path(&spec.health_check_path)
                    .matcher(matcher)
                    .send(),
            )
            .map_err(|e| AwsError::request(OP, DisplayErrorContext(&e)))?;

        out.target_groups()
            .first()
            .and_then(|tg| tg.target_group_arn())
            .map(str::to_string)
            .ok_or_else(|| {
                AwsError::MissingField {
                    operation: OP,
                    field: "target group ARN",
                }
                .into()
            })
    }
}

impl Orchestrator for AwsCloud {
    fn register_task_definition(&self, spec: &TaskDefinitionSpec) -> Result<Arn> {
        const OP: &str = "RegisterTaskDefinition";
        let container = &spec.container;
        debug!(family = %spec.family, image = %container.image, "registering task definition");
        trace!(secrets = container.secrets.len(), "injecting secrets");

        let secrets = container
            .secrets
            .iter()
            .map(|s| {
                Secret::builder()
                    .name(&s.name)
                    .value_from(&s.value_from)
                    .build()
                    .map_err(|e| AwsError::request(OP, e))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let log = LogConfiguration::builder()
            .log_driver(LogDriver::Awslogs)
            .options("awslogs-group", &container.log.group)
            .options("awslogs-region", &container.log.region)
            .options("awslogs-stream-prefix", &container.log.stream_prefix)
            .build()
            .map_err(|e| AwsError::request(OP, e))?;

        let definition = ContainerDefinition::builder()
            .name(&container.name)
            .image(&container.image)
            .essential(true)
            .port_mappings(
                PortMapping::builder()
                    .container_port(i32::from(container.port))
                    .protocol(TransportProtocol::Tcp)
                    .build(),
            )
            .set_secrets(Some(secrets))
            .log_configuration(log)
            .build();

        let out = self
            .runtime
            .block_on(
                self.ecs
                    .register_task_definition()
                    .family(&spec.family)
                    .network_mode(NetworkMode::Awsvpc)
                    .requires_compatibilities(Compatibility::Fargate)
                    .cpu(&spec.cpu)
                    .memory(&spec.memory)
                    .execution_role_arn(&spec.execution_role_arn)
                    .task_role_arn(&spec.execution_role_arn)
                    .container_definitions(definition)
                    .send(),
            )
            .map_err(|e| AwsError::request(OP, DisplayErrorContext(&e)))?;

        out.task_definition()
            .and_then(|td| td.task_definition_arn())
            .map(str::to_string)
            .ok_or_else(|| {
                AwsError::MissingField {
                    operation: OP,
                    field: "task definition ARN",
                }
                .into()
            })
    }

    fn describe_service(&self, cluster: &str, name: &str) -> Result<Lookup<ServiceState>> {
        debug!(cluster = %cluster, service = %name, "describing service");

        let out = self
            .runtime
            .block_on(
                self.ecs
                    .describe_services()
                    .cluster(cluster)
                    .services(name)
                    .send(),
            )
            .map_err(|e| AwsError::request("DescribeServices", DisplayErrorContext(&e)))?;

        Ok(service_lookup(&out, name))
    }

    fn create_service(&self, spec: &ServiceSpec) -> Result<Arn> {
        const OP: &str = "CreateService";
        debug!(cluster = %spec.cluster, service = %spec.name, "creating service");

        let vpc = AwsVpcConfiguration::builder()
            .set_subnets(Some(spec.subnets.clone()))
            .set_security_groups(Some(spec.security_groups.clone()))
            .assign_public_ip(AssignPublicIp::Enabled)
            .build()
            .map_err(|e| AwsError::request(OP, e))?;

        let out = self
            .runtime
            .block_on(
                self.ecs
                    .create_service()
                    .cluster(&spec.cluster)
                    .service_name(&spec.name)
                    .task_definition(&spec.task_definition_arn)
                    .launch_type(LaunchType::Fargate)
                    .desired_count(spec.desired_count)
                    .network_configuration(
                        NetworkConfiguration::builder()
                            .awsvpc_configuration(vpc)
                            .build(),
                    )
                    .load_balancers(
                        LoadBalancer::builder()
                            .target_group_arn(&spec.target_group_arn)
                            .container_name(&spec.container_name)
                            .container_port(i32::from(spec.container_port))
                            .build(),
                    )
                    .send(),
            )
            .map_err(|e| AwsError::request(OP, DisplayErrorContext(&e)))?;

        out.service()
            .and_then(|s| s.service_arn())
            .map(str::to_string)
            .ok_or_else(|| {
                AwsError::MissingField {
                    operation: OP,
                    field: "service ARN",
                }
                .into()
            })
    }

    fn update_service(&self, update: &ServiceUpdate) -> Result<Arn> {
        const OP: &str = "UpdateService";
        debug!(
            cluster = %update.cluster,
            service = %update.service,
            force = update.force_new_deployment,
            "updating service"
        );

        let out = self
            .runtime
            .block_on(
                self.ecs
                    .update_service()
                    .cluster(&update.cluster)
                    .service(&update.service)
                    .task_definition(&update.task_definition_arn)
                    .force_new_deployment(update.force_new_deployment)
                    .send(),
            )
            .map_err(|e| AwsError::request(OP, DisplayErrorContext(&e)))?;

        out.service()
            .and_then(|s| s.service_arn())
            .map(str::to_string)
            .ok_or_else(|| {
                AwsError::MissingField {
                    operation: OP,
                    field: "service ARN",
                }
                .into()
            })
    }
}

impl Cloud for AwsCloud {
    fn region(&self) -> &str {
        &self.region
    }
}

fn parameter_lookup<R>(
    result: std::result::Result<GetParameterOutput, SdkError<GetParameterError, R>>,
) -> Result<Lookup<()>>
where
    R: Debug + 'static,
{
    match result {
        Ok(_) => Ok(Lookup::Found(())),
        Err(err)
            if err
                .as_service_error()
                .is_some_and(|e| e.is_parameter_not_found()) =>
        {
            Ok(Lookup::Missing)
        }
        Err(err) => Err(AwsError::request("GetParameter", DisplayErrorContext(&err)).into()),
    }
}

fn target_group_lookup<R>(
    result: std::result::Result<
        DescribeTargetGroupsOutput,
        SdkError<DescribeTargetGroupsError, R>,
    >,
) -> Result<Lookup<Arn>>
where
    R: Debug + 'static,
{
    match result {
        Ok(out) => Ok(out
            .target_groups()
            .first()
            .and_then(|tg| tg.target_group_arn())
            .map_or(Lookup::Missing, |arn| Lookup::Found(arn.to_string()))),
        Err(err)
            if err
                .as_service_error()
                .is_some_and(|e| e.is_target_group_not_found_exception()) =>
        {
            Ok(Lookup::Missing)
        }
        Err(err) => Err(
            AwsError::request("DescribeTargetGroups", DisplayErrorContext(&err)).into(),
        ),
    }
}

// Unknown services come back under `failures` with reason MISSING.
fn service_lookup(out: &DescribeServicesOutput, name: &str) -> Lookup<ServiceState> {
    out.services()
        .iter()
        .find(|s| s.service_name() == Some(name))
        .map_or(Lookup::Missing, |s| {
            Lookup::Found(ServiceState {
                arn: s.service_arn().map(str::to_string),
                status: s.status().unwrap_or_default().to_string(),
            })
        })
}
