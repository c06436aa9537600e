/// Skip a test if AWS credentials are not configured.
#[macro_export]
macro_rules! skip_without_aws {
    () => {
        if std::env::var("AWS_ACCESS_KEY_ID").is_err() {
            eprintln!("SKIPPED: AWS_ACCESS_KEY_ID not set");
            return;
        }
        if std::env::var("AWS_REGION").is_err() {
            eprintln!("SKIPPED: AWS_REGION not set");
            return;
        }
    };
}

/// Skip a test if no ECS cluster is available to describe services in.
#[macro_export]
macro_rules! skip_without_cluster {
    () => {
        $crate::skip_without_aws!();
        if std::env::var("FARGATE_DEPLOY_TEST_CLUSTER").is_err() {
            eprintln!("SKIPPED: FARGATE_DEPLOY_TEST_CLUSTER not set (set to an ECS cluster name)");
            return;
        }
    };
}
