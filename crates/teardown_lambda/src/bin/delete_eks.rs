use lambda_runtime::{service_fn, Context, Error, LambdaEvent};
use serde_json::{json, Value};
use teardown_lambda::aws::autoscaling::AwsScalingControl;
use teardown_lambda::aws::eks::AwsClusterControl;
use teardown_lambda::aws::events::AwsRuleControl;
use teardown_lambda::aws::iam::AwsRoleControl;
use teardown_lambda::aws::lambda::AwsFunctionControl;
use teardown_lambda::aws::s3::AwsBucketStore;
use teardown_lambda::handlers::delete_eks::{
    handle_delete_eks_event, DeleteEksAdapters, DeleteEksConfig,
};
use teardown_lambda::runtime::contract::{InvocationIdentity, LifecycleHookEvent};

fn invocation_identity(context: &Context) -> InvocationIdentity {
    InvocationIdentity {
        function_name: context.env_config.function_name.clone(),
        invoked_function_arn: context.invoked_function_arn.clone(),
        log_stream_name: context.env_config.log_stream.clone(),
    }
}

async fn handle_request(event: LambdaEvent<Value>) -> Result<Value, Error> {
    let (payload, context) = event.into_parts();
    let identity = invocation_identity(&context);

    let hook_event: LifecycleHookEvent = serde_json::from_value(payload)
        .map_err(|error| Error::from(format!("invalid lifecycle hook event: {error}")))?;
    let config = DeleteEksConfig::from_env().map_err(Error::from)?;

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let cluster = AwsClusterControl::new(&aws_config);
    let scaling = AwsScalingControl::new(&aws_config);
    let buckets = AwsBucketStore::new(&aws_config);
    let functions = AwsFunctionControl::new(&aws_config);
    let roles = AwsRoleControl::new(&aws_config);
    let rules = AwsRuleControl::new(&aws_config);
    let adapters = DeleteEksAdapters {
        cluster: &cluster,
        scaling: &scaling,
        buckets: &buckets,
        functions: &functions,
        roles: &roles,
        rules: &rules,
    };

    let report = handle_delete_eks_event(&hook_event, &identity, &config, &adapters);
    Ok(json!({
        "status": "done",
        "steps_completed": report.completed(),
        "steps_failed": report.failed(),
    }))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_runtime::run(service_fn(handle_request)).await
}
