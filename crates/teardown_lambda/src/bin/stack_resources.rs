use lambda_runtime::{service_fn, Context, Error, LambdaEvent};
use serde_json::{json, Value};
use teardown_lambda::aws::callback::HttpCallbackTransport;
use teardown_lambda::aws::cloudformation::AwsStackControl;
use teardown_lambda::aws::ecr::AwsRepositoryStore;
use teardown_lambda::aws::eks::AwsClusterControl;
use teardown_lambda::aws::s3::AwsBucketStore;
use teardown_lambda::handlers::init::{initialize_custom_resource, Initialization};
use teardown_lambda::handlers::stack_resources::{
    handle_stack_resources_event, StackResourcesAdapters, StackResourcesConfig,
};
use teardown_lambda::runtime::contract::InvocationIdentity;
use teardown_lambda::runtime::sequencer::ThreadSleeper;

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
    let transport = HttpCallbackTransport::new();

    let (request, config) = match initialize_custom_resource(
        "stack_resources",
        &payload,
        &identity,
        &transport,
        StackResourcesConfig::from_env,
    ) {
        Initialization::Ready { request, config } => (request, config),
        Initialization::Ignored => return Ok(json!({"status": "ignored"})),
        Initialization::Failed => return Ok(json!({"status": "init_failure"})),
    };

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let buckets = AwsBucketStore::new(&aws_config);
    let repositories = AwsRepositoryStore::new(&aws_config);
    let cluster = AwsClusterControl::new(&aws_config);
    let stacks = AwsStackControl::new(&aws_config);
    let sleeper = ThreadSleeper;
    let adapters = StackResourcesAdapters {
        buckets: &buckets,
        repositories: &repositories,
        cluster: &cluster,
        stacks: &stacks,
        sleeper: &sleeper,
    };

    handle_stack_resources_event(&request, &identity, &config, &adapters, &transport);
    Ok(json!({"status": "done"}))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_runtime::run(service_fn(handle_request)).await
}
