use lambda_runtime::{service_fn, Context, Error, LambdaEvent};
use serde_json::{json, Value};
use teardown_lambda::aws::callback::HttpCallbackTransport;
use teardown_lambda::aws::s3::AwsBucketStore;
use teardown_lambda::handlers::init::{initialize_custom_resource, Initialization};
use teardown_lambda::handlers::s3_encrypt::{handle_s3_encrypt_event, S3EncryptConfig};
use teardown_lambda::runtime::contract::InvocationIdentity;

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
        "s3_encrypt",
        &payload,
        &identity,
        &transport,
        S3EncryptConfig::from_env,
    ) {
        Initialization::Ready { request, config } => (request, config),
        Initialization::Ignored => return Ok(json!({"status": "ignored"})),
        Initialization::Failed => return Ok(json!({"status": "init_failure"})),
    };

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let objects = AwsBucketStore::new(&aws_config);

    handle_s3_encrypt_event(&request, &identity, &config, &objects, &transport);
    Ok(json!({"status": "done"}))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_runtime::run(service_fn(handle_request)).await
}
