use std::time::SystemTime;

use aws_credential_types::provider::ProvideCredentials;
use lambda_runtime::{service_fn, Context, Error, LambdaEvent};
use serde_json::{json, Value};
use teardown_lambda::aws::callback::HttpCallbackTransport;
use teardown_lambda::aws::eks_auth::bearer_token;
use teardown_lambda::aws::kubernetes::KubernetesPodLister;
use teardown_lambda::handlers::cluster_probe::{handle_cluster_probe_event, ClusterProbeConfig};
use teardown_lambda::handlers::init::{initialize_custom_resource, Initialization};
use teardown_lambda::handlers::respond::report_init_failure;
use teardown_lambda::runtime::contract::InvocationIdentity;

fn invocation_identity(context: &Context) -> InvocationIdentity {
    InvocationIdentity {
        function_name: context.env_config.function_name.clone(),
        invoked_function_arn: context.invoked_function_arn.clone(),
        log_stream_name: context.env_config.log_stream.clone(),
    }
}

async fn fetch_credentials(
    aws_config: &aws_config::SdkConfig,
) -> Result<aws_credential_types::Credentials, String> {
    let provider = aws_config
        .credentials_provider()
        .ok_or_else(|| "no credentials provider is configured".to_string())?;
    provider
        .provide_credentials()
        .await
        .map_err(|error| format!("failed to resolve credentials: {error}"))
}

async fn handle_request(event: LambdaEvent<Value>) -> Result<Value, Error> {
    let (payload, context) = event.into_parts();
    let identity = invocation_identity(&context);
    let transport = HttpCallbackTransport::new();

    let (request, config) = match initialize_custom_resource(
        "cluster_probe",
        &payload,
        &identity,
        &transport,
        ClusterProbeConfig::from_env,
    ) {
        Initialization::Ready { request, config } => (request, config),
        Initialization::Ignored => return Ok(json!({"status": "ignored"})),
        Initialization::Failed => return Ok(json!({"status": "init_failure"})),
    };

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let token = match fetch_credentials(&aws_config).await.and_then(|credentials| {
        bearer_token(
            &credentials,
            &config.eks_cluster_region,
            &config.eks_cluster_name,
            SystemTime::now(),
        )
    }) {
        Ok(token) => token,
        Err(error) => {
            report_init_failure(&transport, &payload, &identity, &error);
            return Ok(json!({"status": "init_failure"}));
        }
    };
    let pods = KubernetesPodLister::new(&config.eks_cluster_endpoint, token);

    handle_cluster_probe_event(&request, &identity, &pods, &transport);
    Ok(json!({"status": "done"}))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_runtime::run(service_fn(handle_request)).await
}
