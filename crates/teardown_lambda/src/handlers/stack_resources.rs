//! Custom-resource handler tearing down the full demo security stack: the
//! lacework and artifact buckets, the demo container repositories, the
//! account-named EKS cluster, and the eksctl stack behind it.

use serde_json::json;

use crate::adapters::callback::CallbackTransport;
use crate::adapters::cluster::ClusterControl;
use crate::adapters::object_store::BucketStore;
use crate::adapters::registry::RepositoryStore;
use crate::adapters::stacks::StackControl;
use crate::config::require_env;
use crate::handlers::cluster_teardown::{account_cluster_name, delete_nodegroups_and_wait};
use crate::handlers::respond::send_response;
use crate::runtime::contract::{
    CustomResourceRequest, InvocationIdentity, RequestType, ResponseStatus,
};
use crate::runtime::logging::log_info;
use crate::runtime::sequencer::{run_teardown, Sleeper, TeardownStep};

const COMPONENT: &str = "stack_resources";

pub const DEMO_APP_REPOSITORY: &str = "demo-app";
pub const LOG4J_APP_REPOSITORY: &str = "log4j-app";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackResourcesConfig {
    pub lacework_bucket: String,
    pub artifact_bucket: String,
}

impl StackResourcesConfig {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            lacework_bucket: require_env("lacework_bucket")?,
            artifact_bucket: require_env("artifact_bucket")?,
        })
    }
}

pub struct StackResourcesAdapters<'a> {
    pub buckets: &'a dyn BucketStore,
    pub repositories: &'a dyn RepositoryStore,
    pub cluster: &'a dyn ClusterControl,
    pub stacks: &'a dyn StackControl,
    pub sleeper: &'a dyn Sleeper,
}

pub fn handle_stack_resources_event(
    request: &CustomResourceRequest,
    identity: &InvocationIdentity,
    config: &StackResourcesConfig,
    adapters: &StackResourcesAdapters<'_>,
    transport: &dyn CallbackTransport,
) {
    match request.request_type {
        RequestType::Create | RequestType::Update => {
            log_info(
                COMPONENT,
                "create_noop",
                json!({"request_id": request.request_id}),
            );
            send_response(transport, request, identity, ResponseStatus::Success, json!({}));
        }
        RequestType::Delete => {
            let report = run_teardown(COMPONENT, teardown_steps(identity, config, adapters));
            log_info(
                COMPONENT,
                "teardown_finished",
                json!({"completed": report.completed(), "failed": report.failed()}),
            );
            send_response(transport, request, identity, ResponseStatus::Success, json!({}));
        }
    }
}

fn teardown_steps<'a>(
    identity: &'a InvocationIdentity,
    config: &'a StackResourcesConfig,
    adapters: &'a StackResourcesAdapters<'a>,
) -> Vec<TeardownStep<'a>> {
    vec![
        TeardownStep::new("delete lacework bucket", move || {
            adapters.buckets.empty_bucket(&config.lacework_bucket)?;
            adapters.buckets.delete_bucket(&config.lacework_bucket)
        }),
        TeardownStep::new("delete artifact bucket", move || {
            adapters.buckets.empty_bucket(&config.artifact_bucket)?;
            adapters.buckets.delete_bucket(&config.artifact_bucket)
        }),
        TeardownStep::new("delete container repositories", move || {
            let account = identity.account_id()?;
            adapters
                .repositories
                .force_delete_repository(account, DEMO_APP_REPOSITORY)?;
            adapters
                .repositories
                .force_delete_repository(account, LOG4J_APP_REPOSITORY)
        }),
        TeardownStep::new("delete cluster nodegroups", move || {
            let cluster = account_cluster_name(identity)?;
            delete_nodegroups_and_wait(&cluster, adapters.cluster, adapters.sleeper)
        }),
        TeardownStep::new("delete cluster", move || {
            let cluster = account_cluster_name(identity)?;
            adapters.cluster.delete_cluster(&cluster)
        }),
        TeardownStep::new("delete cluster stack", move || {
            let account = identity.account_id()?;
            adapters
                .stacks
                .delete_stack(&format!("eksctl-{account}-eks-cluster"))
        }),
    ]
}
