//! Custom-resource handler tearing down an explicitly named EKS cluster and
//! its eksctl stack. Unlike `stack_resources`, the cluster name comes from
//! configuration rather than the invoking account.

use std::time::Duration;

use serde_json::json;

use crate::adapters::callback::CallbackTransport;
use crate::adapters::cluster::ClusterControl;
use crate::adapters::stacks::StackControl;
use crate::config::require_env;
use crate::handlers::cluster_teardown::delete_nodegroups_and_wait;
use crate::handlers::respond::send_response;
use crate::runtime::contract::{
    CustomResourceRequest, InvocationIdentity, RequestType, ResponseStatus,
};
use crate::runtime::logging::log_info;
use crate::runtime::sequencer::{run_teardown, wait_until, Sleeper, TeardownStep, WaitSettings};

const COMPONENT: &str = "eks_resources";

pub const STACK_WAIT: WaitSettings = WaitSettings {
    delay: Duration::from_secs(60),
    max_attempts: 5,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EksResourcesConfig {
    pub eks_cluster: String,
}

impl EksResourcesConfig {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            eks_cluster: require_env("eks_cluster")?,
        })
    }
}

pub struct EksResourcesAdapters<'a> {
    pub cluster: &'a dyn ClusterControl,
    pub stacks: &'a dyn StackControl,
    pub sleeper: &'a dyn Sleeper,
}

pub fn handle_eks_resources_event(
    request: &CustomResourceRequest,
    identity: &InvocationIdentity,
    config: &EksResourcesConfig,
    adapters: &EksResourcesAdapters<'_>,
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
            let report = run_teardown(COMPONENT, teardown_steps(config, adapters));
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
    config: &'a EksResourcesConfig,
    adapters: &'a EksResourcesAdapters<'a>,
) -> Vec<TeardownStep<'a>> {
    let cluster = config.eks_cluster.as_str();
    vec![
        TeardownStep::new("delete cluster nodegroups", move || {
            delete_nodegroups_and_wait(cluster, adapters.cluster, adapters.sleeper)
        }),
        TeardownStep::new("delete cluster", move || {
            adapters.cluster.delete_cluster(cluster)
        }),
        TeardownStep::new("delete cluster stack", move || {
            let stack_name = format!("eksctl-{cluster}-cluster");
            adapters.stacks.delete_stack(&stack_name)?;
            wait_until(
                &format!("stack {stack_name} deletion"),
                STACK_WAIT,
                adapters.sleeper,
                || adapters.stacks.stack_delete_complete(&stack_name),
            )
        }),
    ]
}
