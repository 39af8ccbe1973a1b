//! Lifecycle-hook handler that removes everything left of the demo account
//! when the bastion instance terminates: the account-named EKS cluster, the
//! Lambda deployment bucket, this function itself, its role, the EventBridge
//! rules that trigger it, and finally the lifecycle hook.
//!
//! This handler is invoked through EventBridge, not CloudFormation, so there
//! is no callback to deliver; the teardown report is the only result.

use crate::adapters::cluster::ClusterControl;
use crate::adapters::events::RuleControl;
use crate::adapters::functions::FunctionControl;
use crate::adapters::object_store::BucketStore;
use crate::adapters::roles::RoleControl;
use crate::adapters::scaling::ScalingControl;
use crate::config::require_env;
use crate::handlers::cluster_teardown::{account_cluster_name, delete_nodegroups};
use crate::runtime::contract::{InvocationIdentity, LifecycleHookEvent};
use crate::runtime::sequencer::{run_teardown, TeardownReport, TeardownStep};

const COMPONENT: &str = "delete_eks";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteEksConfig {
    pub lambda_zips_bucket: String,
    pub eks_delete_function_role: String,
    pub bastion_asg_lifecycle_hook: String,
    pub bastion_asg: String,
}

impl DeleteEksConfig {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            lambda_zips_bucket: require_env("lambda_zips_bucket")?,
            eks_delete_function_role: require_env("eks_delete_function_role")?,
            bastion_asg_lifecycle_hook: require_env("bastion_asg_lifecycle_hook")?,
            bastion_asg: require_env("bastion_asg")?,
        })
    }
}

pub struct DeleteEksAdapters<'a> {
    pub cluster: &'a dyn ClusterControl,
    pub scaling: &'a dyn ScalingControl,
    pub buckets: &'a dyn BucketStore,
    pub functions: &'a dyn FunctionControl,
    pub roles: &'a dyn RoleControl,
    pub rules: &'a dyn RuleControl,
}

pub fn handle_delete_eks_event(
    event: &LifecycleHookEvent,
    identity: &InvocationIdentity,
    config: &DeleteEksConfig,
    adapters: &DeleteEksAdapters<'_>,
) -> TeardownReport {
    let detail = &event.detail;
    let steps = vec![
        TeardownStep::new("delete cluster nodegroups", move || {
            let cluster = account_cluster_name(identity)?;
            delete_nodegroups(&cluster, adapters.cluster).map(|_| ())
        }),
        TeardownStep::new("delete cluster", move || {
            let cluster = account_cluster_name(identity)?;
            adapters.cluster.delete_cluster(&cluster)
        }),
        TeardownStep::new("complete lifecycle action", move || {
            adapters.scaling.complete_lifecycle_action(
                &detail.lifecycle_hook_name,
                &detail.lifecycle_action_token,
                &detail.auto_scaling_group_name,
                &detail.ec2_instance_id,
            )
        }),
        TeardownStep::new("delete lambda zips bucket", move || {
            adapters.buckets.empty_bucket(&config.lambda_zips_bucket)?;
            adapters.buckets.delete_bucket(&config.lambda_zips_bucket)
        }),
        TeardownStep::new("delete this function", move || {
            adapters.functions.delete_function(&identity.function_name)
        }),
        TeardownStep::new("delete function role", move || {
            adapters.roles.delete_role(&config.eks_delete_function_role)
        }),
        TeardownStep::new("delete lifecycle event rules", move || {
            for rule in adapters
                .rules
                .rule_names_by_target(&identity.invoked_function_arn)?
            {
                adapters.rules.delete_rule(&rule)?;
            }
            Ok(())
        }),
        TeardownStep::new("delete lifecycle hook", move || {
            adapters
                .scaling
                .delete_lifecycle_hook(&config.bastion_asg_lifecycle_hook, &config.bastion_asg)
        }),
    ];
    run_teardown(COMPONENT, steps)
}
