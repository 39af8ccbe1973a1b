//! EKS teardown behavior shared by more than one handler.

use std::time::Duration;

use crate::adapters::cluster::ClusterControl;
use crate::runtime::contract::InvocationIdentity;
use crate::runtime::sequencer::{wait_until, Sleeper, WaitSettings};

pub const NODEGROUP_WAIT: WaitSettings = WaitSettings {
    delay: Duration::from_secs(30),
    max_attempts: 20,
};

/// The demo cluster is named after the account that owns it.
pub fn account_cluster_name(identity: &InvocationIdentity) -> Result<String, String> {
    Ok(format!("{}-eks", identity.account_id()?))
}

/// Delete every nodegroup of the cluster; returns the deleted names.
pub fn delete_nodegroups(
    cluster: &str,
    control: &dyn ClusterControl,
) -> Result<Vec<String>, String> {
    let nodegroups = control.nodegroup_names(cluster)?;
    for nodegroup in &nodegroups {
        control.delete_nodegroup(cluster, nodegroup)?;
    }
    Ok(nodegroups)
}

/// Delete every nodegroup, then wait for each deletion to finish. The wait
/// covers all deleted nodegroups, not only the last one listed.
pub fn delete_nodegroups_and_wait(
    cluster: &str,
    control: &dyn ClusterControl,
    sleeper: &dyn Sleeper,
) -> Result<(), String> {
    let nodegroups = delete_nodegroups(cluster, control)?;
    for nodegroup in &nodegroups {
        wait_until(
            &format!("nodegroup {nodegroup} deletion"),
            NODEGROUP_WAIT,
            sleeper,
            || control.nodegroup_deleted(cluster, nodegroup),
        )?;
    }
    Ok(())
}
