/// EKS control-plane operations needed for cluster teardown.
pub trait ClusterControl {
    fn nodegroup_names(&self, cluster: &str) -> Result<Vec<String>, String>;
    fn delete_nodegroup(&self, cluster: &str, nodegroup: &str) -> Result<(), String>;
    /// Terminal-state check: true once the nodegroup no longer exists.
    fn nodegroup_deleted(&self, cluster: &str, nodegroup: &str) -> Result<bool, String>;
    fn delete_cluster(&self, cluster: &str) -> Result<(), String>;
}
