pub trait PodLister {
    /// Pod names across all namespaces of the probed cluster.
    fn list_pod_names(&self) -> Result<Vec<String>, String>;
}
