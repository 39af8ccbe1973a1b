use super::block_on;
use crate::adapters::cluster::ClusterControl;

#[derive(Debug, Clone)]
pub struct AwsClusterControl {
    client: aws_sdk_eks::Client,
}

impl AwsClusterControl {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_eks::Client::new(config),
        }
    }
}

impl ClusterControl for AwsClusterControl {
    fn nodegroup_names(&self, cluster: &str) -> Result<Vec<String>, String> {
        let client = self.client.clone();
        let cluster = cluster.to_string();

        block_on(async move {
            client
                .list_nodegroups()
                .cluster_name(&cluster)
                .send()
                .await
                .map(|output| output.nodegroups().to_vec())
                .map_err(|error| format!("failed to list nodegroups of {cluster}: {error}"))
        })
    }

    fn delete_nodegroup(&self, cluster: &str, nodegroup: &str) -> Result<(), String> {
        let client = self.client.clone();
        let cluster = cluster.to_string();
        let nodegroup = nodegroup.to_string();

        block_on(async move {
            client
                .delete_nodegroup()
                .cluster_name(&cluster)
                .nodegroup_name(&nodegroup)
                .send()
                .await
                .map(|_| ())
                .map_err(|error| format!("failed to delete nodegroup {nodegroup}: {error}"))
        })
    }

    fn nodegroup_deleted(&self, cluster: &str, nodegroup: &str) -> Result<bool, String> {
        let client = self.client.clone();
        let cluster = cluster.to_string();
        let nodegroup = nodegroup.to_string();

        block_on(async move {
            match client
                .describe_nodegroup()
                .cluster_name(&cluster)
                .nodegroup_name(&nodegroup)
                .send()
                .await
            {
                Ok(_) => Ok(false),
                Err(error) => {
                    let service_error = error.into_service_error();
                    if service_error.is_resource_not_found_exception() {
                        Ok(true)
                    } else {
                        Err(format!(
                            "failed to describe nodegroup {nodegroup}: {service_error}"
                        ))
                    }
                }
            }
        })
    }

    fn delete_cluster(&self, cluster: &str) -> Result<(), String> {
        let client = self.client.clone();
        let cluster = cluster.to_string();

        block_on(async move {
            client
                .delete_cluster()
                .name(&cluster)
                .send()
                .await
                .map(|_| ())
                .map_err(|error| format!("failed to delete cluster {cluster}: {error}"))
        })
    }
}
