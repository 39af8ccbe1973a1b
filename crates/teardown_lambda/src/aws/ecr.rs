use super::block_on;
use crate::adapters::registry::RepositoryStore;

#[derive(Debug, Clone)]
pub struct AwsRepositoryStore {
    client: aws_sdk_ecr::Client,
}

impl AwsRepositoryStore {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_ecr::Client::new(config),
        }
    }
}

impl RepositoryStore for AwsRepositoryStore {
    fn force_delete_repository(&self, registry_id: &str, repository: &str) -> Result<(), String> {
        let client = self.client.clone();
        let registry_id = registry_id.to_string();
        let repository = repository.to_string();

        block_on(async move {
            client
                .delete_repository()
                .registry_id(&registry_id)
                .repository_name(&repository)
                .force(true)
                .send()
                .await
                .map(|_| ())
                .map_err(|error| format!("failed to delete repository {repository}: {error}"))
        })
    }
}
