use super::block_on;
use crate::adapters::roles::RoleControl;

#[derive(Debug, Clone)]
pub struct AwsRoleControl {
    client: aws_sdk_iam::Client,
}

impl AwsRoleControl {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_iam::Client::new(config),
        }
    }
}

impl RoleControl for AwsRoleControl {
    fn delete_role(&self, role_name: &str) -> Result<(), String> {
        let client = self.client.clone();
        let role_name = role_name.to_string();

        block_on(async move {
            client
                .delete_role()
                .role_name(&role_name)
                .send()
                .await
                .map(|_| ())
                .map_err(|error| format!("failed to delete role {role_name}: {error}"))
        })
    }
}
