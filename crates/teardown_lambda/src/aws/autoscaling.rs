use super::block_on;
use crate::adapters::scaling::ScalingControl;

const CONTINUE_RESULT: &str = "CONTINUE";

#[derive(Debug, Clone)]
pub struct AwsScalingControl {
    client: aws_sdk_autoscaling::Client,
}

impl AwsScalingControl {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_autoscaling::Client::new(config),
        }
    }
}

impl ScalingControl for AwsScalingControl {
    fn complete_lifecycle_action(
        &self,
        hook_name: &str,
        action_token: &str,
        group_name: &str,
        instance_id: &str,
    ) -> Result<(), String> {
        let client = self.client.clone();
        let hook_name = hook_name.to_string();
        let action_token = action_token.to_string();
        let group_name = group_name.to_string();
        let instance_id = instance_id.to_string();

        block_on(async move {
            client
                .complete_lifecycle_action()
                .lifecycle_hook_name(&hook_name)
                .lifecycle_action_token(&action_token)
                .auto_scaling_group_name(&group_name)
                .lifecycle_action_result(CONTINUE_RESULT)
                .instance_id(&instance_id)
                .send()
                .await
                .map(|_| ())
                .map_err(|error| {
                    format!("failed to complete lifecycle action {hook_name}: {error}")
                })
        })
    }

    fn delete_lifecycle_hook(&self, hook_name: &str, group_name: &str) -> Result<(), String> {
        let client = self.client.clone();
        let hook_name = hook_name.to_string();
        let group_name = group_name.to_string();

        block_on(async move {
            client
                .delete_lifecycle_hook()
                .lifecycle_hook_name(&hook_name)
                .auto_scaling_group_name(&group_name)
                .send()
                .await
                .map(|_| ())
                .map_err(|error| format!("failed to delete lifecycle hook {hook_name}: {error}"))
        })
    }
}
