use super::block_on;
use crate::adapters::events::RuleControl;

#[derive(Debug, Clone)]
pub struct AwsRuleControl {
    client: aws_sdk_eventbridge::Client,
}

impl AwsRuleControl {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_eventbridge::Client::new(config),
        }
    }
}

impl RuleControl for AwsRuleControl {
    fn rule_names_by_target(&self, target_arn: &str) -> Result<Vec<String>, String> {
        let client = self.client.clone();
        let target_arn = target_arn.to_string();

        block_on(async move {
            client
                .list_rule_names_by_target()
                .target_arn(&target_arn)
                .send()
                .await
                .map(|output| output.rule_names().to_vec())
                .map_err(|error| format!("failed to list rules targeting {target_arn}: {error}"))
        })
    }

    fn delete_rule(&self, rule_name: &str) -> Result<(), String> {
        let client = self.client.clone();
        let rule_name = rule_name.to_string();

        block_on(async move {
            client
                .delete_rule()
                .name(&rule_name)
                .send()
                .await
                .map(|_| ())
                .map_err(|error| format!("failed to delete rule {rule_name}: {error}"))
        })
    }
}
