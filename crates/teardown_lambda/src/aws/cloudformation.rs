use aws_sdk_cloudformation::error::DisplayErrorContext;
use aws_sdk_cloudformation::types::StackStatus;

use super::block_on;
use crate::adapters::stacks::StackControl;

#[derive(Debug, Clone)]
pub struct AwsStackControl {
    client: aws_sdk_cloudformation::Client,
}

impl AwsStackControl {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_cloudformation::Client::new(config),
        }
    }
}

impl StackControl for AwsStackControl {
    fn delete_stack(&self, stack_name: &str) -> Result<(), String> {
        let client = self.client.clone();
        let stack_name = stack_name.to_string();

        block_on(async move {
            client
                .delete_stack()
                .stack_name(&stack_name)
                .send()
                .await
                .map(|_| ())
                .map_err(|error| format!("failed to delete stack {stack_name}: {error}"))
        })
    }

    fn stack_delete_complete(&self, stack_name: &str) -> Result<bool, String> {
        let client = self.client.clone();
        let stack_name = stack_name.to_string();

        block_on(async move {
            match client
                .describe_stacks()
                .stack_name(&stack_name)
                .send()
                .await
            {
                Ok(output) => match output.stacks().first().and_then(|stack| stack.stack_status()) {
                    Some(StackStatus::DeleteComplete) => Ok(true),
                    Some(StackStatus::DeleteFailed) => {
                        Err(format!("stack {stack_name} entered DELETE_FAILED"))
                    }
                    _ => Ok(false),
                },
                Err(error) => {
                    // A deleted stack stops being describable by name.
                    let message = format!("{}", DisplayErrorContext(&error));
                    if message.contains("does not exist") {
                        Ok(true)
                    } else {
                        Err(format!("failed to describe stack {stack_name}: {message}"))
                    }
                }
            }
        })
    }
}
