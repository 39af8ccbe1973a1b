use super::block_on;
use crate::adapters::functions::FunctionControl;

#[derive(Debug, Clone)]
pub struct AwsFunctionControl {
    client: aws_sdk_lambda::Client,
}

impl AwsFunctionControl {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_lambda::Client::new(config),
        }
    }
}

impl FunctionControl for AwsFunctionControl {
    fn delete_function(&self, function_name: &str) -> Result<(), String> {
        let client = self.client.clone();
        let function_name = function_name.to_string();

        block_on(async move {
            client
                .delete_function()
                .function_name(&function_name)
                .send()
                .await
                .map(|_| ())
                .map_err(|error| format!("failed to delete function {function_name}: {error}"))
        })
    }
}
