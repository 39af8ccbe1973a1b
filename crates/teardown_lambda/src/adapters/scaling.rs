pub trait ScalingControl {
    fn complete_lifecycle_action(
        &self,
        hook_name: &str,
        action_token: &str,
        group_name: &str,
        instance_id: &str,
    ) -> Result<(), String>;
    fn delete_lifecycle_hook(&self, hook_name: &str, group_name: &str) -> Result<(), String>;
}
