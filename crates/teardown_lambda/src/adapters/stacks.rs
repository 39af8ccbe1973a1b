pub trait StackControl {
    fn delete_stack(&self, stack_name: &str) -> Result<(), String>;
    /// Terminal-state check: true once the stack is gone or DELETE_COMPLETE.
    fn stack_delete_complete(&self, stack_name: &str) -> Result<bool, String>;
}
