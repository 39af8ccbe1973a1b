pub trait FunctionControl {
    fn delete_function(&self, function_name: &str) -> Result<(), String>;
}
