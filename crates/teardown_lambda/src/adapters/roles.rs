pub trait RoleControl {
    fn delete_role(&self, role_name: &str) -> Result<(), String>;
}
