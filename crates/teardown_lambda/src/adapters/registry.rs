pub trait RepositoryStore {
    fn force_delete_repository(&self, registry_id: &str, repository: &str) -> Result<(), String>;
}
