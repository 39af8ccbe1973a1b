pub trait BucketStore {
    fn empty_bucket(&self, bucket: &str) -> Result<(), String>;
    fn delete_bucket(&self, bucket: &str) -> Result<(), String>;
}

pub trait ObjectEncryption {
    fn list_object_keys(&self, bucket: &str, max_keys: i32) -> Result<Vec<String>, String>;
    fn encrypt_object_in_place(
        &self,
        bucket: &str,
        key: &str,
        kms_key_arn: &str,
    ) -> Result<(), String>;
}
