use aws_sdk_s3::types::{Delete, ObjectIdentifier, ServerSideEncryption};

use super::block_on;
use crate::adapters::object_store::{BucketStore, ObjectEncryption};

#[derive(Debug, Clone)]
pub struct AwsBucketStore {
    client: aws_sdk_s3::Client,
}

impl AwsBucketStore {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_s3::Client::new(config),
        }
    }
}

impl BucketStore for AwsBucketStore {
    fn empty_bucket(&self, bucket: &str) -> Result<(), String> {
        let client = self.client.clone();
        let bucket = bucket.to_string();

        block_on(async move {
            loop {
                let listing = client
                    .list_objects_v2()
                    .bucket(&bucket)
                    .send()
                    .await
                    .map_err(|error| format!("failed to list objects in {bucket}: {error}"))?;

                let objects = listing.contents();
                if objects.is_empty() {
                    return Ok(());
                }

                let mut delete = Delete::builder();
                for object in objects {
                    if let Some(key) = object.key() {
                        delete = delete.objects(
                            ObjectIdentifier::builder()
                                .key(key)
                                .build()
                                .map_err(|error| format!("invalid object identifier: {error}"))?,
                        );
                    }
                }

                client
                    .delete_objects()
                    .bucket(&bucket)
                    .delete(
                        delete
                            .build()
                            .map_err(|error| format!("invalid delete batch: {error}"))?,
                    )
                    .send()
                    .await
                    .map_err(|error| format!("failed to delete objects in {bucket}: {error}"))?;
            }
        })
    }

    fn delete_bucket(&self, bucket: &str) -> Result<(), String> {
        let client = self.client.clone();
        let bucket = bucket.to_string();

        block_on(async move {
            client
                .delete_bucket()
                .bucket(&bucket)
                .send()
                .await
                .map(|_| ())
                .map_err(|error| format!("failed to delete bucket {bucket}: {error}"))
        })
    }
}

impl ObjectEncryption for AwsBucketStore {
    fn list_object_keys(&self, bucket: &str, max_keys: i32) -> Result<Vec<String>, String> {
        let client = self.client.clone();
        let bucket = bucket.to_string();

        block_on(async move {
            let listing = client
                .list_objects_v2()
                .bucket(&bucket)
                .max_keys(max_keys)
                .send()
                .await
                .map_err(|error| format!("failed to list objects in {bucket}: {error}"))?;

            Ok(listing
                .contents()
                .iter()
                .filter_map(|object| object.key().map(str::to_string))
                .collect())
        })
    }

    fn encrypt_object_in_place(
        &self,
        bucket: &str,
        key: &str,
        kms_key_arn: &str,
    ) -> Result<(), String> {
        let client = self.client.clone();
        let bucket = bucket.to_string();
        let key = key.to_string();
        let kms_key_arn = kms_key_arn.to_string();

        block_on(async move {
            client
                .copy_object()
                .bucket(&bucket)
                .key(&key)
                .copy_source(format!("{bucket}/{key}"))
                .server_side_encryption(ServerSideEncryption::AwsKms)
                .ssekms_key_id(&kms_key_arn)
                .send()
                .await
                .map(|_| ())
                .map_err(|error| format!("failed to re-encrypt {bucket}/{key}: {error}"))
        })
    }
}
