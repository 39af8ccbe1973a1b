//! Custom-resource handler that re-encrypts the demo bucket's objects under
//! a KMS key by copying each object onto itself with `aws:kms` server-side
//! encryption. Deletion has nothing to clean up.

use serde_json::json;

use crate::adapters::callback::CallbackTransport;
use crate::adapters::object_store::ObjectEncryption;
use crate::config::require_env;
use crate::handlers::respond::{send_failure, send_response};
use crate::runtime::contract::{
    CustomResourceRequest, InvocationIdentity, RequestType, ResponseStatus,
};
use crate::runtime::logging::{log_error, log_info};

const COMPONENT: &str = "s3_encrypt";

/// Matches the listing cap of the bucket this handler targets.
pub const ENCRYPT_LIST_LIMIT: i32 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3EncryptConfig {
    pub bucket_name: String,
    pub kms_key_arn: String,
}

impl S3EncryptConfig {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            bucket_name: require_env("bucket_name")?,
            kms_key_arn: require_env("kms_key_arn")?,
        })
    }
}

pub fn handle_s3_encrypt_event(
    request: &CustomResourceRequest,
    identity: &InvocationIdentity,
    config: &S3EncryptConfig,
    objects: &dyn ObjectEncryption,
    transport: &dyn CallbackTransport,
) {
    match request.request_type {
        RequestType::Create | RequestType::Update => {
            match encrypt_bucket_objects(config, objects) {
                Ok(count) => {
                    log_info(
                        COMPONENT,
                        "objects_encrypted",
                        json!({"bucket": config.bucket_name, "count": count}),
                    );
                    send_response(transport, request, identity, ResponseStatus::Success, json!({}));
                }
                Err(error) => {
                    log_error(COMPONENT, "encryption_failed", json!({"error": error}));
                    send_failure(transport, request, identity, error);
                }
            }
        }
        RequestType::Delete => {
            log_info(COMPONENT, "delete_noop", json!({"request_id": request.request_id}));
            send_response(transport, request, identity, ResponseStatus::Success, json!({}));
        }
    }
}

fn encrypt_bucket_objects(
    config: &S3EncryptConfig,
    objects: &dyn ObjectEncryption,
) -> Result<usize, String> {
    let keys = objects.list_object_keys(&config.bucket_name, ENCRYPT_LIST_LIMIT)?;
    for key in &keys {
        objects.encrypt_object_in_place(&config.bucket_name, key, &config.kms_key_arn)?;
    }
    Ok(keys.len())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::Value;

    use super::*;

    struct RecordingTransport {
        puts: Mutex<Vec<Vec<u8>>>,
    }

    impl RecordingTransport {
        fn new() -> Self {
            Self {
                puts: Mutex::new(Vec::new()),
            }
        }

        fn bodies(&self) -> Vec<String> {
            self.puts
                .lock()
                .expect("poisoned mutex")
                .iter()
                .map(|body| String::from_utf8(body.clone()).expect("body should be utf-8"))
                .collect()
        }
    }

    impl CallbackTransport for RecordingTransport {
        fn put(
            &self,
            _url: &str,
            _headers: &[(String, String)],
            body: &[u8],
        ) -> Result<u16, String> {
            self.puts
                .lock()
                .expect("poisoned mutex")
                .push(body.to_vec());
            Ok(200)
        }
    }

    struct FakeObjects {
        keys: Vec<String>,
        fail_on: Option<&'static str>,
        listed: Mutex<Vec<(String, i32)>>,
        encrypted: Mutex<Vec<(String, String, String)>>,
    }

    impl FakeObjects {
        fn with_keys(keys: &[&str]) -> Self {
            Self {
                keys: keys.iter().map(|key| key.to_string()).collect(),
                fail_on: None,
                listed: Mutex::new(Vec::new()),
                encrypted: Mutex::new(Vec::new()),
            }
        }
    }

    impl ObjectEncryption for FakeObjects {
        fn list_object_keys(&self, bucket: &str, max_keys: i32) -> Result<Vec<String>, String> {
            self.listed
                .lock()
                .expect("poisoned mutex")
                .push((bucket.to_string(), max_keys));
            Ok(self.keys.clone())
        }

        fn encrypt_object_in_place(
            &self,
            bucket: &str,
            key: &str,
            kms_key_arn: &str,
        ) -> Result<(), String> {
            if self.fail_on == Some(key) {
                return Err(format!("AccessDenied copying {key}"));
            }
            self.encrypted.lock().expect("poisoned mutex").push((
                bucket.to_string(),
                key.to_string(),
                kms_key_arn.to_string(),
            ));
            Ok(())
        }
    }

    fn sample_request(request_type: RequestType) -> CustomResourceRequest {
        CustomResourceRequest {
            request_type,
            response_url: "https://callback.example/presigned".to_string(),
            stack_id: "stack-1".to_string(),
            request_id: "req-1".to_string(),
            logical_resource_id: "logical-1".to_string(),
            resource_properties: Value::Null,
        }
    }

    fn sample_identity() -> InvocationIdentity {
        InvocationIdentity {
            function_name: "s3encrypt".to_string(),
            invoked_function_arn: "arn:aws:lambda:us-east-1:123456789012:function:s3encrypt"
                .to_string(),
            log_stream_name: "stream-1".to_string(),
        }
    }

    fn sample_config() -> S3EncryptConfig {
        S3EncryptConfig {
            bucket_name: "demo-data".to_string(),
            kms_key_arn: "arn:aws:kms:us-east-1:123456789012:key/abc".to_string(),
        }
    }

    #[test]
    fn create_encrypts_every_listed_object() {
        let transport = RecordingTransport::new();
        let objects = FakeObjects::with_keys(&["a.txt", "b.txt"]);

        handle_s3_encrypt_event(
            &sample_request(RequestType::Create),
            &sample_identity(),
            &sample_config(),
            &objects,
            &transport,
        );

        assert_eq!(
            *objects.listed.lock().expect("poisoned mutex"),
            vec![("demo-data".to_string(), 100)]
        );
        assert_eq!(
            *objects.encrypted.lock().expect("poisoned mutex"),
            vec![
                (
                    "demo-data".to_string(),
                    "a.txt".to_string(),
                    "arn:aws:kms:us-east-1:123456789012:key/abc".to_string(),
                ),
                (
                    "demo-data".to_string(),
                    "b.txt".to_string(),
                    "arn:aws:kms:us-east-1:123456789012:key/abc".to_string(),
                ),
            ]
        );
        let bodies = transport.bodies();
        assert_eq!(bodies.len(), 1);
        assert!(bodies[0].contains("\"Status\":\"SUCCESS\""));
    }

    #[test]
    fn copy_failure_reports_failed_with_the_error_as_reason() {
        let transport = RecordingTransport::new();
        let objects = FakeObjects {
            fail_on: Some("b.txt"),
            ..FakeObjects::with_keys(&["a.txt", "b.txt", "c.txt"])
        };

        handle_s3_encrypt_event(
            &sample_request(RequestType::Create),
            &sample_identity(),
            &sample_config(),
            &objects,
            &transport,
        );

        let bodies = transport.bodies();
        assert_eq!(bodies.len(), 1);
        assert!(bodies[0].contains("\"Status\":\"FAILED\""));
        assert!(bodies[0].contains("AccessDenied copying b.txt"));
    }

    #[test]
    fn delete_succeeds_without_listing_anything() {
        let transport = RecordingTransport::new();
        let objects = FakeObjects::with_keys(&["a.txt"]);

        handle_s3_encrypt_event(
            &sample_request(RequestType::Delete),
            &sample_identity(),
            &sample_config(),
            &objects,
            &transport,
        );

        assert!(objects.listed.lock().expect("poisoned mutex").is_empty());
        let bodies = transport.bodies();
        assert_eq!(bodies.len(), 1);
        assert!(bodies[0].contains("\"Status\":\"SUCCESS\""));
    }
}
