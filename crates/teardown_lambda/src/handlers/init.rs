//! Shared initialization sequence for the custom-resource entry points.
//!
//! Parsing the payload and resolving configuration both happen before any
//! AWS client is touched; a failure in either produces a FAILED callback and
//! stops the invocation without reaching a handler.

use serde_json::{json, Value};

use crate::adapters::callback::CallbackTransport;
use crate::handlers::respond::report_init_failure;
use crate::runtime::contract::{
    parse_custom_resource_request, CustomResourceRequest, InvocationIdentity,
};
use crate::runtime::logging::log_info;

pub enum Initialization<C> {
    /// Parsed request plus resolved configuration, ready for dispatch.
    Ready {
        request: CustomResourceRequest,
        config: C,
    },
    /// Not a custom-resource event; acknowledged and skipped.
    Ignored,
    /// Parse or configuration failure, already reported through the callback.
    Failed,
}

pub fn initialize_custom_resource<C>(
    component: &str,
    payload: &Value,
    identity: &InvocationIdentity,
    transport: &dyn CallbackTransport,
    load_config: impl FnOnce() -> Result<C, String>,
) -> Initialization<C> {
    let request = match parse_custom_resource_request(payload) {
        Ok(Some(request)) => request,
        Ok(None) => {
            log_info(component, "event_ignored", json!({"payload": payload}));
            return Initialization::Ignored;
        }
        Err(error) => {
            report_init_failure(transport, payload, identity, &error);
            return Initialization::Failed;
        }
    };

    match load_config() {
        Ok(config) => Initialization::Ready { request, config },
        Err(error) => {
            report_init_failure(transport, payload, identity, &error);
            Initialization::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::config::require_env;
    use crate::handlers::respond::tests::RecordingTransport;

    fn sample_identity() -> InvocationIdentity {
        InvocationIdentity {
            function_name: "resources".to_string(),
            invoked_function_arn: "arn:aws:lambda:us-east-1:123456789012:function:resources"
                .to_string(),
            log_stream_name: "stream-1".to_string(),
        }
    }

    fn sample_payload() -> Value {
        json!({
            "RequestType": "Delete",
            "ResponseURL": "https://callback.example/presigned",
            "StackId": "stack-1",
            "RequestId": "req-1",
            "LogicalResourceId": "logical-1"
        })
    }

    #[test]
    fn missing_env_var_fails_with_callback_before_any_handler_runs() {
        let transport = RecordingTransport::new();

        let outcome = initialize_custom_resource(
            "stack_resources",
            &sample_payload(),
            &sample_identity(),
            &transport,
            || require_env("init_test_absent_bucket_var"),
        );

        assert!(matches!(outcome, Initialization::Failed));
        let puts = transport.puts.lock().expect("poisoned mutex");
        assert_eq!(puts.len(), 1);
        let body = String::from_utf8(puts[0].2.clone()).expect("body should be utf-8");
        assert!(body.contains("\"Status\":\"FAILED\""));
        assert!(body.contains("init_test_absent_bucket_var must be configured"));
    }

    #[test]
    fn non_custom_resource_event_is_ignored_without_loading_config() {
        let transport = RecordingTransport::new();
        let mut config_loads = 0;

        let outcome = initialize_custom_resource(
            "stack_resources",
            &json!({"detail": {"source": "scheduler"}}),
            &sample_identity(),
            &transport,
            || {
                config_loads += 1;
                Ok(())
            },
        );

        assert!(matches!(outcome, Initialization::Ignored));
        assert_eq!(config_loads, 0);
        assert!(transport.puts.lock().expect("poisoned mutex").is_empty());
    }

    #[test]
    fn malformed_event_fails_with_callback_without_loading_config() {
        let transport = RecordingTransport::new();
        let mut config_loads = 0;

        let outcome = initialize_custom_resource(
            "stack_resources",
            &json!({
                "RequestType": "Destroy",
                "ResponseURL": "https://callback.example/presigned"
            }),
            &sample_identity(),
            &transport,
            || {
                config_loads += 1;
                Ok(())
            },
        );

        assert!(matches!(outcome, Initialization::Failed));
        assert_eq!(config_loads, 0);
        let puts = transport.puts.lock().expect("poisoned mutex");
        assert_eq!(puts.len(), 1);
        let body = String::from_utf8(puts[0].2.clone()).expect("body should be utf-8");
        assert!(body.contains("Malformed custom resource event"));
    }

    #[test]
    fn parsed_request_and_config_come_back_ready() {
        let transport = RecordingTransport::new();

        let outcome = initialize_custom_resource(
            "stack_resources",
            &sample_payload(),
            &sample_identity(),
            &transport,
            || Ok("demo-bucket".to_string()),
        );

        match outcome {
            Initialization::Ready { request, config } => {
                assert_eq!(request.request_id, "req-1");
                assert_eq!(config, "demo-bucket");
            }
            _ => panic!("initialization should be ready"),
        }
        assert!(transport.puts.lock().expect("poisoned mutex").is_empty());
    }
}
