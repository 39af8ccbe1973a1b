//! Custom-resource response emitter.
//!
//! The callback PUT is the only completion signal CloudFormation receives, so
//! delivery failures are logged and swallowed rather than escalated: failing
//! the invocation would not get a response through either.

use serde_json::{json, Value};

use crate::adapters::callback::CallbackTransport;
use crate::runtime::contract::{
    build_response, CustomResourceRequest, CustomResourceResponse, InvocationIdentity,
    ResponseStatus,
};
use crate::runtime::logging::{log_error, log_info};

const COMPONENT: &str = "cfn_callback";

/// Send a response with protocol defaults for reason and physical id.
pub fn send_response(
    transport: &dyn CallbackTransport,
    request: &CustomResourceRequest,
    identity: &InvocationIdentity,
    status: ResponseStatus,
    data: Value,
) {
    let response = build_response(request, identity, status, data, None, None);
    deliver(transport, &request.response_url, &response);
}

/// Send a FAILED response carrying the error as the reason.
pub fn send_failure(
    transport: &dyn CallbackTransport,
    request: &CustomResourceRequest,
    identity: &InvocationIdentity,
    reason: String,
) {
    let response = build_response(
        request,
        identity,
        ResponseStatus::Failed,
        json!({}),
        None,
        Some(reason),
    );
    deliver(transport, &request.response_url, &response);
}

/// Initialization-failure path: the event never parsed into a full request,
/// so the callback fields are extracted best-effort from the raw payload. The
/// orchestrator is still notified instead of timing out.
pub fn report_init_failure(
    transport: &dyn CallbackTransport,
    event: &Value,
    identity: &InvocationIdentity,
    error: &str,
) {
    log_error(COMPONENT, "handler_init_failed", json!({"error": error}));

    let Some(url) = event.get("ResponseURL").and_then(Value::as_str) else {
        log_error(
            COMPONENT,
            "response_url_missing",
            json!({"error": "cannot notify orchestrator without a ResponseURL"}),
        );
        return;
    };

    let field = |name: &str| {
        event
            .get(name)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    let response = CustomResourceResponse {
        status: ResponseStatus::Failed,
        reason: error.to_string(),
        physical_resource_id: identity.log_stream_name.clone(),
        stack_id: field("StackId"),
        request_id: field("RequestId"),
        logical_resource_id: field("LogicalResourceId"),
        no_echo: false,
        data: json!({}),
    };
    deliver(transport, url, &response);
}

fn deliver(transport: &dyn CallbackTransport, url: &str, response: &CustomResourceResponse) {
    let body = response.to_body();
    let headers = vec![
        ("content-type".to_string(), String::new()),
        ("content-length".to_string(), body.len().to_string()),
    ];

    match transport.put(url, &headers, body.as_bytes()) {
        Ok(status_code) => log_info(
            COMPONENT,
            "response_delivered",
            json!({"status_code": status_code, "body_bytes": body.len()}),
        ),
        Err(error) => log_error(COMPONENT, "response_delivery_failed", json!({"error": error})),
    }
}
