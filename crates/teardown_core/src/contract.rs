//! CloudFormation custom-resource request/response contracts.
//!
//! Field names and ordering follow the custom-resource wire protocol exactly;
//! the response body is PUT to the presigned `ResponseURL` of the inbound
//! event with a `content-length` header matching the serialized byte length.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RequestType {
    Create,
    Update,
    Delete,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ResponseStatus {
    #[serde(rename = "SUCCESS")]
    Success,
    #[serde(rename = "FAILED")]
    Failed,
}

/// Inbound custom-resource lifecycle event, provided once per invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomResourceRequest {
    #[serde(rename = "RequestType")]
    pub request_type: RequestType,
    #[serde(rename = "ResponseURL")]
    pub response_url: String,
    #[serde(rename = "StackId")]
    pub stack_id: String,
    #[serde(rename = "RequestId")]
    pub request_id: String,
    #[serde(rename = "LogicalResourceId")]
    pub logical_resource_id: String,
    #[serde(rename = "ResourceProperties", default)]
    pub resource_properties: Value,
}

/// Fixed-shape status payload sent back to CloudFormation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomResourceResponse {
    #[serde(rename = "Status")]
    pub status: ResponseStatus,
    #[serde(rename = "Reason")]
    pub reason: String,
    #[serde(rename = "PhysicalResourceId")]
    pub physical_resource_id: String,
    #[serde(rename = "StackId")]
    pub stack_id: String,
    #[serde(rename = "RequestId")]
    pub request_id: String,
    #[serde(rename = "LogicalResourceId")]
    pub logical_resource_id: String,
    #[serde(rename = "NoEcho")]
    pub no_echo: bool,
    #[serde(rename = "Data")]
    pub data: Value,
}

impl CustomResourceResponse {
    pub fn to_body(&self) -> String {
        serde_json::to_string(self).expect("response payload should serialize")
    }
}

/// Identity of the running invocation, used for response defaults and for
/// deriving account-scoped resource names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationIdentity {
    pub function_name: String,
    pub invoked_function_arn: String,
    pub log_stream_name: String,
}

impl InvocationIdentity {
    /// Account id is the fifth colon-separated segment of the function ARN.
    pub fn account_id(&self) -> Result<&str, String> {
        match self.invoked_function_arn.split(':').nth(4) {
            Some(account) if !account.is_empty() => Ok(account),
            _ => Err(format!(
                "invoked function ARN is missing an account id: {}",
                self.invoked_function_arn
            )),
        }
    }
}

/// Auto Scaling lifecycle-hook notification as delivered through EventBridge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LifecycleHookEvent {
    pub detail: LifecycleHookDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LifecycleHookDetail {
    #[serde(rename = "LifecycleHookName")]
    pub lifecycle_hook_name: String,
    #[serde(rename = "LifecycleActionToken")]
    pub lifecycle_action_token: String,
    #[serde(rename = "AutoScalingGroupName")]
    pub auto_scaling_group_name: String,
    #[serde(rename = "EC2InstanceId")]
    pub ec2_instance_id: String,
}

/// Interpret an arbitrary invocation payload as a custom-resource request.
///
/// Mappings without a `RequestType` field are not custom-resource events and
/// yield `Ok(None)`; the caller should acknowledge and ignore them. A payload
/// that carries `RequestType` but fails to parse is an initialization error.
pub fn parse_custom_resource_request(
    event: &Value,
) -> Result<Option<CustomResourceRequest>, String> {
    let Some(object) = event.as_object() else {
        return Err("Request payload must be a JSON object".to_string());
    };

    if !object.contains_key("RequestType") {
        return Ok(None);
    }

    serde_json::from_value(event.clone())
        .map(Some)
        .map_err(|error| format!("Malformed custom resource event: {error}"))
}

/// Build a response payload from invocation context, applying the protocol
/// defaults: the reason points at the CloudWatch log stream and the physical
/// resource id falls back to the log stream name.
pub fn build_response(
    request: &CustomResourceRequest,
    identity: &InvocationIdentity,
    status: ResponseStatus,
    data: Value,
    physical_resource_id: Option<String>,
    reason: Option<String>,
) -> CustomResourceResponse {
    CustomResourceResponse {
        status,
        reason: reason.unwrap_or_else(|| {
            format!(
                "See the details in CloudWatch Log Stream: {}",
                identity.log_stream_name
            )
        }),
        physical_resource_id: physical_resource_id
            .unwrap_or_else(|| identity.log_stream_name.clone()),
        stack_id: request.stack_id.clone(),
        request_id: request.request_id.clone(),
        logical_resource_id: request.logical_resource_id.clone(),
        no_echo: false,
        data,
    }
}
