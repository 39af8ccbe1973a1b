//! Custom-resource handler that verifies API-server access to the demo EKS
//! cluster by listing pods across all namespaces on stack creation.

use serde_json::json;

use crate::adapters::callback::CallbackTransport;
use crate::adapters::pods::PodLister;
use crate::config::require_env;
use crate::handlers::respond::{send_failure, send_response};
use crate::runtime::contract::{
    CustomResourceRequest, InvocationIdentity, RequestType, ResponseStatus,
};
use crate::runtime::logging::{log_error, log_info};

const COMPONENT: &str = "cluster_probe";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterProbeConfig {
    pub eks_cluster_name: String,
    pub eks_cluster_region: String,
    pub eks_cluster_endpoint: String,
}

impl ClusterProbeConfig {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            eks_cluster_name: require_env("eks_cluster_name")?,
            eks_cluster_region: require_env("eks_cluster_region")?,
            eks_cluster_endpoint: require_env("eks_cluster_endpoint")?,
        })
    }
}

pub fn handle_cluster_probe_event(
    request: &CustomResourceRequest,
    identity: &InvocationIdentity,
    pods: &dyn PodLister,
    transport: &dyn CallbackTransport,
) {
    match request.request_type {
        RequestType::Create | RequestType::Update => match pods.list_pod_names() {
            Ok(names) => {
                log_info(
                    COMPONENT,
                    "pods_listed",
                    json!({"count": names.len(), "pods": names}),
                );
                send_response(
                    transport,
                    request,
                    identity,
                    ResponseStatus::Success,
                    json!({"Message": "created"}),
                );
            }
            Err(error) => {
                log_error(COMPONENT, "probe_failed", json!({"error": error}));
                send_failure(transport, request, identity, error);
            }
        },
        RequestType::Delete => {
            send_response(
                transport,
                request,
                identity,
                ResponseStatus::Success,
                json!({"Message": "deleted"}),
            );
        }
    }
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

    struct FakePods {
        result: Result<Vec<String>, String>,
        calls: Mutex<u32>,
    }

    impl PodLister for FakePods {
        fn list_pod_names(&self) -> Result<Vec<String>, String> {
            *self.calls.lock().expect("poisoned mutex") += 1;
            self.result.clone()
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
            function_name: "setup".to_string(),
            invoked_function_arn: "arn:aws:lambda:us-east-1:123456789012:function:setup"
                .to_string(),
            log_stream_name: "stream-1".to_string(),
        }
    }

    #[test]
    fn create_probes_the_cluster_and_reports_created() {
        let transport = RecordingTransport::new();
        let pods = FakePods {
            result: Ok(vec!["kube-dns".to_string(), "aws-node".to_string()]),
            calls: Mutex::new(0),
        };

        handle_cluster_probe_event(
            &sample_request(RequestType::Create),
            &sample_identity(),
            &pods,
            &transport,
        );

        assert_eq!(*pods.calls.lock().expect("poisoned mutex"), 1);
        let bodies = transport.bodies();
        assert_eq!(bodies.len(), 1);
        assert!(bodies[0].contains("\"Status\":\"SUCCESS\""));
        assert!(bodies[0].contains("\"Message\":\"created\""));
    }

    #[test]
    fn probe_failure_reports_failed() {
        let transport = RecordingTransport::new();
        let pods = FakePods {
            result: Err("kubernetes api returned status 401".to_string()),
            calls: Mutex::new(0),
        };

        handle_cluster_probe_event(
            &sample_request(RequestType::Update),
            &sample_identity(),
            &pods,
            &transport,
        );

        let bodies = transport.bodies();
        assert_eq!(bodies.len(), 1);
        assert!(bodies[0].contains("\"Status\":\"FAILED\""));
        assert!(bodies[0].contains("kubernetes api returned status 401"));
    }

    #[test]
    fn delete_skips_the_probe_and_reports_deleted() {
        let transport = RecordingTransport::new();
        let pods = FakePods {
            result: Ok(Vec::new()),
            calls: Mutex::new(0),
        };

        handle_cluster_probe_event(
            &sample_request(RequestType::Delete),
            &sample_identity(),
            &pods,
            &transport,
        );

        assert_eq!(*pods.calls.lock().expect("poisoned mutex"), 0);
        let bodies = transport.bodies();
        assert_eq!(bodies.len(), 1);
        assert!(bodies[0].contains("\"Message\":\"deleted\""));
    }
}
