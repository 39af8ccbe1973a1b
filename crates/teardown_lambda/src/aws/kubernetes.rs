use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::adapters::pods::PodLister;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct PodList {
    #[serde(default)]
    items: Vec<PodItem>,
}

#[derive(Debug, Deserialize)]
struct PodItem {
    metadata: PodMetadata,
}

#[derive(Debug, Deserialize)]
struct PodMetadata {
    name: String,
}

/// Queries the cluster API server directly with a presigned bearer token.
/// The demo cluster's endpoint certificate is not trusted from the Lambda
/// environment, so certificate verification is disabled.
pub struct KubernetesPodLister {
    client: Client,
    endpoint: String,
    bearer_token: String,
}

impl KubernetesPodLister {
    pub fn new(endpoint: &str, bearer_token: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .danger_accept_invalid_certs(true)
            .build()
            .expect("failed to build kubernetes client");
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            bearer_token,
        }
    }
}

impl PodLister for KubernetesPodLister {
    fn list_pod_names(&self) -> Result<Vec<String>, String> {
        let url = format!("{}/api/v1/pods", self.endpoint);

        tokio::task::block_in_place(|| {
            let response = self
                .client
                .get(&url)
                .bearer_auth(&self.bearer_token)
                .send()
                .map_err(|error| format!("failed to query kubernetes api: {error}"))?;

            if !response.status().is_success() {
                return Err(format!(
                    "kubernetes api returned status {}",
                    response.status()
                ));
            }

            let pod_list: PodList = response
                .json()
                .map_err(|error| format!("failed to parse pod list: {error}"))?;
            Ok(pod_list
                .items
                .into_iter()
                .map(|item| item.metadata.name)
                .collect())
        })
    }
}
