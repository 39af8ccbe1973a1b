use std::time::Duration;

use reqwest::blocking::Client;

use crate::adapters::callback::CallbackTransport;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Delivers the custom-resource response to the presigned callback URL.
#[derive(Debug, Clone)]
pub struct HttpCallbackTransport {
    client: Client,
}

impl HttpCallbackTransport {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build callback client");
        Self { client }
    }
}

impl Default for HttpCallbackTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl CallbackTransport for HttpCallbackTransport {
    fn put(&self, url: &str, headers: &[(String, String)], body: &[u8]) -> Result<u16, String> {
        let client = self.client.clone();
        let url = url.to_string();
        let headers = headers.to_vec();
        let body = body.to_vec();

        tokio::task::block_in_place(move || {
            let mut request = client.put(url).body(body);
            for (name, value) in &headers {
                request = request.header(name.as_str(), value.as_str());
            }
            request
                .send()
                .map(|response| response.status().as_u16())
                .map_err(|error| format!("failed to PUT callback response: {error}"))
        })
    }
}
