use crate::domain::ports::{Method, Transport, XrpcRequest};
use crate::utils::error::{MergeError, Result};
use crate::utils::validation::validate_url;
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;

pub const DEFAULT_SERVICE: &str = "https://bsky.social";

/// reqwest-backed transport rooted at `<service>/xrpc/`.
///
/// No timeout and no retry: a failed call ends the run.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    xrpc_root: String,
}

impl HttpTransport {
    pub fn new(service: &str) -> Result<Self> {
        validate_url("service", service)?;
        Ok(Self {
            client: Client::new(),
            xrpc_root: format!("{}/xrpc/", service.trim_end_matches('/')),
        })
    }

    pub fn endpoint_url(&self, nsid: &str) -> String {
        format!("{}{}", self.xrpc_root, nsid)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: XrpcRequest) -> Result<serde_json::Value> {
        let url = self.endpoint_url(request.nsid);

        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        if let Some(token) = &request.bearer {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        if let Some(body) = &request.body {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(serde_json::to_vec(body)?);
        }

        tracing::debug!("{:?} {}", request.method, url);
        let response = builder.send().await?;
        let status = response.status();
        tracing::debug!("{} responded with {}", request.nsid, status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MergeError::Http {
                endpoint: request.nsid.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(serde_json::Value::Object(serde_json::Map::new()));
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}
