use crate::utils::error::Result;
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// One XRPC call: `nsid` is the method name appended to the API root.
#[derive(Debug, Clone, PartialEq)]
pub struct XrpcRequest {
    pub method: Method,
    pub nsid: &'static str,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    pub bearer: Option<String>,
}

impl XrpcRequest {
    pub fn get(nsid: &'static str) -> Self {
        Self {
            method: Method::Get,
            nsid,
            query: Vec::new(),
            body: None,
            bearer: None,
        }
    }

    pub fn post(nsid: &'static str, body: serde_json::Value) -> Self {
        Self {
            method: Method::Post,
            nsid,
            query: Vec::new(),
            body: Some(body),
            bearer: None,
        }
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Sends XRPC calls to the remote service.
///
/// Implementations attach `Authorization: Bearer` when `bearer` is set and must
/// return an error for any non-2xx response.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: XrpcRequest) -> Result<serde_json::Value>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for &T {
    async fn send(&self, request: XrpcRequest) -> Result<serde_json::Value> {
        (**self).send(request).await
    }
}
