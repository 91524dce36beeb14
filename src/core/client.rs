use crate::domain::model::Session;
use crate::domain::ports::{Transport, XrpcRequest};
use crate::utils::error::{MergeError, Result};
use serde::de::DeserializeOwned;

/// Typed XRPC client over a [`Transport`], holding the session once logged in.
pub struct XrpcClient<T: Transport> {
    transport: T,
    session: Option<Session>,
}

impl<T: Transport> XrpcClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            session: None,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub(crate) fn set_session(&mut self, session: Session) -> &Session {
        self.session.insert(session)
    }

    /// DID of the logged-in account, the repo that new records are written to.
    pub fn account_did(&self) -> Result<&str> {
        self.session
            .as_ref()
            .map(|session| session.did.as_str())
            .ok_or_else(|| MergeError::InvalidSession {
                field: "did".to_string(),
            })
    }

    pub async fn request<R: DeserializeOwned>(&self, mut request: XrpcRequest) -> Result<R> {
        if let Some(session) = &self.session {
            request.bearer = Some(session.access_jwt.clone());
        }
        let value = self.transport.send(request).await?;
        Ok(serde_json::from_value(value)?)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_bearer_attached_only_after_login() {
        let transport = RecordingTransport::new(|_| Ok(json!({})));
        let mut client = XrpcClient::new(&transport);

        let _: serde_json::Value = client
            .request(XrpcRequest::get("app.bsky.graph.getLists"))
            .await
            .unwrap();
        client.set_session(Session {
            did: "did:plc:me".to_string(),
            access_jwt: "jwt-1".to_string(),
        });
        let _: serde_json::Value = client
            .request(XrpcRequest::get("app.bsky.graph.getLists"))
            .await
            .unwrap();

        let calls = transport.calls();
        assert_eq!(calls[0].bearer, None);
        assert_eq!(calls[1].bearer.as_deref(), Some("jwt-1"));
    }

    #[test]
    fn test_account_did_requires_session() {
        let client = XrpcClient::new(RecordingTransport::new(|_| Ok(json!({}))));
        assert!(matches!(
            client.account_did(),
            Err(MergeError::InvalidSession { .. })
        ));
    }
}
