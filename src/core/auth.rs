use crate::core::client::XrpcClient;
use crate::domain::model::{CreateSessionRequest, CreateSessionResponse, Session};
use crate::domain::ports::{Transport, XrpcRequest};
use crate::utils::error::Result;

pub const CREATE_SESSION: &str = "com.atproto.server.createSession";

impl<T: Transport> XrpcClient<T> {
    /// Exchange a handle (or email) and app password for a session.
    ///
    /// A response without `did` or `accessJwt` is rejected instead of carried forward.
    pub async fn login(&mut self, identifier: &str, password: &str) -> Result<&Session> {
        tracing::info!("🔑 Creating session for {}", identifier);

        let body = serde_json::to_value(CreateSessionRequest {
            identifier,
            password,
        })?;
        let response: CreateSessionResponse =
            self.request(XrpcRequest::post(CREATE_SESSION, body)).await?;
        let session = Session::try_from(response)?;

        tracing::debug!("Session established for {}", session.did);
        Ok(self.set_session(session))
    }
}

#[cfg(test)]
mod tests {
    use crate::core::client::testing::RecordingTransport;
    use crate::core::client::XrpcClient;
    use crate::domain::ports::Method;
    use crate::utils::error::MergeError;
    use serde_json::json;

    #[tokio::test]
    async fn test_login_posts_credentials_and_stores_session() {
        let transport = RecordingTransport::new(|_| {
            Ok(json!({ "did": "did:plc:me", "accessJwt": "jwt-1", "handle": "me.test" }))
        });
        let mut client = XrpcClient::new(&transport);

        let session = client.login("me.test", "app-pass").await.unwrap();
        assert_eq!(session.did, "did:plc:me");

        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, Method::Post);
        assert_eq!(calls[0].nsid, super::CREATE_SESSION);
        assert_eq!(calls[0].bearer, None);
        assert_eq!(
            calls[0].body,
            Some(json!({ "identifier": "me.test", "password": "app-pass" }))
        );
        assert_eq!(client.account_did().unwrap(), "did:plc:me");
    }

    #[tokio::test]
    async fn test_login_fails_fast_without_token() {
        let transport = RecordingTransport::new(|_| Ok(json!({ "did": "did:plc:me" })));
        let mut client = XrpcClient::new(&transport);

        let err = client.login("me.test", "app-pass").await.unwrap_err();
        assert!(matches!(err, MergeError::InvalidSession { .. }));
        assert!(client.session().is_none());
    }

    #[tokio::test]
    async fn test_login_propagates_http_error() {
        let transport = RecordingTransport::new(|_| {
            Err(MergeError::Http {
                endpoint: super::CREATE_SESSION.to_string(),
                status: 401,
                body: "{}".to_string(),
            })
        });
        let mut client = XrpcClient::new(&transport);

        let err = client.login("me.test", "bad").await.unwrap_err();
        assert!(matches!(err, MergeError::Http { status: 401, .. }));
    }
}
