use anyhow::Result;
use bsky_list_merge::app::pipelines::import_list_to_target;
use bsky_list_merge::{CliConfig, Credentials, HttpTransport, MergeError};
use clap::Parser;
use httpmock::prelude::*;
use serde_json::json;

const ALICE_LIST: &str = "at://alice/app.bsky.graph.list/abc123";
const BOB_LIST: &str = "at://bob/app.bsky.graph.list/xyz789";

fn mock_session(server: &MockServer) -> httpmock::Mock<'_> {
    server.mock(|when, then| {
        when.method(POST)
            .path("/xrpc/com.atproto.server.createSession")
            .json_body(json!({ "identifier": "me.test", "password": "app-pass" }));
        then.status(200).json_body(json!({
            "did": "did:plc:me",
            "accessJwt": "jwt-123",
            "handle": "me.test"
        }));
    })
}

fn mock_lists<'a>(server: &'a MockServer, actor: &str, uri: &str) -> httpmock::Mock<'a> {
    let body = json!({ "lists": [{ "uri": uri, "name": actor }] });
    let actor = actor.to_string();
    server.mock(move |when, then| {
        when.method(GET)
            .path("/xrpc/app.bsky.graph.getLists")
            .query_param("actor", actor.as_str())
            .query_param("limit", "100")
            .header("Authorization", "Bearer jwt-123");
        then.status(200).json_body(body);
    })
}

/// Source `alice/lists/abc123` with two members merged into `bob/lists/xyz789`.
#[tokio::test]
async fn test_import_copies_each_member_once() -> Result<()> {
    let server = MockServer::start();
    let session = mock_session(&server);
    let alice_lists = mock_lists(&server, "alice", ALICE_LIST);
    let bob_lists = mock_lists(&server, "bob", BOB_LIST);

    let get_list = server.mock(|when, then| {
        when.method(GET)
            .path("/xrpc/app.bsky.graph.getList")
            .query_param("list", ALICE_LIST)
            .query_param("limit", "100");
        then.status(200).json_body(json!({
            "list": { "uri": ALICE_LIST },
            "items": [
                { "uri": "at://alice/app.bsky.graph.listitem/1", "subject": { "did": "did:plc:111" } },
                { "uri": "at://alice/app.bsky.graph.listitem/2", "subject": { "did": "did:plc:222" } }
            ]
        }));
    });

    let create_111 = server.mock(|when, then| {
        when.method(POST)
            .path("/xrpc/com.atproto.repo.createRecord")
            .header("Authorization", "Bearer jwt-123")
            .body_contains("\"subject\":\"did:plc:111\"")
            .body_contains(BOB_LIST)
            .body_contains("\"repo\":\"did:plc:me\"");
        then.status(200).json_body(json!({ "uri": "at://did:plc:me/app.bsky.graph.listitem/a", "cid": "c1" }));
    });
    let create_222 = server.mock(|when, then| {
        when.method(POST)
            .path("/xrpc/com.atproto.repo.createRecord")
            .body_contains("\"subject\":\"did:plc:222\"")
            .body_contains(BOB_LIST);
        then.status(200).json_body(json!({ "uri": "at://did:plc:me/app.bsky.graph.listitem/b", "cid": "c2" }));
    });

    let report = import_list_to_target(
        HttpTransport::new(&server.base_url())?,
        &Credentials::new("me.test", "app-pass"),
        "https://service/profile/alice/lists/abc123",
        "https://service/profile/bob/lists/xyz789",
    )
    .await?;

    session.assert_hits(1);
    alice_lists.assert_hits(1);
    bob_lists.assert_hits(1);
    get_list.assert_hits(1);
    create_111.assert_hits(1);
    create_222.assert_hits(1);
    assert_eq!(report.source.as_str(), ALICE_LIST);
    assert_eq!(report.target.as_str(), BOB_LIST);
    assert_eq!(report.fetched, 2);
    assert_eq!(report.appended, 2);
    Ok(())
}

#[tokio::test]
async fn test_unknown_source_list_is_fatal_before_fetch() -> Result<()> {
    let server = MockServer::start();
    mock_session(&server);
    mock_lists(&server, "alice", ALICE_LIST);
    let get_list = server.mock(|when, then| {
        when.method(GET).path("/xrpc/app.bsky.graph.getList");
        then.status(200).json_body(json!({ "items": [] }));
    });

    let err = import_list_to_target(
        HttpTransport::new(&server.base_url())?,
        &Credentials::new("me.test", "app-pass"),
        "https://service/profile/alice/lists/nope",
        "https://service/profile/bob/lists/xyz789",
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        MergeError::ListNotFound { ref list_id, ref handle } if list_id == "nope" && handle == "alice"
    ));
    get_list.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn test_empty_source_is_silent_noop() -> Result<()> {
    let server = MockServer::start();
    mock_session(&server);
    mock_lists(&server, "alice", ALICE_LIST);
    mock_lists(&server, "bob", BOB_LIST);
    server.mock(|when, then| {
        when.method(GET).path("/xrpc/app.bsky.graph.getList");
        then.status(200).json_body(json!({ "items": [] }));
    });
    let create = server.mock(|when, then| {
        when.method(POST).path("/xrpc/com.atproto.repo.createRecord");
        then.status(200).json_body(json!({}));
    });

    let report = import_list_to_target(
        HttpTransport::new(&server.base_url())?,
        &Credentials::new("me.test", "app-pass"),
        "https://service/profile/alice/lists/abc123",
        "https://service/profile/bob/lists/xyz789",
    )
    .await?;

    assert_eq!(report.appended, 0);
    create.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn test_bad_credentials_surface_http_error() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/xrpc/com.atproto.server.createSession");
        then.status(401)
            .json_body(json!({ "error": "AuthenticationRequired", "message": "Invalid identifier or password" }));
    });
    let lists = server.mock(|when, then| {
        when.method(GET).path("/xrpc/app.bsky.graph.getLists");
        then.status(200).json_body(json!({ "lists": [] }));
    });

    let err = import_list_to_target(
        HttpTransport::new(&server.base_url())?,
        &Credentials::new("me.test", "wrong"),
        "https://service/profile/alice/lists/abc123",
        "https://service/profile/bob/lists/xyz789",
    )
    .await
    .unwrap_err();

    assert!(matches!(err, MergeError::Http { status: 401, .. }));
    lists.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn test_missing_credentials_stop_before_network() -> Result<()> {
    let server = MockServer::start();
    let session = mock_session(&server);

    let config = CliConfig::try_parse_from([
        "bsky-list-merge",
        "--service",
        server.base_url().as_str(),
        "https://service/profile/alice/lists/abc123",
        "https://service/profile/bob/lists/xyz789",
    ])?;

    let err = config.settings(|_| None).unwrap_err();

    assert!(matches!(err, MergeError::MissingConfig { .. }));
    assert_eq!(err.exit_code(), 1);
    session.assert_hits(0);
    Ok(())
}
