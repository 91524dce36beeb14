use crate::utils::error::{MergeError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const LIST_ITEM_COLLECTION: &str = "app.bsky.graph.listitem";

/// Authenticated identity for one run. Never persisted or refreshed.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub did: String,
    pub access_jwt: String,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("did", &self.did)
            .field("access_jwt", &"<redacted>")
            .finish()
    }
}

/// Fully-qualified AT-URI of a list, e.g. `at://did:plc:abc/app.bsky.graph.list/3k...`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListRef(String);

impl ListRef {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of looking up a list or starter pack by handle and short ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(ListRef),
    NotFound,
}

impl Resolution {
    pub fn found(self) -> Option<ListRef> {
        match self {
            Resolution::Found(list) => Some(list),
            Resolution::NotFound => None,
        }
    }

    /// Treat absence as fatal with the supplied error.
    pub fn require(self, err: impl FnOnce() -> MergeError) -> Result<ListRef> {
        self.found().ok_or_else(err)
    }
}

/// Last path segment of an AT-URI (the record key).
pub fn record_key(uri: &str) -> &str {
    uri.rsplit('/').next().unwrap_or(uri)
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateSessionRequest<'a> {
    pub identifier: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionResponse {
    pub did: Option<String>,
    pub access_jwt: Option<String>,
    pub handle: Option<String>,
}

impl TryFrom<CreateSessionResponse> for Session {
    type Error = MergeError;

    fn try_from(response: CreateSessionResponse) -> Result<Self> {
        let did = response
            .did
            .filter(|did| !did.is_empty())
            .ok_or_else(|| MergeError::InvalidSession {
                field: "did".to_string(),
            })?;
        let access_jwt = response
            .access_jwt
            .filter(|jwt| !jwt.is_empty())
            .ok_or_else(|| MergeError::InvalidSession {
                field: "accessJwt".to_string(),
            })?;
        Ok(Session { did, access_jwt })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListView {
    pub uri: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GetListsResponse {
    #[serde(default)]
    pub lists: Vec<ListView>,
    pub cursor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileView {
    pub did: String,
    pub handle: Option<String>,
}

/// One member of a list as returned by `app.bsky.graph.getList`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItemView {
    pub uri: Option<String>,
    pub subject: ProfileView,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GetListResponse {
    #[serde(default)]
    pub items: Vec<ListItemView>,
    pub cursor: Option<String>,
}

impl GetListResponse {
    /// The cursor for the next page, if any. An empty string ends pagination too.
    pub fn next_cursor(&self) -> Option<&str> {
        self.cursor.as_deref().filter(|cursor| !cursor.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StarterPackViewBasic {
    pub uri: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetActorStarterPacksResponse {
    #[serde(default)]
    pub starter_packs: Vec<StarterPackViewBasic>,
    pub cursor: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListViewBasic {
    pub uri: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StarterPackView {
    pub uri: String,
    pub list: Option<ListViewBasic>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetStarterPackResponse {
    pub starter_pack: StarterPackView,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItemRecord {
    #[serde(rename = "$type")]
    pub record_type: &'static str,
    pub created_at: String,
    pub subject: String,
    pub list: ListRef,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateRecordRequest {
    pub collection: &'static str,
    pub repo: String,
    pub record: ListItemRecord,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateRecordResponse {
    pub uri: Option<String>,
    pub cid: Option<String>,
}

/// Summary of one merge run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeReport {
    pub source: ListRef,
    pub target: ListRef,
    pub fetched: usize,
    pub appended: usize,
}
