use crate::utils::error::{MergeError, Result};
use url::{ParseError, Url};

/// A `(handle, id)` pair taken from a web URL, e.g. a profile list or starter pack link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceAddress {
    pub handle: String,
    pub id: String,
}

/// Pasted links often lack a scheme (`bsky.app/profile/...`); those are read as https.
fn path_segments(raw: &str) -> Result<Vec<String>> {
    let trimmed = raw.trim();
    let parsed = match Url::parse(trimmed) {
        Err(ParseError::RelativeUrlWithoutBase) => Url::parse(&format!("https://{}", trimmed)),
        other => other,
    };
    let url = parsed.map_err(|e| MergeError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    Ok(url
        .path_segments()
        .map(|segments| {
            segments
                .filter(|segment| !segment.is_empty())
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default())
}

impl ResourceAddress {
    /// `https://bsky.app/profile/<handle>/lists/<id>`: third-from-last and last segments.
    pub fn from_list_url(raw: &str) -> Result<Self> {
        let segments = path_segments(raw)?;
        if segments.len() < 3 {
            return Err(MergeError::InvalidUrl {
                url: raw.to_string(),
                reason: "expected .../<handle>/lists/<id>".to_string(),
            });
        }
        Ok(Self {
            handle: segments[segments.len() - 3].clone(),
            id: segments[segments.len() - 1].clone(),
        })
    }

    /// `https://bsky.app/starter-pack/<handle>/<id>`: the last two segments.
    pub fn from_starter_pack_url(raw: &str) -> Result<Self> {
        let segments = path_segments(raw)?;
        match segments.as_slice() {
            [.., handle, id] => Ok(Self {
                handle: handle.clone(),
                id: id.clone(),
            }),
            _ => Err(MergeError::InvalidUrl {
                url: raw.to_string(),
                reason: "expected .../<handle>/<id>".to_string(),
            }),
        }
    }
}
