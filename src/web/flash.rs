//! One-shot status banner carried across the POST -> redirect -> GET round trip
//! in a cookie signed with the server's secret key.

use crate::utils::error::{MergeError, Result};
use crate::utils::hex;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use url::form_urlencoded;

type HmacSha256 = Hmac<Sha256>;

pub const COOKIE_NAME: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashCategory {
    Success,
    Danger,
}

impl FlashCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            FlashCategory::Success => "success",
            FlashCategory::Danger => "danger",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "success" => Some(FlashCategory::Success),
            "danger" => Some(FlashCategory::Danger),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub category: FlashCategory,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            category: FlashCategory::Success,
            message: message.into(),
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            category: FlashCategory::Danger,
            message: message.into(),
        }
    }

    /// `Set-Cookie` value holding this flash.
    pub fn to_set_cookie(&self, secret_key: &str) -> Result<String> {
        let payload = form_urlencoded::Serializer::new(String::new())
            .append_pair("c", self.category.as_str())
            .append_pair("m", &self.message)
            .finish();
        let mut mac = keyed_mac(secret_key)?;
        mac.update(payload.as_bytes());
        Ok(format!(
            "{}={}.{}; Path=/; HttpOnly; SameSite=Lax",
            COOKIE_NAME,
            payload,
            hex::encode(&mac.finalize().into_bytes())
        ))
    }

    /// `Set-Cookie` value that removes a consumed flash.
    pub fn clear_cookie() -> String {
        format!("{}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax", COOKIE_NAME)
    }

    /// Read the flash from a `Cookie` request header. Tampered values are ignored.
    pub fn from_cookie_header(header: &str, secret_key: &str) -> Option<Self> {
        let value = header
            .split(';')
            .map(str::trim)
            .find_map(|pair| pair.strip_prefix(COOKIE_NAME)?.strip_prefix('='))?;
        let (payload, signature) = value.rsplit_once('.')?;
        if !verify(secret_key, payload, signature) {
            tracing::warn!("Discarding flash cookie with a bad signature");
            return None;
        }

        let mut category = None;
        let mut message = None;
        for (key, value) in form_urlencoded::parse(payload.as_bytes()) {
            match key.as_ref() {
                "c" => category = FlashCategory::parse(&value),
                "m" => message = Some(value.into_owned()),
                _ => {}
            }
        }
        Some(Self {
            category: category?,
            message: message?,
        })
    }
}

fn keyed_mac(secret_key: &str) -> Result<HmacSha256> {
    HmacSha256::new_from_slice(secret_key.as_bytes())
        .map_err(|e| MergeError::config(format!("unusable flash key: {}", e)))
}

fn verify(secret_key: &str, payload: &str, signature: &str) -> bool {
    let (Ok(mut mac), Some(expected)) = (keyed_mac(secret_key), hex::decode(signature)) else {
        return false;
    };
    mac.update(payload.as_bytes());
    mac.verify_slice(&expected).is_ok()
}
