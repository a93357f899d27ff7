//! Persistence of (original, mask) pairs in a remote store.
//!
//! [`PairStore`] is the seam: [`client::HttpPairStore`] talks to the HTTP
//! backend, tests plug in their own implementations.

pub mod client;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::InpaintError;

/// File name of the uploaded original image part.
pub const ORIGINAL_FILE_NAME: &str = "original.png";

/// Store-assigned identifier of a persisted pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PairId(String);

impl PairId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PairId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PairId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Stores hand out either string ids (document stores) or integer ids.
impl<'de> Deserialize<'de> for PairId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Int(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => PairId(s),
            RawId::Int(n) => PairId(n.to_string()),
        })
    }
}

/// One persisted pair as listed by the store.
///
/// Image fields are directly renderable references (data URLs or links).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagePair {
    pub id: PairId,
    pub original_image: String,
    pub mask_image: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
}

/// RFC 3339 の時刻、またはタイムゾーンなしの ISO 8601 時刻（UTC とみなす）を受け付ける。
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_timestamp(&s).map_err(serde::de::Error::custom)
}

pub fn parse_timestamp(s: &str) -> crate::error::Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|naive| naive.and_utc())
        .map_err(|e| InpaintError::validation(format!("Invalid timestamp '{s}': {e}")))
}

/// Successful upload acknowledgement.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SaveReceipt {
    pub id: PairId,
    #[serde(default)]
    pub message: Option<String>,
}

/// A complete pair ready for upload.
///
/// Both images are always present; a half pair cannot be built.
#[derive(Debug, Clone)]
pub struct PairPayload {
    original_png: Vec<u8>,
    mask_png: Vec<u8>,
}

impl PairPayload {
    pub fn new(original_png: Vec<u8>, mask_png: Vec<u8>) -> crate::error::Result<Self> {
        if original_png.is_empty() {
            return Err(InpaintError::validation("Original image is missing"));
        }
        if mask_png.is_empty() {
            return Err(InpaintError::validation("Mask image is missing"));
        }
        Ok(Self {
            original_png,
            mask_png,
        })
    }

    pub fn original_png(&self) -> &[u8] {
        &self.original_png
    }

    pub fn mask_png(&self) -> &[u8] {
        &self.mask_png
    }
}

/// Remote store of image pairs.
///
/// Every call is a single attempt: no retries and no client-side timeout.
#[async_trait]
pub trait PairStore {
    /// `POST /api/upload-pair`
    async fn save(&self, payload: &PairPayload) -> crate::error::Result<SaveReceipt>;

    /// `GET /api/image-pairs`, in the order the store returns them.
    async fn list(&self) -> crate::error::Result<Vec<ImagePair>>;

    /// `GET /api/image-pair/{id}`
    async fn get(&self, id: &PairId) -> crate::error::Result<ImagePair>;

    /// `DELETE /api/image-pair/{id}`
    async fn delete(&self, id: &PairId) -> crate::error::Result<()>;

    /// `GET /health`
    async fn health(&self) -> crate::error::Result<()>;
}
