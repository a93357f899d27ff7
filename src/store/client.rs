//! HTTP client for the image-pair backend.
//!
//! Wraps the upload, listing, lookup, deletion and health endpoints
//! using [`reqwest`].

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

use super::{ImagePair, ORIGINAL_FILE_NAME, PairId, PairPayload, PairStore, SaveReceipt};
use crate::error::InpaintError;
use crate::mask::export::MASK_FILE_NAME;

const PNG_MIME: &str = "image/png";

/// HTTP client for a single backend instance.
pub struct HttpPairStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPairStore {
    /// Create a client for the backend at `base_url`, e.g. `http://localhost:8000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build `{base_url}/{segments...}` with each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> crate::error::Result<reqwest::Url> {
        let mut url = reqwest::Url::parse(&self.base_url).map_err(|e| {
            InpaintError::config(format!("Invalid store URL '{}': {e}", self.base_url))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                InpaintError::config(format!("Store URL cannot be a base: '{}'", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // ---- private helpers ----

    /// Turn a non-2xx response into [`InpaintError::StoreStatus`] carrying
    /// the body text.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> crate::error::Result<reqwest::Response> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(InpaintError::StoreStatus {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> crate::error::Result<T> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn check_status(response: reqwest::Response) -> crate::error::Result<()> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

#[async_trait]
impl PairStore for HttpPairStore {
    async fn save(&self, payload: &PairPayload) -> crate::error::Result<SaveReceipt> {
        let original = Part::bytes(payload.original_png().to_vec())
            .file_name(ORIGINAL_FILE_NAME)
            .mime_str(PNG_MIME)?;
        let mask = Part::bytes(payload.mask_png().to_vec())
            .file_name(MASK_FILE_NAME)
            .mime_str(PNG_MIME)?;
        let form = Form::new().part("original", original).part("mask", mask);

        let url = self.endpoint(&["api", "upload-pair"])?;
        tracing::info!(%url, "uploading image pair");
        let response = self.client.post(url).multipart(form).send().await?;

        let receipt: SaveReceipt = Self::parse_response(response).await?;
        tracing::info!(id = %receipt.id, "image pair saved");
        Ok(receipt)
    }

    async fn list(&self) -> crate::error::Result<Vec<ImagePair>> {
        let url = self.endpoint(&["api", "image-pairs"])?;
        let response = self.client.get(url).send().await?;
        let pairs: Vec<ImagePair> = Self::parse_response(response).await?;
        tracing::debug!(count = pairs.len(), "image pairs listed");
        Ok(pairs)
    }

    async fn get(&self, id: &PairId) -> crate::error::Result<ImagePair> {
        let url = self.endpoint(&["api", "image-pair", id.as_str()])?;
        let response = self.client.get(url).send().await?;
        Self::parse_response(response).await
    }

    async fn delete(&self, id: &PairId) -> crate::error::Result<()> {
        let url = self.endpoint(&["api", "image-pair", id.as_str()])?;
        let response = self.client.delete(url).send().await?;
        Self::check_status(response).await?;
        tracing::info!(%id, "image pair deleted");
        Ok(())
    }

    async fn health(&self) -> crate::error::Result<()> {
        let url = self.endpoint(&["health"])?;
        let response = self.client.get(url).send().await?;
        Self::check_status(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_segments() {
        let store = HttpPairStore::new("http://localhost:8000");
        let url = store.endpoint(&["api", "image-pair", "42"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/image-pair/42");
    }

    #[test]
    fn test_endpoint_handles_trailing_slash_and_prefix() {
        let store = HttpPairStore::new("http://example.com/inpaint/");
        let url = store.endpoint(&["api", "image-pairs"]).unwrap();
        assert_eq!(url.as_str(), "http://example.com/inpaint/api/image-pairs");
    }

    #[test]
    fn test_endpoint_escapes_id() {
        let store = HttpPairStore::new("http://localhost:8000");
        let url = store.endpoint(&["api", "image-pair", "a/b"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/image-pair/a%2Fb");
    }

    #[test]
    fn test_endpoint_rejects_invalid_url() {
        let store = HttpPairStore::new("not a url");
        assert!(store.endpoint(&["health"]).is_err());
    }
}
