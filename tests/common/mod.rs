// Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::future::Future;
use std::io::Cursor;
use std::sync::Mutex;
use std::task::{Context, Waker};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use image::{ImageFormat, Rgba, RgbaImage};

use inpaint_mask::error::{InpaintError, Result};
use inpaint_mask::store::{ImagePair, PairId, PairPayload, PairStore, SaveReceipt};

/// Encode a solid-colour RGBA image as PNG bytes.
pub fn png_bytes(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba(color));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)
        .expect("encode test png");
    buf.into_inner()
}

pub fn sample_pair(id: &str, minute: u32) -> ImagePair {
    ImagePair {
        id: PairId::new(id),
        original_image: format!("data:image/png;base64,ORIGINAL{id}"),
        mask_image: format!("data:image/png;base64,MASK{id}"),
        created_at: Utc
            .with_ymd_and_hms(2024, 1, 1, 12, minute, 0)
            .single()
            .expect("valid timestamp"),
    }
}

/// In-memory [`PairStore`] that records calls and can be told to fail.
#[derive(Default)]
pub struct MemoryStore {
    pub pairs: Mutex<Vec<ImagePair>>,
    pub saved: Mutex<Vec<PairPayload>>,
    pub save_calls: Mutex<usize>,
    pub fail_all: Mutex<bool>,
}

impl MemoryStore {
    pub fn with_pairs(pairs: Vec<ImagePair>) -> Self {
        Self {
            pairs: Mutex::new(pairs),
            ..Self::default()
        }
    }

    pub fn set_failing(&self, failing: bool) {
        *self.fail_all.lock().unwrap() = failing;
    }

    pub fn save_calls(&self) -> usize {
        *self.save_calls.lock().unwrap()
    }

    fn check(&self) -> Result<()> {
        if *self.fail_all.lock().unwrap() {
            Err(InpaintError::StoreStatus {
                status: 500,
                body: "store unavailable".into(),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl PairStore for MemoryStore {
    async fn save(&self, payload: &PairPayload) -> Result<SaveReceipt> {
        *self.save_calls.lock().unwrap() += 1;
        self.check()?;
        let mut saved = self.saved.lock().unwrap();
        saved.push(payload.clone());
        let id = PairId::new(format!("pair-{}", saved.len()));
        self.pairs.lock().unwrap().insert(0, sample_pair(id.as_str(), 0));
        Ok(SaveReceipt {
            id,
            message: Some("Image pair uploaded successfully".into()),
        })
    }

    async fn list(&self) -> Result<Vec<ImagePair>> {
        self.check()?;
        Ok(self.pairs.lock().unwrap().clone())
    }

    async fn get(&self, id: &PairId) -> Result<ImagePair> {
        self.check()?;
        self.pairs
            .lock()
            .unwrap()
            .iter()
            .find(|p| &p.id == id)
            .cloned()
            .ok_or_else(|| InpaintError::StoreStatus {
                status: 404,
                body: "Image pair not found".into(),
            })
    }

    async fn delete(&self, id: &PairId) -> Result<()> {
        self.check()?;
        let mut pairs = self.pairs.lock().unwrap();
        let before = pairs.len();
        pairs.retain(|p| &p.id != id);
        if pairs.len() == before {
            return Err(InpaintError::StoreStatus {
                status: 404,
                body: "Image pair not found".into(),
            });
        }
        Ok(())
    }

    async fn health(&self) -> Result<()> {
        self.check()
    }
}

/// Store whose calls never complete, standing in for a hung backend.
pub struct PendingStore;

#[async_trait]
impl PairStore for PendingStore {
    async fn save(&self, _payload: &PairPayload) -> Result<SaveReceipt> {
        std::future::pending().await
    }

    async fn list(&self) -> Result<Vec<ImagePair>> {
        std::future::pending().await
    }

    async fn get(&self, _id: &PairId) -> Result<ImagePair> {
        std::future::pending().await
    }

    async fn delete(&self, _id: &PairId) -> Result<()> {
        std::future::pending().await
    }

    async fn health(&self) -> Result<()> {
        std::future::pending().await
    }
}

/// Poll `fut` once, then drop it, as a caller-side timeout would.
/// Returns whether it was still pending.
pub fn poll_once_and_drop<F: Future>(fut: F) -> bool {
    let mut fut = std::pin::pin!(fut);
    let mut cx = Context::from_waker(Waker::noop());
    fut.as_mut().poll(&mut cx).is_pending()
}
