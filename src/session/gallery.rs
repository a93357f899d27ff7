//! Snapshot of the pairs held by the store.
//!
//! The listing is never authoritative: it is whatever the last successful
//! refresh returned, minus pairs whose deletion the store confirmed.

use super::InFlight;
use crate::error::InpaintError;
use crate::store::{ImagePair, PairId, PairStore};

#[derive(Debug, Default)]
pub struct Gallery {
    pairs: Vec<ImagePair>,
    loading: bool,
    error: Option<String>,
}

/// A pending request to delete one pair.
///
/// The caller confirms it with [`Gallery::confirm_delete`] or drops it to
/// cancel; dropping is a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "dropping a DeleteIntent cancels the deletion"]
pub struct DeleteIntent {
    id: PairId,
}

impl DeleteIntent {
    pub fn id(&self) -> &PairId {
        &self.id
    }
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pairs in the order the store listed them.
    pub fn pairs(&self) -> &[ImagePair] {
        &self.pairs
    }

    pub fn find(&self, id: &PairId) -> Option<&ImagePair> {
        self.pairs.iter().find(|p| &p.id == id)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message of the last failed operation, cleared by the next refresh.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn begin_refresh(&mut self) -> crate::error::Result<()> {
        if self.loading {
            return Err(InpaintError::busy("Refresh already in progress"));
        }
        self.loading = true;
        self.error = None;
        Ok(())
    }

    /// On success the listing is replaced; on failure it is kept and the
    /// error recorded.
    pub fn finish_refresh(
        &mut self,
        result: crate::error::Result<Vec<ImagePair>>,
    ) -> crate::error::Result<usize> {
        self.loading = false;
        match result {
            Ok(pairs) => {
                self.pairs = pairs;
                Ok(self.pairs.len())
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch image pairs");
                self.error = Some(format!("Failed to fetch image pairs: {e}"));
                Err(e)
            }
        }
    }

    pub async fn refresh<S: PairStore + ?Sized>(
        &mut self,
        store: &S,
    ) -> crate::error::Result<usize> {
        self.begin_refresh()?;
        let result = {
            let _in_flight = InFlight(&mut self.loading);
            store.list().await
        };
        self.finish_refresh(result)
    }

    /// First step of a deletion. `None` when `id` is not in the listing.
    pub fn request_delete(&self, id: &PairId) -> Option<DeleteIntent> {
        self.find(id).map(|p| DeleteIntent { id: p.id.clone() })
    }

    /// Second step: ask the store to delete, and drop the pair locally only
    /// once the store confirms.
    pub async fn confirm_delete<S: PairStore + ?Sized>(
        &mut self,
        intent: DeleteIntent,
        store: &S,
    ) -> crate::error::Result<()> {
        match store.delete(&intent.id).await {
            Ok(()) => {
                self.pairs.retain(|p| p.id != intent.id);
                self.error = None;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(id = %intent.id, error = %e, "failed to delete image pair");
                self.error = Some(format!("Failed to delete image pair {}: {e}", intent.id));
                Err(e)
            }
        }
    }
}
