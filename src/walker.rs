//! Pagination walker
//!
//! Drives one paginated stream strictly in order: resolve the resume point
//! from the checkpoint store, route each page through the response cache
//! and the transport, hand the page to the caller's handler, then advance
//! the checkpoint. A page shorter than the configured page size ends the
//! stream.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::cache::{ResponseCache, request_signature};
use crate::checkpoint::CheckpointStore;
use crate::client::GithubClient;
use crate::error::{Error, Result};

/// Strategy invoked with each fetched page.
///
/// A failure here aborts the walk and the checkpoint for the failing page
/// is not advanced, so a resumed run refetches it.
#[async_trait]
pub trait PageHandler<T>: Send + Sync {
    async fn on_page(&self, items: Vec<T>, page: u32) -> Result<()>;
}

/// Walks paginated endpoints with checkpointed resume
#[derive(Clone)]
pub struct PageWalker {
    transport: Arc<GithubClient>,
    cache: Arc<ResponseCache>,
    checkpoints: Arc<CheckpointStore>,
    page_size: usize,
    cancel: Arc<AtomicBool>,
}

impl PageWalker {
    pub fn new(
        transport: Arc<GithubClient>,
        cache: Arc<ResponseCache>,
        checkpoints: Arc<CheckpointStore>,
        page_size: usize,
    ) -> Self {
        Self {
            transport,
            cache,
            checkpoints,
            page_size,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag checked between pages; setting it stops the walk after the
    /// current page fully lands, leaving the last checkpoint valid.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Walk `endpoint` page by page, invoking `handler` for each page.
    ///
    /// The starting page is the explicit override if given, else the
    /// checkpointed last page for `stream_key`, else page 1. Resume
    /// refetches the checkpointed page; downstream upserts are idempotent.
    pub async fn walk<T, H>(
        &self,
        stream_key: &str,
        endpoint: &str,
        start_page: Option<u32>,
        handler: &H,
    ) -> Result<()>
    where
        T: DeserializeOwned + Send,
        H: PageHandler<T>,
    {
        let mut page = start_page
            .or_else(|| self.checkpoints.get(stream_key).map(|cp| cp.last_page))
            .unwrap_or(1)
            .max(1);

        loop {
            if self.cancel.load(Ordering::Acquire) {
                return Err(Error::Cancelled);
            }

            let params = [
                ("per_page", self.page_size.to_string()),
                ("page", page.to_string()),
            ];
            let signature = request_signature(endpoint, &params);

            let body = match self.cache.lookup(&signature) {
                Some(hit) => {
                    log::debug!("Cache hit for {} page {}", endpoint, page);
                    hit
                }
                None => {
                    let body = self.transport.get(endpoint, &params).await?;
                    self.cache.store(&signature, endpoint, &body);
                    body
                }
            };

            let items: Vec<T> = serde_json::from_str(&body)?;
            let count = items.len();

            handler.on_page(items, page).await?;
            self.checkpoints.put(stream_key, page)?;

            // A short page (including an empty one) is the terminal signal.
            if count < self.page_size {
                self.checkpoints.mark_completed(stream_key)?;
                return Ok(());
            }

            page += 1;
        }
    }
}
