//! Best-effort image cache warming.
//!
//! Policy (driven by the stage machine):
//! - after load: intro, score and propose images
//! - on Start: the first question's image
//! - while a question is shown: the next question's image only

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use reqwest::Client;

use crate::documents::AssetSource;

/// Fire-and-forget cache warmer. Nothing is returned and nothing may fail.
pub trait Prefetcher {
    fn prefetch_image(&mut self, path: &str);
}

/// Prefetcher that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPrefetcher;

impl Prefetcher for NoopPrefetcher {
    fn prefetch_image(&mut self, _path: &str) {}
}

/// Reads images into an in-memory cache on background tasks.
///
/// Needs a running tokio runtime; without one the request is dropped.
#[derive(Debug, Clone)]
pub struct CachingPrefetcher {
    source: Arc<AssetSource>,
    client: Client,
    cache: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl CachingPrefetcher {
    pub fn new(source: AssetSource) -> Self {
        Self {
            source: Arc::new(source),
            client: Client::new(),
            cache: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn is_cached(&self, path: &str) -> bool {
        self.cache
            .lock()
            .map(|c| c.contains_key(path))
            .unwrap_or(false)
    }

    pub fn cached_bytes(&self, path: &str) -> Option<usize> {
        self.cache.lock().ok()?.get(path).map(Vec::len)
    }
}

impl Prefetcher for CachingPrefetcher {
    fn prefetch_image(&mut self, path: &str) {
        if path.is_empty() || self.is_cached(path) {
            return;
        }
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::debug!(path, "no runtime; prefetch skipped");
            return;
        };

        let path = path.to_string();
        let source = Arc::clone(&self.source);
        let client = self.client.clone();
        let cache = Arc::clone(&self.cache);
        tracing::debug!(%path, "prefetch requested");
        handle.spawn(async move {
            match source.read(&client, &path).await {
                Ok(bytes) => {
                    if let Ok(mut cache) = cache.lock() {
                        cache.insert(path, bytes);
                    }
                }
                Err(e) => tracing::debug!(%path, error = %e, "prefetch failed"),
            }
        });
    }
}
