//! In-memory catalog cache
//!
//! TTL-based decorator over a `ProductRepository`. The storefront backend is
//! refetched once the snapshot expires; while a refresh fails, a stale
//! snapshot is served rather than failing the query path.

use crate::error::AppError;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::{Product, ProductRepository};

struct Snapshot {
    products: Vec<Product>,
    cached_at: Instant,
}

impl Snapshot {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.cached_at.elapsed() < ttl
    }
}

/// TTL-cached view over another repository
pub struct CachedCatalog {
    inner: Arc<dyn ProductRepository>,
    ttl: Duration,
    snapshot: RwLock<Option<Snapshot>>,
}

impl CachedCatalog {
    pub fn new(inner: Arc<dyn ProductRepository>, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            snapshot: RwLock::new(None),
        }
    }
}

#[async_trait]
impl ProductRepository for CachedCatalog {
    async fn list_all(&self) -> Result<Vec<Product>, AppError> {
        {
            let guard = self.snapshot.read().await;
            if let Some(snapshot) = guard.as_ref() {
                if snapshot.is_fresh(self.ttl) {
                    debug!(
                        "Serving {} products from cache ({}s old)",
                        snapshot.products.len(),
                        snapshot.cached_at.elapsed().as_secs()
                    );
                    return Ok(snapshot.products.clone());
                }
            }
        }

        let mut guard = self.snapshot.write().await;
        // Another task may have refreshed while we waited for the lock
        if let Some(snapshot) = guard.as_ref() {
            if snapshot.is_fresh(self.ttl) {
                return Ok(snapshot.products.clone());
            }
        }

        match self.inner.list_all().await {
            Ok(products) => {
                *guard = Some(Snapshot {
                    products: products.clone(),
                    cached_at: Instant::now(),
                });
                Ok(products)
            }
            Err(err) => {
                if let Some(stale) = guard.as_ref() {
                    warn!(
                        "Catalog refresh failed ({}), serving stale snapshot of {} products",
                        err,
                        stale.products.len()
                    );
                    Ok(stale.products.clone())
                } else {
                    Err(err)
                }
            }
        }
    }
}
