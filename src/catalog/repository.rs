//! Product repository collaborators
//!
//! The ranker's only read dependency: `list_all` returns the full current
//! catalog. The HTTP adapter exhausts pagination before returning, so the
//! core never sees a partial product set.

use crate::error::AppError;
use crate::http::client_with_timeout;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::Product;

/// Page size requested from the catalog backend
const PAGE_SIZE: usize = 1000;

/// Read access to the product catalog
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Return the full current catalog.
    async fn list_all(&self) -> Result<Vec<Product>, AppError>;
}

/// Catalog backed by the storefront's HTTP API.
///
/// Issues `GET {base_url}?offset=..&limit=..` and concatenates pages until
/// a short page signals the end of the table. Backends that ignore the
/// pagination parameters return everything in the first page, which the
/// short-page check also terminates on.
pub struct HttpCatalog {
    client: Client,
    base_url: String,
}

impl HttpCatalog {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            client: client_with_timeout(timeout),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn fetch_page(&self, offset: usize) -> Result<Vec<Product>, AppError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("offset", offset.to_string()), ("limit", PAGE_SIZE.to_string())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::CatalogFetchFailed(format!(
                "catalog returned HTTP {}",
                response.status()
            )));
        }

        let page: Vec<Product> = response.json().await?;
        Ok(page)
    }
}

#[async_trait]
impl ProductRepository for HttpCatalog {
    async fn list_all(&self) -> Result<Vec<Product>, AppError> {
        let mut products = Vec::new();
        let mut offset = 0;

        loop {
            let page = self.fetch_page(offset).await?;
            let page_len = page.len();
            products.extend(page);

            if page_len != PAGE_SIZE {
                break;
            }
            offset += PAGE_SIZE;
        }

        debug!("Fetched {} products from catalog", products.len());
        Ok(products)
    }
}

/// Fixed in-memory catalog, used in tests and for local experimentation
#[allow(dead_code)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
}

impl InMemoryCatalog {
    #[allow(dead_code)]
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl ProductRepository for InMemoryCatalog {
    async fn list_all(&self) -> Result<Vec<Product>, AppError> {
        Ok(self.products.clone())
    }
}
