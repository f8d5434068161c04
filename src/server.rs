//! Search endpoint HTTP server
//!
//! Serves the storefront-facing API over axum:
//! - `GET /api/products` — full catalog
//! - `GET /api/products/search?q=…` — ranked results as a bare JSON array;
//!   an absent or blank `q` yields an empty array, and a catalog failure
//!   yields a non-2xx status rather than an empty result
//! - `GET /api/products/feed` — homepage feed views

use crate::catalog::{feed, Feed, Product, ProductRepository};
use crate::error::{validate_query, AppError};
use crate::search::rank;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};

/// Shared server state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn ProductRepository>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FeedParams {
    pub latest: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct RandomParams {
    pub count: Option<usize>,
}

fn status_for(err: &AppError) -> StatusCode {
    match err {
        AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        AppError::CatalogFetchFailed(_) | AppError::CatalogParseFailed(_) => {
            StatusCode::BAD_GATEWAY
        }
        AppError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, StatusCode> {
    match state.catalog.list_all().await {
        Ok(products) => Ok(Json(products)),
        Err(err) => {
            error!("Catalog listing failed ({}): {}", err.error_code(), err);
            Err(status_for(&err))
        }
    }
}

async fn search_products(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Product>>, StatusCode> {
    let raw_query = params.q.unwrap_or_default();

    if let Err(err) = validate_query(&raw_query) {
        return Err(status_for(&err));
    }

    // Blank query is a valid request with an empty answer, never a
    // browse-all listing
    if raw_query.trim().is_empty() {
        return Ok(Json(Vec::new()));
    }

    match state.catalog.list_all().await {
        Ok(products) => Ok(Json(rank(&products, &raw_query))),
        Err(err) => {
            error!("Search query failed ({}): {}", err.error_code(), err);
            Err(status_for(&err))
        }
    }
}

async fn feed_products(
    State(state): State<AppState>,
    Query(params): Query<FeedParams>,
) -> Result<Json<Feed>, StatusCode> {
    let latest_count = params.latest.unwrap_or(feed::DEFAULT_LATEST_COUNT);

    match state.catalog.list_all().await {
        Ok(products) => Ok(Json(feed::feed(&products, latest_count))),
        Err(err) => {
            error!("Feed request failed ({}): {}", err.error_code(), err);
            Err(status_for(&err))
        }
    }
}

/// Related-products pick for the product detail page
async fn random_products(
    State(state): State<AppState>,
    Query(params): Query<RandomParams>,
) -> Result<Json<Vec<Product>>, StatusCode> {
    let count = params.count.unwrap_or(4);

    match state.catalog.list_all().await {
        Ok(products) => Ok(Json(feed::random(&products, count))),
        Err(err) => {
            error!("Random pick failed ({}): {}", err.error_code(), err);
            Err(status_for(&err))
        }
    }
}

/// Build the API router over the given catalog.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/products", get(list_products))
        .route("/api/products/search", get(search_products))
        .route("/api/products/feed", get(feed_products))
        .route("/api/products/random", get(random_products))
        .with_state(state)
}

/// Bind and serve the search endpoint until the process is stopped.
pub async fn serve(addr: SocketAddr, catalog: Arc<dyn ProductRepository>) -> anyhow::Result<()> {
    let app = router(AppState { catalog });

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Search endpoint listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
