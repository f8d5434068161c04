//! Product model
//!
//! Read-only catalog snapshot entries as served by the storefront backend.
//! The search core never mutates or persists products.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single catalog product.
///
/// `rating` is serialized as `score` on the wire (the storefront's 0–5 star
/// rating); the name differs in code to keep it distinct from search scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub stock: u32,
    /// Star rating 0–5, when the product has been reviewed
    #[serde(rename = "score", default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
