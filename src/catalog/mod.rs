//! Product catalog: model, repositories, cache, and listing views

pub mod cache;
pub mod feed;
pub mod filter;
pub mod product;
pub mod repository;

pub use cache::CachedCatalog;
pub use feed::{feed, latest, random, three_best, Feed};
pub use filter::{FilterOptions, SortBy};
pub use product::Product;
pub use repository::{HttpCatalog, InMemoryCatalog, ProductRepository};
