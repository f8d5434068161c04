//! Homepage feed views over the catalog
//!
//! Pure selections over a product snapshot: best-rated, newest, the
//! combined homepage feed, and a random pick. All sorts are stable.

use rand::seq::SliceRandom;
use serde::Serialize;

use super::Product;

/// Default number of products in the "latest" view
pub const DEFAULT_LATEST_COUNT: usize = 20;

/// Homepage feed: the three best-rated products plus the newest ones
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feed {
    pub three_best: Vec<Product>,
    pub latest: Vec<Product>,
}

/// Top 3 products by rating, descending. Unrated products count as 0.
pub fn three_best(products: &[Product]) -> Vec<Product> {
    let mut sorted = products.to_vec();
    sorted.sort_by(|a, b| {
        b.rating
            .unwrap_or(0.0)
            .total_cmp(&a.rating.unwrap_or(0.0))
    });
    sorted.truncate(3);
    sorted
}

/// Products newest-first by `created_at`, truncated to `count`.
/// Products without a timestamp sort last.
pub fn latest(products: &[Product], count: usize) -> Vec<Product> {
    let mut sorted = products.to_vec();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted.truncate(count);
    sorted
}

/// The homepage feed: three best products, then the latest `latest_count`
/// with the three best excluded so nothing appears twice.
pub fn feed(products: &[Product], latest_count: usize) -> Feed {
    let best = three_best(products);
    let newest = latest(products, latest_count + best.len())
        .into_iter()
        .filter(|p| !best.iter().any(|b| b.id == p.id))
        .take(latest_count)
        .collect();

    Feed {
        three_best: best,
        latest: newest,
    }
}

/// Uniformly random selection of up to `count` products.
pub fn random(products: &[Product], count: usize) -> Vec<Product> {
    let mut rng = rand::thread_rng();
    products
        .choose_multiple(&mut rng, count)
        .cloned()
        .collect()
}
