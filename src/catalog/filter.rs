//! Result-view filtering and sorting
//!
//! Post-search refinement for the full results page: price range, stock
//! threshold, rating bucket, and sort order. Relevance keeps the ranked
//! input order; every other sort is stable.

use clap::ValueEnum;

use super::Product;

/// Sort order for the results view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortBy {
    /// Keep the ranked input order
    #[default]
    Relevance,
    PriceAsc,
    PriceDesc,
    Name,
    Newest,
}

/// Filter and sort options for a product listing
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_stock: Option<u32>,
    /// Rating bucket: floor of the 0–5 rating must equal this value
    pub rating: Option<u8>,
    pub sort_by: SortBy,
}

impl FilterOptions {
    /// Apply the filters and sort to a product listing.
    pub fn apply(&self, mut products: Vec<Product>) -> Vec<Product> {
        if let Some(min) = self.min_price {
            products.retain(|p| p.price >= min);
        }
        if let Some(max) = self.max_price {
            products.retain(|p| p.price <= max);
        }
        if let Some(min_stock) = self.min_stock {
            products.retain(|p| p.stock >= min_stock);
        }
        if let Some(rating) = self.rating {
            products.retain(|p| p.rating.unwrap_or(0.0).floor() as u8 == rating);
        }

        match self.sort_by {
            SortBy::Relevance => {}
            SortBy::PriceAsc => products.sort_by(|a, b| a.price.total_cmp(&b.price)),
            SortBy::PriceDesc => products.sort_by(|a, b| b.price.total_cmp(&a.price)),
            SortBy::Name => {
                products.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            }
            SortBy::Newest => products.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        }

        products
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn product(id: &str, price: f64, stock: u32, rating: Option<f32>) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            description: String::new(),
            price,
            image: String::new(),
            stock,
            rating,
            created_at: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
        }
    }

    #[test]
    fn test_price_range() {
        let set = vec![
            product("cheap", 5.0, 1, None),
            product("mid", 50.0, 1, None),
            product("dear", 500.0, 1, None),
        ];
        let options = FilterOptions {
            min_price: Some(10.0),
            max_price: Some(100.0),
            ..Default::default()
        };
        let ids: Vec<String> = options.apply(set).into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["mid"]);
    }

    #[test]
    fn test_price_bounds_inclusive() {
        let set = vec![product("exact", 10.0, 1, None)];
        let options = FilterOptions {
            min_price: Some(10.0),
            max_price: Some(10.0),
            ..Default::default()
        };
        assert_eq!(options.apply(set).len(), 1);
    }

    #[test]
    fn test_min_stock() {
        let set = vec![product("out", 2.0, 0, None), product("in", 2.0, 8, None)];
        let options = FilterOptions {
            min_stock: Some(1),
            ..Default::default()
        };
        let ids: Vec<String> = options.apply(set).into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["in"]);
    }

    #[test]
    fn test_rating_bucket() {
        let set = vec![
            product("four_half", 1.0, 1, Some(4.5)),
            product("five", 1.0, 1, Some(5.0)),
            product("unrated", 1.0, 1, None),
        ];
        let options = FilterOptions {
            rating: Some(4),
            ..Default::default()
        };
        let ids: Vec<String> = options.apply(set).into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["four_half"]);
    }

    #[test]
    fn test_sort_price() {
        let set = vec![
            product("b", 20.0, 1, None),
            product("a", 10.0, 1, None),
            product("c", 30.0, 1, None),
        ];
        let asc = FilterOptions {
            sort_by: SortBy::PriceAsc,
            ..Default::default()
        };
        let ids: Vec<String> = asc.apply(set.clone()).into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);

        let desc = FilterOptions {
            sort_by: SortBy::PriceDesc,
            ..Default::default()
        };
        let ids: Vec<String> = desc.apply(set).into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_relevance_preserves_input_order() {
        let set = vec![
            product("first", 20.0, 1, None),
            product("second", 10.0, 1, None),
        ];
        let options = FilterOptions::default();
        let ids: Vec<String> = options.apply(set).into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["first", "second"]);
    }
}
