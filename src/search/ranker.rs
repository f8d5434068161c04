//! Tokenized multi-term product ranking
//!
//! Scores every catalog product against the query tokens and returns the
//! matches ordered by descending score. Scoring per token: +2 when the
//! normalized name contains the token, +1 when the token is within edit
//! distance 2 of the whole name (typo tolerance), 0 otherwise. Products
//! that score 0 across all tokens are excluded — an empty query never
//! degrades into a browse-all listing.

use super::matcher::{levenshtein, normalize};
use crate::catalog::Product;

/// Near-miss tolerance for the edit-distance fallback
const NEAR_MISS_DISTANCE: usize = 2;

/// Split a raw query into normalized, non-empty tokens.
///
/// Token order does not affect scoring; per-product contributions are
/// summed across tokens.
pub fn tokenize(raw_query: &str) -> Vec<String> {
    normalize(raw_query)
        .split_whitespace()
        .map(|t| t.to_string())
        .collect()
}

/// Score one product against the query tokens.
///
/// The score is a plain accumulator, not a probability; no normalization
/// is applied. Only the product name participates — the storefront ranks
/// by name alone.
pub fn score(product: &Product, tokens: &[String]) -> u32 {
    let name = normalize(&product.name);

    let mut total = 0;
    for token in tokens {
        if name.contains(token.as_str()) {
            total += 2;
        } else if levenshtein(token, &name) <= NEAR_MISS_DISTANCE {
            total += 1;
        }
    }

    total
}

/// Rank the product set against a raw query.
///
/// Empty or whitespace-only queries return an empty sequence. The sort is
/// stable: products with equal score keep their relative order from the
/// input. Scores are internal and not exposed to the caller.
pub fn rank(products: &[Product], raw_query: &str) -> Vec<Product> {
    let tokens = tokenize(raw_query);
    if tokens.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(u32, &Product)> = products
        .iter()
        .map(|p| (score(p, &tokens), p))
        .filter(|(s, _)| *s > 0)
        .collect();

    // sort_by is stable, so equal scores retain input order
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    scored.into_iter().map(|(_, p)| p.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            price: 10.0,
            image: String::new(),
            stock: 5,
            rating: None,
            created_at: None,
        }
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize("  Red  SHOES "), vec!["red", "shoes"]);
        assert_eq!(tokenize(""), Vec::<String>::new());
        assert_eq!(tokenize("   "), Vec::<String>::new());
        assert_eq!(tokenize("MÉXICO"), vec!["mexico"]);
    }

    #[test]
    fn test_score_substring_and_near_miss() {
        let tokens = tokenize("nike");
        // Substring match on the name
        assert_eq!(score(&product("1", "Nike Air"), &tokens), 2);
        // Near miss: levenshtein("nike", "nikee") == 1
        assert_eq!(score(&product("2", "Nikee"), &tokens), 1);
        // No match at all
        assert_eq!(score(&product("3", "Sandalias"), &tokens), 0);
    }

    #[test]
    fn test_score_sums_across_tokens() {
        let tokens = tokenize("red shoes");
        // Both tokens are substrings of the name
        assert_eq!(score(&product("1", "Red Shoes"), &tokens), 4);
        // Only one token matches
        assert_eq!(score(&product("2", "Blue Shoes"), &tokens), 2);
    }

    #[test]
    fn test_rank_empty_inputs() {
        assert!(rank(&[], "shoes").is_empty());
        let set = vec![product("1", "Red Shoes")];
        assert!(rank(&set, "").is_empty());
        assert!(rank(&set, "   \t ").is_empty());
    }

    #[test]
    fn test_rank_no_matches() {
        let set = vec![product("1", "Nikee")];
        assert!(rank(&set, "zzzzz").is_empty());
    }

    #[test]
    fn test_rank_near_miss_included() {
        let set = vec![product("1", "Nikee")];
        let results = rank(&set, "nike");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "1");
    }

    #[test]
    fn test_rank_preserves_order_on_ties() {
        let set = vec![product("1", "Red Shoes"), product("2", "Blue Shoes")];
        let results = rank(&set, "shoes");
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, "1");
        assert_eq!(results[1].id, "2");
    }

    #[test]
    fn test_rank_orders_by_score_with_stable_ties() {
        // A and C near-match only, B exact-matches; expect [B, A, C]
        let set = vec![
            product("a", "Zapato"),   // levenshtein("zapatos", "zapato") == 1
            product("b", "Zapatos"),  // contains "zapatos"
            product("c", "Zapator"),  // levenshtein("zapatos", "zapator") == 1
        ];
        let results = rank(&set, "zapatos");
        let ids: Vec<&str> = results.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_rank_accent_insensitive() {
        let set = vec![product("1", "Sombrero México")];
        let results = rank(&set, "mexico");
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_rank_single_character_token() {
        // Single-char tokens are processed like any other token
        let set = vec![product("1", "X-Wing"), product("2", "Sombrero")];
        let results = rank(&set, "x");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "1");
    }

    #[test]
    fn test_rank_is_deterministic() {
        let set = vec![
            product("1", "Red Shoes"),
            product("2", "Blue Shoes"),
            product("3", "Nikee"),
        ];
        let first = rank(&set, "shoes nike");
        for _ in 0..5 {
            assert_eq!(rank(&set, "shoes nike"), first);
        }
    }
}
