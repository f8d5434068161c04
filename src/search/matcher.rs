//! String normalization and edit distance
//!
//! The leaf layer of the search core: accent- and case-insensitive
//! normalization, plus classic Levenshtein distance for near-miss matching.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Normalize a string for matching.
///
/// Decomposes with NFKD, strips combining marks and lowercases, so that
/// e.g. "México" and "mexico" normalize identically. Referentially
/// transparent: no locale-dependent state is consulted.
pub fn normalize(text: &str) -> String {
    text.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(|c| c.to_lowercase())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Classic Levenshtein distance between two strings.
///
/// Minimum number of single-character insertions, deletions, or
/// substitutions to transform `a` into `b`. Exact dynamic-programming
/// computation over two rows; O(len(a)·len(b)) time, O(min row) space.
/// Callers normalize first — this function compares code points as given.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // prev[j] = distance between a[..i] and b[..j] for the previous i
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr: Vec<usize> = vec![0; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution_cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j] + substitution_cost)
                .min(prev[j + 1] + 1)
                .min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
