// src/services/search.rs

//! Free-text search over keyword tags.
//!
//! The query is lower-cased and split on runs of whitespace; each listing is
//! scored by how many distinct tokens appear among its keywords, and the
//! result is the positively scored subset in descending score order, ties
//! keeping store order. Keywords are matched as-is (the upstream pipeline
//! emits them lower-case).

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::models::Listing;
use crate::services::store::ListingStore;

fn whitespace() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

/// Lower-case a query and split it on runs of whitespace.
///
/// An empty query yields a single empty-string token, which can never match
/// a non-empty keyword.
pub fn tokenize(query: &str) -> Vec<String> {
    whitespace()
        .split(&query.to_lowercase())
        .map(String::from)
        .collect()
}

/// Count the distinct tokens present in the listing's keyword set.
pub fn match_count(listing: &Listing, tokens: &[String]) -> usize {
    let keywords: HashSet<&str> = listing.keywords.iter().map(String::as_str).collect();
    tokens
        .iter()
        .filter(|token| keywords.contains(token.as_str()))
        .collect::<HashSet<_>>()
        .len()
}

/// Produce the relevance-ordered subset of the store matching the query.
pub fn search(query: &str, store: &ListingStore) -> Vec<Listing> {
    let tokens = tokenize(query);

    let mut scored: Vec<(usize, &Listing)> = store
        .listings()
        .iter()
        .map(|listing| (match_count(listing, &tokens), listing))
        .collect();

    // Stable sort: ties keep store order.
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    scored
        .into_iter()
        .filter(|(count, _)| *count > 0)
        .map(|(_, listing)| listing.clone())
        .collect()
}
