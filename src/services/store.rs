// src/services/store.rs

//! In-memory listing collection.
//!
//! Loaded once per session from the listing resource. The store keeps the
//! server order for its whole lifetime; ordering and filtering operations
//! return new views instead of reordering shared state, so no consumer
//! observes another's sort.

use std::collections::HashSet;

use crate::error::{AppError, Result};
use crate::models::Listing;
use crate::services::fetch::Fetch;
use crate::utils::url;

/// The session's article listing collection.
#[derive(Debug, Clone, Default)]
pub struct ListingStore {
    listings: Vec<Listing>,
}

impl ListingStore {
    /// Build a store, enforcing name uniqueness across the collection.
    pub fn new(listings: Vec<Listing>) -> Result<Self> {
        let mut seen = HashSet::new();
        for listing in &listings {
            if !seen.insert(listing.name.as_str()) {
                return Err(AppError::validation(format!(
                    "Duplicate listing name '{}'",
                    listing.name
                )));
            }
        }
        Ok(Self { listings })
    }

    /// Parse a store from the listing resource's JSON payload.
    pub fn from_json(json: &str) -> Result<Self> {
        let listings: Vec<Listing> = serde_json::from_str(json)?;
        Self::new(listings)
    }

    /// Fetch and parse the listing resource.
    pub async fn load(fetcher: &dyn Fetch, base_url: &str) -> Result<Self> {
        let url = url::listing_url(base_url)?;
        let json = fetcher.fetch_text(&url).await?;
        Self::from_json(&json)
    }

    /// The collection in server order.
    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Find a listing by its unique name.
    pub fn find(&self, name: &str) -> Option<&Listing> {
        self.listings.iter().find(|l| l.name == name)
    }

    /// A view of the collection sorted ascending by timestamp (stable).
    pub fn by_date(&self) -> Vec<Listing> {
        let mut view = self.listings.clone();
        view.sort_by_key(|l| l.date);
        view
    }

    /// The most recently published listing.
    pub fn latest(&self) -> Option<&Listing> {
        self.listings.iter().max_by_key(|l| l.date)
    }

    /// The union of all keywords, deduplicated, in first-occurrence order.
    pub fn keyword_index(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut index = Vec::new();
        for listing in &self.listings {
            for keyword in &listing.keywords {
                if seen.insert(keyword.as_str()) {
                    index.push(keyword.clone());
                }
            }
        }
        index
    }

    /// The subset carrying the given keyword, by exact match, in server order.
    pub fn with_keyword(&self, keyword: &str) -> Vec<Listing> {
        self.listings
            .iter()
            .filter(|l| l.has_keyword(keyword))
            .cloned()
            .collect()
    }
}
