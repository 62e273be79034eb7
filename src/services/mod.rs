//! Service layer for the article browser.
//!
//! This module contains the business logic for:
//! - Transport (`Fetch`, `HttpFetcher`)
//! - The listing collection (`ListingStore`)
//! - Search scoring (`search`)
//! - Session routing and view assembly (`Browser`)

mod browser;
mod fetch;
mod search;
mod store;

pub use browser::Browser;
pub use fetch::{Fetch, HttpFetcher};
pub use search::{match_count, search, tokenize};
pub use store::ListingStore;
