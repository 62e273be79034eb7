//! Article listing record.

use chrono::DateTime;
use serde::{Deserialize, Serialize};

/// Metadata for a single article, as served by the listing resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Listing {
    /// Unique article identifier (the article's file stem on the server)
    pub name: String,

    /// Article title
    pub title: String,

    /// Publication timestamp in epoch milliseconds
    pub date: i64,

    /// Keyword tags, ordered by relevance
    pub keywords: Vec<String>,
}

impl Listing {
    /// Render the publication date with the given chrono format string.
    ///
    /// Timestamps outside the representable range fall back to the raw
    /// millisecond value.
    pub fn format_date(&self, format: &str) -> String {
        match DateTime::from_timestamp_millis(self.date) {
            Some(dt) => dt.format(format).to_string(),
            None => self.date.to_string(),
        }
    }

    /// Format the listing for display using a template.
    ///
    /// Supported placeholders:
    /// - `{name}`, `{title}`, `{date}`, `{keywords}`
    pub fn format(&self, template: &str, date_format: &str) -> String {
        template
            .replace("{name}", &self.name)
            .replace("{title}", &self.title)
            .replace("{date}", &self.format_date(date_format))
            .replace("{keywords}", &self.keywords.join(" "))
    }

    /// Whether the listing carries the given keyword, by exact string match.
    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.keywords.iter().any(|k| k == keyword)
    }
}
