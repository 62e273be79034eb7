//! Placeholder-substitution templating.
//!
//! View templates are fetched from the article server as plain text and
//! compiled against one of three data shapes: a listing sequence, a keyword
//! sequence, or nothing. Substitution is `{key}` replacement; unknown
//! placeholders pass through verbatim.

use crate::models::{Listing, TemplateConfig};

/// A compiled view template.
#[derive(Debug, Clone)]
pub struct Template {
    source: String,
}

impl Template {
    /// Compile a template from fetched source text.
    pub fn compile(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// The raw template source.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Fill `{key}` placeholders with the given values.
    pub fn fill(&self, values: &[(&str, &str)]) -> String {
        let mut out = self.source.clone();
        for (key, value) in values {
            out = out.replace(&format!("{{{key}}}"), value);
        }
        out
    }
}

/// Render one row of markup per listing, joined in order.
pub fn listing_rows(listings: &[Listing], templates: &TemplateConfig, date_format: &str) -> String {
    listings
        .iter()
        .map(|listing| listing.format(&templates.listing_row, date_format))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render one click-enabled label per keyword, joined in order.
pub fn keyword_labels(keywords: &[String], templates: &TemplateConfig) -> String {
    keywords
        .iter()
        .map(|keyword| templates.keyword_label.replace("{keyword}", keyword))
        .collect::<Vec<_>>()
        .join("\n")
}
