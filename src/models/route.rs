//! Query-string routing.
//!
//! A session dispatches exactly one route, derived by pattern-matching the
//! page query string. The recognized surface is `?name=<id>`, `?by=date`,
//! `?by=keyword`, and the empty query; anything else is the not-found route.

use std::sync::OnceLock;

use regex::Regex;

/// The mutually exclusive view states selectable by query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `?name=<id>`: a single article by permalink
    Article { name: String },

    /// `?by=date`: full listing, ascending by timestamp
    ByDate,

    /// `?by=keyword`: deduplicated keyword index
    ByKeyword,

    /// Empty query: the most recent article, with a permalink control
    Latest,

    /// Anything else
    NotFound,
}

fn name_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\?name=(.+)$").unwrap())
}

fn by_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\?by=(.+)$").unwrap())
}

impl Route {
    /// Parse a raw query string into a route.
    ///
    /// The leading `?` is optional so that shell-quoted queries work the
    /// same with or without it.
    pub fn parse(query: &str) -> Self {
        let query = query.trim();
        let normalized = if query.is_empty() || query.starts_with('?') {
            query.to_string()
        } else {
            format!("?{query}")
        };

        if let Some(captures) = name_pattern().captures(&normalized) {
            return Route::Article {
                name: captures[1].to_string(),
            };
        }
        if let Some(captures) = by_pattern().captures(&normalized) {
            return match &captures[1] {
                "date" => Route::ByDate,
                "keyword" => Route::ByKeyword,
                _ => Route::NotFound,
            };
        }
        if normalized.is_empty() {
            return Route::Latest;
        }
        Route::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_name_query() {
        assert_eq!(
            Route::parse("?name=first-post"),
            Route::Article {
                name: "first-post".to_string()
            }
        );
    }

    #[test]
    fn test_parse_by_date() {
        assert_eq!(Route::parse("?by=date"), Route::ByDate);
    }

    #[test]
    fn test_parse_by_keyword() {
        assert_eq!(Route::parse("?by=keyword"), Route::ByKeyword);
    }

    #[test]
    fn test_parse_empty_is_latest() {
        assert_eq!(Route::parse(""), Route::Latest);
        assert_eq!(Route::parse("   "), Route::Latest);
    }

    #[test]
    fn test_parse_leading_question_mark_optional() {
        assert_eq!(Route::parse("by=date"), Route::ByDate);
        assert_eq!(
            Route::parse("name=a"),
            Route::Article {
                name: "a".to_string()
            }
        );
    }

    #[test]
    fn test_parse_unknown_by_value_is_not_found() {
        assert_eq!(Route::parse("?by=author"), Route::NotFound);
    }

    #[test]
    fn test_parse_unrecognized_query_is_not_found() {
        assert_eq!(Route::parse("?error"), Route::NotFound);
        assert_eq!(Route::parse("?page=2"), Route::NotFound);
        assert_eq!(Route::parse("?name="), Route::NotFound);
        assert_eq!(Route::parse("?by="), Route::NotFound);
    }
}
