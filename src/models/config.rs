//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP client behavior settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Article server addressing and display settings
    #[serde(default)]
    pub site: SiteConfig,

    /// Markup snippets applied per record when rendering listing views
    #[serde(default)]
    pub templates: TemplateConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        Url::parse(&self.site.base_url)
            .map_err(|e| AppError::validation(format!("site.base_url is invalid: {e}")))?;
        if self.site.date_format.trim().is_empty() {
            return Err(AppError::validation("site.date_format is empty"));
        }
        if self.site.template_dir.trim().is_empty() {
            return Err(AppError::validation("site.template_dir is empty"));
        }
        if !self.templates.listing_row.contains("{name}") {
            return Err(AppError::validation(
                "templates.listing_row must reference {name}",
            ));
        }
        if !self.templates.keyword_label.contains("{keyword}") {
            return Err(AppError::validation(
                "templates.keyword_label must reference {keyword}",
            ));
        }
        Ok(())
    }
}

/// HTTP client behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Article server addressing and display settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Base URL of the article server
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// chrono format string for rendered dates
    #[serde(default = "defaults::date_format")]
    pub date_format: String,

    /// Path prefix under which view templates are served
    #[serde(default = "defaults::template_dir")]
    pub template_dir: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            date_format: defaults::date_format(),
            template_dir: defaults::template_dir(),
        }
    }
}

/// Per-record markup applied while rendering listing and keyword views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Markup emitted once per listing row ({name}, {title}, {date}, {keywords})
    #[serde(default = "defaults::listing_row")]
    pub listing_row: String,

    /// Markup emitted once per keyword label ({keyword})
    #[serde(default = "defaults::keyword_label")]
    pub keyword_label: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            listing_row: defaults::listing_row(),
            keyword_label: defaults::keyword_label(),
        }
    }
}

mod defaults {
    // HTTP defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; gazette/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // Site defaults
    pub fn base_url() -> String {
        "http://127.0.0.1:8000".into()
    }
    pub fn date_format() -> String {
        "%Y-%m-%d @ %H:%M".into()
    }
    pub fn template_dir() -> String {
        "hbs".into()
    }

    // Per-record markup defaults
    pub fn listing_row() -> String {
        "<li><a href=\"/?name={name}\">{title}</a> <span class=\"date\">{date}</span></li>".into()
    }
    pub fn keyword_label() -> String {
        "<a class=\"keyword\" href=\"#\">{keyword}</a>".into()
    }
}
