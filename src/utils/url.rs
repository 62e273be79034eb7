// src/utils/url.rs

//! URL construction for the article server surface.

use url::Url;

use crate::error::Result;

/// Resolve a path or reference against a base URL.
pub fn resolve(base: &str, reference: &str) -> Result<String> {
    let url = Url::parse(base)?.join(reference)?;
    Ok(url.to_string())
}

/// URL of the listing resource.
pub fn listing_url(base: &str) -> Result<String> {
    resolve(base, "listings")
}

/// URL of a single article body, with the name percent-encoded.
pub fn article_url(base: &str, name: &str) -> Result<String> {
    let mut url = Url::parse(base)?.join("article")?;
    url.query_pairs_mut().append_pair("name", name);
    Ok(url.to_string())
}

/// URL of a view template under the configured template directory.
pub fn template_url(base: &str, template_dir: &str, template: &str) -> Result<String> {
    resolve(base, &format!("{template_dir}/{template}.hbs"))
}

/// Permanent link for an article: the site root with a `name` query.
pub fn permalink(base: &str, name: &str) -> Result<String> {
    let mut url = Url::parse(base)?.join("/")?;
    url.query_pairs_mut().append_pair("name", name);
    Ok(url.to_string())
}
