// src/services/browser.rs

//! Browser session.
//!
//! One session corresponds to one page load: the listing collection is
//! fetched once, a single route is dispatched, and the resulting page is
//! handed back to the caller. The search-submit and keyword-click flows
//! re-render in place without re-entering the router.

use crate::error::Result;
use crate::models::{Config, Listing, Route};
use crate::render::{Page, Template, keyword_labels, listing_rows, markup};
use crate::services::fetch::Fetch;
use crate::services::search;
use crate::services::store::ListingStore;
use crate::utils::url;

/// Static fallback used when the not-found template itself cannot be fetched.
const NOT_FOUND_FALLBACK: &str = "<h1>404</h1>\n<p>There is no article here.</p>";

/// Label of the permalink control appended on the default route.
const PERMALINK_LABEL: &str = "(permanent link to this article)";

/// A browser session over one article server.
pub struct Browser<'a> {
    config: &'a Config,
    fetcher: &'a dyn Fetch,
    store: ListingStore,
}

impl<'a> Browser<'a> {
    /// Open a session: fetch and parse the listing collection once.
    pub async fn open(config: &'a Config, fetcher: &'a dyn Fetch) -> Result<Browser<'a>> {
        let store = ListingStore::load(fetcher, &config.site.base_url).await?;
        log::info!(
            "Loaded {} listings from {}",
            store.len(),
            config.site.base_url
        );
        Ok(Self {
            config,
            fetcher,
            store,
        })
    }

    /// The session's listing collection.
    pub fn store(&self) -> &ListingStore {
        &self.store
    }

    /// Dispatch a query string to its view and render the page.
    ///
    /// A view that fails to render (typically a failed fetch) falls back to
    /// the error page instead of propagating, so a bad query or an
    /// unreachable resource still produces a page.
    pub async fn dispatch(&self, query: &str) -> Result<Page> {
        let route = Route::parse(query);
        log::debug!("Dispatching {route:?} for query {query:?}");

        let result = match &route {
            Route::Article { name } => self.view_article(name).await,
            Route::ByDate => self.view_by_date().await,
            Route::ByKeyword => self.view_by_keyword().await,
            Route::Latest => self.view_latest().await,
            Route::NotFound => self.view_not_found().await,
        };

        match result {
            Ok(page) => Ok(page),
            Err(error) => {
                log::warn!("View for {route:?} failed: {error}. Rendering error page.");
                self.view_not_found().await
            }
        }
    }

    /// Search-submit entry point: render the relevance-ordered matches, or
    /// the no-results page when nothing matches.
    pub async fn submit_search(&self, input: &str) -> Result<Page> {
        let matches = search::search(input, &self.store);
        log::debug!("Search {input:?} matched {} listings", matches.len());

        let mut page = if matches.is_empty() {
            self.render_view("404", &[], |page| {
                page.append(
                    "<div style=\"font-size:0.5em;font-style:italic;\">\
                     No matching search results. Sorry!</div>",
                );
            })
            .await?
        } else {
            self.render_listing_view(&matches).await?
        };
        page.set_title("Search Results");
        Ok(page)
    }

    /// Keyword-click entry point: the keyword index stays in place and the
    /// matching listings are appended below it (the one additive render).
    pub async fn click_keyword(&self, keyword: &str) -> Result<Page> {
        let base = &self.config.site.base_url;
        let dir = &self.config.site.template_dir;
        let keywords_url = url::template_url(base, dir, "keywords")?;
        let listings_url = url::template_url(base, dir, "listings")?;

        // Request order is preserved: keywords template first, listings second.
        let mut sources = self
            .fetcher
            .fetch_all(&[keywords_url.as_str(), listings_url.as_str()])
            .await?;
        let keyword_template = Template::compile(sources.remove(0));
        let listing_template = Template::compile(sources.remove(0));

        let labels = keyword_labels(&self.store.keyword_index(), &self.config.templates);
        let mut page = Page::new();
        page.replace(keyword_template.fill(&[("keywords", &labels)]));
        page.set_title("Articles by Keyword");

        let matches = self.store.with_keyword(keyword);
        log::debug!("Keyword {keyword:?} matched {} listings", matches.len());
        let rows = listing_rows(
            &matches,
            &self.config.templates,
            &self.config.site.date_format,
        );
        page.append(format!(
            "<div>\n{}\n</div>",
            listing_template.fill(&[("listings", &rows)])
        ));
        Ok(page)
    }

    /// Single article by permalink name. A name with no listing record is
    /// logged and the page proceeds with a stale title.
    async fn view_article(&self, name: &str) -> Result<Page> {
        let body = self.fetch_article(name).await?;
        let mut page = Page::new();
        page.replace(markup::to_html(&body));
        match self.store.find(name) {
            Some(listing) => page.set_title(&listing.title),
            None => log::error!("Unable to match article with name '{name}'"),
        }
        Ok(page)
    }

    /// Full listing, ascending by timestamp.
    async fn view_by_date(&self) -> Result<Page> {
        let listings = self.store.by_date();
        let mut page = self.render_listing_view(&listings).await?;
        page.set_title("Articles by Date");
        Ok(page)
    }

    /// Deduplicated keyword index, each label click-enabled.
    async fn view_by_keyword(&self) -> Result<Page> {
        let labels = keyword_labels(&self.store.keyword_index(), &self.config.templates);
        let mut page = self
            .render_view("keywords", &[("keywords", &labels)], |_| {})
            .await?;
        page.set_title("Articles by Keyword");
        Ok(page)
    }

    /// Default route: the most recent article, with a permalink control.
    async fn view_latest(&self) -> Result<Page> {
        let Some(listing) = self.store.latest() else {
            log::warn!("Listing collection is empty; rendering error page");
            return self.view_not_found().await;
        };

        let body = self.fetch_article(&listing.name).await?;
        let mut page = Page::new();
        page.replace(markup::to_html(&body));
        page.set_title(&listing.title);

        let href = url::permalink(&self.config.site.base_url, &listing.name)?;
        page.append(format!(
            "<div class=\"permalink\"><a href=\"{href}\">{PERMALINK_LABEL}</a></div>"
        ));
        Ok(page)
    }

    /// The static not-found view. Falls back to built-in markup when the
    /// template itself is unreachable, so a session always produces a page.
    async fn view_not_found(&self) -> Result<Page> {
        let mut page = match self.render_view("404", &[], |_| {}).await {
            Ok(page) => page,
            Err(error) => {
                log::warn!("Not-found template unavailable ({error}); using built-in fallback");
                let mut page = Page::new();
                page.replace(NOT_FOUND_FALLBACK);
                page
            }
        };
        page.set_title("NOPE!");
        Ok(page)
    }

    /// Fetch a view template, fill it, attach it to a cleared page, and run
    /// the post-render hook with the container.
    async fn render_view<F>(
        &self,
        template: &str,
        values: &[(&str, &str)],
        after_render: F,
    ) -> Result<Page>
    where
        F: FnOnce(&mut Page),
    {
        let template = self.fetch_template(template).await?;
        let mut page = Page::new();
        page.replace(template.fill(values));
        after_render(&mut page);
        Ok(page)
    }

    /// Render a sequence of listings through the listings template.
    async fn render_listing_view(&self, listings: &[Listing]) -> Result<Page> {
        let rows = listing_rows(
            listings,
            &self.config.templates,
            &self.config.site.date_format,
        );
        self.render_view("listings", &[("listings", &rows)], |_| {})
            .await
    }

    async fn fetch_template(&self, template: &str) -> Result<Template> {
        let url = url::template_url(
            &self.config.site.base_url,
            &self.config.site.template_dir,
            template,
        )?;
        let source = self.fetcher.fetch_text(&url).await?;
        Ok(Template::compile(source))
    }

    async fn fetch_article(&self, name: &str) -> Result<String> {
        let url = url::article_url(&self.config.site.base_url, name)?;
        self.fetcher.fetch_text(&url).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;

    use super::*;
    use crate::error::AppError;

    /// Stub transport answering from a canned URL-to-body map.
    struct StubFetcher {
        responses: HashMap<String, String>,
    }

    #[async_trait]
    impl Fetch for StubFetcher {
        async fn fetch_text(&self, url: &str) -> Result<String> {
            self.responses
                .get(url)
                .cloned()
                .ok_or_else(|| AppError::status(url, 404))
        }
    }

    const BASE: &str = "http://127.0.0.1:8000";

    fn stub() -> StubFetcher {
        let mut responses = HashMap::new();
        responses.insert(
            format!("{BASE}/listings"),
            r#"[{"name":"a","title":"Alpha","date":2,"keywords":["x","y"]},
                {"name":"b","title":"Beta","date":1,"keywords":["y"]}]"#
                .to_string(),
        );
        responses.insert(
            format!("{BASE}/article?name=a"),
            "# Alpha body".to_string(),
        );
        responses.insert(format!("{BASE}/article?name=b"), "# Beta body".to_string());
        responses.insert(
            format!("{BASE}/article?name=ghost"),
            "orphaned body".to_string(),
        );
        responses.insert(
            format!("{BASE}/hbs/listings.hbs"),
            "<ul>{listings}</ul>".to_string(),
        );
        responses.insert(
            format!("{BASE}/hbs/keywords.hbs"),
            "<nav>{keywords}</nav>".to_string(),
        );
        responses.insert(format!("{BASE}/hbs/404.hbs"), "<h1>NOPE</h1>".to_string());
        StubFetcher { responses }
    }

    async fn open<'a>(config: &'a Config, fetcher: &'a StubFetcher) -> Browser<'a> {
        Browser::open(config, fetcher).await.unwrap()
    }

    #[tokio::test]
    async fn test_by_date_route_lists_ascending() {
        let config = Config::default();
        let fetcher = stub();
        let browser = open(&config, &fetcher).await;

        let page = browser.dispatch("?by=date").await.unwrap();
        assert_eq!(page.title(), "Articles by Date");
        let body = &page.children()[0];
        let beta = body.find("Beta").unwrap();
        let alpha = body.find("Alpha").unwrap();
        assert!(beta < alpha, "date 1 must precede date 2: {body}");
    }

    #[tokio::test]
    async fn test_by_keyword_route_renders_deduplicated_index() {
        let config = Config::default();
        let fetcher = stub();
        let browser = open(&config, &fetcher).await;

        let page = browser.dispatch("?by=keyword").await.unwrap();
        assert_eq!(page.title(), "Articles by Keyword");
        let body = &page.children()[0];
        assert!(body.starts_with("<nav>"));
        assert_eq!(body.matches(">x<").count(), 1);
        assert_eq!(body.matches(">y<").count(), 1);
    }

    #[tokio::test]
    async fn test_article_route_sets_title_from_record() {
        let config = Config::default();
        let fetcher = stub();
        let browser = open(&config, &fetcher).await;

        let page = browser.dispatch("?name=a").await.unwrap();
        assert_eq!(page.title(), "Alpha");
        assert!(page.children()[0].contains("<h1>Alpha body</h1>"));
        // No permalink control on the explicit-name path.
        assert_eq!(page.children().len(), 1);
    }

    #[tokio::test]
    async fn test_article_without_record_proceeds_with_stale_title() {
        let config = Config::default();
        let fetcher = stub();
        let browser = open(&config, &fetcher).await;

        // The body exists server-side but no listing record matches.
        let page = browser.dispatch("?name=ghost").await.unwrap();
        assert_eq!(page.title(), "");
        assert!(page.children()[0].contains("orphaned body"));
    }

    #[tokio::test]
    async fn test_article_fetch_failure_falls_back_to_error_page() {
        let config = Config::default();
        let fetcher = stub();
        let browser = open(&config, &fetcher).await;

        let page = browser.dispatch("?name=no-such-article").await.unwrap();
        assert_eq!(page.title(), "NOPE!");
        assert!(page.children()[0].contains("NOPE"));
    }

    #[tokio::test]
    async fn test_default_route_renders_most_recent_with_permalink() {
        let config = Config::default();
        let fetcher = stub();
        let browser = open(&config, &fetcher).await;

        let page = browser.dispatch("").await.unwrap();
        assert_eq!(page.title(), "Alpha");
        assert_eq!(page.children().len(), 2);
        let permalink = &page.children()[1];
        assert!(permalink.contains(PERMALINK_LABEL));
        assert!(permalink.contains("http://127.0.0.1:8000/?name=a"));
    }

    #[tokio::test]
    async fn test_unknown_by_value_renders_error_page() {
        let config = Config::default();
        let fetcher = stub();
        let browser = open(&config, &fetcher).await;

        let page = browser.dispatch("?by=author").await.unwrap();
        assert_eq!(page.title(), "NOPE!");
    }

    #[tokio::test]
    async fn test_error_page_survives_missing_template() {
        let config = Config::default();
        let mut fetcher = stub();
        fetcher.responses.remove(&format!("{BASE}/hbs/404.hbs"));
        let browser = open(&config, &fetcher).await;

        let page = browser.dispatch("?bogus").await.unwrap();
        assert_eq!(page.title(), "NOPE!");
        assert!(page.children()[0].contains("404"));
    }

    #[tokio::test]
    async fn test_search_renders_matches_in_store_order_on_ties() {
        let config = Config::default();
        let fetcher = stub();
        let browser = open(&config, &fetcher).await;

        let page = browser.submit_search("y").await.unwrap();
        assert_eq!(page.title(), "Search Results");
        let body = &page.children()[0];
        let alpha = body.find("Alpha").unwrap();
        let beta = body.find("Beta").unwrap();
        assert!(alpha < beta, "ties keep store order: {body}");
    }

    #[tokio::test]
    async fn test_search_without_matches_appends_message() {
        let config = Config::default();
        let fetcher = stub();
        let browser = open(&config, &fetcher).await;

        let page = browser.submit_search("").await.unwrap();
        assert_eq!(page.title(), "Search Results");
        assert_eq!(page.children().len(), 2);
        assert!(page.children()[1].contains("No matching search results. Sorry!"));
    }

    #[tokio::test]
    async fn test_keyword_click_keeps_index_above_results() {
        let config = Config::default();
        let fetcher = stub();
        let browser = open(&config, &fetcher).await;

        let page = browser.click_keyword("x").await.unwrap();
        assert_eq!(page.title(), "Articles by Keyword");
        assert_eq!(page.children().len(), 2);
        assert!(page.children()[0].starts_with("<nav>"));
        let results = &page.children()[1];
        assert!(results.contains("Alpha"));
        assert!(!results.contains("Beta"));
    }

    #[tokio::test]
    async fn test_open_fails_on_unreachable_listing() {
        let config = Config::default();
        let fetcher = StubFetcher {
            responses: HashMap::new(),
        };
        assert!(Browser::open(&config, &fetcher).await.is_err());
    }

    #[tokio::test]
    async fn test_empty_collection_default_route_is_error_page() {
        let config = Config::default();
        let mut fetcher = stub();
        fetcher
            .responses
            .insert(format!("{BASE}/listings"), "[]".to_string());
        let browser = open(&config, &fetcher).await;

        let page = browser.dispatch("").await.unwrap();
        assert_eq!(page.title(), "NOPE!");
    }
}
