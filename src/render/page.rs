//! Rendered page model.
//!
//! `Page` stands in for the browser page: a title and the single article
//! container whose children are replaced on every non-additive render.

/// A rendered page: title plus the ordered children of the article container.
#[derive(Debug, Clone, Default)]
pub struct Page {
    title: String,
    children: Vec<String>,
}

impl Page {
    /// Create an empty page with no title.
    pub fn new() -> Self {
        Self::default()
    }

    /// The page title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Set the page title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// The container children, in document order.
    pub fn children(&self) -> &[String] {
        &self.children
    }

    /// Remove all children from the container.
    pub fn clear(&mut self) {
        self.children.clear();
    }

    /// Append a markup fragment to the container.
    pub fn append(&mut self, html: impl Into<String>) {
        self.children.push(html.into());
    }

    /// Clear the container, then attach a single markup fragment.
    pub fn replace(&mut self, html: impl Into<String>) {
        self.clear();
        self.append(html);
    }

    /// Serialize the page as a complete HTML document.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        out.push_str("<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        out.push_str(&format!("<title>{}</title>\n", self.title));
        out.push_str("</head>\n<body>\n<main id=\"article\">\n");
        for child in &self.children {
            out.push_str(child);
            out.push('\n');
        }
        out.push_str("</main>\n</body>\n</html>\n");
        out
    }
}
