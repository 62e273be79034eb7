//! Lightweight markup to HTML conversion for article bodies.

use pulldown_cmark::{Options, Parser, html};

/// Convert an article body from lightweight markup to HTML.
pub fn to_html(markup: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markup, options);
    let mut out = String::with_capacity(markup.len() * 2);
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_and_paragraph() {
        let html = to_html("# Title\n\nBody text.");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<p>Body text.</p>"));
    }

    #[test]
    fn test_plain_text_passes_through_as_paragraph() {
        assert_eq!(to_html("hello"), "<p>hello</p>\n");
    }

    #[test]
    fn test_empty_body() {
        assert_eq!(to_html(""), "");
    }
}
