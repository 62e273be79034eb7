//! Rendering layer: page container, view templating, and markup conversion.

pub mod markup;
mod page;
mod template;

pub use page::Page;
pub use template::{Template, keyword_labels, listing_rows};
