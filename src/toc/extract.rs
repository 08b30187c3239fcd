//! Heading extraction.

use tracing::debug;

use super::Heading;
use super::slug::slugify;
use crate::dom::Document;

/// Collect every `h1`..`h6` of the document in document order and stamp
/// each heading element with its slug as `id`.
///
/// The stamping keeps anchors on the parsed markup in step with the ids the
/// converter assigns independently.
pub fn extract_headings(doc: &mut Document) -> Vec<Heading> {
    let mut headings = Vec::new();

    for (node, level) in doc.headings() {
        let text = doc.text_content(node).trim().to_string();
        let id = slugify(&text);
        doc.arena_mut().set_attr(node, "id", &id);
        headings.push(Heading { id, text, level });
    }

    debug!(count = headings.len(), "extracted headings");
    headings
}

/// Parse `html` and extract its headings.
///
/// ```
/// use folio::toc::headings_from_html;
///
/// let headings = headings_from_html("<h1>Getting Started</h1><h2>Install</h2>");
/// assert_eq!(headings[0].id, "getting-started");
/// assert_eq!(headings[1].level, 2);
/// ```
pub fn headings_from_html(html: &str) -> Vec<Heading> {
    let mut doc = Document::parse(html);
    extract_headings(&mut doc)
}
