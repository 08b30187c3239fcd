//! Parsed markup.
//!
//! [`Document`] wraps the arena html5ever parses into and exposes the
//! node/children/attributes/text view the converter and the heading
//! extractor consume. The source is parsed as a fragment in a `<body>`
//! context, so leading `<title>`, `<style>` or `<meta>` stay where the
//! author put them.

mod arena;
pub mod style;
mod tree_sink;

pub use arena::{Arena, Attribute, Children, Descendants, Node, NodeData, NodeId};
pub use style::{InlineStyle, StyleProperty};

use html5ever::driver::ParseOpts;
use html5ever::tendril::TendrilSink;
use html5ever::{QualName, local_name, ns, parse_fragment};
use tracing::debug;

use tree_sink::ArenaSink;

/// Heading tags with their outline level.
const HEADING_TAGS: [(&str, u8); 6] = [
    ("h1", 1),
    ("h2", 2),
    ("h3", 3),
    ("h4", 4),
    ("h5", 5),
    ("h6", 6),
];

/// Outline level of a heading tag name (`h1` -> 1), if it is one.
pub fn heading_level(tag: &str) -> Option<u8> {
    HEADING_TAGS
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|&(_, level)| level)
}

/// A parsed HTML source.
pub struct Document {
    arena: Arena,
    root: NodeId,
}

impl Document {
    /// Parse an HTML string. Never fails: malformed markup is recovered the
    /// way browsers recover it.
    pub fn parse(html: &str) -> Self {
        let context = QualName::new(None, ns!(html), local_name!("body"));
        let sink = ArenaSink::new();
        let sink = parse_fragment(sink, ParseOpts::default(), context, Vec::new(), false)
            .from_utf8()
            .one(html.as_bytes());
        let errors = sink.error_count();
        let arena = sink.into_arena();

        // The fragment parser puts everything under a synthetic <html>.
        let root = arena
            .children(arena.document())
            .find(|&id| arena.is_tag(id, "html"))
            .unwrap_or(NodeId::NONE);

        debug!(nodes = arena.len(), parse_errors = errors, "parsed html");
        Self { arena, root }
    }

    /// The fragment's top-level nodes, in document order.
    pub fn roots(&self) -> Children<'_> {
        self.arena.children(self.root)
    }

    /// Every node of the fragment, pre-order.
    pub fn nodes(&self) -> Descendants<'_> {
        self.arena.descendants(self.root)
    }

    /// Check if the fragment has no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.roots().next().is_none()
    }

    /// Heading elements (`h1`..`h6`) in document order, with their level.
    pub fn headings(&self) -> Vec<(NodeId, u8)> {
        self.nodes()
            .filter_map(|id| {
                let tag = self.arena.element_name(id)?;
                heading_level(tag).map(|level| (id, level))
            })
            .collect()
    }

    pub fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }
}

impl std::ops::Deref for Document {
    type Target = Arena;

    fn deref(&self) -> &Arena {
        &self.arena
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.arena.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_roots_are_top_level_nodes() {
        let doc = Document::parse("<p>One</p><p>Two</p>");
        let roots: Vec<_> = doc.roots().collect();
        assert_eq!(roots.len(), 2);
        assert!(roots.iter().all(|&id| doc.is_tag(id, "p")));
    }

    #[test]
    fn test_head_elements_stay_in_place() {
        let doc = Document::parse("<meta name=x><title>T</title><p>Body</p>");
        let tags: Vec<_> = doc
            .roots()
            .filter_map(|id| doc.element_name(id).map(|n| n.to_string()))
            .collect();
        assert_eq!(tags, vec!["meta", "title", "p"]);
    }

    #[test]
    fn test_template_content_is_walked() {
        let doc = Document::parse("<template><h2>Hidden</h2></template><h1>Top</h1>");
        let levels: Vec<_> = doc.headings().into_iter().map(|(_, l)| l).collect();
        assert_eq!(levels, vec![2, 1]);
    }

    #[test]
    fn test_empty_and_blank_sources() {
        assert!(Document::parse("").is_empty());

        let blank = Document::parse("   \n\t ");
        assert!(blank.roots().all(|id| blank.text(id).is_some_and(|t| t.trim().is_empty())));
    }

    #[test]
    fn test_headings_in_document_order() {
        let doc = Document::parse("<h2>A</h2><div><h1>B</h1><p>x</p></div><h6>C</h6>");
        let levels: Vec<_> = doc.headings().into_iter().map(|(_, l)| l).collect();
        assert_eq!(levels, vec![2, 1, 6]);
    }

    #[test]
    fn test_heading_level() {
        assert_eq!(heading_level("h1"), Some(1));
        assert_eq!(heading_level("h6"), Some(6));
        assert_eq!(heading_level("h7"), None);
        assert_eq!(heading_level("header"), None);
    }
}
