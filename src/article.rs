//! One article: a source string and everything derived from it.
//!
//! Every new source produces a fresh tree, heading list, outline and tracker
//! binding; nothing from the previous source is reused.

use std::path::Path;

use tracing::debug;

use crate::dom::Document;
use crate::error::Result;
use crate::render::{self, RenderTree};
use crate::toc::{self, Heading, OutlineNode, SectionTracker, SlugMap};
use crate::util;

/// A rendered article with its table of contents.
///
/// ```
/// use folio::{Article, Visibility};
///
/// let mut article = Article::parse("<h1>Intro</h1><p>Hi</p><h2>Setup</h2>");
/// assert_eq!(article.outline()[0].children[0].heading.id, "setup");
/// assert_eq!(article.tracker().active_id(), "intro");
///
/// article.tracker_mut().notify(Visibility::Section("setup".into()));
/// article.set_source("<h1>Other</h1>");
/// assert_eq!(article.tracker().active_id(), "other");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Article {
    source: String,
    tree: RenderTree,
    slugs: SlugMap,
    headings: Vec<Heading>,
    outline: Vec<OutlineNode>,
    tracker: SectionTracker,
}

impl Article {
    /// Build an article from an HTML string.
    pub fn parse(html: &str) -> Self {
        let mut article = Self::default();
        article.rebuild(html);
        article
    }

    /// Build an article from raw bytes, detecting the encoding.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let html = util::decode_text(bytes, util::sniff_encoding(bytes));
        Self::parse(&html)
    }

    /// Read and build an article from a file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Ok(Self::from_bytes(&bytes))
    }

    /// Replace the source. Everything derived from the old source is
    /// discarded and the tracker is rebound to the new headings.
    ///
    /// Returns `false`, keeping all state, when the source is unchanged.
    pub fn set_source(&mut self, html: &str) -> bool {
        if html == self.source {
            return false;
        }
        self.rebuild(html);
        true
    }

    fn rebuild(&mut self, html: &str) {
        let mut doc = Document::parse(html);
        let headings = toc::extract_headings(&mut doc);

        let mut slugs = SlugMap::new();
        let tree = render::convert(&doc, &mut slugs);
        let outline = toc::build_outline(&headings);

        self.tracker.rebind(toc::anchor_ids(&outline));
        self.source = html.to_string();
        self.tree = tree;
        self.slugs = slugs;
        self.headings = headings;
        self.outline = outline;

        debug!(
            bytes = self.source.len(),
            headings = self.headings.len(),
            outline_roots = self.outline.len(),
            "article rebuilt"
        );
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tree(&self) -> &RenderTree {
        &self.tree
    }

    /// Text-to-slug map filled while rendering headings.
    pub fn slugs(&self) -> &SlugMap {
        &self.slugs
    }

    pub fn headings(&self) -> &[Heading] {
        &self.headings
    }

    pub fn outline(&self) -> &[OutlineNode] {
        &self.outline
    }

    pub fn tracker(&self) -> &SectionTracker {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut SectionTracker {
        &mut self.tracker
    }

    /// Check whether the source produced neither content nor headings.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty() && self.outline.is_empty()
    }
}

#[cfg(any(feature = "cli", feature = "wasm"))]
#[derive(serde::Serialize)]
struct ArticleJson<'a> {
    tree: &'a RenderTree,
    outline: &'a [OutlineNode],
    active_id: &'a str,
}

#[cfg(any(feature = "cli", feature = "wasm"))]
impl Article {
    pub fn tree_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.tree)?)
    }

    pub fn outline_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.outline)?)
    }

    /// Tree, outline and active section as one JSON document.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let view = ArticleJson {
            tree: &self.tree,
            outline: &self.outline,
            active_id: self.tracker.active_id(),
        };
        let json = if pretty {
            serde_json::to_string_pretty(&view)?
        } else {
            serde_json::to_string(&view)?
        };
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toc::Visibility;

    #[test]
    fn test_rendered_anchors_match_outline() {
        let article =
            Article::parse("<h1>Getting Started</h1><h2>Install Steps</h2><h2>Next</h2>");
        for heading in article.headings() {
            assert!(
                article.tree().find_by_id(&heading.id).is_some(),
                "missing anchor {}",
                heading.id
            );
            assert_eq!(article.slugs().get(&heading.text), Some(heading.id.as_str()));
        }
    }

    #[test]
    fn test_unchanged_source_keeps_tracker_state() {
        let html = "<h2>a</h2><h2>b</h2>";
        let mut article = Article::parse(html);
        article.tracker_mut().notify(Visibility::Section("b".into()));

        assert!(!article.set_source(html));
        assert_eq!(article.tracker().active_id(), "b");
    }

    #[test]
    fn test_new_source_resets_everything() {
        let mut article = Article::parse("<h2>a</h2><h2>b</h2>");
        article.tracker_mut().notify(Visibility::Section("b".into()));

        assert!(article.set_source("<p>no headings</p>"));
        assert!(article.headings().is_empty());
        assert!(article.outline().is_empty());
        assert!(!article.tracker().is_active());
        assert_eq!(article.tracker().active_id(), "");
        assert_eq!(article.tree().texts(), vec!["no headings"]);
    }

    #[test]
    fn test_empty_source() {
        let article = Article::parse("");
        assert!(article.is_empty());
        assert!(!article.tracker().is_active());
    }

    #[test]
    fn test_from_bytes_uses_declared_charset() {
        let article = Article::from_bytes(b"<meta charset=\"iso-8859-5\"><h1>\xe9</h1>");
        assert_eq!(article.headings()[0].text, "щ");
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_json_view() {
        let article = Article::parse(r#"<h1>Top</h1><p style="color: red">x</p>"#);
        let value: serde_json::Value =
            serde_json::from_str(&article.to_json(false).unwrap()).unwrap();

        assert_eq!(value["active_id"], "top");
        assert_eq!(value["outline"][0]["id"], "top");
        assert_eq!(value["outline"][0]["level"], 1);
        assert_eq!(value["tree"][1]["element"]["tag"], "p");
        assert_eq!(value["tree"][1]["element"]["style"][0]["value"], "red");
        assert_eq!(value["tree"][1]["element"]["children"][0]["text"], "x");
    }
}
