//! Render tree: the structured form of article markup handed to rendering
//! collaborators (highlighter, media widget, generic element renderer).
//!
//! ```
//! use folio::render::{convert_html, RenderNode};
//!
//! let tree = convert_html(r#"<pre><code class="language-python">print(1)</code></pre>"#);
//! assert_eq!(
//!     tree.nodes()[0],
//!     RenderNode::Code { language: Some("python".into()), source: "print(1)".into() },
//! );
//! ```

mod classify;
mod convert;

pub use classify::{Class, classify};
pub use convert::{convert, convert_html};

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::dom::InlineStyle;

/// Rendering key of a generic element.
///
/// Fresh for every element of every conversion. Only meant to tell sibling
/// elements apart while rendering; never stable across conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderKey(u64);

impl RenderKey {
    pub fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        RenderKey(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for RenderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "k{}", self.0)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for RenderKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Element attributes in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing an existing value in place.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.0.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name.to_string(), value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Attributes {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Kind of media element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MediaKind {
    Image,
    Video,
}

/// One `<source>` of a video.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MediaSource {
    pub src: String,
    /// MIME type from the `type` attribute.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub mime: Option<String>,
}

/// Image or video handed to the media renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Media {
    Image {
        src: String,
        alt: String,
    },
    Video {
        #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
        poster: Option<String>,
        sources: Vec<MediaSource>,
    },
}

impl Media {
    pub fn kind(&self) -> MediaKind {
        match self {
            Media::Image { .. } => MediaKind::Image,
            Media::Video { .. } => MediaKind::Video,
        }
    }
}

/// A node of the render tree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RenderNode {
    /// Verbatim text of a non-blank text node.
    Text(String),
    /// Self-closing tag (`hr`, `br`, `input`).
    Void { tag: String, attrs: Attributes },
    Media(Media),
    /// Code block for the highlighter.
    Code {
        language: Option<String>,
        source: String,
    },
    /// Any other element.
    Element {
        tag: String,
        key: RenderKey,
        attrs: Attributes,
        style: InlineStyle,
        children: Vec<RenderNode>,
    },
}

impl RenderNode {
    /// Tag name for element-like nodes.
    pub fn tag(&self) -> Option<&str> {
        match self {
            RenderNode::Void { tag, .. } | RenderNode::Element { tag, .. } => Some(tag.as_str()),
            RenderNode::Media(Media::Image { .. }) => Some("img"),
            RenderNode::Media(Media::Video { .. }) => Some("video"),
            RenderNode::Code { .. } => Some("pre"),
            RenderNode::Text(_) => None,
        }
    }

    pub fn attrs(&self) -> Option<&Attributes> {
        match self {
            RenderNode::Void { attrs, .. } | RenderNode::Element { attrs, .. } => Some(attrs),
            _ => None,
        }
    }

    pub fn children(&self) -> &[RenderNode] {
        match self {
            RenderNode::Element { children, .. } => children,
            _ => &[],
        }
    }

    /// Structural equality that ignores render keys.
    pub fn same_structure(&self, other: &RenderNode) -> bool {
        match (self, other) {
            (
                RenderNode::Element {
                    tag: t1,
                    attrs: a1,
                    style: s1,
                    children: c1,
                    ..
                },
                RenderNode::Element {
                    tag: t2,
                    attrs: a2,
                    style: s2,
                    children: c2,
                    ..
                },
            ) => t1 == t2 && a1 == a2 && s1 == s2 && same_nodes(c1, c2),
            (a, b) => a == b,
        }
    }

    fn walk<'a>(&'a self, f: &mut impl FnMut(&'a RenderNode)) {
        f(self);
        for child in self.children() {
            child.walk(f);
        }
    }
}

fn same_nodes(a: &[RenderNode], b: &[RenderNode]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_structure(y))
}

/// Result of converting one HTML source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct RenderTree {
    nodes: Vec<RenderNode>,
}

impl RenderTree {
    pub fn new(nodes: Vec<RenderNode>) -> Self {
        Self { nodes }
    }

    /// Top-level nodes in document order.
    pub fn nodes(&self) -> &[RenderNode] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<RenderNode> {
        self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every node of the tree, pre-order.
    pub fn descendants(&self) -> Vec<&RenderNode> {
        let mut out = Vec::new();
        for node in &self.nodes {
            node.walk(&mut |n| out.push(n));
        }
        out
    }

    /// Text leaves in document order.
    pub fn texts(&self) -> Vec<&str> {
        self.descendants()
            .into_iter()
            .filter_map(|n| match n {
                RenderNode::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// First element whose `id` attribute equals `id`.
    pub fn find_by_id(&self, id: &str) -> Option<&RenderNode> {
        self.descendants()
            .into_iter()
            .find(|n| n.attrs().and_then(|a| a.get("id")) == Some(id))
    }

    /// Structural equality that ignores render keys.
    pub fn same_structure(&self, other: &RenderTree) -> bool {
        same_nodes(&self.nodes, &other.nodes)
    }
}
