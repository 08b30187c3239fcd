//! Table of contents: heading extraction, outline nesting and active-section
//! tracking.
//!
//! ```
//! use folio::toc::{build_outline, headings_from_html, SectionTracker, Visibility};
//!
//! let headings = headings_from_html("<h1>Intro</h1><h2>Setup</h2><h2>Usage</h2>");
//! let outline = build_outline(&headings);
//! let mut tracker = SectionTracker::from_outline(&outline);
//!
//! assert_eq!(tracker.active_id(), "intro");
//! tracker.notify(Visibility::Section("usage".into()));
//! assert_eq!(tracker.active_id(), "usage");
//! ```

mod extract;
mod outline;
mod slug;
mod tracker;

pub use extract::{extract_headings, headings_from_html};
pub use outline::{build_outline, flatten_outline};
pub use slug::{SlugMap, slugify};
pub use tracker::{SectionTracker, Visibility, anchor_ids};

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Characters escaped when an id is placed in a URL fragment.
const FRAGMENT: &AsciiSet = &CONTROLS.add(b' ').add(b'"').add(b'<').add(b'>').add(b'`');

/// A heading found in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Heading {
    /// Anchor id, always `slugify(text)`.
    pub id: String,
    /// Trimmed text content.
    pub text: String,
    /// Heading level (1-6).
    pub level: u8,
}

/// A heading and the headings nested under it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OutlineNode {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub heading: Heading,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    pub fn new(heading: Heading) -> Self {
        Self {
            heading,
            children: Vec::new(),
        }
    }

    /// Link target for this entry (`#` followed by the escaped id).
    ///
    /// ```
    /// use folio::toc::{Heading, OutlineNode};
    ///
    /// let node = OutlineNode::new(Heading { id: "a<b".into(), text: "A<b".into(), level: 1 });
    /// assert_eq!(node.href(), "#a%3Cb");
    /// ```
    pub fn href(&self) -> String {
        format!("#{}", utf8_percent_encode(&self.heading.id, FRAGMENT))
    }

    /// Visit this node and its descendants, pre-order.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a OutlineNode)) {
        f(self);
        for child in &self.children {
            child.walk(f);
        }
    }

    /// Number of entries in this subtree, this node included.
    pub fn entry_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(OutlineNode::entry_count)
            .sum::<usize>()
    }
}
