//! # folio
//!
//! Turns CMS-authored article HTML into a render tree and a table of
//! contents that stay in sync.
//!
//! ## Features
//!
//! - Render tree with dedicated variants for images, videos, code blocks
//!   and void tags; links open in a new browsing context
//! - Deterministic heading anchors shared by the tree and the outline
//! - Outline nesting that tolerates skipped and out-of-order heading levels
//! - Active-section tracking driven by an external scroll observer
//!
//! ## Quick Start
//!
//! ```
//! use folio::{Article, RenderNode, Visibility};
//!
//! let html = r#"
//!     <h1>Getting Started</h1>
//!     <p>Install the tool.</p>
//!     <pre><code class="language-sh">cargo install folio</code></pre>
//!     <h2>Usage</h2>
//! "#;
//!
//! let mut article = Article::parse(html);
//!
//! let code = &article.tree().nodes()[2];
//! assert_eq!(
//!     code,
//!     &RenderNode::Code { language: Some("sh".into()), source: "cargo install folio".into() },
//! );
//!
//! let root = &article.outline()[0];
//! assert_eq!(root.href(), "#getting-started");
//! assert_eq!(root.children[0].heading.id, "usage");
//!
//! assert_eq!(article.tracker().active_id(), "getting-started");
//! article.tracker_mut().notify(Visibility::Section("usage".into()));
//! assert_eq!(article.tracker().active_id(), "usage");
//! article.tracker_mut().notify(Visibility::Nothing);
//! assert_eq!(article.tracker().active_id(), "getting-started");
//! ```

pub mod article;
pub mod dom;
pub mod error;
pub mod render;
pub mod toc;
pub(crate) mod util;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use article::Article;
pub use error::{Error, Result};
pub use render::{
    Attributes, Media, MediaKind, MediaSource, RenderKey, RenderNode, RenderTree, convert_html,
};
pub use toc::{Heading, OutlineNode, SectionTracker, Visibility, build_outline, slugify};
