//! Markup to render tree conversion.

use tracing::debug;

use super::classify::{Class, classify};
use super::{Media, RenderKey, RenderNode, RenderTree};
use crate::dom::{Document, NodeId};
use crate::toc::SlugMap;

/// Convert a parsed document into a render tree.
///
/// Heading slugs are recorded in `slugs` as headings are rendered.
pub fn convert(doc: &Document, slugs: &mut SlugMap) -> RenderTree {
    let nodes: Vec<RenderNode> = doc
        .roots()
        .filter_map(|root| convert_node(doc, root, slugs))
        .collect();

    let tree = RenderTree::new(nodes);
    debug!(
        roots = tree.nodes().len(),
        headings = slugs.len(),
        "converted render tree"
    );
    tree
}

/// Parse `html` and convert it.
///
/// ```
/// use folio::render::convert_html;
///
/// let tree = convert_html("<p>Hello <b>world</b></p>");
/// assert_eq!(tree.texts(), vec!["Hello ", "world"]);
///
/// assert!(convert_html("   ").is_empty());
/// ```
pub fn convert_html(html: &str) -> RenderTree {
    let doc = Document::parse(html);
    convert(&doc, &mut SlugMap::new())
}

fn convert_node(doc: &Document, node: NodeId, slugs: &mut SlugMap) -> Option<RenderNode> {
    let rendered = match classify(doc, node, slugs) {
        Class::Discard => return None,
        Class::Text(text) => RenderNode::Text(text.to_string()),
        Class::Image { src, alt } => RenderNode::Media(Media::Image { src, alt }),
        Class::Video { poster, sources } => RenderNode::Media(Media::Video { poster, sources }),
        Class::Void { tag, attrs } => RenderNode::Void {
            tag: tag.to_string(),
            attrs,
        },
        Class::Code { language, source } => RenderNode::Code { language, source },
        Class::Element { tag, attrs, style } => {
            let children = doc
                .children(node)
                .filter_map(|child| convert_node(doc, child, slugs))
                .collect();
            RenderNode::Element {
                tag: tag.to_string(),
                key: RenderKey::fresh(),
                attrs,
                style,
                children,
            }
        }
    };
    Some(rendered)
}
