//! Outline construction from a flat heading list.

use super::{Heading, OutlineNode};

/// Fold headings into a nested outline using their level.
///
/// Each heading becomes a child of the most recent heading with a strictly
/// smaller level, or a root when there is none. Document order is the only
/// ordering signal; skipped levels produce no synthetic nodes.
///
/// ```
/// use folio::toc::{build_outline, Heading};
///
/// let h = |id: &str, level| Heading { id: id.into(), text: id.into(), level };
/// let outline = build_outline(&[h("a", 1), h("b", 3), h("c", 2)]);
///
/// assert_eq!(outline.len(), 1);
/// assert_eq!(outline[0].children.len(), 2);
/// ```
pub fn build_outline(headings: &[Heading]) -> Vec<OutlineNode> {
    let mut roots: Vec<OutlineNode> = Vec::new();
    // Open nodes, shallowest first. Each entry is finished and attached to
    // its parent (or the roots) when it is popped.
    let mut stack: Vec<OutlineNode> = Vec::new();

    for heading in headings {
        while stack.last().is_some_and(|top| top.heading.level >= heading.level) {
            close_top(&mut stack, &mut roots);
        }
        stack.push(OutlineNode::new(heading.clone()));
    }

    while !stack.is_empty() {
        close_top(&mut stack, &mut roots);
    }

    roots
}

fn close_top(stack: &mut Vec<OutlineNode>, roots: &mut Vec<OutlineNode>) {
    let Some(node) = stack.pop() else {
        return;
    };
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => roots.push(node),
    }
}

/// Pre-order list of every heading in the outline.
pub fn flatten_outline(outline: &[OutlineNode]) -> Vec<&Heading> {
    let mut out = Vec::new();
    for node in outline {
        node.walk(&mut |n| out.push(&n.heading));
    }
    out
}
