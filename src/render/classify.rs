//! Per-node classification.
//!
//! Decides which [`RenderNode`](super::RenderNode) variant a markup node
//! becomes and extracts the fields that variant needs. Rules are checked in
//! priority order; the first match wins.

use super::{Attributes, MediaSource};
use crate::dom::{Document, InlineStyle, NodeData, NodeId, heading_level};
use crate::toc::SlugMap;

/// Classification of one markup node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Class<'a> {
    /// Produces nothing: blank text, comments, doctypes.
    Discard,
    /// Non-blank text, verbatim.
    Text(&'a str),
    Image {
        src: String,
        alt: String,
    },
    Video {
        poster: Option<String>,
        sources: Vec<MediaSource>,
    },
    Void {
        tag: &'a str,
        attrs: Attributes,
    },
    Code {
        language: Option<String>,
        source: String,
    },
    /// Generic element; children are converted by the caller.
    Element {
        tag: &'a str,
        attrs: Attributes,
        style: InlineStyle,
    },
}

/// Classify one node of `doc`.
///
/// Headings get their slug assigned through `slugs`, which is the only side
/// effect.
pub fn classify<'a>(doc: &'a Document, node: NodeId, slugs: &mut SlugMap) -> Class<'a> {
    let Some(data) = doc.get(node).map(|n| &n.data) else {
        return Class::Discard;
    };

    let tag = match data {
        NodeData::Text(text) if text.trim().is_empty() => return Class::Discard,
        NodeData::Text(text) => return Class::Text(text),
        NodeData::Element { name, .. } => &*name.local,
        NodeData::Document | NodeData::Comment(_) | NodeData::Doctype => return Class::Discard,
    };

    match tag {
        "img" => Class::Image {
            src: attr_or_empty(doc, node, "src"),
            alt: attr_or_empty(doc, node, "alt"),
        },
        "video" => Class::Video {
            poster: doc.get_attr(node, "poster").map(String::from),
            sources: video_sources(doc, node),
        },
        "hr" | "br" => Class::Void {
            tag,
            attrs: Attributes::new(),
        },
        "input" => Class::Void {
            tag,
            attrs: copy_attrs(doc, node, false),
        },
        "pre" => match doc.find_descendant(node, "code") {
            Some(code) => code_block(doc, code),
            None => generic(doc, node, tag),
        },
        "a" => {
            let mut class = generic(doc, node, tag);
            if let Class::Element { attrs, .. } = &mut class {
                if attrs.get("href").is_none() {
                    attrs.set("href", "");
                }
                attrs.set("target", "_blank");
            }
            class
        }
        _ if heading_level(tag).is_some() => {
            let mut class = generic(doc, node, tag);
            if let Class::Element { attrs, .. } = &mut class {
                let id = slugs.assign(&doc.text_content(node));
                attrs.set("id", id);
            }
            class
        }
        _ => generic(doc, node, tag),
    }
}

fn generic<'a>(doc: &Document, node: NodeId, tag: &'a str) -> Class<'a> {
    let style = doc
        .get_attr(node, "style")
        .map(InlineStyle::parse)
        .unwrap_or_default();

    Class::Element {
        tag,
        attrs: copy_attrs(doc, node, true),
        style,
    }
}

/// Copy attributes in source order. The `style` attribute is carried as a
/// parsed [`InlineStyle`] on generic elements instead.
fn copy_attrs(doc: &Document, node: NodeId, skip_style: bool) -> Attributes {
    doc.attrs(node)
        .iter()
        .map(|a| (a.qualified_name(), a.value.clone()))
        .filter(|(name, _)| !(skip_style && name == "style"))
        .collect()
}

fn attr_or_empty(doc: &Document, node: NodeId, name: &str) -> String {
    doc.get_attr(node, name).unwrap_or_default().to_string()
}

fn video_sources(doc: &Document, video: NodeId) -> Vec<MediaSource> {
    doc.children(video)
        .filter(|&child| doc.is_tag(child, "source"))
        .map(|source| MediaSource {
            src: attr_or_empty(doc, source, "src"),
            mime: doc.get_attr(source, "type").map(String::from),
        })
        .collect()
}

fn code_block<'a>(doc: &Document, code: NodeId) -> Class<'a> {
    Class::Code {
        language: code_language(doc.get_attr(code, "class")),
        source: doc.text_content(code).trim().to_string(),
    }
}

/// Language hint from a code element's class list: the first class, with a
/// `language-` prefix removed.
fn code_language(class: Option<&str>) -> Option<String> {
    let first = class?.split_whitespace().next()?;
    let language = first.strip_prefix("language-").unwrap_or(first);
    (!language.is_empty()).then(|| language.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_first(html: &str) -> (Class<'static>, SlugMap) {
        // Leak the document so the borrowed classification can be returned.
        let doc: &'static Document = Box::leak(Box::new(Document::parse(html)));
        let mut slugs = SlugMap::new();
        let first = doc.roots().next().expect("fragment has a root");
        (classify(doc, first, &mut slugs), slugs)
    }

    #[test]
    fn test_blank_text_is_discarded() {
        let doc = Document::parse("<p> </p>");
        let p = doc.roots().next().unwrap();
        let text = doc.children(p).next().unwrap();
        assert_eq!(classify(&doc, text, &mut SlugMap::new()), Class::Discard);
    }

    #[test]
    fn test_text_is_verbatim() {
        let doc = Document::parse("<p>  spaced  </p>");
        let p = doc.roots().next().unwrap();
        let text = doc.children(p).next().unwrap();
        assert_eq!(
            classify(&doc, text, &mut SlugMap::new()),
            Class::Text("  spaced  ")
        );
    }

    #[test]
    fn test_image_defaults() {
        let (class, _) = classify_first("<img>");
        assert_eq!(
            class,
            Class::Image {
                src: String::new(),
                alt: String::new()
            }
        );
    }

    #[test]
    fn test_video_sources_in_order() {
        let (class, _) = classify_first(
            r#"<video poster="p.jpg"><source src="a.webm" type="video/webm"><source src="a.mp4">Fallback</video>"#,
        );
        assert_eq!(
            class,
            Class::Video {
                poster: Some("p.jpg".into()),
                sources: vec![
                    MediaSource {
                        src: "a.webm".into(),
                        mime: Some("video/webm".into())
                    },
                    MediaSource {
                        src: "a.mp4".into(),
                        mime: None
                    },
                ],
            }
        );
    }

    #[test]
    fn test_hr_drops_attributes() {
        let (class, _) = classify_first(r#"<hr class="fancy">"#);
        assert_eq!(
            class,
            Class::Void {
                tag: "hr",
                attrs: Attributes::new()
            }
        );
    }

    #[test]
    fn test_input_copies_every_attribute() {
        let (class, _) =
            classify_first(r#"<input type="checkbox" checked disabled value="x" style="a:b">"#);
        let Class::Void { tag, attrs } = class else {
            panic!("expected void");
        };
        assert_eq!(tag, "input");
        let names: Vec<_> = attrs.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["type", "checked", "disabled", "value", "style"]);
    }

    #[test]
    fn test_pre_with_nested_code() {
        let (class, _) = classify_first(
            "<pre><div><code class=\"language-rust extra\">\n  fn main() {}\n</code></div></pre>",
        );
        assert_eq!(
            class,
            Class::Code {
                language: Some("rust".into()),
                source: "fn main() {}".into()
            }
        );
    }

    #[test]
    fn test_pre_without_code_is_generic() {
        let (class, _) = classify_first("<pre>plain</pre>");
        assert!(matches!(class, Class::Element { tag: "pre", .. }));
    }

    #[test]
    fn test_code_language() {
        assert_eq!(code_language(None), None);
        assert_eq!(code_language(Some("")), None);
        assert_eq!(code_language(Some("language-")), None);
        assert_eq!(code_language(Some("language-js hljs")), Some("js".into()));
        assert_eq!(code_language(Some("hljs language-js")), Some("hljs".into()));
    }

    #[test]
    fn test_link_opens_in_new_context() {
        let (class, _) = classify_first(r#"<a target="_self">x</a>"#);
        let Class::Element { attrs, .. } = class else {
            panic!("expected element");
        };
        assert_eq!(attrs.get("target"), Some("_blank"));
        assert_eq!(attrs.get("href"), Some(""));
    }

    #[test]
    fn test_heading_gets_slug_id() {
        let (class, slugs) = classify_first(r#"<h2 id="old"> Getting   Started </h2>"#);
        let Class::Element { attrs, .. } = class else {
            panic!("expected element");
        };
        assert_eq!(attrs.get("id"), Some("getting-started"));
        assert_eq!(slugs.get("Getting   Started"), Some("getting-started"));
    }

    #[test]
    fn test_generic_style_is_parsed() {
        let (class, _) = classify_first(r#"<span class="x" style="color: red">y</span>"#);
        let Class::Element { attrs, style, .. } = class else {
            panic!("expected element");
        };
        assert_eq!(attrs.get("style"), None);
        assert_eq!(attrs.get("class"), Some("x"));
        assert_eq!(style.get("color"), Some("red"));
    }
}
