//! Slug generation for heading anchors.
//!
//! Rendered headings and outline links must carry identical ids, so every
//! place that derives an id from heading text goes through [`slugify`].

use std::collections::HashMap;

/// Generate the anchor slug for a heading's text.
///
/// Trims the text, lower-cases it and replaces every run of whitespace with
/// a single hyphen. Nothing else is normalized: punctuation and non-ASCII
/// letters are kept as they are, so the result is reproducible by any
/// consumer that applies the same three steps.
///
/// # Examples
///
/// ```
/// use folio::toc::slugify;
///
/// assert_eq!(slugify("Getting Started"), "getting-started");
/// assert_eq!(slugify("  Multiple   Spaces  "), "multiple-spaces");
/// assert_eq!(slugify("What's new?"), "what's-new?");
/// ```
pub fn slugify(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Side map from trimmed heading text to its slug.
///
/// Filled by the converter as it renders headings. Identical texts map to
/// identical slugs; no disambiguation is attempted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlugMap {
    slugs: HashMap<String, String>,
}

impl SlugMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slug for a heading's text, recording the mapping.
    pub fn assign(&mut self, text: &str) -> String {
        let text = text.trim();
        let slug = slugify(text);
        self.slugs.insert(text.to_string(), slug.clone());
        slug
    }

    pub fn get(&self, text: &str) -> Option<&str> {
        self.slugs.get(text.trim()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.slugs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slugs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_simple() {
        assert_eq!(slugify("Hello World"), "hello-world");
    }

    #[test]
    fn test_slugify_keeps_punctuation() {
        assert_eq!(slugify("Hello, World!"), "hello,-world!");
        assert_eq!(slugify("a--b"), "a--b");
    }

    #[test]
    fn test_slugify_whitespace_runs() {
        assert_eq!(slugify("Hello \t\n  World"), "hello-world");
        assert_eq!(slugify("  Hello World  "), "hello-world");
    }

    #[test]
    fn test_slugify_unicode() {
        assert_eq!(slugify("Ünïcode Títle"), "ünïcode-títle");
        assert_eq!(slugify("Wide\u{3000}Space"), "wide-space");
    }

    #[test]
    fn test_slugify_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("   "), "");
    }

    #[test]
    fn test_slug_map_collisions_share_an_id() {
        let mut map = SlugMap::new();
        assert_eq!(map.assign("Intro"), "intro");
        assert_eq!(map.assign("  Intro "), "intro");
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("Intro"), Some("intro"));
    }
}
