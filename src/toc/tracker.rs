//! Active-section tracking.
//!
//! The scroll widget that watches the container lives outside this crate.
//! It is handed [`SectionTracker::anchors`] and pushes a [`Visibility`]
//! back on every scroll notification; the tracker turns those into the id
//! the outline should highlight.

use tracing::trace;

use super::OutlineNode;
use super::outline::flatten_outline;

/// A scroll notification from the anchor-tracking widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visibility {
    /// The section anchored at this id is currently in view.
    Section(String),
    /// No anchored section is currently in view.
    Nothing,
}

impl From<Option<String>> for Visibility {
    fn from(id: Option<String>) -> Self {
        match id {
            Some(id) => Visibility::Section(id),
            None => Visibility::Nothing,
        }
    }
}

/// Which outline section is active.
///
/// The default section is the first heading of the current source; it is
/// active until a notification says otherwise and whenever nothing is in
/// view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionTracker {
    anchors: Vec<String>,
    default_id: String,
    active_id: String,
}

impl SectionTracker {
    /// Bind to a set of anchor ids in document order.
    pub fn new(anchors: Vec<String>) -> Self {
        let mut tracker = Self::default();
        tracker.rebind(anchors);
        tracker
    }

    /// Bind to every heading of an outline.
    pub fn from_outline(outline: &[OutlineNode]) -> Self {
        Self::new(anchor_ids(outline))
    }

    /// Replace the anchor set after the source changed. The default is
    /// recomputed and the active section is forced back to it.
    pub fn rebind(&mut self, anchors: Vec<String>) {
        self.default_id = anchors.first().cloned().unwrap_or_default();
        self.active_id = self.default_id.clone();
        self.anchors = anchors;
        trace!(default = %self.default_id, anchors = self.anchors.len(), "section tracker bound");
    }

    /// Apply a scroll notification. Returns whether the active id changed.
    pub fn notify(&mut self, visibility: impl Into<Visibility>) -> bool {
        let next = match visibility.into() {
            Visibility::Section(id) => id,
            Visibility::Nothing => self.default_id.clone(),
        };

        if next == self.active_id {
            return false;
        }
        trace!(from = %self.active_id, to = %next, "active section changed");
        self.active_id = next;
        true
    }

    /// Id of the section to highlight; empty when there are no headings.
    pub fn active_id(&self) -> &str {
        &self.active_id
    }

    pub fn default_id(&self) -> &str {
        &self.default_id
    }

    /// Anchor ids the scroll widget should observe, in document order.
    pub fn anchors(&self) -> &[String] {
        &self.anchors
    }

    /// Check whether the tracker has any section to activate.
    pub fn is_active(&self) -> bool {
        !self.anchors.is_empty()
    }
}

/// Pre-order ids of every heading in the outline.
pub fn anchor_ids(outline: &[OutlineNode]) -> Vec<String> {
    flatten_outline(outline)
        .into_iter()
        .map(|h| h.id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker(ids: &[&str]) -> SectionTracker {
        SectionTracker::new(ids.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_default_is_first_anchor() {
        let t = tracker(&["a", "b"]);
        assert_eq!(t.active_id(), "a");
        assert_eq!(t.default_id(), "a");
        assert!(t.is_active());
    }

    #[test]
    fn test_nothing_visible_resets_to_default() {
        let mut t = tracker(&["a", "b"]);
        assert!(t.notify(Visibility::Section("b".into())));
        assert_eq!(t.active_id(), "b");

        assert!(t.notify(Visibility::Nothing));
        assert_eq!(t.active_id(), "a");
    }

    #[test]
    fn test_repeated_notification_is_not_a_change() {
        let mut t = tracker(&["a", "b"]);
        assert!(!t.notify(Visibility::Section("a".into())));
        assert!(!t.notify(Visibility::Nothing));
        assert!(t.notify(Some("b".to_string())));
        assert!(!t.notify(Some("b".to_string())));
    }

    #[test]
    fn test_rebind_forces_new_default() {
        let mut t = tracker(&["a", "b"]);
        t.notify(Visibility::Section("b".into()));

        t.rebind(vec!["x".into(), "y".into()]);
        assert_eq!(t.default_id(), "x");
        assert_eq!(t.active_id(), "x");
        assert_eq!(t.anchors(), ["x", "y"]);
    }

    #[test]
    fn test_no_headings() {
        let mut t = tracker(&[]);
        assert!(!t.is_active());
        assert_eq!(t.active_id(), "");
        assert!(!t.notify(Visibility::Nothing));
        assert_eq!(t.active_id(), "");
    }
}
