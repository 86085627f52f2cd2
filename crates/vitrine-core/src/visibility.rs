//! Viewport intersection tracking
//!
//! [`ViewportObserver`] reports edge-triggered visibility entries for a set of
//! registered elements, the way an intersection observer does: one entry when
//! a target is first checked, then one each time it crosses the threshold.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::dom::{Document, ElementId};

/// Lifecycle of a one-shot, visibility-triggered behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ObservationState {
    /// Not registered with any observer
    #[default]
    Unobserved,
    /// Registered, waiting to become visible (or scheduled to fire)
    Pending,
    /// Fired; never fires again
    Triggered,
}

/// Visibility change of one target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityEntry {
    pub target: ElementId,
    pub is_intersecting: bool,
}

#[derive(Debug, Clone)]
pub struct ViewportObserver {
    /// Fraction of the target height that must be visible
    threshold: f64,
    /// Pixels trimmed from the bottom of the viewport
    bottom_margin: f64,
    /// Last reported state per target, `None` until first checked
    targets: BTreeMap<ElementId, Option<bool>>,
}

impl ViewportObserver {
    pub fn new(threshold: f64, bottom_margin: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            bottom_margin,
            targets: BTreeMap::new(),
        }
    }

    pub fn observe(&mut self, target: ElementId) {
        self.targets.entry(target).or_insert(None);
    }

    pub fn unobserve(&mut self, target: ElementId) {
        self.targets.remove(&target);
    }

    pub fn disconnect(&mut self) {
        self.targets.clear();
    }

    pub fn is_observing(&self, target: ElementId) -> bool {
        self.targets.contains_key(&target)
    }

    /// Whether `target` currently intersects the (margin-adjusted) viewport
    pub fn intersects(&self, doc: &Document, target: ElementId) -> bool {
        let Some(element) = doc.get(target) else {
            return false;
        };
        if !doc.is_connected(target) {
            return false;
        }

        let root_top = doc.scroll_top();
        let root_bottom = root_top + (doc.client_height() - self.bottom_margin).max(0.0);
        let overlap = element.bottom().min(root_bottom) - element.top.max(root_top);

        if element.height <= 0.0 {
            return element.top >= root_top && element.top <= root_bottom;
        }
        if overlap < 0.0 {
            return false;
        }
        let ratio = overlap / element.height;
        ratio > 0.0 && ratio >= self.threshold
    }

    /// Compare every target against the document and report changes
    pub fn check(&mut self, doc: &Document) -> Vec<VisibilityEntry> {
        let mut entries = Vec::new();
        let states: Vec<(ElementId, bool)> = self
            .targets
            .keys()
            .map(|target| (*target, self.intersects(doc, *target)))
            .collect();

        for (target, is_intersecting) in states {
            if let Some(last) = self.targets.get_mut(&target) {
                if *last != Some(is_intersecting) {
                    *last = Some(is_intersecting);
                    entries.push(VisibilityEntry {
                        target,
                        is_intersecting,
                    });
                }
            }
        }
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> (Document, ElementId) {
        let mut doc = Document::new(600.0);
        let body = doc.body();
        let block = doc.create_element("div");
        doc.append_child(body, block);
        doc.set_box(block, 1000.0, 400.0);
        let filler = doc.create_element("div");
        doc.append_child(body, filler);
        doc.set_box(filler, 0.0, 3000.0);
        (doc, block)
    }

    #[test]
    fn test_first_check_reports_initial_state() {
        let (doc, block) = page();
        let mut observer = ViewportObserver::new(0.1, 50.0);
        observer.observe(block);

        let entries = observer.check(&doc);
        assert_eq!(
            entries,
            vec![VisibilityEntry {
                target: block,
                is_intersecting: false
            }]
        );
        assert!(observer.check(&doc).is_empty());
    }

    #[test]
    fn test_threshold_and_bottom_margin() {
        let (mut doc, block) = page();
        let observer = ViewportObserver::new(0.1, 50.0);

        // viewport bottom at 480 + 550 = 1030: 30px of 400 visible, below 10%
        doc.set_scroll_top(480.0);
        assert!(!observer.intersects(&doc, block));

        // viewport bottom at 1090: 90px visible
        doc.set_scroll_top(540.0);
        assert!(observer.intersects(&doc, block));
    }

    #[test]
    fn test_entries_on_crossing_only() {
        let (mut doc, block) = page();
        let mut observer = ViewportObserver::new(0.0, 0.0);
        observer.observe(block);
        observer.check(&doc);

        doc.set_scroll_top(900.0);
        let entries = observer.check(&doc);
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_intersecting);

        doc.set_scroll_top(950.0);
        assert!(observer.check(&doc).is_empty());

        doc.set_scroll_top(0.0);
        let entries = observer.check(&doc);
        assert!(!entries[0].is_intersecting);
    }

    #[test]
    fn test_detached_targets_never_intersect() {
        let (mut doc, block) = page();
        let observer = ViewportObserver::new(0.0, 0.0);
        doc.set_scroll_top(900.0);
        assert!(observer.intersects(&doc, block));
        doc.remove(block);
        assert!(!observer.intersects(&doc, block));
    }
}
