//! Smooth-scroll navigation for in-page anchors

use std::time::Duration;

use tracing::debug;

use crate::config::ScrollConfig;
use crate::dom::{Document, ElementId};
use crate::motion::ScrollAnimator;

pub struct SmoothScroller {
    anchors: Vec<ElementId>,
    animator: ScrollAnimator,
}

impl SmoothScroller {
    pub fn new(doc: &Document, config: &ScrollConfig) -> Self {
        Self {
            anchors: doc.anchors(),
            animator: ScrollAnimator::new(config.clone()),
        }
    }

    pub fn anchors(&self) -> &[ElementId] {
        &self.anchors
    }

    pub fn is_anchor(&self, element: ElementId) -> bool {
        self.anchors.contains(&element)
    }

    /// Element an anchor points at, if it exists
    pub fn target_of(&self, doc: &Document, anchor: ElementId) -> Option<ElementId> {
        let id = doc.attr(anchor, "href")?.strip_prefix('#')?;
        if id.is_empty() {
            return None;
        }
        doc.element_by_id(id)
    }

    /// Start scrolling to an anchor's target
    ///
    /// Returns an offset to apply immediately when no animation runs. Clicks
    /// on anchors without a target do nothing.
    pub fn on_click(&mut self, doc: &Document, anchor: ElementId, now: Duration) -> Option<f64> {
        let target = self.target_of(doc, anchor)?;
        let top = doc.get(target)?.top.clamp(0.0, doc.max_scroll());
        debug!("Scrolling to {:?} at {}px", doc.attr(anchor, "href"), top);
        self.animator.scroll_to(doc.scroll_top(), top, now)
    }

    /// Offset for the animation frame at `now`, if an animation is running
    pub fn frame(&mut self, now: Duration) -> Option<f64> {
        self.animator.update(now)
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    pub fn cancel(&mut self) {
        self.animator.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EasingType;
    use crate::layout::PageLayout;
    use crate::timers::ms;

    fn anchor_to(doc: &Document, scroller: &SmoothScroller, href: &str) -> ElementId {
        *scroller
            .anchors()
            .iter()
            .find(|a| doc.attr(**a, "href") == Some(href))
            .unwrap()
    }

    #[test]
    fn test_animates_to_target_top() {
        let doc = Document::from_layout(&PageLayout::default());
        let config = ScrollConfig {
            easing: EasingType::Linear,
            animation_duration_ms: 400,
            ..Default::default()
        };
        let mut scroller = SmoothScroller::new(&doc, &config);
        let anchor = anchor_to(&doc, &scroller, "#about");
        let about_top = doc.get(doc.element_by_id("about").unwrap()).unwrap().top;

        assert_eq!(scroller.on_click(&doc, anchor, ms(0)), None);
        assert!(scroller.is_animating());
        assert_eq!(scroller.frame(ms(200)), Some(about_top / 2.0));
        assert_eq!(scroller.frame(ms(400)), Some(about_top));
        assert!(!scroller.is_animating());
    }

    #[test]
    fn test_jumps_when_smooth_disabled() {
        let doc = Document::from_layout(&PageLayout::default());
        let config = ScrollConfig {
            smooth_enabled: false,
            ..Default::default()
        };
        let mut scroller = SmoothScroller::new(&doc, &config);
        let anchor = anchor_to(&doc, &scroller, "#newsletter");

        // the last section sits below the last full viewport
        assert_eq!(scroller.on_click(&doc, anchor, ms(0)), Some(doc.max_scroll()));
    }

    #[test]
    fn test_missing_target_is_a_no_op() {
        let mut doc = Document::from_layout(&PageLayout::default());
        let nav = doc.first_by_class("nav").unwrap();
        let dangling = doc.create_element("a");
        doc.set_attr(dangling, "href", "#pricing");
        doc.append_child(nav, dangling);

        let mut scroller = SmoothScroller::new(&doc, &ScrollConfig::default());
        assert!(scroller.is_anchor(dangling));
        assert_eq!(scroller.on_click(&doc, dangling, ms(0)), None);
        assert!(!scroller.is_animating());
    }
}
