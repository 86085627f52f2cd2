//! Scroll progress indicator

use crate::dom::{Document, ElementId};

/// Percentage of the scrollable range covered by `scroll_top`
///
/// Pages that cannot scroll report 0. The result is clamped to [0, 100].
pub fn scroll_percentage(scroll_top: f64, scroll_height: f64, client_height: f64) -> f64 {
    let range = scroll_height - client_height;
    if range <= 0.0 || !range.is_finite() {
        return 0.0;
    }
    (scroll_top / range * 100.0).clamp(0.0, 100.0)
}

/// Keeps the `#scrollProgress` bar width in step with the scroll offset
#[derive(Debug, Clone)]
pub struct ScrollProgressIndicator {
    bar: Option<ElementId>,
    percentage: f64,
}

impl ScrollProgressIndicator {
    pub fn new(doc: &Document) -> Self {
        Self {
            bar: doc.element_by_id("scrollProgress"),
            percentage: 0.0,
        }
    }

    pub fn on_scroll(&mut self, doc: &mut Document) -> f64 {
        self.percentage =
            scroll_percentage(doc.scroll_top(), doc.scroll_height(), doc.client_height());
        if let Some(bar) = self.bar {
            doc.set_style(bar, "width", &format!("{}%", self.percentage));
        }
        self.percentage
    }

    pub fn percentage(&self) -> f64 {
        self.percentage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PageLayout;

    #[test]
    fn test_percentage() {
        assert_eq!(scroll_percentage(0.0, 2000.0, 1000.0), 0.0);
        assert_eq!(scroll_percentage(500.0, 2000.0, 1000.0), 50.0);
        assert_eq!(scroll_percentage(1000.0, 2000.0, 1000.0), 100.0);
    }

    #[test]
    fn test_unscrollable_page_is_zero() {
        assert_eq!(scroll_percentage(0.0, 800.0, 800.0), 0.0);
        assert_eq!(scroll_percentage(10.0, 500.0, 800.0), 0.0);
    }

    #[test]
    fn test_bar_width_follows_scroll() {
        let mut doc = Document::from_layout(&PageLayout::default());
        let mut indicator = ScrollProgressIndicator::new(&doc);
        let max = doc.max_scroll();
        doc.set_scroll_top(max / 4.0);
        indicator.on_scroll(&mut doc);

        let bar = doc.element_by_id("scrollProgress").unwrap();
        assert_eq!(doc.style(bar, "width"), Some("25%"));
        assert_eq!(indicator.percentage(), 25.0);
    }
}
