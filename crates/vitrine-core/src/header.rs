//! Header reaction to the scroll offset

use serde::Serialize;

use crate::dom::{Document, ElementId};

const RAISED_SHADOW: &str = "0 8px 32px rgba(0, 0, 0, 0.1)";

/// Visual state of the header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderState {
    /// At the top of the page, no shadow
    #[default]
    Flat,
    /// Scrolled past the threshold, pinned with a shadow
    Raised,
}

/// `Raised` strictly above the threshold
pub fn header_state(scroll_y: f64, threshold: f64) -> HeaderState {
    if scroll_y > threshold {
        HeaderState::Raised
    } else {
        HeaderState::Flat
    }
}

#[derive(Debug, Clone)]
pub struct HeaderScrollReactor {
    header: Option<ElementId>,
    threshold: f64,
    state: HeaderState,
}

impl HeaderScrollReactor {
    pub fn new(doc: &Document, threshold: f64) -> Self {
        Self {
            header: doc.first_by_class("header"),
            threshold,
            state: HeaderState::Flat,
        }
    }

    pub fn on_scroll(&mut self, doc: &mut Document) -> HeaderState {
        self.state = header_state(doc.scroll_top(), self.threshold);
        let Some(header) = self.header else {
            return self.state;
        };
        match self.state {
            HeaderState::Raised => {
                doc.set_style(header, "transform", "translateY(0)");
                doc.set_style(header, "box-shadow", RAISED_SHADOW);
            }
            HeaderState::Flat => doc.set_style(header, "box-shadow", "none"),
        }
        self.state
    }

    pub fn state(&self) -> HeaderState {
        self.state
    }
}
