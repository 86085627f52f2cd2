//! Scroll-triggered entrance animations
//!
//! Sections and the services grid get `animate-in` the first time they become
//! visible. Revealing the grid also reveals its cards one after another, in
//! document order, `stagger` apart.

use std::collections::BTreeMap;
use std::time::Duration;

use tracing::debug;

use crate::config::RevealConfig;
use crate::dom::{Document, ElementId};
use crate::timers::{ms, TimerQueue};
use crate::visibility::{ObservationState, ViewportObserver};

pub const REVEAL_CLASS: &str = "animate-in";
const SECTION_CLASS: &str = "section";
const GRID_CLASS: &str = "services-grid";
const CARD_CLASS: &str = "service-card";

pub struct ScrollRevealObserver {
    observer: ViewportObserver,
    stagger: Duration,
    sections: Vec<ElementId>,
    grid: Option<ElementId>,
    states: BTreeMap<ElementId, ObservationState>,
    revealed_at: BTreeMap<ElementId, Duration>,
    timers: TimerQueue<ElementId>,
}

impl ScrollRevealObserver {
    pub fn new(doc: &Document, config: &RevealConfig) -> Self {
        Self {
            observer: ViewportObserver::new(config.threshold, config.bottom_margin_px),
            stagger: ms(config.stagger_ms),
            sections: doc.elements_by_class(SECTION_CLASS),
            grid: doc.first_by_class(GRID_CLASS),
            states: BTreeMap::new(),
            revealed_at: BTreeMap::new(),
            timers: TimerQueue::new(),
        }
    }

    /// Register every section and, separately, the grid; then take the
    /// initial visibility reading
    pub fn start(&mut self, doc: &mut Document, now: Duration) {
        for section in self.sections.clone() {
            self.register(section);
        }
        match self.grid {
            Some(grid) => self.register(grid),
            None => debug!("No services grid on the page"),
        }
        self.on_scroll(doc, now);
    }

    /// Stop observing; revealed targets stay revealed
    ///
    /// Cards still waiting on their stagger are revealed at `now` so a
    /// revealed grid never keeps hidden cards across a restart.
    pub fn stop(&mut self, doc: &mut Document, now: Duration) {
        self.observer.disconnect();
        while let Some((_, card)) = self.timers.pop_due(Duration::MAX) {
            if self.state(card) != ObservationState::Triggered {
                self.reveal(doc, card, now);
            }
        }
        for state in self.states.values_mut() {
            if *state == ObservationState::Pending {
                *state = ObservationState::Unobserved;
            }
        }
    }

    fn register(&mut self, target: ElementId) {
        let state = self.states.entry(target).or_default();
        if *state == ObservationState::Unobserved {
            *state = ObservationState::Pending;
            self.observer.observe(target);
        }
    }

    /// React to a scroll or layout change
    pub fn on_scroll(&mut self, doc: &mut Document, now: Duration) {
        for entry in self.observer.check(doc) {
            if entry.is_intersecting {
                self.trigger(doc, entry.target, now);
            }
        }
    }

    fn trigger(&mut self, doc: &mut Document, target: ElementId, now: Duration) {
        if self.state(target) == ObservationState::Triggered {
            return;
        }
        self.reveal(doc, target, now);
        self.observer.unobserve(target);

        if Some(target) == self.grid {
            let cards = doc.descendants_by_class(target, CARD_CLASS);
            debug!("Staggering {} cards", cards.len());
            for (index, card) in cards.into_iter().enumerate() {
                if self.state(card) == ObservationState::Unobserved {
                    self.states.insert(card, ObservationState::Pending);
                    self.timers.schedule(now + self.stagger * index as u32, card);
                }
            }
        }
    }

    fn reveal(&mut self, doc: &mut Document, target: ElementId, now: Duration) {
        doc.add_class(target, REVEAL_CLASS);
        self.states.insert(target, ObservationState::Triggered);
        self.revealed_at.insert(target, now);
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    /// Reveal every card whose stagger delay has elapsed by `now`
    pub fn fire_due(&mut self, doc: &mut Document, now: Duration) {
        while let Some((at, card)) = self.timers.pop_due(now) {
            if self.state(card) != ObservationState::Triggered {
                self.reveal(doc, card, at);
            }
        }
    }

    pub fn state(&self, target: ElementId) -> ObservationState {
        self.states.get(&target).copied().unwrap_or_default()
    }

    pub fn is_revealed(&self, target: ElementId) -> bool {
        self.state(target) == ObservationState::Triggered
    }

    /// Page time at which `target` was revealed
    pub fn revealed_at(&self, target: ElementId) -> Option<Duration> {
        self.revealed_at.get(&target).copied()
    }

    pub fn revealed(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.revealed_at.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PageLayout;

    fn setup() -> (Document, ScrollRevealObserver) {
        let doc = Document::from_layout(&PageLayout::default());
        let reveal = ScrollRevealObserver::new(&doc, &RevealConfig::default());
        (doc, reveal)
    }

    fn scroll_into_view(doc: &mut Document, target: ElementId) {
        let top = doc.get(target).unwrap().top;
        doc.set_scroll_top(top - 100.0);
    }

    #[test]
    fn test_nothing_revealed_at_top_of_page() {
        let (mut doc, mut reveal) = setup();
        reveal.start(&mut doc, ms(0));
        for section in doc.elements_by_class("section") {
            assert!(!reveal.is_revealed(section));
            assert_eq!(reveal.state(section), ObservationState::Pending);
        }
    }

    #[test]
    fn test_section_revealed_once_and_never_reverts() {
        let (mut doc, mut reveal) = setup();
        reveal.start(&mut doc, ms(0));
        let about = doc.element_by_id("about").unwrap();

        scroll_into_view(&mut doc, about);
        reveal.on_scroll(&mut doc, ms(100));
        assert!(reveal.is_revealed(about));
        assert!(doc.has_class(about, REVEAL_CLASS));
        assert_eq!(reveal.revealed_at(about), Some(ms(100)));

        doc.set_scroll_top(0.0);
        reveal.on_scroll(&mut doc, ms(200));
        scroll_into_view(&mut doc, about);
        reveal.on_scroll(&mut doc, ms(300));

        assert!(reveal.is_revealed(about));
        assert_eq!(reveal.revealed_at(about), Some(ms(100)));
    }

    #[test]
    fn test_grid_cards_stagger_in_document_order() {
        let (mut doc, mut reveal) = setup();
        reveal.start(&mut doc, ms(0));
        let grid = doc.first_by_class("services-grid").unwrap();
        let cards = doc.descendants_by_class(grid, "service-card");

        scroll_into_view(&mut doc, grid);
        reveal.on_scroll(&mut doc, ms(1000));
        assert!(reveal.is_revealed(grid));
        assert_eq!(reveal.next_deadline(), Some(ms(1000)));

        reveal.fire_due(&mut doc, ms(1000));
        assert!(reveal.is_revealed(cards[0]));
        assert!(!reveal.is_revealed(cards[1]));

        reveal.fire_due(&mut doc, ms(5000));
        let times: Vec<_> = cards.iter().map(|c| reveal.revealed_at(*c).unwrap()).collect();
        for pair in times.windows(2) {
            assert_eq!(pair[1] - pair[0], ms(150));
        }
        assert!(cards.iter().all(|c| doc.has_class(*c, REVEAL_CLASS)));
    }

    #[test]
    fn test_stop_settles_pending_cards() {
        let (mut doc, mut reveal) = setup();
        reveal.start(&mut doc, ms(0));
        let grid = doc.first_by_class("services-grid").unwrap();
        let cards = doc.descendants_by_class(grid, "service-card");

        scroll_into_view(&mut doc, grid);
        reveal.on_scroll(&mut doc, ms(0));
        reveal.fire_due(&mut doc, ms(0));
        reveal.stop(&mut doc, ms(50));

        assert_eq!(reveal.next_deadline(), None);
        assert!(reveal.is_revealed(grid));
        assert_eq!(reveal.revealed_at(cards[0]), Some(ms(0)));
        for card in &cards[1..] {
            assert!(doc.has_class(*card, REVEAL_CLASS));
            assert_eq!(reveal.revealed_at(*card), Some(ms(50)));
        }
    }

    #[test]
    fn test_restart_after_stop_keeps_grid_and_cards_consistent() {
        let (mut doc, mut reveal) = setup();
        reveal.start(&mut doc, ms(0));
        let grid = doc.first_by_class("services-grid").unwrap();
        let cards = doc.descendants_by_class(grid, "service-card");
        let contact = doc.element_by_id("contact").unwrap();

        scroll_into_view(&mut doc, grid);
        reveal.on_scroll(&mut doc, ms(100));
        reveal.fire_due(&mut doc, ms(100));
        reveal.stop(&mut doc, ms(150));

        doc.set_scroll_top(0.0);
        reveal.start(&mut doc, ms(200));
        scroll_into_view(&mut doc, grid);
        reveal.on_scroll(&mut doc, ms(300));
        reveal.fire_due(&mut doc, ms(70_000));

        assert!(reveal.is_revealed(grid));
        assert!(cards.iter().all(|c| reveal.is_revealed(*c)));

        // Sections observed again after the restart still reveal
        scroll_into_view(&mut doc, contact);
        reveal.on_scroll(&mut doc, ms(400));
        assert!(reveal.is_revealed(contact));
    }

    #[test]
    fn test_page_without_grid_still_reveals_sections() {
        let mut layout = PageLayout::default();
        layout.sections.retain(|s| s.id != "services");
        let mut doc = Document::from_layout(&layout);
        let mut reveal = ScrollRevealObserver::new(&doc, &RevealConfig::default());
        reveal.start(&mut doc, ms(0));

        let contact = doc.element_by_id("contact").unwrap();
        scroll_into_view(&mut doc, contact);
        reveal.on_scroll(&mut doc, ms(10));
        assert!(reveal.is_revealed(contact));
    }
}
