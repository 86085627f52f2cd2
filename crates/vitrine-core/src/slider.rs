//! Hero slider
//!
//! Owns the index of the active slide over a fixed deck. Every command
//! recomputes the track offset (`-index * 100%`) and the active dot in the
//! same step, so the two can never disagree. A recurring timer advances the
//! deck every `interval`; manual navigation restarts that period when
//! `reset_on_manual` is set.

use std::time::Duration;

use tracing::{debug, warn};

use crate::commands::SliderCommand;
use crate::config::{OutOfRangePolicy, SliderConfig};
use crate::dom::{Document, ElementId};
use crate::timers::{ms, TimerQueue};

const ACTIVE_CLASS: &str = "active";
const HOVER_SCALE: &str = "scale(1.02)";
const REST_SCALE: &str = "scale(1)";

pub struct HeroSlider {
    track: Option<ElementId>,
    slides: Vec<ElementId>,
    dots: Vec<ElementId>,
    index: usize,
    interval: Duration,
    reset_on_manual: bool,
    policy: OutOfRangePolicy,
    timers: TimerQueue<()>,
    running: bool,
}

impl HeroSlider {
    pub fn new(doc: &Document, config: &SliderConfig) -> Self {
        let track = doc.element_by_id("slides");
        let slides = match track {
            Some(track) => doc.descendants_by_class(track, "slide"),
            None => doc.elements_by_class("slide"),
        };

        Self {
            track,
            slides,
            dots: doc.elements_by_class("nav-dot"),
            index: 0,
            interval: ms(config.interval_ms),
            reset_on_manual: config.reset_on_manual,
            policy: config.out_of_range,
            timers: TimerQueue::new(),
            running: false,
        }
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Horizontal track offset in percent
    pub fn offset_percent(&self) -> i64 {
        -(self.index as i64) * 100
    }

    /// Render the initial position and start the auto-advance timer
    pub fn start(&mut self, doc: &mut Document, now: Duration) {
        if self.is_empty() {
            debug!("No slides on the page, slider stays idle");
            return;
        }
        self.render(doc);
        self.running = true;
        self.schedule_tick(now);
        debug!("Slider started with {} slides", self.len());
    }

    /// Cancel the auto-advance timer; manual commands keep working
    pub fn stop(&mut self) {
        self.timers.clear();
        self.running = false;
    }

    fn schedule_tick(&mut self, from: Duration) {
        self.timers.clear();
        if self.running && !self.interval.is_zero() {
            self.timers.schedule(from + self.interval, ());
        }
    }

    /// Move forward one slide, wrapping to the first
    pub fn advance(&mut self, doc: &mut Document) -> usize {
        if !self.is_empty() {
            self.index = (self.index + 1) % self.len();
            self.render(doc);
        }
        self.index
    }

    /// Move back one slide, wrapping to the last
    pub fn retreat(&mut self, doc: &mut Document) -> usize {
        if !self.is_empty() {
            self.index = (self.index + self.len() - 1) % self.len();
            self.render(doc);
        }
        self.index
    }

    /// Jump to `index`; out-of-range values follow the configured policy
    pub fn go_to(&mut self, doc: &mut Document, index: usize) -> usize {
        self.show(doc, i64::try_from(index).unwrap_or(i64::MAX))
    }

    fn show(&mut self, doc: &mut Document, index: i64) -> usize {
        if !self.is_empty() {
            self.index = self.resolve(index);
            self.render(doc);
        }
        self.index
    }

    /// Map any requested index, negative included, onto `[0, len)`
    fn resolve(&self, index: i64) -> usize {
        let len = self.len() as i64;
        if (0..len).contains(&index) {
            return index as usize;
        }
        warn!("Slide {} out of range for {} slides", index, len);
        let resolved = match self.policy {
            OutOfRangePolicy::Clamp => index.clamp(0, len - 1),
            OutOfRangePolicy::Wrap => index.rem_euclid(len),
        };
        resolved as usize
    }

    /// Run a markup-triggered command at page time `now`
    pub fn command(&mut self, doc: &mut Document, command: SliderCommand, now: Duration) -> usize {
        let index = match command {
            SliderCommand::Next => self.advance(doc),
            SliderCommand::Previous => self.retreat(doc),
            SliderCommand::GoTo(index) => self.show(doc, index),
        };
        if self.reset_on_manual {
            self.schedule_tick(now);
        }
        index
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    /// Advance once per elapsed period up to `now`
    pub fn fire_due(&mut self, doc: &mut Document, now: Duration) {
        while let Some((at, ())) = self.timers.pop_due(now) {
            self.advance(doc);
            self.schedule_tick(at);
        }
    }

    /// Apply the hover scale to a slide; anything else is ignored
    pub fn pointer_enter(&mut self, doc: &mut Document, target: ElementId) {
        if self.slides.contains(&target) {
            doc.set_style(target, "transform", HOVER_SCALE);
        }
    }

    pub fn pointer_leave(&mut self, doc: &mut Document, target: ElementId) {
        if self.slides.contains(&target) {
            doc.set_style(target, "transform", REST_SCALE);
        }
    }

    fn render(&self, doc: &mut Document) {
        if let Some(track) = self.track {
            doc.set_style(track, "transform", &format!("translateX({}%)", self.offset_percent()));
        }
        for (i, dot) in self.dots.iter().enumerate() {
            doc.toggle_class(*dot, ACTIVE_CLASS, i == self.index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PageLayout;

    fn setup(config: SliderConfig) -> (Document, HeroSlider) {
        let mut doc = Document::from_layout(&PageLayout::default());
        let mut slider = HeroSlider::new(&doc, &config);
        slider.start(&mut doc, ms(0));
        (doc, slider)
    }

    fn active_dots(doc: &Document) -> Vec<usize> {
        doc.elements_by_class("nav-dot")
            .into_iter()
            .enumerate()
            .filter(|(_, dot)| doc.has_class(*dot, "active"))
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn test_advance_wraps_modulo_deck() {
        let (mut doc, mut slider) = setup(SliderConfig::default());
        assert_eq!(slider.len(), 4);
        for n in 1..=9 {
            assert_eq!(slider.advance(&mut doc), n % 4);
            assert_eq!(active_dots(&doc), vec![n % 4]);
        }
    }

    #[test]
    fn test_retreat_inverts_advance() {
        let (mut doc, mut slider) = setup(SliderConfig::default());
        for start in 0..4 {
            slider.go_to(&mut doc, start);
            slider.advance(&mut doc);
            assert_eq!(slider.retreat(&mut doc), start);
        }
        slider.go_to(&mut doc, 0);
        assert_eq!(slider.retreat(&mut doc), 3);
    }

    #[test]
    fn test_go_to_updates_track_and_dots() {
        let (mut doc, mut slider) = setup(SliderConfig::default());
        let track = doc.element_by_id("slides").unwrap();
        assert_eq!(doc.style(track, "transform"), Some("translateX(0%)"));

        for k in 0..4 {
            assert_eq!(slider.go_to(&mut doc, k), k);
            assert_eq!(active_dots(&doc), vec![k]);
            let expected = format!("translateX({}%)", -(k as i64) * 100);
            assert_eq!(doc.style(track, "transform"), Some(expected.as_str()));
            assert_eq!(slider.offset_percent(), -(k as i64) * 100);
        }
    }

    #[test]
    fn test_out_of_range_clamps_by_default() {
        let (mut doc, mut slider) = setup(SliderConfig::default());
        assert_eq!(slider.go_to(&mut doc, 17), 3);
        assert_eq!(active_dots(&doc), vec![3]);

        assert_eq!(slider.command(&mut doc, SliderCommand::GoTo(-1), ms(0)), 0);
        assert_eq!(active_dots(&doc), vec![0]);
    }

    #[test]
    fn test_out_of_range_wraps_when_configured() {
        let config = SliderConfig {
            out_of_range: OutOfRangePolicy::Wrap,
            ..Default::default()
        };
        let (mut doc, mut slider) = setup(config);
        assert_eq!(slider.go_to(&mut doc, 6), 2);
        assert_eq!(slider.command(&mut doc, SliderCommand::GoTo(-1), ms(0)), 3);
    }

    #[test]
    fn test_timer_advances_every_interval() {
        let (mut doc, mut slider) = setup(SliderConfig::default());
        assert_eq!(slider.next_deadline(), Some(ms(5000)));

        slider.fire_due(&mut doc, ms(4999));
        assert_eq!(slider.index(), 0);
        slider.fire_due(&mut doc, ms(5000));
        assert_eq!(slider.index(), 1);
        slider.fire_due(&mut doc, ms(20_000));
        assert_eq!(slider.index(), 0);
        assert_eq!(slider.next_deadline(), Some(ms(25_000)));
    }

    #[test]
    fn test_manual_navigation_resets_period() {
        let (mut doc, mut slider) = setup(SliderConfig::default());
        slider.command(&mut doc, SliderCommand::Next, ms(4000));
        assert_eq!(slider.next_deadline(), Some(ms(9000)));

        slider.fire_due(&mut doc, ms(5000));
        assert_eq!(slider.index(), 1);
        slider.fire_due(&mut doc, ms(9000));
        assert_eq!(slider.index(), 2);
    }

    #[test]
    fn test_manual_navigation_keeps_period_when_not_resetting() {
        let config = SliderConfig {
            reset_on_manual: false,
            ..Default::default()
        };
        let (mut doc, mut slider) = setup(config);
        slider.command(&mut doc, SliderCommand::GoTo(2), ms(4000));
        assert_eq!(slider.next_deadline(), Some(ms(5000)));
        slider.fire_due(&mut doc, ms(5000));
        assert_eq!(slider.index(), 3);
    }

    #[test]
    fn test_stop_halts_rotation() {
        let (mut doc, mut slider) = setup(SliderConfig::default());
        slider.stop();
        slider.fire_due(&mut doc, ms(60_000));
        assert_eq!(slider.index(), 0);
        slider.command(&mut doc, SliderCommand::Next, ms(60_000));
        assert_eq!(slider.index(), 1);
        assert_eq!(slider.next_deadline(), None);
    }

    #[test]
    fn test_hover_scales_without_moving() {
        let (mut doc, mut slider) = setup(SliderConfig::default());
        let slide = doc.elements_by_class("slide")[2];
        slider.pointer_enter(&mut doc, slide);
        assert_eq!(doc.style(slide, "transform"), Some("scale(1.02)"));
        slider.pointer_leave(&mut doc, slide);
        assert_eq!(doc.style(slide, "transform"), Some("scale(1)"));
        assert_eq!(slider.index(), 0);
    }

    #[test]
    fn test_empty_deck_is_inert() {
        let mut layout = PageLayout::default();
        layout.slides.clear();
        let mut doc = Document::from_layout(&layout);
        let mut slider = HeroSlider::new(&doc, &SliderConfig::default());
        slider.start(&mut doc, ms(0));

        assert_eq!(slider.advance(&mut doc), 0);
        assert_eq!(slider.retreat(&mut doc), 0);
        assert_eq!(slider.go_to(&mut doc, 3), 0);
        assert_eq!(slider.next_deadline(), None);
    }
}
