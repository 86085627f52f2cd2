//! Page bootstrap and event dispatch
//!
//! [`Page`] wires every controller to one [`Document`] at page-ready time and
//! then routes each incoming [`PageEvent`] to its owner. Timers of all
//! controllers fire in deadline order before any later event is handled, and
//! every reaction runs to completion before the next one starts.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::commands::{CommandRegistry, PageCommand};
use crate::config::AppConfig;
use crate::counter::CounterAnimator;
use crate::dom::{Document, ElementId};
use crate::forms::{FormData, FormKind, FormSimulator};
use crate::header::HeaderScrollReactor;
use crate::motion::scroll::ScrollConfigExt;
use crate::navigation::SmoothScroller;
use crate::particles::ParticleField;
use crate::progress::ScrollProgressIndicator;
use crate::reveal::{ScrollRevealObserver, REVEAL_CLASS};
use crate::slider::HeroSlider;
use crate::snapshot::PageSnapshot;
use crate::theme::{PreferenceStore, Theme, ThemeController};
use crate::throttle::Throttle;
use crate::timers::{ms, TimerQueue};

/// Something that happened on the page
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    Click(ElementId),
    /// A form was submitted
    Submit(ElementId),
    /// Scroll to an absolute offset
    Scroll(f64),
    /// Scroll by a relative amount
    ScrollBy(f64),
    /// Viewport height changed
    Resize(f64),
    PointerEnter(ElementId),
    PointerLeave(ElementId),
    /// A form control's value changed
    Input { target: ElementId, value: String },
    /// A command invoked from outside the markup
    Command(PageCommand),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BootstrapStep {
    HeroEntrance,
    LoadingFade,
    LoadingRemove,
}

pub struct Page {
    doc: Document,
    config: AppConfig,
    registry: CommandRegistry,
    theme: ThemeController,
    particles: ParticleField,
    progress: ScrollProgressIndicator,
    header: HeaderScrollReactor,
    reveal: ScrollRevealObserver,
    slider: HeroSlider,
    counters: CounterAnimator,
    contact: Option<FormSimulator>,
    newsletter: Option<FormSimulator>,
    navigation: SmoothScroller,
    throttle: Throttle,
    bootstrap: TimerQueue<BootstrapStep>,
    now: Duration,
    started: bool,
}

impl Page {
    pub fn new(doc: Document, config: AppConfig, store: Box<dyn PreferenceStore>) -> Self {
        let theme = ThemeController::new(store, config.theme.storage_key.clone());
        let counters = CounterAnimator::new(&doc, ms(config.counter.duration_ms));

        Self {
            registry: CommandRegistry::new(),
            theme,
            particles: ParticleField::new(&doc),
            progress: ScrollProgressIndicator::new(&doc),
            header: HeaderScrollReactor::new(&doc, config.scroll.header_threshold_px),
            reveal: ScrollRevealObserver::new(&doc, &config.reveal),
            slider: HeroSlider::new(&doc, &config.slider),
            counters,
            contact: FormSimulator::new(&doc, FormKind::Contact, &config.forms),
            newsletter: FormSimulator::new(&doc, FormKind::Newsletter, &config.forms),
            navigation: SmoothScroller::new(&doc, &config.scroll),
            throttle: Throttle::new(config.scroll.throttle_duration()),
            bootstrap: TimerQueue::new(),
            now: Duration::ZERO,
            started: false,
            doc,
            config,
        }
    }

    /// Page-ready: start every controller once
    pub fn start(&mut self, now: Duration) {
        if self.started {
            return;
        }
        self.started = true;
        self.now = now;

        self.theme.start(&mut self.doc);

        let mut rng = match self.config.particles.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.particles.start(&mut self.doc, self.config.particles.count, &mut rng);

        self.registry.register("slider");
        self.registry.register("theme");

        self.header.on_scroll(&mut self.doc);
        self.progress.on_scroll(&mut self.doc);
        self.slider.start(&mut self.doc, now);
        self.reveal.start(&mut self.doc, now);
        self.counters.start(&mut self.doc, now);

        let boot = &self.config.bootstrap;
        self.bootstrap
            .schedule(now + ms(boot.hero_delay_ms), BootstrapStep::HeroEntrance);
        self.bootstrap
            .schedule(now + ms(boot.loading_fade_ms), BootstrapStep::LoadingFade);

        info!(
            "Page started: {} slides, {} anchors, contact form: {}, newsletter: {}",
            self.slider.len(),
            self.navigation.anchors().len(),
            self.contact.is_some(),
            self.newsletter.is_some()
        );
    }

    /// Tear down timers and observers; the document keeps its last state
    pub fn stop(&mut self) {
        if !self.started {
            return;
        }
        self.slider.stop();
        self.particles.stop(&mut self.doc);
        self.reveal.stop(&mut self.doc, self.now);
        self.counters.stop(&mut self.doc);
        for form in self.contact.iter_mut().chain(self.newsletter.iter_mut()) {
            form.stop(&mut self.doc);
        }
        self.navigation.cancel();
        self.bootstrap.clear();
        self.registry.unregister("slider");
        self.registry.unregister("theme");
        self.started = false;
        info!("Page stopped");
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Handle one event at page time `now`
    ///
    /// Timers due before `now` fire first.
    pub fn handle(&mut self, event: PageEvent, now: Duration) {
        self.advance_to(now);
        debug!("Handling {:?}", event);

        match event {
            PageEvent::Click(target) => self.click(target, now),
            PageEvent::Submit(form) => {
                self.submit(form, now);
            }
            PageEvent::Scroll(offset) => {
                self.navigation.cancel();
                self.doc.set_scroll_top(offset);
                self.scrolled(now);
            }
            PageEvent::ScrollBy(delta) => {
                self.navigation.cancel();
                let offset = self.doc.scroll_top() + delta;
                self.doc.set_scroll_top(offset);
                self.scrolled(now);
            }
            PageEvent::Resize(height) => {
                self.doc.set_client_height(height);
                self.apply_scroll(now);
            }
            PageEvent::PointerEnter(target) => self.slider.pointer_enter(&mut self.doc, target),
            PageEvent::PointerLeave(target) => self.slider.pointer_leave(&mut self.doc, target),
            PageEvent::Input { target, value } => self.doc.set_value(target, &value),
            PageEvent::Command(command) => {
                match self.registry.resolve(&command.to_string()) {
                    Some(command) => self.run_command(command, now),
                    None => debug!("Command {} is not registered", command),
                }
            }
        }
    }

    fn click(&mut self, target: ElementId, now: Duration) {
        if let Some(command) = self.registry.resolve_element(&self.doc, target) {
            self.run_command(command, now);
            return;
        }
        if self.navigation.is_anchor(target) {
            if let Some(offset) = self.navigation.on_click(&self.doc, target, now) {
                self.doc.set_scroll_top(offset);
                self.apply_scroll(now);
            }
            return;
        }
        let form = self
            .forms()
            .find(|f| f.button() == target)
            .map(FormSimulator::form);
        if let Some(form) = form {
            self.submit(form, now);
        }
    }

    fn run_command(&mut self, command: PageCommand, now: Duration) {
        match command {
            PageCommand::Slider(command) => {
                self.slider.command(&mut self.doc, command, now);
            }
            PageCommand::ToggleTheme => {
                self.theme.toggle(&mut self.doc);
            }
        }
    }

    /// Route a submission to the simulator bound to `form`
    pub fn submit(&mut self, form: ElementId, now: Duration) -> Option<FormData> {
        let simulator = self
            .contact
            .iter_mut()
            .chain(self.newsletter.iter_mut())
            .find(|f| f.form() == form)?;
        simulator.submit(&mut self.doc, now)
    }

    fn forms(&self) -> impl Iterator<Item = &FormSimulator> {
        self.contact.iter().chain(self.newsletter.iter())
    }

    fn scrolled(&mut self, now: Duration) {
        if self.throttle.try_acquire(now) {
            self.apply_scroll(now);
        }
    }

    fn apply_scroll(&mut self, now: Duration) {
        self.header.on_scroll(&mut self.doc);
        self.progress.on_scroll(&mut self.doc);
        if self.started {
            self.reveal.on_scroll(&mut self.doc, now);
            self.counters.on_scroll(&mut self.doc, now);
        }
    }

    /// Earliest pending timer across every controller
    pub fn next_deadline(&self) -> Option<Duration> {
        [
            self.slider.next_deadline(),
            self.reveal.next_deadline(),
            self.contact.as_ref().and_then(FormSimulator::next_deadline),
            self.newsletter.as_ref().and_then(FormSimulator::next_deadline),
            self.bootstrap.next_deadline(),
            self.throttle.flush_deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Whether animation frames are needed (counters or smooth scrolling)
    pub fn is_animating(&self) -> bool {
        self.counters.is_animating() || self.navigation.is_animating()
    }

    /// When the page next needs to run without an incoming event, given the
    /// animation frame interval
    pub fn next_wake(&self, frame_interval: Duration) -> Option<Duration> {
        let frame_interval = frame_interval.max(ms(1));
        let frame = self.is_animating().then(|| self.now + frame_interval);
        match (self.next_deadline(), frame) {
            (Some(deadline), Some(frame)) => Some(deadline.min(frame)),
            (deadline, frame) => deadline.or(frame),
        }
    }

    /// Fire every timer due by `now` in deadline order, then render a frame
    pub fn advance_to(&mut self, now: Duration) {
        while let Some(deadline) = self.next_deadline().filter(|d| *d <= now) {
            self.fire_at(deadline);
        }
        self.frame(now.max(self.now));
    }

    fn fire_at(&mut self, at: Duration) {
        self.now = self.now.max(at);
        self.slider.fire_due(&mut self.doc, at);
        self.reveal.fire_due(&mut self.doc, at);
        for form in self.contact.iter_mut().chain(self.newsletter.iter_mut()) {
            form.fire_due(&mut self.doc, at);
        }
        while let Some((due, step)) = self.bootstrap.pop_due(at) {
            self.run_bootstrap(step, due);
        }
        if self.throttle.take_pending(at) {
            self.apply_scroll(at);
        }
    }

    fn frame(&mut self, now: Duration) {
        self.now = now;
        if let Some(offset) = self.navigation.frame(now) {
            self.doc.set_scroll_top(offset);
            self.apply_scroll(now);
        }
        self.counters.frame(&mut self.doc, now);
    }

    fn run_bootstrap(&mut self, step: BootstrapStep, at: Duration) {
        match step {
            BootstrapStep::HeroEntrance => match self.doc.first_by_class("hero") {
                Some(hero) => self.doc.add_class(hero, REVEAL_CLASS),
                None => debug!("No hero section to animate"),
            },
            BootstrapStep::LoadingFade => {
                if let Some(bar) = self.doc.first_by_class("loading-bar") {
                    self.doc.set_style(bar, "opacity", "0");
                    let remove_at = at + ms(self.config.bootstrap.loading_remove_ms);
                    self.bootstrap.schedule(remove_at, BootstrapStep::LoadingRemove);
                }
            }
            BootstrapStep::LoadingRemove => {
                if let Some(bar) = self.doc.first_by_class("loading-bar") {
                    self.doc.remove(bar);
                    debug!("Loading bar removed");
                }
            }
        }
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn slider(&self) -> &HeroSlider {
        &self.slider
    }

    pub fn reveal(&self) -> &ScrollRevealObserver {
        &self.reveal
    }

    pub fn navigation(&self) -> &SmoothScroller {
        &self.navigation
    }

    pub fn form(&self, kind: FormKind) -> Option<&FormSimulator> {
        self.forms().find(|f| f.kind() == kind)
    }

    /// Stored theme preference
    pub fn theme(&self) -> Theme {
        self.theme.get()
    }

    /// Render model of the current page state
    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot::capture(self)
    }

    pub(crate) fn particles(&self) -> &ParticleField {
        &self.particles
    }

    pub(crate) fn header_state(&self) -> crate::header::HeaderState {
        self.header.state()
    }

    pub(crate) fn progress_percentage(&self) -> f64 {
        self.progress.percentage()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::SliderCommand;
    use crate::header::HeaderState;
    use crate::layout::PageLayout;
    use crate::theme::MemoryStore;

    fn page() -> Page {
        let mut config = AppConfig::default();
        config.particles.seed = Some(1);
        let doc = Document::from_layout(&PageLayout::default());
        let mut page = Page::new(doc, config, Box::new(MemoryStore::new()));
        page.start(ms(0));
        page
    }

    #[test]
    fn test_bootstrap_timeline() {
        let mut page = page();
        let hero = page.document().first_by_class("hero").unwrap();
        let bar = page.document().first_by_class("loading-bar").unwrap();

        assert_eq!(page.document().theme_attribute(), Some("dark"));
        assert_eq!(page.document().elements_by_class("particle").len(), 50);

        page.advance_to(ms(499));
        assert!(!page.document().has_class(hero, "animate-in"));
        page.advance_to(ms(500));
        assert!(page.document().has_class(hero, "animate-in"));

        page.advance_to(ms(2000));
        assert_eq!(page.document().style(bar, "opacity"), Some("0"));
        assert!(page.document().is_connected(bar));
        page.advance_to(ms(2300));
        assert!(!page.document().is_connected(bar));
    }

    #[test]
    fn test_dot_click_goes_to_slide() {
        let mut page = page();
        let dots = page.document().elements_by_class("nav-dot");
        page.handle(PageEvent::Click(dots[2]), ms(100));
        assert_eq!(page.slider().index(), 2);
        assert!(page.document().has_class(dots[2], "active"));

        let next = page.document().first_by_class("slider-next").unwrap();
        page.handle(PageEvent::Click(next), ms(200));
        assert_eq!(page.slider().index(), 3);
    }

    #[test]
    fn test_external_commands_go_through_registry() {
        let mut page = page();
        page.handle(PageEvent::Command(PageCommand::Slider(SliderCommand::Previous)), ms(10));
        assert_eq!(page.slider().index(), 3);

        page.handle(PageEvent::Command(PageCommand::ToggleTheme), ms(20));
        assert_eq!(page.document().theme_attribute(), Some("light"));
        assert_eq!(page.theme(), Theme::Light);

        page.stop();
        page.handle(PageEvent::Command(PageCommand::Slider(SliderCommand::Next)), ms(30));
        assert_eq!(page.slider().index(), 3);
    }

    #[test]
    fn test_auto_advance_through_page() {
        let mut page = page();
        page.advance_to(ms(15_000));
        assert_eq!(page.slider().index(), 3);
        page.advance_to(ms(20_000));
        assert_eq!(page.slider().index(), 0);
    }

    #[test]
    fn test_scroll_drives_header_progress_and_reveal() {
        let mut page = page();
        let about = page.document().element_by_id("about").unwrap();

        page.handle(PageEvent::Scroll(900.0), ms(100));
        let snapshot = page.snapshot();
        assert_eq!(snapshot.header, HeaderState::Raised);
        assert!(snapshot.progress > 0.0);
        assert!(page.reveal().is_revealed(about));

        page.handle(PageEvent::Scroll(0.0), ms(200));
        assert_eq!(page.snapshot().header, HeaderState::Flat);
        assert!(page.reveal().is_revealed(about));
    }

    #[test]
    fn test_throttled_scroll_is_flushed() {
        let mut page = page();
        page.handle(PageEvent::Scroll(50.0), ms(100));
        page.handle(PageEvent::Scroll(400.0), ms(105));
        assert_eq!(page.snapshot().header, HeaderState::Flat);

        assert_eq!(page.next_deadline(), Some(ms(116)));
        page.advance_to(ms(116));
        assert_eq!(page.snapshot().header, HeaderState::Raised);
    }

    #[test]
    fn test_anchor_click_scrolls_smoothly() {
        let mut page = page();
        let anchor = page
            .navigation()
            .anchors()
            .iter()
            .copied()
            .find(|a| page.document().attr(*a, "href") == Some("#about"))
            .unwrap();
        let about = page.document().element_by_id("about").unwrap();
        let target = page.document().get(about).unwrap().top;

        page.handle(PageEvent::Click(anchor), ms(1000));
        assert!(page.is_animating());
        page.advance_to(ms(1200));
        let midway = page.document().scroll_top();
        assert!(midway > 0.0 && midway < target);

        page.advance_to(ms(1400));
        assert_eq!(page.document().scroll_top(), target);
        assert!(!page.navigation().is_animating());
        assert!(page.reveal().is_revealed(about));
    }

    #[test]
    fn test_contact_submission_via_button_click() {
        let mut page = page();
        let button = page.form(FormKind::Contact).unwrap().button();

        page.handle(PageEvent::Click(button), ms(0));
        assert_eq!(page.document().text(button), "Sending...");
        page.advance_to(ms(2000));
        assert_eq!(page.document().text(button), "Message Sent!");
        page.advance_to(ms(5000));
        assert_eq!(page.document().text(button), "Send Message");
        assert!(!page.document().is_disabled(button));
    }

    #[test]
    fn test_newsletter_submission_with_input() {
        let mut page = page();
        let form = page.form(FormKind::Newsletter).unwrap().form();
        let input = page.document().descendants_by_tag(form, "input")[0];

        assert!(page.submit(form, ms(0)).is_none());
        page.handle(
            PageEvent::Input {
                target: input,
                value: "ada@example.com".to_string(),
            },
            ms(10),
        );
        let data = page.submit(form, ms(20)).unwrap();
        assert_eq!(data.get("email").map(String::as_str), Some("ada@example.com"));
    }

    #[test]
    fn test_next_wake_prefers_frames_while_animating() {
        let mut page = page();
        assert_eq!(page.next_wake(ms(16)), Some(ms(500)));

        page.handle(PageEvent::Scroll(1700.0), ms(100));
        assert!(page.is_animating());
        assert_eq!(page.next_wake(ms(16)), Some(ms(116)));
        assert_eq!(page.next_wake(Duration::ZERO), Some(ms(101)));
    }

    #[test]
    fn test_stop_is_idempotent_and_halts_timers() {
        let mut page = page();
        page.stop();
        page.stop();
        assert_eq!(page.next_deadline(), None);
        page.advance_to(ms(60_000));
        assert_eq!(page.slider().index(), 0);
    }

    #[test]
    fn test_restart_builds_a_single_particle_field() {
        let mut page = page();
        page.stop();
        assert!(page.document().elements_by_class("particle").is_empty());

        page.start(ms(10));
        assert_eq!(page.document().elements_by_class("particle").len(), 50);
        assert_eq!(page.particles().particles().count(), 50);
    }

    #[test]
    fn test_restart_mid_stagger_reveals_every_card() {
        let mut page = page();
        let grid = page.document().first_by_class("services-grid").unwrap();
        let cards = page.document().descendants_by_class(grid, "service-card");

        page.handle(PageEvent::Scroll(1000.0), ms(100));
        assert!(page.reveal().is_revealed(grid));
        page.stop();
        page.start(ms(200));
        page.handle(PageEvent::Scroll(1000.0), ms(300));
        page.advance_to(ms(70_000));

        assert!(cards.iter().all(|c| page.reveal().is_revealed(*c)));
    }
}
