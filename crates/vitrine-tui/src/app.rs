use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::warn;

use vitrine_core::{
    AppConfig, Document, ElementId, PageCommand, PageEvent, PageSnapshot, SliderCommand,
};

use crate::theme::Palette;

/// Values typed into forms when submitting from the keyboard
const DEMO_VALUES: &[(&str, &str)] = &[
    ("name", "Ada Lovelace"),
    ("email", "ada@example.com"),
    ("message", "Hello from the terminal preview"),
];

/// An in-page link the user can focus and follow
#[derive(Debug, Clone)]
pub struct AnchorControl {
    pub label: String,
    pub target: String,
    pub element: ElementId,
}

/// A form and its named fields
#[derive(Debug, Clone)]
pub struct FormControl {
    pub form: ElementId,
    pub fields: Vec<(String, ElementId)>,
}

/// Element handles the terminal needs to address page events
#[derive(Debug, Clone, Default)]
pub struct PageControls {
    pub anchors: Vec<AnchorControl>,
    pub contact: Option<FormControl>,
    pub newsletter: Option<FormControl>,
}

impl PageControls {
    pub fn from_document(doc: &Document) -> Self {
        let anchors = doc
            .elements_by_class("nav-link")
            .into_iter()
            .map(|element| AnchorControl {
                label: doc.text(element).to_string(),
                target: doc.attr(element, "href").unwrap_or_default().to_string(),
                element,
            })
            .collect();

        Self {
            anchors,
            contact: form_control(doc, "contact-form"),
            newsletter: form_control(doc, "newsletter-form"),
        }
    }
}

fn form_control(doc: &Document, class: &str) -> Option<FormControl> {
    let form = doc.first_by_class(class)?;
    let mut fields = doc.descendants_by_tag(form, "input");
    fields.extend(doc.descendants_by_tag(form, "textarea"));
    fields.sort();

    Some(FormControl {
        form,
        fields: fields
            .into_iter()
            .filter_map(|f| Some((doc.attr(f, "name")?.to_string(), f)))
            .collect(),
    })
}

/// Terminal preview state
pub struct App {
    pub config: Arc<AppConfig>,
    pub snapshot: PageSnapshot,
    pub palette: Palette,
    pub controls: PageControls,
    pub focused_anchor: Option<usize>,
    /// First key of a two-key sequence ("gg")
    pub pending_key: Option<char>,
    pub status_message: Option<String>,
    pub should_quit: bool,
    /// Rows available to the page viewport
    pub viewport_rows: u16,
    events: mpsc::UnboundedSender<PageEvent>,
}

impl App {
    pub fn new(
        config: Arc<AppConfig>,
        controls: PageControls,
        events: mpsc::UnboundedSender<PageEvent>,
        snapshot: PageSnapshot,
    ) -> Self {
        Self {
            palette: Palette::for_theme(snapshot.theme),
            config,
            snapshot,
            controls,
            focused_anchor: None,
            pending_key: None,
            status_message: None,
            should_quit: false,
            viewport_rows: 0,
            events,
        }
    }

    /// Take the latest page state
    pub fn set_snapshot(&mut self, snapshot: PageSnapshot) {
        if snapshot.theme != self.snapshot.theme {
            self.palette = Palette::for_theme(snapshot.theme);
        }
        self.snapshot = snapshot;
    }

    fn send(&mut self, event: PageEvent) {
        if self.events.send(event).is_err() {
            warn!("Failed to send page event: driver stopped");
            self.set_status("Page is no longer running");
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Page pixels per terminal row
    pub fn line_px(&self) -> f64 {
        self.config.ui.line_px.max(1.0)
    }

    /// First visible page row
    pub fn scroll_row(&self) -> u16 {
        (self.snapshot.scroll_top / self.line_px()).round() as u16
    }

    /// The page area was resized to `rows` terminal rows
    pub fn resize(&mut self, rows: u16) {
        if rows != self.viewport_rows {
            self.viewport_rows = rows;
            let height = f64::from(rows) * self.line_px();
            self.send(PageEvent::Resize(height));
        }
    }

    pub fn scroll_lines(&mut self, lines: i32) {
        let delta = f64::from(lines) * self.line_px();
        self.send(PageEvent::ScrollBy(delta));
    }

    pub fn scroll_half_page(&mut self, down: bool) {
        let half = (i32::from(self.viewport_rows) / 2).max(1);
        self.scroll_lines(if down { half } else { -half });
    }

    pub fn scroll_to_top(&mut self) {
        self.send(PageEvent::Scroll(0.0));
    }

    pub fn scroll_to_bottom(&mut self) {
        let bottom = self.snapshot.max_scroll;
        self.send(PageEvent::Scroll(bottom));
    }

    pub fn next_slide(&mut self) {
        self.send(PageEvent::Command(PageCommand::Slider(SliderCommand::Next)));
    }

    pub fn previous_slide(&mut self) {
        self.send(PageEvent::Command(PageCommand::Slider(SliderCommand::Previous)));
    }

    pub fn go_to_slide(&mut self, index: usize) {
        let index = i64::try_from(index).unwrap_or(i64::MAX);
        self.send(PageEvent::Command(PageCommand::Slider(SliderCommand::GoTo(index))));
    }

    pub fn toggle_theme(&mut self) {
        self.send(PageEvent::Command(PageCommand::ToggleTheme));
    }

    /// Move anchor focus to the next nav link, wrapping around
    pub fn focus_next_anchor(&mut self) {
        let count = self.controls.anchors.len();
        if count == 0 {
            return;
        }
        self.focused_anchor = Some(match self.focused_anchor {
            Some(i) => (i + 1) % count,
            None => 0,
        });
    }

    pub fn focused_anchor(&self) -> Option<&AnchorControl> {
        self.controls.anchors.get(self.focused_anchor?)
    }

    /// Click the focused nav link
    pub fn follow_anchor(&mut self) {
        let Some(anchor) = self.focused_anchor().cloned() else {
            self.set_status("Tab to focus a link first");
            return;
        };
        self.set_status(format!("Scrolling to {}", anchor.label));
        self.send(PageEvent::Click(anchor.element));
    }

    /// Fill the contact form with demo values and submit it
    pub fn submit_contact(&mut self) {
        match self.controls.contact.clone() {
            Some(form) => {
                self.fill_and_submit(&form);
                self.set_status("Contact form submitted");
            }
            None => self.set_status("This page has no contact form"),
        }
    }

    pub fn submit_newsletter(&mut self) {
        match self.controls.newsletter.clone() {
            Some(form) => {
                self.fill_and_submit(&form);
                self.set_status("Newsletter form submitted");
            }
            None => self.set_status("This page has no newsletter form"),
        }
    }

    fn fill_and_submit(&mut self, form: &FormControl) {
        for (name, field) in &form.fields {
            let value = DEMO_VALUES
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| *value)
                .unwrap_or("demo");
            self.send(PageEvent::Input {
                target: *field,
                value: value.to_string(),
            });
        }
        self.send(PageEvent::Submit(form.form));
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_core::{MemoryStore, Page, PageLayout};

    fn app() -> (App, mpsc::UnboundedReceiver<PageEvent>) {
        let config = Arc::new(AppConfig::default());
        let doc = Document::from_layout(&PageLayout::default());
        let controls = PageControls::from_document(&doc);
        let page = Page::new(doc, (*config).clone(), Box::new(MemoryStore::new()));
        let (tx, rx) = mpsc::unbounded_channel();
        (App::new(config, controls, tx, page.snapshot()), rx)
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<PageEvent>) -> Vec<PageEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[test]
    fn test_controls_from_default_page() {
        let (app, _rx) = app();
        assert_eq!(app.controls.anchors.len(), 5);
        assert_eq!(app.controls.anchors[0].target, "#home");
        let contact = app.controls.contact.as_ref().unwrap();
        let names: Vec<_> = contact.fields.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["name", "email", "message"]);
        assert_eq!(app.controls.newsletter.as_ref().unwrap().fields.len(), 1);
    }

    #[test]
    fn test_anchor_focus_wraps() {
        let (mut app, mut rx) = app();
        app.follow_anchor();
        assert!(drain(&mut rx).is_empty());

        for _ in 0..6 {
            app.focus_next_anchor();
        }
        assert_eq!(app.focused_anchor, Some(0));

        app.follow_anchor();
        let anchor = app.controls.anchors[0].element;
        assert_eq!(drain(&mut rx), vec![PageEvent::Click(anchor)]);
    }

    #[test]
    fn test_scrolling_uses_line_height() {
        let (mut app, mut rx) = app();
        app.resize(30);
        app.scroll_lines(3);
        app.scroll_half_page(false);
        assert_eq!(
            drain(&mut rx),
            vec![
                PageEvent::Resize(600.0),
                PageEvent::ScrollBy(60.0),
                PageEvent::ScrollBy(-300.0),
            ]
        );

        app.resize(30);
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn test_newsletter_fills_email_then_submits() {
        let (mut app, mut rx) = app();
        app.submit_newsletter();
        let form = app.controls.newsletter.clone().unwrap();
        assert_eq!(
            drain(&mut rx),
            vec![
                PageEvent::Input {
                    target: form.fields[0].1,
                    value: "ada@example.com".to_string(),
                },
                PageEvent::Submit(form.form),
            ]
        );
    }

    #[test]
    fn test_closed_channel_sets_status() {
        let (mut app, rx) = app();
        drop(rx);
        app.next_slide();
        assert!(app.status_message.is_some());
    }
}
