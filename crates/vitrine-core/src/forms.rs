//! Simulated form submissions
//!
//! Nothing is transmitted. Submitting runs a fixed script on the submit
//! button: a pending label while disabled, a success label after the send
//! delay (fields are cleared at that point), then the original label and
//! state come back after the revert delay.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::FormsConfig;
use crate::dom::{Document, ElementId};
use crate::timers::{ms, TimerQueue};

const SUCCESS_BACKGROUND: &str = "linear-gradient(45deg, #10b981, #059669)";
const ACCENT_BACKGROUND: &str = "var(--accent-gradient)";

/// Field name to submitted value
pub type FormData = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormKind {
    Contact,
    Newsletter,
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormKind::Contact => f.write_str("contact"),
            FormKind::Newsletter => f.write_str("newsletter"),
        }
    }
}

/// Where a form is in its scripted sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormPhase {
    #[default]
    Idle,
    Sending,
    Sent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormStep {
    Deliver,
    Revert,
}

#[derive(Debug, Clone)]
struct FormScript {
    form_class: &'static str,
    pending_label: &'static str,
    success_label: &'static str,
    send_delay: Duration,
    revert_delay: Duration,
}

impl FormScript {
    fn for_kind(kind: FormKind, config: &FormsConfig) -> Self {
        match kind {
            FormKind::Contact => Self {
                form_class: "contact-form",
                pending_label: "Sending...",
                success_label: "Message Sent!",
                send_delay: ms(config.contact_delay_ms),
                revert_delay: ms(config.revert_ms),
            },
            FormKind::Newsletter => Self {
                form_class: "newsletter-form",
                pending_label: "Subscribing...",
                success_label: "Subscribed!",
                send_delay: ms(config.newsletter_delay_ms),
                revert_delay: ms(config.revert_ms),
            },
        }
    }
}

pub struct FormSimulator {
    kind: FormKind,
    form: ElementId,
    button: ElementId,
    script: FormScript,
    phase: FormPhase,
    original_label: String,
    timers: TimerQueue<FormStep>,
}

impl FormSimulator {
    /// Bind to the form of `kind`; `None` when the page has no such form or
    /// it has no submit button
    pub fn new(doc: &Document, kind: FormKind, config: &FormsConfig) -> Option<Self> {
        let script = FormScript::for_kind(kind, config);
        let form = doc.first_by_class(script.form_class)?;
        let button = match kind {
            FormKind::Contact => doc
                .descendants_by_tag(form, "button")
                .into_iter()
                .find(|b| doc.attr(*b, "type") == Some("submit")),
            FormKind::Newsletter => doc.descendants_by_class(form, "newsletter-btn").into_iter().next(),
        }?;

        Some(Self {
            kind,
            form,
            button,
            script,
            phase: FormPhase::Idle,
            original_label: String::new(),
            timers: TimerQueue::new(),
        })
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn form(&self) -> ElementId {
        self.form
    }

    pub fn button(&self) -> ElementId {
        self.button
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    fn fields(&self, doc: &Document) -> Vec<ElementId> {
        let mut fields = doc.descendants_by_tag(self.form, "input");
        fields.extend(doc.descendants_by_tag(self.form, "textarea"));
        fields.sort();
        fields
    }

    fn email_input(&self, doc: &Document) -> Option<ElementId> {
        self.fields(doc)
            .into_iter()
            .find(|f| doc.attr(*f, "type") == Some("email"))
    }

    /// Current values of every named field
    pub fn form_data(&self, doc: &Document) -> FormData {
        self.fields(doc)
            .into_iter()
            .filter_map(|f| {
                let name = doc.attr(f, "name")?;
                Some((name.to_string(), doc.value(f).to_string()))
            })
            .collect()
    }

    /// Intercept a submission; returns the captured data when the script starts
    ///
    /// Ignored while a previous submission is still running, and for the
    /// newsletter when the email field is empty.
    pub fn submit(&mut self, doc: &mut Document, now: Duration) -> Option<FormData> {
        if self.phase != FormPhase::Idle || doc.is_disabled(self.button) {
            debug!("Ignoring {} submission while busy", self.kind);
            return None;
        }
        if self.kind == FormKind::Newsletter {
            let email = self.email_input(doc).map(|input| doc.value(input)).unwrap_or("");
            if email.trim().is_empty() {
                debug!("Ignoring newsletter submission without an email");
                return None;
            }
        }

        let data = self.form_data(doc);
        info!("Simulating {} submission: {:?}", self.kind, data);

        self.original_label = doc.text(self.button).to_string();
        doc.set_text(self.button, self.script.pending_label);
        doc.set_disabled(self.button, true);
        self.phase = FormPhase::Sending;
        self.timers.schedule(now + self.script.send_delay, FormStep::Deliver);
        Some(data)
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    pub fn fire_due(&mut self, doc: &mut Document, now: Duration) {
        while let Some((at, step)) = self.timers.pop_due(now) {
            match step {
                FormStep::Deliver => {
                    doc.set_text(self.button, self.script.success_label);
                    doc.set_style(self.button, "background", SUCCESS_BACKGROUND);
                    match self.kind {
                        FormKind::Contact => {
                            for field in self.fields(doc) {
                                doc.set_value(field, "");
                            }
                        }
                        FormKind::Newsletter => {
                            if let Some(input) = self.email_input(doc) {
                                doc.set_value(input, "");
                            }
                        }
                    }
                    self.phase = FormPhase::Sent;
                    self.timers.schedule(at + self.script.revert_delay, FormStep::Revert);
                }
                FormStep::Revert => self.revert(doc),
            }
        }
    }

    fn revert(&mut self, doc: &mut Document) {
        doc.set_text(self.button, &self.original_label);
        doc.set_style(self.button, "background", ACCENT_BACKGROUND);
        doc.set_disabled(self.button, false);
        self.phase = FormPhase::Idle;
    }

    /// Abort a running script and restore the button right away
    pub fn stop(&mut self, doc: &mut Document) {
        if self.phase != FormPhase::Idle {
            self.timers.clear();
            self.revert(doc);
        }
    }
}
