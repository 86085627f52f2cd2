//! Numeric counters that count up the first time they are seen
//!
//! The displayed value is `floor(min(elapsed / duration, 1) * target)`, with
//! any suffix of the original text kept on every frame.

use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;
use tracing::{debug, warn};

use crate::dom::{Document, ElementId};
use crate::motion::timing::{counter_value, is_complete};
use crate::visibility::{ObservationState, ViewportObserver};

const COUNTER_CLASSES: [&str; 2] = ["stat-number", "metric-number"];

fn leading_integer() -> &'static Regex {
    static LEADING_INTEGER: OnceLock<Regex> = OnceLock::new();
    LEADING_INTEGER.get_or_init(|| Regex::new(r"^\s*([+-]?\d+)").expect("valid counter regex"))
}

/// Target value and suffix parsed from a counter's text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterTarget {
    pub value: i64,
    pub suffix: &'static str,
}

/// Parse the leading integer of `text` and pick the suffix to keep
///
/// `+` wins over `%`, which wins over a slash (always rendered as `/7`).
/// Returns `None` when the text does not start with an integer.
pub fn parse_counter(text: &str) -> Option<CounterTarget> {
    let digits = leading_integer().captures(text)?.get(1)?.as_str();
    let value = digits.parse().ok()?;
    let suffix = if text.contains('+') {
        "+"
    } else if text.contains('%') {
        "%"
    } else if text.contains('/') {
        "/7"
    } else {
        ""
    };
    Some(CounterTarget { value, suffix })
}

#[derive(Debug, Clone)]
struct Counter {
    element: ElementId,
    state: ObservationState,
    run: Option<CounterRun>,
}

#[derive(Debug, Clone)]
struct CounterRun {
    start: Duration,
    target: CounterTarget,
    finished: bool,
}

pub struct CounterAnimator {
    observer: ViewportObserver,
    duration: Duration,
    counters: Vec<Counter>,
}

impl CounterAnimator {
    pub fn new(doc: &Document, duration: Duration) -> Self {
        let mut elements: Vec<ElementId> = COUNTER_CLASSES
            .iter()
            .flat_map(|class| doc.elements_by_class(class))
            .collect();
        elements.sort();
        elements.dedup();

        Self {
            observer: ViewportObserver::new(0.0, 0.0),
            duration,
            counters: elements
                .into_iter()
                .map(|element| Counter {
                    element,
                    state: ObservationState::Unobserved,
                    run: None,
                })
                .collect(),
        }
    }

    pub fn start(&mut self, doc: &mut Document, now: Duration) {
        for counter in &mut self.counters {
            if counter.state == ObservationState::Unobserved {
                counter.state = ObservationState::Pending;
                self.observer.observe(counter.element);
            }
        }
        self.on_scroll(doc, now);
    }

    /// Stop watching; running counters jump to their final value
    pub fn stop(&mut self, doc: &mut Document) {
        self.observer.disconnect();
        for counter in &mut self.counters {
            match counter.state {
                ObservationState::Pending => counter.state = ObservationState::Unobserved,
                ObservationState::Triggered => {
                    if let Some(run) = counter.run.as_mut().filter(|r| !r.finished) {
                        let text = format!("{}{}", run.target.value, run.target.suffix);
                        doc.set_text(counter.element, &text);
                        run.finished = true;
                    }
                }
                ObservationState::Unobserved => {}
            }
        }
    }

    pub fn on_scroll(&mut self, doc: &mut Document, now: Duration) {
        let visible: Vec<ElementId> = self
            .observer
            .check(doc)
            .into_iter()
            .filter(|entry| entry.is_intersecting)
            .map(|entry| entry.target)
            .collect();

        for element in visible {
            self.observer.unobserve(element);
            let Some(counter) = self.counters.iter_mut().find(|c| c.element == element) else {
                continue;
            };
            if counter.state == ObservationState::Triggered {
                continue;
            }
            counter.state = ObservationState::Triggered;

            match parse_counter(doc.text(element)) {
                Some(target) => {
                    debug!("Counting up to {}{}", target.value, target.suffix);
                    counter.run = Some(CounterRun {
                        start: now,
                        target,
                        finished: false,
                    });
                }
                None => warn!("Counter text {:?} has no leading number", doc.text(element)),
            }
        }
        self.frame(doc, now);
    }

    /// Render one animation frame; returns true while any counter is running
    pub fn frame(&mut self, doc: &mut Document, now: Duration) -> bool {
        let mut running = false;
        for counter in &mut self.counters {
            let Some(run) = counter.run.as_mut().filter(|r| !r.finished) else {
                continue;
            };
            let elapsed = now.saturating_sub(run.start);
            let value = counter_value(run.target.value, elapsed, self.duration);
            doc.set_text(counter.element, &format!("{}{}", value, run.target.suffix));

            if is_complete(elapsed, self.duration) {
                run.finished = true;
            } else {
                running = true;
            }
        }
        running
    }

    pub fn is_animating(&self) -> bool {
        self.counters
            .iter()
            .any(|c| c.run.as_ref().is_some_and(|r| !r.finished))
    }

    pub fn state(&self, element: ElementId) -> ObservationState {
        self.counters
            .iter()
            .find(|c| c.element == element)
            .map(|c| c.state)
            .unwrap_or_default()
    }
}
