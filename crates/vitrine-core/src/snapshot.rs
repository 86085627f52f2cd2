//! Serializable view of a page, read back from the document
//!
//! Front ends never reach into controllers. They render a [`PageSnapshot`],
//! which is captured from the element tree after every reaction.

use serde::Serialize;

use crate::dom::{Document, ElementId};
use crate::forms::FormPhase;
use crate::header::HeaderState;
use crate::page::Page;
use crate::particles::Particle;
use crate::reveal::REVEAL_CLASS;
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadingState {
    #[default]
    Visible,
    Fading,
    Removed,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NavView {
    pub label: String,
    pub target: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SlideView {
    pub title: String,
    pub caption: String,
    pub hovered: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CardView {
    pub title: String,
    pub body: String,
    pub revealed: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CounterView {
    pub text: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormView {
    pub fields: Vec<FieldView>,
    pub button: String,
    pub disabled: bool,
    pub phase: FormPhase,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FieldView {
    pub name: String,
    pub value: String,
    pub placeholder: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SectionView {
    pub id: String,
    pub title: String,
    pub body: String,
    pub top: f64,
    pub height: f64,
    pub revealed: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cards: Vec<CardView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub counters: Vec<CounterView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<FormView>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PageSnapshot {
    pub now_ms: u64,
    /// Counters or a smooth scroll need animation frames
    pub animating: bool,
    pub title: String,
    pub theme: Theme,
    pub scroll_top: f64,
    pub max_scroll: f64,
    pub client_height: f64,
    pub progress: f64,
    pub header: HeaderState,
    pub loading: LoadingState,
    pub hero_entered: bool,
    pub hero_top: f64,
    pub hero_height: f64,
    pub nav: Vec<NavView>,
    pub slides: Vec<SlideView>,
    pub slide_index: usize,
    pub active_dot: Option<usize>,
    pub sections: Vec<SectionView>,
    #[serde(skip)]
    pub particles: Vec<Particle>,
}

impl PageSnapshot {
    pub(crate) fn capture(page: &Page) -> Self {
        let doc = page.document();

        let theme = doc
            .theme_attribute()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default();

        let loading = match doc.first_by_class("loading-bar") {
            None => LoadingState::Removed,
            Some(bar) if doc.style(bar, "opacity") == Some("0") => LoadingState::Fading,
            Some(_) => LoadingState::Visible,
        };

        let hero = doc.first_by_class("hero");
        let (hero_top, hero_height) = hero
            .and_then(|id| doc.get(id))
            .map(|e| (e.top, e.height))
            .unwrap_or_default();

        let active_dot = doc
            .elements_by_class("nav-dot")
            .into_iter()
            .position(|dot| doc.has_class(dot, "active"));

        Self {
            now_ms: page.now().as_millis() as u64,
            animating: page.is_animating(),
            title: doc
                .first_by_class("logo")
                .map(|logo| doc.text(logo).to_string())
                .unwrap_or_default(),
            theme,
            scroll_top: doc.scroll_top(),
            max_scroll: doc.max_scroll(),
            client_height: doc.client_height(),
            progress: page.progress_percentage(),
            header: page.header_state(),
            loading,
            hero_entered: hero.is_some_and(|h| doc.has_class(h, REVEAL_CLASS)),
            hero_top,
            hero_height,
            nav: doc
                .elements_by_class("nav-link")
                .into_iter()
                .map(|a| NavView {
                    label: doc.text(a).to_string(),
                    target: doc.attr(a, "href").unwrap_or_default().to_string(),
                })
                .collect(),
            slides: doc
                .elements_by_class("slide")
                .into_iter()
                .map(|s| SlideView {
                    title: doc.text(s).to_string(),
                    caption: doc.attr(s, "data-caption").unwrap_or_default().to_string(),
                    hovered: doc.style(s, "transform") == Some("scale(1.02)"),
                })
                .collect(),
            slide_index: page.slider().index(),
            active_dot,
            sections: doc
                .elements_by_class("section")
                .into_iter()
                .map(|s| section_view(doc, s))
                .collect(),
            particles: page.particles().particles().copied().collect(),
        }
    }

    pub fn section(&self, id: &str) -> Option<&SectionView> {
        self.sections.iter().find(|s| s.id == id)
    }
}

fn first_text(doc: &Document, root: ElementId, class: &str) -> String {
    doc.descendants_by_class(root, class)
        .first()
        .map(|id| doc.text(*id).to_string())
        .unwrap_or_default()
}

fn section_view(doc: &Document, section: ElementId) -> SectionView {
    let (top, height) = doc
        .get(section)
        .map(|e| (e.top, e.height))
        .unwrap_or_default();

    let cards = doc
        .descendants_by_class(section, "service-card")
        .into_iter()
        .map(|card| CardView {
            title: doc.text(card).to_string(),
            body: doc.attr(card, "data-body").unwrap_or_default().to_string(),
            revealed: doc.has_class(card, REVEAL_CLASS),
        })
        .collect();

    let counters = doc
        .descendants_by_class(section, "stat")
        .into_iter()
        .map(|stat| CounterView {
            text: first_text(doc, stat, "stat-number"),
            label: first_text(doc, stat, "stat-label"),
        })
        .collect();

    SectionView {
        id: doc
            .get(section)
            .and_then(|e| e.id.clone())
            .unwrap_or_default(),
        title: first_text(doc, section, "section-title"),
        body: first_text(doc, section, "section-body"),
        top,
        height,
        revealed: doc.has_class(section, REVEAL_CLASS),
        cards,
        counters,
        form: form_view(doc, section),
    }
}

fn form_view(doc: &Document, section: ElementId) -> Option<FormView> {
    let form = doc.descendants_by_tag(section, "form").into_iter().next()?;
    let button = doc.descendants_by_tag(form, "button").into_iter().next()?;

    let mut inputs = doc.descendants_by_tag(form, "input");
    inputs.extend(doc.descendants_by_tag(form, "textarea"));
    inputs.sort();

    let phase = match doc.text(button) {
        _ if !doc.is_disabled(button) => FormPhase::Idle,
        text if text.ends_with("...") => FormPhase::Sending,
        _ => FormPhase::Sent,
    };

    Some(FormView {
        fields: inputs
            .into_iter()
            .map(|input| FieldView {
                name: doc.attr(input, "name").unwrap_or_default().to_string(),
                value: doc.value(input).to_string(),
                placeholder: doc.attr(input, "placeholder").unwrap_or_default().to_string(),
            })
            .collect(),
        button: doc.text(button).to_string(),
        disabled: doc.is_disabled(button),
        phase,
    })
}
