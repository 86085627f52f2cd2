//! Page layout description and document construction
//!
//! A [`PageLayout`] is the markup of the landing page expressed as data. It can
//! be read from TOML; [`PageLayout::default`] is the standard marketing page.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dom::{Document, ElementId};

const HEADER_HEIGHT: f64 = 80.0;
const SECTION_PADDING: f64 = 80.0;
const HEADING_HEIGHT: f64 = 60.0;
const PARAGRAPH_HEIGHT: f64 = 80.0;
const CARD_HEIGHT: f64 = 220.0;
const CARD_COLUMNS: usize = 3;
const COUNTER_HEIGHT: f64 = 120.0;
const FIELD_HEIGHT: f64 = 56.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageLayout {
    /// Viewport height in pixels
    #[serde(default = "default_viewport_height")]
    pub viewport_height: f64,
    pub title: String,
    #[serde(default)]
    pub nav: Vec<NavLink>,
    #[serde(default)]
    pub slides: Vec<SlideLayout>,
    #[serde(default)]
    pub sections: Vec<SectionLayout>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavLink {
    pub label: String,
    /// Id of the element the link scrolls to (without `#`)
    pub target: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideLayout {
    pub title: String,
    #[serde(default)]
    pub caption: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionLayout {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub content: SectionContent,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SectionContent {
    #[default]
    Text,
    Services { cards: Vec<CardLayout> },
    Stats { counters: Vec<CounterLayout> },
    Contact { fields: Vec<String>, button: String },
    Newsletter { placeholder: String, button: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardLayout {
    pub title: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounterLayout {
    /// Initial text, e.g. "150+"; the leading integer is the target
    pub value: String,
    #[serde(default)]
    pub label: String,
}

fn default_viewport_height() -> f64 {
    800.0
}

impl Default for PageLayout {
    fn default() -> Self {
        let nav = [
            ("Home", "home"),
            ("About", "about"),
            ("Services", "services"),
            ("Results", "results"),
            ("Contact", "contact"),
        ]
        .into_iter()
        .map(|(label, target)| NavLink {
            label: label.to_string(),
            target: target.to_string(),
        })
        .collect();

        let slides = [
            ("Design that converts", "Launch pages built around your story"),
            ("Engineering you can trust", "Fast, resilient and measurable"),
            ("Growth on autopilot", "Campaigns that learn while you sleep"),
            ("Partners, not vendors", "One team from kickoff to scale"),
        ]
        .into_iter()
        .map(|(title, caption)| SlideLayout {
            title: title.to_string(),
            caption: caption.to_string(),
        })
        .collect();

        let cards = [
            ("Brand Strategy", "Positioning and voice"),
            ("Web Design", "Interfaces people remember"),
            ("Development", "Sites that stay fast"),
            ("SEO", "Be found first"),
            ("Analytics", "Decisions from data"),
            ("Support", "Always on call"),
        ]
        .into_iter()
        .map(|(title, body)| CardLayout {
            title: title.to_string(),
            body: body.to_string(),
        })
        .collect();

        let counters = [
            ("150+", "Projects shipped"),
            ("98%", "Client retention"),
            ("24/7", "Support"),
        ]
        .into_iter()
        .map(|(value, label)| CounterLayout {
            value: value.to_string(),
            label: label.to_string(),
        })
        .collect();

        Self {
            viewport_height: default_viewport_height(),
            title: "Vitrine Studio".to_string(),
            nav,
            slides,
            sections: vec![
                SectionLayout {
                    id: "about".to_string(),
                    title: "About us".to_string(),
                    body: "A small studio crafting landing pages with care.".to_string(),
                    content: SectionContent::Text,
                },
                SectionLayout {
                    id: "services".to_string(),
                    title: "Services".to_string(),
                    body: "Everything a launch needs.".to_string(),
                    content: SectionContent::Services { cards },
                },
                SectionLayout {
                    id: "results".to_string(),
                    title: "Results".to_string(),
                    body: "Numbers we are proud of.".to_string(),
                    content: SectionContent::Stats { counters },
                },
                SectionLayout {
                    id: "contact".to_string(),
                    title: "Contact".to_string(),
                    body: "Tell us about your project.".to_string(),
                    content: SectionContent::Contact {
                        fields: vec!["name".to_string(), "email".to_string(), "message".to_string()],
                        button: "Send Message".to_string(),
                    },
                },
                SectionLayout {
                    id: "newsletter".to_string(),
                    title: "Newsletter".to_string(),
                    body: "One email a month, no noise.".to_string(),
                    content: SectionContent::Newsletter {
                        placeholder: "you@example.com".to_string(),
                        button: "Subscribe".to_string(),
                    },
                },
            ],
        }
    }
}

impl PageLayout {
    /// Read a layout from a TOML file
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| crate::Error::Layout(e.to_string()))
    }
}

impl Document {
    /// Build the element tree for a layout and assign vertical boxes
    pub fn from_layout(layout: &PageLayout) -> Self {
        let mut doc = Document::new(layout.viewport_height);
        let body = doc.body();

        let loading = child(&mut doc, body, "div", &["loading-bar"]);
        doc.set_style(loading, "opacity", "1");

        let progress = child(&mut doc, body, "div", &["scroll-progress"]);
        doc.set_id(progress, "scrollProgress");
        doc.set_style(progress, "width", "0%");

        let particles = child(&mut doc, body, "div", &["particles"]);
        doc.set_id(particles, "particles");

        let mut cursor = 0.0;
        build_header(&mut doc, body, layout);
        cursor += HEADER_HEIGHT;
        cursor = build_hero(&mut doc, body, layout, cursor);

        for section in &layout.sections {
            cursor = build_section(&mut doc, body, section, cursor);
        }

        let footer = child(&mut doc, body, "footer", &["footer"]);
        doc.set_text(footer, &layout.title);
        doc.set_box(footer, cursor, HEADER_HEIGHT);

        doc
    }
}

fn child(doc: &mut Document, parent: ElementId, tag: &str, classes: &[&str]) -> ElementId {
    let id = doc.create_element(tag);
    for class in classes {
        doc.add_class(id, class);
    }
    doc.append_child(parent, id);
    id
}

fn build_header(doc: &mut Document, body: ElementId, layout: &PageLayout) {
    let header = child(doc, body, "header", &["header"]);
    doc.set_box(header, 0.0, HEADER_HEIGHT);

    let logo = child(doc, header, "div", &["logo"]);
    doc.set_text(logo, &layout.title);
    doc.set_box(logo, 0.0, HEADER_HEIGHT);

    let nav = child(doc, header, "nav", &["nav"]);
    doc.set_box(nav, 0.0, HEADER_HEIGHT);
    for link in &layout.nav {
        let anchor = child(doc, nav, "a", &["nav-link"]);
        doc.set_attr(anchor, "href", &format!("#{}", link.target));
        doc.set_text(anchor, &link.label);
        doc.set_box(anchor, 0.0, HEADER_HEIGHT);
    }

    let toggle = child(doc, header, "button", &["theme-toggle"]);
    doc.set_id(toggle, "themeToggle");
    doc.set_attr(toggle, "data-action", "theme:toggle");
    doc.set_box(toggle, 0.0, HEADER_HEIGHT);
}

fn build_hero(doc: &mut Document, body: ElementId, layout: &PageLayout, top: f64) -> f64 {
    let height = layout.viewport_height.max(HEADER_HEIGHT);
    let hero = child(doc, body, "section", &["hero"]);
    doc.set_id(hero, "home");
    doc.set_box(hero, top, height);

    let track = child(doc, hero, "div", &["slides"]);
    doc.set_id(track, "slides");
    doc.set_box(track, top, height);
    for slide in &layout.slides {
        let id = child(doc, track, "div", &["slide"]);
        doc.set_text(id, &slide.title);
        doc.set_attr(id, "data-caption", &slide.caption);
        doc.set_box(id, top, height);
    }

    let prev = child(doc, hero, "button", &["slider-prev"]);
    doc.set_attr(prev, "data-action", "slider:prev");
    let next = child(doc, hero, "button", &["slider-next"]);
    doc.set_attr(next, "data-action", "slider:next");

    let dots = child(doc, hero, "div", &["nav-dots"]);
    for index in 0..layout.slides.len() {
        let dot = child(doc, dots, "span", &["nav-dot"]);
        doc.set_attr(dot, "data-action", &format!("slider:goto:{index}"));
    }

    top + height
}

fn build_section(doc: &mut Document, body: ElementId, spec: &SectionLayout, top: f64) -> f64 {
    let section = child(doc, body, "section", &["section"]);
    doc.set_id(section, &spec.id);

    let mut cursor = top + SECTION_PADDING;
    let heading = child(doc, section, "h2", &["section-title"]);
    doc.set_text(heading, &spec.title);
    doc.set_box(heading, cursor, HEADING_HEIGHT);
    cursor += HEADING_HEIGHT;

    if !spec.body.is_empty() {
        let paragraph = child(doc, section, "p", &["section-body"]);
        doc.set_text(paragraph, &spec.body);
        doc.set_box(paragraph, cursor, PARAGRAPH_HEIGHT);
        cursor += PARAGRAPH_HEIGHT;
    }

    match &spec.content {
        SectionContent::Text => {}
        SectionContent::Services { cards } => {
            let grid = child(doc, section, "div", &["services-grid"]);
            let rows = cards.len().div_ceil(CARD_COLUMNS);
            let grid_height = rows as f64 * CARD_HEIGHT;
            doc.set_box(grid, cursor, grid_height);
            for (index, card) in cards.iter().enumerate() {
                let id = child(doc, grid, "div", &["service-card"]);
                doc.set_text(id, &card.title);
                doc.set_attr(id, "data-body", &card.body);
                let row = (index / CARD_COLUMNS) as f64;
                doc.set_box(id, cursor + row * CARD_HEIGHT, CARD_HEIGHT);
            }
            cursor += grid_height;
        }
        SectionContent::Stats { counters } => {
            let stats = child(doc, section, "div", &["stats"]);
            doc.set_box(stats, cursor, COUNTER_HEIGHT);
            for counter in counters {
                let stat = child(doc, stats, "div", &["stat"]);
                doc.set_box(stat, cursor, COUNTER_HEIGHT);
                let number = child(doc, stat, "div", &["stat-number"]);
                doc.set_text(number, &counter.value);
                doc.set_box(number, cursor, COUNTER_HEIGHT / 2.0);
                let label = child(doc, stat, "div", &["stat-label"]);
                doc.set_text(label, &counter.label);
                doc.set_box(label, cursor + COUNTER_HEIGHT / 2.0, COUNTER_HEIGHT / 2.0);
            }
            cursor += COUNTER_HEIGHT;
        }
        SectionContent::Contact { fields, button } => {
            let form = child(doc, section, "form", &["contact-form"]);
            let form_top = cursor;
            for field in fields {
                let tag = if field == "message" { "textarea" } else { "input" };
                let input = child(doc, form, tag, &["form-input"]);
                doc.set_attr(input, "name", field);
                doc.set_box(input, cursor, FIELD_HEIGHT);
                cursor += FIELD_HEIGHT;
            }
            let submit = child(doc, form, "button", &["submit-btn"]);
            doc.set_attr(submit, "type", "submit");
            doc.set_text(submit, button);
            doc.set_box(submit, cursor, FIELD_HEIGHT);
            cursor += FIELD_HEIGHT;
            doc.set_box(form, form_top, cursor - form_top);
        }
        SectionContent::Newsletter { placeholder, button } => {
            let form = child(doc, section, "form", &["newsletter-form"]);
            doc.set_box(form, cursor, FIELD_HEIGHT);
            let input = child(doc, form, "input", &["newsletter-input"]);
            doc.set_attr(input, "type", "email");
            doc.set_attr(input, "name", "email");
            doc.set_attr(input, "placeholder", placeholder);
            doc.set_box(input, cursor, FIELD_HEIGHT);
            let submit = child(doc, form, "button", &["newsletter-btn"]);
            doc.set_attr(submit, "type", "submit");
            doc.set_text(submit, button);
            doc.set_box(submit, cursor, FIELD_HEIGHT);
            cursor += FIELD_HEIGHT;
        }
    }

    let bottom = cursor + SECTION_PADDING;
    doc.set_box(section, top, bottom - top);
    bottom
}
