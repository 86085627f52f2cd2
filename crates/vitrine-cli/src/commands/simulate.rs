use std::time::Duration;

use anyhow::Result;

use vitrine_core::header::HeaderState;
use vitrine_core::motion::scroll::ScrollConfigExt;
use vitrine_core::snapshot::LoadingState;
use vitrine_core::theme::ThemeController;
use vitrine_core::{
    AppConfig, Document, FileStore, MemoryStore, Page, PageEvent, PageSnapshot, PreferenceStore,
};

use super::load_layout;

pub fn run(config: &AppConfig, until_ms: u64, scroll_to: Option<f64>, json: bool) -> Result<()> {
    let layout = load_layout(config)?;

    // Start from the persisted theme without writing back to it
    let key = config.theme.storage_key.as_str();
    let stored = ThemeController::new(Box::new(FileStore::new(config.preferences_path())), key).get();
    let mut store = MemoryStore::new();
    store.set(key, stored.as_str())?;

    let page = Page::new(Document::from_layout(&layout), config.clone(), Box::new(store));
    let timeline = simulate(page, Duration::from_millis(until_ms), scroll_to, config);

    if json {
        println!("{}", serde_json::to_string_pretty(&timeline.last)?);
    } else {
        for (at, fact) in &timeline.entries {
            println!("{:>7}ms  {}", at.as_millis(), fact);
        }
    }
    Ok(())
}

struct Timeline {
    entries: Vec<(Duration, String)>,
    last: PageSnapshot,
}

/// Drive `page` through every wake-up until `until`, recording facts as they appear
fn simulate(mut page: Page, until: Duration, scroll_to: Option<f64>, config: &AppConfig) -> Timeline {
    let frame = config.scroll.animation_tick_duration();
    page.start(Duration::ZERO);
    if let Some(offset) = scroll_to {
        page.handle(PageEvent::Scroll(offset), Duration::ZERO);
    }

    let mut facts = describe(&page.snapshot());
    let mut entries: Vec<(Duration, String)> = facts
        .iter()
        .map(|fact| (Duration::ZERO, fact.clone()))
        .collect();

    while let Some(next) = page.next_wake(frame).filter(|at| *at <= until) {
        page.advance_to(next);
        let current = describe(&page.snapshot());
        for fact in current.iter().filter(|f| !facts.contains(f)) {
            entries.push((next, fact.clone()));
        }
        facts = current;
    }
    page.advance_to(until);

    let last = page.snapshot();
    page.stop();
    Timeline { entries, last }
}

/// Human-readable facts about a snapshot; a change shows up as a new fact
fn describe(snapshot: &PageSnapshot) -> Vec<String> {
    let mut facts = vec![format!("theme {}", snapshot.theme)];

    facts.push(match snapshot.header {
        HeaderState::Flat => "header flat".to_string(),
        HeaderState::Raised => "header raised".to_string(),
    });
    facts.push(match snapshot.loading {
        LoadingState::Visible => "loading bar visible".to_string(),
        LoadingState::Fading => "loading bar fading".to_string(),
        LoadingState::Removed => "loading bar removed".to_string(),
    });
    if snapshot.hero_entered {
        facts.push("hero entered".to_string());
    }
    if let Some(slide) = snapshot.slides.get(snapshot.slide_index) {
        facts.push(format!(
            "slide {}/{}: {}",
            snapshot.slide_index + 1,
            snapshot.slides.len(),
            slide.title
        ));
    }

    for section in &snapshot.sections {
        if section.revealed {
            facts.push(format!("section #{} revealed", section.id));
        }
        for card in section.cards.iter().filter(|c| c.revealed) {
            facts.push(format!("card {} revealed", card.title));
        }
        if let Some(form) = &section.form {
            facts.push(format!("#{} button \"{}\"", section.id, form.button));
        }
    }

    // Intermediate frames are noise; report settled values only
    if !snapshot.animating {
        facts.push(format!("scroll {:.0}px ({:.0}%)", snapshot.scroll_top, snapshot.progress));
        for section in &snapshot.sections {
            for counter in &section.counters {
                facts.push(format!("counter {} = {}", counter.label, counter.text));
            }
        }
    }
    facts
}
