use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use vitrine_core::forms::FormPhase;
use vitrine_core::snapshot::{FormView, SectionView};
use vitrine_core::PageSnapshot;

use super::hero::hero_lines;
use super::text::{centered, padded};
use crate::app::App;
use crate::theme::Palette;

const CARD_COLUMNS: usize = 3;

/// The scrollable page body, laid out in rows of `line_px` page pixels
pub struct PageWidget;

impl PageWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let lines = page_lines(&app.snapshot, &app.palette, area.width, app.line_px());
        let paragraph = Paragraph::new(lines)
            .style(Style::default().bg(app.palette.bg0).fg(app.palette.fg1))
            .scroll((app.scroll_row(), 0));
        frame.render_widget(paragraph, area);
    }
}

fn rows(px: f64, line_px: f64) -> usize {
    (px / line_px).round().max(0.0) as usize
}

/// Append `block` at `row`, padded or cut to `height` rows
fn place(lines: &mut Vec<Line<'static>>, row: usize, height: usize, block: Vec<Line<'static>>) {
    lines.resize(row.max(lines.len()), Line::default());
    lines.extend(block.into_iter().take(height));
    lines.resize(row + height, Line::default());
}

/// Every row of the page from the top of the document
pub fn page_lines(
    snapshot: &PageSnapshot,
    palette: &Palette,
    width: u16,
    line_px: f64,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let hero_rows = rows(snapshot.hero_height, line_px);
    place(
        &mut lines,
        rows(snapshot.hero_top, line_px),
        hero_rows,
        hero_lines(snapshot, palette, width, hero_rows),
    );

    for section in &snapshot.sections {
        place(
            &mut lines,
            rows(section.top, line_px),
            rows(section.height, line_px),
            section_lines(section, palette, width as usize),
        );
    }

    let total = rows(snapshot.max_scroll + snapshot.client_height, line_px);
    let footer_row = lines.len();
    let footer = vec![
        Line::default(),
        Line::from(Span::styled(
            centered(&snapshot.title, width as usize),
            Style::default().fg(palette.grey1),
        )),
    ];
    place(&mut lines, footer_row, total.saturating_sub(footer_row), footer);
    lines
}

fn section_lines(section: &SectionView, palette: &Palette, width: usize) -> Vec<Line<'static>> {
    let mut lines = vec![Line::default()];

    // Hidden until the reveal class lands; only a faint heading shows
    if !section.revealed {
        lines.push(Line::from(Span::styled(
            centered(&section.title, width),
            Style::default().fg(palette.grey0),
        )));
        return lines;
    }

    lines.push(Line::from(Span::styled(
        centered(&section.title, width),
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD),
    )));
    if !section.body.is_empty() {
        lines.push(Line::from(Span::styled(
            centered(&section.body, width),
            Style::default().fg(palette.fg1),
        )));
    }
    lines.push(Line::default());

    for row in section.cards.chunks(CARD_COLUMNS) {
        let cell = width / CARD_COLUMNS;
        let titles = row
            .iter()
            .map(|card| {
                let style = if card.revealed {
                    Style::default().fg(palette.fg0).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(palette.bg2)
                };
                Span::styled(padded(&format!("  ▸ {}", card.title), cell), style)
            })
            .collect::<Vec<_>>();
        let bodies = row
            .iter()
            .map(|card| {
                let text = if card.revealed { card.body.as_str() } else { "" };
                Span::styled(padded(&format!("    {text}"), cell), Style::default().fg(palette.grey1))
            })
            .collect::<Vec<_>>();
        lines.push(Line::from(titles));
        lines.push(Line::from(bodies));
        lines.push(Line::default());
    }

    if !section.counters.is_empty() {
        let cell = width / section.counters.len();
        lines.push(Line::from(
            section
                .counters
                .iter()
                .map(|c| {
                    Span::styled(
                        padded(&centered(&c.text, cell), cell),
                        Style::default()
                            .fg(palette.accent_alt)
                            .add_modifier(Modifier::BOLD),
                    )
                })
                .collect::<Vec<_>>(),
        ));
        lines.push(Line::from(
            section
                .counters
                .iter()
                .map(|c| {
                    Span::styled(
                        padded(&centered(&c.label, cell), cell),
                        Style::default().fg(palette.grey1),
                    )
                })
                .collect::<Vec<_>>(),
        ));
    }

    if let Some(form) = &section.form {
        lines.extend(form_lines(form, palette, width));
    }

    lines
}

fn form_lines(form: &FormView, palette: &Palette, width: usize) -> Vec<Line<'static>> {
    let field_width = width.saturating_sub(16).min(48);
    let indent = " ".repeat(width.saturating_sub(field_width + 12) / 2);
    let mut lines = Vec::new();

    for field in &form.fields {
        let (text, style) = if field.value.is_empty() {
            (field.placeholder.as_str(), Style::default().fg(palette.grey0))
        } else {
            (field.value.as_str(), Style::default().fg(palette.fg0))
        };
        lines.push(Line::from(vec![
            Span::raw(indent.clone()),
            Span::styled(padded(&field.name, 10), Style::default().fg(palette.grey1)),
            Span::styled(format!("[{}]", padded(text, field_width)), style.bg(palette.bg1)),
        ]));
    }

    let background = match form.phase {
        FormPhase::Idle => palette.accent,
        FormPhase::Sending => palette.grey1,
        FormPhase::Sent => palette.success,
    };
    lines.push(Line::default());
    lines.push(Line::from(vec![
        Span::raw(indent),
        Span::styled(
            format!("  {}  ", form.button),
            Style::default()
                .fg(palette.bg0)
                .bg(background)
                .add_modifier(Modifier::BOLD),
        ),
    ]));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_core::{AppConfig, Document, MemoryStore, Page, PageEvent, PageLayout};

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn started_page() -> Page {
        let mut config = AppConfig::default();
        config.particles.seed = Some(11);
        let doc = Document::from_layout(&PageLayout::default());
        let mut page = Page::new(doc, config, Box::new(MemoryStore::new()));
        page.start(std::time::Duration::ZERO);
        page
    }

    #[test]
    fn test_rows_match_page_height() {
        let snapshot = started_page().snapshot();
        let lines = page_lines(&snapshot, &Palette::dark(), 80, 20.0);
        let expected = ((snapshot.max_scroll + snapshot.client_height) / 20.0).round() as usize;
        assert_eq!(lines.len(), expected);
    }

    #[test]
    fn test_sections_start_at_their_row() {
        let mut page = started_page();
        page.handle(PageEvent::Scroll(900.0), std::time::Duration::from_millis(100));
        let snapshot = page.snapshot();
        let lines = page_lines(&snapshot, &Palette::dark(), 80, 20.0);

        let about = snapshot.section("about").unwrap();
        assert!(about.revealed);
        let row = (about.top / 20.0).round() as usize;
        assert_eq!(text(&lines[row + 1]).trim(), about.title);
    }

    #[test]
    fn test_hidden_section_shows_only_heading() {
        let snapshot = started_page().snapshot();
        let contact = snapshot.section("contact").unwrap();
        assert!(!contact.revealed);
        assert_eq!(section_lines(contact, &Palette::dark(), 80).len(), 2);
    }
}
