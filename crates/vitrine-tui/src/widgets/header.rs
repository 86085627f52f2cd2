use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use vitrine_core::header::HeaderState;
use vitrine_core::Theme;

use crate::app::App;

pub struct HeaderWidget;

impl HeaderWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let palette = &app.palette;
        let snapshot = &app.snapshot;

        // Raised header gets a heavy underline standing in for the shadow
        let (border_style, title_style) = match snapshot.header {
            HeaderState::Raised => (
                Style::default().fg(palette.accent),
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            HeaderState::Flat => (
                Style::default().fg(palette.bg2),
                Style::default().fg(palette.fg0).add_modifier(Modifier::BOLD),
            ),
        };

        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(border_style)
            .style(Style::default().bg(palette.bg1));

        let mut spans = vec![Span::styled(format!(" {} ", snapshot.title), title_style)];
        for (i, anchor) in app.controls.anchors.iter().enumerate() {
            let style = if app.focused_anchor == Some(i) {
                Style::default()
                    .fg(palette.bg0)
                    .bg(palette.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.fg1)
            };
            spans.push(Span::raw("  "));
            spans.push(Span::styled(format!(" {} ", anchor.label), style));
        }

        let toggle = match snapshot.theme {
            Theme::Dark => " ☾ dark ",
            Theme::Light => " ☀ light ",
        };
        let used: usize = spans.iter().map(|s| s.content.width()).sum();
        let padding = (area.width as usize).saturating_sub(used + toggle.width());
        spans.push(Span::raw(" ".repeat(padding)));
        spans.push(Span::styled(toggle, Style::default().fg(palette.accent_alt)));

        let paragraph = Paragraph::new(Line::from(spans)).block(block);
        frame.render_widget(paragraph, area);
    }
}
