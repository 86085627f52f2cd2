use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let palette = &app.palette;
        let snapshot = &app.snapshot;

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else {
            format!(
                " {} | Slide {}/{} | {:.0}% | {:.1}s",
                snapshot.theme.as_str().to_uppercase(),
                snapshot.slide_index + 1,
                snapshot.slides.len(),
                snapshot.progress,
                snapshot.now_ms as f64 / 1000.0
            )
        };

        let help_hint = " q:quit j/k:scroll h/l:slides t:theme Tab/Enter:links c/n:forms ";
        let padding_len = (area.width as usize)
            .saturating_sub(status_text.width() + help_hint.width());

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(palette.fg0).bg(palette.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(palette.bg2)),
            Span::styled(help_hint, Style::default().fg(palette.grey1).bg(palette.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use ratatui::{backend::TestBackend, Terminal};
    use tokio::sync::mpsc;
    use vitrine_core::{AppConfig, Document, MemoryStore, Page, PageLayout};

    use crate::app::PageControls;

    fn rendered(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 1)).unwrap();
        terminal
            .draw(|frame| StatusBarWidget::render(frame, frame.area(), app))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_shows_page_state_or_message() {
        let doc = Document::from_layout(&PageLayout::default());
        let mut page = Page::new(doc, AppConfig::default(), Box::new(MemoryStore::new()));
        page.start(std::time::Duration::ZERO);
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = App::new(
            Arc::new(AppConfig::default()),
            PageControls::default(),
            tx,
            page.snapshot(),
        );

        let line = rendered(&app);
        assert!(line.contains("DARK | Slide 1/4 | 0%"));
        assert!(line.contains("q:quit"));

        app.set_status("Scrolling to About");
        assert!(rendered(&app).contains("Scrolling to About"));
    }
}
