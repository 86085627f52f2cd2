use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use vitrine_core::snapshot::LoadingState;

use crate::app::App;

/// Columns filled for `percentage` of `width`
pub fn filled_columns(percentage: f64, width: u16) -> u16 {
    let ratio = (percentage / 100.0).clamp(0.0, 1.0);
    (ratio * f64::from(width)).round() as u16
}

/// Thin bar under the header tracking how far the page is scrolled
pub struct ProgressWidget;

impl ProgressWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let palette = &app.palette;
        let filled = filled_columns(app.snapshot.progress, area.width);
        let rest = area.width.saturating_sub(filled);

        // The loading bar sits on the same row until it is removed
        let (track, track_style) = match app.snapshot.loading {
            LoadingState::Visible => ("▀", Style::default().fg(palette.accent_alt)),
            LoadingState::Fading => ("▔", Style::default().fg(palette.grey0)),
            LoadingState::Removed => (" ", Style::default()),
        };

        let line = Line::from(vec![
            Span::styled(
                "━".repeat(filled as usize),
                Style::default().fg(palette.accent),
            ),
            Span::styled(
                track.repeat(rest as usize),
                track_style.bg(palette.bg0),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}
