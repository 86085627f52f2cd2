use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use vitrine_core::PageSnapshot;

use super::text::centered;
use crate::theme::Palette;

/// Rows of the hero slider: particles in the background, the active slide
/// centered, arrows on the sides and one dot per slide underneath
pub fn hero_lines(snapshot: &PageSnapshot, palette: &Palette, width: u16, rows: usize) -> Vec<Line<'static>> {
    let width = width as usize;
    if rows == 0 || width == 0 {
        return Vec::new();
    }

    let mut grid = vec![vec![' '; width]; rows];
    for particle in &snapshot.particles {
        let col = ((particle.left / 100.0) * width as f64) as usize;
        let row = ((particle.top / 100.0) * rows as f64) as usize;
        if let Some(cell) = grid.get_mut(row.min(rows - 1)).and_then(|r| r.get_mut(col)) {
            *cell = '·';
        }
    }
    let particle_style = Style::default().fg(palette.particle);
    let mut lines: Vec<Line<'static>> = grid
        .into_iter()
        .map(|row| Line::from(Span::styled(row.into_iter().collect::<String>(), particle_style)))
        .collect();

    let Some(slide) = snapshot.slides.get(snapshot.slide_index) else {
        return lines;
    };

    let title_style = if snapshot.hero_entered {
        Style::default().fg(palette.fg0).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.grey1)
    };
    let title_style = if slide.hovered {
        title_style.add_modifier(Modifier::UNDERLINED)
    } else {
        title_style
    };

    let middle = rows / 2;
    let arrows = format!("‹{}›", " ".repeat(width.saturating_sub(2)));
    let mut set = |row: usize, line: Line<'static>| {
        if let Some(slot) = lines.get_mut(row) {
            *slot = line;
        }
    };

    set(middle.saturating_sub(1), Line::from(Span::styled(centered(&slide.title, width), title_style)));
    set(middle, Line::from(Span::styled(arrows, Style::default().fg(palette.grey1))));
    set(
        middle + 1,
        Line::from(Span::styled(centered(&slide.caption, width), Style::default().fg(palette.fg1))),
    );

    let dots: Vec<&str> = (0..snapshot.slides.len())
        .map(|i| if snapshot.active_dot == Some(i) { "●" } else { "○" })
        .collect();
    set(
        middle + 3,
        Line::from(Span::styled(centered(&dots.join(" "), width), Style::default().fg(palette.accent))),
    );

    lines
}
