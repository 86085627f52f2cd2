use std::io;
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tokio::sync::{mpsc, watch};
use tracing::info;

use vitrine_core::{AppConfig, Document, FileStore, Page, PageDriver, PageSnapshot};
use vitrine_tui::{
    app::{App, PageControls},
    event::{AppEvent, EventHandler},
    input::{handle_key_event, Action},
    widgets::{HeaderWidget, PageWidget, ProgressWidget, StatusBarWidget},
};

use super::load_layout;

pub async fn run(config: Arc<AppConfig>) -> Result<()> {
    let layout = load_layout(&config)?;
    let doc = Document::from_layout(&layout);
    let controls = PageControls::from_document(&doc);

    let store = FileStore::new(config.preferences_path());
    let page = Page::new(doc, (*config).clone(), Box::new(store));

    // The page runs on its own task; the terminal only sends events and
    // renders snapshots
    let (driver, mut snapshots) = PageDriver::new(page);
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let driver_handle = tokio::spawn(driver.run(event_rx, shutdown_rx));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle(&layout.title))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let snapshot = snapshots.borrow_and_update().clone();
    let mut app = App::new(config.clone(), controls, event_tx, snapshot);
    let event_handler =
        EventHandler::with_animation_fps(config.ui.tick_rate_ms, config.scroll.animation_fps);

    let result = run_loop(&mut terminal, &mut app, &event_handler, &mut snapshots);

    // Stop the page before tearing down the terminal
    let _ = shutdown_tx.send(true);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let page = driver_handle.await?;
    info!("Preview closed at {}ms", page.now().as_millis());

    result
}

fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event_handler: &EventHandler,
    snapshots: &mut watch::Receiver<PageSnapshot>,
) -> Result<()> {
    loop {
        if snapshots.has_changed().unwrap_or(false) {
            app.set_snapshot(snapshots.borrow_and_update().clone());
        }

        terminal.draw(|frame| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(2), // Header
                    Constraint::Length(1), // Scroll progress
                    Constraint::Min(1),    // Page
                    Constraint::Length(1), // Status bar
                ])
                .split(frame.area());

            app.resize(chunks[2].height);

            HeaderWidget::render(frame, chunks[0], app);
            ProgressWidget::render(frame, chunks[1], app);
            PageWidget::render(frame, chunks[2], app);
            StatusBarWidget::render(frame, chunks[3], app);
        })?;

        // Poll faster while counters or a smooth scroll are running
        let event = if app.snapshot.animating {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };

        if let Some(AppEvent::Key(key)) = event {
            let action = handle_key_event(key, app);
            handle_action(app, action);
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_action(app: &mut App, action: Action) {
    if action != Action::PendingG {
        app.pending_key = None;
    }

    match action {
        Action::Quit => app.quit(),
        Action::ScrollDown => app.scroll_lines(1),
        Action::ScrollUp => app.scroll_lines(-1),
        Action::ScrollHalfPageDown => app.scroll_half_page(true),
        Action::ScrollHalfPageUp => app.scroll_half_page(false),
        Action::JumpToTop => app.scroll_to_top(),
        Action::JumpToBottom => app.scroll_to_bottom(),
        Action::PendingG => app.pending_key = Some('g'),
        Action::NextSlide => app.next_slide(),
        Action::PrevSlide => app.previous_slide(),
        Action::GoToSlide(index) => app.go_to_slide(index),
        Action::ToggleTheme => app.toggle_theme(),
        Action::FocusNextAnchor => app.focus_next_anchor(),
        Action::FollowAnchor => app.follow_anchor(),
        Action::SubmitContact => app.submit_contact(),
        Action::SubmitNewsletter => app.submit_newsletter(),
        Action::ClearStatus => app.clear_status(),
        Action::None => {}
    }
}
