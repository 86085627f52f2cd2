use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollDown,
    ScrollUp,
    ScrollHalfPageDown,
    ScrollHalfPageUp,
    JumpToTop,
    JumpToBottom,
    PendingG, // First 'g' press, waiting for second 'g'
    NextSlide,
    PrevSlide,
    GoToSlide(usize),
    ToggleTheme,
    FocusNextAnchor,
    FollowAnchor,
    SubmitContact,
    SubmitNewsletter,
    ClearStatus,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App) -> Action {
    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        // Scrolling
        (KeyCode::Char('j'), KeyModifiers::NONE) => Action::ScrollDown,
        (KeyCode::Char('k'), KeyModifiers::NONE) => Action::ScrollUp,
        (KeyCode::Down, KeyModifiers::NONE) => Action::ScrollDown,
        (KeyCode::Up, KeyModifiers::NONE) => Action::ScrollUp,
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => Action::ScrollHalfPageDown,
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => Action::ScrollHalfPageUp,

        // Jump to top/bottom
        (KeyCode::Char('g'), KeyModifiers::NONE) => {
            if app.pending_key == Some('g') {
                Action::JumpToTop
            } else {
                Action::PendingG
            }
        }
        (KeyCode::Char('G'), KeyModifiers::SHIFT) => Action::JumpToBottom,
        (KeyCode::Char('G'), KeyModifiers::NONE) => Action::JumpToBottom,

        // Slider
        (KeyCode::Char('l'), KeyModifiers::NONE) => Action::NextSlide,
        (KeyCode::Char('h'), KeyModifiers::NONE) => Action::PrevSlide,
        (KeyCode::Right, KeyModifiers::NONE) => Action::NextSlide,
        (KeyCode::Left, KeyModifiers::NONE) => Action::PrevSlide,
        (KeyCode::Char(c @ '1'..='9'), KeyModifiers::NONE) => {
            Action::GoToSlide(c as usize - '1' as usize)
        }

        // Page controls
        (KeyCode::Char('t'), KeyModifiers::NONE) => Action::ToggleTheme,
        (KeyCode::Tab, KeyModifiers::NONE) => Action::FocusNextAnchor,
        (KeyCode::Enter, KeyModifiers::NONE) => Action::FollowAnchor,
        (KeyCode::Char('c'), KeyModifiers::NONE) => Action::SubmitContact,
        (KeyCode::Char('n'), KeyModifiers::NONE) => Action::SubmitNewsletter,

        (KeyCode::Esc, KeyModifiers::NONE) => Action::ClearStatus,

        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use tokio::sync::mpsc;
    use vitrine_core::{AppConfig, Document, MemoryStore, Page, PageLayout};

    use crate::app::PageControls;

    fn app() -> App {
        let config = Arc::new(AppConfig::default());
        let doc = Document::from_layout(&PageLayout::default());
        let page = Page::new(doc, AppConfig::default(), Box::new(MemoryStore::new()));
        let (tx, _rx) = mpsc::unbounded_channel();
        App::new(config, PageControls::default(), tx, page.snapshot())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_slide_keys() {
        let app = app();
        assert_eq!(handle_key_event(key(KeyCode::Char('l')), &app), Action::NextSlide);
        assert_eq!(handle_key_event(key(KeyCode::Char('h')), &app), Action::PrevSlide);
        assert_eq!(handle_key_event(key(KeyCode::Char('1')), &app), Action::GoToSlide(0));
        assert_eq!(handle_key_event(key(KeyCode::Char('4')), &app), Action::GoToSlide(3));
    }

    #[test]
    fn test_double_g_jumps_to_top() {
        let mut app = app();
        assert_eq!(handle_key_event(key(KeyCode::Char('g')), &app), Action::PendingG);
        app.pending_key = Some('g');
        assert_eq!(handle_key_event(key(KeyCode::Char('g')), &app), Action::JumpToTop);
    }

    #[test]
    fn test_control_keys() {
        let app = app();
        let ctrl_d = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(ctrl_d, &app), Action::ScrollHalfPageDown);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(ctrl_c, &app), Action::Quit);
        assert_eq!(handle_key_event(key(KeyCode::Char('c')), &app), Action::SubmitContact);
        assert_eq!(handle_key_event(key(KeyCode::Char('x')), &app), Action::None);
    }
}
