//! Key handling for the applications TUI

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

/// Application events produced by key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// Quit the application
    Quit,
    /// Close the help popup, or quit when it is not open
    Back,
    /// Activate the load-more control
    LoadMore,
    /// Start over from page 1
    Reload,
    /// Move selection down
    SelectNext,
    /// Move selection up
    SelectPrevious,
    /// Toggle the help popup
    ToggleHelp,
}

/// Translate a key press into an app event
pub fn map_key(key: KeyEvent) -> Option<AppEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Char('q') => Some(AppEvent::Quit),
        KeyCode::Esc => Some(AppEvent::Back),
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('m') => Some(AppEvent::LoadMore),
        KeyCode::Char('r') => Some(AppEvent::Reload),
        KeyCode::Down | KeyCode::Char('j') => Some(AppEvent::SelectNext),
        KeyCode::Up | KeyCode::Char('k') => Some(AppEvent::SelectPrevious),
        KeyCode::F(1) | KeyCode::Char('?') => Some(AppEvent::ToggleHelp),
        _ => None,
    }
}
