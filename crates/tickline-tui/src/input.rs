use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Manual scroll by columns; positive reveals content further right
    ScrollBy(i64),
    ScrollHome,
    ScrollEnd,
    TogglePause,
    NextLine,
    PrevLine,
    /// Re-read the config file and restart the ticker with it
    ReloadConfig,
    None,
}

/// Columns moved per h/l press
const SCROLL_STEP: i64 = 2;
/// Columns moved per H/L press
const SCROLL_PAGE: i64 = 10;

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Esc, KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        // Manual scrolling
        (KeyCode::Char('h'), KeyModifiers::NONE) => Action::ScrollBy(-SCROLL_STEP),
        (KeyCode::Char('l'), KeyModifiers::NONE) => Action::ScrollBy(SCROLL_STEP),
        (KeyCode::Left, KeyModifiers::NONE) => Action::ScrollBy(-SCROLL_STEP),
        (KeyCode::Right, KeyModifiers::NONE) => Action::ScrollBy(SCROLL_STEP),
        (KeyCode::Char('H'), KeyModifiers::SHIFT) => Action::ScrollBy(-SCROLL_PAGE),
        (KeyCode::Char('L'), KeyModifiers::SHIFT) => Action::ScrollBy(SCROLL_PAGE),
        (KeyCode::Char('0'), KeyModifiers::NONE) => Action::ScrollHome,
        (KeyCode::Home, KeyModifiers::NONE) => Action::ScrollHome,
        (KeyCode::Char('$'), _) => Action::ScrollEnd,
        (KeyCode::End, KeyModifiers::NONE) => Action::ScrollEnd,

        // Ticker control
        (KeyCode::Char(' '), KeyModifiers::NONE) => Action::TogglePause,
        (KeyCode::Char('n'), KeyModifiers::NONE) => Action::NextLine,
        (KeyCode::Char('j'), KeyModifiers::NONE) => Action::NextLine,
        (KeyCode::Char('p'), KeyModifiers::NONE) => Action::PrevLine,
        (KeyCode::Char('k'), KeyModifiers::NONE) => Action::PrevLine,
        (KeyCode::Char('r'), KeyModifiers::NONE) => Action::ReloadConfig,

        _ => Action::None,
    }
}
