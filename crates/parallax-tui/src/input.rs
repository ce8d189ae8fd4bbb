use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use crate::app::App;

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollDown,
    ScrollUp,
    ScrollHalfPageDown,
    ScrollHalfPageUp,
    ScrollPageDown,
    ScrollPageUp,
    JumpToTop,
    JumpToBottom,
    PendingG, // First 'g' press, waiting for second 'g'
    NextSection,
    PrevSection,
    ToggleReducedMotion,
    /// Pointer moved to a column and row of the terminal
    PointerMoved(u16, u16),
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App) -> Action {
    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Esc, KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        // Line scrolling
        (KeyCode::Char('j'), KeyModifiers::NONE) => Action::ScrollDown,
        (KeyCode::Char('k'), KeyModifiers::NONE) => Action::ScrollUp,
        (KeyCode::Down, KeyModifiers::NONE) => Action::ScrollDown,
        (KeyCode::Up, KeyModifiers::NONE) => Action::ScrollUp,

        // Page scrolling
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => Action::ScrollHalfPageDown,
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => Action::ScrollHalfPageUp,
        (KeyCode::Char('f'), KeyModifiers::CONTROL) => Action::ScrollPageDown,
        (KeyCode::Char('b'), KeyModifiers::CONTROL) => Action::ScrollPageUp,
        (KeyCode::PageDown, _) => Action::ScrollPageDown,
        (KeyCode::PageUp, _) => Action::ScrollPageUp,
        (KeyCode::Char(' '), KeyModifiers::NONE) => Action::ScrollPageDown,

        // Jump to top/bottom
        (KeyCode::Char('g'), KeyModifiers::NONE) => {
            // gg requires double press
            if app.pending_key == Some('g') {
                Action::JumpToTop
            } else {
                Action::PendingG
            }
        }
        (KeyCode::Char('G'), KeyModifiers::SHIFT) => Action::JumpToBottom,
        (KeyCode::Char('G'), KeyModifiers::NONE) => Action::JumpToBottom,
        (KeyCode::Home, _) => Action::JumpToTop,
        (KeyCode::End, _) => Action::JumpToBottom,

        // Sections
        (KeyCode::Char('n'), KeyModifiers::NONE) => Action::NextSection,
        (KeyCode::Char('p'), KeyModifiers::NONE) => Action::PrevSection,
        (KeyCode::Tab, KeyModifiers::NONE) => Action::NextSection,
        (KeyCode::BackTab, _) => Action::PrevSection,

        (KeyCode::Char('m'), KeyModifiers::NONE) => Action::ToggleReducedMotion,

        _ => Action::None,
    }
}

/// Handle a mouse event and return the corresponding action
pub fn handle_mouse_event(mouse: MouseEvent) -> Action {
    match mouse.kind {
        MouseEventKind::ScrollDown => Action::ScrollDown,
        MouseEventKind::ScrollUp => Action::ScrollUp,
        MouseEventKind::Moved | MouseEventKind::Drag(_) | MouseEventKind::Down(_) => {
            Action::PointerMoved(mouse.column, mouse.row)
        }
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState, MouseButton};
    use parallax_core::AppConfig;

    use crate::story::Story;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_basic_bindings() {
        let app = App::new(AppConfig::default(), Story::builtin()).unwrap();
        let cases = [
            (key(KeyCode::Char('q'), KeyModifiers::NONE), Action::Quit),
            (key(KeyCode::Char('c'), KeyModifiers::CONTROL), Action::Quit),
            (key(KeyCode::Char('j'), KeyModifiers::NONE), Action::ScrollDown),
            (key(KeyCode::Up, KeyModifiers::NONE), Action::ScrollUp),
            (key(KeyCode::Char('d'), KeyModifiers::CONTROL), Action::ScrollHalfPageDown),
            (key(KeyCode::PageUp, KeyModifiers::NONE), Action::ScrollPageUp),
            (key(KeyCode::Char('G'), KeyModifiers::SHIFT), Action::JumpToBottom),
            (key(KeyCode::Char('n'), KeyModifiers::NONE), Action::NextSection),
            (key(KeyCode::Char('x'), KeyModifiers::NONE), Action::None),
        ];
        for (event, expected) in cases {
            assert_eq!(handle_key_event(event, &app), expected, "{:?}", event);
        }
    }

    #[test]
    fn test_gg_needs_two_presses() {
        let mut app = App::new(AppConfig::default(), Story::builtin()).unwrap();
        let g = key(KeyCode::Char('g'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(g, &app), Action::PendingG);
        app.pending_key = Some('g');
        assert_eq!(handle_key_event(g, &app), Action::JumpToTop);
    }

    #[test]
    fn test_mouse_events() {
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::ScrollDown, 0, 0)),
            Action::ScrollDown
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Moved, 12, 7)),
            Action::PointerMoved(12, 7)
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), 1, 1)),
            Action::None
        );
    }
}
