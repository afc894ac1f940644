//! Event handling - convert crossterm events to inspector events.

use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton,
    MouseEvent, MouseEventKind,
};
use inspector_lib::keys::{Key, KeyCombo, Modifiers};

/// Input events the app reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Key press
    Key(KeyCombo),
    /// Mouse moved over a screen row
    Hover { row: u16 },
    /// Left click on a screen row
    Click { row: u16, column: u16, modifiers: Modifiers },
    /// Right click on a screen row
    ContextClick { row: u16 },
    /// Mouse wheel, negative is up
    Scroll(i16),
    /// Terminal resize
    Resize,
}

/// Convert crossterm KeyModifiers to inspector Modifiers
fn convert_modifiers(mods: KeyModifiers) -> Modifiers {
    Modifiers {
        ctrl: mods.contains(KeyModifiers::CONTROL),
        shift: mods.contains(KeyModifiers::SHIFT),
        alt: mods.contains(KeyModifiers::ALT),
        meta: mods.intersects(KeyModifiers::SUPER | KeyModifiers::META),
    }
}

/// Convert crossterm KeyCode to inspector Key
fn convert_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Home => Some(Key::Home),
        KeyCode::End => Some(Key::End),
        KeyCode::PageUp => Some(Key::PageUp),
        KeyCode::PageDown => Some(Key::PageDown),
        _ => None,
    }
}

/// Convert a crossterm KeyEvent to a KeyCombo
pub fn convert_key_event(event: KeyEvent) -> Option<KeyCombo> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    let key = convert_key(event.code)?;
    Some(KeyCombo::new(key, convert_modifiers(event.modifiers)))
}

fn convert_mouse_event(event: MouseEvent) -> Option<Event> {
    match event.kind {
        MouseEventKind::Moved => Some(Event::Hover { row: event.row }),
        MouseEventKind::Down(MouseButton::Left) => Some(Event::Click {
            row: event.row,
            column: event.column,
            modifiers: convert_modifiers(event.modifiers),
        }),
        MouseEventKind::Down(MouseButton::Right) => Some(Event::ContextClick { row: event.row }),
        MouseEventKind::ScrollUp => Some(Event::Scroll(-3)),
        MouseEventKind::ScrollDown => Some(Event::Scroll(3)),
        _ => None,
    }
}

/// Convert any crossterm event.
pub fn convert_event(event: CrosstermEvent) -> Option<Event> {
    match event {
        CrosstermEvent::Key(key) => convert_key_event(key).map(Event::Key),
        CrosstermEvent::Mouse(mouse) => convert_mouse_event(mouse),
        CrosstermEvent::Resize(..) => Some(Event::Resize),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_key_event() {
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(
            convert_key_event(event),
            Some(KeyCombo::key(Key::Char('c')).ctrl())
        );
        let space = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE);
        assert_eq!(convert_key_event(space), Some(KeyCombo::key(Key::Space)));
        let f1 = KeyEvent::new(KeyCode::F(1), KeyModifiers::NONE);
        assert_eq!(convert_key_event(f1), None);
    }

    #[test]
    fn test_release_is_ignored() {
        let mut event = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
        event.kind = KeyEventKind::Release;
        assert_eq!(convert_key_event(event), None);
    }
}
