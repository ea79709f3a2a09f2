use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Keys the game understands. Everything else never reaches the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Key {
    Confirm,
    Cancel,
    Left,
    Right,
    Char(char),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Input {
    Key(Key),
    Interrupt,
}

const MAX_KEYS_PER_FRAME: usize = 32;

/// Pending key presses, already normalized. Never blocks.
pub(crate) fn drain_inputs() -> anyhow::Result<Vec<Input>> {
    let mut out = Vec::new();
    while out.len() < MAX_KEYS_PER_FRAME && event::poll(Duration::ZERO)? {
        match event::read()? {
            Event::Key(k) if k.kind != KeyEventKind::Release => out.extend(normalize(&k)),
            _ => {}
        }
    }
    Ok(out)
}

pub(crate) fn normalize(ev: &KeyEvent) -> Option<Input> {
    if ev.modifiers.contains(KeyModifiers::CONTROL) {
        return match ev.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(Input::Interrupt),
            _ => None,
        };
    }

    let key = match ev.code {
        KeyCode::Enter => Key::Confirm,
        KeyCode::Esc => Key::Cancel,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Char(ch) if !ch.is_control() => Key::Char(ch),
        _ => return None,
    };
    Some(Input::Key(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn named_controls() {
        assert_eq!(normalize(&press(KeyCode::Enter)), Some(Input::Key(Key::Confirm)));
        assert_eq!(normalize(&press(KeyCode::Esc)), Some(Input::Key(Key::Cancel)));
        assert_eq!(normalize(&press(KeyCode::Left)), Some(Input::Key(Key::Left)));
        assert_eq!(normalize(&press(KeyCode::Right)), Some(Input::Key(Key::Right)));
    }

    #[test]
    fn printable_chars_pass_through() {
        assert_eq!(normalize(&press(KeyCode::Char('7'))), Some(Input::Key(Key::Char('7'))));
        assert_eq!(normalize(&press(KeyCode::Char(' '))), Some(Input::Key(Key::Char(' '))));
        let shifted = KeyEvent::new(KeyCode::Char('W'), KeyModifiers::SHIFT);
        assert_eq!(normalize(&shifted), Some(Input::Key(Key::Char('W'))));
    }

    #[test]
    fn ctrl_c_interrupts() {
        let ev = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(normalize(&ev), Some(Input::Interrupt));
        let other = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL);
        assert_eq!(normalize(&other), None);
    }

    #[test]
    fn unhandled_keys_are_dropped() {
        assert_eq!(normalize(&press(KeyCode::Tab)), None);
        assert_eq!(normalize(&press(KeyCode::Up)), None);
        assert_eq!(normalize(&press(KeyCode::Backspace)), None);
        assert_eq!(normalize(&press(KeyCode::F(1))), None);
    }
}
