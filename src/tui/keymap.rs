//! Key mapping for list navigation.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::Action;

/// Map a crossterm key event to a semantic Action.
///
/// Returns None for keys that don't map to any action. Text capture
/// bypasses this and reads raw keys.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    // Character keys only count bare or shifted; Ctrl+K is not k
    if matches!(key.code, KeyCode::Char(_))
        && !key.modifiers.difference(KeyModifiers::SHIFT).is_empty()
    {
        return None;
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Activate),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        KeyCode::Esc => Some(Action::Back),
        KeyCode::Char('q') => Some(Action::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn ctrl_c_maps_to_quit() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(key), Some(Action::Quit));
    }

    #[test]
    fn plain_c_is_unmapped() {
        assert_eq!(map_key(plain(KeyCode::Char('c'))), None);
    }

    #[test]
    fn vim_keys_map_to_movement() {
        assert_eq!(map_key(plain(KeyCode::Char('j'))), Some(Action::MoveDown));
        assert_eq!(map_key(plain(KeyCode::Char('k'))), Some(Action::MoveUp));
    }

    #[test]
    fn arrow_keys_map_to_movement() {
        assert_eq!(map_key(plain(KeyCode::Up)), Some(Action::MoveUp));
        assert_eq!(map_key(plain(KeyCode::Down)), Some(Action::MoveDown));
    }

    #[test]
    fn enter_and_space_activate() {
        assert_eq!(map_key(plain(KeyCode::Enter)), Some(Action::Activate));
        assert_eq!(map_key(plain(KeyCode::Char(' '))), Some(Action::Activate));
    }

    #[test]
    fn question_mark_toggles_help() {
        // Most terminals report '?' with SHIFT held.
        let key = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT);
        assert_eq!(map_key(key), Some(Action::ToggleHelp));
    }

    #[test]
    fn esc_maps_to_back() {
        assert_eq!(map_key(plain(KeyCode::Esc)), Some(Action::Back));
    }

    #[test]
    fn modified_letters_are_unmapped() {
        for c in ['k', 'j', 'q', ' ', '?'] {
            for modifiers in [KeyModifiers::CONTROL, KeyModifiers::ALT] {
                let key = KeyEvent::new(KeyCode::Char(c), modifiers);
                assert_eq!(map_key(key), None, "{:?}+{:?}", modifiers, c);
            }
        }
    }

    #[test]
    fn unmapped_key_returns_none() {
        assert_eq!(map_key(plain(KeyCode::Char('z'))), None);
    }
}
