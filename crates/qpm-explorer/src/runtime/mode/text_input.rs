use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::domain::input::InputState;

/// Applies one editing key to `input`.
///
/// Returns whether the text changed; cursor moves alone return `false`.
/// Control chords are left to the caller.
pub(crate) fn edit(input: &mut InputState, key: KeyEvent) -> bool {
    let before_len = input.text().len();

    match key.code {
        KeyCode::Char(character) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            input.insert_char(character);
        }
        KeyCode::Backspace => input.delete_backward(),
        KeyCode::Delete => input.delete_forward(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_home(),
        KeyCode::End => input.move_end(),
        _ => {}
    }

    input.text().len() != before_len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_inserts_plain_characters() {
        // Arrange
        let mut input = InputState::with_text("ab");

        // Act
        let changed = edit(&mut input, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE));

        // Assert
        assert!(changed);
        assert_eq!(input.text(), "abc");
    }

    #[test]
    fn test_edit_ignores_control_chords() {
        // Arrange
        let mut input = InputState::with_text("ab");

        // Act
        let changed = edit(
            &mut input,
            KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL),
        );

        // Assert
        assert!(!changed);
        assert_eq!(input.text(), "ab");
    }

    #[test]
    fn test_edit_cursor_move_reports_unchanged() {
        // Arrange
        let mut input = InputState::with_text("ab");

        // Act
        let changed = edit(&mut input, KeyEvent::new(KeyCode::Left, KeyModifiers::NONE));

        // Assert
        assert!(!changed);
        assert_eq!(input.cursor, 1);
    }

    #[test]
    fn test_edit_backspace_deletes_before_cursor() {
        // Arrange
        let mut input = InputState::with_text("ab");

        // Act
        let changed = edit(&mut input, KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE));

        // Assert
        assert!(changed);
        assert_eq!(input.text(), "a");
    }
}
