use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::domain::input::InputState;

const ELLIPSIS: &str = "...";

/// Truncates `text` to at most `max_width` display columns, ending in `...`
/// when anything was cut.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= ELLIPSIS.len() {
        return ".".repeat(max_width);
    }

    let budget = max_width - ELLIPSIS.len();
    let mut used_width = 0;
    let mut truncated = String::new();
    for character in text.chars() {
        let character_width = character.width().unwrap_or(0);
        if used_width + character_width > budget {
            break;
        }

        used_width += character_width;
        truncated.push(character);
    }
    truncated.push_str(ELLIPSIS);

    truncated
}

/// Returns the display width of `text` in terminal columns.
pub fn display_width(text: &str) -> u16 {
    u16::try_from(text.width()).unwrap_or(u16::MAX)
}

/// Returns the slice of `input` that fits in `width` columns together with
/// the cursor column inside it.
///
/// Leading characters scroll out of view once the cursor would pass the right
/// edge.
pub fn visible_input(input: &InputState, width: u16) -> (String, u16) {
    let characters: Vec<char> = input.text().chars().collect();
    let cursor = input.cursor.min(characters.len());
    let max_cursor_column = usize::from(width.saturating_sub(1));

    let mut start = 0;
    while start < cursor && columns(&characters[start..cursor]) > max_cursor_column {
        start += 1;
    }

    let mut visible = String::new();
    let mut used_width = 0;
    for character in &characters[start..] {
        let character_width = character.width().unwrap_or(0);
        if used_width + character_width > usize::from(width) {
            break;
        }

        used_width += character_width;
        visible.push(*character);
    }
    let cursor_column = u16::try_from(columns(&characters[start..cursor])).unwrap_or(u16::MAX);

    (visible, cursor_column)
}

fn columns(characters: &[char]) -> usize {
    characters
        .iter()
        .map(|character| character.width().unwrap_or(0))
        .sum()
}
