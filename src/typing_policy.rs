use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::passage::Passage;

/// True when the last character of `proposed` sits on a word boundary of
/// the passage but is not itself a space.
///
/// Only the position `len(proposed) - 1` is inspected. That keeps a word
/// from being typed through the gap that follows it, and it also means a
/// deletion can be refused when it would leave a non-space on a gap.
pub fn crosses_word_boundary(passage: &Passage, proposed: &str) -> bool {
    let Some(last) = proposed.chars().count().checked_sub(1) else {
        return false;
    };
    passage.char_at(last) == Some(' ') && proposed.chars().nth(last) != Some(' ')
}

/// The buffer a key press would produce, or `None` if the key is not an edit.
pub fn propose_edit(current: &str, key: &KeyEvent) -> Option<String> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Char('w') if ctrl => delete_word(current),
        KeyCode::Char('h') if ctrl => delete_char(current),
        KeyCode::Char(_) if ctrl || alt => None,
        KeyCode::Char(c) => {
            let mut next = String::with_capacity(current.len() + c.len_utf8());
            next.push_str(current);
            next.push(c);
            Some(next)
        }
        KeyCode::Backspace if ctrl || alt => delete_word(current),
        KeyCode::Backspace => delete_char(current),
        _ => None,
    }
}

/// The buffer after pasting `text`. The input is a single line, so line
/// breaks are dropped.
pub fn propose_paste(current: &str, text: &str) -> Option<String> {
    let pasted: String = text.chars().filter(|c| !matches!(c, '\n' | '\r')).collect();
    if pasted.is_empty() {
        return None;
    }
    Some(format!("{current}{pasted}"))
}

fn delete_char(current: &str) -> Option<String> {
    let mut chars = current.chars();
    chars.next_back()?;
    Some(chars.as_str().to_string())
}

fn delete_word(current: &str) -> Option<String> {
    if current.is_empty() {
        return None;
    }
    let trimmed = current.trim_end_matches(' ');
    let cut = trimmed.rfind(' ').map_or(0, |i| i + 1);
    Some(current[..cut].to_string())
}
