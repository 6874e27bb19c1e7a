use itertools::{EitherOrBoth, Itertools};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LetterStatus {
    Untyped,
    Correct,
    /// Something other than the space that separates two words.
    IncorrectSpace,
    IncorrectLetter,
}

/// Comparison result for one passage position. Derived on every render, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LetterCell {
    pub expected: char,
    pub typed: Option<char>,
    pub is_cursor: bool,
    pub status: LetterStatus,
}

/// Compare `input` against `passage`, one cell per passage character.
///
/// Typed characters beyond the end of the passage produce no cells. The
/// cursor sits on the first untyped position, so there is no cursor once
/// the input is at least as long as the passage.
pub fn compare(passage: &str, input: &str) -> Vec<LetterCell> {
    let input_len = input.chars().count();

    passage
        .chars()
        .zip_longest(input.chars())
        .enumerate()
        .filter_map(|(idx, pair)| match pair {
            EitherOrBoth::Left(expected) => Some(LetterCell {
                expected,
                typed: None,
                is_cursor: idx == input_len,
                status: LetterStatus::Untyped,
            }),
            EitherOrBoth::Both(expected, typed) => Some(LetterCell {
                expected,
                typed: Some(typed),
                is_cursor: false,
                status: classify(expected, typed),
            }),
            EitherOrBoth::Right(_) => None,
        })
        .collect()
}

fn classify(expected: char, typed: char) -> LetterStatus {
    if typed == expected {
        LetterStatus::Correct
    } else if expected == ' ' {
        LetterStatus::IncorrectSpace
    } else {
        LetterStatus::IncorrectLetter
    }
}

pub fn is_complete(passage: &str, input: &str) -> bool {
    passage == input
}

/// Index of the next character to type, if it falls inside the passage.
pub fn cursor_position(cells: &[LetterCell]) -> Option<usize> {
    cells.iter().position(|c| c.is_cursor)
}
