use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::{
    app::App,
    celebration::ConfettiAnimation,
    comparator::{LetterCell, LetterStatus},
    session::SessionState,
};

const HORIZONTAL_MARGIN: u16 = 5;
const INPUT_HEIGHT: u16 = 3;
const URGENT_SECS: i64 = 10;
pub const START_PROMPT: &str = "Start typing to begin the timer";

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim_bold() -> Style {
    bold().add_modifier(Modifier::DIM)
}

/// Visual state of one passage letter.
pub fn letter_style(cell: &LetterCell) -> Style {
    match cell.status {
        LetterStatus::Untyped if cell.is_cursor => {
            dim_bold().add_modifier(Modifier::UNDERLINED | Modifier::REVERSED)
        }
        LetterStatus::Untyped => dim_bold(),
        LetterStatus::Correct => bold().fg(Color::Green),
        LetterStatus::IncorrectLetter => bold().fg(Color::Red),
        LetterStatus::IncorrectSpace => Style::default().bg(Color::Red),
    }
}

fn passage_spans(cells: &[LetterCell]) -> Vec<Span<'static>> {
    cells
        .iter()
        .map(|cell| Span::styled(cell.expected.to_string(), letter_style(cell)))
        .collect()
}

fn header_line(app: &App) -> Line<'static> {
    let session = &app.session;
    let countdown = session.countdown();
    let countdown_style = match session.state() {
        SessionState::Idle => dim_bold(),
        SessionState::Running if countdown <= URGENT_SECS => bold().fg(Color::Red),
        SessionState::Running => bold(),
        SessionState::Expired => bold().fg(Color::Red),
        SessionState::Completed => bold().fg(Color::Green),
    };
    let hint = Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM);

    Line::from(vec![
        Span::styled(countdown.max(0).to_string(), countdown_style),
        Span::styled("   (tab) reset / (esc) quit", hint),
    ])
}

/// The visible tail of the input, clipped to `width` columns.
/// Measured per char throughout, since joined emoji sequences are wider
/// that way than as a whole string.
fn input_tail(input: &str, width: usize) -> &str {
    let char_width = |ch: char| UnicodeWidthChar::width(ch).unwrap_or(0);
    let mut remaining: usize = input.chars().map(char_width).sum();
    for (idx, ch) in input.char_indices() {
        if remaining <= width {
            return &input[idx..];
        }
        remaining -= char_width(ch);
    }
    ""
}

fn render_input(app: &App, area: Rect, buf: &mut Buffer) {
    let session = &app.session;
    let read_only = session.is_read_only();
    let has_cursor = app.focused && !read_only;

    let border_style = if read_only || !app.focused {
        Style::default().add_modifier(Modifier::DIM)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(if read_only { " done " } else { " type here " });

    let inner_width = block.inner(area).width as usize;
    let room = inner_width.saturating_sub(usize::from(has_cursor));
    let mut spans = vec![Span::raw(input_tail(session.input(), room).to_string())];
    if has_cursor {
        spans.push(Span::styled(
            " ",
            Style::default().add_modifier(Modifier::REVERSED),
        ));
    }

    Paragraph::new(Line::from(spans)).block(block).render(area, buf);
}

fn status_line(app: &App) -> Option<Span<'static>> {
    let session = &app.session;
    match session.state() {
        _ if app.show_start_prompt() => Some(Span::styled(
            START_PROMPT,
            Style::default().add_modifier(Modifier::ITALIC | Modifier::SLOW_BLINK),
        )),
        SessionState::Expired => Some(Span::styled(
            "time's up (tab) to try a new passage",
            Style::default().fg(Color::Red).add_modifier(Modifier::ITALIC),
        )),
        SessionState::Completed => Some(Span::styled(
            format!(
                "done with {}s to spare (tab) for a new passage",
                session.countdown()
            ),
            Style::default().fg(Color::Green).add_modifier(Modifier::ITALIC),
        )),
        _ => None,
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = &self.session;
        let text = session.passage().text();

        let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
        let passage_lines = if text.width() <= max_chars_per_line as usize {
            1
        } else {
            // one spare line since wrapping happens on word boundaries
            ((text.width() as f64 / max_chars_per_line as f64).ceil() + 1.0) as u16
        };

        // header, gap, input, gap, passage, gap, status
        let content_height = 1 + 1 + INPUT_HEIGHT + 1 + passage_lines + 1 + 1;
        let top = area.height.saturating_sub(content_height) / 2;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints([
                Constraint::Length(top),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(INPUT_HEIGHT),
                Constraint::Length(1),
                Constraint::Length(passage_lines),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        Paragraph::new(header_line(self))
            .alignment(Alignment::Center)
            .render(chunks[1], buf);

        render_input(self, chunks[3], buf);

        let cells = session.letter_cells();
        Paragraph::new(Line::from(passage_spans(&cells)))
            .alignment(if passage_lines == 1 {
                Alignment::Center
            } else {
                Alignment::Left
            })
            .wrap(Wrap { trim: true })
            .render(chunks[5], buf);

        if let Some(status) = status_line(self) {
            Paragraph::new(status)
                .alignment(Alignment::Center)
                .render(chunks[7], buf);
        }

        if self.confetti.is_active {
            render_confetti(&self.confetti, area, buf);
        }
    }
}

fn render_confetti(confetti: &ConfettiAnimation, area: Rect, buf: &mut Buffer) {
    let colors = [
        Color::Yellow,
        Color::Magenta,
        Color::Cyan,
        Color::Green,
        Color::Red,
        Color::Blue,
        Color::LightYellow,
    ];

    for piece in &confetti.pieces {
        if piece.x < 0.0 || piece.y < 0.0 {
            continue;
        }
        let (x, y) = (piece.x as u16, piece.y as u16);
        if x >= area.width || y >= area.height {
            continue;
        }

        let color = colors[piece.color_index % colors.len()];
        let vitality = piece.vitality();
        let style = if piece.is_text || vitality > 0.6 {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else if vitality > 0.25 {
            Style::default().fg(color)
        } else {
            Style::default().fg(color).add_modifier(Modifier::DIM)
        };

        if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
            cell.set_symbol(&piece.symbol.to_string());
            cell.set_style(style);
        }
    }
}
