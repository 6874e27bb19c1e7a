use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::celebration::ConfettiAnimation;
use crate::runtime::{AppEvent, FRAME_RATE_MS};
use crate::session::{EditOutcome, Session};
use crate::typing_policy::{propose_edit, propose_paste};

/// What a key press means before it reaches the input control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    Reset,
    Type,
}

impl Command {
    pub fn from_key(key: &KeyEvent) -> Self {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => Command::Quit,
            KeyCode::Char('c') if ctrl => Command::Quit,
            KeyCode::Tab => Command::Reset,
            KeyCode::Char('r') if ctrl => Command::Reset,
            _ => Command::Type,
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub session: Session,
    pub confetti: ConfettiAnimation,
    /// Whether the input control holds focus.
    pub focused: bool,
    pub size: (u16, u16),
    pub should_quit: bool,
}

impl App {
    pub fn new(session: Session, size: (u16, u16)) -> Self {
        Self {
            session,
            confetti: ConfettiAnimation::new(),
            focused: true,
            size,
            should_quit: false,
        }
    }

    /// Apply one event. Returns true when the screen needs a redraw.
    pub fn handle_event(&mut self, event: AppEvent) -> bool {
        match event {
            AppEvent::Key(key) => self.on_key(key),
            AppEvent::Paste(text) => {
                self.session.on_first_keystroke();
                if let Some(value) = propose_paste(self.session.input(), &text) {
                    self.edit(&value);
                }
                true
            }
            AppEvent::Resize(width, height) => {
                self.size = (width, height);
                true
            }
            AppEvent::FocusGained => {
                self.focused = true;
                true
            }
            AppEvent::FocusLost => {
                // the input is only allowed to let go once the passage is done
                self.focused = !self.session.is_read_only();
                true
            }
            AppEvent::Countdown(id) => self.session.on_timer_fired(id),
            AppEvent::Celebrate => {
                self.confetti.start(self.size.0, self.size.1);
                true
            }
            AppEvent::Frame => {
                let was_active = self.confetti.is_active;
                self.confetti.update(FRAME_RATE_MS as f64 / 1000.0);
                was_active
            }
        }
    }

    fn on_key(&mut self, key: KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }

        match Command::from_key(&key) {
            Command::Quit => {
                self.should_quit = true;
            }
            Command::Reset => self.reset(),
            Command::Type => {
                self.session.on_first_keystroke();
                if let Some(value) = propose_edit(self.session.input(), &key) {
                    self.edit(&value);
                }
            }
        }
        true
    }

    fn edit(&mut self, value: &str) -> EditOutcome {
        let outcome = self.session.handle_input_change(value);
        if outcome == EditOutcome::Completed {
            self.focused = false;
        }
        outcome
    }

    pub fn reset(&mut self) {
        self.session.reset();
        self.confetti.stop();
        self.focused = true;
    }

    /// The "start typing" hint is shown until the first accepted character,
    /// and never once the countdown has run out.
    pub fn show_start_prompt(&self) -> bool {
        self.session.input().is_empty() && !self.session.is_expired()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::celebration::NoCelebration;
    use crate::language::StaticWords;
    use crate::passage::PassageGenerator;
    use crate::session::{SessionState, COUNTDOWN_SECS};
    use crate::timer::ManualScheduler;

    fn app_for(text: &str) -> App {
        let session = Session::new(
            PassageGenerator::new(Box::new(StaticWords::new([text])), 1),
            Box::new(ManualScheduler::new()),
            Box::new(NoCelebration),
        );
        App::new(session, (80, 24))
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        app.handle_event(AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn commands_from_keys() {
        let key = |code, modifiers| KeyEvent::new(code, modifiers);
        assert_eq!(Command::from_key(&key(KeyCode::Esc, KeyModifiers::NONE)), Command::Quit);
        assert_eq!(
            Command::from_key(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Command::Quit
        );
        assert_eq!(Command::from_key(&key(KeyCode::Tab, KeyModifiers::NONE)), Command::Reset);
        assert_eq!(
            Command::from_key(&key(KeyCode::Char('r'), KeyModifiers::CONTROL)),
            Command::Reset
        );
        assert_eq!(
            Command::from_key(&key(KeyCode::Char('r'), KeyModifiers::NONE)),
            Command::Type
        );
    }

    #[test]
    fn first_key_starts_the_countdown() {
        let mut app = app_for("ab cd");
        assert_eq!(app.session.state(), SessionState::Idle);

        press(&mut app, KeyCode::Char('a'));

        assert_eq!(app.session.state(), SessionState::Running);
        assert_eq!(app.session.input(), "a");
    }

    #[test]
    fn non_edit_key_still_starts_the_countdown() {
        let mut app = app_for("ab cd");
        press(&mut app, KeyCode::Left);

        assert_eq!(app.session.state(), SessionState::Running);
        assert_eq!(app.session.input(), "");
    }

    #[test]
    fn reset_key_does_not_start_the_countdown() {
        let mut app = app_for("ab cd");
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.session.state(), SessionState::Idle);
    }

    #[test]
    fn key_release_is_ignored() {
        let mut app = app_for("ab cd");
        let mut key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;

        assert!(!app.handle_event(AppEvent::Key(key)));
        assert_eq!(app.session.input(), "");
    }

    #[test]
    fn typing_through_a_gap_is_refused() {
        let mut app = app_for("ab cd");
        type_str(&mut app, "abx");
        assert_eq!(app.session.input(), "ab");
        type_str(&mut app, " c");
        assert_eq!(app.session.input(), "ab c");
    }

    #[test]
    fn backspace_edits_the_buffer() {
        let mut app = app_for("ab cd");
        type_str(&mut app, "ax");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.session.input(), "a");
    }

    #[test]
    fn paste_goes_through_the_same_policy() {
        let mut app = app_for("ab cd");
        app.handle_event(AppEvent::Paste("abx".into()));
        assert_eq!(app.session.input(), "");
        assert_eq!(app.session.state(), SessionState::Running);

        app.handle_event(AppEvent::Paste("ab cd".into()));
        assert_eq!(app.session.state(), SessionState::Completed);
    }

    #[test]
    fn countdown_events_tick_the_session() {
        let mut app = app_for("ab cd");
        press(&mut app, KeyCode::Char('a'));
        let id = app.session.timer_id().unwrap();

        assert!(app.handle_event(AppEvent::Countdown(id)));
        assert_eq!(app.session.countdown(), COUNTDOWN_SECS - 1);
    }

    #[test]
    fn completion_releases_focus() {
        let mut app = app_for("hi");
        type_str(&mut app, "hi");

        assert_eq!(app.session.state(), SessionState::Completed);
        assert!(!app.focused);

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.session.input(), "hi");
    }

    #[test]
    fn focus_lost_refocuses_until_complete() {
        let mut app = app_for("hi");
        app.focused = false;
        app.handle_event(AppEvent::FocusLost);
        assert!(app.focused);

        type_str(&mut app, "hi");
        app.handle_event(AppEvent::FocusLost);
        assert!(!app.focused);
    }

    #[test]
    fn celebrate_event_starts_confetti_and_reset_stops_it() {
        let mut app = app_for("hi");
        app.handle_event(AppEvent::Celebrate);
        assert!(app.confetti.is_active);
        assert!(app.handle_event(AppEvent::Frame));

        press(&mut app, KeyCode::Tab);
        assert!(!app.confetti.is_active);
        assert!(!app.handle_event(AppEvent::Frame));
    }

    #[test]
    fn start_prompt_visibility() {
        let mut app = app_for("ab cd");
        assert!(app.show_start_prompt());

        press(&mut app, KeyCode::Char('a'));
        assert!(!app.show_start_prompt());

        press(&mut app, KeyCode::Backspace);
        assert!(app.show_start_prompt());

        for _ in 0..COUNTDOWN_SECS {
            app.session.tick();
        }
        assert!(!app.show_start_prompt());
    }

    #[test]
    fn quit_keys() {
        let mut app = app_for("ab");
        app.handle_event(AppEvent::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(app.should_quit);
        assert_eq!(app.session.state(), SessionState::Idle);
    }

    #[test]
    fn resize_is_tracked() {
        let mut app = app_for("ab");
        app.handle_event(AppEvent::Resize(120, 40));
        assert_eq!(app.size, (120, 40));
    }
}
