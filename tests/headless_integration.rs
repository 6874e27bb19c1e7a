use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use keyrace::app::App;
use keyrace::celebration::ChannelCelebration;
use keyrace::language::StaticWords;
use keyrace::passage::PassageGenerator;
use keyrace::runtime::{AppEvent, FixedTicker, Runner, TestEventSource};
use keyrace::session::{Session, SessionState, COUNTDOWN_SECS};
use keyrace::timer::{ManualScheduler, TimerId};

// Headless integration using the internal runtime + App without a TTY.
// Timers come from a ManualScheduler, so countdown ticks are injected as events.

fn key(c: char) -> AppEvent {
    AppEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

fn tab() -> AppEvent {
    AppEvent::Key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE))
}

fn build(passage: &str) -> (App, mpsc::Sender<AppEvent>, Runner<TestEventSource, FixedTicker>) {
    let (tx, rx) = mpsc::channel();
    let session = Session::new(
        PassageGenerator::new(Box::new(StaticWords::new([passage])), 1),
        Box::new(ManualScheduler::new()),
        Box::new(ChannelCelebration::new(tx.clone())),
    );
    let app = App::new(session, (80, 24));
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(2)),
    );
    (app, tx, runner)
}

/// Drive the loop until no event shows up within a frame.
fn drain(app: &mut App, runner: &Runner<TestEventSource, FixedTicker>) {
    for _ in 0..1000u32 {
        match runner.step() {
            AppEvent::Frame => return,
            event => {
                app.handle_event(event);
            }
        }
    }
    panic!("event loop did not settle");
}

#[test]
fn headless_typing_flow_completes_and_celebrates() {
    let (mut app, tx, runner) = build("hi there");

    for c in "hi there".chars() {
        tx.send(key(c)).unwrap();
    }
    drain(&mut app, &runner);

    assert_eq!(app.session.state(), SessionState::Completed);
    assert!(!app.session.is_timer_running());
    // the Celebrate event was posted by the session and consumed by the loop
    assert!(app.confetti.is_active);
    assert!(app.confetti.pieces.iter().any(|p| p.is_text));
}

#[test]
fn headless_rejects_skipping_a_space() {
    let (mut app, tx, runner) = build("ab cd");

    for c in "abx".chars() {
        tx.send(key(c)).unwrap();
    }
    drain(&mut app, &runner);

    assert_eq!(app.session.input(), "ab");
    assert_eq!(app.session.state(), SessionState::Running);
}

#[test]
fn headless_countdown_expires_after_fifty_ticks() {
    let (mut app, tx, runner) = build("ab cd");

    tx.send(key('a')).unwrap();
    // ManualScheduler hands out ids from 1
    for _ in 0..COUNTDOWN_SECS + 5 {
        tx.send(AppEvent::Countdown(TimerId::new(1))).unwrap();
    }
    tx.send(key('b')).unwrap();
    drain(&mut app, &runner);

    assert_eq!(app.session.countdown(), 0);
    assert_eq!(app.session.state(), SessionState::Expired);
    assert_eq!(app.session.input(), "a");
    assert!(!app.show_start_prompt());
}

#[test]
fn headless_reset_ignores_ticks_from_the_old_timer() {
    let (mut app, tx, runner) = build("ab cd");

    tx.send(key('a')).unwrap();
    tx.send(AppEvent::Countdown(TimerId::new(1))).unwrap();
    tx.send(tab()).unwrap();
    tx.send(AppEvent::Countdown(TimerId::new(1))).unwrap();
    drain(&mut app, &runner);

    assert_eq!(app.session.state(), SessionState::Idle);
    assert_eq!(app.session.countdown(), COUNTDOWN_SECS);
    assert_eq!(app.session.input(), "");
    assert_eq!(app.session.scheduler().active_count(), 0);

    tx.send(key('a')).unwrap();
    tx.send(AppEvent::Countdown(TimerId::new(2))).unwrap();
    drain(&mut app, &runner);

    assert_eq!(app.session.countdown(), COUNTDOWN_SECS - 1);
    assert_eq!(app.session.scheduler().active_count(), 1);
}

#[test]
fn headless_double_reset_yields_fresh_sessions() {
    let (tx, rx) = mpsc::channel();
    let session = Session::new(
        PassageGenerator::new(Box::new(StaticWords::new(["one", "two", "three"])), 20),
        Box::new(ManualScheduler::new()),
        Box::new(ChannelCelebration::new(tx.clone())),
    );
    let mut app = App::new(session, (80, 24));
    let runner = Runner::new(TestEventSource::new(rx), FixedTicker::new(Duration::from_millis(2)));

    tx.send(key('o')).unwrap();
    tx.send(tab()).unwrap();
    tx.send(tab()).unwrap();
    drain(&mut app, &runner);

    assert_eq!(app.session.state(), SessionState::Idle);
    assert_eq!(app.session.passage().word_count(), 20);
    assert_eq!(app.session.input(), "");
    assert!(!app.session.is_timer_running());
}
