use std::sync::mpsc::Sender;
use std::time::Instant;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::runtime::AppEvent;

/// Fire-and-forget trigger invoked once when a passage is completed.
pub trait Celebration {
    fn celebrate(&mut self);
}

/// Posts [`AppEvent::Celebrate`] into the event loop. A closed loop is ignored.
pub struct ChannelCelebration {
    tx: Sender<AppEvent>,
}

impl ChannelCelebration {
    pub fn new(tx: Sender<AppEvent>) -> Self {
        Self { tx }
    }
}

impl Celebration for ChannelCelebration {
    fn celebrate(&mut self) {
        if self.tx.send(AppEvent::Celebrate).is_err() {
            tracing::debug!("celebration dropped, event loop is gone");
        }
    }
}

/// Used with `--no-celebration`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCelebration;

impl Celebration for NoCelebration {
    fn celebrate(&mut self) {}
}

const CONFETTI: [char; 6] = ['▪', '▮', '●', '◆', '✦', '▴'];
const CHEERS: [&str; 5] = ["NICE!", "DONE!", "FLAWLESS!", "NAILED IT!", "BRAVO!"];
const GRAVITY: f64 = 12.0;
const DRAG: f64 = 0.97;

/// One piece of confetti, or one letter of the cheer when `is_text` is set.
#[derive(Debug, Clone)]
pub struct ConfettiPiece {
    pub x: f64,
    pub y: f64,
    pub vel_x: f64,
    pub vel_y: f64,
    pub symbol: char,
    pub color_index: usize,
    pub age: f64,
    pub max_age: f64,
    pub is_text: bool,
}

impl ConfettiPiece {
    /// A piece fired from a cannon at (`x`, `y`) towards `direction` (-1 left, 1 right).
    fn launched<R: Rng>(x: f64, y: f64, direction: f64, rng: &mut R) -> Self {
        Self {
            x,
            y,
            vel_x: direction * rng.gen_range(6.0..18.0),
            vel_y: rng.gen_range(-16.0..-6.0),
            symbol: *CONFETTI.choose(rng).unwrap_or(&'▪'),
            color_index: rng.gen_range(0..7),
            age: 0.0,
            max_age: rng.gen_range(1.5..3.0),
            is_text: false,
        }
    }

    fn letter(x: f64, y: f64, symbol: char, color_index: usize) -> Self {
        Self {
            x,
            y,
            vel_x: 0.0,
            vel_y: 0.0,
            symbol,
            color_index,
            age: 0.0,
            max_age: 3.0,
            is_text: true,
        }
    }

    /// Advance by `dt` seconds. Returns false once the piece has expired.
    fn update(&mut self, dt: f64) -> bool {
        if !self.is_text {
            self.x += self.vel_x * dt;
            self.y += self.vel_y * dt;
            self.vel_x *= DRAG;
            self.vel_y += GRAVITY * dt;
        }
        self.age += dt;
        self.age < self.max_age
    }

    /// 1.0 when fresh, 0.0 when expired.
    pub fn vitality(&self) -> f64 {
        (1.0 - self.age / self.max_age).clamp(0.0, 1.0)
    }
}

/// Confetti burst drawn over the typing screen for a few seconds.
#[derive(Debug)]
pub struct ConfettiAnimation {
    pub pieces: Vec<ConfettiPiece>,
    pub started_at: Option<Instant>,
    pub duration: f64,
    pub is_active: bool,
    pub width: f64,
    pub height: f64,
}

impl ConfettiAnimation {
    pub fn new() -> Self {
        Self {
            pieces: Vec::new(),
            started_at: None,
            duration: 3.0,
            is_active: false,
            width: 80.0,
            height: 24.0,
        }
    }

    pub fn start(&mut self, width: u16, height: u16) {
        let mut rng = rand::thread_rng();

        self.pieces.clear();
        self.started_at = Some(Instant::now());
        self.is_active = true;
        self.width = width as f64;
        self.height = height as f64;

        // two cannons in the bottom corners
        let floor = (self.height - 1.0).max(0.0);
        for _ in 0..40 {
            self.pieces
                .push(ConfettiPiece::launched(0.0, floor, 1.0, &mut rng));
            self.pieces
                .push(ConfettiPiece::launched(self.width - 1.0, floor, -1.0, &mut rng));
        }

        let cheer = CHEERS.choose(&mut rng).unwrap_or(&"NICE!");
        let color = rng.gen_range(0..7);
        let start_x = ((self.width - cheer.chars().count() as f64) / 2.0).max(0.0);
        let y = (self.height / 2.0).floor();
        for (i, ch) in cheer.chars().enumerate().filter(|(_, c)| *c != ' ') {
            self.pieces
                .push(ConfettiPiece::letter(start_x + i as f64, y, ch, color));
        }
    }

    pub fn stop(&mut self) {
        self.is_active = false;
        self.started_at = None;
        self.pieces.clear();
    }

    /// Advance one frame of `dt` seconds.
    pub fn update(&mut self, dt: f64) {
        if !self.is_active {
            return;
        }

        let elapsed = self
            .started_at
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or_default();
        if elapsed >= self.duration {
            self.stop();
            return;
        }

        let (width, height) = (self.width, self.height);
        self.pieces.retain_mut(|piece| {
            let alive = piece.update(dt);
            let margin = 2.0;
            let off_screen =
                piece.y > height + margin || piece.x < -margin || piece.x > width + margin;
            alive && (piece.is_text || !off_screen)
        });

        if self.pieces.is_empty() {
            self.stop();
        }
    }
}

impl Default for ConfettiAnimation {
    fn default() -> Self {
        Self::new()
    }
}
