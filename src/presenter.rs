//! Presentation contract
//!
//! The simulation never draws. It records `GameEvent`s, and whatever renders
//! the game implements `Presenter` to receive them. All hooks default to
//! no-ops so an adapter only overrides what it draws.

use std::io::Write;

use glam::Vec2;

use crate::consts::MAX_MISSED;
use crate::sim::{GameEvent, GameOverReason, RemovalCause, TargetKind};

pub trait Presenter {
    /// Create a visual for a new target
    fn on_spawn(&mut self, _id: u32, _kind: TargetKind, _pos: Vec2, _radius: f32) {}

    /// Target moved this tick
    fn on_move(&mut self, _id: u32, _pos: Vec2) {}

    fn on_cursor_move(&mut self, _pos: Vec2) {}

    /// Destroy a target's visual; `cause` lets the adapter pick an effect
    fn on_remove(&mut self, _id: u32, _cause: RemovalCause) {}

    fn on_score_changed(&mut self, _score: u32, _speed: u32) {}

    fn on_missed_changed(&mut self, _missed: u32) {}

    fn on_game_over(&mut self, _reason: GameOverReason) {}

    /// Drop every target visual and the game-over banner
    fn on_reset(&mut self) {}

    /// Route one event to its hook
    fn present(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::Spawned {
                id,
                kind,
                pos,
                radius,
            } => self.on_spawn(id, kind, pos, radius),
            GameEvent::Moved { id, pos } => self.on_move(id, pos),
            GameEvent::CursorMoved { pos } => self.on_cursor_move(pos),
            GameEvent::Removed { id, cause } => self.on_remove(id, cause),
            GameEvent::ScoreChanged { score, speed } => self.on_score_changed(score, speed),
            GameEvent::MissedChanged { missed } => self.on_missed_changed(missed),
            GameEvent::GameOver { reason } => self.on_game_over(reason),
            GameEvent::Reset => self.on_reset(),
        }
    }
}

/// Records every event verbatim
impl Presenter for Vec<GameEvent> {
    fn present(&mut self, event: &GameEvent) {
        self.push(event.clone());
    }
}

/// Writes each event as one JSON line, then hands it on to `inner`
pub struct JsonLines<W: Write, P: Presenter> {
    pub out: W,
    pub inner: P,
}

impl<W: Write, P: Presenter> JsonLines<W, P> {
    pub fn new(out: W, inner: P) -> Self {
        Self { out, inner }
    }
}

impl<W: Write, P: Presenter> Presenter for JsonLines<W, P> {
    fn present(&mut self, event: &GameEvent) {
        let written = serde_json::to_writer(&mut self.out, event)
            .map_err(std::io::Error::from)
            .and_then(|()| self.out.write_all(b"\n"));
        if let Err(e) = written {
            log::warn!("Could not write event: {}", e);
        }
        self.inner.present(event);
    }
}

/// Text overlay state: the three counters and the game-over banner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    pub score: u32,
    pub speed: u32,
    pub missed: u32,
    pub game_over: Option<GameOverReason>,
}

impl Default for Hud {
    fn default() -> Self {
        Self {
            score: 0,
            speed: 1,
            missed: 0,
            game_over: None,
        }
    }
}

impl Hud {
    pub fn speed_text(&self) -> String {
        format!("SPEED: {}", self.speed)
    }

    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }

    pub fn missed_text(&self) -> String {
        format!("Missed: {}/{}", self.missed, MAX_MISSED)
    }

    /// Centre banner, only while the run is over
    pub fn banner_text(&self) -> Option<String> {
        self.game_over.map(|reason| {
            format!(
                "{}\nFinal Score: {}\nClick to restart",
                reason.message(),
                self.score
            )
        })
    }
}

impl Presenter for Hud {
    fn on_score_changed(&mut self, score: u32, speed: u32) {
        self.score = score;
        self.speed = speed;
    }

    fn on_missed_changed(&mut self, missed: u32) {
        self.missed = missed;
    }

    fn on_game_over(&mut self, reason: GameOverReason) {
        self.game_over = Some(reason);
    }

    fn on_reset(&mut self) {
        self.game_over = None;
    }
}
