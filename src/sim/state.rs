//! Game state and core simulation types
//!
//! Everything a run needs lives in one owned `GameState`. Operations take it
//! by `&mut`, so two games can run side by side without sharing anything.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::clamp_to_field;
use crate::consts::*;
use crate::settings::{CursorPolicy, Settings, SettingsError};
use crate::speed_for_score;

/// Play field size in world units (origin top-left, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Default for Field {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
        }
    }
}

/// The player's cursor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cursor {
    pub pos: Vec2,
}

impl Cursor {
    /// Starting spot: horizontally centred, near the bottom edge
    pub fn start(field: Field) -> Self {
        let pos = Vec2::new(field.width / 2.0, field.height - CURSOR_START_OFFSET);
        Self {
            pos: clamp_to_field(pos, field, SAFE_RADIUS),
        }
    }

    /// Move toward an already-clamped target according to the policy
    pub fn follow(&mut self, target: Vec2, policy: CursorPolicy) {
        self.pos = match policy {
            CursorPolicy::Snap => target,
            CursorPolicy::Smooth => self.pos.lerp(target, CURSOR_SMOOTHING),
        };
    }
}

/// Target types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetKind {
    /// Catch for a point
    Safe,
    /// Touch and the run is over
    Hazard,
}

impl TargetKind {
    pub fn radius(self) -> f32 {
        match self {
            TargetKind::Safe => SAFE_RADIUS,
            TargetKind::Hazard => HAZARD_RADIUS,
        }
    }
}

/// A rising circle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: u32,
    pub kind: TargetKind,
    pub pos: Vec2,
    pub radius: f32,
}

/// Why a target left the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemovalCause {
    /// Safe target touched by the cursor
    Caught,
    /// Safe target escaped off the top
    Missed,
    /// Hazard escaped off the top (no penalty)
    Exited,
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    TooManyMissed,
    HitHazard,
}

impl GameOverReason {
    /// Banner text shown to the player
    pub fn message(self) -> &'static str {
        match self {
            GameOverReason::TooManyMissed => "Too many missed circles!",
            GameOverReason::HitHazard => "Hit a red circle!",
        }
    }
}

impl std::fmt::Display for GameOverReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// Run ended; only `reset` leaves this phase
    GameOver { reason: GameOverReason },
}

/// Notifications for the presentation layer, in the order they happened
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    Spawned {
        id: u32,
        kind: TargetKind,
        pos: Vec2,
        radius: f32,
    },
    Moved {
        id: u32,
        pos: Vec2,
    },
    CursorMoved {
        pos: Vec2,
    },
    Removed {
        id: u32,
        cause: RemovalCause,
    },
    ScoreChanged {
        score: u32,
        speed: u32,
    },
    MissedChanged {
        missed: u32,
    },
    GameOver {
        reason: GameOverReason,
    },
    Reset,
}

/// Complete game state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub field: Field,
    pub cursor: Cursor,
    pub cursor_policy: CursorPolicy,
    /// Safe targets in spawn order
    pub(crate) safe_targets: Vec<Target>,
    /// Hazard targets in spawn order
    pub(crate) hazard_targets: Vec<Target>,
    pub(crate) score: u32,
    pub(crate) missed: u32,
    pub(crate) speed: u32,
    pub(crate) phase: GamePhase,
    /// Simulation tick counter (never reset)
    pub time_ticks: u64,
    rng: Pcg32,
    events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game on the default field with the given seed
    pub fn new(seed: u64) -> Self {
        Self::build(&Settings::default(), seed)
    }

    /// Create a new game using field size and cursor policy from settings.
    /// Fails when the field cannot hold a target.
    pub fn with_settings(settings: &Settings, seed: u64) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self::build(settings, seed))
    }

    fn build(settings: &Settings, seed: u64) -> Self {
        let field = settings.field();
        Self {
            seed,
            field,
            cursor: Cursor::start(field),
            cursor_policy: settings.cursor_policy,
            safe_targets: Vec::new(),
            hazard_targets: Vec::new(),
            score: 0,
            missed: 0,
            speed: speed_for_score(0),
            phase: GamePhase::Playing,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn missed(&self) -> u32 {
        self.missed
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver { .. })
    }

    pub fn safe_targets(&self) -> &[Target] {
        &self.safe_targets
    }

    pub fn hazard_targets(&self) -> &[Target] {
        &self.hazard_targets
    }

    /// Spawn a safe target just below the field. Ignored after game over.
    pub fn spawn_safe_target(&mut self) -> Option<u32> {
        if self.is_game_over() {
            return None;
        }
        Some(self.spawn(TargetKind::Safe))
    }

    /// Spawn a hazard target just below the field. Ignored after game over.
    pub fn spawn_hazard_target(&mut self) -> Option<u32> {
        if self.is_game_over() {
            return None;
        }
        Some(self.spawn(TargetKind::Hazard))
    }

    fn spawn(&mut self, kind: TargetKind) -> u32 {
        let radius = kind.radius();
        let x = self.rng.random_range(radius..=self.field.width - radius);
        let pos = Vec2::new(x, self.field.height + radius);
        let id = self.next_entity_id();

        log::debug!("Spawned {:?} #{} at x={:.1}", kind, id, x);
        self.events.push(GameEvent::Spawned {
            id,
            kind,
            pos,
            radius,
        });

        let target = Target {
            id,
            kind,
            pos,
            radius,
        };
        match kind {
            TargetKind::Safe => self.safe_targets.push(target),
            TargetKind::Hazard => self.hazard_targets.push(target),
        }
        id
    }

    /// Award a caught safe target and re-derive speed from the new score
    pub(crate) fn add_point(&mut self) {
        self.score += 1;
        self.speed = speed_for_score(self.score);
        self.events.push(GameEvent::ScoreChanged {
            score: self.score,
            speed: self.speed,
        });
    }

    /// Count an escaped safe target. Returns true if that ended the run.
    pub(crate) fn add_miss(&mut self) -> bool {
        self.missed += 1;
        self.events.push(GameEvent::MissedChanged {
            missed: self.missed,
        });
        if self.missed >= MAX_MISSED {
            self.end_game(GameOverReason::TooManyMissed);
            return true;
        }
        false
    }

    /// Enter the game-over phase. Fires at most once per run.
    pub(crate) fn end_game(&mut self, reason: GameOverReason) {
        if self.is_game_over() {
            return;
        }
        log::info!("Game over: {} (score {})", reason, self.score);
        self.phase = GamePhase::GameOver { reason };
        self.events.push(GameEvent::GameOver { reason });
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Start a fresh run. Safe to call at any time, any number of times.
    pub fn reset(&mut self) {
        self.safe_targets.clear();
        self.hazard_targets.clear();
        self.score = 0;
        self.missed = 0;
        self.speed = speed_for_score(0);
        self.phase = GamePhase::Playing;

        log::info!("Game reset");
        self.events.push(GameEvent::Reset);
        self.events.push(GameEvent::ScoreChanged {
            score: self.score,
            speed: self.speed,
        });
        self.events.push(GameEvent::MissedChanged {
            missed: self.missed,
        });
    }

    /// Hand pending notifications to the caller, oldest first
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    /// Notifications not yet drained
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(1);
        assert_eq!(state.phase(), GamePhase::Playing);
        assert_eq!(state.score(), 0);
        assert_eq!(state.missed(), 0);
        assert_eq!(state.speed(), 1);
        assert_eq!(state.cursor.pos, Vec2::new(200.0, 500.0));
        assert!(state.safe_targets().is_empty());
        assert!(state.hazard_targets().is_empty());
    }

    #[test]
    fn test_spawn_positions() {
        let mut state = GameState::new(42);
        for _ in 0..200 {
            state.spawn_safe_target();
            state.spawn_hazard_target();
        }

        for t in state.safe_targets() {
            assert_eq!(t.kind, TargetKind::Safe);
            assert_eq!(t.radius, SAFE_RADIUS);
            assert!(t.pos.x >= SAFE_RADIUS && t.pos.x <= FIELD_WIDTH - SAFE_RADIUS);
            assert_eq!(t.pos.y, FIELD_HEIGHT + SAFE_RADIUS);
        }
        for t in state.hazard_targets() {
            assert_eq!(t.kind, TargetKind::Hazard);
            assert_eq!(t.radius, HAZARD_RADIUS);
            assert!(t.pos.x >= HAZARD_RADIUS && t.pos.x <= FIELD_WIDTH - HAZARD_RADIUS);
            assert_eq!(t.pos.y, FIELD_HEIGHT + HAZARD_RADIUS);
        }
    }

    #[test]
    fn test_spawn_ids_are_unique_and_emitted() {
        let mut state = GameState::new(7);
        let a = state.spawn_safe_target().unwrap();
        let b = state.spawn_hazard_target().unwrap();
        state.reset();
        let c = state.spawn_safe_target().unwrap();
        assert!(a < b && b < c);

        let spawned: Vec<u32> = state
            .drain_events()
            .filter_map(|e| match e {
                GameEvent::Spawned { id, .. } => Some(id),
                _ => None,
            })
            .collect();
        assert_eq!(spawned, vec![a, b, c]);
        assert!(state.pending_events().is_empty());
    }

    #[test]
    fn test_spawn_ignored_after_game_over() {
        let mut state = GameState::new(3);
        state.end_game(GameOverReason::HitHazard);
        state.drain_events().for_each(drop);

        assert_eq!(state.spawn_safe_target(), None);
        assert_eq!(state.spawn_hazard_target(), None);
        assert!(state.safe_targets().is_empty());
        assert!(state.pending_events().is_empty());
    }

    #[test]
    fn test_end_game_fires_once() {
        let mut state = GameState::new(3);
        state.end_game(GameOverReason::TooManyMissed);
        state.end_game(GameOverReason::HitHazard);

        let overs: Vec<_> = state
            .drain_events()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .collect();
        assert_eq!(
            overs,
            vec![GameEvent::GameOver {
                reason: GameOverReason::TooManyMissed
            }]
        );
        assert_eq!(
            state.phase(),
            GamePhase::GameOver {
                reason: GameOverReason::TooManyMissed
            }
        );
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut state = GameState::new(9);
        state.spawn_safe_target();
        state.spawn_hazard_target();
        for _ in 0..20 {
            state.add_point();
        }
        state.add_miss();
        state.end_game(GameOverReason::HitHazard);

        state.reset();
        state.reset();

        assert_eq!(state.score(), 0);
        assert_eq!(state.missed(), 0);
        assert_eq!(state.speed(), 1);
        assert_eq!(state.phase(), GamePhase::Playing);
        assert!(state.safe_targets().is_empty());
        assert!(state.hazard_targets().is_empty());

        let tail: Vec<_> = state.drain_events().rev().take(3).collect();
        assert_eq!(
            tail,
            vec![
                GameEvent::MissedChanged { missed: 0 },
                GameEvent::ScoreChanged { score: 0, speed: 1 },
                GameEvent::Reset,
            ]
        );
    }

    #[test]
    fn test_tenth_miss_ends_game() {
        let mut state = GameState::new(5);
        for _ in 0..9 {
            assert!(!state.add_miss());
        }
        assert!(state.add_miss());
        assert!(state.is_game_over());
    }

    #[test]
    fn test_smooth_cursor_moves_halfway() {
        let mut cursor = Cursor {
            pos: Vec2::new(100.0, 100.0),
        };
        cursor.follow(Vec2::new(200.0, 300.0), CursorPolicy::Smooth);
        assert_eq!(cursor.pos, Vec2::new(150.0, 200.0));
        cursor.follow(Vec2::new(200.0, 300.0), CursorPolicy::Snap);
        assert_eq!(cursor.pos, Vec2::new(200.0, 300.0));
    }

    #[test]
    fn test_with_settings_rejects_tiny_field() {
        let settings = Settings {
            field_width: 30.0,
            ..Default::default()
        };
        assert!(matches!(
            GameState::with_settings(&settings, 1),
            Err(SettingsError::FieldTooSmall { .. })
        ));

        let narrow = Settings {
            field_width: 2.0 * SAFE_RADIUS,
            ..Default::default()
        };
        let mut state = GameState::with_settings(&narrow, 1).unwrap();
        state.spawn_safe_target();
        state.spawn_hazard_target();
        assert_eq!(state.safe_targets()[0].pos.x, SAFE_RADIUS);
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let mut a = GameState::new(1234);
        let mut b = GameState::new(1234);
        for _ in 0..10 {
            a.spawn_safe_target();
            b.spawn_safe_target();
        }
        assert_eq!(a.safe_targets(), b.safe_targets());
    }
}
