//! Circle Catch - a reflex arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, scoring, game over)
//! - `schedule`: Recurring spawn timers driven by elapsed frame time
//! - `presenter`: Notification contract toward whatever draws the game
//! - `game`: Frame driver tying the simulation, timers and presenter together
//! - `settings`: Field size, spawn cadence and cursor policy

pub mod game;
pub mod presenter;
pub mod schedule;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use presenter::{Hud, JsonLines, Presenter};
pub use settings::{CursorPolicy, Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Play field dimensions
    pub const FIELD_WIDTH: f32 = 400.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Safe circles double as the cursor size
    pub const SAFE_RADIUS: f32 = 20.0;
    /// Red circles are half the size of safe ones
    pub const HAZARD_RADIUS: f32 = 10.0;

    /// Catch distance is 1.5x the safe radius
    pub const CATCH_FACTOR: f32 = 1.5;
    /// Red circles hit at the safe radius, not their own
    pub const HAZARD_HIT_DISTANCE: f32 = SAFE_RADIUS;

    /// Missed safe circles allowed before the run ends
    pub const MAX_MISSED: u32 = 10;

    /// Score needed per speed step
    pub const SCORE_PER_SPEED_STEP: u32 = 15;
    pub const MAX_SPEED: u32 = 7;

    /// Units per tick at speed 1
    pub const SAFE_RISE_PER_SPEED: f32 = 2.0;
    pub const HAZARD_RISE_PER_SPEED: f32 = 1.0;

    /// Spawn cadence
    pub const SAFE_SPAWN_INTERVAL_MS: u32 = 1000;
    pub const HAZARD_SPAWN_INTERVAL_MS: u32 = 2000;

    /// Lerp factor for `CursorPolicy::Smooth`
    pub const CURSOR_SMOOTHING: f32 = 0.5;
    /// Cursor starts this far above the bottom edge
    pub const CURSOR_START_OFFSET: f32 = 100.0;

    /// Longest frame the driver will simulate in one go
    pub const MAX_FRAME_MS: f64 = 100.0;
    /// Nominal frame length at 60 Hz
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
}

/// Speed is derived from score alone: one step per 15 points, capped at 7.
#[inline]
pub fn speed_for_score(score: u32) -> u32 {
    (1 + score / consts::SCORE_PER_SPEED_STEP).min(consts::MAX_SPEED)
}
