//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One update per rendered frame, no wall-clock reads
//! - Seeded RNG only
//! - Stable iteration order (spawn order, walked in reverse for removal)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{circles_touch, clamp_to_field};
pub use state::{
    Cursor, Field, GameEvent, GameOverReason, GamePhase, GameState, RemovalCause, Target,
    TargetKind,
};
pub use tick::{TickInput, tick};
