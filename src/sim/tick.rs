//! Per-frame simulation tick
//!
//! Core game loop: move the cursor, rise and resolve safe targets, then rise
//! and resolve hazards. Movement is in units per tick, so the caller must
//! tick exactly once per rendered frame.

use glam::Vec2;

use super::collision::{circles_touch, clamp_to_field};
use super::state::{GameEvent, GameOverReason, GameState, RemovalCause};
use crate::consts::*;

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Raw pointer position in field coordinates (None = pointer unchanged)
    pub pointer: Option<Vec2>,
}

impl TickInput {
    pub fn pointer(x: f32, y: f32) -> Self {
        Self {
            pointer: Some(Vec2::new(x, y)),
        }
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.is_game_over() {
        return;
    }

    state.time_ticks += 1;

    // Cursor
    if let Some(pointer) = input.pointer {
        let target = clamp_to_field(pointer, state.field, SAFE_RADIUS);
        state.cursor.follow(target, state.cursor_policy);
        state.push_event(GameEvent::CursorMoved {
            pos: state.cursor.pos,
        });
    }
    let cursor = state.cursor.pos;

    // Safe targets, newest first so removal keeps earlier indices valid
    let catch_distance = SAFE_RADIUS * CATCH_FACTOR;
    for i in (0..state.safe_targets.len()).rev() {
        let rise = SAFE_RISE_PER_SPEED * state.speed as f32;
        let target = &mut state.safe_targets[i];
        target.pos.y -= rise;
        let (id, pos) = (target.id, target.pos);

        if circles_touch(pos, cursor, catch_distance) {
            state.safe_targets.remove(i);
            log::debug!("Caught #{}", id);
            state.push_event(GameEvent::Removed {
                id,
                cause: RemovalCause::Caught,
            });
            state.add_point();
        } else if pos.y < 0.0 {
            state.safe_targets.remove(i);
            log::debug!("Missed #{}", id);
            state.push_event(GameEvent::Removed {
                id,
                cause: RemovalCause::Missed,
            });
            if state.add_miss() {
                return;
            }
        } else {
            state.push_event(GameEvent::Moved { id, pos });
        }
    }

    // Hazards; the hit test uses the cursor's radius, not the hazard's
    let rise = HAZARD_RISE_PER_SPEED * state.speed as f32;
    for i in (0..state.hazard_targets.len()).rev() {
        let target = &mut state.hazard_targets[i];
        target.pos.y -= rise;
        let (id, pos) = (target.id, target.pos);

        if circles_touch(pos, cursor, HAZARD_HIT_DISTANCE) {
            state.push_event(GameEvent::Moved { id, pos });
            state.end_game(GameOverReason::HitHazard);
            return;
        }

        if pos.y < 0.0 {
            state.hazard_targets.remove(i);
            state.push_event(GameEvent::Removed {
                id,
                cause: RemovalCause::Exited,
            });
        } else {
            state.push_event(GameEvent::Moved { id, pos });
        }
    }
}
