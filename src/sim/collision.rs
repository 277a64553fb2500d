//! Collision checks for circles on a flat field
//!
//! Every entity in the game is a circle, so a hit is just a distance test
//! against a threshold. The threshold is chosen by the caller because the
//! catch and hazard rules do not use the drawn radii.

use glam::Vec2;

use super::state::Field;

/// True when the centres are strictly closer than `threshold`
#[inline]
pub fn circles_touch(a: Vec2, b: Vec2, threshold: f32) -> bool {
    a.distance(b) < threshold
}

/// Clamp a point into the field, keeping `margin` clear of every edge
#[inline]
pub fn clamp_to_field(point: Vec2, field: Field, margin: f32) -> Vec2 {
    let min = Vec2::splat(margin);
    let max = Vec2::new(field.width - margin, field.height - margin);
    point.clamp(min, max)
}
