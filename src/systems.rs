//! The per-frame steps a body goes through, split out of [`crate::body::advance`]
//! so each can be checked on its own.

use glam::DVec2;

use crate::components::{Bounds, Color};

/// Picks this frame's display colour and counts the flash down by one.
pub fn decay_flash(countdown: &mut u32, original: Color, flash: Color) -> Color {
    if *countdown > 0 {
        *countdown -= 1;
        flash
    } else {
        original
    }
}

/// One unit time step per frame, no dt scaling.
#[inline]
pub fn update_position(pos: &mut DVec2, vel: DVec2) {
    *pos += vel;
}

/// Flips each velocity axis whose leading edge is past the bounds.
/// Both axes are checked every frame.
pub fn check_wall_collision(pos: DVec2, vel: &mut DVec2, radius: f64, bounds: Bounds) {
    if pos.x + radius > bounds.width || pos.x - radius < 0.0 {
        vel.x = -vel.x;
    }

    if pos.y + radius > bounds.height || pos.y - radius < 0.0 {
        vel.y = -vel.y;
    }
}

/// Keeps the whole circle inside the bounds, independent of any reflection.
pub fn clamp_to_bounds(pos: &mut DVec2, radius: f64, bounds: Bounds) {
    // on an axis shorter than the diameter the near edge wins
    pos.x = pos.x.min(bounds.width - radius).max(radius);
    pos.y = pos.y.min(bounds.height - radius).max(radius);
}
