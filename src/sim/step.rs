//! The fixed-rate camera update: rotation, movement, collision.
//!
//! `step` is a pure value-in/value-out function so it can be tested in
//! isolation and replayed deterministically; the session owns the state
//! and stores whatever comes back.

use glam::DVec2;

use super::camera::CameraState;
use super::input::InputFlags;
use crate::world::TileGrid;

/// Radians turned per tick while LEFT/RIGHT is held.
pub const ROT_SPEED: f64 = 0.05;
/// Tiles travelled per tick while a movement key is held.
pub const MOVE_SPEED: f64 = 0.1;
/// Lookahead added in the direction of travel when probing for walls, so
/// the camera never rounds onto a wall boundary.
pub const DEADZONE: f64 = 0.5;

/// Advance the camera by one simulation tick.
///
/// FIRE, USE and SWITCH are read but change nothing here; they are
/// reserved for collaborator systems.  The tick counter increments
/// exactly once, whether or not any key was held.
pub fn step(state: &CameraState, grid: &TileGrid) -> CameraState {
    let mut next = *state;
    let input = state.input;

    /* rotation: plain LEFT/RIGHT spins the whole view cone rigidly */
    if !input.rotation_suppressed() {
        if input.contains(InputFlags::LEFT) {
            rotate(&mut next, ROT_SPEED);
        }
        if input.contains(InputFlags::RIGHT) {
            rotate(&mut next, -ROT_SPEED);
        }
    }

    /* movement: forward/back along dir, strafe along its perpendicular */
    let mut wish = DVec2::ZERO;
    if input.contains(InputFlags::UP) {
        wish += next.dir;
    }
    if input.contains(InputFlags::DOWN) {
        wish -= next.dir;
    }
    if input.contains(InputFlags::STRAFE) {
        if input.contains(InputFlags::LEFT) {
            wish += next.dir.perp();
        }
        if input.contains(InputFlags::RIGHT) {
            wish -= next.dir.perp();
        }
    }
    if wish != DVec2::ZERO {
        next.pos = try_move(next.pos, wish * MOVE_SPEED, grid);
    }

    next.tick = state.tick + 1;
    next
}

/// Rotate facing and camera plane together by `angle` radians.
#[inline]
fn rotate(state: &mut CameraState, angle: f64) {
    let rot = DVec2::from_angle(angle);
    state.dir = rot.rotate(state.dir);
    state.plane = rot.rotate(state.plane);
}

/// Apply `delta` to `pos` with per-axis collision checks.
///
/// Each axis is probed and applied independently: running diagonally into
/// a wall blocks only the offending axis, so the camera slides along the
/// wall instead of sticking to it.
pub fn try_move(pos: DVec2, delta: DVec2, grid: &TileGrid) -> DVec2 {
    let mut out = pos;
    if delta.x != 0.0 {
        let probe = pos.x + delta.x + DEADZONE * delta.x.signum();
        if grid.is_walkable(probe.floor() as i32, pos.y.floor() as i32) {
            out.x += delta.x;
        }
    }
    if delta.y != 0.0 {
        let probe = pos.y + delta.y + DEADZONE * delta.y.signum();
        if grid.is_walkable(pos.x.floor() as i32, probe.floor() as i32) {
            out.y += delta.y;
        }
    }
    out
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
