use std::time::{Duration, Instant};

use super::camera::CameraState;
use super::step::step;
use crate::world::TileGrid;

/// Logical simulation rate, decoupled from the render rate.
pub const SIM_FPS: u32 = 32;
const TIC: Duration = Duration::from_micros(1_000_000 / SIM_FPS as u64);

/// Accumulates real elapsed time and fires [`step`] at the fixed rate.
///
/// At most one tick runs per `pump` call: if a frame briefly takes longer
/// than a tick the simulation falls slightly behind real time instead of
/// bursting to catch up.
pub struct TicRunner {
    last: Instant,
    acc: Duration,
}

impl Default for TicRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl TicRunner {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            acc: Duration::ZERO,
        }
    }

    /// Fold the real time since the previous call into the accumulator and
    /// run a tick if one is due.  Returns the (possibly unchanged) state.
    pub fn pump(&mut self, state: &CameraState, grid: &TileGrid) -> CameraState {
        let now = Instant::now();
        let elapsed = now - self.last;
        self.last = now;
        self.advance(elapsed, state, grid)
    }

    /// Deterministic core of [`Self::pump`] with an explicit time delta.
    pub fn advance(&mut self, dt: Duration, state: &CameraState, grid: &TileGrid) -> CameraState {
        self.acc += dt;
        if self.acc >= TIC {
            self.acc -= TIC;
            step(state, grid)
        } else {
            *state
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_tick_before_threshold() {
        let grid = TileGrid::demo();
        let cam = CameraState::new();
        let mut runner = TicRunner::new();
        let out = runner.advance(Duration::from_millis(10), &cam, &grid);
        assert_eq!(out.tick, 0);
    }

    #[test]
    fn one_tick_when_threshold_crossed() {
        let grid = TileGrid::demo();
        let cam = CameraState::new();
        let mut runner = TicRunner::new();
        let out = runner.advance(Duration::from_millis(40), &cam, &grid);
        assert_eq!(out.tick, 1);
    }

    #[test]
    fn at_most_one_tick_per_call() {
        let grid = TileGrid::demo();
        let cam = CameraState::new();
        let mut runner = TicRunner::new();
        // a 10-tick stall still advances the simulation by a single tick
        let out = runner.advance(Duration::from_millis(320), &cam, &grid);
        assert_eq!(out.tick, 1);
    }

    #[test]
    fn residue_carries_to_next_call() {
        let grid = TileGrid::demo();
        let cam = CameraState::new();
        let mut runner = TicRunner::new();
        let out = runner.advance(Duration::from_millis(20), &cam, &grid);
        let out = runner.advance(Duration::from_millis(20), &out, &grid);
        assert_eq!(out.tick, 1);
    }
}
