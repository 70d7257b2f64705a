//! One playable arcade session: grid + atlases + camera + cached frame.
//!
//! The session is the single caller of the simulation, so the camera is
//! only ever mutated here, once per tick, and read everywhere else.  The
//! expensive raycast reruns only when the tick counter moved; between
//! ticks `render` hands back the cached frame for free.

use std::time::Duration;

use crate::renderer::{Frame, cast_frame};
use crate::sim::{CameraState, InputFlags, Snapshot, TicRunner};
use crate::world::{AtlasSet, TileGrid};

/// Snapshot (de)serialization failures, surfaced to the session/network
/// collaborator.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("failed to encode camera snapshot: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    #[error("failed to decode camera snapshot: {0}")]
    Decode(#[from] bincode::error::DecodeError),
}

pub struct Session {
    grid: TileGrid,
    atlases: AtlasSet,
    camera: CameraState,
    runner: TicRunner,
    frame: Frame,
    rendered_tick: Option<u64>,
}

impl Session {
    /// Start a session over pre-loaded assets at the fixed initial pose.
    pub fn new(grid: TileGrid, atlases: AtlasSet, width: usize, height: usize, scale: usize) -> Self {
        Self {
            grid,
            atlases,
            camera: CameraState::new(),
            runner: TicRunner::new(),
            frame: Frame::new(width, height, scale),
            rendered_tick: None,
        }
    }

    /// The built-in map with procedural atlases; what the arcade shows
    /// when the loading collaborator supplies nothing.
    pub fn demo(width: usize, height: usize, scale: usize) -> Self {
        Self::new(TileGrid::demo(), AtlasSet::fallback(), width, height, scale)
    }

    #[inline]
    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    #[inline]
    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Replace the held-keys bitset; called by the input collaborator on
    /// key-down/key-up.
    pub fn set_input(&mut self, input: InputFlags) {
        self.camera.input = input;
    }

    /// Fold real elapsed time into the simulation (at most one tick).
    pub fn update(&mut self) {
        self.camera = self.runner.pump(&self.camera, &self.grid);
    }

    /// Deterministic variant of [`Self::update`] with an explicit delta.
    pub fn advance(&mut self, dt: Duration) {
        self.camera = self.runner.advance(dt, &self.camera, &self.grid);
    }

    /// Borrow the current frame, recasting only if the simulation ticked
    /// since the last call.
    pub fn render(&mut self) -> &Frame {
        if self.rendered_tick != Some(self.camera.tick) {
            cast_frame(&self.camera, &self.grid, &self.atlases, &mut self.frame);
            self.rendered_tick = Some(self.camera.tick);
        }
        &self.frame
    }

    /// Drop the player back at the initial pose with a fresh tick count.
    pub fn reset(&mut self) {
        self.camera = CameraState::new();
        self.rendered_tick = None;
    }

    /// Serialize the camera for the session/network collaborator.
    pub fn snapshot(&self) -> Result<Vec<u8>, SessionError> {
        let bytes = bincode::encode_to_vec(self.camera.snapshot(), bincode::config::standard())?;
        Ok(bytes)
    }

    /// Adopt a previously serialized camera (spectator catch-up, resume).
    pub fn restore(&mut self, bytes: &[u8]) -> Result<(), SessionError> {
        let (snap, _): (Snapshot, usize) =
            bincode::decode_from_slice(bytes, bincode::config::standard())?;
        self.camera = CameraState::from_snapshot(&snap);
        self.rendered_tick = None;
        Ok(())
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
