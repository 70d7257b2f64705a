use bincode::{Decode, Encode};
use glam::DVec2;

use super::input::InputFlags;

/// Starting pose of every new session: deep in the open half of the map,
/// facing -X, with |plane|/|dir| = 0.66 (~66 degrees of horizontal FoV).
pub const INITIAL_POS: DVec2 = DVec2::new(22.0, 12.0);
pub const INITIAL_DIR: DVec2 = DVec2::new(-1.0, 0.0);
pub const INITIAL_PLANE: DVec2 = DVec2::new(0.0, 0.66);

/// Player view-point in grid space.
///
/// A plain value: the simulation takes one in and hands a new one back
/// each tick, the raycaster only reads it.  `dir` need not be exactly
/// unit length; only its ratio to `plane` matters for the projection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraState {
    /// Grid-space position, always strictly inside the walkable bounds.
    pub pos: DVec2,
    /// Facing direction.
    pub dir: DVec2,
    /// Camera plane, perpendicular-ish to `dir`; its magnitude encodes FoV.
    pub plane: DVec2,
    /// Simulation step counter; the renderer watches this to know when
    /// new geometry exists.
    pub tick: u64,
    /// Keys currently held, written by the input collaborator.
    pub input: InputFlags,
}

impl CameraState {
    pub fn new() -> Self {
        Self {
            pos: INITIAL_POS,
            dir: INITIAL_DIR,
            plane: INITIAL_PLANE,
            tick: 0,
            input: InputFlags::empty(),
        }
    }

    /// Wire/storage form for the session collaborator.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            pos_x: self.pos.x,
            pos_y: self.pos.y,
            dir_x: self.dir.x,
            dir_y: self.dir.y,
            plane_x: self.plane.x,
            plane_y: self.plane.y,
            input: self.input.bits(),
            tick: self.tick,
        }
    }

    pub fn from_snapshot(snap: &Snapshot) -> Self {
        Self {
            pos: DVec2::new(snap.pos_x, snap.pos_y),
            dir: DVec2::new(snap.dir_x, snap.dir_y),
            plane: DVec2::new(snap.plane_x, snap.plane_y),
            tick: snap.tick,
            input: InputFlags::from_bits_truncate(snap.input),
        }
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable camera snapshot: six doubles, the input bits and the tick.
#[derive(Clone, Copy, Debug, PartialEq, Encode, Decode)]
pub struct Snapshot {
    pub pos_x: f64,
    pub pos_y: f64,
    pub dir_x: f64,
    pub dir_y: f64,
    pub plane_x: f64,
    pub plane_y: f64,
    pub input: u8,
    pub tick: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_round_trip() {
        let mut cam = CameraState::new();
        cam.pos = DVec2::new(3.25, 17.5);
        cam.tick = 42;
        cam.input = InputFlags::UP | InputFlags::FIRE;

        let bytes = bincode::encode_to_vec(cam.snapshot(), bincode::config::standard()).unwrap();
        let (snap, _): (Snapshot, usize) =
            bincode::decode_from_slice(&bytes, bincode::config::standard()).unwrap();
        assert_eq!(CameraState::from_snapshot(&snap), cam);
    }

    #[test]
    fn initial_pose_matches_arcade() {
        let cam = CameraState::default();
        assert_eq!(cam.pos, DVec2::new(22.0, 12.0));
        assert_eq!(cam.dir, DVec2::new(-1.0, 0.0));
        assert_eq!(cam.plane, DVec2::new(0.0, 0.66));
        assert_eq!(cam.tick, 0);
    }
}
