//! Wolfenstein-style software raycaster.
//!
//! * [`world`] — the bordered tile grid and the texture atlases.
//! * [`sim`] — camera state and its fixed-rate update (rotation, movement,
//!   per-axis collision).
//! * [`renderer`] — the raycasting pipeline: DDA walls, row-major
//!   floor/ceiling casting, panoramic sky, point-replication upscaling.
//! * [`session`] — ties the above together and caches frames per tick.
//!
//! The renderer emits an ordered list of colored screen points; drawing
//! them (and chunking them into host-sized batches) is the presenter's
//! job, not ours.

pub mod renderer;
pub mod session;
pub mod sim;
pub mod world;

pub use renderer::{Frame, Rgba, ScreenPoint, cast_frame};
pub use session::{Session, SessionError};
pub use sim::{CameraState, InputFlags, SIM_FPS, TicRunner};
pub use world::{AtlasSet, Cell, GridError, TextureAtlas, TileGrid, TileId};
