mod camera;
mod input;
mod step;
mod tic;

pub use camera::{CameraState, INITIAL_DIR, INITIAL_PLANE, INITIAL_POS, Snapshot};
pub use input::InputFlags;
pub use step::{DEADZONE, MOVE_SPEED, ROT_SPEED, step, try_move};
pub use tic::{SIM_FPS, TicRunner};
