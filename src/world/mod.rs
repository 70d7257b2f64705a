mod atlas;
mod grid;

pub use atlas::{AtlasError, AtlasSet, TextureAtlas};
pub use grid::{Cell, GridError, TileGrid, TileId};
