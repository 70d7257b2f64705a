//! Row-major floor and ceiling casting.
//!
//! The floor distance is constant across a screen row, so each row needs
//! one division and a fixed per-column increment instead of a second DDA.
//! The ceiling reuses the same intersection mirrored above the horizon,
//! and is only drawn where the cell carries a ceiling texture id; open
//! cells keep whatever the sky pass emitted underneath.

use super::Frame;
use crate::sim::CameraState;
use crate::world::{AtlasSet, TileGrid};

/// Cast every floor/ceiling row below (and mirrored above) the horizon.
pub fn cast_planes(state: &CameraState, grid: &TileGrid, atlases: &AtlasSet, frame: &mut Frame) {
    let (res_x, res_y) = (frame.width(), frame.height());
    let half = res_y / 2;
    let floor_tile = atlases.floor.tile_size();
    let ceil_tile = atlases.ceiling.tile_size();

    // rays through the left and right screen edges
    let ray0 = state.dir - state.plane;
    let ray1 = state.dir + state.plane;

    // the horizon row itself (y == half) would divide by zero; skip it
    for y in (half + 1)..res_y {
        let row_dist = half as f64 / (y - half) as f64;
        let step = (ray1 - ray0) * (row_dist / res_x as f64);
        let mut pos = state.pos + ray0 * row_dist;

        for x in 0..res_x {
            let cell_x = pos.x.floor();
            let cell_y = pos.y.floor();
            let cell = grid.cell_clamped(cell_x as i32, cell_y as i32);

            if cell.floor != 0 {
                let tx = ((pos.x - cell_x) * floor_tile as f64) as usize;
                let ty = ((pos.y - cell_y) * floor_tile as f64) as usize;
                frame.push_scaled(x, y, atlases.floor.flat_texel(tx, ty));
            }
            if cell.ceiling != 0 {
                let tx = ((pos.x - cell_x) * ceil_tile as f64) as usize;
                let ty = ((pos.y - cell_y) * ceil_tile as f64) as usize;
                frame.push_scaled(x, res_y - y - 1, atlases.ceiling.flat_texel(tx, ty));
            }
            pos += step;
        }
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
