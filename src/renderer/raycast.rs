//! DDA wall casting: one ray per screen column.

use glam::DVec2;

use super::{Frame, shade};
use crate::sim::CameraState;
use crate::world::{TextureAtlas, TileGrid, TileId};

/// Perpendicular distances are clamped away from zero so a ray starting
/// flush against a wall cannot produce an infinite column height.
const MIN_PERP_DIST: f64 = 1e-6;

/// Which gridline family the terminating DDA step crossed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    X,
    Y,
}

/// Result of walking one ray through the grid.
#[derive(Clone, Copy, Debug)]
pub struct RayHit {
    pub wall_id: TileId,
    pub side: Side,
    /// Distance measured along the camera plane's normal, not the ray
    /// itself; projecting with it avoids the fisheye effect.
    pub perp_dist: f64,
    /// Fractional hit coordinate along the wall face, in [0, 1).
    pub wall_x: f64,
    /// Grid cells stepped before the hit.
    pub steps: usize,
}

/// Walk `ray` from `pos` until it lands in a cell with a non-zero wall id.
///
/// The solid border guarantees termination.  A zero ray component gets an
/// infinite initial side distance so its axis simply never wins a step;
/// this also dodges the 0 * inf = NaN that the raw IEEE formulation would
/// produce when the camera sits exactly on a gridline.
pub fn trace(pos: DVec2, ray: DVec2, grid: &TileGrid) -> RayHit {
    debug_assert!(ray != DVec2::ZERO, "degenerate ray");
    let mut map_x = pos.x.floor() as i32;
    let mut map_y = pos.y.floor() as i32;

    let delta_x = (1.0 / ray.x).abs(); // +inf for ray.x == 0, never NaN
    let delta_y = (1.0 / ray.y).abs();

    let (step_x, mut side_x) = if ray.x == 0.0 {
        (0, f64::INFINITY)
    } else if ray.x < 0.0 {
        (-1, (pos.x - map_x as f64) * delta_x)
    } else {
        (1, (map_x as f64 + 1.0 - pos.x) * delta_x)
    };
    let (step_y, mut side_y) = if ray.y == 0.0 {
        (0, f64::INFINITY)
    } else if ray.y < 0.0 {
        (-1, (pos.y - map_y as f64) * delta_y)
    } else {
        (1, (map_y as f64 + 1.0 - pos.y) * delta_y)
    };

    let mut side = Side::X;
    let mut steps = 0usize;
    let wall_id = loop {
        if side_x < side_y {
            side_x += delta_x;
            map_x += step_x;
            side = Side::X;
        } else {
            side_y += delta_y;
            map_y += step_y;
            side = Side::Y;
        }
        steps += 1;
        let id = grid.wall_at(map_x, map_y);
        if id != 0 {
            break id;
        }
    };

    // the last step overshot into the wall cell, back it out
    let perp_dist = match side {
        Side::X => side_x - delta_x,
        Side::Y => side_y - delta_y,
    }
    .max(MIN_PERP_DIST);

    let along = match side {
        Side::X => pos.y + perp_dist * ray.y,
        Side::Y => pos.x + perp_dist * ray.x,
    };

    RayHit {
        wall_id,
        side,
        perp_dist,
        wall_x: along - along.floor(),
        steps,
    }
}

/// Vertical extent of one projected wall column.
#[derive(Clone, Copy, Debug)]
pub struct WallSlice {
    /// Unclipped height in internal pixels.
    pub line_height: f64,
    pub draw_start: usize,
    pub draw_end: usize,
}

impl WallSlice {
    /// Project a hit onto a screen of `res_y` rows, centered on the
    /// horizon and clipped to the viewport.
    pub fn project(hit: &RayHit, res_y: usize) -> Self {
        let line_height = res_y as f64 / hit.perp_dist;
        let mid = res_y as f64 / 2.0;
        let half = line_height / 2.0;
        Self {
            line_height,
            draw_start: (mid - half).max(0.0) as usize,
            draw_end: (mid + half).min(res_y as f64 - 1.0) as usize,
        }
    }
}

/// Cast every wall column of the frame.
pub fn cast_walls(state: &CameraState, grid: &TileGrid, atlas: &TextureAtlas, frame: &mut Frame) {
    let (res_x, res_y) = (frame.width(), frame.height());
    let tile = atlas.tile_size();

    for x in 0..res_x {
        let camera_x = 2.0 * x as f64 / res_x as f64 - 1.0;
        let ray = state.dir + state.plane * camera_x;
        let hit = trace(state.pos, ray, grid);
        let slice = WallSlice::project(&hit, res_y);

        let tex_x = ((hit.wall_x * tile as f64) as usize).min(tile - 1);
        let tex_step = tile as f64 / slice.line_height;
        // texel row of the first drawn pixel; non-zero when the column is
        // taller than the screen and clipped at the top
        let mut tex_pos =
            (slice.draw_start as f64 - res_y as f64 / 2.0 + slice.line_height / 2.0) * tex_step;

        for y in slice.draw_start..=slice.draw_end {
            let tex_y = (tex_pos.max(0.0) as usize).min(tile - 1);
            tex_pos += tex_step;
            let mut color = atlas.wall_texel(hit.wall_id, tex_x, tex_y);
            if hit.side == Side::Y {
                color = shade(color);
            }
            frame.push_scaled(x, y, color);
        }
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Cell;

    fn empty_room(w: usize, h: usize) -> TileGrid {
        let mut cells = vec![
            Cell {
                wall: 0,
                ceiling: 0,
                floor: 1
            };
            w * h
        ];
        for x in 0..w {
            for y in 0..h {
                if x == 0 || y == 0 || x == w - 1 || y == h - 1 {
                    cells[x + y * w].wall = 1;
                }
            }
        }
        TileGrid::new(w, h, cells).unwrap()
    }

    #[test]
    fn analytic_perpendicular_distance() {
        let grid = empty_room(5, 5);
        let hit = trace(DVec2::new(2.5, 2.5), DVec2::new(1.0, 0.0), &grid);
        assert_eq!(hit.side, Side::X);
        assert!((hit.perp_dist - 1.5).abs() < 1e-12);
        assert_eq!(hit.wall_id, 1);

        let slice = WallSlice::project(&hit, 240);
        assert!((slice.line_height - 160.0).abs() < 1e-9);
        assert_eq!(slice.draw_start, 40);
        assert_eq!(slice.draw_end, 200);
        // draw span is centered on the horizon
        assert_eq!((slice.draw_start + slice.draw_end) / 2, 120);
    }

    #[test]
    fn corner_ray_is_finite_and_positive() {
        let grid = empty_room(5, 5);
        // aimed exactly at the convex corner shared by four cells
        let hit = trace(DVec2::new(2.5, 2.5), DVec2::new(1.0, 1.0), &grid);
        assert!(hit.perp_dist.is_finite());
        assert!(hit.perp_dist > 0.0);
        assert!(hit.wall_x.is_finite());
        assert_ne!(hit.wall_id, 0);
    }

    #[test]
    fn axis_aligned_rays_terminate() {
        let grid = empty_room(6, 6);
        for ray in [
            DVec2::new(0.0, 1.0),
            DVec2::new(0.0, -1.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(-1.0, 0.0),
        ] {
            let hit = trace(DVec2::new(2.5, 2.5), ray, &grid);
            assert!(hit.perp_dist.is_finite());
            assert_ne!(hit.wall_id, 0);
        }
    }

    #[test]
    fn gridline_camera_position_terminates() {
        let grid = empty_room(6, 6);
        // integer coordinate + zero ray component is the 0 * inf trap
        let hit = trace(DVec2::new(2.0, 2.5), DVec2::new(0.0, 1.0), &grid);
        assert!(hit.perp_dist.is_finite());
        assert_ne!(hit.wall_id, 0);
    }

    #[test]
    fn steps_bounded_by_grid_diameter() {
        let grid = TileGrid::demo();
        let pos = DVec2::new(12.5, 12.5);
        for i in 0..64 {
            let angle = i as f64 * std::f64::consts::TAU / 64.0;
            let hit = trace(pos, DVec2::from_angle(angle), &grid);
            assert!(hit.steps <= grid.diameter());
        }
    }

    #[test]
    fn wall_x_stays_fractional() {
        let grid = TileGrid::demo();
        let pos = DVec2::new(22.0, 12.0);
        for i in 0..32 {
            let angle = i as f64 * std::f64::consts::TAU / 32.0;
            let hit = trace(pos, DVec2::from_angle(angle), &grid);
            assert!((0.0..1.0).contains(&hit.wall_x));
        }
    }

    #[test]
    fn y_side_columns_are_shaded() {
        let grid = empty_room(5, 5);
        let state = CameraState {
            pos: DVec2::new(2.5, 2.5),
            dir: DVec2::new(0.0, 1.0), // facing a Y-side wall head on
            plane: DVec2::new(-0.66, 0.0),
            ..CameraState::new()
        };
        let atlas = TextureAtlas::fallback_walls();
        let mut frame = Frame::new(8, 8, 1);
        cast_walls(&state, &grid, &atlas, &mut frame);
        let center = frame
            .points()
            .iter()
            .find(|p| p.x == 4 && p.y == 4)
            .expect("center column must be drawn");
        let unshaded = atlas.wall_texel(1, 0, 0);
        let alt = atlas.wall_texel(1, 8, 8);
        assert!(center.color == shade(unshaded) || center.color == shade(alt));
    }
}
