//! The raycasting pipeline.
//!
//! *The simulation never touches a pixel; the presenter never touches the
//! grid.*  Everything meets in [`cast_frame`], a pure function from
//! (camera, grid, atlases) to an ordered list of colored screen points.
//!
//! Emission order is the painter's algorithm: sky rows first, then
//! floor/ceiling rows, then wall columns.  A presenter that draws the
//! points in order needs no depth buffer.

use crate::sim::CameraState;
use crate::world::{AtlasSet, TileGrid};

pub mod planes;
pub mod raycast;
pub mod sky;

/// Pixel format of emitted points (0xAARRGGBB).
pub type Rgba = u32;

/// Halve the RGB channels, keeping alpha.  Cheap directional shading that
/// separates N/S wall faces from E/W ones.
#[inline]
pub fn shade(color: Rgba) -> Rgba {
    (color & 0xFF00_0000) | ((color >> 1) & 0x007F_7F7F)
}

/// One colored pixel in display space.  Later points with the same
/// position win; identity is positional only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenPoint {
    pub x: u16,
    pub y: u16,
    pub color: Rgba,
}

/// Point buffer for one rendered frame.
///
/// The caster works at a low internal resolution; every internal pixel is
/// replicated into a `scale x scale` block of display-space points
/// (nearest-neighbor upscaling by emission, not by filtering).  The
/// presenter gets a restartable read-only view and may chunk it into as
/// many draw batches as its host API needs.
#[derive(Clone, Debug)]
pub struct Frame {
    width: usize,
    height: usize,
    scale: usize,
    points: Vec<ScreenPoint>,
}

impl Frame {
    pub fn new(width: usize, height: usize, scale: usize) -> Self {
        assert!(width > 0 && height > 0 && scale > 0);
        Self {
            width,
            height,
            scale,
            // steady-state frames fill most of the internal resolution
            points: Vec::with_capacity(width * height * scale * scale),
        }
    }

    /// Internal (pre-upscale) resolution.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn scale(&self) -> usize {
        self.scale
    }

    /// Display-space resolution the points are emitted in.
    #[inline]
    pub fn out_width(&self) -> usize {
        self.width * self.scale
    }

    #[inline]
    pub fn out_height(&self) -> usize {
        self.height * self.scale
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Emitted points in painter order.  Slices are restartable: the
    /// presenter can iterate as many times as it likes.
    #[inline]
    pub fn points(&self) -> &[ScreenPoint] {
        &self.points
    }

    /// Emit one internal pixel as a `scale x scale` block of points.
    #[inline]
    pub(crate) fn push_scaled(&mut self, x: usize, y: usize, color: Rgba) {
        debug_assert!(x < self.width && y < self.height);
        let (bx, by) = (x * self.scale, y * self.scale);
        for dy in 0..self.scale {
            for dx in 0..self.scale {
                self.points.push(ScreenPoint {
                    x: (bx + dx) as u16,
                    y: (by + dy) as u16,
                    color,
                });
            }
        }
    }
}

/// Cast one full frame into `frame` (which is cleared first).
///
/// Pure with respect to its inputs: the same camera tick always produces
/// the same points, so callers may cache the result between ticks.
pub fn cast_frame(state: &CameraState, grid: &TileGrid, atlases: &AtlasSet, frame: &mut Frame) {
    frame.clear();
    sky::cast_sky(state, &atlases.sky, frame);
    planes::cast_planes(state, grid, atlases, frame);
    raycast::cast_walls(state, grid, &atlases.wall, frame);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::AtlasSet;

    #[test]
    fn shade_halves_rgb_keeps_alpha() {
        assert_eq!(shade(0xFF80_4020), 0xFF40_2010);
        assert_eq!(shade(0xFFFF_FFFF), 0xFF7F_7F7F);
    }

    #[test]
    fn push_scaled_replicates_block() {
        let mut frame = Frame::new(4, 4, 2);
        frame.push_scaled(1, 2, 0xFF12_3456);
        let pts = frame.points();
        assert_eq!(pts.len(), 4);
        let mut seen: Vec<(u16, u16)> = pts.iter().map(|p| (p.x, p.y)).collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![(2, 4), (2, 5), (3, 4), (3, 5)]);
        assert!(pts.iter().all(|p| p.color == 0xFF12_3456));
    }

    #[test]
    fn full_frame_emits_in_painter_order() {
        let state = CameraState::new();
        let grid = TileGrid::demo();
        let atlases = AtlasSet::fallback();
        let mut frame = Frame::new(80, 60, 1);
        cast_frame(&state, &grid, &atlases, &mut frame);
        assert!(!frame.points().is_empty());
        // every display coordinate stays inside the declared output size
        assert!(
            frame
                .points()
                .iter()
                .all(|p| (p.x as usize) < frame.out_width() && (p.y as usize) < frame.out_height())
        );
    }

    #[test]
    fn same_tick_same_points() {
        let state = CameraState::new();
        let grid = TileGrid::demo();
        let atlases = AtlasSet::fallback();
        let mut a = Frame::new(40, 30, 1);
        let mut b = Frame::new(40, 30, 1);
        cast_frame(&state, &grid, &atlases, &mut a);
        cast_frame(&state, &grid, &atlases, &mut b);
        assert_eq!(a.points(), b.points());
    }
}
