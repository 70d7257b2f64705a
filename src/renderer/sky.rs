//! Panoramic sky projection.
//!
//! The sky is not ray-marched: the camera's facing angle picks a scroll
//! offset into a 360-degree panorama, and each screen column advances a
//! fixed angular fraction of the texture width.  The pass fills the whole
//! upper half of the screen; ceiling and wall points drawn later cover it
//! wherever the map has a roof.

use glam::DVec2;

use super::Frame;
use crate::sim::CameraState;
use crate::world::TextureAtlas;

/// Facing angle normalized to [0, 1) across a full rotation.
pub fn scroll_factor(dir: DVec2) -> f64 {
    dir.y.atan2(dir.x).to_degrees().rem_euclid(360.0) / 360.0
}

/// Horizontal field of view in degrees, from the plane/dir magnitude ratio.
pub fn fov_degrees(dir: DVec2, plane: DVec2) -> f64 {
    2.0 * (plane.length() / dir.length()).atan().to_degrees()
}

/// Fill every row above the horizon from the panorama.
pub fn cast_sky(state: &CameraState, atlas: &TextureAtlas, frame: &mut Frame) {
    let (res_x, res_y) = (frame.width(), frame.height());
    let half = res_y / 2;
    if half == 0 {
        return;
    }
    let tex_w = atlas.width() as f64;
    let tex_h = atlas.height();

    let scroll = scroll_factor(state.dir);
    let fov = fov_degrees(state.dir, state.plane);
    // texels per screen column; the visible span is FOV/360 of the panorama
    let du = fov / 360.0 * tex_w / res_x as f64;
    let u_start = ((1.0 - scroll) * tex_w).rem_euclid(tex_w);

    for y in 0..half {
        let v = y * tex_h / half;
        let mut u = u_start;
        for x in 0..res_x {
            // explicit wraparound: the span may cross the right texture
            // edge once, continue from the left edge
            if u >= tex_w {
                u -= tex_w;
            }
            frame.push_scaled(x, y, atlas.texel(u as usize, v));
            u += du;
        }
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_factor_cardinal_directions() {
        assert!(scroll_factor(DVec2::new(1.0, 0.0)).abs() < 1e-12);
        assert!((scroll_factor(DVec2::new(0.0, 1.0)) - 0.25).abs() < 1e-12);
        assert!((scroll_factor(DVec2::new(-1.0, 0.0)) - 0.5).abs() < 1e-12);
        assert!((scroll_factor(DVec2::new(0.0, -1.0)) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn scroll_factor_periodic_over_full_rotation() {
        let dir = DVec2::new(1.0, 0.0);
        let mut turned = dir;
        let rot = DVec2::from_angle(std::f64::consts::TAU / 360.0);
        for _ in 0..360 {
            turned = rot.rotate(turned);
        }
        let diff = (scroll_factor(dir) - scroll_factor(turned)).rem_euclid(1.0);
        assert!(diff < 1e-9 || diff > 1.0 - 1e-9);
    }

    #[test]
    fn fov_matches_plane_ratio() {
        // |plane|/|dir| = 0.66 is roughly a 66-degree cone
        let fov = fov_degrees(DVec2::new(-1.0, 0.0), DVec2::new(0.0, 0.66));
        assert!((fov - 66.8).abs() < 0.5);
    }

    #[test]
    fn fills_upper_half_exactly() {
        let state = CameraState::new();
        let atlas = TextureAtlas::fallback_sky();
        let mut frame = Frame::new(40, 30, 1);
        cast_sky(&state, &atlas, &mut frame);
        assert_eq!(frame.points().len(), 40 * 15);
        assert!(frame.points().iter().all(|p| p.y < 15));
    }

    #[test]
    fn wrapping_span_stays_in_texture() {
        // a small positive angle puts u_start near the right edge of the
        // panorama, so the visible span must wrap
        let state = CameraState {
            dir: DVec2::new(1.0, 0.01).normalize(),
            plane: DVec2::new(-0.0066, 0.66),
            ..CameraState::new()
        };
        let atlas = TextureAtlas::fallback_sky();
        let mut frame = Frame::new(64, 32, 1);
        cast_sky(&state, &atlas, &mut frame);
        assert_eq!(frame.points().len(), 64 * 16);
    }
}
