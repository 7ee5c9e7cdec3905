//! CPU mirror of `dot_screen.frag`.
//!
//! Every helper here matches the GLSL function of the same role line for line,
//! so the output modes can be checked without a GPU. The renderer never calls
//! into this module per pixel.

use glam::{Vec2, Vec3};

use crate::color;
use crate::mode::OutputMode;
use crate::uniforms::{DotUniforms, Resolution};

const BASE_DOT_RADIUS: f32 = 0.25;
const RADIAL_CENTER: Vec2 = Vec2::new(0.7, 1.1);
const DOT_OPACITY: f32 = 0.05;
const SENTINEL: Vec3 = Vec3::new(1.0, 0.0, 0.0);

/// Anything the shader can read trail intensity from.
pub trait TrailSampler {
    /// Intensity in `[0, 1]` at a surface UV.
    fn intensity(&self, uv: Vec2) -> f32;
}

/// A trail with no activity at all.
pub struct NoTrail;

impl TrailSampler for NoTrail {
    fn intensity(&self, _uv: Vec2) -> f32 {
        0.0
    }
}

/// GLSL `smoothstep`, including the reversed-edge form.
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Rotates about the UV midpoint. Uses the same column-major matrix as the
/// shader, so positive angles turn clockwise.
pub fn rotate(uv: Vec2, angle: f32) -> Vec2 {
    let (s, c) = angle.sin_cos();
    let p = uv - Vec2::splat(0.5);
    Vec2::new(c * p.x + s * p.y, -s * p.x + c * p.y) + Vec2::splat(0.5)
}

/// Maps screen UV onto the square that covers the viewport.
pub fn cover_uv(uv: Vec2, resolution: Resolution) -> Vec2 {
    let res = resolution.as_vec2();
    let s = res / res.x.max(res.y);
    ((uv - Vec2::splat(0.5)) * s + Vec2::splat(0.5)).clamp(Vec2::ZERO, Vec2::ONE)
}

pub fn sdf_circle(p: Vec2, r: f32) -> f32 {
    (p - Vec2::splat(0.5)).length() - r
}

/// 1 at the bottom edge, 0 at the top.
pub fn screen_mask(uv: Vec2) -> f32 {
    smoothstep(0.0, 1.0, 1.0 - uv.y)
}

pub fn radial_distance(uv: Vec2) -> f32 {
    (uv - RADIAL_CENTER).length()
}

pub fn radial_mask(distance: f32) -> f32 {
    smoothstep(0.5, 1.0, distance)
}

/// Ambient oscillation, in `[-1, 1]`.
pub fn wave(time: f32, distance: f32) -> f32 {
    (time * 2.0 + distance * 10.0).sin()
}

/// One cell of the tiled, rotated grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridCell {
    /// Integer cell coordinates in rotated space
    pub index: Vec2,
    /// Position inside the cell, `[0, 1)`
    pub local: Vec2,
    /// Cell center mapped back to unrotated UV
    pub center: Vec2,
}

pub fn grid_cell(rotated: Vec2, grid_size: f32, rotation: f32) -> GridCell {
    let scaled = rotated * grid_size;
    let index = scaled.floor();
    GridCell {
        index,
        local: scaled - index,
        center: rotate((index + Vec2::splat(0.5)) / grid_size, -rotation),
    }
}

/// Intermediate values of one fragment, one per debug output.
#[derive(Clone, Copy, Debug)]
pub struct Stages {
    pub composition: Vec3,
    pub grid_uv: Vec2,
    pub base_dot: f32,
    pub mouse: f32,
    pub wave: f32,
}

pub fn evaluate(frag_coord: Vec2, u: &DotUniforms, trail: &impl TrailSampler) -> Stages {
    let screen_uv = frag_coord / u.resolution.as_vec2();
    let uv = cover_uv(screen_uv, u.resolution);
    let rotated = rotate(uv, u.rotation());
    let cell = grid_cell(rotated, u.grid_size(), u.rotation());

    let base_dot = sdf_circle(cell.local, BASE_DOT_RADIUS);

    let dist = radial_distance(uv);
    let combined_mask = screen_mask(uv) * radial_mask(dist);
    let wave = wave(u.time, dist);

    let mouse = trail.intensity(cell.center).clamp(0.0, 1.0);

    let scale_influence = (mouse * 0.5).max(wave * 0.3);
    let dot_size = (dist.powi(2) * 0.3).min(0.3);
    let sdf_dot = sdf_circle(cell.local, dot_size * (1.0 + scale_influence * 0.5));
    let smooth_dot = smoothstep(0.05, 0.0, sdf_dot);

    let opacity_influence = (mouse * 1.5).max(wave * 0.5);
    let t = smooth_dot * combined_mask * DOT_OPACITY * (1.0 + opacity_influence * 3.5);

    Stages {
        composition: u.bg_color.lerp(u.dot_color, t),
        grid_uv: cell.local,
        base_dot,
        mouse,
        wave,
    }
}

/// Picks the color for a raw `u_mode` value; unknown values come out red.
pub fn select_output(mode: i32, stages: &Stages) -> Vec3 {
    match OutputMode::from_index(mode) {
        Some(OutputMode::Composition) => stages.composition,
        Some(OutputMode::Grid) => stages.grid_uv.extend(0.0),
        Some(OutputMode::Dots) => Vec3::splat(stages.base_dot),
        Some(OutputMode::MouseInfluence) => Vec3::splat(stages.mouse),
        Some(OutputMode::Gradient) => Vec3::splat(stages.wave),
        None => SENTINEL,
    }
}

/// Linear color of one fragment, before output encoding.
pub fn shade(frag_coord: Vec2, u: &DotUniforms, trail: &impl TrailSampler) -> Vec3 {
    select_output(u.mode().index(), &evaluate(frag_coord, u, trail))
}

/// What lands in the framebuffer: clamped and sRGB encoded, no tone mapping.
pub fn shade_srgb(frag_coord: Vec2, u: &DotUniforms, trail: &impl TrailSampler) -> Vec3 {
    color::encode_srgb(shade(frag_coord, u, trail).clamp(Vec3::ZERO, Vec3::ONE))
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_4, PI};

    use super::*;
    use crate::config::DotConfig;

    fn uniforms(width: f32, height: f32) -> DotUniforms {
        DotUniforms::from_config(&DotConfig::default(), Resolution::new(width, height)).unwrap()
    }

    #[test]
    fn smoothstep_matches_glsl_edges() {
        assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
        assert!((smoothstep(0.0, 1.0, 0.5) - 0.5).abs() < 1e-6);
        // reversed edges invert the ramp
        assert_eq!(smoothstep(0.05, 0.0, -0.1), 1.0);
        assert_eq!(smoothstep(0.05, 0.0, 0.1), 0.0);
    }

    #[test]
    fn rotation_keeps_midpoint_fixed() {
        for i in 0..16 {
            let angle = i as f32 * PI / 8.0;
            let c = rotate(Vec2::splat(0.5), angle);
            assert!((c - Vec2::splat(0.5)).length() < 1e-6);
        }
    }

    #[test]
    fn cover_uv_is_identity_on_square_viewports() {
        let res = Resolution::new(512.0, 512.0);
        let uv = Vec2::new(0.3, 0.8);
        assert!((cover_uv(uv, res) - uv).length() < 1e-6);
    }

    #[test]
    fn cover_uv_squeezes_the_short_axis() {
        let res = Resolution::new(200.0, 100.0);
        let top = cover_uv(Vec2::new(0.5, 1.0), res);
        assert!((top.y - 0.75).abs() < 1e-6);
        let right = cover_uv(Vec2::new(1.0, 0.5), res);
        assert!((right.x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn grid_cell_center_sits_inside_its_cell() {
        let rotation = FRAC_PI_4;
        let rotated = rotate(Vec2::new(0.41, 0.63), rotation);
        let cell = grid_cell(rotated, 20.0, rotation);
        let back = rotate(cell.center, rotation) * 20.0;
        assert!((back - (cell.index + Vec2::splat(0.5))).length() < 1e-4);
    }

    #[test]
    fn unknown_mode_is_solid_red() {
        let u = uniforms(64.0, 64.0);
        let stages = evaluate(Vec2::new(10.0, 10.0), &u, &NoTrail);
        assert_eq!(select_output(9, &stages), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(select_output(-3, &stages), Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn composition_stays_between_the_two_colors() {
        let mut u = uniforms(320.0, 180.0);
        u.time = 1.7;
        for y in (0..180).step_by(7) {
            for x in (0..320).step_by(11) {
                let c = shade(Vec2::new(x as f32 + 0.5, y as f32 + 0.5), &u, &NoTrail);
                for axis in 0..3 {
                    let (a, b) = (u.bg_color[axis], u.dot_color[axis]);
                    let (lo, hi) = (a.min(b) - 1e-5, a.max(b) + 1e-5);
                    assert!(c[axis] >= lo && c[axis] <= hi);
                }
            }
        }
    }

    #[test]
    fn top_of_screen_is_plain_background() {
        let u = uniforms(100.0, 100.0);
        let c = shade(Vec2::new(50.0, 99.99), &u, &NoTrail);
        assert!((c - u.bg_color).length() < 1e-3);
    }

    #[test]
    fn encoded_output_is_in_unit_range() {
        let mut u = uniforms(64.0, 64.0);
        u.set_mode(OutputMode::Gradient);
        let c = shade_srgb(Vec2::new(3.0, 60.0), &u, &NoTrail);
        assert!(c.min_element() >= 0.0 && c.max_element() <= 1.0);
    }
}
