//! The uniform set shared by the panel, the key binder and the render loop.

use std::f32::consts::PI;
use std::ops::RangeInclusive;

use glam::{Vec2, Vec3};

use crate::color;
use crate::config::DotConfig;
use crate::error::Result;
use crate::mode::OutputMode;

pub const ROTATION_RANGE: RangeInclusive<f32> = 0.0..=PI;
pub const GRID_SIZE_RANGE: RangeInclusive<f32> = 10.0..=100.0;

/// Drawing-buffer size in device pixels. Never zero on either axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Resolution(Vec2);

impl Resolution {
    pub fn new(width: f32, height: f32) -> Self {
        let clean = |v: f32| if v.is_finite() { v.max(1.0) } else { 1.0 };
        Self(Vec2::new(clean(width), clean(height)))
    }

    /// CSS size times device pixel ratio, rounded the way the canvas rounds.
    pub fn from_css(width: f64, height: f64, dpr: f64) -> Self {
        let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        Self::new((width * dpr).round() as f32, (height * dpr).round() as f32)
    }

    pub fn width(self) -> f32 {
        self.0.x
    }

    pub fn height(self) -> f32 {
        self.0.y
    }

    pub fn as_vec2(self) -> Vec2 {
        self.0
    }
}

/// Everything the fragment shader reads for one draw, apart from the trail
/// texture which is bound separately.
#[derive(Clone, Debug, PartialEq)]
pub struct DotUniforms {
    pub time: f32,
    pub resolution: Resolution,
    /// Linear RGB
    pub dot_color: Vec3,
    /// Linear RGB
    pub bg_color: Vec3,
    mode: OutputMode,
    rotation: f32,
    grid_size: f32,
}

impl DotUniforms {
    pub fn from_config(config: &DotConfig, resolution: Resolution) -> Result<Self> {
        let mut uniforms = Self {
            time: 0.0,
            resolution,
            dot_color: color::linear_from_hex(&config.dot_color)?,
            bg_color: color::linear_from_hex(&config.bg_color)?,
            mode: config.mode,
            rotation: 0.0,
            grid_size: *GRID_SIZE_RANGE.start(),
        };
        uniforms.set_rotation(config.rotation);
        uniforms.set_grid_size(config.grid_size);
        Ok(uniforms)
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn grid_size(&self) -> f32 {
        self.grid_size
    }

    /// Returns true when the mode actually changed.
    pub fn set_mode(&mut self, mode: OutputMode) -> bool {
        let changed = self.mode != mode;
        self.mode = mode;
        changed
    }

    pub fn set_rotation(&mut self, radians: f32) {
        self.rotation = clamp_to(radians, &ROTATION_RANGE);
    }

    pub fn set_grid_size(&mut self, cells: f32) {
        self.grid_size = clamp_to(cells, &GRID_SIZE_RANGE);
    }
}

pub(crate) fn clamp_to(value: f32, range: &RangeInclusive<f32>) -> f32 {
    if value.is_nan() {
        return *range.start();
    }
    value.clamp(*range.start(), *range.end())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniforms() -> DotUniforms {
        DotUniforms::from_config(&DotConfig::default(), Resolution::new(800.0, 600.0)).unwrap()
    }

    #[test]
    fn resolution_never_collapses() {
        let r = Resolution::new(0.0, -5.0);
        assert_eq!((r.width(), r.height()), (1.0, 1.0));
        let r = Resolution::new(f32::NAN, 10.0);
        assert_eq!(r.width(), 1.0);
    }

    #[test]
    fn css_size_scales_by_dpr() {
        let r = Resolution::from_css(400.0, 300.0, 2.0);
        assert_eq!((r.width(), r.height()), (800.0, 600.0));
        let r = Resolution::from_css(400.0, 300.0, 0.0);
        assert_eq!(r.width(), 400.0);
    }

    #[test]
    fn defaults_come_from_config() {
        let u = uniforms();
        assert_eq!(u.mode(), OutputMode::Composition);
        assert_eq!(u.grid_size(), 80.0);
        assert!((u.rotation() - PI / 4.0).abs() < 1e-6);
        assert_eq!(u.time, 0.0);
    }

    #[test]
    fn setters_clamp_to_panel_bounds() {
        let mut u = uniforms();
        u.set_rotation(10.0);
        assert_eq!(u.rotation(), PI);
        u.set_rotation(-1.0);
        assert_eq!(u.rotation(), 0.0);
        u.set_grid_size(3.0);
        assert_eq!(u.grid_size(), 10.0);
        u.set_grid_size(f32::NAN);
        assert_eq!(u.grid_size(), 10.0);
    }

    #[test]
    fn selecting_a_mode_twice_is_idempotent() {
        let mut u = uniforms();
        assert!(u.set_mode(OutputMode::Dots));
        let once = u.clone();
        assert!(!u.set_mode(OutputMode::Dots));
        assert_eq!(u, once);
    }

    #[test]
    fn bad_color_fails_construction() {
        let cfg = DotConfig {
            dot_color: "nope".into(),
            ..DotConfig::default()
        };
        assert!(DotUniforms::from_config(&cfg, Resolution::new(1.0, 1.0)).is_err());
    }
}
