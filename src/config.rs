//! Start-up configuration, read from JSON handed over by the page.

use std::f32::consts::FRAC_PI_4;

use serde::Deserialize;

use crate::error::Result;
use crate::mode::OutputMode;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct DotConfig {
    /// sRGB hex
    pub dot_color: String,
    /// sRGB hex
    pub bg_color: String,
    /// Radians, `[0, PI]`
    pub rotation: f32,
    /// Cells across the surface, `[10, 100]`
    pub grid_size: f32,
    pub mode: OutputMode,
    pub show_panel: bool,
    pub trail: TrailConfig,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            dot_color: "#F2F2F2".to_owned(),
            bg_color: "#0344DC".to_owned(),
            rotation: FRAC_PI_4,
            grid_size: 80.0,
            mode: OutputMode::Composition,
            show_panel: true,
            trail: TrailConfig::default(),
        }
    }
}

impl DotConfig {
    /// Empty or whitespace input yields the defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(json)?)
    }
}

/// Shape of the pointer trail.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    /// Texture edge length in texels
    pub size: u32,
    /// Falloff radius as a fraction of the texture
    pub radius: f32,
    pub max_age_ms: f32,
    /// Peak alpha of a single stamp
    pub intensity: f32,
    /// Extra samples per half radius travelled; 0 disables
    pub interpolate: f32,
    pub min_force: f32,
    /// Weight of the previous force, `[0, 1)`
    pub smoothing: f32,
    /// Most filler samples added for a single pointer move
    pub max_fillers: usize,
    /// Hard cap on live samples
    pub capacity: usize,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            size: 512,
            radius: 0.1,
            max_age_ms: 400.0,
            intensity: 0.2,
            interpolate: 1.0,
            min_force: 0.3,
            smoothing: 0.0,
            max_fillers: 32,
            capacity: 1024,
        }
    }
}
