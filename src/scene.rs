//! Per-mount state mutated by the render loop and the input handlers.

use glam::Vec2;

use crate::clock::FrameClock;
use crate::config::DotConfig;
use crate::error::Result;
use crate::mode::OutputMode;
use crate::trail::{TrailBuffer, TrailTexture};
use crate::uniforms::{DotUniforms, Resolution};

pub struct Scene {
    pub uniforms: DotUniforms,
    pub trail: TrailBuffer,
    pub texture: TrailTexture,
    clock: FrameClock,
}

/// What the renderer has to push to the GPU this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameUpdate {
    pub upload_trail: bool,
}

impl Scene {
    pub fn new(config: &DotConfig, resolution: Resolution) -> Result<Self> {
        Ok(Self {
            uniforms: DotUniforms::from_config(config, resolution)?,
            trail: TrailBuffer::new(config.trail.clone()),
            texture: TrailTexture::new(config.trail.size),
            clock: FrameClock::new(),
        })
    }

    /// Pointer moves only record a sample; drawing waits for the next frame.
    pub fn pointer_moved(&mut self, uv: Vec2) {
        self.trail.push(uv);
    }

    pub fn resized(&mut self, resolution: Resolution) {
        self.uniforms.resolution = resolution;
    }

    pub fn select_mode(&mut self, mode: OutputMode) -> bool {
        self.uniforms.set_mode(mode)
    }

    /// Advances time and the trail, then re-rasterizes the trail texture.
    pub fn frame(&mut self, now_ms: f64) -> FrameUpdate {
        let tick = self.clock.tick(now_ms);
        self.uniforms.time = tick.elapsed;
        self.trail.advance(tick.delta_ms);
        FrameUpdate {
            upload_trail: self.texture.rasterize(&self.trail),
        }
    }
}
