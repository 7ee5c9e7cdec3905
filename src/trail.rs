//! Pointer trail: an aging sample buffer and the single-channel texture it is
//! stamped into every frame.

use std::collections::VecDeque;

use glam::Vec2;

use crate::config::TrailConfig;
use crate::shading::{cover_uv, TrailSampler};
use crate::uniforms::Resolution;

/// Symmetric circular ease-in-out on `[0, 1]`.
pub fn ease_in_out_circ(x: f32) -> f32 {
    let x = x.clamp(0.0, 1.0);
    if x < 0.5 {
        (1.0 - (1.0 - (2.0 * x).powi(2)).sqrt()) / 2.0
    } else {
        ((1.0 - (-2.0 * x + 2.0).powi(2)).sqrt() + 1.0) / 2.0
    }
}

/// Age fade: 1 when fresh, eased down to 0 at `max_age`.
pub fn fade(age: f32, max_age: f32) -> f32 {
    if max_age <= 0.0 || age >= max_age {
        return 0.0;
    }
    ease_in_out_circ(1.0 - age.max(0.0) / max_age)
}

/// Converts a pointer position in client pixels to surface UV.
///
/// `rect` is `(left, top, width, height)` of the canvas; y is flipped so that
/// v grows upwards like `gl_FragCoord`.
pub fn surface_uv(client: Vec2, rect: (f32, f32, f32, f32)) -> Vec2 {
    let (left, top, width, height) = rect;
    let size = Resolution::new(width, height);
    let screen = Vec2::new(
        (client.x - left) / size.width(),
        1.0 - (client.y - top) / size.height(),
    );
    cover_uv(screen, size)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailPoint {
    pub position: Vec2,
    /// Milliseconds since the sample was recorded
    pub age: f32,
    /// Pointer speed factor, `[min_force, 1]`
    pub force: f32,
}

/// Recent pointer samples, oldest first.
pub struct TrailBuffer {
    config: TrailConfig,
    points: VecDeque<TrailPoint>,
    force: f32,
}

impl TrailBuffer {
    pub fn new(config: TrailConfig) -> Self {
        Self {
            points: VecDeque::with_capacity(config.capacity.min(4096)),
            config,
            force: 0.0,
        }
    }

    pub fn config(&self) -> &TrailConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = &TrailPoint> {
        self.points.iter()
    }

    /// Records a pointer position. Fast moves get more force, and long jumps
    /// are filled in with intermediate samples.
    pub fn push(&mut self, position: Vec2) {
        let force = match self.points.back() {
            Some(last) => {
                let delta = last.position - position;
                let dd = delta.length_squared();
                let target = (dd * 10_000.0).clamp(self.config.min_force, 1.0);
                self.force =
                    self.force * self.config.smoothing + target * (1.0 - self.config.smoothing);

                if self.config.interpolate > 0.0 && self.config.radius > 0.0 {
                    let step = self.config.radius * 0.5 / self.config.interpolate;
                    // fillers past capacity would be evicted straight away
                    let lines = ((dd / (step * step)).ceil() as usize)
                        .min(self.config.max_fillers + 1)
                        .min(self.config.capacity);
                    let from = last.position;
                    for i in 1..lines {
                        let at = from - delta / lines as f32 * i as f32;
                        self.insert(at, self.force);
                    }
                }
                self.force
            }
            None => {
                self.force = self.config.min_force;
                self.force
            }
        };
        self.insert(position, force);
    }

    fn insert(&mut self, position: Vec2, force: f32) {
        self.points.push_back(TrailPoint {
            position,
            age: 0.0,
            force,
        });
        while self.points.len() > self.config.capacity {
            self.points.pop_front();
        }
    }

    /// Ages every sample and drops the ones past `max_age`.
    pub fn advance(&mut self, delta_ms: f32) {
        let delta = delta_ms.max(0.0);
        let max_age = self.config.max_age_ms;
        for point in self.points.iter_mut() {
            point.age += delta;
        }
        self.points.retain(|p| p.age <= max_age);
        if self.points.is_empty() {
            self.force = 0.0;
        }
    }

    /// Current weight of a sample: age fade times force.
    pub fn strength(&self, point: &TrailPoint) -> f32 {
        fade(point.age, self.config.max_age_ms) * point.force
    }
}

/// Square intensity map, row 0 at v = 0.
pub struct TrailTexture {
    size: usize,
    texels: Vec<f32>,
    bytes: Vec<u8>,
    blank: bool,
}

impl TrailTexture {
    pub fn new(size: u32) -> Self {
        let size = size.max(1) as usize;
        Self {
            size,
            texels: vec![0.0; size * size],
            bytes: vec![0; size * size],
            blank: true,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// R8 texel data, ready for upload.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn texel(&self, x: usize, y: usize) -> f32 {
        self.texels[y * self.size + x]
    }

    /// Clears and re-stamps every live sample. Returns false when the texture
    /// was blank and stays blank, so the upload can be skipped.
    pub fn rasterize(&mut self, trail: &TrailBuffer) -> bool {
        if trail.is_empty() && self.blank {
            return false;
        }
        self.texels.fill(0.0);

        let n = self.size as f32;
        let config = trail.config();
        for point in trail.points() {
            let strength = trail.strength(point);
            let radius = n * config.radius * strength;
            if radius <= 0.0 {
                continue;
            }
            self.stamp(point.position * n, radius, config.intensity);
        }

        for (byte, v) in self.bytes.iter_mut().zip(&self.texels) {
            *byte = (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        }
        self.blank = trail.is_empty();
        true
    }

    /// Radial gradient, full inside a quarter of the radius, screen blended.
    fn stamp(&mut self, center: Vec2, radius: f32, intensity: f32) {
        let inner = radius * 0.25;
        let last = self.size as i64 - 1;
        let x0 = ((center.x - radius).floor() as i64).clamp(0, last) as usize;
        let x1 = ((center.x + radius).ceil() as i64).clamp(0, last) as usize;
        let y0 = ((center.y - radius).floor() as i64).clamp(0, last) as usize;
        let y1 = ((center.y + radius).ceil() as i64).clamp(0, last) as usize;

        for y in y0..=y1 {
            for x in x0..=x1 {
                let d = (Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - center).length();
                if d >= radius {
                    continue;
                }
                let t = if d <= inner {
                    1.0
                } else {
                    1.0 - (d - inner) / (radius - inner)
                };
                let c = intensity * t * t;
                let v = &mut self.texels[y * self.size + x];
                *v = 1.0 - (1.0 - *v) * (1.0 - c);
            }
        }
    }
}

impl TrailSampler for TrailTexture {
    /// Bilinear with clamp-to-edge, like `LINEAR` + `CLAMP_TO_EDGE`.
    fn intensity(&self, uv: Vec2) -> f32 {
        let n = self.size as f32;
        let p = uv.clamp(Vec2::ZERO, Vec2::ONE) * n - Vec2::splat(0.5);
        let base = p.floor();
        let frac = p - base;
        let last = self.size as i64 - 1;
        let at = |x: f32, y: f32| {
            let xi = (x as i64).clamp(0, last) as usize;
            let yi = (y as i64).clamp(0, last) as usize;
            self.texel(xi, yi)
        };
        let a = at(base.x, base.y);
        let b = at(base.x + 1.0, base.y);
        let c = at(base.x, base.y + 1.0);
        let d = at(base.x + 1.0, base.y + 1.0);
        let top = a + (b - a) * frac.x;
        let bottom = c + (d - c) * frac.x;
        top + (bottom - top) * frac.y
    }
}
