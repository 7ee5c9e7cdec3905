/// Turns `requestAnimationFrame` timestamps into elapsed time and frame deltas.
#[derive(Clone, Debug, Default)]
pub struct FrameClock {
    start: Option<f64>,
    last: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tick {
    /// Seconds since the first frame
    pub elapsed: f32,
    /// Milliseconds since the previous frame
    pub delta_ms: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timestamps that go backwards count as a zero-length frame.
    pub fn tick(&mut self, now_ms: f64) -> Tick {
        let start = *self.start.get_or_insert(now_ms);
        let last = self.last.unwrap_or(now_ms);
        let now = now_ms.max(last);
        self.last = Some(now);
        Tick {
            elapsed: ((now - start) / 1000.0) as f32,
            delta_ms: (now - last) as f32,
        }
    }
}
