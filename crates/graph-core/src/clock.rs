use instant::Instant;

/// Timing inputs for one frame, in seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    /// Time since the previous frame.
    pub delta: f32,
    /// Monotonic time since the clock started.
    pub total: f32,
}

impl FrameTime {
    pub fn new(delta: f32, total: f32) -> Self {
        Self { delta, total }
    }
}

pub struct FrameClock {
    start: Instant,
    last: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
        }
    }

    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let delta = now.duration_since(self.last);
        self.last = now;
        FrameTime {
            delta: delta.as_secs_f32(),
            total: now.duration_since(self.start).as_secs_f32(),
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_are_monotonic() {
        let mut clock = FrameClock::new();
        let a = clock.tick();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = clock.tick();
        assert!(a.delta >= 0.0);
        assert!(b.delta > 0.0);
        assert!(b.total >= a.total + b.delta - 1e-4);
    }
}
