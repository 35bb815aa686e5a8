use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous tick, in seconds.
    pub dt: f32,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock that caps the loop rate.
///
/// Each [`tick`](FrameClock::tick) sleeps until at least one frame budget has
/// passed since the previous tick, then reports the real elapsed time.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    budget: Option<Duration>,
}

impl FrameClock {
    /// Creates a clock capped at `fps` ticks per second. A cap of zero
    /// disables limiting.
    pub fn new(fps: u32) -> Self {
        Self {
            last: Instant::now(),
            frame_index: 0,
            budget: (fps > 0).then(|| Duration::from_secs_f64(1. / fps as f64)),
        }
    }

    /// Resets the clock baseline.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Waits out the rest of the frame budget and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        if let Some(budget) = self.budget {
            let elapsed = self.last.elapsed();
            if elapsed < budget {
                std::thread::sleep(budget - elapsed);
            }
        }

        let now = Instant::now();
        let dt = now.saturating_duration_since(self.last);
        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_excludes_time_before_it() {
        let mut clock = FrameClock::new(0);
        std::thread::sleep(Duration::from_millis(50));
        clock.reset();
        let first = clock.tick();
        assert!(first.dt < 0.04, "{}", first.dt);
        assert_eq!(first.frame_index, 0);
    }

    #[test]
    fn tick_respects_cap() {
        let mut clock = FrameClock::new(100);
        let first = clock.tick();
        let second = clock.tick();
        assert!(first.dt >= 0.0099, "{}", first.dt);
        assert!(second.dt >= 0.0099, "{}", second.dt);
        assert_eq!(second.frame_index, 1);
    }

    #[test]
    fn uncapped_clock_does_not_sleep() {
        let mut clock = FrameClock::new(0);
        clock.tick();
        assert!(clock.tick().dt < 0.5);
    }
}
