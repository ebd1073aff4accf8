use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous tick, in milliseconds.
    pub dt_ms: f32,

    /// Seconds since the clock's first tick; drives shader animation.
    pub elapsed: f32,

    /// Monotonic timestamp of the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// One clock per engine instance, so restarting an engine restarts time.
///
/// The first tick reports a near-zero delta (the clock has no baseline yet).
/// Delta time is clamped to avoid pathological values when the application is
/// paused by the debugger, minimized, or stalls.
#[derive(Debug, Clone)]
pub struct FrameClock {
    origin: Option<Instant>,
    last: Option<Instant>,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Creates a new clock with default clamps.
    ///
    /// Clamp rationale:
    /// - minimum prevents zero-dt behavior from tight loops on some platforms
    /// - maximum bounds the trail step after long stalls
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            origin: None,
            last: None,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Advances the clock to `now`.
    ///
    /// Instants earlier than the previous tick count as zero elapsed time.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let origin = *self.origin.get_or_insert(now);
        let dt = match self.last {
            Some(last) => now.saturating_duration_since(last),
            None => Duration::ZERO,
        };

        // Clamp delta time to keep downstream systems stable.
        let dt = dt.clamp(self.dt_min, self.dt_max);

        self.last = Some(now);

        let ft = FrameTime {
            dt_ms: dt.as_secs_f32() * 1000.0,
            elapsed: now.saturating_duration_since(origin).as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
