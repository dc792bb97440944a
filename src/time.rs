//! Simulated time for the frame loop.
//!
//! The renderer hands [`Simulation::advance`](crate::Simulation::advance) the
//! wall-clock time since its last frame. [`Time`] turns that into the delta the
//! physics actually uses (clamped, so a stalled frame cannot tunnel particles
//! through walls) and keeps frame and elapsed counters.
//!
//! # Example
//!
//! ```ignore
//! use contact_sim::time::Time;
//!
//! let mut time = Time::new(0.05);
//!
//! // In your frame loop:
//! let dt = time.tick(raw_delta);
//!
//! println!("Elapsed: {:.2}s", time.elapsed());
//! println!("Frame: {}", time.frame());
//! ```

/// Frame counter and simulated clock.
#[derive(Clone, Debug)]
pub struct Time {
    /// Simulated seconds since the last reset.
    elapsed_secs: f64,
    /// Delta used by the most recent frame.
    delta_secs: f32,
    /// Frames processed since the last reset.
    frame_count: u64,
    /// Upper bound for a single delta.
    max_delta: f32,
}

impl Time {
    /// Create a clock that clamps every delta to `max_delta` seconds.
    pub fn new(max_delta: f32) -> Self {
        Self {
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            max_delta: max_delta.max(0.0),
        }
    }

    /// Advance by one frame. Returns the delta the simulation should use.
    ///
    /// Negative and NaN deltas count as zero.
    pub fn tick(&mut self, raw_delta: f32) -> f32 {
        let raw = if raw_delta.is_nan() { 0.0 } else { raw_delta };
        self.delta_secs = raw.clamp(0.0, self.max_delta);
        self.elapsed_secs += self.delta_secs as f64;
        self.frame_count += 1;
        self.delta_secs
    }

    /// Total simulated time in seconds.
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed_secs
    }

    /// Delta used by the last frame.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Frames processed.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Zero the clock and frame counter.
    pub fn reset(&mut self) {
        self.elapsed_secs = 0.0;
        self.delta_secs = 0.0;
        self.frame_count = 0;
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new(1.0 / 20.0)
    }
}
