//! Time management utilities

use std::time::Instant;

/// High-precision timer for frame timing
#[derive(Debug)]
pub struct Timer {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Update the timer (should be called once per frame)
    pub fn update(&mut self) {
        let now = Instant::now();
        self.advance(now.duration_since(self.last_frame).as_secs_f32());
        self.last_frame = now;
    }

    /// Advance by an externally supplied frame delta
    ///
    /// Used when the input backend already reports frame time.
    pub fn advance(&mut self, delta_time: f32) {
        self.delta_time = delta_time.max(0.0);
        self.total_time += self.delta_time;
        self.frame_count += 1;
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time since timer creation
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the current FPS (based on last frame time)
    pub fn current_fps(&self) -> f32 {
        if self.delta_time > 0.0 {
            1.0 / self.delta_time
        } else {
            0.0
        }
    }
}

/// Repeating cooldown that toggles a flag every `period` seconds
///
/// Drives the text caret blink.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cooldown {
    period: f32,
    elapsed: f32,
    on: bool,
}

impl Cooldown {
    /// Create a cooldown that starts in the "on" state
    pub fn new(period: f32) -> Self {
        Self {
            period,
            elapsed: 0.0,
            on: true,
        }
    }

    /// Advance by `delta_time`; returns true if the flag flipped
    pub fn tick(&mut self, delta_time: f32) -> bool {
        self.elapsed += delta_time;
        if self.period > 0.0 && self.elapsed >= self.period {
            self.elapsed = 0.0;
            self.on = !self.on;
            return true;
        }
        false
    }

    /// Restart the period with the flag on
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.on = true;
    }

    /// Current flag state
    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Toggle period in seconds
    pub fn period(&self) -> f32 {
        self.period
    }
}
