#![forbid(unsafe_code)]

//! Time-based animation primitives for item height transitions.
//!
//! Animations produce normalized `f32` progress values (0.0–1.0) and allocate
//! nothing during tick. The engine never owns a clock: the host forwards frame
//! deltas via [`Animation::tick`].

use std::time::Duration;

// ---------------------------------------------------------------------------
// Easing functions
// ---------------------------------------------------------------------------

/// Easing function signature: maps `t` in [0, 1] to output in [0, 1].
pub type EasingFn = fn(f32) -> f32;

/// Cubic ease-out (slower end than quadratic).
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

// ---------------------------------------------------------------------------
// Animation trait
// ---------------------------------------------------------------------------

/// A time-based animation producing values in [0.0, 1.0].
pub trait Animation {
    /// Advance the animation by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end.
    fn is_complete(&self) -> bool;

    /// Current output value, clamped to [0.0, 1.0].
    fn value(&self) -> f32;

    /// Reset the animation to its initial state.
    fn reset(&mut self);
}

// ---------------------------------------------------------------------------
// HeightTween
// ---------------------------------------------------------------------------

/// Interpolates an item height between `from` and `to` over a duration.
///
/// [`Animation::value`] returns the eased progress; use
/// [`HeightTween::height`] for the interpolated height. Once complete the
/// height is exactly `to`, so the final sample never drifts.
#[derive(Debug, Clone, Copy)]
pub struct HeightTween {
    from: f32,
    to: f32,
    elapsed: Duration,
    duration: Duration,
    easing: EasingFn,
}

impl HeightTween {
    /// Create a tween from `from` to `to` over `duration` with cubic ease-out.
    pub fn new(from: f32, to: f32, duration: Duration) -> Self {
        Self {
            from,
            to,
            elapsed: Duration::ZERO,
            duration: if duration.is_zero() {
                Duration::from_nanos(1)
            } else {
                duration
            },
            easing: ease_out_cubic,
        }
    }

    /// Set the easing function (builder).
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Start height.
    pub fn from(&self) -> f32 {
        self.from
    }

    /// Target height.
    pub fn to(&self) -> f32 {
        self.to
    }

    fn progress(&self) -> f32 {
        let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        (t as f32).clamp(0.0, 1.0)
    }

    /// Current interpolated height.
    pub fn height(&self) -> f32 {
        if self.is_complete() {
            return self.to;
        }
        let t = (self.easing)(self.progress());
        self.from + (self.to - self.from) * t
    }

    /// Restart toward a new target from the current height.
    ///
    /// Used when a collapse is requested while an expand is still running.
    pub fn retarget(&mut self, to: f32) {
        self.from = self.height();
        self.to = to;
        self.elapsed = Duration::ZERO;
    }
}

impl Animation for HeightTween {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f32 {
        (self.easing)(self.progress())
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }
}
