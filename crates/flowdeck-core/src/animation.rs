#![forbid(unsafe_code)]

//! Composable animation primitives.
//!
//! Time-based animations that produce normalized `f32` values (0.0–1.0,
//! except [`back_out`] which deliberately overshoots). Designed for zero
//! allocation during tick; the caller owns the clock and feeds `dt`.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Easing functions
// ---------------------------------------------------------------------------

/// Easing function signature: maps `t` in [0, 1] to an output value.
pub type EasingFn = fn(f32) -> f32;

/// Identity easing (constant velocity).
#[inline]
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Quadratic ease-out (slow end).
#[inline]
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Quadratic ease-in-out (slow start and end).
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Back ease-out: decelerates past 1.0 and settles back.
///
/// The overshoot gives reset-zoom and modal entry their springy "bounce".
/// Output exceeds 1.0 near the end of the curve (peak ≈ 1.1).
#[inline]
pub fn back_out(t: f32) -> f32 {
    const C1: f32 = 1.70158;
    const C3: f32 = C1 + 1.0;
    let t = t.clamp(0.0, 1.0);
    1.0 + C3 * (t - 1.0).powi(3) + C1 * (t - 1.0).powi(2)
}

// ---------------------------------------------------------------------------
// Animation trait
// ---------------------------------------------------------------------------

/// A time-based animation producing an `f32` value.
pub trait Animation {
    /// Advance the animation by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end.
    fn is_complete(&self) -> bool;

    /// Current output value.
    fn value(&self) -> f32;

    /// Reset the animation to its initial state.
    fn reset(&mut self);
}

// ---------------------------------------------------------------------------
// Fade
// ---------------------------------------------------------------------------

/// Progression from 0.0 to 1.0 over a duration, with configurable easing.
///
/// Elapsed time accumulates as [`Duration`] internally, so long-running
/// tick loops don't accumulate floating-point drift.
#[derive(Debug, Clone, Copy)]
pub struct Fade {
    elapsed: Duration,
    duration: Duration,
    easing: EasingFn,
}

impl Fade {
    /// Create a fade with the given duration and linear easing.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration: if duration.is_zero() {
                Duration::from_nanos(1)
            } else {
                duration
            },
            easing: linear,
        }
    }

    /// Set the easing function (builder).
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Raw linear progress (before easing), in [0.0, 1.0].
    #[must_use]
    pub fn raw_progress(&self) -> f32 {
        let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        (t as f32).clamp(0.0, 1.0)
    }
}

impl Animation for Fade {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f32 {
        (self.easing)(self.raw_progress())
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }
}

// ---------------------------------------------------------------------------
// Delayed
// ---------------------------------------------------------------------------

/// Holds an inner animation at its initial value until a delay elapses.
///
/// Combined with [`stagger_offsets`], this produces cascading entrance
/// animations: each item wraps the same fade with a different delay.
#[derive(Debug, Clone, Copy)]
pub struct Delayed<A> {
    remaining: Duration,
    inner: A,
    delay: Duration,
}

impl<A: Animation> Delayed<A> {
    /// Wrap `inner` so it starts after `delay`.
    #[must_use]
    pub fn new(delay: Duration, inner: A) -> Self {
        Self {
            remaining: delay,
            inner,
            delay,
        }
    }

    /// Whether the delay is still pending.
    #[must_use]
    pub fn is_waiting(&self) -> bool {
        !self.remaining.is_zero()
    }
}

impl<A: Animation> Animation for Delayed<A> {
    fn tick(&mut self, dt: Duration) {
        if self.remaining.is_zero() {
            self.inner.tick(dt);
            return;
        }
        if dt >= self.remaining {
            // Forward the overshoot into the inner animation.
            let leftover = dt - self.remaining;
            self.remaining = Duration::ZERO;
            if !leftover.is_zero() {
                self.inner.tick(leftover);
            }
        } else {
            self.remaining -= dt;
        }
    }

    fn is_complete(&self) -> bool {
        self.remaining.is_zero() && self.inner.is_complete()
    }

    fn value(&self) -> f32 {
        // While waiting the inner animation is untouched, so this is its
        // initial value; afterwards it is the live value.
        self.inner.value()
    }

    fn reset(&mut self) {
        self.remaining = self.delay;
        self.inner.reset();
    }
}

// ---------------------------------------------------------------------------
// Pulse
// ---------------------------------------------------------------------------

/// Continuous triangle-wave oscillation between 0.0 and 1.0. Never completes.
///
/// One full up-and-back cycle takes `period`. Used for the idle arrow pulse
/// (stroke breathing between its rest and emphasized width).
#[derive(Debug, Clone, Copy)]
pub struct Pulse {
    elapsed: Duration,
    period: Duration,
}

impl Pulse {
    /// Create a pulse with the given full cycle period.
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            period: if period.is_zero() {
                Duration::from_nanos(1)
            } else {
                period
            },
        }
    }

    /// Offset the starting phase by `offset` into the cycle.
    #[must_use]
    pub fn with_phase(mut self, offset: Duration) -> Self {
        self.elapsed = offset;
        self
    }
}

impl Animation for Pulse {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_complete(&self) -> bool {
        false
    }

    fn value(&self) -> f32 {
        let cycle = self.elapsed.as_secs_f64() % self.period.as_secs_f64();
        let t = (cycle / self.period.as_secs_f64()) as f32;
        // Triangle: rise over the first half, fall over the second.
        if t < 0.5 { t * 2.0 } else { 2.0 - t * 2.0 }
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }
}

// ---------------------------------------------------------------------------
// Stagger
// ---------------------------------------------------------------------------

/// Compute entrance delay offsets for `count` items.
///
/// Item `i` starts at `base + step * i`. Exact integer arithmetic; no
/// float drift across long lists.
#[must_use]
pub fn stagger_offsets(count: usize, base: Duration, step: Duration) -> Vec<Duration> {
    (0..count)
        .map(|i| base.saturating_add(step.saturating_mul(i as u32)))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
