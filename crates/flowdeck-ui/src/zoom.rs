#![forbid(unsafe_code)]

//! Diagram zoom controller.
//!
//! Maintains the single scale factor applied to the diagram. Discrete
//! steps come from the on-screen controls and keyboard shortcuts;
//! continuous scaling comes from a two-finger pinch. The scale is always
//! clamped to the configured range, and every change refreshes the
//! percentage indicator, which auto-hides after a quiet period.
//!
//! The whole controller is gated on [`set_controls_active`]: the zoom UI
//! only exists on small viewports, so with the controls inactive every
//! operation is a no-op. Keyboard shortcuts additionally require the zoom
//! container to be focused.
//!
//! [`set_controls_active`]: ZoomController::set_controls_active

use std::time::{Duration, Instant};

use flowdeck_core::event::{KeyCode, KeyEvent, TouchEvent, TouchPhase, ZoomAction};
use flowdeck_style::visual::Transform;
use tracing::debug;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for the zoom controller.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoomConfig {
    /// Minimum scale.
    pub min_scale: f32,

    /// Maximum scale.
    pub max_scale: f32,

    /// Discrete step size.
    pub step: f32,

    /// Quiet period before the percentage indicator hides.
    pub indicator_hide: Duration,

    /// How long the bounce easing stays active after a reset.
    pub bounce_window: Duration,

    /// Pinch scale changes smaller than this are ignored.
    pub pinch_epsilon: f32,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.5,
            max_scale: 1.5,
            step: 0.1,
            indicator_hide: Duration::from_secs(2),
            bounce_window: Duration::from_millis(400),
            pinch_epsilon: 0.01,
        }
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Which easing the host should use for the next transform transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomEasing {
    /// Standard smooth ease.
    Smooth,
    /// Springy back-out ease, briefly active after a reset.
    Bounce,
}

/// The visible percentage indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomIndicator {
    /// Rounded percentage (100 = unscaled).
    pub percent: u32,
}

/// Active pinch session state.
#[derive(Debug, Clone, Copy)]
struct Pinch {
    initial_distance: f32,
    initial_scale: f32,
}

// ---------------------------------------------------------------------------
// ZoomController
// ---------------------------------------------------------------------------

/// State machine over the diagram scale.
#[derive(Debug)]
pub struct ZoomController {
    config: ZoomConfig,
    scale: f32,
    controls_active: bool,
    focused: bool,
    pinch: Option<Pinch>,
    indicator_deadline: Option<Instant>,
    bounce_until: Option<Instant>,

    /// Diagnostic: total applied scale changes.
    changes: u64,
}

impl ZoomController {
    /// Create a controller at scale 1.0 with the given configuration.
    #[must_use]
    pub fn new(config: ZoomConfig) -> Self {
        Self {
            config,
            scale: 1.0,
            controls_active: false,
            focused: false,
            pinch: None,
            indicator_deadline: None,
            bounce_until: None,
            changes: 0,
        }
    }

    /// Get a reference to the configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ZoomConfig {
        &self.config
    }

    /// Current scale.
    #[inline]
    #[must_use]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Diagnostic: total applied scale changes.
    #[inline]
    #[must_use]
    pub fn change_count(&self) -> u64 {
        self.changes
    }

    /// Activate/deactivate the zoom UI (responsive breakpoint).
    ///
    /// Deactivation drops any pinch session and hides the indicator, but
    /// keeps the current scale.
    pub fn set_controls_active(&mut self, active: bool) {
        if self.controls_active != active {
            debug!(active, "zoom controls");
        }
        self.controls_active = active;
        if !active {
            self.pinch = None;
            self.indicator_deadline = None;
        }
    }

    /// Whether the zoom UI is active.
    #[inline]
    #[must_use]
    pub fn controls_active(&self) -> bool {
        self.controls_active
    }

    /// The zoom container gained or lost keyboard focus.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Apply a discrete action (button press).
    pub fn apply(&mut self, action: ZoomAction, now: Instant) {
        if !self.controls_active {
            return;
        }
        match action {
            ZoomAction::In => self.set_scale(self.scale + self.config.step, now),
            ZoomAction::Out => self.set_scale(self.scale - self.config.step, now),
            ZoomAction::Reset => self.reset(now),
        }
    }

    /// Handle a keyboard shortcut. Returns `true` when the key was
    /// consumed. Requires active controls and container focus.
    pub fn key(&mut self, key: KeyEvent, now: Instant) -> bool {
        if !self.controls_active || !self.focused {
            return false;
        }
        match key.code {
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.set_scale(self.scale + self.config.step, now);
                true
            }
            KeyCode::Char('-') | KeyCode::Char('_') => {
                self.set_scale(self.scale - self.config.step, now);
                true
            }
            KeyCode::Char('0') => {
                self.reset(now);
                true
            }
            _ => false,
        }
    }

    /// Handle a touch contact change for pinch recognition.
    ///
    /// A session starts when exactly two contacts are down; moves rescale
    /// relative to the initial contact distance; anything other than two
    /// contacts ends the session.
    pub fn touch(&mut self, touch: &TouchEvent, now: Instant) {
        if !self.controls_active {
            return;
        }
        match (touch.phase, touch.pinch_distance()) {
            (TouchPhase::Start, Some(distance)) if distance > 0.0 => {
                self.pinch = Some(Pinch {
                    initial_distance: distance,
                    initial_scale: self.scale,
                });
            }
            (TouchPhase::Move, Some(distance)) => {
                if let Some(pinch) = self.pinch {
                    let target = pinch.initial_scale * (distance / pinch.initial_distance);
                    let clamped = target.clamp(self.config.min_scale, self.config.max_scale);
                    if (clamped - self.scale).abs() > self.config.pinch_epsilon {
                        self.set_scale(clamped, now);
                    }
                }
            }
            // Contact count changed away from two, or the gesture ended.
            _ => self.pinch = None,
        }
    }

    /// Advance deadlines: indicator auto-hide and bounce-easing expiry.
    pub fn tick(&mut self, now: Instant) {
        if self.indicator_deadline.is_some_and(|d| now >= d) {
            self.indicator_deadline = None;
        }
        if self.bounce_until.is_some_and(|d| now >= d) {
            self.bounce_until = None;
        }
    }

    /// The diagram transform for the current scale.
    #[must_use]
    pub fn transform(&self) -> Transform {
        Transform::scale(self.scale)
    }

    /// Easing the host should use for the next transition.
    #[must_use]
    pub fn easing(&self) -> ZoomEasing {
        if self.bounce_until.is_some() {
            ZoomEasing::Bounce
        } else {
            ZoomEasing::Smooth
        }
    }

    /// The percentage indicator while it is visible.
    #[must_use]
    pub fn indicator(&self) -> Option<ZoomIndicator> {
        self.indicator_deadline.map(|_| ZoomIndicator {
            percent: (self.scale * 100.0).round() as u32,
        })
    }

    /// Accessible label reflecting the current zoom level.
    #[must_use]
    pub fn accessible_label(&self) -> String {
        format!(
            "Flowchart at {}% zoom level",
            (self.scale * 100.0).round() as u32
        )
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    fn set_scale(&mut self, target: f32, now: Instant) {
        let clamped = target.clamp(self.config.min_scale, self.config.max_scale);
        self.scale = clamped;
        self.changes += 1;
        self.indicator_deadline = Some(now + self.config.indicator_hide);
        debug!(scale = self.scale, "zoom change");
    }

    /// Reset to exactly 1.0 with the bounce easing window armed.
    fn reset(&mut self, now: Instant) {
        self.scale = 1.0;
        self.changes += 1;
        self.indicator_deadline = Some(now + self.config.indicator_hide);
        self.bounce_until = Some(now + self.config.bounce_window);
        debug!("zoom reset");
    }
}

impl Default for ZoomController {
    fn default() -> Self {
        Self::new(ZoomConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
