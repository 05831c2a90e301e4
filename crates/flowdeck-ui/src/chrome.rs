#![forbid(unsafe_code)]

//! Page chrome effects around the diagram.
//!
//! Four small, independent machines:
//!
//! - [`HeaderEffect`] — the header switches to its compact visual past a
//!   scroll threshold, evaluated through a short debounce so a scroll
//!   storm costs one recomputation.
//! - [`RevealTracker`] — sections fade in once enough of them intersects
//!   the (slightly shrunk) viewport; reveals are one-shot.
//! - [`AnchorScroller`] — resolves anchor activations to smooth scroll
//!   commands, compensating for the fixed header.
//! - [`Breakpoints`] — responsive flags re-evaluated on debounced resize.
//!
//! Missing pieces degrade to no-ops: an unknown anchor target or a
//! section with no rect simply does nothing.

use std::time::{Duration, Instant};

use flowdeck_core::debounce::Debouncer;
use flowdeck_core::geometry::Rect;
use tracing::debug;

// ---------------------------------------------------------------------------
// HeaderEffect
// ---------------------------------------------------------------------------

/// Debounced header compact-state toggle.
#[derive(Debug)]
pub struct HeaderEffect {
    threshold: f32,
    debounce: Debouncer,
    pending_offset: Option<f32>,
    compact: bool,
}

impl HeaderEffect {
    /// Scroll offset past which the header goes compact.
    pub const DEFAULT_THRESHOLD: f32 = 100.0;
    /// Debounce quiet period for scroll recomputation.
    pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(10);

    /// Create with the default threshold and debounce.
    #[must_use]
    pub fn new() -> Self {
        Self::with_threshold(Self::DEFAULT_THRESHOLD, Self::DEFAULT_DEBOUNCE)
    }

    /// Create with an explicit threshold and debounce delay.
    #[must_use]
    pub fn with_threshold(threshold: f32, debounce: Duration) -> Self {
        Self {
            threshold,
            debounce: Debouncer::new(debounce),
            pending_offset: None,
            compact: false,
        }
    }

    /// Record a scroll offset; evaluation happens after the quiet period.
    pub fn on_scroll(&mut self, offset: f32, now: Instant) {
        self.pending_offset = Some(offset);
        self.debounce.trigger(now);
    }

    /// Advance the debounce; applies the latest offset when it fires.
    pub fn tick(&mut self, now: Instant) {
        if self.debounce.poll(now)
            && let Some(offset) = self.pending_offset.take()
        {
            let compact = offset > self.threshold;
            if compact != self.compact {
                debug!(compact, "header state");
            }
            self.compact = compact;
        }
    }

    /// Whether the header is in its compact visual state.
    #[inline]
    #[must_use]
    pub fn compact(&self) -> bool {
        self.compact
    }
}

impl Default for HeaderEffect {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// RevealTracker
// ---------------------------------------------------------------------------

/// Configuration for section reveal.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RevealConfig {
    /// Fraction of a section that must be visible to reveal it.
    pub ratio: f32,

    /// Amount the viewport bottom is pulled up before the intersection
    /// test, so sections reveal slightly before fully entering.
    pub bottom_margin: f32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            ratio: 0.15,
            bottom_margin: 50.0,
        }
    }
}

/// One-shot section reveal tracking.
///
/// Register sections by id; feed section rects and the viewport on every
/// scroll/resize pass. Once a section reveals it leaves the observed set
/// for good — it is never re-hidden and never re-tested.
#[derive(Debug, Default)]
pub struct RevealTracker {
    config: RevealConfig,
    observed: Vec<String>,
    revealed: Vec<String>,
}

impl RevealTracker {
    /// Create a tracker with the given configuration.
    #[must_use]
    pub fn new(config: RevealConfig) -> Self {
        Self {
            config,
            observed: Vec::new(),
            revealed: Vec::new(),
        }
    }

    /// Start observing a section. Re-observing a revealed section is a
    /// no-op (it stays revealed).
    pub fn observe(&mut self, id: impl Into<String>) {
        let id = id.into();
        if !self.observed.contains(&id) && !self.revealed.contains(&id) {
            self.observed.push(id);
        }
    }

    /// Run the intersection pass.
    ///
    /// `rect_of` supplies each observed section's current rect (None while
    /// unmeasured — the section just stays hidden). Returns ids newly
    /// revealed by this pass, in observation order.
    pub fn update<F>(&mut self, viewport: Rect, rect_of: F) -> Vec<String>
    where
        F: Fn(&str) -> Option<Rect>,
    {
        let window = viewport.shrink_bottom(self.config.bottom_margin);
        let ratio = self.config.ratio;

        let mut newly = Vec::new();
        self.observed.retain(|id| {
            let visible = rect_of(id)
                .map(|rect| rect.visible_fraction(&window))
                .unwrap_or(0.0);
            if visible >= ratio {
                debug!(section = %id, "section revealed");
                newly.push(id.clone());
                false
            } else {
                true
            }
        });
        self.revealed.extend(newly.iter().cloned());
        newly
    }

    /// Whether a section has revealed.
    #[must_use]
    pub fn is_revealed(&self, id: &str) -> bool {
        self.revealed.iter().any(|r| r == id)
    }

    /// Whether a section is still being observed.
    #[must_use]
    pub fn is_observing(&self, id: &str) -> bool {
        self.observed.iter().any(|o| o == id)
    }
}

// ---------------------------------------------------------------------------
// AnchorScroller
// ---------------------------------------------------------------------------

/// Scroll behavior requested from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    /// Animated scroll.
    Smooth,
}

/// A scroll request produced by an anchor activation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollCommand {
    /// Target page offset.
    pub target_y: f32,
    /// Requested behavior.
    pub behavior: ScrollBehavior,
}

/// Resolves anchor activations to scroll commands.
#[derive(Debug, Clone, Copy)]
pub struct AnchorScroller {
    /// Fixed-header compensation subtracted from the section top.
    header_offset: f32,
}

impl AnchorScroller {
    /// Default fixed-header compensation.
    pub const DEFAULT_HEADER_OFFSET: f32 = 100.0;

    /// Create with the default header offset.
    #[must_use]
    pub fn new() -> Self {
        Self {
            header_offset: Self::DEFAULT_HEADER_OFFSET,
        }
    }

    /// Create with an explicit header offset.
    #[must_use]
    pub fn with_header_offset(header_offset: f32) -> Self {
        Self { header_offset }
    }

    /// Resolve an activation. `section_top` is the target section's page
    /// offset, or `None` for an unknown target (no-op).
    #[must_use]
    pub fn resolve(&self, section_top: Option<f32>) -> Option<ScrollCommand> {
        section_top.map(|top| ScrollCommand {
            target_y: (top - self.header_offset).max(0.0),
            behavior: ScrollBehavior::Smooth,
        })
    }
}

impl Default for AnchorScroller {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Breakpoints
// ---------------------------------------------------------------------------

/// Responsive breakpoint flags, re-evaluated on debounced resize.
#[derive(Debug)]
pub struct Breakpoints {
    zoom_controls_max: f32,
    compact_max: f32,
    debounce: Debouncer,
    pending_width: Option<f32>,
    zoom_controls: bool,
    compact_layout: bool,
}

impl Breakpoints {
    /// Widest viewport that still gets on-screen zoom controls.
    pub const DEFAULT_ZOOM_CONTROLS_MAX: f32 = 992.0;
    /// Viewports strictly narrower than this get the compact layout.
    pub const DEFAULT_COMPACT_MAX: f32 = 768.0;
    /// Resize debounce quiet period.
    pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(250);

    /// Create with the default breakpoints, evaluated immediately for the
    /// initial width.
    #[must_use]
    pub fn new(initial_width: f32) -> Self {
        let mut bp = Self {
            zoom_controls_max: Self::DEFAULT_ZOOM_CONTROLS_MAX,
            compact_max: Self::DEFAULT_COMPACT_MAX,
            debounce: Debouncer::new(Self::DEFAULT_DEBOUNCE),
            pending_width: None,
            zoom_controls: false,
            compact_layout: false,
        };
        bp.evaluate(initial_width);
        bp
    }

    /// Record a resize; evaluation happens after the quiet period.
    pub fn on_resize(&mut self, width: f32, now: Instant) {
        self.pending_width = Some(width);
        self.debounce.trigger(now);
    }

    /// Advance the debounce; applies the latest width when it fires.
    pub fn tick(&mut self, now: Instant) {
        if self.debounce.poll(now)
            && let Some(width) = self.pending_width.take()
        {
            self.evaluate(width);
        }
    }

    /// Whether on-screen zoom controls are active.
    #[inline]
    #[must_use]
    pub fn zoom_controls(&self) -> bool {
        self.zoom_controls
    }

    /// Whether the compact diagram layout is active.
    #[inline]
    #[must_use]
    pub fn compact_layout(&self) -> bool {
        self.compact_layout
    }

    fn evaluate(&mut self, width: f32) {
        let zoom = width <= self.zoom_controls_max;
        let compact = width < self.compact_max;
        if zoom != self.zoom_controls || compact != self.compact_layout {
            debug!(width, zoom, compact, "breakpoints");
        }
        self.zoom_controls = zoom;
        self.compact_layout = compact;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    // --- HeaderEffect ---

    #[test]
    fn header_goes_compact_past_threshold() {
        let t0 = Instant::now();
        let mut h = HeaderEffect::new();

        h.on_scroll(150.0, t0);
        assert!(!h.compact()); // Not until the debounce fires.
        h.tick(t0 + ms(10));
        assert!(h.compact());

        h.on_scroll(50.0, t0 + ms(20));
        h.tick(t0 + ms(30));
        assert!(!h.compact());
    }

    #[test]
    fn exactly_threshold_is_not_compact() {
        let t0 = Instant::now();
        let mut h = HeaderEffect::new();
        h.on_scroll(100.0, t0);
        h.tick(t0 + ms(10));
        assert!(!h.compact());
    }

    #[test]
    fn scroll_storm_applies_latest_only() {
        let t0 = Instant::now();
        let mut h = HeaderEffect::new();

        for i in 0..20 {
            h.on_scroll(200.0 - i as f32 * 10.0, t0 + ms(i));
        }
        // Quiet period after the last event (offset 10.0).
        h.tick(t0 + ms(29));
        assert!(!h.compact());
    }

    // --- RevealTracker ---

    #[test]
    fn reveal_at_ratio_and_stop_observing() {
        let mut r = RevealTracker::default();
        r.observe("workflow");

        let viewport = Rect::new(0.0, 0.0, 1000.0, 850.0);
        // Section 100 tall, 15% inside the shrunk window (bottom = 800).
        let rect = Rect::new(0.0, 785.0, 1000.0, 100.0);
        let newly = r.update(viewport, |_| Some(rect));

        assert_eq!(newly, vec!["workflow".to_string()]);
        assert!(r.is_revealed("workflow"));
        assert!(!r.is_observing("workflow"));
    }

    #[test]
    fn below_ratio_stays_hidden() {
        let mut r = RevealTracker::default();
        r.observe("tech");

        let viewport = Rect::new(0.0, 0.0, 1000.0, 850.0);
        // Only 10% visible inside the shrunk window.
        let rect = Rect::new(0.0, 790.0, 1000.0, 100.0);
        let newly = r.update(viewport, |_| Some(rect));

        assert!(newly.is_empty());
        assert!(r.is_observing("tech"));
    }

    #[test]
    fn bottom_margin_shrinks_the_window() {
        let mut r = RevealTracker::default();
        r.observe("s");

        let viewport = Rect::new(0.0, 0.0, 1000.0, 800.0);
        // 20% below the raw viewport bottom would pass the ratio, but the
        // margin pulls the window up so nothing intersects.
        let rect = Rect::new(0.0, 760.0, 1000.0, 100.0);
        let newly = r.update(viewport, |_| Some(rect));
        assert!(newly.is_empty());
    }

    #[test]
    fn reveal_is_one_shot() {
        let mut r = RevealTracker::default();
        r.observe("s");
        let viewport = Rect::new(0.0, 0.0, 1000.0, 850.0);
        let visible = Rect::new(0.0, 100.0, 1000.0, 100.0);

        assert_eq!(r.update(viewport, |_| Some(visible)).len(), 1);
        // Section scrolls far away; it stays revealed and untested.
        assert!(r.update(viewport, |_| None).is_empty());
        assert!(r.is_revealed("s"));

        // Re-observing a revealed section is a no-op.
        r.observe("s");
        assert!(!r.is_observing("s"));
    }

    #[test]
    fn unmeasured_section_is_noop() {
        let mut r = RevealTracker::default();
        r.observe("ghost");
        let viewport = Rect::new(0.0, 0.0, 1000.0, 800.0);
        assert!(r.update(viewport, |_| None).is_empty());
        assert!(r.is_observing("ghost"));
    }

    // --- AnchorScroller ---

    #[test]
    fn anchor_compensates_for_header() {
        let a = AnchorScroller::new();
        let cmd = a.resolve(Some(900.0)).unwrap();
        assert_eq!(cmd.target_y, 800.0);
        assert_eq!(cmd.behavior, ScrollBehavior::Smooth);
    }

    #[test]
    fn anchor_near_top_clamps_to_zero() {
        let a = AnchorScroller::new();
        assert_eq!(a.resolve(Some(40.0)).unwrap().target_y, 0.0);
    }

    #[test]
    fn unknown_anchor_is_noop() {
        let a = AnchorScroller::new();
        assert!(a.resolve(None).is_none());
    }

    // --- Breakpoints ---

    #[test]
    fn initial_width_evaluates_immediately() {
        let bp = Breakpoints::new(700.0);
        assert!(bp.zoom_controls());
        assert!(bp.compact_layout());

        let bp = Breakpoints::new(992.0);
        assert!(bp.zoom_controls());
        assert!(!bp.compact_layout());

        let bp = Breakpoints::new(1280.0);
        assert!(!bp.zoom_controls());
        assert!(!bp.compact_layout());
    }

    #[test]
    fn resize_applies_after_debounce() {
        let t0 = Instant::now();
        let mut bp = Breakpoints::new(1280.0);

        bp.on_resize(600.0, t0);
        assert!(!bp.zoom_controls());
        bp.tick(t0 + ms(250));
        assert!(bp.zoom_controls());
        assert!(bp.compact_layout());
    }

    #[test]
    fn rapid_resizes_use_latest_width() {
        let t0 = Instant::now();
        let mut bp = Breakpoints::new(1280.0);

        bp.on_resize(600.0, t0);
        bp.on_resize(1100.0, t0 + ms(100));
        bp.tick(t0 + ms(350));
        assert!(!bp.zoom_controls());
        assert!(!bp.compact_layout());
    }

    #[test]
    fn boundary_widths() {
        // 768 exactly: not compact (strictly-less rule).
        let bp = Breakpoints::new(768.0);
        assert!(!bp.compact_layout());
        assert!(bp.zoom_controls());

        // Just above the zoom-controls cutoff.
        let bp = Breakpoints::new(992.1);
        assert!(!bp.zoom_controls());
    }
}
