#![forbid(unsafe_code)]

//! Details modal presenter.
//!
//! Lifecycle: `Closed → Opening → Open → Closing → Closed`. Opening fades
//! the overlay in while the content panel slides up from a fixed offset
//! with a springy back-out ease. Three dismissal paths — close button,
//! press on the overlay background outside the panel, Escape — all enter
//! Closing, and after the close duration the instance is removed.
//!
//! Only one modal exists at a time: opening while one is live destroys
//! the prior instance immediately, with no exit transition. Key handling
//! is scoped to the live instance — once closed, Escape is a no-op, so a
//! dismissal can never leak into a later, unrelated modal.

use std::time::{Duration, Instant};

use flowdeck_core::animation::back_out;
use flowdeck_core::geometry::{Point, Rect};
use tracing::debug;

use crate::detail::DetailSection;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for the modal presenter.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModalConfig {
    /// Entry transition duration (overlay fade + panel slide).
    pub open_duration: Duration,

    /// Exit transition duration; the instance is removed when it elapses.
    pub close_duration: Duration,

    /// Initial downward offset of the content panel.
    pub slide_offset: f32,

    /// Maximum content panel width.
    pub max_panel_width: f32,

    /// Fraction of the viewport height the panel may occupy.
    pub max_height_fraction: f32,

    /// Horizontal margin kept around the panel on narrow viewports.
    pub viewport_margin: f32,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            open_duration: Duration::from_millis(400),
            close_duration: Duration::from_millis(300),
            slide_offset: 30.0,
            max_panel_width: 550.0,
            max_height_fraction: 0.8,
            viewport_margin: 32.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Modal content
// ---------------------------------------------------------------------------

/// Lifecycle phase of the live modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalPhase {
    /// Entry transition running.
    Opening,
    /// Idle, awaiting dismissal.
    Open,
    /// Exit transition running; removed when it completes.
    Closing,
}

/// The live modal's content and layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Modal {
    /// Header title.
    pub title: String,
    /// Body sections in render order.
    pub sections: Vec<DetailSection>,
    /// Content panel rectangle in viewport coordinates.
    pub panel: Rect,
}

#[derive(Debug)]
struct Live {
    modal: Modal,
    phase: ModalPhase,
    since: Instant,
}

// ---------------------------------------------------------------------------
// ModalPresenter
// ---------------------------------------------------------------------------

/// Owns the single live modal, if any.
#[derive(Debug)]
pub struct ModalPresenter {
    config: ModalConfig,
    live: Option<Live>,
}

impl ModalPresenter {
    /// Create a presenter with the given configuration.
    #[must_use]
    pub fn new(config: ModalConfig) -> Self {
        Self { config, live: None }
    }

    /// Get a reference to the configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ModalConfig {
        &self.config
    }

    /// Open a modal, destroying any live instance immediately.
    pub fn open(
        &mut self,
        title: impl Into<String>,
        sections: Vec<DetailSection>,
        viewport: Rect,
        now: Instant,
    ) {
        let title = title.into();
        debug!(%title, "modal open");
        let panel = self.layout_panel(viewport, sections.len());
        self.live = Some(Live {
            modal: Modal {
                title,
                sections,
                panel,
            },
            phase: ModalPhase::Opening,
            since: now,
        });
    }

    /// Close-button activation.
    pub fn close_button(&mut self, now: Instant) {
        self.begin_close(now);
    }

    /// Pointer press somewhere on the overlay. Dismisses only when the
    /// press lands outside the content panel.
    pub fn overlay_press(&mut self, pos: Point, now: Instant) {
        let on_panel = self
            .live
            .as_ref()
            .is_some_and(|l| l.modal.panel.contains(pos));
        if !on_panel {
            self.begin_close(now);
        }
    }

    /// Escape key. No-op when nothing is live.
    pub fn escape(&mut self, now: Instant) {
        self.begin_close(now);
    }

    /// Advance transitions; removes the instance when Closing completes.
    pub fn tick(&mut self, now: Instant) {
        if let Some(live) = &mut self.live {
            let elapsed = now.saturating_duration_since(live.since);
            match live.phase {
                ModalPhase::Opening if elapsed >= self.config.open_duration => {
                    live.phase = ModalPhase::Open;
                }
                ModalPhase::Closing if elapsed >= self.config.close_duration => {
                    debug!("modal removed");
                    self.live = None;
                }
                _ => {}
            }
        }
    }

    /// The live modal, if any.
    #[must_use]
    pub fn current(&self) -> Option<&Modal> {
        self.live.as_ref().map(|l| &l.modal)
    }

    /// Lifecycle phase of the live modal.
    #[must_use]
    pub fn phase(&self) -> Option<ModalPhase> {
        self.live.as_ref().map(|l| l.phase)
    }

    /// Whether a modal is live in a dismissable phase.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.phase(), Some(ModalPhase::Opening | ModalPhase::Open))
    }

    /// Overlay opacity in [0, 1]; 0.0 when nothing is live.
    #[must_use]
    pub fn opacity(&self, now: Instant) -> f32 {
        let Some(live) = &self.live else {
            return 0.0;
        };
        match live.phase {
            ModalPhase::Opening => self.progress(live, now, self.config.open_duration),
            ModalPhase::Open => 1.0,
            ModalPhase::Closing => 1.0 - self.progress(live, now, self.config.close_duration),
        }
    }

    /// Vertical offset of the content panel: slides up with a back-out
    /// ease on open, back down on close. 0.0 at rest.
    #[must_use]
    pub fn panel_offset(&self, now: Instant) -> f32 {
        let Some(live) = &self.live else {
            return 0.0;
        };
        let offset = self.config.slide_offset;
        match live.phase {
            ModalPhase::Opening => {
                let t = self.progress(live, now, self.config.open_duration);
                offset * (1.0 - back_out(t))
            }
            ModalPhase::Open => 0.0,
            ModalPhase::Closing => {
                offset * self.progress(live, now, self.config.close_duration)
            }
        }
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    fn begin_close(&mut self, now: Instant) {
        if let Some(live) = &mut self.live
            && live.phase != ModalPhase::Closing
        {
            debug!(title = %live.modal.title, "modal closing");
            live.phase = ModalPhase::Closing;
            live.since = now;
        }
    }

    fn progress(&self, live: &Live, now: Instant, duration: Duration) -> f32 {
        if duration.is_zero() {
            return 1.0;
        }
        (now.saturating_duration_since(live.since).as_secs_f32() / duration.as_secs_f32())
            .clamp(0.0, 1.0)
    }

    /// Center the content panel in the viewport, capped in width and
    /// height. Height is a rough per-section estimate; the host scrolls
    /// overflow internally.
    fn layout_panel(&self, viewport: Rect, section_count: usize) -> Rect {
        const HEADER_HEIGHT: f32 = 72.0;
        const SECTION_HEIGHT: f32 = 96.0;

        let width = self
            .config
            .max_panel_width
            .min(viewport.width - 2.0 * self.config.viewport_margin)
            .max(0.0);
        let estimated = HEADER_HEIGHT + SECTION_HEIGHT * section_count as f32;
        let height = estimated
            .min(viewport.height * self.config.max_height_fraction)
            .max(0.0);

        Rect::new(
            viewport.x + (viewport.width - width) / 2.0,
            viewport.y + (viewport.height - height) / 2.0,
            width,
            height,
        )
    }
}

impl Default for ModalPresenter {
    fn default() -> Self {
        Self::new(ModalConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detail::DetailCatalog;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn viewport() -> Rect {
        Rect::new(0.0, 0.0, 1280.0, 800.0)
    }

    fn sections() -> Vec<DetailSection> {
        DetailCatalog::default().sections_for("User Login")
    }

    fn open_default(t0: Instant) -> ModalPresenter {
        let mut m = ModalPresenter::default();
        m.open("User Login Details", sections(), viewport(), t0);
        m
    }

    // --- Lifecycle ---

    #[test]
    fn opening_then_open() {
        let t0 = Instant::now();
        let mut m = open_default(t0);

        assert_eq!(m.phase(), Some(ModalPhase::Opening));
        m.tick(t0 + ms(399));
        assert_eq!(m.phase(), Some(ModalPhase::Opening));
        m.tick(t0 + ms(400));
        assert_eq!(m.phase(), Some(ModalPhase::Open));
    }

    #[test]
    fn close_button_runs_exit_then_removes() {
        let t0 = Instant::now();
        let mut m = open_default(t0);
        m.tick(t0 + ms(400));

        m.close_button(t0 + ms(500));
        assert_eq!(m.phase(), Some(ModalPhase::Closing));
        assert!(m.current().is_some());

        m.tick(t0 + ms(799));
        assert!(m.current().is_some());
        m.tick(t0 + ms(800));
        assert!(m.current().is_none());
    }

    #[test]
    fn escape_dismisses_while_live() {
        let t0 = Instant::now();
        let mut m = open_default(t0);
        m.escape(t0 + ms(100));
        assert_eq!(m.phase(), Some(ModalPhase::Closing));
    }

    #[test]
    fn escape_after_close_is_noop() {
        let t0 = Instant::now();
        let mut m = open_default(t0);
        m.escape(t0 + ms(100));
        m.tick(t0 + ms(400));
        assert!(m.current().is_none());

        // A later Escape must not resurrect or panic anything.
        m.escape(t0 + ms(500));
        assert!(m.current().is_none());
        assert_eq!(m.phase(), None);
    }

    #[test]
    fn dismissal_during_closing_does_not_restart_exit() {
        let t0 = Instant::now();
        let mut m = open_default(t0);
        m.close_button(t0 + ms(100));
        // Second trigger mid-exit: removal deadline stays at the first.
        m.escape(t0 + ms(300));
        m.tick(t0 + ms(400));
        assert!(m.current().is_none());
    }

    // --- Overlay clicks ---

    #[test]
    fn overlay_background_press_dismisses() {
        let t0 = Instant::now();
        let mut m = open_default(t0);
        m.tick(t0 + ms(400));

        m.overlay_press(Point::new(5.0, 5.0), t0 + ms(500));
        assert_eq!(m.phase(), Some(ModalPhase::Closing));
    }

    #[test]
    fn press_on_content_panel_does_not_dismiss() {
        let t0 = Instant::now();
        let mut m = open_default(t0);
        m.tick(t0 + ms(400));

        let panel = m.current().unwrap().panel;
        m.overlay_press(panel.center(), t0 + ms(500));
        assert_eq!(m.phase(), Some(ModalPhase::Open));
    }

    // --- Single instance ---

    #[test]
    fn reopen_destroys_prior_immediately() {
        let t0 = Instant::now();
        let mut m = open_default(t0);
        m.tick(t0 + ms(400));

        m.open(
            "Pro Plan? Details",
            DetailCatalog::default().sections_for("Pro Plan?"),
            viewport(),
            t0 + ms(500),
        );

        // Exactly one modal, showing the second's content, back in Opening.
        assert_eq!(m.current().unwrap().title, "Pro Plan? Details");
        assert_eq!(m.phase(), Some(ModalPhase::Opening));
    }

    // --- Animation outputs ---

    #[test]
    fn opacity_ramps_in_and_out() {
        let t0 = Instant::now();
        let mut m = open_default(t0);
        assert!(m.opacity(t0 + ms(200)) < 1.0);
        m.tick(t0 + ms(400));
        assert_eq!(m.opacity(t0 + ms(450)), 1.0);

        m.close_button(t0 + ms(500));
        let mid = m.opacity(t0 + ms(650));
        assert!(mid > 0.0 && mid < 1.0);
    }

    #[test]
    fn panel_slides_to_rest() {
        let t0 = Instant::now();
        let mut m = open_default(t0);
        assert_eq!(m.panel_offset(t0), 30.0);
        m.tick(t0 + ms(400));
        assert!(m.panel_offset(t0 + ms(400)).abs() < 1e-3);
    }

    // --- Layout ---

    #[test]
    fn panel_caps_width_and_centers() {
        let t0 = Instant::now();
        let m = open_default(t0);
        let panel = m.current().unwrap().panel;
        assert_eq!(panel.width, 550.0);
        assert!((panel.center().x - 640.0).abs() < 1e-3);
    }

    #[test]
    fn narrow_viewport_keeps_margin() {
        let t0 = Instant::now();
        let mut m = ModalPresenter::default();
        m.open(
            "T",
            sections(),
            Rect::new(0.0, 0.0, 400.0, 700.0),
            t0,
        );
        let panel = m.current().unwrap().panel;
        assert_eq!(panel.width, 400.0 - 64.0);
    }
}
