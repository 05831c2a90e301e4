#![forbid(unsafe_code)]

//! Hover tooltip presenter.
//!
//! One floating label follows the hovered node: category line, title,
//! joined subtitle fragments, and an activation hint. At most one tooltip
//! exists at a time — showing a new one first tears down whatever was
//! live, so rapid hover sequences can never stack labels.
//!
//! Lifecycle: `show` enters FadingIn; after the fade duration the tooltip
//! is Visible; `hide` enters FadingOut and the instance is dropped once
//! the fade completes. All transitions advance on [`tick`](TooltipPresenter::tick).

use std::time::{Duration, Instant};

use flowdeck_core::diagram::{Diagram, NodeId};
use flowdeck_core::geometry::Point;
use tracing::trace;
use unicode_width::UnicodeWidthStr;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for the tooltip presenter.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TooltipConfig {
    /// Fade in/out duration.
    pub fade: Duration,

    /// Estimated panel height, used for the above/below decision.
    pub estimated_height: f32,

    /// Gap between the node edge and the panel.
    pub gap: f32,

    /// Maximum panel width.
    pub max_width: f32,

    /// Approximate rendered width of one text column.
    pub char_width: f32,

    /// Horizontal padding inside the panel (each side).
    pub padding_x: f32,

    /// Separator between subtitle fragments.
    pub separator: String,

    /// Trailing activation hint.
    pub hint: String,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            fade: Duration::from_millis(200),
            estimated_height: 80.0,
            gap: 10.0,
            max_width: 200.0,
            char_width: 7.4,
            padding_x: 12.0,
            separator: " - ".to_string(),
            hint: "Click for more details".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tooltip content
// ---------------------------------------------------------------------------

/// Where the panel sits relative to its node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipPlacement {
    /// Panel above the node, anchored at its bottom edge.
    Above,
    /// Panel below the node, anchored at its top edge.
    Below,
}

/// Lifecycle phase of the live tooltip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipPhase {
    /// Fading in after show.
    FadingIn,
    /// Fully visible.
    Visible,
    /// Fading out; removed when the fade completes.
    FadingOut,
}

/// A fully laid-out tooltip.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    /// The node this tooltip annotates.
    pub node: NodeId,
    /// Category line ("Process Node", …).
    pub category_label: &'static str,
    /// Node title (first text line).
    pub title: String,
    /// Joined subtitle fragments, when the node has more than one line.
    pub subtitle: Option<String>,
    /// Activation hint line.
    pub hint: String,
    /// Panel placement relative to the node.
    pub placement: TooltipPlacement,
    /// Anchor point: horizontally the node center; vertically the node
    /// edge offset by the configured gap.
    pub anchor: Point,
    /// Panel width after content measurement and clamping.
    pub width: f32,
}

#[derive(Debug)]
struct Live {
    tooltip: Tooltip,
    phase: TooltipPhase,
    since: Instant,
}

// ---------------------------------------------------------------------------
// TooltipPresenter
// ---------------------------------------------------------------------------

/// Owns the single live tooltip, if any.
#[derive(Debug)]
pub struct TooltipPresenter {
    config: TooltipConfig,
    live: Option<Live>,
}

impl TooltipPresenter {
    /// Create a presenter with the given configuration.
    #[must_use]
    pub fn new(config: TooltipConfig) -> Self {
        Self { config, live: None }
    }

    /// Get a reference to the configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &TooltipConfig {
        &self.config
    }

    /// Show a tooltip for `node`, replacing any live instance.
    ///
    /// No-op when the node is unknown or has no text lines.
    pub fn show(&mut self, diagram: &Diagram, node: NodeId, viewport_height: f32, now: Instant) {
        let Some(n) = diagram.node(node) else {
            return;
        };
        let Some(title) = n.title() else {
            return;
        };

        let subtitle = {
            let s = n.subtitle(&self.config.separator);
            if s.is_empty() { None } else { Some(s) }
        };

        let placement = self.pick_placement(n.bounds.top(), viewport_height - n.bounds.bottom());
        let center = n.bounds.center();
        let anchor = match placement {
            TooltipPlacement::Above => Point::new(center.x, n.bounds.top() - self.config.gap),
            TooltipPlacement::Below => Point::new(center.x, n.bounds.bottom() + self.config.gap),
        };

        let width = self.measure_width(
            n.category.label(),
            title,
            subtitle.as_deref(),
        );

        trace!(node = node.0, ?placement, "tooltip show");
        self.live = Some(Live {
            tooltip: Tooltip {
                node,
                category_label: n.category.label(),
                title: title.to_string(),
                subtitle,
                hint: self.config.hint.clone(),
                placement,
                anchor,
                width,
            },
            phase: TooltipPhase::FadingIn,
            since: now,
        });
    }

    /// Begin fading out the live tooltip, but only if it belongs to
    /// `node`. A stale leave for an already-replaced hover is a no-op,
    /// matching the highlighter's latest-event-wins rule.
    pub fn hide_for(&mut self, node: NodeId, now: Instant) {
        if self.current().is_some_and(|t| t.node == node) {
            self.hide(now);
        }
    }

    /// Begin fading out the live tooltip.
    pub fn hide(&mut self, now: Instant) {
        if let Some(live) = &mut self.live
            && live.phase != TooltipPhase::FadingOut
        {
            trace!(node = live.tooltip.node.0, "tooltip hide");
            live.phase = TooltipPhase::FadingOut;
            live.since = now;
        }
    }

    /// Advance fades; removes the instance once its fade-out completes.
    pub fn tick(&mut self, now: Instant) {
        let fade = self.config.fade;
        if let Some(live) = &mut self.live {
            let elapsed = now.saturating_duration_since(live.since);
            match live.phase {
                TooltipPhase::FadingIn if elapsed >= fade => {
                    live.phase = TooltipPhase::Visible;
                }
                TooltipPhase::FadingOut if elapsed >= fade => {
                    self.live = None;
                }
                _ => {}
            }
        }
    }

    /// The live tooltip, if any.
    #[must_use]
    pub fn current(&self) -> Option<&Tooltip> {
        self.live.as_ref().map(|l| &l.tooltip)
    }

    /// Lifecycle phase of the live tooltip.
    #[must_use]
    pub fn phase(&self) -> Option<TooltipPhase> {
        self.live.as_ref().map(|l| l.phase)
    }

    /// Current opacity in [0, 1]; 0.0 when no tooltip is live.
    #[must_use]
    pub fn opacity(&self, now: Instant) -> f32 {
        let Some(live) = &self.live else {
            return 0.0;
        };
        let progress = (now.saturating_duration_since(live.since).as_secs_f32()
            / self.config.fade.as_secs_f32())
        .clamp(0.0, 1.0);
        match live.phase {
            TooltipPhase::FadingIn => progress,
            TooltipPhase::Visible => 1.0,
            TooltipPhase::FadingOut => 1.0 - progress,
        }
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Prefer above; fall back to below only when the room above can't fit
    /// the panel and there is more room below.
    fn pick_placement(&self, space_above: f32, space_below: f32) -> TooltipPlacement {
        if space_above > self.config.estimated_height || space_above > space_below {
            TooltipPlacement::Above
        } else {
            TooltipPlacement::Below
        }
    }

    /// Panel width from the widest content line, clamped to the maximum.
    fn measure_width(&self, category: &str, title: &str, subtitle: Option<&str>) -> f32 {
        let widest = [Some(category), Some(title), subtitle, Some(self.config.hint.as_str())]
            .into_iter()
            .flatten()
            .map(UnicodeWidthStr::width)
            .max()
            .unwrap_or(0);
        (widest as f32 * self.config.char_width + 2.0 * self.config.padding_x)
            .min(self.config.max_width)
    }
}

impl Default for TooltipPresenter {
    fn default() -> Self {
        Self::new(TooltipConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
