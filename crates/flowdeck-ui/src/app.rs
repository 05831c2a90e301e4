#![forbid(unsafe_code)]

//! The interaction binder.
//!
//! [`FlowdeckApp`] owns one instance of every component and is the only
//! entry point the host talks to: feed it [`Event`]s with the current
//! instant, send [`Event::Tick`] from the frame loop, and read the merged
//! [`Scene`] back. Update and view are split the Elm way — `update`
//! mutates state and may return an [`Effect`] for the host to execute;
//! `scene` is pure.
//!
//! Routing rules worth knowing:
//!
//! - While a modal is live, Escape goes to the modal and nothing else;
//!   other keys still reach the zoom controller.
//! - Hover drives the highlighter and the tooltip together.
//! - Activation (click or Enter/Space on a node, delivered by the host as
//!   [`Event::NodeActivate`]) runs the detail lookup and opens the modal.
//! - Scroll feeds the debounced header effect and the reveal pass;
//!   resize feeds the breakpoints, whose result gates the zoom UI.

use std::time::{Duration, Instant};

use flowdeck_core::diagram::{Diagram, NodeId};
use flowdeck_core::event::{Event, KeyCode};
use flowdeck_core::geometry::Rect;
use flowdeck_style::theme::Theme;
use flowdeck_style::visual::{ArrowVisual, NodeVisual, Transform};
use tracing::trace;

use crate::chrome::{AnchorScroller, Breakpoints, HeaderEffect, RevealTracker, ScrollCommand};
use crate::detail::DetailCatalog;
use crate::entrance::{ArrowPulseAnimator, EntranceAnimator, EntranceConfig, PulseConfig};
use crate::highlight::{HighlightConfig, ProximityHighlighter};
use crate::modal::{Modal, ModalPresenter};
use crate::tooltip::{Tooltip, TooltipPresenter};
use crate::zoom::{ZoomController, ZoomEasing, ZoomIndicator};

// ---------------------------------------------------------------------------
// Effects
// ---------------------------------------------------------------------------

/// A side effect the host should execute after an update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// Scroll the page.
    ScrollTo(ScrollCommand),
}

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

/// The live tooltip with its current opacity.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipView {
    /// Content and layout.
    pub tooltip: Tooltip,
    /// Current opacity in [0, 1].
    pub opacity: f32,
}

/// The live modal with its current transition values.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalView {
    /// Content and layout.
    pub modal: Modal,
    /// Overlay opacity in [0, 1].
    pub opacity: f32,
    /// Vertical offset of the content panel.
    pub panel_offset: f32,
}

/// Zoom output: the diagram transform plus indicator state.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomView {
    /// Transform to apply to the diagram.
    pub transform: Transform,
    /// Easing for the next transition.
    pub easing: ZoomEasing,
    /// Percentage indicator while visible.
    pub indicator: Option<ZoomIndicator>,
    /// Whether the on-screen controls exist at the current breakpoint.
    pub controls_active: bool,
    /// Accessible label for the zoom container.
    pub accessible_label: String,
}

/// Complete declarative render state. Rendering the same scene twice
/// produces the same pixels; nothing in here is imperative.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Per-node visuals, indexed like the diagram's nodes.
    pub nodes: Vec<NodeVisual>,
    /// Per-arrow visuals, indexed like the diagram's arrows.
    pub arrows: Vec<ArrowVisual>,
    /// The tooltip, while one is live.
    pub tooltip: Option<TooltipView>,
    /// The modal, while one is live.
    pub modal: Option<ModalView>,
    /// Zoom state.
    pub zoom: ZoomView,
    /// Whether the header shows its compact visual.
    pub header_compact: bool,
    /// Whether the compact diagram layout is active.
    pub compact_layout: bool,
}

// ---------------------------------------------------------------------------
// FlowdeckApp
// ---------------------------------------------------------------------------

/// The application binder: every component behind one update/scene pair.
#[derive(Debug)]
pub struct FlowdeckApp {
    diagram: Diagram,
    theme: Theme,
    catalog: DetailCatalog,

    highlighter: ProximityHighlighter,
    tooltip: TooltipPresenter,
    modal: ModalPresenter,
    zoom: ZoomController,
    header: HeaderEffect,
    reveal: RevealTracker,
    anchors: AnchorScroller,
    breakpoints: Breakpoints,
    entrance: EntranceAnimator,
    pulse: ArrowPulseAnimator,

    viewport: Rect,
    scroll_offset: f32,
    sections: Vec<(String, Rect)>,
    last_tick: Option<Instant>,
}

impl FlowdeckApp {
    /// Create the binder for a diagram in a viewport.
    ///
    /// The viewport rect is in page coordinates (x/y are the scroll
    /// position; usually zero at load).
    #[must_use]
    pub fn new(diagram: Diagram, viewport: Rect) -> Self {
        let breakpoints = Breakpoints::new(viewport.width);
        let mut zoom = ZoomController::default();
        zoom.set_controls_active(breakpoints.zoom_controls());

        let entrance = EntranceAnimator::new(diagram.node_count(), EntranceConfig::default());
        let pulse = ArrowPulseAnimator::new(diagram.arrow_count(), PulseConfig::default());

        Self {
            diagram,
            theme: Theme::default(),
            catalog: DetailCatalog::default(),
            highlighter: ProximityHighlighter::new(HighlightConfig::default()),
            tooltip: TooltipPresenter::default(),
            modal: ModalPresenter::default(),
            zoom,
            header: HeaderEffect::new(),
            reveal: RevealTracker::default(),
            anchors: AnchorScroller::default(),
            breakpoints,
            entrance,
            pulse,
            viewport,
            scroll_offset: 0.0,
            sections: Vec::new(),
            last_tick: None,
        }
    }

    /// Replace the theme (builder).
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Replace the detail catalog (builder).
    #[must_use]
    pub fn with_catalog(mut self, catalog: DetailCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// The diagram snapshot.
    #[must_use]
    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    /// Accessible label for a node; generic fallback for unknown ids.
    #[must_use]
    pub fn node_label(&self, id: NodeId) -> String {
        self.diagram
            .node(id)
            .map(|n| n.accessible_label())
            .unwrap_or_else(|| "Flowchart node".to_string())
    }

    /// Register a page section for reveal tracking.
    pub fn observe_section(&mut self, id: impl Into<String>) {
        self.reveal.observe(id);
    }

    /// Update (or add) a section's page-coordinate rect, used by both the
    /// reveal pass and anchor resolution.
    pub fn set_section_rect(&mut self, id: impl Into<String>, rect: Rect) {
        let id = id.into();
        if let Some(entry) = self.sections.iter_mut().find(|(sid, _)| *sid == id) {
            entry.1 = rect;
        } else {
            self.sections.push((id, rect));
        }
    }

    /// Whether a section has revealed.
    #[must_use]
    pub fn is_section_revealed(&self, id: &str) -> bool {
        self.reveal.is_revealed(id)
    }

    /// Process one event. Returns an effect for the host, if any.
    pub fn update(&mut self, event: Event, now: Instant) -> Option<Effect> {
        trace!(?event, "update");
        match event {
            Event::HoverEnter(id) => {
                self.highlighter.hover_enter(id);
                self.tooltip
                    .show(&self.diagram, id, self.viewport.height, now);
                None
            }
            Event::HoverLeave(id) => {
                self.highlighter.hover_leave(id);
                self.tooltip.hide_for(id, now);
                None
            }
            Event::NodeActivate(id) => {
                self.open_details(id, now);
                None
            }
            Event::PointerPress(pos) => {
                if self.modal.is_active() {
                    self.modal.overlay_press(pos, now);
                }
                None
            }
            Event::Key(key) => {
                if self.modal.is_active() && key.code == KeyCode::Escape {
                    self.modal.escape(now);
                } else {
                    self.zoom.key(key, now);
                }
                None
            }
            Event::Touch(touch) => {
                self.zoom.touch(&touch, now);
                None
            }
            Event::Scroll { offset } => {
                self.scroll_offset = offset;
                self.header.on_scroll(offset, now);
                self.run_reveal_pass();
                None
            }
            Event::AnchorActivate(target) => {
                let top = self
                    .sections
                    .iter()
                    .find(|(id, _)| *id == target)
                    .map(|(_, rect)| rect.y);
                self.anchors.resolve(top).map(Effect::ScrollTo)
            }
            Event::Resize { width, height } => {
                self.viewport.width = width;
                self.viewport.height = height;
                self.breakpoints.on_resize(width, now);
                self.run_reveal_pass();
                None
            }
            Event::ZoomFocus(focused) => {
                self.zoom.set_focused(focused);
                None
            }
            Event::Zoom(action) => {
                self.zoom.apply(action, now);
                None
            }
            Event::ModalClose => {
                self.modal.close_button(now);
                None
            }
            Event::Tick => {
                self.tick(now);
                None
            }
        }
    }

    /// The merged declarative render state.
    #[must_use]
    pub fn scene(&self, now: Instant) -> Scene {
        let nodes = (0..self.diagram.node_count())
            .map(|i| {
                let id = NodeId(i);
                let entrance = self.entrance.node_visual(i);
                let hover = self.highlighter.node_visual(id, &self.diagram, &self.theme);
                NodeVisual {
                    opacity: entrance.opacity * hover.opacity,
                    // Entrance scale and hover scale both apply; neither
                    // overwrites the other.
                    transform: entrance.transform.merge(hover.transform),
                    glow: hover.glow,
                    raised: hover.raised,
                }
            })
            .collect();

        let arrows = match self.highlighter.arrow_visuals(&self.diagram, &self.theme) {
            Some(highlighted) => highlighted,
            None => self
                .diagram
                .arrows()
                .iter()
                .enumerate()
                .map(|(i, arrow)| self.pulse.arrow_visual(i, arrow.category, &self.theme))
                .collect(),
        };

        Scene {
            nodes,
            arrows,
            tooltip: self.tooltip.current().map(|tooltip| TooltipView {
                tooltip: tooltip.clone(),
                opacity: self.tooltip.opacity(now),
            }),
            modal: self.modal.current().map(|modal| ModalView {
                modal: modal.clone(),
                opacity: self.modal.opacity(now),
                panel_offset: self.modal.panel_offset(now),
            }),
            zoom: ZoomView {
                transform: self.zoom.transform(),
                easing: self.zoom.easing(),
                indicator: self.zoom.indicator(),
                controls_active: self.zoom.controls_active(),
                accessible_label: self.zoom.accessible_label(),
            },
            header_compact: self.header.compact(),
            compact_layout: self.breakpoints.compact_layout(),
        }
    }

    // -----------------------------------------------------------------------
    // Component access (hosts and tests)
    // -----------------------------------------------------------------------

    /// The zoom controller.
    #[must_use]
    pub fn zoom(&self) -> &ZoomController {
        &self.zoom
    }

    /// The modal presenter.
    #[must_use]
    pub fn modal(&self) -> &ModalPresenter {
        &self.modal
    }

    /// The tooltip presenter.
    #[must_use]
    pub fn tooltip(&self) -> &TooltipPresenter {
        &self.tooltip
    }

    /// The detail catalog.
    #[must_use]
    pub fn catalog(&self) -> &DetailCatalog {
        &self.catalog
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    fn open_details(&mut self, id: NodeId, now: Instant) {
        let Some(node) = self.diagram.node(id) else {
            return;
        };
        let Some(title) = node.title() else {
            return;
        };
        let sections = self.catalog.sections_for(title);
        let viewport = Rect::new(
            0.0,
            0.0,
            self.viewport.width,
            self.viewport.height,
        );
        self.modal
            .open(format!("{title} Details"), sections, viewport, now);
    }

    fn run_reveal_pass(&mut self) {
        let viewport = Rect::new(
            0.0,
            self.scroll_offset,
            self.viewport.width,
            self.viewport.height,
        );
        let sections = &self.sections;
        self.reveal.update(viewport, |id| {
            sections
                .iter()
                .find(|(sid, _)| sid == id)
                .map(|(_, rect)| *rect)
        });
    }

    fn tick(&mut self, now: Instant) {
        let dt = self
            .last_tick
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or(Duration::ZERO);
        self.last_tick = Some(now);

        self.entrance.tick(dt);
        self.pulse.tick(dt);

        self.header.tick(now);
        self.breakpoints.tick(now);
        self.zoom
            .set_controls_active(self.breakpoints.zoom_controls());
        self.tooltip.tick(now);
        self.modal.tick(now);
        self.zoom.tick(now);
    }
}
