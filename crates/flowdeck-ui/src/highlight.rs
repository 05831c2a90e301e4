#![forbid(unsafe_code)]

//! Proximity-based arrow highlighting.
//!
//! When a node is hovered, every arrow whose path passes close enough to
//! the node's center is emphasized and the rest are dimmed. "Close enough"
//! is a fixed Euclidean threshold over the arrow's parsed path points —
//! a heuristic, not graph adjacency. An arrow that merely passes near a
//! node will light up, and an arrow whose nearest path point sits just
//! outside the threshold will not; both are accepted behavior.
//!
//! # Invariants
//!
//! 1. The boundary is exclusive: an arrow at exactly the threshold
//!    distance is NOT connected.
//! 2. With no hovered node, this component contributes nothing — every
//!    arrow renders its resting (or pulse) visual.
//! 3. Hover-leave restores all arrows to exactly the default visual.

use flowdeck_core::diagram::{Diagram, DiagramArrow, NodeId};
use flowdeck_core::geometry::Point;
use flowdeck_style::theme::Theme;
use flowdeck_style::visual::{ArrowVisual, Glow, NodeVisual, Transform};
use tracing::debug;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for the proximity highlighter.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HighlightConfig {
    /// Connection distance threshold in diagram units. Exclusive: a path
    /// point at exactly this distance does not connect.
    pub threshold: f32,

    /// Opacity applied to arrows not connected to the hovered node.
    pub dim_opacity: f32,

    /// Stroke width of connected arrows.
    pub connected_stroke: f32,

    /// Glow radius of connected arrows.
    pub glow_radius: f32,

    /// Glow intensity (alpha) of connected arrows.
    pub glow_alpha: f32,

    /// Scale applied to the hovered node (merged with other transforms).
    pub hover_scale: f32,

    /// Glow radius of the hovered node.
    pub hover_glow_radius: f32,

    /// Glow intensity (alpha) of the hovered node.
    pub hover_glow_alpha: f32,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            threshold: 80.0,
            dim_opacity: 0.3,
            connected_stroke: 3.0,
            glow_radius: 6.0,
            glow_alpha: 0.6,
            hover_scale: 1.05,
            hover_glow_radius: 15.0,
            hover_glow_alpha: 0.5,
        }
    }
}

// ---------------------------------------------------------------------------
// ProximityHighlighter
// ---------------------------------------------------------------------------

/// Stateful hover highlighter.
///
/// Feed hover transitions via [`hover_enter`](Self::hover_enter) /
/// [`hover_leave`](Self::hover_leave); read visuals back with
/// [`arrow_visuals`](Self::arrow_visuals) and
/// [`node_visual`](Self::node_visual).
#[derive(Debug)]
pub struct ProximityHighlighter {
    config: HighlightConfig,

    /// Currently hovered node (None = no hover, nothing highlighted).
    hovered: Option<NodeId>,

    /// Diagnostic: total hover adoptions.
    hovers: u64,
}

impl ProximityHighlighter {
    /// Create a highlighter with the given configuration.
    #[must_use]
    pub fn new(config: HighlightConfig) -> Self {
        Self {
            config,
            hovered: None,
            hovers: 0,
        }
    }

    /// The currently hovered node.
    #[inline]
    #[must_use]
    pub fn hovered(&self) -> Option<NodeId> {
        self.hovered
    }

    /// Get a reference to the configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &HighlightConfig {
        &self.config
    }

    /// Diagnostic: total hover adoptions.
    #[inline]
    #[must_use]
    pub fn hover_count(&self) -> u64 {
        self.hovers
    }

    /// Pointer entered `node`. A new hover replaces any prior one — rapid
    /// enter/enter without an intervening leave never leaves two active.
    pub fn hover_enter(&mut self, node: NodeId) {
        debug!(node = node.0, "hover enter");
        self.hovered = Some(node);
        self.hovers += 1;
    }

    /// Pointer left `node`. Ignored if some other node is now hovered
    /// (its enter already replaced this one).
    pub fn hover_leave(&mut self, node: NodeId) {
        if self.hovered == Some(node) {
            debug!(node = node.0, "hover leave");
            self.hovered = None;
        }
    }

    /// Drop any hover state.
    pub fn reset(&mut self) {
        self.hovered = None;
    }

    /// Whether `arrow` counts as connected to a node centered at `center`.
    ///
    /// True iff the minimum distance from any of the arrow's path points
    /// to `center` is strictly below the threshold. Arrows with no parsed
    /// points are never connected.
    #[must_use]
    pub fn is_connected(&self, arrow: &DiagramArrow, center: Point) -> bool {
        arrow
            .points
            .iter()
            .any(|p| p.distance_to(center) < self.config.threshold)
    }

    /// Visuals for every arrow under the current hover, in arrow order.
    ///
    /// Returns `None` when nothing is hovered (or the hovered id is not in
    /// the diagram) — the caller falls back to resting/pulse visuals.
    #[must_use]
    pub fn arrow_visuals(&self, diagram: &Diagram, theme: &Theme) -> Option<Vec<ArrowVisual>> {
        let node = diagram.node(self.hovered?)?;
        let center = node.bounds.center();

        Some(
            diagram
                .arrows()
                .iter()
                .map(|arrow| {
                    if self.is_connected(arrow, center) {
                        ArrowVisual {
                            opacity: 1.0,
                            stroke_width: self.config.connected_stroke,
                            glow: Some(Glow::new(
                                theme
                                    .arrow_color(arrow.category)
                                    .with_alpha(self.config.glow_alpha),
                                self.config.glow_radius,
                            )),
                        }
                    } else {
                        ArrowVisual {
                            opacity: self.config.dim_opacity,
                            ..ArrowVisual::default()
                        }
                    }
                })
                .collect(),
        )
    }

    /// Hover contribution to `node`'s visual: scale-up, glow, raised
    /// z-order. Identity/default for non-hovered nodes.
    #[must_use]
    pub fn node_visual(&self, node: NodeId, diagram: &Diagram, theme: &Theme) -> NodeVisual {
        if self.hovered != Some(node) {
            return NodeVisual::default();
        }
        let Some(n) = diagram.node(node) else {
            return NodeVisual::default();
        };
        NodeVisual {
            opacity: 1.0,
            transform: Transform::scale(self.config.hover_scale),
            glow: Some(Glow::new(
                theme
                    .node_glow(n.category)
                    .with_alpha(self.config.hover_glow_alpha),
                self.config.hover_glow_radius,
            )),
            raised: true,
        }
    }
}

impl Default for ProximityHighlighter {
    fn default() -> Self {
        Self::new(HighlightConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use flowdeck_core::diagram::{ArrowCategory, DiagramNode, NodeCategory};
    use flowdeck_core::geometry::Rect;

    fn diagram_with_arrow(points: Vec<Point>) -> (Diagram, NodeId) {
        let mut d = Diagram::new();
        // Node centered at (100, 100).
        let id = d.push_node(DiagramNode::new(
            NodeCategory::Process,
            Rect::new(50.0, 75.0, 100.0, 50.0),
            vec!["Step".into()],
        ));
        d.push_arrow(DiagramArrow::new(ArrowCategory::Neutral, points));
        (d, id)
    }

    // --- Connection classification ---

    #[test]
    fn point_inside_threshold_connects() {
        let (d, id) = diagram_with_arrow(vec![Point::new(100.0, 179.9)]);
        let mut h = ProximityHighlighter::default();
        h.hover_enter(id);
        let visuals = h.arrow_visuals(&d, &Theme::default()).unwrap();
        assert_eq!(visuals[0].opacity, 1.0);
        assert!(visuals[0].glow.is_some());
    }

    #[test]
    fn boundary_is_exclusive() {
        // Nearest point exactly 80 units below the center: not connected.
        let (d, id) = diagram_with_arrow(vec![Point::new(100.0, 180.0)]);
        let mut h = ProximityHighlighter::default();
        h.hover_enter(id);
        let visuals = h.arrow_visuals(&d, &Theme::default()).unwrap();
        assert_eq!(visuals[0].opacity, 0.3);
        assert!(visuals[0].glow.is_none());
    }

    #[test]
    fn any_point_may_connect_not_just_endpoints() {
        let (d, id) = diagram_with_arrow(vec![
            Point::new(500.0, 500.0),
            Point::new(110.0, 110.0),
            Point::new(900.0, 900.0),
        ]);
        let mut h = ProximityHighlighter::default();
        h.hover_enter(id);
        let visuals = h.arrow_visuals(&d, &Theme::default()).unwrap();
        assert_eq!(visuals[0].stroke_width, 3.0);
    }

    #[test]
    fn empty_path_never_connects() {
        let (d, id) = diagram_with_arrow(vec![]);
        let mut h = ProximityHighlighter::default();
        h.hover_enter(id);
        let visuals = h.arrow_visuals(&d, &Theme::default()).unwrap();
        assert_eq!(visuals[0].opacity, 0.3);
    }

    // --- Hover lifecycle ---

    #[test]
    fn no_hover_contributes_nothing() {
        let (d, _) = diagram_with_arrow(vec![Point::new(100.0, 100.0)]);
        let h = ProximityHighlighter::default();
        assert!(h.arrow_visuals(&d, &Theme::default()).is_none());
    }

    #[test]
    fn leave_clears_hover() {
        let (d, id) = diagram_with_arrow(vec![Point::new(100.0, 100.0)]);
        let mut h = ProximityHighlighter::default();
        h.hover_enter(id);
        h.hover_leave(id);
        assert!(h.hovered().is_none());
        assert!(h.arrow_visuals(&d, &Theme::default()).is_none());
    }

    #[test]
    fn stale_leave_does_not_clear_new_hover() {
        let mut d = Diagram::new();
        let a = d.push_node(DiagramNode::new(
            NodeCategory::Process,
            Rect::new(0.0, 0.0, 10.0, 10.0),
            vec![],
        ));
        let b = d.push_node(DiagramNode::new(
            NodeCategory::Decision,
            Rect::new(100.0, 0.0, 10.0, 10.0),
            vec![],
        ));

        let mut h = ProximityHighlighter::default();
        h.hover_enter(a);
        h.hover_enter(b);
        // Out-of-order leave for the old node must not drop the new hover.
        h.hover_leave(a);
        assert_eq!(h.hovered(), Some(b));
    }

    #[test]
    fn hovered_node_scales_and_glows() {
        let (d, id) = diagram_with_arrow(vec![]);
        let mut h = ProximityHighlighter::default();
        h.hover_enter(id);

        let v = h.node_visual(id, &d, &Theme::default());
        assert!((v.transform.scale - 1.05).abs() < 1e-6);
        assert!(v.raised);
        assert!(v.glow.is_some());

        let other = h.node_visual(NodeId(42), &d, &Theme::default());
        assert_eq!(other, NodeVisual::default());
    }

    #[test]
    fn unknown_hovered_id_degrades_to_none() {
        let (d, _) = diagram_with_arrow(vec![Point::new(0.0, 0.0)]);
        let mut h = ProximityHighlighter::default();
        h.hover_enter(NodeId(999));
        assert!(h.arrow_visuals(&d, &Theme::default()).is_none());
    }
}
