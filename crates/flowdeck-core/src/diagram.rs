#![forbid(unsafe_code)]

//! The diagram snapshot consumed by the interaction layer.
//!
//! The host builds a [`Diagram`] from whatever markup it renders (an SVG
//! tree, a canvas scene) and hands it over read-only. Nodes carry a
//! category, screen-space bounds, and their embedded text lines; arrows
//! carry a category and the point sequence parsed from their path
//! description. The layer never validates this structure — a diagram with
//! no nodes, or arrows with no points, simply produces no interactions.

use crate::geometry::{Point, Rect};

/// Identifier for a node within one diagram: its index in build order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub usize);

/// Closed set of node categories, from the host's classification tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeCategory {
    /// Workflow entry/exit marker.
    StartEnd,
    /// A processing step.
    Process,
    /// A branch point.
    Decision,
    /// An external system interaction.
    System,
}

impl NodeCategory {
    /// Human-readable category label, as shown in tooltips.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::StartEnd => "Start/End Node",
            Self::Process => "Process Node",
            Self::Decision => "Decision Node",
            Self::System => "System Node",
        }
    }
}

/// Closed set of arrow categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArrowCategory {
    /// A "yes" branch.
    Affirmative,
    /// A "no" branch.
    Negative,
    /// An unconditional connector.
    Neutral,
}

/// A visual node: category, on-screen bounds, and embedded text lines.
///
/// The first line is the title; any further lines are subtitle fragments.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiagramNode {
    /// Category from the host's classification tag.
    pub category: NodeCategory,
    /// Bounding box in diagram-local coordinates.
    pub bounds: Rect,
    /// Embedded text lines, title first. May be empty.
    pub lines: Vec<String>,
}

impl DiagramNode {
    /// Create a node.
    #[must_use]
    pub fn new(category: NodeCategory, bounds: Rect, lines: Vec<String>) -> Self {
        Self {
            category,
            bounds,
            lines,
        }
    }

    /// The node title: its first non-empty text line.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.lines
            .iter()
            .map(|l| l.trim())
            .find(|l| !l.is_empty())
    }

    /// Subtitle fragments (every non-empty line after the title) joined
    /// with `separator`. Empty string when there are none.
    #[must_use]
    pub fn subtitle(&self, separator: &str) -> String {
        let mut nonempty = self
            .lines
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty());
        let _title = nonempty.next();
        nonempty.collect::<Vec<_>>().join(separator)
    }

    /// Accessible label: all text lines joined with ", ", or the generic
    /// fallback for nodes with no text.
    #[must_use]
    pub fn accessible_label(&self) -> String {
        let joined = self
            .lines
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        if joined.is_empty() {
            "Flowchart node".to_string()
        } else {
            joined
        }
    }
}

/// A visual arrow: category plus the point sequence of its path.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiagramArrow {
    /// Category from the host's classification tag.
    pub category: ArrowCategory,
    /// Ordered points extracted from the path description. May be empty.
    pub points: Vec<Point>,
}

impl DiagramArrow {
    /// Create an arrow from an explicit point list.
    #[must_use]
    pub fn new(category: ArrowCategory, points: Vec<Point>) -> Self {
        Self { category, points }
    }

    /// Create an arrow by parsing an SVG-style path description.
    ///
    /// See [`parse_path_points`] for what the parser accepts.
    #[must_use]
    pub fn from_path(category: ArrowCategory, path: &str) -> Self {
        Self {
            category,
            points: parse_path_points(path),
        }
    }
}

/// Parse the point sequence out of an SVG-style path description.
///
/// Only absolute move/line commands contribute: each `M x y` or `L x y`
/// yields one point. Other commands, stray tokens, and malformed numbers
/// are skipped, so an arbitrary string parses to an empty (or partial)
/// list rather than failing. Curves are approximated by their anchor
/// points for proximity purposes, which is all the highlighter needs.
#[must_use]
pub fn parse_path_points(path: &str) -> Vec<Point> {
    let tokens: Vec<&str> = path
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .collect();

    let mut points = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        if matches!(tokens[i], "M" | "L")
            && let (Some(&xs), Some(&ys)) = (tokens.get(i + 1), tokens.get(i + 2))
            && let (Ok(x), Ok(y)) = (xs.parse::<f32>(), ys.parse::<f32>())
        {
            points.push(Point::new(x, y));
            i += 3;
            continue;
        }
        i += 1;
    }
    points
}

/// The full diagram snapshot: ordered nodes and arrows.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagram {
    nodes: Vec<DiagramNode>,
    arrows: Vec<DiagramArrow>,
}

impl Diagram {
    /// Create an empty diagram.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node, returning its id.
    pub fn push_node(&mut self, node: DiagramNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Append an arrow.
    pub fn push_arrow(&mut self, arrow: DiagramArrow) {
        self.arrows.push(arrow);
    }

    /// Look up a node. Unknown ids return `None`.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&DiagramNode> {
        self.nodes.get(id.0)
    }

    /// All nodes in build order.
    #[must_use]
    pub fn nodes(&self) -> &[DiagramNode] {
        &self.nodes
    }

    /// All arrows in build order.
    #[must_use]
    pub fn arrows(&self) -> &[DiagramArrow] {
        &self.arrows
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of arrows.
    #[must_use]
    pub fn arrow_count(&self) -> usize {
        self.arrows.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
