#![forbid(unsafe_code)]

//! Flowdeck: an interaction layer for pre-rendered workflow flowcharts.
//!
//! The host builds a [`Diagram`] from its rendered markup, constructs a
//! [`FlowdeckApp`] for it, feeds input events plus ticks in, and renders
//! the declarative [`Scene`] that comes back out.
//!
//! ```
//! use std::time::Instant;
//! use flowdeck::{Diagram, DiagramNode, FlowdeckApp, NodeCategory, Rect};
//!
//! let mut diagram = Diagram::new();
//! let login = diagram.push_node(DiagramNode::new(
//!     NodeCategory::StartEnd,
//!     Rect::new(100.0, 40.0, 140.0, 60.0),
//!     vec!["User Login".into()],
//! ));
//!
//! let mut app = FlowdeckApp::new(diagram, Rect::new(0.0, 0.0, 1280.0, 800.0));
//! let now = Instant::now();
//! app.update(flowdeck::Event::HoverEnter(login), now);
//! let scene = app.scene(now);
//! assert!(scene.tooltip.is_some());
//! ```

pub use flowdeck_core::animation;
pub use flowdeck_core::debounce;
pub use flowdeck_core::diagram::{
    ArrowCategory, Diagram, DiagramArrow, DiagramNode, NodeCategory, NodeId,
};
pub use flowdeck_core::event::{
    Event, KeyCode, KeyEvent, Modifiers, TouchEvent, TouchPhase, ZoomAction,
};
pub use flowdeck_core::geometry::{Point, Rect};
pub use flowdeck_style::color::Color;
pub use flowdeck_style::theme::Theme;
pub use flowdeck_style::visual::{ArrowVisual, Glow, NodeVisual, Transform};
pub use flowdeck_ui::app::{Effect, FlowdeckApp, Scene};
pub use flowdeck_ui::chrome::{ScrollBehavior, ScrollCommand};
pub use flowdeck_ui::detail::{DetailCatalog, DetailRecord, DetailSection};
pub use flowdeck_ui::modal::ModalPhase;
pub use flowdeck_ui::tooltip::TooltipPlacement;
pub use flowdeck_ui::zoom::ZoomEasing;
