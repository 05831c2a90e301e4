#![forbid(unsafe_code)]

//! Styling for flowdeck: colors, the category theme, and the declarative
//! visual-state types the presenters emit.
//!
//! Nothing here paints. A [`visual::NodeVisual`] or [`visual::ArrowVisual`]
//! is a complete description of how one element should look right now; the
//! host maps it onto whatever style system it renders with. Producing the
//! same state twice yields the same visual — rendering is idempotent by
//! construction.

pub mod color;
pub mod theme;
pub mod visual;

pub use color::Color;
pub use theme::Theme;
pub use visual::{ArrowVisual, Glow, NodeVisual, Transform};
