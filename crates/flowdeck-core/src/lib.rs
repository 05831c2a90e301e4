#![forbid(unsafe_code)]

//! Core types for flowdeck: the diagram snapshot, canonical input events,
//! geometry, and animation timing.
//!
//! This crate is host-agnostic. Whatever renders the flowchart (a web view,
//! a canvas, a test harness) builds a [`diagram::Diagram`] from its markup,
//! feeds [`event::Event`]s plus wall-clock instants into the interaction
//! layer, and reads declarative visual state back out. Nothing here touches
//! a display.

pub mod animation;
pub mod debounce;
pub mod diagram;
pub mod event;
pub mod geometry;
pub mod logging;

pub use diagram::{ArrowCategory, Diagram, DiagramArrow, DiagramNode, NodeCategory, NodeId};
pub use event::Event;
pub use geometry::{Point, Rect};
