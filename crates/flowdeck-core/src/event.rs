#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! The host resolves raw input (DOM listeners, terminal sequences, a test
//! script) into these semantic events and feeds them to the interaction
//! layer. All events derive `Clone` and `PartialEq` for use in tests and
//! pattern matching.
//!
//! # Design Notes
//!
//! - Hover/activate events carry the [`NodeId`] the host hit-tested; the
//!   layer never re-derives which element a pointer is over.
//! - `Tick` is the only time source for deferred work: fade-out removal,
//!   auto-hide deadlines, and debounce firing all advance on it.
//! - `Modifiers` use bitflags for easy combination.

use bitflags::bitflags;

use crate::diagram::NodeId;
use crate::geometry::Point;

/// Canonical input event.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Pointer entered a diagram node.
    HoverEnter(NodeId),

    /// Pointer left a diagram node.
    HoverLeave(NodeId),

    /// A node was activated (click, or Enter/Space while focused).
    NodeActivate(NodeId),

    /// A pointer press at a viewport position not claimed by a node.
    ///
    /// The modal presenter uses this for overlay-background dismissal.
    PointerPress(Point),

    /// A keyboard event.
    Key(KeyEvent),

    /// A touch contact change (for pinch recognition).
    Touch(TouchEvent),

    /// Vertical page scroll offset changed.
    Scroll {
        /// Current scroll offset from the top of the page.
        offset: f32,
    },

    /// An in-page anchor link was activated.
    AnchorActivate(String),

    /// The viewport was resized.
    Resize {
        /// New viewport width.
        width: f32,
        /// New viewport height.
        height: f32,
    },

    /// The zoom container gained or lost keyboard focus.
    ///
    /// `true` = focus gained, `false` = focus lost.
    ZoomFocus(bool),

    /// An on-screen zoom control was pressed.
    Zoom(ZoomAction),

    /// The modal close button was pressed.
    ModalClose,

    /// A tick from the host's frame/timer loop.
    ///
    /// Deadline-based state (fades, auto-hides, debounces) only advances
    /// when a tick delivers a fresh instant.
    Tick,
}

/// Discrete zoom operations exposed by the on-screen controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomAction {
    /// Step the scale up by one increment.
    In,
    /// Step the scale down by one increment.
    Out,
    /// Return the scale to 1.0.
    Reset,
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a new key event with no modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Check if this is a specific character key.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch == c)
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),

    /// Enter/Return key.
    Enter,

    /// Escape key.
    Escape,

    /// Tab key.
    Tab,
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// A touch contact change.
///
/// Contacts are the full set of fingers currently down, in host order.
/// Pinch recognition requires exactly two.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchEvent {
    /// What changed.
    pub phase: TouchPhase,

    /// All active contacts after the change.
    pub contacts: Vec<Point>,
}

impl TouchEvent {
    /// Create a touch event.
    #[must_use]
    pub fn new(phase: TouchPhase, contacts: Vec<Point>) -> Self {
        Self { phase, contacts }
    }

    /// The Euclidean distance between the first two contacts, if present.
    #[must_use]
    pub fn pinch_distance(&self) -> Option<f32> {
        match self.contacts.as_slice() {
            [a, b] => Some(a.distance_to(*b)),
            _ => None,
        }
    }
}

/// Phase of a touch contact change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    /// A contact went down.
    Start,
    /// One or more contacts moved.
    Move,
    /// A contact lifted (or the gesture was cancelled).
    End,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
