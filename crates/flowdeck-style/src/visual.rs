#![forbid(unsafe_code)]

//! Declarative visual state for diagram elements.
//!
//! Presenters never write styles anywhere; they produce these values and
//! the host renders them. Two components that both affect a node (entrance
//! animation scaling it in, hover scaling it up) contribute separate
//! [`Transform`]s that [`Transform::merge`] combines — scale factors
//! multiply and offsets add, so neither write clobbers the other.

use crate::color::Color;

/// A 2-D transform restricted to what the diagram needs: uniform scale
/// plus a vertical offset.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    /// Uniform scale factor.
    pub scale: f32,
    /// Vertical offset in diagram units.
    pub translate_y: f32,
}

impl Transform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        translate_y: 0.0,
    };

    /// A pure scale.
    #[must_use]
    pub const fn scale(scale: f32) -> Self {
        Self {
            scale,
            translate_y: 0.0,
        }
    }

    /// A pure vertical offset.
    #[must_use]
    pub const fn translate_y(offset: f32) -> Self {
        Self {
            scale: 1.0,
            translate_y: offset,
        }
    }

    /// Combine with another transform: scales multiply, offsets add.
    #[must_use]
    pub fn merge(self, other: Transform) -> Transform {
        Transform {
            scale: self.scale * other.scale,
            translate_y: self.translate_y + other.translate_y,
        }
    }

    /// Whether this is (exactly) the identity.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A drop-shadow glow.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Glow {
    /// Glow color (alpha carries intensity).
    pub color: Color,
    /// Blur radius in diagram units.
    pub radius: f32,
}

impl Glow {
    /// Create a glow.
    #[must_use]
    pub const fn new(color: Color, radius: f32) -> Self {
        Self { color, radius }
    }
}

/// Complete visual state of one node.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeVisual {
    /// Opacity in [0, 1].
    pub opacity: f32,
    /// Merged transform.
    pub transform: Transform,
    /// Hover glow, if any.
    pub glow: Option<Glow>,
    /// Whether the node is raised above its siblings (hover z-order).
    pub raised: bool,
}

impl Default for NodeVisual {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            transform: Transform::IDENTITY,
            glow: None,
            raised: false,
        }
    }
}

/// Complete visual state of one arrow.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArrowVisual {
    /// Opacity in [0, 1].
    pub opacity: f32,
    /// Stroke width in diagram units.
    pub stroke_width: f32,
    /// Highlight or pulse glow, if any.
    pub glow: Option<Glow>,
}

impl ArrowVisual {
    /// Resting stroke width of an arrow.
    pub const DEFAULT_STROKE: f32 = 2.0;
}

impl Default for ArrowVisual {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            stroke_width: Self::DEFAULT_STROKE,
            glow: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // --- Transform merge ---

    #[test]
    fn merge_multiplies_scale_and_adds_offsets() {
        let entrance = Transform::scale(0.8);
        let hover = Transform::scale(1.05);
        let merged = entrance.merge(hover);
        assert!((merged.scale - 0.84).abs() < 1e-6);

        let a = Transform::translate_y(10.0);
        let b = Transform::translate_y(-4.0);
        assert_eq!(a.merge(b).translate_y, 6.0);
    }

    #[test]
    fn merge_with_identity_is_noop() {
        let t = Transform {
            scale: 1.05,
            translate_y: 30.0,
        };
        assert_eq!(t.merge(Transform::IDENTITY), t);
        assert_eq!(Transform::IDENTITY.merge(t), t);
    }

    #[test]
    fn merge_order_independent_for_these_fields() {
        let a = Transform {
            scale: 0.8,
            translate_y: 5.0,
        };
        let b = Transform {
            scale: 1.05,
            translate_y: -2.0,
        };
        assert_eq!(a.merge(b), b.merge(a));
    }

    // --- Defaults ---

    #[test]
    fn default_visuals_are_resting_state() {
        let node = NodeVisual::default();
        assert_eq!(node.opacity, 1.0);
        assert!(node.transform.is_identity());
        assert!(node.glow.is_none());
        assert!(!node.raised);

        let arrow = ArrowVisual::default();
        assert_eq!(arrow.opacity, 1.0);
        assert_eq!(arrow.stroke_width, ArrowVisual::DEFAULT_STROKE);
        assert!(arrow.glow.is_none());
    }
}
