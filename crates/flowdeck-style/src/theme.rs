#![forbid(unsafe_code)]

//! Category theme: semantic color slots for nodes and arrows.
//!
//! A [`Theme`] maps node/arrow categories to the colors their highlight
//! glows and pulses use. The default palette matches the reference design
//! (amber accent, green affirmative, red negative); hosts can rebrand via
//! the builder.
//!
//! # Example
//! ```
//! use flowdeck_style::theme::Theme;
//! use flowdeck_style::color::Color;
//! use flowdeck_core::diagram::ArrowCategory;
//!
//! let theme = Theme::builder()
//!     .accent(Color::rgb(0, 120, 255))
//!     .build();
//! assert_eq!(theme.arrow_color(ArrowCategory::Neutral), Color::rgb(0, 120, 255));
//! ```

use flowdeck_core::diagram::{ArrowCategory, NodeCategory};

use crate::color::Color;

/// Amber accent of the default palette.
const ACCENT: Color = Color::rgb(249, 198, 54);
/// Affirmative (yes-branch) green.
const AFFIRMATIVE: Color = Color::rgb(52, 168, 83);
/// Negative (no-branch) red.
const NEGATIVE: Color = Color::rgb(234, 67, 53);
/// Soft off-white used for decision-node glows.
const DECISION_GLOW: Color = Color::rgb(241, 238, 234);

/// Semantic color slots for the diagram.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Theme {
    /// Accent color: neutral arrows and most node glows.
    pub accent: Color,
    /// Affirmative arrow color.
    pub affirmative: Color,
    /// Negative arrow color.
    pub negative: Color,
    /// Decision-node glow color.
    pub decision_glow: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: ACCENT,
            affirmative: AFFIRMATIVE,
            negative: NEGATIVE,
            decision_glow: DECISION_GLOW,
        }
    }
}

impl Theme {
    /// Create a new theme builder starting from the default palette.
    #[must_use]
    pub fn builder() -> ThemeBuilder {
        ThemeBuilder {
            theme: Self::default(),
        }
    }

    /// Base color for an arrow of the given category.
    #[must_use]
    pub const fn arrow_color(&self, category: ArrowCategory) -> Color {
        match category {
            ArrowCategory::Affirmative => self.affirmative,
            ArrowCategory::Negative => self.negative,
            ArrowCategory::Neutral => self.accent,
        }
    }

    /// Glow color for a hovered node of the given category.
    ///
    /// Decision nodes glow off-white; everything else uses the accent.
    #[must_use]
    pub const fn node_glow(&self, category: NodeCategory) -> Color {
        match category {
            NodeCategory::Decision => self.decision_glow,
            NodeCategory::StartEnd | NodeCategory::Process | NodeCategory::System => self.accent,
        }
    }
}

/// Builder for [`Theme`].
#[derive(Debug, Clone)]
pub struct ThemeBuilder {
    theme: Theme,
}

impl ThemeBuilder {
    /// Set the accent color.
    #[must_use]
    pub fn accent(mut self, color: Color) -> Self {
        self.theme.accent = color;
        self
    }

    /// Set the affirmative arrow color.
    #[must_use]
    pub fn affirmative(mut self, color: Color) -> Self {
        self.theme.affirmative = color;
        self
    }

    /// Set the negative arrow color.
    #[must_use]
    pub fn negative(mut self, color: Color) -> Self {
        self.theme.negative = color;
        self
    }

    /// Set the decision-node glow color.
    #[must_use]
    pub fn decision_glow(mut self, color: Color) -> Self {
        self.theme.decision_glow = color;
        self
    }

    /// Finish the theme.
    #[must_use]
    pub fn build(self) -> Theme {
        self.theme
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
