#![forbid(unsafe_code)]

//! Entrance animation and idle arrow pulse.
//!
//! Nodes fade and scale in with linearly staggered starts, so the diagram
//! assembles top-to-bottom instead of popping in at once. Arrows carry a
//! continuous stroke/glow pulse with per-index phase offsets; the pulse
//! yields to the proximity highlight while a hover is active (the
//! application layer picks which visual wins).

use std::time::Duration;

use flowdeck_core::animation::{Animation, Delayed, Fade, Pulse, ease_out, stagger_offsets};
use flowdeck_core::diagram::ArrowCategory;
use flowdeck_style::theme::Theme;
use flowdeck_style::visual::{ArrowVisual, Glow, NodeVisual, Transform};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for the staggered node entrance.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntranceConfig {
    /// Delay before the first node starts.
    pub base_delay: Duration,

    /// Additional delay per node index.
    pub step_delay: Duration,

    /// Duration of each node's fade/scale.
    pub duration: Duration,

    /// Scale a node starts from.
    pub start_scale: f32,
}

impl Default for EntranceConfig {
    fn default() -> Self {
        Self {
            base_delay: Duration::from_millis(100),
            step_delay: Duration::from_millis(100),
            duration: Duration::from_millis(800),
            start_scale: 0.8,
        }
    }
}

/// Configuration for the idle arrow pulse.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PulseConfig {
    /// Full pulse cycle length.
    pub period: Duration,

    /// Phase offset per arrow index.
    pub phase_step: Duration,

    /// Stroke width added at the pulse peak.
    pub stroke_gain: f32,

    /// Glow alpha range: rest value and peak gain.
    pub glow_alpha_base: f32,
    /// Added to the base at the pulse peak.
    pub glow_alpha_gain: f32,

    /// Glow radius range: rest value and peak gain.
    pub glow_radius_base: f32,
    /// Added to the base at the pulse peak.
    pub glow_radius_gain: f32,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            period: Duration::from_secs(6),
            phase_step: Duration::from_millis(200),
            stroke_gain: 0.5,
            glow_alpha_base: 0.2,
            glow_alpha_gain: 0.2,
            glow_radius_base: 1.0,
            glow_radius_gain: 3.0,
        }
    }
}

// ---------------------------------------------------------------------------
// EntranceAnimator
// ---------------------------------------------------------------------------

/// Per-node staggered fade/scale entrance.
#[derive(Debug)]
pub struct EntranceAnimator {
    config: EntranceConfig,
    fades: Vec<Delayed<Fade>>,
}

impl EntranceAnimator {
    /// Create entrance state for `node_count` nodes.
    #[must_use]
    pub fn new(node_count: usize, config: EntranceConfig) -> Self {
        let fades = stagger_offsets(node_count, config.base_delay, config.step_delay)
            .into_iter()
            .map(|offset| Delayed::new(offset, Fade::new(config.duration).easing(ease_out)))
            .collect();
        Self { config, fades }
    }

    /// Advance every node's animation.
    pub fn tick(&mut self, dt: Duration) {
        for fade in &mut self.fades {
            fade.tick(dt);
        }
    }

    /// Whether every node has finished entering.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.fades.iter().all(Animation::is_complete)
    }

    /// Restart the whole entrance from the beginning.
    pub fn restart(&mut self) {
        for fade in &mut self.fades {
            fade.reset();
        }
    }

    /// Entrance contribution to node `index`: opacity plus a scale rising
    /// from the start scale to 1.0. Indices past the diagram return the
    /// resting visual.
    #[must_use]
    pub fn node_visual(&self, index: usize) -> NodeVisual {
        let Some(fade) = self.fades.get(index) else {
            return NodeVisual::default();
        };
        let v = fade.value();
        let scale = self.config.start_scale + (1.0 - self.config.start_scale) * v;
        NodeVisual {
            opacity: v,
            transform: Transform::scale(scale),
            glow: None,
            raised: false,
        }
    }
}

// ---------------------------------------------------------------------------
// ArrowPulseAnimator
// ---------------------------------------------------------------------------

/// Continuous per-arrow stroke/glow pulse.
#[derive(Debug)]
pub struct ArrowPulseAnimator {
    config: PulseConfig,
    pulses: Vec<Pulse>,
}

impl ArrowPulseAnimator {
    /// Create pulse state for `arrow_count` arrows.
    #[must_use]
    pub fn new(arrow_count: usize, config: PulseConfig) -> Self {
        let pulses = (0..arrow_count)
            .map(|i| {
                Pulse::new(config.period).with_phase(config.phase_step.saturating_mul(i as u32))
            })
            .collect();
        Self { config, pulses }
    }

    /// Advance every arrow's pulse.
    pub fn tick(&mut self, dt: Duration) {
        for pulse in &mut self.pulses {
            pulse.tick(dt);
        }
    }

    /// Resting visual for arrow `index`: default stroke breathing up by
    /// the configured gain, with a soft category glow.
    #[must_use]
    pub fn arrow_visual(&self, index: usize, category: ArrowCategory, theme: &Theme) -> ArrowVisual {
        let Some(pulse) = self.pulses.get(index) else {
            return ArrowVisual::default();
        };
        let v = pulse.value();
        let c = &self.config;
        ArrowVisual {
            opacity: 1.0,
            stroke_width: ArrowVisual::DEFAULT_STROKE + c.stroke_gain * v,
            glow: Some(Glow::new(
                theme
                    .arrow_color(category)
                    .with_alpha(c.glow_alpha_base + c.glow_alpha_gain * v),
                c.glow_radius_base + c.glow_radius_gain * v,
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    // --- Entrance ---

    #[test]
    fn nodes_start_invisible_and_scaled_down() {
        let e = EntranceAnimator::new(3, EntranceConfig::default());
        let v = e.node_visual(0);
        assert_eq!(v.opacity, 0.0);
        assert!((v.transform.scale - 0.8).abs() < 1e-6);
    }

    #[test]
    fn stagger_orders_node_starts() {
        let mut e = EntranceAnimator::new(3, EntranceConfig::default());
        // Past node 0's delay (100ms) but before node 2's (300ms).
        e.tick(ms(250));
        let v0 = e.node_visual(0);
        let v2 = e.node_visual(2);
        assert!(v0.opacity > 0.0);
        assert_eq!(v2.opacity, 0.0);
    }

    #[test]
    fn all_nodes_settle_at_rest() {
        let mut e = EntranceAnimator::new(4, EntranceConfig::default());
        // base 100 + step*3 = 400 delay, + 800 duration.
        e.tick(ms(1200));
        assert!(e.is_complete());
        for i in 0..4 {
            let v = e.node_visual(i);
            assert_eq!(v.opacity, 1.0);
            assert!((v.transform.scale - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn out_of_range_index_is_resting() {
        let e = EntranceAnimator::new(1, EntranceConfig::default());
        assert_eq!(e.node_visual(5), NodeVisual::default());
    }

    #[test]
    fn restart_replays_entrance() {
        let mut e = EntranceAnimator::new(2, EntranceConfig::default());
        e.tick(ms(2000));
        assert!(e.is_complete());
        e.restart();
        assert!(!e.is_complete());
        assert_eq!(e.node_visual(0).opacity, 0.0);
    }

    // --- Pulse ---

    #[test]
    fn pulse_breathes_stroke_within_range() {
        let theme = Theme::default();
        let mut p = ArrowPulseAnimator::new(1, PulseConfig::default());

        let rest = p.arrow_visual(0, ArrowCategory::Neutral, &theme);
        assert_eq!(rest.stroke_width, 2.0);

        // Half a period = pulse peak.
        p.tick(ms(3000));
        let peak = p.arrow_visual(0, ArrowCategory::Neutral, &theme);
        assert!((peak.stroke_width - 2.5).abs() < 1e-2);
        assert_eq!(peak.opacity, 1.0);
    }

    #[test]
    fn phase_offsets_desynchronize_arrows() {
        let theme = Theme::default();
        let p = ArrowPulseAnimator::new(2, PulseConfig::default());
        let a = p.arrow_visual(0, ArrowCategory::Affirmative, &theme);
        let b = p.arrow_visual(1, ArrowCategory::Affirmative, &theme);
        assert_ne!(a.stroke_width, b.stroke_width);
    }

    #[test]
    fn pulse_glow_uses_category_color() {
        let theme = Theme::default();
        let p = ArrowPulseAnimator::new(2, PulseConfig::default());
        let yes = p.arrow_visual(0, ArrowCategory::Affirmative, &theme);
        let no = p.arrow_visual(0, ArrowCategory::Negative, &theme);
        let gy = yes.glow.unwrap().color;
        let gn = no.glow.unwrap().color;
        assert_ne!((gy.r, gy.g, gy.b), (gn.r, gn.g, gn.b));
    }
}
