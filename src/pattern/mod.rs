//! # Marble Patterns
//!
//! The scalar texture of a bead. [`FusionParams`] carries the slider values
//! and the [`MarbleStyle`]; [`marble::marble`] turns a surface coordinate into
//! a pattern value in roughly [0, 1].
//!
//! ## Sliders
//!
//! | Field | Range | Effect |
//! |-------|-------|--------|
//! | turbulence | 0-100 | How strongly the warped noise bends the bands |
//! | scale | 5-100 | Zoom; larger values pack more pattern into the bead |
//! | distortion | 0-100 | Swirl strength of the second warp stage |
//! | roughness | 0-100 | Grain on the color lookup, dullness of the highlight |
//! | seed | any | Offsets the noise field |

pub mod marble;

pub use marble::marble;

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// All style names, in display order.
pub const STYLES: &[&str] = &["classic", "nebula", "agate", "fracture"];

/// Pattern formula applied after domain warping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum MarbleStyle {
    /// Soft diagonal banding
    #[default]
    Classic,
    /// Cloudy, no stripes
    Nebula,
    /// Tight, frequent rings
    Agate,
    /// Sharp creases
    Fracture,
}

impl MarbleStyle {
    pub const ALL: [MarbleStyle; 4] = [
        MarbleStyle::Classic,
        MarbleStyle::Nebula,
        MarbleStyle::Agate,
        MarbleStyle::Fracture,
    ];

    /// Lowercase style name.
    pub fn name(&self) -> &'static str {
        match self {
            MarbleStyle::Classic => "classic",
            MarbleStyle::Nebula => "nebula",
            MarbleStyle::Agate => "agate",
            MarbleStyle::Fracture => "fracture",
        }
    }

    /// Get a style by name (case insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "classic" => Some(MarbleStyle::Classic),
            "nebula" => Some(MarbleStyle::Nebula),
            "agate" => Some(MarbleStyle::Agate),
            "fracture" => Some(MarbleStyle::Fracture),
            _ => None,
        }
    }
}

impl From<String> for MarbleStyle {
    /// Unknown tags fall back to [`MarbleStyle::Classic`].
    fn from(name: String) -> Self {
        MarbleStyle::from_name(&name).unwrap_or_else(|| {
            tracing::warn!(style = %name, "unknown marble style, using classic");
            MarbleStyle::Classic
        })
    }
}

impl fmt::Display for MarbleStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parameters for the marble fusion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FusionParams {
    /// How much the colors mix. Default: 45
    pub turbulence: f64,
    /// Size of the marble pattern (zoom). Default: 25
    pub scale: f64,
    /// Swirl intensity. Default: 30
    pub distortion: f64,
    /// Texture grain and highlight dullness. Default: 20
    pub roughness: f64,
    /// Noise seed offset. Default: 1234
    pub seed: f64,
    /// Pattern formula. Default: classic
    #[serde(default)]
    pub style: MarbleStyle,
}

impl Default for FusionParams {
    fn default() -> Self {
        Self {
            turbulence: 45.0,
            scale: 25.0,
            distortion: 30.0,
            roughness: 20.0,
            seed: 1234.0,
            style: MarbleStyle::Classic,
        }
    }
}

impl FusionParams {
    pub const TURBULENCE: RangeInclusive<f64> = 0.0..=100.0;
    pub const SCALE: RangeInclusive<f64> = 5.0..=100.0;
    pub const DISTORTION: RangeInclusive<f64> = 0.0..=100.0;
    pub const ROUGHNESS: RangeInclusive<f64> = 0.0..=100.0;
    /// Range drawn from by [`FusionParams::randomize_seed`].
    pub const SEED_SPAN: f64 = 1000.0;

    /// Generate randomized parameters for unique beads.
    pub fn random() -> Self {
        let mut rng = rand::rng();
        let style = MarbleStyle::ALL[rng.random_range(0..MarbleStyle::ALL.len())];
        Self {
            turbulence: rng.random_range(Self::TURBULENCE),
            scale: rng.random_range(Self::SCALE),
            distortion: rng.random_range(Self::DISTORTION),
            roughness: rng.random_range(Self::ROUGHNESS),
            seed: rng.random_range(0.0..Self::SEED_SPAN),
            style,
        }
    }

    /// Replace the seed with a fresh one in [0, 1000).
    pub fn randomize_seed(&mut self) {
        self.seed = rand::rng().random_range(0.0..Self::SEED_SPAN);
    }

    /// Copy with every slider forced into its documented range.
    ///
    /// Out-of-range or non-finite values are logged and replaced; the UI
    /// constrains sliders but programmatic callers may not.
    pub fn clamped(&self) -> Self {
        let defaults = Self::default();
        Self {
            turbulence: clamp_field("turbulence", self.turbulence, Self::TURBULENCE, defaults.turbulence),
            scale: clamp_field("scale", self.scale, Self::SCALE, defaults.scale),
            distortion: clamp_field("distortion", self.distortion, Self::DISTORTION, defaults.distortion),
            roughness: clamp_field("roughness", self.roughness, Self::ROUGHNESS, defaults.roughness),
            seed: if self.seed.is_finite() {
                self.seed
            } else {
                tracing::warn!(seed = self.seed, "non-finite seed, using 0");
                0.0
            },
            style: self.style,
        }
    }

    /// Roughness as a fraction in [0, 1].
    #[inline]
    pub fn roughness_fraction(&self) -> f64 {
        self.roughness / 100.0
    }
}

fn clamp_field(name: &str, value: f64, range: RangeInclusive<f64>, fallback: f64) -> f64 {
    if value.is_nan() {
        tracing::warn!(field = name, fallback, "NaN parameter replaced with default");
        return fallback;
    }
    let clamped = value.clamp(*range.start(), *range.end());
    if clamped != value {
        tracing::warn!(
            field = name,
            value,
            clamped,
            "parameter outside {}..={}",
            range.start(),
            range.end()
        );
    }
    clamped
}

impl fmt::Display for FusionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "style={} turbulence={:.1} scale={:.1} distortion={:.1} roughness={:.1} seed={:.2}",
            self.style, self.turbulence, self.scale, self.distortion, self.roughness, self.seed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_names_round_trip() {
        for (style, name) in MarbleStyle::ALL.iter().zip(STYLES) {
            assert_eq!(style.name(), *name);
            assert_eq!(MarbleStyle::from_name(name), Some(*style));
        }
        assert_eq!(MarbleStyle::from_name("AGATE"), Some(MarbleStyle::Agate));
        assert_eq!(MarbleStyle::from_name("granite"), None);
    }

    #[test]
    fn test_style_serde() {
        let json = serde_json::to_string(&MarbleStyle::Fracture).unwrap();
        assert_eq!(json, "\"fracture\"");
        let style: MarbleStyle = serde_json::from_str("\"nebula\"").unwrap();
        assert_eq!(style, MarbleStyle::Nebula);
        // Unknown tags behave like the default branch
        let style: MarbleStyle = serde_json::from_str("\"obsidian\"").unwrap();
        assert_eq!(style, MarbleStyle::Classic);
    }

    #[test]
    fn test_clamped_limits() {
        let params = FusionParams {
            turbulence: 150.0,
            scale: 1.0,
            distortion: -3.0,
            roughness: f64::NAN,
            seed: f64::INFINITY,
            style: MarbleStyle::Agate,
        }
        .clamped();
        assert_eq!(params.turbulence, 100.0);
        assert_eq!(params.scale, 5.0);
        assert_eq!(params.distortion, 0.0);
        assert_eq!(params.roughness, 20.0);
        assert_eq!(params.seed, 0.0);
        assert_eq!(params.style, MarbleStyle::Agate);
    }

    #[test]
    fn test_clamped_keeps_valid_values() {
        let params = FusionParams::default();
        assert_eq!(params.clamped(), params);
    }

    #[test]
    fn test_randomize_seed_range() {
        let mut params = FusionParams::default();
        for _ in 0..100 {
            params.randomize_seed();
            assert!((0.0..1000.0).contains(&params.seed));
        }
    }

    #[test]
    fn test_random_in_range() {
        for _ in 0..50 {
            let p = FusionParams::random();
            assert_eq!(p.clamped(), p);
        }
    }
}
