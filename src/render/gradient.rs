//! # Gradient Lookup Table
//!
//! Converts a weighted palette into a fixed-size color table.
//!
//! ## Layout
//!
//! Each stop owns a contiguous slice of [0, 1] proportional to its share of
//! the total weight, in palette order. Inside its slice the color is flat;
//! neighbouring stops meet in a hard step.
//!
//! ```text
//! stops:   black/50      white/25   red/25
//! range:   [0.00, 0.50)  [0.50, 0.75)  [0.75, 1.00]
//! table:   ██████████████▒▒▒▒▒▒▒░░░░░░░
//! ```
//!
//! Texel `i` of an `N`-entry table is sampled at its center `(i + 0.5) / N`.

use crate::config::GRADIENT_RESOLUTION;
use crate::error::{FusionError, Result};
use crate::palette::{ColorStop, Palette, Rgb, check_weights};

/// Color lookup table built once per frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradientLut {
    colors: Vec<Rgb>,
}

impl GradientLut {
    /// Build a [`GRADIENT_RESOLUTION`]-entry table from a palette.
    pub fn build(palette: &Palette) -> Result<Self> {
        Self::from_stops(palette.stops(), GRADIENT_RESOLUTION)
    }

    /// Build a table with `resolution` entries.
    ///
    /// Needs at least one stop and a positive total weight.
    pub fn from_stops(stops: &[ColorStop], resolution: usize) -> Result<Self> {
        if stops.is_empty() {
            return Err(FusionError::invalid_palette("palette has no color stops"));
        }
        check_weights(stops)?;
        if resolution == 0 {
            return Err(FusionError::invalid_parameter(
                "gradient resolution must be at least 1",
            ));
        }

        let total: f64 = stops.iter().map(|s| s.weight).sum();

        // (end of range, color) for every stop that takes up room
        let mut ranges = Vec::with_capacity(stops.len());
        let mut cumulative = 0.0;
        for stop in stops.iter().filter(|s| s.weight > 0.0) {
            cumulative += stop.weight / total;
            ranges.push((cumulative, stop.color));
        }

        let mut colors = Vec::with_capacity(resolution);
        let mut current = 0;
        for i in 0..resolution {
            let t = (i as f64 + 0.5) / resolution as f64;
            while current + 1 < ranges.len() && t >= ranges[current].0 {
                current += 1;
            }
            colors.push(ranges[current].1);
        }

        Ok(Self { colors })
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Entry at a table index.
    pub fn get(&self, index: usize) -> Option<Rgb> {
        self.colors.get(index).copied()
    }

    /// Index for a pattern value: `floor(clamp(value, 0, 1) * (N - 1))`.
    #[inline]
    pub fn index_of(&self, value: f64) -> usize {
        let last = self.colors.len() - 1;
        let value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
        ((value * last as f64).floor() as usize).min(last)
    }

    /// Color for a pattern value.
    #[inline]
    pub fn sample(&self, value: f64) -> Rgb {
        self.colors[self.index_of(value)]
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const RED: Rgb = Rgb::new(255, 0, 0);

    fn stop(color: Rgb, weight: f64) -> ColorStop {
        ColorStop::new(color, weight)
    }

    #[test]
    fn test_equal_weights_split_in_half() {
        let lut = GradientLut::from_stops(&[stop(Rgb::BLACK, 50.0), stop(Rgb::WHITE, 50.0)], 256)
            .unwrap();
        assert_eq!(lut.len(), 256);
        assert_eq!(lut.get(0), Some(Rgb::BLACK));
        assert_eq!(lut.get(127), Some(Rgb::BLACK));
        assert_eq!(lut.get(128), Some(Rgb::WHITE));
        assert_eq!(lut.get(255), Some(Rgb::WHITE));
    }

    #[test]
    fn test_weights_are_proportional() {
        let lut = GradientLut::from_stops(
            &[stop(Rgb::BLACK, 2.0), stop(Rgb::WHITE, 1.0), stop(RED, 1.0)],
            256,
        )
        .unwrap();
        let count = |c: Rgb| lut.colors().iter().filter(|&&x| x == c).count();
        assert_eq!(count(Rgb::BLACK), 128);
        assert_eq!(count(Rgb::WHITE), 64);
        assert_eq!(count(RED), 64);
        // Palette order is gradient order
        assert_eq!(lut.get(0), Some(Rgb::BLACK));
        assert_eq!(lut.get(150), Some(Rgb::WHITE));
        assert_eq!(lut.get(255), Some(RED));
    }

    #[test]
    fn test_unnormalized_weights() {
        let a = GradientLut::from_stops(&[stop(Rgb::BLACK, 80.0), stop(Rgb::WHITE, 40.0)], 256);
        let b = GradientLut::from_stops(&[stop(Rgb::BLACK, 2.0), stop(Rgb::WHITE, 1.0)], 256);
        assert_eq!(a.unwrap(), b.unwrap());
    }

    #[test]
    fn test_zero_weight_stop_is_skipped() {
        let lut = GradientLut::from_stops(
            &[stop(Rgb::BLACK, 1.0), stop(RED, 0.0), stop(Rgb::WHITE, 1.0)],
            256,
        )
        .unwrap();
        assert!(!lut.colors().contains(&RED));
    }

    #[test]
    fn test_single_stop_fills_table() {
        let lut = GradientLut::from_stops(&[stop(RED, 3.0)], 16).unwrap();
        assert!(lut.colors().iter().all(|&c| c == RED));
    }

    #[test]
    fn test_invalid_palettes() {
        assert!(matches!(
            GradientLut::from_stops(&[], 256),
            Err(FusionError::InvalidPalette(_))
        ));
        assert!(matches!(
            GradientLut::from_stops(&[stop(Rgb::BLACK, 0.0), stop(Rgb::WHITE, 0.0)], 256),
            Err(FusionError::InvalidPalette(_))
        ));
        assert!(matches!(
            GradientLut::from_stops(&[stop(Rgb::BLACK, 1.0)], 0),
            Err(FusionError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_index_of() {
        let lut = GradientLut::from_stops(&[stop(Rgb::BLACK, 1.0), stop(Rgb::WHITE, 1.0)], 256)
            .unwrap();
        assert_eq!(lut.index_of(0.0), 0);
        assert_eq!(lut.index_of(1.0), 255);
        assert_eq!(lut.index_of(0.5), 127);
        assert_eq!(lut.index_of(-3.0), 0);
        assert_eq!(lut.index_of(7.0), 255);
        assert_eq!(lut.index_of(f64::NAN), 0);
        assert_eq!(lut.sample(0.9), Rgb::WHITE);
    }
}
