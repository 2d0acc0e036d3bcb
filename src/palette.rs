//! # Palettes
//!
//! An ordered list of weighted color stops. Order is the left-to-right
//! position in the gradient; weight is the relative share of the gradient a
//! stop occupies. Weights are normalized only when the gradient is built.
//!
//! ## Example
//!
//! ```
//! use marblefusion::palette::{ColorStop, Palette, Rgb};
//!
//! let palette = Palette::new(vec![
//!     ColorStop::new(Rgb::from_hex("#0f172a")?, 80.0),
//!     ColorStop::new(Rgb::from_hex("#38bdf8")?, 40.0),
//! ])?;
//! assert_eq!(palette.total_weight(), 120.0);
//! # Ok::<(), marblefusion::FusionError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{FusionError, Result};

/// Minimum number of stops a renderable palette carries.
pub const MIN_STOPS: usize = 2;

/// An 8-bit RGB color, serialized as `"#rrggbb"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `rrggbb` (case insensitive).
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(FusionError::invalid_palette(format!(
                "'{}' is not a #rrggbb color",
                hex
            )));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|e| FusionError::invalid_palette(format!("'{}': {}", hex, e)))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Channels as an array, in RGB order.
    #[inline]
    pub fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl TryFrom<String> for Rgb {
    type Error = FusionError;

    fn try_from(value: String) -> Result<Self> {
        Rgb::from_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(rgb: Rgb) -> Self {
        rgb.to_hex()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// One weighted color in a palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    /// Opaque identifier, never used for rendering
    #[serde(default = "new_stop_id")]
    pub id: String,
    /// Stop color (serialized as `hex`)
    #[serde(rename = "hex")]
    pub color: Rgb,
    /// Relative visual dominance
    pub weight: f64,
}

fn new_stop_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl ColorStop {
    /// New stop with a fresh random id.
    pub fn new(color: Rgb, weight: f64) -> Self {
        Self {
            id: new_stop_id(),
            color,
            weight,
        }
    }

    /// Parse `HEX` or `HEX:WEIGHT` (weight defaults to 50).
    pub fn parse(input: &str) -> Result<Self> {
        let (hex, weight) = match input.split_once(':') {
            Some((hex, weight)) => {
                let weight = weight.trim().parse::<f64>().map_err(|e| {
                    FusionError::invalid_palette(format!("invalid weight in '{}': {}", input, e))
                })?;
                (hex, weight)
            }
            None => (input, 50.0),
        };
        Ok(Self::new(Rgb::from_hex(hex)?, weight))
    }
}

/// Ordered sequence of color stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    stops: Vec<ColorStop>,
}

impl Palette {
    /// Build a palette, checking it can be rendered.
    pub fn new(stops: Vec<ColorStop>) -> Result<Self> {
        let palette = Self { stops };
        palette.validate()?;
        Ok(palette)
    }

    /// Wrap stops without checking them. [`Palette::validate`] runs before rendering.
    pub fn from_stops_unchecked(stops: Vec<ColorStop>) -> Self {
        Self { stops }
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Sum of all stop weights.
    pub fn total_weight(&self) -> f64 {
        self.stops.iter().map(|s| s.weight).sum()
    }

    /// Check the palette has enough stops and usable weights.
    pub fn validate(&self) -> Result<()> {
        if self.stops.len() < MIN_STOPS {
            return Err(FusionError::invalid_palette(format!(
                "need at least {} color stops, got {}",
                MIN_STOPS,
                self.stops.len()
            )));
        }
        check_weights(&self.stops)
    }

    /// Append a stop at the end of the gradient.
    pub fn push(&mut self, stop: ColorStop) -> Result<()> {
        check_weights(std::slice::from_ref(&stop))?;
        self.stops.push(stop);
        Ok(())
    }

    /// Remove a stop by id, refusing to go below [`MIN_STOPS`].
    pub fn remove(&mut self, id: &str) -> Result<ColorStop> {
        let index = self.index_of(id)?;
        if self.stops.len() <= MIN_STOPS {
            return Err(FusionError::invalid_palette(format!(
                "a palette keeps at least {} stops",
                MIN_STOPS
            )));
        }
        Ok(self.stops.remove(index))
    }

    /// Change a stop's weight.
    pub fn set_weight(&mut self, id: &str, weight: f64) -> Result<()> {
        let index = self.index_of(id)?;
        let mut updated = self.stops.clone();
        updated[index].weight = weight;
        check_weights(&updated)?;
        self.stops = updated;
        Ok(())
    }

    /// Change a stop's color.
    pub fn set_color(&mut self, id: &str, color: Rgb) -> Result<()> {
        let index = self.index_of(id)?;
        self.stops[index].color = color;
        Ok(())
    }

    fn index_of(&self, id: &str) -> Result<usize> {
        self.stops
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| FusionError::invalid_palette(format!("no color stop with id '{}'", id)))
    }
}

/// Weights must be finite and non-negative, with a positive total.
pub(crate) fn check_weights(stops: &[ColorStop]) -> Result<()> {
    if let Some(bad) = stops.iter().find(|s| !s.weight.is_finite() || s.weight < 0.0) {
        return Err(FusionError::invalid_palette(format!(
            "stop {} has unusable weight {}",
            bad.color, bad.weight
        )));
    }
    let total: f64 = stops.iter().map(|s| s.weight).sum();
    if total <= 0.0 || !total.is_finite() {
        return Err(FusionError::invalid_palette("total weight must be positive"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn two_stops() -> Palette {
        Palette::new(vec![
            ColorStop::new(Rgb::BLACK, 50.0),
            ColorStop::new(Rgb::WHITE, 50.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_hex_parsing() {
        assert_eq!(Rgb::from_hex("#0f172a").unwrap(), Rgb::new(0x0f, 0x17, 0x2a));
        assert_eq!(Rgb::from_hex("E879F9").unwrap(), Rgb::new(0xe8, 0x79, 0xf9));
        assert!(Rgb::from_hex("#fff").is_err());
        assert!(Rgb::from_hex("#gg0000").is_err());
        assert!(Rgb::from_hex("").is_err());
        assert!(Rgb::from_hex("#ünïcd").is_err());
    }

    #[test]
    fn test_hex_format() {
        assert_eq!(Rgb::new(0x38, 0xbd, 0xf8).to_hex(), "#38bdf8");
        assert_eq!(Rgb::WHITE.to_string(), "#ffffff");
    }

    #[test]
    fn test_stop_parse() {
        let stop = ColorStop::parse("#38bdf8:40").unwrap();
        assert_eq!(stop.color, Rgb::new(0x38, 0xbd, 0xf8));
        assert_eq!(stop.weight, 40.0);
        assert_eq!(ColorStop::parse("ffffff").unwrap().weight, 50.0);
        assert!(ColorStop::parse("#ffffff:heavy").is_err());
    }

    #[test]
    fn test_stop_ids_unique() {
        let a = ColorStop::new(Rgb::BLACK, 1.0);
        let b = ColorStop::new(Rgb::BLACK, 1.0);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_palette_validation() {
        assert!(matches!(
            Palette::new(vec![]),
            Err(FusionError::InvalidPalette(_))
        ));
        assert!(Palette::new(vec![ColorStop::new(Rgb::BLACK, 10.0)]).is_err());
        assert!(
            Palette::new(vec![
                ColorStop::new(Rgb::BLACK, 0.0),
                ColorStop::new(Rgb::WHITE, 0.0),
            ])
            .is_err()
        );
        assert!(
            Palette::new(vec![
                ColorStop::new(Rgb::BLACK, -1.0),
                ColorStop::new(Rgb::WHITE, 5.0),
            ])
            .is_err()
        );
        // A single zero-weight stop is allowed; it simply takes no room
        assert!(
            Palette::new(vec![
                ColorStop::new(Rgb::BLACK, 0.0),
                ColorStop::new(Rgb::WHITE, 5.0),
            ])
            .is_ok()
        );
    }

    #[test]
    fn test_remove_keeps_minimum() {
        let mut palette = two_stops();
        let id = palette.stops()[0].id.clone();
        assert!(palette.remove(&id).is_err());

        palette.push(ColorStop::new(Rgb::new(255, 0, 0), 10.0)).unwrap();
        let removed = palette.remove(&id).unwrap();
        assert_eq!(removed.color, Rgb::BLACK);
        assert_eq!(palette.len(), 2);
        assert!(palette.remove("missing").is_err());
    }

    #[test]
    fn test_set_weight() {
        let mut palette = two_stops();
        let id = palette.stops()[1].id.clone();
        palette.set_weight(&id, 150.0).unwrap();
        assert_eq!(palette.total_weight(), 200.0);
        assert!(palette.set_weight(&id, f64::NAN).is_err());
        // Failed edits leave the palette untouched
        assert_eq!(palette.total_weight(), 200.0);
    }

    #[test]
    fn test_set_color() {
        let mut palette = two_stops();
        let id = palette.stops()[0].id.clone();
        let teal = Rgb::from_hex("#14b8a6").unwrap();
        palette.set_color(&id, teal).unwrap();
        assert_eq!(palette.stops()[0].color, teal);
        assert_eq!(palette.stops()[0].color.channels(), [0x14, 0xb8, 0xa6]);
        // Weights and order are untouched
        assert_eq!(palette.total_weight(), 100.0);
        assert!(palette.set_color("missing", teal).is_err());
    }

    #[test]
    fn test_serde_shape() {
        let json = r##"[{"id":"1","hex":"#0f172a","weight":80},{"hex":"#38bdf8","weight":40}]"##;
        let palette: Palette = serde_json::from_str(json).unwrap();
        assert_eq!(palette.len(), 2);
        assert_eq!(palette.stops()[0].id, "1");
        assert!(!palette.stops()[1].id.is_empty());
        assert_eq!(palette.stops()[1].color, Rgb::new(0x38, 0xbd, 0xf8));

        let out = serde_json::to_value(&palette).unwrap();
        assert_eq!(out[0]["hex"], "#0f172a");
    }
}
