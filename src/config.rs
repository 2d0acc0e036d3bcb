//! # Canvas Configuration
//!
//! Canvas presets and rendering constants.
//!
//! ## Presets
//!
//! | Preset | Size | Padding | Bead radius |
//! |--------|------|---------|-------------|
//! | STUDIO | 600×600 | 10 | 290 |
//! | PREVIEW | 500×500 | 10 | 240 |
//! | THUMBNAIL | 64×64 | 10 | 22 |
//!
//! ## Usage
//!
//! ```
//! use marblefusion::config::CanvasConfig;
//!
//! let canvas = CanvasConfig::STUDIO;
//! assert_eq!(canvas.radius(), 290.0);
//! ```

/// Entries in the gradient lookup table.
pub const GRADIENT_RESOLUTION: usize = 256;

/// Default padding between the bead and the canvas edge, in pixels.
pub const DEFAULT_PADDING: f64 = 10.0;

/// # Canvas Configuration
///
/// Size of the output image and how much room is left around the bead.
///
/// ```text
/// center = (width / 2, height / 2)
/// radius = min(width, height) / 2 - padding
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasConfig {
    /// Preset name
    pub name: &'static str,
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Gap between bead and canvas edge in pixels
    pub padding: f64,
}

impl CanvasConfig {
    /// Main studio canvas.
    pub const STUDIO: Self = Self {
        name: "studio",
        width: 600,
        height: 600,
        padding: DEFAULT_PADDING,
    };

    /// Embedded preview canvas.
    pub const PREVIEW: Self = Self {
        name: "preview",
        width: 500,
        height: 500,
        padding: DEFAULT_PADDING,
    };

    /// Small canvas for quick checks.
    pub const THUMBNAIL: Self = Self {
        name: "thumbnail",
        width: 64,
        height: 64,
        padding: DEFAULT_PADDING,
    };

    pub const PRESETS: [Self; 3] = [Self::STUDIO, Self::PREVIEW, Self::THUMBNAIL];

    /// Custom canvas with default padding.
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            name: "custom",
            width,
            height,
            padding: DEFAULT_PADDING,
        }
    }

    /// Get a preset by name.
    pub fn by_name(name: &str) -> Option<Self> {
        Self::PRESETS
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Center of the bead.
    #[inline]
    pub fn center(&self) -> (f64, f64) {
        (self.width as f64 / 2.0, self.height as f64 / 2.0)
    }

    /// Bead radius. May be zero or negative for very small canvases.
    #[inline]
    pub fn radius(&self) -> f64 {
        self.width.min(self.height) as f64 / 2.0 - self.padding
    }

    /// Bytes needed for an RGBA buffer of this size.
    #[inline]
    pub fn buffer_len(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self::STUDIO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_geometry() {
        assert_eq!(CanvasConfig::STUDIO.radius(), 290.0);
        assert_eq!(CanvasConfig::PREVIEW.center(), (250.0, 250.0));
        assert_eq!(CanvasConfig::THUMBNAIL.radius(), 22.0);
    }

    #[test]
    fn test_non_square_radius() {
        let canvas = CanvasConfig::new(200, 100);
        assert_eq!(canvas.radius(), 40.0);
        assert_eq!(canvas.center(), (100.0, 50.0));
        assert_eq!(canvas.buffer_len(), 200 * 100 * 4);
    }

    #[test]
    fn test_tiny_canvas_radius() {
        assert!(CanvasConfig::new(12, 12).radius() < 0.0);
    }

    #[test]
    fn test_by_name() {
        assert_eq!(CanvasConfig::by_name("Thumbnail"), Some(CanvasConfig::THUMBNAIL));
        assert_eq!(CanvasConfig::by_name("poster"), None);
    }
}
