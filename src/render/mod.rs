//! # Rendering Module
//!
//! The frame driver: validates inputs, builds the gradient once, then shades
//! every pixel of a fresh RGBA buffer in parallel rows.
//!
//! ## Modules
//!
//! - [`gradient`]: Weighted palette to 256-entry color table
//! - [`bead`]: Sphere mask, normals, lighting and compositing
//! - [`session`]: Generation counter so stale renders are discarded
//!
//! ## Usage Example
//!
//! ```
//! use marblefusion::palette::{ColorStop, Palette, Rgb};
//! use marblefusion::pattern::FusionParams;
//! use marblefusion::render;
//!
//! let palette = Palette::new(vec![
//!     ColorStop::new(Rgb::BLACK, 50.0),
//!     ColorStop::new(Rgb::WHITE, 50.0),
//! ])?;
//!
//! let result = render::render(&palette, &FusionParams::default(), 64, 64)?;
//! assert_eq!(result.pixels.as_bytes().len(), 64 * 64 * 4);
//! # Ok::<(), marblefusion::FusionError>(())
//! ```

pub mod bead;
pub mod gradient;
pub mod session;

use rayon::prelude::*;
use std::io::Cursor;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::config::CanvasConfig;
use crate::error::{FusionError, Result};
use crate::palette::Palette;
use crate::pattern::FusionParams;

use bead::BeadShader;
use gradient::GradientLut;
use session::RenderTicket;

/// Row-major RGBA8 pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Fully transparent buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// RGBA at `(x, y)`, or `None` out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]])
    }

    /// Iterate `(x, y, rgba)` over every pixel.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32, [u8; 4])> + '_ {
        let width = self.width.max(1) as usize;
        self.data.chunks_exact(4).enumerate().map(move |(i, px)| {
            (
                (i % width) as u32,
                (i / width) as u32,
                [px[0], px[1], px[2], px[3]],
            )
        })
    }

    /// Copy into an [`image::RgbaImage`].
    pub fn to_image(&self) -> Result<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| FusionError::Image("pixel buffer does not match its dimensions".into()))
    }

    /// Encode as PNG.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let mut png = Vec::new();
        self.to_image()?
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .map_err(|e| FusionError::Image(format!("Failed to encode PNG: {}", e)))?;
        Ok(png)
    }

    /// Save as a PNG file.
    pub fn save_png(&self, path: &Path) -> Result<()> {
        self.to_image()?
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|e| FusionError::Image(format!("Failed to save PNG: {}", e)))
    }
}

/// A finished frame.
#[derive(Debug, Clone)]
pub struct RenderResult {
    pub pixels: PixelBuffer,
    /// Wall time spent rendering (diagnostic only)
    pub elapsed: Duration,
}

impl RenderResult {
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

/// Render a bead onto a `width`×`height` canvas with the default padding.
pub fn render(
    palette: &Palette,
    params: &FusionParams,
    width: u32,
    height: u32,
) -> Result<RenderResult> {
    render_canvas(palette, params, &CanvasConfig::new(width, height), None)
}

/// Render a bead onto `canvas`.
///
/// The palette is checked before anything is allocated. Parameters are
/// clamped into range. With a `ticket`, rows stop being shaded as soon as a
/// newer render starts and the call returns [`FusionError::Cancelled`].
#[tracing::instrument(skip(palette, ticket), fields(stops = palette.len()))]
pub fn render_canvas(
    palette: &Palette,
    params: &FusionParams,
    canvas: &CanvasConfig,
    ticket: Option<&RenderTicket>,
) -> Result<RenderResult> {
    let start = Instant::now();

    palette.validate()?;
    let params = params.clamped();
    let lut = GradientLut::build(palette)?;

    let mut pixels = PixelBuffer::new(canvas.width, canvas.height);
    let shader = BeadShader::new(&params, &lut, canvas);
    tracing::debug!(geometry = ?shader.geometry(), "shading bead");

    let stride = canvas.width as usize * 4;
    if stride > 0 {
        pixels
            .data
            .par_chunks_mut(stride)
            .enumerate()
            .for_each(|(y, row)| {
                if ticket.is_some_and(RenderTicket::is_superseded) {
                    return;
                }
                for (x, px) in row.chunks_exact_mut(4).enumerate() {
                    px.copy_from_slice(&shader.shade(x as u32, y as u32));
                }
            });
    }

    if let Some(ticket) = ticket {
        ticket.check()?;
    }

    let elapsed = start.elapsed();
    tracing::debug!(
        elapsed_ms = elapsed.as_secs_f64() * 1000.0,
        width = canvas.width,
        height = canvas.height,
        "render complete"
    );
    Ok(RenderResult { pixels, elapsed })
}

/// Dedicated rayon pool; `None` uses all cores.
pub fn build_thread_pool(threads: Option<usize>) -> Result<rayon::ThreadPool> {
    if threads == Some(0) {
        return Err(FusionError::invalid_parameter("threads must be >= 1 when set"));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| FusionError::invalid_parameter(format!("failed to build rayon thread pool: {e}")))
}
