//! # Bead Shading
//!
//! Turns a flat disc into a lit sphere.
//!
//! ## Per-pixel steps
//!
//! 1. **Mask**: pixels farther than `radius` from the center are transparent.
//! 2. **Normal**: the disc is an orthographic view of a hemisphere, so
//!    `n = (dx / r, dy / r, sqrt(r² - d²) / r)`.
//! 3. **Grain**: `(hash(x, y, seed) - 0.5) * 0.2 * roughness` nudges the
//!    pattern value before the color lookup.
//! 4. **Lighting**: fixed light `(-0.5, -0.5, 0.7)`, Lambert diffuse and a
//!    Phong highlight whose exponent drops from 30 (smooth) to 20 (rough).
//! 5. **Edge darkening**: `nz ^ 0.4`.
//! 6. **Composite**: `base * edge * (0.8 + 0.4 * diffuse) + specular * 200`.

use crate::config::CanvasConfig;
use crate::pattern::{FusionParams, marble};
use crate::shader::{Vec3, clamp01, pseudo_random};

use super::gradient::GradientLut;

/// Unnormalized light direction.
pub const LIGHT: Vec3 = Vec3::new(-0.5, -0.5, 0.7);

/// Grain amplitude at full roughness.
pub const GRAIN_STRENGTH: f64 = 0.2;

/// Brightness added by a full-strength highlight.
pub const SPECULAR_GAIN: f64 = 200.0;

/// Fully transparent pixel written outside the disc.
pub const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];

/// Position and size of the bead on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeadGeometry {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
}

impl BeadGeometry {
    pub fn from_canvas(canvas: &CanvasConfig) -> Self {
        let (center_x, center_y) = canvas.center();
        Self {
            center_x,
            center_y,
            radius: canvas.radius(),
        }
    }

    /// Surface normal under a pixel, or `None` outside the disc.
    ///
    /// A non-positive radius has no surface at all.
    pub fn normal_at(&self, x: f64, y: f64) -> Option<Vec3> {
        if self.radius <= 0.0 {
            return None;
        }
        let dx = x - self.center_x;
        let dy = y - self.center_y;
        let dist = (dx * dx + dy * dy).sqrt();
        if dist > self.radius {
            return None;
        }

        let z = (self.radius * self.radius - dist * dist).sqrt();
        Some(Vec3::new(dx / self.radius, dy / self.radius, z / self.radius))
    }
}

/// Light terms at one surface point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    pub diffuse: f64,
    pub specular: f64,
    pub edge: f64,
}

impl Lighting {
    /// Evaluate the lighting model for a unit normal.
    pub fn at(normal: Vec3, light: Vec3, roughness: f64) -> Self {
        let dot = normal.dot(light);
        let reflected = light.reflect(normal);
        Self {
            diffuse: dot.max(0.0),
            specular: reflected.z.max(0.0).powf(specular_exponent(roughness)),
            edge: normal.z.powf(0.4),
        }
    }

    /// Shade one base channel.
    #[inline]
    pub fn apply(&self, base: u8) -> f64 {
        base as f64 * self.edge * (0.8 + 0.4 * self.diffuse) + self.specular * SPECULAR_GAIN
    }
}

/// Phong exponent: 30 when perfectly smooth, 20 at full roughness.
#[inline]
pub fn specular_exponent(roughness: f64) -> f64 {
    20.0 + (1.0 - roughness) * 10.0
}

/// Clamp to [0, 255] and round half to even, like a canvas byte array.
#[inline]
pub fn to_byte(value: f64) -> u8 {
    if value.is_nan() {
        0
    } else {
        value.clamp(0.0, 255.0).round_ties_even() as u8
    }
}

/// Everything needed to shade any pixel of one frame.
#[derive(Debug, Clone)]
pub struct BeadShader<'a> {
    params: FusionParams,
    lut: &'a GradientLut,
    geometry: BeadGeometry,
    light: Vec3,
    roughness: f64,
    width: f64,
    height: f64,
}

impl<'a> BeadShader<'a> {
    pub fn new(params: &FusionParams, lut: &'a GradientLut, canvas: &CanvasConfig) -> Self {
        Self {
            params: *params,
            lut,
            geometry: BeadGeometry::from_canvas(canvas),
            light: LIGHT.normalize(),
            roughness: params.roughness_fraction(),
            width: canvas.width as f64,
            height: canvas.height as f64,
        }
    }

    pub fn geometry(&self) -> &BeadGeometry {
        &self.geometry
    }

    /// Pattern value plus per-pixel grain, clamped to [0, 1].
    #[inline]
    pub fn grained_value(&self, value: f64, x: f64, y: f64) -> f64 {
        let grain = (pseudo_random(x, y, self.params.seed) - 0.5) * GRAIN_STRENGTH;
        clamp01(value + grain * self.roughness)
    }

    /// RGBA for the pixel at `(x, y)`.
    pub fn shade(&self, x: u32, y: u32) -> [u8; 4] {
        let (xf, yf) = (x as f64, y as f64);
        let Some(normal) = self.geometry.normal_at(xf, yf) else {
            return TRANSPARENT;
        };

        let value = marble(xf / self.width, yf / self.height, &self.params);
        let base = self.lut.sample(self.grained_value(value, xf, yf));
        let lighting = Lighting::at(normal, self.light, self.roughness);

        let [r, g, b] = base.channels().map(|c| to_byte(lighting.apply(c)));
        [r, g, b, 255]
    }
}
