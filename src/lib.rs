//! # MarbleFusion - Procedural Marble Bead Renderer
//!
//! MarbleFusion renders a glossy marble bead: a lit sphere whose surface is
//! textured with domain-warped fractal noise and colored from a weighted
//! palette. It provides:
//!
//! - **Noise**: sine-hash value noise and fractal brownian motion
//! - **Patterns**: four marble styles (classic, nebula, agate, fracture)
//! - **Gradients**: weighted color stops to a 256-entry lookup table
//! - **Shading**: sphere normals, diffuse and specular light, edge darkening
//! - **Recipes**: JSON palette + parameter bundles, including generator replies
//!
//! ## Quick Start
//!
//! ```no_run
//! use marblefusion::{config::CanvasConfig, recipe::BeadRecipe};
//!
//! let recipe = BeadRecipe::cosmic_drift();
//! let result = recipe.render(&CanvasConfig::STUDIO)?;
//!
//! println!("rendered in {:.1}ms", result.elapsed_ms());
//! result.pixels.save_png(std::path::Path::new("bead.png"))?;
//! # Ok::<(), marblefusion::FusionError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`shader`] | Noise, easing and vector primitives |
//! | [`pattern`] | Marble styles and fusion parameters |
//! | [`palette`] | Colors and weighted stops |
//! | [`render`] | Gradient table, bead shading, frame driver |
//! | [`recipe`] | Named palette + parameter bundles |
//! | [`config`] | Canvas presets |
//! | [`error`] | Error types |

pub mod config;
pub mod error;
pub mod palette;
pub mod pattern;
pub mod recipe;
pub mod render;
pub mod shader;

// Re-exports for convenience
pub use config::CanvasConfig;
pub use error::FusionError;
pub use palette::{ColorStop, Palette, Rgb};
pub use pattern::{FusionParams, MarbleStyle};
pub use recipe::BeadRecipe;
pub use render::{PixelBuffer, RenderResult};
