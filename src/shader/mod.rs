//! # Shader Primitives Library
//!
//! Reusable building blocks for the bead texture. These functions mirror
//! common operations found in fragment shaders and are composed by
//! [`crate::pattern`] and [`crate::render`].
//!
//! ## Categories
//!
//! - [`noise`]: Sine hash, value noise, fractal brownian motion
//! - [`blend`]: Linear interpolation, smoothstep, clamping
//! - [`light`]: Vectors, dot products and reflection for shading
//!
//! ## Example
//!
//! ```rust
//! use marblefusion::shader::*;
//!
//! // Four octaves of noise eased for extra contrast
//! let v = smoothstep(fbm(0.3, 0.8, 4, 0.5, 2.0, 1234.0));
//! assert!((0.0..=1.0).contains(&v));
//! ```

pub mod blend;
pub mod light;
pub mod noise;

// Re-export all primitives at the top level for convenience
pub use blend::*;
pub use light::*;
pub use noise::*;
