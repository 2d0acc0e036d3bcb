//! # Domain-Warped Marble
//!
//! Two rounds of domain warping feed a final fBm whose value is shaped by the
//! selected [`MarbleStyle`].
//!
//! ## Formula
//!
//! ```text
//! n  = (u, v) * scale / 20
//! q  = (fbm(n + seed), fbm(n + (5.2, 1.3) + seed))              4 octaves, 0.5
//! r  = (fbm(n + 4q + (1.7, 9.2)), fbm(n + 4q + (8.3, 2.8)))     4 octaves, 0.5
//! f  = fbm(n + (distortion / 10) * r)                           per style
//! mix = (nx + ny) * band + f * turbulence / 20
//!
//! classic   sin(mix * 2π) * 0.5 + 0.5         6 octaves, 0.6, band 0.1
//! nebula    smoothstep(f)                     6 octaves, 0.5
//! agate     sin(mix * 12π) * 0.5 + 0.5        6 octaves, 0.6, band 0.1
//! fracture  1 - |sin(mix * 3π)|               5 octaves, 0.5, band 0.2
//! ```

use std::f64::consts::PI;

use super::{FusionParams, MarbleStyle};
use crate::shader::{Fbm, smoothstep};

/// fBm used for both warp stages.
const WARP_FBM: Fbm = Fbm::new(4, 0.5);

/// Warp amplitude of the first stage fed into the second.
const WARP_FEEDBACK: f64 = 4.0;

/// Second-stage warp offsets `(rx, ry)` for a point in scaled pattern space.
pub fn warp(nx: f64, ny: f64, seed: f64) -> (f64, f64) {
    let qx = WARP_FBM.sample(nx + seed, ny + seed, seed);
    let qy = WARP_FBM.sample(nx + 5.2 + seed, ny + 1.3 + seed, seed);

    let rx = WARP_FBM.sample(
        nx + WARP_FEEDBACK * qx + 1.7,
        ny + WARP_FEEDBACK * qy + 9.2,
        seed,
    );
    let ry = WARP_FBM.sample(
        nx + WARP_FEEDBACK * qx + 8.3,
        ny + WARP_FEEDBACK * qy + 2.8,
        seed,
    );
    (rx, ry)
}

impl MarbleStyle {
    /// fBm applied to the warped coordinates.
    pub fn fbm(&self) -> Fbm {
        match self {
            MarbleStyle::Classic | MarbleStyle::Agate => Fbm::new(6, 0.6),
            MarbleStyle::Nebula => Fbm::new(6, 0.5),
            MarbleStyle::Fracture => Fbm::new(5, 0.5),
        }
    }

    /// Shape the warped noise `f` into the final pattern value.
    pub fn shape(&self, f: f64, nx: f64, ny: f64, turbulence: f64) -> f64 {
        match self {
            MarbleStyle::Classic => {
                let mix = (nx + ny) * 0.1 + f * turbulence;
                (mix * PI * 2.0).sin() * 0.5 + 0.5
            }
            MarbleStyle::Nebula => smoothstep(f),
            MarbleStyle::Agate => {
                let mix = (nx + ny) * 0.1 + f * turbulence;
                (mix * PI * 12.0).sin() * 0.5 + 0.5
            }
            MarbleStyle::Fracture => {
                let mix = (nx + ny) * 0.2 + f * turbulence;
                1.0 - (mix * PI * 3.0).sin().abs()
            }
        }
    }
}

/// Pattern value at normalized surface coordinates `(u, v)`.
///
/// Targets [0, 1] but is not clamped; callers clamp before a color lookup.
pub fn marble(u: f64, v: f64, params: &FusionParams) -> f64 {
    let base_scale = params.scale / 20.0;
    let nx = u * base_scale;
    let ny = v * base_scale;

    let turbulence = params.turbulence / 20.0;
    let distortion = params.distortion / 10.0;
    let seed = params.seed;

    let (rx, ry) = warp(nx, ny, seed);
    let f = params
        .style
        .fbm()
        .sample(nx + distortion * rx, ny + distortion * ry, seed);

    params.style.shape(f, nx, ny, turbulence)
}
