//! Hash and noise functions for procedural generation.
//!
//! Everything here works in `f64`: the sine hash amplifies the low bits of its
//! argument, so single precision would visibly change the texture.

use super::blend::{lerp, smoothstep};

/// Largest `f64` strictly below 1.0.
const BELOW_ONE: f64 = 1.0 - f64::EPSILON / 2.0;

/// Sine-based hash of a 2D point.
///
/// Returns a deterministic value in [0, 1):
///
/// ```text
/// s = sin(x * 12.9898 + y * 78.233 + seed * 37.719) * 43758.5453
/// r = s - floor(s)
/// ```
#[inline]
pub fn pseudo_random(x: f64, y: f64, seed: f64) -> f64 {
    let dot = x * 12.9898 + y * 78.233 + seed * 37.719;
    let s = dot.sin() * 43758.5453;
    // Tiny negative products round up to exactly 1.0 after the subtraction.
    (s - s.floor()).min(BELOW_ONE)
}

/// 2D value noise with smooth interpolation.
///
/// Hashes the four lattice corners around `(x, y)` and blends them with
/// smoothstep weights, first along x on both rows, then along y.
/// At integer coordinates the result is exactly the corner hash.
pub fn value_noise(x: f64, y: f64, seed: f64) -> f64 {
    let i = x.floor();
    let j = y.floor();

    let u = smoothstep(x - i);
    let v = smoothstep(y - j);

    let top = lerp(pseudo_random(i, j, seed), pseudo_random(i + 1.0, j, seed), u);
    let bottom = lerp(
        pseudo_random(i, j + 1.0, seed),
        pseudo_random(i + 1.0, j + 1.0, seed),
        u,
    );
    lerp(top, bottom, v)
}

/// Fractal Brownian Motion - layered value noise with decreasing amplitude.
///
/// Frequency starts at 1 and is multiplied by `lacunarity` per octave;
/// amplitude starts at 1 and is multiplied by `persistence`. The sum is
/// divided by the total amplitude, so one octave is exactly [`value_noise`].
///
/// `octaves == 0` has no meaningful value and returns 0.0.
pub fn fbm(x: f64, y: f64, octaves: usize, persistence: f64, lacunarity: f64, seed: f64) -> f64 {
    if octaves == 0 {
        return 0.0;
    }

    let mut total = 0.0;
    let mut frequency = 1.0;
    let mut amplitude = 1.0;
    let mut max_value = 0.0;

    for _ in 0..octaves {
        total += value_noise(x * frequency, y * frequency, seed) * amplitude;
        max_value += amplitude;
        amplitude *= persistence;
        frequency *= lacunarity;
    }

    total / max_value
}

/// A fixed fBm configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fbm {
    pub octaves: usize,
    pub persistence: f64,
    pub lacunarity: f64,
}

impl Fbm {
    pub const fn new(octaves: usize, persistence: f64) -> Self {
        Self {
            octaves,
            persistence,
            lacunarity: 2.0,
        }
    }

    #[inline]
    pub fn sample(&self, x: f64, y: f64, seed: f64) -> f64 {
        fbm(x, y, self.octaves, self.persistence, self.lacunarity, seed)
    }
}
