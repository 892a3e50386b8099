//! Coherent 2D noise sources

use noise::{NoiseFn, Simplex};

/// Deterministic, coherent 2D noise in [-1, 1].
pub trait NoiseSource {
    fn sample(&self, x: f64, y: f64) -> f64;
}

/// Any `Fn(x, y) -> value` works as a noise source; handy for pinning
/// heights in tests.
impl<F> NoiseSource for F
where
    F: Fn(f64, f64) -> f64,
{
    fn sample(&self, x: f64, y: f64) -> f64 {
        self(x, y)
    }
}

/// Seeded simplex noise
#[derive(Clone, Debug)]
pub struct SimplexNoise {
    seed: u32,
    inner: Simplex,
}

impl SimplexNoise {
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            inner: Simplex::new(seed),
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl NoiseSource for SimplexNoise {
    fn sample(&self, x: f64, y: f64) -> f64 {
        self.inner.get([x, y]).clamp(-1.0, 1.0)
    }
}
