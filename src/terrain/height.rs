//! Noise-shaped tile heights

use serde::{Deserialize, Serialize};

use super::layout::GridCoord;
use super::noise::{NoiseSource, SimplexNoise};
use crate::core::ConfigError;

/// Parameters shaping raw noise into tile heights
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeightParams {
    /// Height of a tile whose folded noise reaches 1
    pub max_height: f32,
    /// Power applied to folded noise (< 1 flattens lowlands into plateaus, > 1 suppresses uplift)
    pub exponent: f32,
    /// Grid-to-noise coordinate scale
    pub frequency: f64,
    /// Multiplier on raw noise before folding, in (0, 1]
    pub amplitude: f64,
}

impl Default for HeightParams {
    fn default() -> Self {
        Self {
            max_height: 10.0,
            exponent: 0.2,
            frequency: 0.1,
            amplitude: 0.5,
        }
    }
}

impl HeightParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.max_height.is_finite() && self.max_height > 0.0) {
            return Err(ConfigError::MaxHeight(self.max_height));
        }
        if !(self.exponent.is_finite() && self.exponent > 0.0) {
            return Err(ConfigError::Exponent(self.exponent));
        }
        if !(self.frequency.is_finite() && self.frequency > 0.0) {
            return Err(ConfigError::Frequency(self.frequency));
        }
        if !(self.amplitude > 0.0 && self.amplitude <= 1.0) {
            return Err(ConfigError::Amplitude(self.amplitude));
        }
        Ok(())
    }

    /// Fold and shape one raw noise sample into a height.
    ///
    /// Negative lobes are mirrored upward so the whole noise range adds relief.
    pub fn shape(&self, raw: f64) -> f32 {
        let folded = (raw.clamp(-1.0, 1.0) * self.amplitude).abs() as f32;
        (folded.powf(self.exponent) * self.max_height).clamp(0.0, self.max_height)
    }
}

/// Maps grid coordinates to heights in `[0, max_height]`
#[derive(Clone, Debug)]
pub struct HeightField<N = SimplexNoise> {
    noise: N,
    params: HeightParams,
}

impl<N: NoiseSource> HeightField<N> {
    pub fn new(noise: N, params: HeightParams) -> Self {
        Self { noise, params }
    }

    pub fn params(&self) -> &HeightParams {
        &self.params
    }

    pub fn max_height(&self) -> f32 {
        self.params.max_height
    }

    /// Height of the tile at `coord`
    pub fn height_at(&self, coord: GridCoord) -> f32 {
        let raw = self.noise.sample(
            coord.column as f64 * self.params.frequency,
            coord.row as f64 * self.params.frequency,
        );
        self.params.shape(raw)
    }
}
