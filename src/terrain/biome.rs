//! Height-banded biomes and the threshold ladder that assigns them

use serde::{Deserialize, Serialize};

use crate::core::ConfigError;

/// Biome types, ordered from the highest band to the lowest
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Biome {
    Stone,
    Dirt,
    Grass,
    Sand,
    ShallowDirt,
}

impl Biome {
    /// All biomes in descending threshold order
    pub const ALL: [Biome; 5] = [
        Biome::Stone,
        Biome::Dirt,
        Biome::Grass,
        Biome::Sand,
        Biome::ShallowDirt,
    ];

    /// Position in [`Biome::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Key of the texture this biome is drawn with
    pub fn texture_key(self) -> &'static str {
        match self {
            Biome::Stone => "stone",
            Biome::Dirt => "dirt",
            Biome::Grass => "grass",
            Biome::Sand => "sand",
            Biome::ShallowDirt => "dirt2",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Biome::Stone => "stone",
            Biome::Dirt => "dirt",
            Biome::Grass => "grass",
            Biome::Sand => "sand",
            Biome::ShallowDirt => "shallow_dirt",
        }
    }
}

impl std::fmt::Display for Biome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Biome breakpoints as fractions of the maximum terrain height.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiomeThresholds {
    pub stone: f32,
    pub dirt: f32,
    pub grass: f32,
    pub sand: f32,
    pub shallow_dirt: f32,
}

impl Default for BiomeThresholds {
    fn default() -> Self {
        Self {
            stone: 0.8,
            dirt: 0.7,
            grass: 0.5,
            sand: 0.3,
            shallow_dirt: 0.0,
        }
    }
}

impl BiomeThresholds {
    /// Fractions in [`Biome::ALL`] order
    pub fn as_array(&self) -> [f32; 5] {
        [self.stone, self.dirt, self.grass, self.sand, self.shallow_dirt]
    }

    /// Thresholds must lie in [0, 1] and strictly descend.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let values = self.as_array();
        let in_range = values.iter().all(|t| (0.0..=1.0).contains(t));
        let descending = values.windows(2).all(|w| w[0] > w[1]);
        if in_range && descending {
            Ok(())
        } else {
            Err(ConfigError::Thresholds(values))
        }
    }
}

/// Maps a height to a biome using absolute breakpoints.
///
/// A height exactly on a breakpoint belongs to the biome below it.
#[derive(Clone, Debug)]
pub struct BiomeClassifier {
    breakpoints: [f32; 5],
}

impl BiomeClassifier {
    pub fn new(thresholds: &BiomeThresholds, max_height: f32) -> Self {
        Self {
            breakpoints: thresholds.as_array().map(|t| t * max_height),
        }
    }

    /// Absolute breakpoint of a biome (its exclusive lower bound)
    pub fn breakpoint(&self, biome: Biome) -> f32 {
        self.breakpoints[biome.index()]
    }

    /// Half-open `(lower, upper]` height interval covered by a biome.
    /// The top biome is unbounded above.
    pub fn interval(&self, biome: Biome) -> (f32, f32) {
        let lower = self.breakpoint(biome);
        let upper = match biome.index() {
            0 => f32::INFINITY,
            i => self.breakpoints[i - 1],
        };
        (lower, upper)
    }

    /// Whether a tile of this height gets a column at all
    pub fn produces_column(&self, height: f32) -> bool {
        height > self.breakpoint(Biome::ShallowDirt)
    }

    /// Highest biome whose breakpoint the height strictly exceeds.
    ///
    /// Heights at or below the lowest breakpoint still map to the lowest
    /// biome; [`BiomeClassifier::produces_column`] decides whether such a
    /// tile is emitted.
    pub fn classify(&self, height: f32) -> Biome {
        Biome::ALL
            .into_iter()
            .find(|&b| height > self.breakpoint(b))
            .unwrap_or(Biome::ShallowDirt)
    }
}
