//! Island configuration: every generation constant, loadable from JSON

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{ConfigError, Result};
use crate::decoration::{CloudParams, DecorationParams};
use crate::terrain::generator::TerrainParams;
use crate::terrain::height::HeightParams;

/// Where the scene's textures and environment map live
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Directory every other path is relative to
    pub root: PathBuf,
    pub environment_map: PathBuf,
    /// Texture key -> file
    pub textures: BTreeMap<String, PathBuf>,
    /// Seconds to wait for all assets before giving up
    pub timeout_secs: f32,
}

impl Default for AssetConfig {
    fn default() -> Self {
        let textures = [
            ("dirt", "dirt.png"),
            ("dirt2", "dirt2.jpg"),
            ("grass", "grass.jpg"),
            ("sand", "sand.jpg"),
            ("water", "water.jpg"),
            ("stone", "stone.png"),
        ]
        .into_iter()
        .map(|(key, file)| (key.to_string(), PathBuf::from("textures").join(file)))
        .collect();

        Self {
            root: PathBuf::from("assets"),
            environment_map: PathBuf::from("envmap.hdr"),
            textures,
            timeout_secs: 30.0,
        }
    }
}

impl AssetConfig {
    pub fn environment_map_path(&self) -> PathBuf {
        self.root.join(&self.environment_map)
    }

    /// Full path of every texture, keyed
    pub fn texture_paths(&self) -> impl Iterator<Item = (&str, PathBuf)> {
        self.textures.iter().map(|(key, path)| (key.as_str(), self.root.join(path)))
    }

    /// Loading timeout; saturates rather than wrapping for huge values
    pub fn timeout(&self) -> Duration {
        if self.timeout_secs > 0.0 {
            Duration::try_from_secs_f32(self.timeout_secs).unwrap_or(Duration::MAX)
        } else {
            Duration::ZERO
        }
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let representable = Duration::try_from_secs_f32(self.timeout_secs).is_ok();
        if !(representable && self.timeout_secs > 0.0) {
            return Err(ConfigError::Range {
                name: "asset timeout",
                min: 0.0,
                max: self.timeout_secs,
            });
        }
        Ok(())
    }
}

/// Complete island configuration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IslandConfig {
    pub terrain: TerrainParams,
    pub decoration: DecorationParams,
    pub clouds: CloudParams,
    pub assets: AssetConfig,
}

impl IslandConfig {
    /// Configuration for a named preset
    pub fn preset(preset: Preset) -> Self {
        let mut config = Self::default();
        config.terrain.height = preset.height_params();
        config
    }

    /// Load and validate a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        log::info!("Loaded island config from {}", path.display());
        Ok(config)
    }

    /// Write as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.terrain.validate()?;
        self.decoration.validate()?;
        self.clouds.validate()?;
        self.assets.validate()
    }

    /// Maximum tile height, which also scales the props
    pub fn max_height(&self) -> f32 {
        self.terrain.height.max_height
    }
}

/// Named terrain shapes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// Low island with broad plateaus
    #[default]
    Classic,
    /// Taller, softer hills
    Rolling,
    /// Sharp peaks over wide lowlands
    Peaks,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Classic, Preset::Rolling, Preset::Peaks];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Classic => "classic",
            Preset::Rolling => "rolling",
            Preset::Peaks => "peaks",
        }
    }

    pub fn height_params(self) -> HeightParams {
        let (max_height, exponent) = match self {
            Preset::Classic => (10.0, 0.2),
            Preset::Rolling => (20.0, 0.5),
            Preset::Peaks => (25.0, 1.5),
        };
        HeightParams { max_height, exponent, ..Default::default() }
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownPreset(s.to_string()))
    }
}
