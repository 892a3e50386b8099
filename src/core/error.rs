//! Error types for island generation and scene startup

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decode error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Config parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to load asset {path}: {source}")]
    Asset {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    #[error("Asset loading did not finish within {0:?}")]
    AssetTimeout(Duration),
}

impl Error {
    /// Wrap an error with the path of the asset that produced it.
    pub fn asset(path: impl Into<PathBuf>, source: impl Into<Error>) -> Self {
        Error::Asset {
            path: path.into(),
            source: Box::new(source.into()),
        }
    }
}

/// Configuration rejected at construction time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("max_height must be positive and finite, got {0}")]
    MaxHeight(f32),

    #[error("shaping exponent must be positive and finite, got {0}")]
    Exponent(f32),

    #[error("noise frequency must be positive and finite, got {0}")]
    Frequency(f64),

    #[error("noise amplitude must be in (0, 1], got {0}")]
    Amplitude(f64),

    #[error("island radius must be positive, got {0}")]
    IslandRadius(f32),

    #[error("tile spacing must be positive, got column {column} row {row}")]
    Spacing { column: f32, row: f32 },

    #[error("grid window [{min}, {max}) is empty")]
    EmptyWindow { min: i32, max: i32 },

    #[error("biome thresholds must strictly descend within [0, 1], got {0:?}")]
    Thresholds([f32; 5]),

    #[error("{name} probability must be in [0, 1], got {value}")]
    Probability { name: String, value: f32 },

    #[error("more than one decoration rule for {0}")]
    DuplicateRule(String),

    #[error("unknown preset '{0}' (expected classic, rolling or peaks)")]
    UnknownPreset(String),

    #[error("{name} range is inverted or negative: [{min}, {max})")]
    Range { name: &'static str, min: f32, max: f32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_message() {
        let err = Error::from(ConfigError::MaxHeight(-1.0));
        assert!(err.to_string().contains("max_height"));
    }

    #[test]
    fn test_asset_error_keeps_path() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = Error::asset("assets/envmap.hdr", io);
        let msg = err.to_string();
        assert!(msg.contains("assets/envmap.hdr"));
        assert!(msg.contains("missing"));
    }
}
