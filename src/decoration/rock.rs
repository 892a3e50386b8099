//! Small rock clusters dropped on tile tops

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::ConfigError;
use crate::mesh::{sphere, MeshData};

/// Rock size and placement ranges
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RockParams {
    pub radius_min: f32,
    pub radius_max: f32,
    /// Upper bound of the random x/z offset from the tile centre
    pub jitter: f32,
    pub segments: u32,
}

impl Default for RockParams {
    fn default() -> Self {
        Self {
            radius_min: 0.1,
            radius_max: 0.4,
            jitter: 0.4,
            segments: 7,
        }
    }
}

impl RockParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.radius_min >= 0.0 && self.radius_min <= self.radius_max) {
            return Err(ConfigError::Range {
                name: "rock radius",
                min: self.radius_min,
                max: self.radius_max,
            });
        }
        if !(self.jitter >= 0.0) {
            return Err(ConfigError::Range { name: "rock jitter", min: 0.0, max: self.jitter });
        }
        Ok(())
    }
}

/// One sphere sitting at `top`, nudged by a random horizontal offset
pub fn rock_cluster<R: Rng + ?Sized>(rng: &mut R, params: &RockParams, top: Vec3) -> MeshData {
    let px = rng.random::<f32>() * params.jitter;
    let pz = rng.random::<f32>() * params.jitter;
    let radius = params.radius_min + rng.random::<f32>() * (params.radius_max - params.radius_min);

    sphere(radius, params.segments, params.segments).translated(top + Vec3::new(px, 0.0, pz))
}
