//! Puffy low-poly clouds scattered in a band above the island

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::ConfigError;
use crate::mesh::{sphere, MeshData};

/// Cloud layer parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudParams {
    pub enabled: bool,
    /// Upper bound (exclusive) on the number of clusters
    pub max_clusters: u32,
    /// Power applied to the count draw; below 1 biases toward more clusters
    pub count_exponent: f32,
    /// Half-width of the square the clusters scatter over
    pub spread: f32,
    pub altitude_min: f32,
    pub altitude_max: f32,
    pub puff_radii: [f32; 3],
    /// Local X offset of each puff along the cluster axis
    pub puff_offsets: [f32; 3],
    /// Upper bound of each puff's random vertical nudge
    pub puff_jitter: f32,
    pub segments: u32,
}

impl Default for CloudParams {
    fn default() -> Self {
        Self {
            enabled: true,
            max_clusters: 4,
            count_exponent: 0.45,
            spread: 10.0,
            altitude_min: 12.0,
            altitude_max: 22.0,
            puff_radii: [1.2, 1.5, 0.9],
            puff_offsets: [-1.85, 0.0, 1.85],
            puff_jitter: 0.3,
            segments: 7,
        }
    }
}

impl CloudParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.altitude_min <= self.altitude_max) {
            return Err(ConfigError::Range {
                name: "cloud altitude",
                min: self.altitude_min,
                max: self.altitude_max,
            });
        }
        if !(self.count_exponent > 0.0 && self.spread >= 0.0) {
            return Err(ConfigError::Range {
                name: "cloud count exponent / spread",
                min: self.count_exponent,
                max: self.spread,
            });
        }
        Ok(())
    }
}

/// Builds the cloud mesh. Kept apart from the biome buffers since clouds
/// get their own material.
#[derive(Clone, Debug, Default)]
pub struct CloudGenerator {
    params: CloudParams,
}

impl CloudGenerator {
    pub fn new(params: CloudParams) -> Self {
        Self { params }
    }

    /// Number of clusters for a uniform draw `u` in [0, 1)
    pub fn cluster_count(&self, u: f32) -> u32 {
        let scaled = u.powf(self.params.count_exponent) * self.params.max_clusters as f32;
        let count = scaled.floor() as u32;
        count.min(self.params.max_clusters.saturating_sub(1))
    }

    /// Three overlapping puffs along the local X axis
    fn cluster<R: Rng + ?Sized>(&self, rng: &mut R) -> MeshData {
        let p = &self.params;
        let mut mesh = MeshData::new();
        for (radius, offset) in p.puff_radii.iter().zip(p.puff_offsets) {
            let lift = rng.random::<f32>() * p.puff_jitter;
            let puff = sphere(*radius, p.segments, p.segments)
                .translated(Vec3::new(offset, lift, 0.0));
            mesh.append(&puff);
        }
        mesh
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> MeshData {
        let mut clouds = MeshData::new();
        if !self.params.enabled {
            return clouds;
        }

        let p = &self.params;
        let count = self.cluster_count(rng.random());
        for _ in 0..count {
            let mut cluster = self.cluster(rng);
            cluster.translate(Vec3::new(
                rng.random::<f32>() * 2.0 * p.spread - p.spread,
                p.altitude_min + rng.random::<f32>() * (p.altitude_max - p.altitude_min),
                rng.random::<f32>() * 2.0 * p.spread - p.spread,
            ));
            // Yaw is applied after placement, so it swings the cluster about the island axis
            cluster.rotate_y(rng.random::<f32>() * TAU);
            clouds.append(&cluster);
        }

        log::debug!("Generated {} cloud clusters", count);
        clouds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_cluster_count_range() {
        let clouds_gen = CloudGenerator::default();
        assert_eq!(clouds_gen.cluster_count(0.0), 0);
        assert_eq!(clouds_gen.cluster_count(0.5), 2);
        assert_eq!(clouds_gen.cluster_count(0.999), 3);
        for step in 0..100 {
            assert!(clouds_gen.cluster_count(step as f32 / 100.0) <= 3);
        }
    }

    #[test]
    fn test_clouds_in_sky_band() {
        let clouds_gen = CloudGenerator::default();
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let clouds = clouds_gen.generate(&mut rng);
            let Some(bounds) = clouds.bounds() else { continue };

            // Lowest puff bottom / highest puff top around the 12..22 band
            assert!(bounds.min.y >= 12.0 - 1.5 - 1e-3, "cloud too low: {}", bounds.min.y);
            assert!(bounds.max.y <= 22.0 + 0.3 + 1.5 + 1e-3, "cloud too high: {}", bounds.max.y);
            // Rotation about the origin keeps clusters within the spread circle plus puff extent
            let reach = (10.0f32 * 10.0 * 2.0).sqrt() + 1.85 + 1.5;
            assert!(Vec3::new(bounds.max.x, 0.0, bounds.max.z).length() <= reach * 2.0);
        }
    }

    #[test]
    fn test_cluster_puff_count() {
        let clouds_gen = CloudGenerator::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let single = sphere(1.0, 7, 7);
        let cluster = clouds_gen.cluster(&mut rng);
        assert_eq!(cluster.triangle_count(), 3 * single.triangle_count());
    }

    #[test]
    fn test_disabled_clouds_empty() {
        let clouds_gen = CloudGenerator::new(CloudParams { enabled: false, ..Default::default() });
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(clouds_gen.generate(&mut rng).is_empty());
    }

    #[test]
    fn test_seeded_clouds_reproducible() {
        let clouds_gen = CloudGenerator::default();
        let a = clouds_gen.generate(&mut ChaCha8Rng::seed_from_u64(77));
        let b = clouds_gen.generate(&mut ChaCha8Rng::seed_from_u64(77));
        assert_eq!(a, b);
    }
}
