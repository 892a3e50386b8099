//! Stacked-cone conifers

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::ConfigError;
use crate::mesh::{cylinder, CylinderSpec, MeshData};

/// Tree shape. Each tier is one cone; all tiers share a random height.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeParams {
    pub height_min: f32,
    pub height_max: f32,
    /// Base radius of each tier, bottom first
    pub tier_radii: [f32; 3],
    /// Vertical offset of each tier as a multiple of the tree height
    pub tier_offsets: [f32; 3],
    /// Extra lift of the whole stack above the tile top
    pub lift: f32,
    pub radial_segments: u32,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            height_min: 1.25,
            height_max: 2.25,
            tier_radii: [1.5, 1.15, 0.8],
            tier_offsets: [0.0, 0.6, 1.25],
            lift: 1.0,
            radial_segments: 3,
        }
    }
}

impl TreeParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.height_min > 0.0 && self.height_min <= self.height_max) {
            return Err(ConfigError::Range {
                name: "tree height",
                min: self.height_min,
                max: self.height_max,
            });
        }
        Ok(())
    }
}

/// Three cones stacked above `top`, merged into one mesh
pub fn tree<R: Rng + ?Sized>(rng: &mut R, params: &TreeParams, top: Vec3) -> MeshData {
    let height = params.height_min + rng.random::<f32>() * (params.height_max - params.height_min);

    let mut mesh = MeshData::new();
    for (radius, offset) in params.tier_radii.iter().zip(params.tier_offsets) {
        let cone = cylinder(&CylinderSpec::cone(*radius, height, params.radial_segments))
            .translated(top + Vec3::Y * (height * offset + params.lift));
        mesh.append(&cone);
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Aabb;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_tree_has_three_tiers() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let single = cylinder(&CylinderSpec::cone(1.0, 1.0, 3));
        let mesh = tree(&mut rng, &TreeParams::default(), Vec3::ZERO);
        assert_eq!(mesh.triangle_count(), 3 * single.triangle_count());
    }

    #[test]
    fn test_tree_extent() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let params = TreeParams::default();
        let top = Vec3::new(1.0, 7.2, 2.0);

        for _ in 0..20 {
            let bounds = tree(&mut rng, &params, top).bounds().unwrap();
            // Bottom tier is centred at top + lift, so its base is half a height lower
            let bottom = bounds.min.y - top.y - params.lift;
            let height = -2.0 * bottom;
            assert!(height >= 1.25 - 1e-4 && height < 2.25 + 1e-4, "tree height {}", height);
            // Apex of the top tier
            let apex = top.y + params.lift + height * 1.25 + height * 0.5;
            assert!((bounds.max.y - apex).abs() < 1e-3);
            // Widest tier is the bottom one
            assert!((bounds.max.x - top.x) <= 1.5 + 1e-4);
        }
    }

    #[test]
    fn test_tree_tier_placement() {
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let params = TreeParams::default();
        let top = Vec3::new(-3.0, 4.0, 0.5);
        let mesh = tree(&mut rng, &params, top);

        // Tiers are appended bottom first with identical vertex counts
        let per_tier = mesh.vertex_count() / 3;
        let tiers: Vec<Aabb> = mesh
            .vertices
            .chunks(per_tier)
            .map(|tier| Aabb::from_points(tier.iter().map(|v| v.position())).unwrap())
            .collect();
        assert_eq!(tiers.len(), 3);

        let height = tiers[0].size().y;
        assert!(height >= 1.25 && height < 2.25 + 1e-4, "tree height {}", height);
        let layout = params.tier_offsets.into_iter().zip(params.tier_radii);
        for (tier, (offset, radius)) in tiers.iter().zip(layout) {
            let centre = top.y + params.lift + height * offset;
            assert!((tier.center().y - centre).abs() < 1e-4, "tier at {}", tier.center().y);
            assert!((tier.size().y - height).abs() < 1e-4);
            assert!((tier.max.z - top.z - radius).abs() < 1e-4);
        }
    }

    #[test]
    fn test_tree_validate() {
        assert!(TreeParams::default().validate().is_ok());
        let bad = TreeParams { height_min: 0.0, ..Default::default() };
        assert!(bad.validate().is_err());
    }
}
