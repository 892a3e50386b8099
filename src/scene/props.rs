//! Static props framing the island: the sea, its container ring and the floor

use glam::Vec3;

use crate::mesh::{cylinder, CylinderSpec, MeshData};

const PROP_SEGMENTS: u32 = 50;

fn disc(radius: f32, height: f32, centre_y: f32, open_ended: bool) -> MeshData {
    let spec = CylinderSpec {
        radius_top: radius,
        radius_bottom: radius,
        height,
        radial_segments: PROP_SEGMENTS,
        open_ended,
    };
    cylinder(&spec).translated(Vec3::Y * centre_y)
}

/// Water slab covering the low tiles, `0..0.2 * max_height`
pub fn sea(max_height: f32) -> MeshData {
    disc(17.0, max_height * 0.2, max_height * 0.1, false)
}

/// Open wall just outside the sea, `0..0.25 * max_height`
pub fn container(max_height: f32) -> MeshData {
    disc(17.1, max_height * 0.25, max_height * 0.125, true)
}

/// Wide base plate, `0..0.1 * max_height`
pub fn floor(max_height: f32) -> MeshData {
    disc(18.5, max_height * 0.1, max_height * 0.05, false)
}
