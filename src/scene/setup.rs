//! Viewer setup: background, orbiting camera and the key light

use glam::Vec3;

use super::materials::{hex_color, srgb_to_linear};

/// Perspective camera orbiting a target
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraRig {
    /// Vertical field of view in degrees
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
    pub damping: f32,
    /// Auto-rotate speed; zero disables
    pub auto_rotate: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            fov_y: 75.0,
            near: 0.1,
            far: 1000.0,
            position: Vec3::new(-17.0, 31.0, 33.0),
            target: Vec3::ZERO,
            damping: 0.05,
            auto_rotate: 0.5,
        }
    }
}

impl CameraRig {
    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }
}

/// Shadow-casting point light
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    /// Linear colour
    pub color: Vec3,
    pub intensity: f32,
    /// Range beyond which the light has no effect
    pub distance: f32,
    pub position: Vec3,
    pub shadow_map_size: u32,
    pub shadow_near: f32,
    pub shadow_far: f32,
}

impl Default for PointLight {
    fn default() -> Self {
        // Warm key light; decoded twice for a deeper tint
        let c = hex_color(0xffcbbe);
        let twice = |v: f32| srgb_to_linear(srgb_to_linear(v));
        Self {
            color: Vec3::new(twice(c.x), twice(c.y), twice(c.z)),
            intensity: 80.0,
            distance: 200.0,
            position: Vec3::new(10.0, 20.0, 10.0),
            shadow_map_size: 512,
            shadow_near: 0.5,
            shadow_far: 500.0,
        }
    }
}

/// Everything about the scene that is not geometry
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneSetup {
    /// sRGB clear colour
    pub background: Vec3,
    pub camera: CameraRig,
    pub light: PointLight,
}

impl Default for SceneSetup {
    fn default() -> Self {
        Self {
            background: hex_color(0xffeecc),
            camera: CameraRig::default(),
            light: PointLight::default(),
        }
    }
}
