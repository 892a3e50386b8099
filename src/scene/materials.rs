//! Surface descriptions handed to the renderer alongside each mesh

use glam::Vec3;

use super::assets::{AssetSet, EnvironmentMap, Texture};
use crate::terrain::biome::Biome;

/// Convert one sRGB-encoded channel to linear
pub fn srgb_to_linear(c: f32) -> f32 {
    if c < 0.04045 {
        c * 0.0773993808
    } else {
        (c * 0.9478672986 + 0.0521327014).powf(2.4)
    }
}

/// `0xRRGGBB` to channels in [0, 1], still sRGB-encoded
pub fn hex_color(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}

/// `0xRRGGBB` decoded to linear
pub fn linear_color(hex: u32) -> Vec3 {
    let c = hex_color(hex);
    Vec3::new(srgb_to_linear(c.x), srgb_to_linear(c.y), srgb_to_linear(c.z))
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MaterialModel {
    #[default]
    Standard,
    /// Adds transmission, thickness and index of refraction
    Physical,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Shading {
    #[default]
    Smooth,
    Flat,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Side {
    #[default]
    Front,
    Double,
}

/// PBR material parameters. Colours are linear.
#[derive(Clone, Debug)]
pub struct MaterialDesc {
    pub name: String,
    pub model: MaterialModel,
    pub color: Vec3,
    pub map: Option<Texture>,
    pub roughness: f32,
    pub roughness_map: Option<Texture>,
    pub metalness: f32,
    pub metalness_map: Option<Texture>,
    pub env_map: Option<EnvironmentMap>,
    pub env_map_intensity: f32,
    pub ior: f32,
    pub transmission: f32,
    pub thickness: f32,
    pub transparent: bool,
    pub shading: Shading,
    pub side: Side,
}

impl MaterialDesc {
    pub fn new(name: impl Into<String>, model: MaterialModel) -> Self {
        Self {
            name: name.into(),
            model,
            color: Vec3::ONE,
            map: None,
            roughness: 1.0,
            roughness_map: None,
            metalness: 0.0,
            metalness_map: None,
            env_map: None,
            env_map_intensity: 1.0,
            ior: 1.5,
            transmission: 0.0,
            thickness: 0.0,
            transparent: false,
            shading: Shading::Smooth,
            side: Side::Front,
        }
    }

    fn lit_by(mut self, env: &EnvironmentMap, intensity: f32) -> Self {
        self.env_map = Some(env.clone());
        self.env_map_intensity = intensity;
        self
    }

    /// Flat-shaded tile material textured per biome
    pub fn biome(biome: Biome, assets: &AssetSet) -> Self {
        let mut material =
            Self::new(biome.name(), MaterialModel::Physical).lit_by(&assets.environment, 0.135);
        material.map = assets.biome_texture(biome).cloned();
        material.shading = Shading::Flat;
        material
    }

    /// Transmissive water
    pub fn sea(assets: &AssetSet) -> Self {
        let water = assets.texture("water").cloned();
        let mut material =
            Self::new("sea", MaterialModel::Physical).lit_by(&assets.environment, 0.2);
        material.color = linear_color(0x55aaff) * 3.0;
        material.ior = 1.4;
        material.transmission = 1.0;
        material.transparent = true;
        material.thickness = 1.0;
        material.roughness = 1.0;
        material.metalness = 0.025;
        material.roughness_map = water.clone();
        material.metalness_map = water;
        material
    }

    /// Ring wall around the sea
    pub fn container(assets: &AssetSet) -> Self {
        let mut material =
            Self::new("map_container", MaterialModel::Physical).lit_by(&assets.environment, 0.2);
        material.map = assets.texture("dirt").cloned();
        material.side = Side::Double;
        material
    }

    /// Base plate under everything
    pub fn floor(assets: &AssetSet) -> Self {
        let mut material =
            Self::new("map_floor", MaterialModel::Physical).lit_by(&assets.environment, 0.1);
        material.map = assets.texture("dirt2").cloned();
        material.side = Side::Double;
        material
    }

    pub fn cloud(assets: &AssetSet) -> Self {
        let mut material =
            Self::new("clouds", MaterialModel::Standard).lit_by(&assets.environment, 0.75);
        material.shading = Shading::Flat;
        material
    }
}
