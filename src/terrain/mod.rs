//! Procedural island terrain: noise heights on a hexagonal tile grid

pub mod noise;
pub mod height;
pub mod layout;
pub mod biome;
pub mod generator;

pub use noise::{NoiseSource, SimplexNoise};
pub use height::{HeightField, HeightParams};
pub use layout::{GridCoord, GridWindow, LayoutParams, TileLayout, WorldPos};
pub use biome::{Biome, BiomeClassifier, BiomeThresholds};
pub use generator::{
    tile_column, BuildStats, IslandTerrain, TerrainBuilder, TerrainParams, TileRecord,
};
