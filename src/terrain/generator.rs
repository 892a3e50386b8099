//! Island terrain builder: walks the tile grid and fills per-biome meshes

use std::time::Instant;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::biome::{Biome, BiomeClassifier, BiomeThresholds};
use super::height::{HeightField, HeightParams};
use super::layout::{GridCoord, GridWindow, LayoutParams, TileLayout, WorldPos};
use super::noise::{NoiseSource, SimplexNoise};
use crate::core::ConfigError;
use crate::decoration::{DecorationGenerator, DecorationKind, DecorationParams};
use crate::mesh::{cylinder, BiomeBuffers, CylinderSpec, GeometryAccumulator, MeshData};

/// Parameters controlling terrain generation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainParams {
    /// Noise seed; fixes every height and biome
    pub seed: u32,
    pub window: GridWindow,
    pub layout: LayoutParams,
    pub height: HeightParams,
    pub thresholds: BiomeThresholds,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            seed: 12345,
            window: GridWindow::default(),
            layout: LayoutParams::default(),
            height: HeightParams::default(),
            thresholds: BiomeThresholds::default(),
        }
    }
}

impl TerrainParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.window.validate()?;
        self.layout.validate()?;
        self.height.validate()?;
        self.thresholds.validate()
    }
}

/// Deterministic facts about one emitted tile
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileRecord {
    pub coord: GridCoord,
    pub position: WorldPos,
    pub height: f32,
    pub biome: Biome,
}

/// Counters gathered during a build
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub visited: usize,
    pub outside_island: usize,
    /// Tiles inside the island whose height produced no column
    pub flat: usize,
    pub columns: usize,
    pub rocks: usize,
    pub trees: usize,
    pub columns_per_biome: [usize; 5],
}

impl BuildStats {
    pub fn columns_in(&self, biome: Biome) -> usize {
        self.columns_per_biome[biome.index()]
    }
}

/// Result of a build: merged geometry plus what went into it
#[derive(Clone, Debug)]
pub struct IslandTerrain {
    pub buffers: BiomeBuffers,
    pub tiles: Vec<TileRecord>,
    pub stats: BuildStats,
}

/// Hexagonal column for a tile, base on the ground plane
pub fn tile_column(height: f32, pos: WorldPos) -> MeshData {
    cylinder(&CylinderSpec::hex_column(height)).translated(pos.with_height(height * 0.5))
}

/// Walks the grid window once and produces per-biome geometry
pub struct TerrainBuilder<N = SimplexNoise> {
    window: GridWindow,
    layout: TileLayout,
    heights: HeightField<N>,
    classifier: BiomeClassifier,
    decorations: DecorationGenerator,
}

impl TerrainBuilder<SimplexNoise> {
    /// Create a builder using seeded simplex noise
    pub fn new(params: &TerrainParams, decoration: DecorationParams) -> Result<Self, ConfigError> {
        Self::with_noise(SimplexNoise::new(params.seed), params, decoration)
    }
}

impl<N: NoiseSource> TerrainBuilder<N> {
    /// Create a builder around any noise source
    pub fn with_noise(
        noise: N,
        params: &TerrainParams,
        decoration: DecorationParams,
    ) -> Result<Self, ConfigError> {
        params.validate()?;
        decoration.validate()?;

        Ok(Self {
            window: params.window,
            layout: TileLayout::new(params.layout),
            heights: HeightField::new(noise, params.height),
            classifier: BiomeClassifier::new(&params.thresholds, params.height.max_height),
            decorations: DecorationGenerator::new(decoration),
        })
    }

    pub fn layout(&self) -> &TileLayout {
        &self.layout
    }

    pub fn heights(&self) -> &HeightField<N> {
        &self.heights
    }

    pub fn classifier(&self) -> &BiomeClassifier {
        &self.classifier
    }

    /// Where a tile sits, how tall it is and which biome it belongs to.
    /// `None` if it lies outside the island or produces no column.
    pub fn sample_tile(&self, coord: GridCoord) -> Option<TileRecord> {
        let position = self.layout.to_world(coord);
        if !self.layout.is_within_island(position) {
            return None;
        }
        let height = self.heights.height_at(coord);
        if !self.classifier.produces_column(height) {
            return None;
        }
        Some(TileRecord {
            coord,
            position,
            height,
            biome: self.classifier.classify(height),
        })
    }

    /// Deterministic tile assignments, in walk order
    pub fn tiles(&self) -> impl Iterator<Item = TileRecord> + '_ {
        self.window.coords().filter_map(|coord| self.sample_tile(coord))
    }

    /// Run the full walk. `rng` drives decoration only.
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> IslandTerrain {
        let start = Instant::now();
        let mut accumulator = GeometryAccumulator::new();
        let mut stats = BuildStats::default();
        let mut tiles = Vec::new();

        for coord in self.window.coords() {
            stats.visited += 1;

            let position = self.layout.to_world(coord);
            if !self.layout.is_within_island(position) {
                stats.outside_island += 1;
                continue;
            }
            let height = self.heights.height_at(coord);
            if !self.classifier.produces_column(height) {
                stats.flat += 1;
                continue;
            }
            let biome = self.classifier.classify(height);

            accumulator.add(biome, &tile_column(height, position));
            stats.columns += 1;
            stats.columns_per_biome[biome.index()] += 1;

            if let Some(decoration) = self.decorations.decorate(rng, biome, height, position) {
                accumulator.add(decoration.target, &decoration.mesh);
                match decoration.kind {
                    DecorationKind::Rock => stats.rocks += 1,
                    DecorationKind::Tree => stats.trees += 1,
                }
            }

            tiles.push(TileRecord { coord, position, height, biome });
        }

        for biome in Biome::ALL {
            log::debug!(
                "{}: {} columns, {} shapes, {} triangles",
                biome,
                stats.columns_in(biome),
                accumulator.shape_count(biome),
                accumulator.buffer(biome).triangle_count(),
            );
        }

        let buffers = accumulator.finalize();
        log::info!(
            "Built island: {} columns ({} rocks, {} trees), {} triangles in {:.1}ms",
            stats.columns,
            stats.rocks,
            stats.trees,
            buffers.total_triangles(),
            start.elapsed().as_secs_f64() * 1000.0,
        );

        IslandTerrain { buffers, tiles, stats }
    }
}
