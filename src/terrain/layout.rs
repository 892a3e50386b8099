//! Offset-row hexagonal tiling and the circular island boundary

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::core::ConfigError;

/// Integer tile address
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCoord {
    pub column: i32,
    pub row: i32,
}

impl GridCoord {
    pub fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }
}

/// Position on the ground plane. `z` is the world Z axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WorldPos {
    pub x: f32,
    pub z: f32,
}

impl WorldPos {
    pub fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    /// Distance from the island centre
    pub fn length(&self) -> f32 {
        Vec2::new(self.x, self.z).length()
    }

    /// Lift onto the Y axis
    pub fn with_height(&self, y: f32) -> Vec3 {
        Vec3::new(self.x, y, self.z)
    }
}

/// Half-open square window `[min, max)` on both grid axes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridWindow {
    pub min: i32,
    pub max: i32,
}

impl Default for GridWindow {
    fn default() -> Self {
        Self { min: -15, max: 15 }
    }
}

impl GridWindow {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min < self.max {
            Ok(())
        } else {
            Err(ConfigError::EmptyWindow { min: self.min, max: self.max })
        }
    }

    /// Number of coordinates in the window
    pub fn len(&self) -> usize {
        let side = (self.max - self.min).max(0) as usize;
        side * side
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every coordinate, column-major like the generator's walk
    pub fn coords(self) -> impl Iterator<Item = GridCoord> {
        let (min, max) = (self.min, self.max);
        (min..max).flat_map(move |column| (min..max).map(move |row| GridCoord::new(column, row)))
    }
}

/// Spacing and boundary of the tiling
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutParams {
    /// Horizontal distance between neighbouring columns
    pub column_spacing: f32,
    /// Distance between rows
    pub row_spacing: f32,
    /// Tiles farther than this from the origin are dropped
    pub island_radius: f32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            column_spacing: 1.77,
            row_spacing: 1.535,
            island_radius: 16.0,
        }
    }
}

impl LayoutParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.column_spacing > 0.0 && self.row_spacing > 0.0) {
            return Err(ConfigError::Spacing {
                column: self.column_spacing,
                row: self.row_spacing,
            });
        }
        if !(self.island_radius > 0.0) {
            return Err(ConfigError::IslandRadius(self.island_radius));
        }
        Ok(())
    }
}

/// Converts grid coordinates to ground positions.
///
/// Odd rows shift half a column. The shift follows the sign of the row
/// (truncating remainder), so row -1 shifts left and row 1 shifts right;
/// both tile seamlessly with their even neighbours.
#[derive(Clone, Copy, Debug, Default)]
pub struct TileLayout {
    params: LayoutParams,
}

impl TileLayout {
    pub fn new(params: LayoutParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    pub fn to_world(&self, coord: GridCoord) -> WorldPos {
        let shift = (coord.row % 2) as f32 * 0.5;
        WorldPos::new(
            (coord.column as f32 + shift) * self.params.column_spacing,
            coord.row as f32 * self.params.row_spacing,
        )
    }

    /// Inclusive radius test: a tile exactly on the boundary is kept
    pub fn is_within_island(&self, pos: WorldPos) -> bool {
        !(pos.length() > self.params.island_radius)
    }
}
