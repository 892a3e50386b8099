//! Per-biome merge buffers

use super::geometry::MeshData;
use crate::terrain::biome::Biome;

/// Collects shapes into one merged mesh per biome.
///
/// Every biome starts with an empty buffer, so a biome that never receives a
/// shape still finalizes to a valid (empty) mesh.
#[derive(Clone, Debug, Default)]
pub struct GeometryAccumulator {
    buffers: [MeshData; 5],
    shape_counts: [usize; 5],
}

impl GeometryAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `shape` into the buffer for `biome`
    pub fn add(&mut self, biome: Biome, shape: &MeshData) {
        self.buffers[biome.index()].append(shape);
        self.shape_counts[biome.index()] += 1;
    }

    /// Current contents of a biome's buffer
    pub fn buffer(&self, biome: Biome) -> &MeshData {
        &self.buffers[biome.index()]
    }

    /// Number of shapes merged into a biome's buffer
    pub fn shape_count(&self, biome: Biome) -> usize {
        self.shape_counts[biome.index()]
    }

    /// Hand over the merged buffers
    pub fn finalize(self) -> BiomeBuffers {
        BiomeBuffers { buffers: self.buffers }
    }
}

/// Finished geometry, one mesh per biome
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BiomeBuffers {
    buffers: [MeshData; 5],
}

impl BiomeBuffers {
    pub fn get(&self, biome: Biome) -> &MeshData {
        &self.buffers[biome.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Biome, &MeshData)> {
        Biome::ALL.into_iter().zip(self.buffers.iter())
    }

    pub fn total_triangles(&self) -> usize {
        self.buffers.iter().map(MeshData::triangle_count).sum()
    }
}

impl IntoIterator for BiomeBuffers {
    type Item = (Biome, MeshData);
    type IntoIter =
        std::iter::Zip<std::array::IntoIter<Biome, 5>, std::array::IntoIter<MeshData, 5>>;

    fn into_iter(self) -> Self::IntoIter {
        Biome::ALL.into_iter().zip(self.buffers)
    }
}
