//! Triangle mesh building blocks

pub mod geometry;
pub mod primitives;
pub mod accumulator;

pub use geometry::{MeshData, Vertex};
pub use primitives::{cylinder, sphere, CylinderSpec};
pub use accumulator::{BiomeBuffers, GeometryAccumulator};
