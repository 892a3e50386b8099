//! Hexisle - procedural low-poly island of hexagonal tiles

pub mod core;
pub mod math;
pub mod mesh;
pub mod terrain;
pub mod decoration;
pub mod scene;
