//! Scene contents: the point cloud and its tint.

/// Accent colour resolution and the particle material.
pub mod accent;

/// Point generation, cloud geometry and spawning.
pub mod particle_field;
