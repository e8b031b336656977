//! Shared defaults for the particle background.
//!
//! Every tunable in `BackgroundConfig` falls back to a value defined here.

pub mod camera;
pub mod page;
pub mod particles;
