//! Background camera and drawing surface.

/// Camera spawn, surface size tracking and aspect updates on resize.
pub mod background_camera;
