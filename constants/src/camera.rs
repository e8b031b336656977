use bevy::math::Vec3;

/// Vertical field of view in degrees.
pub const CAMERA_FOV_DEGREES: f32 = 75.0;

pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;

/// Distance from the origin along +Z.
pub const CAMERA_DISTANCE: f32 = 3.0;

/// Direction the camera sits along, looking back at the origin.
pub const CAMERA_AXIS: Vec3 = Vec3::Z;
