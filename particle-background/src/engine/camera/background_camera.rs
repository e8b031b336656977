use bevy::prelude::*;
use bevy::render::camera::ClearColorConfig;
use bevy::render::view::Msaa;
use constants::camera::CAMERA_AXIS;

use crate::config::{BackgroundConfig, CameraConfig};

/// Marker for the camera viewing the particle cloud.
#[derive(Component)]
pub struct BackgroundCamera;

/// Drawing surface size in CSS pixels. The pixel ratio is fixed at creation.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
}

impl SurfaceSize {
    pub fn new(viewport: Vec2, pixel_ratio: f32) -> Self {
        Self {
            width: viewport.x,
            height: viewport.y,
            pixel_ratio,
        }
    }

    pub fn logical(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Backing buffer size in device pixels.
    pub fn physical(&self) -> UVec2 {
        (self.logical() * self.pixel_ratio).round().as_uvec2()
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Resize to the new viewport. Degenerate sizes are rejected and leave the surface unchanged.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        if !is_drawable(width, height) {
            return false;
        }
        self.width = width;
        self.height = height;
        true
    }
}

pub fn is_drawable(width: f32, height: f32) -> bool {
    width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0
}

pub fn background_projection(config: &CameraConfig, aspect_ratio: f32) -> PerspectiveProjection {
    PerspectiveProjection {
        fov: config.fov_degrees.to_radians(),
        aspect_ratio,
        near: config.near,
        far: config.far,
    }
}

/// Match a perspective projection's aspect to the surface.
pub fn sync_projection_aspect(projection: &mut Projection, surface: &SurfaceSize) {
    if let Projection::Perspective(perspective) = projection {
        perspective.aspect_ratio = surface.aspect();
    }
}

/// Startup system spawning the transparent, anti-aliased camera.
pub fn spawn_background_camera(
    mut commands: Commands,
    config: Res<BackgroundConfig>,
    surface: Res<SurfaceSize>,
) {
    let projection = background_projection(&config.camera, surface.aspect());

    commands.spawn((
        Name::new("BackgroundCamera"),
        Camera3d::default(),
        Camera {
            clear_color: ClearColorConfig::Custom(Color::NONE),
            ..default()
        },
        Projection::Perspective(projection),
        Msaa::Sample4,
        Transform::from_translation(CAMERA_AXIS * config.camera.distance)
            .looking_at(Vec3::ZERO, Vec3::Y),
        BackgroundCamera,
    ));

    debug!(
        "Background camera at distance {} with aspect {:.3}",
        config.camera.distance,
        surface.aspect()
    );
}
