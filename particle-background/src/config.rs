use bevy::prelude::*;
use constants::camera::{CAMERA_DISTANCE, CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR};
use constants::page::{ACCENT_PROPERTY, DEFAULT_ACCENT, MOUNT_ELEMENT_ID};
use constants::particles::{
    DRIFT_SPEED, PARALLAX_STRENGTH, PARTICLE_COUNT, PARTICLE_SPREAD, POINT_OPACITY, POINT_SIZE,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed background config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("could not read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
}

/// Tunables for the particle background. Missing fields keep their defaults.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    pub mount_id: String,
    pub accent_property: String,
    pub default_accent: String,
    pub particle_count: usize,
    pub spread: f32,
    pub point_size: f32,
    pub opacity: f32,
    pub drift_speed: f32,
    pub parallax_strength: f32,
    pub camera: CameraConfig,
    /// Fixed RNG seed for reproducible clouds; entropy when `None`.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub distance: f32,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            mount_id: MOUNT_ELEMENT_ID.to_string(),
            accent_property: ACCENT_PROPERTY.to_string(),
            default_accent: DEFAULT_ACCENT.to_string(),
            particle_count: PARTICLE_COUNT,
            spread: PARTICLE_SPREAD,
            point_size: POINT_SIZE,
            opacity: POINT_OPACITY,
            drift_speed: DRIFT_SPEED,
            parallax_strength: PARALLAX_STRENGTH,
            camera: CameraConfig::default(),
            seed: None,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: CAMERA_FOV_DEGREES,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            distance: CAMERA_DISTANCE,
        }
    }
}

impl BackgroundConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Parse an optional JSON source, falling back to defaults on absence or error.
    pub fn from_source(source: Option<&str>) -> Self {
        let Some(json) = source.map(str::trim).filter(|json| !json.is_empty()) else {
            return Self::default();
        };

        match Self::from_json(json) {
            Ok(config) => config,
            Err(e) => {
                warn!("{e}; using default background config");
                Self::default()
            }
        }
    }
}
