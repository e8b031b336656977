use bevy::prelude::*;

/// `#3b82f6`, used when even the configured fallback fails to parse.
const BUILTIN_ACCENT: Srgba = Srgba::rgb(59.0 / 255.0, 130.0 / 255.0, 246.0 / 255.0);

/// Tint for the particles, resolved once from page styling at startup.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct AccentColor {
    /// The hex string the colour was parsed from.
    pub hex: String,
    pub color: Color,
}

impl AccentColor {
    /// Resolve the accent from a raw style value. Unset, blank or unparseable
    /// values use `fallback`.
    pub fn resolve(raw: Option<&str>, fallback: &str) -> Self {
        match raw.map(str::trim).filter(|value| !value.is_empty()) {
            Some(value) => match Srgba::hex(value) {
                Ok(color) => {
                    return Self {
                        hex: value.to_string(),
                        color: color.into(),
                    };
                }
                Err(e) => warn!(
                    "Accent colour {value:?} is not a hex colour ({e}), using {fallback}"
                ),
            },
            None => debug!("No accent colour set, using {fallback}"),
        }

        match Srgba::hex(fallback) {
            Ok(color) => Self {
                hex: fallback.to_string(),
                color: color.into(),
            },
            Err(e) => {
                warn!("Fallback accent {fallback:?} is invalid ({e})");
                Self {
                    hex: BUILTIN_ACCENT.to_hex(),
                    color: BUILTIN_ACCENT.into(),
                }
            }
        }
    }
}

/// Unlit, blended material for the cloud.
pub fn particle_material(color: Color, opacity: f32) -> StandardMaterial {
    StandardMaterial {
        base_color: color.with_alpha(opacity),
        unlit: true,
        alpha_mode: AlphaMode::Blend,
        double_sided: true,
        cull_mode: None,
        ..default()
    }
}
