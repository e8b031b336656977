use std::collections::HashMap;

use bevy::prelude::*;
use constants::page::{CONFIG_ENV_VAR, FALLBACK_VIEWPORT, MOUNT_ELEMENT_ID};

use crate::config::BackgroundConfig;

/// Read-only view of the page hosting the background.
pub trait HostPage {
    /// Whether an element with the given id exists.
    fn has_element(&self, id: &str) -> bool;

    /// Computed value of a style property on the page body, untrimmed.
    fn style_property(&self, name: &str) -> Option<String>;

    /// Viewport size in CSS pixels.
    fn viewport(&self) -> Vec2;

    /// Device pixel ratio.
    fn pixel_ratio(&self) -> f32;

    /// Raw JSON for `BackgroundConfig`, if the page supplies one.
    fn config_source(&self, mount_id: &str) -> Option<String>;
}

/// Page state captured once at startup and handed to `BackgroundPlugin`.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSnapshot {
    pub config: BackgroundConfig,
    /// Accent property value exactly as read, before trimming or fallback.
    pub accent: Option<String>,
    pub viewport: Vec2,
    pub pixel_ratio: f32,
}

impl PageSnapshot {
    /// Capture page state, or `None` when the mount element is missing.
    pub fn capture(page: &impl HostPage) -> Option<Self> {
        let config =
            BackgroundConfig::from_source(page.config_source(MOUNT_ELEMENT_ID).as_deref());

        if !page.has_element(&config.mount_id) {
            debug!(
                "Mount element #{} not found, particle background disabled",
                config.mount_id
            );
            return None;
        }

        let accent = page.style_property(&config.accent_property);

        Some(Self {
            config,
            accent,
            viewport: page.viewport(),
            pixel_ratio: page.pixel_ratio(),
        })
    }
}

/// In-memory page used by native builds and tests.
#[derive(Debug, Clone)]
pub struct StaticPage {
    pub elements: Vec<String>,
    pub styles: HashMap<String, String>,
    pub viewport: Vec2,
    /// Nominal ratio only. Native windows keep the monitor's own scale factor.
    pub pixel_ratio: f32,
    pub config: Option<String>,
}

impl Default for StaticPage {
    fn default() -> Self {
        Self {
            elements: vec![MOUNT_ELEMENT_ID.to_string()],
            styles: HashMap::new(),
            viewport: Vec2::new(FALLBACK_VIEWPORT.0, FALLBACK_VIEWPORT.1),
            pixel_ratio: 1.0,
            config: None,
        }
    }
}

impl StaticPage {
    /// Desktop stand-in for a page. The window acts as the mount element, custom
    /// properties come from environment variables (`--accent-primary` is read from
    /// `ACCENT_PRIMARY`) and the config file from `PARTICLE_BACKGROUND_CONFIG`.
    pub fn from_env() -> Self {
        let mut page = Self::default();

        let property = constants::page::ACCENT_PROPERTY;
        if let Ok(value) = std::env::var(env_name_for_property(property)) {
            page.styles.insert(property.to_string(), value);
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            match BackgroundConfig::from_file(&path) {
                Ok(config) => match serde_json::to_string(&config) {
                    Ok(json) => page.config = Some(json),
                    Err(e) => warn!("Failed to re-encode config from {path}: {e}"),
                },
                Err(e) => warn!("{e}; using default background config"),
            }
        }

        page
    }

    pub fn without_mount(mut self) -> Self {
        self.elements.clear();
        self
    }

    pub fn with_style(mut self, name: &str, value: &str) -> Self {
        self.styles.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport = Vec2::new(width, height);
        self
    }
}

impl HostPage for StaticPage {
    fn has_element(&self, id: &str) -> bool {
        self.elements.iter().any(|element| element == id)
    }

    fn style_property(&self, name: &str) -> Option<String> {
        self.styles.get(name).cloned()
    }

    fn viewport(&self) -> Vec2 {
        self.viewport
    }

    fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    fn config_source(&self, _mount_id: &str) -> Option<String> {
        self.config.clone()
    }
}

/// `--accent-primary` -> `ACCENT_PRIMARY`
fn env_name_for_property(property: &str) -> String {
    property
        .trim_start_matches('-')
        .replace('-', "_")
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_mount_captures_nothing() {
        let page = StaticPage::default().without_mount();
        assert!(PageSnapshot::capture(&page).is_none());
    }

    #[test]
    fn snapshot_reads_accent_and_viewport() {
        let page = StaticPage::default()
            .with_style("--accent-primary", " #ff0000 ")
            .with_viewport(800.0, 600.0);

        let snapshot = PageSnapshot::capture(&page).unwrap();
        assert_eq!(snapshot.accent.as_deref(), Some(" #ff0000 "));
        assert_eq!(snapshot.viewport, Vec2::new(800.0, 600.0));
        assert_eq!(snapshot.config, BackgroundConfig::default());
    }

    #[test]
    fn page_config_can_move_the_mount() {
        let mut page = StaticPage::default();
        page.config = Some(r#"{ "mount_id": "hero" }"#.to_string());
        assert!(PageSnapshot::capture(&page).is_none());

        page.elements.push("hero".to_string());
        let snapshot = PageSnapshot::capture(&page).unwrap();
        assert_eq!(snapshot.config.mount_id, "hero");
    }

    #[test]
    fn property_names_map_to_env_vars() {
        assert_eq!(env_name_for_property("--accent-primary"), "ACCENT_PRIMARY");
    }
}
