//! Core application setup and lifecycle.
//!
//! Builds the bevy app around the background plugin, configures the window for
//! native and wasm targets, and owns mount/dispose state.

/// Application setup and plugin configuration.
pub mod app_setup;

/// The background animator plugin and its per-frame system ordering.
pub mod background_plugin;

/// Cancellation handle, lifecycle state and disposal.
pub mod lifecycle;

/// Platform-specific window configuration.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
