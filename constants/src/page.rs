/// Id of the element the background canvas is mounted into.
pub const MOUNT_ELEMENT_ID: &str = "canvas-container";

/// Id given to the canvas created inside the mount element.
pub const CANVAS_ELEMENT_ID: &str = "particle-background-canvas";

/// Custom CSS property holding the theme accent colour.
pub const ACCENT_PROPERTY: &str = "--accent-primary";

/// Used when the accent property is unset, empty or unparseable.
pub const DEFAULT_ACCENT: &str = "#3b82f6";

/// Mount element attribute that may carry a JSON `BackgroundConfig`.
pub const CONFIG_ATTRIBUTE: &str = "data-background-config";

/// Native builds read a JSON config file from this environment variable.
pub const CONFIG_ENV_VAR: &str = "PARTICLE_BACKGROUND_CONFIG";

/// Fallback viewport for hosts that cannot report one.
pub const FALLBACK_VIEWPORT: (f32, f32) = (1280.0, 720.0);
