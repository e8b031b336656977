use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};

use crate::host::page::PageSnapshot;

/// Primary window for the background. On the web it renders into the canvas
/// placed inside the mount element at the page's device pixel ratio and follows
/// its parent's size. Native windows take the scale factor from the monitor.
pub fn create_window_config(snapshot: &PageSnapshot) -> Window {
    let resolution = WindowResolution::new(snapshot.viewport.x, snapshot.viewport.y);

    #[cfg(target_arch = "wasm32")]
    {
        Window {
            canvas: Some(format!("#{}", constants::page::CANVAS_ELEMENT_ID)),
            fit_canvas_to_parent: true,
            prevent_default_event_handling: false,
            transparent: true,
            present_mode: PresentMode::AutoVsync,
            resolution: resolution.with_scale_factor_override(snapshot.pixel_ratio),
            ..default()
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Window {
            title: "Particle Background".into(),
            transparent: true,
            present_mode: PresentMode::AutoVsync,
            resolution,
            ..default()
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::host::page::StaticPage;

    #[test]
    fn native_window_keeps_monitor_scale_factor() {
        let mut page = StaticPage::default().with_viewport(1600.0, 900.0);
        page.pixel_ratio = 2.0;
        let snapshot = PageSnapshot::capture(&page).unwrap();

        let window = create_window_config(&snapshot);
        assert_eq!(window.resolution.scale_factor_override(), None);
        assert_eq!(window.resolution.width(), 1600.0);
        assert_eq!(window.resolution.height(), 900.0);
        assert!(window.transparent);
    }
}
