use bevy::prelude::*;

/// Feeds page input into `HostEventQueue`: DOM listeners on the web, window
/// events on native builds.
pub struct HostInputPlugin;

impl Plugin for HostInputPlugin {
    fn build(&self, app: &mut App) {
        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, super::browser::attach_dom_listeners);

        #[cfg(not(target_arch = "wasm32"))]
        {
            use crate::engine::core::background_plugin::BackgroundSet;
            use crate::engine::core::lifecycle::animation_running;

            app.add_systems(
                Update,
                super::events::forward_window_events
                    .before(super::events::process_host_events)
                    .in_set(BackgroundSet::Input)
                    .run_if(animation_running),
            );
        }
    }
}
