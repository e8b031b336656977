use bevy::log::LogPlugin;
use bevy::prelude::*;

use crate::engine::core::background_plugin::BackgroundPlugin;
use crate::engine::core::window_config::create_window_config;
use crate::host::page::PageSnapshot;
use crate::host::plugin::HostInputPlugin;
use crate::rpc::web_rpc::WebRpcPlugin;

const LOG_FILTER: &str = "wgpu=error,naga=warn,particle_background=debug";

pub fn create_app(snapshot: PageSnapshot) -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins(&snapshot))
        .insert_resource(ClearColor(Color::NONE))
        .add_plugins(BackgroundPlugin::new(Some(snapshot)))
        .add_plugins(HostInputPlugin)
        .add_plugins(WebRpcPlugin);

    app
}

fn create_default_plugins(snapshot: &PageSnapshot) -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config(snapshot)),
        ..default()
    };

    let log_config = LogPlugin {
        filter: LOG_FILTER.to_string(),
        ..default()
    };

    DefaultPlugins.set(window_config).set(log_config)
}
