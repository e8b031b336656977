use bevy::prelude::*;

use super::lifecycle::{
    AnimationHandle, BackgroundLifecycle, animation_running, disposal_requested,
    dispose_background,
};
use crate::engine::camera::background_camera::{SurfaceSize, spawn_background_camera};
use crate::engine::scene::accent::AccentColor;
use crate::engine::scene::particle_field::{ParticleField, spawn_particle_cloud};
use crate::engine::systems::animation::{animate_particle_cloud, start_background_clock};
use crate::engine::systems::host_input::apply_host_events;
use crate::engine::systems::pointer::PointerState;
use crate::host::events::{HostEvent, HostEventQueue, process_host_events};
use crate::host::page::PageSnapshot;

/// Per-frame ordering: drain input, rotate the cloud, then handle disposal.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum BackgroundSet {
    Input,
    Animate,
    Lifecycle,
}

/// The background animator. Built from a page snapshot; without one (mount
/// element missing) it registers nothing at all.
pub struct BackgroundPlugin {
    snapshot: Option<PageSnapshot>,
    handle: AnimationHandle,
}

impl BackgroundPlugin {
    pub fn new(snapshot: Option<PageSnapshot>) -> Self {
        Self {
            snapshot,
            handle: AnimationHandle::default(),
        }
    }

    /// Handle that cancels this background's render loop.
    pub fn handle(&self) -> AnimationHandle {
        self.handle.clone()
    }

    pub fn is_mounted(&self) -> bool {
        self.snapshot.is_some()
    }
}

impl Plugin for BackgroundPlugin {
    fn build(&self, app: &mut App) {
        let Some(snapshot) = &self.snapshot else {
            debug!("No mount element, particle background not built");
            return;
        };

        let config = snapshot.config.clone();
        let accent = AccentColor::resolve(snapshot.accent.as_deref(), &config.default_accent);
        let field = ParticleField::from_config(&config);
        let surface = SurfaceSize::new(snapshot.viewport, snapshot.pixel_ratio);

        info!(
            "Mounting particle background: {} points, {}x{} @{}x",
            field.len(),
            surface.width,
            surface.height,
            surface.pixel_ratio
        );

        app.insert_resource(config)
            .insert_resource(accent)
            .insert_resource(field)
            .insert_resource(surface)
            .insert_resource(self.handle.clone())
            .init_resource::<PointerState>()
            .init_resource::<BackgroundLifecycle>()
            .init_resource::<HostEventQueue>()
            .add_event::<HostEvent>()
            .configure_sets(
                Update,
                (
                    BackgroundSet::Input,
                    BackgroundSet::Animate,
                    BackgroundSet::Lifecycle,
                )
                    .chain(),
            )
            .add_systems(
                Startup,
                (
                    spawn_background_camera,
                    spawn_particle_cloud,
                    start_background_clock,
                ),
            )
            .add_systems(
                Update,
                (process_host_events, apply_host_events)
                    .chain()
                    .in_set(BackgroundSet::Input)
                    .run_if(animation_running),
            )
            .add_systems(
                Update,
                animate_particle_cloud
                    .in_set(BackgroundSet::Animate)
                    .run_if(animation_running),
            )
            .add_systems(
                Update,
                dispose_background
                    .in_set(BackgroundSet::Lifecycle)
                    .run_if(disposal_requested),
            );
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::engine::camera::background_camera::BackgroundCamera;
    use crate::engine::scene::particle_field::ParticleCloud;
    use crate::host::page::StaticPage;

    fn mounted_app(page: StaticPage) -> (App, AnimationHandle) {
        let plugin = BackgroundPlugin::new(PageSnapshot::capture(&page));
        let handle = plugin.handle();

        let mut app = App::new();
        app.insert_resource(Time::<Real>::default())
            .init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .add_plugins(plugin);
        (app, handle)
    }

    fn count<C: Component>(app: &mut App) -> usize {
        let mut query = app.world_mut().query_filtered::<Entity, With<C>>();
        query.iter(app.world()).count()
    }

    #[test]
    fn missing_mount_builds_nothing() {
        let plugin = BackgroundPlugin::new(PageSnapshot::capture(
            &StaticPage::default().without_mount(),
        ));
        assert!(!plugin.is_mounted());

        let mut app = App::new();
        app.add_plugins(plugin);
        app.update();

        let world = app.world();
        assert!(!world.contains_resource::<ParticleField>());
        assert!(!world.contains_resource::<SurfaceSize>());
        assert!(!world.contains_resource::<HostEventQueue>());
        assert!(!world.contains_resource::<Events<HostEvent>>());
        assert_eq!(count::<BackgroundCamera>(&mut app), 0);
        assert_eq!(count::<ParticleCloud>(&mut app), 0);
    }

    #[test]
    fn mount_builds_scene_camera_and_cloud() {
        let (mut app, _handle) = mounted_app(
            StaticPage::default()
                .with_style("--accent-primary", "#ff0000")
                .with_viewport(1600.0, 900.0),
        );
        app.update();

        assert_eq!(count::<BackgroundCamera>(&mut app), 1);
        assert_eq!(count::<ParticleCloud>(&mut app), 1);
        assert_eq!(app.world().resource::<ParticleField>().len(), 700);
        assert_eq!(app.world().resource::<AccentColor>().hex, "#ff0000");
        assert_eq!(app.world().resource::<Assets<Mesh>>().len(), 1);

        let mut cameras = app
            .world_mut()
            .query_filtered::<(&Projection, &Transform), With<BackgroundCamera>>();
        let (projection, transform) = cameras.single(app.world()).unwrap();
        let Projection::Perspective(perspective) = projection else {
            panic!("expected perspective projection");
        };
        assert!((perspective.aspect_ratio - 16.0 / 9.0).abs() < 1e-6);
        assert_eq!(transform.translation, Vec3::new(0.0, 0.0, 3.0));
    }

    #[test]
    fn point_cloud_is_never_regenerated() {
        let (mut app, _handle) = mounted_app(StaticPage::default());
        app.update();
        let before = app.world().resource::<ParticleField>().positions().to_vec();

        app.world_mut().send_event(HostEvent::Resized {
            width: 640.0,
            height: 480.0,
        });
        app.world_mut()
            .resource_mut::<Time<Real>>()
            .advance_by(Duration::from_millis(500));
        app.update();

        let after = app.world().resource::<ParticleField>().positions();
        assert_eq!(after.len(), 700);
        assert_eq!(before.as_slice(), after);
    }

    #[test]
    fn cancelled_loop_ignores_input_and_disposes() {
        let (mut app, handle) = mounted_app(StaticPage::default());
        app.update();

        handle.cancel();
        app.world_mut().send_event(HostEvent::PointerMoved {
            client: Vec2::ZERO,
        });
        app.update();

        assert_eq!(
            *app.world().resource::<PointerState>(),
            PointerState::default()
        );
        assert_eq!(count::<ParticleCloud>(&mut app), 0);
        assert_eq!(count::<BackgroundCamera>(&mut app), 0);
        assert_eq!(
            *app.world().resource::<BackgroundLifecycle>(),
            BackgroundLifecycle::Disposed
        );
    }
}
