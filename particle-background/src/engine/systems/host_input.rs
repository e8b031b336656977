use bevy::prelude::*;

use super::pointer::PointerState;
use crate::engine::camera::background_camera::{
    BackgroundCamera, SurfaceSize, sync_projection_aspect,
};
use crate::host::events::HostEvent;

/// Apply pointer and resize input in arrival order, so a pointer move is
/// normalised against the viewport it happened in.
pub fn apply_host_events(
    mut events: EventReader<HostEvent>,
    mut pointer: ResMut<PointerState>,
    mut surface: ResMut<SurfaceSize>,
    mut cameras: Query<&mut Projection, With<BackgroundCamera>>,
) {
    for event in events.read() {
        match *event {
            HostEvent::PointerMoved { client } => {
                if !pointer.track(client, surface.logical()) {
                    debug!("Dropped pointer move on an empty viewport");
                }
            }
            HostEvent::Resized { width, height } => {
                if !surface.resize(width, height) {
                    debug!("Ignored resize to {width}x{height}");
                    continue;
                }
                for mut projection in &mut cameras {
                    sync_projection_aspect(&mut projection, &surface);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input_app(viewport: Vec2) -> App {
        let mut app = App::new();
        app.add_event::<HostEvent>()
            .init_resource::<PointerState>()
            .insert_resource(SurfaceSize::new(viewport, 1.0))
            .add_systems(Update, apply_host_events);
        app
    }

    fn camera_aspect(app: &mut App) -> f32 {
        let mut cameras = app
            .world_mut()
            .query_filtered::<&Projection, With<BackgroundCamera>>();
        let projection = cameras.single(app.world()).unwrap();
        match projection {
            Projection::Perspective(perspective) => perspective.aspect_ratio,
            _ => panic!("expected perspective projection"),
        }
    }

    #[test]
    fn resize_updates_camera_aspect_and_surface() {
        let mut app = input_app(Vec2::new(1280.0, 720.0));
        app.world_mut().spawn((
            Projection::Perspective(PerspectiveProjection {
                aspect_ratio: 1280.0 / 720.0,
                ..default()
            }),
            BackgroundCamera,
        ));

        app.world_mut().send_event(HostEvent::Resized {
            width: 1000.0,
            height: 500.0,
        });
        app.update();

        assert_eq!(camera_aspect(&mut app), 2.0);
        let surface = app.world().resource::<SurfaceSize>();
        assert_eq!((surface.width, surface.height), (1000.0, 500.0));
    }

    #[test]
    fn pointer_move_uses_current_viewport() {
        let mut app = input_app(Vec2::new(800.0, 600.0));

        app.world_mut().send_event(HostEvent::PointerMoved {
            client: Vec2::new(600.0, 150.0),
        });
        app.update();
        assert_eq!(
            *app.world().resource::<PointerState>(),
            PointerState { x: 0.25, y: -0.25 }
        );
    }

    #[test]
    fn events_apply_in_arrival_order() {
        let mut app = input_app(Vec2::new(800.0, 600.0));

        app.world_mut().send_event(HostEvent::Resized {
            width: 400.0,
            height: 300.0,
        });
        app.world_mut().send_event(HostEvent::PointerMoved {
            client: Vec2::new(400.0, 300.0),
        });
        app.update();

        assert_eq!(
            *app.world().resource::<PointerState>(),
            PointerState { x: 0.5, y: 0.5 }
        );
    }

    #[test]
    fn zero_sized_resize_is_ignored() {
        let mut app = input_app(Vec2::new(800.0, 600.0));
        app.world_mut().send_event(HostEvent::Resized {
            width: 0.0,
            height: 0.0,
        });
        app.update();

        let surface = app.world().resource::<SurfaceSize>();
        assert_eq!(surface.logical(), Vec2::new(800.0, 600.0));
    }
}
