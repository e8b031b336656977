use std::time::Duration;

use bevy::prelude::*;

use super::pointer::PointerState;
use crate::config::BackgroundConfig;
use crate::engine::scene::particle_field::ParticleCloud;

/// Wall-clock time since the background was mounted. Reads `Time<Real>` so
/// stalled frames (a hidden tab) do not hold the drift back.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct BackgroundClock {
    origin: Duration,
}

impl BackgroundClock {
    pub fn start(time: &Time<Real>) -> Self {
        Self {
            origin: time.elapsed(),
        }
    }

    pub fn elapsed_secs(&self, time: &Time<Real>) -> f32 {
        time.elapsed().saturating_sub(self.origin).as_secs_f32()
    }
}

/// Cloud rotation for one frame: X from pointer tilt, Y from drift plus pointer tilt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloudOrientation {
    pub pitch: f32,
    pub yaw: f32,
}

impl CloudOrientation {
    pub fn at(elapsed: f32, pointer: PointerState, drift_speed: f32, parallax: f32) -> Self {
        let mut yaw = elapsed * drift_speed;
        let pitch = pointer.y * parallax;
        yaw += pointer.x * parallax;
        Self { pitch, yaw }
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.pitch, self.yaw, 0.0)
    }
}

pub fn start_background_clock(mut commands: Commands, time: Res<Time<Real>>) {
    commands.insert_resource(BackgroundClock::start(&time));
}

/// Per-frame rotation of the cloud. Positions are never touched, only the transform.
pub fn animate_particle_cloud(
    time: Res<Time<Real>>,
    clock: Res<BackgroundClock>,
    pointer: Res<PointerState>,
    config: Res<BackgroundConfig>,
    mut clouds: Query<&mut Transform, With<ParticleCloud>>,
) {
    let orientation = CloudOrientation::at(
        clock.elapsed_secs(&time),
        *pointer,
        config.drift_speed,
        config.parallax_strength,
    );

    for mut transform in &mut clouds {
        transform.rotation = orientation.rotation();
    }
}

#[cfg(test)]
mod tests {
    use bevy::time::{TimePlugin, TimeUpdateStrategy};

    use super::*;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn rotation_law_over_consecutive_frames() {
        let pointer = PointerState { x: 0.2, y: -0.4 };

        let first = CloudOrientation::at(10.0, pointer, 0.05, 0.5);
        let second = CloudOrientation::at(12.0, pointer, 0.05, 0.5);

        assert!((first.pitch - (-0.2)).abs() < EPSILON);
        assert!((first.yaw - (0.5 + 0.1)).abs() < EPSILON);
        // Pitch is overwritten from the pointer each frame, only yaw drifts.
        assert_eq!(first.pitch, second.pitch);
        assert!((second.yaw - first.yaw - 0.1).abs() < EPSILON);
    }

    #[test]
    fn centred_pointer_only_drifts() {
        let orientation = CloudOrientation::at(4.0, PointerState::default(), 0.05, 0.5);
        assert_eq!(orientation.pitch, 0.0);
        assert!((orientation.yaw - 0.2).abs() < EPSILON);
        let expected = Quat::from_rotation_y(0.2);
        assert!(orientation.rotation().angle_between(expected) < 1e-5);
    }

    #[test]
    fn system_rotates_cloud_from_mount_time() {
        let mut app = App::new();
        let mut time = Time::<Real>::default();
        time.advance_by(Duration::from_secs(5));
        app.insert_resource(time)
            .insert_resource(PointerState { x: 0.5, y: 0.25 })
            .insert_resource(BackgroundConfig::default())
            .add_systems(Startup, start_background_clock)
            .add_systems(Update, animate_particle_cloud);

        let cloud = app
            .world_mut()
            .spawn((Transform::IDENTITY, ParticleCloud))
            .id();
        app.update();

        let read_orientation = |app: &App| {
            let rotation = app.world().get::<Transform>(cloud).unwrap().rotation;
            let (pitch, yaw, _) = rotation.to_euler(EulerRot::XYZ);
            (pitch, yaw)
        };

        // Clock starts at mount, so only the pointer contributes on the first frame.
        let (pitch, yaw) = read_orientation(&app);
        assert!((pitch - 0.125).abs() < 1e-5);
        assert!((yaw - 0.25).abs() < 1e-5);

        app.world_mut()
            .resource_mut::<Time<Real>>()
            .advance_by(Duration::from_secs(2));
        app.update();

        let (pitch, yaw) = read_orientation(&app);
        assert!((pitch - 0.125).abs() < 1e-5);
        assert!((yaw - (0.1 + 0.25)).abs() < 1e-5);
    }

    #[test]
    fn drift_follows_wall_clock_through_stalled_frames() {
        let mut app = App::new();
        app.add_plugins(TimePlugin)
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs(10)))
            .init_resource::<PointerState>()
            .insert_resource(BackgroundConfig::default())
            .add_systems(Startup, start_background_clock)
            .add_systems(Update, animate_particle_cloud);

        let cloud = app
            .world_mut()
            .spawn((Transform::IDENTITY, ParticleCloud))
            .id();
        for _ in 0..3 {
            app.update();
        }

        // Virtual time clamps each 10 s step; the background must not.
        assert!(app.world().resource::<Time<Virtual>>().elapsed_secs() < 1.0);

        let elapsed = app
            .world()
            .resource::<BackgroundClock>()
            .elapsed_secs(app.world().resource::<Time<Real>>());
        assert!((elapsed - 20.0).abs() < 1e-4);

        let rotation = app.world().get::<Transform>(cloud).unwrap().rotation;
        let (_, yaw, _) = rotation.to_euler(EulerRot::XYZ);
        assert!((yaw - 20.0 * 0.05).abs() < 1e-4);
    }
}
