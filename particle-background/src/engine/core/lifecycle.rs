use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use bevy::prelude::*;

use crate::engine::camera::background_camera::BackgroundCamera;
use crate::engine::scene::particle_field::ParticleCloud;
use crate::rpc::web_rpc::WebRpcInterface;

/// Cancellation handle for the render loop. Clones share one flag.
#[derive(Resource, Debug, Clone, Default)]
pub struct AnimationHandle(Arc<AtomicBool>);

impl AnimationHandle {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BackgroundLifecycle {
    #[default]
    Mounted,
    Disposed,
}

/// Run condition for the per-frame systems.
pub fn animation_running(
    handle: Option<Res<AnimationHandle>>,
    lifecycle: Option<Res<BackgroundLifecycle>>,
) -> bool {
    let mounted = lifecycle.is_some_and(|state| *state == BackgroundLifecycle::Mounted);
    mounted && handle.is_some_and(|handle| !handle.is_cancelled())
}

/// Run condition: cancelled but not yet torn down.
pub fn disposal_requested(
    handle: Option<Res<AnimationHandle>>,
    lifecycle: Option<Res<BackgroundLifecycle>>,
) -> bool {
    let mounted = lifecycle.is_some_and(|state| *state == BackgroundLifecycle::Mounted);
    mounted && handle.is_some_and(|handle| handle.is_cancelled())
}

/// Tear down the scene once the handle is cancelled: despawn the cloud and
/// camera, release the DOM listeners and stop the app.
pub fn dispose_background(
    mut commands: Commands,
    mut lifecycle: ResMut<BackgroundLifecycle>,
    scene: Query<Entity, Or<(With<ParticleCloud>, With<BackgroundCamera>)>>,
    mut rpc_interface: Option<ResMut<WebRpcInterface>>,
    mut app_exit: EventWriter<AppExit>,
) {
    let mut despawned = 0;
    for entity in &scene {
        commands.entity(entity).despawn();
        despawned += 1;
    }

    #[cfg(target_arch = "wasm32")]
    {
        commands.queue(crate::host::browser::detach_dom_listeners);
        commands.queue(crate::rpc::web_rpc::detach_message_listener);
    }

    *lifecycle = BackgroundLifecycle::Disposed;
    info!("Background disposed ({despawned} entities removed)");

    if let Some(rpc_interface) = rpc_interface.as_mut() {
        rpc_interface.send_notification("background_disposed", serde_json::json!({}));
    }

    app_exit.write(AppExit::Success);
}
