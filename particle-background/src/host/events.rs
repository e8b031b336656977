use std::sync::{Arc, Mutex};

use bevy::prelude::*;

/// Input from the hosting page, in arrival order.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// Pointer position in viewport (client) pixels.
    PointerMoved { client: Vec2 },
    /// New viewport size in CSS pixels.
    Resized { width: f32, height: f32 },
}

/// Queue shared with DOM callbacks. Listeners push, the frame drains.
#[derive(Resource, Clone, Default)]
pub struct HostEventQueue(Arc<Mutex<Vec<HostEvent>>>);

impl HostEventQueue {
    pub fn push(&self, event: HostEvent) {
        if let Ok(mut queue) = self.0.lock() {
            queue.push(event);
        }
    }

    pub fn drain(&self) -> Vec<HostEvent> {
        if let Ok(mut queue) = self.0.lock() {
            std::mem::take(&mut *queue)
        } else {
            Vec::new()
        }
    }
}

/// Move queued DOM input into bevy events.
pub fn process_host_events(
    queue: Option<Res<HostEventQueue>>,
    mut host_events: EventWriter<HostEvent>,
) {
    let Some(queue) = queue else {
        return;
    };

    for event in queue.drain() {
        host_events.write(event);
    }
}

/// Native stand-in for the DOM listeners: the window's cursor and resize events.
#[cfg(not(target_arch = "wasm32"))]
pub fn forward_window_events(
    mut cursor_moved: EventReader<CursorMoved>,
    mut window_resized: EventReader<bevy::window::WindowResized>,
    queue: Res<HostEventQueue>,
) {
    for event in window_resized.read() {
        queue.push(HostEvent::Resized {
            width: event.width,
            height: event.height,
        });
    }

    for event in cursor_moved.read() {
        queue.push(HostEvent::PointerMoved {
            client: event.position,
        });
    }
}
