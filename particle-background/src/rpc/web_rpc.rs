use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::camera::background_camera::SurfaceSize;
use crate::engine::core::background_plugin::BackgroundSet;
use crate::engine::core::lifecycle::{AnimationHandle, BackgroundLifecycle};
use crate::engine::scene::particle_field::ParticleField;
use crate::engine::systems::animation::BackgroundClock;
use crate::engine::systems::pointer::PointerState;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Outgoing RPC traffic to the hosting page, flushed once per frame.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the page without expecting a response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }

    #[cfg(test)]
    pub fn pending_notifications(&self) -> Vec<String> {
        self.outgoing_notifications
            .iter()
            .map(|notification| notification.method.clone())
            .collect()
    }
}

/// Snapshot of the running background reported by `get_background_state`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BackgroundStatus {
    pub running: bool,
    pub particle_count: usize,
    pub pointer: PointerStatus,
    pub elapsed: f32,
    pub surface: SurfaceStatus,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct PointerStatus {
    pub x: f32,
    pub y: f32,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct SurfaceStatus {
    pub width: f32,
    pub height: f32,
}

/// Plugin bridging page `postMessage` traffic to the background.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    send_outgoing_messages,
                )
                    .chain()
                    .after(BackgroundSet::Lifecycle),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

/// Page message listener kept so disposal can unregister it.
#[cfg(target_arch = "wasm32")]
struct MessageListener(Closure<dyn FnMut(MessageEvent)>);

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(world: &mut World) {
    use std::sync::Arc;
    use std::sync::Mutex;

    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    let Some(window) = window() else {
        error!("Window object not available, RPC bridge disabled");
        return;
    };

    if let Err(e) =
        window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
    {
        error!("Failed to register message listener: {:?}", e);
        return;
    }

    world.insert_non_send_resource(MessageListener(closure));
    world.insert_resource(MessageQueue(message_queue));
}

/// Unregister the page message listener.
#[cfg(target_arch = "wasm32")]
pub fn detach_message_listener(world: &mut World) {
    let Some(MessageListener(closure)) = world.remove_non_send_resource::<MessageListener>() else {
        return;
    };

    if let Some(window) = window() {
        if let Err(e) =
            window.remove_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
        {
            warn!("Failed to remove message listener: {:?}", e);
        }
    }
}

/// Resource wrapping the queue shared with the message listener.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Incoming RPC message from the page.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    status: BackgroundStatusParams,
) {
    for event in events.read() {
        // Our own outgoing traffic comes back through the same window; anything
        // that is not a request is skipped.
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                debug!("Processing RPC method: {}", request.method);
                let current = status.snapshot();
                if let Some(response) =
                    handle_rpc_request(&request, &current, status.handle.as_deref())
                {
                    rpc_interface.queue_response(response);
                }
            }
            Err(parse_error) => {
                debug!("Skipping non-request message: {}", parse_error);
            }
        }
    }
}

/// Resources read to answer `get_background_state`.
#[derive(bevy::ecs::system::SystemParam)]
struct BackgroundStatusParams<'w> {
    time: Res<'w, Time<Real>>,
    handle: Option<Res<'w, AnimationHandle>>,
    lifecycle: Option<Res<'w, BackgroundLifecycle>>,
    field: Option<Res<'w, ParticleField>>,
    pointer: Option<Res<'w, PointerState>>,
    clock: Option<Res<'w, BackgroundClock>>,
    surface: Option<Res<'w, SurfaceSize>>,
}

impl BackgroundStatusParams<'_> {
    fn snapshot(&self) -> BackgroundStatus {
        let pointer = self.pointer.as_deref().copied().unwrap_or_default();
        let surface = self.surface.as_deref();
        let mounted = self
            .lifecycle
            .as_deref()
            .is_some_and(|state| *state == BackgroundLifecycle::Mounted);
        let cancelled = self
            .handle
            .as_deref()
            .is_none_or(|handle| handle.is_cancelled());

        BackgroundStatus {
            running: mounted && !cancelled,
            particle_count: self.field.as_deref().map_or(0, ParticleField::len),
            pointer: PointerStatus {
                x: pointer.x,
                y: pointer.y,
            },
            elapsed: self
                .clock
                .as_deref()
                .map_or(0.0, |clock| clock.elapsed_secs(&self.time)),
            surface: SurfaceStatus {
                width: surface.map_or(0.0, |surface| surface.width),
                height: surface.map_or(0.0, |surface| surface.height),
            },
        }
    }
}

const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;
const INTERNAL_ERROR: i32 = -32603;

/// Handle a single request. Requests without an id are notifications and get no response.
fn handle_rpc_request(
    request: &RpcRequest,
    status: &BackgroundStatus,
    handle: Option<&AnimationHandle>,
) -> Option<RpcResponse> {
    let id = request.id.clone()?;

    let result = match request.method.as_str() {
        "get_background_state" => handle_get_background_state(status),
        "dispose_background" => handle_dispose_background(handle),
        method => {
            warn!("Unknown RPC method: {}", method);
            Err(RpcError {
                code: METHOD_NOT_FOUND,
                message: "Method not found".to_string(),
                data: Some(serde_json::json!({ "method": method })),
            })
        }
    };

    Some(RpcResponse::new(id, result))
}

fn handle_get_background_state(
    status: &BackgroundStatus,
) -> Result<serde_json::Value, RpcError> {
    serde_json::to_value(status).map_err(|e| {
        let message = format!("Failed to encode state: {e}");
        RpcError::internal_error(&message)
    })
}

fn handle_dispose_background(
    handle: Option<&AnimationHandle>,
) -> Result<serde_json::Value, RpcError> {
    let handle = handle.ok_or_else(|| RpcError::invalid_params("Background is not mounted"))?;
    if handle.is_cancelled() {
        debug!("Background already cancelled");
    } else {
        handle.cancel();
        info!("Background disposal requested over RPC");
    }

    Ok(serde_json::json!({ "success": true }))
}

impl RpcResponse {
    fn new(id: serde_json::Value, result: Result<serde_json::Value, RpcError>) -> Self {
        let (result, error) = match result {
            Ok(value) => (Some(value), None),
            Err(error) => (None, Some(error)),
        };
        Self {
            jsonrpc: "2.0".to_string(),
            result,
            error,
            id: Some(id),
        }
    }
}

/// Send queued notifications and responses to the page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Post a serialized message to the parent window (the page itself when not framed).
#[cfg(target_arch = "wasm32")]
fn send_message_to_parent<T: Serialize>(message: &T) {
    let json = match serde_json::to_string(message) {
        Ok(json) => json,
        Err(e) => {
            error!("Failed to serialize message: {}", e);
            return;
        }
    };

    let Some(parent) = window().and_then(|window| window.parent().ok().flatten()) else {
        warn!("No parent window available for message transmission");
        return;
    };

    if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
        error!("Failed to send message to parent: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn send_message_to_parent<T: Serialize>(message: &T) {
    if let Ok(json) = serde_json::to_string(message) {
        trace!("RPC message (no page attached): {}", json);
    }
}

impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: INVALID_PARAMS,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self {
            code: INTERNAL_ERROR,
            message: message.to_string(),
            data: None,
        }
    }
}
