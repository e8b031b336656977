//! JSON-RPC 2.0 bridge between the hosting page and the background.
//!
//! Messages travel over `window.postMessage`. The page can query the running
//! background and dispose it; the background notifies the page once disposal
//! has happened.
//!
//! ## Methods
//!
//! - `get_background_state`: `{ running, particle_count, pointer: { x, y }, elapsed, surface: { width, height } }`
//! - `dispose_background`: cancels the animation handle, answers `{ success: true }`
//!
//! ## Notifications
//!
//! - `background_disposed`: sent after the scene and listeners are torn down
//!
//! ```typescript
//! window.postMessage(JSON.stringify({
//!   jsonrpc: "2.0",
//!   method: "dispose_background",
//!   id: 1
//! }), "*");
//! ```
//!
//! Standard error codes apply: `-32601` method not found, `-32602` invalid
//! params, `-32603` internal error.

/// Request handling, outgoing message queue and the wasm message listener.
pub mod web_rpc;
