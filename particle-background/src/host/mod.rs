//! Boundary between the background and the page hosting it.
//!
//! The page is read once at startup through [`page::HostPage`]; afterwards
//! the only channel in is the ordered [`events::HostEvent`] stream.

/// Browser page access, canvas mounting and DOM listener ownership.
#[cfg(target_arch = "wasm32")]
pub mod browser;

/// Host input events and the queue DOM callbacks push into.
pub mod events;

/// Page probing and the startup snapshot.
pub mod page;

/// Plugin wiring the platform's input source into the event queue.
pub mod plugin;
