//! DOM access for wasm builds.
//!
//! Reads the mount element, computed style and viewport, places the bevy
//! canvas inside the mount element, and owns the `mousemove`/`resize`
//! listeners that feed `HostEventQueue`.

use bevy::prelude::*;
use constants::page::{CANVAS_ELEMENT_ID, CONFIG_ATTRIBUTE, FALLBACK_VIEWPORT};
use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, MouseEvent, Window};

use super::events::{HostEvent, HostEventQueue};
use super::page::HostPage;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("window object not available")]
    MissingWindow,
    #[error("document not available")]
    MissingDocument,
    #[error("mount element #{0} not found")]
    MissingMount(String),
    #[error("DOM call failed: {0}")]
    Dom(String),
}

impl From<JsValue> for HostError {
    fn from(value: JsValue) -> Self {
        HostError::Dom(format!("{value:?}"))
    }
}

/// The live browser page.
pub struct BrowserPage {
    window: Window,
    document: Document,
}

impl BrowserPage {
    pub fn connect() -> Result<Self, HostError> {
        let window = web_sys::window().ok_or(HostError::MissingWindow)?;
        let document = window.document().ok_or(HostError::MissingDocument)?;
        Ok(Self { window, document })
    }

    /// Create the render canvas inside the mount element, reusing an existing one.
    pub fn mount_canvas(&self, mount_id: &str) -> Result<(), HostError> {
        if self.document.get_element_by_id(CANVAS_ELEMENT_ID).is_some() {
            return Ok(());
        }

        let mount = self
            .document
            .get_element_by_id(mount_id)
            .ok_or_else(|| HostError::MissingMount(mount_id.to_string()))?;

        let canvas = self.document.create_element("canvas")?;
        canvas.set_id(CANVAS_ELEMENT_ID);
        canvas.set_attribute("style", "display:block;width:100%;height:100%;")?;
        mount.append_child(&canvas)?;

        info!("Mounted background canvas inside #{}", mount_id);
        Ok(())
    }
}

impl HostPage for BrowserPage {
    fn has_element(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    fn style_property(&self, name: &str) -> Option<String> {
        let body = self.document.body()?;
        let style = self.window.get_computed_style(&body).ok().flatten()?;
        style.get_property_value(name).ok()
    }

    fn viewport(&self) -> Vec2 {
        let width = self.window.inner_width().ok().and_then(|v| v.as_f64());
        let height = self.window.inner_height().ok().and_then(|v| v.as_f64());
        match (width, height) {
            (Some(width), Some(height)) => Vec2::new(width as f32, height as f32),
            _ => Vec2::new(FALLBACK_VIEWPORT.0, FALLBACK_VIEWPORT.1),
        }
    }

    fn pixel_ratio(&self) -> f32 {
        self.window.device_pixel_ratio() as f32
    }

    fn config_source(&self, mount_id: &str) -> Option<String> {
        self.document
            .get_element_by_id(mount_id)?
            .get_attribute(CONFIG_ATTRIBUTE)
    }
}

/// Remove the canvas created by `BrowserPage::mount_canvas`.
pub fn remove_canvas() {
    let canvas = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(CANVAS_ELEMENT_ID));

    if let Some(canvas) = canvas {
        canvas.remove();
    }
}

/// Registered DOM callbacks. Dropping without `detach` leaves them registered.
pub struct DomListeners {
    window: Window,
    document: Document,
    pointer: Closure<dyn FnMut(MouseEvent)>,
    resize: Closure<dyn FnMut(Event)>,
}

impl DomListeners {
    pub fn attach(queue: &HostEventQueue) -> Result<Self, HostError> {
        let window = web_sys::window().ok_or(HostError::MissingWindow)?;
        let document = window.document().ok_or(HostError::MissingDocument)?;

        let pointer_queue = queue.clone();
        let pointer = Closure::wrap(Box::new(move |event: MouseEvent| {
            pointer_queue.push(HostEvent::PointerMoved {
                client: Vec2::new(event.client_x() as f32, event.client_y() as f32),
            });
        }) as Box<dyn FnMut(MouseEvent)>);

        let resize_queue = queue.clone();
        let resize = Closure::wrap(Box::new(move |_event: Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let width = window.inner_width().ok().and_then(|v| v.as_f64());
            let height = window.inner_height().ok().and_then(|v| v.as_f64());
            if let (Some(width), Some(height)) = (width, height) {
                resize_queue.push(HostEvent::Resized {
                    width: width as f32,
                    height: height as f32,
                });
            }
        }) as Box<dyn FnMut(Event)>);

        document
            .add_event_listener_with_callback("mousemove", pointer.as_ref().unchecked_ref())?;
        window.add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())?;

        Ok(Self {
            window,
            document,
            pointer,
            resize,
        })
    }

    pub fn detach(self) {
        if let Err(e) = self.document.remove_event_listener_with_callback(
            "mousemove",
            self.pointer.as_ref().unchecked_ref(),
        ) {
            warn!("Failed to remove mousemove listener: {:?}", e);
        }
        if let Err(e) = self
            .window
            .remove_event_listener_with_callback("resize", self.resize.as_ref().unchecked_ref())
        {
            warn!("Failed to remove resize listener: {:?}", e);
        }
    }
}

/// Startup system registering the DOM listeners against the shared queue.
pub fn attach_dom_listeners(world: &mut World) {
    let queue = world.get_resource_or_insert_with(HostEventQueue::default).clone();

    match DomListeners::attach(&queue) {
        Ok(listeners) => {
            world.insert_non_send_resource(listeners);
            info!("Attached pointer and resize listeners");
        }
        Err(e) => error!("Failed to attach DOM listeners: {e}"),
    }
}

/// Unregister the DOM listeners and drop their closures.
pub fn detach_dom_listeners(world: &mut World) {
    if let Some(listeners) = world.remove_non_send_resource::<DomListeners>() {
        listeners.detach();
        info!("Detached pointer and resize listeners");
    }
    remove_canvas();
}
