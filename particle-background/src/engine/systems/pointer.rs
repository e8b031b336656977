use bevy::prelude::*;

use crate::engine::camera::background_camera::is_drawable;

/// Pointer offset from the viewport centre, normalised so the viewport spans [-0.5, 0.5].
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
}

impl PointerState {
    /// Normalise a client position against the viewport, or `None` for a degenerate viewport.
    pub fn from_client(client: Vec2, viewport: Vec2) -> Option<Self> {
        if !is_drawable(viewport.x, viewport.y) {
            return None;
        }
        Some(Self {
            x: client.x / viewport.x - 0.5,
            y: client.y / viewport.y - 0.5,
        })
    }

    /// Apply a pointer move. Returns false if the move was dropped.
    pub fn track(&mut self, client: Vec2, viewport: Vec2) -> bool {
        match Self::from_client(client, viewport) {
            Some(state) => {
                *self = state;
                true
            }
            None => false,
        }
    }
}
