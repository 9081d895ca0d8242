//! Rendering contract
//!
//! The host owns the actual drawing surface. The simulation hands it sprite
//! draws in world coordinates, and the canvas subtracts the current draw
//! offset (the viewport's top-left corner).

use glam::Vec2;

use crate::assets::Sprite;

/// Drawing surface consumed by the simulation
pub trait Canvas {
    /// Clear the surface before a new frame
    fn clear(&mut self);
    /// World position mapped to the surface origin
    fn set_draw_offset(&mut self, offset: Vec2);
    /// Draw a sprite with its top-left corner at `top_left` (world space)
    fn draw_sprite(&mut self, sprite: Sprite, top_left: Vec2, size: Vec2);
}

/// A recorded draw call, already offset into screen space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub sprite: Sprite,
    pub screen_pos: Vec2,
    pub size: Vec2,
}

/// Canvas that remembers the draws of the current frame
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    offset: Vec2,
    calls: Vec<DrawCall>,
    frames: u64,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw calls since the last clear
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Number of frames started (clears)
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Whether a sprite was drawn this frame
    pub fn drew(&self, sprite: Sprite) -> bool {
        self.calls.iter().any(|call| call.sprite == sprite)
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self) {
        self.calls.clear();
        self.frames += 1;
    }

    fn set_draw_offset(&mut self, offset: Vec2) {
        self.offset = offset;
    }

    fn draw_sprite(&mut self, sprite: Sprite, top_left: Vec2, size: Vec2) {
        self.calls.push(DrawCall {
            sprite,
            screen_pos: top_left - self.offset,
            size,
        });
    }
}
