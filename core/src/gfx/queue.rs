//! Queued sprite batches.
//!
//! A queue records sprite draws against one sheet and flushes them in
//! insertion order; z-order IS insertion order, there is no depth sort.

use std::rc::Rc;

use crate::gfx::{Context, Point, Sheet};

/// One recorded sprite draw.
#[derive(Clone, Copy, Debug)]
pub struct QueueSprite {
    pub cell_id: usize,
    pub position: Point,
    pub scale_x: f32,
    pub scale_y: f32,
    pub rotation: i32,
    pub anchor_x: f32,
    pub anchor_y: f32,
}

impl QueueSprite {
    /// A plain draw of `cell_id` at `position`: unit scale, no rotation,
    /// top-left anchor.
    pub fn new(cell_id: usize, position: Point) -> Self {
        Self {
            cell_id,
            position,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0,
            anchor_x: 0.0,
            anchor_y: 0.0,
        }
    }
}

pub struct SpriteQueue {
    sheet: Rc<Sheet>,
    sprites: Vec<QueueSprite>,
}

impl SpriteQueue {
    pub fn new(sheet: Rc<Sheet>, capacity: usize) -> Self {
        Self {
            sheet,
            sprites: Vec::with_capacity(capacity),
        }
    }

    pub fn sheet(&self) -> &Sheet {
        &self.sheet
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Append a sprite record.
    pub fn add(&mut self, sprite: QueueSprite) {
        self.sprites.push(sprite);
    }

    /// Drop every recorded sprite; capacity is retained.
    pub fn clear(&mut self) {
        self.sprites.clear();
    }

    /// Ensure room for at least `capacity` sprites in total.
    pub fn resize(&mut self, capacity: usize) {
        if capacity > self.sprites.capacity() {
            self.sprites.reserve(capacity - self.sprites.len());
        }
    }

    /// Add room for `amount` more sprites.
    pub fn grow(&mut self, amount: usize) {
        self.sprites.reserve(amount);
    }

    /// Flush with plain blits; scale/rotation/anchor fields are ignored.
    pub fn blit(&self, context: &mut Context) {
        for sprite in &self.sprites {
            self.sheet.blit(context, sprite.position, sprite.cell_id);
        }
    }

    /// Flush with scaled blits; rotation/anchor fields are ignored.
    pub fn blit_scaled(&self, context: &mut Context) {
        for sprite in &self.sprites {
            self.sheet.blit_scaled(
                context,
                sprite.position,
                sprite.cell_id,
                sprite.scale_x,
                sprite.scale_y,
            );
        }
    }

    /// Flush with rotated/scaled blits.
    pub fn blit_rotated(&self, context: &mut Context) {
        for sprite in &self.sprites {
            self.sheet.blit_rotated(
                context,
                sprite.position,
                sprite.cell_id,
                sprite.scale_x,
                sprite.scale_y,
                sprite.rotation,
                sprite.anchor_x,
                sprite.anchor_y,
            );
        }
    }
}
