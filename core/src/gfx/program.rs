//! Display-processor programs.
//!
//! A program is an ordered list of instructions the processor interprets
//! while converting the indexed canvas to RGBA, one batch per output pixel
//! position. The list always ends with a `Wait{MAX, MAX}` sentinel: once the
//! interpreter reaches it no further program state can change, which bounds
//! interpretation without a length check in the hot loop — the same trick
//! the Amiga Copper plays with its `WAIT $FFFF,$FFFE` terminator.

use crate::gfx::{Color, Pixel};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ProgramEntry {
    Nop,
    /// Resume interpretation when the scan position reaches `(x, y)`.
    Wait { x: usize, y: usize },
    /// Relative form of `Wait`.
    Skip { dx: i32, dy: i32 },
    /// Extra source pixels to skip at the end of each scanline.
    Modulo { amount: i32 },
    /// Horizontal rotation of the remaining output scanlines.
    Offset { amount: i32 },
    /// Overwrite a palette entry for the remainder of the frame.
    Color { index: Pixel, color: Color },
    /// Overwrite a shifting entry for the remainder of the frame.
    Shift { from: Pixel, to: Pixel },
}

/// The end-of-data marker: wait for a scan position no frame ever reaches.
pub(crate) const SENTINEL: ProgramEntry = ProgramEntry::Wait {
    x: usize::MAX,
    y: usize::MAX,
};

#[derive(Clone)]
pub struct Program {
    entries: Vec<ProgramEntry>,
}

impl Default for Program {
    fn default() -> Self {
        Self::new()
    }
}

impl Program {
    /// An empty program: just the sentinel.
    pub fn new() -> Self {
        Self {
            entries: vec![SENTINEL],
        }
    }

    /// Every entry, sentinel included.
    pub fn entries(&self) -> &[ProgramEntry] {
        &self.entries
    }

    /// Number of entries before the sentinel.
    pub fn len(&self) -> usize {
        self.entries.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry and restore the pristine sentinel-only state.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.entries.push(SENTINEL);
    }

    /// Replace this program's entries with a copy of `other`'s.
    pub fn copy_from(&mut self, other: &Program) {
        self.entries.clear();
        self.entries.extend_from_slice(&other.entries);
    }

    /// Remove `length` entries starting at `position`; the sentinel is
    /// never removed.
    pub fn erase(&mut self, position: usize, length: usize) {
        let end = (position + length).min(self.len());
        if position >= end {
            return;
        }
        self.entries.drain(position..end);
    }

    /// Insert `entry` at `position`. Negative positions index from the end
    /// (`-1` is the sentinel slot, i.e. append). Inserting inside the
    /// program overwrites; inserting past the last real entry pads the gap
    /// with `Nop`s and keeps the sentinel last.
    fn insert(&mut self, position: i32, entry: ProgramEntry) {
        let length = self.entries.len();
        let index = if position >= 0 {
            position as usize
        } else {
            length.saturating_add_signed(position as isize)
        };

        let count = length - 1; // Real entries, sentinel excluded.
        if index < count {
            self.entries[index] = entry;
        } else {
            for i in count..index {
                self.entries.insert(i, ProgramEntry::Nop);
            }
            self.entries.insert(index, entry);
        }
    }

    pub fn nop(&mut self, position: i32) {
        self.insert(position, ProgramEntry::Nop);
    }

    pub fn wait(&mut self, position: i32, x: usize, y: usize) {
        self.insert(position, ProgramEntry::Wait { x, y });
    }

    pub fn skip(&mut self, position: i32, dx: i32, dy: i32) {
        self.insert(position, ProgramEntry::Skip { dx, dy });
    }

    pub fn modulo(&mut self, position: i32, amount: i32) {
        self.insert(position, ProgramEntry::Modulo { amount });
    }

    pub fn offset(&mut self, position: i32, amount: i32) {
        self.insert(position, ProgramEntry::Offset { amount });
    }

    pub fn color(&mut self, position: i32, index: Pixel, color: Color) {
        self.insert(position, ProgramEntry::Color { index, color });
    }

    pub fn shift(&mut self, position: i32, from: Pixel, to: Pixel) {
        self.insert(position, ProgramEntry::Shift { from, to });
    }
}
