//! Fixed-capacity sample ring buffer.
//!
//! Every access happens under the mixer lock, so this is a plain
//! single-owner ring: the game thread pushes decoded samples in, the audio
//! thread pops them out through the converter.

pub struct RingBuffer {
    data: Vec<f32>,
    read: usize,
    len: usize,
}

impl RingBuffer {
    /// A ring holding up to `capacity` samples.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: vec![0.0; capacity.max(1)],
            read: 0,
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Samples currently buffered.
    pub fn available_read(&self) -> usize {
        self.len
    }

    /// Samples that can be pushed before the ring is full.
    pub fn available_write(&self) -> usize {
        self.data.len() - self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drop all buffered samples.
    pub fn reset(&mut self) {
        self.read = 0;
        self.len = 0;
    }

    /// Append as many samples as fit; returns how many were taken.
    pub fn push(&mut self, samples: &[f32]) -> usize {
        let capacity = self.data.len();
        let count = samples.len().min(self.available_write());

        let write = (self.read + self.len) % capacity;
        let first = count.min(capacity - write);
        self.data[write..write + first].copy_from_slice(&samples[..first]);
        self.data[..count - first].copy_from_slice(&samples[first..count]);

        self.len += count;
        count
    }

    /// Remove up to `out.len()` samples; returns how many were written.
    pub fn pop(&mut self, out: &mut [f32]) -> usize {
        let capacity = self.data.len();
        let count = out.len().min(self.len);

        let first = count.min(capacity - self.read);
        out[..first].copy_from_slice(&self.data[self.read..self.read + first]);
        out[first..count].copy_from_slice(&self.data[..count - first]);

        self.read = (self.read + count) % capacity;
        self.len -= count;
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_around() {
        let mut ring = RingBuffer::with_capacity(4);
        assert_eq!(ring.push(&[1.0, 2.0, 3.0]), 3);

        let mut out = [0.0; 2];
        assert_eq!(ring.pop(&mut out), 2);
        assert_eq!(out, [1.0, 2.0]);

        // Write wraps past the end of the storage.
        assert_eq!(ring.push(&[4.0, 5.0, 6.0]), 3);
        assert_eq!(ring.available_read(), 4);

        let mut out = [0.0; 4];
        assert_eq!(ring.pop(&mut out), 4);
        assert_eq!(out, [3.0, 4.0, 5.0, 6.0]);
        assert!(ring.is_empty());
    }

    #[test]
    fn test_push_respects_capacity() {
        let mut ring = RingBuffer::with_capacity(3);
        assert_eq!(ring.push(&[1.0, 2.0, 3.0, 4.0]), 3);
        assert_eq!(ring.available_write(), 0);
        assert_eq!(ring.push(&[9.0]), 0);
    }
}
