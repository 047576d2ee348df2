//! Fixed-capacity circular sample store.

/// Circular buffer of `f32` samples.
///
/// Every logical index is reduced modulo the capacity, so callers never do
/// their own bounds arithmetic. Capacity is fixed at construction and the
/// contents start zeroed.
#[derive(Debug, Clone, PartialEq)]
pub struct RingBuffer {
    data: Vec<f32>,
}

impl RingBuffer {
    /// Allocate a zeroed ring. A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        Self {
            data: vec![0.0; capacity.max(1)],
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Physical slot for a logical index.
    #[inline]
    pub fn index(&self, logical: usize) -> usize {
        logical % self.data.len()
    }

    /// Physical slot for a signed logical index (negative wraps from the end).
    #[inline]
    pub fn index_signed(&self, logical: isize) -> usize {
        logical.rem_euclid(self.data.len() as isize) as usize
    }

    #[inline]
    pub fn read(&self, index: usize) -> f32 {
        self.data[self.index(index)]
    }

    #[inline]
    pub fn read_signed(&self, index: isize) -> f32 {
        self.data[self.index_signed(index)]
    }

    #[inline]
    pub fn write(&mut self, index: usize, value: f32) {
        let slot = self.index(index);
        self.data[slot] = value;
    }

    /// Accumulate into a slot (overlap-add).
    #[inline]
    pub fn add(&mut self, index: usize, value: f32) {
        let slot = self.index(index);
        self.data[slot] += value;
    }

    /// Read a slot and zero it for reuse.
    #[inline]
    pub fn take(&mut self, index: usize) -> f32 {
        let slot = self.index(index);
        core::mem::take(&mut self.data[slot])
    }

    pub fn clear(&mut self) {
        self.data.fill(0.0);
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}
