//! Borrowed stereo channel views handed over by the host for one block.

use core::ops::Range;

/// Read-only left/right channel pair.
#[derive(Debug, Clone, Copy)]
pub struct StereoBuffer<'a> {
    pub left: &'a [f32],
    pub right: &'a [f32],
}

impl<'a> StereoBuffer<'a> {
    pub fn new(left: &'a [f32], right: &'a [f32]) -> Self {
        Self { left, right }
    }

    /// Same slice on both channels.
    pub fn mono(samples: &'a [f32]) -> Self {
        Self {
            left: samples,
            right: samples,
        }
    }

    /// Frames addressable on both channels.
    #[inline]
    pub fn len(&self) -> usize {
        self.left.len().min(self.right.len())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Writable left/right channel pair.
#[derive(Debug)]
pub struct StereoBufferMut<'a> {
    pub left: &'a mut [f32],
    pub right: &'a mut [f32],
}

impl<'a> StereoBufferMut<'a> {
    pub fn new(left: &'a mut [f32], right: &'a mut [f32]) -> Self {
        Self { left, right }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.left.len().min(self.right.len())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reborrow for a nested call without giving up the outer view.
    pub fn reborrow(&mut self) -> StereoBufferMut<'_> {
        StereoBufferMut {
            left: &mut *self.left,
            right: &mut *self.right,
        }
    }
}

/// Clip `[begin, end)` to the frames every view can address.
///
/// Inverted ranges collapse to empty.
#[inline]
pub fn block_range(
    begin: usize,
    end: usize,
    input: &StereoBuffer,
    output: &StereoBufferMut,
) -> Range<usize> {
    let end = end.min(input.len()).min(output.len());
    begin.min(end)..end
}
