//! fundsp `AudioUnit` adapters (2 in, 2 out) for the parameter nodes.

use fundsp::prelude::{AudioUnit, BufferMut, BufferRef};
use fundsp::signal::SignalFrame;
use fundsp::MAX_BUFFER_SIZE;

use stemfx_core::{StereoBuffer, StereoBufferMut};

use crate::node::{DelayNode, PitchShiftNode};

/// Stack scratch for one fundsp block.
struct Scratch {
    in_l: [f32; MAX_BUFFER_SIZE],
    in_r: [f32; MAX_BUFFER_SIZE],
    out_l: [f32; MAX_BUFFER_SIZE],
    out_r: [f32; MAX_BUFFER_SIZE],
}

impl Scratch {
    #[inline]
    fn load(size: usize, input: &BufferRef) -> Self {
        let mut scratch = Self {
            in_l: [0.0; MAX_BUFFER_SIZE],
            in_r: [0.0; MAX_BUFFER_SIZE],
            out_l: [0.0; MAX_BUFFER_SIZE],
            out_r: [0.0; MAX_BUFFER_SIZE],
        };
        let stereo = input.channels() > 1;
        for i in 0..size {
            let left = input.at_f32(0, i);
            scratch.in_l[i] = left;
            scratch.in_r[i] = if stereo { input.at_f32(1, i) } else { left };
        }
        scratch
    }

    #[inline]
    fn run(&mut self, size: usize, f: impl FnOnce(StereoBuffer<'_>, StereoBufferMut<'_>)) {
        f(
            StereoBuffer::new(&self.in_l[..size], &self.in_r[..size]),
            StereoBufferMut::new(&mut self.out_l[..size], &mut self.out_r[..size]),
        );
    }

    #[inline]
    fn store(&self, size: usize, output: &mut BufferMut) {
        for i in 0..size {
            output.set_f32(0, i, self.out_l[i]);
            output.set_f32(1, i, self.out_r[i]);
        }
    }
}

#[inline]
fn tick_stereo(
    input: &[f32],
    output: &mut [f32],
    f: impl FnOnce(StereoBuffer<'_>, StereoBufferMut<'_>),
) {
    let left = [input[0]];
    let right = [if input.len() > 1 { input[1] } else { input[0] }];
    let mut out_l = [0.0f32];
    let mut out_r = [0.0f32];
    f(
        StereoBuffer::new(&left, &right),
        StereoBufferMut::new(&mut out_l, &mut out_r),
    );
    output[0] = out_l[0];
    output[1] = out_r[0];
}

fn route_stereo(input: &SignalFrame) -> SignalFrame {
    let mut output = SignalFrame::new(2);
    output.set(0, input.at(0));
    output.set(1, input.at(1));
    output
}

impl AudioUnit for PitchShiftNode {
    fn inputs(&self) -> usize {
        2
    }

    fn outputs(&self) -> usize {
        2
    }

    fn reset(&mut self) {
        PitchShiftNode::reset(self);
    }

    // Grain sizes are fixed in samples; nothing to reallocate.
    fn set_sample_rate(&mut self, _sample_rate: f64) {}

    fn tick(&mut self, input: &[f32], output: &mut [f32]) {
        tick_stereo(input, output, |i, o| self.process_block(i, o));
    }

    fn process(&mut self, size: usize, input: &BufferRef, output: &mut BufferMut) {
        let size = size.min(MAX_BUFFER_SIZE);
        let mut scratch = Scratch::load(size, input);
        scratch.run(size, |i, o| self.process_block(i, o));
        scratch.store(size, output);
    }

    fn get_id(&self) -> u64 {
        0x5354_5049_5443
    }

    fn route(&mut self, input: &SignalFrame, _frequency: f64) -> SignalFrame {
        route_stereo(input)
    }

    fn footprint(&self) -> usize {
        core::mem::size_of::<Self>()
    }
}

impl AudioUnit for DelayNode {
    fn inputs(&self) -> usize {
        2
    }

    fn outputs(&self) -> usize {
        2
    }

    fn reset(&mut self) {
        DelayNode::reset(self);
    }

    fn set_sample_rate(&mut self, sample_rate: f64) {
        let sample_rate = sample_rate.round() as u32;
        if sample_rate as f32 != self.sample_rate() {
            self.rebuild(sample_rate);
        }
    }

    fn tick(&mut self, input: &[f32], output: &mut [f32]) {
        tick_stereo(input, output, |i, o| self.process_block(i, o));
    }

    fn process(&mut self, size: usize, input: &BufferRef, output: &mut BufferMut) {
        let size = size.min(MAX_BUFFER_SIZE);
        let mut scratch = Scratch::load(size, input);
        scratch.run(size, |i, o| self.process_block(i, o));
        scratch.store(size, output);
    }

    fn get_id(&self) -> u64 {
        0x5354_444C_4159
    }

    fn route(&mut self, input: &SignalFrame, _frequency: f64) -> SignalFrame {
        route_stereo(input)
    }

    fn footprint(&self) -> usize {
        core::mem::size_of::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pitch::PitchQuality;

    #[test]
    fn test_pitch_node_is_stereo_unit() {
        let mut node = PitchShiftNode::new(PitchQuality::High, 1.0);
        assert_eq!(node.inputs(), 2);
        assert_eq!(node.outputs(), 2);

        let mut output = [0.0f32; 2];
        node.tick(&[0.25, -0.5], &mut output);
        assert_eq!(output, [0.25, -0.5]);
    }

    #[test]
    fn test_delay_node_tick_impulse() {
        let mut node = DelayNode::new(1000, 0.01, 0.0);
        let mut output = [0.0f32; 2];

        node.tick(&[1.0, 1.0], &mut output);
        assert_eq!(output, [1.0, 1.0]);
        for _ in 1..10 {
            node.tick(&[0.0, 0.0], &mut output);
        }
        node.tick(&[0.0, 0.0], &mut output);
        assert_eq!(output, [0.5, 0.5]);
    }

    #[test]
    fn test_delay_node_follows_sample_rate() {
        let mut node = DelayNode::new(44100, 0.1, 0.0);
        node.set_sample_rate(48000.0);
        assert_eq!(node.sample_rate(), 48000.0);
    }
}
