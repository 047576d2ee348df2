//! Realtime-safe building blocks shared by the stemfx effect engines.
//!
//! # Primary API
//!
//! - [`RingBuffer`]: fixed-capacity circular sample store
//! - [`WindowTable`]: precomputed Hann tapers
//! - [`interp`]: linear and cubic sub-sample readback
//! - [`StereoBuffer`] / [`StereoBufferMut`]: borrowed per-block channel views
//! - [`EffectConfig`]: construction-time sizes and sample rate
//! - [`AtomicFloat`]: lock-free parameter handle for control threads
//!
//! Nothing in this crate allocates after construction.

pub mod error;
pub use error::{Error, Result};

mod config;
pub use config::{EffectConfig, GrainConfig, MAX_SAMPLE_RATE, MIN_SAMPLE_RATE};

pub mod interp;

mod lockfree;
pub use lockfree::AtomicFloat;

mod ring;
pub use ring::RingBuffer;

mod view;
pub use view::{block_range, StereoBuffer, StereoBufferMut};

mod window;
pub use window::WindowTable;
