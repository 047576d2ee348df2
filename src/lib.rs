//! # stemfx - Realtime Stem Effects
//!
//! Stereo pitch shifting and feedback delay for per-stem processing inside a
//! host's audio callback.
//!
//! ## Architecture
//!
//! stemfx is an umbrella crate over:
//! - **stemfx-core** - Ring buffers, Hann tables, interpolation, channel views, config
//! - **stemfx-dsp** - Pitch shifters, feedback delay, effect instances, parameter nodes
//!
//! ## Quick Start
//!
//! ```ignore
//! use stemfx::prelude::*;
//!
//! let mut host = EffectHost::new();
//! let vocals = host.create(EffectKind::PitchShift(PitchQuality::High), 44100)?;
//!
//! // Inside the audio callback
//! host.process_pitch(
//!     vocals,
//!     0,
//!     frames,
//!     StereoBuffer::new(&in_l, &in_r),
//!     StereoBufferMut::new(&mut out_l, &mut out_r),
//!     semitones_to_ratio(3.0),
//! )?;
//! ```
//!
//! ## Feature Flags
//!
//! - `graph` - fundsp `AudioUnit` impls for [`PitchShiftNode`] and [`DelayNode`]

/// Re-export of stemfx-core for direct access
pub use stemfx_core as core;

/// Re-export of stemfx-dsp for direct access
pub use stemfx_dsp as dsp;

pub use stemfx_core::{
    block_range, AtomicFloat, EffectConfig, GrainConfig, RingBuffer, StereoBuffer,
    StereoBufferMut, WindowTable,
};

pub use stemfx_dsp::{
    clamp_ratio, semitones_to_ratio, DelayNode, EffectInstance, EffectKind, EffectParams,
    FeedbackDelay, HqPitchShifter, PitchEngine, PitchQuality, PitchShiftNode, PitchShifter,
    SimplePitchShifter,
};

mod error;
pub use error::{Error, Result};

mod host;
pub use host::{EffectHost, EffectId};

pub mod prelude {
    //! Common imports for hosts.
    pub use crate::{
        semitones_to_ratio, DelayNode, EffectConfig, EffectHost, EffectId, EffectInstance,
        EffectKind, EffectParams, PitchQuality, PitchShiftNode, PitchShifter, StereoBuffer,
        StereoBufferMut,
    };
    pub use crate::{Error, Result};
}
