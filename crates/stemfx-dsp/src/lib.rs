//! RT-safe stem effects: granular pitch shifting (simple and high-quality)
//! and a cubic-interpolated feedback delay. Engines take parameters per call;
//! nodes hold them in lock-free atomics for control-thread updates.

mod error;
pub use error::{Error, Result};

pub mod pitch;
pub use pitch::{
    clamp_ratio, semitones_to_ratio, HqPitchShifter, PitchEngine, PitchQuality, PitchShifter,
    SimplePitchShifter, MAX_PITCH_RATIO, MIN_PITCH_RATIO,
};

mod delay;
pub use delay::{FeedbackDelay, MAX_DELAY_SECONDS};

mod instance;
pub use instance::{EffectInstance, EffectKind, EffectParams};

mod node;
pub use node::{DelayNode, PitchShiftNode, PitchShiftNodeBuilder};

#[cfg(feature = "graph")]
mod graph;
