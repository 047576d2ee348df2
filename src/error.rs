//! Centralized error type for the stemfx umbrella crate.
//!
//! Wraps subsystem errors so `?` propagates naturally across crate boundaries.

use thiserror::Error;

use crate::host::EffectId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] stemfx_core::Error),

    #[error("DSP: {0}")]
    Dsp(#[from] stemfx_dsp::Error),

    #[error("Unknown effect {0}")]
    UnknownEffect(EffectId),
}

pub type Result<T> = std::result::Result<T, Error>;
