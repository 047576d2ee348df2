//! Error types for stemfx-core.

use thiserror::Error;

/// Construction-time errors. The processing path never fails.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid sample rate: {0} Hz. Must be between 8000 and 384000 Hz")]
    InvalidSampleRate(u32),
}

/// Result type alias.
pub type Result<T> = core::result::Result<T, Error>;
