//! Error types for stemfx-dsp

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] stemfx_core::Error),

    #[error("{got} parameters sent to a {expected} effect")]
    ParamsMismatch {
        expected: &'static str,
        got: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
