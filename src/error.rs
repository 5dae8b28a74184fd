//! Construction and configuration errors
//!
//! Once a world is built every simulation transition is total, so the only
//! failures are malformed geometry or configuration rejected up front.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    /// Rectangles must have strictly positive extent on both axes
    #[error("rectangle size must be positive, got {width} x {height}")]
    NonPositiveSize { width: f32, height: f32 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SimResult<T> = Result<T, SimError>;
