use thiserror::Error;

use crate::threads::PoolError;

pub type Result<T> = std::result::Result<T, JuliaError>;

#[derive(Debug, Error)]
pub enum JuliaError {
    #[error("degenerate region: horizontal span {xspan}, vertical span {yspan}")]
    InvalidRegion { xspan: f64, yspan: f64 },

    #[error("horizontal resolution {resolution_x} gives an unusable grid height of {resolution_y}")]
    InvalidResolution {
        resolution_x: u32,
        resolution_y: f64,
    },

    #[error("iteration window ({min}, {max}) must satisfy min < max")]
    InvalidIterationWindow { min: u32, max: u32 },

    #[error("divergence threshold must be positive with a finite square, got {0}")]
    InvalidThreshold(f64),

    #[error("unknown strategy '{0}', expected one of: scalar, array, simd")]
    UnknownStrategy(String),

    #[error(transparent)]
    Pool(#[from] PoolError),

    #[error("failed to write image")]
    Image(#[from] image::ImageError),
}
