//! Escape-time maps of quadratic Julia sets.
//!
//! A [`Region`] of the complex plane is sampled into a [`Grid`], every grid
//! point is iterated under `z -> z² + c` until it crosses the divergence
//! threshold, and the escape indices are scaled into an [`IntensityMap`] in
//! `[0, 1]` ready for [`painter::GreyscalePainter`].
//!
//! ```no_run
//! use juliox::{DivergenceConfig, Region};
//! use juliox::painter::{GreyscalePainter, Painter};
//!
//! let config = DivergenceConfig::default().with_window(20, 100);
//! let map = config.over(&Region::default())?;
//! GreyscalePainter::new().save(&map, "plot.png")?;
//! # Ok::<(), juliox::JuliaError>(())
//! ```
#![allow(clippy::new_without_default)]

pub mod complex;
pub mod config;
pub mod coord;
pub mod error;
pub mod map;
pub mod painter;
pub mod solver;
pub mod threads;

pub use crate::config::DivergenceConfig;
pub use crate::coord::{build_grid, Grid, Region};
pub use crate::error::{JuliaError, Result};
pub use crate::map::{EscapeMap, IntensityMap};
pub use crate::solver::{Kernel, Solver, Strategy};

/// Escape index of every grid point, in `[0, itermax]`.
pub fn escape_times(grid: Grid, config: &DivergenceConfig) -> Result<EscapeMap> {
    config.validate()?;
    config.solver().try_solve(grid)
}

/// Normalized escape-time map of `grid`. The iteration window and threshold
/// are checked before any iteration runs.
pub fn evaluate(grid: Grid, config: &DivergenceConfig) -> Result<IntensityMap> {
    escape_times(grid, config)?.normalize(config.window)
}
