use std::fmt;
use std::str::FromStr;

use crate::complex::C;
use crate::coord::Grid;
use crate::error::{JuliaError, Result};
use crate::map::EscapeMap;
use crate::threads::WorkerPool;

pub mod array;
pub mod scalar;
pub mod simd;

pub use array::{ArraySolver, ArrayState};
pub use scalar::ScalarSolver;
pub use simd::SimdSolver;

/// The escape-time iteration for a single seed under `z -> z² + c`.
///
/// Every solver must report exactly what [`Kernel::escape_time`] reports for
/// each point of the grid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Kernel {
    c: C<f64>,
    threshold_sqr: f64,
    itermax: u32,
}

impl Kernel {
    pub fn new(c: C<f64>, threshold: f64, itermax: u32) -> Self {
        Self {
            c,
            threshold_sqr: threshold * threshold,
            itermax,
        }
    }

    pub fn c(&self) -> C<f64> {
        self.c
    }

    pub fn threshold_sqr(&self) -> f64 {
        self.threshold_sqr
    }

    pub fn itermax(&self) -> u32 {
        self.itermax
    }

    #[inline]
    pub fn step(&self, z: C<f64>) -> C<f64> {
        (z * z) + self.c
    }

    /// An orbit that overflowed is treated as escaped, even when the
    /// overflow left NaN in its squared magnitude.
    #[inline]
    pub fn diverged(&self, z: C<f64>) -> bool {
        z.norm_sqr() >= self.threshold_sqr || !z.is_finite()
    }

    /// Index of the first iteration whose orbit value reaches the threshold,
    /// in `[0, itermax]`.
    pub fn escape_time(&self, seed: C<f64>) -> u32 {
        let mut z = seed;
        for i in 0..self.itermax {
            z = self.step(z);
            if self.diverged(z) {
                return i;
            }
        }
        self.itermax
    }
}

pub trait Solver {
    fn solve(&self, grid: Grid) -> EscapeMap;

    fn try_solve(&self, grid: Grid) -> Result<EscapeMap> {
        Ok(self.solve(grid))
    }

    fn threaded(self, n: usize) -> WorkerPool<Grid, EscapeMap>
    where
        Self: Sized + Clone + Send + 'static,
    {
        WorkerPool::with(n, || {
            let solver = self.clone();
            move |grid: Grid| solver.solve(grid)
        })
    }
}

impl Solver for WorkerPool<Grid, EscapeMap> {
    /// Panics if a worker thread panicked while solving its band; use
    /// [`Solver::try_solve`] to get the failure as an error.
    fn solve(&self, grid: Grid) -> EscapeMap {
        match self.try_solve(grid) {
            Ok(escapes) => escapes,
            Err(err) => panic!("{}", err),
        }
    }

    fn try_solve(&self, grid: Grid) -> Result<EscapeMap> {
        Ok(self.call(grid)?)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Strategy {
    /// The kernel applied point by point.
    #[default]
    Scalar,
    /// Whole-grid iteration, one global step at a time.
    Array,
    /// Four points per SIMD register.
    Simd,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Scalar, Strategy::Array, Strategy::Simd];
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Scalar => "scalar",
            Self::Array => "array",
            Self::Simd => "simd",
        };
        f.write_str(name)
    }
}

impl FromStr for Strategy {
    type Err = JuliaError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "scalar" => Ok(Self::Scalar),
            "array" => Ok(Self::Array),
            "simd" => Ok(Self::Simd),
            _ => Err(JuliaError::UnknownStrategy(s.to_string())),
        }
    }
}

/// Builds a solver for `strategy`; `threads == 0` solves on the calling thread.
pub fn make_solver(strategy: Strategy, kernel: Kernel, threads: usize) -> Box<dyn Solver> {
    fn boxed<S>(solver: S, threads: usize) -> Box<dyn Solver>
    where
        S: Solver + Clone + Send + 'static,
    {
        if threads == 0 {
            Box::new(solver)
        } else {
            Box::new(solver.threaded(threads))
        }
    }

    match strategy {
        Strategy::Scalar => boxed(ScalarSolver::new(kernel), threads),
        Strategy::Array => boxed(ArraySolver::new(kernel), threads),
        Strategy::Simd => boxed(SimdSolver::new(kernel), threads),
    }
}
