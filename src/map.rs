use std::ops::Index;

use ndarray::{Array2, ArrayView2};

use crate::error::{JuliaError, Result};
use crate::threads::{Join, JoinError, Split};

pub fn check_window((min, max): (u32, u32)) -> Result<()> {
    if min >= max {
        return Err(JuliaError::InvalidIterationWindow { min, max });
    }
    Ok(())
}

/// First iteration at which each orbit crossed the threshold, or `itermax`
/// for orbits that never did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EscapeMap {
    escapes: Array2<u32>,
}

impl EscapeMap {
    pub fn new(escapes: Array2<u32>) -> Self {
        Self { escapes }
    }

    pub fn dim(&self) -> (usize, usize) {
        self.escapes.dim()
    }

    pub fn view(&self) -> ArrayView2<u32> {
        self.escapes.view()
    }

    pub fn into_array(self) -> Array2<u32> {
        self.escapes
    }

    /// Clips escape indices below `min` up to `min` and scales the window onto
    /// `[0, 1]`.
    pub fn normalize(&self, window: (u32, u32)) -> Result<IntensityMap> {
        check_window(window)?;
        let (min, max) = window;
        let range = (max - min) as f64;
        Ok(IntensityMap::new(
            self.escapes.mapv(|e| (e.max(min) - min) as f64 / range),
        ))
    }
}

impl Index<[usize; 2]> for EscapeMap {
    type Output = u32;

    fn index(&self, index: [usize; 2]) -> &u32 {
        &self.escapes[index]
    }
}

impl Split for EscapeMap {
    fn split_parts(&self, n: usize) -> Vec<Self> {
        self.escapes
            .split_parts(n)
            .into_iter()
            .map(Self::new)
            .collect()
    }
}

impl Join for EscapeMap {
    fn join_parts(parts: Vec<Self>) -> std::result::Result<Self, JoinError> {
        let escapes = parts.into_iter().map(Self::into_array).collect();
        Ok(Self::new(Array2::join_parts(escapes)?))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct IntensityMap {
    values: Array2<f64>,
}

impl IntensityMap {
    pub fn new(values: Array2<f64>) -> Self {
        Self { values }
    }

    pub fn dim(&self) -> (usize, usize) {
        self.values.dim()
    }

    pub fn view(&self) -> ArrayView2<f64> {
        self.values.view()
    }

    pub fn into_array(self) -> Array2<f64> {
        self.values
    }
}

impl Index<[usize; 2]> for IntensityMap {
    type Output = f64;

    fn index(&self, index: [usize; 2]) -> &f64 {
        &self.values[index]
    }
}
