use crate::coord::Grid;
use crate::map::EscapeMap;
use crate::solver::{Kernel, Solver};

/// Runs the kernel independently on every point, stopping each orbit as soon
/// as it escapes.
#[derive(Clone, Debug)]
pub struct ScalarSolver {
    kernel: Kernel,
}

impl ScalarSolver {
    pub fn new(kernel: Kernel) -> Self {
        Self { kernel }
    }
}

impl Solver for ScalarSolver {
    fn solve(&self, grid: Grid) -> EscapeMap {
        EscapeMap::new(grid.points().mapv(|seed| self.kernel.escape_time(seed)))
    }
}
