use ndarray::{Array, Array2, Zip};

use crate::complex::*;
use crate::coord::Grid;
use crate::map::EscapeMap;
use crate::solver::{Kernel, Solver};

/// Orbits of the whole grid after `iteration` global steps. Escaped orbits
/// hold NaN and are no longer advanced.
#[derive(Clone, Debug)]
pub struct ArrayState {
    pub(crate) iteration: u32,
    pub(crate) live: usize,
    pub(crate) za: Array2<C<f64>>,
    pub(crate) ia: Array2<u32>,
}

impl ArrayState {
    pub fn new(grid: Grid, itermax: u32) -> Self {
        let za = grid.into_points();
        let ia = Array::from_elem(za.dim(), itermax);
        Self {
            iteration: 0,
            live: za.len(),
            za,
            ia,
        }
    }

    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    /// Points whose orbit has not escaped yet.
    pub fn live(&self) -> usize {
        self.live
    }

    pub fn escapes(&self) -> EscapeMap {
        EscapeMap::new(self.ia.clone())
    }
}

impl From<ArrayState> for EscapeMap {
    fn from(state: ArrayState) -> Self {
        EscapeMap::new(state.ia)
    }
}

/// Advances every live orbit of the grid in lockstep.
#[derive(Clone, Debug)]
pub struct ArraySolver {
    kernel: Kernel,
}

impl ArraySolver {
    pub fn new(kernel: Kernel) -> Self {
        Self { kernel }
    }

    pub fn iterate(&self, state: &mut ArrayState) {
        let iteration = state.iteration;
        let itermax = self.kernel.itermax();
        let mut escaped = 0;
        Zip::from(&mut state.za)
            .and(&mut state.ia)
            .for_each(|zv, iv| {
                if *iv != itermax {
                    return;
                }
                *zv = self.kernel.step(*zv);
                if self.kernel.diverged(*zv) {
                    *iv = iteration;
                    *zv = frozen();
                    escaped += 1;
                }
            });
        state.live -= escaped;
        state.iteration += 1;
    }
}

impl Solver for ArraySolver {
    fn solve(&self, grid: Grid) -> EscapeMap {
        let mut state = ArrayState::new(grid, self.kernel.itermax());
        while state.iteration < self.kernel.itermax() && state.live > 0 {
            self.iterate(&mut state);
        }
        state.into()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_escape_recorded_once() {
        let kernel = Kernel::new(cr(0.0), 2.0, 10);
        let solver = ArraySolver::new(kernel);
        let grid = Grid::from_points(array![[cr(0.0), cr(3.0)], [cr(1.1), c(0.5, 0.5)]]);
        let mut state = ArrayState::new(grid, kernel.itermax());

        solver.iterate(&mut state);
        assert_eq!(state.live(), 3);
        assert_eq!(state.escapes()[[0, 1]], 0);
        assert!(state.za[[0, 1]].re.is_nan());

        for _ in 1..10 {
            solver.iterate(&mut state);
        }
        assert_eq!(state.iteration(), 10);
        assert_eq!(state.live(), 2);
        let escapes: EscapeMap = state.into();
        assert_eq!(escapes.into_array(), array![[10, 0], [2, 10]]);
    }

    #[test]
    fn test_stops_when_all_escaped() {
        let kernel = Kernel::new(cr(0.0), 2.0, 1000);
        let grid = Grid::from_points(array![[cr(3.0), cr(-5.0)]]);
        let escapes = ArraySolver::new(kernel).solve(grid);
        assert_eq!(escapes.into_array(), array![[0, 0]]);
    }
}
