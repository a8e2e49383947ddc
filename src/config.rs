use crate::complex::*;
use crate::coord::Region;
use crate::error::{JuliaError, Result};
use crate::map::{check_window, IntensityMap};
use crate::solver::{make_solver, Kernel, Solver, Strategy};

/// Parameters of a Julia set divergence map for `z -> z² + c`.
#[derive(Clone, Debug, PartialEq)]
pub struct DivergenceConfig {
    pub c: C<f64>,
    pub threshold: f64,
    /// `(itermin, itermax)`: escape indices are clipped to `itermin` and the
    /// iteration stops at `itermax`.
    pub window: (u32, u32),
    /// Horizontal sample count used by [`DivergenceConfig::over`].
    pub resolution: u32,
    pub strategy: Strategy,
    /// Worker threads; 0 solves on the calling thread.
    pub threads: usize,
}

impl DivergenceConfig {
    pub fn new(c: C<f64>) -> Self {
        Self {
            c,
            threshold: 2.0,
            window: (0, 50),
            resolution: 1000,
            strategy: Strategy::default(),
            threads: num_cpus::get_physical(),
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_window(mut self, itermin: u32, itermax: u32) -> Self {
        self.window = (itermin, itermax);
        self
    }

    pub fn with_resolution(mut self, resolution: u32) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn itermin(&self) -> u32 {
        self.window.0
    }

    pub fn itermax(&self) -> u32 {
        self.window.1
    }

    pub fn validate(&self) -> Result<()> {
        check_window(self.window)?;
        if !(self.threshold > 0.0) || !(self.threshold * self.threshold).is_finite() {
            return Err(JuliaError::InvalidThreshold(self.threshold));
        }
        Ok(())
    }

    pub fn kernel(&self) -> Kernel {
        Kernel::new(self.c, self.threshold, self.itermax())
    }

    pub fn solver(&self) -> Box<dyn Solver> {
        make_solver(self.strategy, self.kernel(), self.threads)
    }

    /// Samples `region` at `self.resolution` and evaluates the grid.
    pub fn over(&self, region: &Region) -> Result<IntensityMap> {
        self.validate()?;
        let grid = region.build(self.resolution)?;
        crate::evaluate(grid, self)
    }
}

impl Default for DivergenceConfig {
    fn default() -> Self {
        Self::new(c(-0.835, -0.2321))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DivergenceConfig::new(c(0.285, 0.01));
        assert_eq!(config.threshold, 2.0);
        assert_eq!(config.window, (0, 50));
        assert_eq!(config.resolution, 1000);
        assert_eq!(config.strategy, Strategy::Scalar);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_threshold() {
        // 1e200 is finite but its square is not
        for threshold in [0.0, -2.0, f64::NAN, f64::INFINITY, 1e200] {
            let config = DivergenceConfig::default().with_threshold(threshold);
            assert!(matches!(
                config.validate(),
                Err(JuliaError::InvalidThreshold(_))
            ));
        }
    }

    #[test]
    fn test_window_checked_before_grid() {
        // the region is degenerate too, but the window is reported first
        let config = DivergenceConfig::default().with_window(20, 20);
        let region = Region::new(0.0, 0.0, 0.0, 0.0);
        assert!(matches!(
            config.over(&region),
            Err(JuliaError::InvalidIterationWindow { min: 20, max: 20 })
        ));
    }

    #[test]
    fn test_over() {
        let config = DivergenceConfig::new(cr(0.0))
            .with_window(0, 10)
            .with_resolution(5)
            .with_threads(2);
        let map = config.over(&Region::new(-3.0, 3.0, -3.0, 3.0)).unwrap();
        assert_eq!(map.dim(), (5, 5));
        // corners escape immediately, the origin never does
        assert_eq!(map[[0, 0]], 0.0);
        assert_eq!(map[[2, 2]], 1.0);
    }
}
