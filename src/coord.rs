use ndarray::{Array1, Array2, ArrayView2, Axis as NdAxis};

use crate::complex::*;
use crate::error::{JuliaError, Result};
use crate::threads::{Join, JoinError, Split};

/// One pair of bounds on the complex plane. `start` may be greater than `end`,
/// in which case samples run backwards.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Axis {
    pub start: f64,
    pub end: f64,
}

impl Axis {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn span(&self) -> f64 {
        (self.end - self.start).abs()
    }

    pub fn is_degenerate(&self) -> bool {
        !self.start.is_finite() || !self.end.is_finite() || self.span() == 0.0
    }

    /// `n` evenly spaced values from `start` to `end`, both included.
    pub fn samples(&self, n: usize) -> Array1<f64> {
        match n {
            0 => Array1::zeros(0),
            1 => Array1::from_elem(1, self.start),
            _ => {
                let step = (self.end - self.start) / (n as f64 - 1.0);
                let mut samples: Array1<f64> =
                    (0..n).map(|k| k as f64 * step + self.start).collect();
                samples[n - 1] = self.end;
                samples
            }
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Region {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Region {
    pub fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    pub fn from_center(center: C<f64>, width: f64, height: f64) -> Self {
        Self::new(
            center.re - width / 2.0,
            center.re + width / 2.0,
            center.im + height / 2.0,
            center.im - height / 2.0,
        )
    }

    pub fn horizontal(&self) -> Axis {
        Axis::new(self.left, self.right)
    }

    pub fn vertical(&self) -> Axis {
        Axis::new(self.top, self.bottom)
    }

    pub fn xspan(&self) -> f64 {
        self.horizontal().span()
    }

    pub fn yspan(&self) -> f64 {
        self.vertical().span()
    }

    fn validate(&self) -> Result<()> {
        if self.horizontal().is_degenerate() || self.vertical().is_degenerate() {
            return Err(JuliaError::InvalidRegion {
                xspan: self.xspan(),
                yspan: self.yspan(),
            });
        }
        Ok(())
    }

    /// Number of vertical samples that keeps pixels square at the given
    /// horizontal resolution, truncated toward zero.
    pub fn resolution_y(&self, resolution_x: u32) -> Result<u32> {
        self.validate()?;
        let resolution_y = resolution_x as f64 * self.yspan() / self.xspan();
        if resolution_x == 0
            || !(resolution_y >= 1.0)
            || resolution_y >= u32::MAX as f64 + 1.0
        {
            return Err(JuliaError::InvalidResolution {
                resolution_x,
                resolution_y,
            });
        }
        Ok(resolution_y as u32)
    }

    pub fn build(&self, resolution_x: u32) -> Result<Grid> {
        let resolution_y = self.resolution_y(resolution_x)?;
        let xs = self.horizontal().samples(resolution_x as usize);
        let ys = self.vertical().samples(resolution_y as usize);
        Ok(Grid::from_axes(&xs, &ys))
    }
}

impl Default for Region {
    fn default() -> Self {
        Self::new(-0.1, 0.1, 0.1, -0.1)
    }
}

/// Complex sample points, indexed `[x, y]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    points: Array2<C<f64>>,
}

impl Grid {
    pub fn from_points(points: Array2<C<f64>>) -> Self {
        Self { points }
    }

    pub fn from_axes(xs: &Array1<f64>, ys: &Array1<f64>) -> Self {
        let xs = xs.mapv(cr).insert_axis(NdAxis(1));
        let ys = ys.mapv(ci).insert_axis(NdAxis(0));
        Self::from_points(&xs + &ys)
    }

    pub fn resolution_x(&self) -> usize {
        self.points.nrows()
    }

    pub fn resolution_y(&self) -> usize {
        self.points.ncols()
    }

    pub fn dim(&self) -> (usize, usize) {
        self.points.dim()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> ArrayView2<C<f64>> {
        self.points.view()
    }

    pub fn into_points(self) -> Array2<C<f64>> {
        self.points
    }
}

impl Split for Grid {
    fn split_parts(&self, n: usize) -> Vec<Self> {
        self.points
            .split_parts(n)
            .into_iter()
            .map(Self::from_points)
            .collect()
    }
}

impl Join for Grid {
    fn join_parts(parts: Vec<Self>) -> std::result::Result<Self, JoinError> {
        let points = parts.into_iter().map(Self::into_points).collect();
        Ok(Self::from_points(Array2::join_parts(points)?))
    }
}

pub fn build_grid(region: &Region, resolution_x: u32) -> Result<Grid> {
    region.build(resolution_x)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_square_region() {
        let region = Region::new(-1.0, 1.0, -1.0, 1.0);
        let grid = build_grid(&region, 3).unwrap();
        assert_eq!(grid.dim(), (3, 3));

        let points = grid.points();
        let xs: Vec<f64> = points.column(0).iter().map(|z| z.re).collect();
        let ys: Vec<f64> = points.row(0).iter().map(|z| z.im).collect();
        assert_eq!(xs, vec![-1.0, 0.0, 1.0]);
        assert_eq!(ys, vec![-1.0, 0.0, 1.0]);
        assert_eq!(points[[2, 0]], c(1.0, -1.0));
    }

    #[test]
    fn test_aspect_ratio() {
        let region = Region::new(-2.0, 1.0, -1.0, 1.0);
        let grid = region.build(100).unwrap();
        assert_eq!(grid.resolution_x(), 100);
        assert_eq!(grid.resolution_y(), 66);

        let points = grid.points();
        assert_eq!(points[[0, 0]].re, -2.0);
        assert_eq!(points[[99, 0]].re, 1.0);
        assert_eq!(points[[0, 0]].im, -1.0);
        assert_eq!(points[[0, 65]].im, 1.0);
    }

    #[test]
    fn test_reversed_bounds_flip() {
        let up = Region::new(-1.0, 1.0, -1.0, 1.0).build(5).unwrap();
        let down = Region::new(-1.0, 1.0, 1.0, -1.0).build(5).unwrap();
        for j in 0..5 {
            assert_eq!(up.points()[[0, j]].im, down.points()[[0, 4 - j]].im);
        }
    }

    #[test]
    fn test_from_center() {
        let region = Region::from_center(c(-0.5, 0.0), 3.0, 2.0);
        assert_eq!(region, Region::new(-2.0, 1.0, 1.0, -1.0));
    }

    #[test]
    fn test_single_sample() {
        let samples = Axis::new(0.25, 0.75).samples(1);
        assert_eq!(samples.to_vec(), vec![0.25]);
    }

    #[test]
    fn test_degenerate_region() {
        let flat = Region::new(0.0, 1.0, 0.5, 0.5);
        assert!(matches!(
            flat.build(10),
            Err(JuliaError::InvalidRegion { .. })
        ));
        let thin = Region::new(0.3, 0.3, 0.0, 1.0);
        assert!(matches!(
            thin.build(10),
            Err(JuliaError::InvalidRegion { .. })
        ));
        let unbounded = Region::new(f64::NEG_INFINITY, 1.0, 0.0, 1.0);
        assert!(matches!(
            unbounded.build(10),
            Err(JuliaError::InvalidRegion { .. })
        ));
    }

    #[test]
    fn test_invalid_resolution() {
        let region = Region::new(-1.0, 1.0, -1.0, 1.0);
        assert!(matches!(
            region.build(0),
            Err(JuliaError::InvalidResolution { .. })
        ));
        // 3 * 0.1 / 1.0 truncates to zero rows
        let sliver = Region::new(0.0, 1.0, 0.0, 0.1);
        assert!(matches!(
            sliver.build(3),
            Err(JuliaError::InvalidResolution { .. })
        ));
    }

    #[test]
    fn test_grid_split_join() {
        let grid = Region::default().build(7).unwrap();
        let parts = grid.split_parts(3);
        assert_eq!(parts.len(), 3);
        assert_eq!(
            parts.iter().map(Grid::resolution_x).collect::<Vec<_>>(),
            vec![3, 2, 2]
        );
        assert_eq!(Grid::join_parts(parts).unwrap(), grid);
    }
}
