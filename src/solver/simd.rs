use lazy_static::lazy_static;
use ndarray::Array;
use wide::{f64x4, CmpGe, CmpNe};

use crate::complex::C;
use crate::coord::Grid;
use crate::map::EscapeMap;
use crate::solver::{Kernel, Solver};

pub const LANES: usize = 4;

lazy_static! {
    static ref NAN: f64x4 = f64x4::splat(f64::NAN);
}

/// Four orbits stored as separate real and imaginary registers.
#[derive(Copy, Clone, Debug)]
pub struct C4 {
    pub re: f64x4,
    pub im: f64x4,
}

impl C4 {
    /// Packs up to four points; missing lanes are NaN and never escape.
    pub fn pack(points: &[C<f64>]) -> Self {
        let mut re = [f64::NAN; LANES];
        let mut im = [f64::NAN; LANES];
        for (k, z) in points.iter().take(LANES).enumerate() {
            re[k] = z.re;
            im[k] = z.im;
        }
        Self {
            re: f64x4::new(re),
            im: f64x4::new(im),
        }
    }

    /// `z * z + c`, with the same operation order as `num::Complex`.
    #[inline]
    pub fn step(self, c: C4) -> Self {
        let re = self.re * self.re - self.im * self.im;
        let im = self.re * self.im + self.im * self.re;
        Self {
            re: re + c.re,
            im: im + c.im,
        }
    }

    #[inline]
    pub fn norm_sqr(self) -> f64x4 {
        self.re * self.re + self.im * self.im
    }

    /// Lanes holding an infinite or NaN part.
    #[inline]
    pub fn non_finite(self) -> f64x4 {
        let t = (self.re - self.re) + (self.im - self.im);
        t.cmp_ne(t)
    }
}

/// Iterates four points per register, freezing escaped lanes with NaN.
#[derive(Clone, Debug)]
pub struct SimdSolver {
    kernel: Kernel,
    c: C4,
    threshold_sqr: f64x4,
}

impl SimdSolver {
    pub fn new(kernel: Kernel) -> Self {
        let c = kernel.c();
        Self {
            kernel,
            c: C4 {
                re: f64x4::splat(c.re),
                im: f64x4::splat(c.im),
            },
            threshold_sqr: f64x4::splat(kernel.threshold_sqr()),
        }
    }

    pub fn escape_lanes(&self, points: &[C<f64>]) -> [u32; LANES] {
        let itermax = self.kernel.itermax();
        let mut escapes = [itermax; LANES];
        let mut pending: i32 = (1 << points.len().min(LANES)) - 1;
        let mut z = C4::pack(points);

        for i in 0..itermax {
            if pending == 0 {
                break;
            }
            z = z.step(self.c);
            // frozen and padding lanes are NaN too; `pending` masks them out
            let diverged = z.norm_sqr().cmp_ge(self.threshold_sqr) | z.non_finite();
            let mask = diverged.move_mask() & pending;
            if mask != 0 {
                for (lane, escape) in escapes.iter_mut().enumerate() {
                    if mask & (1 << lane) != 0 {
                        *escape = i;
                    }
                }
                pending &= !mask;
                z.re = diverged.blend(*NAN, z.re);
                z.im = diverged.blend(*NAN, z.im);
            }
        }
        escapes
    }
}

impl Solver for SimdSolver {
    fn solve(&self, grid: Grid) -> EscapeMap {
        let dim = grid.dim();
        let seeds: Vec<C<f64>> = grid.points().iter().copied().collect();
        let mut escapes = Array::from_elem(dim, self.kernel.itermax());
        let solved = seeds.chunks(LANES).flat_map(|chunk| {
            let lanes = self.escape_lanes(chunk);
            lanes.into_iter().take(chunk.len())
        });
        for (escape, solved) in escapes.iter_mut().zip(solved) {
            *escape = solved;
        }
        EscapeMap::new(escapes)
    }
}
