use std::path::Path;

use image::{GrayImage, Luma};

use crate::error::Result;
use crate::map::IntensityMap;

pub trait Painter {
    fn intensity_color(&self, intensity: f64) -> Luma<u8>;

    /// Grid point `[x, y]` becomes pixel `(x, y)`.
    fn paint(&self, map: &IntensityMap) -> GrayImage {
        let (width, height) = map.dim();
        GrayImage::from_fn(width as u32, height as u32, |x, y| {
            self.intensity_color(map[[x as usize, y as usize]])
        })
    }

    fn save<P: AsRef<Path>>(&self, map: &IntensityMap, path: P) -> Result<()>
    where
        Self: Sized,
    {
        self.paint(map).save(path)?;
        Ok(())
    }
}

pub struct GreyscalePainter {
    inverted: bool,
}

impl GreyscalePainter {
    pub fn new() -> Self {
        Self { inverted: false }
    }

    /// Bounded points paint black instead of white.
    pub fn inverted() -> Self {
        Self { inverted: true }
    }
}

impl Painter for GreyscalePainter {
    fn intensity_color(&self, intensity: f64) -> Luma<u8> {
        let v = (intensity.clamp(0.0, 1.0) * 255.0) as u8;
        if self.inverted {
            Luma([255 - v])
        } else {
            Luma([v])
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_greyscale() {
        let painter = GreyscalePainter::new();
        assert_eq!(painter.intensity_color(0.0), Luma([0]));
        assert_eq!(painter.intensity_color(1.0), Luma([255]));
        // truncated, not rounded
        assert_eq!(painter.intensity_color(0.5), Luma([127]));
        assert_eq!(GreyscalePainter::inverted().intensity_color(1.0), Luma([0]));
    }

    #[test]
    fn test_paint_orientation() {
        let map = IntensityMap::new(array![[0.0, 1.0, 0.0], [0.0, 0.0, 0.0]]);
        let img = GreyscalePainter::new().paint(&map);
        assert_eq!(img.dimensions(), (2, 3));
        assert_eq!(img.get_pixel(0, 1), &Luma([255]));
        assert_eq!(img.get_pixel(1, 0), &Luma([0]));
    }

    #[test]
    fn test_save_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("julia.png");
        let map = IntensityMap::new(array![[0.0, 0.25], [0.75, 1.0]]);
        GreyscalePainter::new().save(&map, &path).unwrap();

        let img = image::open(&path).unwrap().into_luma8();
        assert_eq!(img.get_pixel(1, 1), &Luma([255]));
        assert_eq!(img.get_pixel(0, 1), &Luma([63]));
    }
}
