//! Monochrome raster core.
//!
//! Glyphs, composed cells and whole grids are all [`Raster`]s: bit-packed
//! monochrome images where a set bit is background (white) and a clear bit
//! is ink. Storing background as 1 makes pixel-wise AND the overlay operator.
//!
//! - [`Raster`]: the packed image type
//! - [`ops::RasterOps`]: kernel-backed AND / difference operations
//! - [`geometry::CellGeometry`]: cell size and quadrant boundaries

pub mod geometry;
pub mod ops;

use std::path::Path;

use image::{GrayImage, Luma};

use crate::error::RasterError;

/// Result type for raster operations.
pub type RasterResult<T> = std::result::Result<T, RasterError>;

/// Luma values at or above this are background.
const LUMA_THRESHOLD: u8 = 128;

/// An axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the point lies inside this rectangle.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// A bit-packed monochrome image.
///
/// Pixel `(x, y)` is bit `y * width + x`, LSB-first within each byte.
/// Unused trailing bits of the last byte are kept at 0, so two rasters of
/// the same size are pixel-identical exactly when their bytes are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Raster {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

fn byte_len(width: u32, height: u32) -> usize {
    (width as usize * height as usize).div_ceil(8)
}

impl Raster {
    /// An all-background raster.
    pub fn blank(width: u32, height: u32) -> Self {
        let mut raster = Self {
            data: vec![0xFF; byte_len(width, height)],
            width,
            height,
        };
        raster.mask_tail();
        raster
    }

    /// Create a raster from packed bytes.
    ///
    /// The caller must ensure `data.len()` matches `width * height` bits.
    pub fn from_raw(data: Vec<u8>, width: u32, height: u32) -> Self {
        debug_assert_eq!(data.len(), byte_len(width, height));
        let mut raster = Self {
            data,
            width,
            height,
        };
        raster.mask_tail();
        raster
    }

    fn mask_tail(&mut self) {
        let used_bits = (self.width as usize * self.height as usize) % 8;
        if used_bits != 0 {
            if let Some(last) = self.data.last_mut() {
                *last &= (1u8 << used_bits) - 1;
            }
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw packed bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Whether another raster has the same dimensions.
    pub fn same_size(&self, other: &Raster) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// `true` if the pixel is background.
    pub fn get(&self, x: u32, y: u32) -> bool {
        debug_assert!(x < self.width && y < self.height);
        let index = y as usize * self.width as usize + x as usize;
        (self.data[index / 8] >> (index % 8)) & 1 == 1
    }

    /// Set a pixel; `true` is background, `false` is ink.
    pub fn set(&mut self, x: u32, y: u32, background: bool) {
        debug_assert!(x < self.width && y < self.height);
        let index = y as usize * self.width as usize + x as usize;
        if background {
            self.data[index / 8] |= 1 << (index % 8);
        } else {
            self.data[index / 8] &= !(1 << (index % 8));
        }
    }

    pub fn is_ink(&self, x: u32, y: u32) -> bool {
        !self.get(x, y)
    }

    /// Number of ink pixels.
    pub fn ink_count(&self) -> usize {
        let total = self.width as usize * self.height as usize;
        let background: usize = self.data.iter().map(|b| b.count_ones() as usize).sum();
        total - background
    }

    /// Whether the raster holds no ink at all.
    pub fn is_blank(&self) -> bool {
        self.ink_count() == 0
    }

    /// Copy out a sub-rectangle.
    pub fn crop(&self, rect: Rect) -> RasterResult<Raster> {
        if rect.x + rect.width > self.width || rect.y + rect.height > self.height {
            return Err(RasterError::OutOfBounds {
                x: rect.x,
                y: rect.y,
                width: rect.width,
                height: rect.height,
                raster_width: self.width,
                raster_height: self.height,
            });
        }
        let mut out = Raster::blank(rect.width, rect.height);
        for y in 0..rect.height {
            for x in 0..rect.width {
                if self.is_ink(rect.x + x, rect.y + y) {
                    out.set(x, y, false);
                }
            }
        }
        Ok(out)
    }

    /// Overwrite the region at `(x, y)` with `src`, clipped to this raster.
    pub fn paste(&mut self, src: &Raster, x: u32, y: u32) {
        let w = src.width.min(self.width.saturating_sub(x));
        let h = src.height.min(self.height.saturating_sub(y));
        for sy in 0..h {
            for sx in 0..w {
                self.set(x + sx, y + sy, src.get(sx, sy));
            }
        }
    }

    /// Mirror left to right.
    pub fn flip_horizontal(&self) -> Raster {
        let mut out = Raster::blank(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                if self.is_ink(x, y) {
                    out.set(self.width - 1 - x, y, false);
                }
            }
        }
        out
    }

    /// Mirror top to bottom.
    pub fn flip_vertical(&self) -> Raster {
        let mut out = Raster::blank(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                if self.is_ink(x, y) {
                    out.set(x, self.height - 1 - y, false);
                }
            }
        }
        out
    }

    /// Threshold a grayscale image into a raster.
    pub fn from_luma(image: &GrayImage) -> Raster {
        let (width, height) = image.dimensions();
        let mut out = Raster::blank(width, height);
        for (x, y, pixel) in image.enumerate_pixels() {
            if pixel.0[0] < LUMA_THRESHOLD {
                out.set(x, y, false);
            }
        }
        out
    }

    /// Render as a black-and-white grayscale image.
    pub fn to_luma(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| {
            if self.get(x, y) {
                Luma([255])
            } else {
                Luma([0])
            }
        })
    }

    /// Load any image the `image` crate can decode and threshold it.
    pub fn open(path: &Path) -> RasterResult<Raster> {
        let image = image::open(path).map_err(|e| RasterError::Image {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Raster::from_luma(&image.to_luma8()))
    }

    /// Save as PNG (format chosen from the extension).
    pub fn save(&self, path: &Path) -> RasterResult<()> {
        self.to_luma().save(path).map_err(|e| RasterError::Image {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_has_no_ink_and_masked_tail() {
        let r = Raster::blank(3, 3);
        assert_eq!(r.data().len(), 2);
        assert_eq!(r.data()[1], 0b0000_0001);
        assert!(r.is_blank());
        assert_eq!(r.ink_count(), 0);
    }

    #[test]
    fn pixel_roundtrip() {
        let mut r = Raster::blank(10, 4);
        r.set(9, 3, false);
        assert!(r.is_ink(9, 3));
        assert_eq!(r.ink_count(), 1);
        r.set(9, 3, true);
        assert!(r.is_blank());
    }

    #[test]
    fn crop_and_paste() {
        let mut r = Raster::blank(8, 8);
        r.set(5, 6, false);
        let c = r.crop(Rect::new(4, 4, 4, 4)).unwrap();
        assert_eq!((c.width(), c.height()), (4, 4));
        assert!(c.is_ink(1, 2));
        assert_eq!(c.ink_count(), 1);

        let mut canvas = Raster::blank(8, 8);
        canvas.paste(&c, 4, 4);
        assert_eq!(canvas, r);
    }

    #[test]
    fn crop_out_of_bounds_is_error() {
        let r = Raster::blank(8, 8);
        let err = r.crop(Rect::new(6, 0, 4, 4)).unwrap_err();
        assert!(matches!(err, RasterError::OutOfBounds { .. }));
    }

    #[test]
    fn paste_clips_to_canvas() {
        let mut canvas = Raster::blank(4, 4);
        let mut ink = Raster::blank(4, 4);
        ink.set(0, 0, false);
        ink.set(3, 3, false);
        canvas.paste(&ink, 2, 2);
        assert!(canvas.is_ink(2, 2));
        assert_eq!(canvas.ink_count(), 1);
    }

    #[test]
    fn flips_mirror_pixels() {
        let mut r = Raster::blank(5, 3);
        r.set(0, 0, false);
        assert!(r.flip_horizontal().is_ink(4, 0));
        assert!(r.flip_vertical().is_ink(0, 2));
        assert_eq!(r.flip_horizontal().flip_horizontal(), r);
    }

    #[test]
    fn luma_conversion_thresholds() {
        let mut img = GrayImage::from_pixel(3, 2, Luma([255]));
        img.put_pixel(1, 1, Luma([10]));
        img.put_pixel(2, 0, Luma([200]));
        let r = Raster::from_luma(&img);
        assert_eq!(r.ink_count(), 1);
        assert!(r.is_ink(1, 1));

        let back = r.to_luma();
        assert_eq!(back.get_pixel(1, 1).0[0], 0);
        assert_eq!(back.get_pixel(2, 0).0[0], 255);
    }
}
