//! In-memory RGBA bitmaps and file decoding
//!
//! Decoding is delegated to the `image` crate. PNG and BMP are supported;
//! BMP files have no alpha channel in practice, so the magenta color key is
//! applied to them automatically.

use std::path::Path;

use super::color::Color;
use super::{ImageError, ImageResult};

/// Rectangular grid of pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Bitmap {
    /// Create a bitmap filled with one color
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
        }
    }

    /// Wrap existing pixels stored row by row
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Color>) -> ImageResult<Self> {
        if pixels.len() != width as usize * height as usize {
            return Err(ImageError::Decode(format!(
                "{} pixels do not fill a {}x{} bitmap",
                pixels.len(),
                width,
                height
            )));
        }
        Ok(Self { width, height, pixels })
    }

    /// Decode a PNG or BMP file
    pub fn from_file<P: AsRef<Path>>(path: P) -> ImageResult<Self> {
        let path = path.as_ref();
        log::debug!("Loading bitmap from: {:?}", path);

        let bytes = std::fs::read(path)?;
        let bitmap = Self::from_bytes(&bytes)?;

        log::info!("Loaded bitmap {}x{} from {:?}", bitmap.width, bitmap.height, path);
        Ok(bitmap)
    }

    /// Decode an encoded image held in memory
    pub fn from_bytes(bytes: &[u8]) -> ImageResult<Self> {
        let format = image::guess_format(bytes).map_err(|e| ImageError::Decode(e.to_string()))?;
        let img = image::load_from_memory_with_format(bytes, format)
            .map_err(|e| ImageError::Decode(e.to_string()))?;

        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        let pixels = rgba.pixels().map(|px| Color::from_rgba_bytes(px.0)).collect();

        let mut bitmap = Self { width, height, pixels };
        if format == image::ImageFormat::Bmp {
            bitmap.apply_color_key(Color::FUCHSIA);
        }
        Ok(bitmap)
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// All pixels, row by row
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Pixel at `(x, y)`, `None` outside the bitmap
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Overwrite the pixel at `(x, y)`; out-of-range writes are ignored
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Copy of the `width`x`height` region whose top-left corner is `(x, y)`
    pub fn sub_bitmap(&self, x: u32, y: u32, width: u32, height: u32) -> ImageResult<Self> {
        let fits = x.checked_add(width).is_some_and(|right| right <= self.width)
            && y.checked_add(height).is_some_and(|bottom| bottom <= self.height);
        if !fits {
            return Err(ImageError::InvalidRegion {
                x,
                y,
                width,
                height,
                source_width: self.width,
                source_height: self.height,
            });
        }

        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for row in y..y + height {
            let start = row as usize * self.width as usize + x as usize;
            pixels.extend_from_slice(&self.pixels[start..start + width as usize]);
        }
        Ok(Self { width, height, pixels })
    }

    /// Make every pixel of `key` fully transparent
    pub fn apply_color_key(&mut self, key: Color) {
        for px in self.pixels.iter_mut().filter(|px| **px == key) {
            *px = Color::NONE;
        }
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }
}
