//! Drawable images
//!
//! An [`Image`] is a cheap handle to shared [`ImageData`]; cloning it shares
//! the backend, which lives as long as its longest holder.
//!
//! All draw calls end up in [`Image::draw_params`], which turns a resolved
//! [`DrawParams`] record into a quad: the image rectangle, scaled, rotated
//! clockwise by `angle` degrees around the relative pivot
//! `(center_x, center_y)`, with the pivot placed at `(x, y)`.

use std::fmt;
use std::path::Path;
use std::rc::Rc;

use nalgebra::{Rotation2, Vector2};

use super::bitmap::Bitmap;
use super::color::{AlphaMode, Color, ZPos};
use super::image_data::{EdgeFlags, ImageData};
use super::modifiers::{DrawModifier, DrawParams};
use super::queue::{Quad, Vertex};
use super::{Graphics, ImageResult};

/// A rectangular image that can be drawn onto a graphics context
#[derive(Clone)]
pub struct Image {
    data: Rc<dyn ImageData>,
}

impl Image {
    /// Load a PNG or BMP file
    ///
    /// BMP files get the `#ff00ff` color key applied. Use
    /// [`Image::from_bitmap`] for more control.
    pub fn from_file<P: AsRef<Path>>(graphics: &Graphics, path: P, edges: EdgeFlags) -> ImageResult<Self> {
        let bitmap = Bitmap::from_file(path)?;
        Self::from_bitmap(graphics, &bitmap, edges)
    }

    /// Load a region of a PNG or BMP file
    pub fn from_file_region<P: AsRef<Path>>(
        graphics: &Graphics,
        path: P,
        src_x: u32,
        src_y: u32,
        src_width: u32,
        src_height: u32,
        edges: EdgeFlags,
    ) -> ImageResult<Self> {
        let bitmap = Bitmap::from_file(path)?;
        Self::from_bitmap_region(graphics, &bitmap, src_x, src_y, src_width, src_height, edges)
    }

    /// Convert a whole bitmap into an image
    pub fn from_bitmap(graphics: &Graphics, source: &Bitmap, edges: EdgeFlags) -> ImageResult<Self> {
        Self::from_bitmap_region(graphics, source, 0, 0, source.width(), source.height(), edges)
    }

    /// Convert a region of a bitmap into an image
    pub fn from_bitmap_region(
        graphics: &Graphics,
        source: &Bitmap,
        src_x: u32,
        src_y: u32,
        src_width: u32,
        src_height: u32,
        edges: EdgeFlags,
    ) -> ImageResult<Self> {
        let data = graphics.create_image(source, src_x, src_y, src_width, src_height, edges)?;
        Ok(Self::from_data(data))
    }

    /// Wrap a caller-supplied backend
    pub fn from_data(data: Box<dyn ImageData>) -> Self {
        Self { data: Rc::from(data) }
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.data.width()
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.data.height()
    }

    /// The underlying backend
    pub fn data(&self) -> &dyn ImageData {
        self.data.as_ref()
    }

    /// Draw with the upper left corner at `(x, y)`
    pub fn draw(&self, x: f64, y: f64, z: ZPos, factor_x: f64, factor_y: f64, color: Color, mode: AlphaMode) {
        self.draw_params(&DrawParams {
            factor_x,
            factor_y,
            colors: [color; 4],
            mode,
            ..DrawParams::at(x, y, z)
        });
    }

    /// Like [`Image::draw`] with a modulation color per corner
    pub fn draw_mod(
        &self,
        x: f64,
        y: f64,
        z: ZPos,
        factor_x: f64,
        factor_y: f64,
        c1: Color,
        c2: Color,
        c3: Color,
        c4: Color,
        mode: AlphaMode,
    ) {
        self.draw_params(&DrawParams {
            factor_x,
            factor_y,
            colors: [c1, c2, c3, c4],
            mode,
            ..DrawParams::at(x, y, z)
        });
    }

    /// Draw rotated by `angle` degrees so that the rotation center is at `(x, y)`
    ///
    /// `center_x`/`center_y` give the rotation center relative to the image:
    /// 0 is the left/top border, 1 the right/bottom border, 0.5 the middle.
    pub fn draw_rot(
        &self,
        x: f64,
        y: f64,
        z: ZPos,
        angle: f64,
        center_x: f64,
        center_y: f64,
        factor_x: f64,
        factor_y: f64,
        color: Color,
        mode: AlphaMode,
    ) {
        self.draw_params(&DrawParams {
            factor_x,
            factor_y,
            angle,
            center_x,
            center_y,
            colors: [color; 4],
            mode,
            ..DrawParams::at(x, y, z)
        });
    }

    /// Draw at `(x, y, z)` with any combination of modifiers
    pub fn draw_with<I>(&self, x: f64, y: f64, z: ZPos, modifiers: I)
    where
        I: IntoIterator,
        I::Item: Into<DrawModifier>,
    {
        let params = DrawParams::resolve(x, y, z, modifiers, self.width(), self.height());
        self.draw_params(&params);
    }

    /// Draw at the origin with any combination of modifiers
    pub fn draw_modified<I>(&self, modifiers: I)
    where
        I: IntoIterator,
        I::Item: Into<DrawModifier>,
    {
        self.draw_with(0.0, 0.0, 0.0, modifiers);
    }

    /// Draw with fully resolved parameters
    pub fn draw_params(&self, params: &DrawParams) {
        let quad = self.quad_for(params);
        self.data.draw(&quad, params.z, params.mode);
    }

    /// Corners the image occupies when drawn with `params`
    pub fn quad_for(&self, params: &DrawParams) -> Quad {
        let size = Vector2::new(
            f64::from(self.width()) * params.factor_x,
            f64::from(self.height()) * params.factor_y,
        );
        let pivot = Vector2::new(size.x * params.center_x, size.y * params.center_y);
        let origin = Vector2::new(params.x, params.y);
        let rotation = Rotation2::new(params.angle.to_radians());

        let corner = |local: Vector2<f64>, color: Color| {
            let p = origin + rotation * (local - pivot);
            Vertex::new(p.x, p.y, color)
        };

        [
            corner(Vector2::new(0.0, 0.0), params.colors[0]),
            corner(Vector2::new(size.x, 0.0), params.colors[1]),
            corner(Vector2::new(0.0, size.y), params.colors[2]),
            corner(size, params.colors[3]),
        ]
    }
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}
