//! Graphics context, images and draw modifiers
//!
//! [`Graphics`] owns the draw queue of the current frame and the renderer
//! that consumes it. Images created through a graphics context push their
//! quads into that queue; nothing reaches the renderer until [`Graphics::end`].

pub mod bitmap;
pub mod color;
pub mod image;
pub mod image_data;
pub mod modifiers;
pub mod queue;
pub mod renderer;
pub mod tiles;

pub use bitmap::Bitmap;
pub use color::{AlphaMode, Color, ZPos};
pub use image::Image;
pub use image_data::{BitmapImageData, EdgeFlags, ImageData, ImageFlags};
pub use modifiers::{
    ColorSet, DrawModifier, DrawParams, Position, PositionOfCenter, Rotate, Scale, ScaleAbsolute, ZPosSet,
};
pub use queue::{DrawOp, DrawQueue, Primitive, Quad, SharedQueue, Vertex};
pub use renderer::{HeadlessRenderer, Renderer};
pub use tiles::{images_from_tiled_bitmap, images_from_tiled_file, load_tiles, load_tiles_from_file};

use std::rc::Rc;
use thiserror::Error;

/// Graphics context errors
#[derive(Error, Debug)]
pub enum GraphicsError {
    /// `begin` called while a frame is already open
    #[error("A frame is already in progress")]
    AlreadyInFrame,

    /// `end` called without a matching `begin`
    #[error("No frame in progress")]
    NotInFrame,

    /// The renderer failed
    #[error("Renderer error: {0}")]
    Renderer(String),
}

/// Result type for graphics operations
pub type GraphicsResult<T> = Result<T, GraphicsError>;

/// Image creation errors
#[derive(Error, Debug)]
pub enum ImageError {
    /// The file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The data could not be decoded
    #[error("Failed to decode image: {0}")]
    Decode(String),

    /// The requested region is not inside the source bitmap
    #[error("Region {width}x{height} at ({x}, {y}) exceeds source of {source_width}x{source_height}")]
    InvalidRegion {
        /// Left edge of the region
        x: u32,
        /// Top edge of the region
        y: u32,
        /// Region width
        width: u32,
        /// Region height
        height: u32,
        /// Width of the source bitmap
        source_width: u32,
        /// Height of the source bitmap
        source_height: u32,
    },

    /// Tile sizes of zero, or more tiles than pixels
    #[error("Invalid tile size {tile_width}x{tile_height}")]
    InvalidTileSize {
        /// Requested tile width
        tile_width: i32,
        /// Requested tile height
        tile_height: i32,
    },
}

/// Result type for image operations
pub type ImageResult<T> = Result<T, ImageError>;

/// Drawing context of a window
pub struct Graphics {
    width: u32,
    height: u32,
    virtual_width: u32,
    virtual_height: u32,
    fullscreen: bool,
    queue: SharedQueue,
    renderer: Box<dyn Renderer>,
    in_frame: bool,
}

impl Graphics {
    /// Create a context for a `width`x`height` target
    pub fn new(width: u32, height: u32, fullscreen: bool, renderer: Box<dyn Renderer>) -> Self {
        Self {
            width,
            height,
            virtual_width: width,
            virtual_height: height,
            fullscreen,
            queue: DrawQueue::shared(),
            renderer,
            in_frame: false,
        }
    }

    /// Physical width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Physical height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the target is fullscreen
    pub fn fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Set the virtual coordinate system that draw calls use
    ///
    /// Coordinates are scaled from the virtual to the physical size when the
    /// frame is flushed.
    pub fn set_resolution(&mut self, virtual_width: u32, virtual_height: u32) {
        self.virtual_width = virtual_width.max(1);
        self.virtual_height = virtual_height.max(1);
    }

    /// Virtual resolution set with [`Graphics::set_resolution`]
    pub fn resolution(&self) -> (u32, u32) {
        (self.virtual_width, self.virtual_height)
    }

    /// Whether a frame is open
    pub fn in_frame(&self) -> bool {
        self.in_frame
    }

    /// The renderer
    pub fn renderer(&self) -> &dyn Renderer {
        self.renderer.as_ref()
    }

    /// The renderer, mutably
    pub fn renderer_mut(&mut self) -> &mut dyn Renderer {
        self.renderer.as_mut()
    }

    /// Open a frame
    ///
    /// Returns `Ok(false)` if the renderer cannot draw right now; in that
    /// case no frame is opened and `end` must not be called.
    pub fn begin(&mut self, clear_color: Color) -> GraphicsResult<bool> {
        if self.in_frame {
            return Err(GraphicsError::AlreadyInFrame);
        }
        if !self.renderer.can_draw() {
            return Ok(false);
        }

        self.renderer.clear(clear_color);
        self.queue.borrow_mut().open();
        self.in_frame = true;
        Ok(true)
    }

    /// Close the frame and render everything queued, ordered by depth
    pub fn end(&mut self) -> GraphicsResult<()> {
        if !self.in_frame {
            return Err(GraphicsError::NotInFrame);
        }
        self.in_frame = false;

        let mut ops = self.queue.borrow_mut().close();
        self.scale_to_physical(&mut ops);
        self.renderer.render(&ops)
    }

    /// Draw a line with a color per end
    pub fn draw_line(&self, a: Vertex, b: Vertex, z: ZPos, mode: AlphaMode) {
        self.push_untextured(Primitive::Line, [a, b, b, b], z, mode);
    }

    /// Draw a filled triangle
    pub fn draw_triangle(&self, a: Vertex, b: Vertex, c: Vertex, z: ZPos, mode: AlphaMode) {
        self.push_untextured(Primitive::Triangle, [a, b, c, c], z, mode);
    }

    /// Draw a filled quad; corners are top-left, top-right, bottom-left, bottom-right
    pub fn draw_quad(&self, corners: Quad, z: ZPos, mode: AlphaMode) {
        self.push_untextured(Primitive::Quad, corners, z, mode);
    }

    /// Create the backend for an image from a region of `source`
    pub fn create_image(
        &self,
        source: &Bitmap,
        src_x: u32,
        src_y: u32,
        src_width: u32,
        src_height: u32,
        edges: EdgeFlags,
    ) -> ImageResult<Box<dyn ImageData>> {
        let pixels = source.sub_bitmap(src_x, src_y, src_width, src_height)?;
        Ok(Box::new(BitmapImageData::new(pixels, edges, Rc::clone(&self.queue))))
    }

    fn push_untextured(&self, primitive: Primitive, vertices: Quad, z: ZPos, mode: AlphaMode) {
        self.queue.borrow_mut().push(DrawOp {
            primitive,
            vertices,
            texture: None,
            z,
            mode,
        });
    }

    fn scale_to_physical(&self, ops: &mut [DrawOp]) {
        if (self.virtual_width, self.virtual_height) == (self.width, self.height) {
            return;
        }
        let sx = f64::from(self.width) / f64::from(self.virtual_width);
        let sy = f64::from(self.height) / f64::from(self.virtual_height);
        for vertex in ops.iter_mut().flat_map(|op| op.vertices.iter_mut()) {
            vertex.x *= sx;
            vertex.y *= sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headless(graphics: &Graphics) -> &HeadlessRenderer {
        graphics
            .renderer()
            .as_any()
            .downcast_ref::<HeadlessRenderer>()
            .unwrap()
    }

    #[test]
    fn test_frame_protocol() {
        let mut graphics = Graphics::new(100, 100, false, Box::new(HeadlessRenderer::new()));
        assert!(matches!(graphics.end(), Err(GraphicsError::NotInFrame)));

        assert!(graphics.begin(Color::BLACK).unwrap());
        assert!(graphics.in_frame());
        assert!(matches!(graphics.begin(Color::BLACK), Err(GraphicsError::AlreadyInFrame)));

        graphics.end().unwrap();
        assert!(!graphics.in_frame());
        assert_eq!(headless(&graphics).frame_count(), 1);
        assert_eq!(headless(&graphics).clear_color(), Color::BLACK);
    }

    #[test]
    fn test_paused_renderer_skips_frame() {
        let mut graphics = Graphics::new(100, 100, false, Box::new(HeadlessRenderer::new()));
        graphics
            .renderer_mut()
            .as_any_mut()
            .downcast_mut::<HeadlessRenderer>()
            .unwrap()
            .set_paused(true);

        assert!(!graphics.begin(Color::BLACK).unwrap());
        assert!(!graphics.in_frame());
    }

    #[test]
    fn test_images_and_primitives_flush_in_depth_order() {
        let mut graphics = Graphics::new(100, 100, false, Box::new(HeadlessRenderer::new()));
        let image = Image::from_bitmap(&graphics, &Bitmap::new(4, 4, Color::RED), ImageFlags::smooth()).unwrap();

        graphics.begin(Color::BLACK).unwrap();
        image.draw(0.0, 0.0, 3.0, 1.0, 1.0, Color::WHITE, AlphaMode::Default);
        let v = Vertex::new(1.0, 1.0, Color::GREEN);
        graphics.draw_line(v, v, 1.0, AlphaMode::Default);
        graphics.draw_triangle(v, v, v, 2.0, AlphaMode::Additive);
        graphics.end().unwrap();

        let frame = headless(&graphics).last_frame();
        let kinds: Vec<Primitive> = frame.iter().map(|op| op.primitive).collect();
        assert_eq!(kinds, vec![Primitive::Line, Primitive::Triangle, Primitive::Quad]);
        assert!(frame[2].texture.is_some());
    }

    #[test]
    fn test_virtual_resolution_scales_vertices() {
        let mut graphics = Graphics::new(200, 100, false, Box::new(HeadlessRenderer::new()));
        graphics.set_resolution(100, 100);
        assert_eq!(graphics.resolution(), (100, 100));

        graphics.begin(Color::BLACK).unwrap();
        let v = Vertex::new(10.0, 10.0, Color::WHITE);
        graphics.draw_quad([v; 4], 0.0, AlphaMode::Default);
        graphics.end().unwrap();

        let op = &headless(&graphics).last_frame()[0];
        assert_eq!((op.vertices[0].x, op.vertices[0].y), (20.0, 10.0));
    }

    #[test]
    fn test_create_image_rejects_bad_region() {
        let graphics = Graphics::new(10, 10, false, Box::new(HeadlessRenderer::new()));
        let source = Bitmap::new(4, 4, Color::WHITE);
        assert!(graphics.create_image(&source, 2, 2, 3, 1, ImageFlags::smooth()).is_err());
        let data = graphics.create_image(&source, 1, 1, 3, 3, ImageFlags::smooth()).unwrap();
        assert_eq!((data.width(), data.height()), (3, 3));
    }
}
