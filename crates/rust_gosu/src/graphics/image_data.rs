//! Backend capability behind an [`Image`](super::Image)
//!
//! An image only needs two things from its backend: its size and a way to
//! draw a quad. [`BitmapImageData`] is the implementation created by
//! [`Graphics`](super::Graphics); callers can supply their own through
//! [`Image::from_data`](super::Image::from_data).

use std::rc::Rc;

use crate::flag_enum;
use crate::foundation::flags::FlagWrapper;

use super::bitmap::Bitmap;
use super::color::{AlphaMode, ZPos};
use super::queue::{DrawOp, Primitive, Quad, SharedQueue, Texture};

/// Image edges that wrap around instead of fading to transparent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ImageFlags {
    /// Left edge is tileable
    TileableLeft = 1 << 0,
    /// Top edge is tileable
    TileableTop = 1 << 1,
    /// Right edge is tileable
    TileableRight = 1 << 2,
    /// Bottom edge is tileable
    TileableBottom = 1 << 3,
}
flag_enum!(ImageFlags: u8);

/// Set of [`ImageFlags`]
pub type EdgeFlags = FlagWrapper<ImageFlags>;

impl ImageFlags {
    /// All four edges tileable
    pub fn tileable() -> EdgeFlags {
        Self::TileableLeft | Self::TileableTop | Self::TileableRight | Self::TileableBottom
    }

    /// No tileable edges (smooth borders)
    pub fn smooth() -> EdgeFlags {
        EdgeFlags::new()
    }
}

/// Drawable image backend
pub trait ImageData {
    /// Width in pixels
    fn width(&self) -> u32;

    /// Height in pixels
    fn height(&self) -> u32;

    /// Draw the image stretched onto `quad`
    fn draw(&self, quad: &Quad, z: ZPos, mode: AlphaMode);

    /// Copy of the pixels
    fn to_bitmap(&self) -> Bitmap;
}

/// Image backend that queues textured quads on a graphics context
pub struct BitmapImageData {
    bitmap: Rc<Bitmap>,
    edges: EdgeFlags,
    queue: SharedQueue,
}

impl BitmapImageData {
    /// Create a backend drawing `bitmap` into `queue`
    pub fn new(bitmap: Bitmap, edges: EdgeFlags, queue: SharedQueue) -> Self {
        Self {
            bitmap: Rc::new(bitmap),
            edges,
            queue,
        }
    }

    /// Tileable edges of this image
    pub fn edges(&self) -> EdgeFlags {
        self.edges
    }
}

impl ImageData for BitmapImageData {
    fn width(&self) -> u32 {
        self.bitmap.width()
    }

    fn height(&self) -> u32 {
        self.bitmap.height()
    }

    fn draw(&self, quad: &Quad, z: ZPos, mode: AlphaMode) {
        self.queue.borrow_mut().push(DrawOp {
            primitive: Primitive::Quad,
            vertices: *quad,
            texture: Some(Texture {
                bitmap: Rc::clone(&self.bitmap),
                edges: self.edges,
            }),
            z,
            mode,
        });
    }

    fn to_bitmap(&self) -> Bitmap {
        (*self.bitmap).clone()
    }
}
