//! Per-frame draw operation queue
//!
//! Images and primitives do not render immediately. They push a [`DrawOp`]
//! into the queue shared with [`Graphics`](super::Graphics), which sorts the
//! queue by depth and hands it to the renderer when the frame ends.

use std::cell::RefCell;
use std::rc::Rc;

use super::bitmap::Bitmap;
use super::color::{AlphaMode, Color, ZPos};
use super::image_data::EdgeFlags;

/// A positioned, colored corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Horizontal position
    pub x: f64,
    /// Vertical position
    pub y: f64,
    /// Modulation color
    pub color: Color,
}

impl Vertex {
    /// Create a vertex
    pub const fn new(x: f64, y: f64, color: Color) -> Self {
        Self { x, y, color }
    }
}

/// Four corners: top-left, top-right, bottom-left, bottom-right
///
/// "Top-left" refers to the corner of the source image; after rotation it
/// may be anywhere on screen.
pub type Quad = [Vertex; 4];

/// Texture reference carried by textured operations
#[derive(Debug, Clone)]
pub struct Texture {
    /// Source pixels
    pub bitmap: Rc<Bitmap>,
    /// Edges that wrap instead of fading out
    pub edges: EdgeFlags,
}

/// Shape of a draw operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// Uses the first two vertices
    Line,
    /// Uses the first three vertices
    Triangle,
    /// Uses all four vertices
    Quad,
}

/// One queued draw call
#[derive(Debug, Clone)]
pub struct DrawOp {
    /// Shape to draw
    pub primitive: Primitive,
    /// Corner data; unused trailing vertices are ignored
    pub vertices: Quad,
    /// Texture for image quads
    pub texture: Option<Texture>,
    /// Depth
    pub z: ZPos,
    /// Blend mode
    pub mode: AlphaMode,
}

impl DrawOp {
    /// The vertices that belong to the primitive
    pub fn used_vertices(&self) -> &[Vertex] {
        let count = match self.primitive {
            Primitive::Line => 2,
            Primitive::Triangle => 3,
            Primitive::Quad => 4,
        };
        &self.vertices[..count]
    }
}

/// Queue shared between a graphics context and the images it created
pub type SharedQueue = Rc<RefCell<DrawQueue>>;

/// Collects the draw operations of one frame
#[derive(Debug, Default)]
pub struct DrawQueue {
    ops: Vec<DrawOp>,
    open: bool,
    rejected: usize,
}

impl DrawQueue {
    /// New, closed queue
    pub fn new() -> Self {
        Self::default()
    }

    /// New queue wrapped for sharing
    pub fn shared() -> SharedQueue {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Start accepting operations for a frame
    pub fn open(&mut self) {
        self.ops.clear();
        self.rejected = 0;
        self.open = true;
    }

    /// Whether a frame is being recorded
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Queue an operation; ignored while no frame is open
    pub fn push(&mut self, op: DrawOp) {
        if self.open {
            self.ops.push(op);
        } else {
            if self.rejected == 0 {
                log::warn!("Draw call outside of a frame ignored");
            }
            self.rejected += 1;
        }
    }

    /// Number of queued operations
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether nothing is queued
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Close the frame and return its operations ordered by depth
    ///
    /// The sort is stable: operations with equal `z` keep submission order.
    pub fn close(&mut self) -> Vec<DrawOp> {
        self.open = false;
        let mut ops = std::mem::take(&mut self.ops);
        ops.sort_by(|a, b| a.z.total_cmp(&b.z));
        ops
    }
}
