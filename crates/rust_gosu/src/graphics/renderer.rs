//! Renderer abstraction
//!
//! The renderer receives the depth-sorted operations of a frame. GPU
//! rendering lives outside this crate; [`HeadlessRenderer`] keeps the last
//! frame in memory, which is what the tests and headless tools use.

use super::color::Color;
use super::queue::DrawOp;
use super::GraphicsResult;

/// Consumer of finished frames
pub trait Renderer {
    /// Whether drawing is currently possible (false e.g. while minimized)
    fn can_draw(&self) -> bool {
        true
    }

    /// Start a frame by clearing the target
    fn clear(&mut self, color: Color);

    /// Render one frame of depth-sorted operations
    fn render(&mut self, ops: &[DrawOp]) -> GraphicsResult<()>;

    /// Get access to the concrete type for downcasting
    fn as_any(&self) -> &dyn std::any::Any;

    /// Get mutable access to the concrete type for downcasting
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}

/// Renderer that records frames instead of drawing them
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    last_frame: Vec<DrawOp>,
    clear_color: Color,
    frames: u64,
    paused: bool,
}

impl HeadlessRenderer {
    /// Create a renderer with no recorded frames
    pub fn new() -> Self {
        Self::default()
    }

    /// Operations of the most recent frame
    pub fn last_frame(&self) -> &[DrawOp] {
        &self.last_frame
    }

    /// Clear color of the most recent frame
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    /// Number of rendered frames
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Simulate a target that cannot be drawn to
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }
}

impl Renderer for HeadlessRenderer {
    fn can_draw(&self) -> bool {
        !self.paused
    }

    fn clear(&mut self, color: Color) {
        self.clear_color = color;
    }

    fn render(&mut self, ops: &[DrawOp]) -> GraphicsResult<()> {
        self.frames += 1;
        self.last_frame = ops.to_vec();
        log::trace!("Frame {}: {} draw operations", self.frames, ops.len());
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
