//! Platform window abstraction
//!
//! [`Window`](super::Window) drives the tick loop and talks to the platform
//! only through this trait. [`GlfwBackend`](super::GlfwBackend) is the
//! production implementation; tests script their own.

use crate::input::PlatformEvent;

/// Platform window operations used by the tick loop
pub trait WindowBackend {
    /// Pump native messages and return the ones relevant to input
    fn poll_events(&mut self) -> Vec<PlatformEvent>;

    /// Make the window visible
    fn show(&mut self);

    /// Hide the window; harmless when already hidden or terminated
    fn hide(&mut self);

    /// Set the title bar text
    fn set_caption(&mut self, caption: &str);

    /// Present the rendered frame
    fn swap_buffers(&mut self);

    /// Move the window's top-left corner to screen coordinates
    fn set_position(&mut self, x: i32, y: i32);

    /// Size of the primary screen in pixels
    fn screen_size(&self) -> (u32, u32);

    /// Whether the cursor is over the client area
    fn cursor_inside(&self) -> bool;

    /// Show or hide the system cursor over the window
    fn set_cursor_visible(&mut self, visible: bool);

    /// Release the native window; calling it again does nothing
    fn terminate(&mut self);

    /// Get access to the concrete type for downcasting
    fn as_any(&self) -> &dyn std::any::Any;

    /// Get mutable access to the concrete type for downcasting
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}
