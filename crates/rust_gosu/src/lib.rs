//! # Rust Gosu
//!
//! A small 2D game library built around a fixed-tick window loop.
//!
//! ## Features
//!
//! - **Images**: load PNG/BMP files or bitmaps, split tile sheets, draw with
//!   position, scale, rotation, per-corner colors and blend modes
//! - **Draw Modifiers**: order-independent modifier lists through [`draw!`]
//! - **Window Loop**: fixed update interval, frame scopes that always close,
//!   hook failures that shut the window down cleanly
//! - **Input**: button transitions, mouse position and an optional text input
//! - **Flags**: type-safe bitmask wrapper for flag enums
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rust_gosu::prelude::*;
//!
//! struct MyGame {
//!     player: Image,
//! }
//!
//! impl Game for MyGame {
//!     fn update(&mut self, window: &mut Window) -> GameResult<()> {
//!         if window.input().is_down(Button::Escape) {
//!             window.close();
//!         }
//!         Ok(())
//!     }
//!
//!     fn draw(&mut self, _window: &mut Window) -> GameResult<()> {
//!         draw!(self.player, PositionOfCenter(320.0, 240.0), Rotate(45.0));
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut window = Window::new(&WindowConfig::new(640, 480).with_caption("Demo"))?;
//!     let player = Image::from_file(window.graphics(), "player.png", ImageFlags::smooth())?;
//!     window.show(&mut MyGame { player })?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod core;
pub mod foundation;
pub mod graphics;
pub mod input;
pub mod window;

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        core::{Config, WindowConfig},
        draw,
        foundation::flags::{FlagEnum, FlagWrapper},
        graphics::{
            AlphaMode, Bitmap, Color, ColorSet, DrawModifier, EdgeFlags, Graphics, Image, ImageError, ImageFlags,
            Position, PositionOfCenter, Rotate, Scale, ScaleAbsolute, ZPos, ZPosSet,
        },
        input::{Button, Input, Modifiers, TextInput},
        window::{Game, GameError, GameResult, Window, WindowError},
    };
}
