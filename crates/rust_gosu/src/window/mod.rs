//! Window and the fixed-tick game loop
//!
//! A [`Window`] owns the platform backend, the graphics context and the
//! input state. [`Window::show`] runs the loop: whenever the update interval
//! has elapsed it pumps events, calls the [`Game`] hooks and presents a
//! frame; otherwise it sleeps briefly. [`Window::close`] is the only way to
//! stop it and may be called from inside any hook.

pub mod backend;
pub mod glfw_backend;

#[cfg(test)]
mod loop_tests;

pub use backend::WindowBackend;
pub use glfw_backend::GlfwBackend;

use thiserror::Error;

use crate::config::ConfigError;
use crate::core::WindowConfig;
use crate::foundation::time::{Clock, SystemClock};
use crate::graphics::{Color, Graphics, GraphicsError, HeadlessRenderer, ImageError, Renderer};
use crate::input::{Button, ButtonEvent, Input};

/// Milliseconds the loop sleeps when the next tick is not imminent
const IDLE_SLEEP_MS: u32 = 5;

/// Errors raised by user hooks
#[derive(Error, Debug)]
pub enum GameError {
    /// Free-form failure
    #[error("{0}")]
    Custom(String),

    /// Image loading or creation failed
    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    /// Graphics operation failed
    #[error("Graphics error: {0}")]
    Graphics(#[from] GraphicsError),
}

/// Result type for user hooks
pub type GameResult<T> = Result<T, GameError>;

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// The windowing library could not be initialized
    #[error("GLFW initialization failed")]
    InitializationFailed,

    /// The native window could not be created
    #[error("Window creation failed")]
    CreationFailed,

    /// Invalid configuration
    #[error("Invalid window configuration: {0}")]
    Config(#[from] ConfigError),

    /// Other platform failure
    #[error("Platform error: {0}")]
    Platform(String),

    /// A hook failed; the window has been closed
    #[error("Game hook failed: {0}")]
    Hook(#[from] GameError),

    /// The frame could not be rendered
    #[error("Graphics error: {0}")]
    Graphics(#[from] GraphicsError),
}

/// Result type for window operations
pub type WindowResult<T> = Result<T, WindowError>;

/// Lifecycle of a window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    /// Constructed, loop not started
    Created,
    /// Inside [`Window::show`]
    Running,
    /// Closed; terminal
    Closed,
}

/// User hooks called by the tick loop
///
/// Every hook receives the window, so it can draw, read input or close it.
pub trait Game {
    /// Advance the game by one tick
    fn update(&mut self, window: &mut Window) -> GameResult<()>;

    /// Draw the current state; called inside a frame
    fn draw(&mut self, window: &mut Window) -> GameResult<()>;

    /// Whether [`Game::draw`] should be called this tick
    fn needs_redraw(&self) -> bool {
        true
    }

    /// Whether the system cursor is visible over the window
    fn needs_cursor(&self) -> bool {
        false
    }

    /// Called once per press, before [`Game::update`]
    fn button_down(&mut self, _window: &mut Window, _button: Button) -> GameResult<()> {
        Ok(())
    }

    /// Called once per release, before [`Game::update`]
    fn button_up(&mut self, _window: &mut Window, _button: Button) -> GameResult<()> {
        Ok(())
    }

    /// Called when the user asks to close the window
    fn close_requested(&mut self, window: &mut Window) {
        window.close();
    }
}

/// Game window with a fixed-interval update loop
pub struct Window {
    backend: Box<dyn WindowBackend>,
    clock: Box<dyn Clock>,
    graphics: Graphics,
    input: Input,
    caption: String,
    update_interval: f64,
    clear_color: Color,
    state: WindowState,
}

impl Window {
    /// Create a GLFW window
    pub fn new(config: &WindowConfig) -> WindowResult<Self> {
        config.validate()?;
        let backend = GlfwBackend::new(config)?;
        Self::with_backend(
            config,
            Box::new(backend),
            Box::new(SystemClock::new()),
            Box::new(HeadlessRenderer::new()),
        )
    }

    /// Create a window on top of explicit collaborators
    pub fn with_backend(
        config: &WindowConfig,
        mut backend: Box<dyn WindowBackend>,
        clock: Box<dyn Clock>,
        renderer: Box<dyn Renderer>,
    ) -> WindowResult<Self> {
        config.validate()?;
        backend.set_caption(&config.caption);

        log::info!(
            "Window '{}' {}x{}, update interval {:.3} ms",
            config.caption,
            config.width,
            config.height,
            config.update_interval
        );

        Ok(Self {
            backend,
            clock,
            graphics: Graphics::new(config.width, config.height, config.fullscreen, renderer),
            input: Input::new(),
            caption: config.caption.clone(),
            update_interval: config.update_interval,
            clear_color: Color::BLACK,
            state: WindowState::Created,
        })
    }

    /// Run the loop until the window is closed
    ///
    /// A hook error closes the window and is returned as [`WindowError::Hook`].
    pub fn show<G: Game + ?Sized>(&mut self, game: &mut G) -> WindowResult<()> {
        if self.state == WindowState::Closed {
            log::warn!("show() called on a closed window");
            return Ok(());
        }

        self.state = WindowState::Running;
        self.backend.show();
        log::info!("Window '{}' shown", self.caption);

        let mut last_tick = self.clock.milliseconds();
        while self.state != WindowState::Closed {
            let now = self.clock.milliseconds();
            let elapsed = now.wrapping_sub(last_tick);

            if now < last_tick || f64::from(elapsed) >= self.update_interval {
                last_tick = now;
                if let Err(err) = self.tick(game) {
                    log::error!("Closing window after failed tick: {}", err);
                    self.close();
                    return Err(err);
                }
            } else if self.update_interval - f64::from(elapsed) > f64::from(IDLE_SLEEP_MS) {
                self.clock.sleep(IDLE_SLEEP_MS);
            } else {
                std::hint::spin_loop();
            }
        }
        Ok(())
    }

    fn tick<G: Game + ?Sized>(&mut self, game: &mut G) -> WindowResult<()> {
        for event in self.backend.poll_events() {
            self.input.feed(event);
        }
        let events = self.input.update();

        if self.input.take_close_request() {
            game.close_requested(self);
        }
        for event in events {
            if self.is_closed() {
                return Ok(());
            }
            match event {
                ButtonEvent::Down(button) => game.button_down(self, button)?,
                ButtonEvent::Up(button) => game.button_up(self, button)?,
            }
        }
        if self.is_closed() {
            return Ok(());
        }

        if self.backend.cursor_inside() {
            self.backend.set_cursor_visible(game.needs_cursor());
        }

        game.update(self)?;
        if self.is_closed() || !game.needs_redraw() {
            return Ok(());
        }

        if self.graphics.begin(self.clear_color)? {
            let drawn = game.draw(self);
            // The frame is always closed, even when drawing failed
            let ended = self.graphics.end();
            drawn?;
            ended?;
            self.backend.swap_buffers();
        }
        Ok(())
    }

    /// Stop the loop and release the native window
    ///
    /// Safe to call repeatedly and from inside hooks; the loop exits after
    /// the current iteration.
    pub fn close(&mut self) {
        if self.state == WindowState::Closed {
            return;
        }
        self.backend.hide();
        self.state = WindowState::Closed;
        self.backend.terminate();
        log::info!("Window '{}' closed", self.caption);
    }

    /// Lifecycle state
    pub fn state(&self) -> WindowState {
        self.state
    }

    /// Whether [`Window::close`] has been called
    pub fn is_closed(&self) -> bool {
        self.state == WindowState::Closed
    }

    /// Title bar text
    pub fn caption(&self) -> &str {
        &self.caption
    }

    /// Change the title bar text
    pub fn set_caption(&mut self, caption: impl Into<String>) {
        self.caption = caption.into();
        self.backend.set_caption(&self.caption);
    }

    /// Milliseconds between ticks
    pub fn update_interval(&self) -> f64 {
        self.update_interval
    }

    /// Color the frame is cleared to before [`Game::draw`]
    pub fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }

    /// Client width in pixels
    pub fn width(&self) -> u32 {
        self.graphics.width()
    }

    /// Client height in pixels
    pub fn height(&self) -> u32 {
        self.graphics.height()
    }

    /// Width of the primary screen
    pub fn screen_width(&self) -> u32 {
        self.backend.screen_size().0
    }

    /// Height of the primary screen
    pub fn screen_height(&self) -> u32 {
        self.backend.screen_size().1
    }

    /// Move the window on screen
    pub fn set_position(&mut self, x: i32, y: i32) {
        self.backend.set_position(x, y);
    }

    /// Graphics context
    pub fn graphics(&self) -> &Graphics {
        &self.graphics
    }

    /// Graphics context, mutably
    pub fn graphics_mut(&mut self) -> &mut Graphics {
        &mut self.graphics
    }

    /// Input state
    pub fn input(&self) -> &Input {
        &self.input
    }

    /// Input state, mutably
    pub fn input_mut(&mut self) -> &mut Input {
        &mut self.input
    }

    /// Platform backend
    pub fn backend(&self) -> &dyn WindowBackend {
        self.backend.as_ref()
    }
}
