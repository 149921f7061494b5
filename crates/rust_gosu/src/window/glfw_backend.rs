//! GLFW window backend

use glfw::Context;

use crate::core::WindowConfig;
use crate::input::{Button, Modifiers, PlatformEvent};

use super::backend::WindowBackend;
use super::{WindowError, WindowResult};

/// Non-resizable GLFW window with an OpenGL context
pub struct GlfwBackend {
    glfw: glfw::Glfw,
    window: Option<glfw::PWindow>,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
    screen: (u32, u32),
}

impl GlfwBackend {
    /// Create the window described by `config`, hidden until [`WindowBackend::show`]
    pub fn new(config: &WindowConfig) -> WindowResult<Self> {
        let mut glfw = glfw::init(glfw::fail_on_errors).map_err(|_| WindowError::InitializationFailed)?;

        glfw.window_hint(glfw::WindowHint::Resizable(false));
        glfw.window_hint(glfw::WindowHint::Visible(false));

        let screen = glfw.with_primary_monitor(|_, monitor| {
            monitor
                .and_then(|m| m.get_video_mode())
                .map_or((config.width, config.height), |mode| (mode.width, mode.height))
        });

        let (mut window, events) = glfw
            .with_primary_monitor(|glfw, monitor| {
                let mode = match monitor {
                    Some(monitor) if config.fullscreen => glfw::WindowMode::FullScreen(monitor),
                    _ => glfw::WindowMode::Windowed,
                };
                glfw.create_window(config.width, config.height, &config.caption, mode)
            })
            .ok_or(WindowError::CreationFailed)?;

        window.make_current();
        glfw.set_swap_interval(if config.vsync {
            glfw::SwapInterval::Sync(1)
        } else {
            glfw::SwapInterval::None
        });

        window.set_key_polling(true);
        window.set_char_polling(true);
        window.set_mouse_button_polling(true);
        window.set_cursor_pos_polling(true);
        window.set_close_polling(true);
        window.set_focus_polling(true);

        if !config.fullscreen {
            let x = (i64::from(screen.0) - i64::from(config.width)) / 2;
            let y = (i64::from(screen.1) - i64::from(config.height)) / 2;
            window.set_pos(x.max(0) as i32, y.max(0) as i32);
        }

        log::info!(
            "Created GLFW window {}x{} (fullscreen: {}, screen {}x{})",
            config.width,
            config.height,
            config.fullscreen,
            screen.0,
            screen.1
        );

        Ok(Self {
            glfw,
            window: Some(window),
            events,
            screen,
        })
    }

    /// Whether the native window still exists
    pub fn is_alive(&self) -> bool {
        self.window.is_some()
    }
}

impl WindowBackend for GlfwBackend {
    fn poll_events(&mut self) -> Vec<PlatformEvent> {
        if self.window.is_none() {
            return Vec::new();
        }
        self.glfw.poll_events();
        glfw::flush_messages(&self.events)
            .filter_map(|(_, event)| translate_event(event))
            .collect()
    }

    fn show(&mut self) {
        if let Some(window) = self.window.as_mut() {
            window.show();
        }
    }

    fn hide(&mut self) {
        if let Some(window) = self.window.as_mut() {
            window.hide();
        }
    }

    fn set_caption(&mut self, caption: &str) {
        if let Some(window) = self.window.as_mut() {
            window.set_title(caption);
        }
    }

    fn swap_buffers(&mut self) {
        if let Some(window) = self.window.as_mut() {
            window.swap_buffers();
        }
    }

    fn set_position(&mut self, x: i32, y: i32) {
        if let Some(window) = self.window.as_mut() {
            window.set_pos(x, y);
        }
    }

    fn screen_size(&self) -> (u32, u32) {
        self.screen
    }

    fn cursor_inside(&self) -> bool {
        self.window.as_ref().is_some_and(|window| {
            let (x, y) = window.get_cursor_pos();
            let (width, height) = window.get_size();
            x >= 0.0 && y >= 0.0 && x < f64::from(width) && y < f64::from(height)
        })
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        if let Some(window) = self.window.as_mut() {
            window.set_cursor_mode(if visible {
                glfw::CursorMode::Normal
            } else {
                glfw::CursorMode::Hidden
            });
        }
    }

    fn terminate(&mut self) {
        if self.window.take().is_some() {
            log::debug!("GLFW window destroyed");
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

fn translate_event(event: glfw::WindowEvent) -> Option<PlatformEvent> {
    match event {
        glfw::WindowEvent::Key(key, _, action, mods) => Some(PlatformEvent::Key {
            button: translate_key(key)?,
            pressed: action != glfw::Action::Release,
            modifiers: translate_modifiers(mods),
        }),
        glfw::WindowEvent::MouseButton(button, action, _) => {
            let button = match button {
                glfw::MouseButton::Button1 => Button::MouseLeft,
                glfw::MouseButton::Button2 => Button::MouseRight,
                glfw::MouseButton::Button3 => Button::MouseMiddle,
                _ => return None,
            };
            Some(PlatformEvent::MouseButton {
                button,
                pressed: action != glfw::Action::Release,
            })
        }
        glfw::WindowEvent::CursorPos(x, y) => Some(PlatformEvent::CursorMoved { x, y }),
        glfw::WindowEvent::Char(c) => Some(PlatformEvent::Char(c)),
        glfw::WindowEvent::Close => Some(PlatformEvent::CloseRequested),
        glfw::WindowEvent::Focus(focused) => Some(PlatformEvent::Focus(focused)),
        _ => None,
    }
}

fn translate_modifiers(mods: glfw::Modifiers) -> Modifiers {
    let mut modifiers = Modifiers::empty();
    modifiers.set(Modifiers::SHIFT, mods.contains(glfw::Modifiers::Shift));
    modifiers.set(Modifiers::CONTROL, mods.contains(glfw::Modifiers::Control));
    modifiers.set(Modifiers::ALT, mods.contains(glfw::Modifiers::Alt));
    modifiers.set(Modifiers::SUPER, mods.contains(glfw::Modifiers::Super));
    modifiers
}

fn translate_key(key: glfw::Key) -> Option<Button> {
    use glfw::Key;

    let button = match key {
        Key::A => Button::A,
        Key::B => Button::B,
        Key::C => Button::C,
        Key::D => Button::D,
        Key::E => Button::E,
        Key::F => Button::F,
        Key::G => Button::G,
        Key::H => Button::H,
        Key::I => Button::I,
        Key::J => Button::J,
        Key::K => Button::K,
        Key::L => Button::L,
        Key::M => Button::M,
        Key::N => Button::N,
        Key::O => Button::O,
        Key::P => Button::P,
        Key::Q => Button::Q,
        Key::R => Button::R,
        Key::S => Button::S,
        Key::T => Button::T,
        Key::U => Button::U,
        Key::V => Button::V,
        Key::W => Button::W,
        Key::X => Button::X,
        Key::Y => Button::Y,
        Key::Z => Button::Z,
        Key::Num0 => Button::Num0,
        Key::Num1 => Button::Num1,
        Key::Num2 => Button::Num2,
        Key::Num3 => Button::Num3,
        Key::Num4 => Button::Num4,
        Key::Num5 => Button::Num5,
        Key::Num6 => Button::Num6,
        Key::Num7 => Button::Num7,
        Key::Num8 => Button::Num8,
        Key::Num9 => Button::Num9,
        Key::F1 => Button::F1,
        Key::F2 => Button::F2,
        Key::F3 => Button::F3,
        Key::F4 => Button::F4,
        Key::F5 => Button::F5,
        Key::F6 => Button::F6,
        Key::F7 => Button::F7,
        Key::F8 => Button::F8,
        Key::F9 => Button::F9,
        Key::F10 => Button::F10,
        Key::F11 => Button::F11,
        Key::F12 => Button::F12,
        Key::Space => Button::Space,
        Key::Enter => Button::Enter,
        Key::Escape => Button::Escape,
        Key::Tab => Button::Tab,
        Key::Backspace => Button::Backspace,
        Key::Delete => Button::Delete,
        Key::Insert => Button::Insert,
        Key::Home => Button::Home,
        Key::End => Button::End,
        Key::PageUp => Button::PageUp,
        Key::PageDown => Button::PageDown,
        Key::Up => Button::Up,
        Key::Down => Button::Down,
        Key::Left => Button::Left,
        Key::Right => Button::Right,
        Key::LeftShift => Button::LeftShift,
        Key::RightShift => Button::RightShift,
        Key::LeftControl => Button::LeftControl,
        Key::RightControl => Button::RightControl,
        Key::LeftAlt => Button::LeftAlt,
        Key::RightAlt => Button::RightAlt,
        Key::LeftSuper => Button::LeftSuper,
        Key::RightSuper => Button::RightSuper,
        _ => return None,
    };
    Some(button)
}
