//! Keyboard, mouse and text input
//!
//! The window backend translates native events into [`PlatformEvent`]s and
//! feeds them to [`Input`]. Once per tick the window calls [`Input::update`],
//! which applies the queued events and returns the button transitions that
//! are then dispatched to the game.

pub mod text_input;

pub use text_input::TextInput;

use std::collections::{HashSet, VecDeque};

use bitflags::bitflags;

/// Keyboard keys and mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Button {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
    LeftShift,
    RightShift,
    LeftControl,
    RightControl,
    LeftAlt,
    RightAlt,
    LeftSuper,
    RightSuper,
    MouseLeft,
    MouseMiddle,
    MouseRight,
}

impl Button {
    /// Whether this is a mouse button
    pub fn is_mouse(self) -> bool {
        matches!(self, Self::MouseLeft | Self::MouseMiddle | Self::MouseRight)
    }
}

/// Button transition reported for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    /// Button was pressed
    Down(Button),
    /// Button was released
    Up(Button),
}

bitflags! {
    /// Keyboard modifiers held during a key event
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Either shift key
        const SHIFT = 1 << 0;
        /// Either control key
        const CONTROL = 1 << 1;
        /// Either alt key
        const ALT = 1 << 2;
        /// Either super (logo) key
        const SUPER = 1 << 3;
    }
}

/// Native event as translated by the window backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlatformEvent {
    /// Keyboard key pressed, repeated or released
    Key {
        /// Key
        button: Button,
        /// True for press and repeat, false for release
        pressed: bool,
        /// Modifiers held at the time
        modifiers: Modifiers,
    },
    /// Mouse button pressed or released
    MouseButton {
        /// Mouse button
        button: Button,
        /// True for press
        pressed: bool,
    },
    /// Cursor moved, in window pixels
    CursorMoved {
        /// Horizontal position
        x: f64,
        /// Vertical position
        y: f64,
    },
    /// Character typed
    Char(char),
    /// User asked to close the window
    CloseRequested,
    /// Window gained or lost focus
    Focus(bool),
}

/// Input state of a window
#[derive(Debug)]
pub struct Input {
    pending: VecDeque<PlatformEvent>,
    down: HashSet<Button>,
    mouse: (f64, f64),
    mouse_factors: (f64, f64),
    modifiers: Modifiers,
    focused: bool,
    close_requested: bool,
    text_input: Option<TextInput>,
}

impl Default for Input {
    fn default() -> Self {
        Self::new()
    }
}

impl Input {
    /// Input with nothing pressed
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
            down: HashSet::new(),
            mouse: (0.0, 0.0),
            mouse_factors: (1.0, 1.0),
            modifiers: Modifiers::empty(),
            focused: true,
            close_requested: false,
            text_input: None,
        }
    }

    /// Queue an event for the next [`Input::update`]
    pub fn feed(&mut self, event: PlatformEvent) {
        self.pending.push_back(event);
    }

    /// Apply queued events and return this tick's button transitions in order
    pub fn update(&mut self) -> Vec<ButtonEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.pending.pop_front() {
            match event {
                PlatformEvent::Key {
                    button,
                    pressed,
                    modifiers,
                } => {
                    self.modifiers = modifiers;
                    if pressed && self.text_input_consumes_key(button, modifiers) {
                        continue;
                    }
                    self.transition(button, pressed, &mut events);
                }
                PlatformEvent::MouseButton { button, pressed } => self.transition(button, pressed, &mut events),
                PlatformEvent::CursorMoved { x, y } => self.mouse = (x, y),
                PlatformEvent::Char(c) => {
                    if let Some(text_input) = self.text_input.as_mut() {
                        text_input.handle_char(c);
                    }
                }
                PlatformEvent::CloseRequested => self.close_requested = true,
                PlatformEvent::Focus(focused) => {
                    self.focused = focused;
                    if !focused {
                        // Releases are not delivered to unfocused windows
                        for button in self.down.drain() {
                            events.push(ButtonEvent::Up(button));
                        }
                    }
                }
            }
        }
        events
    }

    /// Whether `button` is currently held
    pub fn is_down(&self, button: Button) -> bool {
        self.down.contains(&button)
    }

    /// Modifiers of the most recent key event
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Whether the window has keyboard focus
    pub fn focused(&self) -> bool {
        self.focused
    }

    /// Horizontal mouse position, scaled by the mouse factor
    pub fn mouse_x(&self) -> f64 {
        self.mouse.0 * self.mouse_factors.0
    }

    /// Vertical mouse position, scaled by the mouse factor
    pub fn mouse_y(&self) -> f64 {
        self.mouse.1 * self.mouse_factors.1
    }

    /// Factors applied to the raw cursor position
    pub fn set_mouse_factors(&mut self, factor_x: f64, factor_y: f64) {
        self.mouse_factors = (factor_x, factor_y);
    }

    /// Take the pending close request, if any
    pub fn take_close_request(&mut self) -> bool {
        std::mem::take(&mut self.close_requested)
    }

    /// Install or remove the active text input
    pub fn set_text_input(&mut self, text_input: Option<TextInput>) -> Option<TextInput> {
        std::mem::replace(&mut self.text_input, text_input)
    }

    /// Active text input
    pub fn text_input(&self) -> Option<&TextInput> {
        self.text_input.as_ref()
    }

    /// Active text input, mutably
    pub fn text_input_mut(&mut self) -> Option<&mut TextInput> {
        self.text_input.as_mut()
    }

    fn text_input_consumes_key(&mut self, button: Button, modifiers: Modifiers) -> bool {
        self.text_input
            .as_mut()
            .is_some_and(|text_input| text_input.handle_key(button, modifiers))
    }

    fn transition(&mut self, button: Button, pressed: bool, events: &mut Vec<ButtonEvent>) {
        if pressed {
            // Key repeat arrives as another press
            if self.down.insert(button) {
                events.push(ButtonEvent::Down(button));
            }
        } else if self.down.remove(&button) {
            events.push(ButtonEvent::Up(button));
        }
    }
}
