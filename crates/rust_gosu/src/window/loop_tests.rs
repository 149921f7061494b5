//! Tick loop tests against a scripted backend and a manual clock

use std::collections::VecDeque;
use std::rc::Rc;

use super::*;
use crate::foundation::time::ManualClock;
use crate::input::{Modifiers, PlatformEvent};

#[derive(Default)]
struct ScriptedBackend {
    script: VecDeque<Vec<PlatformEvent>>,
    shown: bool,
    hidden: u32,
    terminated: u32,
    swaps: u32,
    caption: String,
    cursor_inside: bool,
    cursor_visible: Option<bool>,
}

impl ScriptedBackend {
    fn with_script(script: Vec<Vec<PlatformEvent>>) -> Self {
        Self {
            script: script.into(),
            ..Self::default()
        }
    }
}

impl WindowBackend for ScriptedBackend {
    fn poll_events(&mut self) -> Vec<PlatformEvent> {
        self.script.pop_front().unwrap_or_default()
    }

    fn show(&mut self) {
        self.shown = true;
    }

    fn hide(&mut self) {
        self.hidden += 1;
    }

    fn set_caption(&mut self, caption: &str) {
        self.caption = caption.to_string();
    }

    fn swap_buffers(&mut self) {
        self.swaps += 1;
    }

    fn set_position(&mut self, _x: i32, _y: i32) {}

    fn screen_size(&self) -> (u32, u32) {
        (1920, 1080)
    }

    fn cursor_inside(&self) -> bool {
        self.cursor_inside
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = Some(visible);
    }

    fn terminate(&mut self) {
        self.terminated += 1;
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

/// Clock handle shared between the window and the test
struct SharedClock(Rc<ManualClock>);

impl Clock for SharedClock {
    fn milliseconds(&self) -> u32 {
        self.0.milliseconds()
    }

    fn sleep(&self, ms: u32) {
        self.0.sleep(ms);
    }
}

/// Records every hook call; closes or fails on request
#[derive(Default)]
struct Recorder {
    clock: Option<Rc<ManualClock>>,
    calls: Vec<String>,
    update_times: Vec<u32>,
    updates: u32,
    draws: u32,
    close_after_updates: Option<u32>,
    fail_update_at: Option<u32>,
    fail_draw: bool,
    skip_redraw: bool,
    wants_cursor: bool,
}

impl Game for Recorder {
    fn update(&mut self, window: &mut Window) -> GameResult<()> {
        self.updates += 1;
        self.calls.push("update".to_string());
        if let Some(clock) = &self.clock {
            self.update_times.push(clock.peek());
        }
        if self.fail_update_at == Some(self.updates) {
            return Err(GameError::Custom("update failed".to_string()));
        }
        if self.close_after_updates == Some(self.updates) {
            window.close();
        }
        Ok(())
    }

    fn draw(&mut self, window: &mut Window) -> GameResult<()> {
        self.draws += 1;
        self.calls.push("draw".to_string());
        assert!(window.graphics().in_frame());
        if self.fail_draw {
            return Err(GameError::Custom("draw failed".to_string()));
        }
        Ok(())
    }

    fn needs_redraw(&self) -> bool {
        !self.skip_redraw
    }

    fn needs_cursor(&self) -> bool {
        self.wants_cursor
    }

    fn button_down(&mut self, _window: &mut Window, button: Button) -> GameResult<()> {
        self.calls.push(format!("down {:?}", button));
        Ok(())
    }

    fn button_up(&mut self, _window: &mut Window, button: Button) -> GameResult<()> {
        self.calls.push(format!("up {:?}", button));
        Ok(())
    }
}

fn config(interval: f64) -> WindowConfig {
    WindowConfig::new(64, 48)
        .with_update_interval(interval)
        .with_caption("loop test")
}

fn window_with(backend: ScriptedBackend, clock: Rc<ManualClock>, interval: f64) -> Window {
    Window::with_backend(
        &config(interval),
        Box::new(backend),
        Box::new(SharedClock(clock)),
        Box::new(HeadlessRenderer::new()),
    )
    .unwrap()
}

fn scripted(window: &Window) -> &ScriptedBackend {
    window.backend().as_any().downcast_ref::<ScriptedBackend>().unwrap()
}

fn headless(window: &Window) -> &HeadlessRenderer {
    window
        .graphics()
        .renderer()
        .as_any()
        .downcast_ref::<HeadlessRenderer>()
        .unwrap()
}

#[test]
fn test_update_fires_once_per_interval() {
    let clock = Rc::new(ManualClock::with_step(0, 1));
    let mut window = window_with(ScriptedBackend::default(), Rc::clone(&clock), 10.0);
    let mut game = Recorder {
        clock: Some(Rc::clone(&clock)),
        close_after_updates: Some(5),
        ..Recorder::default()
    };

    window.show(&mut game).unwrap();

    assert_eq!(game.updates, 5);
    assert!(game.update_times[0] >= 10);
    for pair in game.update_times.windows(2) {
        assert_eq!(pair[1] - pair[0], 10);
    }
}

#[test]
fn test_close_inside_update_skips_draw() {
    let clock = Rc::new(ManualClock::with_step(0, 1));
    let mut window = window_with(ScriptedBackend::default(), clock, 5.0);
    let mut game = Recorder {
        close_after_updates: Some(3),
        ..Recorder::default()
    };

    window.show(&mut game).unwrap();

    assert_eq!(game.updates, 3);
    assert_eq!(game.draws, 2);
    assert_eq!(window.state(), WindowState::Closed);

    let backend = scripted(&window);
    assert!(backend.shown);
    assert_eq!(backend.hidden, 1);
    assert_eq!(backend.terminated, 1);
    assert_eq!(backend.swaps, 2);
    assert_eq!(headless(&window).frame_count(), 2);
}

#[test]
fn test_no_redraw_means_no_frame() {
    let clock = Rc::new(ManualClock::with_step(0, 1));
    let mut window = window_with(ScriptedBackend::default(), clock, 5.0);
    let mut game = Recorder {
        close_after_updates: Some(4),
        skip_redraw: true,
        ..Recorder::default()
    };

    window.show(&mut game).unwrap();

    assert_eq!(game.draws, 0);
    assert_eq!(scripted(&window).swaps, 0);
    assert_eq!(headless(&window).frame_count(), 0);
}

#[test]
fn test_draw_error_ends_frame_and_closes() {
    let clock = Rc::new(ManualClock::with_step(0, 1));
    let mut window = window_with(ScriptedBackend::default(), clock, 5.0);
    let mut game = Recorder {
        fail_draw: true,
        ..Recorder::default()
    };

    let result = window.show(&mut game);

    assert!(matches!(result, Err(WindowError::Hook(GameError::Custom(_)))));
    assert_eq!(game.draws, 1);
    assert!(window.is_closed());
    assert!(!window.graphics().in_frame());
    assert_eq!(headless(&window).frame_count(), 1);
    assert_eq!(scripted(&window).swaps, 0);
    assert_eq!(scripted(&window).terminated, 1);
}

#[test]
fn test_update_error_closes_window() {
    let clock = Rc::new(ManualClock::with_step(0, 1));
    let mut window = window_with(ScriptedBackend::default(), clock, 5.0);
    let mut game = Recorder {
        fail_update_at: Some(2),
        ..Recorder::default()
    };

    let result = window.show(&mut game);

    assert!(matches!(result, Err(WindowError::Hook(_))));
    assert_eq!(game.updates, 2);
    assert_eq!(game.draws, 1);
    assert_eq!(scripted(&window).terminated, 1);
}

#[test]
fn test_buttons_dispatch_before_update() {
    let press = PlatformEvent::Key {
        button: Button::Space,
        pressed: true,
        modifiers: Modifiers::empty(),
    };
    let release = PlatformEvent::Key {
        button: Button::Space,
        pressed: false,
        modifiers: Modifiers::empty(),
    };
    let backend = ScriptedBackend::with_script(vec![vec![press], vec![release]]);
    let clock = Rc::new(ManualClock::with_step(0, 1));
    let mut window = window_with(backend, clock, 5.0);
    let mut game = Recorder {
        close_after_updates: Some(2),
        skip_redraw: true,
        ..Recorder::default()
    };

    window.show(&mut game).unwrap();

    assert_eq!(game.calls, vec!["down Space", "update", "up Space", "update"]);
    assert!(!window.input().is_down(Button::Space));
}

#[test]
fn test_close_request_closes_before_update() {
    let backend = ScriptedBackend::with_script(vec![vec![PlatformEvent::CloseRequested]]);
    let clock = Rc::new(ManualClock::with_step(0, 1));
    let mut window = window_with(backend, clock, 5.0);
    let mut game = Recorder::default();

    window.show(&mut game).unwrap();

    assert_eq!(game.updates, 0);
    assert!(window.is_closed());
}

#[test]
fn test_clock_wrap_triggers_tick() {
    let clock = Rc::new(ManualClock::with_step(u32::MAX - 3, 1));
    let mut window = window_with(ScriptedBackend::default(), Rc::clone(&clock), 10_000.0);
    let mut game = Recorder {
        clock: Some(Rc::clone(&clock)),
        close_after_updates: Some(1),
        ..Recorder::default()
    };

    window.show(&mut game).unwrap();

    assert_eq!(game.updates, 1);
    assert!(game.update_times[0] < 100);
}

#[test]
fn test_cursor_visibility_follows_game() {
    let backend = ScriptedBackend {
        cursor_inside: true,
        ..ScriptedBackend::default()
    };
    let clock = Rc::new(ManualClock::with_step(0, 1));
    let mut window = window_with(backend, clock, 5.0);
    let mut game = Recorder {
        close_after_updates: Some(1),
        wants_cursor: true,
        ..Recorder::default()
    };

    window.show(&mut game).unwrap();

    assert_eq!(scripted(&window).cursor_visible, Some(true));
}

#[test]
fn test_close_is_idempotent_and_final() {
    let clock = Rc::new(ManualClock::new(0));
    let mut window = window_with(ScriptedBackend::default(), clock, 5.0);
    assert_eq!(window.state(), WindowState::Created);

    window.close();
    window.close();
    assert_eq!(scripted(&window).terminated, 1);

    let mut game = Recorder::default();
    window.show(&mut game).unwrap();
    assert_eq!(game.updates, 0);
    assert!(!scripted(&window).shown);
}

#[test]
fn test_caption_and_accessors() {
    let clock = Rc::new(ManualClock::new(0));
    let mut window = window_with(ScriptedBackend::default(), clock, 16.5);
    assert_eq!(window.caption(), "loop test");
    assert_eq!(scripted(&window).caption, "loop test");

    window.set_caption("renamed");
    assert_eq!(window.caption(), "renamed");
    assert_eq!(scripted(&window).caption, "renamed");

    assert_eq!((window.width(), window.height()), (64, 48));
    assert_eq!((window.screen_width(), window.screen_height()), (1920, 1080));
    assert_eq!(window.update_interval(), 16.5);
}

#[test]
fn test_invalid_config_is_rejected() {
    let clock = Rc::new(ManualClock::new(0));
    let result = Window::with_backend(
        &config(0.0),
        Box::new(ScriptedBackend::default()),
        Box::new(SharedClock(clock)),
        Box::new(HeadlessRenderer::new()),
    );
    assert!(matches!(result, Err(WindowError::Config(_))));
}
