//! Input handling and camera control.
//!
//! Window events are folded into a per-frame snapshot. Camera controls query
//! that snapshot through [`Condition`]s, which treat keys, mouse buttons and
//! gamepad buttons the same way.

use std::collections::HashSet;
use std::hash::Hash;

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};
use winit::keyboard::KeyCode;

use crate::camera::CameraState;
use crate::constants::PIXELS_PER_SCROLL_NOTCH;

/// Gamepad buttons a binding can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadButton {
    Back,
}

/// Down/pressed/released tracking for one kind of button.
#[derive(Debug)]
struct ButtonSet<T> {
    down: HashSet<T>,
    pressed: HashSet<T>,
    released: HashSet<T>,
}

impl<T: Copy + Eq + Hash> ButtonSet<T> {
    fn new() -> Self {
        Self {
            down: HashSet::new(),
            pressed: HashSet::new(),
            released: HashSet::new(),
        }
    }

    fn press(&mut self, button: T) {
        if self.down.insert(button) {
            self.pressed.insert(button);
        }
    }

    fn release(&mut self, button: T) {
        if self.down.remove(&button) {
            self.released.insert(button);
        }
    }

    fn set(&mut self, button: T, state: ElementState) {
        match state {
            ElementState::Pressed => self.press(button),
            ElementState::Released => self.release(button),
        }
    }

    fn pressed(&self, button: T) -> bool {
        self.pressed.contains(&button)
    }

    fn held_only(&self, button: T) -> bool {
        self.down.contains(&button) && !self.pressed.contains(&button)
    }

    fn released(&self, button: T) -> bool {
        self.released.contains(&button)
    }

    fn release_all(&mut self) {
        self.released.extend(self.down.drain());
    }

    fn end_frame(&mut self) {
        self.pressed.clear();
        self.released.clear();
    }
}

/// What the input devices did since the last frame.
#[derive(Debug)]
pub struct InputState {
    keys: ButtonSet<KeyCode>,
    mouse_buttons: ButtonSet<MouseButton>,
    gamepad_buttons: ButtonSet<GamepadButton>,
    /// Cursor position in screen pixels
    pub mouse_pos: Vec2,
    /// Scroll this frame in notches; positive is away from the user
    pub scroll_notches: f32,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys: ButtonSet::new(),
            mouse_buttons: ButtonSet::new(),
            gamepad_buttons: ButtonSet::new(),
            mouse_pos: Vec2::ZERO,
            scroll_notches: 0.0,
        }
    }

    /// Key repeats are not new presses.
    pub fn on_key(&mut self, key: KeyCode, state: ElementState, repeat: bool) {
        if !repeat {
            self.keys.set(key, state);
        }
    }

    pub fn on_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        self.mouse_buttons.set(button, state);
    }

    pub fn on_gamepad_button(&mut self, button: GamepadButton, state: ElementState) {
        self.gamepad_buttons.set(button, state);
    }

    pub fn on_cursor_moved(&mut self, x: f32, y: f32) {
        self.mouse_pos = Vec2::new(x, y);
    }

    pub fn on_scroll(&mut self, delta: MouseScrollDelta) {
        self.scroll_notches += match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_SCROLL_NOTCH,
        };
    }

    /// Release everything held, e.g. when the window loses focus and
    /// would miss the release events.
    pub fn release_all(&mut self) {
        self.keys.release_all();
        self.mouse_buttons.release_all();
        self.gamepad_buttons.release_all();
    }

    /// Forget this frame's edges and scroll; held buttons stay held.
    pub fn end_frame(&mut self) {
        self.keys.end_frame();
        self.mouse_buttons.end_frame();
        self.gamepad_buttons.end_frame();
        self.scroll_notches = 0.0;
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

/// A binding that can be queried for press, hold and release edges.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Key(KeyCode),
    Mouse(MouseButton),
    Gamepad(GamepadButton),
    /// True when any inner condition is
    Any(Vec<Condition>),
}

impl Condition {
    /// Went down this frame.
    pub fn pressed(&self, input: &InputState) -> bool {
        match self {
            Condition::Key(key) => input.keys.pressed(*key),
            Condition::Mouse(button) => input.mouse_buttons.pressed(*button),
            Condition::Gamepad(button) => input.gamepad_buttons.pressed(*button),
            Condition::Any(conditions) => conditions.iter().any(|c| c.pressed(input)),
        }
    }

    /// Down, and was already down before this frame.
    pub fn held_only(&self, input: &InputState) -> bool {
        match self {
            Condition::Key(key) => input.keys.held_only(*key),
            Condition::Mouse(button) => input.mouse_buttons.held_only(*button),
            Condition::Gamepad(button) => input.gamepad_buttons.held_only(*button),
            Condition::Any(conditions) => conditions.iter().any(|c| c.held_only(input)),
        }
    }

    /// Came up this frame.
    pub fn released(&self, input: &InputState) -> bool {
        match self {
            Condition::Key(key) => input.keys.released(*key),
            Condition::Mouse(button) => input.mouse_buttons.released(*button),
            Condition::Gamepad(button) => input.gamepad_buttons.released(*button),
            Condition::Any(conditions) => conditions.iter().any(|c| c.released(input)),
        }
    }
}

/// Which inputs drive the camera.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraBindings {
    pub quit: Condition,
    pub rotate_left: Condition,
    pub rotate_right: Condition,
    pub drag: Condition,
}

impl Default for CameraBindings {
    fn default() -> Self {
        Self {
            quit: Condition::Any(vec![
                Condition::Key(KeyCode::Escape),
                Condition::Gamepad(GamepadButton::Back),
            ]),
            rotate_left: Condition::Key(KeyCode::Comma),
            rotate_right: Condition::Key(KeyCode::Period),
            drag: Condition::Mouse(MouseButton::Middle),
        }
    }
}

/// Requests for the frame driver.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameIntent {
    pub quit: bool,
}

/// Turn this frame's input into camera targets and drag panning.
///
/// Must run before [`CameraState::advance`]: the cursor is mapped to world
/// space with the transform left over from the previous frame, and the pan
/// computed from it is what keeps the dragged point under the cursor.
pub fn apply_camera_input(
    input: &InputState,
    bindings: &CameraBindings,
    camera: &mut CameraState,
) -> FrameIntent {
    let intent = FrameIntent {
        quit: bindings.quit.pressed(input),
    };

    camera.scroll(input.scroll_notches);

    if bindings.rotate_left.pressed(input) {
        camera.rotate_left();
    }
    if bindings.rotate_right.pressed(input) {
        camera.rotate_right();
    }

    camera.sample_mouse(input.mouse_pos);

    if bindings.drag.pressed(input) {
        camera.begin_drag();
    }
    if camera.is_dragged() && bindings.drag.held_only(input) {
        camera.continue_drag();
    }
    if camera.is_dragged() && bindings.drag.released(input) {
        camera.end_drag();
    }

    intent
}
