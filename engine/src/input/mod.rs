//! Input Module
//!
//! Provides platform-agnostic keyboard handling. The host feeds key events
//! through [`InputState::handle_key`] and calls [`InputState::begin_frame`]
//! once per frame. Movement is read through the bindings; one-shot keys such
//! as the pickup trigger are read as press edges on the keyboard.
//!
//! # Example
//!
//! ```rust,ignore
//! use object_pickup_engine::input::{InputState, KeyCode};
//!
//! let mut input = InputState::new();
//! input.begin_frame();
//! input.handle_key(KeyCode::W, true);
//! let movement = input.movement();
//! assert_eq!(movement.forward_axis(), 1);
//! ```

pub mod bindings;
pub mod keyboard;

pub use bindings::{InputAction, KeyBindings};
pub use keyboard::{KeyCode, KeyboardState, MovementKeys};

/// Combined input state: raw keyboard plus the action bindings applied to it.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub keyboard: KeyboardState,
    pub bindings: KeyBindings,
}

impl InputState {
    /// Create a new input state with default bindings and nothing pressed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an input state with custom bindings.
    pub fn with_bindings(bindings: KeyBindings) -> Self {
        Self {
            keyboard: KeyboardState::new(),
            bindings,
        }
    }

    /// Start a new frame (clears press/release edges).
    pub fn begin_frame(&mut self) {
        self.keyboard.begin_frame();
    }

    /// Feed a key event.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        self.keyboard.handle_key(key, pressed)
    }

    /// Whether `key` went down this frame.
    pub fn just_pressed(&self, key: KeyCode) -> bool {
        self.keyboard.just_pressed(key)
    }

    /// Movement actions currently held, resolved through the bindings.
    pub fn movement(&self) -> MovementKeys {
        let held = |action| self.bindings.is_action_pressed(action, &self.keyboard);
        MovementKeys {
            forward: held(InputAction::MoveForward),
            backward: held(InputAction::MoveBack),
            left: held(InputAction::MoveLeft),
            right: held(InputAction::MoveRight),
            jump: held(InputAction::Jump),
            sprint: held(InputAction::Sprint),
        }
    }

    /// Reset all input state to defaults, keeping bindings.
    pub fn reset(&mut self) {
        self.keyboard.reset();
    }
}
