//! Input Bindings Module
//!
//! Maps physical keys to the logical movement actions, so the walk keys can be
//! rebound without touching the character controller.

use std::collections::HashMap;

use super::{KeyCode, KeyboardState};

/// Logical input actions that can be bound to physical keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Move forward (default: W)
    MoveForward,
    /// Move backward (default: S)
    MoveBack,
    /// Strafe left (default: A)
    MoveLeft,
    /// Strafe right (default: D)
    MoveRight,
    /// Sprint modifier (default: Shift)
    Sprint,
    /// Jump (default: Space)
    Jump,
}

/// Maps physical keys to logical actions, supporting customizable key bindings.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    /// Map from physical key to logical action
    key_to_action: HashMap<KeyCode, InputAction>,
    /// Map from logical action to physical key (for reverse lookup and display)
    action_to_key: HashMap<InputAction, KeyCode>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyBindings {
    /// Create a new KeyBindings instance with default key mappings.
    ///
    /// Default bindings:
    /// - W = MoveForward
    /// - S = MoveBack
    /// - A = MoveLeft
    /// - D = MoveRight
    /// - Shift (Left) = Sprint
    /// - Space = Jump
    pub fn new() -> Self {
        let mut bindings = Self {
            key_to_action: HashMap::new(),
            action_to_key: HashMap::new(),
        };

        bindings.bind(KeyCode::W, InputAction::MoveForward);
        bindings.bind(KeyCode::S, InputAction::MoveBack);
        bindings.bind(KeyCode::A, InputAction::MoveLeft);
        bindings.bind(KeyCode::D, InputAction::MoveRight);
        bindings.bind(KeyCode::ShiftLeft, InputAction::Sprint);
        bindings.bind(KeyCode::Space, InputAction::Jump);

        bindings
    }

    /// Bind a physical key to a logical action.
    ///
    /// If the key was previously bound to another action, that binding is removed.
    /// If the action was previously bound to another key, that binding is also removed.
    pub fn bind(&mut self, key: KeyCode, action: InputAction) {
        if let Some(old_action) = self.key_to_action.remove(&key) {
            self.action_to_key.remove(&old_action);
        }

        if let Some(old_key) = self.action_to_key.remove(&action) {
            self.key_to_action.remove(&old_key);
        }

        self.key_to_action.insert(key, action);
        self.action_to_key.insert(action, key);
    }

    /// Remove the binding for a specific action.
    pub fn unbind_action(&mut self, action: InputAction) {
        if let Some(key) = self.action_to_key.remove(&action) {
            self.key_to_action.remove(&key);
        }
    }

    /// Get the action bound to a physical key, if any.
    pub fn get_action(&self, key: KeyCode) -> Option<InputAction> {
        self.key_to_action.get(&key).copied()
    }

    /// Get the key bound to a logical action, if any.
    pub fn get_key(&self, action: InputAction) -> Option<KeyCode> {
        self.action_to_key.get(&action).copied()
    }

    /// Check if the key bound to `action` is currently held.
    pub fn is_action_pressed(&self, action: InputAction, keyboard: &KeyboardState) -> bool {
        self.get_key(action)
            .is_some_and(|key| keyboard.is_pressed(key))
    }

    /// Check if the key bound to `action` went down this frame.
    pub fn is_action_just_pressed(&self, action: InputAction, keyboard: &KeyboardState) -> bool {
        self.get_key(action)
            .is_some_and(|key| keyboard.just_pressed(key))
    }
}
