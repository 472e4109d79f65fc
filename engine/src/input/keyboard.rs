//! Keyboard Input Module
//!
//! Held keys with their per-frame edges, plus the movement key state the
//! character controller consumes.
//! Decoupled from any windowing system to use generic key codes.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Generic key codes, independent of windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    // Movement keys
    W,
    A,
    S,
    D,
    Space,
    ShiftLeft,
    ShiftRight,

    // Arrow keys
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Interaction keys
    E,
    F,
    G,
    Q,
    R,

    // Control keys
    Escape,
    Enter,
    Tab,
    ControlLeft,
    ControlRight,

    /// Catch-all for unhandled keys
    Unknown,
}

/// Which movement actions are held this frame.
///
/// Built from the key bindings by [`crate::input::InputState::movement`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MovementKeys {
    /// Move forward
    pub forward: bool,
    /// Move backward
    pub backward: bool,
    /// Strafe left
    pub left: bool,
    /// Strafe right
    pub right: bool,
    /// Jump
    pub jump: bool,
    /// Sprint modifier
    pub sprint: bool,
}

impl MovementKeys {
    /// Create a new movement keys state with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if any directional movement key is currently pressed.
    pub fn any_pressed(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }

    /// Get the forward/backward movement direction (-1, 0, or 1).
    pub fn forward_axis(&self) -> i32 {
        (self.forward as i32) - (self.backward as i32)
    }

    /// Get the left/right movement direction (-1, 0, or 1).
    pub fn right_axis(&self) -> i32 {
        (self.right as i32) - (self.left as i32)
    }
}

/// Complete keyboard state tracking.
///
/// Besides the held set, the state records which keys went down or up since
/// the last [`KeyboardState::begin_frame`], which is what one-shot actions
/// (pickup, throw) trigger on.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: HashSet<KeyCode>,
    pressed_this_frame: HashSet<KeyCode>,
    released_this_frame: HashSet<KeyCode>,
}

impl KeyboardState {
    /// Create a new keyboard state with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key press or release event.
    ///
    /// OS key repeat delivers presses for a key that is already held; those
    /// do not produce a new edge.
    ///
    /// Returns `true` if the event changed the held state.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        let changed = if pressed {
            self.held.insert(key)
        } else {
            self.held.remove(&key)
        };
        if changed {
            if pressed {
                self.pressed_this_frame.insert(key);
            } else {
                self.released_this_frame.insert(key);
            }
        }
        changed
    }

    /// Clear per-frame edges. Call once at the start of every frame, before
    /// feeding that frame's events.
    pub fn begin_frame(&mut self) {
        self.pressed_this_frame.clear();
        self.released_this_frame.clear();
    }

    /// Whether the key is currently held down.
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// Whether the key went down during the current frame.
    pub fn just_pressed(&self, key: KeyCode) -> bool {
        self.pressed_this_frame.contains(&key)
    }

    /// Whether the key went up during the current frame.
    pub fn just_released(&self, key: KeyCode) -> bool {
        self.released_this_frame.contains(&key)
    }

    /// Keys currently held down.
    pub fn held_keys(&self) -> &HashSet<KeyCode> {
        &self.held
    }

    /// Reset all keyboard state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
