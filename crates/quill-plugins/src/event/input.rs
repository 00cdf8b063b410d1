//! Raw input values forwarded from the host widget.

/// Phase of a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// The key went down.
    Down,
    /// The key was released.
    Up,
}

/// Modifier keys held during an input event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift is held.
    pub shift: bool,
    /// Control is held.
    pub ctrl: bool,
    /// Alt is held.
    pub alt: bool,
    /// Meta (command/super) is held.
    pub meta: bool,
}

/// A key press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    /// Host key code.
    pub key_code: u32,
    /// Press phase.
    pub action: KeyAction,
    /// Modifiers held at the time.
    pub modifiers: Modifiers,
    /// Auto-repeat count; zero for the initial press.
    pub repeat_count: u32,
}

impl KeyInput {
    /// Creates an unmodified, non-repeated key input.
    #[must_use]
    pub const fn new(key_code: u32, action: KeyAction) -> Self {
        Self {
            key_code,
            action,
            modifiers: Modifiers {
                shift: false,
                ctrl: false,
                alt: false,
                meta: false,
            },
            repeat_count: 0,
        }
    }

    /// Returns the input with `modifiers` applied.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Phase of a touch gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchAction {
    /// A pointer touched down.
    Down,
    /// A pointer moved.
    Move,
    /// A pointer lifted.
    Up,
    /// The gesture was aborted by the host.
    Cancel,
}

/// A single touch sample in editor view coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchInput {
    /// Gesture phase.
    pub action: TouchAction,
    /// Horizontal position in view pixels.
    pub x: f32,
    /// Vertical position in view pixels.
    pub y: f32,
    /// Host pointer identifier.
    pub pointer_id: u32,
}

impl TouchInput {
    /// Creates a touch sample for the primary pointer.
    #[must_use]
    pub const fn new(action: TouchAction, x: f32, y: f32) -> Self {
        Self {
            action,
            x,
            y,
            pointer_id: 0,
        }
    }
}
