use glam::Vec2;
use std::collections::BTreeMap;

/// Axis identifier holding the pointer's horizontal position in viewport pixels.
pub const POINTER_X: &str = "pointer.x";
/// Axis identifier holding the pointer's vertical position in viewport pixels.
pub const POINTER_Y: &str = "pointer.y";

/// A raw event delivered by the host between frames.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Key pressed. Carries the host's key name (`"w"`, `"Shift"`, `" "`).
    KeyDown(String),
    KeyUp(String),
    /// Pointer button pressed, by button index.
    ButtonDown(u8),
    ButtonUp(u8),
    PointerMoved { x: f32, y: f32 },
    /// The window lost focus; every held input is released.
    FocusLost,
}

/// Value stored for one input identifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputValue {
    Pressed(bool),
    Axis(f32),
}

/// Mapping from input identifier to its current value.
///
/// Keys are stored lowercased, pointer buttons as `mouse<N>`, pointer position
/// as the [`POINTER_X`]/[`POINTER_Y`] axes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputState {
    values: BTreeMap<String, InputValue>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one host event into the mapping.
    pub fn apply(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown(key) => {
                self.values
                    .insert(key.to_lowercase(), InputValue::Pressed(true));
            }
            InputEvent::KeyUp(key) => {
                self.values
                    .insert(key.to_lowercase(), InputValue::Pressed(false));
            }
            InputEvent::ButtonDown(button) => {
                self.values
                    .insert(button_name(*button), InputValue::Pressed(true));
            }
            InputEvent::ButtonUp(button) => {
                self.values
                    .insert(button_name(*button), InputValue::Pressed(false));
            }
            InputEvent::PointerMoved { x, y } => {
                self.values.insert(POINTER_X.into(), InputValue::Axis(*x));
                self.values.insert(POINTER_Y.into(), InputValue::Axis(*y));
            }
            InputEvent::FocusLost => {
                tracing::debug!(held = self.values.len(), "focus lost, clearing input");
                self.values = BTreeMap::new();
            }
        }
    }

    /// Whether a key (any case) or `mouse<N>` button is currently held.
    pub fn is_pressed(&self, id: &str) -> bool {
        matches!(
            self.values.get(id.to_lowercase().as_str()),
            Some(InputValue::Pressed(true))
        )
    }

    /// Current value of an axis, if it has been reported.
    pub fn axis(&self, id: &str) -> Option<f32> {
        match self.values.get(id) {
            Some(InputValue::Axis(v)) => Some(*v),
            _ => None,
        }
    }

    /// Last reported pointer position.
    pub fn pointer(&self) -> Option<Vec2> {
        Some(Vec2::new(self.axis(POINTER_X)?, self.axis(POINTER_Y)?))
    }

    pub fn get(&self, id: &str) -> Option<InputValue> {
        self.values.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn button_name(button: u8) -> String {
    format!("mouse{button}")
}
