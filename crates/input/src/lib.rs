//! Input surface: host events in, a queryable input-state mapping out.
//!
//! # Invariants
//! - Key identifiers are case-insensitive; `"W"` and `"w"` are the same key.
//! - Focus loss replaces the whole mapping, so no key stays held after the
//!   window loses focus.

mod state;

pub use state::{InputEvent, InputState, InputValue, POINTER_X, POINTER_Y};
