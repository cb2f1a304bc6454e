//! Engine: entities, the application context, and the frame loop.
//!
//! Every frame runs three phases strictly in order:
//! 1. update every entity that existed when the frame began, in list order;
//! 2. sweep the list in reverse, removing entities flagged for removal and
//!    detaching their nodes from the scene;
//! 3. render.
//!
//! # Invariants
//! - Spawning an entity puts it in the list and its node in the scene at once.
//! - Entities are only ever removed by the sweep, never during the update pass.
//! - The entity list stays in spawn order; removal preserves relative order.
//! - Host callbacks (input, resize) only mutate state read by the next frame.

mod clock;
mod config;
mod engine;
mod entity;
mod error;
mod overlay;

pub use clock::{FrameClock, FrameTimer};
pub use config::{CameraConfig, EngineConfig, Viewport};
pub use engine::{Engine, MAX_PENDING_SOUND_CUES, SoundCue};
pub use entity::{Behavior, Entity, EntityDesc, EntityList, Idle};
pub use error::EngineError;
pub use overlay::{Overlay, Widget};
