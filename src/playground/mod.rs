//! Playground Module
//!
//! The game-side layer over the engine: configuration, the application
//! context, spawners, the object registry and the per-frame synchronization
//! loop that ties physics, rendering and audio together.

pub mod config;
pub mod context;
pub mod registry;
pub mod spawn;
pub mod sync;

pub use config::{CameraTuning, ConfigError, PlaygroundConfig, SpawnTuning};
pub use context::PlaygroundContext;
pub use registry::{ObjectRegistry, SpawnedObject};
pub use sync::{advance_frame, collect_sound_triggers, FrameClock};
