//! Tumblebox Engine Library
//!
//! A small real-time engine for the tumblebox physics playground. Rendering is
//! delegated to wgpu and rigid-body dynamics to rapier3d; the engine's own code
//! is the glue between the two worlds plus platform-agnostic input and audio.
//!
//! # Modules
//!
//! - [`physics`] - Rigid-body world wrapped around rapier3d, plus the raycast vehicle rig
//! - [`scene`] - CPU-side scene graph: mesh instances over shared unit geometries
//! - [`render`] - wgpu forward renderer drawing the scene with instanced geometry
//! - [`camera`] - Damped orbit camera and perspective projection
//! - [`input`] - Platform-agnostic key codes and the key-to-force mapping
//! - [`audio`] - Collision sound cues with impact-strength gating
//!
//! # Example
//!
//! ```ignore
//! use tumblebox_engine::playground::{PlaygroundConfig, PlaygroundContext, advance_frame};
//! use tumblebox_engine::audio::SoundBank;
//!
//! let mut ctx = PlaygroundContext::new(PlaygroundConfig::default());
//! let sounds = SoundBank::disabled();
//!
//! // Spawn a few props and run one frame.
//! ctx.spawn_sphere(0.4, glam::Vec3::new(0.0, 3.0, 0.0));
//! ctx.spawn_box(1.0, 0.5, 0.8, glam::Vec3::new(1.0, 3.0, 0.0));
//! advance_frame(&mut ctx, 1.0 / 60.0, &sounds);
//! ```

pub mod audio;
pub mod camera;
pub mod input;
pub mod physics;
pub mod render;
pub mod scene;

// Playground-specific modules (located in src/playground/ directory)
#[path = "../../src/playground/mod.rs"]
pub mod playground;

// Re-export commonly used types at crate level for convenience
pub use camera::{OrbitController, Projection};
pub use input::{ControlAction, ForceCommand, KeyCode};
pub use physics::{BodyHandle, ContactEvent, PhysicsWorld};
pub use scene::{GeometryId, MaterialId, MeshHandle, MeshInstance, Scene};
