//! Frame Synchronization
//!
//! Advances the playground by one frame: step physics, fire collision sounds,
//! then copy body transforms onto meshes. The copy is strictly one-way; the
//! scene never writes back into the physics world.

use std::collections::HashMap;
use std::time::Instant;

use crate::audio::{SoundBank, SoundCue};
use crate::physics::{BodyHandle, ContactEvent};

use super::context::PlaygroundContext;

/// Wall-clock delta source for the frame loop.
pub struct FrameClock {
    last: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Seconds since the previous call.
    pub fn delta(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        dt
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve contact events against the sound bindings. A contact where both
/// bodies carry a binding fires both cues, each gated independently later.
pub fn collect_sound_triggers(
    bindings: &HashMap<BodyHandle, SoundCue>,
    events: &[ContactEvent],
) -> Vec<(SoundCue, f32)> {
    let mut triggers = Vec::new();
    for event in events {
        for body in [event.body_a, event.body_b] {
            if let Some(&cue) = bindings.get(&body) {
                triggers.push((cue, event.impact_velocity));
            }
        }
    }
    triggers
}

/// Advance the playground by one frame.
///
/// Order matters: physics steps first, sounds fire from the contacts that
/// step produced, and only then are the fresh body transforms copied onto
/// the meshes, so a rendered frame never shows stale physics state.
pub fn advance_frame(ctx: &mut PlaygroundContext, dt: f32, sounds: &SoundBank) {
    ctx.world.step(dt);

    let events = ctx.world.take_contact_events();
    for (cue, impact) in collect_sound_triggers(ctx.sound_bindings(), &events) {
        sounds.play(cue, impact);
    }

    // The marble and the vehicle copy position only: the gem keeps its fixed
    // facing and the vehicle box stays level no matter how the chassis spins.
    if let Some(position) = ctx.world.translation(ctx.marble_body) {
        if let Some(mesh) = ctx.scene.get_mut(ctx.marble_mesh) {
            mesh.position = position;
        }
    }
    if let Some(position) = ctx.world.translation(ctx.vehicle_chassis) {
        if let Some(mesh) = ctx.scene.get_mut(ctx.vehicle_mesh) {
            mesh.position = position;
        }
    }

    // Spawned pairs follow their bodies fully, position and rotation.
    for object in ctx.registry.iter() {
        let (Some(position), Some(rotation)) = (
            ctx.world.translation(object.body),
            ctx.world.rotation(object.body),
        ) else {
            continue;
        };
        if let Some(mesh) = ctx.scene.get_mut(object.mesh) {
            mesh.position = position;
            mesh.rotation = rotation;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playground::config::PlaygroundConfig;
    use glam::{Quat, Vec3};
    use crate::physics::{PhysicsWorld, WorldSettings};

    #[test]
    fn test_meshes_track_bodies() {
        let mut ctx = PlaygroundContext::new(PlaygroundConfig::default());
        let object = ctx.spawn_sphere(0.3, Vec3::new(0.0, 5.0, 0.0));
        let sounds = SoundBank::disabled();

        for _ in 0..30 {
            advance_frame(&mut ctx, 1.0 / 60.0, &sounds);
        }

        let mesh = *ctx.scene.get(object.mesh).unwrap();
        assert_eq!(mesh.position, ctx.world.translation(object.body).unwrap());
        assert_eq!(mesh.rotation, ctx.world.rotation(object.body).unwrap());
        assert!(mesh.position.y < 5.0, "sphere should be falling");
    }

    #[test]
    fn test_vehicle_mesh_keeps_identity_rotation() {
        let mut ctx = PlaygroundContext::new(PlaygroundConfig::default());
        let sounds = SoundBank::disabled();

        // The chassis enters with spin, so its body rotation diverges from
        // identity while the mesh stays put.
        for _ in 0..60 {
            advance_frame(&mut ctx, 1.0 / 60.0, &sounds);
        }

        let mesh = ctx.scene.get(ctx.vehicle_mesh).unwrap();
        assert_eq!(mesh.rotation, Quat::IDENTITY);
        assert_eq!(
            mesh.position,
            ctx.world.translation(ctx.vehicle_chassis).unwrap()
        );
    }

    #[test]
    fn test_marble_mesh_keeps_identity_rotation() {
        let mut ctx = PlaygroundContext::new(PlaygroundConfig::default());
        let sounds = SoundBank::disabled();
        ctx.handle_key(crate::input::KeyCode::W);

        for _ in 0..120 {
            advance_frame(&mut ctx, 1.0 / 60.0, &sounds);
        }

        let mesh = ctx.scene.get(ctx.marble_mesh).unwrap();
        assert_eq!(mesh.rotation, Quat::IDENTITY);
    }

    #[test]
    fn test_collect_sound_triggers_routes_cues() {
        let mut world = PhysicsWorld::new(WorldSettings::default());
        let a = world.add_sphere_body(0.5, 1.0, Vec3::ZERO);
        let b = world.add_sphere_body(0.5, 1.0, Vec3::new(2.0, 0.0, 0.0));
        let unbound = world.add_sphere_body(0.5, 1.0, Vec3::new(4.0, 0.0, 0.0));

        let mut bindings = HashMap::new();
        bindings.insert(a, SoundCue::Glass);
        bindings.insert(b, SoundCue::Metal);

        let events = [
            ContactEvent {
                body_a: a,
                body_b: b,
                impact_velocity: 2.0,
            },
            ContactEvent {
                body_a: unbound,
                body_b: unbound,
                impact_velocity: 9.0,
            },
        ];

        let triggers = collect_sound_triggers(&bindings, &events);
        // Both bound bodies of the first contact fire; the unbound contact
        // fires nothing.
        assert_eq!(triggers.len(), 2);
        assert!(triggers.contains(&(SoundCue::Glass, 2.0)));
        assert!(triggers.contains(&(SoundCue::Metal, 2.0)));
    }
}
