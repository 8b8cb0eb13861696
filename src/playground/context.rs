//! Playground Context
//!
//! The single application-context struct owning every collaborating world:
//! physics, scene, registry and sound bindings, plus the fixed objects that
//! live outside the registry (floor, marble, vehicle). Constructed once at
//! startup and passed by reference everywhere else.

use std::collections::HashMap;

use glam::Vec3;

use crate::audio::SoundCue;
use crate::input::{self, ControlAction, KeyCode};
use crate::physics::{BodyHandle, PhysicsWorld, VehicleRig, WheelDescriptor};
use crate::scene::{GeometryId, MaterialId, MeshHandle, MeshInstance, Scene};

use super::config::PlaygroundConfig;
use super::registry::ObjectRegistry;

/// Everything the frame loop needs, in one place.
pub struct PlaygroundContext {
    pub config: PlaygroundConfig,
    pub world: PhysicsWorld,
    pub scene: Scene,
    pub registry: ObjectRegistry,

    /// The controllable marble: glass gem mesh over a ball collider.
    pub marble_mesh: MeshHandle,
    pub marble_body: BodyHandle,

    /// The controllable vehicle: box mesh over the chassis body.
    pub vehicle_mesh: MeshHandle,
    pub vehicle_chassis: BodyHandle,

    pub(crate) sound_bindings: HashMap<BodyHandle, SoundCue>,
    pub(crate) rng: SimpleRng,
}

impl PlaygroundContext {
    /// Build the fixed scene: mirror floor, marble and vehicle.
    pub fn new(config: PlaygroundConfig) -> Self {
        let spawn = config.spawn;
        let mut world = PhysicsWorld::new(config.physics);
        let mut scene = Scene::new();
        let mut sound_bindings = HashMap::new();

        world.add_ground_plane();
        scene.add(
            MeshInstance::new(GeometryId::Floor, MaterialId::Mirror)
                .with_position(Vec3::new(0.0, -spawn.floor_offset, 0.0))
                .with_scale(Vec3::new(spawn.floor_size, 1.0, spawn.floor_size)),
        );

        let marble_body =
            world.add_sphere_body(spawn.marble_radius, spawn.default_mass, spawn.marble_start);
        let marble_mesh = scene.add(
            MeshInstance::new(GeometryId::Icosahedron, MaterialId::Crystal)
                .with_position(spawn.marble_start)
                .with_scale(Vec3::splat(spawn.marble_visual_radius)),
        );
        sound_bindings.insert(marble_body, SoundCue::Glass);

        let vehicle_chassis = world.add_box_body(
            spawn.chassis_half_extents,
            spawn.default_mass,
            spawn.chassis_start,
        );
        world.set_angular_velocity(vehicle_chassis, spawn.chassis_spin);
        world.attach_vehicle(VehicleRig::new(
            vehicle_chassis,
            &WheelDescriptor::four_wheel_layout(),
        ));
        let vehicle_mesh = scene.add(
            MeshInstance::new(GeometryId::Cube, MaterialId::Wood)
                .with_position(spawn.chassis_start)
                .with_scale(spawn.chassis_half_extents * 2.0),
        );

        Self {
            config,
            world,
            scene,
            registry: ObjectRegistry::new(),
            marble_mesh,
            marble_body,
            vehicle_mesh,
            vehicle_chassis,
            sound_bindings,
            rng: SimpleRng::new(0x7ab5_1e5d),
        }
    }

    /// Collision sound bound to each body.
    pub fn sound_bindings(&self) -> &HashMap<BodyHandle, SoundCue> {
        &self.sound_bindings
    }

    /// Apply a key: drive forces go to both controllable bodies, control
    /// actions go to the spawners and the registry.
    pub fn handle_key(&mut self, key: KeyCode) {
        if let Some(cmd) = input::force_for_key(key) {
            self.world
                .apply_local_force(self.marble_body, cmd.force, cmd.point);
            self.world
                .apply_local_force(self.vehicle_chassis, cmd.force, cmd.point);
        }
        match input::action_for_key(key) {
            Some(ControlAction::SpawnSphere) => {
                self.spawn_random_sphere();
            }
            Some(ControlAction::SpawnBox) => {
                self.spawn_random_box();
            }
            Some(ControlAction::Reset) => self.reset(),
            None => {}
        }
    }

    /// Spawn a sphere with a random radius at a random spot above the floor.
    pub fn spawn_random_sphere(&mut self) {
        let radius = self.rng.range(0.05, 0.5);
        let position = self.random_drop_position();
        self.spawn_sphere(radius, position);
    }

    /// Spawn a box with random edge lengths at a random spot above the floor.
    pub fn spawn_random_box(&mut self) {
        let width = self.rng.range(0.1, 1.0);
        let height = self.rng.range(0.1, 1.0);
        let depth = self.rng.range(0.1, 1.0);
        let position = self.random_drop_position();
        self.spawn_box(width, height, depth, position);
    }

    fn random_drop_position(&mut self) -> Vec3 {
        Vec3::new(
            (self.rng.next_f32() - 0.5) * 3.0,
            3.0,
            (self.rng.next_f32() - 0.5) * 3.0,
        )
    }

    /// Remove every spawned pair from both worlds. Fixed objects stay.
    /// Idempotent: a second reset finds an empty registry and does nothing.
    pub fn reset(&mut self) {
        for object in self.registry.take_all() {
            self.world.remove_body(object.body);
            self.scene.remove(object.mesh);
            self.sound_bindings.remove(&object.body);
        }
    }
}

/// Minimal xorshift32 RNG for spawn randomization. Deterministic per seed,
/// which keeps spawn-heavy tests reproducible.
pub(crate) struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub(crate) fn new(seed: u32) -> Self {
        Self { state: seed.max(1) }
    }

    /// Generate a random f32 in [0.0, 1.0)
    pub(crate) fn next_f32(&mut self) -> f32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        (x as f32) / (u32::MAX as f32)
    }

    /// Generate a random f32 in [min, max)
    pub(crate) fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_scene_setup() {
        let ctx = PlaygroundContext::new(PlaygroundConfig::default());

        // Floor mesh + marble + vehicle.
        assert_eq!(ctx.scene.len(), 3);
        // Ground body + marble + chassis.
        assert_eq!(ctx.world.body_count(), 3);
        assert!(ctx.registry.is_empty());

        assert_eq!(ctx.world.ball_radius(ctx.marble_body), Some(0.5));
        assert_eq!(
            ctx.world.cuboid_half_extents(ctx.vehicle_chassis),
            Some(Vec3::new(2.0, 1.0, 0.5))
        );
        // The marble mesh is drawn larger than its collider.
        let marble = ctx.scene.get(ctx.marble_mesh).unwrap();
        assert_eq!(marble.scale, Vec3::splat(0.75));
        assert_eq!(
            ctx.sound_bindings.get(&ctx.marble_body),
            Some(&SoundCue::Glass)
        );
    }

    #[test]
    fn test_drive_key_moves_both_bodies() {
        let mut ctx = PlaygroundContext::new(PlaygroundConfig::default());
        ctx.handle_key(KeyCode::W);
        ctx.world.step(1.0 / 60.0);

        let marble_vel = ctx.world.linear_velocity(ctx.marble_body).unwrap();
        assert!(marble_vel.x > 0.0, "marble vx = {}", marble_vel.x);
        let chassis_vel = ctx.world.linear_velocity(ctx.vehicle_chassis).unwrap();
        assert!(chassis_vel.x > 0.0, "chassis vx = {}", chassis_vel.x);
    }

    #[test]
    fn test_reset_removes_only_spawned_objects() {
        let mut ctx = PlaygroundContext::new(PlaygroundConfig::default());
        ctx.handle_key(KeyCode::Digit1);
        ctx.handle_key(KeyCode::Digit2);
        assert_eq!(ctx.registry.len(), 2);
        assert_eq!(ctx.scene.len(), 5);

        ctx.reset();
        assert!(ctx.registry.is_empty());
        assert_eq!(ctx.scene.len(), 3);
        assert_eq!(ctx.world.body_count(), 3);
        assert!(ctx.world.contains(ctx.marble_body));
        assert!(ctx.world.contains(ctx.vehicle_chassis));

        // Second reset is a no-op.
        ctx.reset();
        assert_eq!(ctx.scene.len(), 3);
    }

    #[test]
    fn test_rng_is_deterministic() {
        let mut a = SimpleRng::new(42);
        let mut b = SimpleRng::new(42);
        for _ in 0..16 {
            assert_eq!(a.next_f32(), b.next_f32());
        }
        let v = a.range(0.05, 0.5);
        assert!((0.05..0.5).contains(&v));
    }
}
