//! Spawners
//!
//! Factory methods producing matched (mesh, body) pairs from the shared unit
//! geometries. Registration is atomic: by the time a spawner returns, the
//! mesh is in the scene, the body is in the world, the collision sound is
//! bound and the pair is in the registry. No partial state is observable.
//!
//! Bodies are constructed at an elevated staging position and immediately
//! relocated to their target before any physics step runs, so no drop is
//! visible.

use glam::Vec3;

use crate::audio::SoundCue;
use crate::scene::{GeometryId, MaterialId, MeshInstance};

use super::context::PlaygroundContext;
use super::registry::SpawnedObject;

impl PlaygroundContext {
    /// Spawn a metal sphere of the given radius at `position`.
    pub fn spawn_sphere(&mut self, radius: f32, position: Vec3) -> SpawnedObject {
        let mesh = self.scene.add(
            MeshInstance::new(GeometryId::Sphere, MaterialId::Shiny)
                .with_position(position)
                .with_scale(Vec3::splat(radius)),
        );

        let body = self.world.add_sphere_body(
            radius,
            self.config.spawn.default_mass,
            self.staging_position(),
        );
        self.world.set_translation(body, position);

        self.register(mesh, body, SoundCue::Metal)
    }

    /// Spawn a wooden box with edge lengths `width` x `height` x `depth` at
    /// `position`.
    pub fn spawn_box(
        &mut self,
        width: f32,
        height: f32,
        depth: f32,
        position: Vec3,
    ) -> SpawnedObject {
        let mesh = self.scene.add(
            MeshInstance::new(GeometryId::Cube, MaterialId::Wood)
                .with_position(position)
                .with_scale(Vec3::new(width, height, depth)),
        );

        let body = self.world.add_box_body(
            Vec3::new(width / 2.0, height / 2.0, depth / 2.0),
            self.config.spawn.default_mass,
            self.staging_position(),
        );
        self.world.set_translation(body, position);

        self.register(mesh, body, SoundCue::Generic)
    }

    // No cylinder spawner: spheres and boxes are the only spawnable props.
    // Adding one would follow the same pattern with a cylinder collider and
    // a new unit geometry.

    fn staging_position(&self) -> Vec3 {
        Vec3::new(0.0, self.config.spawn.staging_height, 0.0)
    }

    fn register(
        &mut self,
        mesh: crate::scene::MeshHandle,
        body: crate::physics::BodyHandle,
        cue: SoundCue,
    ) -> SpawnedObject {
        self.sound_bindings.insert(body, cue);
        let object = SpawnedObject { mesh, body, cue };
        self.registry.add(object);
        object
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playground::config::PlaygroundConfig;

    #[test]
    fn test_spawn_sphere_pair_is_complete() {
        let mut ctx = PlaygroundContext::new(PlaygroundConfig::default());
        let object = ctx.spawn_sphere(0.3, Vec3::new(1.0, 3.0, -1.0));

        assert!(ctx.scene.contains(object.mesh));
        assert!(ctx.world.contains(object.body));
        assert_eq!(object.cue, SoundCue::Metal);
        assert_eq!(ctx.registry.len(), 1);
        assert_eq!(
            ctx.sound_bindings().get(&object.body),
            Some(&SoundCue::Metal)
        );

        // Mesh scale matches the collider radius on every axis.
        let mesh = ctx.scene.get(object.mesh).unwrap();
        assert_eq!(mesh.scale, Vec3::splat(0.3));
        assert_eq!(ctx.world.ball_radius(object.body), Some(0.3));
    }

    #[test]
    fn test_spawn_box_half_extents() {
        let mut ctx = PlaygroundContext::new(PlaygroundConfig::default());
        let object = ctx.spawn_box(1.0, 0.5, 0.8, Vec3::new(0.0, 3.0, 0.0));

        assert_eq!(object.cue, SoundCue::Generic);
        assert_eq!(
            ctx.world.cuboid_half_extents(object.body),
            Some(Vec3::new(0.5, 0.25, 0.4))
        );
        let mesh = ctx.scene.get(object.mesh).unwrap();
        assert_eq!(mesh.scale, Vec3::new(1.0, 0.5, 0.8));
    }

    #[test]
    fn test_body_lands_at_target_not_staging() {
        let mut ctx = PlaygroundContext::new(PlaygroundConfig::default());
        let target = Vec3::new(1.0, 3.0, -1.0);
        let object = ctx.spawn_sphere(0.3, target);

        // The staging elevation must not be observable after the spawn call.
        assert_eq!(ctx.world.translation(object.body), Some(target));
    }

    #[test]
    fn test_spawned_mass_is_fixed() {
        let mut ctx = PlaygroundContext::new(PlaygroundConfig::default());
        let sphere = ctx.spawn_sphere(0.3, Vec3::new(0.0, 3.0, 0.0));
        let cube = ctx.spawn_box(1.0, 1.0, 1.0, Vec3::new(2.0, 3.0, 0.0));

        assert_eq!(ctx.world.body_mass(sphere.body), Some(1.0));
        assert_eq!(ctx.world.body_mass(cube.body), Some(1.0));
    }
}
