//! Object Registry
//!
//! Tracks every spawned (mesh, body) pair so the frame loop can copy body
//! transforms onto meshes and the reset action can tear everything down. The
//! fixed scene objects (marble, vehicle, floor) live outside the registry.

use crate::audio::SoundCue;
use crate::physics::BodyHandle;
use crate::scene::MeshHandle;

/// One spawned mesh/body pair and its collision sound.
#[derive(Debug, Clone, Copy)]
pub struct SpawnedObject {
    pub mesh: MeshHandle,
    pub body: BodyHandle,
    pub cue: SoundCue,
}

/// Flat list of live spawned pairs, in spawn order.
#[derive(Default)]
pub struct ObjectRegistry {
    objects: Vec<SpawnedObject>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, object: SpawnedObject) {
        self.objects.push(object);
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpawnedObject> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Empty the registry, handing ownership of the pairs to the caller for
    /// teardown.
    pub fn take_all(&mut self) -> Vec<SpawnedObject> {
        std::mem::take(&mut self.objects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use crate::physics::{PhysicsWorld, WorldSettings};
    use crate::scene::{GeometryId, MaterialId, MeshInstance, Scene};

    fn spawned(scene: &mut Scene, world: &mut PhysicsWorld, cue: SoundCue) -> SpawnedObject {
        SpawnedObject {
            mesh: scene.add(MeshInstance::new(GeometryId::Sphere, MaterialId::Shiny)),
            body: world.add_sphere_body(0.3, 1.0, Vec3::ZERO),
            cue,
        }
    }

    #[test]
    fn test_take_all_empties() {
        let mut scene = Scene::new();
        let mut world = PhysicsWorld::new(WorldSettings::default());
        let mut registry = ObjectRegistry::new();
        registry.add(spawned(&mut scene, &mut world, SoundCue::Metal));
        registry.add(spawned(&mut scene, &mut world, SoundCue::Generic));
        assert_eq!(registry.len(), 2);

        let taken = registry.take_all();
        assert_eq!(taken.len(), 2);
        assert!(registry.is_empty());

        // A second take yields nothing.
        assert!(registry.take_all().is_empty());
    }
}
