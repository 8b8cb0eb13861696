//! Scene Module
//!
//! CPU-side scene graph: a flat collection of mesh instances referencing
//! shared unit geometries and materials. The renderer reads this every frame;
//! nothing here touches the GPU, which keeps the whole scene testable headless.

use glam::{Quat, Vec3};

/// Shared unit geometries. Every mesh instance references one of these; the
/// renderer uploads each geometry to the GPU exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryId {
    /// Unit-radius UV sphere, scaled per instance
    Sphere,
    /// Unit cube, scaled per instance
    Cube,
    /// Icosahedron used by the marble
    Icosahedron,
    /// 50x50 floor plane
    Floor,
}

impl GeometryId {
    /// All geometries the renderer must upload.
    pub const ALL: [GeometryId; 4] = [
        GeometryId::Sphere,
        GeometryId::Cube,
        GeometryId::Icosahedron,
        GeometryId::Floor,
    ];
}

/// Shared materials, resolved to shading constants by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialId {
    /// Metallic/rough look for spawned spheres
    Shiny,
    /// Wood look for spawned boxes and the vehicle
    Wood,
    /// Matcap-like crystal look for the marble
    Crystal,
    /// Dark reflective look for the ground plane
    Mirror,
}

/// One visual object: shared geometry + material + a transform.
#[derive(Debug, Clone, Copy)]
pub struct MeshInstance {
    pub geometry: GeometryId,
    pub material: MaterialId,
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl MeshInstance {
    /// An instance at the origin with identity rotation and unit scale.
    pub fn new(geometry: GeometryId, material: MaterialId) -> Self {
        Self {
            geometry,
            material,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }
}

/// Handle to a mesh instance in a [`Scene`].
///
/// Handles stay valid until the instance is removed; a removed handle is safe
/// to use (lookups return `None`, removal is a no-op).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(usize);

/// Flat mesh container with free-slot reuse.
#[derive(Default)]
pub struct Scene {
    slots: Vec<Option<MeshInstance>>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an instance, reusing the first free slot.
    pub fn add(&mut self, instance: MeshInstance) -> MeshHandle {
        if let Some(index) = self.slots.iter().position(Option::is_none) {
            self.slots[index] = Some(instance);
            MeshHandle(index)
        } else {
            self.slots.push(Some(instance));
            MeshHandle(self.slots.len() - 1)
        }
    }

    /// Remove an instance. No-op if already removed.
    pub fn remove(&mut self, handle: MeshHandle) {
        if let Some(slot) = self.slots.get_mut(handle.0) {
            *slot = None;
        }
    }

    pub fn contains(&self, handle: MeshHandle) -> bool {
        self.get(handle).is_some()
    }

    pub fn get(&self, handle: MeshHandle) -> Option<&MeshInstance> {
        self.slots.get(handle.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, handle: MeshHandle) -> Option<&mut MeshInstance> {
        self.slots.get_mut(handle.0).and_then(Option::as_mut)
    }

    /// Number of live instances.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over live instances.
    pub fn iter(&self) -> impl Iterator<Item = (MeshHandle, &MeshInstance)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|mesh| (MeshHandle(index), mesh)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_get() {
        let mut scene = Scene::new();
        let handle = scene.add(
            MeshInstance::new(GeometryId::Sphere, MaterialId::Shiny)
                .with_scale(Vec3::splat(0.4)),
        );

        assert!(scene.contains(handle));
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.get(handle).unwrap().scale, Vec3::splat(0.4));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut scene = Scene::new();
        let handle = scene.add(MeshInstance::new(GeometryId::Cube, MaterialId::Wood));

        scene.remove(handle);
        assert!(!scene.contains(handle));
        assert!(scene.is_empty());

        // Removing again must not panic or disturb anything.
        scene.remove(handle);
        assert!(scene.is_empty());
    }

    #[test]
    fn test_slot_reuse() {
        let mut scene = Scene::new();
        let a = scene.add(MeshInstance::new(GeometryId::Sphere, MaterialId::Shiny));
        let _b = scene.add(MeshInstance::new(GeometryId::Cube, MaterialId::Wood));

        scene.remove(a);
        let c = scene.add(MeshInstance::new(GeometryId::Floor, MaterialId::Mirror));

        // The freed slot is reused, so the old handle now sees the new mesh.
        assert_eq!(a, c);
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.get(c).unwrap().geometry, GeometryId::Floor);
    }

    #[test]
    fn test_iter_skips_removed() {
        let mut scene = Scene::new();
        let a = scene.add(MeshInstance::new(GeometryId::Sphere, MaterialId::Shiny));
        scene.add(MeshInstance::new(GeometryId::Cube, MaterialId::Wood));
        scene.remove(a);

        let geometries: Vec<GeometryId> = scene.iter().map(|(_, m)| m.geometry).collect();
        assert_eq!(geometries, vec![GeometryId::Cube]);
    }
}
