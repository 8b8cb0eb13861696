//! Physics Module
//!
//! Wraps rapier3d behind the small collaborator surface the playground needs:
//! add/remove rigid bodies, a fixed-timestep `step` with a real-time delta hint
//! and a bounded substep budget, local-space force application, and collision
//! events carrying an impact-velocity scalar.
//!
//! All public types speak glam (`Vec3`/`Quat`); conversion to nalgebra happens
//! at this boundary and nowhere else.

pub mod vehicle;

pub use vehicle::{VehicleRig, WheelDescriptor};

use glam::{Quat, Vec3};
use rapier3d::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Handle to a rigid body owned by a [`PhysicsWorld`].
///
/// Stale handles are safe: every accessor returns `None` or no-ops once the
/// body has been removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle(pub(crate) RigidBodyHandle);

/// A contact that began during the most recent `step`.
///
/// `impact_velocity` is the magnitude of the relative linear velocity of the
/// two bodies projected onto the contact normal, measured when the contact
/// started.
#[derive(Debug, Clone, Copy)]
pub struct ContactEvent {
    pub body_a: BodyHandle,
    pub body_b: BodyHandle,
    pub impact_velocity: f32,
}

/// World-level physics tuning.
///
/// `Default` is the playground's built-in tuning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WorldSettings {
    /// Gravity acceleration (m/s^2)
    pub gravity: Vec3,
    /// Nominal fixed timestep (seconds)
    pub fixed_timestep: f32,
    /// Maximum catch-up substeps per `step` call
    pub max_substeps: u32,
    /// Surface friction applied to every collider
    pub friction: f32,
    /// Surface restitution (bounciness) applied to every collider
    pub restitution: f32,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -9.82, 0.0),
            fixed_timestep: 1.0 / 60.0,
            max_substeps: 3,
            friction: 0.1,
            restitution: 0.7,
        }
    }
}

/// Collects rapier collision events during a pipeline step.
///
/// rapier requires the event handler to be `Sync`, hence the internal mutex;
/// the buffer is only ever drained on the frame thread.
#[derive(Default)]
struct ContactCollector {
    started: Mutex<Vec<ContactEvent>>,
}

impl EventHandler for ContactCollector {
    fn handle_collision_event(
        &self,
        bodies: &RigidBodySet,
        colliders: &ColliderSet,
        event: CollisionEvent,
        contact_pair: Option<&ContactPair>,
    ) {
        let CollisionEvent::Started(c1, c2, _) = event else {
            return;
        };
        let (Some(co1), Some(co2)) = (colliders.get(c1), colliders.get(c2)) else {
            return;
        };
        let (Some(b1), Some(b2)) = (co1.parent(), co2.parent()) else {
            return;
        };

        let normal = contact_pair
            .and_then(|pair| pair.manifolds.first())
            .map(|manifold| manifold.data.normal)
            .unwrap_or_else(|| vector![0.0, 1.0, 0.0]);
        let v1 = bodies
            .get(b1)
            .map(|b| *b.linvel())
            .unwrap_or_else(|| vector![0.0, 0.0, 0.0]);
        let v2 = bodies
            .get(b2)
            .map(|b| *b.linvel())
            .unwrap_or_else(|| vector![0.0, 0.0, 0.0]);
        let impact_velocity = (v1 - v2).dot(&normal).abs();

        if let Ok(mut started) = self.started.lock() {
            started.push(ContactEvent {
                body_a: BodyHandle(b1),
                body_b: BodyHandle(b2),
                impact_velocity,
            });
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
    }
}

/// Rigid-body world: rapier sets and pipeline plus the fixed-step accumulator.
///
/// Single-threaded by design; mutated only from the frame thread.
pub struct PhysicsWorld {
    settings: WorldSettings,
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    collector: ContactCollector,
    vehicles: Vec<VehicleRig>,
    accumulator: f32,
    events: Vec<ContactEvent>,
}

impl PhysicsWorld {
    /// Create an empty world with the given tuning.
    pub fn new(settings: WorldSettings) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = settings.fixed_timestep;

        Self {
            settings,
            gravity: vector![settings.gravity.x, settings.gravity.y, settings.gravity.z],
            integration_parameters,
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            collector: ContactCollector::default(),
            vehicles: Vec::new(),
            accumulator: 0.0,
            events: Vec::new(),
        }
    }

    /// World tuning this world was created with.
    pub fn settings(&self) -> &WorldSettings {
        &self.settings
    }

    /// Add a dynamic body with a ball collider.
    pub fn add_sphere_body(&mut self, radius: f32, mass: f32, position: Vec3) -> BodyHandle {
        debug_assert!(radius > 0.0, "sphere radius must be positive");
        let collider = self
            .prop_collider(ColliderBuilder::ball(radius), mass)
            .build();
        self.insert_dynamic(collider, position)
    }

    /// Add a dynamic body with a cuboid collider of the given half-extents.
    pub fn add_box_body(&mut self, half_extents: Vec3, mass: f32, position: Vec3) -> BodyHandle {
        debug_assert!(
            half_extents.cmpgt(Vec3::ZERO).all(),
            "box half-extents must be positive"
        );
        let collider = self
            .prop_collider(
                ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z),
                mass,
            )
            .build();
        self.insert_dynamic(collider, position)
    }

    /// Add the static ground: an upward half-space at y = 0.
    pub fn add_ground_plane(&mut self) -> BodyHandle {
        let body = RigidBodyBuilder::fixed().build();
        let handle = self.bodies.insert(body);
        let collider = ColliderBuilder::halfspace(UnitVector::new_normalize(vector![
            0.0, 1.0, 0.0
        ]))
        .friction(self.settings.friction)
        .restitution(self.settings.restitution)
        .active_events(ActiveEvents::COLLISION_EVENTS)
        .build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        BodyHandle(handle)
    }

    fn prop_collider(&self, builder: ColliderBuilder, mass: f32) -> ColliderBuilder {
        builder
            .mass(mass)
            .friction(self.settings.friction)
            .restitution(self.settings.restitution)
            .active_events(ActiveEvents::COLLISION_EVENTS)
    }

    fn insert_dynamic(&mut self, collider: Collider, position: Vec3) -> BodyHandle {
        let body = RigidBodyBuilder::dynamic()
            .translation(vector![position.x, position.y, position.z])
            .can_sleep(true)
            .build();
        let handle = self.bodies.insert(body);
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        BodyHandle(handle)
    }

    /// Remove a body and its colliders. No-op if the handle is stale.
    pub fn remove_body(&mut self, handle: BodyHandle) {
        self.bodies.remove(
            handle.0,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    /// Whether the handle still refers to a live body.
    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.bodies.get(handle.0).is_some()
    }

    /// Number of live bodies (including static ones).
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Teleport a body, waking it.
    pub fn set_translation(&mut self, handle: BodyHandle, position: Vec3) {
        if let Some(body) = self.bodies.get_mut(handle.0) {
            body.set_translation(vector![position.x, position.y, position.z], true);
        }
    }

    /// Set a body's angular velocity, waking it.
    pub fn set_angular_velocity(&mut self, handle: BodyHandle, angvel: Vec3) {
        if let Some(body) = self.bodies.get_mut(handle.0) {
            body.set_angvel(vector![angvel.x, angvel.y, angvel.z], true);
        }
    }

    /// Body world-space position.
    pub fn translation(&self, handle: BodyHandle) -> Option<Vec3> {
        self.bodies
            .get(handle.0)
            .map(|body| to_glam_vec(body.translation()))
    }

    /// Body world-space orientation.
    pub fn rotation(&self, handle: BodyHandle) -> Option<Quat> {
        self.bodies.get(handle.0).map(|body| {
            let q = body.rotation().quaternion().coords;
            Quat::from_xyzw(q.x, q.y, q.z, q.w)
        })
    }

    /// Body linear velocity.
    pub fn linear_velocity(&self, handle: BodyHandle) -> Option<Vec3> {
        self.bodies
            .get(handle.0)
            .map(|body| to_glam_vec(body.linvel()))
    }

    /// Body mass as computed from its colliders.
    pub fn body_mass(&self, handle: BodyHandle) -> Option<f32> {
        self.bodies.get(handle.0).map(|body| body.mass())
    }

    /// Radius of the body's ball collider, if it has one.
    pub fn ball_radius(&self, handle: BodyHandle) -> Option<f32> {
        self.first_collider(handle)
            .and_then(|c| c.shape().as_ball())
            .map(|ball| ball.radius)
    }

    /// Half-extents of the body's cuboid collider, if it has one.
    pub fn cuboid_half_extents(&self, handle: BodyHandle) -> Option<Vec3> {
        self.first_collider(handle)
            .and_then(|c| c.shape().as_cuboid())
            .map(|cuboid| to_glam_vec(&cuboid.half_extents))
    }

    fn first_collider(&self, handle: BodyHandle) -> Option<&Collider> {
        self.bodies
            .get(handle.0)
            .and_then(|body| body.colliders().first())
            .and_then(|ch| self.colliders.get(*ch))
    }

    /// Apply a force expressed in the body's local frame at a local-frame
    /// point. The contribution is consumed by the next physics substep.
    pub fn apply_local_force(&mut self, handle: BodyHandle, force: Vec3, point: Vec3) {
        if let Some(body) = self.bodies.get_mut(handle.0) {
            let pose = *body.position();
            let world_force = pose.rotation * vector![force.x, force.y, force.z];
            let world_point = pose * point![point.x, point.y, point.z];
            body.add_force_at_point(world_force, world_point, true);
        }
    }

    /// Attach a raycast vehicle rig; it is advanced inside every substep.
    pub fn attach_vehicle(&mut self, rig: VehicleRig) {
        self.vehicles.push(rig);
    }

    /// Advance the world.
    ///
    /// `dt` is the measured real-time delta; the world consumes it in fixed
    /// substeps of `fixed_timestep`, at most `max_substeps` of them per call.
    /// Time the substep budget cannot absorb beyond one extra fixed step is
    /// discarded. Returns the number of substeps performed.
    pub fn step(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.max(0.0);
        let fixed = self.settings.fixed_timestep;

        let mut substeps = 0;
        while self.accumulator >= fixed && substeps < self.settings.max_substeps {
            self.substep();
            self.accumulator -= fixed;
            substeps += 1;
        }
        if self.accumulator > fixed {
            self.accumulator = fixed;
        }

        if let Ok(mut started) = self.collector.started.lock() {
            self.events.extend(started.drain(..));
        }
        substeps
    }

    fn substep(&mut self) {
        let Self {
            pipeline,
            gravity,
            integration_parameters,
            islands,
            broad_phase,
            narrow_phase,
            bodies,
            colliders,
            impulse_joints,
            multibody_joints,
            ccd_solver,
            query_pipeline,
            collector,
            vehicles,
            ..
        } = self;

        pipeline.step(
            gravity,
            integration_parameters,
            islands,
            broad_phase,
            narrow_phase,
            bodies,
            colliders,
            impulse_joints,
            multibody_joints,
            ccd_solver,
            Some(&mut *query_pipeline),
            &(),
            &*collector,
        );

        for rig in vehicles.iter_mut() {
            rig.update(integration_parameters.dt, bodies, colliders, query_pipeline);
        }

        // One-shot force semantics: contributions applied via
        // `apply_local_force` live for exactly one substep.
        for (_, body) in bodies.iter_mut() {
            body.reset_forces(false);
            body.reset_torques(false);
        }
    }

    /// Drain the contacts that started since the last drain.
    pub fn take_contact_events(&mut self) -> Vec<ContactEvent> {
        std::mem::take(&mut self.events)
    }
}

fn to_glam_vec(v: &Vector<Real>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}
