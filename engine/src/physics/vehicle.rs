//! Raycast Vehicle Rig
//!
//! Thin wrapper over rapier's dynamic raycast vehicle controller. The rig is
//! an opaque aggregate from the playground's point of view: it owns the wheel
//! descriptors and the controller, while the chassis body lives in the
//! [`PhysicsWorld`](super::PhysicsWorld) like any other body.

use glam::Vec3;
use rapier3d::control::{DynamicRayCastVehicleController, WheelTuning};
use rapier3d::prelude::*;

use super::BodyHandle;

/// Suspension and friction constants for one wheel.
///
/// `Default` matches the playground's vehicle tuning; only the chassis
/// connection point varies between the four wheels.
#[derive(Debug, Clone, Copy)]
pub struct WheelDescriptor {
    /// Wheel mount point in the chassis's local frame
    pub connection_point: Vec3,
    /// Suspension travel direction in the chassis's local frame
    pub direction: Vec3,
    /// Wheel axle in the chassis's local frame
    pub axle: Vec3,
    /// Wheel radius (meters)
    pub radius: f32,
    pub suspension_stiffness: f32,
    pub suspension_rest_length: f32,
    pub max_suspension_travel: f32,
    pub max_suspension_force: f32,
    pub damping_compression: f32,
    pub damping_relaxation: f32,
    pub friction_slip: f32,
}

impl Default for WheelDescriptor {
    fn default() -> Self {
        Self {
            connection_point: Vec3::new(1.0, 1.0, 0.0),
            direction: Vec3::new(0.0, 0.0, -1.0),
            axle: Vec3::new(0.0, 1.0, 0.0),
            radius: 0.5,
            suspension_stiffness: 30.0,
            suspension_rest_length: 0.3,
            max_suspension_travel: 0.3,
            max_suspension_force: 100_000.0,
            damping_compression: 4.4,
            damping_relaxation: 2.3,
            friction_slip: 5.0,
        }
    }
}

impl WheelDescriptor {
    /// The default wheel moved to another chassis connection point.
    pub fn at(connection_point: Vec3) -> Self {
        Self {
            connection_point,
            ..Self::default()
        }
    }

    /// The descriptor's suspension and friction constants as rapier tuning.
    fn tuning(&self) -> WheelTuning {
        WheelTuning {
            suspension_stiffness: self.suspension_stiffness,
            suspension_compression: self.damping_compression,
            suspension_damping: self.damping_relaxation,
            max_suspension_travel: self.max_suspension_travel,
            side_friction_stiffness: 1.0,
            friction_slip: self.friction_slip,
            max_suspension_force: self.max_suspension_force,
        }
    }

    /// The playground's four-wheel layout: one wheel at each (±1, ±1, 0).
    pub fn four_wheel_layout() -> [Self; 4] {
        [
            Self::at(Vec3::new(1.0, 1.0, 0.0)),
            Self::at(Vec3::new(1.0, -1.0, 0.0)),
            Self::at(Vec3::new(-1.0, 1.0, 0.0)),
            Self::at(Vec3::new(-1.0, -1.0, 0.0)),
        ]
    }
}

/// A chassis body plus its wheel suspension controller.
pub struct VehicleRig {
    controller: DynamicRayCastVehicleController,
    chassis: BodyHandle,
}

impl VehicleRig {
    /// Build a rig around an existing chassis body.
    pub fn new(chassis: BodyHandle, wheels: &[WheelDescriptor]) -> Self {
        let mut controller = DynamicRayCastVehicleController::new(chassis.0);
        for desc in wheels {
            controller.add_wheel(
                point![
                    desc.connection_point.x,
                    desc.connection_point.y,
                    desc.connection_point.z
                ],
                vector![desc.direction.x, desc.direction.y, desc.direction.z],
                vector![desc.axle.x, desc.axle.y, desc.axle.z],
                desc.suspension_rest_length,
                desc.radius,
                &desc.tuning(),
            );
        }
        Self { controller, chassis }
    }

    /// The chassis body this rig steers.
    pub fn chassis(&self) -> BodyHandle {
        self.chassis
    }

    /// Advance the suspension by one fixed substep. Called by the world; the
    /// wheel raycasts must not hit the chassis itself.
    pub(crate) fn update(
        &mut self,
        dt: f32,
        bodies: &mut RigidBodySet,
        colliders: &ColliderSet,
        queries: &QueryPipeline,
    ) {
        let filter = QueryFilter::default().exclude_rigid_body(self.chassis.0);
        self.controller
            .update_vehicle(dt, bodies, colliders, queries, filter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{PhysicsWorld, WorldSettings};

    #[test]
    fn test_four_wheel_layout_connection_points() {
        let wheels = WheelDescriptor::four_wheel_layout();
        let points: Vec<Vec3> = wheels.iter().map(|w| w.connection_point).collect();
        assert!(points.contains(&Vec3::new(1.0, 1.0, 0.0)));
        assert!(points.contains(&Vec3::new(-1.0, -1.0, 0.0)));
        for wheel in &wheels {
            assert_eq!(wheel.radius, 0.5);
            assert_eq!(wheel.suspension_stiffness, 30.0);
        }
    }

    #[test]
    fn test_wheel_tuning_reaches_controller() {
        let mut world = PhysicsWorld::new(WorldSettings::default());
        let chassis = world.add_box_body(
            Vec3::new(2.0, 1.0, 0.5),
            1.0,
            Vec3::new(0.0, 10.0, 4.0),
        );
        let rig = VehicleRig::new(chassis, &WheelDescriptor::four_wheel_layout());

        let wheels = rig.controller.wheels();
        assert_eq!(wheels.len(), 4);
        for wheel in wheels {
            assert_eq!(wheel.suspension_stiffness, 30.0);
            assert_eq!(wheel.damping_compression, 4.4);
            assert_eq!(wheel.damping_relaxation, 2.3);
            assert_eq!(wheel.max_suspension_travel, 0.3);
            assert_eq!(wheel.max_suspension_force, 100_000.0);
            assert_eq!(wheel.friction_slip, 5.0);
        }
    }

    #[test]
    fn test_rig_steps_without_panicking() {
        let mut world = PhysicsWorld::new(WorldSettings::default());
        world.add_ground_plane();
        let chassis = world.add_box_body(
            Vec3::new(2.0, 1.0, 0.5),
            1.0,
            Vec3::new(0.0, 10.0, 4.0),
        );
        world.attach_vehicle(VehicleRig::new(
            chassis,
            &WheelDescriptor::four_wheel_layout(),
        ));

        for _ in 0..120 {
            world.step(1.0 / 60.0);
        }
        let pos = world.translation(chassis).unwrap();
        assert!(pos.y < 10.0, "chassis should have dropped, y = {}", pos.y);
    }
}
