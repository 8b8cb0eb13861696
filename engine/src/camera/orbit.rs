//! Damped Orbit Controller
//!
//! Orbits a target point at a controllable yaw/pitch/distance. Input nudges
//! the goal state; `update` eases the visible state toward the goal every
//! frame, which gives the camera its soft, damped feel.

use glam::{Mat4, Vec3};

/// Orbit tuning constants.
#[derive(Debug, Clone, Copy)]
pub struct OrbitConfig {
    /// Radians of yaw/pitch per pixel of mouse drag
    pub drag_sensitivity: f32,
    /// Distance change per scroll line
    pub zoom_sensitivity: f32,
    /// Exponential easing rate toward the goal state (per second)
    pub damping: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Pitch limits keep the camera off the poles (radians)
    pub pitch_limit: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            drag_sensitivity: 0.005,
            zoom_sensitivity: 0.5,
            damping: 10.0,
            min_distance: 1.0,
            max_distance: 30.0,
            pitch_limit: 1.5,
        }
    }
}

/// Damped orbit camera state.
pub struct OrbitController {
    config: OrbitConfig,
    target: Vec3,
    yaw: f32,
    pitch: f32,
    distance: f32,
    goal_yaw: f32,
    goal_pitch: f32,
    goal_distance: f32,
}

impl OrbitController {
    /// Start at an explicit eye position looking at `target`.
    pub fn looking_from(eye: Vec3, target: Vec3, config: OrbitConfig) -> Self {
        let offset = eye - target;
        let distance = offset.length().max(config.min_distance);
        let yaw = offset.x.atan2(offset.z);
        let pitch = (offset.y / distance).clamp(-1.0, 1.0).asin();
        Self {
            config,
            target,
            yaw,
            pitch,
            distance,
            goal_yaw: yaw,
            goal_pitch: pitch,
            goal_distance: distance,
        }
    }

    /// Rotate the goal orientation from a mouse drag, in pixels.
    pub fn handle_drag(&mut self, dx: f32, dy: f32) {
        self.goal_yaw -= dx * self.config.drag_sensitivity;
        self.goal_pitch = (self.goal_pitch + dy * self.config.drag_sensitivity)
            .clamp(-self.config.pitch_limit, self.config.pitch_limit);
    }

    /// Zoom the goal distance from scroll lines (positive = closer).
    pub fn handle_scroll(&mut self, lines: f32) {
        self.goal_distance = (self.goal_distance - lines * self.config.zoom_sensitivity)
            .clamp(self.config.min_distance, self.config.max_distance);
    }

    /// Ease the visible state toward the goal state.
    pub fn update(&mut self, dt: f32) {
        let t = 1.0 - (-self.config.damping * dt.max(0.0)).exp();
        self.yaw += (self.goal_yaw - self.yaw) * t;
        self.pitch += (self.goal_pitch - self.pitch) * t;
        self.distance += (self.goal_distance - self.distance) * t;
    }

    /// Current eye position in world space.
    pub fn eye_position(&self) -> Vec3 {
        let horizontal = self.distance * self.pitch.cos();
        self.target
            + Vec3::new(
                horizontal * self.yaw.sin(),
                self.distance * self.pitch.sin(),
                horizontal * self.yaw.cos(),
            )
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye_position(), self.target, Vec3::Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_eye_matches_requested() {
        let eye = Vec3::new(-3.0, 3.0, 3.0);
        let orbit = OrbitController::looking_from(eye, Vec3::ZERO, OrbitConfig::default());
        assert!((orbit.eye_position() - eye).length() < 1e-4);
    }

    #[test]
    fn test_drag_converges_with_damping() {
        let mut orbit = OrbitController::looking_from(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::ZERO,
            OrbitConfig::default(),
        );
        let before = orbit.eye_position();
        orbit.handle_drag(200.0, 0.0);

        // One frame moves the camera only part of the way.
        orbit.update(1.0 / 60.0);
        let after_one = orbit.eye_position();
        assert!((after_one - before).length() > 1e-4);

        // Many frames settle onto the goal.
        for _ in 0..600 {
            orbit.update(1.0 / 60.0);
        }
        let settled = orbit.eye_position();
        orbit.update(1.0 / 60.0);
        assert!((orbit.eye_position() - settled).length() < 1e-4);
    }

    #[test]
    fn test_zoom_respects_limits() {
        let mut orbit = OrbitController::looking_from(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::ZERO,
            OrbitConfig::default(),
        );
        orbit.handle_scroll(1000.0);
        for _ in 0..600 {
            orbit.update(1.0 / 60.0);
        }
        let distance = orbit.eye_position().length();
        assert!(distance >= OrbitConfig::default().min_distance - 1e-3);
    }
}
