//! Camera Module
//!
//! Perspective projection and a damped orbit controller. Window-system
//! agnostic: input deltas are fed in by the caller and the controller only
//! produces view math.

pub mod orbit;

pub use orbit::{OrbitConfig, OrbitController};

use glam::Mat4;

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    /// Vertical field of view (degrees)
    pub fov_y_degrees: f32,
    /// Viewport aspect ratio (width / height)
    pub aspect: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_y_degrees: 75.0,
            aspect: 16.0 / 9.0,
            z_near: 0.1,
            z_far: 100.0,
        }
    }
}

impl Projection {
    /// Recompute the aspect ratio from a viewport size. Called on resize.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_y_degrees.to_radians(),
            self.aspect,
            self.z_near,
            self.z_far,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_viewport_updates_aspect() {
        let mut projection = Projection::default();
        projection.set_viewport(800, 400);
        assert_eq!(projection.aspect, 2.0);

        // A zero-height viewport (minimized window) must not poison the aspect.
        projection.set_viewport(800, 0);
        assert_eq!(projection.aspect, 2.0);
    }
}
