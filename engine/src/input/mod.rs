//! Input Module
//!
//! Stateless key mappings. A key-down either contributes a one-shot local
//! force to the controllable bodies or triggers a control-panel action;
//! unrecognized keys map to nothing. There is no repeat suppression and no
//! key-up handling: every key-down event counts once.

pub mod keyboard;

pub use keyboard::KeyCode;

use glam::Vec3;

/// Magnitude of the horizontal drive forces (W/A/S/D).
pub const DRIVE_FORCE: f32 = 100.0;
/// Magnitude of the vertical jump force (Space).
pub const LIFT_FORCE: f32 = 500.0;

/// A local-space force and the local-space point it is applied at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceCommand {
    pub force: Vec3,
    pub point: Vec3,
}

/// Control-panel actions reachable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    SpawnSphere,
    SpawnBox,
    Reset,
}

/// Map a key to the force it applies to both controllable bodies.
///
/// Off-center application points make the drive keys add a bit of roll on the
/// marble. Returns `None` for keys that drive nothing.
pub fn force_for_key(key: KeyCode) -> Option<ForceCommand> {
    match key {
        KeyCode::W => Some(ForceCommand {
            force: Vec3::new(DRIVE_FORCE, 0.0, 0.0),
            point: Vec3::new(0.0, 0.0, 1.0),
        }),
        KeyCode::A => Some(ForceCommand {
            force: Vec3::new(0.0, 0.0, DRIVE_FORCE),
            point: Vec3::new(1.0, 0.0, 0.0),
        }),
        KeyCode::S => Some(ForceCommand {
            force: Vec3::new(-DRIVE_FORCE, 0.0, 0.0),
            point: Vec3::new(0.0, 0.0, -1.0),
        }),
        KeyCode::D => Some(ForceCommand {
            force: Vec3::new(0.0, 0.0, -DRIVE_FORCE),
            point: Vec3::new(-1.0, 0.0, 0.0),
        }),
        KeyCode::Space => Some(ForceCommand {
            force: Vec3::new(0.0, LIFT_FORCE, 0.0),
            point: Vec3::ZERO,
        }),
        _ => None,
    }
}

/// Map a key to a control-panel action, if any.
pub fn action_for_key(key: KeyCode) -> Option<ControlAction> {
    match key {
        KeyCode::Digit1 => Some(ControlAction::SpawnSphere),
        KeyCode::Digit2 => Some(ControlAction::SpawnBox),
        KeyCode::R => Some(ControlAction::Reset),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_force_mapping() {
        let cmd = force_for_key(KeyCode::W).unwrap();
        assert_eq!(cmd.force, Vec3::new(100.0, 0.0, 0.0));
        assert_eq!(cmd.point, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_jump_force_mapping() {
        let cmd = force_for_key(KeyCode::Space).unwrap();
        assert_eq!(cmd.force, Vec3::new(0.0, 500.0, 0.0));
        assert_eq!(cmd.point, Vec3::ZERO);
    }

    #[test]
    fn test_unrecognized_keys_do_nothing() {
        assert_eq!(force_for_key(KeyCode::Unknown), None);
        assert_eq!(force_for_key(KeyCode::Escape), None);
        assert_eq!(action_for_key(KeyCode::Unknown), None);
    }

    #[test]
    fn test_control_actions() {
        assert_eq!(action_for_key(KeyCode::Digit1), Some(ControlAction::SpawnSphere));
        assert_eq!(action_for_key(KeyCode::Digit2), Some(ControlAction::SpawnBox));
        assert_eq!(action_for_key(KeyCode::R), Some(ControlAction::Reset));
        // Drive keys are not control actions.
        assert_eq!(action_for_key(KeyCode::W), None);
    }
}
