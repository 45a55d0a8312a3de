//! Actor-side ECS components
//!
//! External collaborators write the aim target, look orientation, and
//! animation playback state; the weapon systems read them every tick.

use bevy::prelude::*;
use shared::{clamp_view_pitch, wrap_yaw};

/// Actor height in meters; the muzzle sits a fraction below the eye line.
pub const ACTOR_HEIGHT: f32 = 1.8;
/// Muzzle height above the actor origin.
pub const MUZZLE_HEIGHT: f32 = ACTOR_HEIGHT * 0.8;
/// Muzzle offset along the facing direction.
pub const MUZZLE_FORWARD_OFFSET: f32 = 0.5;
/// Muzzle offset toward the weapon-hand side.
pub const MUZZLE_SIDE_OFFSET: f32 = 0.25;

/// Marker component for combat-capable actors
#[derive(Component)]
pub struct Actor;

/// Actor world position (feet)
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct ActorPosition(pub Vec3);

/// View direction in wrapped degrees.
///
/// Recoil and look input both mutate this; every pitch write goes through
/// the shared clamp so the view cannot cross the vertical poles.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct LookOrientation {
    pub yaw: f32,
    pub pitch: f32,
}

impl LookOrientation {
    /// Rotate by a recoil kick (or look delta) and clamp the result.
    pub fn rotate(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw = wrap_yaw(self.yaw + yaw_delta);
        self.pitch = clamp_view_pitch(self.pitch + pitch_delta);
    }

    /// Facing direction on the ground plane (ignores pitch).
    pub fn flat_forward(&self) -> Vec3 {
        let yaw = self.yaw.to_radians();
        Vec3::new(-yaw.sin(), 0.0, -yaw.cos())
    }
}

/// World point the actor is aiming at, supplied by the targeting layer
/// every frame.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct AimTarget(pub Vec3);

/// Playback state of the actor's current weapon animation.
///
/// Written by the external animation layer; the equip sequence only ever
/// checks whether `normalized_time` has reached 1.0.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct AnimationState {
    pub normalized_time: f32,
}

impl AnimationState {
    pub fn is_complete(&self) -> bool {
        self.normalized_time >= 1.0
    }
}

/// Muzzle world position for a given actor position and facing.
pub fn muzzle_point(position: Vec3, look: &LookOrientation) -> Vec3 {
    let forward = look.flat_forward();
    let right = forward.cross(Vec3::Y).normalize_or_zero();
    position
        + Vec3::new(0.0, MUZZLE_HEIGHT, 0.0)
        + forward * MUZZLE_FORWARD_OFFSET
        + right * MUZZLE_SIDE_OFFSET
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotate_clamps_pitch_at_the_up_pole() {
        let mut look = LookOrientation {
            yaw: 0.0,
            pitch: 80.0,
        };
        look.rotate(0.0, 30.0);
        assert_eq!(look.pitch, 85.0);
    }

    #[test]
    fn rotate_wraps_yaw() {
        let mut look = LookOrientation {
            yaw: 350.0,
            pitch: 0.0,
        };
        look.rotate(20.0, 0.0);
        assert_eq!(look.yaw, 10.0);
    }

    #[test]
    fn muzzle_sits_above_and_ahead_of_the_actor() {
        let look = LookOrientation::default();
        let muzzle = muzzle_point(Vec3::ZERO, &look);
        assert!((muzzle.y - MUZZLE_HEIGHT).abs() < 1e-5);
        // Default yaw faces -Z
        assert!(muzzle.z < 0.0);
    }
}
