//! Damage hand-off for bullet impacts
//!
//! The combat resolution layer is not wired up yet; this module fixes the
//! contract so bullet simulation already reports every hit with the payload
//! the resolver will need.

use bevy::prelude::*;

/// Identity of a scene collider, assigned by whoever registers it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ColliderId(pub u64);

/// Damage payload a bullet carries from its definition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitPayload {
    pub damage: f32,
    pub knockback: f32,
}

/// Report a bullet impact to the combat resolution layer.
///
/// Currently a stub: the hit is logged at debug level and otherwise ignored.
pub fn apply_impact(point: Vec3, collider: ColliderId, payload: &HitPayload) {
    debug!(
        "bullet impact at {:?} on {:?} (damage {:.1}, knockback {:.1})",
        point, collider, payload.damage, payload.knockback
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_impact_is_a_no_op() {
        // Contract only: must not panic and must accept any payload.
        apply_impact(
            Vec3::ZERO,
            ColliderId(7),
            &HitPayload {
                damage: 0.0,
                knockback: -1.0,
            },
        );
    }
}
