//! Bullet trajectory math
//!
//! Bullets follow a closed-form arc that is re-anchored at every ricochet:
//! the owning simulation stores the origin and velocity at the last bounce
//! and samples the curve at the flight time since then.

use bevy::prelude::*;

/// Position along a ballistic arc at flight time `t`.
///
/// `p(t) = origin + velocity·t + ½·g·t²` with `g` pointing straight down at
/// magnitude `drop`. A drop of zero gives an exact straight line.
pub fn position_at(origin: Vec3, velocity: Vec3, drop: f32, t: f32) -> Vec3 {
    let gravity = Vec3::new(0.0, -drop, 0.0);
    origin + velocity * t + 0.5 * gravity * t * t
}

/// Reflect a velocity about a surface normal.
///
/// `normal` is expected to be unit length.
pub fn reflect(velocity: Vec3, normal: Vec3) -> Vec3 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_drop_is_a_straight_line() {
        let origin = Vec3::new(1.0, 2.0, 3.0);
        let velocity = Vec3::new(0.0, 0.0, -1000.0);

        for i in 0..10 {
            let t = i as f32 * 0.05;
            let p = position_at(origin, velocity, 0.0, t);
            assert_eq!(p, origin + velocity * t);
        }
    }

    #[test]
    fn drop_curves_the_arc_downward() {
        let origin = Vec3::ZERO;
        let velocity = Vec3::new(0.0, 0.0, -100.0);

        let p = position_at(origin, velocity, 9.8, 1.0);
        // Half a second squared of gravity: 0.5 * 9.8 * 1² = 4.9m of drop
        assert!((p.y - (-4.9)).abs() < 1e-4);
        assert!((p.z - (-100.0)).abs() < 1e-4);
    }

    #[test]
    fn reflect_inverts_the_normal_component() {
        let v = Vec3::new(1.0, -1.0, 0.0);
        let n = Vec3::Y;
        let r = reflect(v, n);
        assert!((r - Vec3::new(1.0, 1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn reflect_preserves_speed() {
        let v = Vec3::new(3.0, -4.0, 12.0);
        let n = Vec3::new(0.0, 1.0, 0.0);
        assert!((reflect(v, n).length() - v.length()).abs() < 1e-4);
    }
}
