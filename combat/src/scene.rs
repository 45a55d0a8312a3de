//! Scene collision queries
//!
//! The world the bullets fly through is owned elsewhere; whoever owns it
//! registers colliders here. Bullets only need one primitive: cast a segment
//! and get back the nearest hit point, surface normal, and collider identity.

use bevy::prelude::*;
use shared::ColliderId;

/// Collision shape for a registered collider.
#[derive(Clone, Copy, Debug)]
pub enum ColliderShape {
    Sphere { center: Vec3, radius: f32 },
    Aabb { min: Vec3, max: Vec3 },
}

/// One registered scene collider.
#[derive(Clone, Copy, Debug)]
pub struct SceneCollider {
    pub id: ColliderId,
    pub shape: ColliderShape,
}

/// Result of a segment cast.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentHit {
    pub point: Vec3,
    pub normal: Vec3,
    pub collider: ColliderId,
}

/// Registered colliders for segment casting.
#[derive(Resource, Default)]
pub struct SceneColliders {
    colliders: Vec<SceneCollider>,
}

impl SceneColliders {
    pub fn add(&mut self, id: ColliderId, shape: ColliderShape) {
        self.colliders.push(SceneCollider { id, shape });
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Cast `start -> end` against every collider and keep the nearest hit.
    ///
    /// A degenerate segment never hits; a miss is normal control flow.
    pub fn segment_cast(&self, start: Vec3, end: Vec3) -> Option<SegmentHit> {
        let dir = end - start;
        if dir.length_squared() < 1e-12 {
            return None;
        }

        let mut best: Option<(f32, SegmentHit)> = None;

        for collider in &self.colliders {
            let candidate = match collider.shape {
                ColliderShape::Sphere { center, radius } => {
                    segment_sphere_intersection(start, end, center, radius)
                }
                ColliderShape::Aabb { min, max } => segment_aabb_intersection(start, end, min, max),
            };

            if let Some((t, point, normal)) = candidate {
                match best {
                    Some((best_t, _)) if best_t <= t => {}
                    _ => {
                        best = Some((
                            t,
                            SegmentHit {
                                point,
                                normal,
                                collider: collider.id,
                            },
                        ))
                    }
                }
            }
        }

        best.map(|(_, hit)| hit)
    }
}

/// Segment vs sphere: earliest entry point along the segment.
fn segment_sphere_intersection(
    start: Vec3,
    end: Vec3,
    center: Vec3,
    radius: f32,
) -> Option<(f32, Vec3, Vec3)> {
    let dir = end - start;
    let to_start = start - center;

    let a = dir.length_squared();
    let b = 2.0 * to_start.dot(dir);
    let c = to_start.length_squared() - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 || a < 1e-12 {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    // Entry root first; fall back to the exit root when starting inside
    let mut t = (-b - sqrt_d) / (2.0 * a);
    if t < 0.0 {
        t = (-b + sqrt_d) / (2.0 * a);
    }
    if !(0.0..=1.0).contains(&t) {
        return None;
    }

    let point = start + dir * t;
    let normal = (point - center).normalize_or_zero();
    Some((t, point, normal))
}

/// Segment vs AABB slab test.
fn segment_aabb_intersection(
    start: Vec3,
    end: Vec3,
    aabb_min: Vec3,
    aabb_max: Vec3,
) -> Option<(f32, Vec3, Vec3)> {
    let dir = end - start;
    let mut tmin = 0.0_f32;
    let mut tmax = 1.0_f32;
    let mut hit_normal = Vec3::ZERO;

    for axis in 0..3 {
        let s = start[axis];
        let d = dir[axis];
        let min = aabb_min[axis];
        let max = aabb_max[axis];

        if d.abs() < 1e-6 {
            if s < min || s > max {
                return None;
            }
            continue;
        }

        let inv_d = 1.0 / d;
        let mut t1 = (min - s) * inv_d;
        let mut t2 = (max - s) * inv_d;

        // Entry face is the min face when travelling +axis, max face when
        // travelling -axis; either way the outward normal opposes `d`.
        let mut n = Vec3::ZERO;
        n[axis] = if d > 0.0 { -1.0 } else { 1.0 };

        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
        }

        if t1 > tmin {
            tmin = t1;
            hit_normal = n;
        }

        tmax = tmax.min(t2);

        if tmin > tmax {
            return None;
        }
    }

    if hit_normal == Vec3::ZERO {
        // Segment starts inside the box; treat as no entry
        return None;
    }

    let hit_point = start + dir * tmin;
    Some((tmin, hit_point, hit_normal))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall_scene() -> SceneColliders {
        let mut scene = SceneColliders::default();
        scene.add(
            ColliderId(1),
            ColliderShape::Aabb {
                min: Vec3::new(-5.0, 0.0, -10.5),
                max: Vec3::new(5.0, 5.0, -9.5),
            },
        );
        scene
    }

    #[test]
    fn cast_through_empty_space_misses() {
        let scene = SceneColliders::default();
        assert!(scene
            .segment_cast(Vec3::ZERO, Vec3::new(0.0, 0.0, -100.0))
            .is_none());
    }

    #[test]
    fn cast_into_a_wall_reports_the_front_face() {
        let scene = wall_scene();
        let hit = scene
            .segment_cast(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 1.0, -20.0))
            .expect("wall should be hit");
        assert!((hit.point.z - (-9.5)).abs() < 1e-4);
        assert_eq!(hit.normal, Vec3::Z);
        assert_eq!(hit.collider, ColliderId(1));
    }

    #[test]
    fn nearest_of_two_colliders_wins() {
        let mut scene = wall_scene();
        scene.add(
            ColliderId(2),
            ColliderShape::Sphere {
                center: Vec3::new(0.0, 1.0, -5.0),
                radius: 1.0,
            },
        );
        let hit = scene
            .segment_cast(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 1.0, -20.0))
            .expect("sphere is closer than the wall");
        assert_eq!(hit.collider, ColliderId(2));
        assert!((hit.point.z - (-4.0)).abs() < 1e-4);
    }

    #[test]
    fn sphere_normal_points_back_at_the_shooter() {
        let mut scene = SceneColliders::default();
        scene.add(
            ColliderId(3),
            ColliderShape::Sphere {
                center: Vec3::new(0.0, 0.0, -5.0),
                radius: 1.0,
            },
        );
        let hit = scene
            .segment_cast(Vec3::ZERO, Vec3::new(0.0, 0.0, -10.0))
            .expect("sphere should be hit");
        assert!((hit.normal - Vec3::Z).length() < 1e-4);
    }

    #[test]
    fn segment_stopping_short_misses() {
        let scene = wall_scene();
        assert!(scene
            .segment_cast(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 1.0, -5.0))
            .is_none());
    }
}
