//! Per-weapon bullet simulation
//!
//! Every ranged weapon instance owns the bullets it fired. A bullet is an
//! analytic arc re-anchored at each ricochet: we keep the origin and
//! velocity from the last bounce plus the flight time since then, and sample
//! the curve instead of integrating it.

use bevy::prelude::*;
use shared::weapons::{ballistics, damage};
use shared::{HitPayload, WeaponDefinition};
use std::sync::Arc;

use crate::scene::SceneColliders;
use crate::trail::{TrailHandle, TrailRegistry};

/// Offset applied to a ricochet anchor so the next frame's segment does not
/// start inside the surface it just reflected off.
const BOUNCE_SURFACE_OFFSET: f32 = 1e-3;

/// One bullet in flight.
#[derive(Debug)]
pub struct Bullet {
    definition: Arc<WeaponDefinition>,
    /// Arc anchor: position at the last bounce (or the muzzle)
    origin: Vec3,
    /// Arc anchor: velocity at the last bounce (or the muzzle)
    velocity: Vec3,
    /// Flight time since the last bounce
    elapsed: f32,
    /// Remaining ricochet budget; -1 only momentarily before purge
    bounces: i32,
    /// Remaining pass-through budget; consumed by the combat resolver once
    /// it is wired up
    pierce: u32,
    alive: bool,
    trail: Option<TrailHandle>,
}

impl Bullet {
    fn is_live(&self) -> bool {
        self.alive && self.bounces >= 0 && self.elapsed <= self.definition.bullet_max_lifetime
    }

    fn payload(&self) -> HitPayload {
        HitPayload {
            damage: self.definition.bullet_damage,
            knockback: self.definition.knockback_amount,
        }
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn bounces_remaining(&self) -> i32 {
        self.bounces
    }

    pub fn pierce_remaining(&self) -> u32 {
        self.pierce
    }

    /// Position at the current flight time.
    pub fn position(&self) -> Vec3 {
        ballistics::position_at(
            self.origin,
            self.velocity,
            self.definition.bullet_drop,
            self.elapsed,
        )
    }
}

/// All live bullets of one weapon instance.
#[derive(Debug, Default)]
pub struct BulletSet {
    bullets: Vec<Bullet>,
}

impl BulletSet {
    /// Fire a bullet from `origin` with `velocity`.
    pub fn spawn(
        &mut self,
        origin: Vec3,
        velocity: Vec3,
        definition: &Arc<WeaponDefinition>,
        trails: &mut TrailRegistry,
    ) {
        self.bullets.push(Bullet {
            definition: Arc::clone(definition),
            origin,
            velocity,
            elapsed: 0.0,
            bounces: definition.bullet_max_bounces,
            pierce: definition.piercing,
            alive: true,
            trail: Some(trails.acquire(origin)),
        });
    }

    /// Advance every bullet by `dt`.
    ///
    /// Purge runs before and after integration: the leading pass drops
    /// bullets that expired since last frame, the trailing pass drops
    /// bullets that died during this one. The trailing pass cannot touch a
    /// trail twice because release consumes the handle.
    pub fn advance(&mut self, dt: f32, scene: &SceneColliders, trails: &mut TrailRegistry) {
        self.purge(trails);

        for bullet in &mut self.bullets {
            let drop = bullet.definition.bullet_drop;
            let old_pos =
                ballistics::position_at(bullet.origin, bullet.velocity, drop, bullet.elapsed);
            bullet.elapsed += dt;
            let new_pos =
                ballistics::position_at(bullet.origin, bullet.velocity, drop, bullet.elapsed);

            match scene.segment_cast(old_pos, new_pos) {
                None => {
                    if let Some(trail) = &bullet.trail {
                        trails.set_endpoint(trail, new_pos);
                    }
                }
                Some(hit) => {
                    damage::apply_impact(hit.point, hit.collider, &bullet.payload());

                    if bullet.bounces >= 0 {
                        // Ricochet: re-anchor the arc at the surface
                        bullet.elapsed = 0.0;
                        bullet.origin = hit.point + hit.normal * BOUNCE_SURFACE_OFFSET;
                        bullet.velocity = ballistics::reflect(bullet.velocity, hit.normal)
                            * bullet.definition.bullet_bounce_speed_modifier;
                        bullet.bounces -= 1;
                        if let Some(trail) = &bullet.trail {
                            trails.set_origin(trail, bullet.origin);
                        }
                    } else {
                        // Budget exhausted: force the lifetime check to fail
                        bullet.elapsed = bullet.definition.bullet_max_lifetime + 1.0;
                    }
                }
            }
        }

        self.purge(trails);
    }

    /// Force-expire and purge everything. Safe to call repeatedly.
    pub fn clear(&mut self, trails: &mut TrailRegistry) {
        for bullet in &mut self.bullets {
            bullet.alive = false;
        }
        self.purge(trails);
    }

    fn purge(&mut self, trails: &mut TrailRegistry) {
        self.bullets.retain_mut(|bullet| {
            if bullet.is_live() {
                true
            } else {
                if let Some(trail) = bullet.trail.take() {
                    trails.release(trail);
                }
                false
            }
        });
    }

    pub fn len(&self) -> usize {
        self.bullets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bullets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bullet> {
        self.bullets.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::ColliderShape;
    use shared::{ColliderId, WeaponKind};

    fn flat_def(max_bounces: i32) -> Arc<WeaponDefinition> {
        let mut def = WeaponKind::Rifle.definition();
        def.bullet_drop = 0.0;
        def.bullet_speed = 1000.0;
        def.bullet_max_lifetime = 10.0;
        def.bullet_max_bounces = max_bounces;
        def.bullet_bounce_speed_modifier = 0.5;
        Arc::new(def)
    }

    fn wall_scene() -> SceneColliders {
        let mut scene = SceneColliders::default();
        scene.add(
            ColliderId(1),
            ColliderShape::Aabb {
                min: Vec3::new(-50.0, -50.0, -11.0),
                max: Vec3::new(50.0, 50.0, -10.0),
            },
        );
        scene
    }

    #[test]
    fn zero_drop_flies_straight() {
        let mut bullets = BulletSet::default();
        let mut trails = TrailRegistry::default();
        let scene = SceneColliders::default();
        let def = flat_def(0);

        bullets.spawn(Vec3::ZERO, Vec3::new(0.0, 0.0, -1000.0), &def, &mut trails);
        bullets.advance(0.002, &scene, &mut trails);

        let bullet = bullets.iter().next().expect("bullet is live");
        assert_eq!(bullet.position(), Vec3::new(0.0, 0.0, -2.0));

        bullets.advance(0.003, &scene, &mut trails);
        let bullet = bullets.iter().next().expect("bullet is live");
        assert_eq!(bullet.position(), Vec3::new(0.0, 0.0, -5.0));

        bullets.clear(&mut trails);
    }

    #[test]
    fn lifetime_expiry_releases_the_trail_once() {
        let mut bullets = BulletSet::default();
        let mut trails = TrailRegistry::default();
        let scene = SceneColliders::default();
        let mut def = WeaponKind::Rifle.definition();
        def.bullet_drop = 0.0;
        def.bullet_max_lifetime = 1.0;
        let def = Arc::new(def);

        bullets.spawn(Vec3::ZERO, Vec3::new(0.0, 0.0, -10.0), &def, &mut trails);
        bullets.advance(0.6, &scene, &mut trails);
        assert_eq!(bullets.len(), 1);

        bullets.advance(0.6, &scene, &mut trails);
        assert_eq!(bullets.len(), 0);
        assert_eq!(trails.live_count(), 0);
        assert_eq!(trails.released_count(), 1);
    }

    #[test]
    fn zero_bounce_budget_still_ricochets_once_then_dies() {
        let mut bullets = BulletSet::default();
        let mut trails = TrailRegistry::default();
        let scene = wall_scene();
        let def = flat_def(0);

        bullets.spawn(Vec3::ZERO, Vec3::new(0.0, 0.0, -100.0), &def, &mut trails);
        // Segment 0 -> -20 crosses the wall at z = -10; the bounce runs,
        // drops the budget to -1, and the trailing purge kills the bullet.
        bullets.advance(0.2, &scene, &mut trails);

        assert_eq!(bullets.len(), 0);
        assert_eq!(trails.released_count(), 1);
    }

    #[test]
    fn one_bounce_budget_survives_the_first_hit_reflected() {
        let mut bullets = BulletSet::default();
        let mut trails = TrailRegistry::default();
        let scene = wall_scene();
        let def = flat_def(1);

        bullets.spawn(Vec3::ZERO, Vec3::new(0.0, 0.0, -100.0), &def, &mut trails);
        bullets.advance(0.2, &scene, &mut trails);

        let bullet = bullets.iter().next().expect("bullet survives one bounce");
        assert_eq!(bullet.bounces_remaining(), 0);
        assert_eq!(bullet.elapsed(), 0.0);
        // Reflected off the +Z face and scaled by the bounce modifier
        assert!((bullet.velocity() - Vec3::new(0.0, 0.0, 50.0)).length() < 1e-4);
        assert!((bullet.origin().z - (-10.0)).abs() < 0.01);

        // Flying back out: the second hit exhausts the budget
        let mut return_wall = SceneColliders::default();
        return_wall.add(
            ColliderId(2),
            ColliderShape::Aabb {
                min: Vec3::new(-50.0, -50.0, 5.0),
                max: Vec3::new(50.0, 50.0, 6.0),
            },
        );
        bullets.advance(1.0, &return_wall, &mut trails);
        assert_eq!(bullets.len(), 0);
        assert_eq!(trails.released_count(), 1);
    }

    #[test]
    fn clear_purges_everything_and_is_idempotent() {
        let mut bullets = BulletSet::default();
        let mut trails = TrailRegistry::default();
        let def = flat_def(3);

        for i in 0..3 {
            bullets.spawn(
                Vec3::new(i as f32, 0.0, 0.0),
                Vec3::new(0.0, 0.0, -10.0),
                &def,
                &mut trails,
            );
        }
        assert_eq!(trails.live_count(), 3);

        bullets.clear(&mut trails);
        assert!(bullets.is_empty());
        assert_eq!(trails.live_count(), 0);
        assert_eq!(trails.released_count(), 3);

        bullets.clear(&mut trails);
        assert_eq!(trails.released_count(), 3);
    }

    #[test]
    fn pierce_budget_is_carried_from_the_definition() {
        let mut bullets = BulletSet::default();
        let mut trails = TrailRegistry::default();
        let mut def = WeaponKind::Rifle.definition();
        def.piercing = 2;
        let def = Arc::new(def);

        bullets.spawn(Vec3::ZERO, Vec3::new(0.0, 0.0, -10.0), &def, &mut trails);
        let bullet = bullets.iter().next().expect("bullet is live");
        assert_eq!(bullet.pierce_remaining(), 2);
        bullets.clear(&mut trails);
    }
}
