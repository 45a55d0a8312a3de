//! Weapon instances and the fire-rate catch-up loop
//!
//! Ranged and melee weapons share all holster/recoil/accumulator state and
//! differ only in what one trigger pull does: spawn a bullet or raise an
//! attack cue.

use bevy::prelude::*;
use shared::{RecoilPattern, WeaponDefinition};
use std::sync::Arc;

use crate::bullets::BulletSet;
use crate::components::LookOrientation;
use crate::scene::SceneColliders;
use crate::trail::TrailRegistry;

/// Per-kind runtime state: only ranged weapons own bullets.
#[derive(Debug)]
pub enum WeaponRuntime {
    Ranged { bullets: BulletSet },
    Melee,
}

/// What one update tick produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WeaponTick {
    pub shots: u32,
    pub attacks: u32,
}

/// Runtime state bound to one weapon definition.
///
/// Created when equipped into a slot, destroyed when the slot is reassigned
/// or the actor goes away.
#[derive(Debug)]
pub struct WeaponInstance {
    definition: Arc<WeaponDefinition>,
    firing: bool,
    holstered: bool,
    /// Set when required external references were missing at equip time;
    /// a disabled instance still advances its bullets but never fires.
    disabled: bool,
    /// Catch-up accumulator: seconds of fire time not yet paid out in shots
    shot_clock: f32,
    recoil: RecoilPattern,
    runtime: WeaponRuntime,
}

impl WeaponInstance {
    pub fn new(definition: Arc<WeaponDefinition>) -> Self {
        let recoil = RecoilPattern::build(
            definition.horizontal_recoil_min,
            definition.horizontal_recoil_max,
            definition.recoil_interval,
        );
        let runtime = if definition.is_ranged() {
            WeaponRuntime::Ranged {
                bullets: BulletSet::default(),
            }
        } else {
            WeaponRuntime::Melee
        };

        Self {
            definition,
            firing: false,
            holstered: false,
            disabled: false,
            shot_clock: 0.0,
            recoil,
            runtime,
        }
    }

    pub fn definition(&self) -> &Arc<WeaponDefinition> {
        &self.definition
    }

    /// Begin firing; the first shot pays out on the next update.
    pub fn start_firing(&mut self) {
        self.firing = true;
        self.shot_clock = 0.0;
    }

    pub fn stop_firing(&mut self) {
        self.firing = false;
    }

    pub fn is_firing(&self) -> bool {
        self.firing
    }

    pub fn set_holstered(&mut self, holstered: bool) {
        self.holstered = holstered;
    }

    pub fn is_holstered(&self) -> bool {
        self.holstered
    }

    pub fn disable(&mut self) {
        self.disabled = true;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn bullets(&self) -> Option<&BulletSet> {
        match &self.runtime {
            WeaponRuntime::Ranged { bullets } => Some(bullets),
            WeaponRuntime::Melee => None,
        }
    }

    /// Tear down the instance, purging every bullet it still owns.
    pub fn destroy(&mut self, trails: &mut TrailRegistry) {
        if let WeaponRuntime::Ranged { bullets } = &mut self.runtime {
            bullets.clear(trails);
        }
        self.firing = false;
    }

    /// Advance this instance by one frame.
    ///
    /// Bullets move first, unconditionally: a holstered or idle weapon still
    /// has rounds in the air. Firing is then re-evaluated every tick, and
    /// the accumulator pays out one trigger pull per elapsed fire interval
    /// so a long frame emits a burst instead of losing shots.
    pub fn update(
        &mut self,
        dt: f32,
        muzzle: Vec3,
        aim_point: Vec3,
        look: &mut LookOrientation,
        scene: &SceneColliders,
        trails: &mut TrailRegistry,
    ) -> WeaponTick {
        if let WeaponRuntime::Ranged { bullets } = &mut self.runtime {
            bullets.advance(dt, scene, trails);
        }

        let mut tick = WeaponTick::default();

        if self.disabled {
            return tick;
        }

        if !self.firing || self.holstered {
            self.stop_firing();
            return tick;
        }

        self.shot_clock += dt;
        let interval = self.definition.fire_interval();

        while self.shot_clock >= 0.0 {
            let horizontal = self.recoil.next();
            look.rotate(horizontal, self.definition.vertical_recoil);

            match &mut self.runtime {
                WeaponRuntime::Ranged { bullets } => {
                    let direction = (aim_point - muzzle).normalize_or_zero();
                    bullets.spawn(
                        muzzle,
                        direction * self.definition.bullet_speed,
                        &self.definition,
                        trails,
                    );
                    tick.shots += 1;
                }
                WeaponRuntime::Melee => {
                    tick.attacks += 1;
                }
            }

            self.shot_clock -= interval;
        }

        tick
    }
}
