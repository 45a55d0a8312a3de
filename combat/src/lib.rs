//! Per-actor weapon simulation
//!
//! Owns everything between "trigger held" and "hit reported": bullet flight
//! with ricochet and lifetime rules, the fire-rate catch-up loop, recoil
//! application, and the two-phase holster/activate weapon switch. Rendering,
//! input, targeting, animation playback, and damage resolution stay outside;
//! they connect through components, messages, and the trail/scene resources.

pub mod bullets;
pub mod components;
pub mod equip;
pub mod events;
pub mod scene;
pub mod systems;
pub mod trail;
pub mod weapons;

use bevy::prelude::*;

pub use bullets::{Bullet, BulletSet};
pub use components::{muzzle_point, Actor, ActorPosition, AimTarget, AnimationState, LookOrientation};
pub use equip::{EquipPhase, EquipStep, EquipTransition, WeaponSlots};
pub use events::{AnimationCue, AnimationRequest, EquipRequest, WeaponChanged};
pub use scene::{ColliderShape, SceneColliders, SegmentHit};
pub use trail::{TrailHandle, TrailLine, TrailRegistry};
pub use weapons::{WeaponInstance, WeaponRuntime, WeaponTick};

/// Registers the weapon simulation.
///
/// Fixed tick: equip requests resolve, the switch sequence polls, then the
/// active weapon updates (bullets always advance before the fire loop). The
/// switch sequence polls again every render frame.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TrailRegistry>();

        app.add_message::<EquipRequest>();
        app.add_message::<WeaponChanged>();
        app.add_message::<AnimationRequest>();

        app.add_systems(
            FixedUpdate,
            (
                systems::process_equip_requests,
                systems::drive_equip_transitions,
                systems::update_weapons,
            )
                .chain(),
        );
        app.add_systems(Update, systems::drive_equip_transitions);
    }
}
