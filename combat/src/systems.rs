//! Per-frame weapon systems
//!
//! Fixed-tick order is: resolve equip requests, poll the switch sequence,
//! then update the active weapon (bullets first, then the fire loop). The
//! switch poll additionally runs every render frame so completion is not
//! tied to the physics rate.

use bevy::prelude::*;
use std::sync::Arc;

use crate::components::{muzzle_point, Actor, ActorPosition, AimTarget, AnimationState, LookOrientation};
use crate::equip::{EquipStep, WeaponSlots};
use crate::events::{AnimationCue, AnimationRequest, EquipRequest, WeaponChanged};
use crate::scene::SceneColliders;
use crate::trail::TrailRegistry;
use crate::weapons::WeaponInstance;

/// Mount requested weapons.
///
/// Slot assignment and replacement happen here, synchronously; only the
/// animated sequence that follows is gated on the animation layer. Missing
/// external references (collision scene, look orientation, aim target) are
/// configuration errors: the instance is mounted disabled instead of
/// taking the actor down.
pub fn process_equip_requests(
    mut requests: MessageReader<EquipRequest>,
    mut actors: Query<&mut WeaponSlots>,
    references: Query<(Option<&LookOrientation>, Option<&AimTarget>), With<Actor>>,
    scene: Option<Res<SceneColliders>>,
    mut trails: ResMut<TrailRegistry>,
    mut changed: MessageWriter<WeaponChanged>,
    mut animations: MessageWriter<AnimationRequest>,
) {
    for request in requests.read() {
        let Ok(mut slots) = actors.get_mut(request.actor) else {
            error!("equip request for {:?} without weapon slots", request.actor);
            continue;
        };

        let mut instance = WeaponInstance::new(Arc::clone(&request.definition));

        let references_ok = matches!(
            references.get(request.actor),
            Ok((Some(_), Some(_)))
        ) && scene.is_some();
        if !references_ok {
            error!(
                "actor {:?} is missing aim target, look orientation, or collision scene; \
                 mounting {} disabled",
                request.actor, request.definition.name
            );
            instance.disable();
        }

        let definition = slots.equip(instance, &mut trails);
        changed.write(WeaponChanged {
            actor: request.actor,
            definition,
        });
        animations.write(AnimationRequest {
            actor: request.actor,
            cue: AnimationCue::Holster,
        });

        info!(
            "actor {:?} mounted {} into {:?}",
            request.actor, request.definition.name, request.definition.slot
        );
    }
}

/// Poll in-flight weapon switches against reported animation progress.
///
/// Registered in both `FixedUpdate` and `Update`: once per physics step so
/// the check lines up with physics-driven holster poses, and once per render
/// frame so completion is seen promptly.
pub fn drive_equip_transitions(
    mut actors: Query<(Entity, &mut WeaponSlots, &AnimationState)>,
    mut animations: MessageWriter<AnimationRequest>,
) {
    for (entity, mut slots, progress) in actors.iter_mut() {
        match slots.drive(progress) {
            Some(EquipStep::Activate { animation }) => {
                animations.write(AnimationRequest {
                    actor: entity,
                    cue: AnimationCue::Equip { animation },
                });
            }
            Some(EquipStep::Done { slot }) => {
                info!("actor {:?} finished switching to {:?}", entity, slot);
            }
            None => {}
        }
    }
}

/// Advance the active weapon of every actor by one fixed tick.
pub fn update_weapons(
    time: Res<Time>,
    scene: Option<Res<SceneColliders>>,
    mut trails: ResMut<TrailRegistry>,
    mut actors: Query<
        (
            Entity,
            &ActorPosition,
            &AimTarget,
            &mut LookOrientation,
            &mut WeaponSlots,
        ),
        With<Actor>,
    >,
    mut animations: MessageWriter<AnimationRequest>,
) {
    let dt = time.delta_secs();
    let empty_scene = SceneColliders::default();
    let scene = match scene.as_deref() {
        Some(scene) => scene,
        None => &empty_scene,
    };

    for (entity, position, aim, mut look, mut slots) in actors.iter_mut() {
        let muzzle = muzzle_point(position.0, &look);
        let Some(instance) = slots.active_mut() else {
            continue;
        };

        let tick = instance.update(dt, muzzle, aim.0, &mut look, scene, &mut trails);

        for _ in 0..tick.attacks {
            animations.write(AnimationRequest {
                actor: entity,
                cue: AnimationCue::Attack,
            });
        }
    }
}
