//! Weapon slots and the equip sequence
//!
//! Equipping is split in two: the slot assignment (and destruction of the
//! replaced instance) is synchronous, while the holster/activate sequence is
//! an explicit state machine re-evaluated every poll against the external
//! animation layer's reported progress. A cue is expected to restart that
//! layer's playback clock.

use bevy::prelude::*;
use shared::{WeaponDefinition, WeaponSlot};
use std::sync::Arc;

use crate::components::AnimationState;
use crate::trail::TrailRegistry;
use crate::weapons::WeaponInstance;

/// Phase of an in-flight weapon switch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EquipPhase {
    Holstering,
    Activating,
}

/// In-flight weapon switch. At most one exists per actor; a new equip call
/// simply replaces it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EquipTransition {
    pub source: WeaponSlot,
    pub dest: WeaponSlot,
    pub phase: EquipPhase,
}

/// Step produced by one poll of the equip sequence.
#[derive(Clone, Debug, PartialEq)]
pub enum EquipStep {
    /// Holstering finished; play the named equip animation next.
    Activate { animation: String },
    /// Activation finished; the slot is now active.
    Done { slot: WeaponSlot },
}

/// The actor's two weapon mounts plus the switch state machine.
#[derive(Component)]
pub struct WeaponSlots {
    slots: [Option<WeaponInstance>; WeaponSlot::COUNT],
    active: WeaponSlot,
    transition: Option<EquipTransition>,
}

impl Default for WeaponSlots {
    fn default() -> Self {
        Self {
            slots: [None, None],
            active: WeaponSlot::Primary,
            transition: None,
        }
    }
}

impl WeaponSlots {
    pub fn instance(&self, slot: WeaponSlot) -> Option<&WeaponInstance> {
        self.slots[slot.index()].as_ref()
    }

    pub fn instance_mut(&mut self, slot: WeaponSlot) -> Option<&mut WeaponInstance> {
        self.slots[slot.index()].as_mut()
    }

    pub fn active_slot(&self) -> WeaponSlot {
        self.active
    }

    pub fn active(&self) -> Option<&WeaponInstance> {
        self.instance(self.active)
    }

    pub fn active_mut(&mut self) -> Option<&mut WeaponInstance> {
        let slot = self.active;
        self.instance_mut(slot)
    }

    pub fn active_definition(&self) -> Option<Arc<WeaponDefinition>> {
        self.active().map(|instance| Arc::clone(instance.definition()))
    }

    pub fn transition(&self) -> Option<&EquipTransition> {
        self.transition.as_ref()
    }

    pub fn is_switching(&self) -> bool {
        self.transition.is_some()
    }

    pub fn start_firing(&mut self) {
        if let Some(instance) = self.active_mut() {
            instance.start_firing();
        }
    }

    pub fn stop_firing(&mut self) {
        if let Some(instance) = self.active_mut() {
            instance.stop_firing();
        }
    }

    pub fn is_firing(&self) -> bool {
        self.active().is_some_and(|instance| instance.is_firing())
    }

    pub fn set_holstered(&mut self, holstered: bool) {
        if let Some(instance) = self.active_mut() {
            instance.set_holstered(holstered);
        }
    }

    /// Mount `instance` into its definition's slot.
    ///
    /// The replacement is immediate: any previous occupant is destroyed and
    /// its bullets purged before this returns, and the weapon-changed
    /// notification fires now. Only the holster/activate sequence that
    /// follows is gated on the animation layer. Calling this mid-sequence
    /// restarts the sequence from whatever slot is currently recorded
    /// active; sequences are never queued.
    ///
    /// Returns the mounted definition for the change notification. The
    /// caller raises the holster cue.
    pub fn equip(
        &mut self,
        mut instance: WeaponInstance,
        trails: &mut TrailRegistry,
    ) -> Arc<WeaponDefinition> {
        let dest = instance.definition().slot;
        let definition = Arc::clone(instance.definition());

        if let Some(mut old) = self.slots[dest.index()].take() {
            old.destroy(trails);
        }

        // The mount stays holstered until its activation completes
        instance.set_holstered(true);
        self.slots[dest.index()] = Some(instance);

        let source = self.active;
        if let Some(current) = self.instance_mut(source) {
            current.set_holstered(true);
        }
        self.transition = Some(EquipTransition {
            source,
            dest,
            phase: EquipPhase::Holstering,
        });

        definition
    }

    /// One poll of the switch sequence.
    ///
    /// Called once per physics step and once per render frame; does nothing
    /// until the animation layer reports the current phase complete.
    pub fn drive(&mut self, animation: &AnimationState) -> Option<EquipStep> {
        let transition = self.transition?;
        if !animation.is_complete() {
            return None;
        }

        match transition.phase {
            EquipPhase::Holstering => {
                let animation_name = self
                    .instance(transition.dest)
                    .map(|instance| instance.definition().name.clone())
                    .unwrap_or_default();
                self.transition = Some(EquipTransition {
                    phase: EquipPhase::Activating,
                    ..transition
                });
                Some(EquipStep::Activate {
                    animation: animation_name,
                })
            }
            EquipPhase::Activating => {
                if let Some(instance) = self.instance_mut(transition.dest) {
                    instance.set_holstered(false);
                }
                self.active = transition.dest;
                self.transition = None;
                Some(EquipStep::Done {
                    slot: transition.dest,
                })
            }
        }
    }

    /// Destroy every mounted instance, purging all bullets.
    pub fn destroy_all(&mut self, trails: &mut TrailRegistry) {
        for slot in &mut self.slots {
            if let Some(mut instance) = slot.take() {
                instance.destroy(trails);
            }
        }
        self.transition = None;
    }
}
