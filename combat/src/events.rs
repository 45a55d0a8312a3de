//! Combat messages
//!
//! Buffered messages connecting the weapon systems to their collaborators:
//! the input layer raises equip requests, the animation layer consumes cues,
//! and anyone interested observes weapon changes.

use bevy::prelude::*;
use shared::WeaponDefinition;
use std::sync::Arc;

/// Ask an actor to mount a weapon built from `definition`.
#[derive(Message)]
pub struct EquipRequest {
    pub actor: Entity,
    pub definition: Arc<WeaponDefinition>,
}

/// Raised the moment a slot is assigned a new weapon, before the animated
/// switch sequence runs.
#[derive(Message)]
pub struct WeaponChanged {
    pub actor: Entity,
    pub definition: Arc<WeaponDefinition>,
}

/// What the external animation layer should play.
#[derive(Clone, Debug, PartialEq)]
pub enum AnimationCue {
    /// Stow the current weapon
    Holster,
    /// Bring up a weapon using its named equip animation
    Equip { animation: String },
    /// One melee swing
    Attack,
}

/// Cue for the external animation layer. Receiving a cue is expected to
/// restart the layer's playback clock.
#[derive(Message)]
pub struct AnimationRequest {
    pub actor: Entity,
    pub cue: AnimationCue,
}
