//! Shared weapon configuration and math
//!
//! Pure data and pure functions consumed by the combat runtime: weapon
//! definitions, ballistic trajectory sampling, recoil sequences, and the
//! view pitch clamp. Nothing here holds per-frame state.

pub mod aim;
pub mod weapons;

pub use aim::{clamp_view_pitch, wrap_yaw};
pub use weapons::ballistics;
pub use weapons::damage::{ColliderId, HitPayload};
pub use weapons::recoil::RecoilPattern;
pub use weapons::{WeaponDefinition, WeaponKind, WeaponSlot};
