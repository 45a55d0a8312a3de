//! Weapon system - slots, kinds, and definition registry
//!
//! Definitions are immutable configuration; runtime state lives with the
//! owning actor and only references a definition.

pub mod ballistics;
pub mod damage;
pub mod recoil;

use serde::{Deserialize, Serialize};

/// Mount position an actor can occupy with one weapon instance at a time.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum WeaponSlot {
    #[default]
    Primary,
    Secondary,
}

impl WeaponSlot {
    /// Number of slots an actor carries.
    pub const COUNT: usize = 2;

    /// Explicit slot-to-table index mapping.
    pub fn index(&self) -> usize {
        match self {
            WeaponSlot::Primary => 0,
            WeaponSlot::Secondary => 1,
        }
    }
}

/// Available weapon kinds
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum WeaponKind {
    #[default]
    Rifle,
    Pistol,
    Sword,
}

/// Complete configuration for one weapon.
///
/// Loaded from data or taken from the built-in table; never mutated at
/// runtime. `magazine_size` and `reload_time` are carried for the inventory
/// layer but not consumed by the simulation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeaponDefinition {
    /// Display name, also the key for the weapon's equip animation
    pub name: String,
    /// Slot this weapon mounts into
    pub slot: WeaponSlot,
    pub kind: WeaponKind,
    /// Shots (or melee swings) per second
    pub fire_rate: f32,
    /// Fixed upward kick per shot (degrees)
    pub vertical_recoil: f32,
    /// Horizontal recoil sequence bounds (degrees)
    pub horizontal_recoil_min: f32,
    pub horizontal_recoil_max: f32,
    /// Step between consecutive horizontal recoil offsets (degrees)
    pub recoil_interval: f32,
    /// Muzzle velocity in m/s
    pub bullet_speed: f32,
    /// Downward acceleration magnitude in m/s² (0 = straight line)
    pub bullet_drop: f32,
    /// Seconds a bullet may fly since its last bounce
    pub bullet_max_lifetime: f32,
    pub bullet_damage: f32,
    /// Ricochet budget per bullet
    pub bullet_max_bounces: i32,
    /// Velocity scale applied at each ricochet
    pub bullet_bounce_speed_modifier: f32,
    /// Targets a bullet may pass through
    pub piercing: u32,
    pub knockback_amount: f32,
    /// Magazine capacity (tracked only)
    pub magazine_size: u32,
    /// Reload time in seconds (tracked only)
    pub reload_time: f32,
}

impl WeaponKind {
    /// Get the built-in definition for this weapon kind
    pub fn definition(&self) -> WeaponDefinition {
        match self {
            WeaponKind::Rifle => WeaponDefinition {
                name: "rifle".to_string(),
                slot: WeaponSlot::Primary,
                kind: WeaponKind::Rifle,
                fire_rate: 10.0,
                vertical_recoil: 0.9,
                horizontal_recoil_min: -2.0,
                horizontal_recoil_max: 2.0,
                recoil_interval: 0.5,
                bullet_speed: 120.0,
                bullet_drop: 9.8,
                bullet_max_lifetime: 4.0,
                bullet_damage: 28.0,
                bullet_max_bounces: 1,
                bullet_bounce_speed_modifier: 0.6,
                piercing: 0,
                knockback_amount: 2.0,
                magazine_size: 30,
                reload_time: 2.2,
            },
            WeaponKind::Pistol => WeaponDefinition {
                name: "pistol".to_string(),
                slot: WeaponSlot::Secondary,
                kind: WeaponKind::Pistol,
                fire_rate: 4.0,
                vertical_recoil: 1.4,
                horizontal_recoil_min: 0.0,
                horizontal_recoil_max: 0.0,
                recoil_interval: 0.0,
                bullet_speed: 90.0,
                bullet_drop: 9.8,
                bullet_max_lifetime: 3.0,
                bullet_damage: 20.0,
                bullet_max_bounces: 0,
                bullet_bounce_speed_modifier: 0.5,
                piercing: 0,
                knockback_amount: 1.2,
                magazine_size: 12,
                reload_time: 1.4,
            },
            WeaponKind::Sword => WeaponDefinition {
                name: "sword".to_string(),
                slot: WeaponSlot::Secondary,
                kind: WeaponKind::Sword,
                fire_rate: 1.6,
                vertical_recoil: 0.0,
                horizontal_recoil_min: 0.0,
                horizontal_recoil_max: 0.0,
                recoil_interval: 0.0,
                bullet_speed: 0.0,
                bullet_drop: 0.0,
                bullet_max_lifetime: 0.0,
                bullet_damage: 35.0,
                bullet_max_bounces: 0,
                bullet_bounce_speed_modifier: 0.0,
                piercing: 0,
                knockback_amount: 4.0,
                magazine_size: 0,
                reload_time: 0.0,
            },
        }
    }
}

impl WeaponDefinition {
    /// Whether this weapon fires projectiles
    pub fn is_ranged(&self) -> bool {
        !matches!(self.kind, WeaponKind::Sword)
    }

    /// Seconds between consecutive shots
    pub fn fire_interval(&self) -> f32 {
        1.0 / self.fire_rate
    }
}

impl Default for WeaponDefinition {
    fn default() -> Self {
        WeaponKind::Rifle.definition()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_definitions_are_consistent() {
        let rifle = WeaponKind::Rifle.definition();
        assert!(rifle.is_ranged());
        assert_eq!(rifle.slot, WeaponSlot::Primary);
        assert!(rifle.fire_interval() > 0.0);

        let sword = WeaponKind::Sword.definition();
        assert!(!sword.is_ranged());
        assert_eq!(sword.slot, WeaponSlot::Secondary);
    }

    #[test]
    fn slot_indices_cover_the_table() {
        assert_eq!(WeaponSlot::Primary.index(), 0);
        assert_eq!(WeaponSlot::Secondary.index(), 1);
        assert!(WeaponSlot::Primary.index() < WeaponSlot::COUNT);
        assert!(WeaponSlot::Secondary.index() < WeaponSlot::COUNT);
    }

    #[test]
    fn fire_interval_matches_rate() {
        let mut def = WeaponKind::Rifle.definition();
        def.fire_rate = 25.0;
        assert!((def.fire_interval() - 0.04).abs() < 1e-6);
    }
}
