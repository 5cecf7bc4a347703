#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Contest tuning parameters.
///
/// Distances are in world units, durations in ticks. Defaults reproduce
/// the shipped arena balance at a 60 Hz tick rate.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct Tuning {
    // Boss
    pub guard_radius: f32,
    pub treasure_min_pursue_radius: f32,
    pub pursue_radius: f32,
    pub attack_radius: f32,
    pub attack_cooldown_ticks: u64,
    pub attack_duration_ticks: u64,
    /// Fraction of the attack spent charging; the strike lands at this
    /// boundary, recovery fills the remainder.
    pub charge_fraction: f32,
    /// Waypoint-arrival tolerance as a multiple of the agent's radius.
    pub waypoint_tolerance_factor: f32,
    pub boss_max_health: u32,

    // Raiders
    pub max_health: u32,
    pub objective_radius: f32,
    pub pickup_radius: f32,
    pub pickup_dwell_ticks: u64,
    /// Pickup lockout stamped when a raider takes damage.
    pub pickup_lock_ticks: u64,
    pub base_radius: f32,
    pub melee_range: f32,
    pub projectile_range: f32,
    pub min_projectile_range: f32,
    pub facing_tolerance_degrees: f32,
    pub cover_safe_distance: f32,
    pub cover_radius: f32,
    pub raider_attack_cooldown_ticks: u64,

    // Scheduling
    pub damage_stun_ticks: u64,
    pub replan_throttle_ticks: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            guard_radius: 3.0,
            treasure_min_pursue_radius: 10.0,
            pursue_radius: 5.0,
            attack_radius: 2.0,
            attack_cooldown_ticks: 120,
            attack_duration_ticks: 48,
            charge_fraction: 0.9,
            waypoint_tolerance_factor: 1.5,
            boss_max_health: 20,
            max_health: 5,
            objective_radius: 2.0,
            pickup_radius: 3.0,
            pickup_dwell_ticks: 120,
            pickup_lock_ticks: 120,
            base_radius: 1.0,
            melee_range: 1.0,
            projectile_range: 5.0,
            min_projectile_range: 2.5,
            facing_tolerance_degrees: 15.0,
            cover_safe_distance: 6.0,
            cover_radius: 1.0,
            raider_attack_cooldown_ticks: 60,
            damage_stun_ticks: 30,
            replan_throttle_ticks: 10,
        }
    }
}
