//! Damage rolls and floating damage numbers

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::combat::constants::{POPUP_RISE_SPEED, POPUP_VANISH_HEIGHT};
use crate::core::error::{DuelError, Result};

/// Roll damage for one strike: uniform in `[0, attack_power)`.
///
/// A zero roll is a miss. `attack_power` itself can never be rolled.
pub fn roll_damage<R: Rng + ?Sized>(attack_power: u32, rng: &mut R) -> Result<u32> {
    if attack_power == 0 {
        return Err(DuelError::InvalidStats(
            "attack power must be positive to roll damage".into(),
        ));
    }
    Ok(rng.gen_range(0..attack_power))
}

/// How floating damage numbers move
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupMotion {
    /// Rise speed in pixels per second
    pub rise_speed: f32,
    /// Height above the spawn point at which the number disappears
    pub vanish_height: f32,
}

impl Default for PopupMotion {
    fn default() -> Self {
        Self {
            rise_speed: POPUP_RISE_SPEED,
            vanish_height: POPUP_VANISH_HEIGHT,
        }
    }
}

/// A damage number drifting up from the combatant that took the hit.
///
/// Purely cosmetic: it lives alongside the combatant and never feeds back
/// into the state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamagePopup {
    pub amount: u32,
    /// Offset from the combatant's top-left corner
    pub offset: Vec2,
}

impl DamagePopup {
    /// Spawn centred horizontally over a body `body_width` wide.
    pub fn new(amount: u32, body_width: f32) -> Self {
        Self {
            amount,
            offset: Vec2::new(body_width / 2.0, 0.0),
        }
    }

    /// Rise for `dt` seconds. Returns false once the popup should be removed.
    pub fn update(&mut self, dt: f32, motion: &PopupMotion) -> bool {
        self.offset.y -= motion.rise_speed * dt;
        self.offset.y >= -motion.vanish_height
    }
}
