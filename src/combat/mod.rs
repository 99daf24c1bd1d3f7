//! Combatants and their strike cycle
//!
//! A combatant walks from its idle anchor to its attack anchor, plays its
//! attack, deals one damage roll to its target and walks back. Animation
//! completion, not a fixed timer, decides when the attack lands.

pub mod combatant;
pub mod constants;
pub mod damage;
pub mod role;
pub mod state;

pub use combatant::{Combatant, CombatantStats, MotionSettings, Strike};
pub use damage::{roll_damage, DamagePopup, PopupMotion};
pub use role::{Anchors, ArenaLayout, Role};
pub use state::{CombatState, StateTransitions, StateTrigger};
