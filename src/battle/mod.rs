//! Battle system - one player against a queue of enemies, one turn at a time
//!
//! The arbiter never deals damage itself. It hands the turn over, orders the
//! enemy to strike back, and watches for the first combatant to fall.

pub mod execution;
pub mod roster;
pub mod session;

// Re-exports for convenient access
pub use execution::{
    Battle, BattleEvent, BattleEventLog, BattleEventType, EncounterStart, HealthReadout,
    TickOutcome,
};
pub use roster::{EnemyRoster, FighterSpec};
pub use session::{GameMode, Session};
