//! Desert Duel - frame-driven turn-based combat core

pub mod battle;
pub mod combat;
pub mod core;
pub mod sprites;
