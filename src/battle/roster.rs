//! Fighter specs and the queue of enemies still to be fought
//!
//! Enemies are stored as specs and only become combatants when drawn, so
//! each one gets fresh clocks and full health.

use serde::{Deserialize, Serialize};

use crate::combat::constants::{
    ENEMY_ATTACK_POWER, ENEMY_MAX_HEALTH, PLAYER_ATTACK_POWER, PLAYER_MAX_HEALTH,
};
use crate::combat::{ArenaLayout, Combatant, CombatantStats, MotionSettings, Role};
use crate::core::error::Result;
use crate::core::types::BodySize;
use crate::sprites::AnimationLibrary;

/// Everything needed to build one combatant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FighterSpec {
    pub name: String,
    pub max_health: u32,
    pub attack_power: u32,
    #[serde(default)]
    pub body: BodySize,
}

impl FighterSpec {
    pub fn new(name: impl Into<String>, max_health: u32, attack_power: u32) -> Self {
        Self {
            name: name.into(),
            max_health,
            attack_power,
            body: BodySize::default(),
        }
    }

    pub fn default_player() -> Self {
        Self::new("player", PLAYER_MAX_HEALTH, PLAYER_ATTACK_POWER)
    }

    pub fn default_enemy(name: impl Into<String>) -> Self {
        Self::new(name, ENEMY_MAX_HEALTH, ENEMY_ATTACK_POWER)
    }

    pub fn stats(&self) -> Result<CombatantStats> {
        CombatantStats::new(self.max_health, self.attack_power)
    }

    /// Build a combatant playing `role`, with its own copies of every animation.
    pub fn build(
        &self,
        role: Role,
        arena: &ArenaLayout,
        library: &AnimationLibrary,
        motion: MotionSettings,
    ) -> Result<Combatant> {
        Combatant::new(
            self.name.clone(),
            role,
            self.stats()?,
            self.body,
            arena,
            library,
            motion,
        )
    }
}

/// Last-in-first-out queue of enemies
#[derive(Debug, Clone, Default)]
pub struct EnemyRoster {
    stack: Vec<FighterSpec>,
}

impl EnemyRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push specs in order; the last one pushed is fought first.
    pub fn from_specs(specs: impl IntoIterator<Item = FighterSpec>) -> Self {
        let mut roster = Self::new();
        for spec in specs {
            roster.push(spec);
        }
        roster
    }

    pub fn push(&mut self, spec: FighterSpec) {
        self.stack.push(spec);
    }

    pub fn pop(&mut self) -> Option<FighterSpec> {
        self.stack.pop()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_is_lifo() {
        let mut roster = EnemyRoster::from_specs([
            FighterSpec::default_enemy("first"),
            FighterSpec::default_enemy("second"),
        ]);
        roster.push(FighterSpec::default_enemy("third"));

        assert_eq!(roster.len(), 3);
        assert_eq!(roster.pop().unwrap().name, "third");
        assert_eq!(roster.pop().unwrap().name, "second");
        assert_eq!(roster.pop().unwrap().name, "first");
        assert!(roster.pop().is_none());
        assert!(roster.is_empty());
    }

    #[test]
    fn test_build_uses_spec_stats() {
        let library = AnimationLibrary::stick_figure().unwrap();
        let enemy = FighterSpec::new("brute", 25, 7)
            .build(
                Role::Enemy,
                &ArenaLayout::default(),
                &library,
                MotionSettings::default(),
            )
            .unwrap();
        assert_eq!(enemy.name(), "brute");
        assert_eq!(enemy.max_health(), 25);
        assert_eq!(enemy.attack_power(), 7);
    }

    #[test]
    fn test_invalid_spec_fails_to_build() {
        let library = AnimationLibrary::stick_figure().unwrap();
        let result = FighterSpec::new("glass", 10, 0).build(
            Role::Enemy,
            &ArenaLayout::default(),
            &library,
            MotionSettings::default(),
        );
        assert!(result.is_err());
    }
}
