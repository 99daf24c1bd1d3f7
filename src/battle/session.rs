//! Game mode tracking around the battle
//!
//! The session owns the "which mode is active" flag. Battle only runs while
//! the mode is `Battle`; encounter results decide which screen comes next.

use serde::{Deserialize, Serialize};

use crate::battle::execution::{Battle, EncounterStart, TickOutcome};
use crate::core::error::{DuelError, Result};
use crate::core::types::Side;

/// Top-level game modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    Menu,
    Hub,
    Battle,
    LevelUp,
    GameOver,
    GameBeaten,
}

impl GameMode {
    /// Screens that wait for the player to acknowledge before returning to the hub
    pub fn awaits_acknowledge(&self) -> bool {
        matches!(self, GameMode::LevelUp | GameMode::GameOver)
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    battle: Battle,
    mode: GameMode,
    previous_mode: GameMode,
}

impl Session {
    pub fn new(battle: Battle) -> Self {
        Self {
            battle,
            mode: GameMode::Menu,
            previous_mode: GameMode::Menu,
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn previous_mode(&self) -> GameMode {
        self.previous_mode
    }

    /// Is battle mode the active mode?
    pub fn battle_active(&self) -> bool {
        self.mode == GameMode::Battle
    }

    pub fn battle(&self) -> &Battle {
        &self.battle
    }

    /// Menu -> Hub
    pub fn start_game(&mut self) -> Result<GameMode> {
        if self.mode != GameMode::Menu {
            return Err(DuelError::OrderRejected(format!(
                "cannot start a game from {:?}",
                self.mode
            )));
        }
        self.switch(GameMode::Hub);
        Ok(self.mode)
    }

    /// Hub -> Battle, or straight to GameBeaten when nobody is left to fight
    pub fn enter_battle(&mut self) -> Result<GameMode> {
        if self.mode != GameMode::Hub {
            return Err(DuelError::OrderRejected(format!(
                "cannot enter battle from {:?}",
                self.mode
            )));
        }

        let next = match self.battle.start_encounter()? {
            EncounterStart::NoMoreEnemies => GameMode::GameBeaten,
            EncounterStart::Engaged { .. } | EncounterStart::Resumed { .. } => GameMode::Battle,
        };
        self.switch(next);
        Ok(next)
    }

    /// The player clicked the default attack
    pub fn player_attack(&mut self) -> Result<()> {
        if !self.battle_active() {
            return Err(DuelError::OrderRejected("not in battle".into()));
        }
        self.battle.player_attack()
    }

    /// Run one frame. Returns the new mode if the frame caused a transition.
    pub fn update(&mut self, dt: f32) -> Option<GameMode> {
        if !self.battle_active() {
            return None;
        }

        let next = match self.battle.tick(dt) {
            TickOutcome::EncounterOver { fallen } => {
                self.battle.end_encounter();
                match fallen {
                    Side::Enemy => GameMode::LevelUp,
                    Side::Player => GameMode::GameOver,
                }
            }
            TickOutcome::NoEncounter => GameMode::GameBeaten,
            TickOutcome::Continuing | TickOutcome::CombatantDied { .. } => return None,
        };

        self.switch(next);
        Some(next)
    }

    /// Leave a victory or defeat screen for the hub
    pub fn acknowledge(&mut self) -> Option<GameMode> {
        if !self.mode.awaits_acknowledge() {
            return None;
        }
        self.switch(GameMode::Hub);
        Some(GameMode::Hub)
    }

    fn switch(&mut self, next: GameMode) {
        tracing::info!(from = ?self.mode, to = ?next, "mode change");
        self.previous_mode = self.mode;
        self.mode = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::roster::FighterSpec;
    use crate::core::config::BattleConfig;

    fn session(enemies: Vec<FighterSpec>) -> Session {
        let config = BattleConfig {
            seed: Some(99),
            enemies,
            ..BattleConfig::default()
        };
        Session::new(Battle::from_config(&config).unwrap())
    }

    #[test]
    fn test_menu_to_hub_to_battle() {
        let mut session = session(vec![FighterSpec::default_enemy("enemy1")]);
        assert_eq!(session.mode(), GameMode::Menu);
        assert!(session.enter_battle().is_err());

        assert_eq!(session.start_game().unwrap(), GameMode::Hub);
        assert_eq!(session.enter_battle().unwrap(), GameMode::Battle);
        assert!(session.battle_active());
        assert_eq!(session.previous_mode(), GameMode::Hub);
    }

    #[test]
    fn test_empty_roster_goes_to_game_beaten() {
        let mut session = session(vec![]);
        session.start_game().unwrap();
        assert_eq!(session.enter_battle().unwrap(), GameMode::GameBeaten);
        assert!(!session.battle_active());
        assert_eq!(session.update(1.0 / 60.0), None);
    }

    #[test]
    fn test_attack_rejected_outside_battle() {
        let mut session = session(vec![FighterSpec::default_enemy("enemy1")]);
        assert!(session.player_attack().is_err());
    }

    #[test]
    fn test_acknowledge_only_from_result_screens() {
        let mut session = session(vec![FighterSpec::default_enemy("enemy1")]);
        assert_eq!(session.acknowledge(), None);
        session.start_game().unwrap();
        assert_eq!(session.acknowledge(), None);
        assert!(GameMode::LevelUp.awaits_acknowledge());
        assert!(!GameMode::GameBeaten.awaits_acknowledge());
    }
}
