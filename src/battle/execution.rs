//! Turn arbitration
//!
//! Each tick: active combatant -> other combatant -> turn hand-off -> death check

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::battle::roster::{EnemyRoster, FighterSpec};
use crate::combat::{ArenaLayout, Combatant, MotionSettings, Role};
use crate::core::config::BattleConfig;
use crate::core::error::{DuelError, Result};
use crate::core::types::{CombatantId, Side, Tick};
use crate::sprites::AnimationLibrary;

/// How `start_encounter` went
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncounterStart {
    /// A fresh enemy was drawn from the roster
    Engaged { enemy: CombatantId, name: String },
    /// The enemy from the last encounter survived and is back at full health
    Resumed { enemy: CombatantId, name: String },
    /// Roster empty and nobody engaged
    NoMoreEnemies,
}

/// What a single tick produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickOutcome {
    /// No enemy engaged; nothing was simulated
    NoEncounter,
    /// Fight in progress
    Continuing,
    /// A combatant ran out of health this tick; its death animation is starting
    CombatantDied { side: Side, id: CombatantId },
    /// The fallen combatant's death animation has finished
    EncounterOver { fallen: Side },
}

/// Log entry for battle events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleEvent {
    pub tick: Tick,
    pub event_type: BattleEventType,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BattleEventType {
    EncounterStarted { enemy: String },
    EncounterResumed { enemy: String },
    NoMoreEnemies,
    TurnPassed { to: Side },
    AttackOrdered { by: Side },
    StrikeLanded { by: Side, damage: u32, remaining: u32 },
    CombatantFell { side: Side },
    EncounterEnded { fallen: Side },
}

/// Everything logged during a battle, oldest first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BattleEventLog {
    pub events: Vec<BattleEvent>,
}

impl BattleEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event_type: BattleEventType, description: String, tick: Tick) {
        self.events.push(BattleEvent {
            tick,
            event_type,
            description,
        });
    }
}

/// HUD line for one combatant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReadout {
    pub name: String,
    pub current: u32,
    pub max: u32,
}

impl HealthReadout {
    fn of(combatant: &Combatant) -> Self {
        Self {
            name: combatant.name().to_string(),
            current: combatant.health(),
            max: combatant.max_health(),
        }
    }
}

impl std::fmt::Display for HealthReadout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {}", self.current, self.max)
    }
}

/// The turn arbiter: one player, a roster of enemies, one fight at a time
#[derive(Debug, Clone)]
pub struct Battle {
    player: Combatant,
    roster: EnemyRoster,
    engaged: Option<Combatant>,

    // Turn tracking
    active: Side,
    fallen: Option<Side>,
    concluded: bool,
    attack_controls: bool,

    // Injected dependencies
    library: AnimationLibrary,
    arena: ArenaLayout,
    motion: MotionSettings,
    rng: ChaCha8Rng,

    tick: Tick,
    battle_log: BattleEventLog,
}

impl Battle {
    pub fn new(
        player: Combatant,
        roster: EnemyRoster,
        library: AnimationLibrary,
        arena: ArenaLayout,
        motion: MotionSettings,
        rng: ChaCha8Rng,
    ) -> Result<Self> {
        if player.role() != Role::Player {
            return Err(DuelError::InvalidConfig(format!(
                "{} is not playing the player role",
                player.name()
            )));
        }
        library.ensure_complete()?;

        Ok(Self {
            player,
            roster,
            engaged: None,
            active: Side::Player,
            fallen: None,
            concluded: false,
            attack_controls: false,
            library,
            arena,
            motion,
            rng,
            tick: 0,
            battle_log: BattleEventLog::new(),
        })
    }

    /// Build player, roster and library from a validated config
    pub fn from_config(config: &BattleConfig) -> Result<Self> {
        config.validate()?;

        let library = config.animation_library()?;
        let player = config
            .player
            .build(Role::Player, &config.arena, &library, config.motion)?;
        let roster = EnemyRoster::from_specs(config.enemies.iter().cloned());
        let seed = config.seed.unwrap_or_else(rand::random);
        tracing::info!(seed, enemies = roster.len(), "battle created");

        Self::new(
            player,
            roster,
            library,
            config.arena,
            config.motion,
            ChaCha8Rng::seed_from_u64(seed),
        )
    }

    // === Queries ===

    pub fn player(&self) -> &Combatant {
        &self.player
    }

    pub fn enemy(&self) -> Option<&Combatant> {
        self.engaged.as_ref()
    }

    pub fn combatant(&self, side: Side) -> Option<&Combatant> {
        match side {
            Side::Player => Some(&self.player),
            Side::Enemy => self.engaged.as_ref(),
        }
    }

    /// Side currently holding the turn
    pub fn active_side(&self) -> Side {
        self.active
    }

    /// Side that ran out of health this encounter, if any
    pub fn fallen(&self) -> Option<Side> {
        self.fallen
    }

    /// Whether the player's attack buttons should be shown
    pub fn attack_controls_visible(&self) -> bool {
        self.attack_controls
    }

    pub fn remaining_enemies(&self) -> usize {
        self.roster.len()
    }

    pub fn tick_count(&self) -> Tick {
        self.tick
    }

    pub fn log(&self) -> &[BattleEvent] {
        &self.battle_log.events
    }

    pub fn player_health(&self) -> HealthReadout {
        HealthReadout::of(&self.player)
    }

    pub fn enemy_health(&self) -> Option<HealthReadout> {
        self.engaged.as_ref().map(HealthReadout::of)
    }

    // === Encounter lifecycle ===

    /// Begin (or resume) a fight. A surviving enemy is healed and fought
    /// again; otherwise the next enemy is drawn from the roster. The player
    /// keeps their health unless they fell last time, and always gets the
    /// first turn.
    pub fn start_encounter(&mut self) -> Result<EncounterStart> {
        self.fallen = None;
        self.concluded = false;

        let start = match self.engaged.as_mut() {
            Some(enemy) if enemy.is_alive() => {
                enemy.reset_health();
                EncounterStart::Resumed {
                    enemy: enemy.id(),
                    name: enemy.name().to_string(),
                }
            }
            _ => match self.roster.pop() {
                Some(spec) => {
                    let enemy = self.spawn_enemy(&spec)?;
                    let start = EncounterStart::Engaged {
                        enemy: enemy.id(),
                        name: enemy.name().to_string(),
                    };
                    self.engaged = Some(enemy);
                    start
                }
                None => {
                    self.engaged = None;
                    EncounterStart::NoMoreEnemies
                }
            },
        };

        // Damage carries over between wins; only a fallen player is revived
        if !self.player.is_alive() {
            self.player.reset_health();
        }
        self.player.enter_battle();
        if let Some(enemy) = self.engaged.as_mut() {
            enemy.enter_battle();
        }

        self.active = Side::Player;
        self.player.begin_turn();
        self.attack_controls = self.engaged.is_some();

        match &start {
            EncounterStart::Engaged { name, .. } => {
                tracing::info!(enemy = %name, remaining = self.roster.len(), "encounter started");
                self.battle_log.push(
                    BattleEventType::EncounterStarted { enemy: name.clone() },
                    format!("{} steps forward", name),
                    self.tick,
                );
            }
            EncounterStart::Resumed { name, .. } => {
                tracing::info!(enemy = %name, "encounter resumed");
                self.battle_log.push(
                    BattleEventType::EncounterResumed { enemy: name.clone() },
                    format!("{} is back at full health", name),
                    self.tick,
                );
            }
            EncounterStart::NoMoreEnemies => {
                tracing::info!("no enemies left");
                self.battle_log.push(
                    BattleEventType::NoMoreEnemies,
                    "No enemies left".into(),
                    self.tick,
                );
            }
        }

        Ok(start)
    }

    /// Leave the current encounter. A defeated enemy is released so the next
    /// `start_encounter` draws a new one instead of reviving it.
    pub fn end_encounter(&mut self) -> Option<Side> {
        if self.fallen == Some(Side::Enemy) {
            if let Some(enemy) = self.engaged.take() {
                tracing::info!(enemy = %enemy.name(), "enemy defeated");
            }
        }
        self.attack_controls = false;
        self.fallen
    }

    /// The player chose the default attack.
    pub fn player_attack(&mut self) -> Result<()> {
        let result = self.order_player_attack();
        if let Err(e) = &result {
            tracing::warn!(error = %e, "player attack rejected");
        }
        result
    }

    fn order_player_attack(&mut self) -> Result<()> {
        if self.fallen.is_some() {
            return Err(DuelError::OrderRejected("the encounter is decided".into()));
        }
        if self.active != Side::Player || !self.attack_controls {
            return Err(DuelError::OrderRejected("not the player's turn".into()));
        }
        let enemy = self
            .engaged
            .as_ref()
            .ok_or_else(|| DuelError::OrderRejected("no enemy engaged".into()))?;

        self.player.begin_attack(enemy)?;
        self.attack_controls = false;
        self.battle_log.push(
            BattleEventType::AttackOrdered { by: Side::Player },
            format!("{} attacks", self.player.name()),
            self.tick,
        );
        Ok(())
    }

    // === Per-frame ===

    /// Simulate one frame of `dt` seconds.
    pub fn tick(&mut self, dt: f32) -> TickOutcome {
        let Some(enemy) = self.engaged.as_mut() else {
            return TickOutcome::NoEncounter;
        };
        self.tick += 1;

        let player = &mut self.player;
        let rng = &mut self.rng;
        let strike = match self.active {
            Side::Player => {
                let strike = player.update(dt, Some(&mut *enemy), rng);
                enemy.update(dt, None, rng);
                strike
            }
            Side::Enemy => {
                let strike = enemy.update(dt, Some(&mut *player), rng);
                player.update(dt, None, rng);
                strike
            }
        };

        if let Some(strike) = strike {
            let by = self.active;
            let description = if strike.lethal() {
                format!("{:?} lands a finishing blow for {}", by, strike.damage)
            } else {
                format!("{:?} hits for {} ({} left)", by, strike.damage, strike.target_health)
            };
            self.battle_log.push(
                BattleEventType::StrikeLanded {
                    by,
                    damage: strike.damage,
                    remaining: strike.target_health,
                },
                description,
                self.tick,
            );
        }

        if self.fallen.is_none() {
            self.hand_off_turn();

            if let Some(outcome) = self.check_for_death() {
                return outcome;
            }
        }

        match self.fallen {
            Some(side) if self.death_animation_finished(side) => {
                if !self.concluded {
                    self.concluded = true;
                    tracing::info!(fallen = ?side, tick = self.tick, "encounter over");
                    self.battle_log.push(
                        BattleEventType::EncounterEnded { fallen: side },
                        format!("{:?} has fallen", side),
                        self.tick,
                    );
                }
                TickOutcome::EncounterOver { fallen: side }
            }
            _ => TickOutcome::Continuing,
        }
    }

    fn hand_off_turn(&mut self) {
        let finished = self
            .combatant(self.active)
            .is_some_and(|current| current.turn_over());
        if !finished {
            return;
        }

        self.active = self.active.other();
        let Some(next) = self.combatant_mut(self.active) else {
            return;
        };
        next.begin_turn();
        let next_alive = next.is_alive();

        tracing::debug!(to = ?self.active, tick = self.tick, "turn passed");
        let to = self.active;
        self.battle_log.push(
            BattleEventType::TurnPassed { to },
            format!("{:?} to act", to),
            self.tick,
        );

        if !next_alive {
            return;
        }

        match self.active {
            Side::Player => self.attack_controls = true,
            Side::Enemy => {
                self.attack_controls = false;
                self.order_enemy_attack();
            }
        }
    }

    /// The enemy has no decisions to make: it always strikes back.
    fn order_enemy_attack(&mut self) {
        if !self.player.is_alive() {
            return;
        }
        let Some(enemy) = self.engaged.as_mut() else {
            return;
        };

        match enemy.begin_attack(&self.player) {
            Ok(()) => {
                let name = enemy.name().to_string();
                self.battle_log.push(
                    BattleEventType::AttackOrdered { by: Side::Enemy },
                    format!("{} attacks", name),
                    self.tick,
                );
            }
            Err(e) => {
                debug_assert!(false, "arbiter issued an invalid enemy attack: {e}");
                tracing::error!(error = %e, "enemy attack order rejected");
            }
        }
    }

    /// Record the first combatant found out of health, active side first.
    fn check_for_death(&mut self) -> Option<TickOutcome> {
        let side = [self.active, self.active.other()]
            .into_iter()
            .find(|side| self.combatant(*side).is_some_and(|c| !c.is_alive()))?;
        let id = self.combatant(side)?.id();

        self.fallen = Some(side);
        self.attack_controls = false;
        tracing::info!(side = ?side, tick = self.tick, "combatant fell");
        self.battle_log.push(
            BattleEventType::CombatantFell { side },
            format!("{:?} is out of health", side),
            self.tick,
        );
        Some(TickOutcome::CombatantDied { side, id })
    }

    fn death_animation_finished(&self, side: Side) -> bool {
        self.combatant(side)
            .is_some_and(|fallen| fallen.animation_finished())
    }

    fn combatant_mut(&mut self, side: Side) -> Option<&mut Combatant> {
        match side {
            Side::Player => Some(&mut self.player),
            Side::Enemy => self.engaged.as_mut(),
        }
    }

    fn spawn_enemy(&self, spec: &FighterSpec) -> Result<Combatant> {
        spec.build(Role::Enemy, &self.arena, &self.library, self.motion)
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::CombatState;

    const DT: f32 = 1.0 / 64.0;

    fn battle_with(enemies: Vec<FighterSpec>) -> Battle {
        let config = BattleConfig {
            seed: Some(17),
            enemies,
            ..BattleConfig::default()
        };
        Battle::from_config(&config).unwrap()
    }

    #[test]
    fn test_start_hands_turn_to_player() {
        let mut battle = battle_with(vec![FighterSpec::default_enemy("enemy1")]);
        let start = battle.start_encounter().unwrap();

        assert!(matches!(start, EncounterStart::Engaged { ref name, .. } if name == "enemy1"));
        assert_eq!(battle.active_side(), Side::Player);
        assert!(!battle.player().turn_over());
        assert!(battle.attack_controls_visible());
        assert_eq!(battle.remaining_enemies(), 0);
        assert_eq!(battle.fallen(), None);
    }

    #[test]
    fn test_empty_roster_reports_no_enemies() {
        let mut battle = battle_with(vec![]);
        assert_eq!(battle.start_encounter().unwrap(), EncounterStart::NoMoreEnemies);
        assert!(battle.enemy().is_none());
        assert!(!battle.attack_controls_visible());
        assert_eq!(battle.tick(DT), TickOutcome::NoEncounter);
        assert!(battle.player_attack().is_err());
    }

    #[test]
    fn test_player_attack_only_on_player_turn() {
        let mut battle = battle_with(vec![FighterSpec::default_enemy("enemy1")]);
        battle.start_encounter().unwrap();

        battle.player_attack().unwrap();
        assert_eq!(battle.player().state(), CombatState::MovingToAttack);
        assert!(!battle.attack_controls_visible());

        // Second click while the strike is underway
        assert!(matches!(
            battle.player_attack(),
            Err(DuelError::OrderRejected(_))
        ));
    }

    #[test]
    fn test_turn_passes_to_enemy_which_strikes_back() {
        let mut battle = battle_with(vec![FighterSpec::new("tank", 10_000, 10)]);
        battle.start_encounter().unwrap();
        battle.player_attack().unwrap();

        let mut frames = 0;
        while battle.active_side() == Side::Player {
            assert_eq!(battle.tick(DT), TickOutcome::Continuing);
            frames += 1;
            assert!(frames < 1000);
        }

        let enemy = battle.enemy().unwrap();
        assert_eq!(enemy.state(), CombatState::MovingToAttack);
        assert_eq!(enemy.target(), Some(battle.player().id()));
        assert!(!enemy.turn_over());
        assert!(!battle.attack_controls_visible());

        while battle.active_side() == Side::Enemy {
            battle.tick(DT);
        }
        assert!(battle.attack_controls_visible());
        assert!(battle
            .log()
            .iter()
            .any(|e| e.event_type == BattleEventType::AttackOrdered { by: Side::Enemy }));
    }

    #[test]
    fn test_surviving_enemy_is_healed_on_restart() {
        let mut battle = battle_with(vec![
            FighterSpec::default_enemy("second"),
            FighterSpec::new("tank", 500, 10),
        ]);
        battle.start_encounter().unwrap();
        let tank = battle.enemy().unwrap().id();

        battle.player_attack().unwrap();
        while battle.active_side() == Side::Player {
            battle.tick(DT);
        }

        // Leaving mid-fight keeps the enemy engaged
        assert_eq!(battle.end_encounter(), None);
        let start = battle.start_encounter().unwrap();
        assert!(matches!(start, EncounterStart::Resumed { enemy, .. } if enemy == tank));
        assert_eq!(battle.enemy().unwrap().health(), 500);
        assert_eq!(battle.remaining_enemies(), 1);
        assert_eq!(battle.enemy().unwrap().state(), CombatState::Idling);
    }

    #[test]
    fn test_health_readout() {
        let mut battle = battle_with(vec![FighterSpec::default_enemy("enemy1")]);
        battle.start_encounter().unwrap();
        assert_eq!(battle.player_health().to_string(), "100 / 100");
        assert_eq!(battle.enemy_health().unwrap().to_string(), "10 / 10");
    }
}
