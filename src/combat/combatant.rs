//! A single combatant: health, position and the animation-gated strike cycle
//!
//! Each frame the combatant runs the step for its current state, which may
//! fire a trigger through `StateTransitions`, then advances its current
//! animation. Entering a state performs that state's entry action (select
//! its animation, snap to an anchor, drop the target).

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::combat::constants::DEFAULT_TRAVEL_SECONDS;
use crate::combat::damage::{roll_damage, DamagePopup, PopupMotion};
use crate::combat::role::{Anchors, ArenaLayout, Role};
use crate::combat::state::{CombatState, StateTransitions, StateTrigger};
use crate::core::error::{DuelError, Result};
use crate::core::types::{BodySize, CombatantId, Facing, Side};
use crate::sprites::{AnimationKind, AnimationLibrary, AnimationSet, FrameRegion};

/// Health and attack power, validated on construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatantStats {
    pub max_health: u32,
    pub attack_power: u32,
}

impl CombatantStats {
    pub fn new(max_health: u32, attack_power: u32) -> Result<Self> {
        let stats = Self {
            max_health,
            attack_power,
        };
        stats.validate()?;
        Ok(stats)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_health == 0 {
            return Err(DuelError::InvalidStats("max health must be positive".into()));
        }
        if self.attack_power == 0 {
            return Err(DuelError::InvalidStats("attack power must be positive".into()));
        }
        Ok(())
    }
}

/// Timing shared by every combatant in a battle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionSettings {
    /// Seconds to walk between anchors, each way
    pub travel_seconds: f32,
    pub popup: PopupMotion,
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            travel_seconds: DEFAULT_TRAVEL_SECONDS,
            popup: PopupMotion::default(),
        }
    }
}

/// Report of a landed strike. The damage has already been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strike {
    pub attacker: CombatantId,
    pub target: CombatantId,
    pub damage: u32,
    pub target_health: u32,
}

impl Strike {
    pub fn lethal(&self) -> bool {
        self.target_health == 0
    }
}

#[derive(Debug, Clone)]
pub struct Combatant {
    id: CombatantId,
    name: String,
    role: Role,
    stats: CombatantStats,
    health: u32,

    body: BodySize,
    anchors: Anchors,
    position: Vec2,
    facing: Facing,
    /// Seconds travelled from the idle anchor, in `[0, travel_seconds]`
    travel: f32,
    motion: MotionSettings,

    state: CombatState,
    previous: CombatState,
    target: Option<CombatantId>,
    turn_over: bool,
    damage_just_done: Option<u32>,

    animations: AnimationSet,
    popups: Vec<DamagePopup>,
}

impl Combatant {
    pub fn new(
        name: impl Into<String>,
        role: Role,
        stats: CombatantStats,
        body: BodySize,
        arena: &ArenaLayout,
        library: &AnimationLibrary,
        motion: MotionSettings,
    ) -> Result<Self> {
        stats.validate()?;
        if motion.travel_seconds <= 0.0 {
            return Err(DuelError::InvalidConfig(format!(
                "travel time must be positive, got {}",
                motion.travel_seconds
            )));
        }

        let anchors = role.anchors(arena, body);
        Ok(Self {
            id: CombatantId::new(),
            name: name.into(),
            role,
            stats,
            health: stats.max_health,
            body,
            anchors,
            position: anchors.idle,
            facing: role.battle_facing(),
            travel: 0.0,
            motion,
            state: CombatState::Idling,
            previous: CombatState::Idling,
            target: None,
            turn_over: true,
            damage_just_done: None,
            animations: library.instantiate_set()?,
            popups: Vec::new(),
        })
    }

    // === Queries ===

    pub fn id(&self) -> CombatantId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn side(&self) -> Side {
        self.role.side()
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.stats.max_health
    }

    pub fn attack_power(&self) -> u32 {
        self.stats.attack_power
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// HUD text, e.g. `"7 / 10"`
    pub fn health_readout(&self) -> String {
        format!("{} / {}", self.health, self.stats.max_health)
    }

    pub fn state(&self) -> CombatState {
        self.state
    }

    pub fn previous_state(&self) -> CombatState {
        self.previous
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn anchors(&self) -> Anchors {
        self.anchors
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn target(&self) -> Option<CombatantId> {
        self.target
    }

    /// Set once, the frame after this combatant gets back to idle from its own strike.
    pub fn turn_over(&self) -> bool {
        self.turn_over
    }

    /// Damage dealt by this combatant's most recent strike
    pub fn damage_just_done(&self) -> Option<u32> {
        self.damage_just_done
    }

    pub fn popups(&self) -> &[DamagePopup] {
        &self.popups
    }

    pub fn current_animation(&self) -> AnimationKind {
        self.animations.current_kind()
    }

    pub fn current_frame(&self) -> FrameRegion {
        self.animations.current_frame()
    }

    pub fn animation_finished(&self) -> bool {
        self.animations.finished()
    }

    pub fn animations(&self) -> &AnimationSet {
        &self.animations
    }

    // === Commands ===

    /// Hand this combatant the turn.
    pub fn begin_turn(&mut self) {
        self.turn_over = false;
    }

    /// Snap to the idle anchor, face the battle direction and show idle.
    /// A combatant out of health stays dying.
    pub fn enter_battle(&mut self) {
        self.facing = self.role.battle_facing();
        self.target = None;
        self.travel = 0.0;
        self.position = self.anchors.idle;
        if self.is_alive() {
            self.state = CombatState::Idling;
            self.previous = CombatState::Idling;
            self.animations.select(AnimationKind::Idle);
        }
    }

    /// Order a strike against `target`.
    pub fn begin_attack(&mut self, target: &Combatant) -> Result<()> {
        if !self.is_alive() {
            return Err(DuelError::OrderRejected(format!(
                "{} cannot attack while dying",
                self.name
            )));
        }
        if !self.state.can_attack() {
            return Err(DuelError::OrderRejected(format!(
                "{} is busy ({:?})",
                self.name, self.state
            )));
        }
        if target.id == self.id {
            return Err(DuelError::OrderRejected(format!(
                "{} cannot attack itself",
                self.name
            )));
        }
        if !target.is_alive() {
            return Err(DuelError::OrderRejected(format!(
                "{} is already down",
                target.name
            )));
        }

        self.target = Some(target.id);
        self.fire(StateTrigger::AttackOrdered);
        Ok(())
    }

    /// Lose `amount` health, never going below zero. Reaching zero forces
    /// the dying state from wherever the combatant was.
    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
        self.popups.push(DamagePopup::new(amount, self.body.width));

        if self.health == 0 {
            self.fire(StateTrigger::HealthDepleted);
        }
    }

    /// Back to full health; a dying combatant returns to idle.
    pub fn reset_health(&mut self) {
        self.health = self.stats.max_health;
        self.fire(StateTrigger::HealthRestored);
    }

    /// Run one frame: state step, then animation, then popups.
    ///
    /// `opponent` must be the ordered target while this combatant is
    /// attacking; it is the only other combatant this one may touch.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        opponent: Option<&mut Combatant>,
        rng: &mut R,
    ) -> Option<Strike> {
        let state_at_start = self.state;
        let mut strike = None;

        let trigger = match self.state {
            CombatState::Idling => self.step_idling(),
            CombatState::MovingToAttack => self.step_moving_to_attack(dt),
            CombatState::Attacking => {
                let (trigger, landed) = self.step_attacking(opponent, rng);
                strike = landed;
                trigger
            }
            CombatState::MovingToIdle => self.step_moving_to_idle(dt),
            CombatState::Dying => None,
        };

        self.previous = state_at_start;
        if let Some(trigger) = trigger {
            self.fire(trigger);
        }

        self.animations.advance(dt);

        let popup_motion = self.motion.popup;
        self.popups.retain_mut(|popup| popup.update(dt, &popup_motion));

        strike
    }

    // === State steps ===

    fn step_idling(&mut self) -> Option<StateTrigger> {
        if self.previous == CombatState::MovingToIdle {
            self.turn_over = true;
        }
        self.position = self.anchors.idle;
        self.animations.select(AnimationKind::Idle);
        None
    }

    fn step_moving_to_attack(&mut self, dt: f32) -> Option<StateTrigger> {
        let duration = self.motion.travel_seconds;
        self.travel = (self.travel + dt).min(duration);

        if self.travel >= duration {
            self.position = self.anchors.attack;
            Some(StateTrigger::ReachedAttackAnchor)
        } else {
            self.position = self.interpolated_position();
            None
        }
    }

    fn step_attacking<R: Rng + ?Sized>(
        &mut self,
        opponent: Option<&mut Combatant>,
        rng: &mut R,
    ) -> (Option<StateTrigger>, Option<Strike>) {
        if !self.animations.finished() {
            return (None, None);
        }

        let target = match opponent {
            Some(opponent) if Some(opponent.id) == self.target => opponent,
            _ => {
                debug_assert!(false, "{} finished a strike without its target", self.name);
                tracing::error!(
                    attacker = %self.name,
                    "strike finished without its target; no damage dealt"
                );
                return (Some(StateTrigger::AttackFinished), None);
            }
        };

        let damage = match roll_damage(self.stats.attack_power, rng) {
            Ok(damage) => damage,
            Err(e) => {
                tracing::error!(attacker = %self.name, error = %e, "damage roll failed");
                0
            }
        };

        target.take_damage(damage);
        self.damage_just_done = Some(damage);

        tracing::debug!(
            attacker = %self.name,
            target = %target.name,
            damage,
            remaining = target.health,
            "strike landed"
        );

        let strike = Strike {
            attacker: self.id,
            target: target.id,
            damage,
            target_health: target.health,
        };
        (Some(StateTrigger::AttackFinished), Some(strike))
    }

    fn step_moving_to_idle(&mut self, dt: f32) -> Option<StateTrigger> {
        self.travel = (self.travel - dt).max(0.0);

        if self.travel <= 0.0 {
            self.position = self.anchors.idle;
            Some(StateTrigger::ReachedIdleAnchor)
        } else {
            self.position = self.interpolated_position();
            None
        }
    }

    fn interpolated_position(&self) -> Vec2 {
        let s = self.travel / self.motion.travel_seconds;
        self.anchors.idle.lerp(self.anchors.attack, s)
    }

    // === Transitions ===

    fn fire(&mut self, trigger: StateTrigger) {
        let next = StateTransitions.apply(self.state, trigger);
        if next == self.state {
            return;
        }

        tracing::debug!(combatant = %self.name, from = ?self.state, to = ?next, "state change");
        self.state = next;
        self.enter(next);
    }

    fn enter(&mut self, state: CombatState) {
        match state {
            CombatState::Idling => {
                self.travel = 0.0;
                self.position = self.anchors.idle;
            }
            CombatState::MovingToIdle | CombatState::Dying => {
                self.target = None;
            }
            CombatState::MovingToAttack | CombatState::Attacking => {}
        }
        self.animations.select(state.animation());
    }
}
