//! Combatant state machine
//!
//! A strike is one lap around Idling -> MovingToAttack -> Attacking ->
//! MovingToIdle -> Idling. Running out of health pre-empts any state.

use serde::{Deserialize, Serialize};

use crate::sprites::AnimationKind;

/// Combat state - every combatant is always in exactly one state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CombatState {
    /// Walking from the idle anchor toward the attack anchor
    MovingToAttack,
    /// Playing the attack animation at the attack anchor
    Attacking,
    /// Walking backwards to the idle anchor
    MovingToIdle,
    /// Waiting at the idle anchor
    #[default]
    Idling,
    /// Out of health; stays here until health is restored
    Dying,
}

impl CombatState {
    /// The animation shown while in this state
    pub fn animation(&self) -> AnimationKind {
        match self {
            CombatState::MovingToAttack => AnimationKind::Walk,
            CombatState::Attacking => AnimationKind::Attack,
            CombatState::MovingToIdle => AnimationKind::WalkBackwards,
            CombatState::Idling => AnimationKind::Idle,
            CombatState::Dying => AnimationKind::Die,
        }
    }

    /// Is the combatant travelling between anchors?
    pub fn is_moving(&self) -> bool {
        matches!(self, CombatState::MovingToAttack | CombatState::MovingToIdle)
    }

    /// Can this state accept an attack order?
    pub fn can_attack(&self) -> bool {
        matches!(self, CombatState::Idling)
    }
}

/// Events that trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateTrigger {
    AttackOrdered,
    ReachedAttackAnchor,
    AttackFinished,
    ReachedIdleAnchor,
    HealthDepleted,
    HealthRestored,
}

/// State transition rules
pub struct StateTransitions;

impl StateTransitions {
    pub fn new() -> Self {
        Self
    }

    /// Apply a trigger to get the next state
    pub fn apply(&self, current: CombatState, trigger: StateTrigger) -> CombatState {
        use CombatState::*;
        use StateTrigger::*;

        match (current, trigger) {
            // Health overrides everything
            (_, HealthDepleted) => Dying,
            (Dying, HealthRestored) => Idling,

            // The strike cycle
            (Idling, AttackOrdered) => MovingToAttack,
            (MovingToAttack, ReachedAttackAnchor) => Attacking,
            (Attacking, AttackFinished) => MovingToIdle,
            (MovingToIdle, ReachedIdleAnchor) => Idling,

            // No change for invalid transitions
            _ => current,
        }
    }
}

impl Default for StateTransitions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strike_cycle() {
        let transitions = StateTransitions::new();

        let state = transitions.apply(CombatState::Idling, StateTrigger::AttackOrdered);
        assert_eq!(state, CombatState::MovingToAttack);

        let state = transitions.apply(state, StateTrigger::ReachedAttackAnchor);
        assert_eq!(state, CombatState::Attacking);

        let state = transitions.apply(state, StateTrigger::AttackFinished);
        assert_eq!(state, CombatState::MovingToIdle);

        let state = transitions.apply(state, StateTrigger::ReachedIdleAnchor);
        assert_eq!(state, CombatState::Idling);
    }

    #[test]
    fn test_depletion_overrides_every_state() {
        let transitions = StateTransitions::new();

        for state in [
            CombatState::Idling,
            CombatState::MovingToAttack,
            CombatState::Attacking,
            CombatState::MovingToIdle,
            CombatState::Dying,
        ] {
            assert_eq!(
                transitions.apply(state, StateTrigger::HealthDepleted),
                CombatState::Dying
            );
        }
    }

    #[test]
    fn test_dying_is_terminal_until_restored() {
        let transitions = StateTransitions::new();

        for trigger in [
            StateTrigger::AttackOrdered,
            StateTrigger::ReachedAttackAnchor,
            StateTrigger::AttackFinished,
            StateTrigger::ReachedIdleAnchor,
        ] {
            assert_eq!(transitions.apply(CombatState::Dying, trigger), CombatState::Dying);
        }

        let state = transitions.apply(CombatState::Dying, StateTrigger::HealthRestored);
        assert_eq!(state, CombatState::Idling);
    }

    #[test]
    fn test_out_of_order_triggers_ignored() {
        let transitions = StateTransitions::new();

        // Attack orders mid-strike do nothing
        let state = transitions.apply(CombatState::Attacking, StateTrigger::AttackOrdered);
        assert_eq!(state, CombatState::Attacking);

        // Restoring health on a living combatant does nothing
        let state = transitions.apply(CombatState::MovingToIdle, StateTrigger::HealthRestored);
        assert_eq!(state, CombatState::MovingToIdle);
    }

    #[test]
    fn test_state_animations() {
        assert_eq!(CombatState::Idling.animation(), AnimationKind::Idle);
        assert_eq!(CombatState::Attacking.animation(), AnimationKind::Attack);
        assert_eq!(CombatState::Dying.animation(), AnimationKind::Die);
        assert!(CombatState::MovingToIdle.is_moving());
        assert!(!CombatState::Attacking.can_attack());
    }
}
