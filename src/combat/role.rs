//! Player and enemy roles: where each stands and which way it faces

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::combat::constants::{ARENA_HEIGHT, ARENA_WIDTH, PLAYER_IDLE_X};
use crate::core::types::{BodySize, Facing, Side};

/// Screen area the battle is laid out in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaLayout {
    pub width: f32,
    pub height: f32,
}

impl Default for ArenaLayout {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

impl ArenaLayout {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Top edge that vertically centres a body of the given height
    fn centred_top(&self, body: BodySize) -> f32 {
        self.height / 2.0 - body.height / 2.0
    }
}

/// The two fixed points a combatant travels between
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchors {
    pub idle: Vec2,
    pub attack: Vec2,
}

/// Which part a combatant plays in battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Player,
    Enemy,
}

impl Role {
    pub fn side(&self) -> Side {
        match self {
            Role::Player => Side::Player,
            Role::Enemy => Side::Enemy,
        }
    }

    /// Player faces right, enemy faces left
    pub fn battle_facing(&self) -> Facing {
        match self {
            Role::Player => Facing::Right,
            Role::Enemy => Facing::Left,
        }
    }

    /// Player waits on the left and strikes near the right edge; the enemy mirrors it.
    pub fn anchors(&self, arena: &ArenaLayout, body: BodySize) -> Anchors {
        let y = arena.centred_top(body);
        match self {
            Role::Player => Anchors {
                idle: Vec2::new(PLAYER_IDLE_X, y),
                attack: Vec2::new(arena.width - body.width * 3.0, y),
            },
            Role::Enemy => Anchors {
                idle: Vec2::new(arena.width - body.width * 2.0, y),
                attack: Vec2::new(body.width * 2.0, y),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_anchors() {
        let arena = ArenaLayout::new(1280.0, 720.0);
        let anchors = Role::Player.anchors(&arena, BodySize::new(100.0, 200.0));
        assert_eq!(anchors.idle, Vec2::new(100.0, 260.0));
        assert_eq!(anchors.attack, Vec2::new(980.0, 260.0));
    }

    #[test]
    fn test_enemy_anchors_mirror() {
        let arena = ArenaLayout::new(1280.0, 720.0);
        let anchors = Role::Enemy.anchors(&arena, BodySize::new(100.0, 200.0));
        assert_eq!(anchors.idle, Vec2::new(1080.0, 260.0));
        assert_eq!(anchors.attack, Vec2::new(200.0, 260.0));
    }

    #[test]
    fn test_facing() {
        assert_eq!(Role::Player.battle_facing(), Facing::Right);
        assert_eq!(Role::Enemy.battle_facing(), Facing::Left);
        assert_eq!(Role::Enemy.side(), Side::Enemy);
    }
}
