//! Combat tuning constants - defaults for everything the config can override

// Motion
pub const DEFAULT_TRAVEL_SECONDS: f32 = 1.5; // idle anchor <-> attack anchor, each way

// Floating damage numbers
pub const POPUP_RISE_SPEED: f32 = 60.0; // pixels per second
pub const POPUP_VANISH_HEIGHT: f32 = 60.0; // pixels above the spawn point

// Default stats
pub const PLAYER_MAX_HEALTH: u32 = 100;
pub const PLAYER_ATTACK_POWER: u32 = 10;
pub const ENEMY_MAX_HEALTH: u32 = 10;
pub const ENEMY_ATTACK_POWER: u32 = 10;

// Layout
pub const PLAYER_IDLE_X: f32 = 100.0;
pub const ARENA_WIDTH: f32 = 1280.0;
pub const ARENA_HEIGHT: f32 = 720.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_vanishes_within_a_few_seconds() {
        let seconds = POPUP_VANISH_HEIGHT / POPUP_RISE_SPEED;
        assert!(seconds > 0.0 && seconds < 5.0);
    }

    #[test]
    fn test_default_stats_positive() {
        assert!(PLAYER_ATTACK_POWER > 0 && ENEMY_ATTACK_POWER > 0);
        assert!(PLAYER_MAX_HEALTH > ENEMY_MAX_HEALTH);
    }
}
