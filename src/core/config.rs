//! Battle configuration loaded from TOML
//!
//! Every section has a default, so a config file only needs to mention what
//! it changes. `validate` runs before anything is built from the config.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::battle::roster::FighterSpec;
use crate::combat::{ArenaLayout, MotionSettings};
use crate::core::error::{DuelError, Result};
use crate::sprites::{AnimationLibrary, AnimationSpec};

/// Default location of the battle config, relative to the crate root
pub const DEFAULT_CONFIG_PATH: &str = "data/battle.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// RNG seed for damage rolls; random when absent
    pub seed: Option<u64>,

    /// Screen area the anchors are laid out in
    pub arena: ArenaLayout,

    /// Travel time between anchors and floating damage number motion
    pub motion: MotionSettings,

    /// The player, shared across every encounter
    pub player: FighterSpec,

    /// Enemies in push order: the last entry is fought first
    pub enemies: Vec<FighterSpec>,

    /// One strip per named motion
    pub animations: Vec<AnimationSpec>,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            seed: None,
            arena: ArenaLayout::default(),
            motion: MotionSettings::default(),
            player: FighterSpec::default_player(),
            enemies: vec![FighterSpec::default_enemy("enemy1")],
            animations: AnimationSpec::stick_figure(),
        }
    }
}

impl BattleConfig {
    /// Read, parse and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml(&contents)?;
        tracing::debug!(
            path = %path.as_ref().display(),
            enemies = config.enemies.len(),
            "loaded battle config"
        );
        Ok(config)
    }

    /// Parse and validate config text
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: BattleConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Build the animation library described by this config
    pub fn animation_library(&self) -> Result<AnimationLibrary> {
        let library = AnimationLibrary::from_specs(&self.animations)?;
        library.ensure_complete()?;
        Ok(library)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.arena.width <= 0.0 || self.arena.height <= 0.0 {
            return Err(DuelError::InvalidConfig(format!(
                "arena must have a positive size, got {}x{}",
                self.arena.width, self.arena.height
            )));
        }

        if self.motion.travel_seconds <= 0.0 {
            return Err(DuelError::InvalidConfig(format!(
                "travel_seconds must be positive, got {}",
                self.motion.travel_seconds
            )));
        }

        if self.motion.popup.rise_speed <= 0.0 || self.motion.popup.vanish_height < 0.0 {
            return Err(DuelError::InvalidConfig(
                "popup rise_speed must be positive and vanish_height non-negative".into(),
            ));
        }

        for fighter in std::iter::once(&self.player).chain(self.enemies.iter()) {
            fighter.stats()?;
            if fighter.body.width <= 0.0 || fighter.body.height <= 0.0 {
                return Err(DuelError::InvalidConfig(format!(
                    "{} must have a positive body size",
                    fighter.name
                )));
            }
        }

        self.animation_library()?;
        Ok(())
    }
}
