use thiserror::Error;

use crate::sprites::AnimationKind;

#[derive(Error, Debug)]
pub enum DuelError {
    #[error("Invalid animation {kind:?}: {reason}")]
    InvalidAnimation { kind: AnimationKind, reason: String },

    #[error("Animation {0:?} missing from library")]
    MissingAnimation(AnimationKind),

    #[error("Invalid combatant stats: {0}")]
    InvalidStats(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Order rejected: {0}")]
    OrderRejected(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DuelError>;
