//! Error types.

use thiserror::Error;

use crate::api::types::EntityId;

pub type Result<T> = std::result::Result<T, EngineError>;

/// Everything the engine can reject.
///
/// Runtime physics never fails: out-of-bounds positions are clamped and
/// missing entities are ignored. Errors only come from construction and
/// configuration.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A body was given a negative or non-finite size.
    #[error("invalid body dimensions {width}x{height}")]
    InvalidDimension { width: f32, height: f32 },

    /// An entity with this id is already registered in the world.
    #[error("entity {0} is already in the world")]
    DuplicateEntity(EntityId),

    /// A color string could not be parsed as `#RGB`, `#RRGGBB` or `#RRGGBBAA`.
    #[error("invalid color {0:?}")]
    InvalidColor(String),

    /// The JSON configuration was malformed.
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
}
