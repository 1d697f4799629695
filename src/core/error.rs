use thiserror::Error;

use crate::core::types::GoodId;

/// Errors raised outside the tick loop: loading definitions, config, reports.
///
/// The tick systems themselves never return errors.
#[derive(Error, Debug)]
pub enum EconError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Unknown good: {0}")]
    UnknownGood(String),

    #[error("Unknown labor category: {0}")]
    UnknownLaborCategory(String),

    #[error("Unknown good category: {0}")]
    UnknownGoodCategory(String),

    #[error("Duplicate definition: {0}")]
    Duplicate(String),

    #[error("Recipe of {good} references missing input {input}")]
    DanglingRecipeInput { good: GoodId, input: GoodId },

    #[error("Invalid definition {name}: {reason}")]
    InvalidDefinition { name: String, reason: String },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, EconError>;
