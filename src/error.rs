//! Configuration load errors
//!
//! The engine itself never fails; only JSON supplied by the embedder can.

/// Errors raised while loading [`crate::Settings`] or a [`crate::LevelCatalog`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The JSON text could not be parsed.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A level catalog must contain at least one level.
    #[error("level catalog is empty")]
    EmptyCatalog,

    /// Levels must be numbered 1..N in table order.
    #[error("level at index {index} is numbered {found}, expected {}", .index + 1)]
    LevelNumbering { index: usize, found: u32 },

    /// A level definition has an unusable value.
    #[error("level {level}: {reason}")]
    InvalidLevel { level: u32, reason: String },

    /// The play area must have a positive, finite size.
    #[error("invalid play area {width}x{height}")]
    InvalidPlayArea { width: f32, height: f32 },

    /// The countdown period must be non-zero.
    #[error("tick interval must be at least 1 ms")]
    InvalidTickInterval,
}
