//! Market Sort - a supermarket order-sorting game
//!
//! Core modules:
//! - `catalog`: Static item and level tables
//! - `sim`: Deterministic game engine (generation, matching, scoring, state machine)
//! - `session`: Single-writer driver that owns the RNG and dispatches actions
//! - `settings`: Embedder-supplied configuration
//!
//! Rendering, physics, audio and pointer handling are left to the front end.
//! It reads [`sim::Snapshot`]s and feeds [`sim::Action`]s back in.

pub mod catalog;
pub mod error;
pub mod session;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use catalog::{ItemKind, LevelCatalog, LevelDefinition};
pub use error::ConfigError;
pub use session::Session;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Default play area width (arbitrary spatial units)
    pub const PLAY_AREA_WIDTH: f32 = 800.0;
    /// Default play area height
    pub const PLAY_AREA_HEIGHT: f32 = 600.0;

    /// Period of the countdown timer while playing
    pub const TICK_INTERVAL_MS: u32 = 1000;

    /// Extra decoy items per generated pool are `EXTRA_ITEMS_BASE + level`
    pub const EXTRA_ITEMS_BASE: u32 = 3;
    /// Every order line gets this many matching items in the pool
    pub const POOL_MULTIPLIER: u32 = 2;

    /// Points per level number for a completed order
    pub const BASE_POINTS_PER_LEVEL: u64 = 100;
    /// Points per second left on the clock
    pub const TIME_BONUS_PER_SECOND: u64 = 2;
}
