//! Static game tables
//!
//! Both tables are loaded once at startup and never mutated afterwards.

pub mod items;
pub mod levels;

pub use items::{ItemKind, ItemTypeInfo, Shape};
pub use levels::{CountRange, LevelCatalog, LevelDefinition, spawn_interval_ms};
