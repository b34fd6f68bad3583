//! Deterministic game engine
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Randomness only through an injected `Rng`, and only during generation
//! - State changes only through [`transition::apply`]
//! - No rendering, physics, audio or platform dependencies

pub mod generate;
pub mod matcher;
pub mod order;
pub mod score;
pub mod state;
pub mod transition;

pub use generate::{
    LevelSetup, generate_item_pool, generate_level, generate_order, generate_random_item,
    random_position,
};
pub use matcher::{MatchResult, MoveVerdict, check_order, collected_count, is_quota_met, move_verdict};
pub use order::{LineStatus, Order, OrderLine};
pub use score::{ScoreBreakdown, calculate_score, score_breakdown};
pub use state::{GamePhase, GameState, Item, ItemId, ItemIds, PlayArea, Snapshot};
pub use transition::{Action, apply};
