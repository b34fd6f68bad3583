//! Scoring
//!
//! A successful check earns `base + time bonus + accuracy bonus`:
//! - base: 100 per level number
//! - time bonus: 2 per second left on the clock
//! - accuracy bonus: whole-percent accuracy times the level number, where
//!   accuracy is `(required - extras) / required`, floored at 0
//!
//! A failed check earns nothing.

use serde::{Deserialize, Serialize};

use super::matcher::MatchResult;
use crate::catalog::LevelDefinition;
use crate::consts::{BASE_POINTS_PER_LEVEL, TIME_BONUS_PER_SECOND};

/// Itemized award for one check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub base: u64,
    pub time_bonus: u64,
    /// Accuracy as a whole percentage (0-100)
    pub accuracy_pct: u64,
    pub accuracy_bonus: u64,
    pub total: u64,
}

/// Compute the itemized award for a check
pub fn score_breakdown(time_left: u32, result: &MatchResult, level: &LevelDefinition) -> ScoreBreakdown {
    if !result.success {
        return ScoreBreakdown::default();
    }

    let level_no = u64::from(level.level);
    let base = BASE_POINTS_PER_LEVEL * level_no;
    let time_bonus = u64::from(time_left) * TIME_BONUS_PER_SECOND;

    let required = u64::from(result.updated_order.total_required());
    let extras = result.extra_items.len() as u64;
    // Integer division floors the percentage exactly
    let accuracy_pct = if required > 0 {
        required.saturating_sub(extras) * 100 / required
    } else {
        0
    };
    let accuracy_bonus = accuracy_pct * level_no;

    ScoreBreakdown {
        base,
        time_bonus,
        accuracy_pct,
        accuracy_bonus,
        total: base + time_bonus + accuracy_bonus,
    }
}

/// Points earned by a check
pub fn calculate_score(time_left: u32, result: &MatchResult, level: &LevelDefinition) -> u64 {
    score_breakdown(time_left, result, level).total
}
