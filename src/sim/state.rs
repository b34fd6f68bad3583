//! Game state and core entity types
//!
//! `GameState` is only ever written by [`super::transition::apply`]; everyone
//! else reads it through accessors or a [`Snapshot`].

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::order::Order;
use super::score::ScoreBreakdown;
use crate::catalog::ItemKind;
use crate::consts::{PLAY_AREA_HEIGHT, PLAY_AREA_WIDTH};

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// Before the first game starts
    #[default]
    Idle,
    /// Clock running, player sorting
    Playing,
    /// Order fulfilled, waiting for the next level
    LevelComplete,
    /// Run ended (timeout or final level cleared)
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Idle => "idle",
            GamePhase::Playing => "playing",
            GamePhase::LevelComplete => "level_complete",
            GamePhase::GameOver => "game_over",
        }
    }
}

/// Unique item identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item-{}", self.0)
    }
}

/// Monotonic item id allocator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemIds {
    next: u32,
}

impl Default for ItemIds {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl ItemIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new item ID
    pub fn next_id(&mut self) -> ItemId {
        let id = ItemId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// A spawned grocery item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub position: Vec2,
    /// Level the item was spawned for
    pub level: u32,
}

impl Item {
    pub fn new(id: ItemId, kind: ItemKind, position: Vec2, level: u32) -> Self {
        Self {
            id,
            kind,
            position,
            level,
        }
    }

    /// Bounding radius from the item catalog
    pub fn radius(&self) -> f32 {
        self.kind.info().shape.bounding_radius()
    }
}

/// Size of the play area items spawn into
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayArea {
    pub width: f32,
    pub height: f32,
}

impl Default for PlayArea {
    fn default() -> Self {
        Self {
            width: PLAY_AREA_WIDTH,
            height: PLAY_AREA_HEIGHT,
        }
    }
}

impl PlayArea {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Positive and finite in both dimensions
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Complete game state
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GameState {
    pub(crate) phase: GamePhase,
    /// Current level (0 while idle)
    pub(crate) level: u32,
    /// Cumulative score for the run
    pub(crate) score: u64,
    /// Seconds left; `None` before the first game
    pub(crate) time_left: Option<u32>,
    pub(crate) order: Order,
    pub(crate) play_area: Vec<Item>,
    pub(crate) sorting_zone: Vec<Item>,
    /// Points awarded by the most recent successful check
    pub(crate) last_award: Option<ScoreBreakdown>,
}

impl GameState {
    /// Fresh idle state
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn time_left(&self) -> Option<u32> {
        self.time_left
    }

    pub fn order(&self) -> &Order {
        &self.order
    }

    pub fn play_area_items(&self) -> &[Item] {
        &self.play_area
    }

    pub fn sorting_zone_items(&self) -> &[Item] {
        &self.sorting_zone
    }

    pub fn last_award(&self) -> Option<&ScoreBreakdown> {
        self.last_award.as_ref()
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Look up an item still in the play area
    pub fn play_area_item(&self, id: ItemId) -> Option<&Item> {
        self.play_area.iter().find(|item| item.id == id)
    }

    /// True if the id is used in either location
    pub fn contains_item(&self, id: ItemId) -> bool {
        self.play_area
            .iter()
            .chain(self.sorting_zone.iter())
            .any(|item| item.id == id)
    }

    /// Read-only view for the presentation layer
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.phase,
            level: self.level,
            score: self.score,
            time_left: self.time_left,
            order: &self.order,
            play_area_items: &self.play_area,
            sorting_zone_items: &self.sorting_zone,
            last_award: self.last_award.as_ref(),
        }
    }
}

/// Outbound state snapshot consumed by the renderer
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub level: u32,
    pub score: u64,
    pub time_left: Option<u32>,
    pub order: &'a Order,
    pub play_area_items: &'a [Item],
    pub sorting_zone_items: &'a [Item],
    pub last_award: Option<&'a ScoreBreakdown>,
}
