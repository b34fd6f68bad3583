//! Level catalog
//!
//! Ordered table of level definitions, indexed by level number 1..N.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::items::ItemKind;
use crate::error::ConfigError;

/// Inclusive `{min, max}` range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRange {
    pub min: u32,
    pub max: u32,
}

impl CountRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Draw uniformly from the range (bounds are swapped if inverted)
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        let lo = self.min.min(self.max);
        let hi = self.min.max(self.max);
        rng.random_range(lo..=hi)
    }

    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Static per-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelDefinition {
    /// Ordinal level number (1-based)
    pub level: u32,
    /// Seconds on the clock when the level starts
    pub time_limit: u32,
    /// Types that may appear in the pool and the order
    pub item_types: Vec<ItemKind>,
    /// Pool size when no order drives generation
    pub item_count: CountRange,
    /// Number of distinct types in the order
    pub order_complexity: usize,
    /// Required quantity per order line
    pub order_quantity: CountRange,
}

impl LevelDefinition {
    /// Eligible types with duplicates removed, first occurrence wins
    pub fn distinct_item_types(&self) -> Vec<ItemKind> {
        let mut out = Vec::with_capacity(self.item_types.len());
        for &kind in &self.item_types {
            if !out.contains(&kind) {
                out.push(kind);
            }
        }
        out
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidLevel {
            level: self.level,
            reason: reason.to_string(),
        };
        if self.time_limit == 0 {
            return Err(invalid("time limit must be positive"));
        }
        if self.item_types.is_empty() {
            return Err(invalid("no eligible item types"));
        }
        if self.item_count.min > self.item_count.max {
            return Err(invalid("item count min exceeds max"));
        }
        if self.order_complexity == 0 {
            return Err(invalid("order complexity must be at least 1"));
        }
        if self.order_quantity.min == 0 {
            return Err(invalid("order quantity must be at least 1"));
        }
        if self.order_quantity.min > self.order_quantity.max {
            return Err(invalid("order quantity min exceeds max"));
        }
        Ok(())
    }
}

/// Fixed, ordered level table
///
/// Built through [`LevelCatalog::new`] or [`LevelCatalog::from_json`] so the
/// table is always validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LevelCatalog {
    levels: Vec<LevelDefinition>,
}

impl Default for LevelCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl LevelCatalog {
    /// The built-in five level progression
    pub fn standard() -> Self {
        use ItemKind::*;

        let levels = vec![
            LevelDefinition {
                level: 1,
                time_limit: 60,
                item_types: vec![Apple, Banana, Carrot],
                item_count: CountRange::new(8, 12),
                order_complexity: 3,
                order_quantity: CountRange::new(1, 2),
            },
            LevelDefinition {
                level: 2,
                time_limit: 75,
                item_types: vec![Apple, Banana, Carrot, Tomato, Orange],
                item_count: CountRange::new(12, 16),
                order_complexity: 4,
                order_quantity: CountRange::new(1, 3),
            },
            LevelDefinition {
                level: 3,
                time_limit: 90,
                item_types: vec![Apple, Banana, Carrot, Tomato, Orange, Broccoli, Eggs],
                item_count: CountRange::new(15, 20),
                order_complexity: 5,
                order_quantity: CountRange::new(2, 4),
            },
            LevelDefinition {
                level: 4,
                time_limit: 100,
                item_types: vec![
                    Apple, Banana, Carrot, Tomato, Orange, Broccoli, Eggs, Chicken, Fish,
                ],
                item_count: CountRange::new(20, 25),
                order_complexity: 6,
                order_quantity: CountRange::new(2, 5),
            },
            LevelDefinition {
                level: 5,
                time_limit: 120,
                item_types: ItemKind::ALL.to_vec(),
                item_count: CountRange::new(25, 30),
                order_complexity: 8,
                order_quantity: CountRange::new(3, 6),
            },
        ];

        Self { levels }
    }

    /// Build a catalog from definitions, validating numbering and ranges
    pub fn new(levels: Vec<LevelDefinition>) -> Result<Self, ConfigError> {
        if levels.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        for (index, def) in levels.iter().enumerate() {
            if def.level as usize != index + 1 {
                return Err(ConfigError::LevelNumbering {
                    index,
                    found: def.level,
                });
            }
            def.validate()?;
        }
        Ok(Self { levels })
    }

    /// Parse a JSON array of level definitions
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let levels: Vec<LevelDefinition> = serde_json::from_str(json)?;
        let catalog = Self::new(levels)?;
        log::info!("Loaded level catalog with {} levels", catalog.len());
        Ok(catalog)
    }

    /// Definition for a 1-based level number
    pub fn get(&self, level: u32) -> Option<&LevelDefinition> {
        let index = (level as usize).checked_sub(1)?;
        self.levels.get(index)
    }

    pub fn first(&self) -> Option<&LevelDefinition> {
        self.levels.first()
    }

    /// Number of levels
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// True if `level` is the final level of the run
    pub fn is_last(&self, level: u32) -> bool {
        level as usize >= self.levels.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelDefinition> {
        self.levels.iter()
    }
}

/// Milliseconds between level-based item spawns (`None` = no spawning)
pub fn spawn_interval_ms(level: u32) -> Option<u32> {
    const BASE_INTERVAL_MS: u32 = 10_000;

    match level {
        0 | 1 => None,
        2 => Some(BASE_INTERVAL_MS),
        3 => Some(BASE_INTERVAL_MS * 7 / 10),
        4 => Some(BASE_INTERVAL_MS / 2),
        _ => Some(BASE_INTERVAL_MS * 3 / 10),
    }
}
