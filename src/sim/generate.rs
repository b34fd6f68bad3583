//! Level generation
//!
//! The only place randomness enters the engine. Every function takes the
//! RNG explicitly so a seeded `Pcg32` reproduces a run exactly.

use glam::Vec2;
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use super::order::{Order, OrderLine};
use super::state::{Item, ItemIds, PlayArea};
use crate::catalog::{ItemKind, LevelDefinition};
use crate::consts::{EXTRA_ITEMS_BASE, POOL_MULTIPLIER};

/// Order and item pool for one level, ready to dispatch
#[derive(Debug, Clone, PartialEq)]
pub struct LevelSetup {
    pub order: Order,
    pub items: Vec<Item>,
}

/// Pick distinct types from the level and a quantity for each
///
/// Never returns more lines than the level has distinct eligible types.
pub fn generate_order<R: Rng + ?Sized>(level: &LevelDefinition, rng: &mut R) -> Order {
    let mut kinds = level.distinct_item_types();
    let take = level.order_complexity.min(kinds.len());
    kinds.shuffle(rng);
    kinds.truncate(take);

    kinds
        .into_iter()
        .map(|kind| OrderLine::new(kind, level.order_quantity.sample(rng)))
        .collect()
}

/// Random spawn point at least one item radius inside every edge
///
/// Uses two radii of padding when the area allows it; an area too small
/// for even one radius gets the centre on that axis. A non-finite axis
/// pins the item to the origin.
pub fn random_position<R: Rng + ?Sized>(area: &PlayArea, radius: f32, rng: &mut R) -> Vec2 {
    Vec2::new(
        random_axis(area.width, radius, rng),
        random_axis(area.height, radius, rng),
    )
}

fn random_axis<R: Rng + ?Sized>(extent: f32, radius: f32, rng: &mut R) -> f32 {
    if !extent.is_finite() {
        return 0.0;
    }
    let radius = radius.max(0.0);
    for padding in [radius * 2.0, radius] {
        let (lo, hi) = (padding, extent - padding);
        if lo <= hi && lo.is_finite() && hi.is_finite() {
            return rng.random_range(lo..=hi);
        }
    }
    (extent / 2.0).max(0.0)
}

fn spawn<R: Rng + ?Sized>(
    kind: ItemKind,
    level: u32,
    area: &PlayArea,
    rng: &mut R,
    ids: &mut ItemIds,
) -> Item {
    let radius = kind.info().shape.bounding_radius();
    let position = random_position(area, radius, rng);
    Item::new(ids.next_id(), kind, position, level)
}

/// Build the play-area pool for an order
///
/// Each order line gets `2 x required` items of its type, then
/// `3 + level` decoys of random eligible types are added. An empty order
/// falls back to a plain pool sized by the level's item-count range.
pub fn generate_item_pool<R: Rng + ?Sized>(
    level: &LevelDefinition,
    order: &Order,
    area: &PlayArea,
    rng: &mut R,
    ids: &mut ItemIds,
) -> Vec<Item> {
    let eligible = level.distinct_item_types();

    if order.is_empty() {
        let count = level.item_count.sample(rng);
        let mut items = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let Some(&kind) = eligible.choose(rng) else {
                break;
            };
            items.push(spawn(kind, level.level, area, rng, ids));
        }
        return items;
    }

    let extras = EXTRA_ITEMS_BASE + level.level;
    let mut items =
        Vec::with_capacity((order.total_required() * POOL_MULTIPLIER + extras) as usize);

    for line in order {
        for _ in 0..line.required * POOL_MULTIPLIER {
            items.push(spawn(line.kind, level.level, area, rng, ids));
        }
    }

    for _ in 0..extras {
        let Some(&kind) = eligible.choose(rng) else {
            break;
        };
        items.push(spawn(kind, level.level, area, rng, ids));
    }

    items
}

/// Generate the order, then the pool that satisfies it
pub fn generate_level<R: Rng + ?Sized>(
    level: &LevelDefinition,
    area: &PlayArea,
    rng: &mut R,
    ids: &mut ItemIds,
) -> LevelSetup {
    let order = generate_order(level, rng);
    let items = generate_item_pool(level, &order, area, rng, ids);
    log::debug!(
        "Generated level {}: {} order lines, {} items",
        level.level,
        order.len(),
        items.len()
    );
    LevelSetup { order, items }
}

/// One random item of an eligible type, for the level-based spawner
pub fn generate_random_item<R: Rng + ?Sized>(
    level: &LevelDefinition,
    area: &PlayArea,
    rng: &mut R,
    ids: &mut ItemIds,
) -> Option<Item> {
    let eligible = level.distinct_item_types();
    let &kind = eligible.choose(rng)?;
    Some(spawn(kind, level.level, area, rng, ids))
}
