//! Order matching
//!
//! Compares the sorting zone against an order. Everything here is a pure
//! function of its inputs, so the input layer can call it freely before
//! deciding what to dispatch.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::order::{LineStatus, Order, OrderLine};
use super::state::Item;
use crate::catalog::ItemKind;

/// Outcome of checking the sorting zone against an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// Every line has `collected >= required`
    pub success: bool,
    /// Full replacement for the checked order
    pub updated_order: Order,
    /// Lines still short, as they appear in `updated_order`
    pub missing_items: Vec<OrderLine>,
    /// Zone items of unordered types plus the overage of ordered types
    pub extra_items: Vec<Item>,
}

/// Whether an item may move into the sorting zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveVerdict {
    Accept,
    /// Type is not part of the order
    NotInOrder,
    /// Type already has its required count in the zone
    QuotaMet,
}

impl MoveVerdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoveVerdict::Accept => "accept",
            MoveVerdict::NotInOrder => "not_in_order",
            MoveVerdict::QuotaMet => "quota_met",
        }
    }

    pub fn is_accept(&self) -> bool {
        *self == MoveVerdict::Accept
    }
}

/// Number of zone items of a type
pub fn collected_count(zone: &[Item], kind: ItemKind) -> u32 {
    zone.iter().filter(|item| item.kind == kind).count() as u32
}

/// Check the sorting zone against an order
pub fn check_order(order: &Order, zone: &[Item]) -> MatchResult {
    let updated_order: Order = order
        .iter()
        .map(|line| {
            let collected = collected_count(zone, line.kind);
            let status = if collected >= line.required {
                LineStatus::Sorted
            } else {
                LineStatus::Missing
            };
            OrderLine {
                collected,
                status,
                ..line.clone()
            }
        })
        .collect();

    let success = updated_order.iter().all(OrderLine::is_sorted);

    let missing_items = updated_order
        .iter()
        .filter(|line| line.status == LineStatus::Missing)
        .cloned()
        .collect();

    // Items past a line's requirement count as extra, in zone order
    let mut seen: HashMap<ItemKind, u32> = HashMap::new();
    let mut extra_items = Vec::new();
    for item in zone {
        let count = seen.entry(item.kind).or_default();
        *count += 1;
        let is_extra = match updated_order.line(item.kind) {
            Some(line) => *count > line.required,
            None => true,
        };
        if is_extra {
            extra_items.push(item.clone());
        }
    }

    MatchResult {
        success,
        updated_order,
        missing_items,
        extra_items,
    }
}

/// Decide whether an item of `kind` may enter the zone
pub fn move_verdict(order: &Order, zone: &[Item], kind: ItemKind) -> MoveVerdict {
    let Some(line) = order.line(kind) else {
        return MoveVerdict::NotInOrder;
    };
    if collected_count(zone, kind) >= line.required {
        MoveVerdict::QuotaMet
    } else {
        MoveVerdict::Accept
    }
}

/// True if no more items of `kind` are wanted (unordered types included)
pub fn is_quota_met(order: &Order, zone: &[Item], kind: ItemKind) -> bool {
    !move_verdict(order, zone, kind).is_accept()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::ItemId;
    use glam::Vec2;

    fn items(kinds: &[ItemKind]) -> Vec<Item> {
        kinds
            .iter()
            .enumerate()
            .map(|(i, &kind)| Item::new(ItemId(i as u32 + 1), kind, Vec2::ZERO, 1))
            .collect()
    }

    fn order(lines: &[(ItemKind, u32)]) -> Order {
        lines
            .iter()
            .map(|&(kind, required)| OrderLine::new(kind, required))
            .collect()
    }

    #[test]
    fn test_exact_match_succeeds() {
        let order = order(&[(ItemKind::Apple, 2)]);
        let zone = items(&[ItemKind::Apple, ItemKind::Apple]);
        let result = check_order(&order, &zone);

        assert!(result.success);
        let line = result.updated_order.line(ItemKind::Apple).unwrap();
        assert_eq!(line.collected, 2);
        assert_eq!(line.status, LineStatus::Sorted);
        assert!(result.extra_items.is_empty());
        assert!(result.missing_items.is_empty());
    }

    #[test]
    fn test_short_line_is_missing() {
        let order = order(&[(ItemKind::Apple, 2)]);
        let zone = items(&[ItemKind::Apple]);
        let result = check_order(&order, &zone);

        assert!(!result.success);
        let line = result.updated_order.line(ItemKind::Apple).unwrap();
        assert_eq!(line.collected, 1);
        assert_eq!(line.status, LineStatus::Missing);
        assert_eq!(result.missing_items.len(), 1);
        assert_eq!(result.missing_items[0].kind, ItemKind::Apple);
    }

    #[test]
    fn test_extra_items_are_overage_and_unordered() {
        let order = order(&[(ItemKind::Apple, 1), (ItemKind::Fish, 2)]);
        let zone = items(&[
            ItemKind::Apple,
            ItemKind::Milk,
            ItemKind::Apple,
            ItemKind::Fish,
            ItemKind::Apple,
        ]);
        let result = check_order(&order, &zone);

        // Fish is short, so the order fails
        assert!(!result.success);
        // Two surplus apples plus the milk
        let extra_ids: Vec<u32> = result.extra_items.iter().map(|i| i.id.0).collect();
        assert_eq!(extra_ids, vec![2, 3, 5]);
    }

    #[test]
    fn test_check_is_idempotent() {
        let order = order(&[(ItemKind::Apple, 2), (ItemKind::Banana, 1)]);
        let zone = items(&[ItemKind::Apple, ItemKind::Banana, ItemKind::Banana]);
        let first = check_order(&order, &zone);
        let second = check_order(&order, &zone);
        assert_eq!(first, second);
        // Re-checking the updated order gives the same answer too
        assert_eq!(check_order(&first.updated_order, &zone), first);
    }

    #[test]
    fn test_empty_zone_marks_every_line_missing() {
        let order = order(&[(ItemKind::Eggs, 1), (ItemKind::Milk, 3)]);
        let result = check_order(&order, &[]);
        assert!(!result.success);
        assert_eq!(result.missing_items.len(), 2);
        assert!(
            result
                .updated_order
                .iter()
                .all(|l| l.collected == 0 && l.status == LineStatus::Missing)
        );
    }

    #[test]
    fn test_move_verdict() {
        let order = order(&[(ItemKind::Apple, 2)]);
        let mut zone = items(&[ItemKind::Apple]);

        assert_eq!(move_verdict(&order, &zone, ItemKind::Apple), MoveVerdict::Accept);
        assert_eq!(move_verdict(&order, &zone, ItemKind::Fish), MoveVerdict::NotInOrder);
        assert!(is_quota_met(&order, &zone, ItemKind::Fish));

        zone.extend(items(&[ItemKind::Apple]));
        assert_eq!(move_verdict(&order, &zone, ItemKind::Apple), MoveVerdict::QuotaMet);
        assert!(is_quota_met(&order, &zone, ItemKind::Apple));
    }
}
