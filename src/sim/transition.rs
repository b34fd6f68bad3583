//! State machine
//!
//! `apply` is the only writer of [`GameState`]. It is a pure function of the
//! current state, the action and the (immutable) level catalog. Actions that
//! make no sense in the current phase return the state unchanged.

use super::generate::LevelSetup;
use super::matcher::{MatchResult, MoveVerdict, move_verdict};
use super::score::score_breakdown;
use super::state::{GamePhase, GameState, Item, ItemId};
use crate::catalog::{LevelCatalog, LevelDefinition};

/// Discrete inputs to the state machine
#[derive(Debug, Clone)]
pub enum Action {
    /// Begin a run at level 1 from any phase
    StartGame(LevelSetup),
    /// One second elapsed on the clock
    TickTimer,
    /// Move an item from the play area into the sorting zone
    MoveItemToSorting(Item),
    /// Apply a match result computed by [`super::check_order`]
    CheckOrder(MatchResult),
    /// Advance from a completed level
    NextLevel(LevelSetup),
    /// Full reset to level 1 from any phase
    RestartGame(LevelSetup),
    /// Reinstall the current level with a fresh order and pool
    StartLevel(LevelSetup),
    /// Drop an item from the play area
    RemoveItem(ItemId),
    /// Add a spawner-generated item to the play area
    SpawnItem(Item),
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::StartGame(_) => "START_GAME",
            Action::TickTimer => "TICK_TIMER",
            Action::MoveItemToSorting(_) => "MOVE_ITEM_TO_SORTING",
            Action::CheckOrder(_) => "CHECK_ORDER",
            Action::NextLevel(_) => "NEXT_LEVEL",
            Action::RestartGame(_) => "RESTART_GAME",
            Action::StartLevel(_) => "START_LEVEL",
            Action::RemoveItem(_) => "REMOVE_ITEM",
            Action::SpawnItem(_) => "SPAWN_ITEM",
        }
    }
}

/// Apply one action and return the successor state
pub fn apply(state: GameState, action: Action, catalog: &LevelCatalog) -> GameState {
    let name = action.name();
    match action {
        Action::StartGame(setup) | Action::RestartGame(setup) => start_run(state, setup, catalog, name),
        Action::TickTimer => tick_timer(state),
        Action::MoveItemToSorting(item) => move_to_sorting(state, item),
        Action::CheckOrder(result) => apply_check(state, result, catalog),
        Action::NextLevel(setup) => next_level(state, setup, catalog),
        Action::StartLevel(setup) => restart_level(state, setup, catalog),
        Action::RemoveItem(id) => remove_item(state, id),
        Action::SpawnItem(item) => spawn_item(state, item),
    }
}

fn ignored(state: GameState, name: &str) -> GameState {
    log::debug!("Ignoring {} in phase {}", name, state.phase.as_str());
    state
}

/// Fresh playing state for a level; keeps only the running score
fn install_level(level: &LevelDefinition, score: u64, setup: LevelSetup) -> GameState {
    GameState {
        phase: GamePhase::Playing,
        level: level.level,
        score,
        time_left: Some(level.time_limit),
        order: setup.order,
        play_area: setup.items,
        sorting_zone: Vec::new(),
        last_award: None,
    }
}

fn start_run(state: GameState, setup: LevelSetup, catalog: &LevelCatalog, name: &str) -> GameState {
    let Some(first) = catalog.first() else {
        return ignored(state, name);
    };
    log::info!("{}: level {} ({}s)", name, first.level, first.time_limit);
    install_level(first, 0, setup)
}

fn tick_timer(mut state: GameState) -> GameState {
    if state.phase != GamePhase::Playing {
        return ignored(state, "TICK_TIMER");
    }

    match state.time_left {
        Some(t) if t > 0 => {
            state.time_left = Some(t - 1);
            log::trace!("Time left: {}s", t - 1);
        }
        _ => {
            // Timeout ends the whole run, not just the level
            log::info!("Time expired on level {}, game over", state.level);
            state.time_left = Some(0);
            state.phase = GamePhase::GameOver;
        }
    }
    state
}

fn move_to_sorting(mut state: GameState, item: Item) -> GameState {
    if state.phase != GamePhase::Playing {
        return ignored(state, "MOVE_ITEM_TO_SORTING");
    }

    // The play-area copy is authoritative; a stale payload can't double-count
    let Some(index) = state.play_area.iter().position(|i| i.id == item.id) else {
        log::debug!("Item {} is not in the play area", item.id);
        return state;
    };

    let kind = state.play_area[index].kind;
    match move_verdict(&state.order, &state.sorting_zone, kind) {
        MoveVerdict::Accept => {
            let moved = state.play_area.remove(index);
            log::debug!("Sorted {} ({})", moved.id, moved.kind.as_str());
            state.sorting_zone.push(moved);
        }
        verdict => {
            log::debug!(
                "Rejected {} ({}): {}",
                item.id,
                kind.as_str(),
                verdict.as_str()
            );
        }
    }
    state
}

fn apply_check(mut state: GameState, result: MatchResult, catalog: &LevelCatalog) -> GameState {
    if state.phase != GamePhase::Playing {
        return ignored(state, "CHECK_ORDER");
    }

    if !result.success {
        log::debug!(
            "Order check failed: {} lines missing",
            result.missing_items.len()
        );
        state.order = result.updated_order;
        return state;
    }

    let Some(level) = catalog.get(state.level) else {
        return ignored(state, "CHECK_ORDER");
    };

    let award = score_breakdown(state.time_left.unwrap_or(0), &result, level);
    state.score += award.total;
    state.last_award = Some(award);
    state.order = result.updated_order;

    if catalog.is_last(state.level) {
        log::info!(
            "Final level {} cleared (+{}), game over with {} points",
            state.level,
            award.total,
            state.score
        );
        state.phase = GamePhase::GameOver;
    } else {
        log::info!("Level {} complete (+{})", state.level, award.total);
        state.phase = GamePhase::LevelComplete;
    }
    state
}

fn next_level(state: GameState, setup: LevelSetup, catalog: &LevelCatalog) -> GameState {
    if state.phase != GamePhase::LevelComplete {
        return ignored(state, "NEXT_LEVEL");
    }
    let Some(level) = catalog.get(state.level + 1) else {
        return ignored(state, "NEXT_LEVEL");
    };
    log::info!("Starting level {} ({}s)", level.level, level.time_limit);
    install_level(level, state.score, setup)
}

fn restart_level(state: GameState, setup: LevelSetup, catalog: &LevelCatalog) -> GameState {
    if !matches!(state.phase, GamePhase::Playing | GamePhase::LevelComplete) {
        return ignored(state, "START_LEVEL");
    }
    let Some(level) = catalog.get(state.level) else {
        return ignored(state, "START_LEVEL");
    };
    log::info!("Restarting level {}", level.level);
    install_level(level, state.score, setup)
}

fn remove_item(mut state: GameState, id: ItemId) -> GameState {
    if state.phase != GamePhase::Playing {
        return ignored(state, "REMOVE_ITEM");
    }
    let before = state.play_area.len();
    state.play_area.retain(|item| item.id != id);
    if state.play_area.len() == before {
        log::debug!("Item {} is not in the play area", id);
    }
    state
}

fn spawn_item(mut state: GameState, item: Item) -> GameState {
    if state.phase != GamePhase::Playing {
        return ignored(state, "SPAWN_ITEM");
    }
    if state.contains_item(item.id) {
        log::debug!("Item {} already exists, spawn dropped", item.id);
        return state;
    }
    state.play_area.push(item);
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CountRange, ItemKind};
    use crate::sim::matcher::check_order;
    use crate::sim::order::{LineStatus, Order, OrderLine};
    use glam::Vec2;

    fn item(id: u32, kind: ItemKind) -> Item {
        Item::new(ItemId(id), kind, Vec2::new(100.0, 100.0), 1)
    }

    fn setup(lines: &[(ItemKind, u32)], items: Vec<Item>) -> LevelSetup {
        LevelSetup {
            order: lines.iter().map(|&(k, n)| OrderLine::new(k, n)).collect(),
            items,
        }
    }

    /// Two short levels so timeouts and the last level are quick to reach
    fn small_catalog() -> LevelCatalog {
        let level = |n: u32, time_limit: u32| LevelDefinition {
            level: n,
            time_limit,
            item_types: vec![ItemKind::Apple, ItemKind::Banana],
            item_count: CountRange::new(2, 4),
            order_complexity: 1,
            order_quantity: CountRange::new(1, 2),
        };
        LevelCatalog::new(vec![level(1, 2), level(2, 3)]).unwrap()
    }

    fn playing(catalog: &LevelCatalog) -> GameState {
        let items = vec![item(1, ItemKind::Apple), item(2, ItemKind::Apple), item(3, ItemKind::Banana)];
        apply(
            GameState::new(),
            Action::StartGame(setup(&[(ItemKind::Apple, 2)], items)),
            catalog,
        )
    }

    fn sort_all_apples(mut state: GameState, catalog: &LevelCatalog) -> GameState {
        for id in [1, 2] {
            state = apply(state, Action::MoveItemToSorting(item(id, ItemKind::Apple)), catalog);
        }
        state
    }

    fn check(state: GameState, catalog: &LevelCatalog) -> GameState {
        let result = check_order(&state.order, &state.sorting_zone);
        apply(state, Action::CheckOrder(result), catalog)
    }

    #[test]
    fn test_start_game_installs_level_one() {
        let catalog = LevelCatalog::standard();
        let state = playing(&catalog);
        assert_eq!(state.phase(), GamePhase::Playing);
        assert_eq!(state.level(), 1);
        assert_eq!(state.score(), 0);
        assert_eq!(state.time_left(), Some(60));
        assert_eq!(state.order().len(), 1);
        assert_eq!(state.play_area_items().len(), 3);
        assert!(state.sorting_zone_items().is_empty());
    }

    #[test]
    fn test_tick_counts_down_then_ends_run() {
        let catalog = small_catalog();
        let mut state = playing(&catalog);
        assert_eq!(state.time_left(), Some(2));

        state = apply(state, Action::TickTimer, &catalog);
        assert_eq!(state.time_left(), Some(1));
        state = apply(state, Action::TickTimer, &catalog);
        // Reaching zero does not end the run yet
        assert_eq!(state.time_left(), Some(0));
        assert_eq!(state.phase(), GamePhase::Playing);

        state = apply(state, Action::TickTimer, &catalog);
        assert_eq!(state.phase(), GamePhase::GameOver);
        assert_eq!(state.time_left(), Some(0));

        // Leaked ticks after game over are harmless
        let after = apply(state.clone(), Action::TickTimer, &catalog);
        assert_eq!(after, state);
    }

    #[test]
    fn test_tick_ignored_when_idle() {
        let catalog = LevelCatalog::standard();
        let state = apply(GameState::new(), Action::TickTimer, &catalog);
        assert_eq!(state, GameState::new());
    }

    #[test]
    fn test_move_unordered_type_is_rejected() {
        let catalog = LevelCatalog::standard();
        let state = playing(&catalog);
        let after = apply(state.clone(), Action::MoveItemToSorting(item(3, ItemKind::Banana)), &catalog);
        assert_eq!(after.play_area_items(), state.play_area_items());
        assert_eq!(after.sorting_zone_items(), state.sorting_zone_items());
    }

    #[test]
    fn test_move_stops_at_quota() {
        let catalog = LevelCatalog::standard();
        let items = vec![
            item(1, ItemKind::Apple),
            item(2, ItemKind::Apple),
            item(3, ItemKind::Apple),
        ];
        let mut state = apply(
            GameState::new(),
            Action::StartGame(setup(&[(ItemKind::Apple, 2)], items)),
            &catalog,
        );
        for id in [1, 2, 3] {
            state = apply(state, Action::MoveItemToSorting(item(id, ItemKind::Apple)), &catalog);
        }
        assert_eq!(state.sorting_zone_items().len(), 2);
        assert_eq!(state.play_area_items().len(), 1);
        assert_eq!(state.play_area_items()[0].id, ItemId(3));
    }

    #[test]
    fn test_move_is_atomic_and_not_repeatable() {
        let catalog = LevelCatalog::standard();
        let mut state = playing(&catalog);
        state = apply(state, Action::MoveItemToSorting(item(1, ItemKind::Apple)), &catalog);
        assert!(state.play_area_item(ItemId(1)).is_none());
        assert_eq!(state.sorting_zone_items().len(), 1);

        // Same item again: it is no longer in the play area
        let again = apply(state.clone(), Action::MoveItemToSorting(item(1, ItemKind::Apple)), &catalog);
        assert_eq!(again, state);
    }

    #[test]
    fn test_move_uses_play_area_copy() {
        let catalog = LevelCatalog::standard();
        let state = playing(&catalog);
        // Payload lies about the type of banana #3
        let after = apply(state.clone(), Action::MoveItemToSorting(item(3, ItemKind::Apple)), &catalog);
        assert_eq!(after, state);
    }

    #[test]
    fn test_failed_check_updates_order_and_keeps_playing() {
        let catalog = LevelCatalog::standard();
        let mut state = playing(&catalog);
        state = apply(state, Action::MoveItemToSorting(item(1, ItemKind::Apple)), &catalog);
        state = check(state, &catalog);

        assert_eq!(state.phase(), GamePhase::Playing);
        assert_eq!(state.score(), 0);
        let line = state.order().line(ItemKind::Apple).unwrap();
        assert_eq!(line.collected, 1);
        assert_eq!(line.status, LineStatus::Missing);
    }

    #[test]
    fn test_successful_check_completes_level() {
        let catalog = LevelCatalog::standard();
        let mut state = sort_all_apples(playing(&catalog), &catalog);
        state = check(state, &catalog);

        assert_eq!(state.phase(), GamePhase::LevelComplete);
        // 100 base + 60*2 time + 100 accuracy
        assert_eq!(state.score(), 320);
        assert_eq!(state.last_award().unwrap().total, 320);
        assert!(state.order().line(ItemKind::Apple).unwrap().is_sorted());
    }

    #[test]
    fn test_last_level_check_ends_game() {
        let catalog = small_catalog();
        let mut state = check(sort_all_apples(playing(&catalog), &catalog), &catalog);
        assert_eq!(state.phase(), GamePhase::LevelComplete);
        let level_one_score = state.score();

        let items = vec![item(10, ItemKind::Banana)];
        state = apply(state, Action::NextLevel(setup(&[(ItemKind::Banana, 1)], items)), &catalog);
        assert_eq!(state.phase(), GamePhase::Playing);
        assert_eq!(state.level(), 2);
        assert_eq!(state.time_left(), Some(3));
        assert_eq!(state.score(), level_one_score);
        assert!(state.sorting_zone_items().is_empty());
        assert!(state.last_award().is_none());

        state = apply(state, Action::MoveItemToSorting(item(10, ItemKind::Banana)), &catalog);
        state = check(state, &catalog);
        assert_eq!(state.phase(), GamePhase::GameOver);
        // 200 base + 3*2 time + 100*2 accuracy
        assert_eq!(state.score(), level_one_score + 406);
    }

    #[test]
    fn test_next_level_only_after_completion() {
        let catalog = LevelCatalog::standard();
        let state = playing(&catalog);
        let after = apply(state.clone(), Action::NextLevel(setup(&[], Vec::new())), &catalog);
        assert_eq!(after, state);
    }

    #[test]
    fn test_check_ignored_outside_playing() {
        let catalog = LevelCatalog::standard();
        let result = check_order(&Order::default(), &[]);
        let state = apply(GameState::new(), Action::CheckOrder(result), &catalog);
        assert_eq!(state, GameState::new());
    }

    #[test]
    fn test_restart_resets_everything() {
        let catalog = small_catalog();
        let mut state = check(sort_all_apples(playing(&catalog), &catalog), &catalog);
        assert!(state.score() > 0);

        state = apply(
            state,
            Action::RestartGame(setup(&[(ItemKind::Banana, 1)], vec![item(20, ItemKind::Banana)])),
            &catalog,
        );
        assert_eq!(state.phase(), GamePhase::Playing);
        assert_eq!(state.level(), 1);
        assert_eq!(state.score(), 0);
        assert_eq!(state.time_left(), Some(2));
        assert!(state.sorting_zone_items().is_empty());
        assert_eq!(state.play_area_items().len(), 1);
    }

    #[test]
    fn test_start_level_replays_current_level() {
        let catalog = small_catalog();
        let mut state = apply(playing(&catalog), Action::TickTimer, &catalog);
        state = apply(state, Action::MoveItemToSorting(item(1, ItemKind::Apple)), &catalog);

        state = apply(
            state,
            Action::StartLevel(setup(&[(ItemKind::Banana, 1)], vec![item(30, ItemKind::Banana)])),
            &catalog,
        );
        assert_eq!(state.level(), 1);
        assert_eq!(state.time_left(), Some(2));
        assert!(state.sorting_zone_items().is_empty());

        // Not from idle
        let idle = apply(GameState::new(), Action::StartLevel(setup(&[], Vec::new())), &catalog);
        assert_eq!(idle, GameState::new());
    }

    #[test]
    fn test_remove_and_spawn_items() {
        let catalog = LevelCatalog::standard();
        let mut state = playing(&catalog);

        state = apply(state, Action::RemoveItem(ItemId(3)), &catalog);
        assert!(state.play_area_item(ItemId(3)).is_none());
        assert_eq!(state.play_area_items().len(), 2);

        state = apply(state, Action::SpawnItem(item(40, ItemKind::Carrot)), &catalog);
        assert!(state.play_area_item(ItemId(40)).is_some());

        // Duplicate ids are dropped
        let dup = apply(state.clone(), Action::SpawnItem(item(1, ItemKind::Carrot)), &catalog);
        assert_eq!(dup, state);
    }
}
