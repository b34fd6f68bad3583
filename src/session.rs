//! Game session
//!
//! The single writer of the game state. A session owns the seeded RNG and
//! the item id allocator, generates each level's order and pool before
//! dispatching, and hands the input layer everything it needs to gate
//! player actions (phase, quota predicate, move verdicts).
//!
//! All mutation goes through `&mut self`, so actions are serialized by
//! construction. Embedders that share a session across threads wrap it in
//! a `Mutex`.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::catalog::{ItemKind, LevelCatalog, spawn_interval_ms};
use crate::settings::Settings;
use crate::sim::{
    Action, GamePhase, GameState, ItemId, ItemIds, LevelSetup, MatchResult, MoveVerdict, Snapshot,
    apply, check_order, generate_level, generate_random_item, is_quota_met, move_verdict,
};

/// Running game plus the inputs generation needs
#[derive(Debug, Clone)]
pub struct Session {
    settings: Settings,
    catalog: LevelCatalog,
    rng: Pcg32,
    ids: ItemIds,
    state: GameState,
    /// Milliseconds accumulated toward the next spawn
    spawn_elapsed_ms: u32,
}

impl Session {
    /// Invalid settings are logged and fall back to defaults field by field
    pub fn new(settings: Settings, catalog: LevelCatalog) -> Self {
        let settings = match settings.validate() {
            Ok(()) => settings,
            Err(err) => {
                log::warn!("{err}; using defaults for invalid settings");
                settings.sanitized()
            }
        };
        log::info!(
            "New session: seed {}, {} levels, play area {}x{}",
            settings.seed,
            catalog.len(),
            settings.play_area.width,
            settings.play_area.height
        );
        Self {
            rng: Pcg32::seed_from_u64(settings.seed),
            settings,
            catalog,
            ids: ItemIds::new(),
            state: GameState::new(),
            spawn_elapsed_ms: 0,
        }
    }

    /// Standard catalog and default settings with the given seed
    pub fn with_seed(seed: u64) -> Self {
        Self::new(Settings::with_seed(seed), LevelCatalog::standard())
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        self.state.snapshot()
    }

    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase()
    }

    /// Whether the countdown collaborator should be ticking
    pub fn timer_running(&self) -> bool {
        self.state.is_playing()
    }

    /// Apply an action to the owned state
    pub fn dispatch(&mut self, action: Action) {
        let state = std::mem::take(&mut self.state);
        let before = state.phase();
        self.state = apply(state, action, &self.catalog);
        if self.state.phase() != before {
            self.spawn_elapsed_ms = 0;
            log::debug!(
                "Phase {} -> {}",
                before.as_str(),
                self.state.phase().as_str()
            );
        }
    }

    fn generate(&mut self, level: u32) -> Option<LevelSetup> {
        let def = self.catalog.get(level)?;
        Some(generate_level(
            def,
            &self.settings.play_area,
            &mut self.rng,
            &mut self.ids,
        ))
    }

    /// Start a run at level 1
    pub fn start_game(&mut self) {
        if let Some(setup) = self.generate(1) {
            self.spawn_elapsed_ms = 0;
            self.dispatch(Action::StartGame(setup));
        }
    }

    /// Throw away the current run and start over at level 1
    pub fn restart_game(&mut self) {
        if let Some(setup) = self.generate(1) {
            self.spawn_elapsed_ms = 0;
            self.dispatch(Action::RestartGame(setup));
        }
    }

    /// Advance after a completed level; no-op in any other phase
    pub fn next_level(&mut self) {
        if self.state.phase() != GamePhase::LevelComplete {
            log::debug!("next_level ignored in phase {}", self.state.phase().as_str());
            return;
        }
        if let Some(setup) = self.generate(self.state.level() + 1) {
            self.spawn_elapsed_ms = 0;
            self.dispatch(Action::NextLevel(setup));
        }
    }

    /// Replay the current level with a fresh order and pool
    pub fn retry_level(&mut self) {
        if !matches!(
            self.state.phase(),
            GamePhase::Playing | GamePhase::LevelComplete
        ) {
            log::debug!("retry_level ignored in phase {}", self.state.phase().as_str());
            return;
        }
        if let Some(setup) = self.generate(self.state.level()) {
            self.spawn_elapsed_ms = 0;
            self.dispatch(Action::StartLevel(setup));
        }
    }

    /// One second of countdown
    pub fn tick(&mut self) {
        self.dispatch(Action::TickTimer);
    }

    /// True if no more items of `kind` are wanted in the sorting zone
    pub fn quota_met(&self, kind: ItemKind) -> bool {
        is_quota_met(
            self.state.order(),
            self.state.sorting_zone_items(),
            kind,
        )
    }

    /// Try to sort a play-area item
    ///
    /// Returns the verdict so the input layer can explain a rejection, or
    /// `None` when not playing or the id is not in the play area.
    pub fn select_item(&mut self, id: ItemId) -> Option<MoveVerdict> {
        if !self.state.is_playing() {
            return None;
        }
        let item = self.state.play_area_item(id)?.clone();
        let verdict = move_verdict(
            self.state.order(),
            self.state.sorting_zone_items(),
            item.kind,
        );
        if verdict.is_accept() {
            self.dispatch(Action::MoveItemToSorting(item));
        }
        Some(verdict)
    }

    /// Check the sorting zone against the order and apply the result
    pub fn check_order(&mut self) -> Option<MatchResult> {
        if !self.state.is_playing() {
            return None;
        }
        let result = check_order(self.state.order(), self.state.sorting_zone_items());
        self.dispatch(Action::CheckOrder(result.clone()));
        Some(result)
    }

    /// Drop an item the physics collaborator lost track of
    pub fn remove_item(&mut self, id: ItemId) {
        self.dispatch(Action::RemoveItem(id));
    }

    /// Feed elapsed wall time to the level-based spawner
    ///
    /// Spawns at most one item per call; a backlog longer than one interval
    /// is dropped rather than replayed. Returns the id of the spawned item.
    pub fn advance_spawner(&mut self, elapsed_ms: u32) -> Option<ItemId> {
        if !self.settings.spawn_items || !self.state.is_playing() {
            return None;
        }
        let level = self.state.level();
        let interval = spawn_interval_ms(level)?;

        self.spawn_elapsed_ms = self.spawn_elapsed_ms.saturating_add(elapsed_ms);
        if self.spawn_elapsed_ms < interval {
            return None;
        }
        self.spawn_elapsed_ms %= interval;

        let def = self.catalog.get(level)?;
        let item = generate_random_item(def, &self.settings.play_area, &mut self.rng, &mut self.ids)?;
        let id = item.id;
        log::debug!("Spawned {} ({})", id, item.kind.as_str());
        self.dispatch(Action::SpawnItem(item));
        Some(id)
    }
}
