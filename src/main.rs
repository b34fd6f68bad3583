//! Market Sort entry point
//!
//! The browser build is driven through `market_sort::web`. Natively this
//! runs a headless auto-player through every level and prints the final
//! snapshot as JSON.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use market_sort::Session;

    env_logger::init();
    log::info!("Market Sort (native) starting...");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or_else(clock_seed);

    let mut session = Session::with_seed(seed);
    session.start_game();
    autoplay(&mut session);

    match serde_json::to_string_pretty(&session.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("Failed to serialize snapshot: {err}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is market_sort::web::wasm_start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(1)
}

/// Sorts one needed item per simulated second until each level clears
#[cfg(not(target_arch = "wasm32"))]
fn autoplay(session: &mut market_sort::Session) {
    use market_sort::consts::TICK_INTERVAL_MS;
    use market_sort::sim::{GamePhase, MoveVerdict};

    loop {
        match session.phase() {
            GamePhase::Playing => {
                let next = session
                    .state()
                    .play_area_items()
                    .iter()
                    .find(|item| !session.quota_met(item.kind))
                    .map(|item| item.id);

                match next {
                    Some(id) => {
                        match session.select_item(id) {
                            Some(MoveVerdict::Accept) => {}
                            verdict => log::warn!("Move of {id} rejected: {verdict:?}"),
                        }
                        session.tick();
                        if let Some(spawned) = session.advance_spawner(TICK_INTERVAL_MS) {
                            log::info!("Spawner dropped {spawned}");
                        }
                    }
                    None => {
                        if let Some(result) = session.check_order() {
                            log::info!(
                                "Checked level {}: success={}, score={}",
                                session.state().level(),
                                result.success,
                                session.state().score()
                            );
                        }
                        // Still short: burn time so the clock can end the run
                        if session.phase() == GamePhase::Playing {
                            session.tick();
                        }
                    }
                }
            }
            GamePhase::LevelComplete => session.next_level(),
            GamePhase::Idle | GamePhase::GameOver => break,
        }
    }
}
