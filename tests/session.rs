// Integration tests (native) for the `market-sort` crate.
// These drive the public API the way a front end would: build a session,
// feed it discrete actions, and read JSON snapshots back.

use market_sort::sim::{GamePhase, MoveVerdict};
use market_sort::{LevelCatalog, Session, Settings};

#[test]
fn snapshot_json_reflects_progress() {
    let mut session = Session::with_seed(4242);
    session.start_game();

    let id = session
        .state()
        .play_area_items()
        .iter()
        .find(|item| !session.quota_met(item.kind))
        .map(|item| item.id)
        .unwrap();
    assert_eq!(session.select_item(id), Some(MoveVerdict::Accept));
    session.tick();

    let json = serde_json::to_value(session.snapshot()).unwrap();
    assert_eq!(json["phase"], "playing");
    assert_eq!(json["level"], 1);
    assert_eq!(json["timeLeft"], 59);
    assert_eq!(json["sortingZoneItems"].as_array().unwrap().len(), 1);
    assert_eq!(json["sortingZoneItems"][0]["id"], id.0);
    assert!(json["order"].as_array().unwrap().len() == 3);
}

#[test]
fn custom_catalog_and_settings_from_json() {
    let settings = Settings::from_json(r#"{"seed": 11, "spawnItems": false}"#).unwrap();
    let catalog = LevelCatalog::from_json(
        r#"[
            {"level": 1, "timeLimit": 5, "itemTypes": ["milk", "eggs"],
             "itemCount": {"min": 3, "max": 4}, "orderComplexity": 5,
             "orderQuantity": {"min": 2, "max": 2}}
        ]"#,
    )
    .unwrap();

    let mut session = Session::new(settings, catalog);
    session.start_game();
    // Complexity is clamped to the two eligible types
    assert_eq!(session.state().order().len(), 2);
    assert_eq!(session.state().time_left(), Some(5));
    // 2 lines x 2 required x 2 + (3 + level 1) decoys
    assert_eq!(session.state().play_area_items().len(), 12);

    let ids: Vec<_> = session
        .state()
        .play_area_items()
        .iter()
        .map(|item| item.id)
        .collect();
    for id in ids {
        let _ = session.select_item(id);
    }
    let result = session.check_order().unwrap();
    assert!(result.success);
    // Single-level catalog: clearing it ends the run
    assert_eq!(session.phase(), GamePhase::GameOver);
    // 100 base + 5*2 time + 100 accuracy
    assert_eq!(session.state().score(), 210);
}

#[test]
fn restart_after_game_over() {
    let mut session = Session::with_seed(3);
    session.start_game();
    for _ in 0..=60 {
        session.tick();
    }
    assert_eq!(session.phase(), GamePhase::GameOver);

    session.restart_game();
    assert_eq!(session.phase(), GamePhase::Playing);
    assert_eq!(session.state().level(), 1);
    assert_eq!(session.state().score(), 0);
    assert_eq!(session.state().time_left(), Some(60));
}
