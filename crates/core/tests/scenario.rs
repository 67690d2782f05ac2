use std::path::PathBuf;
use std::sync::Arc;

use scavenger_hunt_core::location::FixedPositionSource;
use scavenger_hunt_core::prelude::*;

fn scratch_db(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("hunt-scenario-{}-{}.sqlite3", name, std::process::id()));
    let _ = std::fs::remove_file(&path);
    path
}

fn river() -> ReportedPosition {
    ReportedPosition::new(46.0123456, -84.7894324, 5.0)
}

fn oak() -> ReportedPosition {
    ReportedPosition::new(46.0156789, -84.7856432, 5.0)
}

#[tokio::test]
async fn test_play_through_and_resume() {
    let db = scratch_db("play");
    let catalog = Catalog::samples();
    let hunt = catalog.get(&HuntIdentifier::new("sample1")).unwrap();
    let config = EngineConfig::default();

    let backend: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::open(&db).unwrap());
    let store = ProgressStore::new(backend.clone());
    let source = Arc::new(FixedPositionSource::at(river()));

    let mut session = HuntSession::open(hunt.clone(), store.clone(), source.clone(), &config)
        .await
        .unwrap();

    // Clue 1: 5 m device accuracy + 15 m hunt minimum, standing on the target.
    session.open_clue(0).unwrap();
    session.reveal_description().unwrap();
    session.reveal_image().unwrap();
    let outcome = session.check_location().await.unwrap();

    match &outcome {
        CheckOutcome::Solved {
            verdict,
            hunt_completed,
        } => {
            assert!(verdict.distance_meters < 1e-6);
            assert_eq!(verdict.threshold_meters, 20.0);
            assert!(!hunt_completed);
        }
        other => panic!("expected a solved clue, got {:?}", other),
    }
    assert_eq!(
        backend.get("hunt_progress_sample1").await.unwrap().as_deref(),
        Some(r#"{"0":true}"#)
    );
    assert!(!session.progress().is_completed(1));
    assert_eq!(session.view().progress_text(), "1/2 completed");

    // Clue 2 from the river is ~472 m off.
    session.close_clue().unwrap();
    session.open_clue(1).unwrap();
    session.reveal_description().unwrap();
    let outcome = session.check_location().await.unwrap();
    assert!(matches!(outcome, CheckOutcome::TooFar(_)));
    assert!(!outcome.hunt_completed());

    source.set_reply(Ok(oak()));
    let outcome = session.check_location().await.unwrap();
    assert!(outcome.hunt_completed());
    assert!(session.is_complete());
    assert_eq!(source.request_count(), 3);
    drop(session);

    // A new session on the same database picks the progress back up.
    let backend: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::open(&db).unwrap());
    let store = ProgressStore::new(backend);
    let mut session = HuntSession::open(hunt, store, source.clone(), &config)
        .await
        .unwrap();

    assert!(session.is_complete());
    assert_eq!(session.open_clue(0).unwrap(), &ClueState::Solved { verdict: None });
    assert!(session.check_location().await.is_err());
    assert_eq!(source.request_count(), 3);

    std::fs::remove_file(&db).unwrap();
}

#[tokio::test]
async fn test_completion_announced_once() {
    let store = ProgressStore::new(Arc::new(MemoryStore::new()));
    let hunt = Catalog::samples().get(&HuntIdentifier::new("sample2")).unwrap();
    let source = Arc::new(FixedPositionSource::at(ReportedPosition::new(
        46.0234567,
        -84.7765432,
        3.0,
    )));

    let mut session = HuntSession::open(hunt, store, source, &EngineConfig::default())
        .await
        .unwrap();

    session.open_clue(0).unwrap();
    session.reveal_description().unwrap();
    assert!(session.check_location().await.unwrap().hunt_completed());

    // Clearing and solving again does not announce a second time.
    session.clear_progress().await.unwrap();
    session.reveal_description().unwrap();
    let outcome = session.check_location().await.unwrap();
    assert!(outcome.is_solved());
    assert!(!outcome.hunt_completed());
}

#[tokio::test]
async fn test_location_failures_keep_the_clue_open() {
    let store = ProgressStore::new(Arc::new(MemoryStore::new()));
    let hunt = Catalog::samples().get(&HuntIdentifier::new("sample1")).unwrap();
    let source = Arc::new(FixedPositionSource::failing(LocationError::Timeout));

    let mut session = HuntSession::open(hunt, store.clone(), source.clone(), &EngineConfig::default())
        .await
        .unwrap();
    session.open_clue(0).unwrap();
    session.reveal_description().unwrap();

    let outcome = session.check_location().await.unwrap();
    assert_eq!(outcome.message(), "Location access failed. Location request timed out. Try again.");
    assert!(session.clue_state(0).can_check());

    source.set_reply(Err(LocationError::PositionUnavailable));
    let outcome = session.check_location().await.unwrap();
    assert_eq!(outcome.message(), "Location access failed. Location information is unavailable.");

    let summary = store.summary(session.hunt()).await.unwrap();
    assert_eq!(summary, ProgressSummary { completed: 0, total: 2 });
}

#[tokio::test]
async fn test_reset_all_keeps_settings() {
    let backend: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::open_in_memory().unwrap());
    let store = ProgressStore::new(backend.clone());
    let settings = UserSettings::new(backend.clone());

    settings.set_map_reveal_enabled(true).await.unwrap();
    settings.select_hunt(&HuntIdentifier::new("sample1")).await.unwrap();
    store.mark_complete(&HuntIdentifier::new("sample1"), 0).await.unwrap();
    store.mark_complete(&HuntIdentifier::new("retired"), 3).await.unwrap();

    assert_eq!(store.clear_all().await.unwrap(), 2);
    assert!(settings.map_reveal_enabled().await.unwrap());
    assert_eq!(
        settings.selected_hunt().await.unwrap(),
        Some(HuntIdentifier::new("sample1"))
    );
    assert!(!store.load(&HuntIdentifier::new("sample1")).await.unwrap().has_completed_clues());
}
