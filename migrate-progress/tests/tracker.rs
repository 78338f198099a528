use chrono::Utc;
use migrate_progress::config::TrackerConfig;
use migrate_progress::dispatch::create_event_channel;
use migrate_progress::events::{MigrationEvent, RowOutcome};
use migrate_progress::sink::memory::MemoryMessageSink;
use migrate_progress::store::memory::MemoryLastImportedStore;
use migrate_progress::tracker::ProgressTracker;
use migrate_telemetry::init_test_tracing;

fn create_tracker(
    migration_name: &str,
    feedback_interval: u64,
) -> (
    ProgressTracker<MemoryMessageSink, MemoryLastImportedStore>,
    MemoryMessageSink,
    MemoryLastImportedStore,
) {
    let sink = MemoryMessageSink::new();
    let store = MemoryLastImportedStore::new();
    let config = TrackerConfig::new(migration_name).with_feedback_interval(feedback_interval);
    let tracker = ProgressTracker::new(config, sink.clone(), store.clone())
        .expect("tracker config should be valid");

    (tracker, sink, store)
}

#[tokio::test]
async fn counters_reflect_events_independently_of_order() {
    init_test_tracing();

    let (mut tracker, _, _) = create_tracker("beer_nodes", 0);

    tracker.row_saved(RowOutcome::Failed);
    tracker.row_deleted();
    tracker.row_saved(RowOutcome::Imported);
    tracker.row_saved(RowOutcome::Ignored);
    tracker.row_saved(RowOutcome::Imported);
    tracker.row_deleted();
    tracker.row_saved(RowOutcome::Imported);

    assert_eq!(tracker.imported_count(), 3);
    assert_eq!(tracker.ignored_count(), 1);
    assert_eq!(tracker.failed_count(), 1);
    assert_eq!(tracker.processed_count(), 5);
    assert_eq!(tracker.rollback_count(), 2);
}

#[tokio::test]
async fn needs_update_is_excluded_from_processed_count() {
    init_test_tracing();

    let (mut tracker, _, _) = create_tracker("beer_nodes", 0);

    tracker.row_saved(RowOutcome::Imported);
    tracker.row_saved(RowOutcome::NeedsUpdate);
    tracker.row_saved(RowOutcome::NeedsUpdate);

    assert_eq!(tracker.imported_count(), 1);
    assert_eq!(tracker.processed_count(), 1);
}

#[tokio::test]
async fn feedback_fires_on_exact_cadence_and_resets_counters() {
    init_test_tracing();

    let (mut tracker, sink, _) = create_tracker("beer_nodes", 3);

    for _ in 0..2 {
        tracker.row_saved(RowOutcome::Imported);
        tracker.row_processed().await.unwrap();
    }
    assert!(sink.messages().await.is_empty());

    tracker.row_saved(RowOutcome::Imported);
    tracker.row_deleted();
    tracker.row_processed().await.unwrap();

    let messages = sink.messages().await;
    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages[0],
        "Processed 3 items (3 successfully, 0 failed, 0 ignored) - continuing with 'beer_nodes'"
    );

    // The cadence emission zeroes the reported window.
    assert_eq!(tracker.imported_count(), 0);
    assert_eq!(tracker.processed_count(), 0);
    assert_eq!(tracker.rollback_count(), 0);
}

#[tokio::test]
async fn feedback_cadence_repeats_every_interval() {
    init_test_tracing();

    let (mut tracker, sink, _) = create_tracker("beer_nodes", 2);

    for _ in 0..6 {
        tracker.row_saved(RowOutcome::Imported);
        tracker.row_processed().await.unwrap();
    }

    let messages = sink.messages().await;
    assert_eq!(messages.len(), 3);
    for message in &messages {
        assert!(message.contains("Processed 2 items"));
        assert!(message.contains("continuing with"));
    }
}

#[tokio::test]
async fn zero_interval_disables_intermediate_feedback() {
    init_test_tracing();

    let (mut tracker, sink, _) = create_tracker("beer_nodes", 0);

    for _ in 0..50 {
        tracker.row_saved(RowOutcome::Imported);
        tracker.row_processed().await.unwrap();
    }

    assert!(sink.messages().await.is_empty());
    assert_eq!(tracker.imported_count(), 50);
}

#[tokio::test]
async fn single_item_message_is_singular() {
    init_test_tracing();

    let (mut tracker, sink, _) = create_tracker("beer_nodes", 0);

    tracker.row_saved(RowOutcome::Imported);
    tracker.migration_completed().await.unwrap();

    let messages = sink.messages().await;
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("Processed 1 item ("));
}

#[tokio::test]
async fn multiple_items_message_is_plural() {
    init_test_tracing();

    let (mut tracker, sink, _) = create_tracker("beer_nodes", 0);

    tracker.row_saved(RowOutcome::Imported);
    tracker.row_saved(RowOutcome::Imported);
    tracker.migration_completed().await.unwrap();

    let messages = sink.messages().await;
    assert!(messages[0].contains("Processed 2 items"));
}

#[tokio::test]
async fn completion_message_uses_final_phrasing() {
    init_test_tracing();

    let (mut tracker, sink, _) = create_tracker("beer_nodes", 0);

    tracker.row_saved(RowOutcome::Imported);
    tracker.migration_completed().await.unwrap();

    let messages = sink.messages().await;
    assert!(messages[0].contains("done with 'beer_nodes'"));
    assert!(!messages[0].contains("continuing with"));
}

#[tokio::test]
async fn reset_counters_zeroes_every_accessor() {
    init_test_tracing();

    let (mut tracker, _, _) = create_tracker("beer_nodes", 0);

    tracker.row_saved(RowOutcome::Imported);
    tracker.row_saved(RowOutcome::Ignored);
    tracker.row_saved(RowOutcome::Failed);
    tracker.row_saved(RowOutcome::NeedsUpdate);
    tracker.row_deleted();

    tracker.reset_counters();

    assert_eq!(tracker.imported_count(), 0);
    assert_eq!(tracker.ignored_count(), 0);
    assert_eq!(tracker.failed_count(), 0);
    assert_eq!(tracker.processed_count(), 0);
    assert_eq!(tracker.rollback_count(), 0);
}

#[tokio::test]
async fn completion_records_last_imported_timestamp() {
    init_test_tracing();

    let (mut tracker, _, store) = create_tracker("beer_nodes", 0);

    let before_ms = Utc::now().timestamp_millis();
    tracker.migration_completed().await.unwrap();
    let after_ms = Utc::now().timestamp_millis();

    let imported_at_ms = store
        .last_imported("beer_nodes")
        .await
        .expect("completion should record a timestamp");
    assert!(imported_at_ms >= before_ms && imported_at_ms <= after_ms);
}

#[tokio::test]
async fn repeated_completion_overwrites_the_timestamp() {
    init_test_tracing();

    let (mut tracker, _, store) = create_tracker("beer_nodes", 0);

    tracker.migration_completed().await.unwrap();
    let first_ms = store.last_imported("beer_nodes").await.unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    tracker.migration_completed().await.unwrap();
    let second_ms = store.last_imported("beer_nodes").await.unwrap();

    assert!(second_ms > first_ms);
    assert_eq!(store.all().await.len(), 1);
}

#[tokio::test]
async fn channel_driven_run_tracks_a_full_migration() {
    init_test_tracing();

    let (tracker, sink, store) = create_tracker("beer_nodes", 0);
    let (events_tx, events_rx) = create_event_channel(16);

    let tracker_task = tokio::spawn(tracker.run(events_rx));

    for _ in 0..2 {
        events_tx
            .send(MigrationEvent::RowSaved {
                outcome: RowOutcome::Imported,
            })
            .await
            .unwrap();
        events_tx.send(MigrationEvent::RowProcessed).await.unwrap();
    }
    events_tx
        .send(MigrationEvent::RowSaved {
            outcome: RowOutcome::Failed,
        })
        .await
        .unwrap();
    events_tx.send(MigrationEvent::RowProcessed).await.unwrap();
    events_tx.send(MigrationEvent::RowDeleted).await.unwrap();
    events_tx
        .send(MigrationEvent::MigrationCompleted)
        .await
        .unwrap();

    // Dropping the only sender detaches the tracker and ends the run loop.
    drop(events_tx);

    let tracker = tracker_task.await.unwrap().unwrap();
    assert_eq!(tracker.imported_count(), 2);
    assert_eq!(tracker.failed_count(), 1);
    assert_eq!(tracker.processed_count(), 3);
    assert_eq!(tracker.rollback_count(), 1);

    let messages = sink.messages().await;
    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages[0],
        "Processed 3 items (2 successfully, 1 failed, 0 ignored) - done with 'beer_nodes'"
    );
    assert!(store.last_imported("beer_nodes").await.is_some());
}
