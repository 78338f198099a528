//! Per-run progress accounting for a migration.
//!
//! Contains the main [`ProgressTracker`] struct that consumes lifecycle events
//! from a migration engine, aggregates them into per-outcome counters, and
//! emits progress messages on a configurable cadence. The tracker is built in
//! isolation and attached to an event stream explicitly via
//! [`ProgressTracker::run`], so it is fully testable without a live engine.

use chrono::Utc;
use metrics::counter;
use tracing::{debug, info};

use crate::config::TrackerConfig;
use crate::dispatch::EventRx;
use crate::error::{ProgressError, ProgressResult};
use crate::events::{MigrationEvent, RowOutcome};
use crate::message::{ProgressStats, format_progress};
use crate::metrics::{
    MIGRATE_ROWS_PROCESSED_TOTAL, MIGRATE_ROWS_ROLLED_BACK_TOTAL, MIGRATE_ROWS_SAVED_TOTAL,
    OUTCOME, register_metrics,
};
use crate::sink::MessageSink;
use crate::store::LastImportedStore;

/// Per-outcome save counters for one migration run.
#[derive(Debug, Clone, Copy, Default)]
struct SaveCounters {
    imported: u64,
    ignored: u64,
    failed: u64,
    needs_update: u64,
}

impl SaveCounters {
    fn increment(&mut self, outcome: RowOutcome) {
        match outcome {
            RowOutcome::Imported => self.imported += 1,
            RowOutcome::Ignored => self.ignored += 1,
            RowOutcome::Failed => self.failed += 1,
            RowOutcome::NeedsUpdate => self.needs_update += 1,
        }
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Event-driven counter and reporter for one migration run.
///
/// A [`ProgressTracker`] owns its counters exclusively and assumes events are
/// delivered one at a time, in the order the engine produced them: save/delete
/// events for a row before that row's processed event, and all row events
/// before the completion event. When the producing side is concurrent, route
/// events through the channel from [`crate::dispatch`] and let a single
/// consumer drive the tracker.
///
/// Counters live for exactly one run; the tracker is discarded once the
/// completion event has been handled.
#[derive(Debug)]
pub struct ProgressTracker<S, T> {
    migration_name: String,
    feedback_interval: u64,
    save_counters: SaveCounters,
    delete_counter: u64,
    processed_since_feedback: u64,
    sink: S,
    store: T,
}

impl<S, T> ProgressTracker<S, T>
where
    S: MessageSink,
    T: LastImportedStore,
{
    /// Creates a tracker for the migration described by `config`.
    ///
    /// The message sink receives every progress message and the store receives
    /// the last-imported timestamp on completion. Construction does not
    /// subscribe to anything; attach the tracker to an event stream with
    /// [`ProgressTracker::run`] or feed it directly through
    /// [`ProgressTracker::handle_event`].
    pub fn new(config: TrackerConfig, sink: S, store: T) -> ProgressResult<Self> {
        if config.migration_name.is_empty() {
            return Err(ProgressError::InvalidConfig {
                reason: "migration name must not be empty",
            });
        }

        register_metrics();

        Ok(Self {
            migration_name: config.migration_name,
            feedback_interval: config.feedback_interval,
            save_counters: SaveCounters::default(),
            delete_counter: 0,
            processed_since_feedback: 0,
            sink,
            store,
        })
    }

    /// Returns the name of the migration this tracker reports on.
    pub fn migration_name(&self) -> &str {
        &self.migration_name
    }

    /// Counts a row save event with the given outcome.
    pub fn row_saved(&mut self, outcome: RowOutcome) {
        self.save_counters.increment(outcome);
        counter!(MIGRATE_ROWS_SAVED_TOTAL, OUTCOME => outcome.as_str()).increment(1);
    }

    /// Counts a rollback event.
    pub fn row_deleted(&mut self) {
        self.delete_counter += 1;
        counter!(MIGRATE_ROWS_ROLLED_BACK_TOTAL).increment(1);
    }

    /// Counts one fully processed row and emits intermediate feedback when the
    /// cadence is reached.
    ///
    /// With a feedback interval of N, every Nth call emits exactly one
    /// intermediate message covering the window since the previous emission
    /// (or run start) and then zeroes the save/delete counters together with
    /// the window counter. An interval of 0 never emits here.
    pub async fn row_processed(&mut self) -> ProgressResult<()> {
        self.processed_since_feedback += 1;
        counter!(MIGRATE_ROWS_PROCESSED_TOTAL).increment(1);

        if self.feedback_interval > 0
            && self.processed_since_feedback % self.feedback_interval == 0
        {
            self.progress_message(false).await?;
            self.reset_counters();
            self.processed_since_feedback = 0;
        }

        Ok(())
    }

    /// Reacts to the end of the migration run.
    ///
    /// Records the current epoch-millisecond timestamp against the migration
    /// name in the last-imported store, overwriting any previous entry, and
    /// emits the final progress message. Counters are deliberately left
    /// untouched so they remain inspectable until the tracker is dropped.
    pub async fn migration_completed(&mut self) -> ProgressResult<()> {
        let imported_at_ms = Utc::now().timestamp_millis();
        self.store
            .set_last_imported(&self.migration_name, imported_at_ms)
            .await?;

        info!(
            migration = %self.migration_name,
            imported_at_ms,
            "migration completed"
        );

        self.progress_message(true).await
    }

    /// Dispatches a single event to the matching operation.
    pub async fn handle_event(&mut self, event: MigrationEvent) -> ProgressResult<()> {
        debug!(migration = %self.migration_name, ?event, "handling migration event");

        match event {
            MigrationEvent::RowSaved { outcome } => self.row_saved(outcome),
            MigrationEvent::RowDeleted => self.row_deleted(),
            MigrationEvent::RowProcessed => self.row_processed().await?,
            MigrationEvent::MigrationCompleted => self.migration_completed().await?,
        }

        Ok(())
    }

    /// Consumes events from `events_rx` until every sender is dropped.
    ///
    /// This is the single-consumer loop that serializes delivery to the
    /// tracker's unsynchronized counters. The tracker is returned when the
    /// channel closes so its final counter state can still be inspected.
    pub async fn run(mut self, mut events_rx: EventRx) -> ProgressResult<Self> {
        info!(migration = %self.migration_name, "progress tracker attached");

        while let Some(event) = events_rx.recv().await {
            self.handle_event(event).await?;
        }

        info!(migration = %self.migration_name, "progress tracker detached");

        Ok(self)
    }

    /// Returns the number of rows imported since the last reset.
    pub fn imported_count(&self) -> u64 {
        self.save_counters.imported
    }

    /// Returns the number of rows ignored since the last reset.
    pub fn ignored_count(&self) -> u64 {
        self.save_counters.ignored
    }

    /// Returns the number of rows that failed since the last reset.
    pub fn failed_count(&self) -> u64 {
        self.save_counters.failed
    }

    /// Returns the total number of primary rows processed since the last
    /// reset. `NeedsUpdate` saves are not counted, since they are typically
    /// set on stubs created as side effects, not on the primary row being
    /// imported.
    pub fn processed_count(&self) -> u64 {
        self.save_counters.imported + self.save_counters.ignored + self.save_counters.failed
    }

    /// Returns the number of rows rolled back since the last reset.
    pub fn rollback_count(&self) -> u64 {
        self.delete_counter
    }

    /// Resets every save counter and the delete counter to 0.
    ///
    /// The feedback window counter is not part of the reset; it belongs to the
    /// emission cadence, not to the reported statistics.
    pub fn reset_counters(&mut self) {
        self.save_counters.reset();
        self.delete_counter = 0;
    }

    /// Composes the progress message for the current window and sends it to
    /// the sink.
    async fn progress_message(&self, done: bool) -> ProgressResult<()> {
        let stats = ProgressStats {
            processed: self.processed_count(),
            imported: self.imported_count(),
            failed: self.failed_count(),
            ignored: self.ignored_count(),
        };
        let message = format_progress(stats, &self.migration_name, done);

        self.sink.display(message).await
    }
}

#[cfg(test)]
mod tests {
    use super::ProgressTracker;
    use crate::config::TrackerConfig;
    use crate::error::ProgressError;
    use crate::sink::memory::MemoryMessageSink;
    use crate::store::memory::MemoryLastImportedStore;

    #[test]
    fn empty_migration_name_is_rejected() {
        let result = ProgressTracker::new(
            TrackerConfig::new(""),
            MemoryMessageSink::new(),
            MemoryLastImportedStore::new(),
        );

        assert!(matches!(
            result,
            Err(ProgressError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn new_tracker_starts_at_zero() {
        let tracker = ProgressTracker::new(
            TrackerConfig::new("beer_nodes"),
            MemoryMessageSink::new(),
            MemoryLastImportedStore::new(),
        )
        .unwrap();

        assert_eq!(tracker.migration_name(), "beer_nodes");
        assert_eq!(tracker.imported_count(), 0);
        assert_eq!(tracker.ignored_count(), 0);
        assert_eq!(tracker.failed_count(), 0);
        assert_eq!(tracker.processed_count(), 0);
        assert_eq!(tracker.rollback_count(), 0);
    }
}
