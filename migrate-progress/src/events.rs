//! Lifecycle events consumed by the progress tracker.
//!
//! The migration engine emits one [`MigrationEvent`] per notable step of a run:
//! a save or delete event for every row outcome, a processed event once all
//! per-row events for that row have fired, and a single completion event at the
//! end of the run. Callers must deliver the save/delete events of a row before
//! that row's processed event, and all row events before the completion event.

/// Classification assigned to a processed row by the migration engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowOutcome {
    /// The row was transformed and written to the destination.
    Imported,
    /// The row was deliberately skipped.
    Ignored,
    /// The row could not be imported.
    Failed,
    /// A stub created as a side effect that still needs a primary import.
    ///
    /// Excluded from the processed total, since it does not represent a primary
    /// row outcome.
    NeedsUpdate,
}

impl RowOutcome {
    /// Returns the label used for this outcome in metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            RowOutcome::Imported => "imported",
            RowOutcome::Ignored => "ignored",
            RowOutcome::Failed => "failed",
            RowOutcome::NeedsUpdate => "needs_update",
        }
    }
}

/// Events that can occur during a migration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationEvent {
    /// A row's outcome was recorded in the engine's ID map.
    RowSaved { outcome: RowOutcome },
    /// A previously imported row was rolled back.
    RowDeleted,
    /// All per-row events for one row have been delivered.
    RowProcessed,
    /// The migration run finished.
    MigrationCompleted,
}
