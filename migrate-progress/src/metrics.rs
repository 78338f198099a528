use std::sync::Once;

use metrics::{Unit, describe_counter};

static REGISTER_METRICS: Once = Once::new();

pub const MIGRATE_ROWS_SAVED_TOTAL: &str = "migrate_rows_saved_total";
pub const MIGRATE_ROWS_ROLLED_BACK_TOTAL: &str = "migrate_rows_rolled_back_total";
pub const MIGRATE_ROWS_PROCESSED_TOTAL: &str = "migrate_rows_processed_total";
pub const OUTCOME: &str = "outcome";

/// Register metrics emitted by the progress tracker. This is called when a
/// tracker is created. It is safe to call this method multiple times. It is
/// guaranteed to register the metrics only once.
pub(crate) fn register_metrics() {
    REGISTER_METRICS.call_once(|| {
        describe_counter!(
            MIGRATE_ROWS_SAVED_TOTAL,
            Unit::Count,
            "Total number of row save events, labelled by outcome"
        );

        describe_counter!(
            MIGRATE_ROWS_ROLLED_BACK_TOTAL,
            Unit::Count,
            "Total number of rows rolled back"
        );

        describe_counter!(
            MIGRATE_ROWS_PROCESSED_TOTAL,
            Unit::Count,
            "Total number of rows fully processed by the migration engine"
        );
    });
}
