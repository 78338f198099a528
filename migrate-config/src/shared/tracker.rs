use serde::{Deserialize, Serialize};

/// Progress reporting configuration for a migration run.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TrackerConfig {
    /// Identifying name of the migration run.
    ///
    /// Used in progress messages and as the key under which the last-imported
    /// timestamp is recorded. Must not be empty.
    pub migration_name: String,
    /// Number of processed rows between intermediate progress reports.
    ///
    /// A value of 0 disables intermediate feedback entirely, in which case only
    /// the final message emitted on migration completion is produced.
    #[serde(default)]
    pub feedback_interval: u64,
}

impl TrackerConfig {
    /// Creates a configuration for the migration with the given name and the
    /// default feedback cadence (disabled).
    pub fn new(migration_name: impl Into<String>) -> Self {
        Self {
            migration_name: migration_name.into(),
            feedback_interval: 0,
        }
    }

    /// Sets the feedback cadence, in processed rows.
    pub fn with_feedback_interval(mut self, feedback_interval: u64) -> Self {
        self.feedback_interval = feedback_interval;
        self
    }
}
