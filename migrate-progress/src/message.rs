//! Progress message composition.
//!
//! A plain formatting function over explicit fields, with pluralization handled
//! inline rather than through a runtime template engine.

/// Counter snapshot covered by one progress message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressStats {
    /// Primary rows processed (imported + ignored + failed).
    pub processed: u64,
    pub imported: u64,
    pub failed: u64,
    pub ignored: u64,
}

/// Composes a human-readable progress message for a migration run.
///
/// `done` selects the final phrasing ("done with") over the intermediate one
/// ("continuing with").
pub fn format_progress(stats: ProgressStats, migration_name: &str, done: bool) -> String {
    let phase = if done { "done with" } else { "continuing with" };
    let items = if stats.processed == 1 {
        "1 item".to_string()
    } else {
        format!("{} items", stats.processed)
    };

    format!(
        "Processed {items} ({} successfully, {} failed, {} ignored) - {phase} '{migration_name}'",
        stats.imported, stats.failed, stats.ignored
    )
}

#[cfg(test)]
mod tests {
    use super::{ProgressStats, format_progress};

    #[test]
    fn singular_message() {
        let stats = ProgressStats {
            processed: 1,
            imported: 1,
            failed: 0,
            ignored: 0,
        };
        assert_eq!(
            format_progress(stats, "beer_nodes", true),
            "Processed 1 item (1 successfully, 0 failed, 0 ignored) - done with 'beer_nodes'"
        );
    }

    #[test]
    fn plural_message() {
        let stats = ProgressStats {
            processed: 3,
            imported: 2,
            failed: 0,
            ignored: 1,
        };
        assert_eq!(
            format_progress(stats, "beer_nodes", false),
            "Processed 3 items (2 successfully, 0 failed, 1 ignored) - continuing with 'beer_nodes'"
        );
    }

    #[test]
    fn zero_rows_is_plural() {
        let stats = ProgressStats::default();
        let message = format_progress(stats, "beer_nodes", true);
        assert!(message.contains("Processed 0 items"));
        assert!(message.contains("done with"));
    }
}
