use std::future::Future;

use crate::error::ProgressResult;

/// Write-only store recording when each migration last completed successfully.
///
/// The tracker only ever writes through this trait; the read path belongs to
/// the embedding system (typically to decide whether a source has changed since
/// the last run). Writing an existing key overwrites the previous timestamp.
pub trait LastImportedStore {
    /// Records `imported_at_ms` (milliseconds since the Unix epoch) as the
    /// completion time of the migration named `migration_name`.
    fn set_last_imported(
        &self,
        migration_name: &str,
        imported_at_ms: i64,
    ) -> impl Future<Output = ProgressResult<()>> + Send;
}
