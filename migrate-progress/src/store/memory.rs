use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::ProgressResult;
use crate::store::base::LastImportedStore;

#[derive(Debug)]
struct Inner {
    last_imported: HashMap<String, i64>,
}

/// In-memory [`LastImportedStore`] keyed by migration name.
#[derive(Debug, Clone)]
pub struct MemoryLastImportedStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryLastImportedStore {
    pub fn new() -> Self {
        let inner = Inner {
            last_imported: HashMap::new(),
        };

        Self {
            inner: Arc::new(Mutex::new(inner)),
        }
    }

    /// Returns the recorded timestamp for `migration_name`, if any.
    ///
    /// Inherent rather than part of [`LastImportedStore`], which stays
    /// write-only; the read path here exists for the embedding system and for
    /// tests.
    pub async fn last_imported(&self, migration_name: &str) -> Option<i64> {
        let inner = self.inner.lock().await;

        inner.last_imported.get(migration_name).copied()
    }

    /// Returns a copy of every recorded entry.
    pub async fn all(&self) -> HashMap<String, i64> {
        let inner = self.inner.lock().await;

        inner.last_imported.clone()
    }
}

impl Default for MemoryLastImportedStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LastImportedStore for MemoryLastImportedStore {
    async fn set_last_imported(
        &self,
        migration_name: &str,
        imported_at_ms: i64,
    ) -> ProgressResult<()> {
        let mut inner = self.inner.lock().await;
        inner
            .last_imported
            .insert(migration_name.to_string(), imported_at_ms);

        Ok(())
    }
}
