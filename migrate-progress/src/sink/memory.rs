use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::ProgressResult;
use crate::sink::base::MessageSink;

#[derive(Debug)]
struct Inner {
    messages: Vec<String>,
}

/// In-memory [`MessageSink`] that captures every message it receives.
///
/// Mainly useful in tests, where the captured messages can be inspected via
/// [`MemoryMessageSink::messages`].
#[derive(Debug, Clone)]
pub struct MemoryMessageSink {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryMessageSink {
    pub fn new() -> Self {
        let inner = Inner {
            messages: Vec::new(),
        };

        Self {
            inner: Arc::new(Mutex::new(inner)),
        }
    }

    /// Returns a copy of all messages received so far, in delivery order.
    pub async fn messages(&self) -> Vec<String> {
        let inner = self.inner.lock().await;

        inner.messages.clone()
    }
}

impl Default for MemoryMessageSink {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageSink for MemoryMessageSink {
    async fn display(&self, message: String) -> ProgressResult<()> {
        let mut inner = self.inner.lock().await;
        inner.messages.push(message);

        Ok(())
    }
}
