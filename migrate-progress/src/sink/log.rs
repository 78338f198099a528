use tracing::info;

use crate::error::ProgressResult;
use crate::sink::base::MessageSink;

/// [`MessageSink`] that forwards progress messages to the tracing subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMessageSink;

impl LogMessageSink {
    pub fn new() -> Self {
        Self
    }
}

impl MessageSink for LogMessageSink {
    async fn display(&self, message: String) -> ProgressResult<()> {
        info!("{message}");

        Ok(())
    }
}
