use std::future::Future;

use crate::error::ProgressResult;

/// Receiving end for progress messages emitted during a migration run.
///
/// Messages are fire-and-forget from the tracker's point of view; an
/// implementation that can fail surfaces the failure through the returned
/// result and the tracker propagates it unchanged.
pub trait MessageSink {
    fn display(&self, message: String) -> impl Future<Output = ProgressResult<()>> + Send;
}
