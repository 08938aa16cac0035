//! Callback-style execution on top of the async operations.
//!
//! [`spawn_request`] runs one operation on the current tokio runtime and hands
//! its result to a completion closure. The closure runs at most once, and
//! never for a request that was cancelled first.

use std::future::Future;
use tokio::task::JoinHandle;

use crate::error::TranslationError;

/// How a spawned request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The completion callback ran with the operation's result.
    Completed,
    /// The request was cancelled before it finished; the callback did not run.
    Cancelled,
}

/// Handle to an in-flight request started by one of the `spawn_*` methods.
#[derive(Debug)]
pub struct RequestHandle {
    task: JoinHandle<()>,
}

impl RequestHandle {
    /// Cancels the request. Has no effect once the request has completed.
    pub fn cancel(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits for the request to end, either way.
    ///
    /// # Panics
    ///
    /// Re-raises a panic from the completion callback.
    pub async fn join(self) -> Outcome {
        match self.task.await {
            Ok(()) => Outcome::Completed,
            Err(e) if e.is_cancelled() => Outcome::Cancelled,
            Err(e) => std::panic::resume_unwind(e.into_panic()),
        }
    }
}

/// Spawns `operation` and passes its result to `completion`.
///
/// The callback is invoked synchronously right after the operation resolves,
/// with no await point in between, so an abort either lands before the
/// result exists or not at all.
///
/// Must be called from within a tokio runtime.
pub fn spawn_request<T, Fut, F>(operation: Fut, completion: F) -> RequestHandle
where
    T: Send + 'static,
    Fut: Future<Output = Result<T, TranslationError>> + Send + 'static,
    F: FnOnce(Result<T, TranslationError>) + Send + 'static,
{
    let task = tokio::spawn(async move {
        let result = operation.await;
        completion(result);
    });
    RequestHandle { task }
}
