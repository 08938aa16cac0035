//! Subcommand implementations.

use anyhow::Result;
use tokio::sync::oneshot;

use crate::cli::CliError;
use crate::config::{ConfigManager, ResolveOptions, ResolvedConfig, resolve_config};
use crate::error::TranslationError;
use crate::translation::RequestHandle;

/// Configure command handler.
pub mod configure;

/// Language detection command handler.
pub mod detect;

/// Supported-languages command handler.
pub mod languages;

/// Translation command handler.
pub mod translate;

/// Loads the config file (if any) and merges it with CLI overrides.
fn load_resolved_config(options: &ResolveOptions) -> Result<ResolvedConfig> {
    let file_config = ConfigManager::new()?.load_or_default()?;
    resolve_config(options, &file_config)
}

/// Waits for a spawned request to report back, cancelling it on Ctrl+C.
async fn wait_interruptible<T>(
    handle: RequestHandle,
    result: oneshot::Receiver<Result<T, TranslationError>>,
) -> Result<T> {
    tokio::select! {
        received = result => match received {
            Ok(outcome) => Ok(outcome?),
            Err(_) => anyhow::bail!("Request ended without a result"),
        },
        _ = tokio::signal::ctrl_c() => {
            handle.cancel();
            tracing::debug!("request cancelled by interrupt");
            Err(CliError::Interrupted.into())
        }
    }
}

/// Spawns a request through `spawn` and waits for its result.
///
/// `spawn` returns `None` when the backend lacks the operation.
async fn run_request<T, S>(spawn: S, unsupported: CliError) -> Result<T>
where
    T: Send + 'static,
    S: FnOnce(Box<dyn FnOnce(Result<T, TranslationError>) + Send>) -> Option<RequestHandle>,
{
    let (tx, rx) = oneshot::channel();
    let completion: Box<dyn FnOnce(Result<T, TranslationError>) + Send> = Box::new(move |result| {
        let _ = tx.send(result);
    });
    let handle = spawn(completion).ok_or(unsupported)?;
    wait_interruptible(handle, rx).await
}
