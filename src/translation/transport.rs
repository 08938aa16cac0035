//! Thin glue between the backends and `reqwest`.

use reqwest::{Client, Request, StatusCode, Url};
use std::time::Duration;
use tracing::debug;

use crate::error::{Result, TranslationError};

/// Parses a backend base URL such as `https://www.googleapis.com`.
pub(crate) fn parse_endpoint(endpoint: &str) -> Result<Url> {
    let invalid = |reason: String| TranslationError::InvalidEndpoint {
        url: endpoint.to_string(),
        reason,
    };

    let url = Url::parse(endpoint).map_err(|e| invalid(e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("not a base URL".to_string()));
    }

    Ok(url)
}

/// Appends `path` to the base URL's own path, dropping any query on the base.
pub(crate) fn endpoint_url(base: &Url, path: &str) -> Url {
    let mut url = base.clone();
    let joined = format!("{}{}", base.path().trim_end_matches('/'), path);
    url.set_path(&joined);
    url.set_query(None);
    url
}

pub(crate) fn build_client(timeout: Option<Duration>) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// Sends one request and returns the status and body text, whatever the status.
pub(crate) async fn execute(
    client: &Client,
    request: Request,
    backend: &'static str,
    operation: &'static str,
) -> Result<(StatusCode, String)> {
    debug!(
        backend,
        operation,
        method = %request.method(),
        path = request.url().path(),
        "sending request"
    );

    let response = client.execute(request).await?;
    let status = response.status();
    let body = response.text().await?;

    debug!(backend, operation, %status, bytes = body.len(), "received response");

    Ok((status, body))
}
