use anyhow::Result;
use std::io::{self, Write};

use super::{load_resolved_config, run_request};
use crate::cli::CliError;
use crate::config::ResolveOptions;
use crate::ui::Spinner;

/// Prints the backend's language codes, one per line.
pub async fn print_languages(resolve: &ResolveOptions, quiet: bool) -> Result<()> {
    let config = load_resolved_config(resolve)?;
    let gateway = config.gateway()?;

    let spinner = Spinner::new("Fetching languages...", quiet);
    let languages = run_request(
        |completion| gateway.spawn_supported_languages(completion),
        CliError::Unsupported {
            backend: gateway.backend(),
            operation: "Listing supported languages",
        },
    )
    .await;
    spinner.stop();

    let mut stdout = io::stdout().lock();
    for code in languages? {
        writeln!(stdout, "{code}")?;
    }
    stdout.flush()?;
    Ok(())
}
