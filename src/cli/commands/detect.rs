use anyhow::Result;

use super::{load_resolved_config, run_request};
use crate::cli::CliError;
use crate::config::ResolveOptions;
use crate::translation::Detection;
use crate::ui::{Spinner, Style};

pub async fn run_detect(text: String, resolve: &ResolveOptions, quiet: bool) -> Result<()> {
    let config = load_resolved_config(resolve)?;
    let gateway = config.gateway()?;

    let spinner = Spinner::new("Detecting...", quiet);
    let detection = run_request(
        |completion| gateway.spawn_detect_language(text, completion),
        CliError::Unsupported {
            backend: gateway.backend(),
            operation: "Language detection",
        },
    )
    .await;
    spinner.stop();

    println!("{}", format_detection(&detection?));
    Ok(())
}

fn format_detection(detection: &Detection) -> String {
    format!(
        "{} {}",
        Style::code(&detection.language),
        Style::secondary(format!("(confidence {:.2})", detection.confidence))
    )
}
