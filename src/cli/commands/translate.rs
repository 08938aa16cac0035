use anyhow::Result;
use std::io::{self, Write};

use super::{load_resolved_config, run_request};
use crate::cli::CliError;
use crate::config::ResolveOptions;
use crate::error::TranslationError;
use crate::input::InputReader;
use crate::translation::{TranslateRequest, Translation};
use crate::ui::{Spinner, Style};

pub struct TranslateOptions {
    pub file: Option<String>,
    pub resolve: ResolveOptions,
    pub show_detected: bool,
    pub quiet: bool,
}

/// Translates every non-blank input line and prints one result per line.
pub async fn run_translate(options: TranslateOptions) -> Result<()> {
    let config = load_resolved_config(&options.resolve)?;
    let target = config.require_target()?.to_string();

    let messages = InputReader::read_messages(options.file.as_deref())?;
    if messages.is_empty() {
        return Err(TranslationError::bad_request("input is empty").into());
    }

    let mut request = TranslateRequest::new(messages, target);
    if let Some(source) = &config.source_language {
        request = request.with_source(source.clone());
    }

    let gateway = config.gateway()?;
    tracing::debug!(
        backend = %gateway.backend(),
        count = request.messages.len(),
        "translating"
    );

    let spinner = Spinner::new("Translating...", options.quiet);
    let translation = run_request(
        |completion| Some(gateway.spawn_translate(request, completion)),
        CliError::Interrupted,
    )
    .await;
    spinner.stop();

    print_translation(&translation?, options.show_detected)
}

fn print_translation(translation: &Translation, show_detected: bool) -> Result<()> {
    let mut stdout = io::stdout().lock();
    for line in format_lines(translation, show_detected) {
        writeln!(stdout, "{line}")?;
    }
    stdout.flush()?;
    Ok(())
}

fn format_lines(translation: &Translation, show_detected: bool) -> Vec<String> {
    match (&translation.detected_sources, show_detected) {
        (Some(detected), true) => translation
            .translated
            .iter()
            .zip(detected)
            .map(|(text, code)| format!("{} {text}", Style::code(format!("[{code}]"))))
            .collect(),
        _ => translation.translated.clone(),
    }
}
