use clap::{Parser, Subcommand};

use crate::config::ResolveOptions;
use crate::translation::{Backend, normalize_source, validate_language};

#[derive(Parser, Debug)]
#[command(name = "mtgate")]
#[command(about = "Translate text with Google Translate or Microsoft Translator")]
#[command(version)]
pub struct Args {
    /// File to translate, one message per line (reads from stdin if not provided)
    pub file: Option<String>,

    /// Target language code (e.g., es, ja, zh-TW)
    #[arg(short = 't', long = "to")]
    pub to: Option<String>,

    /// Source language code (omit or pass "auto" to let the backend detect it)
    #[arg(short = 'f', long = "from")]
    pub from: Option<String>,

    /// Prefix each translation with the detected source language
    #[arg(short = 'd', long)]
    pub show_detected: bool,

    #[command(flatten)]
    pub backend: BackendArgs,

    /// Log requests and responses to stderr
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Backend selection and credentials, shared by every subcommand.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct BackendArgs {
    /// Translation backend
    #[arg(short = 'b', long, value_enum, global = true)]
    pub backend: Option<Backend>,

    /// API key (overrides the config file and environment)
    #[arg(short = 'k', long, global = true)]
    pub key: Option<String>,

    /// Google quota user to attribute usage to
    #[arg(long, global = true)]
    pub quota_user: Option<String>,

    /// Referer header for referer-restricted Google keys
    #[arg(long, global = true)]
    pub referer: Option<String>,

    /// Azure region of the Microsoft Translator resource
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// Backend base URL
    #[arg(short = 'e', long, global = true)]
    pub endpoint: Option<String>,
}

impl BackendArgs {
    pub fn resolve_options(&self, from: Option<String>, to: Option<String>) -> ResolveOptions {
        ResolveOptions {
            backend: self.backend,
            from,
            to,
            key: self.key.clone(),
            quota_user: self.quota_user.clone(),
            referer: self.referer.clone(),
            region: self.region.clone(),
            endpoint: self.endpoint.clone(),
        }
    }
}

impl Args {
    /// Checks `--to` and `--from` before any config is loaded.
    ///
    /// An empty or `auto` source means auto-detect and is not a language code.
    pub fn validate_languages(&self) -> anyhow::Result<()> {
        if let Some(to) = &self.to {
            validate_language(to)?;
        }
        if let Some(from) = self.from.as_deref().and_then(normalize_source) {
            validate_language(from)?;
        }
        Ok(())
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Detect the language of a piece of text (Google only)
    Detect {
        /// Text to inspect
        text: String,
    },
    /// List language codes supported by the backend (Google only)
    Languages,
    /// Show or create the configuration file
    Configure {
        /// Show every setting and where each API key comes from
        #[arg(long, conflicts_with = "init")]
        show: bool,

        /// Write a commented config template if none exists
        #[arg(long)]
        init: bool,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_translate_flags() {
        let args = Args::try_parse_from([
            "mtgate", "-b", "bing", "-t", "es", "--region", "westeurope", "notes.txt",
        ])
        .unwrap();

        assert_eq!(args.file.as_deref(), Some("notes.txt"));
        assert_eq!(args.backend.backend, Some(Backend::Bing));
        let options = args.backend.resolve_options(args.from, args.to);
        assert_eq!(options.to.as_deref(), Some("es"));
        assert_eq!(options.region.as_deref(), Some("westeurope"));
        assert!(args.command.is_none());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::try_parse_from(["mtgate", "detect", "bonjour", "--key", "K", "-v"]).unwrap();

        assert!(args.verbose);
        assert_eq!(args.backend.key.as_deref(), Some("K"));
        assert!(matches!(args.command, Some(Command::Detect { ref text }) if text == "bonjour"));
    }

    #[test]
    fn test_auto_detect_source_skips_validation() {
        for from in ["", "auto", "AUTO", "  "] {
            let args = Args::try_parse_from(["mtgate", "--to", "en", "--from", from]).unwrap();
            assert!(args.validate_languages().is_ok(), "--from {from:?}");
        }
    }

    #[test]
    fn test_invalid_languages_rejected() {
        let args = Args::try_parse_from(["mtgate", "--to", "en", "--from", "e n"]).unwrap();
        assert!(args.validate_languages().is_err());

        let args = Args::try_parse_from(["mtgate", "--to", ""]).unwrap();
        let err = args.validate_languages().unwrap_err();
        assert!(err.to_string().contains("Invalid language code"));
    }

    #[test]
    fn test_unknown_backend_rejected() {
        assert!(Args::try_parse_from(["mtgate", "--backend", "yandex"]).is_err());
    }

    #[test]
    fn test_configure_show_and_init_conflict() {
        assert!(Args::try_parse_from(["mtgate", "configure", "--show", "--init"]).is_err());
    }
}
