//! # mtgate - Machine Translation Gateway
//!
//! `mtgate` puts Google Translate (v2) and Microsoft Translator behind one
//! interface: batch translation, language detection, and the list of
//! supported languages, with every failure sorted into one of three kinds
//! ([`ErrorKind::NoToken`], [`ErrorKind::BadRequest`], [`ErrorKind::Other`]).
//!
//! ## Library
//!
//! ```no_run
//! use mtgate::translation::{Gateway, GoogleCredentials, TranslateRequest};
//!
//! # async fn demo() -> mtgate::Result<()> {
//! let gateway = Gateway::google(GoogleCredentials::new("api-key"))?;
//! let request = TranslateRequest::new(["Bonjour", "Merci"], "en");
//! let translation = gateway.translate(&request).await?;
//! assert_eq!(translation.translated.len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! Each operation also has a `spawn_*` form that reports through a completion
//! callback and returns a cancellable [`translation::RequestHandle`].
//!
//! ## CLI
//!
//! ```bash
//! # Translate each line of a file
//! mtgate --to en ./messages.txt
//!
//! # Use Microsoft Translator and show the detected source languages
//! cat messages.txt | mtgate -b bing --region westeurope -t ja -d
//!
//! # Google only
//! mtgate detect "Guten Morgen"
//! mtgate languages
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/mtgate/config.toml`:
//!
//! ```toml
//! [defaults]
//! backend = "google"
//! to = "en"
//!
//! [google]
//! api_key_env = "GOOGLE_TRANSLATE_API_KEY"
//!
//! [bing]
//! api_key_env = "BING_TRANSLATOR_KEY"
//! region = "westeurope"
//! ```

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management and backend settings.
pub mod config;

/// Error taxonomy shared by both backends.
pub mod error;

/// File system utilities.
pub mod fs;

/// Input reading from files and stdin.
pub mod input;

/// Tracing subscriber setup.
pub mod logging;

/// XDG-style path utilities for configuration.
pub mod paths;

/// Google Translate and Microsoft Translator clients behind one gateway.
pub mod translation;

/// Terminal UI components (spinner, colors).
pub mod ui;

pub use error::{ErrorKind, Result, TranslationError};
