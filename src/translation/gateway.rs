use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use super::bing::{BingCredentials, BingTranslator, DEFAULT_BING_ENDPOINT};
use super::google::{DEFAULT_GOOGLE_ENDPOINT, GoogleCredentials, GoogleTranslator};
use super::handle::{RequestHandle, spawn_request};
use super::transport::build_client;
use super::types::{Detection, TranslateRequest, Translation};
use crate::error::{Result, TranslationError};

/// The translation services this crate speaks to.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Google,
    Bing,
}

impl Backend {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Bing => "bing",
        }
    }

    pub const fn default_endpoint(self) -> &'static str {
        match self {
            Self::Google => DEFAULT_GOOGLE_ENDPOINT,
            Self::Bing => DEFAULT_BING_ENDPOINT,
        }
    }

    pub const fn supports(self, capability: Capability) -> bool {
        match (self, capability) {
            (Self::Google, _) | (Self::Bing, Capability::Translate) => true,
            (Self::Bing, Capability::DetectLanguage | Capability::SupportedLanguages) => false,
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Translate,
    DetectLanguage,
    SupportedLanguages,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    Google(GoogleCredentials),
    Bing(BingCredentials),
}

impl Credentials {
    pub const fn backend(&self) -> Backend {
        match self {
            Self::Google(_) => Backend::Google,
            Self::Bing(_) => Backend::Bing,
        }
    }
}

/// Single entry point over both backends.
///
/// Cloning is cheap: clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub enum Gateway {
    Google(GoogleTranslator),
    Bing(BingTranslator),
}

impl Gateway {
    pub fn google(credentials: GoogleCredentials) -> Result<Self> {
        GatewayBuilder::new(Credentials::Google(credentials)).build()
    }

    pub fn bing(credentials: BingCredentials) -> Result<Self> {
        GatewayBuilder::new(Credentials::Bing(credentials)).build()
    }

    pub const fn builder(credentials: Credentials) -> GatewayBuilder {
        GatewayBuilder::new(credentials)
    }

    pub const fn backend(&self) -> Backend {
        match self {
            Self::Google(_) => Backend::Google,
            Self::Bing(_) => Backend::Bing,
        }
    }

    pub const fn supports(&self, capability: Capability) -> bool {
        self.backend().supports(capability)
    }

    pub async fn translate(&self, request: &TranslateRequest) -> Result<Translation> {
        match self {
            Self::Google(google) => google.translate(request).await,
            Self::Bing(bing) => bing.translate(request).await,
        }
    }

    /// Detects the language of `text`; `None` if the backend cannot.
    pub async fn detect_language(&self, text: &str) -> Option<Result<Detection>> {
        match self {
            Self::Google(google) => Some(google.detect_language(text).await),
            Self::Bing(_) => None,
        }
    }

    /// Lists the backend's language codes; `None` if the backend cannot.
    pub async fn supported_languages(&self) -> Option<Result<Vec<String>>> {
        match self {
            Self::Google(google) => Some(google.supported_languages().await),
            Self::Bing(_) => None,
        }
    }

    pub fn spawn_translate<F>(&self, request: TranslateRequest, completion: F) -> RequestHandle
    where
        F: FnOnce(Result<Translation>) + Send + 'static,
    {
        let gateway = self.clone();
        spawn_request(
            async move { gateway.translate(&request).await },
            completion,
        )
    }

    /// Returns `None`, without calling `completion`, if the backend cannot detect languages.
    pub fn spawn_detect_language<F>(&self, text: String, completion: F) -> Option<RequestHandle>
    where
        F: FnOnce(Result<Detection>) + Send + 'static,
    {
        let Self::Google(google) = self else {
            return None;
        };
        let google = google.clone();
        Some(spawn_request(
            async move { google.detect_language(&text).await },
            completion,
        ))
    }

    /// Returns `None`, without calling `completion`, if the backend cannot list languages.
    pub fn spawn_supported_languages<F>(&self, completion: F) -> Option<RequestHandle>
    where
        F: FnOnce(Result<Vec<String>>) + Send + 'static,
    {
        let Self::Google(google) = self else {
            return None;
        };
        let google = google.clone();
        Some(spawn_request(
            async move { google.supported_languages().await },
            completion,
        ))
    }
}

/// Configures endpoint, timeout, or a shared `reqwest::Client` before building a [`Gateway`].
#[derive(Debug)]
pub struct GatewayBuilder {
    credentials: Credentials,
    endpoint: Option<String>,
    timeout: Option<Duration>,
    client: Option<Client>,
}

impl GatewayBuilder {
    pub const fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            endpoint: None,
            timeout: None,
            client: None,
        }
    }

    /// Overrides the backend base URL (scheme, host, and optional path prefix).
    #[must_use]
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Per-request timeout; ignored when a client is supplied.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn build(self) -> Result<Gateway> {
        let client = match self.client {
            Some(client) => client,
            None => build_client(self.timeout)?,
        };
        let backend = self.credentials.backend();
        let endpoint = self
            .endpoint
            .as_deref()
            .unwrap_or(backend.default_endpoint());

        match self.credentials {
            Credentials::Google(credentials) => Ok(Gateway::Google(
                GoogleTranslator::with_endpoint(client, credentials, endpoint)?,
            )),
            Credentials::Bing(credentials) => Ok(Gateway::Bing(BingTranslator::with_endpoint(
                client,
                credentials,
                endpoint,
            )?)),
        }
    }
}

impl TryFrom<Credentials> for Gateway {
    type Error = TranslationError;

    fn try_from(credentials: Credentials) -> Result<Self> {
        GatewayBuilder::new(credentials).build()
    }
}
