//! Google Translate v2 (`/language/translate/v2`).
//!
//! All three operations are GETs authenticated by an API key in the query
//! string. Translate and detect travel as a form-encoded POST carrying
//! `X-HTTP-Method-Override: GET`. Browser keys are additionally checked
//! against the `Referer` header, so it is sent whenever one is configured.

use reqwest::header::REFERER;
use reqwest::{Client, Request, RequestBuilder, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use super::transport::{endpoint_url, execute, parse_endpoint};
use super::types::{Detection, TranslateRequest, Translation};
use crate::error::{Result, TranslationError};

pub const DEFAULT_GOOGLE_ENDPOINT: &str = "https://www.googleapis.com";

const TRANSLATE_PATH: &str = "/language/translate/v2";
const DETECT_PATH: &str = "/language/translate/v2/detect";
const LANGUAGES_PATH: &str = "/language/translate/v2/languages";

const METHOD_OVERRIDE_HEADER: &str = "X-HTTP-Method-Override";

/// `errors[].reason` values Google uses for key problems (often with HTTP 400).
const AUTH_REASONS: &[&str] = &[
    "keyInvalid",
    "keyExpired",
    "forbidden",
    "ipRefererBlocked",
    "accessNotConfigured",
    "unauthorized",
    "authError",
];

/// Quota reasons arrive as 403 but say nothing about the key itself.
const QUOTA_REASONS: &[&str] = &[
    "dailyLimitExceeded",
    "userRateLimitExceeded",
    "rateLimitExceeded",
    "quotaExceeded",
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoogleCredentials {
    pub key: String,
    /// Sent as `quotaUser` so Google can attribute usage to an end user.
    pub quota_user: Option<String>,
    /// Sent as the `Referer` header for referer-restricted browser keys.
    pub referer: Option<String>,
}

impl GoogleCredentials {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct GoogleTranslator {
    client: Client,
    endpoint: Url,
    credentials: GoogleCredentials,
}

impl GoogleTranslator {
    pub fn new(client: Client, credentials: GoogleCredentials) -> Result<Self> {
        Self::with_endpoint(client, credentials, DEFAULT_GOOGLE_ENDPOINT)
    }

    pub fn with_endpoint(
        client: Client,
        credentials: GoogleCredentials,
        endpoint: &str,
    ) -> Result<Self> {
        Ok(Self {
            client,
            endpoint: parse_endpoint(endpoint)?,
            credentials,
        })
    }

    pub const fn credentials(&self) -> &GoogleCredentials {
        &self.credentials
    }

    pub fn build_translate_request(&self, request: &TranslateRequest) -> Result<Request> {
        let key = self.api_key()?;
        request.validate()?;

        let mut params: Vec<(&str, &str)> = request
            .messages
            .iter()
            .map(|message| ("q", message.as_str()))
            .collect();
        params.push(("target", request.target.trim()));
        if let Some(source) = request.source_language() {
            params.push(("source", source));
        }
        // Plain text in, plain text out; the default `html` format entity-escapes results.
        params.push(("format", "text"));

        self.build_post(TRANSLATE_PATH, key, &params)
    }

    pub fn build_detect_request(&self, text: &str) -> Result<Request> {
        let key = self.api_key()?;
        if text.trim().is_empty() {
            return Err(TranslationError::bad_request("no text to detect"));
        }
        self.build_post(DETECT_PATH, key, &[("q", text)])
    }

    pub fn build_languages_request(&self) -> Result<Request> {
        let key = self.api_key()?;
        let builder = self.client.get(self.authorized_url(LANGUAGES_PATH, key));
        Ok(self.with_referer(builder).build()?)
    }

    pub async fn translate(&self, request: &TranslateRequest) -> Result<Translation> {
        let http_request = self.build_translate_request(request)?;
        let (status, body) = execute(&self.client, http_request, "google", "translate").await?;
        parse_translate_response(status, &body, request.messages.len())
            .inspect_err(|e| log_failure("translate", e))
    }

    pub async fn detect_language(&self, text: &str) -> Result<Detection> {
        let http_request = self.build_detect_request(text)?;
        let (status, body) = execute(&self.client, http_request, "google", "detect").await?;
        parse_detect_response(status, &body).inspect_err(|e| log_failure("detect", e))
    }

    pub async fn supported_languages(&self) -> Result<Vec<String>> {
        let http_request = self.build_languages_request()?;
        let (status, body) = execute(&self.client, http_request, "google", "languages").await?;
        parse_languages_response(status, &body).inspect_err(|e| log_failure("languages", e))
    }

    fn api_key(&self) -> Result<&str> {
        let key = self.credentials.key.trim();
        if key.is_empty() {
            return Err(TranslationError::no_token("Google API key is missing"));
        }
        Ok(key)
    }

    /// Endpoint URL carrying the key and quota user, which Google reads from the query string.
    fn authorized_url(&self, path: &str, key: &str) -> Url {
        let mut url = endpoint_url(&self.endpoint, path);
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("key", key);
            if let Some(quota_user) = non_empty(self.credentials.quota_user.as_deref()) {
                query.append_pair("quotaUser", quota_user);
            }
        }
        url
    }

    /// A GET with its parameters moved into a form body, so batch size is not bound by URL length.
    fn build_post(&self, path: &str, key: &str, params: &[(&str, &str)]) -> Result<Request> {
        let builder = self
            .client
            .post(self.authorized_url(path, key))
            .header(METHOD_OVERRIDE_HEADER, "GET")
            .form(params);
        Ok(self.with_referer(builder).build()?)
    }

    fn with_referer(&self, builder: RequestBuilder) -> RequestBuilder {
        match non_empty(self.credentials.referer.as_deref()) {
            Some(referer) => builder.header(REFERER, referer),
            None => builder,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn log_failure(operation: &'static str, error: &TranslationError) {
    warn!(backend = "google", operation, kind = ?error.kind(), "{error}");
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    error: Option<GoogleError>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: GoogleError,
}

#[derive(Debug, Deserialize)]
struct GoogleError {
    #[serde(default)]
    code: Option<u16>,
    #[serde(default)]
    message: String,
    #[serde(default)]
    errors: Vec<GoogleErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorDetail {
    #[serde(default)]
    reason: String,
}

#[derive(Debug, Deserialize)]
struct TranslationsData {
    translations: Vec<GoogleTranslation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleTranslation {
    translated_text: String,
    #[serde(default)]
    detected_source_language: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetectionsData {
    detections: Vec<Vec<GoogleDetection>>,
}

#[derive(Debug, Deserialize)]
struct GoogleDetection {
    language: String,
    #[serde(default)]
    confidence: f32,
}

#[derive(Debug, Deserialize)]
struct LanguagesData {
    languages: Vec<GoogleLanguage>,
}

#[derive(Debug, Deserialize)]
struct GoogleLanguage {
    language: String,
}

/// Parses a `/v2` translate response for a batch of `expected` messages.
pub fn parse_translate_response(
    status: StatusCode,
    body: &str,
    expected: usize,
) -> Result<Translation> {
    let data: TranslationsData = decode(status, body)?;
    Translation::from_items(
        data.translations
            .into_iter()
            .map(|t| (t.translated_text, t.detected_source_language)),
        expected,
    )
}

/// Parses a `/v2/detect` response; the first candidate is taken as the best one.
pub fn parse_detect_response(status: StatusCode, body: &str) -> Result<Detection> {
    let data: DetectionsData = decode(status, body)?;
    data.detections
        .into_iter()
        .next()
        .and_then(|candidates| candidates.into_iter().next())
        .map(|candidate| Detection {
            language: candidate.language,
            confidence: candidate.confidence,
        })
        .ok_or_else(|| TranslationError::malformed("response contains no detections"))
}

/// Parses a `/v2/languages` response, keeping the backend's order.
pub fn parse_languages_response(status: StatusCode, body: &str) -> Result<Vec<String>> {
    let data: LanguagesData = decode(status, body)?;
    Ok(data.languages.into_iter().map(|l| l.language).collect())
}

fn decode<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T> {
    if !status.is_success() {
        return Err(classify_failure(status, body));
    }

    let envelope: Envelope<T> = serde_json::from_str(body)?;
    match envelope {
        Envelope { data: Some(data), .. } => Ok(data),
        Envelope {
            error: Some(error), ..
        } => Err(classify_error(status, error)),
        Envelope { .. } => Err(TranslationError::malformed(
            "response has neither `data` nor `error`",
        )),
    }
}

fn classify_failure(status: StatusCode, body: &str) -> TranslationError {
    serde_json::from_str::<ErrorEnvelope>(body).map_or_else(
        |_| TranslationError::from_status(status, body.trim()),
        |envelope| classify_error(status, envelope.error),
    )
}

fn classify_error(status: StatusCode, error: GoogleError) -> TranslationError {
    // A 200 carrying an error object is judged by the code inside it.
    let status = if status.is_success() {
        error
            .code
            .and_then(|code| StatusCode::from_u16(code).ok())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    } else {
        status
    };

    let has_reason = |reasons: &[&str]| {
        error
            .errors
            .iter()
            .any(|detail| reasons.contains(&detail.reason.as_str()))
    };

    if has_reason(QUOTA_REASONS) {
        return TranslationError::Backend {
            status,
            message: error.message,
        };
    }

    let mentions_key = error.message.to_ascii_lowercase().contains("api key");
    if has_reason(AUTH_REASONS) || mentions_key {
        return TranslationError::NoToken {
            message: error.message,
            status: Some(status),
        };
    }

    TranslationError::from_status(status, error.message)
}
