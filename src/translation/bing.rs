//! Microsoft Translator (Bing) v3 bulk translation.
//!
//! One POST carries every message; the response array lines up with the
//! request body. Only translation is exposed for this backend.

use reqwest::{Client, Request, StatusCode, Url};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::language::bing_language_code;
use super::transport::{endpoint_url, execute, parse_endpoint};
use super::types::{TranslateRequest, Translation};
use crate::error::{Result, TranslationError};

pub const DEFAULT_BING_ENDPOINT: &str = "https://api.cognitive.microsofttranslator.com";

const TRANSLATE_PATH: &str = "/translate";
const API_VERSION: &str = "3.0";

const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
const SUBSCRIPTION_REGION_HEADER: &str = "Ocp-Apim-Subscription-Region";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BingCredentials {
    pub api_key: String,
    /// Azure region of the Translator resource; required by regional resources.
    pub region: Option<String>,
}

impl BingCredentials {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            region: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BingTranslator {
    client: Client,
    endpoint: Url,
    credentials: BingCredentials,
}

#[derive(Debug, Serialize)]
struct TextItem<'a> {
    #[serde(rename = "Text")]
    text: &'a str,
}

impl BingTranslator {
    pub fn new(client: Client, credentials: BingCredentials) -> Result<Self> {
        Self::with_endpoint(client, credentials, DEFAULT_BING_ENDPOINT)
    }

    pub fn with_endpoint(
        client: Client,
        credentials: BingCredentials,
        endpoint: &str,
    ) -> Result<Self> {
        Ok(Self {
            client,
            endpoint: parse_endpoint(endpoint)?,
            credentials,
        })
    }

    pub const fn credentials(&self) -> &BingCredentials {
        &self.credentials
    }

    pub fn build_translate_request(&self, request: &TranslateRequest) -> Result<Request> {
        let api_key = self.credentials.api_key.trim();
        if api_key.is_empty() {
            return Err(TranslationError::no_token(
                "Microsoft Translator subscription key is missing",
            ));
        }
        request.validate()?;

        let mut url = endpoint_url(&self.endpoint, TRANSLATE_PATH);
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("api-version", API_VERSION);
            query.append_pair("to", bing_language_code(request.target.trim()));
            if let Some(source) = request.source_language() {
                query.append_pair("from", bing_language_code(source));
            }
        }

        let body: Vec<TextItem<'_>> = request
            .messages
            .iter()
            .map(|message| TextItem { text: message })
            .collect();

        let mut builder = self
            .client
            .post(url)
            .header(SUBSCRIPTION_KEY_HEADER, api_key)
            .json(&body);
        if let Some(region) = self
            .credentials
            .region
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
        {
            builder = builder.header(SUBSCRIPTION_REGION_HEADER, region);
        }

        Ok(builder.build()?)
    }

    pub async fn translate(&self, request: &TranslateRequest) -> Result<Translation> {
        let http_request = self.build_translate_request(request)?;
        let (status, body) = execute(&self.client, http_request, "bing", "translate").await?;
        parse_translate_response(status, &body, request.messages.len()).inspect_err(|e| {
            warn!(backend = "bing", operation = "translate", kind = ?e.kind(), "{e}");
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslatedItem {
    #[serde(default)]
    detected_language: Option<DetectedLanguage>,
    #[serde(default)]
    translations: Vec<TranslatedText>,
}

#[derive(Debug, Deserialize)]
struct DetectedLanguage {
    language: String,
}

#[derive(Debug, Deserialize)]
struct TranslatedText {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: BingError,
}

#[derive(Debug, Deserialize)]
struct BingError {
    #[serde(default)]
    code: u32,
    #[serde(default)]
    message: String,
}

/// Parses a v3 `/translate` response for a batch of `expected` messages.
pub fn parse_translate_response(
    status: StatusCode,
    body: &str,
    expected: usize,
) -> Result<Translation> {
    if !status.is_success() {
        return Err(classify_failure(status, body));
    }

    let items: Vec<TranslatedItem> = serde_json::from_str(body)?;
    let pairs = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let text = item
                .translations
                .into_iter()
                .next()
                .ok_or_else(|| {
                    TranslationError::malformed(format!("item {index} has no translations"))
                })?
                .text;
            Ok((text, item.detected_language.map(|d| d.language)))
        })
        .collect::<Result<Vec<_>>>()?;

    Translation::from_items(pairs, expected)
}

fn classify_failure(status: StatusCode, body: &str) -> TranslationError {
    let Ok(ErrorEnvelope { error }) = serde_json::from_str::<ErrorEnvelope>(body) else {
        return TranslationError::from_status(status, body.trim());
    };

    // Error codes are the HTTP status followed by three digits, e.g. 401000.
    match error.code / 1000 {
        401 | 403 => TranslationError::NoToken {
            message: error.message,
            status: Some(status),
        },
        400 => TranslationError::BadRequest {
            message: error.message,
            status: Some(status),
        },
        _ => TranslationError::from_status(status, error.message),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn translator(credentials: BingCredentials) -> BingTranslator {
        BingTranslator::new(Client::new(), credentials).unwrap()
    }

    fn body_json(request: &Request) -> serde_json::Value {
        let bytes = request.body().and_then(|b| b.as_bytes()).unwrap();
        serde_json::from_slice(bytes).unwrap()
    }

    #[test]
    fn test_translate_request_is_single_bulk_post() {
        let bing = translator(BingCredentials::new("SECRET"));
        let request = TranslateRequest::new(["hello", "world"], "zh-TW").with_source("en");

        let http = bing.build_translate_request(&request).unwrap();

        assert_eq!(http.method(), reqwest::Method::POST);
        assert_eq!(http.url().path(), "/translate");
        let pairs: Vec<(String, String)> = http
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("api-version".to_string(), "3.0".to_string())));
        assert!(pairs.contains(&("to".to_string(), "zh-Hant".to_string())));
        assert!(pairs.contains(&("from".to_string(), "en".to_string())));
        assert_eq!(
            http.headers().get(SUBSCRIPTION_KEY_HEADER).unwrap(),
            "SECRET"
        );
        assert!(http.headers().get(SUBSCRIPTION_REGION_HEADER).is_none());
        assert_eq!(
            body_json(&http),
            serde_json::json!([{"Text": "hello"}, {"Text": "world"}])
        );
    }

    #[test]
    fn test_auto_detect_omits_from_and_region_is_sent() {
        let bing = translator(BingCredentials {
            api_key: "SECRET".to_string(),
            region: Some("westeurope".to_string()),
        });
        let request = TranslateRequest::new(["hello"], "es");

        let http = bing.build_translate_request(&request).unwrap();

        assert!(!http.url().query_pairs().any(|(k, _)| k == "from"));
        assert_eq!(
            http.headers().get(SUBSCRIPTION_REGION_HEADER).unwrap(),
            "westeurope"
        );
    }

    #[test]
    fn test_missing_key_is_no_token() {
        let bing = translator(BingCredentials::default());
        let err = bing
            .build_translate_request(&TranslateRequest::new(["x"], "es"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoToken);
    }

    #[test]
    fn test_missing_key_is_reported_before_empty_batch() {
        let bing = translator(BingCredentials::default());
        let err = bing
            .build_translate_request(&TranslateRequest::new(Vec::<String>::new(), "es"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoToken);

        let bing = translator(BingCredentials::new("SECRET"));
        let err = bing
            .build_translate_request(&TranslateRequest::new(Vec::<String>::new(), "es"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadRequest);
    }

    #[test]
    fn test_parse_with_detected_languages() {
        let body = r#"[
            {"detectedLanguage":{"language":"en","score":1.0},"translations":[{"text":"hola","to":"es"}]},
            {"detectedLanguage":{"language":"en","score":0.97},"translations":[{"text":"mundo","to":"es"}]}
        ]"#;

        let translation = parse_translate_response(StatusCode::OK, body, 2).unwrap();

        assert_eq!(translation.translated, vec!["hola", "mundo"]);
        assert_eq!(
            translation.detected_sources,
            Some(vec!["en".to_string(), "en".to_string()])
        );
    }

    #[test]
    fn test_parse_without_detected_languages() {
        let body = r#"[{"translations":[{"text":"hola","to":"es"}]}]"#;
        let translation = parse_translate_response(StatusCode::OK, body, 1).unwrap();
        assert_eq!(translation.translated, vec!["hola"]);
        assert!(translation.detected_sources.is_none());
    }

    #[test]
    fn test_item_without_translations_fails_whole_batch() {
        let body = r#"[{"translations":[{"text":"hola"}]},{"translations":[]}]"#;
        let err = parse_translate_response(StatusCode::OK, body, 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Other);
        assert!(err.to_string().contains("item 1"));
    }

    #[test]
    fn test_auth_failure_is_no_token() {
        let body = r#"{"error":{"code":401000,"message":"The request is not authorized because credentials are missing or invalid."}}"#;
        let err = parse_translate_response(StatusCode::UNAUTHORIZED, body, 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoToken);
        assert!(err.message().unwrap().contains("credentials"));
    }

    #[test]
    fn test_invalid_target_is_bad_request() {
        let body = r#"{"error":{"code":400036,"message":"The target language is not valid."}}"#;
        let err = parse_translate_response(StatusCode::BAD_REQUEST, body, 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadRequest);
        assert_eq!(err.message(), Some("The target language is not valid."));
    }

    #[test]
    fn test_throttling_is_other() {
        let body = r#"{"error":{"code":429001,"message":"The server rejected the request because the client has exceeded request limits."}}"#;
        let err = parse_translate_response(StatusCode::TOO_MANY_REQUESTS, body, 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Other);
        assert!(err.message().unwrap().contains("request limits"));
    }

    #[test]
    fn test_plain_text_fault_falls_back_to_status() {
        let err = parse_translate_response(StatusCode::FORBIDDEN, "Access denied", 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoToken);
        assert_eq!(err.message(), Some("Access denied"));
    }
}
