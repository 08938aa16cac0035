mod bing;
mod gateway;
mod google;
mod handle;
mod language;
mod transport;
mod types;

pub use bing::{BingCredentials, BingTranslator, DEFAULT_BING_ENDPOINT};
pub use gateway::{Backend, Capability, Credentials, Gateway, GatewayBuilder};
pub use google::{DEFAULT_GOOGLE_ENDPOINT, GoogleCredentials, GoogleTranslator};
pub use handle::{Outcome, RequestHandle, spawn_request};
pub use language::{bing_language_code, normalize_source, validate_language};
pub use types::{Detection, TranslateRequest, Translation};

/// Response parsers, exposed for callers that run their own HTTP stack.
pub mod parse {
    pub use super::bing::parse_translate_response as bing_translate;
    pub use super::google::{
        parse_detect_response as google_detect, parse_languages_response as google_languages,
        parse_translate_response as google_translate,
    };
}
