use crate::error::{Result, TranslationError};

use super::language::normalize_source;

/// One batch translation: every message goes out in a single backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateRequest {
    pub messages: Vec<String>,
    /// Source language; `None` (or an empty string) asks the backend to detect it.
    pub source: Option<String>,
    pub target: String,
}

impl TranslateRequest {
    pub fn new<I, S>(messages: I, target: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            messages: messages.into_iter().map(Into::into).collect(),
            source: None,
            target: target.into(),
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// The source language to send, or `None` in auto-detect mode.
    pub fn source_language(&self) -> Option<&str> {
        self.source.as_deref().and_then(normalize_source)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.messages.is_empty() {
            return Err(TranslationError::bad_request("no messages to translate"));
        }
        if self.target.trim().is_empty() {
            return Err(TranslationError::bad_request("target language is required"));
        }
        Ok(())
    }
}

/// Translated messages, positionally aligned with the request's messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub translated: Vec<String>,
    /// Present only when the backend reported a detected source for every message.
    pub detected_sources: Option<Vec<String>>,
}

impl Translation {
    /// Assembles a result from per-item `(text, detected source)` pairs.
    ///
    /// Fails when the item count differs from `expected` or when only some
    /// items carry a detected source.
    pub(crate) fn from_items<I>(items: I, expected: usize) -> Result<Self>
    where
        I: IntoIterator<Item = (String, Option<String>)>,
    {
        let (translated, detected): (Vec<String>, Vec<Option<String>>) =
            items.into_iter().unzip();

        if translated.len() != expected {
            return Err(TranslationError::malformed(format!(
                "expected {expected} translations, got {}",
                translated.len()
            )));
        }

        let reported = detected.iter().filter(|d| d.is_some()).count();
        let detected_sources = if reported == 0 {
            None
        } else if reported == detected.len() {
            Some(detected.into_iter().flatten().collect())
        } else {
            return Err(TranslationError::malformed(format!(
                "detected source language reported for {reported} of {} messages",
                detected.len()
            )));
        };

        Ok(Self {
            translated,
            detected_sources,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub language: String,
    /// Backend-defined confidence; Google reports roughly 0.0 to 1.0.
    pub confidence: f32,
}
