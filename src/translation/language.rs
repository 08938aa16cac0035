//! Language code handling shared by the backends.

use anyhow::Result;

/// Google-style codes that Microsoft Translator spells differently.
const BING_CODE_ALIASES: &[(&str, &str)] = &[
    ("zh-CN", "zh-Hans"),
    ("zh", "zh-Hans"),
    ("zh-TW", "zh-Hant"),
    ("tl", "fil"),
    ("hmn", "mww"),
    ("ku", "kmr"),
    ("ckb", "ku"),
    ("mn", "mn-Cyrl"),
    ("no", "nb"),
    ("lg", "lug"),
    ("sr", "sr-Cyrl"),
    ("mni-Mtei", "mni"),
];

/// Returns the source code to send, or `None` when the backend should detect it.
///
/// Empty strings and the conventional `auto` marker both mean auto-detect.
pub fn normalize_source(code: &str) -> Option<&str> {
    let code = code.trim();
    if code.is_empty() || code.eq_ignore_ascii_case("auto") {
        None
    } else {
        Some(code)
    }
}

/// Maps a language code to the spelling Microsoft Translator expects.
pub fn bing_language_code(code: &str) -> &str {
    BING_CODE_ALIASES
        .iter()
        .find(|(from, _)| *from == code)
        .map_or(code, |(_, to)| to)
}

/// Checks that `lang` looks like a BCP-47-ish language code (e.g. `ja`, `zh-TW`).
///
/// Whether the backend actually supports the code is left to the backend.
///
/// # Errors
///
/// Returns an error if the code is empty or contains characters no language
/// code uses.
pub fn validate_language(lang: &str) -> Result<()> {
    let well_formed = !lang.is_empty()
        && lang.len() <= 16
        && lang.split('-').all(|part| {
            !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric())
        });

    if well_formed {
        Ok(())
    } else {
        anyhow::bail!(
            "Invalid language code: '{lang}'\n\n\
             Language codes look like: ja, en, zh-TW, pt-BR\n\
             Run 'mtgate languages' to list the codes your backend supports."
        )
    }
}
