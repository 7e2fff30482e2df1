// SPDX-License-Identifier: PMPL-1.0-or-later

//! Error type shared by the loader, markup and session layers.
//!
//! | Failure | Cause | Handling |
//! |---------|-------|----------|
//! | `Fetch` | dictionary source unreachable | switch falls back to the default language |
//! | `Parse` | dictionary payload is not JSON | same as `Fetch` |
//! | `NotADictionary` | payload parsed but is not an object | same as `Fetch` |
//! | `InvalidParams` | `data-i18n-params` is not a JSON object | element skipped |
//! | `InvalidLanguage` | value normalizes to fewer than two letters | caller decides |
//! | `Storage` | persisted choice could not be written | logged, switch continues |

use crate::lang::LangCode;

/// Errors from i18n operations.
#[derive(Debug)]
pub enum I18nError {
    /// The fetcher could not produce a payload for the language.
    Fetch { lang: LangCode, reason: String },
    /// The payload was not valid JSON.
    Parse {
        lang: LangCode,
        source: serde_json::Error,
    },
    /// The payload parsed but its root is not an object.
    NotADictionary { lang: LangCode, found: &'static str },
    /// A parameter payload attribute held something other than a JSON object.
    InvalidParams { key: String, reason: String },
    /// A string did not normalize to a two-letter language code.
    InvalidLanguage(String),
    /// The key/value store rejected a write.
    Storage(String),
}

impl I18nError {
    /// Language the error is about, when there is one.
    pub fn lang(&self) -> Option<&LangCode> {
        match self {
            Self::Fetch { lang, .. }
            | Self::Parse { lang, .. }
            | Self::NotADictionary { lang, .. } => Some(lang),
            _ => None,
        }
    }
}

impl std::fmt::Display for I18nError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fetch { lang, reason } => write!(f, "cannot load locale: {lang} ({reason})"),
            Self::Parse { lang, source } => write!(f, "locale {lang} is not valid JSON: {source}"),
            Self::NotADictionary { lang, found } => {
                write!(f, "locale {lang} must be a JSON object, found {found}")
            }
            Self::InvalidParams { key, reason } => {
                write!(f, "invalid parameters for '{key}': {reason}")
            }
            Self::InvalidLanguage(raw) => write!(f, "not a language code: '{raw}'"),
            Self::Storage(msg) => write!(f, "storage error: {msg}"),
        }
    }
}

impl std::error::Error for I18nError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_names_the_locale() {
        let err = I18nError::Fetch {
            lang: LangCode::normalize("fr").expect("valid code"),
            reason: "404".into(),
        };
        assert_eq!(err.to_string(), "cannot load locale: fr (404)");
        assert_eq!(err.lang().map(LangCode::as_str), Some("fr"));
    }

    #[test]
    fn params_error_has_no_language() {
        let err = I18nError::InvalidParams {
            key: "hero.title".into(),
            reason: "expected object".into(),
        };
        assert!(err.lang().is_none());
        assert!(err.to_string().contains("hero.title"));
    }
}
