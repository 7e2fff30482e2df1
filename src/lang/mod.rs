// SPDX-License-Identifier: PMPL-1.0-or-later

//! Language codes and the resolution chain that picks one.
//!
//! A [`LangCode`] is always two lowercase ASCII letters. The only way to
//! build one is [`LangCode::normalize`], which lowercases the input, drops
//! every non-letter and keeps the first two letters. `"en-US"`, `"EN"` and
//! `" e.n "` all become `"en"`; `"x"` and `"42"` become nothing.
//!
//! Codes are not checked against any list of supported languages: a
//! persisted `"fr"` stays `"fr"` even when no French dictionary exists.
//! [`iso639`] carries display metadata for the codes we know about.

pub mod iso639;
mod resolve;

pub use iso639::{is_valid_iso639_1, language_name, native_name};
pub use resolve::{parse_query, resolve, AmbientSignals, LangSource, Resolution};

use serde::{Deserialize, Serialize};

use crate::error::I18nError;

/// A normalized two-letter language code (`"en"`, `"vi"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LangCode(String);

impl LangCode {
    /// Normalize a raw language signal.
    ///
    /// Returns `None` when fewer than two letters survive.
    pub fn normalize(raw: &str) -> Option<LangCode> {
        let code: String = raw
            .chars()
            .flat_map(char::to_lowercase)
            .filter(char::is_ascii_lowercase)
            .take(2)
            .collect();
        if code.len() == 2 {
            Some(LangCode(code))
        } else {
            None
        }
    }

    /// Code from a literal known to be normalized.
    pub(crate) fn builtin(code: &'static str) -> LangCode {
        debug_assert!(LangCode::normalize(code).is_some_and(|c| c.0 == code));
        LangCode(code.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is a registered ISO 639-1 code.
    pub fn is_known(&self) -> bool {
        is_valid_iso639_1(&self.0)
    }

    /// English display name, or the code itself when unknown.
    pub fn display_name(&self) -> &str {
        language_name(&self.0).unwrap_or(self.0.as_str())
    }
}

impl std::fmt::Display for LangCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for LangCode {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LangCode::normalize(s).ok_or_else(|| I18nError::InvalidLanguage(s.to_string()))
    }
}

impl TryFrom<String> for LangCode {
    type Error = I18nError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LangCode> for String {
    fn from(code: LangCode) -> Self {
        code.0
    }
}

impl AsRef<str> for LangCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
