// SPDX-License-Identifier: PMPL-1.0-or-later

//! Initial language resolution.
//!
//! Signals are tried in a fixed order and the first one that normalizes to a
//! two-letter code wins:
//!
//! | Order | Signal | Source on a real page |
//! |-------|--------|-----------------------|
//! | 1 | persisted choice | key/value store |
//! | 2 | query parameter | `?lang=` in the URL |
//! | 3 | page language | `lang` on the root element |
//! | 4 | user agent | browser preference / process locale |
//! | 5 | default | configuration |
//!
//! A signal that is present but normalizes to nothing (`"?"`, `"1"`) is
//! skipped rather than ending the chain.

use log::debug;
use serde::Serialize;

use super::LangCode;

/// Which signal produced a resolved language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LangSource {
    Persisted,
    Query,
    PageAttribute,
    UserAgent,
    Default,
}

impl LangSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Persisted => "persisted",
            Self::Query => "query",
            Self::PageAttribute => "page-attribute",
            Self::UserAgent => "user-agent",
            Self::Default => "default",
        }
    }
}

/// Outcome of [`resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub code: LangCode,
    pub source: LangSource,
}

/// Read-only inputs the page exposes besides the persisted choice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmbientSignals {
    /// Raw query string, with or without the leading `?`.
    pub query: Option<String>,
    /// `lang` attribute of the page root.
    pub page_lang: Option<String>,
    /// Preferred language reported by the user agent.
    pub user_agent: Option<String>,
}

impl AmbientSignals {
    /// Preferred language of the current process.
    ///
    /// Reads `LC_ALL`, `LC_MESSAGES` and `LANG` in that order; the `C` and
    /// `POSIX` locales carry no language and are ignored.
    pub fn user_agent_from_env() -> Option<String> {
        ["LC_ALL", "LC_MESSAGES", "LANG"].iter().find_map(|key| {
            std::env::var(key).ok().filter(|value| {
                let value = value.trim();
                !value.is_empty() && value != "C" && !value.starts_with("C.") && value != "POSIX"
            })
        })
    }
}

/// Run the resolution chain.
pub fn resolve(
    persisted: Option<&str>,
    signals: &AmbientSignals,
    query_param: &str,
    default: &LangCode,
) -> Resolution {
    let query_value = signals
        .query
        .as_deref()
        .and_then(|query| parse_query(query, query_param));

    let candidates = [
        (LangSource::Persisted, persisted),
        (LangSource::Query, query_value.as_deref()),
        (LangSource::PageAttribute, signals.page_lang.as_deref()),
        (LangSource::UserAgent, signals.user_agent.as_deref()),
    ];

    for (source, raw) in candidates {
        let Some(raw) = raw else { continue };
        match LangCode::normalize(raw) {
            Some(code) => {
                debug!(
                    "event=lang_resolved source={} code={} raw={:?}",
                    source.as_str(),
                    code,
                    raw
                );
                return Resolution { code, source };
            }
            None if !raw.is_empty() => {
                debug!(
                    "event=lang_signal_skipped source={} raw={:?}",
                    source.as_str(),
                    raw
                );
            }
            None => {}
        }
    }

    debug!("event=lang_resolved source=default code={}", default);
    Resolution {
        code: default.clone(),
        source: LangSource::Default,
    }
}

/// First value of `name` in a URL query string.
///
/// Pairs are split on `&` and `=`; `+` decodes to a space and `%XX` escapes
/// are decoded. An undecodable escape is kept literally.
pub fn parse_query(query: &str, name: &str) -> Option<String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => (key, value),
            None => (pair, ""),
        })
        .find(|(key, _)| decode_component(key) == name)
        .map(|(_, value)| decode_component(value))
}

fn decode_component(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).ok();
                match hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                    Some(byte) => {
                        out.push(byte);
                        i += 3;
                    }
                    None => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}
