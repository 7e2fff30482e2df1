// SPDX-License-Identifier: PMPL-1.0-or-later

//! Translation dictionaries and key lookup.
//!
//! A dictionary is the parsed contents of one `<code>.json` file: a JSON
//! object whose values are strings or further objects. Keys address nested
//! entries with dots, so `"nav.home"` reads `{"nav": {"home": "..."}}`.
//!
//! Lookup is fail-open. A key that does not resolve to a leaf is returned
//! as-is, which leaves the untranslated key visible on the page instead of
//! raising anything.

pub mod loader;
pub mod template;

pub use loader::{locale_path, DictionaryFetcher, DictionaryLoader, LocaleDirFetcher};

use serde_json::{Map, Value};

use crate::error::I18nError;
use crate::lang::LangCode;

/// Substitution values for one translation request.
pub type Params = Map<String, Value>;

/// Translated strings for one language.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dictionary {
    entries: Map<String, Value>,
}

impl Dictionary {
    pub fn new(entries: Map<String, Value>) -> Self {
        Self { entries }
    }

    /// Parse a dictionary payload.
    ///
    /// The payload must be a JSON object; anything else is rejected so the
    /// caller can fall back to another language.
    pub fn from_json(lang: &LangCode, payload: &str) -> Result<Self, I18nError> {
        let value: Value = serde_json::from_str(payload).map_err(|source| I18nError::Parse {
            lang: lang.clone(),
            source,
        })?;
        match value {
            Value::Object(entries) => Ok(Self { entries }),
            other => Err(I18nError::NotADictionary {
                lang: lang.clone(),
                found: json_kind(&other),
            }),
        }
    }

    /// Raw entry at a dotted key, before substitution.
    ///
    /// Numeric segments index into arrays, so `"steps.0"` reads the first
    /// element of `{"steps": [...]}`. Returns `None` when a segment is
    /// missing, when the value is `null`, and when the key stops at an object
    /// or array instead of a leaf.
    pub fn raw(&self, key: &str) -> Option<&Value> {
        let mut segments = key.split('.');
        let first = segments.next()?;
        let mut current = self.entries.get(first)?;
        for segment in segments {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        match current {
            Value::Null | Value::Object(_) | Value::Array(_) => None,
            leaf => Some(leaf),
        }
    }

    /// Translate `key`, falling back to the key itself.
    pub fn lookup(&self, key: &str, params: &Params) -> String {
        match self.raw(key) {
            Some(raw) => template::render(&template::value_text(raw), params),
            None => key.to_string(),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.raw(key).is_some()
    }

    /// Every leaf key in dotted form, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        collect_keys(&self.entries, "", &mut keys);
        keys.sort();
        keys
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Translate against an optional dictionary.
///
/// With no dictionary every key falls back to itself, matching a page whose
/// current language has not been loaded.
pub fn translate(dictionary: Option<&Dictionary>, key: &str, params: &Params) -> String {
    match dictionary {
        Some(dictionary) => dictionary.lookup(key, params),
        None => key.to_string(),
    }
}

fn collect_keys(map: &Map<String, Value>, prefix: &str, out: &mut Vec<String>) {
    for (name, value) in map {
        collect_value(value, join_key(prefix, name), out);
    }
}

fn collect_value(value: &Value, path: String, out: &mut Vec<String>) {
    match value {
        Value::Object(inner) => collect_keys(inner, &path, out),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                collect_value(item, join_key(&path, &index.to_string()), out);
            }
        }
        Value::Null => {}
        _ => out.push(path),
    }
}

fn join_key(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn en() -> LangCode {
        LangCode::normalize("en").expect("valid code")
    }

    fn dict(value: Value) -> Dictionary {
        Dictionary::from_json(&en(), &value.to_string()).expect("dictionary parses")
    }

    fn no_params() -> Params {
        Params::new()
    }

    #[test]
    fn nested_lookup() {
        let d = dict(json!({"nav": {"home": "Home", "about": {"title": "About us"}}}));
        assert_eq!(d.lookup("nav.home", &no_params()), "Home");
        assert_eq!(d.lookup("nav.about.title", &no_params()), "About us");
    }

    #[test]
    fn missing_key_returns_key() {
        let d = dict(json!({"a": {"b": {}}}));
        assert_eq!(d.lookup("a.b.c", &no_params()), "a.b.c");
        assert_eq!(d.lookup("x", &no_params()), "x");
        assert_eq!(d.lookup("", &no_params()), "");
    }

    #[test]
    fn null_and_non_leaf_fall_back() {
        let d = dict(json!({"gone": null, "group": {"x": "1"}, "list": ["a"]}));
        assert_eq!(d.lookup("gone", &no_params()), "gone");
        assert_eq!(d.lookup("group", &no_params()), "group");
        assert_eq!(d.lookup("list", &no_params()), "list");
        assert_eq!(d.lookup("group.x.y", &no_params()), "group.x.y");
    }

    #[test]
    fn scalar_leaves_render_as_text() {
        let d = dict(json!({"year": 2024, "beta": false}));
        assert_eq!(d.lookup("year", &no_params()), "2024");
        assert_eq!(d.lookup("beta", &no_params()), "false");
    }

    #[test]
    fn lookup_substitutes_params() {
        let d = dict(json!({"greet": "Xin chào {{name}}, bạn có {{n}} tin"}));
        let params = json!({"name": "Anh", "n": 2});
        let params = params.as_object().cloned().unwrap_or_default();
        assert_eq!(d.lookup("greet", &params), "Xin chào Anh, bạn có 2 tin");
    }

    #[test]
    fn numeric_segments_index_arrays() {
        let d = dict(json!({"items": ["first", {"label": "second"}, null]}));
        assert_eq!(d.lookup("items.0", &no_params()), "first");
        assert_eq!(d.lookup("items.1.label", &no_params()), "second");
        assert_eq!(d.lookup("items.2", &no_params()), "items.2");
        assert_eq!(d.lookup("items.9", &no_params()), "items.9");
        assert_eq!(d.lookup("items.first", &no_params()), "items.first");
        assert_eq!(d.keys(), vec!["items.0", "items.1.label"]);
    }

    #[test]
    fn literal_dotted_key_is_not_a_path() {
        let d = dict(json!({"a.b": "flat"}));
        assert_eq!(d.lookup("a.b", &no_params()), "a.b");
    }

    #[test]
    fn rejects_non_object_payloads() {
        let err = Dictionary::from_json(&en(), "[1, 2]").unwrap_err();
        assert!(matches!(err, I18nError::NotADictionary { found: "array", .. }));

        let err = Dictionary::from_json(&en(), "{oops").unwrap_err();
        assert!(matches!(err, I18nError::Parse { .. }));
    }

    #[test]
    fn lists_leaf_keys() {
        let d = dict(json!({"b": "1", "a": {"y": "2", "x": {"z": "3"}}, "n": null}));
        assert_eq!(d.keys(), vec!["a.x.z", "a.y", "b"]);
        assert!(d.contains("a.y"));
        assert!(!d.contains("n"));
    }

    #[test]
    fn translate_without_dictionary() {
        assert_eq!(translate(None, "hero.title", &no_params()), "hero.title");
    }
}
