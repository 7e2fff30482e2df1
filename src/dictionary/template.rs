// SPDX-License-Identifier: PMPL-1.0-or-later

//! `{{name}}` placeholder substitution.
//!
//! A placeholder is exactly two opening braces, one or more ASCII word
//! characters, and two closing braces. Anything else that looks brace-ish
//! (`{{ name }}`, `{{first-name}}`, `{name}`) is plain text.
//!
//! Substitution is a single pass: a parameter whose value itself contains
//! `{{...}}` is inserted verbatim, not expanded again.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;

use super::Params;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").expect("placeholder pattern compiles"));

/// Replace every placeholder in `template` with its parameter.
///
/// Missing and `null` parameters become the empty string.
///
/// ```
/// use page_i18n::dictionary::{template::render, Params};
///
/// let params: Params = serde_json::from_str(r#"{"name": "Anh"}"#).unwrap();
/// assert_eq!(render("Hello {{name}}", &params), "Hello Anh");
/// assert_eq!(render("Hello {{name}}", &Params::new()), "Hello ");
/// ```
pub fn render(template: &str, params: &Params) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            params.get(&caps[1]).map(value_text).unwrap_or_default()
        })
        .into_owned()
}

/// Names of the placeholders in `template`, in order of appearance.
pub fn placeholders(template: &str) -> Vec<&str> {
    PLACEHOLDER
        .captures_iter(template)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

/// Text form of a parameter or dictionary value.
pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        // Composite values have no natural text form; compact JSON keeps them readable.
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
