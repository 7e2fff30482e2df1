// SPDX-License-Identifier: PMPL-1.0-or-later

//! Writing translations into page elements.
//!
//! An element opts in by carrying the key attribute. Three optional
//! attributes shape the output:
//!
//! ```html
//! <h1 data-i18n="hero.title"></h1>
//! <p data-i18n="hero.greet" data-i18n-params='{"name": "Anh"}'></p>
//! <input data-i18n="form.email" data-i18n-attr="placeholder|aria-label">
//! <p data-i18n="legal.note" data-i18n-html></p>
//! ```
//!
//! Attribute targets win over the markup flag; plain text is the default.
//! The host document is reached through [`Page`] and [`Element`]; the
//! in-memory [`StaticPage`] implements both.

mod page;

pub use page::{Content, PageElement, StaticPage};

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dictionary::Params;
use crate::error::I18nError;
use crate::lang::LangCode;

/// Read/write access to one element.
pub trait Element {
    fn attribute(&self, name: &str) -> Option<String>;
    fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }
    fn set_attribute(&mut self, name: &str, value: &str);
    /// Replace the content with text, escaped by the host.
    fn set_text(&mut self, text: &str);
    /// Replace the content with markup, parsed by the host.
    fn set_html(&mut self, html: &str);
}

/// The document being translated.
pub trait Page {
    /// Set the `lang` attribute of the document root.
    fn set_root_lang(&mut self, lang: &LangCode);
    /// Current `lang` attribute of the document root.
    fn root_lang(&self) -> Option<String>;
    /// Visit every element carrying `attr`, in document order.
    fn for_each_with_attribute(&mut self, attr: &str, visit: &mut dyn FnMut(&mut dyn Element));
    fn element_by_id(&mut self, id: &str) -> Option<&mut dyn Element>;
}

/// Names of the attributes that drive translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkupAttributes {
    pub key: String,
    pub params: String,
    pub targets: String,
    pub html: String,
}

impl Default for MarkupAttributes {
    fn default() -> Self {
        Self {
            key: "data-i18n".to_string(),
            params: "data-i18n-params".to_string(),
            targets: "data-i18n-attr".to_string(),
            html: "data-i18n-html".to_string(),
        }
    }
}

/// What happened to one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Translation written to these attributes.
    Attributes(Vec<String>),
    /// Translation set as markup.
    Html,
    /// Translation set as text.
    Text,
    /// Key attribute missing or empty.
    NoKey,
    /// Parameter payload rejected; element left as it was.
    BadParams,
}

/// Totals from [`apply_all`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ApplySummary {
    pub attributes: usize,
    pub html: usize,
    pub text: usize,
    pub skipped: usize,
}

impl ApplySummary {
    fn record(&mut self, outcome: &ApplyOutcome) {
        match outcome {
            ApplyOutcome::Attributes(_) => self.attributes += 1,
            ApplyOutcome::Html => self.html += 1,
            ApplyOutcome::Text => self.text += 1,
            ApplyOutcome::NoKey | ApplyOutcome::BadParams => self.skipped += 1,
        }
    }

    /// Elements that received a translation.
    pub fn applied(&self) -> usize {
        self.attributes + self.html + self.text
    }
}

/// Parse a parameter payload attribute.
///
/// Only JSON objects are accepted; the empty string means no parameters.
pub fn parse_params(key: &str, raw: &str) -> Result<Params, I18nError> {
    if raw.trim().is_empty() {
        return Ok(Params::new());
    }
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(params)) => Ok(params),
        Ok(other) => Err(I18nError::InvalidParams {
            key: key.to_string(),
            reason: format!("expected a JSON object, found {other}"),
        }),
        Err(err) => Err(I18nError::InvalidParams {
            key: key.to_string(),
            reason: err.to_string(),
        }),
    }
}

/// Split a pipe-separated attribute list, dropping blanks.
pub fn target_attributes(raw: &str) -> Vec<String> {
    raw.split('|')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Translate one element in place.
pub fn apply_to_element(
    element: &mut dyn Element,
    attrs: &MarkupAttributes,
    translate: &dyn Fn(&str, &Params) -> String,
) -> ApplyOutcome {
    let key = match element.attribute(&attrs.key) {
        Some(key) if !key.is_empty() => key,
        _ => return ApplyOutcome::NoKey,
    };

    let params = match element.attribute(&attrs.params) {
        Some(raw) => match parse_params(&key, &raw) {
            Ok(params) => params,
            Err(err) => {
                warn!("event=apply_element status=skipped key={} error={}", key, err);
                return ApplyOutcome::BadParams;
            }
        },
        None => Params::new(),
    };

    let targets = element
        .attribute(&attrs.targets)
        .map(|raw| target_attributes(&raw))
        .unwrap_or_default();
    let text = translate(&key, &params);

    if !targets.is_empty() {
        for name in &targets {
            element.set_attribute(name, &text);
        }
        return ApplyOutcome::Attributes(targets);
    }

    if element.has_attribute(&attrs.html) {
        element.set_html(&text);
        ApplyOutcome::Html
    } else {
        element.set_text(&text);
        ApplyOutcome::Text
    }
}

/// Stamp the root language and translate every flagged element.
pub fn apply_all(
    page: &mut dyn Page,
    lang: &LangCode,
    attrs: &MarkupAttributes,
    translate: &dyn Fn(&str, &Params) -> String,
) -> ApplySummary {
    page.set_root_lang(lang);
    let mut summary = ApplySummary::default();
    page.for_each_with_attribute(&attrs.key, &mut |element| {
        let outcome = apply_to_element(element, attrs, translate);
        summary.record(&outcome);
    });
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn echo(key: &str, params: &Params) -> String {
        match params.get("name").and_then(Value::as_str) {
            Some(name) => format!("<{key}:{name}>"),
            None => format!("<{key}>"),
        }
    }

    fn element(attributes: &[(&str, &str)]) -> PageElement {
        PageElement::new(attributes)
    }

    #[test]
    fn plain_text_by_default() {
        let mut el = element(&[("data-i18n", "hero.title")]);
        let outcome = apply_to_element(&mut el, &MarkupAttributes::default(), &echo);
        assert_eq!(outcome, ApplyOutcome::Text);
        assert_eq!(el.content, Content::Text("<hero.title>".into()));
    }

    #[test]
    fn html_flag_sets_markup() {
        let mut el = element(&[("data-i18n", "legal"), ("data-i18n-html", "")]);
        let outcome = apply_to_element(&mut el, &MarkupAttributes::default(), &echo);
        assert_eq!(outcome, ApplyOutcome::Html);
        assert_eq!(el.content, Content::Html("<legal>".into()));
    }

    #[test]
    fn attribute_targets_win_over_html_flag() {
        let mut el = element(&[
            ("data-i18n", "form.email"),
            ("data-i18n-attr", " placeholder || aria-label "),
            ("data-i18n-html", ""),
        ]);
        el.content = Content::Text("unchanged".into());
        let outcome = apply_to_element(&mut el, &MarkupAttributes::default(), &echo);
        assert_eq!(
            outcome,
            ApplyOutcome::Attributes(vec!["placeholder".into(), "aria-label".into()])
        );
        assert_eq!(el.attribute("placeholder").as_deref(), Some("<form.email>"));
        assert_eq!(el.attribute("aria-label").as_deref(), Some("<form.email>"));
        assert_eq!(el.content, Content::Text("unchanged".into()));
    }

    #[test]
    fn blank_target_list_falls_through_to_text() {
        let mut el = element(&[("data-i18n", "k"), ("data-i18n-attr", " | ")]);
        let outcome = apply_to_element(&mut el, &MarkupAttributes::default(), &echo);
        assert_eq!(outcome, ApplyOutcome::Text);
    }

    #[test]
    fn params_are_passed_through() {
        let mut el = element(&[("data-i18n", "greet"), ("data-i18n-params", r#"{"name":"Anh"}"#)]);
        apply_to_element(&mut el, &MarkupAttributes::default(), &echo);
        assert_eq!(el.content, Content::Text("<greet:Anh>".into()));
    }

    #[test]
    fn malformed_params_skip_element() {
        for raw in ["{name: Anh}", "[1,2]", "\"text\""] {
            let mut el = element(&[("data-i18n", "greet"), ("data-i18n-params", raw)]);
            el.content = Content::Text("before".into());
            let outcome = apply_to_element(&mut el, &MarkupAttributes::default(), &echo);
            assert_eq!(outcome, ApplyOutcome::BadParams, "payload {raw}");
            assert_eq!(el.content, Content::Text("before".into()));
        }
    }

    #[test]
    fn empty_key_is_ignored() {
        let mut el = element(&[("data-i18n", "")]);
        let outcome = apply_to_element(&mut el, &MarkupAttributes::default(), &echo);
        assert_eq!(outcome, ApplyOutcome::NoKey);
        assert_eq!(el.content, Content::Empty);
    }

    #[test]
    fn empty_params_attribute_means_none() {
        assert!(parse_params("k", "  ").expect("empty is fine").is_empty());
    }

    #[test]
    fn apply_all_counts_and_stamps_root() {
        let mut page = StaticPage::new(vec![
            element(&[("data-i18n", "a")]),
            element(&[("data-i18n", "b"), ("data-i18n-html", "")]),
            element(&[("data-i18n", "c"), ("data-i18n-attr", "title")]),
            element(&[("data-i18n", "d"), ("data-i18n-params", "oops")]),
            element(&[("class", "untouched")]),
        ]);
        let lang = LangCode::normalize("en").expect("valid code");

        let summary = apply_all(&mut page, &lang, &MarkupAttributes::default(), &echo);

        assert_eq!(
            summary,
            ApplySummary {
                attributes: 1,
                html: 1,
                text: 1,
                skipped: 1
            }
        );
        assert_eq!(summary.applied(), 3);
        assert_eq!(page.root_lang().as_deref(), Some("en"));
        assert_eq!(page.elements[4].content, Content::Empty);
    }

    #[test]
    fn custom_attribute_names() {
        let attrs = MarkupAttributes {
            key: "data-t".into(),
            ..MarkupAttributes::default()
        };
        let mut page = StaticPage::new(vec![
            element(&[("data-t", "x")]),
            element(&[("data-i18n", "y")]),
        ]);
        let lang = LangCode::normalize("vi").expect("valid code");
        let summary = apply_all(&mut page, &lang, &attrs, &echo);
        assert_eq!(summary.text, 1);
        assert_eq!(page.elements[1].content, Content::Empty);
    }
}
