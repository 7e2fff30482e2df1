// SPDX-License-Identifier: PMPL-1.0-or-later

//! Serializable in-memory page.
//!
//! Stands in for a browser document: the CLI reads and writes pages in this
//! shape, and the tests build them directly.
//!
//! ```json
//! {
//!   "lang": "vi",
//!   "elements": [
//!     { "attributes": { "data-i18n": "hero.title" } },
//!     { "id": "langToggle", "attributes": {}, "content": { "text": "EN" } }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Element, Page};
use crate::lang::LangCode;

/// Content of an element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Content {
    #[default]
    Empty,
    Text(String),
    Html(String),
}

impl Content {
    pub fn as_str(&self) -> &str {
        match self {
            Content::Empty => "",
            Content::Text(s) | Content::Html(s) => s,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageElement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub content: Content,
}

impl PageElement {
    pub fn new(attributes: &[(&str, &str)]) -> Self {
        Self {
            id: None,
            attributes: attributes
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            content: Content::Empty,
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }
}

impl Element for PageElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.get(name).cloned()
    }

    fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    fn set_text(&mut self, text: &str) {
        self.content = Content::Text(text.to_string());
    }

    fn set_html(&mut self, html: &str) {
        self.content = Content::Html(html.to_string());
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticPage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(default)]
    pub elements: Vec<PageElement>,
}

impl StaticPage {
    pub fn new(elements: Vec<PageElement>) -> Self {
        Self {
            lang: None,
            elements,
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn find(&self, id: &str) -> Option<&PageElement> {
        self.elements.iter().find(|el| el.id.as_deref() == Some(id))
    }
}

impl Page for StaticPage {
    fn set_root_lang(&mut self, lang: &LangCode) {
        self.lang = Some(lang.to_string());
    }

    fn root_lang(&self) -> Option<String> {
        self.lang.clone()
    }

    fn for_each_with_attribute(&mut self, attr: &str, visit: &mut dyn FnMut(&mut dyn Element)) {
        for element in self
            .elements
            .iter_mut()
            .filter(|el| el.attributes.contains_key(attr))
        {
            visit(element);
        }
    }

    fn element_by_id(&mut self, id: &str) -> Option<&mut dyn Element> {
        self.elements
            .iter_mut()
            .find(|el| el.id.as_deref() == Some(id))
            .map(|el| el as &mut dyn Element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_page() {
        let page = StaticPage::from_json(
            r#"{"elements": [{"attributes": {"data-i18n": "a"}}, {"id": "langToggle"}]}"#,
        )
        .expect("parses");
        assert_eq!(page.lang, None);
        assert_eq!(page.elements.len(), 2);
        assert_eq!(page.elements[0].content, Content::Empty);
        assert!(page.find("langToggle").is_some());
    }

    #[test]
    fn content_serializes_by_kind() {
        let mut el = PageElement::new(&[]);
        el.set_html("<b>hi</b>");
        let json = serde_json::to_value(&el).expect("serializes");
        assert_eq!(json["content"]["html"], "<b>hi</b>");
        assert!(json.get("id").is_none());
    }

    #[test]
    fn element_by_id_is_mutable() {
        let mut page = StaticPage::new(vec![PageElement::new(&[]).with_id("btn")]);
        page.element_by_id("btn").expect("present").set_text("EN");
        assert_eq!(page.find("btn").map(|el| el.content.as_str()), Some("EN"));
        assert!(page.element_by_id("missing").is_none());
    }
}
