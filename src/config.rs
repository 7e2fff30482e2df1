// SPDX-License-Identifier: PMPL-1.0-or-later

//! Session configuration.
//!
//! Every field has a default, so an empty YAML file (or none at all) gives a
//! Vietnamese-first page with an English toggle and dictionaries under
//! `./locales`:
//!
//! ```yaml
//! storage_key: lang
//! default_lang: vi
//! locale_dir: ./locales
//! query_param: lang
//! markup:
//!   key: data-i18n
//!   params: data-i18n-params
//!   targets: data-i18n-attr
//!   html: data-i18n-html
//! toggle:
//!   element_id: langToggle
//!   secondary: en
//!   labels:
//!     en: Switch to English
//!     vi: Chuyển sang Tiếng Việt
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::lang::LangCode;
use crate::markup::MarkupAttributes;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct I18nConfig {
    /// Key under which the chosen language is persisted.
    pub storage_key: String,
    /// Language used when no signal resolves and when a load fails.
    pub default_lang: LangCode,
    /// Directory holding `<code>.json` dictionaries.
    pub locale_dir: PathBuf,
    /// URL query parameter carrying a language override.
    pub query_param: String,
    pub markup: MarkupAttributes,
    pub toggle: ToggleConfig,
}

/// Two-language toggle button.
///
/// The button switches between `default_lang` and `secondary`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToggleConfig {
    pub element_id: String,
    pub secondary: LangCode,
    /// `aria-label` per target language, written in that language.
    pub labels: BTreeMap<String, String>,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            storage_key: "lang".to_string(),
            default_lang: LangCode::builtin("vi"),
            locale_dir: PathBuf::from("./locales"),
            query_param: "lang".to_string(),
            markup: MarkupAttributes::default(),
            toggle: ToggleConfig::default(),
        }
    }
}

impl Default for ToggleConfig {
    fn default() -> Self {
        let labels = [
            ("en", "Switch to English"),
            ("vi", "Chuyển sang Tiếng Việt"),
        ]
        .into_iter()
        .map(|(code, label)| (code.to_string(), label.to_string()))
        .collect();
        Self {
            element_id: "langToggle".to_string(),
            secondary: LangCode::builtin("en"),
            labels,
        }
    }
}

impl I18nConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).context("parsing i18n config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("loading {}", path.display()))
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
