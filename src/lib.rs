// SPDX-License-Identifier: PMPL-1.0-or-later

//! page-i18n — language resolution and translation for static pages.
//!
//! A page declares which elements to translate with `data-i18n` attributes
//! and ships one JSON dictionary per language. This crate picks the
//! language, loads its dictionary once, and writes the translations into
//! the page.
//!
//! BUILDING BLOCKS:
//! 1. **lang**: normalizes language signals and runs the priority chain
//!    (persisted → `?lang=` → page `lang` → user agent → default).
//! 2. **dictionary**: fetch-once cache, dotted-key lookup that falls back to
//!    the key, and `{{name}}` substitution.
//! 3. **markup**: applies translations to text, markup or attributes.
//! 4. **session**: owns the current language and drives switches, with a
//!    single fallback to the default language.
//!
//! The host document, dictionary source and persistent store are traits
//! ([`markup::Page`], [`dictionary::DictionaryFetcher`],
//! [`storage::KeyValueStore`]); in-memory and filesystem implementations are
//! included.

pub mod config;
pub mod dictionary;
pub mod error;
pub mod lang;
pub mod logging;
pub mod markup;
pub mod session;
pub mod storage;

pub use config::I18nConfig;
pub use dictionary::{Dictionary, Params};
pub use error::I18nError;
pub use lang::LangCode;
pub use session::{I18nSession, SwitchOutcome};
