// SPDX-License-Identifier: PMPL-1.0-or-later

//! Translation session: current language, dictionary cache, persistence.
//!
//! An [`I18nSession`] is the single owner of the page's language state.
//! Hosts create one per page, call [`I18nSession::init`] once the document
//! is ready, and [`I18nSession::switch_language`] or
//! [`I18nSession::toggle`] from their event handlers.
//!
//! # Switching
//!
//! A switch sets the current language, persists it, loads the dictionary
//! and re-applies every flagged element. When the load fails the switch is
//! repeated once with the default language. When that fails too, the error
//! is logged and the page keeps whatever text it had; no error reaches the
//! caller beyond the returned [`SwitchOutcome`].

use log::{debug, error, info, warn};

use crate::config::I18nConfig;
use crate::dictionary::{self, DictionaryFetcher, DictionaryLoader, Params};
use crate::error::I18nError;
use crate::lang::{self, native_name, AmbientSignals, LangCode, Resolution};
use crate::markup::{apply_all, ApplySummary, Page};
use crate::storage::KeyValueStore;

/// Result of a language switch.
#[derive(Debug)]
pub enum SwitchOutcome {
    /// The requested language was loaded and applied.
    Applied { lang: LangCode, summary: ApplySummary },
    /// The requested language failed; the default was applied instead.
    FellBack {
        requested: LangCode,
        lang: LangCode,
        error: I18nError,
        summary: ApplySummary,
    },
    /// Neither the requested nor the default language could be loaded.
    Failed {
        requested: LangCode,
        error: I18nError,
        fallback_error: Option<I18nError>,
    },
}

impl SwitchOutcome {
    /// Language whose dictionary is now on the page, if any.
    pub fn applied_lang(&self) -> Option<&LangCode> {
        match self {
            Self::Applied { lang, .. } | Self::FellBack { lang, .. } => Some(lang),
            Self::Failed { .. } => None,
        }
    }

    pub fn summary(&self) -> Option<&ApplySummary> {
        match self {
            Self::Applied { summary, .. } | Self::FellBack { summary, .. } => Some(summary),
            Self::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// What [`I18nSession::init`] did.
#[derive(Debug)]
pub struct InitReport {
    pub resolution: Resolution,
    pub outcome: SwitchOutcome,
    pub toggle_found: bool,
}

pub struct I18nSession<F, S> {
    config: I18nConfig,
    loader: DictionaryLoader<F>,
    store: S,
    current: LangCode,
}

impl<F: DictionaryFetcher, S: KeyValueStore> I18nSession<F, S> {
    pub fn new(config: I18nConfig, fetcher: F, store: S) -> Self {
        let current = config.default_lang.clone();
        Self {
            config,
            loader: DictionaryLoader::new(fetcher),
            store,
            current,
        }
    }

    pub fn current(&self) -> &LangCode {
        &self.current
    }

    pub fn config(&self) -> &I18nConfig {
        &self.config
    }

    pub fn loader(&self) -> &DictionaryLoader<F> {
        &self.loader
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Pick the starting language from the store and the page's signals.
    pub fn resolve_initial(&self, signals: &AmbientSignals) -> Resolution {
        let persisted = self.store.get(&self.config.storage_key);
        lang::resolve(
            persisted.as_deref(),
            signals,
            &self.config.query_param,
            &self.config.default_lang,
        )
    }

    /// Resolve, switch, and label the toggle control.
    pub fn init(&mut self, page: &mut dyn Page, signals: &AmbientSignals) -> InitReport {
        let resolution = self.resolve_initial(signals);
        if !resolution.code.is_known() {
            debug!(
                "event=init note=unregistered_code code={} source={}",
                resolution.code,
                resolution.source.as_str()
            );
        }
        let outcome = self.switch_language(&resolution.code, page);
        let toggle_found = self.refresh_toggle(page);
        InitReport {
            resolution,
            outcome,
            toggle_found,
        }
    }

    /// Switch to `requested`, falling back to the default language once.
    pub fn switch_language(&mut self, requested: &LangCode, page: &mut dyn Page) -> SwitchOutcome {
        let error = match self.activate(requested, page) {
            Ok(summary) => {
                return SwitchOutcome::Applied {
                    lang: requested.clone(),
                    summary,
                }
            }
            Err(err) => err,
        };

        let default = self.config.default_lang.clone();
        if *requested == default {
            error!("event=switch status=failed lang={} error={}", requested, error);
            return SwitchOutcome::Failed {
                requested: requested.clone(),
                error,
                fallback_error: None,
            };
        }

        warn!(
            "event=switch status=fallback lang={} default={} error={}",
            requested, default, error
        );
        match self.activate(&default, page) {
            Ok(summary) => SwitchOutcome::FellBack {
                requested: requested.clone(),
                lang: default,
                error,
                summary,
            },
            Err(fallback_error) => {
                error!(
                    "event=switch status=failed lang={} default={} error={}",
                    requested, default, fallback_error
                );
                SwitchOutcome::Failed {
                    requested: requested.clone(),
                    error,
                    fallback_error: Some(fallback_error),
                }
            }
        }
    }

    /// Language the toggle control would switch to.
    pub fn toggle_target(&self) -> LangCode {
        if self.current == self.config.default_lang {
            self.config.toggle.secondary.clone()
        } else {
            self.config.default_lang.clone()
        }
    }

    /// Switch to the toggle target and relabel the control.
    pub fn toggle(&mut self, page: &mut dyn Page) -> SwitchOutcome {
        let target = self.toggle_target();
        let outcome = self.switch_language(&target, page);
        self.refresh_toggle(page);
        outcome
    }

    /// `aria-label` for a control that switches to `target`.
    pub fn toggle_label(&self, target: &LangCode) -> String {
        match self.config.toggle.labels.get(target.as_str()) {
            Some(label) => label.clone(),
            None => format!(
                "Switch to {}",
                native_name(target.as_str()).unwrap_or_else(|| target.display_name())
            ),
        }
    }

    /// Write the toggle target onto the toggle control, if the page has one.
    pub fn refresh_toggle(&self, page: &mut dyn Page) -> bool {
        let target = self.toggle_target();
        let label = self.toggle_label(&target);
        match page.element_by_id(&self.config.toggle.element_id) {
            Some(control) => {
                control.set_text(&target.as_str().to_uppercase());
                control.set_attribute("aria-label", &label);
                true
            }
            None => false,
        }
    }

    /// Translate `key` in the current language.
    ///
    /// Falls back to the key itself when the key is missing or the current
    /// language has no loaded dictionary.
    pub fn translate(&self, key: &str, params: &Params) -> String {
        let loaded = self.loader.cached(&self.current).map(|d| &**d);
        dictionary::translate(loaded, key, params)
    }

    pub fn t(&self, key: &str) -> String {
        self.translate(key, &Params::new())
    }

    /// Re-apply the current dictionary without switching.
    pub fn reapply(&self, page: &mut dyn Page) -> ApplySummary {
        let markup = &self.config.markup;
        let translate = |key: &str, params: &Params| self.translate(key, params);
        apply_all(page, &self.current, markup, &translate)
    }

    fn activate(&mut self, lang: &LangCode, page: &mut dyn Page) -> Result<ApplySummary, I18nError> {
        self.current = lang.clone();
        if let Err(err) = self.store.set(&self.config.storage_key, lang.as_str()) {
            warn!("event=persist_lang status=error lang={} error={:#}", lang, err);
        }

        let loaded = self.loader.load(lang)?;
        let translate = |key: &str, params: &Params| loaded.lookup(key, params);
        let summary = apply_all(page, lang, &self.config.markup, &translate);

        info!(
            "event=switch status=ok lang={} applied={} skipped={}",
            lang,
            summary.applied(),
            summary.skipped
        );
        Ok(summary)
    }
}
