// SPDX-License-Identifier: PMPL-1.0-or-later

//! Fetch-once dictionary cache.
//!
//! The loader asks a [`DictionaryFetcher`] for the raw payload the first time
//! a language is requested and keeps the parsed [`Dictionary`] for the rest
//! of the session. Nothing is ever evicted; the set of languages a page
//! offers is small and fixed.
//!
//! Failed loads are not remembered, so asking again retries the fetch.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, warn};

use super::Dictionary;
use crate::error::I18nError;
use crate::lang::LangCode;

/// Source of raw dictionary payloads.
pub trait DictionaryFetcher {
    /// Return the JSON text for `lang`.
    fn fetch(&self, lang: &LangCode) -> Result<String, I18nError>;
}

impl<F: DictionaryFetcher + ?Sized> DictionaryFetcher for &F {
    fn fetch(&self, lang: &LangCode) -> Result<String, I18nError> {
        (**self).fetch(lang)
    }
}

/// `<locale_dir>/<code>.json`
pub fn locale_path(locale_dir: &Path, lang: &LangCode) -> PathBuf {
    locale_dir.join(format!("{lang}.json"))
}

/// Reads dictionaries from a directory of `<code>.json` files.
///
/// Every call goes to disk; caching is the loader's job, so an edited file
/// is picked up by the next session without any stale copy in between.
#[derive(Debug, Clone)]
pub struct LocaleDirFetcher {
    dir: PathBuf,
}

impl LocaleDirFetcher {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Codes with a dictionary file in the directory, sorted.
    pub fn available(&self) -> Vec<LangCode> {
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return Vec::new();
        };
        let mut codes: Vec<LangCode> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| ext.eq_ignore_ascii_case("json"))
                    .unwrap_or(false)
            })
            .filter_map(|path| {
                let stem = path.file_stem()?.to_str()?;
                LangCode::normalize(stem).filter(|code| code.as_str() == stem)
            })
            .collect();
        codes.sort();
        codes
    }
}

impl DictionaryFetcher for LocaleDirFetcher {
    fn fetch(&self, lang: &LangCode) -> Result<String, I18nError> {
        let path = locale_path(&self.dir, lang);
        fs::read_to_string(&path).map_err(|err| I18nError::Fetch {
            lang: lang.clone(),
            reason: format!("{}: {}", path.display(), err),
        })
    }
}

/// Session cache of loaded dictionaries, keyed by language code.
pub struct DictionaryLoader<F> {
    fetcher: F,
    cache: HashMap<LangCode, Arc<Dictionary>>,
}

impl<F: DictionaryFetcher> DictionaryLoader<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            cache: HashMap::new(),
        }
    }

    /// Dictionary for `lang`, fetching it on first use.
    ///
    /// Repeated calls for a loaded language return the same `Arc`.
    pub fn load(&mut self, lang: &LangCode) -> Result<Arc<Dictionary>, I18nError> {
        if let Some(dictionary) = self.cache.get(lang) {
            return Ok(Arc::clone(dictionary));
        }

        let payload = self.fetcher.fetch(lang).inspect_err(|err| {
            warn!("event=dictionary_fetch status=error lang={} error={}", lang, err);
        })?;
        let dictionary = Arc::new(Dictionary::from_json(lang, &payload).inspect_err(|err| {
            warn!("event=dictionary_parse status=error lang={} error={}", lang, err);
        })?);

        debug!(
            "event=dictionary_load status=ok lang={} keys={}",
            lang,
            dictionary.keys().len()
        );
        self.cache.insert(lang.clone(), Arc::clone(&dictionary));
        Ok(dictionary)
    }

    /// Already-loaded dictionary, without fetching.
    pub fn cached(&self, lang: &LangCode) -> Option<&Arc<Dictionary>> {
        self.cache.get(lang)
    }

    pub fn is_loaded(&self, lang: &LangCode) -> bool {
        self.cache.contains_key(lang)
    }

    /// Loaded languages, sorted.
    pub fn loaded(&self) -> Vec<LangCode> {
        let mut codes: Vec<LangCode> = self.cache.keys().cloned().collect();
        codes.sort();
        codes
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use tempfile::TempDir;

    struct CountingFetcher {
        payloads: HashMap<&'static str, &'static str>,
        calls: Cell<usize>,
        requested: RefCell<Vec<String>>,
    }

    impl CountingFetcher {
        fn new(payloads: &[(&'static str, &'static str)]) -> Self {
            Self {
                payloads: payloads.iter().copied().collect(),
                calls: Cell::new(0),
                requested: RefCell::new(Vec::new()),
            }
        }
    }

    impl DictionaryFetcher for CountingFetcher {
        fn fetch(&self, lang: &LangCode) -> Result<String, I18nError> {
            self.calls.set(self.calls.get() + 1);
            self.requested.borrow_mut().push(lang.to_string());
            self.payloads
                .get(lang.as_str())
                .map(|payload| payload.to_string())
                .ok_or_else(|| I18nError::Fetch {
                    lang: lang.clone(),
                    reason: "404 Not Found".into(),
                })
        }
    }

    fn code(raw: &str) -> LangCode {
        LangCode::normalize(raw).expect("valid code")
    }

    #[test]
    fn second_load_hits_cache() {
        let fetcher = CountingFetcher::new(&[("en", r#"{"hi": "Hello"}"#)]);
        let mut loader = DictionaryLoader::new(&fetcher);

        let first = loader.load(&code("en")).expect("loads");
        let second = loader.load(&code("en")).expect("loads again");

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(fetcher.calls.get(), 1);
        assert!(loader.is_loaded(&code("en")));
    }

    #[test]
    fn failures_are_not_cached() {
        let fetcher = CountingFetcher::new(&[("vi", "not json")]);
        let mut loader = DictionaryLoader::new(&fetcher);

        assert!(matches!(loader.load(&code("fr")), Err(I18nError::Fetch { .. })));
        assert!(matches!(loader.load(&code("vi")), Err(I18nError::Parse { .. })));
        assert!(loader.load(&code("fr")).is_err());

        assert_eq!(fetcher.calls.get(), 3);
        assert_eq!(*fetcher.requested.borrow(), vec!["fr", "vi", "fr"]);
        assert!(loader.loaded().is_empty());
    }

    #[test]
    fn locale_dir_reads_code_json() {
        let dir = TempDir::new().expect("tempdir");
        fs::write(dir.path().join("en.json"), r#"{"nav": {"home": "Home"}}"#).expect("write");
        fs::write(dir.path().join("vi.json"), r#"{"nav": {"home": "Trang chủ"}}"#).expect("write");
        fs::write(dir.path().join("notes.txt"), "ignored").expect("write");
        fs::write(dir.path().join("en-US.json"), "{}").expect("write");

        let fetcher = LocaleDirFetcher::new(dir.path());
        assert_eq!(fetcher.available(), vec![code("en"), code("vi")]);

        let mut loader = DictionaryLoader::new(fetcher);
        let vi = loader.load(&code("vi")).expect("loads vi");
        assert_eq!(vi.lookup("nav.home", &Default::default()), "Trang chủ");

        let err = loader.load(&code("de")).unwrap_err();
        assert!(err.to_string().contains("de.json"));
    }

    #[test]
    fn locale_dir_rereads_on_each_fetch() {
        let dir = TempDir::new().expect("tempdir");
        let path = locale_path(dir.path(), &code("en"));
        fs::write(&path, r#"{"v": "1"}"#).expect("write");

        let fetcher = LocaleDirFetcher::new(dir.path());
        assert!(fetcher.fetch(&code("en")).expect("fetch").contains("\"1\""));
        fs::write(&path, r#"{"v": "2"}"#).expect("rewrite");
        assert!(fetcher.fetch(&code("en")).expect("fetch").contains("\"2\""));
    }
}
