// SPDX-License-Identifier: PMPL-1.0-or-later

//! page-i18n: resolve, translate and apply page dictionaries from the shell
//!
//! Pages are read and written as JSON (see `markup::StaticPage`). The chosen
//! language is kept in a JSON store file when `--store` is given, which
//! plays the part of the browser's local storage between runs.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use page_i18n::dictionary::{DictionaryLoader, LocaleDirFetcher, Params};
use page_i18n::lang::{AmbientSignals, LangCode};
use page_i18n::markup::{self, StaticPage};
use page_i18n::session::{I18nSession, InitReport, SwitchOutcome};
use page_i18n::storage::{JsonFileStore, KeyValueStore, MemoryStore};
use page_i18n::{logging, I18nConfig};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "page-i18n")]
#[command(version)]
#[command(about = "Language resolution and dictionary translation for static pages")]
#[command(long_about = None)]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory of <code>.json dictionaries (overrides the config)
    #[arg(short, long, global = true)]
    locales: Option<PathBuf>,

    /// JSON file standing in for local storage
    #[arg(short, long, global = true)]
    store: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show which language a page would start in
    Resolve {
        #[command(flatten)]
        signals: SignalArgs,

        /// Persisted choice (overrides the store)
        #[arg(long)]
        persisted: Option<String>,
    },

    /// Translate a single key
    Translate {
        /// Dotted translation key
        #[arg(value_name = "KEY")]
        key: String,

        /// Language to translate into (default: configured default)
        #[arg(short = 'L', long)]
        lang: Option<String>,

        /// Parameters as a JSON object
        #[arg(short, long)]
        params: Option<String>,
    },

    /// Translate every flagged element of a page
    Apply {
        /// Page JSON file
        #[arg(value_name = "PAGE")]
        page: PathBuf,

        /// Switch to this language instead of resolving one
        #[arg(short = 'L', long)]
        lang: Option<String>,

        #[command(flatten)]
        signals: SignalArgs,

        /// Write the translated page here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Initialize a page, then press its language toggle
    Toggle {
        /// Page JSON file
        #[arg(value_name = "PAGE")]
        page: PathBuf,

        #[command(flatten)]
        signals: SignalArgs,

        /// Write the translated page here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List dictionaries and the keys each one lacks against the default
    Check,
}

#[derive(clap::Args)]
struct SignalArgs {
    /// URL query string, e.g. "?lang=en"
    #[arg(short, long)]
    query: Option<String>,

    /// Page root language (default: taken from the page, if any)
    #[arg(long)]
    page_lang: Option<String>,

    /// User-agent language (default: process locale)
    #[arg(long)]
    user_agent: Option<String>,
}

impl SignalArgs {
    fn into_signals(self, page: Option<&StaticPage>) -> AmbientSignals {
        AmbientSignals {
            query: self.query,
            page_lang: self.page_lang.or_else(|| page.and_then(|p| p.lang.clone())),
            user_agent: self.user_agent.or_else(AmbientSignals::user_agent_from_env),
        }
    }
}

type Session = I18nSession<LocaleDirFetcher, Box<dyn KeyValueStore>>;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level)?;

    let mut config = match &cli.config {
        Some(path) => I18nConfig::load(path)?,
        None => I18nConfig::default(),
    };
    if let Some(dir) = &cli.locales {
        config.locale_dir = dir.clone();
    }

    match cli.command {
        Commands::Resolve { signals, persisted } => {
            let store: Box<dyn KeyValueStore> = match persisted {
                Some(value) => Box::new(MemoryStore::with(&config.storage_key, &value)),
                None => open_store(cli.store.as_deref()),
            };
            let session = new_session(config, store);
            let resolution = session.resolve_initial(&signals.into_signals(None));

            println!(
                "Resolved language: {} ({})",
                resolution.code.as_str().bold(),
                resolution.code.display_name()
            );
            println!("  Source: {}", resolution.source.as_str());
            if !resolution.code.is_known() {
                println!("  {}", "not a registered ISO 639-1 code".yellow());
            }
        }

        Commands::Translate { key, lang, params } => {
            let lang = match lang {
                Some(raw) => raw.parse::<LangCode>()?,
                None => config.default_lang.clone(),
            };
            let params = match params {
                Some(raw) => markup::parse_params(&key, &raw)?,
                None => Params::new(),
            };

            // Translation alone never touches the persisted choice.
            let mut session = new_session(config, Box::new(MemoryStore::new()));
            match session.switch_language(&lang, &mut StaticPage::new(Vec::new())) {
                SwitchOutcome::Applied { .. } => {}
                SwitchOutcome::FellBack {
                    lang: fallback,
                    error,
                    ..
                } => eprintln!("{} {} (using {})", "warning:".yellow(), error, fallback),
                SwitchOutcome::Failed { error, .. } => {
                    eprintln!("{} {}", "warning:".yellow(), error)
                }
            }
            println!("{}", session.translate(&key, &params));
        }

        Commands::Apply {
            page: page_path,
            lang,
            signals,
            output,
        } => {
            let mut page = read_page(&page_path)?;
            let signals = signals.into_signals(Some(&page));
            let mut session = new_session(config, open_store(cli.store.as_deref()));

            let outcome = match lang {
                Some(raw) => {
                    let lang = raw.parse::<LangCode>()?;
                    let outcome = session.switch_language(&lang, &mut page);
                    session.refresh_toggle(&mut page);
                    outcome
                }
                None => {
                    let report = session.init(&mut page, &signals);
                    print_init(&report);
                    report.outcome
                }
            };
            print_outcome(&outcome);
            write_page(&page, output.as_deref())?;
        }

        Commands::Toggle {
            page: page_path,
            signals,
            output,
        } => {
            let mut page = read_page(&page_path)?;
            let signals = signals.into_signals(Some(&page));
            let mut session = new_session(config, open_store(cli.store.as_deref()));

            let report = session.init(&mut page, &signals);
            print_init(&report);
            if !report.toggle_found {
                return Err(anyhow!(
                    "page has no element with id `{}`",
                    session.config().toggle.element_id
                ));
            }
            let outcome = session.toggle(&mut page);
            print_outcome(&outcome);
            write_page(&page, output.as_deref())?;
        }

        Commands::Check => check_locales(&config)?,
    }

    Ok(())
}

fn new_session(config: I18nConfig, store: Box<dyn KeyValueStore>) -> Session {
    let fetcher = LocaleDirFetcher::new(&config.locale_dir);
    I18nSession::new(config, fetcher, store)
}

fn open_store(path: Option<&Path>) -> Box<dyn KeyValueStore> {
    match path {
        Some(path) => Box::new(JsonFileStore::new(path)),
        None => Box::new(MemoryStore::new()),
    }
}

fn read_page(path: &Path) -> Result<StaticPage> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    StaticPage::from_json(&content).with_context(|| format!("parsing {}", path.display()))
}

fn write_page(page: &StaticPage, output: Option<&Path>) -> Result<()> {
    let json = page.to_json()?;
    match output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            eprintln!("Page saved to: {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn print_init(report: &InitReport) {
    eprintln!(
        "Initial language: {} (from {})",
        report.resolution.code.as_str().bold(),
        report.resolution.source.as_str()
    );
}

fn print_outcome(outcome: &SwitchOutcome) {
    match outcome {
        SwitchOutcome::Applied { lang, summary } => {
            eprintln!(
                "{} {} ({} applied, {} skipped)",
                "APPLIED".green(),
                lang,
                summary.applied(),
                summary.skipped
            );
        }
        SwitchOutcome::FellBack {
            requested,
            lang,
            error,
            summary,
        } => {
            eprintln!(
                "{} {} -> {} ({} applied, {} skipped)",
                "FALLBACK".yellow(),
                requested,
                lang,
                summary.applied(),
                summary.skipped
            );
            eprintln!("  {}", error.to_string().dimmed());
        }
        SwitchOutcome::Failed {
            requested,
            error,
            fallback_error,
        } => {
            eprintln!("{} {} (page left unchanged)", "FAILED".red().bold(), requested);
            eprintln!("  {}", error.to_string().dimmed());
            if let Some(err) = fallback_error {
                eprintln!("  {}", err.to_string().dimmed());
            }
        }
    }
}

fn check_locales(config: &I18nConfig) -> Result<()> {
    let fetcher = LocaleDirFetcher::new(&config.locale_dir);
    let available = fetcher.available();
    if available.is_empty() {
        return Err(anyhow!(
            "no dictionaries found in {}",
            config.locale_dir.display()
        ));
    }

    let mut loader = DictionaryLoader::new(fetcher);
    let reference = loader
        .load(&config.default_lang)
        .with_context(|| format!("loading default language {}", config.default_lang))?;
    let reference_keys = reference.keys();

    println!("{}", "DICTIONARIES".bold().yellow());
    for lang in &available {
        match loader.load(lang) {
            Ok(dictionary) => {
                let missing: Vec<&String> = reference_keys
                    .iter()
                    .filter(|key| !dictionary.contains(key))
                    .collect();
                let status = if missing.is_empty() {
                    "OK".green()
                } else {
                    "INCOMPLETE".yellow()
                };
                println!(
                    "  {} ({}): {} keys [{}]",
                    lang,
                    lang.display_name(),
                    dictionary.keys().len(),
                    status
                );
                for key in missing {
                    println!("    - missing {}", key.dimmed());
                }
            }
            Err(err) => println!("  {} {}: {}", lang, "ERROR".red(), err),
        }
    }
    Ok(())
}
