//! Command-line interface for router-tabs.
//!
//! Replays locations against a configured route tree with a file-backed tab
//! store, generates URLs from patterns, and inspects or clears stored tabs.

use crate::engine::RouterTabsBuilder;
use crate::navigation::MemoryHistory;
use crate::tab::{Params, Query, TabFactoryRegistry};
use crate::url::generate_route_url;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use router_tabs_config::RouterTabsConfig;
use router_tabs_store::{FileStorage, KeyedTabStore, StorageWatcher, TabRecord, TabStore};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// router-tabs - keep a tab bar in sync with a route tree
#[derive(Parser, Debug)]
#[command(name = "router-tabs")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log level (off, error, warn, info, debug, trace); overrides RUST_LOG
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<log::LevelFilter>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Feed locations to the engine and print the resulting tabs
    Replay {
        /// Route configuration (.yaml, .yml or .json)
        #[arg(short, long, value_name = "FILE")]
        config: PathBuf,

        /// Tab store directory (defaults to the configured or platform data dir)
        #[arg(long, value_name = "DIR")]
        store_dir: Option<PathBuf>,

        /// Close the active tab after the last location
        #[arg(long)]
        close_active: bool,

        /// Locations to visit, in order (e.g. /users/1?tab=posts)
        #[arg(value_name = "LOCATION", required = true)]
        locations: Vec<String>,
    },

    /// Build a URL from a path pattern
    Url {
        /// Pattern such as /users/:id/:section?
        pattern: String,

        /// Path parameter
        #[arg(short, long = "param", value_name = "KEY=VALUE", value_parser = parse_key_val)]
        params: Vec<(String, String)>,

        /// Query parameter
        #[arg(short, long = "query", value_name = "KEY=VALUE", value_parser = parse_key_val)]
        query: Vec<(String, String)>,
    },

    /// List the stored tabs
    Tabs {
        #[arg(short, long, value_name = "FILE")]
        config: PathBuf,

        #[arg(long, value_name = "DIR")]
        store_dir: Option<PathBuf>,
    },

    /// Follow the tab store and print the tab list whenever another
    /// process changes it
    Watch {
        #[arg(short, long, value_name = "FILE")]
        config: PathBuf,

        #[arg(long, value_name = "DIR")]
        store_dir: Option<PathBuf>,

        /// Debounce window for file change events
        #[arg(long, value_name = "MS", default_value_t = 100)]
        debounce_ms: u64,
    },

    /// Remove stored tabs
    Clear {
        #[arg(short, long, value_name = "FILE")]
        config: PathBuf,

        #[arg(long, value_name = "DIR")]
        store_dir: Option<PathBuf>,

        /// Remove every storage key containing this text instead of only
        /// the configured store's keys
        #[arg(long)]
        pattern: Option<String>,
    },
}

fn parse_key_val(s: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    if key.is_empty() {
        return Err(format!("empty key in '{}'", s));
    }
    Ok((key.to_string(), value.to_string()))
}

fn store_dir_for(config: &RouterTabsConfig, store_dir: Option<&Path>) -> PathBuf {
    store_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.effective_storage_dir())
}

fn open_store(
    config: &RouterTabsConfig,
    store_dir: Option<&Path>,
) -> Result<KeyedTabStore<TabRecord, FileStorage>> {
    let dir = store_dir_for(config, store_dir);
    let storage = FileStorage::open(&dir)
        .with_context(|| format!("opening tab store at {}", dir.display()))?;
    Ok(KeyedTabStore::new(config.store_key.clone(), storage))
}

fn load_config(path: &Path) -> Result<RouterTabsConfig> {
    RouterTabsConfig::load_from(path).with_context(|| format!("loading {}", path.display()))
}

/// Execute a parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Replay {
            config,
            store_dir,
            close_active,
            locations,
        } => replay(&config, store_dir.as_deref(), close_active, &locations),
        Commands::Url {
            pattern,
            params,
            query,
        } => {
            let params: Params = params.into_iter().collect();
            let query: Query = query.into_iter().collect();
            println!("{}", generate_route_url(&pattern, &params, &query));
            Ok(())
        }
        Commands::Tabs { config, store_dir } => {
            let config = load_config(&config)?;
            let store = open_store(&config, store_dir.as_deref())?;
            for record in store.get() {
                println!("{}", serde_json::to_string(&record)?);
            }
            if let Some(last) = store.get_last_focus_tab() {
                println!("last focused: {}", serde_json::to_string(&last)?);
            }
            Ok(())
        }
        Commands::Watch {
            config,
            store_dir,
            debounce_ms,
        } => watch(&config, store_dir.as_deref(), debounce_ms),
        Commands::Clear {
            config,
            store_dir,
            pattern,
        } => {
            let config = load_config(&config)?;
            let store = open_store(&config, store_dir.as_deref())?;
            match pattern {
                Some(pattern) => {
                    let removed = store.destroy_by_pattern(&pattern)?;
                    println!("Removed {} keys matching '{}'", removed, pattern);
                }
                None => {
                    store.destroy()?;
                    println!("Cleared tab store '{}'", config.store_key);
                }
            }
            Ok(())
        }
    }
}

fn replay(
    config_path: &Path,
    store_dir: Option<&Path>,
    close_active: bool,
    locations: &[String],
) -> Result<()> {
    let config = load_config(config_path)?;
    let store = open_store(&config, store_dir)?;
    let history = MemoryHistory::new();
    let mut engine = RouterTabsBuilder::from_config(&config, &TabFactoryRegistry::new())?
        .store(store)
        .navigator(history.clone())
        .on_add_tab(|tab| println!("+ {}", tab))
        .on_remove_tab(|tab| println!("- {}", tab))
        .on_focus_tab(|tab| println!("* {}", tab))
        .build();

    for location in locations {
        println!("> {}", location);
        engine.location_changed(location.as_str());
    }

    if close_active {
        match engine.active_tab().cloned() {
            Some(active) => {
                println!("x {}", active);
                engine.remove(&active)?;
            }
            None => println!("x (no active tab)"),
        }
    }

    println!();
    print_tabs(&engine);
    if let Some(current) = history.current() {
        println!("Location: {}", current);
    }
    Ok(())
}

fn watch(config_path: &Path, store_dir: Option<&Path>, debounce_ms: u64) -> Result<()> {
    let config = load_config(config_path)?;
    let dir = store_dir_for(&config, store_dir);
    let store = open_store(&config, Some(&dir))?;
    let mut engine = RouterTabsBuilder::from_config(&config, &TabFactoryRegistry::new())?
        .store(store)
        .build();
    let watcher = StorageWatcher::new(&dir, debounce_ms)
        .with_context(|| format!("watching {}", dir.display()))?;

    println!("Watching {} (Ctrl+C to stop)", dir.display());
    print_tabs(&engine);
    loop {
        let mut reloaded = false;
        while let Some(event) = watcher.try_recv() {
            reloaded |= engine.handle_storage_event(&event);
        }
        if reloaded {
            print_tabs(&engine);
        }
        std::thread::sleep(Duration::from_millis(debounce_ms.max(50)));
    }
}

fn print_tabs(engine: &crate::RouterTabs) {
    println!("Tabs ({}):", engine.tabs().len());
    for tab in engine.tabs() {
        let marker = if engine.active_tab() == Some(tab) { "*" } else { " " };
        println!("{} {}", marker, tab);
    }
}
