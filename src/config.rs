//! `config.toml`: site title, languages, sidebar tabs, UI strings.
//!
//! The file in the content root is one layer over the built-in defaults, so
//! it only names the keys it changes. Defaults:
//!
//! ```toml
//! title = "Documentation"
//! default_lang = "en"
//! languages = ["en"]
//!
//! [navigation]
//! default_tab = "learn"      # Tab shown when the page matches no section
//! tabs = ["learn", "api"]    # Sidebar tabs, by section type
//!
//! [processing]
//! # max_processes = 4        # unset: one render thread per core
//!
//! [strings.en]
//! "toc.title" = "On this page"
//! "pagination.previous" = "Previous"
//! "pagination.next" = "Next"
//! "tab.learn" = "Learn"
//! "tab.api" = "API"
//! ```
//!
//! String tables merge key by key: adding one translation keeps the stock
//! ones. Unknown keys are errors.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site title, used in `<title>` and the sidebar header.
    pub title: String,
    /// Language the root `index.html` redirects to, and the translation fallback.
    pub default_lang: String,
    /// Languages to build. Each needs a `content/<lang>/` directory.
    pub languages: Vec<String>,
    /// Sidebar tab settings.
    pub navigation: NavigationConfig,
    /// Parallel rendering settings.
    pub processing: ProcessingConfig,
    /// UI strings per language: `strings.<lang>.<key>`.
    pub strings: BTreeMap<String, BTreeMap<String, String>>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Documentation".to_string(),
            default_lang: "en".to_string(),
            languages: vec!["en".to_string()],
            navigation: NavigationConfig::default(),
            processing: ProcessingConfig::default(),
            strings: BTreeMap::from([("en".to_string(), default_english_strings())]),
        }
    }
}

fn default_english_strings() -> BTreeMap<String, String> {
    [
        ("toc.title", "On this page"),
        ("pagination.previous", "Previous"),
        ("pagination.next", "Next"),
        ("tab.learn", "Learn"),
        ("tab.api", "API"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

impl SiteConfig {
    /// Cross-field checks that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::Validation("title must not be empty".into()));
        }
        if self.languages.is_empty() {
            return Err(ConfigError::Validation(
                "languages must not be empty".into(),
            ));
        }
        if !self.languages.contains(&self.default_lang) {
            return Err(ConfigError::Validation(format!(
                "default_lang '{}' is not listed in languages",
                self.default_lang
            )));
        }
        if self.navigation.tabs.is_empty() {
            return Err(ConfigError::Validation(
                "navigation.tabs must not be empty".into(),
            ));
        }
        if let Some(tab) = self.navigation.tabs.iter().find(|t| !is_tab_name(t)) {
            return Err(ConfigError::Validation(format!(
                "navigation.tabs: '{tab}' may only contain ASCII letters, digits and '-'"
            )));
        }
        if !self.navigation.tabs.contains(&self.navigation.default_tab) {
            return Err(ConfigError::Validation(format!(
                "navigation.default_tab '{}' is not listed in navigation.tabs",
                self.navigation.default_tab
            )));
        }
        Ok(())
    }
}

/// Tab names end up in element ids and CSS selectors.
fn is_tab_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Sidebar tab settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavigationConfig {
    /// Section type of the tab open when no section matches the page.
    pub default_tab: String,
    /// Section types shown as tabs, in display order.
    pub tabs: Vec<String>,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            default_tab: "learn".to_string(),
            tabs: vec!["learn".to_string(), "api".to_string()],
        }
    }
}

/// Render pool settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Upper bound on render threads; unset means one per core.
    pub max_processes: Option<usize>,
}

/// Render threads to start: `max_processes` clamped to `1..=cores`.
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Layered loading
// =============================================================================

const CONFIG_FILE: &str = "config.toml";

/// The built-in defaults, as the bottom TOML layer.
pub fn defaults_layer() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(SiteConfig::default())?)
}

/// Lay `upper` over `lower`. Tables combine per key; any other value in
/// `upper` wins outright, arrays included.
pub fn merge_toml(lower: toml::Value, upper: toml::Value) -> toml::Value {
    match (lower, upper) {
        (toml::Value::Table(mut table), toml::Value::Table(layer)) => {
            for (key, value) in layer {
                let combined = match table.remove(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => value,
                };
                table.insert(key, combined);
            }
            toml::Value::Table(table)
        }
        (_, upper) => upper,
    }
}

/// Parse `config.toml` in `dir`, if there is one.
fn read_layer(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let path = dir.join(CONFIG_FILE);
    if !path.is_file() {
        debug!("no {CONFIG_FILE} in {}, using defaults", dir.display());
        return Ok(None);
    }
    Ok(Some(toml::from_str(&fs::read_to_string(&path)?)?))
}

/// Deserialize a fully merged layer stack and validate it.
pub fn config_from_layers(
    layers: impl IntoIterator<Item = toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = layers
        .into_iter()
        .reduce(merge_toml)
        .unwrap_or_else(|| toml::Value::Table(toml::map::Map::new()));
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the site config: stock defaults with `config.toml` laid over them.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let mut layers = vec![defaults_layer()?];
    layers.extend(read_layer(root)?);
    let config = config_from_layers(layers)?;
    debug!(
        "config resolved: {} language(s), tabs {:?}",
        config.languages.len(),
        config.navigation.tabs
    );
    Ok(config)
}

/// Annotated default `config.toml`, printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# Simple Docs Configuration
# =========================
# Every key is optional; the values below are the built-in defaults.
# Misspelled keys are reported as errors.

# Site title, shown in the sidebar and page titles.
title = "Documentation"

# Language the site root redirects to. Also the fallback for missing strings.
default_lang = "en"

# Languages to build. Each one reads pages from content/<lang>/.
languages = ["en"]

# ---------------------------------------------------------------------------
# Sidebar navigation
# ---------------------------------------------------------------------------
[navigation]
# Section type whose tab is open when the page is not in any section.
default_tab = "learn"

# Section types shown as sidebar tabs, in order. Tab labels come from the
# "tab.<type>" string.
tabs = ["learn", "api"]

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel render workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4

# ---------------------------------------------------------------------------
# UI strings, per language
# ---------------------------------------------------------------------------
[strings.en]
"toc.title" = "On this page"
"pagination.previous" = "Previous"
"pagination.next" = "Next"
"tab.learn" = "Learn"
"tab.api" = "API"
"##
}
