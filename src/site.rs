//! Everything a build needs, loaded once from the content root.
//!
//! [`Site::load`] reads the config, the navigation manifest and every page
//! of every configured language. The result is never mutated afterwards;
//! rendering and checking only borrow it.

use crate::config::{self, ConfigError, SiteConfig};
use crate::content::{self, ContentError, Page};
use crate::i18n::Translations;
use crate::manifest::{Manifest, ManifestError};
use crate::types::NavEntry;
use log::info;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),
    #[error("Content error: {0}")]
    Content(#[from] ContentError),
    #[error("Section '{label}' has type '{kind}', which is not one of navigation.tabs")]
    UntabbedSection { kind: String, label: String },
}

/// Every section header must name a configured tab; otherwise its links
/// would never appear in the sidebar.
pub fn check_section_tabs(config: &SiteConfig, manifest: &Manifest) -> Result<(), SiteError> {
    let untabbed = manifest.entries().iter().find_map(|entry| match entry {
        NavEntry::SectionHeader(header) if !config.navigation.tabs.contains(&header.kind) => {
            Some(header)
        }
        _ => None,
    });
    match untabbed {
        Some(header) => Err(SiteError::UntabbedSection {
            kind: header.kind.clone(),
            label: header.label.clone(),
        }),
        None => Ok(()),
    }
}

#[derive(Debug)]
pub struct Site {
    pub root: PathBuf,
    pub config: SiteConfig,
    pub manifest: Manifest,
    pub translations: Translations,
    /// Pages per language, keyed by language code.
    pub pages: BTreeMap<String, Vec<Page>>,
}

impl Site {
    pub fn load(root: &Path) -> Result<Self, SiteError> {
        let config = config::load_config(root)?;
        let manifest = Manifest::load(root)?;
        check_section_tabs(&config, &manifest)?;
        let translations = Translations::from_config(&config);

        let mut pages = BTreeMap::new();
        for lang in &config.languages {
            let lang_pages = content::scan_pages(root, lang)?;
            info!("{lang}: {} page(s)", lang_pages.len());
            pages.insert(lang.clone(), lang_pages);
        }

        Ok(Self {
            root: root.to_path_buf(),
            config,
            manifest,
            translations,
            pages,
        })
    }

    /// Pages of one language; empty if the language is not built.
    pub fn pages_for(&self, lang: &str) -> &[Page] {
        self.pages.get(lang).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn page_count(&self) -> usize {
        self.pages.values().map(Vec::len).sum()
    }

    /// Find a page by site path, e.g. `/en/guides/deploy/`.
    pub fn find_page(&self, path: &str) -> Option<&Page> {
        let wanted = crate::nav::normalize_page_path(path);
        self.pages
            .values()
            .flatten()
            .find(|page| crate::nav::normalize_page_path(&page.current_path()) == wanted)
    }
}
