//! Navigation manifest loading.
//!
//! The manifest is `nav.toml` in the content root: one ordered list of
//! section headers and links describing the whole sidebar.
//!
//! ```toml
//! [[entries]]
//! type = "learn"
//! label = "Guides"
//!
//! [[entries]]
//! text = "Introduction"
//! slug = "intro"
//! ```
//!
//! It is loaded once per build, validated up front, and then only read.
//! Every page render borrows the same [`Manifest`].
//!
//! ## Validation
//!
//! - A link must not come before the first section header
//! - Slugs must be non-empty (ignoring surrounding `/`)
//! - Slugs must be unique

use crate::nav::{self, NavError};
use crate::pagination;
use crate::types::{LinkItem, NavEntry, Section};
use log::{debug, info};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const MANIFEST_FILE: &str = "nav.toml";

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error(transparent)]
    Nav(#[from] NavError),
    #[error("Navigation manifest not found: {0}")]
    NotFound(PathBuf),
    #[error("Link '{text}' at entry {index} has an empty slug")]
    EmptySlug { index: usize, text: String },
    #[error("Duplicate slug '{0}' in navigation manifest")]
    DuplicateSlug(String),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestFile {
    #[serde(default)]
    entries: Vec<NavEntry>,
}

/// Validated navigation manifest.
#[derive(Debug, Clone)]
pub struct Manifest {
    entries: Vec<NavEntry>,
    links: Vec<LinkItem>,
}

impl Manifest {
    /// Read and validate `nav.toml` from the content root.
    pub fn load(root: &Path) -> Result<Self, ManifestError> {
        let path = root.join(MANIFEST_FILE);
        if !path.exists() {
            return Err(ManifestError::NotFound(path));
        }
        let content = fs::read_to_string(&path)?;
        let manifest = Self::parse(&content)?;
        info!(
            "loaded {} ({} entries, {} links)",
            path.display(),
            manifest.entries.len(),
            manifest.links.len()
        );
        Ok(manifest)
    }

    pub fn parse(content: &str) -> Result<Self, ManifestError> {
        let file: ManifestFile = toml::from_str(content)?;
        Self::from_entries(file.entries)
    }

    pub fn from_entries(entries: Vec<NavEntry>) -> Result<Self, ManifestError> {
        nav::group(&entries)?;

        let mut seen = HashSet::new();
        for (index, entry) in entries.iter().enumerate() {
            let NavEntry::LinkItem(link) = entry else {
                continue;
            };
            if nav::normalize_page_path(&link.slug).is_empty() {
                return Err(ManifestError::EmptySlug {
                    index,
                    text: link.text.clone(),
                });
            }
            if !seen.insert(nav::normalize_page_path(&link.slug)) {
                return Err(ManifestError::DuplicateSlug(link.slug.clone()));
            }
        }

        let links = pagination::flatten(&entries);
        debug!("manifest validated: {} links", links.len());
        Ok(Self { entries, links })
    }

    pub fn entries(&self) -> &[NavEntry] {
        &self.entries
    }

    /// Links in manifest order, across all sections.
    pub fn links(&self) -> &[LinkItem] {
        &self.links
    }

    /// Group the manifest into sections. Built fresh on every call.
    pub fn sections(&self) -> Result<Vec<Section>, NavError> {
        nav::group(&self.entries)
    }
}
