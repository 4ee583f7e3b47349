//! Shared navigation types.
//!
//! The manifest on disk is a flat list of entries. Each entry is either a
//! section header or a link, told apart by its fields:
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

use serde::{Deserialize, Serialize};

/// One entry of the navigation manifest.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum NavEntry {
    /// Starts a new section; following links belong to it.
    SectionHeader(SectionHeader),
    /// A single page link.
    LinkItem(LinkItem),
}

/// Marks the start of a section. `kind` is the category tag used for tabs
/// (e.g. `"learn"` or `"api"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionHeader {
    #[serde(rename = "type")]
    pub kind: String,
    pub label: String,
}

/// A navigation link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinkItem {
    /// Display text.
    pub text: String,
    /// Path fragment identifying the page, unique within a manifest.
    pub slug: String,
}

/// A header together with the links that follow it, in manifest order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    #[serde(rename = "type")]
    pub kind: String,
    pub label: String,
    pub children: Vec<LinkItem>,
}

impl NavEntry {
    pub fn header(kind: &str, label: &str) -> Self {
        NavEntry::SectionHeader(SectionHeader {
            kind: kind.to_string(),
            label: label.to_string(),
        })
    }

    pub fn link(text: &str, slug: &str) -> Self {
        NavEntry::LinkItem(LinkItem {
            text: text.to_string(),
            slug: slug.to_string(),
        })
    }
}
