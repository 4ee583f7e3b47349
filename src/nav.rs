//! Sidebar grouping.
//!
//! Turns the flat manifest into sections for the tabbed sidebar and decides
//! which tab is open for a given page.
//!
//! ```text
//! Header(learn, Guides)      ┐
//! Link(intro)                ├─ Section learn: [intro, install]
//! Link(install)              ┘
//! Header(api, Reference)     ┐
//! Link(cli)                  ┘─ Section api:   [cli]
//! ```
//!
//! ## Active Section
//!
//! A section is active when the current page path *contains* one of its
//! child slugs. When several sections match, the last one in manifest order
//! wins. This is the opposite of [`crate::pagination::resolve`], which takes
//! the first matching link.

use crate::types::{NavEntry, Section};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum NavError {
    #[error("Invalid manifest: link '{slug}' at entry {index} appears before any section header")]
    OrphanLink { index: usize, slug: String },
}

/// Group manifest entries into sections.
///
/// Each header opens a new section and every following link is appended to
/// it. Order is preserved; nothing is merged or deduplicated.
pub fn group(entries: &[NavEntry]) -> Result<Vec<Section>, NavError> {
    let mut sections: Vec<Section> = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        match entry {
            NavEntry::SectionHeader(header) => sections.push(Section {
                kind: header.kind.clone(),
                label: header.label.clone(),
                children: Vec::new(),
            }),
            NavEntry::LinkItem(link) => match sections.last_mut() {
                Some(section) => section.children.push(link.clone()),
                None => {
                    return Err(NavError::OrphanLink {
                        index,
                        slug: link.slug.clone(),
                    });
                }
            },
        }
    }
    Ok(sections)
}

/// Sections tagged with `kind`, in order.
pub fn sections_of_type<'a>(
    sections: &'a [Section],
    kind: &'a str,
) -> impl Iterator<Item = &'a Section> + 'a {
    sections.iter().filter(move |s| s.kind == kind)
}

/// The last section with a child whose slug is contained in `current`.
///
/// `current` is expected to be normalized with [`normalize_page_path`].
/// Empty slugs never match.
pub fn active_section<'a>(sections: &'a [Section], current: &str) -> Option<&'a Section> {
    let mut active = None;
    for section in sections {
        if section
            .children
            .iter()
            .any(|child| !child.slug.is_empty() && current.contains(child.slug.as_str()))
        {
            active = Some(section);
        }
    }
    active
}

/// Type of the active section, or `default` when no section matches.
pub fn active_type<'a>(sections: &'a [Section], current: &str, default: &'a str) -> &'a str {
    active_section(sections, current)
        .map(|s| s.kind.as_str())
        .unwrap_or(default)
}

/// Strip leading and trailing `/` from a page path.
pub fn normalize_page_path(path: &str) -> &str {
    path.trim_matches('/')
}
