//! Previous/next article links.
//!
//! Pagination walks the manifest's links as one flat list, ignoring section
//! boundaries, so the last page of one section links forward to the first
//! page of the next.

use crate::types::{LinkItem, NavEntry};

/// Neighbours of the current page. Both are absent when the page is not in
/// the manifest (landing pages, unlisted pages).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdjacentLinks<'a> {
    pub previous: Option<&'a LinkItem>,
    pub next: Option<&'a LinkItem>,
}

impl AdjacentLinks<'_> {
    pub fn is_empty(&self) -> bool {
        self.previous.is_none() && self.next.is_none()
    }
}

/// All links of the manifest in order, headers dropped.
pub fn flatten(entries: &[NavEntry]) -> Vec<LinkItem> {
    entries
        .iter()
        .filter_map(|entry| match entry {
            NavEntry::LinkItem(link) => Some(link.clone()),
            NavEntry::SectionHeader(_) => None,
        })
        .collect()
}

/// Find the neighbours of `current_page` in `links`.
///
/// The first link whose slug is contained in `current_page` is taken as the
/// current position. An empty slug is contained in every path, so it
/// matches any page it is reached before.
pub fn resolve<'a>(links: &'a [LinkItem], current_page: &str) -> AdjacentLinks<'a> {
    let Some(index) = links
        .iter()
        .position(|link| current_page.contains(link.slug.as_str()))
    else {
        return AdjacentLinks::default();
    };

    AdjacentLinks {
        previous: index.checked_sub(1).map(|i| &links[i]),
        next: links.get(index + 1),
    }
}
