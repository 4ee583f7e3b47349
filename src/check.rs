//! Consistency checks between the manifest and the content tree.
//!
//! Nothing here fails the build. A manifest link without a page is a broken
//! sidebar link in that language; a page without a manifest link is only
//! reachable by URL, which is fine for landing pages but usually an oversight
//! otherwise.

use crate::nav;
use crate::site::Site;
use log::warn;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    /// `(lang, slug)` of manifest links with no page.
    pub missing_pages: Vec<(String, String)>,
    /// `(lang, slug)` of pages no manifest link points to. Landing pages are
    /// not listed.
    pub unlisted_pages: Vec<(String, String)>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.missing_pages.is_empty() && self.unlisted_pages.is_empty()
    }
}

pub fn check(site: &Site) -> CheckReport {
    let mut report = CheckReport::default();
    let listed: HashSet<&str> = site
        .manifest
        .links()
        .iter()
        .map(|link| nav::normalize_page_path(&link.slug))
        .collect();

    for lang in &site.config.languages {
        let pages = site.pages_for(lang);
        let present: HashSet<&str> = pages.iter().map(|p| p.slug.as_str()).collect();

        for link in site.manifest.links() {
            let slug = nav::normalize_page_path(&link.slug);
            if !present.contains(slug) {
                warn!("{lang}: manifest link '{slug}' has no page");
                report.missing_pages.push((lang.clone(), slug.to_string()));
            }
        }

        for page in pages {
            if !page.slug.is_empty() && !listed.contains(page.slug.as_str()) {
                warn!("{lang}: page '{}' is not in the manifest", page.slug);
                report.unlisted_pages.push((lang.clone(), page.slug.clone()));
            }
        }
    }
    report
}
