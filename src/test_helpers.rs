//! Shared test utilities for the simple-docs test suite.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let site = Site::load(tmp.path()).unwrap();
//!
//! let sections = group(&guide_entries()).unwrap();
//! assert_eq!(link_slugs(&sections[0].children), ["intro", "install"]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::types::{LinkItem, NavEntry};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Manifest builders
// =========================================================================

/// Two sections across two tabs:
///
/// ```text
/// Guides [learn]      intro, install
/// Reference [api]     cli
/// ```
pub fn guide_entries() -> Vec<NavEntry> {
    vec![
        NavEntry::header("learn", "Guides"),
        NavEntry::link("Introduction", "intro"),
        NavEntry::link("Install", "install"),
        NavEntry::header("api", "Reference"),
        NavEntry::link("CLI", "cli"),
    ]
}

/// Slugs of `links`, in order.
pub fn link_slugs(links: &[LinkItem]) -> Vec<&str> {
    links.iter().map(|l| l.slug.as_str()).collect()
}
