//! # Simple Docs
//!
//! A minimal static site generator for documentation sites. Markdown pages
//! are rendered with a tabbed sidebar, an "On this page" list and prev/next
//! links, all driven by one ordered navigation manifest.
//!
//! # Content Layout
//!
//! ```text
//! content/
//! ├── config.toml        # Site config (optional)
//! ├── nav.toml           # Navigation manifest: section headers and links
//! ├── assets/            # Copied to the output root
//! ├── en/
//! │   ├── index.md       # Landing page → /en/
//! │   ├── intro.md       # → /en/intro/
//! │   └── guides/
//! │       └── deploy.md  # → /en/guides/deploy/
//! └── fr/
//!     └── ...
//! ```
//!
//! # Navigation
//!
//! The manifest is a flat list where each link belongs to the section header
//! before it. Two independent views are derived from it for every page:
//!
//! - [`nav`] groups it into sections, filters them by type into sidebar tabs,
//!   and picks the open tab. When several sections match the current page,
//!   the **last** one wins.
//! - [`pagination`] flattens it into one list of links and finds the
//!   previous and next page. When several links match, the **first** one wins.
//!
//! Matching in both is containment, not equality: a link is "current" when
//! the page path contains its slug.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | `NavEntry`, `LinkItem`, `Section` |
//! | [`nav`] | Section grouping, type filtering, active-tab detection |
//! | [`pagination`] | Prev/next link resolution |
//! | [`manifest`] | `nav.toml` loading and validation |
//! | [`config`] | `config.toml` loading, merging over stock defaults, validation |
//! | [`i18n`] | UI string lookup with fallbacks |
//! | [`content`] | Page discovery and Markdown rendering |
//! | [`site`] | Loads config, manifest and pages once per build |
//! | [`generate`] | Maud templates and parallel HTML output |
//! | [`check`] | Manifest/content consistency warnings |
//! | [`output`] | CLI output formatting |

pub mod check;
pub mod config;
pub mod content;
pub mod generate;
pub mod i18n;
pub mod manifest;
pub mod nav;
pub mod output;
pub mod pagination;
pub mod site;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
