//! HTML site generation.
//!
//! Renders every page of a loaded [`Site`] into static HTML.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html                 # Redirect to /<default_lang>/
//! ├── assets/                    # Copied from content/assets/ (if present)
//! └── en/
//!     ├── index.html             # Landing page (content/en/index.md)
//!     ├── intro/index.html
//!     └── guides/deploy/index.html
//! ```
//!
//! ## Page Layout
//!
//! Every page has the same three columns:
//!
//! - **Sidebar**: one tab per configured section type. The open tab is the
//!   type of the section matching the current page (see [`nav::active_type`]),
//!   or the configured default tab.
//! - **Content**: the rendered Markdown followed by prev/next links from
//!   [`pagination::resolve`]. Pages outside the manifest get no links.
//! - **On this page**: `##`/`###` headings of the page, omitted when empty.
//!
//! Tabs are radio inputs styled with CSS, so the output needs no JavaScript.
//!
//! ## Parallelism
//!
//! Pages are rendered on a rayon pool sized by `processing.max_processes`.
//! Every worker borrows the same [`Site`]; nothing is shared mutably.

use crate::config::{self, SiteConfig};
use crate::content::{Page, TocHeading};
use crate::i18n::Translator;
use crate::manifest::Manifest;
use crate::nav::{self, NavError};
use crate::pagination::{self, AdjacentLinks};
use crate::site::Site;
use crate::types::{LinkItem, Section};
use log::{debug, info};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use rayon::prelude::*;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Nav(#[from] NavError),
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

const CSS_STATIC: &str = include_str!("../static/style.css");

/// A link ready for templates: display text and site-absolute URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    pub text: String,
    pub link: String,
}

/// Build the URL for a manifest link: `/<lang>/<slug>/`.
pub fn page_link(lang: &str, item: &LinkItem) -> PageLink {
    PageLink {
        text: item.text.clone(),
        link: format!("/{}/{}/", lang, nav::normalize_page_path(&item.slug)),
    }
}

/// Navigation state of a single page.
#[derive(Debug, Clone)]
pub struct PageContext<'a> {
    pub current_path: String,
    pub active_tab: &'a str,
    pub adjacent: AdjacentLinks<'a>,
}

/// Work out the open tab and the prev/next links for `current_path`.
pub fn page_context<'a>(
    config: &'a SiteConfig,
    manifest: &'a Manifest,
    sections: &'a [Section],
    current_path: &str,
) -> PageContext<'a> {
    let active_tab = nav::active_type(
        sections,
        nav::normalize_page_path(current_path),
        &config.navigation.default_tab,
    );
    let adjacent = pagination::resolve(manifest.links(), current_path);
    PageContext {
        current_path: current_path.to_string(),
        active_tab,
        adjacent,
    }
}

/// One written page, for CLI output.
#[derive(Debug, Clone)]
pub struct GeneratedPage {
    pub lang: String,
    pub slug: String,
    pub title: String,
    pub output_path: String,
    pub active_tab: String,
    pub previous: Option<String>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct GenerateReport {
    pub pages: Vec<GeneratedPage>,
    pub assets_copied: bool,
}

pub fn generate(site: &Site, output_dir: &Path) -> Result<GenerateReport, GenerateError> {
    fs::create_dir_all(output_dir)?;

    let assets_dir = site.root.join("assets");
    let assets_copied = assets_dir.is_dir();
    if assets_copied {
        let target = output_dir.join("assets");
        fs::create_dir_all(&target)?;
        copy_dir_recursive(&assets_dir, &target)?;
        debug!("copied {} to {}", assets_dir.display(), target.display());
    }

    let redirect = render_root_redirect(&site.config.default_lang);
    fs::write(output_dir.join("index.html"), redirect.into_string())?;

    let pages: Vec<&Page> = site
        .config
        .languages
        .iter()
        .flat_map(|lang| site.pages_for(lang))
        .collect();

    let threads = config::effective_threads(&site.config.processing);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()?;
    info!("rendering {} page(s) on {threads} thread(s)", pages.len());

    let generated = pool.install(|| {
        pages
            .par_iter()
            .map(|page| write_page(site, page, output_dir))
            .collect::<Result<Vec<_>, GenerateError>>()
    })?;

    Ok(GenerateReport {
        pages: generated,
        assets_copied,
    })
}

fn write_page(site: &Site, page: &Page, output_dir: &Path) -> Result<GeneratedPage, GenerateError> {
    let sections = site.manifest.sections()?;
    let current_path = page.current_path();
    let context = page_context(&site.config, &site.manifest, &sections, &current_path);
    let markup = render_page(site, page, &sections, &context);

    let relative = page.output_path();
    let path = output_dir.join(&relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, markup.into_string())?;
    debug!("wrote {}", path.display());

    Ok(GeneratedPage {
        lang: page.lang.clone(),
        slug: page.slug.clone(),
        title: page.title.clone(),
        output_path: relative.to_string_lossy().replace('\\', "/"),
        active_tab: context.active_tab.to_string(),
        previous: context.adjacent.previous.map(|l| l.slug.clone()),
        next: context.adjacent.next.map(|l| l.slug.clone()),
    })
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// CSS showing the panel of the checked tab. One rule per configured tab.
fn tab_css(tabs: &[String]) -> String {
    tabs.iter()
        .map(|kind| {
            format!(
                "#tab-{kind}:checked ~ .tab-panel[data-tab=\"{kind}\"] {{ display: block; }}\n\
                 #tab-{kind}:checked + .tab-label {{ border-bottom-color: var(--color-accent); }}"
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, lang: &str, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(lang) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(CSS_STATIC)) "\n" (PreEscaped(css)) }
            }
            body {
                (content)
            }
        }
    }
}

/// Renders the tabbed sidebar.
///
/// Links pointing at the current page get `aria-current="page"`.
pub fn render_sidebar(
    site_title: &str,
    sections: &[Section],
    tabs: &[String],
    active_tab: &str,
    current_path: &str,
    t: Translator<'_>,
) -> Markup {
    let lang = t.lang();
    let current = nav::normalize_page_path(current_path);

    html! {
        nav.sidebar {
            a.site-title href={ "/" (lang) "/" } { (site_title) }
            div.tabs {
                @for kind in tabs {
                    @let id = format!("tab-{kind}");
                    @let label_key = format!("tab.{kind}");
                    input.tab-toggle type="radio" name="sidebar-tab" id=(id) checked[kind.as_str() == active_tab];
                    label.tab-label for=(id) { (t.t(&label_key)) }
                }
                @for kind in tabs {
                    div.tab-panel data-tab=(kind) {
                        @for section in nav::sections_of_type(sections, kind) {
                            (render_section(section, lang, current))
                        }
                    }
                }
            }
        }
    }
}

fn render_section(section: &Section, lang: &str, current: &str) -> Markup {
    html! {
        section.nav-section {
            h2.nav-section-label { (section.label) }
            ul {
                @for child in &section.children {
                    @let link = page_link(lang, child);
                    @let is_current = nav::normalize_page_path(&link.link) == current;
                    li {
                        a href=(link.link) aria-current=[is_current.then_some("page")] { (link.text) }
                    }
                }
            }
        }
    }
}

/// Renders the "On this page" list. Empty when the page has no headings.
pub fn render_toc(toc: &[TocHeading], t: Translator<'_>) -> Markup {
    html! {
        @if !toc.is_empty() {
            aside.toc {
                h2.toc-title { (t.t("toc.title")) }
                ul {
                    @for heading in toc {
                        li class={ "toc-level-" (heading.level) } {
                            a href={ "#" (heading.anchor) } { (heading.text) }
                        }
                    }
                }
            }
        }
    }
}

/// Renders prev/next links. Empty when the page has neither.
pub fn render_pagination(adjacent: &AdjacentLinks<'_>, t: Translator<'_>) -> Markup {
    let lang = t.lang();
    html! {
        @if !adjacent.is_empty() {
            nav.pagination {
                @if let Some(previous) = adjacent.previous {
                    @let link = page_link(lang, previous);
                    a.pagination-prev href=(link.link) rel="prev" {
                        span.pagination-label { (t.t("pagination.previous")) }
                        span.pagination-title { (link.text) }
                    }
                }
                @if let Some(next) = adjacent.next {
                    @let link = page_link(lang, next);
                    a.pagination-next href=(link.link) rel="next" {
                        span.pagination-label { (t.t("pagination.next")) }
                        span.pagination-title { (link.text) }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders a documentation page: sidebar, content, pagination and ToC.
pub fn render_page(
    site: &Site,
    page: &Page,
    sections: &[Section],
    context: &PageContext<'_>,
) -> Markup {
    let t = site.translations.for_lang(&page.lang);
    let css = tab_css(&site.config.navigation.tabs);
    let page_title = if page.slug.is_empty() {
        site.config.title.clone()
    } else {
        format!("{} - {}", page.title, site.config.title)
    };

    let content = html! {
        div.layout {
            (render_sidebar(
                &site.config.title,
                sections,
                &site.config.navigation.tabs,
                context.active_tab,
                &context.current_path,
                t,
            ))
            main.page-content {
                article.content {
                    (PreEscaped(&page.html))
                }
                (render_pagination(&context.adjacent, t))
            }
            (render_toc(&page.toc, t))
        }
    };

    base_document(&page_title, &page.lang, &css, content)
}

/// Renders the site root, which forwards to the default language.
fn render_root_redirect(default_lang: &str) -> Markup {
    let target = format!("/{default_lang}/");
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="UTF-8";
                meta http-equiv="refresh" content={ "0; url=" (target) };
                link rel="canonical" href=(target);
                title { "Redirecting" }
            }
            body {
                a href=(target) { (target) }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Translations;
    use crate::test_helpers::{guide_entries, setup_fixtures};

    fn guide_manifest() -> Manifest {
        Manifest::from_entries(guide_entries()).unwrap()
    }

    fn translations() -> Translations {
        Translations::from_config(&SiteConfig::default())
    }

    #[test]
    fn page_link_prefixes_language() {
        let link = page_link(
            "fr",
            &LinkItem {
                text: "Deploy".to_string(),
                slug: "guides/deploy".to_string(),
            },
        );
        assert_eq!(link.link, "/fr/guides/deploy/");
        assert_eq!(link.text, "Deploy");
    }

    #[test]
    fn context_for_listed_page() {
        let config = SiteConfig::default();
        let manifest = guide_manifest();
        let sections = manifest.sections().unwrap();

        let context = page_context(&config, &manifest, &sections, "/en/cli/");
        assert_eq!(context.active_tab, "api");
        assert_eq!(context.adjacent.previous.unwrap().slug, "install");
        assert!(context.adjacent.next.is_none());
    }

    #[test]
    fn context_for_unlisted_page_uses_default_tab() {
        let mut config = SiteConfig::default();
        config.navigation.default_tab = "api".to_string();
        let manifest = guide_manifest();
        let sections = manifest.sections().unwrap();

        let context = page_context(&config, &manifest, &sections, "/en/");
        assert_eq!(context.active_tab, "api");
        assert!(context.adjacent.is_empty());
    }

    #[test]
    fn sidebar_checks_active_tab() {
        let manifest = guide_manifest();
        let sections = manifest.sections().unwrap();
        let tabs = vec!["learn".to_string(), "api".to_string()];
        let translations = translations();

        let html = render_sidebar(
            "Docs",
            &sections,
            &tabs,
            "api",
            "/en/cli/",
            translations.for_lang("en"),
        )
        .into_string();

        assert!(html.contains(r#"id="tab-api" checked"#));
        assert!(!html.contains(r#"id="tab-learn" checked"#));
        assert!(html.contains("API"));
        assert!(html.contains("Learn"));
    }

    #[test]
    fn sidebar_marks_current_link() {
        let manifest = guide_manifest();
        let sections = manifest.sections().unwrap();
        let tabs = vec!["learn".to_string(), "api".to_string()];
        let translations = translations();

        let html = render_sidebar(
            "Docs",
            &sections,
            &tabs,
            "learn",
            "/en/install/",
            translations.for_lang("en"),
        )
        .into_string();

        assert!(html.contains(r#"href="/en/install/" aria-current="page""#));
        assert_eq!(html.matches("aria-current").count(), 1);
    }

    #[test]
    fn sidebar_omits_sections_of_unconfigured_types() {
        let manifest = guide_manifest();
        let sections = manifest.sections().unwrap();
        let tabs = vec!["learn".to_string()];
        let translations = translations();

        let html = render_sidebar("Docs", &sections, &tabs, "learn", "/en/", translations.for_lang("en"))
            .into_string();
        assert!(html.contains("Guides"));
        assert!(!html.contains("Reference"));
    }

    #[test]
    fn untranslated_tab_label_shows_key() {
        let sections: Vec<Section> = vec![];
        let tabs = vec!["recipes".to_string()];
        let translations = translations();
        let html = render_sidebar("Docs", &sections, &tabs, "recipes", "/en/", translations.for_lang("en"))
            .into_string();
        assert!(html.contains("tab.recipes"));
    }

    #[test]
    fn toc_rendered_with_translated_title() {
        let toc = vec![TocHeading {
            level: 2,
            text: "Setup".to_string(),
            anchor: "setup".to_string(),
        }];
        let translations = translations();
        let html = render_toc(&toc, translations.for_lang("en")).into_string();
        assert!(html.contains("On this page"));
        assert!(html.contains(r##"href="#setup""##));
        assert!(html.contains("toc-level-2"));
    }

    #[test]
    fn empty_toc_renders_nothing() {
        let translations = translations();
        assert!(render_toc(&[], translations.for_lang("en")).into_string().is_empty());
    }

    #[test]
    fn pagination_links() {
        let manifest = guide_manifest();
        let translations = translations();
        let adjacent = pagination::resolve(manifest.links(), "/en/install/");

        let html = render_pagination(&adjacent, translations.for_lang("en")).into_string();
        assert!(html.contains(r#"href="/en/intro/" rel="prev""#));
        assert!(html.contains(r#"href="/en/cli/" rel="next""#));
        assert!(html.contains("Previous"));
        assert!(html.contains("Next"));
    }

    #[test]
    fn pagination_omitted_without_links() {
        let translations = translations();
        let html = render_pagination(&AdjacentLinks::default(), translations.for_lang("en"))
            .into_string();
        assert!(html.is_empty());
    }

    #[test]
    fn html_escape_in_maud() {
        let manifest = Manifest::from_entries(vec![
            crate::types::NavEntry::header("learn", "<b>Guides</b>"),
            crate::types::NavEntry::link("<script>alert('xss')</script>", "xss"),
        ])
        .unwrap();
        let sections = manifest.sections().unwrap();
        let tabs = vec!["learn".to_string()];
        let translations = translations();
        let html = render_sidebar("Docs", &sections, &tabs, "learn", "/en/", translations.for_lang("en"))
            .into_string();

        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&lt;b&gt;Guides"));
    }

    #[test]
    fn tab_css_has_rule_per_tab() {
        let css = tab_css(&["learn".to_string(), "api".to_string()]);
        assert!(css.contains(r#"#tab-learn:checked ~ .tab-panel[data-tab="learn"]"#));
        assert!(css.contains(r#"#tab-api:checked ~ .tab-panel[data-tab="api"]"#));
    }

    #[test]
    fn root_redirect_targets_default_language() {
        let html = render_root_redirect("fr").into_string();
        assert!(html.contains(r#"content="0; url=/fr/""#));
    }

    #[test]
    fn generate_writes_fixture_site() {
        let tmp = setup_fixtures();
        let site = Site::load(tmp.path()).unwrap();
        let out = tempfile::TempDir::new().unwrap();

        let report = generate(&site, out.path()).unwrap();
        assert_eq!(report.pages.len(), site.page_count());
        assert!(out.path().join("index.html").exists());
        assert!(out.path().join("en/index.html").exists());
        assert!(out.path().join("en/guides/deploy/index.html").exists());
        assert!(out.path().join("fr/intro/index.html").exists());

        let deploy = report
            .pages
            .iter()
            .find(|p| p.lang == "en" && p.slug == "guides/deploy")
            .unwrap();
        assert_eq!(deploy.active_tab, "learn");
        assert_eq!(deploy.previous.as_deref(), Some("install"));
        assert_eq!(deploy.next.as_deref(), Some("cli"));
    }
}
