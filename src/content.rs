//! Markdown page discovery and rendering.
//!
//! Pages live under one directory per language. The path below the language
//! directory, without `.md`, is the page slug:
//!
//! ```text
//! content/
//! ├── config.toml
//! ├── nav.toml
//! └── en/
//!     ├── index.md                 # slug ""         → /en/
//!     ├── intro.md                 # slug "intro"    → /en/intro/
//!     └── guides/
//!         └── deploy.md            # slug "guides/deploy" → /en/guides/deploy/
//! ```
//!
//! Rendering happens here, once per page: the HTML body, the title (first
//! `#` heading) and the "On this page" headings (`##` and `###`) with anchor
//! ids.

use log::{debug, warn};
use pulldown_cmark::{CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("No content directory for language '{lang}': {path}")]
    MissingLanguage { lang: String, path: PathBuf },
}

/// A rendered documentation page.
#[derive(Debug, Clone)]
pub struct Page {
    pub lang: String,
    /// Path below the language directory, `/`-separated, without extension.
    /// Empty for the language landing page.
    pub slug: String,
    /// First `#` heading, or a title derived from the slug.
    pub title: String,
    /// Source file relative to the content root.
    pub source_path: String,
    pub html: String,
    pub toc: Vec<TocHeading>,
}

/// An entry of the "On this page" list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocHeading {
    pub level: u8,
    pub text: String,
    pub anchor: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMarkdown {
    pub html: String,
    pub title: Option<String>,
    pub toc: Vec<TocHeading>,
}

impl Page {
    /// Site path of the page, e.g. `/en/guides/deploy/`.
    pub fn current_path(&self) -> String {
        if self.slug.is_empty() {
            format!("/{}/", self.lang)
        } else {
            format!("/{}/{}/", self.lang, self.slug)
        }
    }

    /// Output file relative to the output directory.
    pub fn output_path(&self) -> PathBuf {
        let mut path = PathBuf::from(&self.lang);
        for segment in self.slug.split('/').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.join("index.html")
    }
}

/// Find and render every page of one language.
///
/// Pages are returned sorted by source path.
pub fn scan_pages(root: &Path, lang: &str) -> Result<Vec<Page>, ContentError> {
    let lang_dir = root.join(lang);
    if !lang_dir.is_dir() {
        return Err(ContentError::MissingLanguage {
            lang: lang.to_string(),
            path: lang_dir,
        });
    }

    let mut pages = Vec::new();
    for entry in WalkDir::new(&lang_dir).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type().is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some("md") {
            warn!("skipping non-markdown file {}", path.display());
            continue;
        }

        let relative = path.strip_prefix(&lang_dir).unwrap_or(path);
        let slug = slug_from_path(relative);
        let body = fs::read_to_string(path)?;
        let rendered = render_markdown(&body);
        let title = rendered.title.unwrap_or_else(|| fallback_title(&slug));
        let source_path = path
            .strip_prefix(root)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/");

        debug!("found page {source_path} (slug '{slug}')");
        pages.push(Page {
            lang: lang.to_string(),
            slug,
            title,
            source_path,
            html: rendered.html,
            toc: rendered.toc,
        });
    }
    Ok(pages)
}

/// `guides/deploy.md` → `guides/deploy`; `index.md` → `""`; `guides/index.md` → `guides`.
fn slug_from_path(relative: &Path) -> String {
    let mut segments: Vec<String> = relative
        .with_extension("")
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if segments.last().is_some_and(|s| s == "index") {
        segments.pop();
    }
    segments.join("/")
}

/// Title for pages without a `#` heading: last slug segment, dashes → spaces.
fn fallback_title(slug: &str) -> String {
    match slug.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => segment.replace('-', " "),
        _ => "Home".to_string(),
    }
}

fn markdown_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_HEADING_ATTRIBUTES
}

/// Render Markdown to HTML, giving every heading an anchor id.
///
/// Explicit ids (`## Setup {#setup}`) are kept. Others are generated with
/// [`heading_anchor`] and made unique within the page.
pub fn render_markdown(body: &str) -> RenderedMarkdown {
    let mut events: Vec<Event<'_>> = Parser::new_ext(body, markdown_options()).collect();
    let mut used: HashMap<String, usize> = HashMap::new();
    let mut title = None;
    let mut toc = Vec::new();

    for i in 0..events.len() {
        let (level, explicit_id) = match &events[i] {
            Event::Start(Tag::Heading { level, id, .. }) => {
                (*level, id.as_ref().map(|id| id.to_string()))
            }
            _ => continue,
        };
        let text = heading_text(&events[i + 1..]);
        let anchor = match explicit_id {
            Some(id) => {
                used.entry(id.clone()).or_insert(0);
                id
            }
            None => unique_anchor(&mut used, heading_anchor(&text)),
        };
        if let Event::Start(Tag::Heading { id, .. }) = &mut events[i] {
            *id = Some(CowStr::from(anchor.clone()));
        }

        match level {
            HeadingLevel::H1 if title.is_none() => title = Some(text),
            HeadingLevel::H2 => toc.push(TocHeading {
                level: 2,
                text,
                anchor,
            }),
            HeadingLevel::H3 => toc.push(TocHeading {
                level: 3,
                text,
                anchor,
            }),
            _ => {}
        }
    }

    let mut out = String::with_capacity(body.len() * 3 / 2);
    html::push_html(&mut out, events.into_iter());
    RenderedMarkdown {
        html: out,
        title,
        toc,
    }
}

/// Plain text of a heading, from the events following its start tag.
fn heading_text(events: &[Event<'_>]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::End(TagEnd::Heading(_)) => break,
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            _ => {}
        }
    }
    text.trim().to_string()
}

/// Anchor id for a heading: lowercase ASCII letters and digits, with every
/// other run of characters collapsed to a single `-`.
pub fn heading_anchor(text: &str) -> String {
    let mut anchor = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !anchor.is_empty() {
                anchor.push('-');
            }
            pending_dash = false;
            anchor.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    if anchor.is_empty() {
        "section".to_string()
    } else {
        anchor
    }
}

fn unique_anchor(used: &mut HashMap<String, usize>, base: String) -> String {
    match used.get_mut(&base) {
        None => {
            used.insert(base.clone(), 0);
            base
        }
        Some(count) => {
            *count += 1;
            let candidate = format!("{base}-{count}");
            // A later explicit or generated id could already hold the suffixed name.
            unique_anchor(used, candidate)
        }
    }
}
