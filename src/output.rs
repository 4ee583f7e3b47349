//! CLI output formatting.
//!
//! Each command has a `format_*` function returning lines, so output can be
//! tested without capturing stdout, and a `print_*` wrapper that writes them.
//!
//! # Output Format
//!
//! ## Nav
//!
//! Links are numbered by their position in the flat manifest, which is also
//! the prev/next order:
//!
//! ```text
//! Guides [learn]
//!     001 Introduction (intro)
//!     002 Install (install)
//! Reference [api]
//!     003 CLI (cli)
//! ```
//!
//! ## Build
//!
//! ```text
//! en
//!     Widget Docs → en/index.html
//!     001 Install → en/install/index.html
//!
//! Generated 2 pages
//! ```

use crate::check::CheckReport;
use crate::generate::{GenerateReport, PageContext};
use crate::types::{LinkItem, Section};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn link_line(link: &LinkItem) -> String {
    format!("{} ({})", link.text, link.slug)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

// ============================================================================
// Nav
// ============================================================================

/// Format grouped sections, optionally only those of one type.
///
/// Numbering always counts every link, so it stays stable under filtering.
pub fn format_nav(sections: &[Section], kind: Option<&str>) -> Vec<String> {
    let mut lines = Vec::new();
    let mut position = 0;
    for section in sections {
        let shown = kind.is_none_or(|k| k == section.kind);
        if shown {
            lines.push(format!("{} [{}]", section.label, section.kind));
        }
        for child in &section.children {
            position += 1;
            if shown {
                lines.push(format!(
                    "{}{} {}",
                    indent(1),
                    format_index(position),
                    link_line(child)
                ));
            }
        }
    }
    lines
}

pub fn print_nav(sections: &[Section], kind: Option<&str>) {
    for line in format_nav(sections, kind) {
        println!("{}", line);
    }
}

/// Format the tab and prev/next links of one page.
pub fn format_page_context(context: &PageContext<'_>) -> Vec<String> {
    let describe = |link: Option<&LinkItem>| link.map(link_line).unwrap_or_else(|| "none".into());
    vec![
        format!("Page: {}", context.current_path),
        format!("{}Tab: {}", indent(1), context.active_tab),
        format!("{}Previous: {}", indent(1), describe(context.adjacent.previous)),
        format!("{}Next: {}", indent(1), describe(context.adjacent.next)),
    ]
}

pub fn print_page_context(context: &PageContext<'_>) {
    for line in format_page_context(context) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current_lang: Option<&str> = None;
    let mut position = 0;

    for page in &report.pages {
        if current_lang != Some(page.lang.as_str()) {
            if current_lang.is_some() {
                lines.push(String::new());
            }
            lines.push(page.lang.clone());
            current_lang = Some(page.lang.as_str());
            position = 0;
        }
        // Landing pages are unnumbered
        if page.slug.is_empty() {
            lines.push(format!("{}{} → {}", indent(1), page.title, page.output_path));
        } else {
            position += 1;
            lines.push(format!(
                "{}{} {} → {}",
                indent(1),
                format_index(position),
                page.title,
                page.output_path
            ));
        }
    }

    if report.assets_copied {
        lines.push(String::new());
        lines.push("Assets → assets/".to_string());
    }
    lines.push(String::new());
    lines.push(format!("Generated {}", plural(report.pages.len(), "page")));
    lines
}

pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

pub fn format_check_output(report: &CheckReport) -> Vec<String> {
    let mut lines = Vec::new();
    if !report.missing_pages.is_empty() {
        lines.push("Missing pages".to_string());
        for (lang, slug) in &report.missing_pages {
            lines.push(format!("{}{}/{}", indent(1), lang, slug));
        }
    }
    if !report.unlisted_pages.is_empty() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push("Not in navigation".to_string());
        for (lang, slug) in &report.unlisted_pages {
            lines.push(format!("{}{}/{}", indent(1), lang, slug));
        }
    }
    lines
}

pub fn print_check_output(report: &CheckReport) {
    for line in format_check_output(report) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::GeneratedPage;
    use crate::nav::group;
    use crate::pagination::AdjacentLinks;
    use crate::test_helpers::guide_entries;

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1000), "1000");
    }

    #[test]
    fn nav_lists_sections_with_global_numbering() {
        let sections = group(&guide_entries()).unwrap();
        let lines = format_nav(&sections, None);
        assert_eq!(
            lines,
            vec![
                "Guides [learn]",
                "    001 Introduction (intro)",
                "    002 Install (install)",
                "Reference [api]",
                "    003 CLI (cli)",
            ]
        );
    }

    #[test]
    fn nav_filter_keeps_numbering() {
        let sections = group(&guide_entries()).unwrap();
        let lines = format_nav(&sections, Some("api"));
        assert_eq!(lines, vec!["Reference [api]", "    003 CLI (cli)"]);
    }

    #[test]
    fn page_context_lines() {
        let links = crate::pagination::flatten(&guide_entries());
        let context = PageContext {
            current_path: "/en/intro/".to_string(),
            active_tab: "learn",
            adjacent: AdjacentLinks {
                previous: None,
                next: Some(&links[1]),
            },
        };
        let lines = format_page_context(&context);
        assert_eq!(lines[0], "Page: /en/intro/");
        assert_eq!(lines[1], "    Tab: learn");
        assert_eq!(lines[2], "    Previous: none");
        assert_eq!(lines[3], "    Next: Install (install)");
    }

    fn generated(lang: &str, slug: &str, title: &str, path: &str) -> GeneratedPage {
        GeneratedPage {
            lang: lang.to_string(),
            slug: slug.to_string(),
            title: title.to_string(),
            output_path: path.to_string(),
            active_tab: "learn".to_string(),
            previous: None,
            next: None,
        }
    }

    #[test]
    fn generate_output_groups_by_language() {
        let report = GenerateReport {
            pages: vec![
                generated("en", "", "Widget Docs", "en/index.html"),
                generated("en", "install", "Install", "en/install/index.html"),
                generated("fr", "intro", "Introduction", "fr/intro/index.html"),
            ],
            assets_copied: false,
        };
        let lines = format_generate_output(&report);
        assert_eq!(
            lines,
            vec![
                "en",
                "    Widget Docs → en/index.html",
                "    001 Install → en/install/index.html",
                "",
                "fr",
                "    001 Introduction → fr/intro/index.html",
                "",
                "Generated 3 pages",
            ]
        );
    }

    #[test]
    fn generate_output_mentions_assets() {
        let report = GenerateReport {
            pages: vec![generated("en", "", "Home", "en/index.html")],
            assets_copied: true,
        };
        let lines = format_generate_output(&report);
        assert!(lines.contains(&"Assets → assets/".to_string()));
        assert_eq!(lines.last().unwrap(), "Generated 1 page");
    }

    #[test]
    fn check_output_sections() {
        let report = CheckReport {
            missing_pages: vec![("fr".to_string(), "cli".to_string())],
            unlisted_pages: vec![("en".to_string(), "changelog".to_string())],
        };
        assert_eq!(
            format_check_output(&report),
            vec![
                "Missing pages",
                "    fr/cli",
                "",
                "Not in navigation",
                "    en/changelog",
            ]
        );
    }

    #[test]
    fn clean_check_has_no_output() {
        assert!(format_check_output(&CheckReport::default()).is_empty());
    }
}
