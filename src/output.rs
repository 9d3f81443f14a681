//! CLI output formatting for all pipeline stages.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every entity (publication, course, page) is its semantic identity —
//! title and positional index — with source files shown as secondary
//! context via indented `Source:` lines. This makes the output readable as
//! a content inventory while still letting users trace data back to
//! specific files.
//!
//! # Output Format
//!
//! ## Load
//!
//! ```text
//! Profile
//!     Ada Lovelace (Professor of Computing, Analytical Engine Institute)
//!     Source: profile.toml
//!
//! Publications (3)
//!     001 Attention Is Not Always Needed (2021, Conference)
//!     002 Explainable AI for Healthcare (2023, Journal)
//!     Source: publications.toml
//! ```
//!
//! ## Index
//!
//! ```text
//! Corpus
//!     9 entries (3 publications, 2 courses, 2 experience, 2 news)
//! Facets
//!     Years: 2024, 2023, 2021
//!     Kinds: Publication, Course, Experience, News
//! ```
//!
//! ## Generate
//!
//! ```text
//! Home → index.html
//! Publications → publications/index.html (3 publication pages)
//! Teaching → teaching.html
//!
//! Generated 5 pages, 3 publication pages, 2 assets
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::generate::GenerateSummary;
use crate::index::SearchIndex;
use crate::load::Manifest;
use crate::search::{ContentKind, SearchEntry};

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index_number(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Format an entity line: positional index + title, with optional detail.
///
/// ```text
/// 001 Explainable AI for Healthcare (2023, Journal)
/// 002 research
/// ```
fn entity_line(index: usize, title: &str, detail: Option<&str>) -> String {
    match detail {
        Some(d) => format!("    {} {} ({})", format_index_number(index), title, d),
        None => format!("    {} {}", format_index_number(index), title),
    }
}

/// Section header with an optional entity count.
fn section_header(name: &str, count: Option<usize>) -> String {
    match count {
        Some(n) => format!("{} ({})", name, n),
        None => name.to_string(),
    }
}

// ============================================================================
// Stage 1: Load output
// ============================================================================

/// Format load stage output showing the discovered content inventory.
///
/// Information-first: each record leads with its positional index and
/// title. Source files are shown as indented context lines per section.
pub fn format_load_output(manifest: &Manifest) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Profile".to_string());
    lines.push(format!(
        "    {} ({}, {})",
        manifest.profile.name, manifest.profile.title, manifest.profile.affiliation
    ));
    lines.push("    Source: profile.toml".to_string());

    if !manifest.publications.is_empty() {
        lines.push(String::new());
        lines.push(section_header("Publications", Some(manifest.publications.len())));
        for (i, p) in manifest.publications.iter().enumerate() {
            let detail = format!("{}, {}", p.year, p.kind.label());
            lines.push(entity_line(i + 1, &p.title, Some(&detail)));
        }
        lines.push("    Source: publications.toml".to_string());
    }

    if !manifest.courses.is_empty() {
        lines.push(String::new());
        lines.push(section_header("Teaching", Some(manifest.courses.len())));
        for (i, c) in manifest.courses.iter().enumerate() {
            let title = format!("{} {}", c.code, c.title);
            let detail = format!("{} {}", c.term, c.year);
            lines.push(entity_line(i + 1, &title, Some(&detail)));
        }
        lines.push("    Source: teaching.toml".to_string());
    }

    if !manifest.experience.is_empty() {
        lines.push(String::new());
        lines.push(section_header("Experience", Some(manifest.experience.len())));
        for (i, e) in manifest.experience.iter().enumerate() {
            let title = format!("{}, {}", e.role, e.institution);
            lines.push(entity_line(i + 1, &title, Some(&e.span())));
        }
        lines.push("    Source: experience.toml".to_string());
    }

    if !manifest.news.is_empty() {
        lines.push(String::new());
        lines.push(section_header("News", Some(manifest.news.len())));
        for (i, n) in manifest.news.iter().enumerate() {
            lines.push(entity_line(i + 1, &n.title, Some(&n.date)));
        }
        lines.push("    Source: news.toml".to_string());
    }

    if !manifest.pages.is_empty() {
        lines.push(String::new());
        lines.push("Pages".to_string());
        for (i, page) in manifest.pages.iter().enumerate() {
            let link_marker = if page.is_link { " (link)" } else { "" };
            lines.push(format!(
                "    {} {}{}",
                format_index_number(i + 1),
                page.title,
                link_marker
            ));
            lines.push(format!("        Source: {}.md", page.slug));
        }
    }

    lines
}

/// Print load output to stdout.
pub fn print_load_output(manifest: &Manifest) {
    for line in format_load_output(manifest) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 2: Index output
// ============================================================================

/// Format index stage output: corpus size per kind and the derived facets.
pub fn format_index_output(index: &SearchIndex) -> Vec<String> {
    let count = |kind: ContentKind| index.entries.iter().filter(|e| e.kind == kind).count();

    let mut lines = Vec::new();
    lines.push("Corpus".to_string());
    lines.push(format!(
        "    {} entries ({} publications, {} courses, {} experience, {} news)",
        index.entries.len(),
        count(ContentKind::Publication),
        count(ContentKind::Course),
        count(ContentKind::Experience),
        count(ContentKind::News),
    ));

    lines.push("Facets".to_string());
    let years: Vec<String> = index.facets.years.iter().map(|y| y.to_string()).collect();
    lines.push(format!("    Years: {}", years.join(", ")));
    let kinds: Vec<&str> = index.facets.kinds.iter().map(|k| k.label()).collect();
    lines.push(format!("    Kinds: {}", kinds.join(", ")));

    lines
}

/// Print index output to stdout.
pub fn print_index_output(index: &SearchIndex) {
    for line in format_index_output(index) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 3: Generate output
// ============================================================================

/// Format generate stage output showing generated HTML files.
///
/// Information-first: each page leads with its title, followed by `→` and
/// the output path.
pub fn format_generate_output(summary: &GenerateSummary) -> Vec<String> {
    let mut lines = Vec::new();

    for page in &summary.pages {
        if page.output == "publications/index.html" && summary.publication_pages > 0 {
            lines.push(format!(
                "{} \u{2192} {} ({} publication pages)",
                page.title, page.output, summary.publication_pages
            ));
        } else {
            lines.push(format!("{} \u{2192} {}", page.title, page.output));
        }
    }

    lines.push(String::new());
    lines.push("Assets".to_string());
    lines.push(format!("    {}", summary.stylesheet));
    lines.push(format!("    {}", summary.search_index));
    if summary.assets_copied > 0 {
        lines.push(format!("    {} files copied from assets/", summary.assets_copied));
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {} pages, {} publication pages",
        summary.pages.len(),
        summary.publication_pages
    ));

    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(summary: &GenerateSummary) {
    for line in format_generate_output(summary) {
        println!("{}", line);
    }
}

// ============================================================================
// Search results output
// ============================================================================

/// Format `vitae search` results: one entity line per hit, with its kind,
/// year, and destination URL as context.
///
/// ```text
/// Results (2)
///     001 Explainable AI for Healthcare (Publication, 2023)
///         /publications/explainable-ai-for-healthcare-2023/
///     002 CS 4780: Machine Learning (Course, 2024)
///         /teaching.html#cs-4780-fall-2024
/// ```
pub fn format_search_results(results: &[&SearchEntry]) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(section_header("Results", Some(results.len())));
    if results.is_empty() {
        lines.push("    (no matches)".to_string());
        return lines;
    }
    for (i, entry) in results.iter().enumerate() {
        let detail = match entry.year {
            Some(year) => format!("{}, {}", entry.kind.label(), year),
            None => entry.kind.label().to_string(),
        };
        lines.push(entity_line(i + 1, &entry.title, Some(&detail)));
        lines.push(format!("        {}", entry.url));
    }
    lines
}

/// Print search results to stdout.
pub fn print_search_results(results: &[&SearchEntry]) {
    for line in format_search_results(results) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::WrittenPage;
    use crate::index::build_index;
    use crate::load;
    use crate::test_helpers::fixture_content;

    fn fixture_manifest() -> Manifest {
        let tmp = fixture_content();
        load::load(tmp.path()).unwrap()
    }

    #[test]
    fn load_output_leads_with_profile() {
        let manifest = fixture_manifest();
        let lines = format_load_output(&manifest);
        assert_eq!(lines[0], "Profile");
        assert!(lines[1].contains("Ada Lovelace"));
        assert!(lines[2].contains("Source: profile.toml"));
    }

    #[test]
    fn load_output_numbers_publications() {
        let manifest = fixture_manifest();
        let lines = format_load_output(&manifest);
        let text = lines.join("\n");
        assert!(text.contains("Publications (3)"));
        assert!(text.contains("001 Attention Is Not Always Needed (2021, Conference)"));
        assert!(text.contains("002 Explainable AI for Healthcare (2023, Journal)"));
        assert!(text.contains("Source: publications.toml"));
    }

    #[test]
    fn load_output_marks_link_pages() {
        let manifest = fixture_manifest();
        let text = format_load_output(&manifest).join("\n");
        assert!(text.contains("scholar (link)"));
    }

    #[test]
    fn load_output_omits_empty_sections() {
        let mut manifest = fixture_manifest();
        manifest.courses.clear();
        let text = format_load_output(&manifest).join("\n");
        assert!(!text.contains("Teaching"));
    }

    #[test]
    fn index_output_counts_kinds_and_lists_facets() {
        let manifest = fixture_manifest();
        let index = build_index(&manifest);
        let lines = format_index_output(&index);
        let text = lines.join("\n");
        assert!(text.contains("9 entries (3 publications, 2 courses, 2 experience, 2 news)"));
        assert!(text.contains("Kinds: Publication, Course, Experience, News"));
        assert!(text.contains("Years: "));
    }

    #[test]
    fn generate_output_shows_arrow_lines_and_totals() {
        let summary = GenerateSummary {
            pages: vec![
                WrittenPage {
                    title: "Home".to_string(),
                    output: "index.html".to_string(),
                },
                WrittenPage {
                    title: "Publications".to_string(),
                    output: "publications/index.html".to_string(),
                },
            ],
            publication_pages: 3,
            assets_copied: 2,
            stylesheet: "style.abcd1234.css".to_string(),
            search_index: "search-index.ffff0000.json".to_string(),
        };
        let text = format_generate_output(&summary).join("\n");
        assert!(text.contains("Home \u{2192} index.html"));
        assert!(text.contains("Publications \u{2192} publications/index.html (3 publication pages)"));
        assert!(text.contains("style.abcd1234.css"));
        assert!(text.contains("2 files copied from assets/"));
        assert!(text.contains("Generated 2 pages, 3 publication pages"));
    }

    #[test]
    fn search_results_show_entity_lines_with_urls() {
        let manifest = fixture_manifest();
        let index = build_index(&manifest);
        let results: Vec<&crate::search::SearchEntry> =
            index.entries.iter().take(2).collect();
        let text = format_search_results(&results).join("\n");
        assert!(text.contains("Results (2)"));
        assert!(text.contains("001 Attention Is Not Always Needed (Publication, 2021)"));
        assert!(text.contains("/publications/attention-is-not-always-needed-2021/"));
    }

    #[test]
    fn search_results_empty_state() {
        let text = format_search_results(&[]).join("\n");
        assert!(text.contains("Results (0)"));
        assert!(text.contains("(no matches)"));
    }

    #[test]
    fn entity_line_formats_index_and_detail() {
        assert_eq!(
            entity_line(1, "Some Title", Some("2023, Journal")),
            "    001 Some Title (2023, Journal)"
        );
        assert_eq!(entity_line(12, "Bare", None), "    012 Bare");
    }
}
