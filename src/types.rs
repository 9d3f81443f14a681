//! Shared types used across all pipeline stages.
//!
//! These types are serialized to JSON between stages (load → index →
//! generate) and must be identical across all three modules.

use serde::{Deserialize, Serialize};

/// A page generated from a markdown file in the content root.
///
/// Pages follow the `NNN-name.md` numbering convention:
/// - Numbered files appear in navigation, sorted by number
/// - Unnumbered files are generated but hidden from navigation
///
/// If the file content is just a URL, the page becomes an external link in
/// nav (Google Scholar, GitHub, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Title from first `# heading` in markdown, or link_title as fallback
    pub title: String,
    /// Display label in nav (filename with number stripped and dashes → spaces)
    pub link_title: String,
    /// URL slug (filename stem with number prefix stripped)
    pub slug: String,
    /// Raw markdown content (or URL for link pages)
    pub body: String,
    /// Whether this page appears in navigation (has number prefix)
    pub in_nav: bool,
    /// Sort key from number prefix (for ordering)
    pub sort_key: u32,
    /// If true, body is a URL and this page is an external link
    pub is_link: bool,
}

/// One navigation entry. The academic site's nav is flat: built-in sections
/// for non-empty collections, then numbered pages, then external links.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavItem {
    pub title: String,
    /// Site-absolute href, or the full URL for external items.
    pub href: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub external: bool,
}
