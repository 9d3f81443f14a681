//! Filename parsing for the `NNN-name` page convention, and slug derivation.
//!
//! Markdown pages in the content root follow a numeric-prefix naming pattern:
//! an optional `NNN-` prefix followed by a name. Numbered pages appear in
//! navigation sorted by number; unnumbered pages are generated but hidden.
//! Dashes in the name portion become spaces for display:
//! - `040-research-statement.md` → "research statement" (nav label)
//! - `050-scholar.md` → "scholar"
//!
//! The same module owns [`slugify`], which derives URL-safe ids for records
//! that don't declare one (publication ids come from their title and year).

/// Result of parsing a numbered entry name like `040-research-statement`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    /// Number prefix if present (e.g., `40` from `040-research-statement`)
    pub number: Option<u32>,
    /// Raw name part after `NNN-`, dashes preserved. Empty if number-only.
    /// For unnumbered entries, this is the full input.
    pub name: String,
    /// Display title: name with dashes converted to spaces.
    pub display_title: String,
}

/// Parse an entry name following the `NNN-name` convention.
///
/// Handles these patterns:
/// - `"040-research-statement"` → number=Some(40), name="research-statement"
/// - `"050-scholar"` → number=Some(50), name="scholar"
/// - `"001"` → number=Some(1), name="", display_title=""
/// - `"notes"` → number=None, name="notes", display_title="notes"
pub fn parse_entry_name(name: &str) -> ParsedName {
    if let Some(dash_pos) = name.find('-') {
        let prefix = &name[..dash_pos];
        if let Ok(num) = prefix.parse::<u32>() {
            let raw = &name[dash_pos + 1..];
            return ParsedName {
                number: Some(num),
                name: raw.to_string(),
                display_title: raw.replace('-', " "),
            };
        }
    }
    // Pure number, no dash
    if let Ok(num) = name.parse::<u32>() {
        return ParsedName {
            number: Some(num),
            name: String::new(),
            display_title: String::new(),
        };
    }
    ParsedName {
        number: None,
        name: name.to_string(),
        display_title: name.replace('-', " "),
    }
}

const MAX_SLUG_LEN: usize = 80;

/// Derive a URL- and filename-safe slug from free text.
///
/// - Lowercases ASCII letters
/// - Replaces non-alphanumeric characters with dashes
/// - Collapses consecutive dashes, strips leading/trailing dashes
/// - Truncates to `MAX_SLUG_LEN` characters (breaks at last dash before limit)
///
/// Used to derive record ids: `slugify("Explainable AI for Healthcare")`
/// → `"explainable-ai-for-healthcare"`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut prev_dash = false;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            prev_dash = false;
        } else if !prev_dash {
            slug.push('-');
            prev_dash = true;
        }
    }
    let trimmed = slug.trim_matches('-');

    if trimmed.len() <= MAX_SLUG_LEN {
        trimmed.to_string()
    } else {
        let truncated = &trimmed[..MAX_SLUG_LEN];
        match truncated.rfind('-') {
            Some(pos) => truncated[..pos].to_string(),
            None => truncated.to_string(),
        }
    }
}
