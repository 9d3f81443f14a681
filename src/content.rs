//! Authored content records and their shape validation.
//!
//! All site content is authored as TOML records (`publications.toml`,
//! `teaching.toml`, `experience.toml`, `news.toml`, `profile.toml`). The
//! types here are the schema: closed enums reject unknown discriminants at
//! parse time, `deny_unknown_fields` catches typos, and each record type
//! carries a `validate` method that checks the value-level rules serde can't
//! express (year ranges, course-code patterns, date shapes).
//!
//! Validation never stops at the first problem. Each `validate` pushes one
//! [`Violation`] per broken rule into a shared list, so a load failure
//! reports every bad field path in the content directory at once.
//!
//! Records are constructed once at load, validated once, and immutable for
//! the rest of the process. There is no runtime create/update/delete.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One violated shape rule: the field path that broke and why.
///
/// Paths are indexed from the authored collection, e.g.
/// `publications[3].year` or `news[0].date`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: String,
    pub message: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Check that a year is a plausible 4-digit value.
fn check_year(year: u16, path: &str, out: &mut Vec<Violation>) {
    if !(1000..=9999).contains(&year) {
        out.push(Violation::new(
            path,
            format!("must be a 4-digit year (got {year})"),
        ));
    }
}

fn check_non_empty(value: &str, path: &str, out: &mut Vec<Violation>) {
    if value.trim().is_empty() {
        out.push(Violation::new(path, "must not be empty"));
    }
}

// ============================================================================
// Profile
// ============================================================================

/// The researcher the site belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    pub name: String,
    /// Position line, e.g. "Assistant Professor of Computer Science".
    pub title: String,
    pub affiliation: String,
    pub email: String,
    /// Research interests, shown on the home page in authored order.
    #[serde(default)]
    pub interests: Vec<String>,
    /// External profile links (Scholar, ORCID, GitHub, ...).
    #[serde(default)]
    pub links: Vec<ProfileLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileLink {
    pub label: String,
    pub url: String,
}

impl Profile {
    pub fn validate(&self, out: &mut Vec<Violation>) {
        check_non_empty(&self.name, "profile.name", out);
        check_non_empty(&self.title, "profile.title", out);
        check_non_empty(&self.affiliation, "profile.affiliation", out);
        if !self.email.contains('@') {
            out.push(Violation::new(
                "profile.email",
                format!("must be an email address (got {:?})", self.email),
            ));
        }
        for (i, link) in self.links.iter().enumerate() {
            check_non_empty(&link.label, &format!("profile.links[{i}].label"), out);
            if !is_url(&link.url) {
                out.push(Violation::new(
                    format!("profile.links[{i}].url"),
                    "must start with http:// or https://",
                ));
            }
        }
    }
}

fn is_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

// ============================================================================
// Publications
// ============================================================================

/// Publication venue kind. Closed set: an unknown kind in the authored TOML
/// is a parse error, not a runtime condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PublicationKind {
    Journal,
    Conference,
    Workshop,
    Preprint,
    InProgress,
    BookChapter,
    Thesis,
}

impl PublicationKind {
    /// Display label used in page headings and filter checkboxes.
    pub fn label(self) -> &'static str {
        match self {
            Self::Journal => "Journal",
            Self::Conference => "Conference",
            Self::Workshop => "Workshop",
            Self::Preprint => "Preprint",
            Self::InProgress => "In Progress",
            Self::BookChapter => "Book Chapter",
            Self::Thesis => "Thesis",
        }
    }

    /// Stable tag used in URLs and `data-` attributes (the serde name).
    pub fn tag(self) -> &'static str {
        match self {
            Self::Journal => "journal",
            Self::Conference => "conference",
            Self::Workshop => "workshop",
            Self::Preprint => "preprint",
            Self::InProgress => "in-progress",
            Self::BookChapter => "book-chapter",
            Self::Thesis => "thesis",
        }
    }
}

impl fmt::Display for PublicationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single publication record.
///
/// `id` is optional in the authored file; a missing id is derived from the
/// title and year at load time (`slugify(title)-year`). Uniqueness is an
/// authoring discipline, not mechanically enforced.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Publication {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    /// Ordered author list, "First Last" per entry.
    pub authors: Vec<String>,
    pub venue: String,
    pub year: u16,
    pub kind: PublicationKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    #[serde(default, rename = "abstract", skip_serializing_if = "Option::is_none")]
    pub abstract_text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

impl Publication {
    /// The effective id: the authored one, or `slugify(title)-year`.
    pub fn slug(&self) -> String {
        match &self.id {
            Some(id) => id.clone(),
            None => format!("{}-{}", crate::naming::slugify(&self.title), self.year),
        }
    }

    pub fn validate(&self, index: usize, out: &mut Vec<Violation>) {
        let at = |field: &str| format!("publications[{index}].{field}");
        check_non_empty(&self.title, &at("title"), out);
        check_non_empty(&self.venue, &at("venue"), out);
        check_year(self.year, &at("year"), out);
        if self.authors.is_empty() {
            out.push(Violation::new(at("authors"), "must list at least one author"));
        }
        for (i, author) in self.authors.iter().enumerate() {
            check_non_empty(author, &format!("publications[{index}].authors[{i}]"), out);
        }
        for (field, value) in [("link", &self.link), ("pdf", &self.pdf)] {
            if let Some(url) = value
                && !is_url(url)
            {
                out.push(Violation::new(
                    at(field),
                    "must start with http:// or https://",
                ));
            }
        }
    }
}

impl crate::search::Filterable for Publication {
    type Kind = PublicationKind;

    fn kind(&self) -> PublicationKind {
        self.kind
    }

    fn year(&self) -> Option<u16> {
        Some(self.year)
    }

    /// Text search spans title, abstract, venue, the comma-joined author
    /// list, and every keyword.
    fn matches_text(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self
                .abstract_text
                .as_deref()
                .is_some_and(|a| a.to_lowercase().contains(needle))
            || self.venue.to_lowercase().contains(needle)
            || self.authors.join(", ").to_lowercase().contains(needle)
            || self.keywords.iter().any(|k| k.to_lowercase().contains(needle))
    }
}

// ============================================================================
// Courses
// ============================================================================

/// Academic term. Closed set, parse-time enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Term {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Fall => "Fall",
            Self::Winter => "Winter",
        };
        f.write_str(s)
    }
}

/// A course taught in a specific term.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Course {
    /// Department code, e.g. "CS 4780". Must match the code pattern.
    pub code: String,
    pub title: String,
    pub term: Term,
    pub year: u16,
    /// "Undergraduate", "Graduate", seminar, ... free text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Course {
    pub fn slug(&self) -> String {
        format!(
            "{}-{}-{}",
            crate::naming::slugify(&self.code),
            crate::naming::slugify(&self.term.to_string()),
            self.year
        )
    }

    pub fn validate(&self, index: usize, out: &mut Vec<Violation>) {
        let at = |field: &str| format!("courses[{index}].{field}");
        check_non_empty(&self.title, &at("title"), out);
        check_year(self.year, &at("year"), out);
        if !is_course_code(&self.code) {
            out.push(Violation::new(
                at("code"),
                format!(
                    "must look like a department code, e.g. \"CS 4780\" (got {:?})",
                    self.code
                ),
            ));
        }
        if let Some(url) = &self.url
            && !is_url(url)
        {
            out.push(Violation::new(at("url"), "must start with http:// or https://"));
        }
    }
}

/// Course codes are 2-4 uppercase letters, a space, 3-4 digits, and an
/// optional trailing uppercase letter: `CS 101`, `MATH 2940`, `CS 6784W`.
fn is_course_code(code: &str) -> bool {
    let mut chars = code.chars().peekable();

    let mut letters = 0;
    while chars.peek().is_some_and(|c| c.is_ascii_uppercase()) {
        chars.next();
        letters += 1;
    }
    if !(2..=4).contains(&letters) {
        return false;
    }
    if chars.next() != Some(' ') {
        return false;
    }
    let mut digits = 0;
    while chars.peek().is_some_and(|c| c.is_ascii_digit()) {
        chars.next();
        digits += 1;
    }
    if !(3..=4).contains(&digits) {
        return false;
    }
    match chars.next() {
        None => true,
        Some(c) => c.is_ascii_uppercase() && chars.next().is_none(),
    }
}

// ============================================================================
// Experience
// ============================================================================

/// A position held: appointment, degree, visiting stint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Experience {
    pub role: String,
    pub institution: String,
    pub start_year: u16,
    /// Absent means the position is current.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_year: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Experience {
    pub fn validate(&self, index: usize, out: &mut Vec<Violation>) {
        let at = |field: &str| format!("experience[{index}].{field}");
        check_non_empty(&self.role, &at("role"), out);
        check_non_empty(&self.institution, &at("institution"), out);
        check_year(self.start_year, &at("start_year"), out);
        if let Some(end) = self.end_year {
            check_year(end, &at("end_year"), out);
            if end < self.start_year {
                out.push(Violation::new(
                    at("end_year"),
                    format!("ends before it starts ({} < {})", end, self.start_year),
                ));
            }
        }
    }

    /// Display span, e.g. "2019–2023" or "2023–present".
    pub fn span(&self) -> String {
        match self.end_year {
            Some(end) => format!("{}\u{2013}{}", self.start_year, end),
            None => format!("{}\u{2013}present", self.start_year),
        }
    }
}

// ============================================================================
// News
// ============================================================================

/// A dated announcement. The body is markdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewsItem {
    /// ISO date, `YYYY-MM-DD`. Sorts lexicographically = chronologically.
    pub date: String,
    pub title: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl NewsItem {
    pub fn validate(&self, index: usize, out: &mut Vec<Violation>) {
        let at = |field: &str| format!("news[{index}].{field}");
        check_non_empty(&self.title, &at("title"), out);
        if parse_iso_date(&self.date).is_none() {
            out.push(Violation::new(
                at("date"),
                format!("must be YYYY-MM-DD (got {:?})", self.date),
            ));
        }
        if let Some(url) = &self.url
            && !is_url(url)
        {
            out.push(Violation::new(at("url"), "must start with http:// or https://"));
        }
    }

    /// The 4-digit year of the item, if the date is well-formed.
    pub fn year(&self) -> Option<u16> {
        parse_iso_date(&self.date).map(|(y, _, _)| y)
    }
}

/// Parse `YYYY-MM-DD` with plausible ranges. Returns (year, month, day).
fn parse_iso_date(s: &str) -> Option<(u16, u8, u8)> {
    let mut parts = s.split('-');
    let year: u16 = parts.next()?.parse().ok()?;
    let month: u8 = parts.next()?.parse().ok()?;
    let day: u8 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    if s.len() != 10 || !(1000..=9999).contains(&year) {
        return None;
    }
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }
    Some((year, month, day))
}
