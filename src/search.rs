//! The content filter pipeline.
//!
//! One generic layer serves every searchable surface of the site: the
//! publications page toolbar (filtering [`Publication`]s by their venue
//! kind), the site-wide search widget (filtering the flattened
//! [`SearchEntry`] corpus by content kind), and the build-time selections.
//! The [`Filterable`] trait is the seam: a record exposes its discriminant,
//! its optional year, and a text-match hook, and the predicates here work
//! for any implementor.
//!
//! ## Filter semantics
//!
//! Three predicates, combined with logical AND:
//!
//! - **Text**: case-insensitive, unanchored substring containment of the
//!   query in any of the record's searchable fields. An empty or
//!   whitespace-only query matches everything. No tokenization, no fuzzy
//!   matching, no ranking.
//! - **Kind**: a set of selected kinds; an empty set means "no filter",
//!   multiple selections are inclusive-OR.
//! - **Year**: a single optional year; records without a year fail any
//!   active year filter. Single-select where kind is multi-select — the
//!   asymmetry is deliberate, matching the site's observed behavior.
//!
//! Results preserve source order and are truncated to `max_results`. There
//! is no re-sorting by relevance. Filtering cannot fail: the worst case is
//! an empty result set, which is a valid, displayed state.
//!
//! ## Facets
//!
//! [`Facets`] (distinct years descending, distinct kinds in first-appearance
//! order) are derived once from the *unfiltered* corpus and never change
//! with the active filter state — they populate the filter UI options.
//!
//! ## Memoization
//!
//! [`FilterCache`] owns an immutable corpus and caches filtered index lists
//! keyed by the complete filter-state tuple. Every input that affects the
//! output is part of the key, so a hit is always safe to reuse.
//!
//! [`Publication`]: crate::content::Publication

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Truncation bound applied when the caller doesn't supply one.
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// A record the filter pipeline can operate on.
pub trait Filterable {
    /// The closed discriminant this record kind filters by.
    type Kind: Copy + PartialEq;

    fn kind(&self) -> Self::Kind;

    /// 4-digit year, where the record has one.
    fn year(&self) -> Option<u16>;

    /// Case-insensitive match of `needle` against this record's searchable
    /// fields. `needle` is already trimmed and lowercased, and never empty —
    /// the empty-query case is handled before this hook is reached.
    fn matches_text(&self, needle: &str) -> bool;
}

/// Closed discriminant for the site-wide content union.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Publication,
    Course,
    Experience,
    News,
}

impl ContentKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Publication => "Publication",
            Self::Course => "Course",
            Self::Experience => "Experience",
            Self::News => "News",
        }
    }

    /// Stable tag used in `data-` attributes and the search index JSON.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Publication => "publication",
            Self::Course => "course",
            Self::Experience => "experience",
            Self::News => "news",
        }
    }

    /// Inverse of [`tag`](Self::tag), for CLI arguments.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "publication" => Some(Self::Publication),
            "course" => Some(Self::Course),
            "experience" => Some(Self::Experience),
            "news" => Some(Self::News),
            _ => None,
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One searchable record of the site-wide corpus: the shared minimal shape
/// every content kind flattens into. Assembled once at index time,
/// immutable afterwards. Kind-specific fields stay in the specific record
/// types and are invisible to this layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchEntry {
    /// Unique within the corpus (slug of the source record).
    pub id: String,
    /// Display string, included in text search.
    pub title: String,
    /// Free-text body, included in text search. For publications this holds
    /// the abstract, the comma-joined author list, and the venue.
    pub content: String,
    pub kind: ContentKind,
    /// 4-digit year where the record has one (news uses its date's year).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    /// Ordered tags, included in text search (keywords, course codes).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Destination link. Opaque to the filter.
    pub url: String,
}

impl Filterable for SearchEntry {
    type Kind = ContentKind;

    fn kind(&self) -> ContentKind {
        self.kind
    }

    fn year(&self) -> Option<u16> {
        self.year
    }

    fn matches_text(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.content.to_lowercase().contains(needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
    }
}

/// Transient filter state: what the UI's controlled inputs hold at one
/// instant. Replaced wholesale on every interaction, never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterState<K> {
    /// Free-text query. Empty or whitespace-only means "no text filter".
    pub query: String,
    /// Selected kinds. Empty means "no kind filter"; multiple are OR-ed.
    pub kinds: Vec<K>,
    /// Selected year. Single-select.
    pub year: Option<u16>,
    /// Truncation bound for the result list.
    pub max_results: usize,
}

impl<K> Default for FilterState<K> {
    fn default() -> Self {
        Self {
            query: String::new(),
            kinds: Vec::new(),
            year: None,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl<K> FilterState<K> {
    /// State with only a text query set.
    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// True when no predicate is active (the `idle` UI state).
    pub fn is_idle(&self) -> bool {
        self.query.trim().is_empty() && self.kinds.is_empty() && self.year.is_none()
    }
}

// ============================================================================
// Predicates
// ============================================================================

/// Text predicate. Pure function of (query, record); the query is trimmed
/// and lowercased here, and an empty result of that normalization matches
/// everything.
pub fn matches_query<T: Filterable>(item: &T, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    needle.is_empty() || item.matches_text(&needle)
}

/// Kind predicate: empty selection passes everything, otherwise membership.
pub fn matches_kinds<T: Filterable>(item: &T, kinds: &[T::Kind]) -> bool {
    kinds.is_empty() || kinds.contains(&item.kind())
}

/// Year predicate: no selection passes everything; a record without a year
/// fails any active selection.
pub fn matches_year<T: Filterable>(item: &T, year: Option<u16>) -> bool {
    match year {
        None => true,
        Some(y) => item.year() == Some(y),
    }
}

/// The AND-composition of all three predicates for one record.
pub fn matches<T: Filterable>(item: &T, state: &FilterState<T::Kind>) -> bool {
    matches_query(item, &state.query)
        && matches_kinds(item, &state.kinds)
        && matches_year(item, state.year)
}

/// Filter a corpus, preserving order, truncating to `state.max_results`.
pub fn apply<'a, T: Filterable>(items: &'a [T], state: &FilterState<T::Kind>) -> Vec<&'a T> {
    let needle = state.query.trim().to_lowercase();
    items
        .iter()
        .filter(|item| {
            (needle.is_empty() || item.matches_text(&needle))
                && matches_kinds(*item, &state.kinds)
                && matches_year(*item, state.year)
        })
        .take(state.max_results)
        .collect()
}

// ============================================================================
// Facets
// ============================================================================

/// Distinct filterable values present in a corpus, used to populate the
/// filter UI. Always derived from the full unfiltered corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facets<K> {
    /// Distinct years, descending.
    pub years: Vec<u16>,
    /// Distinct kinds, in order of first appearance in the corpus.
    pub kinds: Vec<K>,
}

impl<K: Copy + PartialEq> Facets<K> {
    pub fn derive<T: Filterable<Kind = K>>(items: &[T]) -> Self {
        let mut years: Vec<u16> = Vec::new();
        let mut kinds: Vec<K> = Vec::new();
        for item in items {
            if let Some(y) = item.year()
                && !years.contains(&y)
            {
                years.push(y);
            }
            if !kinds.contains(&item.kind()) {
                kinds.push(item.kind());
            }
        }
        years.sort_unstable_by(|a, b| b.cmp(a));
        Self { years, kinds }
    }
}

// ============================================================================
// Memoized derivation
// ============================================================================

/// Hit/miss counters for a [`FilterCache`], reported after a build run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} hits, {} misses", self.hits, self.misses)
    }
}

/// Memoized filtered views over an immutable corpus.
///
/// The corpus is fixed at construction, so the only inputs that vary are
/// the fields of [`FilterState`] — the cache key is the complete state
/// tuple. Cached values are index lists (already truncated), not record
/// clones.
pub struct FilterCache<T: Filterable>
where
    T::Kind: Eq + Hash,
{
    items: Vec<T>,
    facets: Facets<T::Kind>,
    cached: HashMap<FilterState<T::Kind>, Vec<usize>>,
    stats: CacheStats,
}

impl<T: Filterable> FilterCache<T>
where
    T::Kind: Eq + Hash,
{
    pub fn new(items: Vec<T>) -> Self {
        let facets = Facets::derive(&items);
        Self {
            items,
            facets,
            cached: HashMap::new(),
            stats: CacheStats::default(),
        }
    }

    /// The full unfiltered corpus, in source order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Facets of the unfiltered corpus. Computed once at construction;
    /// filter state never changes them.
    pub fn facets(&self) -> &Facets<T::Kind> {
        &self.facets
    }

    /// The filtered view for `state`, memoized.
    pub fn results(&mut self, state: &FilterState<T::Kind>) -> Vec<&T> {
        if let Some(indices) = self.cached.get(state).cloned() {
            self.stats.hits += 1;
            return indices.iter().map(|&i| &self.items[i]).collect();
        }
        self.stats.misses += 1;

        let needle = state.query.trim().to_lowercase();
        let indices: Vec<usize> = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| {
                (needle.is_empty() || item.matches_text(&needle))
                    && matches_kinds(*item, &state.kinds)
                    && matches_year(*item, state.year)
            })
            .map(|(i, _)| i)
            .take(state.max_results)
            .collect();
        self.cached.insert(state.clone(), indices.clone());
        indices.into_iter().map(|i| &self.items[i]).collect()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}
