//! Search index construction.
//!
//! Stage 2 of the vitae build pipeline. Takes the load-stage manifest and
//! flattens the heterogeneous collections into the generic search corpus,
//! deriving the filter facets from the full unfiltered corpus as it goes.
//!
//! The stage is a pure function manifest → [`SearchIndex`]: no filesystem
//! access, no configuration beyond what the manifest carries. The CLI
//! serializes the result to `search-index.json`, which both the generate
//! stage and the client-side search widget consume.
//!
//! ## Corpus order
//!
//! Publications, then courses, then experience, then news; within each
//! collection, authored order. Filtered views preserve and truncate this
//! order, so it is the order search results appear in.
//!
//! ## What each kind contributes to text search
//!
//! - Publications: title, abstract, comma-joined author list, venue;
//!   keywords as tags.
//! - Courses: code + title, description, term and level; the code as a tag.
//! - Experience: role and institution, description.
//! - News: title and body.

use crate::content::{Course, Experience, NewsItem, Publication};
use crate::load::Manifest;
use crate::naming::slugify;
use crate::search::{ContentKind, Facets, SearchEntry};
use serde::{Deserialize, Serialize};

/// The artifact of the index stage: the flattened corpus plus its facets.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchIndex {
    pub entries: Vec<SearchEntry>,
    pub facets: Facets<ContentKind>,
}

/// Flatten a manifest into the search corpus and derive its facets.
pub fn build_index(manifest: &Manifest) -> SearchIndex {
    let mut entries = Vec::with_capacity(
        manifest.publications.len()
            + manifest.courses.len()
            + manifest.experience.len()
            + manifest.news.len(),
    );

    entries.extend(manifest.publications.iter().map(publication_entry));
    entries.extend(manifest.courses.iter().map(course_entry));
    entries.extend(manifest.experience.iter().map(experience_entry));
    entries.extend(manifest.news.iter().map(news_entry));

    let facets = Facets::derive(&entries);
    SearchIndex { entries, facets }
}

fn publication_entry(p: &Publication) -> SearchEntry {
    let slug = p.slug();
    let mut content = format!("{}. {}", p.authors.join(", "), p.venue);
    if let Some(abstract_text) = &p.abstract_text {
        content.push('\n');
        content.push_str(abstract_text);
    }
    SearchEntry {
        id: slug.clone(),
        title: p.title.clone(),
        content,
        kind: ContentKind::Publication,
        year: Some(p.year),
        tags: p.keywords.clone(),
        url: format!("/publications/{slug}/"),
    }
}

fn course_entry(c: &Course) -> SearchEntry {
    let slug = c.slug();
    let mut content = format!("{} {}", c.term, c.year);
    if let Some(level) = &c.level {
        content.push_str(", ");
        content.push_str(level);
    }
    if let Some(description) = &c.description {
        content.push('\n');
        content.push_str(description);
    }
    SearchEntry {
        id: slug.clone(),
        title: format!("{}: {}", c.code, c.title),
        content,
        kind: ContentKind::Course,
        year: Some(c.year),
        tags: vec![c.code.clone()],
        url: format!("/teaching.html#{slug}"),
    }
}

fn experience_entry(e: &Experience) -> SearchEntry {
    let slug = format!(
        "{}-{}",
        slugify(&e.role),
        slugify(&e.institution)
    );
    let mut content = e.span();
    if let Some(description) = &e.description {
        content.push('\n');
        content.push_str(description);
    }
    SearchEntry {
        id: slug,
        title: format!("{}, {}", e.role, e.institution),
        content,
        kind: ContentKind::Experience,
        year: Some(e.start_year),
        tags: Vec::new(),
        url: "/cv.html".to_string(),
    }
}

fn news_entry(n: &NewsItem) -> SearchEntry {
    let slug = format!("{}-{}", n.date, slugify(&n.title));
    SearchEntry {
        id: slug.clone(),
        title: n.title.clone(),
        content: n.body.clone(),
        kind: ContentKind::News,
        year: n.year(),
        tags: Vec::new(),
        url: format!("/news.html#{slug}"),
    }
}

// ============================================================================
// Recent selections
// ============================================================================

/// The `n` most recent publications: stable sort by year descending, so
/// same-year entries keep their authored order.
pub fn recent_publications(publications: &[Publication], n: usize) -> Vec<&Publication> {
    let mut sorted: Vec<&Publication> = publications.iter().collect();
    sorted.sort_by(|a, b| b.year.cmp(&a.year));
    sorted.truncate(n);
    sorted
}

/// The `n` most recent news items: stable sort by ISO date descending.
pub fn recent_news(news: &[NewsItem], n: usize) -> Vec<&NewsItem> {
    let mut sorted: Vec<&NewsItem> = news.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(n);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load;
    use crate::search::{FilterState, apply};
    use crate::test_helpers::{find_entry, fixture_content};

    fn fixture_index() -> SearchIndex {
        let tmp = fixture_content();
        let manifest = load::load(tmp.path()).unwrap();
        build_index(&manifest)
    }

    #[test]
    fn corpus_orders_collections_publications_first() {
        let index = fixture_index();
        let kinds: Vec<ContentKind> = index.entries.iter().map(|e| e.kind).collect();

        // 3 publications, 2 courses, 2 experience, 2 news — in that order
        assert_eq!(
            kinds,
            vec![
                ContentKind::Publication,
                ContentKind::Publication,
                ContentKind::Publication,
                ContentKind::Course,
                ContentKind::Course,
                ContentKind::Experience,
                ContentKind::Experience,
                ContentKind::News,
                ContentKind::News,
            ]
        );
    }

    #[test]
    fn publication_entries_carry_authors_and_venue_in_content() {
        let index = fixture_index();
        let entry = find_entry(&index.entries, "explainable-ai-for-healthcare-2023");
        assert!(entry.content.contains("Ada Lovelace, Grace Hopper"));
        assert!(entry.content.contains("Journal of Machine Learning Research"));
        assert_eq!(entry.tags, vec!["XAI", "healthcare"]);
        assert_eq!(entry.url, "/publications/explainable-ai-for-healthcare-2023/");
    }

    #[test]
    fn keyword_match_reaches_publication_via_corpus() {
        // "xai" appears only as a keyword; the corpus search still finds it.
        let index = fixture_index();
        let state = FilterState::<ContentKind>::with_query("xai");
        let results = apply(&index.entries, &state);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Explainable AI for Healthcare");
    }

    #[test]
    fn course_entries_have_code_title_and_anchor_url() {
        let index = fixture_index();
        let entry = find_entry(&index.entries, "cs-4780-fall-2024");
        assert_eq!(entry.title, "CS 4780: Machine Learning");
        assert_eq!(entry.tags, vec!["CS 4780"]);
        assert!(entry.url.starts_with("/teaching.html#"));
    }

    #[test]
    fn news_entries_take_year_from_date() {
        let index = fixture_index();
        let entry = index
            .entries
            .iter()
            .find(|e| e.kind == ContentKind::News && e.title.contains("accepted"))
            .unwrap();
        assert_eq!(entry.year, Some(2024));
    }

    #[test]
    fn facets_derived_from_full_corpus() {
        let index = fixture_index();
        // All four kinds present, in corpus order
        assert_eq!(
            index.facets.kinds,
            vec![
                ContentKind::Publication,
                ContentKind::Course,
                ContentKind::Experience,
                ContentKind::News,
            ]
        );
        // Years descending, no duplicates
        let mut sorted = index.facets.years.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(index.facets.years, sorted);
        let mut deduped = index.facets.years.clone();
        deduped.dedup();
        assert_eq!(index.facets.years, deduped);
    }

    #[test]
    fn index_round_trips_through_json() {
        let index = fixture_index();
        let json = serde_json::to_string_pretty(&index).unwrap();
        let back: SearchIndex = serde_json::from_str(&json).unwrap();
        assert_eq!(back.entries.len(), index.entries.len());
        assert_eq!(back.facets, index.facets);
    }

    // =========================================================================
    // Recent selections
    // =========================================================================

    #[test]
    fn recent_publications_sorted_by_year_descending() {
        let tmp = fixture_content();
        let manifest = load::load(tmp.path()).unwrap();

        let recent = recent_publications(&manifest.publications, 2);
        assert_eq!(recent.len(), 2);
        // Both 2023 publications, in authored order (stable sort)
        assert_eq!(recent[0].title, "Explainable AI for Healthcare");
        assert_eq!(recent[1].title, "Causal Discovery at Scale");
    }

    #[test]
    fn recent_publications_handles_n_larger_than_collection() {
        let tmp = fixture_content();
        let manifest = load::load(tmp.path()).unwrap();
        let recent = recent_publications(&manifest.publications, 99);
        assert_eq!(recent.len(), manifest.publications.len());
        assert_eq!(recent[2].year, 2021);
    }

    #[test]
    fn recent_news_sorted_by_date_descending() {
        let tmp = fixture_content();
        let manifest = load::load(tmp.path()).unwrap();
        let recent = recent_news(&manifest.news, 10);
        assert!(recent.windows(2).all(|w| w[0].date >= w[1].date));
    }
}
