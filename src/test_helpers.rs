//! Shared test utilities for the vitae test suite.
//!
//! Provides a programmatic fixture content directory plus lookup helpers
//! that panic with the available alternatives on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = fixture_content();
//! let manifest = load::load(tmp.path()).unwrap();
//!
//! let publication = find_publication(&manifest, "Explainable AI for Healthcare");
//! assert_eq!(publication.year, 2023);
//! ```
//!
//! The fixture is written in code rather than copied from a fixtures/ tree,
//! so the repository carries no test data files and each test gets an
//! isolated copy it can mutate freely.

use std::fs;
use tempfile::TempDir;

use crate::content::Publication;
use crate::load::Manifest;
use crate::search::SearchEntry;
use crate::types::Page;

// =========================================================================
// Fixture setup
// =========================================================================

/// Write a complete content directory into a temp dir and return it.
///
/// The fixture covers every collection:
/// - 3 publications (years 2021/2023/2023, kinds conference/journal/journal)
/// - 2 courses, 2 experience records, 2 news items
/// - a numbered markdown page and a URL-only link page
/// - a config.toml overriding `search.recent_publications`
pub fn fixture_content() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();

    fs::write(
        dir.join("config.toml"),
        r#"
[search]
recent_publications = 2
"#,
    )
    .unwrap();

    fs::write(
        dir.join("profile.toml"),
        r#"
name = "Ada Lovelace"
title = "Professor of Computing"
affiliation = "Analytical Engine Institute"
email = "ada@example.org"
interests = ["Machine Learning", "Interpretability", "Causal Inference"]

[[links]]
label = "Scholar"
url = "https://scholar.example.org/ada"

[[links]]
label = "GitHub"
url = "https://github.com/ada"
"#,
    )
    .unwrap();

    fs::write(
        dir.join("publications.toml"),
        r#"
[[publications]]
title = "Attention Is Not Always Needed"
authors = ["Ada Lovelace", "Charles Babbage"]
venue = "NeurIPS"
year = 2021
kind = "conference"
pdf = "https://example.org/attention.pdf"

[[publications]]
title = "Explainable AI for Healthcare"
authors = ["Ada Lovelace", "Grace Hopper"]
venue = "Journal of Machine Learning Research"
year = 2023
kind = "journal"
doi = "10.1000/jmlr.2023.42"
abstract = "We study interpretability methods for clinical models."
keywords = ["XAI", "healthcare"]

[[publications]]
title = "Causal Discovery at Scale"
authors = ["Ada Lovelace"]
venue = "Transactions on Machine Learning"
year = 2023
kind = "journal"
link = "https://example.org/causal"
"#,
    )
    .unwrap();

    fs::write(
        dir.join("teaching.toml"),
        r#"
[[courses]]
code = "CS 4780"
title = "Machine Learning"
term = "Fall"
year = 2024
level = "Undergraduate"
description = "Supervised learning, kernels, neural networks."

[[courses]]
code = "CS 6784"
title = "Advanced Topics in Machine Learning"
term = "Spring"
year = 2023
level = "Graduate"
"#,
    )
    .unwrap();

    fs::write(
        dir.join("experience.toml"),
        r#"
[[experience]]
role = "Assistant Professor"
institution = "Analytical Engine Institute"
start_year = 2023
description = "Faculty member in the computing department."

[[experience]]
role = "Postdoctoral Researcher"
institution = "MIT"
start_year = 2019
end_year = 2023
"#,
    )
    .unwrap();

    fs::write(
        dir.join("news.toml"),
        r#"
[[news]]
date = "2024-09-01"
title = "Paper accepted at NeurIPS"
body = "Our paper on **attention** was accepted."

[[news]]
date = "2023-01-15"
title = "New course announced"
body = "CS 6784 runs again in the spring."
url = "https://example.org/cs6784"
"#,
    )
    .unwrap();

    fs::write(
        dir.join("040-research.md"),
        "# Research Statement\n\nMy work focuses on *interpretable* machine learning.\n",
    )
    .unwrap();

    fs::write(
        dir.join("050-scholar.md"),
        "https://scholar.example.org/ada\n",
    )
    .unwrap();

    tmp
}

// =========================================================================
// Manifest lookups — panics with a clear message on miss
// =========================================================================

/// Find a publication by title. Panics if not found.
pub fn find_publication<'a>(manifest: &'a Manifest, title: &str) -> &'a Publication {
    manifest
        .publications
        .iter()
        .find(|p| p.title == title)
        .unwrap_or_else(|| {
            let titles: Vec<&str> = manifest
                .publications
                .iter()
                .map(|p| p.title.as_str())
                .collect();
            panic!("publication '{title}' not found. Available: {titles:?}")
        })
}

/// Find a page by slug. Panics if not found.
pub fn find_page<'a>(manifest: &'a Manifest, slug: &str) -> &'a Page {
    manifest
        .pages
        .iter()
        .find(|p| p.slug == slug)
        .unwrap_or_else(|| {
            let slugs: Vec<&str> = manifest.pages.iter().map(|p| p.slug.as_str()).collect();
            panic!("page '{slug}' not found. Available: {slugs:?}")
        })
}

/// Find a corpus entry by id. Panics if not found.
pub fn find_entry<'a>(entries: &'a [SearchEntry], id: &str) -> &'a SearchEntry {
    entries.iter().find(|e| e.id == id).unwrap_or_else(|| {
        let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        panic!("entry '{id}' not found. Available: {ids:?}")
    })
}
