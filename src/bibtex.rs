//! BibTeX entry generation for publication pages.
//!
//! Every publication detail page carries a copyable BibTeX block generated
//! from the authored record. The mapping follows standard BibTeX usage:
//!
//! | Kind        | Entry type       | Venue field   |
//! |-------------|------------------|---------------|
//! | journal     | `@article`       | `journal`     |
//! | conference  | `@inproceedings` | `booktitle`   |
//! | workshop    | `@inproceedings` | `booktitle`   |
//! | preprint    | `@misc`          | `howpublished`|
//! | in-progress | `@unpublished`   | `note`        |
//! | book-chapter| `@incollection`  | `booktitle`   |
//! | thesis      | `@phdthesis`     | `school`      |
//!
//! Cite keys are `surname + year + first title word`, lowercased and
//! stripped to alphanumerics: `lovelace2023explainable`.

use crate::content::{Publication, PublicationKind};

/// The BibTeX entry type for a publication kind.
pub fn entry_type(kind: PublicationKind) -> &'static str {
    match kind {
        PublicationKind::Journal => "article",
        PublicationKind::Conference | PublicationKind::Workshop => "inproceedings",
        PublicationKind::Preprint => "misc",
        PublicationKind::InProgress => "unpublished",
        PublicationKind::BookChapter => "incollection",
        PublicationKind::Thesis => "phdthesis",
    }
}

/// The field that carries the venue for a publication kind.
fn venue_field(kind: PublicationKind) -> &'static str {
    match kind {
        PublicationKind::Journal => "journal",
        PublicationKind::Conference | PublicationKind::Workshop | PublicationKind::BookChapter => {
            "booktitle"
        }
        PublicationKind::Preprint => "howpublished",
        PublicationKind::InProgress => "note",
        PublicationKind::Thesis => "school",
    }
}

/// Cite key: first author's surname + year + first title word, lowercased
/// alphanumerics only. Falls back to the year alone for degenerate input.
pub fn cite_key(publication: &Publication) -> String {
    let surname = publication
        .authors
        .first()
        .and_then(|a| a.split_whitespace().next_back())
        .unwrap_or("");
    let first_word = publication
        .title
        .split_whitespace()
        .next()
        .unwrap_or("");
    format!(
        "{}{}{}",
        keep_alnum(surname),
        publication.year,
        keep_alnum(first_word)
    )
}

fn keep_alnum(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Render one publication as a complete BibTeX entry.
pub fn format_entry(publication: &Publication) -> String {
    let mut fields: Vec<(&str, String)> = Vec::new();
    fields.push(("author", publication.authors.join(" and ")));
    fields.push(("title", publication.title.clone()));
    fields.push((venue_field(publication.kind), publication.venue.clone()));
    fields.push(("year", publication.year.to_string()));
    if let Some(doi) = &publication.doi {
        fields.push(("doi", doi.clone()));
    }
    if let Some(link) = &publication.link {
        fields.push(("url", link.clone()));
    }

    let body: Vec<String> = fields
        .iter()
        .map(|(key, value)| format!("  {key} = {{{value}}}"))
        .collect();
    format!(
        "@{}{{{},\n{}\n}}",
        entry_type(publication.kind),
        cite_key(publication),
        body.join(",\n")
    )
}
