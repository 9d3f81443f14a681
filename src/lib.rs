//! # vitae
//!
//! A minimal static site generator for academic portfolio sites. Your
//! content is authored data: TOML records for publications, teaching,
//! experience, and news, plus markdown pages — validated once at build
//! time, rendered to plain HTML with a small client-side search.
//!
//! # Architecture: Three-Stage Pipeline
//!
//! vitae processes content through three independent stages, each producing
//! a JSON artifact that the next stage consumes:
//!
//! ```text
//! 1. Load      content/  →  manifest.json       (records, validated once)
//! 2. Index     manifest  →  search-index.json   (corpus + facets)
//! 3. Generate  manifest + index  →  dist/       (final HTML site)
//! ```
//!
//! This separation exists for three reasons:
//!
//! - **Debuggability**: each artifact is human-readable JSON you can inspect.
//! - **Fail-fast validation**: every authoring mistake is reported at load
//!   time, with its field path, before anything is generated.
//! - **Testability**: index and generate are pure functions of their input
//!   artifacts, so unit tests exercise pipeline logic without a filesystem
//!   full of content.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`load`] | Stage 1 — reads and validates the content directory, produces the manifest |
//! | [`index`] | Stage 2 — flattens collections into the search corpus and derives facets |
//! | [`generate`] | Stage 3 — renders the final HTML site from manifest + index using Maud |
//! | [`search`] | The filter pipeline: predicates, AND-composition, facets, memoized views |
//! | [`content`] | Authored record types (publications, courses, experience, news) and their validation |
//! | [`config`] | `config.toml` loading, merging, validation, and CSS custom-property generation |
//! | [`bibtex`] | BibTeX entry generation for publication pages |
//! | [`types`] | Shared types serialized between stages (`NavItem`, `Page`) |
//! | [`naming`] | `NNN-name` page convention parser and slug derivation |
//! | [`output`] | CLI output formatting — information-first display of pipeline results |
//!
//! # Design Decisions
//!
//! ## One Filter Pipeline, Two Instantiations
//!
//! The publications toolbar filters `Publication`s by venue kind; the
//! site-wide widget filters the flattened corpus by content kind. Both run
//! the same generic predicates ([`search::Filterable`]) with the same
//! semantics: case-insensitive substring text match OR-ed across fields,
//! kind membership, single-select year, AND-composed, order-preserving
//! truncation. The client-side script reimplements exactly these predicates
//! over the emitted search index, so browser results match build results.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system, rather than Handlebars or Tera. Malformed HTML is a
//! build error, template variables are Rust expressions, and all
//! interpolation is auto-escaped.
//!
//! ## Validate Everything, Then Fail
//!
//! Authored data is checked record by record and every violation is
//! collected into one report with field paths
//! (`publications[3].year: must be a 4-digit year`). One build round-trip
//! fixes all mistakes, not one per run. Invalid content never generates.
//!
//! ## Fingerprinted Assets
//!
//! The stylesheet and search index are written as `style.<hash8>.css` and
//! `search-index.<hash8>.json`, hashed from their content. Published sites
//! can serve them with immutable cache headers; a content change produces
//! new filenames.
//!
//! # The "Forever Stack"
//!
//! The output is plain HTML, established CSS, and ~100 lines of vanilla
//! JavaScript for the search widget — which progressively enhances pages
//! that are complete without it. No Node, no PHP, no database. The site can
//! be dropped on any file server and will render as long as browsers render
//! HTML.

pub mod bibtex;
pub mod config;
pub mod content;
pub mod generate;
pub mod index;
pub mod load;
pub mod naming;
pub mod output;
pub mod search;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
