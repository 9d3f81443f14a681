//! HTML site generation.
//!
//! Stage 3 of the vitae build pipeline. Takes the load-stage manifest and
//! the search index and generates the final static site.
//!
//! ## Generated Pages
//!
//! - **Home** (`/index.html`): profile hero, research interests, recent
//!   publications and news, site-wide search widget
//! - **Publications** (`/publications/index.html`): full list grouped by
//!   year with the filter toolbar (query, kind checkboxes, year select)
//! - **Publication pages** (`/publications/{slug}/index.html`): abstract,
//!   links, BibTeX block — rendered in parallel
//! - **Teaching** (`/teaching.html`): courses grouped by year
//! - **CV** (`/cv.html`): experience timeline
//! - **News** (`/news.html`): dated announcements, newest first
//! - **Pages** (`/{slug}.html`): markdown content pages
//!
//! ## Assets
//!
//! The stylesheet and the search index are content-fingerprinted
//! (`style.<hash8>.css`, `search-index.<hash8>.json`) so a deployed site can
//! be cached aggressively: new content means new filenames. The `assets/`
//! directory is copied verbatim.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping;
//! `PreEscaped` appears only for rendered markdown and the embedded
//! search script. Markdown bodies go through pulldown-cmark.

use crate::bibtex;
use crate::config;
use crate::content::{Course, Experience, NewsItem, Profile, Publication};
use crate::index::{SearchIndex, recent_news, recent_publications};
use crate::load::Manifest;
use crate::naming::slugify;
use crate::search::Facets;
use crate::types::{NavItem, Page};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use rayon::prelude::*;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Asset walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const SEARCH_JS: &str = include_str!("../static/search.js");

/// One written HTML page, for the CLI output.
#[derive(Debug, Clone)]
pub struct WrittenPage {
    pub title: String,
    pub output: String,
}

/// What the generate stage produced, for the CLI output.
#[derive(Debug)]
pub struct GenerateSummary {
    pub pages: Vec<WrittenPage>,
    pub publication_pages: usize,
    pub assets_copied: usize,
    pub stylesheet: String,
    pub search_index: String,
}

/// Shared render context: everything every page needs.
struct Site<'a> {
    profile: &'a Profile,
    navigation: &'a [NavItem],
    title: &'a str,
    css_href: String,
    index_href: String,
    max_results: usize,
}

pub fn generate(
    manifest_path: &Path,
    index_path: &Path,
    source_dir: &Path,
    output_dir: &Path,
) -> Result<GenerateSummary, GenerateError> {
    let manifest: Manifest = serde_json::from_str(&fs::read_to_string(manifest_path)?)?;
    let index: SearchIndex = serde_json::from_str(&fs::read_to_string(index_path)?)?;

    fs::create_dir_all(output_dir)?;

    // Fingerprinted stylesheet: config-driven custom properties + static rules
    let css = format!(
        "{}\n\n{}\n\n{}",
        config::generate_color_css(&manifest.config.colors),
        config::generate_theme_css(&manifest.config.theme),
        CSS_STATIC
    );
    let stylesheet = format!("style.{}.css", fingerprint(css.as_bytes()));
    fs::write(output_dir.join(&stylesheet), &css)?;

    // Fingerprinted search index for the client-side widget
    let index_json = serde_json::to_string(&index)?;
    let search_index = format!("search-index.{}.json", fingerprint(index_json.as_bytes()));
    fs::write(output_dir.join(&search_index), &index_json)?;

    let site_title = manifest
        .config
        .site
        .title
        .as_deref()
        .unwrap_or(&manifest.profile.name);
    let site = Site {
        profile: &manifest.profile,
        navigation: &manifest.navigation,
        title: site_title,
        css_href: format!("/{stylesheet}"),
        index_href: format!("/{search_index}"),
        max_results: manifest.config.search.max_results,
    };

    let mut pages = Vec::new();

    let home = render_home(&site, &manifest);
    fs::write(output_dir.join("index.html"), home.into_string())?;
    pages.push(WrittenPage {
        title: "Home".to_string(),
        output: "index.html".to_string(),
    });

    let mut publication_pages = 0;
    if !manifest.publications.is_empty() {
        let pub_dir = output_dir.join("publications");
        fs::create_dir_all(&pub_dir)?;

        let list = render_publications_page(&site, &manifest.publications);
        fs::write(pub_dir.join("index.html"), list.into_string())?;
        pages.push(WrittenPage {
            title: "Publications".to_string(),
            output: "publications/index.html".to_string(),
        });

        // Detail pages are independent of each other; render in parallel.
        manifest
            .publications
            .par_iter()
            .map(|publication| {
                let dir = pub_dir.join(publication.slug());
                fs::create_dir_all(&dir)?;
                let html = render_publication_page(&site, publication);
                fs::write(dir.join("index.html"), html.into_string())?;
                Ok(())
            })
            .collect::<Result<Vec<()>, GenerateError>>()?;
        publication_pages = manifest.publications.len();
    }

    if !manifest.courses.is_empty() {
        let html = render_teaching_page(&site, &manifest.courses);
        fs::write(output_dir.join("teaching.html"), html.into_string())?;
        pages.push(WrittenPage {
            title: "Teaching".to_string(),
            output: "teaching.html".to_string(),
        });
    }

    if !manifest.experience.is_empty() {
        let html = render_cv_page(&site, &manifest.experience);
        fs::write(output_dir.join("cv.html"), html.into_string())?;
        pages.push(WrittenPage {
            title: "CV".to_string(),
            output: "cv.html".to_string(),
        });
    }

    if !manifest.news.is_empty() {
        let html = render_news_page(&site, &manifest.news);
        fs::write(output_dir.join("news.html"), html.into_string())?;
        pages.push(WrittenPage {
            title: "News".to_string(),
            output: "news.html".to_string(),
        });
    }

    for page in manifest.pages.iter().filter(|p| !p.is_link) {
        let html = render_markdown_page(&site, page);
        let filename = format!("{}.html", page.slug);
        fs::write(output_dir.join(&filename), html.into_string())?;
        pages.push(WrittenPage {
            title: page.title.clone(),
            output: filename,
        });
    }

    let assets_copied = copy_assets(&source_dir.join("assets"), output_dir)?;

    Ok(GenerateSummary {
        pages,
        publication_pages,
        assets_copied,
        stylesheet,
        search_index,
    })
}

/// First 8 hex characters of the SHA-256 of `content`.
fn fingerprint(content: &[u8]) -> String {
    let digest = Sha256::digest(content);
    digest.iter().take(4).map(|b| format!("{b:02x}")).collect()
}

/// Copy `assets/` into the output root, preserving structure.
/// Returns the number of files copied; a missing assets dir copies nothing.
fn copy_assets(assets_dir: &Path, output_dir: &Path) -> Result<usize, GenerateError> {
    if !assets_dir.is_dir() {
        return Ok(0);
    }
    let mut copied = 0;
    for entry in walkdir::WalkDir::new(assets_dir) {
        let entry = entry?;
        let rel = entry
            .path()
            .strip_prefix(assets_dir)
            .expect("walkdir yields children of its root");
        let dst = output_dir.join("assets").join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&dst)?;
        } else {
            if let Some(parent) = dst.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &dst)?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Render markdown to an HTML string.
fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    out
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure.
fn base_document(site: &Site, page_title: &str, current: &str, content: Markup) -> Markup {
    let full_title = if page_title.is_empty() {
        site.title.to_string()
    } else {
        format!("{} · {}", page_title, site.title)
    };
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (full_title) }
                link rel="stylesheet" href=(site.css_href);
            }
            body {
                (site_header(site, current))
                (content)
                footer.site-footer {
                    p { (site.profile.name) " · " (site.profile.affiliation) }
                }
            }
        }
    }
}

/// Renders the site header: name linking home, then the flat nav.
fn site_header(site: &Site, current: &str) -> Markup {
    html! {
        header.site-header {
            a.site-name href="/" { (site.title) }
            nav.site-nav {
                ul {
                    @for item in site.navigation {
                        @let is_current = !item.external && item.href == current;
                        li class=[is_current.then_some("current")] {
                            @if item.external {
                                a href=(item.href) target="_blank" rel="noopener" { (item.title) }
                            } @else {
                                a href=(item.href) { (item.title) }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Author list with the site owner's name emphasized.
fn render_authors(authors: &[String], owner: &str) -> Markup {
    html! {
        @for (i, author) in authors.iter().enumerate() {
            @if i > 0 { ", " }
            @if author == owner {
                strong { (author) }
            } @else {
                (author)
            }
        }
    }
}

/// Kind/venue/year line shown under a publication title.
fn publication_meta(publication: &Publication) -> Markup {
    html! {
        span.pub-venue { (publication.venue) }
        ", "
        span.pub-year { (publication.year) }
        " · "
        span.pub-kind { (publication.kind.label()) }
    }
}

/// Inline link row for a publication (PDF, DOI, page).
fn publication_links(publication: &Publication) -> Markup {
    html! {
        @if let Some(pdf) = &publication.pdf {
            a.pub-link href=(pdf) { "PDF" }
        }
        @if let Some(doi) = &publication.doi {
            a.pub-link href={ "https://doi.org/" (doi) } { "DOI" }
        }
        @if let Some(link) = &publication.link {
            a.pub-link href=(link) { "Link" }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the home page: hero, interests, search widget, recent items.
fn render_home(site: &Site, manifest: &Manifest) -> Markup {
    let recent_pubs = recent_publications(
        &manifest.publications,
        manifest.config.search.recent_publications,
    );
    let recent = recent_news(&manifest.news, manifest.config.search.recent_news);

    let content = html! {
        main.home-page {
            section.hero {
                h1 { (manifest.profile.name) }
                p.hero-title { (manifest.profile.title) }
                p.hero-affiliation { (manifest.profile.affiliation) }
                p.hero-contact {
                    a href={ "mailto:" (manifest.profile.email) } { (manifest.profile.email) }
                    @for link in &manifest.profile.links {
                        " · "
                        a href=(link.url) target="_blank" rel="noopener" { (link.label) }
                    }
                }
            }
            @if !manifest.profile.interests.is_empty() {
                section.interests {
                    h2 { "Research Interests" }
                    ul.interest-chips {
                        @for interest in &manifest.profile.interests {
                            li { (interest) }
                        }
                    }
                }
            }
            section.site-search data-index-url=(site.index_href) data-max-results=(site.max_results) {
                h2 { "Search" }
                input type="search" class="search-input" placeholder="Search publications, teaching, news..." aria-label="Search this site";
                ul.search-results hidden {}
                p.search-empty hidden { "No results." }
            }
            @if !recent_pubs.is_empty() {
                section.recent-publications {
                    h2 { "Recent Publications" }
                    ul.publication-list {
                        @for publication in &recent_pubs {
                            li.publication {
                                a.pub-title href={ "/publications/" (publication.slug()) "/" } {
                                    (publication.title)
                                }
                                p.pub-authors { (render_authors(&publication.authors, &manifest.profile.name)) }
                                p.pub-meta { (publication_meta(publication)) }
                            }
                        }
                    }
                    p { a href="/publications/" { "All publications →" } }
                }
            }
            @if !recent.is_empty() {
                section.recent-news {
                    h2 { "News" }
                    ul.news-list {
                        @for item in &recent {
                            li.news-item {
                                span.news-date { (item.date) }
                                " "
                                (item.title)
                            }
                        }
                    }
                }
            }
        }
        script { (PreEscaped(SEARCH_JS)) }
    };

    base_document(site, "", "/", content)
}

/// Renders the publications page: filter toolbar + year-grouped list.
///
/// Facets come from the full publication collection, never the filtered
/// view. Every list item carries `data-kind`/`data-year`/`data-text`
/// attributes so the embedded script can apply the same predicates
/// client-side without refetching anything.
fn render_publications_page(site: &Site, publications: &[Publication]) -> Markup {
    let facets = Facets::derive(publications);

    // Group by year, descending; authored order within a year.
    let mut by_year: BTreeMap<u16, Vec<&Publication>> = BTreeMap::new();
    for publication in publications {
        by_year.entry(publication.year).or_default().push(publication);
    }

    let content = html! {
        main.publications-page {
            h1 { "Publications" }
            form.filter-toolbar data-filter-list {
                input type="search" class="filter-query" placeholder="Search title, authors, venue..." aria-label="Filter publications";
                select.filter-year aria-label="Filter by year" {
                    option value="" { "All years" }
                    @for year in &facets.years {
                        option value=(year) { (year) }
                    }
                }
                fieldset.filter-kinds {
                    @for kind in &facets.kinds {
                        label {
                            input type="checkbox" value=(kind.tag());
                            (kind.label())
                        }
                    }
                }
            }
            p.no-results hidden {
                "No publications match. "
                button type="button" class="filter-clear" { "Clear filters" }
            }
            @for (year, group) in by_year.iter().rev() {
                section.year-group data-year-group=(year) {
                    h2 { (year) }
                    ul.publication-list {
                        @for publication in group {
                            li.publication
                                data-kind=(publication.kind.tag())
                                data-year=(publication.year)
                                data-text=(publication_haystack(publication)) {
                                a.pub-title href={ "/publications/" (publication.slug()) "/" } {
                                    (publication.title)
                                }
                                p.pub-authors { (render_authors(&publication.authors, &site.profile.name)) }
                                p.pub-meta {
                                    (publication_meta(publication))
                                    " "
                                    (publication_links(publication))
                                }
                            }
                        }
                    }
                }
            }
        }
        script { (PreEscaped(SEARCH_JS)) }
    };

    base_document(site, "Publications", "/publications/", content)
}

/// The lowercased haystack the client-side text predicate scans: title,
/// comma-joined authors, venue, abstract, keywords — the same fields the
/// build-time predicate uses.
fn publication_haystack(publication: &Publication) -> String {
    let mut text = format!(
        "{} {} {}",
        publication.title,
        publication.authors.join(", "),
        publication.venue
    );
    if let Some(abstract_text) = &publication.abstract_text {
        text.push(' ');
        text.push_str(abstract_text);
    }
    for keyword in &publication.keywords {
        text.push(' ');
        text.push_str(keyword);
    }
    text.to_lowercase()
}

/// Renders a single publication's detail page.
fn render_publication_page(site: &Site, publication: &Publication) -> Markup {
    let content = html! {
        main.publication-page {
            nav.breadcrumb {
                a href="/" { "Home" }
                " › "
                a href="/publications/" { "Publications" }
            }
            article {
                h1 { (publication.title) }
                p.pub-authors { (render_authors(&publication.authors, &site.profile.name)) }
                p.pub-meta {
                    (publication_meta(publication))
                    " "
                    (publication_links(publication))
                }
                @if let Some(abstract_text) = &publication.abstract_text {
                    section.abstract {
                        h2 { "Abstract" }
                        p { (abstract_text) }
                    }
                }
                @if !publication.keywords.is_empty() {
                    ul.keyword-chips {
                        @for keyword in &publication.keywords {
                            li { (keyword) }
                        }
                    }
                }
                section.bibtex {
                    h2 { "BibTeX" }
                    pre { code { (bibtex::format_entry(publication)) } }
                }
            }
        }
    };

    base_document(site, &publication.title, "/publications/", content)
}

/// Renders the teaching page: courses grouped by year, descending.
fn render_teaching_page(site: &Site, courses: &[Course]) -> Markup {
    let mut by_year: BTreeMap<u16, Vec<&Course>> = BTreeMap::new();
    for course in courses {
        by_year.entry(course.year).or_default().push(course);
    }

    let content = html! {
        main.teaching-page {
            h1 { "Teaching" }
            @for (year, group) in by_year.iter().rev() {
                section.year-group {
                    h2 { (year) }
                    @for course in group {
                        article.course id=(course.slug()) {
                            h3 {
                                @if let Some(url) = &course.url {
                                    a href=(url) { (course.code) ": " (course.title) }
                                } @else {
                                    (course.code) ": " (course.title)
                                }
                            }
                            p.course-meta {
                                (course.term) " " (course.year)
                                @if let Some(level) = &course.level {
                                    " · " (level)
                                }
                            }
                            @if let Some(description) = &course.description {
                                p.course-description { (description) }
                            }
                        }
                    }
                }
            }
        }
    };

    base_document(site, "Teaching", "/teaching.html", content)
}

/// Renders the CV page: experience timeline, newest first by start year.
fn render_cv_page(site: &Site, experience: &[Experience]) -> Markup {
    let mut sorted: Vec<&Experience> = experience.iter().collect();
    sorted.sort_by(|a, b| b.start_year.cmp(&a.start_year));

    let content = html! {
        main.cv-page {
            h1 { "Curriculum Vitae" }
            section.experience {
                @for position in &sorted {
                    article.position {
                        h3 { (position.role) }
                        p.position-meta {
                            (position.institution) " · " (position.span())
                        }
                        @if let Some(description) = &position.description {
                            p.position-description { (description) }
                        }
                    }
                }
            }
        }
    };

    base_document(site, "CV", "/cv.html", content)
}

/// Renders the news page: dated announcements, newest first.
fn render_news_page(site: &Site, news: &[NewsItem]) -> Markup {
    let sorted = recent_news(news, usize::MAX);

    let content = html! {
        main.news-page {
            h1 { "News" }
            @for item in &sorted {
                article.news-item id={ (item.date) "-" (slugify(&item.title)) } {
                    h3 { (item.title) }
                    p.news-date { (item.date) }
                    div.news-body { (PreEscaped(markdown_to_html(&item.body))) }
                    @if let Some(url) = &item.url {
                        p { a href=(url) { "More →" } }
                    }
                }
            }
        }
    };

    base_document(site, "News", "/news.html", content)
}

/// Renders a markdown content page.
fn render_markdown_page(site: &Site, page: &Page) -> Markup {
    let body_html = markdown_to_html(&page.body);
    let current = format!("/{}.html", page.slug);

    let content = html! {
        main.content-page {
            article.page-content {
                (PreEscaped(body_html))
            }
        }
    };

    base_document(site, &page.title, &current, content)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ProfileLink, PublicationKind, Term};

    fn profile() -> Profile {
        Profile {
            name: "Ada Lovelace".to_string(),
            title: "Professor of Computing".to_string(),
            affiliation: "Analytical Engine Institute".to_string(),
            email: "ada@example.org".to_string(),
            interests: vec!["Machine Learning".to_string()],
            links: vec![ProfileLink {
                label: "Scholar".to_string(),
                url: "https://scholar.example.org".to_string(),
            }],
        }
    }

    fn navigation() -> Vec<NavItem> {
        vec![
            NavItem {
                title: "Publications".to_string(),
                href: "/publications/".to_string(),
                external: false,
            },
            NavItem {
                title: "scholar".to_string(),
                href: "https://scholar.example.org".to_string(),
                external: true,
            },
        ]
    }

    fn site_for<'a>(profile: &'a Profile, nav: &'a [NavItem]) -> Site<'a> {
        Site {
            profile,
            navigation: nav,
            title: &profile.name,
            css_href: "/style.abcd1234.css".to_string(),
            index_href: "/search-index.abcd1234.json".to_string(),
            max_results: 10,
        }
    }

    fn publication() -> Publication {
        Publication {
            id: None,
            title: "Explainable AI for Healthcare".to_string(),
            authors: vec!["Ada Lovelace".to_string(), "Grace Hopper".to_string()],
            venue: "Journal of Machine Learning Research".to_string(),
            year: 2023,
            kind: PublicationKind::Journal,
            link: Some("https://example.org/paper".to_string()),
            pdf: Some("https://example.org/paper.pdf".to_string()),
            doi: Some("10.1000/xyz".to_string()),
            abstract_text: Some("We study interpretability.".to_string()),
            keywords: vec!["XAI".to_string()],
        }
    }

    #[test]
    fn base_document_includes_doctype_and_stylesheet() {
        let profile = profile();
        let nav = navigation();
        let site = site_for(&profile, &nav);
        let doc = base_document(&site, "Test", "/", html! { p { "x" } }).into_string();
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains(r#"href="/style.abcd1234.css""#));
        assert!(doc.contains("<title>Test · Ada Lovelace</title>"));
    }

    #[test]
    fn home_title_is_site_title_alone() {
        let profile = profile();
        let nav = navigation();
        let site = site_for(&profile, &nav);
        let doc = base_document(&site, "", "/", html! { p { "x" } }).into_string();
        assert!(doc.contains("<title>Ada Lovelace</title>"));
    }

    #[test]
    fn nav_marks_current_item() {
        let profile = profile();
        let nav = navigation();
        let site = site_for(&profile, &nav);
        let header = site_header(&site, "/publications/").into_string();
        assert!(header.contains(r#"class="current""#));
    }

    #[test]
    fn nav_external_links_open_new_tab() {
        let profile = profile();
        let nav = navigation();
        let site = site_for(&profile, &nav);
        let header = site_header(&site, "/").into_string();
        assert!(header.contains(r#"target="_blank""#));
        assert!(header.contains(r#"rel="noopener""#));
    }

    #[test]
    fn authors_emphasize_owner() {
        let markup =
            render_authors(&["Ada Lovelace".to_string(), "Grace Hopper".to_string()], "Ada Lovelace")
                .into_string();
        assert!(markup.contains("<strong>Ada Lovelace</strong>"));
        assert!(!markup.contains("<strong>Grace Hopper</strong>"));
        assert!(markup.contains(", Grace Hopper"));
    }

    #[test]
    fn publications_page_has_filter_toolbar_facets() {
        let profile = profile();
        let nav = navigation();
        let site = site_for(&profile, &nav);
        let pubs = vec![
            publication(),
            Publication {
                year: 2021,
                kind: PublicationKind::Conference,
                ..publication()
            },
        ];
        let page = render_publications_page(&site, &pubs).into_string();

        // Year select: descending facet options
        assert!(page.contains(r#"<option value="2023">2023</option>"#));
        assert!(page.contains(r#"<option value="2021">2021</option>"#));
        let pos_2023 = page.find(">2023<").unwrap();
        let pos_2021 = page.find(">2021<").unwrap();
        assert!(pos_2023 < pos_2021);

        // Kind checkboxes from facets
        assert!(page.contains(r#"value="journal""#));
        assert!(page.contains(r#"value="conference""#));
        // Kind not present in the collection is not offered
        assert!(!page.contains(r#"value="thesis""#));
    }

    #[test]
    fn publications_page_items_carry_data_attributes() {
        let profile = profile();
        let nav = navigation();
        let site = site_for(&profile, &nav);
        let page = render_publications_page(&site, &[publication()]).into_string();

        assert!(page.contains(r#"data-kind="journal""#));
        assert!(page.contains(r#"data-year="2023""#));
        // Haystack is lowercased and includes keyword and authors
        assert!(page.contains("xai"));
        assert!(page.contains("grace hopper"));
    }

    #[test]
    fn publications_page_groups_by_year_descending() {
        let profile = profile();
        let nav = navigation();
        let site = site_for(&profile, &nav);
        let pubs = vec![
            Publication {
                year: 2021,
                ..publication()
            },
            publication(),
        ];
        let page = render_publications_page(&site, &pubs).into_string();
        let pos_2023 = page.find("<h2>2023</h2>").unwrap();
        let pos_2021 = page.find("<h2>2021</h2>").unwrap();
        assert!(pos_2023 < pos_2021);
    }

    #[test]
    fn publications_page_has_no_results_affordance() {
        let profile = profile();
        let nav = navigation();
        let site = site_for(&profile, &nav);
        let page = render_publications_page(&site, &[publication()]).into_string();
        assert!(page.contains("no-results"));
        assert!(page.contains("Clear filters"));
    }

    #[test]
    fn publication_page_has_abstract_links_and_bibtex() {
        let profile = profile();
        let nav = navigation();
        let site = site_for(&profile, &nav);
        let page = render_publication_page(&site, &publication()).into_string();

        assert!(page.contains("We study interpretability."));
        assert!(page.contains(r#"href="https://example.org/paper.pdf""#));
        assert!(page.contains(r#"href="https://doi.org/10.1000/xyz""#));
        assert!(page.contains("@article{lovelace2023explainable,"));
    }

    #[test]
    fn publication_haystack_spans_all_search_fields() {
        let text = publication_haystack(&publication());
        assert!(text.contains("explainable ai for healthcare"));
        assert!(text.contains("ada lovelace, grace hopper"));
        assert!(text.contains("journal of machine learning research"));
        assert!(text.contains("we study interpretability."));
        assert!(text.contains("xai"));
    }

    #[test]
    fn teaching_page_anchors_match_course_slugs() {
        let profile = profile();
        let nav = navigation();
        let site = site_for(&profile, &nav);
        let course = Course {
            code: "CS 4780".to_string(),
            title: "Machine Learning".to_string(),
            term: Term::Fall,
            year: 2024,
            level: Some("Undergraduate".to_string()),
            description: None,
            url: None,
        };
        let page = render_teaching_page(&site, &[course]).into_string();
        assert!(page.contains(r#"id="cs-4780-fall-2024""#));
        assert!(page.contains("CS 4780: Machine Learning"));
        assert!(page.contains("Fall 2024"));
        assert!(page.contains("Undergraduate"));
    }

    #[test]
    fn cv_page_newest_position_first() {
        let profile = profile();
        let nav = navigation();
        let site = site_for(&profile, &nav);
        let experience = vec![
            Experience {
                role: "Postdoc".to_string(),
                institution: "MIT".to_string(),
                start_year: 2019,
                end_year: Some(2023),
                description: None,
            },
            Experience {
                role: "Assistant Professor".to_string(),
                institution: "Cornell".to_string(),
                start_year: 2023,
                end_year: None,
                description: None,
            },
        ];
        let page = render_cv_page(&site, &experience).into_string();
        let pos_prof = page.find("Assistant Professor").unwrap();
        let pos_postdoc = page.find("Postdoc").unwrap();
        assert!(pos_prof < pos_postdoc);
        assert!(page.contains("2023–present"));
    }

    #[test]
    fn news_page_renders_markdown_bodies() {
        let profile = profile();
        let nav = navigation();
        let site = site_for(&profile, &nav);
        let news = vec![NewsItem {
            date: "2024-09-01".to_string(),
            title: "Paper accepted".to_string(),
            body: "Accepted at **NeurIPS**.".to_string(),
            url: None,
        }];
        let page = render_news_page(&site, &news).into_string();
        assert!(page.contains("<strong>NeurIPS</strong>"));
        assert!(page.contains(r#"id="2024-09-01-paper-accepted""#));
    }

    #[test]
    fn markdown_page_converts_body() {
        let profile = profile();
        let nav = navigation();
        let site = site_for(&profile, &nav);
        let page = Page {
            title: "Research Statement".to_string(),
            link_title: "research".to_string(),
            slug: "research".to_string(),
            body: "# Research Statement\n\nThis is **bold** and *italic*.".to_string(),
            in_nav: true,
            sort_key: 40,
            is_link: false,
        };
        let html = render_markdown_page(&site, &page).into_string();
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<em>italic</em>"));
        assert!(html.contains("<title>Research Statement · Ada Lovelace</title>"));
    }

    #[test]
    fn html_escape_in_maud() {
        // Maud should automatically escape HTML in content
        let profile = profile();
        let nav = navigation();
        let site = site_for(&profile, &nav);
        let mut p = publication();
        p.title = "<script>alert('xss')</script>".to_string();
        let page = render_publication_page(&site, &p).into_string();
        assert!(!page.contains("<script>alert"));
        assert!(page.contains("&lt;script&gt;"));
    }

    #[test]
    fn fingerprint_is_8_hex_chars_and_content_sensitive() {
        let a = fingerprint(b"hello");
        let b = fingerprint(b"hello!");
        assert_eq!(a.len(), 8);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
        assert_eq!(a, fingerprint(b"hello"));
    }
}
