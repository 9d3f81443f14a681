//! Content loading and manifest generation.
//!
//! Stage 1 of the vitae build pipeline. Reads the content directory,
//! validates every authored record, and produces a structured manifest that
//! subsequent stages consume.
//!
//! ## Content Directory Layout
//!
//! ```text
//! content/
//! ├── config.toml            # Site config (optional)
//! ├── profile.toml           # Researcher identity (required)
//! ├── publications.toml      # [[publications]] records
//! ├── teaching.toml          # [[courses]] records
//! ├── experience.toml        # [[experience]] records
//! ├── news.toml              # [[news]] records
//! ├── 040-research.md        # Page (numbered = shown in nav)
//! ├── 050-scholar.md         # Link page (URL-only .md → external nav link)
//! └── assets/                # Static assets → copied to output root
//! ```
//!
//! Every collection file is optional; a missing file means an empty
//! collection and an omitted nav section. `profile.toml` is required — a
//! portfolio needs an owner.
//!
//! ## Validation
//!
//! TOML syntax errors and unknown keys abort immediately with the file's
//! path. Shape validation then runs over *every* record and aggregates
//! *every* violation into one [`ValidationReport`]; the load fails with the
//! full report rather than the first problem. This is a build-time fatal
//! condition — the site is never generated from invalid data.

use crate::config::{self, SiteConfig};
use crate::content::{Course, Experience, NewsItem, Profile, Publication, Violation};
use crate::naming::parse_entry_name;
use crate::types::{NavItem, Page};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("{path}: {source}")]
    Toml {
        path: PathBuf,
        source: Box<toml::de::Error>,
    },
    #[error("profile.toml not found in {0} (a portfolio needs an owner)")]
    MissingProfile(PathBuf),
    #[error("content validation failed: {0}")]
    Validation(ValidationReport),
}

/// Every shape violation found in the content directory, reported together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} violation(s)", self.violations.len())?;
        for v in &self.violations {
            writeln!(f, "  {v}")?;
        }
        Ok(())
    }
}

/// Manifest output from the load stage.
#[derive(Debug, Serialize, Deserialize)]
pub struct Manifest {
    pub profile: Profile,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub publications: Vec<Publication>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub courses: Vec<Course>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub experience: Vec<Experience>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub news: Vec<NewsItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pages: Vec<Page>,
    pub navigation: Vec<NavItem>,
    pub config: SiteConfig,
}

// Wrapper shapes for the collection files. Top-level array-of-tables keyed
// by the collection name, unknown keys rejected.

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct PublicationsFile {
    publications: Vec<Publication>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct CoursesFile {
    courses: Vec<Course>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ExperienceFile {
    experience: Vec<Experience>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct NewsFile {
    news: Vec<NewsItem>,
}

pub fn load(root: &Path) -> Result<Manifest, LoadError> {
    let config = config::load_config(root)?;

    let profile: Profile = match read_toml(&root.join("profile.toml"))? {
        Some(p) => p,
        None => return Err(LoadError::MissingProfile(root.to_path_buf())),
    };

    let publications = read_toml::<PublicationsFile>(&root.join("publications.toml"))?
        .unwrap_or_default()
        .publications;
    let courses = read_toml::<CoursesFile>(&root.join("teaching.toml"))?
        .unwrap_or_default()
        .courses;
    let experience = read_toml::<ExperienceFile>(&root.join("experience.toml"))?
        .unwrap_or_default()
        .experience;
    let news = read_toml::<NewsFile>(&root.join("news.toml"))?
        .unwrap_or_default()
        .news;

    let pages = parse_pages(root)?;

    let mut violations = Vec::new();
    profile.validate(&mut violations);
    for (i, p) in publications.iter().enumerate() {
        p.validate(i, &mut violations);
    }
    for (i, c) in courses.iter().enumerate() {
        c.validate(i, &mut violations);
    }
    for (i, e) in experience.iter().enumerate() {
        e.validate(i, &mut violations);
    }
    for (i, n) in news.iter().enumerate() {
        n.validate(i, &mut violations);
    }
    if !violations.is_empty() {
        return Err(LoadError::Validation(ValidationReport { violations }));
    }

    let navigation = build_navigation(&publications, &courses, &experience, &news, &pages);

    Ok(Manifest {
        profile,
        publications,
        courses,
        experience,
        news,
        pages,
        navigation,
        config,
    })
}

/// Parse a TOML file into `T`. Returns `Ok(None)` if the file doesn't exist.
fn read_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>, LoadError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value = toml::from_str(&content).map_err(|source| LoadError::Toml {
        path: path.to_path_buf(),
        source: Box::new(source),
    })?;
    Ok(Some(value))
}

/// Parse all markdown files in the root directory into pages.
///
/// Each `.md` file becomes a page. Numbered files (`NNN-name.md`) appear in
/// navigation sorted by number; unnumbered files are generated but hidden.
/// If a file's only content is a URL, it becomes an external link in the nav.
fn parse_pages(root: &Path) -> Result<Vec<Page>, LoadError> {
    let mut md_files: Vec<PathBuf> = fs::read_dir(root)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .map(|e| e.eq_ignore_ascii_case("md"))
                    .unwrap_or(false)
        })
        .collect();

    md_files.sort();

    let mut pages = Vec::new();
    for md_path in &md_files {
        let stem = md_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        let parsed = parse_entry_name(&stem);
        let (in_nav, sort_key) = match parsed.number {
            Some(num) => (true, num),
            None => (false, u32::MAX),
        };
        let link_title = parsed.display_title.clone();
        let slug = if parsed.name.is_empty() {
            stem.clone()
        } else {
            parsed.name.clone()
        };

        let content = fs::read_to_string(md_path)?;
        let trimmed = content.trim();

        // A page whose only content is a URL becomes an external link
        let is_link = !trimmed.contains('\n')
            && (trimmed.starts_with("http://") || trimmed.starts_with("https://"));

        let title = if is_link {
            link_title.clone()
        } else {
            content
                .lines()
                .find(|line| line.starts_with("# "))
                .map(|line| line.trim_start_matches("# ").trim().to_string())
                .unwrap_or_else(|| link_title.clone())
        };

        pages.push(Page {
            title,
            link_title,
            slug,
            body: content,
            in_nav,
            sort_key,
            is_link,
        });
    }

    pages.sort_by_key(|p| p.sort_key);
    Ok(pages)
}

/// Build the flat navigation: built-in sections for non-empty collections,
/// then numbered pages in prefix order (link pages go straight to their URL).
fn build_navigation(
    publications: &[Publication],
    courses: &[Course],
    experience: &[Experience],
    news: &[NewsItem],
    pages: &[Page],
) -> Vec<NavItem> {
    let mut nav = Vec::new();

    if !publications.is_empty() {
        nav.push(NavItem {
            title: "Publications".to_string(),
            href: "/publications/".to_string(),
            external: false,
        });
    }
    if !courses.is_empty() {
        nav.push(NavItem {
            title: "Teaching".to_string(),
            href: "/teaching.html".to_string(),
            external: false,
        });
    }
    if !experience.is_empty() {
        nav.push(NavItem {
            title: "CV".to_string(),
            href: "/cv.html".to_string(),
            external: false,
        });
    }
    if !news.is_empty() {
        nav.push(NavItem {
            title: "News".to_string(),
            href: "/news.html".to_string(),
            external: false,
        });
    }

    for page in pages.iter().filter(|p| p.in_nav) {
        if page.is_link {
            nav.push(NavItem {
                title: page.link_title.clone(),
                href: page.body.trim().to_string(),
                external: true,
            });
        } else {
            nav.push(NavItem {
                title: page.link_title.clone(),
                href: format!("/{}.html", page.slug),
                external: false,
            });
        }
    }

    nav
}
