//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults
//! are the base layer; a user `config.toml` in the content root overrides
//! just the keys it names.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! content_root = "content"  # Path to content directory
//!
//! [site]
//! # title = "Ada Lovelace"  # Browser/tab title (defaults to profile name)
//!
//! [search]
//! max_results = 10          # Result-list truncation for the search widget
//! recent_publications = 5   # Publications shown on the home page
//! recent_news = 3           # News items shown on the home page
//!
//! [theme]
//! content_width = "44rem"   # Max width of the text column (CSS value)
//! font_family = "Georgia, 'Times New Roman', serif"
//!
//! [colors.light]
//! background = "#ffffff"
//! text = "#1a1a1a"
//! text_muted = "#666666"    # Venues, dates, nav
//! border = "#e0e0e0"
//! link = "#1a4f8b"
//! link_hover = "#0d2d54"
//! accent = "#1a4f8b"        # Interest chips, active filter controls
//!
//! [colors.dark]
//! background = "#121212"
//! text = "#e8e8e8"
//! text_muted = "#9a9a9a"
//! border = "#333333"
//! link = "#7fb0e8"
//! link_hover = "#a8cbf0"
//! accent = "#7fb0e8"
//!
//! [processing]
//! max_workers = 4           # Max parallel render workers (omit for auto)
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse — override just the values you want. Unknown
//! keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Path to the content root directory.
    #[serde(default = "default_content_root")]
    pub content_root: String,
    /// Site identity overrides.
    pub site: SiteSection,
    /// Search widget tuning.
    pub search: SearchConfig,
    /// Typography and layout settings.
    pub theme: ThemeConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
    /// Parallel rendering settings.
    pub processing: ProcessingConfig,
}

fn default_content_root() -> String {
    "content".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_root: default_content_root(),
            site: SiteSection::default(),
            search: SearchConfig::default(),
            theme: ThemeConfig::default(),
            colors: ColorConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.max_results == 0 {
            return Err(ConfigError::Validation(
                "search.max_results must be at least 1".into(),
            ));
        }
        if self.search.recent_publications == 0 || self.search.recent_news == 0 {
            return Err(ConfigError::Validation(
                "search.recent_publications and search.recent_news must be at least 1".into(),
            ));
        }
        if self.theme.content_width.trim().is_empty() {
            return Err(ConfigError::Validation(
                "theme.content_width must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Site identity overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    /// Browser/tab title. When absent, the profile name is used.
    pub title: Option<String>,
}

/// Search widget tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Result-list truncation bound for the search widget.
    pub max_results: usize,
    /// Publications shown in the home page "recent" section.
    pub recent_publications: usize,
    /// News items shown in the home page "recent" section.
    pub recent_news: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: crate::search::DEFAULT_MAX_RESULTS,
            recent_publications: 5,
            recent_news: 3,
        }
    }
}

/// Parallel rendering settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel render workers.
    /// When absent or null, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_workers: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_workers.map(|n| n.min(cores)).unwrap_or(cores)
}

/// Typography and layout settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Max width of the text column (CSS value).
    pub content_width: String,
    /// Body font stack (CSS value).
    pub font_family: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            content_width: "44rem".to_string(),
            font_family: "Georgia, 'Times New Roman', serif".to_string(),
        }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Light mode color scheme.
    pub light: ColorScheme,
    /// Dark mode color scheme.
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    /// Background color.
    pub background: String,
    /// Primary text color.
    pub text: String,
    /// Muted/secondary text color (venues, dates, nav).
    pub text_muted: String,
    /// Border color.
    pub border: String,
    /// Link color.
    pub link: String,
    /// Link hover color.
    pub link_hover: String,
    /// Accent color (interest chips, active filter controls).
    pub accent: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#1a1a1a".to_string(),
            text_muted: "#666666".to_string(),
            border: "#e0e0e0".to_string(),
            link: "#1a4f8b".to_string(),
            link_hover: "#0d2d54".to_string(),
            accent: "#1a4f8b".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#121212".to_string(),
            text: "#e8e8e8".to_string(),
            text_muted: "#9a9a9a".to_string(),
            border: "#333333".to_string(),
            link: "#7fb0e8".to_string(),
            link_hover: "#a8cbf0".to_string(),
            accent: "#7fb0e8".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# vitae Configuration
# ===================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file in the content root as config.toml. Only the keys you
# want to override need to be present. Unknown keys will cause an error.

# Path to content directory
content_root = "content"

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
# Browser/tab title. Defaults to the profile name.
# title = "Ada Lovelace"

# ---------------------------------------------------------------------------
# Search widget
# ---------------------------------------------------------------------------
[search]
# Result-list truncation bound for the search widget.
max_results = 10

# Publications shown in the home page "recent" section.
recent_publications = 5

# News items shown in the home page "recent" section.
recent_news = 3

# ---------------------------------------------------------------------------
# Theme / typography
# ---------------------------------------------------------------------------
[theme]
# Max width of the text column (CSS value).
content_width = "44rem"

# Body font stack (CSS value).
font_family = "Georgia, 'Times New Roman', serif"

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
text = "#1a1a1a"
text_muted = "#666666"    # Venues, dates, nav
border = "#e0e0e0"
link = "#1a4f8b"
link_hover = "#0d2d54"
accent = "#1a4f8b"        # Interest chips, active filter controls

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#121212"
text = "#e8e8e8"
text_muted = "#9a9a9a"
border = "#333333"
link = "#7fb0e8"
link_hover = "#a8cbf0"
accent = "#7fb0e8"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel render workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_workers = 4
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {light_bg};
    --color-text: {light_text};
    --color-text-muted: {light_text_muted};
    --color-border: {light_border};
    --color-link: {light_link};
    --color-link-hover: {light_link_hover};
    --color-accent: {light_accent};
}}

@media (prefers-color-scheme: dark) {{
    :root {{
        --color-bg: {dark_bg};
        --color-text: {dark_text};
        --color-text-muted: {dark_text_muted};
        --color-border: {dark_border};
        --color-link: {dark_link};
        --color-link-hover: {dark_link_hover};
        --color-accent: {dark_accent};
    }}
}}"#,
        light_bg = colors.light.background,
        light_text = colors.light.text,
        light_text_muted = colors.light.text_muted,
        light_border = colors.light.border,
        light_link = colors.light.link,
        light_link_hover = colors.light.link_hover,
        light_accent = colors.light.accent,
        dark_bg = colors.dark.background,
        dark_text = colors.dark.text,
        dark_text_muted = colors.dark.text_muted,
        dark_border = colors.dark.border,
        dark_link = colors.dark.link,
        dark_link_hover = colors.dark.link_hover,
        dark_accent = colors.dark.accent,
    )
}

/// Generate CSS custom properties from theme config.
pub fn generate_theme_css(theme: &ThemeConfig) -> String {
    format!(
        r#":root {{
    --content-width: {content_width};
    --font-family: {font_family};
}}"#,
        content_width = theme.content_width,
        font_family = theme.font_family,
    )
}
