//! Site configuration loading and validation
//!
//! The site ships with an embedded `site.toml`. Every field has a default so
//! a partial document (or an empty one) is valid. A few settings can be
//! overridden from the page URL, e.g. `?assets=/staging/models&log=debug`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::page::{canvas_id, MAX_GRID_CELLS};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Grid must have at least one column and one row")]
    EmptyGrid,
    #[error("Grid of {columns}x{rows} exceeds the {max} cell limit")]
    GridTooLarge { columns: usize, rows: usize, max: usize },
    #[error("Grid has {cells} cells but {products} products are configured")]
    GridOverflow { cells: usize, products: usize },
    #[error("Product name at position {0} is empty")]
    EmptyProductName(usize),
    #[error("Products at positions {first} and {second} share the page id {id}")]
    DuplicateProduct { first: usize, second: usize, id: String },
    #[error("Header font sizes must lie within 40..=100 with min <= max (got min={min}, max={max}, narrow={narrow})")]
    FontRange { min: u32, max: u32, narrow: u32 },
    #[error("Header scroll ranges must be non-zero")]
    ZeroScrollRange,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub site: SiteSection,
    #[serde(default)]
    pub assets: AssetsConfig,
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub header: HeaderConfig,
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Static page copy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSection {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_description")]
    pub description: String,
    /// Social link shown under the header
    #[serde(default = "default_instagram")]
    pub instagram: String,
    /// Icon shown for the social link, relative to the page
    #[serde(default = "default_instagram_icon")]
    pub instagram_icon: String,
    /// Descriptive lines shown above the viewer grid
    #[serde(default = "default_tagline")]
    pub tagline: Vec<String>,
    /// Banner below the grid
    #[serde(default = "default_closing")]
    pub closing: String,
    #[serde(default = "default_footer")]
    pub footer: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: default_title(),
            description: default_description(),
            instagram: default_instagram(),
            instagram_icon: default_instagram_icon(),
            tagline: default_tagline(),
            closing: default_closing(),
            footer: default_footer(),
        }
    }
}

fn default_title() -> String {
    "Swanwoo Pedals".to_string()
}

fn default_description() -> String {
    "DIY Effects Pedals, Custom Illustrating and Hand-Wiring".to_string()
}

fn default_instagram() -> String {
    "https://www.instagram.com/swanwoo_pedals/".to_string()
}

fn default_instagram_icon() -> String {
    "instagram.webp".to_string()
}

fn default_tagline() -> Vec<String> {
    vec![
        "DIY Effects Pedals".to_string(),
        "Custom Illustrating, Hand-Wiring".to_string(),
        "Base In Incheon, Korea".to_string(),
    ]
}

fn default_closing() -> String {
    "More to come...".to_string()
}

fn default_footer() -> String {
    "Copyright 2025. @swanwoo_pedals All rights reserved.".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Directory holding one sub-directory per product
    #[serde(default = "default_asset_base")]
    pub base: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            base: default_asset_base(),
        }
    }
}

fn default_asset_base() -> String {
    "/swanwoo_pedals_obj".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_columns")]
    pub columns: usize,
    #[serde(default = "default_rows")]
    pub rows: usize,
    /// Products in cell order; remaining cells stay reserved
    #[serde(default = "default_products")]
    pub products: Vec<String>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: default_columns(),
            rows: default_rows(),
            products: default_products(),
        }
    }
}

fn default_columns() -> usize {
    3
}

fn default_rows() -> usize {
    3
}

fn default_products() -> Vec<String> {
    vec!["BigMuff".to_string(), "FuzzFactory".to_string()]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeaderConfig {
    #[serde(default = "default_min_font")]
    pub min_font_size: u32,
    #[serde(default = "default_max_font")]
    pub max_font_size: u32,
    /// Scroll distance (px) over which the title shrinks
    #[serde(default = "default_scroll_range")]
    pub scroll_range: u32,
    #[serde(default = "default_narrow_font")]
    pub narrow_font_size: u32,
    #[serde(default = "default_narrow_range")]
    pub narrow_scroll_range: u32,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            min_font_size: default_min_font(),
            max_font_size: default_max_font(),
            scroll_range: default_scroll_range(),
            narrow_font_size: default_narrow_font(),
            narrow_scroll_range: default_narrow_range(),
        }
    }
}

fn default_min_font() -> u32 {
    40
}

fn default_max_font() -> u32 {
    100
}

fn default_scroll_range() -> u32 {
    100
}

fn default_narrow_font() -> u32 {
    60
}

fn default_narrow_range() -> u32 {
    20
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewportConfig {
    /// Widths strictly below this are treated as narrow (mobile)
    #[serde(default = "default_breakpoint")]
    pub narrow_breakpoint: f64,
    #[serde(default = "default_throttle")]
    pub scroll_throttle_ms: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            narrow_breakpoint: default_breakpoint(),
            scroll_throttle_ms: default_throttle(),
        }
    }
}

fn default_breakpoint() -> f64 {
    768.0
}

fn default_throttle() -> f64 {
    10.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// trace, debug, info, warn, error
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

/// Hard limits for the header title, in px
pub const FONT_FLOOR: u32 = 40;
pub const FONT_CEILING: u32 = 100;

impl SiteConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let grid = &self.grid;
        if grid.columns == 0 || grid.rows == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        let cells = grid
            .columns
            .checked_mul(grid.rows)
            .filter(|cells| *cells <= MAX_GRID_CELLS)
            .ok_or(ConfigError::GridTooLarge {
                columns: grid.columns,
                rows: grid.rows,
                max: MAX_GRID_CELLS,
            })?;
        if grid.products.len() > cells {
            return Err(ConfigError::GridOverflow {
                cells,
                products: grid.products.len(),
            });
        }
        if let Some(idx) = grid.products.iter().position(|p| p.trim().is_empty()) {
            return Err(ConfigError::EmptyProductName(idx));
        }
        let mut seen: HashMap<String, usize> = HashMap::new();
        for (second, product) in grid.products.iter().enumerate() {
            let id = canvas_id(product);
            if let Some(&first) = seen.get(&id) {
                return Err(ConfigError::DuplicateProduct { first, second, id });
            }
            seen.insert(id, second);
        }

        let h = &self.header;
        let in_bounds = |v: u32| (FONT_FLOOR..=FONT_CEILING).contains(&v);
        if h.min_font_size > h.max_font_size
            || !in_bounds(h.min_font_size)
            || !in_bounds(h.max_font_size)
            || !in_bounds(h.narrow_font_size)
        {
            return Err(ConfigError::FontRange {
                min: h.min_font_size,
                max: h.max_font_size,
                narrow: h.narrow_font_size,
            });
        }
        if h.scroll_range == 0 || h.narrow_scroll_range == 0 {
            return Err(ConfigError::ZeroScrollRange);
        }
        Ok(())
    }

    /// Apply overrides from a URL search string (`?assets=..&log=..`)
    pub fn apply_query(&mut self, search: &str) {
        if let Some(base) = parse_query_param(search, "assets") {
            if !base.is_empty() {
                tracing::info!("Using asset base from URL parameter: {}", base);
                self.assets.base = base;
            }
        }
        if let Some(level) = parse_query_param(search, "log") {
            self.logging.level = level;
        }
    }

    /// Log level as a `tracing::Level`, falling back to INFO
    pub fn log_level(&self) -> tracing::Level {
        match self.logging.level.to_lowercase().as_str() {
            "trace" => tracing::Level::TRACE,
            "debug" => tracing::Level::DEBUG,
            "info" => tracing::Level::INFO,
            "warn" => tracing::Level::WARN,
            "error" => tracing::Level::ERROR,
            _ => tracing::Level::INFO,
        }
    }
}

/// Parse a query parameter from a search string
pub fn parse_query_param(search: &str, param: &str) -> Option<String> {
    let search = search.trim_start_matches('?');
    for pair in search.split('&') {
        let mut parts = pair.splitn(2, '=');
        if let (Some(key), Some(value)) = (parts.next(), parts.next()) {
            if key == param {
                return Some(value.replace("%3A", ":").replace("%2F", "/"));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = SiteConfig::from_toml_str("").unwrap();
        assert_eq!(config.site.title, "Swanwoo Pedals");
        assert_eq!(config.assets.base, "/swanwoo_pedals_obj");
        assert_eq!(config.grid.columns, 3);
        assert_eq!(config.grid.rows, 3);
        assert_eq!(config.site.instagram_icon, "instagram.webp");
        assert_eq!(config.grid.products, vec!["BigMuff", "FuzzFactory"]);
        assert_eq!(config.header.min_font_size, 40);
        assert_eq!(config.header.max_font_size, 100);
        assert_eq!(config.viewport.narrow_breakpoint, 768.0);
        assert_eq!(config.viewport.scroll_throttle_ms, 10.0);
        assert_eq!(config.log_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_partial_document() {
        let config = SiteConfig::from_toml_str(
            r#"
            [grid]
            products = ["Tremolo"]

            [header]
            scroll_range = 200
            "#,
        )
        .unwrap();
        assert_eq!(config.grid.products, vec!["Tremolo"]);
        assert_eq!(config.grid.rows, 3);
        assert_eq!(config.header.scroll_range, 200);
        assert_eq!(config.header.narrow_font_size, 60);
    }

    #[test]
    fn test_grid_overflow_rejected() {
        let err = SiteConfig::from_toml_str(
            r#"
            [grid]
            columns = 1
            rows = 1
            products = ["A", "B"]
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::GridOverflow { cells: 1, products: 2 }));
    }

    #[test]
    fn test_oversized_grid_rejected() {
        let err = SiteConfig::from_toml_str("[grid]\ncolumns = 9223372036854775807\nrows = 3").unwrap_err();
        assert!(matches!(err, ConfigError::GridTooLarge { rows: 3, .. }));

        let err = SiteConfig::from_toml_str("[grid]\ncolumns = 10\nrows = 10").unwrap_err();
        assert!(matches!(err, ConfigError::GridTooLarge { columns: 10, rows: 10, max: 36 }));

        let config = SiteConfig::from_toml_str("[grid]\ncolumns = 6\nrows = 6").unwrap();
        assert_eq!(config.grid.columns * config.grid.rows, MAX_GRID_CELLS);
    }

    #[test]
    fn test_duplicate_products_rejected() {
        let err = SiteConfig::from_toml_str("[grid]\nproducts = [\"BigMuff\", \"BigMuff\"]").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::DuplicateProduct { first: 0, second: 1, ref id } if id == "viewer-bigmuff"
        ));

        // Distinct names that map to the same canvas
        let err = SiteConfig::from_toml_str("[grid]\nproducts = [\"Tremolo\", \"Big Muff\", \"big-muff\"]").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::DuplicateProduct { first: 1, second: 2, ref id } if id == "viewer-big-muff"
        ));
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            SiteConfig::from_toml_str("[grid]\ncolumns = 0"),
            Err(ConfigError::EmptyGrid)
        ));
        assert!(matches!(
            SiteConfig::from_toml_str("[grid]\nproducts = [\"A\", \" \"]"),
            Err(ConfigError::EmptyProductName(1))
        ));
        assert!(matches!(
            SiteConfig::from_toml_str("[header]\nmin_font_size = 90\nmax_font_size = 50"),
            Err(ConfigError::FontRange { .. })
        ));
        assert!(matches!(
            SiteConfig::from_toml_str("[header]\nmax_font_size = 120"),
            Err(ConfigError::FontRange { .. })
        ));
        assert!(matches!(
            SiteConfig::from_toml_str("[header]\nnarrow_scroll_range = 0"),
            Err(ConfigError::ZeroScrollRange)
        ));
        assert!(matches!(
            SiteConfig::from_toml_str("[grid"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_query_overrides() {
        let mut config = SiteConfig::default();
        config.apply_query("?assets=https%3A%2F%2Fcdn.example.com%2Fpedals&log=debug");
        assert_eq!(config.assets.base, "https://cdn.example.com/pedals");
        assert_eq!(config.log_level(), tracing::Level::DEBUG);

        let mut untouched = SiteConfig::default();
        untouched.apply_query("?other=1");
        assert_eq!(untouched.assets.base, "/swanwoo_pedals_obj");
    }

    #[test]
    fn test_unknown_log_level_falls_back() {
        let mut config = SiteConfig::default();
        config.logging.level = "verbose".to_string();
        assert_eq!(config.log_level(), tracing::Level::INFO);
    }
}
