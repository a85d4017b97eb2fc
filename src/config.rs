//! Application configuration
//!
//! Stored as YAML in `~/.config/stat-tables/tables.yaml`. Relative paths in
//! the file resolve against the file's own directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::dataset::{ColumnSpec, DataSource};
use crate::error::{ConfigError, DatasetError};
use crate::geometry::Rect;
use crate::style::TableStyle;
use crate::table::DEFAULT_SCROLL_STEP;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// One table of the deck
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    pub name: String,
    pub source: DataSource,
    /// Screen rect; defaults to the window's left edge, as wide as the
    /// columns and as tall as the window
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rect: Option<Rect>,
    /// Empty keeps every field of the source
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<ColumnSpec>,
    #[serde(default)]
    pub style: TableStyle,
}

impl TableConfig {
    /// A table showing every field of a data file, named after the file
    pub fn for_file(path: impl Into<PathBuf>) -> Result<Self, DatasetError> {
        let source = DataSource::from_path(path)?;
        let name = source
            .path()
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "table".to_string());
        Ok(Self {
            name,
            source,
            rect: None,
            columns: Vec::new(),
            style: TableStyle::default(),
        })
    }

    /// Widths from the column specs, if every column has one
    pub fn column_widths(&self) -> Option<Vec<i32>> {
        if self.columns.is_empty() {
            return None;
        }
        self.columns.iter().map(|c| c.width).collect()
    }
}

fn default_scroll_step() -> i32 {
    DEFAULT_SCROLL_STEP
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub window: WindowConfig,
    /// Directory of .ttf/.otf files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fonts_dir: Option<PathBuf>,
    /// Font used when a style names none; the first font otherwise
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_font: Option<String>,
    #[serde(default = "default_scroll_step")]
    pub scroll_step: i32,
    #[serde(default)]
    pub tables: Vec<TableConfig>,
    /// Directory relative paths resolve against
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            fonts_dir: None,
            default_font: None,
            scroll_step: DEFAULT_SCROLL_STEP,
            tables: Vec::new(),
            base_dir: PathBuf::from("."),
        }
    }
}

impl AppConfig {
    /// Parse YAML; relative paths will resolve against `base_dir`
    pub fn from_yaml(content: &str, base_dir: &Path) -> Result<Self, serde_yaml::Error> {
        let mut config: Self = serde_yaml::from_str(content)?;
        config.base_dir = base_dir.to_path_buf();
        Ok(config)
    }

    /// Load from an explicit path
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let config = Self::from_yaml(&content, base_dir).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(
            "Loaded config from {} ({} tables)",
            path.display(),
            config.tables.len()
        );
        Ok(config)
    }

    /// Load from the default location, or return defaults if there is no
    /// file. A file that exists but doesn't parse is still an error.
    pub fn load_default() -> Result<Self, ConfigError> {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Ok(Self::default());
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        Self::load(&path)
    }

    /// `path` relative to the config file's directory
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.base_dir.join(path)
    }

    /// Configured fonts directory, else `~/.config/stat-tables/fonts/`
    pub fn resolved_fonts_dir(&self) -> Option<PathBuf> {
        self.fonts_dir
            .as_deref()
            .map(|dir| self.resolve(dir))
            .or_else(crate::config_paths::fonts_dir)
    }
}
