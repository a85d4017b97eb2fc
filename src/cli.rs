//! Command-line argument parsing for the table viewer
//!
//! Supports:
//! - An explicit config file, or the default one
//! - A fonts directory override
//! - Data files opened directly as extra tables

use clap::Parser;
use std::path::PathBuf;

use crate::config::{AppConfig, TableConfig};
use crate::error::ConfigError;

/// Sortable statistics tables
#[derive(Parser, Debug)]
#[command(name = "stat-tables", version, about = "Sortable statistics tables")]
pub struct CliArgs {
    /// CSV or JSON files to open as tables
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Config file (default: ~/.config/stat-tables/tables.yaml)
    #[arg(short = 'c', long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory of .ttf/.otf fonts
    #[arg(short = 'f', long, value_name = "DIR")]
    pub fonts: Option<PathBuf>,

    /// Only show the files given on the command line
    #[arg(long)]
    pub files_only: bool,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub config_path: Option<PathBuf>,
    pub fonts_dir: Option<PathBuf>,
    /// Tables for the command-line files, paths made absolute
    pub extra_tables: Vec<TableConfig>,
    pub files_only: bool,
}

impl CliArgs {
    /// Convert parsed CLI args into startup configuration
    pub fn into_config(self) -> Result<StartupConfig, String> {
        let cwd = std::env::current_dir()
            .map_err(|e| format!("Cannot read current directory: {}", e))?;

        if self.files_only && self.files.is_empty() {
            return Err("--files-only needs at least one file".to_string());
        }

        let extra_tables = self
            .files
            .iter()
            .map(|file| TableConfig::for_file(cwd.join(file)).map_err(|e| e.to_string()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(StartupConfig {
            config_path: self.config,
            fonts_dir: self.fonts.map(|dir| cwd.join(dir)),
            extra_tables,
            files_only: self.files_only,
        })
    }
}

impl StartupConfig {
    /// Load the config file and apply command-line overrides
    pub fn app_config(&self) -> Result<AppConfig, ConfigError> {
        let mut config = match &self.config_path {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::load_default()?,
        };
        self.apply(&mut config);
        Ok(config)
    }

    /// Apply command-line overrides to a loaded config
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(dir) = &self.fonts_dir {
            config.fonts_dir = Some(dir.clone());
        }
        if self.files_only {
            config.tables.clear();
        }
        config.tables.extend(self.extra_tables.iter().cloned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DataSource;

    fn args(files: &[&str]) -> CliArgs {
        CliArgs {
            files: files.iter().map(PathBuf::from).collect(),
            config: None,
            fonts: None,
            files_only: false,
        }
    }

    #[test]
    fn test_no_args() {
        let config = args(&[]).into_config().unwrap();
        assert!(config.extra_tables.is_empty());
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_files_become_tables() {
        let config = args(&["nations.json", "ball.csv"]).into_config().unwrap();
        assert_eq!(config.extra_tables.len(), 2);
        assert_eq!(config.extra_tables[0].name, "nations");
        assert!(config.extra_tables[0].source.path().is_absolute());
        assert!(matches!(
            config.extra_tables[1].source,
            DataSource::Csv { .. }
        ));
    }

    #[test]
    fn test_unknown_extension_rejected() {
        assert!(args(&["notes.txt"]).into_config().is_err());
    }

    #[test]
    fn test_files_only_needs_files() {
        let mut a = args(&[]);
        a.files_only = true;
        assert!(a.into_config().is_err());
    }

    #[test]
    fn test_apply_overrides() {
        let mut a = args(&["ball.csv"]);
        a.fonts = Some(PathBuf::from("/fonts"));
        a.files_only = true;
        let startup = a.into_config().unwrap();

        let mut config = AppConfig::default();
        config
            .tables
            .push(TableConfig::for_file("nations.json").unwrap());
        startup.apply(&mut config);

        assert_eq!(config.fonts_dir, Some(PathBuf::from("/fonts")));
        assert_eq!(config.tables.len(), 1);
        assert_eq!(config.tables[0].name, "ball");
    }

    #[test]
    fn test_parse_from_command_line() {
        let a = CliArgs::try_parse_from(["stat-tables", "-c", "t.yaml", "a.csv"]).unwrap();
        assert_eq!(a.config, Some(PathBuf::from("t.yaml")));
        assert_eq!(a.files, vec![PathBuf::from("a.csv")]);
    }
}
