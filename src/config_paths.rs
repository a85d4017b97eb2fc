//! Centralized configuration paths for stat-tables
//!
//! All config files live under:
//! - Unix/macOS: `~/.config/stat-tables/`
//! - Windows: `%APPDATA%\stat-tables\`

use std::{
    env, fs,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "stat-tables";

/// Log file prefix; daily rotation appends `.YYYY-MM-DD`
pub const LOG_FILE_NAME: &str = "stat-tables.log";

/// Base config directory for stat-tables
///
/// Unix/macOS:
///   - If XDG_CONFIG_HOME is set: `$XDG_CONFIG_HOME/stat-tables`
///   - Else: `~/.config/stat-tables`
///
/// Windows:
///   - `%APPDATA%\stat-tables`
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|config| config.join(APP_DIR))
    }
}

/// `~/.config/stat-tables/tables.yaml`
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("tables.yaml"))
}

/// `~/.config/stat-tables/fonts/`, searched when no fonts dir is configured
pub fn fonts_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("fonts"))
}

/// `~/.config/stat-tables/logs/`
pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

/// Most recent rotated log file, or the unrotated name if there are none
pub fn log_file() -> Option<PathBuf> {
    let logs_dir = logs_dir()?;

    let mut log_files: Vec<PathBuf> = fs::read_dir(&logs_dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(LOG_FILE_NAME))
        })
        .collect();

    // YYYY-MM-DD suffixes sort naturally
    log_files.sort_by(|a, b| b.cmp(a));

    log_files
        .into_iter()
        .next()
        .or_else(|| Some(logs_dir.join(LOG_FILE_NAME)))
}

fn ensure_dir(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path)
        .map_err(|e| format!("Failed to create directory {}: {}", path.display(), e))
}

/// Ensure logs dir exists, returning it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let logs = logs_dir().ok_or_else(|| "No config directory available".to_string())?;
    ensure_dir(&logs)?;
    Ok(logs)
}
