//! Centralized path resolution for platform-appropriate user data directories.
//!
//! In development mode (cargo run), paths resolve to local directories.
//! In installed mode, paths resolve to platform-specific locations:
//! - Windows: `%APPDATA%\Pixelmint\`
//! - macOS: `~/Library/Application Support/Pixelmint/`
//! - Linux: `~/.config/pixelmint/` (config), `~/.local/share/pixelmint/` (data)

use std::path::PathBuf;

/// Returns true when running in development mode (cargo run).
///
/// Detection methods:
/// - `CARGO` env var is set (cargo run sets this)
/// - Debug assertions enabled (debug builds)
pub fn is_dev_mode() -> bool {
    std::env::var("CARGO").is_ok() || cfg!(debug_assertions)
}

/// Platform-appropriate config directory.
///
/// - Dev mode: current directory
/// - Linux: `~/.config/pixelmint/`
/// - Windows/macOS: same as data_dir
pub fn config_dir() -> Option<PathBuf> {
    if is_dev_mode() {
        return Some(PathBuf::from("."));
    }

    #[cfg(target_os = "linux")]
    {
        dirs::config_dir().map(|p| p.join("pixelmint"))
    }

    #[cfg(not(target_os = "linux"))]
    {
        data_dir()
    }
}

/// Platform-appropriate data directory.
pub fn data_dir() -> Option<PathBuf> {
    if is_dev_mode() {
        return Some(PathBuf::from("."));
    }

    dirs::data_dir().map(|p| p.join("pixelmint"))
}

/// Path to the config file.
pub fn config_file() -> PathBuf {
    config_dir()
        .map(|p| p.join("config.json"))
        .unwrap_or_else(|| PathBuf::from("config.json"))
}

/// Directory holding persisted session state (history, minted records).
///
/// - Dev mode: `./storage/`
/// - Installed: `{data_dir}/storage/`
pub fn storage_dir() -> PathBuf {
    data_dir()
        .map(|p| p.join("storage"))
        .unwrap_or_else(|| PathBuf::from("storage"))
}

/// Path to the logs directory.
pub fn logs_dir() -> PathBuf {
    data_dir()
        .map(|p| p.join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Ensure all required directories exist.
pub fn ensure_directories() -> std::io::Result<()> {
    if let Some(config) = config_dir() {
        std::fs::create_dir_all(config)?;
    }
    std::fs::create_dir_all(storage_dir())?;
    std::fs::create_dir_all(logs_dir())?;
    Ok(())
}
