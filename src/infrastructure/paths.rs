//! Configuration file discovery.
//!
//! The configuration file is looked up in order:
//!
//! 1. `$EXCURSIO_CONFIG`, when set
//! 2. `$XDG_CONFIG_HOME/excursio/config.toml`
//! 3. `~/.config/excursio/config.toml`

use std::path::PathBuf;

/// The configuration file to load, if any of the candidate paths exist.
#[must_use]
pub fn config_file() -> Option<PathBuf> {
    if let Ok(explicit) = std::env::var("EXCURSIO_CONFIG") {
        if !explicit.trim().is_empty() {
            return Some(PathBuf::from(explicit));
        }
    }
    config_dir().map(|dir| dir.join("config.toml")).filter(|p| p.exists())
}

fn config_dir() -> Option<PathBuf> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg.trim().is_empty() {
            return Some(PathBuf::from(xdg).join("excursio"));
        }
    }
    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".config").join("excursio"))
}
