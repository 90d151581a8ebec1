// Ostap platform paths for Linux
// Config: ~/.config/ostap
// Data:   ~/.local/share/ostap

use std::env;
use std::path::PathBuf;

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// Uses `$XDG_CONFIG_HOME/ostap` if set, otherwise `~/.config/ostap`.
pub fn get_config_dir() -> PathBuf {
    match env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join("ostap"),
        _ => home_dir().join(".config").join("ostap"),
    }
}

/// Uses `$XDG_DATA_HOME/ostap` if set, otherwise `~/.local/share/ostap`.
pub fn get_data_dir() -> PathBuf {
    match env::var("XDG_DATA_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join("ostap"),
        _ => home_dir().join(".local").join("share").join("ostap"),
    }
}
