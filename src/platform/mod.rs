// Ostap platform abstraction
// Resolves where the shell reads its configuration and keeps its local storage.
//
// `OSTAP_CONFIG_DIR` / `OSTAP_DATA_DIR` take precedence over the per-OS
// defaults, which are selected with `cfg(target_os)` at compile time.

use std::env;
use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

pub const CONFIG_DIR_ENV: &str = "OSTAP_CONFIG_DIR";
pub const DATA_DIR_ENV: &str = "OSTAP_DATA_DIR";

/// Returns the configuration directory for Ostap.
///
/// - **Linux**: `~/.config/ostap` (or `$XDG_CONFIG_HOME/ostap`)
/// - **macOS**: `~/Library/Application Support/Ostap`
/// - **Windows**: `%APPDATA%/Ostap`
pub fn get_config_dir() -> PathBuf {
    if let Some(dir) = env::var_os(CONFIG_DIR_ENV) {
        return PathBuf::from(dir);
    }
    #[cfg(target_os = "linux")]
    {
        linux::get_config_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_config_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_config_dir()
    }
}

/// Returns the data directory for Ostap, home of the local storage file.
///
/// - **Linux**: `~/.local/share/ostap` (or `$XDG_DATA_HOME/ostap`)
/// - **macOS**: `~/Library/Application Support/Ostap`
/// - **Windows**: `%APPDATA%/Ostap`
pub fn get_data_dir() -> PathBuf {
    if let Some(dir) = env::var_os(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }
    #[cfg(target_os = "linux")]
    {
        linux::get_data_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_data_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_data_dir()
    }
}
