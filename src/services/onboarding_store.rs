//! Onboarding flag in durable local storage.
//!
//! Local storage is a flat JSON object in the data directory. The shell keeps
//! exactly one entry in it: whether onboarding was completed or skipped.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::warn;

use crate::platform;
use crate::types::errors::SettingsError;

pub const LOCAL_STORAGE_FILE_NAME: &str = "local_storage.json";

/// Fixed key of the onboarding flag.
pub const ONBOARDING_COMPLETED_KEY: &str = "ostap.onboarding.completed";

pub struct OnboardingStore {
    path: PathBuf,
}

impl OnboardingStore {
    /// Uses `path_override` or `local_storage.json` in the platform data directory.
    pub fn new(path_override: Option<PathBuf>) -> Self {
        let path = path_override
            .unwrap_or_else(|| platform::get_data_dir().join(LOCAL_STORAGE_FILE_NAME));
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the flag. Any read or parse failure counts as not completed.
    pub fn is_completed(&self) -> bool {
        match self.read_entries() {
            Ok(entries) => entries
                .get(ONBOARDING_COMPLETED_KEY)
                .and_then(Value::as_bool)
                .unwrap_or(false),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "local storage unreadable");
                false
            }
        }
    }

    /// Persists the flag as completed, keeping any unrelated entries.
    pub fn mark_completed(&self) -> Result<(), SettingsError> {
        let mut entries = self.read_entries().unwrap_or_default();
        entries.insert(ONBOARDING_COMPLETED_KEY.to_string(), Value::Bool(true));

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SettingsError::IoError(format!("Failed to create data directory: {}", e))
            })?;
        }
        let json = serde_json::to_string_pretty(&Value::Object(entries)).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize local storage: {}", e))
        })?;

        // tmp + rename so a crash never leaves a truncated file behind
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, json)
            .map_err(|e| SettingsError::IoError(format!("Failed to write local storage: {}", e)))?;
        fs::rename(&tmp_path, &self.path)
            .map_err(|e| SettingsError::IoError(format!("Failed to replace local storage: {}", e)))
    }

    fn read_entries(&self) -> Result<Map<String, Value>, SettingsError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let content = fs::read_to_string(&self.path)
            .map_err(|e| SettingsError::IoError(format!("Failed to read local storage: {}", e)))?;
        match serde_json::from_str(&content) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(SettingsError::SerializationError(
                "Local storage is not a JSON object".to_string(),
            )),
            Err(e) => Err(SettingsError::SerializationError(format!(
                "Failed to parse local storage: {}",
                e
            ))),
        }
    }
}
