#![forbid(unsafe_code)]

//! Runtime configuration.
//!
//! Every tunable of the hover core lives in one [`WordyConfig`] that can be
//! loaded from JSON (or TOML with the `toml-config` feature). Defaults match
//! the shipped behavior, so `WordyConfig::default()` is what hosts get when
//! they load nothing.
//!
//! ```json
//! { "hover_debounce_ms": 150, "tooltip_padding": 12.0 }
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::settings::SETTINGS_KEY;
use crate::storage::AreaName;

/// Tooltip overlay element id, excluded from hover detection.
pub const TOOLTIP_ELEMENT_ID: &str = "assistant-tooltip";

/// Prefix the failed word is appended to for the external search link.
pub const EXTERNAL_SEARCH_URL: &str = "https://www.google.com/search?q=";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordyConfig {
    /// Quiet period after the last pointer move before resolving a word.
    pub hover_debounce_ms: u64,
    /// Quiet period after the last play request before playing audio.
    pub audio_debounce_ms: u64,
    /// Minimum distance between the tooltip and the viewport edges.
    pub tooltip_padding: f64,
    pub tooltip_max_width: f64,
    pub tooltip_max_height: f64,
    pub tooltip_element_id: String,
    pub settings_key: String,
    pub settings_area: AreaName,
    pub external_search_url: String,
}

impl Default for WordyConfig {
    fn default() -> Self {
        Self {
            hover_debounce_ms: 100,
            audio_debounce_ms: 200,
            tooltip_padding: 16.0,
            tooltip_max_width: 350.0,
            tooltip_max_height: 500.0,
            tooltip_element_id: TOOLTIP_ELEMENT_ID.to_string(),
            settings_key: SETTINGS_KEY.to_string(),
            settings_area: AreaName::Local,
            external_search_url: EXTERNAL_SEARCH_URL.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "toml-config")]
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

impl WordyConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    #[cfg(feature = "toml-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    #[cfg(feature = "toml-config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Check the values for problems. An empty list means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.hover_debounce_ms == 0 {
            errors.push("hover_debounce_ms must be > 0".to_string());
        }
        if self.audio_debounce_ms == 0 {
            errors.push("audio_debounce_ms must be > 0".to_string());
        }
        if !self.tooltip_padding.is_finite() || self.tooltip_padding < 0.0 {
            errors.push(format!(
                "tooltip_padding must be finite and >= 0, got {}",
                self.tooltip_padding
            ));
        }
        for (name, value) in [
            ("tooltip_max_width", self.tooltip_max_width),
            ("tooltip_max_height", self.tooltip_max_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                errors.push(format!("{name} must be finite and > 0, got {value}"));
            }
        }
        if self.tooltip_element_id.trim().is_empty() {
            errors.push("tooltip_element_id must not be empty".to_string());
        }
        if self.settings_key.trim().is_empty() {
            errors.push("settings_key must not be empty".to_string());
        }
        if !self.settings_area.is_writable() {
            errors.push(format!(
                "settings_area `{}` is read-only",
                self.settings_area
            ));
        }
        errors
    }

    /// [`validate`](Self::validate), as a `Result`.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    #[must_use]
    pub fn hover_debounce(&self) -> Duration {
        Duration::from_millis(self.hover_debounce_ms)
    }

    #[must_use]
    pub fn audio_debounce(&self) -> Duration {
        Duration::from_millis(self.audio_debounce_ms)
    }

    /// External search link for a word the dictionary could not resolve.
    /// The word is percent-encoded as a query value.
    #[must_use]
    pub fn search_url(&self, word: &str) -> String {
        format!("{}{}", self.external_search_url, urlencoding::encode(word))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = WordyConfig::default();
        assert!(config.validate().is_empty());
        assert_eq!(config.hover_debounce(), Duration::from_millis(100));
        assert_eq!(config.audio_debounce(), Duration::from_millis(200));
    }

    #[test]
    fn json_overrides_merge_with_defaults() {
        let config =
            WordyConfig::from_json_str(r#"{"hover_debounce_ms": 150, "settings_area": "sync"}"#)
                .unwrap();
        assert_eq!(config.hover_debounce_ms, 150);
        assert_eq!(config.settings_area, AreaName::Sync);
        assert_eq!(config.tooltip_padding, 16.0);
        assert_eq!(config.tooltip_element_id, "assistant-tooltip");
    }

    #[test]
    fn validate_catches_bad_values() {
        let config = WordyConfig {
            hover_debounce_ms: 0,
            tooltip_padding: -1.0,
            tooltip_max_width: f64::NAN,
            settings_key: " ".into(),
            settings_area: AreaName::Managed,
            ..WordyConfig::default()
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 5, "{errors:?}");
        assert!(matches!(config.validated(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn search_url_appends_word() {
        assert_eq!(
            WordyConfig::default().search_url("xyzzy"),
            "https://www.google.com/search?q=xyzzy"
        );
    }

    #[test]
    fn search_url_encodes_multi_word_queries() {
        assert_eq!(
            WordyConfig::default().search_url("New York"),
            "https://www.google.com/search?q=New%20York"
        );
        assert_eq!(
            WordyConfig::default().search_url("snake_case&co"),
            "https://www.google.com/search?q=snake_case%26co"
        );
    }

    #[test]
    fn reads_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wordy.json");
        std::fs::write(&path, r#"{"audio_debounce_ms": 50}"#).unwrap();
        assert_eq!(WordyConfig::from_json_file(&path).unwrap().audio_debounce_ms, 50);
        assert!(matches!(
            WordyConfig::from_json_file(dir.path().join("missing.json")),
            Err(ConfigError::Io(_))
        ));
    }

    #[cfg(feature = "toml-config")]
    #[test]
    fn reads_toml() {
        let config = WordyConfig::from_toml_str(
            "tooltip_padding = 8.0\nexternal_search_url = \"https://duckduckgo.com/?q=\"\n",
        )
        .unwrap();
        assert_eq!(config.tooltip_padding, 8.0);
        assert_eq!(config.search_url("a"), "https://duckduckgo.com/?q=a");
    }
}
