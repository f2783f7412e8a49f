#![forbid(unsafe_code)]

//! Settings record and its bridge to [`ExtensionStorage`].
//!
//! The settings panel and every content script share one `Settings` value
//! stored under a single key. The bridge loads it (falling back to defaults
//! when absent), writes it, and turns storage change events into field-level
//! toggles so a running machine can follow changes made elsewhere.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::storage::{AreaName, ExtensionStorage, StorageChange, StorageResult, StorageWatch};

/// Storage key used when none is configured.
pub const SETTINGS_KEY: &str = "settings";

/// User settings. Absent fields take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub enabled: bool,
    pub show_pronunciation_info: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: true,
            show_pronunciation_info: true,
        }
    }
}

impl Settings {
    /// Apply a partial update.
    #[must_use]
    pub fn with(mut self, update: SettingsUpdate) -> Self {
        if let Some(enabled) = update.enabled {
            self.enabled = enabled;
        }
        if let Some(show) = update.show_pronunciation_info {
            self.show_pronunciation_info = show;
        }
        self
    }

    /// Field toggles that turn `self` into `new`.
    #[must_use]
    pub fn toggles_to(&self, new: &Settings) -> Vec<SettingsToggle> {
        let mut toggles = Vec::new();
        if self.enabled != new.enabled {
            toggles.push(SettingsToggle::Enabled);
        }
        if self.show_pronunciation_info != new.show_pronunciation_info {
            toggles.push(SettingsToggle::ShowPronunciationInfo);
        }
        toggles
    }

    fn from_stored(value: Option<Value>) -> StorageResult<Self> {
        match value {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(value) => Ok(serde_json::from_value(value)?),
        }
    }
}

/// A partial settings write. `None` fields are left as stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SettingsUpdate {
    pub enabled: Option<bool>,
    pub show_pronunciation_info: Option<bool>,
}

impl SettingsUpdate {
    #[must_use]
    pub const fn enabled(enabled: bool) -> Self {
        Self {
            enabled: Some(enabled),
            show_pronunciation_info: None,
        }
    }

    #[must_use]
    pub const fn show_pronunciation_info(show: bool) -> Self {
        Self {
            enabled: None,
            show_pronunciation_info: Some(show),
        }
    }
}

/// A single settings field that flipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsToggle {
    Enabled,
    ShowPronunciationInfo,
}

/// One observed settings change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsDelta {
    pub old_value: Settings,
    pub new_value: Settings,
}

impl SettingsDelta {
    #[must_use]
    pub fn toggles(&self) -> Vec<SettingsToggle> {
        self.old_value.toggles_to(&self.new_value)
    }
}

/// Loads, saves, and observes [`Settings`] in one storage area and key.
#[derive(Debug, Clone)]
pub struct SettingsBridge {
    storage: ExtensionStorage,
    area: AreaName,
    key: String,
}

impl SettingsBridge {
    /// Bridge to `settings` in the `local` area.
    pub fn new(storage: ExtensionStorage) -> Self {
        Self::with_location(storage, AreaName::Local, SETTINGS_KEY)
    }

    pub fn with_location(storage: ExtensionStorage, area: AreaName, key: impl Into<String>) -> Self {
        Self {
            storage,
            area,
            key: key.into(),
        }
    }

    pub fn area(&self) -> AreaName {
        self.area
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current settings, or the defaults when nothing is stored.
    pub fn load(&self) -> StorageResult<Settings> {
        Settings::from_stored(self.storage.get(self.area, &self.key)?)
    }

    /// Store `settings`. Returns whether anything changed.
    pub fn save(&self, settings: &Settings) -> StorageResult<bool> {
        let value = serde_json::to_value(settings)?;
        self.storage.set(self.area, &self.key, value)
    }

    /// Read-modify-write of individual fields.
    ///
    /// Applying a field that already has the requested value writes nothing,
    /// so a context echoing a change it just observed causes no new event.
    pub fn update(&self, update: SettingsUpdate) -> StorageResult<Settings> {
        let next = self.load()?.with(update);
        if self.save(&next)? {
            debug!(key = %self.key, ?update, "settings updated");
        }
        Ok(next)
    }

    /// Snapshot the settings and subscribe to later changes.
    pub fn on_change(&self) -> StorageResult<SettingsChanges> {
        let watch = self.storage.watch(self.area, &self.key)?;
        let current = Settings::from_stored(watch.initial().cloned())?;
        Ok(SettingsChanges { current, watch })
    }
}

/// Settings change stream for one subscriber.
#[derive(Debug)]
pub struct SettingsChanges {
    current: Settings,
    watch: StorageWatch,
}

impl SettingsChanges {
    /// Settings as of the last delta returned (or the subscription snapshot).
    pub fn current(&self) -> Settings {
        self.current
    }

    /// Next pending delta, without blocking.
    ///
    /// A missing old or new value is read as the defaults. Values that fail
    /// to decode are skipped.
    pub fn try_next(&mut self) -> Option<SettingsDelta> {
        while let Some(change) = self.watch.try_next() {
            match decode(&change) {
                Ok(delta) => {
                    self.current = delta.new_value;
                    return Some(delta);
                }
                Err(err) => {
                    tracing::warn!(key = %change.key, error = %err, "ignoring undecodable settings change");
                }
            }
        }
        None
    }

    /// Every pending toggle, in change order.
    pub fn drain_toggles(&mut self) -> Vec<SettingsToggle> {
        std::iter::from_fn(|| self.try_next())
            .flat_map(|delta| delta.toggles())
            .collect()
    }
}

fn decode(change: &StorageChange) -> StorageResult<SettingsDelta> {
    Ok(SettingsDelta {
        old_value: Settings::from_stored(change.old_value.clone())?,
        new_value: Settings::from_stored(change.new_value.clone())?,
    })
}
