//! Editor settings and preferences
//!
//! Persisted separately from drills.

use serde::{Deserialize, Serialize};

use crate::consts::PLAYBACK_INTERVAL_MS;
use crate::drill::ShapeKind;
use crate::persistence::DrillError;
use crate::platform::KeyValueStore;

/// Editor settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    // === Playback ===
    /// Length of one count during playback, in milliseconds
    pub playback_interval_ms: f64,

    // === Display ===
    /// Label points with member initials in previews
    pub show_member_labels: bool,
    /// List step-size warnings under the field
    pub show_warnings: bool,

    // === Authoring ===
    /// Shape used by the auto-layout shortcut
    pub default_shape: ShapeKind,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            playback_interval_ms: PLAYBACK_INTERVAL_MS,
            show_member_labels: true,
            show_warnings: true,
            default_shape: ShapeKind::Line,
        }
    }
}

impl EditorSettings {
    /// Storage key
    const STORAGE_KEY: &'static str = "drill_editor_settings";

    /// Load settings, falling back to defaults
    pub fn load(storage: &impl KeyValueStore) -> Self {
        if let Some(json) = storage.get(Self::STORAGE_KEY) {
            match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded editor settings");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring saved settings: {e}"),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    pub fn save(&self, storage: &mut impl KeyValueStore) -> Result<(), DrillError> {
        let json = serde_json::to_string(self)?;
        storage.set(Self::STORAGE_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
