//! Editor settings loaded from a TOML file.
//!
//! ```toml
//! [history]
//! max_undo = 50
//!
//! [[property]]
//! name = "width"
//! min = 0.0
//! max = 250.0
//!
//! [decal]
//! width = 10.0
//! label = "arrow"
//! ```
//!
//! Every section and field is optional.

use std::path::Path;

use redlilium_core::abstract_editor::DEFAULT_MAX_UNDO;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub history: HistorySettings,
    /// Logical slider ranges, per property name.
    pub property: Vec<PropertyRange>,
    /// Initial values of the decal created on the first frame.
    pub decal: DecalSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    pub max_undo: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            max_undo: DEFAULT_MAX_UNDO,
        }
    }
}

/// Value range a property's slider spans.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PropertyRange {
    pub name: String,
    #[serde(default)]
    pub min: f64,
    #[serde(default = "default_range_max")]
    pub max: f64,
}

fn default_range_max() -> f64 {
    100.0
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DecalSettings {
    pub width: f32,
    pub height: f32,
    pub visible: bool,
    pub label: String,
}

impl Default for DecalSettings {
    fn default() -> Self {
        Self {
            width: 10.0,
            height: 10.0,
            visible: true,
            label: "decal".into(),
        }
    }
}

impl EditorSettings {
    /// Slider range configured for `name`, falling back to `0..100`.
    pub fn range_for(&self, name: &str) -> (f64, f64) {
        self.property
            .iter()
            .find(|p| p.name == name)
            .map(|p| (p.min, p.max))
            .unwrap_or((0.0, default_range_max()))
    }
}

/// Load settings from a TOML file.
///
/// Returns `Err` with a human-readable message if the file cannot be read
/// or parsed.
pub fn load_settings(path: &Path) -> Result<EditorSettings, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    toml::from_str(&content).map_err(|e| format!("failed to parse {}: {e}", path.display()))
}

/// Load settings, falling back to defaults when no file is given or it
/// cannot be loaded.
pub fn load_or_default(path: Option<&Path>) -> EditorSettings {
    let Some(path) = path else {
        log::info!("No settings file, using defaults");
        return EditorSettings::default();
    };
    match load_settings(path) {
        Ok(settings) => {
            log::info!(
                "Loaded settings from {} ({} property ranges)",
                path.display(),
                settings.property.len()
            );
            settings
        }
        Err(e) => {
            log::warn!("{e}, using defaults");
            EditorSettings::default()
        }
    }
}
