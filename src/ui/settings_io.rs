use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::ui::settings::UiSettings;

fn settings_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("mcp_visualiser");
    path.push("ui_settings.json");
    path
}

pub fn load_settings() -> UiSettings {
    load_settings_from(&settings_path())
}

pub fn save_settings(settings: &UiSettings) {
    save_settings_to(&settings_path(), settings)
}

/// Missing or unreadable files fall back to defaults.
pub fn load_settings_from(path: &Path) -> UiSettings {
    let Ok(json) = fs::read_to_string(path) else {
        debug!(path = %path.display(), "no settings file, using defaults");
        return UiSettings::default();
    };

    serde_json::from_str(&json).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "ignoring corrupt settings file");
        UiSettings::default()
    })
}

pub fn save_settings_to(path: &Path, settings: &UiSettings) {
    if let Some(dir) = path.parent() {
        if let Err(e) = fs::create_dir_all(dir) {
            warn!(path = %dir.display(), error = %e, "could not create settings directory");
            return;
        }
    }

    match serde_json::to_string_pretty(settings) {
        Ok(json) => {
            if let Err(e) = fs::write(path, json) {
                warn!(path = %path.display(), error = %e, "could not save settings");
            }
        }
        Err(e) => warn!(error = %e, "could not serialize settings"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::settings::TreeTheme;

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("ui_settings.json");

        let settings = UiSettings {
            ui_scale: 1.25,
            tree_theme: TreeTheme::Dark,
            ..Default::default()
        };
        save_settings_to(&path, &settings);

        assert_eq!(load_settings_from(&path), settings);
    }

    #[test]
    fn corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ui_settings.json");
        fs::write(&path, "{ not json").unwrap();

        assert_eq!(load_settings_from(&path), UiSettings::default());
    }
}
