//! Display preferences shared by every session of the process.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::store::{keys, KeyValueStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => Err(format!("unknown theme mode: {other}")),
        }
    }
}

/// Theme preference, stored as a bare string under `haversack-theme`.
#[derive(Clone)]
pub struct Preferences {
    store: Arc<dyn KeyValueStore>,
}

impl Preferences {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Saved mode, or light when nothing usable is saved.
    pub fn theme(&self) -> ThemeMode {
        match self.store.get(keys::THEME) {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|e: String| {
                warn!(error = %e, "Ignoring saved theme");
                ThemeMode::default()
            }),
            Ok(None) => ThemeMode::default(),
            Err(e) => {
                warn!(error = %e, "Failed to read saved theme");
                ThemeMode::default()
            }
        }
    }

    pub fn set_theme(&self, mode: ThemeMode) {
        match self.store.set(keys::THEME, mode.as_str().to_string()) {
            Ok(()) => debug!(%mode, "Theme saved"),
            Err(e) => warn!(error = %e, "Failed to save theme"),
        }
    }

    pub fn toggle_theme(&self) -> ThemeMode {
        let mode = self.theme().toggled();
        self.set_theme(mode);
        mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn defaults_to_light_and_toggles() {
        let store = Arc::new(MemoryStore::new());
        let prefs = Preferences::new(store.clone());
        assert_eq!(prefs.theme(), ThemeMode::Light);

        assert_eq!(prefs.toggle_theme(), ThemeMode::Dark);
        assert_eq!(store.get("haversack-theme").unwrap(), Some("dark".to_string()));
        assert_eq!(prefs.toggle_theme(), ThemeMode::Light);
    }

    #[test]
    fn unknown_saved_value_falls_back_to_light() {
        let store = Arc::new(MemoryStore::new());
        store.set("haversack-theme", "sepia".into()).unwrap();
        assert_eq!(Preferences::new(store).theme(), ThemeMode::Light);
    }
}
