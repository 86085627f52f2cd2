//! Theme preference: persisted dark/light flag mirrored on the document root

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::dom::Document;
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(Error::InvalidTheme(other.to_string())),
        }
    }
}

/// String key/value storage that survives across sessions
pub trait PreferenceStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Preferences kept in memory only
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences persisted as a flat TOML table
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        toml::from_str(&content).map_err(|e| Error::Preference(e.to_string()))
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string(&values).map_err(|e| Error::Preference(e.to_string()))?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

/// Owns the theme preference and keeps the document root attribute in sync
pub struct ThemeController {
    store: Box<dyn PreferenceStore>,
    key: String,
}

impl ThemeController {
    pub fn new(store: Box<dyn PreferenceStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Stored preference, "dark" when absent or unreadable
    pub fn get(&self) -> Theme {
        match self.store.get(&self.key) {
            Ok(Some(value)) => value.parse().unwrap_or_else(|e| {
                warn!("Ignoring stored theme: {}", e);
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(e) => {
                warn!("Failed to read theme preference: {}", e);
                Theme::default()
            }
        }
    }

    /// Persist `theme` and apply it to the document
    pub fn set(&mut self, theme: Theme, doc: &mut Document) {
        doc.set_theme_attribute(theme.as_str());
        if let Err(e) = self.store.set(&self.key, theme.as_str()) {
            warn!("Failed to persist theme preference: {}", e);
        }
    }

    /// Apply the stored preference to the document
    pub fn start(&mut self, doc: &mut Document) {
        let theme = self.get();
        doc.set_theme_attribute(theme.as_str());
        debug!("Theme initialized to {}", theme);
    }

    /// Flip the theme currently shown on the document
    pub fn toggle(&mut self, doc: &mut Document) -> Theme {
        let current = doc
            .theme_attribute()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default();
        let next = Theme::toggled(current);
        self.set(next, doc);
        debug!("Theme toggled to {}", next);
        next
    }
}
