//! Theme
//!
//! Light/dark theme flag, persisted through a [`KeyValueStore`] under
//! [`THEME_KEY`]. The flag is read once at start-up and written through on
//! every change.

use std::{fmt, fs, io, path::PathBuf, str::FromStr};

use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::{debug, info};

/// Storage key holding the theme flag.
pub const THEME_KEY: &str = "theme";

/// Errors from a [`KeyValueStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error reading or writing the backing file
    #[error("Store IO error: {0}")]
    Io(#[from] io::Error),

    /// YAML encoding or decoding error
    #[error("Store YAML error: {0}")]
    Yaml(#[from] serde_norway::Error),
}

/// Errors related to theme handling.
#[derive(Debug, Error)]
pub enum ThemeError {
    /// The value is neither "light" nor "dark".
    #[error("Unknown theme: {0}")]
    Unknown(String),

    /// Persisting or reading the flag failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Minimal string key-value storage.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backing storage cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store, lost when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: FxHashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());

        Ok(())
    }
}

/// Store backed by a YAML map on disk, rewritten on every `set`.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store using the file at `path`. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Result<FxHashMap<String, String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(FxHashMap::default()),
            Ok(contents) => Ok(serde_norway::from_str(&contents)?),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(FxHashMap::default()),
            Err(error) => Err(error.into()),
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());

        fs::write(&self.path, serde_norway::to_string(&values)?)?;

        debug!(path = %self.path.display(), key, "wrote store");

        Ok(())
    }
}

/// Colour theme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    /// Light theme
    #[default]
    Light,

    /// Dark theme
    Dark,
}

impl Theme {
    /// Stored representation
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// The other theme.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Class to put on the document root, if any.
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            Theme::Light => None,
            Theme::Dark => Some("dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(ThemeError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The active theme, mirrored into a store.
#[derive(Debug)]
pub struct ThemeSettings<S: KeyValueStore> {
    store: S,
    theme: Theme,
}

impl<S: KeyValueStore> ThemeSettings<S> {
    /// Resolve the start-up theme and persist it.
    ///
    /// A stored "dark" selects the dark theme and any other stored value the
    /// light theme. With nothing (or an empty string) stored, `prefers_dark`
    /// (the platform's colour-scheme preference) decides.
    ///
    /// # Errors
    ///
    /// Returns a [`ThemeError`] if the store cannot be read or written.
    pub fn init(mut store: S, prefers_dark: bool) -> Result<Self, ThemeError> {
        let theme = match store.get(THEME_KEY)?.filter(|saved| !saved.is_empty()) {
            Some(saved) if saved == Theme::Dark.as_str() => Theme::Dark,
            Some(_) => Theme::Light,
            None if prefers_dark => Theme::Dark,
            None => Theme::Light,
        };

        store.set(THEME_KEY, theme.as_str())?;

        info!(%theme, "theme initialised");

        Ok(Self { store, theme })
    }

    /// Active theme
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Whether the dark theme is active.
    pub fn is_dark(&self) -> bool {
        self.theme == Theme::Dark
    }

    /// Switch to `theme` and persist it.
    ///
    /// # Errors
    ///
    /// Returns a [`ThemeError`] if the store cannot be written; the active
    /// theme is left unchanged.
    pub fn set(&mut self, theme: Theme) -> Result<(), ThemeError> {
        self.store.set(THEME_KEY, theme.as_str())?;
        self.theme = theme;

        Ok(())
    }

    /// Flip between light and dark and persist the result.
    ///
    /// # Errors
    ///
    /// Returns a [`ThemeError`] if the store cannot be written.
    pub fn toggle(&mut self) -> Result<Theme, ThemeError> {
        let theme = self.theme.toggled();
        self.set(theme)?;

        info!(%theme, "theme toggled");

        Ok(theme)
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Release the backing store.
    pub fn into_store(self) -> S {
        self.store
    }
}
