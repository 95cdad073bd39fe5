//! Catalog configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use transcat_proto::{LanguageCode, Locale, RegionCode};

use crate::error::{Error, Result};

/// What to do when a created expression reuses an existing key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCollision {
    /// Return the existing expression and add any new nested translations to it.
    #[default]
    Merge,
    /// Fail with a conflict error.
    Reject,
}

/// Configuration for a [`Catalog`](crate::Catalog).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Path to the catalog database file.
    pub path: PathBuf,

    /// In-memory database (discarded on drop).
    pub temporary: bool,

    /// Language used for new expressions and default exports.
    pub default_language: LanguageCode,

    /// Region used for default exports.
    pub default_region: Option<RegionCode>,

    /// Policy for expressions created with an existing key.
    pub key_collision: KeyCollision,

    /// Enforce foreign keys in SQLite.
    pub foreign_keys: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./catalog.sqlite"),
            temporary: false,
            default_language: LanguageCode::en(),
            default_region: None,
            key_collision: KeyCollision::Merge,
            foreign_keys: true,
        }
    }
}

impl CatalogConfig {
    /// Create a new configuration with the given database path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Create a temporary in-memory configuration for testing.
    pub fn temporary() -> Self {
        Self {
            path: PathBuf::from(""),
            temporary: true,
            ..Default::default()
        }
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }

    /// Set the default language.
    pub fn with_default_language(mut self, language: LanguageCode) -> Self {
        self.default_language = language;
        self
    }

    /// Set the default region.
    pub fn with_default_region(mut self, region: RegionCode) -> Self {
        self.default_region = Some(region);
        self
    }

    /// Set the key collision policy.
    pub fn with_key_collision(mut self, policy: KeyCollision) -> Self {
        self.key_collision = policy;
        self
    }

    /// Disable SQLite foreign key enforcement.
    pub fn without_foreign_keys(mut self) -> Self {
        self.foreign_keys = false;
        self
    }

    /// The default locale built from the default language and region.
    pub fn default_locale(&self) -> Locale {
        Locale {
            language: self.default_language.clone(),
            script: None,
            region: self.default_region.clone(),
        }
    }
}
