//! Expression records.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::locale::LanguageCode;
use crate::translation::Translation;

/// Identifier of an [`Expression`].
pub type ExpressionId = Uuid;

/// A translatable unit identified by a unique key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expression {
    /// Engine-assigned identifier (nil until created).
    pub id: ExpressionId,
    /// Unique, non-empty key used in exported files.
    pub key: String,
    /// Human-readable name.
    pub name: String,
    /// Language the expression is authored in.
    pub default_language: LanguageCode,
    /// Guidance for translators.
    pub context: Option<String>,
    /// Grouping tag.
    pub feature: Option<String>,
    /// Nested translations; populated by hierarchy reads and consumed by cascading creates.
    #[serde(default)]
    pub translations: Vec<Translation>,
}

impl Expression {
    /// Create an unsaved expression without translations.
    pub fn new(key: impl Into<String>, name: impl Into<String>, default_language: LanguageCode) -> Self {
        Self {
            id: Uuid::nil(),
            key: key.into(),
            name: name.into(),
            default_language,
            context: None,
            feature: None,
            translations: Vec::new(),
        }
    }

    /// Set the translator context.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Set the feature tag.
    pub fn with_feature(mut self, feature: impl Into<String>) -> Self {
        self.feature = Some(feature.into());
        self
    }

    /// Add a nested translation.
    pub fn with_translation(mut self, translation: Translation) -> Self {
        self.translations.push(translation);
        self
    }

    /// A copy of this expression without its nested translations.
    pub fn shallow(&self) -> Self {
        Self {
            translations: Vec::new(),
            ..self.clone()
        }
    }
}
