//! Translation records.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::expression::ExpressionId;
use crate::locale::{LanguageCode, Locale, RegionCode, ScriptCode};

/// Identifier of a [`Translation`].
pub type TranslationId = Uuid;

/// A localized value of an expression for one locale tuple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    /// Engine-assigned identifier (nil until created).
    pub id: TranslationId,
    /// Owning expression.
    pub expression_id: ExpressionId,
    /// Language of the value.
    pub language: LanguageCode,
    /// Optional script of the value.
    pub script: Option<ScriptCode>,
    /// Optional region of the value.
    pub region: Option<RegionCode>,
    /// The translated text.
    pub value: String,
}

impl Translation {
    /// Create an unsaved base-language translation.
    pub fn new(expression_id: ExpressionId, language: LanguageCode, value: impl Into<String>) -> Self {
        Self {
            id: Uuid::nil(),
            expression_id,
            language,
            script: None,
            region: None,
            value: value.into(),
        }
    }

    /// Set the script.
    pub fn with_script(mut self, script: ScriptCode) -> Self {
        self.script = Some(script);
        self
    }

    /// Set the region.
    pub fn with_region(mut self, region: RegionCode) -> Self {
        self.region = Some(region);
        self
    }

    /// The locale tuple of this translation.
    pub fn locale(&self) -> Locale {
        Locale {
            language: self.language.clone(),
            script: self.script,
            region: self.region.clone(),
        }
    }

    /// Whether this translation has the given locale tuple exactly.
    pub fn matches_locale(&self, locale: &Locale) -> bool {
        self.language == locale.language && self.script == locale.script && self.region == locale.region
    }
}
