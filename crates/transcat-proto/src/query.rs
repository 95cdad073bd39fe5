//! Query descriptors.
//!
//! Each entity has its own closed set of lookups. The engine accepts only the
//! descriptor type of the entity being queried, so a lookup can never be
//! issued against the wrong entity.

use serde::{Deserialize, Serialize};

use crate::expression::ExpressionId;
use crate::locale::{LanguageCode, Locale, RegionCode, ScriptCode};
use crate::project::ProjectId;
use crate::translation::TranslationId;

/// Lookups over projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectQuery {
    /// Every project with its expressions and their translations.
    Hierarchy,
    /// By storage row key.
    PrimaryKey(i64),
    /// By identifier.
    Id(ProjectId),
    /// Name contains the given text.
    Named(String),
}

/// Lookups over expressions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpressionQuery {
    /// Every expression with its translations.
    Hierarchy,
    /// By storage row key.
    PrimaryKey(i64),
    /// By identifier.
    Id(ExpressionId),
    /// Expressions linked to a project.
    ProjectId(ProjectId),
    /// By unique key.
    Key(String),
    /// Name contains the given text.
    Named(String),
    /// Expressions with a translation in the language and, where supplied, the
    /// script and region.
    Having(LanguageCode, Option<ScriptCode>, Option<RegionCode>),
    /// Expressions with a base-language translation (no script, no region).
    HavingOnly(LanguageCode),
}

/// Lookups over translations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TranslationQuery {
    /// By storage row key.
    PrimaryKey(i64),
    /// By identifier.
    Id(TranslationId),
    /// Every translation of an expression.
    ExpressionId(ExpressionId),
    /// Translations of an expression with exactly this locale tuple; an absent
    /// script or region only matches translations without one.
    Having(ExpressionId, LanguageCode, Option<ScriptCode>, Option<RegionCode>),
    /// Base-language translations of an expression.
    HavingOnly(ExpressionId, LanguageCode),
}

impl TranslationQuery {
    /// Exact locale match for an expression.
    pub fn exact(expression_id: ExpressionId, locale: &Locale) -> Self {
        TranslationQuery::Having(
            expression_id,
            locale.language.clone(),
            locale.script,
            locale.region.clone(),
        )
    }
}

/// Arguments of the locale-matching read used by exporters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleResolution {
    /// Requested locale.
    pub locale: Locale,
    /// Fall back to the base language when no exact translation exists.
    pub fallback: bool,
}

impl LocaleResolution {
    /// Resolve for a locale, with fallback to the base language.
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            fallback: true,
        }
    }

    /// Require an exact locale match.
    pub fn exact_only(mut self) -> Self {
        self.fallback = false;
        self
    }

    /// Set whether fallback is allowed.
    pub fn with_fallback(mut self, fallback: bool) -> Self {
        self.fallback = fallback;
        self
    }
}
